/// The status of a cross-domain message, as observed from the destination chain.
///
/// The numeric values match the ones used by the bridge SDK and the on-chain tooling, and the
/// variants from [`MessageStatus::StateRootNotPublished`] onwards form an ordered progression for
/// L2 to L1 messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
#[repr(u8)]
pub enum MessageStatus {
    /// An L1 to L2 message that has not been relayed on L2 yet.
    #[display("UNCONFIRMED_L1_TO_L2_MESSAGE")]
    UnconfirmedL1ToL2Message = 0,
    /// An L1 to L2 message whose execution on L2 failed. It can be replayed.
    #[display("FAILED_L1_TO_L2_MESSAGE")]
    FailedL1ToL2Message = 1,
    /// An L2 to L1 message whose L2 block is not yet covered by a proposed output.
    #[display("STATE_ROOT_NOT_PUBLISHED")]
    StateRootNotPublished = 2,
    /// An L2 to L1 message covered by a proposed output and ready to be proven on L1.
    #[display("READY_TO_PROVE")]
    ReadyToProve = 3,
    /// An L2 to L1 message that was proven and sits in the challenge period.
    #[display("IN_CHALLENGE_PERIOD")]
    InChallengePeriod = 4,
    /// An L2 to L1 message that passed the challenge period and can be finalized.
    #[display("READY_FOR_RELAY")]
    ReadyForRelay = 5,
    /// The message was relayed on the destination chain.
    #[display("RELAYED")]
    Relayed = 6,
}

impl MessageStatus {
    /// Returns true if the message reached its final state.
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Relayed)
    }

    /// Returns true if `self` is at or past `target`.
    ///
    /// Statuses are compared along the message progression. A failed L1 to L2 message sits
    /// outside of it and only satisfies itself.
    pub fn has_reached(&self, target: Self) -> bool {
        if *self == target {
            return true
        }
        match (self.rank(), target.rank()) {
            (Some(current), Some(target)) => current >= target,
            _ => false,
        }
    }

    const fn rank(&self) -> Option<u8> {
        match self {
            Self::FailedL1ToL2Message => None,
            status => Some(*status as u8),
        }
    }
}

/// The provided value does not map to a [`MessageStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid message status {0}")]
pub struct InvalidMessageStatus(pub u8);

impl TryFrom<u8> for MessageStatus {
    type Error = InvalidMessageStatus;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Ok(match value {
            0 => Self::UnconfirmedL1ToL2Message,
            1 => Self::FailedL1ToL2Message,
            2 => Self::StateRootNotPublished,
            3 => Self::ReadyToProve,
            4 => Self::InChallengePeriod,
            5 => Self::ReadyForRelay,
            6 => Self::Relayed,
            value => return Err(InvalidMessageStatus(value)),
        })
    }
}

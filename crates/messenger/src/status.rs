//! Resolution of a message status from the on-chain facts observed on both layers.

use alloy_primitives::BlockNumber;
use thanos_bridge_primitives::{MessageStatus, RelayOutcome};

/// Returns the status of an L1 to L2 message given its relay on L2, if any.
pub const fn deposit_status(relay: Option<RelayOutcome>) -> MessageStatus {
    match relay {
        Some(RelayOutcome::Relayed) => MessageStatus::Relayed,
        Some(RelayOutcome::Failed) => MessageStatus::FailedL1ToL2Message,
        None => MessageStatus::UnconfirmedL1ToL2Message,
    }
}

/// The facts about an L2 to L1 message, gathered from L1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WithdrawalFacts {
    /// The relay of the message on L1, if any.
    pub relay: Option<RelayOutcome>,
    /// The L2 block the withdrawal was initiated in.
    pub withdrawal_block: BlockNumber,
    /// The L2 block of the latest output proposed to L1.
    pub latest_output_block: BlockNumber,
    /// The L1 timestamp at which the withdrawal was proven, if it was.
    pub proven_at: Option<u64>,
    /// The challenge period, in seconds.
    pub finalization_period: u64,
    /// The timestamp of the L1 head.
    pub now: u64,
}

/// Returns the status of an L2 to L1 message.
pub const fn withdrawal_status(facts: &WithdrawalFacts) -> MessageStatus {
    match facts.relay {
        Some(RelayOutcome::Relayed) => return MessageStatus::Relayed,
        // a failed relay can be replayed.
        Some(RelayOutcome::Failed) => return MessageStatus::ReadyForRelay,
        None => {}
    }
    if facts.latest_output_block < facts.withdrawal_block {
        return MessageStatus::StateRootNotPublished
    }
    match facts.proven_at {
        None => MessageStatus::ReadyToProve,
        Some(proven_at) if facts.now < proven_at.saturating_add(facts.finalization_period) => {
            MessageStatus::InChallengePeriod
        }
        Some(_) => MessageStatus::ReadyForRelay,
    }
}

/// One of the two chains connected by the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Layer {
    /// The base chain.
    #[display("L1")]
    L1,
    /// The rollup.
    #[display("L2")]
    L2,
}

impl Layer {
    /// Returns the other layer.
    pub const fn counterpart(&self) -> Self {
        match self {
            Self::L1 => Self::L2,
            Self::L2 => Self::L1,
        }
    }
}

/// The direction of a cross-domain message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum MessageDirection {
    /// A deposit, sent on L1 and relayed on L2.
    #[display("L1_TO_L2")]
    L1ToL2,
    /// A withdrawal, sent on L2 and relayed on L1.
    #[display("L2_TO_L1")]
    L2ToL1,
}

impl MessageDirection {
    /// Returns the layer the message originates from.
    pub const fn source(&self) -> Layer {
        match self {
            Self::L1ToL2 => Layer::L1,
            Self::L2ToL1 => Layer::L2,
        }
    }

    /// Returns the layer the message is relayed on.
    pub const fn destination(&self) -> Layer {
        self.source().counterpart()
    }
}

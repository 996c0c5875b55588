//! Solidity bindings of the bridge contracts, generated with [`alloy_sol_types::sol`].

mod bridge;
pub use bridge::{IL1StandardBridge, IL2StandardBridge};

mod gas;
pub use gas::IGasPriceOracle;

mod messenger;
pub use messenger::{ICrossDomainMessenger, ILegacyCrossDomainMessenger};

mod oracle;
pub use oracle::{IL2OutputOracle, OutputProposal};

mod passer;
pub use passer::IL2ToL1MessagePasser;

mod portal;
pub use portal::{IOptimismPortal, OutputRootProof, WithdrawalTransaction};

mod token;
pub use token::IERC20;

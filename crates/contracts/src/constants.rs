use alloy_primitives::{address, Address};

/// The L2 cross-domain messenger predeploy.
pub const L2_CROSS_DOMAIN_MESSENGER: Address = address!("4200000000000000000000000000000000000007");

/// The L2 standard bridge predeploy.
pub const L2_STANDARD_BRIDGE: Address = address!("4200000000000000000000000000000000000010");

/// The L2 to L1 message passer predeploy.
pub const L2_TO_L1_MESSAGE_PASSER: Address = address!("4200000000000000000000000000000000000016");

/// The gas price oracle predeploy.
pub const GAS_PRICE_ORACLE: Address = address!("420000000000000000000000000000000000000F");

/// The ERC-20 representation of ETH on Thanos L2.
pub const L2_ETH: Address = address!("4200000000000000000000000000000000000486");

/// The legacy ERC-20 facade of the L2 native token. Withdrawing it withdraws the native token.
pub const LEGACY_ERC20_NATIVE_TOKEN: Address =
    address!("DeadDeAddeAddEAddeadDEaDDEAdDeaDDeAD0000");

/// The min gas limit attached to standard bridge deposits and withdrawals.
pub const DEFAULT_MIN_GAS_LIMIT: u32 = 200_000;

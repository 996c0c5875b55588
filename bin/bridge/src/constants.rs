use alloy_primitives::{address, Address, U256};

/// The max retries for the providers.
pub(crate) const PROVIDER_MAX_RETRIES: u32 = 10;

/// The initial backoff for the providers.
pub(crate) const PROVIDER_INITIAL_BACKOFF: u64 = 100;

/// The default provider compute units per second.
pub(crate) const PROVIDER_COMPUTE_UNITS_PER_SECOND: u64 = 10000;

/// The default interval between two message status queries, in seconds.
pub(crate) const DEFAULT_POLL_INTERVAL_SECS: u64 = 4;

/// The default message status wait timeout, in seconds. 0 waits until the status is reached.
pub(crate) const DEFAULT_WAIT_TIMEOUT_SECS: u64 = 0;

/// The default amount bridged by the ERC-20 flow, in token base units.
pub(crate) const DEFAULT_ERC20_AMOUNT: U256 = U256::from_limbs([1_000_000, 0, 0, 0]);

/// The default amount bridged by the ETH, native token and portal flows, in wei.
pub(crate) const DEFAULT_AMOUNT: U256 = U256::from_limbs([1, 0, 0, 0]);

/// The recipient of the transfer priced by the gas estimation flow.
pub(crate) const ESTIMATE_GAS_RECIPIENT: Address =
    address!("1000000000000000000000000000000000000000");

/// The value of the transfer priced by the gas estimation flow, 0.01 ether.
pub(crate) const ESTIMATE_GAS_VALUE: U256 = U256::from_limbs([10_000_000_000_000_000, 0, 0, 0]);

use crate::constants;
use alloy_primitives::{hex, Address, U256};
use alloy_signer_local::PrivateKeySigner;
use std::time::Duration;
use thanos_bridge_primitives::WaitOptions;
use thanos_messenger::{L1Contracts, DEFAULT_LOG_QUERY_BLOCK_RANGE};

/// Drives deposits and withdrawals across the Thanos bridge.
#[derive(Debug, clap::Parser)]
#[command(name = "thanos-bridge", version)]
pub struct Cli {
    /// The flow to run.
    #[command(subcommand)]
    pub command: Command,
    /// The L1 provider arguments.
    #[command(flatten)]
    pub l1_args: L1ProviderArgs,
    /// The L2 provider arguments.
    #[command(flatten)]
    pub l2_args: L2ProviderArgs,
    /// The signer arguments.
    #[command(flatten)]
    pub signer_args: SignerArgs,
    /// The bridge contracts arguments.
    #[command(flatten)]
    pub contracts_args: ContractsArgs,
    /// The message status wait arguments.
    #[command(flatten)]
    pub wait_args: WaitArgs,
}

/// The bridge flows.
#[derive(Debug, Clone, Copy, clap::Subcommand)]
pub enum Command {
    /// Deposits an ERC-20 through the standard bridge, then withdraws it.
    Erc20(TransferArgs),
    /// Deposits ETH through the standard bridge, then withdraws it.
    Eth(TransferArgs),
    /// Deposits the L2 native token through the standard bridge, then withdraws it.
    NativeToken(TransferArgs),
    /// Deposits the L2 native token through the optimism portal, then withdraws it through the
    /// message passer.
    Portal(TransferArgs),
    /// Estimates the L1 and L2 cost of an L2 transfer and compares it with the actual cost.
    EstimateGas,
}

/// The arguments of a deposit and withdrawal flow.
#[derive(Debug, Default, Clone, Copy, clap::Args)]
pub struct TransferArgs {
    /// Skips the deposit.
    #[arg(long = "skip-deposit")]
    pub skip_deposit: bool,
    /// Skips the withdrawal.
    #[arg(long = "skip-withdraw")]
    pub skip_withdraw: bool,
    /// The amount deposited and withdrawn, in base units.
    #[arg(long, value_name = "AMOUNT")]
    pub amount: Option<U256>,
}

impl TransferArgs {
    /// Returns the configured amount, or `default` if none.
    pub fn amount_or(&self, default: U256) -> U256 {
        self.amount.unwrap_or(default)
    }
}

/// The arguments for the L1 provider.
#[derive(Debug, Clone, clap::Args)]
pub struct L1ProviderArgs {
    /// The URL for the L1 RPC.
    #[arg(long = "l1.url", id = "l1_url", value_name = "L1_URL", env = "L1_RPC")]
    pub url: reqwest::Url,
    /// The expected chain id of the L1 RPC.
    #[arg(long = "l1.chain-id", id = "l1_chain_id", value_name = "L1_CHAIN_ID", env = "L1_CHAIN_ID")]
    pub chain_id: u64,
    /// The compute units per second for the provider.
    #[arg(long = "l1.cups", id = "l1_compute_units_per_second", value_name = "L1_COMPUTE_UNITS_PER_SECOND", default_value_t = constants::PROVIDER_COMPUTE_UNITS_PER_SECOND)]
    pub compute_units_per_second: u64,
    /// The max amount of retries for the provider.
    #[arg(long = "l1.max-retries", id = "l1_max_retries", value_name = "L1_MAX_RETRIES", default_value_t = constants::PROVIDER_MAX_RETRIES)]
    pub max_retries: u32,
    /// The initial backoff for the provider.
    #[arg(long = "l1.initial-backoff", id = "l1_initial_backoff", value_name = "L1_INITIAL_BACKOFF", default_value_t = constants::PROVIDER_INITIAL_BACKOFF)]
    pub initial_backoff: u64,
}

/// The arguments for the L2 provider.
#[derive(Debug, Clone, clap::Args)]
pub struct L2ProviderArgs {
    /// The URL for the L2 RPC.
    #[arg(long = "l2.url", id = "l2_url", value_name = "L2_URL", env = "L2_RPC")]
    pub url: reqwest::Url,
    /// The expected chain id of the L2 RPC.
    #[arg(long = "l2.chain-id", id = "l2_chain_id", value_name = "L2_CHAIN_ID", env = "L2_CHAIN_ID")]
    pub chain_id: u64,
    /// The compute units per second for the provider.
    #[arg(long = "l2.cups", id = "l2_compute_units_per_second", value_name = "L2_COMPUTE_UNITS_PER_SECOND", default_value_t = constants::PROVIDER_COMPUTE_UNITS_PER_SECOND)]
    pub compute_units_per_second: u64,
    /// The max amount of retries for the provider.
    #[arg(long = "l2.max-retries", id = "l2_max_retries", value_name = "L2_MAX_RETRIES", default_value_t = constants::PROVIDER_MAX_RETRIES)]
    pub max_retries: u32,
    /// The initial backoff for the provider.
    #[arg(long = "l2.initial-backoff", id = "l2_initial_backoff", value_name = "L2_INITIAL_BACKOFF", default_value_t = constants::PROVIDER_INITIAL_BACKOFF)]
    pub initial_backoff: u64,
}

/// The arguments for the signer.
#[derive(Debug, Clone, clap::Args)]
pub struct SignerArgs {
    /// The hex-encoded private key of the wallet (optional 0x prefix).
    #[arg(
        long = "signer.private-key",
        value_name = "PRIVATE_KEY",
        env = "PRIVATE_KEY",
        hide_env_values = true,
        value_parser = parse_private_key
    )]
    pub private_key: PrivateKeySigner,
}

/// Parses a hex-encoded private key, with or without the 0x prefix.
pub fn parse_private_key(key: &str) -> eyre::Result<PrivateKeySigner> {
    let key = key.trim();
    let hex_str = key.strip_prefix("0x").unwrap_or(key);
    let key_bytes =
        hex::decode(hex_str).map_err(|e| eyre::eyre!("Failed to decode hex private key: {}", e))?;
    PrivateKeySigner::from_slice(&key_bytes)
        .map_err(|e| eyre::eyre!("Failed to create signer from private key: {}", e))
}

/// The addresses of the bridge contracts and tokens.
#[derive(Debug, Clone, Copy, clap::Args)]
pub struct ContractsArgs {
    /// The ERC-20 on L1 backing the L2 native token.
    #[arg(long = "contracts.native-token", value_name = "ADDRESS", env = "NATIVE_TOKEN")]
    pub native_token: Address,
    /// The L1 cross-domain messenger.
    #[arg(
        long = "contracts.l1-cross-domain-messenger",
        value_name = "ADDRESS",
        env = "L1_CROSS_DOMAIN_MESSENGER"
    )]
    pub l1_cross_domain_messenger: Address,
    /// The L1 standard bridge.
    #[arg(long = "contracts.l1-standard-bridge", value_name = "ADDRESS", env = "L1_STANDARD_BRIDGE")]
    pub l1_standard_bridge: Address,
    /// The optimism portal.
    #[arg(long = "contracts.optimism-portal", value_name = "ADDRESS", env = "OPTIMISM_PORTAL")]
    pub optimism_portal: Address,
    /// The L2 output oracle.
    #[arg(long = "contracts.l2-output-oracle", value_name = "ADDRESS", env = "L2_OUTPUT_ORACLE")]
    pub l2_output_oracle: Address,
    /// The ERC-20 bridged by the ERC-20 flow, on L1.
    #[arg(long = "contracts.l1-erc20", value_name = "ADDRESS", env = "L1_ERC20_ADDRESS")]
    pub l1_erc20: Option<Address>,
    /// The ERC-20 bridged by the ERC-20 flow, on L2.
    #[arg(long = "contracts.l2-erc20", value_name = "ADDRESS", env = "L2_ERC20_ADDRESS")]
    pub l2_erc20: Option<Address>,
}

impl ContractsArgs {
    /// Returns the L1 contracts of the bridge.
    pub const fn l1_contracts(&self) -> L1Contracts {
        L1Contracts {
            cross_domain_messenger: self.l1_cross_domain_messenger,
            standard_bridge: self.l1_standard_bridge,
            optimism_portal: self.optimism_portal,
            l2_output_oracle: self.l2_output_oracle,
            native_token: self.native_token,
        }
    }

    /// Returns the L1 and L2 addresses of the ERC-20 bridged by the ERC-20 flow.
    pub fn erc20_pair(&self) -> eyre::Result<(Address, Address)> {
        match (self.l1_erc20, self.l2_erc20) {
            (Some(l1), Some(l2)) => Ok((l1, l2)),
            _ => Err(eyre::eyre!(
                "The ERC-20 flow requires both --contracts.l1-erc20 and --contracts.l2-erc20"
            )),
        }
    }
}

/// The arguments for waiting on message statuses.
#[derive(Debug, Clone, Copy, clap::Args)]
pub struct WaitArgs {
    /// The interval between two message status queries, in seconds.
    #[arg(long = "wait.poll-interval", value_name = "SECONDS", default_value_t = constants::DEFAULT_POLL_INTERVAL_SECS)]
    pub poll_interval: u64,
    /// The maximum duration of a message status wait, in seconds. 0 waits forever.
    #[arg(long = "wait.timeout", value_name = "SECONDS", default_value_t = constants::DEFAULT_WAIT_TIMEOUT_SECS)]
    pub timeout: u64,
    /// The block range of a single relay log query.
    #[arg(long = "wait.query-range", value_name = "BLOCKS", default_value_t = DEFAULT_LOG_QUERY_BLOCK_RANGE)]
    pub logs_query_block_range: u64,
}

impl WaitArgs {
    /// Returns the [`WaitOptions`] of the arguments.
    pub fn options(&self) -> WaitOptions {
        let timeout = (self.timeout != 0).then(|| Duration::from_secs(self.timeout));
        WaitOptions::default()
            .with_poll_interval(Duration::from_secs(self.poll_interval))
            .with_timeout(timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    const KEY: &str = "4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";

    fn base_args() -> Vec<&'static str> {
        vec![
            "thanos-bridge",
            "--l1.url",
            "http://localhost:8545",
            "--l1.chain-id",
            "11155111",
            "--l2.url",
            "http://localhost:9545",
            "--l2.chain-id",
            "111551119090",
            "--signer.private-key",
            KEY,
            "--contracts.native-token",
            "0xa30fe40285B8f5c0457DbC3B7C8A280373c40044",
            "--contracts.l1-cross-domain-messenger",
            "0x0000000000000000000000000000000000000001",
            "--contracts.l1-standard-bridge",
            "0x0000000000000000000000000000000000000002",
            "--contracts.optimism-portal",
            "0x0000000000000000000000000000000000000003",
            "--contracts.l2-output-oracle",
            "0x0000000000000000000000000000000000000004",
        ]
    }

    #[test]
    fn test_parse_private_key_with_and_without_prefix() {
        let plain = parse_private_key(KEY).unwrap();
        let prefixed = parse_private_key(&format!("0x{KEY}")).unwrap();
        assert_eq!(plain.address(), prefixed.address());

        assert!(parse_private_key("0xnot-hex").is_err());
        assert!(parse_private_key("0x1234").is_err());
    }

    #[test]
    fn test_parse_transfer_flags() {
        let mut args = base_args();
        args.extend([
            "--contracts.l1-erc20",
            "0x0000000000000000000000000000000000000005",
            "erc20",
            "--skip-deposit",
            "--amount",
            "42",
        ]);
        let cli = Cli::try_parse_from(args).unwrap();

        let Command::Erc20(transfer) = cli.command else { panic!("expected the erc20 flow") };
        assert!(transfer.skip_deposit);
        assert!(!transfer.skip_withdraw);
        assert_eq!(transfer.amount_or(constants::DEFAULT_ERC20_AMOUNT), U256::from(42));

        assert_eq!(cli.l1_args.max_retries, constants::PROVIDER_MAX_RETRIES);
        assert_eq!(cli.l2_args.chain_id, 111551119090);
        assert_eq!(cli.contracts_args.l1_erc20, Some(Address::with_last_byte(5)));
    }

    #[test]
    fn test_default_amounts() {
        let transfer = TransferArgs::default();
        assert_eq!(transfer.amount_or(constants::DEFAULT_ERC20_AMOUNT), U256::from(1_000_000));
        assert_eq!(transfer.amount_or(constants::DEFAULT_AMOUNT), U256::from(1));
        assert_eq!(constants::ESTIMATE_GAS_VALUE, U256::from(10_000_000_000_000_000u64));
    }

    #[test]
    fn test_wait_options() {
        let mut args = base_args();
        args.extend(["--wait.poll-interval", "1", "--wait.timeout", "0", "estimate-gas"]);
        let cli = Cli::try_parse_from(args).unwrap();

        let options = cli.wait_args.options();
        assert_eq!(options.poll_interval, Duration::from_secs(1));
        assert_eq!(options.timeout, None);
        assert_eq!(options.from_block, None);
        assert!(matches!(cli.command, Command::EstimateGas));

        let defaults = Cli::try_parse_from(
            base_args().into_iter().chain(["portal"]).collect::<Vec<_>>(),
        )
        .unwrap()
        .wait_args
        .options();
        assert_eq!(defaults, WaitOptions::default());
    }

    #[test]
    fn test_erc20_pair_requires_both_tokens() {
        let mut args = base_args();
        args.extend(["--contracts.l1-erc20", "0x0000000000000000000000000000000000000005", "eth"]);
        let cli = Cli::try_parse_from(args).unwrap();
        // the L2 token may be set from the environment.
        let missing = ContractsArgs { l2_erc20: None, ..cli.contracts_args };
        assert!(missing.erc20_pair().is_err());

        let contracts = ContractsArgs { l2_erc20: Some(Address::with_last_byte(6)), ..missing };
        assert_eq!(
            contracts.erc20_pair().unwrap(),
            (Address::with_last_byte(5), Address::with_last_byte(6))
        );
        assert_eq!(contracts.l1_contracts().optimism_portal, Address::with_last_byte(3));
    }
}

use crate::args::{Cli, ContractsArgs};
use alloy_network::{AnyNetwork, EthereumWallet};
use alloy_primitives::{Address, BlockNumber};
use alloy_provider::{DynProvider, Provider, ProviderBuilder};
use alloy_rpc_client::RpcClient;
use alloy_transport::layers::RetryBackoffLayer;
use std::sync::Arc;
use thanos_bridge_primitives::{Layer, WaitOptions};
use thanos_messenger::{BridgeClient, Portals, ThanosMessenger};

/// The L1 provider of the bridge flows.
pub type L1Provider = DynProvider;

/// The L2 provider of the bridge flows.
pub type L2Provider = DynProvider<AnyNetwork>;

/// The state shared by every bridge flow.
#[derive(Debug)]
pub struct BridgeContext {
    /// The client shared by the messenger and the portal.
    pub client: Arc<BridgeClient<L1Provider, L2Provider>>,
    /// The cross-domain messenger.
    pub messenger: ThanosMessenger<L1Provider, L2Provider>,
    /// The optimism portal.
    pub portal: Portals<L1Provider, L2Provider>,
    /// The contract and token addresses.
    pub contracts: ContractsArgs,
    /// The options used when waiting on message statuses.
    pub wait: WaitOptions,
}

impl BridgeContext {
    /// Connects to both layers with the wallet of the CLI and checks their chain ids.
    pub async fn connect(cli: &Cli) -> eyre::Result<Self> {
        let signer = cli.signer_args.private_key.clone();
        let address = signer.address();
        let wallet = EthereumWallet::from(signer);

        let l1_args = &cli.l1_args;
        let client = RpcClient::builder()
            .layer(RetryBackoffLayer::new(
                l1_args.max_retries,
                l1_args.initial_backoff,
                l1_args.compute_units_per_second,
            ))
            .http(l1_args.url.clone());
        let l1 = ProviderBuilder::new().wallet(wallet.clone()).connect_client(client).erased();

        let l2_args = &cli.l2_args;
        let client = RpcClient::builder()
            .layer(RetryBackoffLayer::new(
                l2_args.max_retries,
                l2_args.initial_backoff,
                l2_args.compute_units_per_second,
            ))
            .http(l2_args.url.clone());
        let l2 = ProviderBuilder::new()
            .network::<AnyNetwork>()
            .wallet(wallet)
            .connect_client(client)
            .erased();

        ensure_chain_id(Layer::L1, l1.get_chain_id().await?, l1_args.chain_id)?;
        ensure_chain_id(Layer::L2, l2.get_chain_id().await?, l2_args.chain_id)?;
        tracing::info!(target: "thanos::bridge", %address, l1_chain_id = l1_args.chain_id, l2_chain_id = l2_args.chain_id, "Connected wallet");

        let wait = cli.wait_args.options();
        let client = Arc::new(
            BridgeClient::new(l1, l2, address, cli.contracts_args.l1_contracts())
                .with_poll_interval(wait.poll_interval)
                .with_log_query_block_range(cli.wait_args.logs_query_block_range),
        );

        Ok(Self {
            messenger: ThanosMessenger::new(client.clone()),
            portal: Portals::new(client.clone()),
            client,
            contracts: cli.contracts_args,
            wait,
        })
    }

    /// Returns the L1 provider.
    pub fn l1(&self) -> &L1Provider {
        self.client.l1()
    }

    /// Returns the L2 provider.
    pub fn l2(&self) -> &L2Provider {
        self.client.l2()
    }

    /// Returns the wallet address.
    pub fn wallet(&self) -> Address {
        self.client.wallet()
    }

    /// Returns the head block number of the layer.
    pub async fn head(&self, layer: Layer) -> eyre::Result<BlockNumber> {
        Ok(self.client.block_number(layer).await?)
    }
}

fn ensure_chain_id(layer: Layer, actual: u64, expected: u64) -> eyre::Result<()> {
    if actual != expected {
        eyre::bail!("{layer} chain id mismatch: node reports {actual}, expected {expected}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_id_mismatch() {
        assert!(ensure_chain_id(Layer::L1, 1, 1).is_ok());

        let err = ensure_chain_id(Layer::L2, 10, 11).unwrap_err();
        assert!(err.to_string().contains("expected 11"));
    }
}

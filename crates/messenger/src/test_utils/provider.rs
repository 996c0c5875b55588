use crate::{BridgeClient, L1Contracts};
use alloy_network::{AnyNetwork, Ethereum};
use alloy_primitives::{Address, Bytes, LogData, TxHash, B256};
use alloy_provider::{Identity, ProviderBuilder, RootProvider};
use alloy_rpc_types_eth::{Block, Header, Log, Transaction};
use alloy_sol_types::SolValue;
use alloy_transport::mock::Asserter;

/// A [`BridgeClient`] over providers replaying mocked responses.
pub type MockBridgeClient = BridgeClient<RootProvider, RootProvider<AnyNetwork>>;

/// The L1 contracts of the mocked client.
pub const MOCK_CONTRACTS: L1Contracts = L1Contracts {
    cross_domain_messenger: Address::with_last_byte(1),
    standard_bridge: Address::with_last_byte(2),
    optimism_portal: Address::with_last_byte(3),
    l2_output_oracle: Address::with_last_byte(4),
    native_token: Address::with_last_byte(5),
};

/// The RPC responses served to the providers of a [`MockBridgeClient`], in request order.
#[derive(Debug, Default, Clone)]
pub struct MockResponses {
    /// The L1 responses.
    pub l1: Asserter,
    /// The L2 responses.
    pub l2: Asserter,
}

impl MockResponses {
    /// Queues the return data of an L1 contract call.
    pub fn l1_call<T: SolValue>(&self, value: T) {
        self.l1.push_success(&Bytes::from(value.abi_encode()));
    }

    /// Queues a block number response on L1.
    pub fn l1_block_number(&self, number: u64) {
        self.l1.push_success(&number);
    }

    /// Queues a `eth_getLogs` response on L1.
    pub fn l1_logs(&self, logs: Vec<Log>) {
        self.l1.push_success(&logs);
    }

    /// Queues an L1 block with the timestamp.
    pub fn l1_block(&self, timestamp: u64) {
        let header = alloy_consensus::Header { timestamp, ..Default::default() };
        self.l1.push_success(&Block::<Transaction>::empty(Header::new(header)));
    }

    /// Returns true if every queued response was served.
    pub fn is_drained(&self) -> bool {
        self.l1.read_q().is_empty() && self.l2.read_q().is_empty()
    }
}

/// Returns a [`MockBridgeClient`] over [`MOCK_CONTRACTS`] and the responses it is served.
pub fn mock_client() -> (MockBridgeClient, MockResponses) {
    let responses = MockResponses::default();
    let l1 = ProviderBuilder::<Identity, Identity, Ethereum>::default()
        .connect_mocked_client(responses.l1.clone());
    let l2 = ProviderBuilder::<Identity, Identity, AnyNetwork>::default()
        .connect_mocked_client(responses.l2.clone());
    let client = BridgeClient::new(l1, l2, Address::with_last_byte(0xaa), MOCK_CONTRACTS);
    (client, responses)
}

/// Returns a log of `address` with the topics, emitted by the transaction.
pub fn mock_log(address: Address, topics: Vec<B256>, tx_hash: TxHash) -> Log {
    Log {
        inner: alloy_primitives::Log {
            address,
            data: LogData::new_unchecked(topics, Bytes::new()),
        },
        transaction_hash: Some(tx_hash),
        ..Default::default()
    }
}

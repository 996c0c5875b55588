use crate::{
    status::{withdrawal_status, WithdrawalFacts},
    MessengerError, MessengerMetrics, MessengerResult,
};
use alloy_eips::BlockNumberOrTag;
use alloy_network::{AnyNetwork, Ethereum, Network, ReceiptResponse};
use alloy_primitives::{Address, BlockNumber, TxHash, B256};
use alloy_provider::{PendingTransactionBuilder, Provider};
use alloy_rpc_types_eth::{Filter, Log};
use alloy_sol_types::SolEvent;
use std::{future::Future, time::Duration};
use thanos_bridge_primitives::{
    BridgeReceipt, Layer, MessageDirection, MessageReceipt, MessageRef, MessageStatus,
    RelayOutcome, DEFAULT_POLL_INTERVAL,
};
use thanos_contracts::{
    abi::{
        ICrossDomainMessenger::{FailedRelayedMessage, ICrossDomainMessengerInstance, RelayedMessage},
        IL2OutputOracle::{self, IL2OutputOracleInstance},
        IOptimismPortal::{self, IOptimismPortalInstance},
    },
    cross_domain_messages, withdrawal_messages, CrossDomainMessage, WithdrawalMessage,
    L2_CROSS_DOMAIN_MESSENGER, L2_TO_L1_MESSAGE_PASSER,
};
use tokio::time::Instant;

/// The default block range of a single relay log query.
pub const DEFAULT_LOG_QUERY_BLOCK_RANGE: u64 = 500;

/// The addresses of the bridge contracts deployed on L1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct L1Contracts {
    /// The L1 cross-domain messenger.
    pub cross_domain_messenger: Address,
    /// The L1 standard bridge.
    pub standard_bridge: Address,
    /// The optimism portal.
    pub optimism_portal: Address,
    /// The L2 output oracle.
    pub l2_output_oracle: Address,
    /// The ERC-20 on L1 backing the L2 native token.
    pub native_token: Address,
}

/// The client shared by the messenger and the portal. Holds a provider per layer, both expected to
/// sign for the same `wallet`.
#[derive(Debug)]
pub struct BridgeClient<L1, L2> {
    /// The L1 provider. The provider should implement some backoff strategy using
    /// [`alloy_transport::layers::RetryBackoffLayer`] in order to ride out rate limits.
    l1: L1,
    /// The L2 provider. Uses [`AnyNetwork`] in order to handle deposit receipts and the L1 fee
    /// receipt fields.
    l2: L2,
    /// The wallet address, sender and recipient of all bridge operations.
    wallet: Address,
    /// The L1 contracts.
    contracts: L1Contracts,
    /// The interval between two receipt queries.
    poll_interval: Duration,
    /// The log query block range.
    log_query_block_range: u64,
    /// The metrics for the client.
    metrics: MessengerMetrics,
}

impl<L1, L2> BridgeClient<L1, L2>
where
    L1: Provider,
    L2: Provider<AnyNetwork>,
{
    /// Returns a new [`BridgeClient`].
    pub fn new(l1: L1, l2: L2, wallet: Address, contracts: L1Contracts) -> Self {
        Self {
            l1,
            l2,
            wallet,
            contracts,
            poll_interval: DEFAULT_POLL_INTERVAL,
            log_query_block_range: DEFAULT_LOG_QUERY_BLOCK_RANGE,
            metrics: MessengerMetrics::default(),
        }
    }

    /// Sets the interval between two receipt queries.
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Sets the block range of a single relay log query.
    pub fn with_log_query_block_range(mut self, range: u64) -> Self {
        self.log_query_block_range = range.max(1);
        self
    }

    /// Returns the L1 provider.
    pub const fn l1(&self) -> &L1 {
        &self.l1
    }

    /// Returns the L2 provider.
    pub const fn l2(&self) -> &L2 {
        &self.l2
    }

    /// Returns the wallet address.
    pub const fn wallet(&self) -> Address {
        self.wallet
    }

    /// Returns the L1 contracts.
    pub const fn contracts(&self) -> &L1Contracts {
        &self.contracts
    }

    /// Returns the client metrics.
    pub const fn metrics(&self) -> &MessengerMetrics {
        &self.metrics
    }

    pub(crate) fn portal(&self) -> IOptimismPortalInstance<&L1, Ethereum> {
        IOptimismPortal::new(self.contracts.optimism_portal, &self.l1)
    }

    pub(crate) fn oracle(&self) -> IL2OutputOracleInstance<&L1, Ethereum> {
        IL2OutputOracle::new(self.contracts.l2_output_oracle, &self.l1)
    }

    const fn messenger_address(&self, layer: Layer) -> Address {
        match layer {
            Layer::L1 => self.contracts.cross_domain_messenger,
            Layer::L2 => L2_CROSS_DOMAIN_MESSENGER,
        }
    }

    /// Records a submitted transaction and returns its hash.
    pub(crate) fn submitted<N: Network>(
        &self,
        layer: Layer,
        pending: PendingTransactionBuilder<N>,
    ) -> TxHash {
        let tx_hash = *pending.tx_hash();
        self.metrics.submitted(layer);
        tracing::debug!(target: "thanos::messenger", %layer, %tx_hash, "submitted transaction");
        tx_hash
    }

    /// Returns the head block number of the layer.
    pub async fn block_number(&self, layer: Layer) -> MessengerResult<BlockNumber> {
        Ok(match layer {
            Layer::L1 => self.l1.get_block_number().await?,
            Layer::L2 => self.l2.get_block_number().await?,
        })
    }

    /// Returns the receipt of the transaction, if it was mined.
    pub async fn receipt(
        &self,
        layer: Layer,
        tx_hash: TxHash,
    ) -> MessengerResult<Option<BridgeReceipt>> {
        Ok(match layer {
            Layer::L1 => self.l1.get_transaction_receipt(tx_hash).await?.as_ref().map(bridge_receipt),
            Layer::L2 => self.l2.get_transaction_receipt(tx_hash).await?.as_ref().map(bridge_receipt),
        })
    }

    async fn mined_receipt(&self, layer: Layer, tx_hash: TxHash) -> MessengerResult<BridgeReceipt> {
        self.receipt(layer, tx_hash).await?.ok_or(MessengerError::MissingReceipt { layer, tx_hash })
    }

    /// Waits until the transaction is mined and `confirmations` blocks deep, the inclusion block
    /// counting as the first one. Fails if the transaction reverted.
    pub async fn wait_for_receipt(
        &self,
        layer: Layer,
        tx_hash: TxHash,
        confirmations: u64,
    ) -> MessengerResult<BridgeReceipt> {
        let start = Instant::now();
        let receipt = loop {
            if let Some(receipt) = self.receipt(layer, tx_hash).await? {
                break receipt
            }
            tokio::time::sleep(self.poll_interval).await;
        };
        if !receipt.success {
            return Err(MessengerError::Reverted(tx_hash))
        }

        if let Some(block) = receipt.block_number {
            let target = block.saturating_add(confirmations.saturating_sub(1));
            while self.block_number(layer).await? < target {
                tokio::time::sleep(self.poll_interval).await;
            }
        }

        self.metrics.receipt_wait_duration.record(start.elapsed().as_secs_f64());
        tracing::debug!(target: "thanos::messenger", %layer, %tx_hash, block = ?receipt.block_number, "transaction mined");
        Ok(receipt)
    }

    /// Returns the logs emitted by `address` in the transaction of the receipt.
    pub async fn receipt_logs(
        &self,
        layer: Layer,
        receipt: &BridgeReceipt,
        address: Address,
    ) -> MessengerResult<Vec<Log>> {
        let tx_hash = receipt.transaction_hash;
        let block_hash =
            receipt.block_hash.ok_or(MessengerError::MissingReceipt { layer, tx_hash })?;
        let filter = Filter::new().address(address).at_block_hash(block_hash);
        let logs = match layer {
            Layer::L1 => self.l1.get_logs(&filter).await?,
            Layer::L2 => self.l2.get_logs(&filter).await?,
        };
        Ok(logs.into_iter().filter(|log| log.transaction_hash == Some(tx_hash)).collect())
    }

    /// Returns the cross-domain message referenced by `message`.
    pub async fn sent_message(
        &self,
        message: MessageRef,
        direction: MessageDirection,
    ) -> MessengerResult<CrossDomainMessage> {
        let layer = direction.source();
        let receipt = self.mined_receipt(layer, message.tx_hash).await?;
        let messenger = self.messenger_address(layer);
        let logs = self.receipt_logs(layer, &receipt, messenger).await?;
        cross_domain_messages(&logs, messenger)?
            .into_iter()
            .nth(message.index)
            .ok_or(MessengerError::MessageNotFound(message))
    }

    /// Returns the withdrawal referenced by `message`.
    pub async fn withdrawal(&self, message: MessageRef) -> MessengerResult<WithdrawalMessage> {
        let receipt = self.mined_receipt(Layer::L2, message.tx_hash).await?;
        self.withdrawal_in(&receipt, message.index)
            .await?
            .ok_or(MessengerError::MessageNotFound(message))
    }

    /// Returns the `index`-th withdrawal initiated by the L2 transaction of the receipt.
    pub async fn withdrawal_in(
        &self,
        receipt: &BridgeReceipt,
        index: usize,
    ) -> MessengerResult<Option<WithdrawalMessage>> {
        let block = receipt.block_number.ok_or(MessengerError::MissingReceipt {
            layer: Layer::L2,
            tx_hash: receipt.transaction_hash,
        })?;
        let logs = self.receipt_logs(Layer::L2, receipt, L2_TO_L1_MESSAGE_PASSER).await?;
        Ok(withdrawal_messages(&logs, block)?.into_iter().nth(index))
    }

    /// Returns the relay of the message on the `destination` layer, if any.
    ///
    /// With a `from_block`, the relay logs of the destination messenger are searched from that
    /// block, which also recovers the relay transaction. Otherwise, the messenger mappings are
    /// read.
    pub async fn relay(
        &self,
        message: &CrossDomainMessage,
        destination: Layer,
        from_block: Option<BlockNumber>,
    ) -> MessengerResult<Option<MessageReceipt>> {
        let msg_hash = message.hash()?;
        let messenger = self.messenger_address(destination);
        let range = self.log_query_block_range;
        match (destination, from_block) {
            (Layer::L1, Some(from)) => {
                relay_from_logs::<_, Ethereum>(&self.l1, messenger, msg_hash, from, range).await
            }
            (Layer::L2, Some(from)) => {
                relay_from_logs::<_, AnyNetwork>(&self.l2, messenger, msg_hash, from, range).await
            }
            (Layer::L1, None) => {
                relay_from_mappings::<_, Ethereum>(&self.l1, messenger, msg_hash).await
            }
            (Layer::L2, None) => {
                relay_from_mappings::<_, AnyNetwork>(&self.l2, messenger, msg_hash).await
            }
        }
    }

    /// Gathers the L1 facts about the withdrawal, short of its relay.
    pub(crate) async fn withdrawal_facts(
        &self,
        withdrawal: &WithdrawalMessage,
    ) -> MessengerResult<WithdrawalFacts> {
        let oracle = self.oracle();
        let latest_output_block = oracle.latestBlockNumber().call().await?.saturating_to();
        let finalization_period =
            oracle.FINALIZATION_PERIOD_SECONDS().call().await?.saturating_to();
        let proven = self.portal().provenWithdrawals(withdrawal.withdrawal_hash).call().await?;
        let proven_at = (proven.timestamp != 0)
            .then(|| u64::try_from(proven.timestamp).unwrap_or(u64::MAX));
        let head = self
            .l1
            .get_block_by_number(BlockNumberOrTag::Latest)
            .await?
            .ok_or(MessengerError::MissingBlock(BlockNumberOrTag::Latest, Layer::L1))?;

        Ok(WithdrawalFacts {
            relay: None,
            withdrawal_block: withdrawal.l2_block_number,
            latest_output_block,
            proven_at,
            finalization_period,
            now: head.header.timestamp,
        })
    }

    /// Returns the status of the withdrawal. `relay` is only awaited once the L1 facts make the
    /// withdrawal [`MessageStatus::ReadyForRelay`], a relay being impossible before.
    pub(crate) async fn resolve_withdrawal_status<F, Fut>(
        &self,
        withdrawal: &WithdrawalMessage,
        relay: F,
    ) -> MessengerResult<MessageStatus>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = MessengerResult<Option<RelayOutcome>>>,
    {
        let facts = self.withdrawal_facts(withdrawal).await?;
        Ok(match withdrawal_status(&facts) {
            MessageStatus::ReadyForRelay => {
                withdrawal_status(&WithdrawalFacts { relay: relay().await?, ..facts })
            }
            status => status,
        })
    }

    /// Submits the finalization of a proven withdrawal to the portal.
    pub async fn finalize_withdrawal_transaction(
        &self,
        withdrawal: &WithdrawalMessage,
    ) -> MessengerResult<TxHash> {
        tracing::debug!(target: "thanos::messenger", hash = %withdrawal.withdrawal_hash, "finalizing withdrawal");
        let pending =
            self.portal().finalizeWithdrawalTransaction(withdrawal.transaction.clone()).send().await?;
        Ok(self.submitted(Layer::L1, pending))
    }
}

/// Returns the chain agnostic summary of the receipt.
fn bridge_receipt<R: ReceiptResponse>(receipt: &R) -> BridgeReceipt {
    BridgeReceipt {
        transaction_hash: receipt.transaction_hash(),
        block_number: receipt.block_number(),
        block_hash: receipt.block_hash(),
        gas_used: receipt.gas_used(),
        effective_gas_price: receipt.effective_gas_price(),
        success: receipt.status(),
    }
}

/// Searches the relay logs of the messenger for the message, in `range` sized block chunks from
/// `from_block` to the head. A successful relay takes precedence over failed attempts.
async fn relay_from_logs<P, N>(
    provider: &P,
    messenger: Address,
    msg_hash: B256,
    from_block: BlockNumber,
    range: u64,
) -> MessengerResult<Option<MessageReceipt>>
where
    P: Provider<N>,
    N: Network,
{
    let head = provider.get_block_number().await?;
    let mut failed = None;
    let mut start = from_block;
    while start <= head {
        let end = start.saturating_add(range - 1).min(head);
        let filter = Filter::new()
            .address(messenger)
            .event_signature(vec![RelayedMessage::SIGNATURE_HASH, FailedRelayedMessage::SIGNATURE_HASH])
            .topic1(msg_hash)
            .from_block(start)
            .to_block(end);

        for log in provider.get_logs(&filter).await? {
            if log.topics().first() == Some(&RelayedMessage::SIGNATURE_HASH) {
                return Ok(Some(MessageReceipt {
                    outcome: RelayOutcome::Relayed,
                    transaction_hash: log.transaction_hash,
                }))
            }
            failed = Some(MessageReceipt {
                outcome: RelayOutcome::Failed,
                transaction_hash: log.transaction_hash,
            });
        }
        start = end + 1;
    }
    Ok(failed)
}

/// Reads the relay outcome of the message from the messenger mappings.
async fn relay_from_mappings<P, N>(
    provider: &P,
    messenger: Address,
    msg_hash: B256,
) -> MessengerResult<Option<MessageReceipt>>
where
    P: Provider<N>,
    N: Network,
{
    let messenger = ICrossDomainMessengerInstance::<_, N>::new(messenger, provider);
    let outcome = if messenger.successfulMessages(msg_hash).call().await? {
        Some(RelayOutcome::Relayed)
    } else if messenger.failedMessages(msg_hash).call().await? {
        Some(RelayOutcome::Failed)
    } else {
        None
    };
    Ok(outcome.map(|outcome| MessageReceipt { outcome, transaction_hash: None }))
}

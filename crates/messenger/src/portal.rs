use crate::{wait_for_status, BridgeClient, MessengerError, MessengerResult};
use alloy_network::AnyNetwork;
use alloy_primitives::{Address, TxHash, U256};
use alloy_provider::Provider;
use std::sync::Arc;
use thanos_bridge_primitives::{
    BridgeReceipt, DepositTransactionRequest, Layer, MessageRef, MessageStatus, RelayOutcome,
    WaitOptions, WithdrawalRequest,
};
use thanos_contracts::{
    abi::IL2ToL1MessagePasser::{self, IL2ToL1MessagePasserInstance},
    deposit_events, WithdrawalMessage, L2_TO_L1_MESSAGE_PASSER,
};

/// Implementers of the trait deposit and withdraw through the optimism portal directly, bypassing
/// the cross-domain messengers.
#[async_trait::async_trait]
#[auto_impl::auto_impl(&, Arc)]
pub trait Portal: Send + Sync {
    /// Returns the address of the portal on L1.
    fn portal_address(&self) -> Address;

    /// Submits a deposit to the portal. The portal pulls `mint` of the native token from the
    /// sender, which must have approved it.
    async fn deposit_transaction(
        &self,
        request: DepositTransactionRequest,
    ) -> MessengerResult<TxHash>;

    /// Initiates a withdrawal through the L2 message passer.
    async fn initiate_withdrawal(&self, request: WithdrawalRequest) -> MessengerResult<TxHash>;

    /// Returns the withdrawal initiated by the L2 transaction of the receipt.
    async fn calculate_withdrawal_message(
        &self,
        receipt: &BridgeReceipt,
    ) -> MessengerResult<WithdrawalMessage>;

    /// Proves the withdrawal on L1.
    async fn prove_withdrawal_transaction(
        &self,
        withdrawal: &WithdrawalMessage,
    ) -> MessengerResult<TxHash>;

    /// Finalizes the proven withdrawal on L1.
    async fn finalize_withdrawal_transaction(
        &self,
        withdrawal: &WithdrawalMessage,
    ) -> MessengerResult<TxHash>;

    /// Waits for the L2 transaction derived from the deposit of the L1 receipt and returns its
    /// hash. Returns `None` if the receipt carries no deposit.
    async fn waiting_deposit_transaction_relayed(
        &self,
        receipt: &BridgeReceipt,
        options: &WaitOptions,
    ) -> MessengerResult<Option<TxHash>>;

    /// Waits until an output covering the withdrawal of the L2 receipt is proposed, making the
    /// withdrawal provable.
    async fn wait_for_withdrawal_tx_ready_for_relay(
        &self,
        receipt: &BridgeReceipt,
        options: &WaitOptions,
    ) -> MessengerResult<MessageStatus>;

    /// Waits until the challenge period of the proven withdrawal is over.
    async fn wait_for_finalization(
        &self,
        withdrawal: &WithdrawalMessage,
        options: &WaitOptions,
    ) -> MessengerResult<MessageStatus>;

    /// Returns the status of the withdrawal initiated by the L2 transaction of the receipt.
    async fn get_message_status(&self, receipt: &BridgeReceipt) -> MessengerResult<MessageStatus>;

    /// Waits until the transaction is mined with `confirmations` confirmations.
    async fn wait_for_receipt(
        &self,
        layer: Layer,
        tx_hash: TxHash,
        confirmations: u64,
    ) -> MessengerResult<BridgeReceipt>;
}

/// The [`Portal`] of Thanos, on which deposits mint the L2 native token.
#[derive(Debug)]
pub struct Portals<L1, L2> {
    client: Arc<BridgeClient<L1, L2>>,
}

impl<L1, L2> Clone for Portals<L1, L2> {
    fn clone(&self) -> Self {
        Self { client: self.client.clone() }
    }
}

impl<L1, L2> Portals<L1, L2>
where
    L1: Provider,
    L2: Provider<AnyNetwork>,
{
    /// Returns a new [`Portals`] over the client.
    pub const fn new(client: Arc<BridgeClient<L1, L2>>) -> Self {
        Self { client }
    }

    /// Returns the underlying client.
    pub fn client(&self) -> &BridgeClient<L1, L2> {
        &self.client
    }

    fn message_passer(&self) -> IL2ToL1MessagePasserInstance<&L2, AnyNetwork> {
        IL2ToL1MessagePasser::new(L2_TO_L1_MESSAGE_PASSER, self.client.l2())
    }

    /// Returns the status of the withdrawal, relayed once finalized on the portal.
    async fn status_of(
        &self,
        withdrawal: &WithdrawalMessage,
    ) -> MessengerResult<MessageStatus> {
        self.client.metrics().status_queries.increment(1);
        let finalized = move || async move {
            let finalized = self
                .client
                .portal()
                .finalizedWithdrawals(withdrawal.withdrawal_hash)
                .call()
                .await?;
            Ok::<_, MessengerError>(finalized.then_some(RelayOutcome::Relayed))
        };
        let status = self.client.resolve_withdrawal_status(withdrawal, finalized).await?;
        tracing::trace!(target: "thanos::portal", hash = %withdrawal.withdrawal_hash, %status, "withdrawal status");
        Ok(status)
    }
}

#[async_trait::async_trait]
impl<L1, L2> Portal for Portals<L1, L2>
where
    L1: Provider,
    L2: Provider<AnyNetwork>,
{
    fn portal_address(&self) -> Address {
        self.client.contracts().optimism_portal
    }

    async fn deposit_transaction(
        &self,
        request: DepositTransactionRequest,
    ) -> MessengerResult<TxHash> {
        let pending = self
            .client
            .portal()
            .depositTransaction(
                request.to,
                request.mint,
                request.value,
                request.gas_limit,
                request.is_creation,
                request.data,
            )
            .send()
            .await?;
        Ok(self.client.submitted(Layer::L1, pending))
    }

    async fn initiate_withdrawal(&self, request: WithdrawalRequest) -> MessengerResult<TxHash> {
        let pending = self
            .message_passer()
            .initiateWithdrawal(request.target, U256::from(request.gas_limit), request.data)
            .value(request.value)
            .send()
            .await?;
        Ok(self.client.submitted(Layer::L2, pending))
    }

    async fn calculate_withdrawal_message(
        &self,
        receipt: &BridgeReceipt,
    ) -> MessengerResult<WithdrawalMessage> {
        self.client
            .withdrawal_in(receipt, 0)
            .await?
            .ok_or(MessengerError::MessageNotFound(MessageRef::from(receipt.transaction_hash)))
    }

    async fn prove_withdrawal_transaction(
        &self,
        withdrawal: &WithdrawalMessage,
    ) -> MessengerResult<TxHash> {
        self.client.prove_withdrawal_transaction(withdrawal).await
    }

    async fn finalize_withdrawal_transaction(
        &self,
        withdrawal: &WithdrawalMessage,
    ) -> MessengerResult<TxHash> {
        self.client.finalize_withdrawal_transaction(withdrawal).await
    }

    async fn waiting_deposit_transaction_relayed(
        &self,
        receipt: &BridgeReceipt,
        options: &WaitOptions,
    ) -> MessengerResult<Option<TxHash>> {
        let portal = self.portal_address();
        let logs = self.client.receipt_logs(Layer::L1, receipt, portal).await?;
        let Some(deposit) = deposit_events(&logs, portal)?.into_iter().next() else {
            return Ok(None)
        };

        let l2_tx_hash = deposit.l2_tx_hash();
        tracing::debug!(target: "thanos::portal", l1_tx_hash = %receipt.transaction_hash, %l2_tx_hash, "waiting for deposit");
        wait_for_status(
            move || async move {
                let relayed = self.client.receipt(Layer::L2, l2_tx_hash).await?.is_some();
                Ok(if relayed {
                    MessageStatus::Relayed
                } else {
                    MessageStatus::UnconfirmedL1ToL2Message
                })
            },
            MessageStatus::Relayed,
            options,
        )
        .await?;
        Ok(Some(l2_tx_hash))
    }

    async fn wait_for_withdrawal_tx_ready_for_relay(
        &self,
        receipt: &BridgeReceipt,
        options: &WaitOptions,
    ) -> MessengerResult<MessageStatus> {
        let withdrawal = self.calculate_withdrawal_message(receipt).await?;
        wait_for_status(|| self.status_of(&withdrawal), MessageStatus::ReadyToProve, options)
            .await
    }

    async fn wait_for_finalization(
        &self,
        withdrawal: &WithdrawalMessage,
        options: &WaitOptions,
    ) -> MessengerResult<MessageStatus> {
        wait_for_status(|| self.status_of(withdrawal), MessageStatus::ReadyForRelay, options)
            .await
    }

    async fn get_message_status(&self, receipt: &BridgeReceipt) -> MessengerResult<MessageStatus> {
        let withdrawal = self.calculate_withdrawal_message(receipt).await?;
        self.status_of(&withdrawal).await
    }

    async fn wait_for_receipt(
        &self,
        layer: Layer,
        tx_hash: TxHash,
        confirmations: u64,
    ) -> MessengerResult<BridgeReceipt> {
        self.client.wait_for_receipt(layer, tx_hash, confirmations).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{mock_client, mock_log, MockResponses, MOCK_CONTRACTS};
    use alloy_primitives::{Bytes, B256};
    use alloy_provider::RootProvider;
    use alloy_rpc_types_eth::Log;
    use alloy_sol_types::SolEvent;
    use std::time::Duration;
    use thanos_contracts::{
        abi::{
            IL2ToL1MessagePasser::MessagePassed, IOptimismPortal::TransactionDeposited,
            WithdrawalTransaction,
        },
        withdrawal_hash,
    };

    const PORTAL: Address = MOCK_CONTRACTS.optimism_portal;

    fn receipt(block_number: u64) -> BridgeReceipt {
        BridgeReceipt {
            transaction_hash: TxHash::with_last_byte(0x01),
            block_number: Some(block_number),
            block_hash: Some(B256::with_last_byte(0x02)),
            gas_used: 21_000,
            effective_gas_price: 1,
            success: true,
        }
    }

    fn event_log<E: SolEvent>(address: Address, event: &E, tx_hash: TxHash) -> Log {
        Log {
            inner: alloy_primitives::Log { address, data: event.encode_log_data() },
            block_hash: Some(B256::with_last_byte(0x02)),
            log_index: Some(0),
            transaction_hash: Some(tx_hash),
            ..Default::default()
        }
    }

    fn portals() -> (Portals<RootProvider, RootProvider<AnyNetwork>>, MockResponses) {
        let (client, responses) = mock_client();
        (Portals::new(Arc::new(client)), responses)
    }

    fn withdrawal_log(tx_hash: TxHash) -> Log {
        let transaction = WithdrawalTransaction {
            nonce: U256::from(1),
            sender: Address::with_last_byte(0x10),
            target: Address::with_last_byte(0x11),
            value: U256::from(5),
            gasLimit: U256::from(100_000),
            data: Bytes::new(),
        };
        let passed = MessagePassed {
            nonce: transaction.nonce,
            sender: transaction.sender,
            target: transaction.target,
            value: transaction.value,
            gasLimit: transaction.gasLimit,
            data: transaction.data.clone(),
            withdrawalHash: withdrawal_hash(&transaction),
        };
        event_log(L2_TO_L1_MESSAGE_PASSER, &passed, tx_hash)
    }

    #[tokio::test]
    async fn test_deposit_relay_without_deposit_event() {
        let (portal, responses) = portals();
        let receipt = receipt(10);

        // a portal log of another transaction in the same block.
        responses.l1_logs(vec![mock_log(
            PORTAL,
            vec![TransactionDeposited::SIGNATURE_HASH],
            TxHash::with_last_byte(0x99),
        )]);

        let relayed = portal
            .waiting_deposit_transaction_relayed(&receipt, &WaitOptions::default())
            .await
            .unwrap();

        assert_eq!(relayed, None);
        assert!(responses.is_drained());
    }

    #[tokio::test(start_paused = true)]
    async fn test_deposit_relay_waits_for_l2_transaction() {
        let (portal, responses) = portals();
        let receipt = receipt(10);

        let mut opaque = Vec::new();
        opaque.extend_from_slice(&U256::from(1).to_be_bytes::<32>());
        opaque.extend_from_slice(&U256::from(1).to_be_bytes::<32>());
        opaque.extend_from_slice(&21_000u64.to_be_bytes());
        opaque.push(0);
        let deposit = TransactionDeposited {
            from: Address::with_last_byte(0x10),
            to: Address::with_last_byte(0x10),
            version: U256::ZERO,
            opaqueData: opaque.into(),
        };
        responses.l1_logs(vec![event_log(PORTAL, &deposit, receipt.transaction_hash)]);
        for _ in 0..20 {
            responses.l2.push_success(&Option::<()>::None);
        }

        let options = WaitOptions::default()
            .with_poll_interval(Duration::from_secs(1))
            .with_timeout(Some(Duration::from_millis(5_500)));
        let err = portal.waiting_deposit_transaction_relayed(&receipt, &options).await.unwrap_err();

        assert!(matches!(
            err,
            MessengerError::Timeout {
                target: MessageStatus::Relayed,
                last: Some(MessageStatus::UnconfirmedL1ToL2Message)
            }
        ));
    }

    #[tokio::test]
    async fn test_withdrawal_status_reads_finalization_once_finalizable() {
        let (portal, responses) = portals();
        let receipt = receipt(200);

        responses.l2.push_success(&vec![withdrawal_log(receipt.transaction_hash)]);
        responses.l1_call(U256::from(250));
        responses.l1_call(U256::from(100));
        responses.l1_call((B256::ZERO, 800u128, 0u128));
        responses.l1_block(1_000);
        responses.l1_call(true);

        let status = portal.get_message_status(&receipt).await.unwrap();

        assert_eq!(status, MessageStatus::Relayed);
        assert!(responses.is_drained());
    }

    #[tokio::test]
    async fn test_withdrawal_status_in_challenge_period() {
        let (portal, responses) = portals();
        let receipt = receipt(200);

        responses.l2.push_success(&vec![withdrawal_log(receipt.transaction_hash)]);
        responses.l1_call(U256::from(250));
        responses.l1_call(U256::from(100));
        responses.l1_call((B256::ZERO, 950u128, 0u128));
        responses.l1_block(1_000);

        let status = portal.get_message_status(&receipt).await.unwrap();

        assert_eq!(status, MessageStatus::InChallengePeriod);
        assert!(responses.is_drained());
    }
}

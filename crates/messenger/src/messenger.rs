use crate::{
    status::deposit_status, wait_for_status, BridgeClient, MessengerError, MessengerResult,
};
use alloy_network::AnyNetwork;
use alloy_primitives::{Address, BlockNumber, Bytes, TxHash, U256};
use alloy_provider::Provider;
use std::sync::Arc;
use thanos_bridge_primitives::{
    BridgeReceipt, Layer, MessageDirection, MessageReceipt, MessageRef, MessageStatus,
    WaitOptions,
};
use thanos_contracts::{
    abi::{
        IL1StandardBridge::{self, IL1StandardBridgeInstance},
        IL2StandardBridge::{self, IL2StandardBridgeInstance},
        IERC20::{self, IERC20Instance},
    },
    DEFAULT_MIN_GAS_LIMIT, L2_ETH, L2_STANDARD_BRIDGE, LEGACY_ERC20_NATIVE_TOKEN,
};
use tokio::time::Instant;

/// Implementers of the trait drive bridge messages between L1 and L2 for a single wallet.
///
/// Token operations return the hash of the submitted transaction, to be awaited with
/// [`CrossChainMessenger::wait_for_receipt`].
#[async_trait::async_trait]
#[auto_impl::auto_impl(&, Arc)]
pub trait CrossChainMessenger: Send + Sync {
    /// Approves the L1 standard bridge to pull `amount` of the L1 token.
    async fn approve_erc20(
        &self,
        l1_token: Address,
        l2_token: Address,
        amount: U256,
    ) -> MessengerResult<TxHash>;

    /// Deposits `amount` of the L1 token, minted as the L2 token on L2.
    async fn bridge_erc20(
        &self,
        l1_token: Address,
        l2_token: Address,
        amount: U256,
    ) -> MessengerResult<TxHash>;

    /// Approves the L1 standard bridge to pull `amount` of the native token.
    async fn approve_native_token(&self, amount: U256) -> MessengerResult<TxHash>;

    /// Deposits `amount` of the native token from L1.
    async fn bridge_native_token(&self, amount: U256) -> MessengerResult<TxHash>;

    /// Deposits `amount` of ETH from L1.
    async fn deposit_eth(&self, amount: U256) -> MessengerResult<TxHash>;

    /// Withdraws `amount` of ETH from L2.
    async fn withdraw_eth(&self, amount: U256) -> MessengerResult<TxHash>;

    /// Withdraws `amount` of the L2 token, released as the L1 token on L1.
    async fn withdraw_erc20(
        &self,
        l1_token: Address,
        l2_token: Address,
        amount: U256,
    ) -> MessengerResult<TxHash>;

    /// Withdraws `amount` of the native token from L2.
    async fn withdraw_native_token(&self, amount: U256) -> MessengerResult<TxHash>;

    /// Proves the L2 to L1 message on L1. The message must be
    /// [`MessageStatus::ReadyToProve`].
    async fn prove_message(&self, message: MessageRef) -> MessengerResult<TxHash>;

    /// Finalizes the L2 to L1 message on L1. The message must be
    /// [`MessageStatus::ReadyForRelay`].
    async fn finalize_message(&self, message: MessageRef) -> MessengerResult<TxHash>;

    /// Returns the current status of the message. `from_block` bounds the search of the relay
    /// on the destination layer.
    async fn get_message_status(
        &self,
        message: MessageRef,
        direction: MessageDirection,
        from_block: Option<BlockNumber>,
    ) -> MessengerResult<MessageStatus>;

    /// Returns the relay of the message on the destination layer, if any.
    async fn get_message_receipt(
        &self,
        message: MessageRef,
        direction: MessageDirection,
        from_block: Option<BlockNumber>,
    ) -> MessengerResult<Option<MessageReceipt>>;

    /// Waits until the transaction is mined with `confirmations` confirmations.
    async fn wait_for_receipt(
        &self,
        layer: Layer,
        tx_hash: TxHash,
        confirmations: u64,
    ) -> MessengerResult<BridgeReceipt>;

    /// Waits until the message reaches `target`, polling its status.
    async fn wait_for_message_status(
        &self,
        message: MessageRef,
        direction: MessageDirection,
        target: MessageStatus,
        options: &WaitOptions,
    ) -> MessengerResult<MessageStatus> {
        wait_for_status(
            || self.get_message_status(message, direction, options.from_block),
            target,
            options,
        )
        .await
    }
}

/// The [`CrossChainMessenger`] of the Thanos standard bridge.
#[derive(Debug)]
pub struct ThanosMessenger<L1, L2> {
    client: Arc<BridgeClient<L1, L2>>,
}

impl<L1, L2> Clone for ThanosMessenger<L1, L2> {
    fn clone(&self) -> Self {
        Self { client: self.client.clone() }
    }
}

impl<L1, L2> ThanosMessenger<L1, L2>
where
    L1: Provider,
    L2: Provider<AnyNetwork>,
{
    /// Returns a new [`ThanosMessenger`] over the client.
    pub const fn new(client: Arc<BridgeClient<L1, L2>>) -> Self {
        Self { client }
    }

    /// Returns the underlying client.
    pub fn client(&self) -> &BridgeClient<L1, L2> {
        &self.client
    }

    fn l1_bridge(&self) -> IL1StandardBridgeInstance<&L1> {
        IL1StandardBridge::new(self.client.contracts().standard_bridge, self.client.l1())
    }

    fn l2_bridge(&self) -> IL2StandardBridgeInstance<&L2, AnyNetwork> {
        IL2StandardBridge::new(L2_STANDARD_BRIDGE, self.client.l2())
    }

    fn l1_token(&self, token: Address) -> IERC20Instance<&L1> {
        IERC20::new(token, self.client.l1())
    }

    async fn withdraw(
        &self,
        l2_token: Address,
        amount: U256,
        value: U256,
    ) -> MessengerResult<TxHash> {
        let pending = self
            .l2_bridge()
            .withdrawTo(l2_token, self.client.wallet(), amount, DEFAULT_MIN_GAS_LIMIT, Bytes::new())
            .value(value)
            .send()
            .await?;
        Ok(self.client.submitted(Layer::L2, pending))
    }

    async fn ensure_status(
        &self,
        message: MessageRef,
        expected: MessageStatus,
    ) -> MessengerResult<()> {
        let actual = self.get_message_status(message, MessageDirection::L2ToL1, None).await?;
        if actual != expected {
            return Err(MessengerError::UnexpectedStatus { message, expected, actual })
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl<L1, L2> CrossChainMessenger for ThanosMessenger<L1, L2>
where
    L1: Provider,
    L2: Provider<AnyNetwork>,
{
    async fn approve_erc20(
        &self,
        l1_token: Address,
        _l2_token: Address,
        amount: U256,
    ) -> MessengerResult<TxHash> {
        let spender = self.client.contracts().standard_bridge;
        let pending = self.l1_token(l1_token).approve(spender, amount).send().await?;
        Ok(self.client.submitted(Layer::L1, pending))
    }

    async fn bridge_erc20(
        &self,
        l1_token: Address,
        l2_token: Address,
        amount: U256,
    ) -> MessengerResult<TxHash> {
        let pending = self
            .l1_bridge()
            .bridgeERC20To(
                l1_token,
                l2_token,
                self.client.wallet(),
                amount,
                DEFAULT_MIN_GAS_LIMIT,
                Bytes::new(),
            )
            .send()
            .await?;
        Ok(self.client.submitted(Layer::L1, pending))
    }

    async fn approve_native_token(&self, amount: U256) -> MessengerResult<TxHash> {
        let contracts = self.client.contracts();
        let pending = self
            .l1_token(contracts.native_token)
            .approve(contracts.standard_bridge, amount)
            .send()
            .await?;
        Ok(self.client.submitted(Layer::L1, pending))
    }

    async fn bridge_native_token(&self, amount: U256) -> MessengerResult<TxHash> {
        let pending = self
            .l1_bridge()
            .bridgeNativeTokenTo(self.client.wallet(), amount, DEFAULT_MIN_GAS_LIMIT, Bytes::new())
            .send()
            .await?;
        Ok(self.client.submitted(Layer::L1, pending))
    }

    async fn deposit_eth(&self, amount: U256) -> MessengerResult<TxHash> {
        let pending = self
            .l1_bridge()
            .bridgeETHTo(self.client.wallet(), DEFAULT_MIN_GAS_LIMIT, Bytes::new())
            .value(amount)
            .send()
            .await?;
        Ok(self.client.submitted(Layer::L1, pending))
    }

    async fn withdraw_eth(&self, amount: U256) -> MessengerResult<TxHash> {
        // ETH is an ERC-20 on L2.
        self.withdraw(L2_ETH, amount, U256::ZERO).await
    }

    async fn withdraw_erc20(
        &self,
        _l1_token: Address,
        l2_token: Address,
        amount: U256,
    ) -> MessengerResult<TxHash> {
        self.withdraw(l2_token, amount, U256::ZERO).await
    }

    async fn withdraw_native_token(&self, amount: U256) -> MessengerResult<TxHash> {
        self.withdraw(LEGACY_ERC20_NATIVE_TOKEN, amount, amount).await
    }

    async fn prove_message(&self, message: MessageRef) -> MessengerResult<TxHash> {
        self.ensure_status(message, MessageStatus::ReadyToProve).await?;
        let withdrawal = self.client.withdrawal(message).await?;
        self.client.prove_withdrawal_transaction(&withdrawal).await
    }

    async fn finalize_message(&self, message: MessageRef) -> MessengerResult<TxHash> {
        self.ensure_status(message, MessageStatus::ReadyForRelay).await?;
        let withdrawal = self.client.withdrawal(message).await?;
        self.client.finalize_withdrawal_transaction(&withdrawal).await
    }

    async fn get_message_status(
        &self,
        message: MessageRef,
        direction: MessageDirection,
        from_block: Option<BlockNumber>,
    ) -> MessengerResult<MessageStatus> {
        self.client.metrics().status_queries.increment(1);
        let relay = move || async move {
            let receipt = self.get_message_receipt(message, direction, from_block).await?;
            Ok::<_, MessengerError>(receipt.map(|receipt| receipt.outcome))
        };

        let status = match direction {
            MessageDirection::L1ToL2 => deposit_status(relay().await?),
            MessageDirection::L2ToL1 => {
                let withdrawal = self.client.withdrawal(message).await?;
                self.client.resolve_withdrawal_status(&withdrawal, relay).await?
            }
        };
        tracing::trace!(target: "thanos::messenger", %message, %direction, %status, "message status");
        Ok(status)
    }

    async fn get_message_receipt(
        &self,
        message: MessageRef,
        direction: MessageDirection,
        from_block: Option<BlockNumber>,
    ) -> MessengerResult<Option<MessageReceipt>> {
        let sent = self.client.sent_message(message, direction).await?;
        self.client.relay(&sent, direction.destination(), from_block).await
    }

    async fn wait_for_receipt(
        &self,
        layer: Layer,
        tx_hash: TxHash,
        confirmations: u64,
    ) -> MessengerResult<BridgeReceipt> {
        self.client.wait_for_receipt(layer, tx_hash, confirmations).await
    }

    async fn wait_for_message_status(
        &self,
        message: MessageRef,
        direction: MessageDirection,
        target: MessageStatus,
        options: &WaitOptions,
    ) -> MessengerResult<MessageStatus> {
        let start = Instant::now();
        let status = wait_for_status(
            || self.get_message_status(message, direction, options.from_block),
            target,
            options,
        )
        .await?;
        self.client.metrics().status_wait_duration.record(start.elapsed().as_secs_f64());
        Ok(status)
    }
}

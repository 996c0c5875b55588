use crate::{CrossChainMessenger, MessengerError, MessengerResult};
use alloy_primitives::{Address, BlockNumber, TxHash, B256, U256};
use parking_lot::Mutex;
use std::{
    collections::VecDeque,
    sync::atomic::{AtomicU8, AtomicUsize, Ordering},
};
use thanos_bridge_primitives::{
    BridgeReceipt, Layer, MessageDirection, MessageReceipt, MessageRef, MessageStatus,
    RelayOutcome,
};

/// A call recorded by the [`MockMessenger`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockCall {
    /// [`CrossChainMessenger::approve_erc20`].
    ApproveErc20(U256),
    /// [`CrossChainMessenger::bridge_erc20`].
    BridgeErc20(U256),
    /// [`CrossChainMessenger::approve_native_token`].
    ApproveNativeToken(U256),
    /// [`CrossChainMessenger::bridge_native_token`].
    BridgeNativeToken(U256),
    /// [`CrossChainMessenger::deposit_eth`].
    DepositEth(U256),
    /// [`CrossChainMessenger::withdraw_eth`].
    WithdrawEth(U256),
    /// [`CrossChainMessenger::withdraw_erc20`].
    WithdrawErc20(U256),
    /// [`CrossChainMessenger::withdraw_native_token`].
    WithdrawNativeToken(U256),
    /// [`CrossChainMessenger::prove_message`], with the status observed at the time.
    ProveMessage(MessageStatus),
    /// [`CrossChainMessenger::finalize_message`], with the status observed at the time.
    FinalizeMessage(MessageStatus),
    /// [`CrossChainMessenger::wait_for_receipt`].
    WaitForReceipt(Layer, u64),
}

/// A [`CrossChainMessenger`] replaying scripted message statuses.
///
/// Each status query pops the next scripted status. Once the script is exhausted, the last status
/// is repeated.
#[derive(Debug)]
pub struct MockMessenger {
    statuses: Mutex<VecDeque<MessageStatus>>,
    last: Mutex<MessageStatus>,
    queries: AtomicUsize,
    nonce: AtomicU8,
    calls: Mutex<Vec<MockCall>>,
}

impl MockMessenger {
    /// Returns a new [`MockMessenger`] replaying the provided statuses.
    pub fn new(statuses: impl IntoIterator<Item = MessageStatus>) -> Self {
        let statuses: VecDeque<_> = statuses.into_iter().collect();
        let last = statuses.front().copied().unwrap_or(MessageStatus::UnconfirmedL1ToL2Message);
        Self {
            statuses: Mutex::new(statuses),
            last: Mutex::new(last),
            queries: AtomicUsize::new(0),
            nonce: AtomicU8::new(0),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Returns the count of status queries received.
    pub fn status_queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    /// Returns the recorded calls, in order.
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().clone()
    }

    fn current(&self) -> MessageStatus {
        *self.last.lock()
    }

    fn record(&self, call: MockCall) -> TxHash {
        self.calls.lock().push(call);
        TxHash::with_last_byte(self.nonce.fetch_add(1, Ordering::SeqCst).wrapping_add(1))
    }

    fn record_in_status(
        &self,
        message: MessageRef,
        expected: MessageStatus,
        call: fn(MessageStatus) -> MockCall,
    ) -> MessengerResult<TxHash> {
        let actual = self.current();
        let tx_hash = self.record(call(actual));
        if actual != expected {
            return Err(MessengerError::UnexpectedStatus { message, expected, actual })
        }
        Ok(tx_hash)
    }
}

#[async_trait::async_trait]
impl CrossChainMessenger for MockMessenger {
    async fn approve_erc20(
        &self,
        _l1_token: Address,
        _l2_token: Address,
        amount: U256,
    ) -> MessengerResult<TxHash> {
        Ok(self.record(MockCall::ApproveErc20(amount)))
    }

    async fn bridge_erc20(
        &self,
        _l1_token: Address,
        _l2_token: Address,
        amount: U256,
    ) -> MessengerResult<TxHash> {
        Ok(self.record(MockCall::BridgeErc20(amount)))
    }

    async fn approve_native_token(&self, amount: U256) -> MessengerResult<TxHash> {
        Ok(self.record(MockCall::ApproveNativeToken(amount)))
    }

    async fn bridge_native_token(&self, amount: U256) -> MessengerResult<TxHash> {
        Ok(self.record(MockCall::BridgeNativeToken(amount)))
    }

    async fn deposit_eth(&self, amount: U256) -> MessengerResult<TxHash> {
        Ok(self.record(MockCall::DepositEth(amount)))
    }

    async fn withdraw_eth(&self, amount: U256) -> MessengerResult<TxHash> {
        Ok(self.record(MockCall::WithdrawEth(amount)))
    }

    async fn withdraw_erc20(
        &self,
        _l1_token: Address,
        _l2_token: Address,
        amount: U256,
    ) -> MessengerResult<TxHash> {
        Ok(self.record(MockCall::WithdrawErc20(amount)))
    }

    async fn withdraw_native_token(&self, amount: U256) -> MessengerResult<TxHash> {
        Ok(self.record(MockCall::WithdrawNativeToken(amount)))
    }

    async fn prove_message(&self, message: MessageRef) -> MessengerResult<TxHash> {
        self.record_in_status(message, MessageStatus::ReadyToProve, MockCall::ProveMessage)
    }

    async fn finalize_message(&self, message: MessageRef) -> MessengerResult<TxHash> {
        self.record_in_status(message, MessageStatus::ReadyForRelay, MockCall::FinalizeMessage)
    }

    async fn get_message_status(
        &self,
        _message: MessageRef,
        _direction: MessageDirection,
        _from_block: Option<BlockNumber>,
    ) -> MessengerResult<MessageStatus> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        let mut last = self.last.lock();
        if let Some(next) = self.statuses.lock().pop_front() {
            *last = next;
        }
        Ok(*last)
    }

    async fn get_message_receipt(
        &self,
        _message: MessageRef,
        _direction: MessageDirection,
        _from_block: Option<BlockNumber>,
    ) -> MessengerResult<Option<MessageReceipt>> {
        Ok((self.current() == MessageStatus::Relayed)
            .then_some(MessageReceipt { outcome: RelayOutcome::Relayed, transaction_hash: None }))
    }

    async fn wait_for_receipt(
        &self,
        layer: Layer,
        tx_hash: TxHash,
        confirmations: u64,
    ) -> MessengerResult<BridgeReceipt> {
        self.calls.lock().push(MockCall::WaitForReceipt(layer, confirmations));
        Ok(BridgeReceipt {
            transaction_hash: tx_hash,
            block_number: Some(1),
            block_hash: Some(B256::ZERO),
            gas_used: 21_000,
            effective_gas_price: 1,
            success: true,
        })
    }
}

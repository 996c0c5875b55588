use crate::{MessengerError, MessengerResult};
use alloy_consensus::SignableTransaction;
use alloy_network::AnyNetwork;
use alloy_primitives::{TxHash, U256};
use alloy_provider::Provider;
use alloy_rpc_types_eth::TransactionRequest;
use thanos_contracts::{abi::IGasPriceOracle::IGasPriceOracleInstance, GAS_PRICE_ORACLE};

/// The receipt field holding the L1 data fee charged to an L2 transaction.
const L1_FEE_FIELD: &str = "l1Fee";

/// An L2 provider able to price the L1 data fee of transactions.
#[async_trait::async_trait]
pub trait L2GasProvider: Send + Sync {
    /// Returns the L1 data fee of the transaction as computed by the gas price oracle. The
    /// request must be complete enough to be encoded for signing.
    async fn estimate_l1_gas_cost(&self, request: TransactionRequest) -> MessengerResult<U256>;

    /// Returns the L1 data fee charged to the mined transaction, read from its receipt.
    async fn l1_fee(&self, tx_hash: TxHash) -> MessengerResult<Option<U256>>;
}

#[async_trait::async_trait]
impl<P> L2GasProvider for P
where
    P: Provider<AnyNetwork>,
{
    async fn estimate_l1_gas_cost(&self, request: TransactionRequest) -> MessengerResult<U256> {
        let tx = request.build_typed_tx().map_err(|_| MessengerError::IncompleteTransaction)?;
        let oracle = IGasPriceOracleInstance::<_, AnyNetwork>::new(GAS_PRICE_ORACLE, self);
        Ok(oracle.getL1Fee(tx.encoded_for_signing().into()).call().await?)
    }

    async fn l1_fee(&self, tx_hash: TxHash) -> MessengerResult<Option<U256>> {
        let receipt = self.get_transaction_receipt(tx_hash).await?;
        Ok(receipt.and_then(|receipt| receipt.other.get_deserialized::<U256>(L1_FEE_FIELD)?.ok()))
    }
}

/// Returns the maximum L2 execution fee of the transaction, `gas_limit * max_fee_per_gas`.
pub fn estimate_l2_gas_cost(request: &TransactionRequest) -> Option<U256> {
    Some(U256::from(request.gas?) * U256::from(request.max_fee_per_gas?))
}

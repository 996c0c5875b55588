use crate::{abi::WithdrawalTransaction, message::DepositedTransaction};
use alloy_primitives::{keccak256, Bytes, B256, U256};
use alloy_rlp::{Encodable, Header};
use alloy_sol_types::SolValue;

/// The EIP-2718 type of L2 deposit transactions.
pub const DEPOSIT_TX_TYPE: u8 = 0x7E;

/// The bit offset of the version in a versioned message nonce.
const NONCE_VERSION_SHIFT: usize = 240;

/// Splits a versioned message nonce into its version (upper two bytes) and raw nonce.
pub fn decode_versioned_nonce(nonce: U256) -> (u16, U256) {
    let version = (nonce >> NONCE_VERSION_SHIFT).to::<u16>();
    let mask = (U256::from(1) << NONCE_VERSION_SHIFT) - U256::from(1);
    (version, nonce & mask)
}

/// Packs the version in the upper two bytes of the nonce.
pub fn encode_versioned_nonce(nonce: U256, version: u16) -> U256 {
    (U256::from(version) << NONCE_VERSION_SHIFT) | nonce
}

/// Returns the hash of the withdrawal, as computed by the message passer and the portal.
pub fn withdrawal_hash(tx: &WithdrawalTransaction) -> B256 {
    keccak256(
        (tx.nonce, tx.sender, tx.target, tx.value, tx.gasLimit, tx.data.clone())
            .abi_encode_params(),
    )
}

/// Returns the storage slot of the `sentMessages` mapping entry for the withdrawal hash in the
/// message passer.
pub fn withdrawal_storage_slot(withdrawal_hash: B256) -> B256 {
    keccak256((withdrawal_hash, U256::ZERO).abi_encode())
}

/// Returns the source hash of a user deposit emitted at `log_index` in the L1 block.
pub fn deposit_source_hash(l1_block_hash: B256, log_index: u64) -> B256 {
    let mut deposit_id = [0u8; 64];
    deposit_id[..32].copy_from_slice(l1_block_hash.as_slice());
    deposit_id[32..].copy_from_slice(&U256::from(log_index).to_be_bytes::<32>());

    // user deposits use the zero domain.
    let mut source = [0u8; 64];
    source[32..].copy_from_slice(keccak256(deposit_id).as_slice());
    keccak256(source)
}

/// Returns the hash of the L2 deposit transaction derived from the deposit.
pub fn deposit_tx_hash(source_hash: B256, tx: &DepositedTransaction) -> B256 {
    let mut payload = Vec::new();
    source_hash.encode(&mut payload);
    tx.from.encode(&mut payload);
    if tx.is_creation {
        Bytes::new().encode(&mut payload);
    } else {
        tx.to.encode(&mut payload);
    }
    tx.mint.encode(&mut payload);
    tx.value.encode(&mut payload);
    tx.gas_limit.encode(&mut payload);
    // is system transaction.
    false.encode(&mut payload);
    tx.data.encode(&mut payload);

    let mut encoded = Vec::with_capacity(payload.len() + 4);
    encoded.push(DEPOSIT_TX_TYPE);
    Header { list: true, payload_length: payload.len() }.encode(&mut encoded);
    encoded.extend_from_slice(&payload);
    keccak256(encoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{Address, Bytes};

    #[test]
    fn test_versioned_nonce() {
        let nonce = encode_versioned_nonce(U256::from(42), 1);
        assert_eq!(decode_versioned_nonce(nonce), (1, U256::from(42)));
        assert_eq!(decode_versioned_nonce(U256::from(7)), (0, U256::from(7)));
    }

    #[test]
    fn test_withdrawal_hash_encodes_fields_as_params() {
        let tx = WithdrawalTransaction {
            nonce: U256::from(1),
            sender: Address::random(),
            target: Address::random(),
            value: U256::from(2),
            gasLimit: U256::from(3),
            data: Bytes::from_static(&[0xde, 0xad]),
        };

        // nonce, sender, target, value, gas limit, data offset, data length, data.
        let encoded =
            (tx.nonce, tx.sender, tx.target, tx.value, tx.gasLimit, tx.data.clone())
                .abi_encode_params();
        assert_eq!(encoded.len(), 8 * 32);
        assert_eq!(U256::from_be_slice(&encoded[..32]), U256::from(1));
        assert_eq!(U256::from_be_slice(&encoded[5 * 32..6 * 32]), U256::from(6 * 32));
        assert_eq!(withdrawal_hash(&tx), keccak256(encoded));
    }

    #[test]
    fn test_withdrawal_storage_slot() {
        let hash = B256::random();
        let mut preimage = [0u8; 64];
        preimage[..32].copy_from_slice(hash.as_slice());
        assert_eq!(withdrawal_storage_slot(hash), keccak256(preimage));
    }

    #[test]
    fn test_deposit_source_hash_depends_on_log_index() {
        let block_hash = B256::random();
        assert_ne!(deposit_source_hash(block_hash, 0), deposit_source_hash(block_hash, 1));
        assert_eq!(deposit_source_hash(block_hash, 3), deposit_source_hash(block_hash, 3));
    }

    #[test]
    fn test_deposit_tx_hash_creation_drops_recipient() {
        let source_hash = B256::random();
        let call = DepositedTransaction {
            from: Address::random(),
            to: Address::random(),
            mint: U256::from(1),
            value: U256::from(1),
            gas_limit: 200_000,
            is_creation: false,
            data: Bytes::new(),
        };
        let creation = DepositedTransaction { is_creation: true, ..call.clone() };
        let creation_other_to = DepositedTransaction { to: Address::random(), ..creation.clone() };

        assert_ne!(deposit_tx_hash(source_hash, &call), deposit_tx_hash(source_hash, &creation));
        assert_eq!(
            deposit_tx_hash(source_hash, &creation),
            deposit_tx_hash(source_hash, &creation_other_to)
        );
    }
}

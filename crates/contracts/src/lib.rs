//! Bindings, constants and encodings of the Thanos bridge contracts.

pub mod abi;

mod constants;
pub use constants::*;

mod error;
pub use error::ContractsError;

mod hash;
pub use hash::{
    decode_versioned_nonce, deposit_source_hash, deposit_tx_hash, encode_versioned_nonce,
    withdrawal_hash, withdrawal_storage_slot, DEPOSIT_TX_TYPE,
};

mod message;
pub use message::{
    cross_domain_messages, deposit_events, withdrawal_messages, CrossDomainMessage, DepositEvent,
    DepositedTransaction, WithdrawalMessage,
};

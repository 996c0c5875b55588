use crate::{
    abi::{
        ICrossDomainMessenger::{self, SentMessage, SentMessageExtension1},
        IL2ToL1MessagePasser::MessagePassed,
        ILegacyCrossDomainMessenger,
        IOptimismPortal::TransactionDeposited,
        WithdrawalTransaction,
    },
    decode_versioned_nonce, deposit_source_hash, deposit_tx_hash, withdrawal_hash,
    ContractsError, L2_TO_L1_MESSAGE_PASSER,
};
use alloy_primitives::{keccak256, Address, Bytes, B256, U256};
use alloy_rpc_types_eth::Log;
use alloy_sol_types::{SolCall, SolEvent};

/// A message sent through a cross-domain messenger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossDomainMessage {
    /// The sender on the source chain.
    pub sender: Address,
    /// The target on the destination chain.
    pub target: Address,
    /// The value carried by the message.
    pub value: U256,
    /// The min gas limit for the relay.
    pub min_gas_limit: U256,
    /// The message calldata.
    pub message: Bytes,
    /// The versioned message nonce.
    pub message_nonce: U256,
    /// The index of the `SentMessage` log in its block.
    pub log_index: u64,
}

impl CrossDomainMessage {
    /// Returns the version encoded in the message nonce.
    pub fn version(&self) -> u16 {
        decode_versioned_nonce(self.message_nonce).0
    }

    /// Returns the hash of the message, keyed by the destination messenger in its
    /// `successfulMessages` and `failedMessages` mappings.
    pub fn hash(&self) -> Result<B256, ContractsError> {
        let calldata = match self.version() {
            0 => ILegacyCrossDomainMessenger::relayMessageCall {
                _target: self.target,
                _sender: self.sender,
                _message: self.message.clone(),
                _messageNonce: self.message_nonce,
            }
            .abi_encode(),
            1 => ICrossDomainMessenger::relayMessageCall {
                _nonce: self.message_nonce,
                _sender: self.sender,
                _target: self.target,
                _value: self.value,
                _minGasLimit: self.min_gas_limit,
                _message: self.message.clone(),
            }
            .abi_encode(),
            version => return Err(ContractsError::UnsupportedMessageVersion(version)),
        };
        Ok(keccak256(calldata))
    }
}

/// A withdrawal initiated on L2, with everything the portal needs to prove and finalize it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithdrawalMessage {
    /// The withdrawal transaction.
    pub transaction: WithdrawalTransaction,
    /// The withdrawal hash.
    pub withdrawal_hash: B256,
    /// The L2 block the withdrawal was initiated in.
    pub l2_block_number: u64,
}

/// A deposit decoded from the `TransactionDeposited` opaque data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepositedTransaction {
    /// The (aliased, for contracts) L1 sender.
    pub from: Address,
    /// The L2 recipient.
    pub to: Address,
    /// The native token minted on L2.
    pub mint: U256,
    /// The value sent to the recipient.
    pub value: U256,
    /// The L2 gas limit.
    pub gas_limit: u64,
    /// Whether the deposit creates a contract.
    pub is_creation: bool,
    /// The L2 calldata.
    pub data: Bytes,
}

/// The length of the fixed prefix of the opaque data: mint, value, gas limit and creation flag.
const OPAQUE_DATA_PREFIX: usize = 32 + 32 + 8 + 1;

impl TryFrom<&TransactionDeposited> for DepositedTransaction {
    type Error = ContractsError;

    fn try_from(event: &TransactionDeposited) -> Result<Self, Self::Error> {
        if event.version != U256::ZERO {
            return Err(ContractsError::UnsupportedDepositVersion(event.version))
        }
        let opaque = &event.opaqueData;
        if opaque.len() < OPAQUE_DATA_PREFIX {
            return Err(ContractsError::InvalidOpaqueData(opaque.len()))
        }

        let mut gas_limit = [0u8; 8];
        gas_limit.copy_from_slice(&opaque[64..72]);

        Ok(Self {
            from: event.from,
            to: event.to,
            mint: U256::from_be_slice(&opaque[..32]),
            value: U256::from_be_slice(&opaque[32..64]),
            gas_limit: u64::from_be_bytes(gas_limit),
            is_creation: opaque[72] != 0,
            data: Bytes::copy_from_slice(&opaque[OPAQUE_DATA_PREFIX..]),
        })
    }
}

/// A deposit emitted by the portal, located in its L1 block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepositEvent {
    /// The deposit.
    pub transaction: DepositedTransaction,
    /// The L1 block the deposit was emitted in.
    pub l1_block_hash: B256,
    /// The index of the deposit log in the L1 block.
    pub log_index: u64,
}

impl DepositEvent {
    /// Returns the hash of the deposit transaction executed on L2.
    pub fn l2_tx_hash(&self) -> B256 {
        deposit_tx_hash(deposit_source_hash(self.l1_block_hash, self.log_index), &self.transaction)
    }
}

/// Returns the messages sent by `messenger` in the provided transaction logs, in log order.
pub fn cross_domain_messages(
    logs: &[Log],
    messenger: Address,
) -> Result<Vec<CrossDomainMessage>, ContractsError> {
    let mut messages = Vec::new();
    for (i, log) in logs.iter().enumerate() {
        if !is_event::<SentMessage>(log, messenger) {
            continue
        }
        let sent = decode::<SentMessage>(log, "SentMessage")?;

        // the value is emitted by the extension, right after the message.
        let value = match logs.get(i + 1) {
            Some(next) if is_event::<SentMessageExtension1>(next, messenger) => {
                decode::<SentMessageExtension1>(next, "SentMessageExtension1")?.value
            }
            _ => U256::ZERO,
        };

        messages.push(CrossDomainMessage {
            sender: sent.sender,
            target: sent.target,
            value,
            min_gas_limit: sent.gasLimit,
            message: sent.message,
            message_nonce: sent.messageNonce,
            log_index: log.log_index.ok_or(ContractsError::MissingLogIndex)?,
        });
    }
    Ok(messages)
}

/// Returns the withdrawals passed to the L2 message passer in the provided logs, verifying the
/// emitted withdrawal hashes.
pub fn withdrawal_messages(
    logs: &[Log],
    l2_block_number: u64,
) -> Result<Vec<WithdrawalMessage>, ContractsError> {
    logs.iter()
        .filter(|log| is_event::<MessagePassed>(log, L2_TO_L1_MESSAGE_PASSER))
        .map(|log| {
            let passed = decode::<MessagePassed>(log, "MessagePassed")?;
            let transaction = WithdrawalTransaction {
                nonce: passed.nonce,
                sender: passed.sender,
                target: passed.target,
                value: passed.value,
                gasLimit: passed.gasLimit,
                data: passed.data,
            };
            let computed = withdrawal_hash(&transaction);
            if computed != passed.withdrawalHash {
                return Err(ContractsError::WithdrawalHashMismatch {
                    computed,
                    emitted: passed.withdrawalHash,
                })
            }
            Ok(WithdrawalMessage { transaction, withdrawal_hash: computed, l2_block_number })
        })
        .collect()
}

/// Returns the deposits emitted by the `portal` in the provided logs.
pub fn deposit_events(logs: &[Log], portal: Address) -> Result<Vec<DepositEvent>, ContractsError> {
    logs.iter()
        .filter(|log| is_event::<TransactionDeposited>(log, portal))
        .map(|log| {
            let event = decode::<TransactionDeposited>(log, "TransactionDeposited")?;
            Ok(DepositEvent {
                transaction: (&event).try_into()?,
                l1_block_hash: log.block_hash.ok_or(ContractsError::MissingBlockHash)?,
                log_index: log.log_index.ok_or(ContractsError::MissingLogIndex)?,
            })
        })
        .collect()
}

fn is_event<E: SolEvent>(log: &Log, address: Address) -> bool {
    log.address() == address && log.topics().first() == Some(&E::SIGNATURE_HASH)
}

fn decode<E: SolEvent>(log: &Log, log_type: &'static str) -> Result<E, ContractsError> {
    E::decode_log(&log.inner)
        .map(|log| log.data)
        .map_err(|error| ContractsError::DecodeLog { log_type, error })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{encode_versioned_nonce, L2_CROSS_DOMAIN_MESSENGER};

    fn log<E: SolEvent>(address: Address, event: &E, log_index: u64) -> Log {
        Log {
            inner: alloy_primitives::Log { address, data: event.encode_log_data() },
            block_hash: Some(B256::repeat_byte(0x11)),
            block_number: Some(10),
            log_index: Some(log_index),
            ..Default::default()
        }
    }

    fn sent_message(nonce: U256) -> SentMessage {
        SentMessage {
            target: Address::repeat_byte(0x01),
            sender: Address::repeat_byte(0x02),
            message: Bytes::from_static(&[0xab, 0xcd]),
            messageNonce: nonce,
            gasLimit: U256::from(200_000),
        }
    }

    #[test]
    fn test_messages_pair_with_extension() {
        let messenger = L2_CROSS_DOMAIN_MESSENGER;
        let nonce = encode_versioned_nonce(U256::from(5), 1);
        let extension =
            SentMessageExtension1 { sender: Address::repeat_byte(0x02), value: U256::from(9) };
        let logs = vec![
            log(messenger, &sent_message(nonce), 3),
            log(messenger, &extension, 4),
            // a message without extension, from an unrelated emitter first.
            log(Address::repeat_byte(0x99), &sent_message(nonce), 5),
            log(messenger, &sent_message(nonce + U256::from(1)), 6),
        ];

        let messages = cross_domain_messages(&logs, messenger).unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].value, U256::from(9));
        assert_eq!(messages[0].log_index, 3);
        assert_eq!(messages[0].version(), 1);
        assert_eq!(messages[1].value, U256::ZERO);
        assert_eq!(messages[1].log_index, 6);
        assert_ne!(messages[0].hash().unwrap(), messages[1].hash().unwrap());
    }

    #[test]
    fn test_message_hash_rejects_unknown_version() {
        let message = CrossDomainMessage {
            sender: Address::ZERO,
            target: Address::ZERO,
            value: U256::ZERO,
            min_gas_limit: U256::ZERO,
            message: Bytes::new(),
            message_nonce: encode_versioned_nonce(U256::ZERO, 2),
            log_index: 0,
        };
        assert!(matches!(message.hash(), Err(ContractsError::UnsupportedMessageVersion(2))));

        let legacy = CrossDomainMessage { message_nonce: U256::from(1), ..message };
        assert!(legacy.hash().is_ok());
    }

    #[test]
    fn test_withdrawal_messages_verify_hash() {
        let transaction = WithdrawalTransaction {
            nonce: encode_versioned_nonce(U256::from(1), 1),
            sender: Address::repeat_byte(0x03),
            target: Address::repeat_byte(0x04),
            value: U256::from(1),
            gasLimit: U256::from(200_000),
            data: Bytes::new(),
        };
        let hash = withdrawal_hash(&transaction);
        let passed = MessagePassed {
            nonce: transaction.nonce,
            sender: transaction.sender,
            target: transaction.target,
            value: transaction.value,
            gasLimit: transaction.gasLimit,
            data: transaction.data.clone(),
            withdrawalHash: hash,
        };

        let messages =
            withdrawal_messages(&[log(L2_TO_L1_MESSAGE_PASSER, &passed, 0)], 42).unwrap();
        assert_eq!(
            messages,
            vec![WithdrawalMessage { transaction, withdrawal_hash: hash, l2_block_number: 42 }]
        );

        let forged = MessagePassed { withdrawalHash: B256::repeat_byte(0xff), ..passed };
        assert!(matches!(
            withdrawal_messages(&[log(L2_TO_L1_MESSAGE_PASSER, &forged, 0)], 42),
            Err(ContractsError::WithdrawalHashMismatch { .. })
        ));
    }

    #[test]
    fn test_deposit_events_decode_opaque_data() {
        let portal = Address::repeat_byte(0x68);
        let mut opaque = Vec::new();
        opaque.extend_from_slice(&U256::from(7).to_be_bytes::<32>());
        opaque.extend_from_slice(&U256::from(5).to_be_bytes::<32>());
        opaque.extend_from_slice(&200_000u64.to_be_bytes());
        opaque.push(0);
        opaque.extend_from_slice(&[0xca, 0xfe]);
        let event = TransactionDeposited {
            from: Address::repeat_byte(0x05),
            to: Address::repeat_byte(0x06),
            version: U256::ZERO,
            opaqueData: opaque.into(),
        };

        let deposits = deposit_events(&[log(portal, &event, 2)], portal).unwrap();
        assert_eq!(deposits.len(), 1);
        let deposit = &deposits[0];
        assert_eq!(deposit.transaction.mint, U256::from(7));
        assert_eq!(deposit.transaction.value, U256::from(5));
        assert_eq!(deposit.transaction.gas_limit, 200_000);
        assert!(!deposit.transaction.is_creation);
        assert_eq!(deposit.transaction.data, Bytes::from_static(&[0xca, 0xfe]));
        assert_eq!(deposit.log_index, 2);

        let truncated = TransactionDeposited { opaqueData: Bytes::from_static(&[0; 10]), ..event };
        assert!(matches!(
            deposit_events(&[log(portal, &truncated, 2)], portal),
            Err(ContractsError::InvalidOpaqueData(10))
        ));
    }
}

use crate::{BridgeClient, MessengerError, MessengerResult};
use alloy_eips::BlockNumberOrTag;
use alloy_network::AnyNetwork;
use alloy_primitives::{Bytes, TxHash, B256, U256};
use alloy_provider::Provider;
use thanos_bridge_primitives::Layer;
use thanos_contracts::{
    abi::OutputRootProof, withdrawal_storage_slot, WithdrawalMessage, L2_TO_L1_MESSAGE_PASSER,
};

/// The arguments of the portal withdrawal proof.
///
/// The proof is assembled from data the L1 oracle and the L2 node already commit to: the client
/// does not verify it, the portal does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithdrawalProof {
    /// The index of the first output covering the withdrawal block.
    pub l2_output_index: U256,
    /// The preimage of the output root.
    pub output_root_proof: OutputRootProof,
    /// The storage proof of the withdrawal in the message passer.
    pub withdrawal_proof: Vec<Bytes>,
}

impl<L1, L2> BridgeClient<L1, L2>
where
    L1: Provider,
    L2: Provider<AnyNetwork>,
{
    /// Returns the proof of the withdrawal against the first output covering its block.
    pub async fn withdrawal_proof(
        &self,
        withdrawal: &WithdrawalMessage,
    ) -> MessengerResult<WithdrawalProof> {
        let oracle = self.oracle();
        let withdrawal_block = U256::from(withdrawal.l2_block_number);
        if oracle.latestBlockNumber().call().await? < withdrawal_block {
            return Err(MessengerError::OutputNotProposed(withdrawal.l2_block_number))
        }

        let l2_output_index = oracle.getL2OutputIndexAfter(withdrawal_block).call().await?;
        let output = oracle.getL2Output(l2_output_index).call().await?;
        let output_block = u64::try_from(output.l2BlockNumber).unwrap_or(u64::MAX);

        let block = self
            .l2()
            .get_block_by_number(output_block.into())
            .await?
            .ok_or(MessengerError::MissingBlock(BlockNumberOrTag::Number(output_block), Layer::L2))?;
        let slot = withdrawal_storage_slot(withdrawal.withdrawal_hash);
        let proof =
            self.l2().get_proof(L2_TO_L1_MESSAGE_PASSER, vec![slot]).number(output_block).await?;
        let message_passer_storage_root = proof.storage_hash;
        let withdrawal_proof = proof
            .storage_proof
            .into_iter()
            .next()
            .ok_or(MessengerError::MissingStorageProof)?
            .proof;

        tracing::trace!(
            target: "thanos::messenger",
            %l2_output_index,
            output_root = %output.outputRoot,
            output_block,
            "assembled withdrawal proof"
        );

        Ok(WithdrawalProof {
            l2_output_index,
            output_root_proof: OutputRootProof {
                version: B256::ZERO,
                stateRoot: block.header.state_root,
                messagePasserStorageRoot: message_passer_storage_root,
                latestBlockhash: block.header.hash,
            },
            withdrawal_proof,
        })
    }

    /// Submits the proof of the withdrawal to the portal.
    pub async fn prove_withdrawal_transaction(
        &self,
        withdrawal: &WithdrawalMessage,
    ) -> MessengerResult<TxHash> {
        let proof = self.withdrawal_proof(withdrawal).await?;
        tracing::debug!(target: "thanos::messenger", hash = %withdrawal.withdrawal_hash, index = %proof.l2_output_index, "proving withdrawal");

        let pending = self
            .portal()
            .proveWithdrawalTransaction(
                withdrawal.transaction.clone(),
                proof.l2_output_index,
                proof.output_root_proof,
                proof.withdrawal_proof,
            )
            .send()
            .await?;
        Ok(self.submitted(Layer::L1, pending))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::mock_client;
    use alloy_primitives::Address;
    use alloy_rpc_types_eth::{
        Block, EIP1186AccountProofResponse, EIP1186StorageProof, Header, Transaction,
    };
    use thanos_contracts::abi::{OutputProposal, WithdrawalTransaction};

    fn withdrawal() -> WithdrawalMessage {
        WithdrawalMessage {
            transaction: WithdrawalTransaction {
                nonce: U256::from(1),
                sender: Address::with_last_byte(0x10),
                target: Address::with_last_byte(0x11),
                value: U256::ZERO,
                gasLimit: U256::from(100_000),
                data: Bytes::new(),
            },
            withdrawal_hash: B256::with_last_byte(0x22),
            l2_block_number: 200,
        }
    }

    #[tokio::test]
    async fn test_proof_requires_an_output_covering_the_withdrawal() {
        let (client, responses) = mock_client();
        responses.l1_call(U256::from(199));

        let err = client.withdrawal_proof(&withdrawal()).await.unwrap_err();

        assert!(matches!(err, MessengerError::OutputNotProposed(200)));
        assert!(responses.is_drained());
    }

    #[tokio::test]
    async fn test_proof_against_first_covering_output() {
        let (client, responses) = mock_client();
        let withdrawal = withdrawal();

        let output = OutputProposal {
            outputRoot: B256::with_last_byte(0x01),
            timestamp: 1_000,
            l2BlockNumber: 240,
        };
        responses.l1_call(U256::from(250));
        responses.l1_call(U256::from(3));
        responses.l1_call(output);

        let header = Header::new(alloy_consensus::Header {
            number: 240,
            state_root: B256::with_last_byte(0x02),
            ..Default::default()
        });
        let block_hash = header.hash;
        responses.l2.push_success(&Block::<Transaction>::empty(header));

        let storage_proof = vec![Bytes::from_static(&[0xde, 0xad])];
        responses.l2.push_success(&EIP1186AccountProofResponse {
            address: L2_TO_L1_MESSAGE_PASSER,
            storage_hash: B256::with_last_byte(0x03),
            storage_proof: vec![EIP1186StorageProof {
                key: withdrawal_storage_slot(withdrawal.withdrawal_hash).into(),
                value: U256::from(1),
                proof: storage_proof.clone(),
            }],
            ..Default::default()
        });

        let proof = client.withdrawal_proof(&withdrawal).await.unwrap();

        assert_eq!(proof.l2_output_index, U256::from(3));
        assert_eq!(proof.output_root_proof.version, B256::ZERO);
        assert_eq!(proof.output_root_proof.stateRoot, B256::with_last_byte(0x02));
        assert_eq!(proof.output_root_proof.messagePasserStorageRoot, B256::with_last_byte(0x03));
        assert_eq!(proof.output_root_proof.latestBlockhash, block_hash);
        assert_eq!(proof.withdrawal_proof, storage_proof);
        assert!(responses.is_drained());
    }

    #[tokio::test]
    async fn test_proof_fails_without_storage_proof() {
        let (client, responses) = mock_client();

        responses.l1_call(U256::from(250));
        responses.l1_call(U256::ZERO);
        responses.l1_call(OutputProposal {
            outputRoot: B256::ZERO,
            timestamp: 0,
            l2BlockNumber: 200,
        });
        responses.l2.push_success(&Block::<Transaction>::empty(Header::new(
            alloy_consensus::Header { number: 200, ..Default::default() },
        )));
        responses.l2.push_success(&EIP1186AccountProofResponse::default());

        let err = client.withdrawal_proof(&withdrawal()).await.unwrap_err();
        assert!(matches!(err, MessengerError::MissingStorageProof));
    }
}

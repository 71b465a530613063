//! SPV proof types and the proof runner.
//!
//! A proof pairs the target chain's id with the Merkle proof whose fold
//! must land on the hash of a header currently held on that chain. Running
//! a proof is pure: it re-executes the fold and yields the claimed block
//! hash, deciding nothing about chain membership.

use serde::{Deserialize, Serialize};

use braid_chain::{BlockHash, ChainId};
use braid_primitives::merkle::MerkleProof;

use crate::error::SpvError;

/// Witness that a transaction is included in the history visible from the
/// head of `chain`.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct TransactionProof {
    chain: ChainId,
    proof: MerkleProof,
}

impl TransactionProof {
    /// Pair a target chain with the Merkle proof witnessing inclusion.
    pub fn new(chain: ChainId, proof: MerkleProof) -> Self {
        TransactionProof { chain, proof }
    }

    /// The target chain whose current head must witness this proof.
    pub fn chain(&self) -> ChainId {
        self.chain
    }

    /// The underlying Merkle proof.
    pub fn proof(&self) -> &MerkleProof {
        &self.proof
    }
}

/// Witness that a transaction output is included in the history visible
/// from the head of `chain`.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct TransactionOutputProof {
    chain: ChainId,
    proof: MerkleProof,
}

impl TransactionOutputProof {
    /// Pair a target chain with the Merkle proof witnessing inclusion.
    pub fn new(chain: ChainId, proof: MerkleProof) -> Self {
        TransactionOutputProof { chain, proof }
    }

    /// The target chain whose current head must witness this proof.
    pub fn chain(&self) -> ChainId {
        self.chain
    }

    /// The underlying Merkle proof.
    pub fn proof(&self) -> &MerkleProof {
        &self.proof
    }
}

/// Run a transaction proof, producing the block hash its fold lands on.
///
/// A fold that cannot be completed is a verification failure.
pub fn run_transaction_proof(proof: &TransactionProof) -> Result<BlockHash, SpvError> {
    run(proof.proof())
}

/// Run a transaction output proof, producing the block hash its fold
/// lands on.
pub fn run_transaction_output_proof(
    proof: &TransactionOutputProof,
) -> Result<BlockHash, SpvError> {
    run(proof.proof())
}

fn run(proof: &MerkleProof) -> Result<BlockHash, SpvError> {
    proof
        .run()
        .map_err(|e| SpvError::VerificationFailed(format!("merkle fold cannot be completed: {e}")))
}

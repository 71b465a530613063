//! SPV proof verification.
//!
//! Verification re-executes the proof's fold and asserts that the
//! resulting root is the hash of a header currently held on the proof's
//! target chain. On success the recovered subject is returned, decoded as
//! the kind of leaf the proof claims to witness.

use braid_chain::{Transaction, TransactionOutput};
use braid_primitives::merkle::{MerkleEntry, MerkleTag};

use crate::cut_db::CutDb;
use crate::error::SpvError;
use crate::proof::{
    run_transaction_output_proof, run_transaction_proof, TransactionOutputProof, TransactionProof,
};

/// Verify a transaction proof against the current cut.
///
/// Succeeds iff the fold lands on a header in the target chain's
/// canonical history, returning the proven transaction.
pub fn verify_transaction_proof<C: CutDb>(
    cut_db: &C,
    proof: &TransactionProof,
) -> Result<Transaction, SpvError> {
    let root = run_transaction_proof(proof)?;
    if !cut_db.member(proof.chain(), &root)? {
        return Err(SpvError::VerificationFailed(
            "target header is not in the chain".to_string(),
        ));
    }
    match proof.proof().subject() {
        MerkleEntry::Input {
            tag: MerkleTag::Transaction,
            bytes,
        } => Ok(Transaction::new(bytes.clone())),
        _ => Err(SpvError::VerificationFailed(
            "proof subject is not a transaction".to_string(),
        )),
    }
}

/// Verify a transaction output proof against the current cut.
///
/// Succeeds iff the fold lands on a header in the target chain's
/// canonical history, returning the proven output.
pub fn verify_transaction_output_proof<C: CutDb>(
    cut_db: &C,
    proof: &TransactionOutputProof,
) -> Result<TransactionOutput, SpvError> {
    let root = run_transaction_output_proof(proof)?;
    if !cut_db.member(proof.chain(), &root)? {
        return Err(SpvError::VerificationFailed(
            "target header is not in the chain".to_string(),
        ));
    }
    match proof.proof().subject() {
        MerkleEntry::Input {
            tag: MerkleTag::TransactionOutput,
            bytes,
        } => Ok(TransactionOutput::new(bytes.clone())),
        _ => Err(SpvError::VerificationFailed(
            "proof subject is not a transaction output".to_string(),
        )),
    }
}

#![deny(missing_docs)]

//! Braid SDK - SPV proof construction and verification.
//!
//! Builds and verifies compact witnesses that a transaction (or one of its
//! outputs) was included in the canonical history of a source chain, such
//! that inclusion can be checked against nothing but the current head of a
//! target chain in the same braided system. A proof chains three kinds of
//! Merkle evidence: leaf membership in a block's body tree, the body root's
//! membership in its header, and a run of header-to-header links (parent
//! and adjacent-parent edges) from the source block up to the target
//! chain's head.

/// Error types for SPV operations.
pub mod error;
/// Cut database facade: the current confirmed frontier and header lookups.
pub mod cut_db;
/// Content-addressed payload store facade.
pub mod payload_store;
/// Proof types and the proof runner.
pub mod proof;
/// Proof construction.
pub mod create;
/// Proof verification against a cut database.
pub mod verify;
/// In-memory braided chain; the reference store implementation.
pub mod memweb;

pub use create::{create_transaction_output_proof, create_transaction_proof};
pub use cut_db::CutDb;
pub use error::SpvError;
pub use memweb::MemWeb;
pub use payload_store::PayloadStore;
pub use proof::{
    run_transaction_output_proof, run_transaction_proof, TransactionOutputProof, TransactionProof,
};
pub use verify::{verify_transaction_output_proof, verify_transaction_proof};

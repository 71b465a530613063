//! Cut database facade.
//!
//! A cut is the current consistent frontier of one header per chain. The
//! trait gives the proof builder and verifier everything they need from
//! the header side of the system: the best header per chain, lookups by
//! hash, and membership of a hash in a chain's canonical history. A single
//! call observes a snapshot-consistent view; two sequential calls may see
//! different frontiers.

use braid_chain::{BlockHash, BlockHeader, ChainGraph, ChainId};

use crate::error::SpvError;

/// Read access to the confirmed frontier and the per-chain header
/// databases behind it.
///
/// Implementors must be safe for concurrent reads; the SPV core adds no
/// coordination of its own.
pub trait CutDb {
    /// The chain graph this cut ranges over.
    fn graph(&self) -> &ChainGraph;

    /// The current best header of `chain` according to the cut frontier.
    fn max_header(&self, chain: ChainId) -> Result<BlockHeader, SpvError>;

    /// Look up a header of `chain` by its block hash.
    fn lookup_header(
        &self,
        chain: ChainId,
        hash: &BlockHash,
    ) -> Result<Option<BlockHeader>, SpvError>;

    /// Whether `hash` identifies a header currently in the canonical
    /// history of `chain`.
    fn member(&self, chain: ChainId, hash: &BlockHash) -> Result<bool, SpvError>;

    /// The parent header of `header` on the same chain.
    ///
    /// Genesis has no parent; every stored non-genesis header must have
    /// one, so absence is an internal invariant violation.
    fn lookup_parent_header(&self, header: &BlockHeader) -> Result<BlockHeader, SpvError> {
        if header.height() == 0 {
            return Err(SpvError::InternalInvariant(format!(
                "genesis header of chain {} has no parent",
                header.chain()
            )));
        }
        self.lookup_header(header.chain(), header.parent())?
            .ok_or_else(|| {
                SpvError::InternalInvariant(format!(
                    "missing parent {} of header at height {} on chain {}",
                    header.parent(),
                    header.height(),
                    header.chain()
                ))
            })
    }

    /// The header on `chain` that `header`'s adjacent record points at.
    ///
    /// The data model requires the record entry and the referenced header
    /// to exist for every non-genesis header, so absence of either is an
    /// internal invariant violation.
    fn lookup_adjacent_parent_header(
        &self,
        header: &BlockHeader,
        chain: ChainId,
    ) -> Result<BlockHeader, SpvError> {
        let hash = header.adjacent_hash(chain).ok_or_else(|| {
            SpvError::InternalInvariant(format!(
                "header at height {} on chain {} has no adjacent parent on chain {}",
                header.height(),
                header.chain(),
                chain
            ))
        })?;
        self.lookup_header(chain, hash)?.ok_or_else(|| {
            SpvError::InternalInvariant(format!(
                "missing adjacent parent {} on chain {} referenced from chain {}",
                hash,
                chain,
                header.chain()
            ))
        })
    }
}

//! Content-addressed payload store facade.
//!
//! Three sub-stores matter to proof construction: block payloads keyed by
//! payload hash, transaction lists keyed by their tree root, and output
//! lists keyed by theirs. A key the data model mandates but the store
//! cannot produce means the local database is corrupt; the proof builder
//! converts such misses into fatal inconsistency errors.

use braid_chain::{
    BlockOutputs, BlockOutputsHash, BlockPayload, BlockPayloadHash, BlockTransactions,
    BlockTransactionsHash,
};

use crate::error::SpvError;

/// Read access to the content-addressed payload stores.
///
/// Implementors must be safe for concurrent reads.
pub trait PayloadStore {
    /// Look up a block payload by its payload hash.
    fn payload(&self, hash: &BlockPayloadHash) -> Result<Option<BlockPayload>, SpvError>;

    /// Look up a block's transaction list by its transactions-tree root.
    fn transactions(
        &self,
        root: &BlockTransactionsHash,
    ) -> Result<Option<BlockTransactions>, SpvError>;

    /// Look up a block's output list by its outputs-tree root.
    fn outputs(&self, root: &BlockOutputsHash) -> Result<Option<BlockOutputs>, SpvError>;
}

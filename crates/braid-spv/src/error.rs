/// Error types for SPV operations.
///
/// `TargetNotReachable` and `VerificationFailed` are user-visible and
/// retryable with different parameters or a newer proof. The remaining
/// kinds signal a corrupt local store or a violated data-model invariant
/// and are not recoverable by the caller.
#[derive(Debug, thiserror::Error)]
pub enum SpvError {
    /// The source block cannot be reached from the target chain's current
    /// head (chain too young, or the source height lies above the
    /// reachable source head).
    #[error("target not reachable: {0}")]
    TargetNotReachable(String),
    /// The local store contradicts itself (payload hash mismatch, or a
    /// payload/transactions/outputs blob mandated by the data model is
    /// missing).
    #[error("inconsistent payload data: {0}")]
    InconsistentPayloadData(String),
    /// The proof does not verify against the target chain.
    #[error("verification failed: {0}")]
    VerificationFailed(String),
    /// A data-model invariant does not hold (missing parent or
    /// adjacent-parent for a stored header).
    #[error("internal invariant violated: {0}")]
    InternalInvariant(String),
    /// Error propagated from the chain layer.
    #[error("chain error: {0}")]
    Chain(#[from] braid_chain::ChainError),
    /// Error propagated from the primitives layer.
    #[error("primitives error: {0}")]
    Primitives(#[from] braid_primitives::PrimitivesError),
}

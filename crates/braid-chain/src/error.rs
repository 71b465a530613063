use crate::ChainId;

/// Error types for chain data model operations.
#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    /// A chain id does not belong to the chain graph.
    #[error("unknown chain: {0}")]
    UnknownChain(ChainId),
    /// Two chains are not connected by any path in the graph.
    #[error("no route from chain {0} to chain {1}")]
    NoRoute(ChainId, ChainId),
    /// A chain was expected to be adjacent to another but is not.
    #[error("chain {0} is not adjacent to chain {1}")]
    NotAdjacent(ChainId, ChainId),
    /// The edge list given to a graph constructor is invalid.
    #[error("invalid chain graph: {0}")]
    InvalidGraph(String),
    /// Error propagated from the primitives layer.
    #[error("primitives error: {0}")]
    Primitives(#[from] braid_primitives::PrimitivesError),
}

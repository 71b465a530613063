/// Error types for primitive operations.
#[derive(Debug, thiserror::Error)]
pub enum PrimitivesError {
    /// A digest had the wrong length or could not be parsed.
    #[error("invalid hash: {0}")]
    InvalidHash(String),
    /// A Merkle proof is structurally invalid (empty frame list, position
    /// outside its tree, impossible sibling path).
    #[error("malformed merkle proof: {0}")]
    MalformedProof(String),
    /// Hex decoding error.
    #[error("hex error: {0}")]
    Hex(#[from] hex::FromHexError),
}

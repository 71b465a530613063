//! Domain-separated Merkle trees and inclusion proofs.
//!
//! Every hashed node carries a one-byte kind prefix (`0x00` for leaves,
//! `0x01` for inner nodes), and leaves are additionally prefixed by a
//! two-byte universe tag naming the semantic field they occupy. The tag is
//! what lets a proof frame splice through a specific named child of its
//! parent without ambiguity between, say, a transaction and an outputs root
//! that happen to share bytes.

/// Merkle tree construction over tagged entries.
pub mod tree;
/// Inclusion proofs assembled from positioned frames.
pub mod proof;

pub use proof::{MerkleFrame, MerkleProof};
pub use tree::MerkleTree;

pub use crate::merklehash::MerkleHash;

use serde::{Deserialize, Serialize};

use crate::hash::sha512_256_concat;

/// Node kind prefix for leaf preimages.
const KIND_LEAF: u8 = 0x00;
/// Node kind prefix for inner-node preimages.
const KIND_NODE: u8 = 0x01;

/// Universe tag naming the semantic field a leaf occupies.
///
/// Encoded as a two-byte big-endian word between the leaf kind prefix and
/// the leaf content.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[repr(u16)]
pub enum MerkleTag {
    /// Reserved tag for the root of an empty tree.
    Empty = 0x0000,
    /// A chain identifier (4-byte big-endian).
    ChainId = 0x0001,
    /// A block height (8-byte big-endian).
    BlockHeight = 0x0002,
    /// A block hash appearing as leaf input rather than a subtree root.
    BlockHash = 0x0003,
    /// A block payload hash appearing as leaf input.
    BlockPayloadHash = 0x0004,
    /// Raw transaction bytes.
    Transaction = 0x0005,
    /// Raw transaction output bytes.
    TransactionOutput = 0x0006,
    /// A transactions-tree root appearing as leaf input.
    BlockTransactionsHash = 0x0007,
    /// An outputs-tree root appearing as leaf input.
    BlockOutputsHash = 0x0008,
}

impl MerkleTag {
    /// The tag's canonical two-byte big-endian encoding.
    pub fn bytes(self) -> [u8; 2] {
        (self as u16).to_be_bytes()
    }
}

/// Hash algorithm parameter for Merkle primitives.
///
/// The trees and proofs are generic over this trait; the braid protocol
/// instantiates it exactly once, with [`Sha512t256`].
pub trait MerkleHasher {
    /// Hash a tagged leaf: `kind || tag || content`.
    fn hash_leaf(tag: MerkleTag, data: &[u8]) -> MerkleHash;

    /// Hash an inner node: `kind || left || right`.
    fn hash_node(left: &MerkleHash, right: &MerkleHash) -> MerkleHash;
}

/// The protocol's hash algorithm: SHA-512/256.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Sha512t256;

impl MerkleHasher for Sha512t256 {
    fn hash_leaf(tag: MerkleTag, data: &[u8]) -> MerkleHash {
        MerkleHash::new(sha512_256_concat(&[&[KIND_LEAF], &tag.bytes(), data]))
    }

    fn hash_node(left: &MerkleHash, right: &MerkleHash) -> MerkleHash {
        MerkleHash::new(sha512_256_concat(&[
            &[KIND_NODE],
            left.as_bytes(),
            right.as_bytes(),
        ]))
    }
}

/// One entry of a Merkle tree, and the subject of a proof.
///
/// An `Input` is raw content hashed under its universe tag; a `Node` is the
/// root of a lower tree, entering the parent tree as-is. Hash-valued header
/// children (parent, adjacent parents, payload hash) are `Node` entries,
/// which is what allows a proof to splice a running hash directly into
/// their slot.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum MerkleEntry {
    /// Raw leaf content with its universe tag.
    Input {
        /// The semantic field this leaf occupies.
        tag: MerkleTag,
        /// The leaf content bytes.
        bytes: Vec<u8>,
    },
    /// An already-computed subtree root.
    Node(MerkleHash),
}

impl MerkleEntry {
    /// Construct a tagged input entry.
    pub fn input(tag: MerkleTag, bytes: impl Into<Vec<u8>>) -> Self {
        MerkleEntry::Input {
            tag,
            bytes: bytes.into(),
        }
    }

    /// The hash this entry contributes at the leaf level of its tree.
    pub fn hash<H: MerkleHasher>(&self) -> MerkleHash {
        match self {
            MerkleEntry::Input { tag, bytes } => H::hash_leaf(*tag, bytes),
            MerkleEntry::Node(hash) => *hash,
        }
    }
}

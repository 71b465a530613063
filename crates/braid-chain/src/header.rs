//! Block headers and their Merkle encoding.
//!
//! A header Merkle-encodes to a tree whose root is the header's block
//! hash. The canonical entry order puts the adjacent-parent record first,
//! sorted by chain id, so the index of a chain inside the record is also
//! the Merkle frame position of its adjacent-parent hash:
//!
//! | Position | Entry |
//! |----------|-------|
//! | `0..k`   | adjacent-parent hashes, ascending chain id (subtree roots) |
//! | `k`      | chain id (tagged leaf, 4-byte BE) |
//! | `k + 1`  | height (tagged leaf, 8-byte BE) |
//! | `k + 2`  | parent hash (subtree root) |
//! | `k + 3`  | payload hash (subtree root) |
//!
//! Hash-valued children are subtree roots, so a proof frame can splice a
//! running hash straight into their slot.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use braid_primitives::merkle::{MerkleEntry, MerkleTag, MerkleTree};

use crate::{BlockHash, BlockHeight, BlockPayloadHash, ChainError, ChainGraph, ChainId};

/// A block header of one chain in the braided set.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct BlockHeader {
    chain: ChainId,
    height: BlockHeight,
    parent: BlockHash,
    adjacents: BTreeMap<ChainId, BlockHash>,
    payload_hash: BlockPayloadHash,
}

impl BlockHeader {
    /// Assemble a header from its fields.
    ///
    /// `adjacents` must hold one entry per chain adjacent to `chain` in
    /// the graph, each pointing at the neighbor's header one height below.
    pub fn new(
        chain: ChainId,
        height: BlockHeight,
        parent: BlockHash,
        adjacents: BTreeMap<ChainId, BlockHash>,
        payload_hash: BlockPayloadHash,
    ) -> Self {
        BlockHeader {
            chain,
            height,
            parent,
            adjacents,
            payload_hash,
        }
    }

    /// The genesis header of a chain: height zero, a zero parent hash,
    /// and an empty adjacent record.
    pub fn genesis(
        chain: ChainId,
        graph: &ChainGraph,
        payload_hash: BlockPayloadHash,
    ) -> Result<Self, ChainError> {
        if !graph.contains(chain) {
            return Err(ChainError::UnknownChain(chain));
        }
        Ok(BlockHeader {
            chain,
            height: 0,
            parent: BlockHash::default(),
            adjacents: BTreeMap::new(),
            payload_hash,
        })
    }

    /// The chain this header belongs to.
    pub fn chain(&self) -> ChainId {
        self.chain
    }

    /// The header's height.
    pub fn height(&self) -> BlockHeight {
        self.height
    }

    /// The hash of the parent header on the same chain.
    pub fn parent(&self) -> &BlockHash {
        &self.parent
    }

    /// The hash of this header's payload.
    pub fn payload_hash(&self) -> &BlockPayloadHash {
        &self.payload_hash
    }

    /// The full adjacent-parent record, in canonical (ascending) order.
    pub fn adjacents(&self) -> &BTreeMap<ChainId, BlockHash> {
        &self.adjacents
    }

    /// The adjacent-parent hash on `chain`, if recorded.
    pub fn adjacent_hash(&self, chain: ChainId) -> Option<&BlockHash> {
        self.adjacents.get(&chain)
    }

    /// The positional index of `chain` inside the adjacent record's
    /// canonical ordering; equal to the Merkle frame position of that
    /// adjacent-parent entry.
    pub fn adjacent_index(&self, chain: ChainId) -> Option<usize> {
        self.adjacents.keys().position(|&c| c == chain)
    }

    /// The header's Merkle entries in canonical order.
    fn merkle_entries(&self) -> Vec<MerkleEntry> {
        let mut entries: Vec<MerkleEntry> =
            self.adjacents.values().map(|h| MerkleEntry::Node(*h)).collect();
        entries.push(MerkleEntry::input(
            MerkleTag::ChainId,
            self.chain.encode().to_vec(),
        ));
        entries.push(MerkleEntry::input(
            MerkleTag::BlockHeight,
            self.height.to_be_bytes().to_vec(),
        ));
        entries.push(MerkleEntry::Node(self.parent));
        entries.push(MerkleEntry::Node(self.payload_hash));
        entries
    }

    /// The header's Merkle encoding.
    pub fn merkle_tree(&self) -> MerkleTree {
        MerkleTree::from_entries(&self.merkle_entries())
    }

    /// The header's block hash: the root of its Merkle encoding.
    pub fn block_hash(&self) -> BlockHash {
        self.merkle_tree().root()
    }

    /// The frame splicing through this header's payload-hash child.
    pub fn payload_frame(&self) -> (usize, MerkleTree) {
        (self.adjacents.len() + 3, self.merkle_tree())
    }

    /// The frame splicing through this header's parent-hash child.
    pub fn parent_frame(&self) -> (usize, MerkleTree) {
        (self.adjacents.len() + 2, self.merkle_tree())
    }

    /// The frame splicing through the adjacent-parent child on `chain`.
    pub fn adjacent_frame(&self, chain: ChainId) -> Result<(usize, MerkleTree), ChainError> {
        let index = self
            .adjacent_index(chain)
            .ok_or(ChainError::NotAdjacent(chain, self.chain))?;
        Ok((index, self.merkle_tree()))
    }
}

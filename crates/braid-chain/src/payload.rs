//! Block payloads, transactions, and outputs.
//!
//! A payload holds exactly two sub-roots: the transactions-tree root and
//! the outputs-tree root. Its own hash is the payload hash recorded in
//! the owning header. Transactions and outputs are opaque byte strings
//! here; interpreting them belongs to the execution layer.

use serde::{Deserialize, Serialize};

use braid_primitives::merkle::{MerkleEntry, MerkleTag, MerkleTree};

use crate::{BlockOutputsHash, BlockPayloadHash, BlockTransactionsHash};

/// An opaque transaction as stored in a block body.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Transaction(Vec<u8>);

impl Transaction {
    /// Wrap raw transaction bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Transaction(bytes.into())
    }

    /// The transaction's bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consume the transaction, yielding its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

/// An opaque transaction output as stored in a block body.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct TransactionOutput(Vec<u8>);

impl TransactionOutput {
    /// Wrap raw output bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        TransactionOutput(bytes.into())
    }

    /// The output's bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consume the output, yielding its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

/// The ordered transactions of one block.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct BlockTransactions(Vec<Transaction>);

impl BlockTransactions {
    /// Wrap an ordered transaction list.
    pub fn new(transactions: Vec<Transaction>) -> Self {
        BlockTransactions(transactions)
    }

    /// The number of transactions.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the block has no transactions.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The transaction at `index`.
    pub fn get(&self, index: usize) -> Option<&Transaction> {
        self.0.get(index)
    }

    /// Iterate the transactions in order.
    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.0.iter()
    }

    /// The Merkle tree over the transaction leaves.
    pub fn merkle_tree(&self) -> MerkleTree {
        let entries: Vec<MerkleEntry> = self
            .0
            .iter()
            .map(|tx| MerkleEntry::input(MerkleTag::Transaction, tx.bytes().to_vec()))
            .collect();
        MerkleTree::from_entries(&entries)
    }

    /// The transactions-tree root.
    pub fn root(&self) -> BlockTransactionsHash {
        self.merkle_tree().root()
    }

    /// The tagged leaf at `index` together with its position and the
    /// body tree it lives in; `None` when the index is out of range.
    pub fn leaf_frame(&self, index: usize) -> Option<(MerkleEntry, usize, MerkleTree)> {
        let tx = self.0.get(index)?;
        let subject = MerkleEntry::input(MerkleTag::Transaction, tx.bytes().to_vec());
        Some((subject, index, self.merkle_tree()))
    }
}

/// The ordered transaction outputs of one block.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct BlockOutputs(Vec<TransactionOutput>);

impl BlockOutputs {
    /// Wrap an ordered output list.
    pub fn new(outputs: Vec<TransactionOutput>) -> Self {
        BlockOutputs(outputs)
    }

    /// The number of outputs.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the block has no outputs.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The output at `index`.
    pub fn get(&self, index: usize) -> Option<&TransactionOutput> {
        self.0.get(index)
    }

    /// Iterate the outputs in order.
    pub fn iter(&self) -> impl Iterator<Item = &TransactionOutput> {
        self.0.iter()
    }

    /// The Merkle tree over the output leaves.
    pub fn merkle_tree(&self) -> MerkleTree {
        let entries: Vec<MerkleEntry> = self
            .0
            .iter()
            .map(|out| MerkleEntry::input(MerkleTag::TransactionOutput, out.bytes().to_vec()))
            .collect();
        MerkleTree::from_entries(&entries)
    }

    /// The outputs-tree root.
    pub fn root(&self) -> BlockOutputsHash {
        self.merkle_tree().root()
    }

    /// The tagged leaf at `index` together with its position and the
    /// body tree it lives in; `None` when the index is out of range.
    pub fn leaf_frame(&self, index: usize) -> Option<(MerkleEntry, usize, MerkleTree)> {
        let out = self.0.get(index)?;
        let subject = MerkleEntry::input(MerkleTag::TransactionOutput, out.bytes().to_vec());
        Some((subject, index, self.merkle_tree()))
    }
}

/// A block payload: the two body-tree roots of one block.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct BlockPayload {
    transactions_hash: BlockTransactionsHash,
    outputs_hash: BlockOutputsHash,
}

impl BlockPayload {
    /// Position of the transactions root inside the payload's encoding.
    const TRANSACTIONS_POSITION: usize = 0;
    /// Position of the outputs root inside the payload's encoding.
    const OUTPUTS_POSITION: usize = 1;

    /// Assemble a payload from its two sub-roots.
    pub fn new(
        transactions_hash: BlockTransactionsHash,
        outputs_hash: BlockOutputsHash,
    ) -> Self {
        BlockPayload {
            transactions_hash,
            outputs_hash,
        }
    }

    /// The payload of the given block body.
    pub fn of(transactions: &BlockTransactions, outputs: &BlockOutputs) -> Self {
        BlockPayload::new(transactions.root(), outputs.root())
    }

    /// The transactions-tree root.
    pub fn transactions_hash(&self) -> &BlockTransactionsHash {
        &self.transactions_hash
    }

    /// The outputs-tree root.
    pub fn outputs_hash(&self) -> &BlockOutputsHash {
        &self.outputs_hash
    }

    /// The payload's Merkle encoding: both sub-roots as subtree roots.
    pub fn merkle_tree(&self) -> MerkleTree {
        MerkleTree::from_entries(&[
            MerkleEntry::Node(self.transactions_hash),
            MerkleEntry::Node(self.outputs_hash),
        ])
    }

    /// The payload hash recorded in the owning header.
    pub fn payload_hash(&self) -> BlockPayloadHash {
        self.merkle_tree().root()
    }

    /// The frame splicing through the transactions-root child.
    pub fn transactions_frame(&self) -> (usize, MerkleTree) {
        (Self::TRANSACTIONS_POSITION, self.merkle_tree())
    }

    /// The frame splicing through the outputs-root child.
    pub fn outputs_frame(&self) -> (usize, MerkleTree) {
        (Self::OUTPUTS_POSITION, self.merkle_tree())
    }
}

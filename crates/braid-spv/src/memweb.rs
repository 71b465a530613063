//! In-memory braided chain.
//!
//! A reference implementation of [`CutDb`] and [`PayloadStore`] holding a
//! whole braided chain in memory: one canonical header sequence per chain
//! (no forks) plus content-addressed payload, transaction, and output
//! stores. All chains advance in lock step, so every non-genesis header's
//! adjacent record points one height below on each neighbor chain, as the
//! data model requires. The test suites are built on this type; embedders
//! can use it as a template for real store backends.

use std::collections::{BTreeMap, HashMap};

use braid_chain::{
    BlockHash, BlockHeader, BlockHeight, BlockOutputs, BlockOutputsHash, BlockPayload,
    BlockPayloadHash, BlockTransactions, BlockTransactionsHash, ChainError, ChainGraph, ChainId,
};

use crate::cut_db::CutDb;
use crate::error::SpvError;
use crate::payload_store::PayloadStore;

/// An in-memory braided chain with content-addressed payload stores.
#[derive(Clone, Debug)]
pub struct MemWeb {
    graph: ChainGraph,
    chains: BTreeMap<ChainId, Vec<BlockHeader>>,
    index: HashMap<BlockHash, (ChainId, BlockHeight)>,
    payloads: HashMap<BlockPayloadHash, BlockPayload>,
    transactions: HashMap<BlockTransactionsHash, BlockTransactions>,
    outputs: HashMap<BlockOutputsHash, BlockOutputs>,
}

impl MemWeb {
    /// Create a braided chain over `graph` with every chain at its
    /// genesis block. Genesis blocks carry empty bodies.
    pub fn new(graph: ChainGraph) -> Self {
        let mut web = MemWeb {
            graph,
            chains: BTreeMap::new(),
            index: HashMap::new(),
            payloads: HashMap::new(),
            transactions: HashMap::new(),
            outputs: HashMap::new(),
        };
        let chains: Vec<ChainId> = web.graph.chains().collect();
        for chain in chains {
            let transactions = BlockTransactions::default();
            let outputs = BlockOutputs::default();
            let payload = BlockPayload::of(&transactions, &outputs);
            let header = BlockHeader::genesis(chain, &web.graph, payload.payload_hash())
                .expect("graph contains its own chains");
            web.store_block(header, payload, transactions, outputs);
        }
        web
    }

    /// Advance every chain by one block, in lock step.
    ///
    /// `payload_for` supplies each new block's body, keyed by chain and
    /// the height of the block being created.
    pub fn extend<F>(&mut self, mut payload_for: F) -> Result<(), SpvError>
    where
        F: FnMut(ChainId, BlockHeight) -> (BlockTransactions, BlockOutputs),
    {
        // Capture the current frontier before any chain advances; the new
        // blocks all reference the old one.
        let mut heads: BTreeMap<ChainId, (BlockHash, BlockHeight)> = BTreeMap::new();
        for (&chain, headers) in &self.chains {
            if let Some(head) = headers.last() {
                heads.insert(chain, (head.block_hash(), head.height()));
            }
        }

        let chains: Vec<ChainId> = self.graph.chains().collect();
        for chain in chains {
            let (parent_hash, parent_height) = heads[&chain];
            let height = parent_height + 1;
            let (transactions, outputs) = payload_for(chain, height);
            let payload = BlockPayload::of(&transactions, &outputs);
            let adjacents: BTreeMap<ChainId, BlockHash> = self
                .graph
                .adjacent(chain)?
                .iter()
                .map(|&neighbor| (neighbor, heads[&neighbor].0))
                .collect();
            let header = BlockHeader::new(
                chain,
                height,
                parent_hash,
                adjacents,
                payload.payload_hash(),
            );
            self.store_block(header, payload, transactions, outputs);
        }
        Ok(())
    }

    /// Advance every chain `count` times with empty bodies.
    pub fn extend_empty(&mut self, count: usize) -> Result<(), SpvError> {
        for _ in 0..count {
            self.extend(|_, _| (BlockTransactions::default(), BlockOutputs::default()))?;
        }
        Ok(())
    }

    /// The current head of `chain`.
    pub fn head(&self, chain: ChainId) -> Option<&BlockHeader> {
        self.chains.get(&chain).and_then(|headers| headers.last())
    }

    /// The canonical header of `chain` at `height`.
    pub fn header_at(&self, chain: ChainId, height: BlockHeight) -> Option<&BlockHeader> {
        self.chains
            .get(&chain)
            .and_then(|headers| headers.get(height as usize))
    }

    /// Replace the stored payload blob under the key recorded by the
    /// header of `chain` at `height`.
    ///
    /// This deliberately breaks content addressing; it exists so tests
    /// can exercise store-corruption handling.
    pub fn override_payload(
        &mut self,
        chain: ChainId,
        height: BlockHeight,
        payload: BlockPayload,
    ) -> Result<(), SpvError> {
        let key = *self
            .header_at(chain, height)
            .ok_or_else(|| {
                SpvError::InternalInvariant(format!(
                    "no header at height {} on chain {}",
                    height, chain
                ))
            })?
            .payload_hash();
        self.payloads.insert(key, payload);
        Ok(())
    }

    fn store_block(
        &mut self,
        header: BlockHeader,
        payload: BlockPayload,
        transactions: BlockTransactions,
        outputs: BlockOutputs,
    ) {
        self.payloads.insert(payload.payload_hash(), payload);
        self.transactions.insert(transactions.root(), transactions);
        self.outputs.insert(outputs.root(), outputs);
        self.index
            .insert(header.block_hash(), (header.chain(), header.height()));
        self.chains.entry(header.chain()).or_default().push(header);
    }
}

impl CutDb for MemWeb {
    fn graph(&self) -> &ChainGraph {
        &self.graph
    }

    fn max_header(&self, chain: ChainId) -> Result<BlockHeader, SpvError> {
        self.head(chain)
            .cloned()
            .ok_or_else(|| SpvError::Chain(ChainError::UnknownChain(chain)))
    }

    fn lookup_header(
        &self,
        chain: ChainId,
        hash: &BlockHash,
    ) -> Result<Option<BlockHeader>, SpvError> {
        let found = self.index.get(hash).and_then(|&(found_chain, height)| {
            if found_chain == chain {
                self.header_at(chain, height).cloned()
            } else {
                None
            }
        });
        Ok(found)
    }

    fn member(&self, chain: ChainId, hash: &BlockHash) -> Result<bool, SpvError> {
        Ok(self.lookup_header(chain, hash)?.is_some())
    }
}

impl PayloadStore for MemWeb {
    fn payload(&self, hash: &BlockPayloadHash) -> Result<Option<BlockPayload>, SpvError> {
        Ok(self.payloads.get(hash).cloned())
    }

    fn transactions(
        &self,
        root: &BlockTransactionsHash,
    ) -> Result<Option<BlockTransactions>, SpvError> {
        Ok(self.transactions.get(root).cloned())
    }

    fn outputs(&self, root: &BlockOutputsHash) -> Result<Option<BlockOutputs>, SpvError> {
        Ok(self.outputs.get(root).cloned())
    }
}

//! SPV proof construction.
//!
//! The builder walks the braided chain in one pass: from the target
//! chain's current head across adjacent-parent edges to the source chain,
//! then down parent edges to the source block, where it opens the payload
//! and extracts the requested leaf. The collected frames are assembled so
//! that the fold starts at the leaf and ends at the target head's block
//! hash.

use braid_chain::{BlockHeader, BlockHeight, ChainId};
use braid_primitives::merkle::{MerkleProof, MerkleTree};

use crate::cut_db::CutDb;
use crate::error::SpvError;
use crate::payload_store::PayloadStore;
use crate::proof::{TransactionOutputProof, TransactionProof};

/// Which body tree of the source block a proof opens.
enum BodyKind {
    Transactions,
    Outputs,
}

/// Create a proof that the transaction at `leaf_index` of the source
/// block (`source_chain`, `source_height`) is included in the history
/// visible from the current head of `target_chain`.
///
/// `leaf_index` is not range-checked up front; an index outside the block
/// body surfaces as a malformed-proof error.
pub fn create_transaction_proof<C: CutDb, P: PayloadStore>(
    cut_db: &C,
    payload_db: &P,
    target_chain: ChainId,
    source_chain: ChainId,
    source_height: BlockHeight,
    leaf_index: usize,
) -> Result<TransactionProof, SpvError> {
    let proof = create_inclusion_proof(
        cut_db,
        payload_db,
        target_chain,
        source_chain,
        source_height,
        leaf_index,
        BodyKind::Transactions,
    )?;
    Ok(TransactionProof::new(target_chain, proof))
}

/// Create a proof for the transaction output at `leaf_index` of the
/// source block; the output-tree analogue of
/// [`create_transaction_proof`].
pub fn create_transaction_output_proof<C: CutDb, P: PayloadStore>(
    cut_db: &C,
    payload_db: &P,
    target_chain: ChainId,
    source_chain: ChainId,
    source_height: BlockHeight,
    leaf_index: usize,
) -> Result<TransactionOutputProof, SpvError> {
    let proof = create_inclusion_proof(
        cut_db,
        payload_db,
        target_chain,
        source_chain,
        source_height,
        leaf_index,
        BodyKind::Outputs,
    )?;
    Ok(TransactionOutputProof::new(target_chain, proof))
}

fn create_inclusion_proof<C: CutDb, P: PayloadStore>(
    cut_db: &C,
    payload_db: &P,
    target_chain: ChainId,
    source_chain: ChainId,
    source_height: BlockHeight,
    leaf_index: usize,
    kind: BodyKind,
) -> Result<MerkleProof, SpvError> {
    // Head and reachability. Every adjacent edge consumes one ancestor
    // step, so the path cannot be longer than the target head's height
    // plus one.
    let target_head = cut_db.max_header(target_chain)?;
    let path = cut_db.graph().shortest_path(target_chain, source_chain)?;
    if target_head.height() + 1 < path.len() as BlockHeight {
        return Err(SpvError::TargetNotReachable("chain too young".to_string()));
    }

    // Walk adjacent edges from the target head to the source chain,
    // recording one splice frame per hop.
    let mut cross_frames: Vec<(usize, MerkleTree)> = Vec::with_capacity(path.len());
    let mut current = target_head;
    for &hop in &path {
        let frame = current.adjacent_frame(hop).map_err(|_| {
            SpvError::InternalInvariant(format!(
                "header at height {} on chain {} has no adjacent parent on chain {}",
                current.height(),
                current.chain(),
                hop
            ))
        })?;
        let next = cut_db.lookup_adjacent_parent_header(&current, hop)?;
        cross_frames.push(frame);
        current = next;
    }
    let source_head = current;
    if source_head.height() < source_height {
        return Err(SpvError::TargetNotReachable(
            "source transaction above reachable source head".to_string(),
        ));
    }

    // Walk parent edges on the source chain down to the source block.
    // The walk ends at the source head and starts at the source header.
    let walk = parent_walk(cut_db, source_head, source_height)?;
    let source_header = &walk[0];

    // Open the payload of the source block.
    let payload = payload_db
        .payload(source_header.payload_hash())?
        .ok_or_else(|| {
            SpvError::InconsistentPayloadData(format!(
                "no payload stored for hash {}",
                source_header.payload_hash()
            ))
        })?;

    // Extract the leaf and the two body frames.
    let (subject, leaf_position, body_tree, payload_frame) = match kind {
        BodyKind::Transactions => {
            let transactions = payload_db
                .transactions(payload.transactions_hash())?
                .ok_or_else(|| {
                    SpvError::InconsistentPayloadData(format!(
                        "no transactions stored for root {}",
                        payload.transactions_hash()
                    ))
                })?;
            let (subject, position, tree) =
                transactions.leaf_frame(leaf_index).ok_or_else(|| {
                    braid_primitives::PrimitivesError::MalformedProof(format!(
                        "transaction index {} outside block body of {} entries",
                        leaf_index,
                        transactions.len()
                    ))
                })?;
            (subject, position, tree, payload.transactions_frame())
        }
        BodyKind::Outputs => {
            let outputs = payload_db.outputs(payload.outputs_hash())?.ok_or_else(|| {
                SpvError::InconsistentPayloadData(format!(
                    "no outputs stored for root {}",
                    payload.outputs_hash()
                ))
            })?;
            let (subject, position, tree) = outputs.leaf_frame(leaf_index).ok_or_else(|| {
                braid_primitives::PrimitivesError::MalformedProof(format!(
                    "output index {} outside block body of {} entries",
                    leaf_index,
                    outputs.len()
                ))
            })?;
            (subject, position, tree, payload.outputs_frame())
        }
    };

    // The store is content-addressed, so a payload that does not hash to
    // the key its header records means the store is corrupt.
    if payload.payload_hash() != *source_header.payload_hash() {
        return Err(SpvError::InconsistentPayloadData(format!(
            "stored payload hashes to {} but header at height {} on chain {} records {}",
            payload.payload_hash(),
            source_header.height(),
            source_header.chain(),
            source_header.payload_hash()
        )));
    }

    // Assemble: leaf prefix, then the header spine up the source chain,
    // then the cross-chain frames back to the target head.
    let mut frames: Vec<(usize, MerkleTree)> =
        Vec::with_capacity(3 + (walk.len() - 1) + cross_frames.len());
    frames.push((leaf_position, body_tree));
    frames.push(payload_frame);
    frames.push(source_header.payload_frame());
    for header in &walk[1..] {
        frames.push(header.parent_frame());
    }
    frames.extend(cross_frames.into_iter().rev());

    Ok(MerkleProof::new(subject, frames)?)
}

/// The chain of headers from the block at `height` up to `head`,
/// inclusive, linked by parent edges.
fn parent_walk<C: CutDb>(
    cut_db: &C,
    head: BlockHeader,
    height: BlockHeight,
) -> Result<Vec<BlockHeader>, SpvError> {
    let mut walk = Vec::new();
    let mut current = head;
    while current.height() > height {
        let parent = cut_db.lookup_parent_header(&current)?;
        walk.push(current);
        current = parent;
    }
    if current.height() < height {
        return Err(SpvError::TargetNotReachable(format!(
            "parent walk cannot land on height {}",
            height
        )));
    }
    walk.push(current);
    walk.reverse();
    Ok(walk)
}

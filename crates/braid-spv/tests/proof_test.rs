//! End-to-end scenarios for proof construction and verification on a
//! three-chain braid.

use braid_chain::{
    BlockOutputs, BlockPayload, BlockTransactions, ChainGraph, ChainId, Transaction,
    TransactionOutput,
};
use braid_primitives::merkle::{MerkleEntry, MerkleProof, MerkleTag};
use braid_primitives::PrimitivesError;
use braid_spv::{
    create_transaction_output_proof, create_transaction_proof, verify_transaction_output_proof,
    verify_transaction_proof, CutDb, MemWeb, PayloadStore, SpvError, TransactionProof,
};

fn c(id: u32) -> ChainId {
    ChainId::new(id)
}

fn tx_bytes(chain: ChainId, height: u64, index: usize) -> Vec<u8> {
    format!("tx-{}-{}-{}", chain, height, index).into_bytes()
}

fn out_bytes(chain: ChainId, height: u64, index: usize) -> Vec<u8> {
    format!("out-{}-{}-{}", chain, height, index).into_bytes()
}

/// A braided chain over `graph` extended to `height`, three transactions
/// and three outputs per block.
fn web(graph: ChainGraph, height: usize) -> MemWeb {
    let mut web = MemWeb::new(graph);
    for _ in 0..height {
        web.extend(|chain, block_height| {
            let transactions = BlockTransactions::new(
                (0..3)
                    .map(|i| Transaction::new(tx_bytes(chain, block_height, i)))
                    .collect(),
            );
            let outputs = BlockOutputs::new(
                (0..3)
                    .map(|i| TransactionOutput::new(out_bytes(chain, block_height, i)))
                    .collect(),
            );
            (transactions, outputs)
        })
        .unwrap();
    }
    web
}

fn web3(height: usize) -> MemWeb {
    web(ChainGraph::complete(3), height)
}

// S1: target and source are the same chain.
#[test]
fn test_same_chain_proof_roundtrip() {
    let web = web3(10);
    let proof = create_transaction_proof(&web, &web, c(0), c(0), 5, 2).unwrap();
    let transaction = verify_transaction_proof(&web, &proof).unwrap();
    assert_eq!(transaction.bytes(), tx_bytes(c(0), 5, 2).as_slice());

    // No cross-chain hop: body frame, payload frame, source header frame,
    // and one parent frame per height between source block and head.
    assert_eq!(proof.proof().frames().len(), 3 + (10 - 5));
}

// S2: one adjacent hop from the target to the source chain.
#[test]
fn test_one_hop_proof_roundtrip() {
    let web = web3(10);
    let proof = create_transaction_proof(&web, &web, c(1), c(0), 5, 0).unwrap();
    assert_eq!(proof.chain(), c(1));
    let transaction = verify_transaction_proof(&web, &proof).unwrap();
    assert_eq!(transaction.bytes(), tx_bytes(c(0), 5, 0).as_slice());

    // One hop costs one ancestor step: the reachable source head is one
    // below the target head, plus the single cross-chain frame.
    assert_eq!(proof.proof().frames().len(), 3 + (9 - 5) + 1);
}

// A two-hop proof across a line graph.
#[test]
fn test_two_hop_proof_roundtrip() {
    let line = ChainGraph::new([(c(0), c(1)), (c(1), c(2))]).unwrap();
    let web = web(line, 3);
    let proof = create_transaction_proof(&web, &web, c(0), c(2), 1, 1).unwrap();
    let transaction = verify_transaction_proof(&web, &proof).unwrap();
    assert_eq!(transaction.bytes(), tx_bytes(c(2), 1, 1).as_slice());
}

// S3: the source height lies above what the target head can reach.
#[test]
fn test_source_above_reachable_head() {
    let web = web3(3);
    let err = create_transaction_proof(&web, &web, c(1), c(0), 4, 0).unwrap_err();
    match err {
        SpvError::TargetNotReachable(message) => {
            assert_eq!(message, "source transaction above reachable source head")
        }
        other => panic!("expected TargetNotReachable, got {other:?}"),
    }
}

// S4: the path is longer than the target head's height allows.
#[test]
fn test_chain_too_young() {
    let line = ChainGraph::new([(c(0), c(1)), (c(1), c(2))]).unwrap();
    let web = web(line, 0);
    let err = create_transaction_proof(&web, &web, c(0), c(2), 0, 0).unwrap_err();
    match err {
        SpvError::TargetNotReachable(message) => assert_eq!(message, "chain too young"),
        other => panic!("expected TargetNotReachable, got {other:?}"),
    }
}

// S5: replacing the subject of a valid proof breaks verification.
#[test]
fn test_tampered_subject_fails_verification() {
    let web = web3(10);
    let valid = create_transaction_proof(&web, &web, c(1), c(0), 5, 0).unwrap();

    let forged_subject = MerkleEntry::input(MerkleTag::Transaction, tx_bytes(c(0), 5, 1));
    let forged: MerkleProof =
        MerkleProof::from_frames(forged_subject, valid.proof().frames().to_vec()).unwrap();
    let forged = TransactionProof::new(valid.chain(), forged);

    assert!(matches!(
        verify_transaction_proof(&web, &forged),
        Err(SpvError::VerificationFailed(_))
    ));
}

// S6: a stored payload that does not hash to the key its header records.
#[test]
fn test_corrupt_payload_hash_mismatch() {
    let mut web = web3(10);
    // Swap in another block's (well-formed, fully stored) payload.
    let foreign = web
        .payload(web.header_at(c(1), 5).unwrap().payload_hash())
        .unwrap()
        .unwrap();
    web.override_payload(c(0), 5, foreign).unwrap();

    let err = create_transaction_proof(&web, &web, c(0), c(0), 5, 0).unwrap_err();
    assert!(matches!(err, SpvError::InconsistentPayloadData(_)));
}

// A payload pointing at body trees the store has never seen.
#[test]
fn test_corrupt_payload_missing_bodies() {
    let mut web = web3(10);
    let bogus = BlockPayload::new(Default::default(), Default::default());
    web.override_payload(c(0), 5, bogus).unwrap();

    let err = create_transaction_proof(&web, &web, c(0), c(0), 5, 0).unwrap_err();
    match err {
        SpvError::InconsistentPayloadData(message) => {
            assert!(message.contains("no transactions stored"), "{message}")
        }
        other => panic!("expected InconsistentPayloadData, got {other:?}"),
    }
}

#[test]
fn test_leaf_index_out_of_range_is_malformed() {
    let web = web3(10);
    let err = create_transaction_proof(&web, &web, c(0), c(0), 5, 3).unwrap_err();
    assert!(matches!(
        err,
        SpvError::Primitives(PrimitivesError::MalformedProof(_))
    ));
}

#[test]
fn test_output_proof_roundtrip() {
    let web = web3(10);
    let proof = create_transaction_output_proof(&web, &web, c(2), c(0), 7, 1).unwrap();
    let output = verify_transaction_output_proof(&web, &proof).unwrap();
    assert_eq!(output.bytes(), out_bytes(c(0), 7, 1).as_slice());
}

// Transaction and output proofs for the same source leaf share their
// header spine; only the two body frames differ.
#[test]
fn test_proof_kinds_share_header_spine() {
    let web = web3(10);
    let tx_proof = create_transaction_proof(&web, &web, c(1), c(0), 5, 2).unwrap();
    let out_proof = create_transaction_output_proof(&web, &web, c(1), c(0), 5, 2).unwrap();

    let tx_frames = tx_proof.proof().frames();
    let out_frames = out_proof.proof().frames();
    assert_eq!(tx_frames.len(), out_frames.len());
    assert_eq!(&tx_frames[2..], &out_frames[2..]);
    assert_ne!(tx_frames[1], out_frames[1]);
}

// A proof built against an older head keeps verifying after the braid
// grows: its witnessing header stays in the canonical history.
#[test]
fn test_proof_survives_extension() {
    let mut web = web3(10);
    let proof = create_transaction_proof(&web, &web, c(1), c(0), 5, 0).unwrap();
    web.extend_empty(4).unwrap();
    let transaction = verify_transaction_proof(&web, &proof).unwrap();
    assert_eq!(transaction.bytes(), tx_bytes(c(0), 5, 0).as_slice());
}

// Rebinding a proof to another chain must fail the membership check.
#[test]
fn test_rebound_target_chain_fails() {
    let web = web3(10);
    let proof = create_transaction_proof(&web, &web, c(1), c(0), 5, 0).unwrap();
    let rebound = TransactionProof::new(c(2), proof.proof().clone());
    assert!(matches!(
        verify_transaction_proof(&web, &rebound),
        Err(SpvError::VerificationFailed(_))
    ));
}

// The fold of a valid proof lands exactly on the target head that was
// current at construction time.
#[test]
fn test_fold_lands_on_construction_head() {
    let web = web3(10);
    let head = web.max_header(c(1)).unwrap();
    let proof = create_transaction_proof(&web, &web, c(1), c(0), 5, 0).unwrap();
    assert_eq!(
        braid_spv::run_transaction_proof(&proof).unwrap(),
        head.block_hash()
    );
}

// Proofs serialize losslessly; the recovered value verifies as-is.
#[test]
fn test_proof_serde_roundtrip() {
    let web = web3(10);
    let proof = create_transaction_proof(&web, &web, c(1), c(0), 5, 0).unwrap();
    let json = serde_json::to_string(&proof).unwrap();
    let back: TransactionProof = serde_json::from_str(&json).unwrap();
    assert_eq!(back, proof);
    let transaction = verify_transaction_proof(&web, &back).unwrap();
    assert_eq!(transaction.bytes(), tx_bytes(c(0), 5, 0).as_slice());
}

//! Merkle inclusion proofs.
//!
//! A proof carries a subject (the tagged leaf it is about) and an ordered,
//! non-empty list of frames. Each frame is derived from a `(position, tree)`
//! pair at construction time and stores only the bottom-up sibling path for
//! that position, so every byte held by a proof participates in the fold.
//! Running the proof hashes the subject into the first frame at its
//! position, takes the resulting root as the next frame's subject, and so
//! on until a single root remains.

use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

use crate::merkle::tree::fold_level;
use crate::merkle::{MerkleEntry, MerkleHash, MerkleHasher, MerkleTree, Sha512t256};
use crate::PrimitivesError;

/// One level of a proof: a leaf position and its sibling path.
///
/// A `None` path element marks an odd-arity boundary where the running
/// hash is paired with itself instead of a stored sibling.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct MerkleFrame {
    position: u64,
    path: Vec<Option<MerkleHash>>,
}

impl MerkleFrame {
    /// Derive the sibling path for `position` inside `tree`.
    ///
    /// Fails with a malformed-proof error when the position does not lie
    /// within the tree.
    pub fn from_tree<H: MerkleHasher>(
        position: usize,
        tree: &MerkleTree<H>,
    ) -> Result<Self, PrimitivesError> {
        if position >= tree.len() {
            return Err(PrimitivesError::MalformedProof(format!(
                "frame position {} outside tree of {} nodes",
                position,
                tree.len()
            )));
        }
        let mut path = Vec::new();
        let mut level = tree.nodes().to_vec();
        let mut pos = position;
        while level.len() > 1 {
            if pos % 2 == 0 {
                path.push(level.get(pos + 1).copied());
            } else {
                path.push(Some(level[pos - 1]));
            }
            level = fold_level::<H>(&level);
            pos /= 2;
        }
        Ok(MerkleFrame {
            position: position as u64,
            path,
        })
    }

    /// The zero-based leaf position this frame splices at.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// The bottom-up sibling path.
    pub fn path(&self) -> &[Option<MerkleHash>] {
        &self.path
    }

    /// Hash `start` up through this frame, producing the frame's root.
    fn fold<H: MerkleHasher>(&self, start: MerkleHash) -> Result<MerkleHash, PrimitivesError> {
        let mut acc = start;
        let mut pos = self.position;
        for step in &self.path {
            acc = match (pos & 1, step) {
                (0, Some(sibling)) => H::hash_node(&acc, sibling),
                (0, None) => H::hash_node(&acc, &acc),
                (_, Some(sibling)) => H::hash_node(sibling, &acc),
                (_, None) => {
                    return Err(PrimitivesError::MalformedProof(
                        "duplicated sibling at an odd position".to_string(),
                    ))
                }
            };
            pos >>= 1;
        }
        Ok(acc)
    }
}

/// An inclusion proof: a subject and the frames that climb from it to a
/// single root.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(bound(serialize = "", deserialize = ""))]
pub struct MerkleProof<H: MerkleHasher = Sha512t256> {
    subject: MerkleEntry,
    frames: Vec<MerkleFrame>,
    #[serde(skip)]
    _hasher: PhantomData<H>,
}

impl<H: MerkleHasher> MerkleProof<H> {
    /// Build a proof from a subject and a non-empty ordered list of
    /// `(position, tree)` frames.
    ///
    /// Each position is checked against its tree; a position outside its
    /// tree or an empty frame list is a malformed proof.
    pub fn new(
        subject: MerkleEntry,
        frames: Vec<(usize, MerkleTree<H>)>,
    ) -> Result<Self, PrimitivesError> {
        if frames.is_empty() {
            return Err(PrimitivesError::MalformedProof(
                "proof must contain at least one frame".to_string(),
            ));
        }
        let frames = frames
            .iter()
            .map(|(position, tree)| MerkleFrame::from_tree(*position, tree))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(MerkleProof {
            subject,
            frames,
            _hasher: PhantomData,
        })
    }

    /// Reassemble a proof from its parts, e.g. after transport.
    ///
    /// The same structural checks as [`MerkleProof::new`] apply to what can
    /// be checked without the original trees: the frame list must be
    /// non-empty.
    pub fn from_frames(
        subject: MerkleEntry,
        frames: Vec<MerkleFrame>,
    ) -> Result<Self, PrimitivesError> {
        if frames.is_empty() {
            return Err(PrimitivesError::MalformedProof(
                "proof must contain at least one frame".to_string(),
            ));
        }
        Ok(MerkleProof {
            subject,
            frames,
            _hasher: PhantomData,
        })
    }

    /// The leaf value this proof is about.
    pub fn subject(&self) -> &MerkleEntry {
        &self.subject
    }

    /// The proof's frames, in fold order.
    pub fn frames(&self) -> &[MerkleFrame] {
        &self.frames
    }

    /// Fold the proof from the subject outward to its final root.
    ///
    /// Deterministic in the proof value. Fails only when the proof is
    /// structurally impossible (an empty frame list or a sibling path that
    /// could not have come from a tree).
    pub fn run(&self) -> Result<MerkleHash, PrimitivesError> {
        if self.frames.is_empty() {
            return Err(PrimitivesError::MalformedProof(
                "proof must contain at least one frame".to_string(),
            ));
        }
        let mut acc = self.subject.hash::<H>();
        for frame in &self.frames {
            acc = frame.fold::<H>(acc)?;
        }
        Ok(acc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::sha512_256;
    use crate::merkle::MerkleTag;

    fn body_entries(n: u8) -> Vec<MerkleEntry> {
        (0..n)
            .map(|i| MerkleEntry::input(MerkleTag::Transaction, vec![i]))
            .collect()
    }

    #[test]
    fn test_frame_fold_reproduces_root_at_every_position() {
        for n in 1u8..=6 {
            let entries = body_entries(n);
            let tree: MerkleTree = MerkleTree::from_entries(&entries);
            for (pos, entry) in entries.iter().enumerate() {
                let frame = MerkleFrame::from_tree(pos, &tree).unwrap();
                let folded = frame.fold::<Sha512t256>(entry.hash::<Sha512t256>()).unwrap();
                assert_eq!(folded, tree.root(), "n={} pos={}", n, pos);
            }
        }
    }

    #[test]
    fn test_frame_rejects_position_outside_tree() {
        let tree: MerkleTree = MerkleTree::from_entries(&body_entries(3));
        let err = MerkleFrame::from_tree(3, &tree).unwrap_err();
        assert!(matches!(err, PrimitivesError::MalformedProof(_)));
    }

    #[test]
    fn test_proof_requires_frames() {
        let subject = MerkleEntry::input(MerkleTag::Transaction, b"tx".to_vec());
        let err = MerkleProof::<Sha512t256>::new(subject.clone(), vec![]).unwrap_err();
        assert!(matches!(err, PrimitivesError::MalformedProof(_)));

        let err = MerkleProof::<Sha512t256>::from_frames(subject, vec![]).unwrap_err();
        assert!(matches!(err, PrimitivesError::MalformedProof(_)));
    }

    #[test]
    fn test_two_level_proof() {
        // Inner tree of transactions; its root sits at slot 1 of an outer
        // two-entry tree. The proof climbs both.
        let entries = body_entries(4);
        let inner: MerkleTree = MerkleTree::from_entries(&entries);
        let other = MerkleHash::new(sha512_256(b"left neighbor"));
        let outer: MerkleTree =
            MerkleTree::from_entries(&[MerkleEntry::Node(other), MerkleEntry::Node(inner.root())]);

        let proof = MerkleProof::new(
            entries[2].clone(),
            vec![(2, inner), (1, outer.clone())],
        )
        .unwrap();
        assert_eq!(proof.run().unwrap(), outer.root());
    }

    #[test]
    fn test_run_is_deterministic() {
        let entries = body_entries(5);
        let tree: MerkleTree = MerkleTree::from_entries(&entries);
        let proof = MerkleProof::new(entries[4].clone(), vec![(4, tree)]).unwrap();
        assert_eq!(proof.run().unwrap(), proof.run().unwrap());
    }

    #[test]
    fn test_tampered_subject_changes_root() {
        let entries = body_entries(4);
        let tree: MerkleTree = MerkleTree::from_entries(&entries);
        let honest = MerkleProof::new(entries[1].clone(), vec![(1, tree.clone())]).unwrap();

        let forged = MerkleProof::new(
            MerkleEntry::input(MerkleTag::Transaction, b"forged".to_vec()),
            vec![(1, tree)],
        )
        .unwrap();
        assert_ne!(honest.run().unwrap(), forged.run().unwrap());
    }

    #[test]
    fn test_serde_roundtrip_preserves_root() {
        let entries = body_entries(5);
        let tree: MerkleTree = MerkleTree::from_entries(&entries);
        let proof = MerkleProof::new(entries[3].clone(), vec![(3, tree)]).unwrap();

        let json = serde_json::to_string(&proof).unwrap();
        let back: MerkleProof = serde_json::from_str(&json).unwrap();
        assert_eq!(back, proof);
        assert_eq!(back.run().unwrap(), proof.run().unwrap());
    }

    #[test]
    fn test_impossible_path_is_rejected_at_run() {
        // A duplicate marker at an odd position cannot come from a tree;
        // such a frame only exists via deserialization.
        let json = r#"{"subject":{"Input":{"tag":"Transaction","bytes":[1]}},"frames":[{"position":1,"path":[null]}]}"#;
        let proof: MerkleProof = serde_json::from_str(json).unwrap();
        assert!(matches!(
            proof.run().unwrap_err(),
            PrimitivesError::MalformedProof(_)
        ));
    }
}

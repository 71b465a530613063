#![deny(missing_docs)]

//! Braid SDK - Complete SDK.
//!
//! Re-exports all braid SDK components for convenient single-crate usage.

pub use braid_chain as chain;
pub use braid_primitives as primitives;
pub use braid_spv as spv;

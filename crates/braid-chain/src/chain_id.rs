//! Chain identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Opaque identifier of one chain within the braided set.
///
/// The canonical encoding is 4-byte big-endian, so the numeric order of
/// chain ids equals the lexicographic order of their encodings. That
/// single total order is what the adjacent-record layout and the graph's
/// tie-breaking both rely on.
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize,
)]
pub struct ChainId(u32);

impl ChainId {
    /// Create a chain id from its numeric value.
    pub const fn new(id: u32) -> Self {
        ChainId(id)
    }

    /// The numeric value of this chain id.
    pub const fn get(self) -> u32 {
        self.0
    }

    /// The canonical 4-byte big-endian encoding.
    pub fn encode(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ChainId {
    fn from(id: u32) -> Self {
        ChainId(id)
    }
}

impl FromStr for ChainId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u32>().map(ChainId)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_matches_encoding_order() {
        let ids = [0u32, 1, 9, 10, 255, 256, u32::MAX];
        for window in ids.windows(2) {
            let (a, b) = (ChainId::new(window[0]), ChainId::new(window[1]));
            assert!(a < b);
            assert!(a.encode() < b.encode());
        }
    }

    #[test]
    fn test_display_parse_roundtrip() {
        let id = ChainId::new(7);
        assert_eq!(id.to_string(), "7");
        assert_eq!("7".parse::<ChainId>().unwrap(), id);
    }
}

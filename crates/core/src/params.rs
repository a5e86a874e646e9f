//! Equihash Parameter Table
//!
//! The fixed set of `(N, K)` pairs consensus accepts. Adding a pair is a
//! protocol change: one entry in [`SUPPORTED_PARAMS`] plus test fixtures.

use core::fmt;

use crate::error::Error;

/// Block header length fed into the seed state
pub const HEADER_LEN: usize = 32;

/// Nonce length fed into the seed state after the header
pub const NONCE_LEN: usize = 8;

/// Proof hash (SHA-256) output size
pub const PROOF_HASH_LEN: usize = 32;

/// BLAKE2b personalization prefix, followed by `le32(N) || le32(K)`
pub const PERSONALIZATION_PREFIX: &[u8; 8] = b"Beam-PoW";

/// Width of one BLAKE2b output in bits; bounds how many leaves share a block digest
const BLAKE2B_OUTPUT_BITS: u32 = 512;

/// An accepted Equihash configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Params {
    n: u32,
    k: u32,
}

/// Every `(N, K)` pair the verifier accepts
pub const SUPPORTED_PARAMS: [Params; 5] = [
    Params { n: 96, k: 3 },
    Params { n: 150, k: 5 },
    Params { n: 200, k: 9 },
    Params { n: 96, k: 5 },
    Params { n: 48, k: 5 },
];

/// Parameters used when the caller does not name a pair
pub const DEFAULT_PARAMS: Params = Params { n: 150, k: 5 };

impl Params {
    /// Look up `(n, k)` in the table.
    ///
    /// Pairs outside [`SUPPORTED_PARAMS`] are rejected, never approximated.
    pub fn lookup(n: u32, k: u32) -> Result<Self, Error> {
        SUPPORTED_PARAMS
            .iter()
            .copied()
            .find(|p| p.n == n && p.k == k)
            .ok_or(Error::UnsupportedParams { n, k })
    }

    /// Bit width of the search space
    pub const fn n(&self) -> u32 {
        self.n
    }

    /// Number of folding rounds
    pub const fn k(&self) -> u32 {
        self.k
    }

    /// Bits that must collide per round: `N / (K + 1)`
    pub const fn collision_bit_length(&self) -> u32 {
        self.n / (self.k + 1)
    }

    /// Bits per encoded index: one more than the collision width
    pub const fn index_bit_length(&self) -> u32 {
        self.collision_bit_length() + 1
    }

    /// Exclusive upper bound on index values
    pub const fn index_limit(&self) -> u32 {
        1 << self.index_bit_length()
    }

    /// Number of indices in a solution: `2^K`
    pub const fn solution_len(&self) -> usize {
        1 << self.k
    }

    /// Byte length of a minimally encoded solution
    pub const fn solution_width(&self) -> usize {
        self.solution_len() * self.index_bit_length() as usize / 8
    }

    /// Leaves carved out of one BLAKE2b block digest
    pub const fn indices_per_hash_output(&self) -> u32 {
        BLAKE2B_OUTPUT_BITS / self.n
    }

    /// Byte length of one block digest
    pub const fn hash_output_len(&self) -> usize {
        (self.indices_per_hash_output() * self.n).div_ceil(8) as usize
    }

    /// BLAKE2b personalization: `"Beam-PoW" || le32(N) || le32(K)`
    pub fn personalization(&self) -> [u8; 16] {
        let mut personal = [0u8; 16];
        personal[..8].copy_from_slice(PERSONALIZATION_PREFIX);
        personal[8..12].copy_from_slice(&self.n.to_le_bytes());
        personal[12..].copy_from_slice(&self.k.to_le_bytes());
        personal
    }
}

impl Default for Params {
    fn default() -> Self {
        DEFAULT_PARAMS
    }
}

impl fmt::Display for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Equihash({}, {})", self.n, self.k)
    }
}

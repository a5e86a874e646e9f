//! Hash primitives the verifier is built on.
//!
//! The Solution Validator only sees the [`HashState`] trait; [`Blake2bState`]
//! is the consensus instance. The proof hash is plain SHA-256.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use blake2b_simd::{Params as Blake2bParams, State};
use sha2::{Digest, Sha256};

use crate::params::{PROOF_HASH_LEN, Params};

/// Seeded, keyed hash state that leaf digests are expanded from.
///
/// Implementations must be deterministic: the same updates followed by the
/// same `block_digest` call always produce the same bytes.
pub trait HashState: Clone {
    /// Fresh state for `params`, before header and nonce are absorbed.
    fn initialise(params: &Params) -> Self;

    /// Absorb `data`.
    fn update(&mut self, data: &[u8]);

    /// Digest of block `block`, `params.hash_output_len()` bytes long.
    ///
    /// Leaf `i` lives in block `i / indices_per_hash_output` at bit offset
    /// `(i % indices_per_hash_output) * N`.
    fn block_digest(&self, block: u32) -> Vec<u8>;
}

/// BLAKE2b with the Equihash personalization and a per-parameter digest length
#[derive(Clone)]
pub struct Blake2bState {
    state: State,
}

impl HashState for Blake2bState {
    fn initialise(params: &Params) -> Self {
        let state = Blake2bParams::new()
            .hash_length(params.hash_output_len())
            .personal(&params.personalization())
            .to_state();
        Self { state }
    }

    fn update(&mut self, data: &[u8]) {
        self.state.update(data);
    }

    fn block_digest(&self, block: u32) -> Vec<u8> {
        let mut state = self.state.clone();
        state.update(&block.to_le_bytes());
        state.finalize().as_bytes().to_vec()
    }
}

/// Seed state for one verification: `initialise`, then header, then nonce.
pub fn seed_state<H: HashState>(params: &Params, header: &[u8], nonce: &[u8]) -> H {
    let mut state = H::initialise(params);
    state.update(header);
    state.update(nonce);
    state
}

/// SHA-256 of a candidate proof buffer
pub fn proof_hash(buf: &[u8]) -> [u8; PROOF_HASH_LEN] {
    Sha256::digest(buf).into()
}

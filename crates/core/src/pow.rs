//! Entry points for binding layers.
//!
//! Mirrors the host binding surface: `verify` for Equihash, `check_target`
//! for the proof hash against a packed difficulty, and
//! `approximate_difficulty` for display.

use tracing::debug;

use crate::bits::indices_from_minimal;
use crate::difficulty::Difficulty;
use crate::equihash::{Rejection, find_rejection};
use crate::error::Error;
use crate::hash::{Blake2bState, proof_hash, seed_state};
use crate::params::{HEADER_LEN, NONCE_LEN, Params};
use crate::target::is_target_reached;

/// Verify a minimally encoded Equihash solution for `header || nonce`.
///
/// Returns `Ok(false)` for a header that is not 32 bytes and for any proof
/// that fails the collision tree. Contract violations (unsupported `(n, k)`,
/// nonce not 8 bytes, wrong solution width) are errors.
pub fn verify(header: &[u8], nonce: &[u8], solution: &[u8], n: u32, k: u32) -> Result<bool, Error> {
    Ok(explain(header, nonce, solution, n, k)?.is_none())
}

/// Like [`verify`], but names the rule an invalid solution broke.
pub fn explain(
    header: &[u8],
    nonce: &[u8],
    solution: &[u8],
    n: u32,
    k: u32,
) -> Result<Option<Rejection>, Error> {
    let params = Params::lookup(n, k).inspect_err(|e| debug!(%e, "verify: bad parameters"))?;
    if header.len() != HEADER_LEN {
        debug!(len = header.len(), "verify: header length mismatch");
        return Ok(Some(Rejection::HeaderLength(header.len())));
    }
    if nonce.len() != NONCE_LEN {
        debug!(len = nonce.len(), "verify: nonce length mismatch");
        return Err(Error::InvalidNonceLength(nonce.len()));
    }

    let indices = indices_from_minimal(&params, solution)
        .inspect_err(|e| debug!(%e, %params, "verify: bad solution encoding"))?;
    let state: Blake2bState = seed_state(&params, header, nonce);
    find_rejection(&state, &params, &indices)
}

/// Hash `solution` with SHA-256 and compare it against the packed difficulty.
pub fn check_target(solution: &[u8], packed: u32) -> bool {
    is_target_reached(&proof_hash(solution), Difficulty(packed))
}

/// Display magnitude of a packed difficulty.
pub fn approximate_difficulty(packed: u32) -> f64 {
    Difficulty(packed).to_float()
}

//! # Equihash Verification Core
//!
//! Consensus checks for Equihash proof-of-work:
//!
//! - **Solution Validator**: rebuilds the generalized-birthday collision tree
//!   for a claimed solution and checks every distinctness, ordering and
//!   collision rule.
//! - **Difficulty Codec**: expands a packed 32-bit difficulty into a 256-bit
//!   target and an approximate float magnitude.
//! - **Target Comparator**: checks a SHA-256 proof hash against the target.
//!
//! Both validators are pure and reentrant. Each verification seeds its own
//! BLAKE2b state; nothing is cached or shared between calls.
//!
//! ## Supported Parameters
//!
//! | N   | K | indices | solution bytes |
//! |-----|---|---------|----------------|
//! | 96  | 3 | 8       | 25             |
//! | 150 | 5 | 32      | 104            |
//! | 200 | 9 | 512     | 1344           |
//! | 96  | 5 | 32      | 68             |
//! | 48  | 5 | 32      | 36             |
//!
//! ## Input Format
//!
//! ```text
//! seed = BLAKE2b(personal = "Beam-PoW" || le32(N) || le32(K))
//!        .update(header)   32 bytes
//!        .update(nonce)     8 bytes
//! ```
//!
//! ## Example
//!
//! ```rust
//! use ehverify_core::{approximate_difficulty, check_target, verify};
//!
//! let header = [0u8; 32];
//! let nonce = [0u8; 8];
//! let solution = [0u8; 104];
//!
//! // Well-formed but wrong: an ordinary `false`, not an error
//! assert_eq!(verify(&header, &nonce, &solution, 150, 5), Ok(false));
//!
//! // Unsupported parameters are a contract violation
//! assert!(verify(&header, &nonce, &solution, 144, 5).is_err());
//!
//! // Packed difficulty 0 accepts every proof hash
//! assert!(check_target(b"any proof", 0));
//! assert_eq!(approximate_difficulty(0), 1.0);
//! ```
//!
//! ## no_std Support
//!
//! ```toml
//! [dependencies]
//! ehverify-core = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

mod batch;
mod bits;
mod difficulty;
mod equihash;
mod error;
mod hash;
mod params;
mod pow;
mod target;

#[cfg(feature = "std")]
mod ffi;

pub use batch::{Candidate, verify_batch};
pub use bits::{indices_from_minimal, minimal_from_indices};
pub use difficulty::{Difficulty, INFINITE, MANTISSA_BITS, MAX_ORDER, TARGET_LEN, Target};
pub use equihash::{Rejection, find_rejection, is_valid_solution};
pub use error::Error;
pub use hash::{Blake2bState, HashState, proof_hash, seed_state};
pub use params::*;
pub use pow::{approximate_difficulty, check_target, explain, verify};
pub use target::is_target_reached;

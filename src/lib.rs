//! Equihash Verifier Library
//!
//! Proof-of-work checks for Equihash-based chains, plus the configuration and
//! batch job plumbing the `ehverify` command-line tool is built on.
//!
//! # Overview
//!
//! A candidate block carries two independent proofs:
//!
//! - an Equihash solution for `header || nonce`, checked by [`verify`]
//! - a proof hash that must meet a packed difficulty, checked by [`check_target`]
//!
//! # Example
//!
//! ```rust
//! use ehverify::{check_target, verify};
//!
//! let header = [0u8; 32];
//! let nonce = [0u8; 8];
//! let solution = hex::decode(
//!     "0b6fdade515b2174bb637faf1e86e5bf95d01f253a7f33127ce1732795b59b03c29dd726",
//! )
//! .unwrap();
//!
//! assert_eq!(verify(&header, &nonce, &solution, 48, 5), Ok(true));
//! assert_eq!(verify(&header, &1u64.to_le_bytes(), &solution, 48, 5), Ok(false));
//! assert!(check_target(&solution, 0));
//! ```

// Re-export the core algorithm
pub use ehverify_core as algorithm;

pub mod config;
pub mod jobs;

// Convenience re-exports
pub use algorithm::{
    approximate_difficulty, check_target, explain, verify, Difficulty, Error, Params, Rejection,
    Target,
};

//! Contract violations.
//!
//! A structurally well-formed but incorrect proof is never an error; it is an
//! `Ok(false)` from the verifier.

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("unsupported Equihash parameters: n={n}, k={k}")]
    UnsupportedParams { n: u32, k: u32 },
    #[error("solution has {actual} indices, expected {expected}")]
    SolutionLength { expected: usize, actual: usize },
    #[error("encoded solution is {actual} bytes, expected {expected}")]
    SolutionWidth { expected: usize, actual: usize },
    #[error("index {index} out of range (limit {limit})")]
    IndexOutOfRange { index: u32, limit: u32 },
    #[error("nonce must be 8 bytes, got {0}")]
    InvalidNonceLength(usize),
    #[error("packed difficulty {0:#010x} out of range")]
    DifficultyOutOfRange(u32),
    #[error("mantissa {0:#x} does not fit in 24 bits")]
    InvalidMantissa(u32),
}

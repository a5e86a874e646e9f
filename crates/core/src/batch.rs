//! Batch verification.
//!
//! Candidates share nothing, so each one gets its own seed state and the
//! batch fans out across rayon's pool when the `parallel` feature is on.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::Error;
use crate::params::DEFAULT_PARAMS;
use crate::pow::verify;

/// One Equihash proof to check
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub header: &'a [u8],
    pub nonce: &'a [u8],
    pub solution: &'a [u8],
    pub n: u32,
    pub k: u32,
}

impl<'a> Candidate<'a> {
    /// Candidate under the default `(150, 5)` parameters
    pub fn new(header: &'a [u8], nonce: &'a [u8], solution: &'a [u8]) -> Self {
        Self {
            header,
            nonce,
            solution,
            n: DEFAULT_PARAMS.n(),
            k: DEFAULT_PARAMS.k(),
        }
    }

    pub fn with_params(mut self, n: u32, k: u32) -> Self {
        self.n = n;
        self.k = k;
        self
    }

    pub fn verify(&self) -> Result<bool, Error> {
        verify(self.header, self.nonce, self.solution, self.n, self.k)
    }
}

/// Verify every candidate; results come back in input order.
#[cfg(feature = "parallel")]
pub fn verify_batch(candidates: &[Candidate<'_>]) -> Vec<Result<bool, Error>> {
    candidates.par_iter().map(Candidate::verify).collect()
}

/// Verify every candidate; results come back in input order (sequential fallback).
#[cfg(not(feature = "parallel"))]
pub fn verify_batch(candidates: &[Candidate<'_>]) -> Vec<Result<bool, Error>> {
    candidates.iter().map(Candidate::verify).collect()
}

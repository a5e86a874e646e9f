//! Big-endian bit packing for leaf digests and minimal solutions.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::error::Error;
use crate::params::Params;

/// Read a `width`-bit big-endian value starting at `bit_offset` (MSB-first).
///
/// `width` must be at most 32 and the range must lie inside `input`.
#[inline]
pub(crate) fn read_bits(input: &[u8], bit_offset: usize, width: u32) -> u32 {
    debug_assert!(width <= 32);
    let width = width as usize;
    let first = bit_offset / 8;
    let last = (bit_offset + width).div_ceil(8);

    // At most 5 bytes are touched for a 32-bit read, so u64 holds them all.
    let acc = input[first..last]
        .iter()
        .fold(0u64, |acc, &byte| (acc << 8) | u64::from(byte));
    let trailing = (last - first) * 8 - bit_offset % 8 - width;
    ((acc >> trailing) & ((1u64 << width) - 1)) as u32
}

/// Decode a minimally encoded solution into its `2^K` indices.
pub fn indices_from_minimal(params: &Params, minimal: &[u8]) -> Result<Vec<u32>, Error> {
    let expected = params.solution_width();
    if minimal.len() != expected {
        return Err(Error::SolutionWidth {
            expected,
            actual: minimal.len(),
        });
    }

    let width = params.index_bit_length();
    Ok((0..params.solution_len())
        .map(|i| read_bits(minimal, i * width as usize, width))
        .collect())
}

/// Encode indices into the minimal representation, `index_bit_length` bits each.
pub fn minimal_from_indices(params: &Params, indices: &[u32]) -> Result<Vec<u8>, Error> {
    let expected = params.solution_len();
    if indices.len() != expected {
        return Err(Error::SolutionLength {
            expected,
            actual: indices.len(),
        });
    }
    let limit = params.index_limit();
    if let Some(&index) = indices.iter().find(|&&index| index >= limit) {
        return Err(Error::IndexOutOfRange { index, limit });
    }

    let width = params.index_bit_length();
    let mut out = Vec::with_capacity(params.solution_width());
    let mut acc = 0u64;
    let mut acc_bits = 0u32;
    for &index in indices {
        acc = (acc << width) | u64::from(index);
        acc_bits += width;
        while acc_bits >= 8 {
            acc_bits -= 8;
            out.push((acc >> acc_bits) as u8);
        }
        acc &= (1u64 << acc_bits) - 1;
    }
    debug_assert_eq!(acc_bits, 0);
    Ok(out)
}

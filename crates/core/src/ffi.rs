//! C FFI bindings for host runtimes

use core::slice;

use crate::error::Error;
use crate::pow::{approximate_difficulty, check_target, verify};

/// Proof is valid / target reached
pub const EHV_VALID: i32 = 1;
/// Proof is well-formed but wrong / target missed
pub const EHV_INVALID: i32 = 0;
/// A required pointer was null
pub const EHV_ERR_NULL: i32 = -1;
/// `(n, k)` is not in the parameter table
pub const EHV_ERR_UNSUPPORTED_PARAMS: i32 = -2;
/// Nonce or solution has the wrong shape
pub const EHV_ERR_MALFORMED: i32 = -3;

fn error_code(err: Error) -> i32 {
    match err {
        Error::UnsupportedParams { .. } => EHV_ERR_UNSUPPORTED_PARAMS,
        _ => EHV_ERR_MALFORMED,
    }
}

/// # Safety
/// `ptr` must be null or point to `len` readable bytes.
unsafe fn bytes<'a>(ptr: *const u8, len: usize) -> Option<&'a [u8]> {
    if ptr.is_null() {
        None
    } else {
        Some(unsafe { slice::from_raw_parts(ptr, len) })
    }
}

/// Verify an Equihash solution
/// - header/nonce/solution: pointer + length pairs
/// - n, k: Equihash parameters (150, 5 on the main network)
///
/// Returns `EHV_VALID`, `EHV_INVALID`, or a negative error code.
///
/// # Safety
/// Each of `header`, `nonce` and `solution` must be null or point to at
/// least its paired length of initialized bytes that stay valid and
/// unmodified for the duration of the call. A zero length still needs a
/// non-null pointer (a dangling one is fine). Null yields `EHV_ERR_NULL`.
#[unsafe(no_mangle)]
#[allow(clippy::too_many_arguments)]
pub unsafe extern "C" fn ehverify_verify(
    header: *const u8,
    header_len: usize,
    nonce: *const u8,
    nonce_len: usize,
    solution: *const u8,
    solution_len: usize,
    n: u32,
    k: u32,
) -> i32 {
    let inputs = unsafe {
        (
            bytes(header, header_len),
            bytes(nonce, nonce_len),
            bytes(solution, solution_len),
        )
    };
    let (Some(header), Some(nonce), Some(solution)) = inputs else {
        return EHV_ERR_NULL;
    };

    match verify(header, nonce, solution, n, k) {
        Ok(true) => EHV_VALID,
        Ok(false) => EHV_INVALID,
        Err(e) => error_code(e),
    }
}

/// SHA-256 the solution buffer and check it against a packed difficulty
///
/// # Safety
/// `solution` must be null or point to `solution_len` initialized bytes
/// that stay valid for the duration of the call. Null yields `EHV_ERR_NULL`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn ehverify_diffcheck(
    solution: *const u8,
    solution_len: usize,
    packed: u32,
) -> i32 {
    match unsafe { bytes(solution, solution_len) } {
        Some(solution) if check_target(solution, packed) => EHV_VALID,
        Some(_) => EHV_INVALID,
        None => EHV_ERR_NULL,
    }
}

/// Approximate magnitude of a packed difficulty
#[unsafe(no_mangle)]
pub extern "C" fn ehverify_getdiff(packed: u32) -> f64 {
    approximate_difficulty(packed)
}

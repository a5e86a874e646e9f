//! Target comparator.

use crate::difficulty::{Difficulty, TARGET_LEN};

/// Whether `digest` meets the packed difficulty.
///
/// Both sides are 256-bit big-endian integers; the digest passes when it is
/// at most the expanded target. Out-of-range packed values never pass.
pub fn is_target_reached(digest: &[u8; TARGET_LEN], difficulty: Difficulty) -> bool {
    difficulty
        .expand()
        .is_ok_and(|target| target.is_reached_by(digest))
}

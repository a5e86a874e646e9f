//! Equihash solution validator.
//!
//! Rebuilds the collision tree bottom-up from a flat array of nodes. Each
//! round folds adjacent pairs, so after round `r` the array holds `2^(K-r)`
//! nodes and every node subsumes a contiguous run of `2^r` solution indices.
//!
//! A leaf digest is split into `K + 1` chunks of `N / (K + 1)` bits. Round
//! `r` requires both children to agree on their leading remaining chunk and
//! drops it from the XOR; the single chunk left after `K` rounds must be zero.

#[cfg(not(feature = "std"))]
use alloc::vec;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use core::fmt;

use tracing::trace;

use crate::bits::read_bits;
use crate::error::Error;
use crate::hash::HashState;
use crate::params::Params;

/// The first rule a candidate solution broke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The header fed to the seed state is not 32 bytes
    HeaderLength(usize),
    /// Two subtrees folded at `round` share an index
    Duplicate { round: u32 },
    /// The right subtree's smallest index does not exceed the left one's
    Order { round: u32 },
    /// The leading collision chunk differs at `round`
    Collision { round: u32 },
    /// All rounds folded but the remaining bits are not zero
    NonZero,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::HeaderLength(len) => write!(f, "header is {len} bytes, expected 32"),
            Rejection::Duplicate { round } => write!(f, "duplicate index at round {round}"),
            Rejection::Order { round } => write!(f, "non-canonical ordering at round {round}"),
            Rejection::Collision { round } => write!(f, "no collision at round {round}"),
            Rejection::NonZero => write!(f, "final digest is not zero"),
        }
    }
}

/// One node of the collision tree
struct Node {
    /// Chunks not yet consumed by a collision round
    chunks: Vec<u32>,
    /// Leaf indices in solution order
    indices: Vec<u32>,
    /// The same indices sorted, for the disjointness check
    sorted: Vec<u32>,
}

impl Node {
    fn leaf<H: HashState>(state: &H, params: &Params, index: u32) -> Self {
        let per_block = params.indices_per_hash_output();
        let digest = state.block_digest(index / per_block);
        let offset = ((index % per_block) * params.n()) as usize;
        let width = params.collision_bit_length();
        let chunks = (0..=params.k() as usize)
            .map(|j| read_bits(&digest, offset + j * width as usize, width))
            .collect();

        Self {
            chunks,
            indices: vec![index],
            sorted: vec![index],
        }
    }

    /// Smallest index in the subtree; the leftmost one once ordering holds
    fn first_index(&self) -> u32 {
        self.indices[0]
    }

    fn is_disjoint(&self, other: &Node) -> bool {
        let (mut a, mut b) = (self.sorted.iter().peekable(), other.sorted.iter().peekable());
        while let (Some(&&x), Some(&&y)) = (a.peek(), b.peek()) {
            match x.cmp(&y) {
                core::cmp::Ordering::Less => {
                    a.next();
                }
                core::cmp::Ordering::Greater => {
                    b.next();
                }
                core::cmp::Ordering::Equal => return false,
            }
        }
        true
    }

    /// Combine `self` (left) with `right` at `round`
    fn fold(mut self, right: Node, round: u32) -> Result<Node, Rejection> {
        if !self.is_disjoint(&right) {
            return Err(Rejection::Duplicate { round });
        }
        if self.first_index() >= right.first_index() {
            return Err(Rejection::Order { round });
        }
        if self.chunks[0] != right.chunks[0] {
            return Err(Rejection::Collision { round });
        }

        let chunks = self.chunks[1..]
            .iter()
            .zip(&right.chunks[1..])
            .map(|(l, r)| l ^ r)
            .collect();
        self.indices.extend_from_slice(&right.indices);
        let mut sorted = Vec::with_capacity(self.sorted.len() + right.sorted.len());
        merge_sorted(&self.sorted, &right.sorted, &mut sorted);

        Ok(Node {
            chunks,
            indices: self.indices,
            sorted,
        })
    }
}

fn merge_sorted(a: &[u32], b: &[u32], out: &mut Vec<u32>) {
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        if a[i] < b[j] {
            out.push(a[i]);
            i += 1;
        } else {
            out.push(b[j]);
            j += 1;
        }
    }
    out.extend_from_slice(&a[i..]);
    out.extend_from_slice(&b[j..]);
}

fn check_shape(params: &Params, indices: &[u32]) -> Result<(), Error> {
    let expected = params.solution_len();
    if indices.len() != expected {
        return Err(Error::SolutionLength {
            expected,
            actual: indices.len(),
        });
    }
    let limit = params.index_limit();
    match indices.iter().find(|&&index| index >= limit) {
        Some(&index) => Err(Error::IndexOutOfRange { index, limit }),
        None => Ok(()),
    }
}

/// Find the first rule `indices` breaks under `state`, or `None` if valid.
///
/// Errors only on contract violations: a length other than `2^K`, or an
/// index at or above [`Params::index_limit`].
pub fn find_rejection<H: HashState>(
    state: &H,
    params: &Params,
    indices: &[u32],
) -> Result<Option<Rejection>, Error> {
    check_shape(params, indices)?;

    let mut nodes: Vec<Node> = indices
        .iter()
        .map(|&index| Node::leaf(state, params, index))
        .collect();

    for round in 1..=params.k() {
        let mut folded = Vec::with_capacity(nodes.len() / 2);
        let mut pairs = nodes.into_iter();
        while let (Some(left), Some(right)) = (pairs.next(), pairs.next()) {
            match left.fold(right, round) {
                Ok(node) => folded.push(node),
                Err(rejection) => {
                    trace!(%params, %rejection, "solution rejected");
                    return Ok(Some(rejection));
                }
            }
        }
        nodes = folded;
    }

    debug_assert_eq!(nodes.len(), 1);
    if nodes[0].chunks.iter().any(|&chunk| chunk != 0) {
        trace!(%params, "solution rejected: final digest is not zero");
        return Ok(Some(Rejection::NonZero));
    }
    Ok(None)
}

/// Check a decoded solution against a seeded hash state.
///
/// `Ok(false)` means the proof is wrong; `Err` means the caller passed
/// something no solution for `params` could look like.
pub fn is_valid_solution<H: HashState>(
    state: &H,
    params: &Params,
    indices: &[u32],
) -> Result<bool, Error> {
    Ok(find_rejection(state, params, indices)?.is_none())
}

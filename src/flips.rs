use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::permutation::Permutations;
use crate::trace::{NoTrace, TraceEvent, TraceSink};

/// Outcome of running the flip counter over every permutation of order `n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pfannkuchen {
    /// Order of the permutations.
    pub n: usize,
    /// Flip counts summed with alternating sign by permutation index.
    pub checksum: i64,
    /// Largest flip count over all permutations.
    pub max_flips: u32,
    /// Number of permutations visited (`n!`).
    pub permutations: u64,
}

/// Formats the result the way the benchmark prints it:
/// the checksum, then `Pfannkuchen(n) = max`.
impl fmt::Display for Pfannkuchen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.checksum)?;
        write!(f, "Pfannkuchen({}) = {}", self.n, self.max_flips)
    }
}

/// Returns the maximum number of flips needed to bring `0` to the front,
/// over every permutation of `{0..n-1}`.
///
/// # Example
///
/// ```
/// assert_eq!(pfannkuchen::max_flips(7), 16);
/// ```
///
/// # Panics
/// Panics if `n > MAX_ORDER`.
pub fn max_flips(n: usize) -> u32 {
    fannkuch(n).max_flips
}

/// Runs the flip counter over every permutation of order `n`.
///
/// # Panics
/// Panics if `n > MAX_ORDER`.
pub fn fannkuch(n: usize) -> Pfannkuchen {
    fannkuch_traced(n, &mut NoTrace)
}

/// Runs the flip counter, reporting every executed block to `sink`.
///
/// The result is identical to [`fannkuch`].
///
/// # Panics
/// Panics if `n > MAX_ORDER`.
pub fn fannkuch_traced<S: TraceSink>(n: usize, sink: &mut S) -> Pfannkuchen {
    sink.record(TraceEvent::Enter);
    debug!(n, "counting flips");

    let mut perms = Permutations::unprimed(n, sink);
    let mut working = vec![0u8; n];
    let mut max_flips = 0;
    let mut checksum = 0i64;

    'permutations: loop {
        sink.record(TraceEvent::NextPermutation);
        perms.prime(sink);
        for (dst, &src) in working.iter_mut().zip(perms.current()) {
            sink.record(TraceEvent::CopyCell);
            *dst = src;
        }

        let flips = flip_traced(&mut working, sink);
        max_flips = max_flips.max(flips);
        if perms.index() % 2 == 0 {
            checksum += i64::from(flips);
        } else {
            checksum -= i64::from(flips);
        }

        if !perms.step(sink) {
            break 'permutations;
        }
    }

    let result = Pfannkuchen {
        n,
        checksum,
        max_flips,
        permutations: perms.index() + 1,
    };
    debug!(
        n,
        checksum = result.checksum,
        max_flips = result.max_flips,
        permutations = result.permutations,
        "flip count finished"
    );
    result
}

/// Reverses prefixes of `perm` until `0` leads, returning how many
/// reversals it took. `perm` is left with `0` in front.
///
/// # Example
///
/// ```
/// let mut perm = [2, 0, 1];
/// assert_eq!(pfannkuchen::count_flips(&mut perm), 2);
/// assert_eq!(perm, [0, 1, 2]);
/// ```
///
/// # Panics
/// Panics if `perm` is not a permutation of `{0..perm.len()-1}`. Repeated
/// values could otherwise never settle, and out-of-range ones would index
/// past the end.
pub fn count_flips(perm: &mut [u8]) -> u32 {
    assert!(
        is_permutation(perm),
        "{perm:?} is not a permutation of 0..{}",
        perm.len()
    );
    flip_traced(perm, &mut NoTrace)
}

fn is_permutation(perm: &[u8]) -> bool {
    let mut seen = [false; 256];
    perm.iter().all(|&v| {
        let fresh = usize::from(v) < perm.len() && !seen[usize::from(v)];
        seen[usize::from(v)] = true;
        fresh
    })
}

fn flip_traced<S: TraceSink>(perm: &mut [u8], sink: &mut S) -> u32 {
    let mut flips = 0;
    while let Some(k) = leading(perm) {
        sink.record(TraceEvent::Flip);
        for i in 0..(k + 1) / 2 {
            sink.record(TraceEvent::Swap);
            perm.swap(i, k - i);
        }
        flips += 1;
    }
    flips
}

/// The leading value, unless the prefix is already settled.
#[inline]
fn leading(perm: &[u8]) -> Option<usize> {
    match perm.first() {
        Some(&k) if k != 0 => Some(usize::from(k)),
        _ => None,
    }
}

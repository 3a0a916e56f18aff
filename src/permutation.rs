//! Enumeration of permutations by prefix rotation.
//!
//! Permutations are produced in the fixed order of the fannkuch-redux
//! benchmark: each step rotates the prefix `base[0..=radix]` left by one,
//! and a per-position counter decides when the rotation carries to the next
//! position, much like an odometer.

use crate::MAX_ORDER;
use crate::trace::{NoTrace, TraceEvent, TraceSink};

/// Returns `n!`.
///
/// # Panics
/// Panics if `n > MAX_ORDER`.
pub fn factorial(n: usize) -> u64 {
    assert!(n <= MAX_ORDER, "n must be at most {MAX_ORDER}");
    (1..=n as u64).product()
}

/// Visits every permutation of `{0..n-1}` in the benchmark's order.
///
/// The state starts at the identity permutation. [`Permutations::advance`]
/// steps to the next one in place; the [`Iterator`] impl yields owned copies
/// and is meant for small `n`.
///
/// # Example
///
/// ```
/// use pfannkuchen::Permutations;
///
/// let order: Vec<Vec<u8>> = Permutations::new(3).collect();
/// assert_eq!(order[0], [0, 1, 2]);
/// assert_eq!(order[1], [1, 0, 2]);
/// assert_eq!(order.len(), 6);
/// ```
#[derive(Debug, Clone)]
pub struct Permutations {
    base: Vec<u8>,
    /// `count[r]` is how many more rotations of `base[0..=r]` remain before carrying.
    count: Vec<usize>,
    radix: usize,
    index: u64,
    exhausted: bool,
    /// Whether the iterator has yielded the current permutation yet.
    yielded: bool,
}

impl Permutations {
    /// Starts the enumeration of permutations of order `n` at the identity.
    ///
    /// # Panics
    /// Panics if `n > MAX_ORDER`.
    pub fn new(n: usize) -> Self {
        let mut perms = Self::unprimed(n, &mut NoTrace);
        perms.prime(&mut NoTrace);
        perms
    }

    /// Sets up the identity permutation, reporting each initialised cell to
    /// `sink`. Counters are left unprimed: call [`Permutations::prime`]
    /// before stepping.
    pub(crate) fn unprimed<S: TraceSink>(n: usize, sink: &mut S) -> Self {
        assert!(n <= MAX_ORDER, "n must be at most {MAX_ORDER}");
        let mut base = vec![0u8; n];
        for (i, cell) in base.iter_mut().enumerate() {
            sink.record(TraceEvent::InitCell);
            *cell = i as u8;
        }
        Self {
            base,
            count: (1..=n).collect(),
            radix: n.max(1),
            index: 0,
            exhausted: false,
            yielded: false,
        }
    }

    /// Order of the permutations.
    pub fn n(&self) -> usize {
        self.base.len()
    }

    /// The current permutation.
    pub fn current(&self) -> &[u8] {
        &self.base
    }

    /// Zero-based position of the current permutation in the enumeration.
    pub fn index(&self) -> u64 {
        self.index
    }

    /// Moves to the next permutation.
    ///
    /// Returns `false`, leaving the state untouched, once every permutation
    /// has been visited.
    pub fn advance(&mut self) -> bool {
        let advanced = self.step(&mut NoTrace);
        self.prime(&mut NoTrace);
        advanced
    }

    /// Rotates to the next permutation without re-priming the counters
    /// below the radix the rotation stopped at.
    pub(crate) fn step<S: TraceSink>(&mut self, sink: &mut S) -> bool {
        if self.exhausted {
            return false;
        }
        let n = self.base.len();
        'advance: loop {
            sink.record(TraceEvent::Advance);
            if self.radix >= n {
                sink.record(TraceEvent::Exhausted);
                self.exhausted = true;
                return false;
            }

            let radix = self.radix;
            let first = self.base[0];
            for i in 0..radix {
                sink.record(TraceEvent::Shift);
                self.base[i] = self.base[i + 1];
            }
            self.base[radix] = first;

            self.count[radix] -= 1;
            if self.count[radix] > 0 {
                sink.record(TraceEvent::CounterPositive);
                break 'advance;
            }
            self.radix += 1;
        }
        self.index += 1;
        true
    }

    /// Resets every counter below the radix to its full cycle length.
    pub(crate) fn prime<S: TraceSink>(&mut self, sink: &mut S) {
        while self.radix > 1 {
            sink.record(TraceEvent::PrimeCounter);
            self.count[self.radix - 1] = self.radix;
            self.radix -= 1;
        }
    }

    fn remaining(&self) -> u64 {
        if self.exhausted {
            return 0;
        }
        let pending = u64::from(!self.yielded);
        factorial(self.n()) - self.index - 1 + pending
    }
}

impl Iterator for Permutations {
    type Item = Vec<u8>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.yielded && !self.advance() {
            return None;
        }
        if self.exhausted {
            return None;
        }
        self.yielded = true;
        Some(self.base.clone())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining()) {
            Ok(len) => (len, Some(len)),
            Err(_) => (usize::MAX, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn factorial_table() {
        let expected = [1u64, 1, 2, 6, 24, 120, 720, 5040, 40320];
        for (n, &f) in expected.iter().enumerate() {
            assert_eq!(factorial(n), f, "{n}!");
        }
        assert_eq!(factorial(MAX_ORDER), 2_432_902_008_176_640_000);
    }

    #[test]
    fn starts_at_identity() {
        let perms = Permutations::new(5);
        assert_eq!(perms.current(), [0, 1, 2, 3, 4]);
        assert_eq!(perms.index(), 0);
        assert_eq!(perms.n(), 5);
    }

    #[test]
    fn order_three_sequence() {
        let order: Vec<Vec<u8>> = Permutations::new(3).collect();
        let expected: Vec<Vec<u8>> = vec![
            vec![0, 1, 2],
            vec![1, 0, 2],
            vec![1, 2, 0],
            vec![2, 1, 0],
            vec![2, 0, 1],
            vec![0, 2, 1],
        ];
        assert_eq!(order, expected);
    }

    #[test]
    fn order_four_prefix() {
        let head: Vec<Vec<u8>> = Permutations::new(4).take(8).collect();
        assert_eq!(head[5], [0, 2, 1, 3]);
        assert_eq!(head[6], [1, 2, 3, 0]);
        assert_eq!(head[7], [2, 1, 3, 0]);
    }

    #[test]
    fn visits_every_permutation_exactly_once() {
        for n in 0..=7 {
            let mut seen = HashSet::new();
            for perm in Permutations::new(n) {
                let mut sorted = perm.clone();
                sorted.sort_unstable();
                assert!(
                    sorted.iter().enumerate().all(|(i, &v)| v as usize == i),
                    "{perm:?} is not a permutation of order {n}"
                );
                assert!(seen.insert(perm), "duplicate permutation for n={n}");
            }
            assert_eq!(seen.len() as u64, factorial(n), "n={n}");
        }
    }

    #[test]
    fn degenerate_orders_have_one_permutation() {
        for n in [0, 1] {
            let mut perms = Permutations::new(n);
            assert!(!perms.advance(), "n={n} should be exhausted immediately");
            assert!(!perms.advance());
            assert_eq!(perms.index(), 0);
        }
        assert_eq!(Permutations::new(0).count(), 1);
        assert_eq!(Permutations::new(1).collect::<Vec<_>>(), vec![vec![0]]);
    }

    #[test]
    fn advance_tracks_index() {
        let mut perms = Permutations::new(4);
        let mut steps = 0;
        while perms.advance() {
            steps += 1;
            assert_eq!(perms.index(), steps);
        }
        assert_eq!(steps, 23);
        assert_eq!(perms.index(), 23);
    }

    #[test]
    fn size_hint_counts_down() {
        let mut perms = Permutations::new(4);
        assert_eq!(perms.size_hint(), (24, Some(24)));
        perms.next();
        assert_eq!(perms.size_hint(), (23, Some(23)));
        let rest = perms.by_ref().count();
        assert_eq!(rest, 23);
        assert_eq!(perms.size_hint(), (0, Some(0)));
    }

    #[test]
    #[should_panic(expected = "n must be at most")]
    fn rejects_oversized_order() {
        Permutations::new(MAX_ORDER + 1);
    }
}

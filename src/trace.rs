//! Optional execution tracing for the flip counter.
//!
//! Every block the counter executes is reported to a [`TraceSink`] as a
//! [`TraceEvent`]. The default sink, [`NoTrace`], compiles away entirely, so
//! the untraced path pays nothing for the instrumentation.

use std::io::Write;

use crate::Result;

/// A block of the flip counter that was just entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraceEvent {
    /// Entry into the counter.
    Enter,
    /// One cell of the identity permutation was initialised.
    InitCell,
    /// One generation counter was re-primed below the carry radix.
    PrimeCounter,
    /// A new permutation is about to be processed.
    NextPermutation,
    /// One cell of the base permutation was copied into the working one.
    CopyCell,
    /// A prefix reversal starts.
    Flip,
    /// One symmetric pair of the reversed prefix was swapped.
    Swap,
    /// One step of the search for the next permutation.
    Advance,
    /// Every permutation has been visited.
    Exhausted,
    /// One element of the rotated prefix was shifted left.
    Shift,
    /// A counter was still positive after the rotation, so advancing stops.
    CounterPositive,
}

impl TraceEvent {
    /// Number of distinct events.
    pub const COUNT: usize = 11;

    /// Every event, in declaration order.
    pub const ALL: [TraceEvent; Self::COUNT] = [
        TraceEvent::Enter,
        TraceEvent::InitCell,
        TraceEvent::PrimeCounter,
        TraceEvent::NextPermutation,
        TraceEvent::CopyCell,
        TraceEvent::Flip,
        TraceEvent::Swap,
        TraceEvent::Advance,
        TraceEvent::Exhausted,
        TraceEvent::Shift,
        TraceEvent::CounterPositive,
    ];

    /// The header line of the source block this event stands for.
    pub fn source_line(self) -> &'static str {
        match self {
            TraceEvent::Enter => {
                "pub fn fannkuch_traced<S: TraceSink>(n: usize, sink: &mut S) -> Pfannkuchen {"
            }
            TraceEvent::InitCell => "for (i, cell) in base.iter_mut().enumerate() {",
            TraceEvent::PrimeCounter => "while self.radix > 1 {",
            TraceEvent::NextPermutation => "'permutations: loop {",
            TraceEvent::CopyCell => "for (dst, &src) in working.iter_mut().zip(perms.current()) {",
            TraceEvent::Flip => "while let Some(k) = leading(perm) {",
            TraceEvent::Swap => "for i in 0..(k + 1) / 2 {",
            TraceEvent::Advance => "'advance: loop {",
            TraceEvent::Exhausted => "if self.radix >= n {",
            TraceEvent::Shift => "for i in 0..radix {",
            TraceEvent::CounterPositive => "if self.count[radix] > 0 {",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Receives trace events from the flip counter.
pub trait TraceSink {
    /// Records that the block identified by `event` was executed.
    fn record(&mut self, event: TraceEvent);
}

impl<S: TraceSink + ?Sized> TraceSink for &mut S {
    #[inline]
    fn record(&mut self, event: TraceEvent) {
        (**self).record(event);
    }
}

impl<S: TraceSink> TraceSink for Option<S> {
    #[inline]
    fn record(&mut self, event: TraceEvent) {
        if let Some(sink) = self {
            sink.record(event);
        }
    }
}

impl<A: TraceSink, B: TraceSink> TraceSink for (A, B) {
    #[inline]
    fn record(&mut self, event: TraceEvent) {
        self.0.record(event);
        self.1.record(event);
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTrace;

impl TraceSink for NoTrace {
    #[inline(always)]
    fn record(&mut self, _event: TraceEvent) {}
}

/// Writes one line of source-like text per executed block.
///
/// The first write error is kept and later events are dropped; call
/// [`LineTrace::finish`] to surface it.
#[derive(Debug)]
pub struct LineTrace<W> {
    out: W,
    error: Option<std::io::Error>,
    lines: u64,
}

impl<W: Write> LineTrace<W> {
    /// Creates a sink writing to `out`.
    pub fn new(out: W) -> Self {
        Self {
            out,
            error: None,
            lines: 0,
        }
    }

    /// Number of lines written so far.
    pub fn lines(&self) -> u64 {
        self.lines
    }

    /// Flushes the writer and hands it back, or returns the first write error.
    pub fn finish(mut self) -> Result<W> {
        if let Some(err) = self.error.take() {
            return Err(err.into());
        }
        self.out.flush()?;
        Ok(self.out)
    }
}

impl<W: Write> TraceSink for LineTrace<W> {
    fn record(&mut self, event: TraceEvent) {
        if self.error.is_some() {
            return;
        }
        match writeln!(self.out, "{}", event.source_line()) {
            Ok(()) => self.lines += 1,
            Err(err) => self.error = Some(err),
        }
    }
}

/// Counts how many times each block was executed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Coverage {
    hits: [u64; TraceEvent::COUNT],
}

impl Coverage {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Times `event` was recorded.
    pub fn count(&self, event: TraceEvent) -> u64 {
        self.hits[event.index()]
    }

    /// Total number of recorded events.
    pub fn total(&self) -> u64 {
        self.hits.iter().sum()
    }

    /// Every event with its hit count, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (TraceEvent, u64)> + '_ {
        TraceEvent::ALL.iter().map(|&event| (event, self.count(event)))
    }

    /// Events that were never recorded.
    pub fn unvisited(&self) -> Vec<TraceEvent> {
        self.iter()
            .filter(|&(_, hits)| hits == 0)
            .map(|(event, _)| event)
            .collect()
    }
}

impl TraceSink for Coverage {
    #[inline]
    fn record(&mut self, event: TraceEvent) {
        self.hits[event.index()] += 1;
    }
}

//! In-process iteration timing and the startup report.

use std::time::{Duration, Instant};

use tracing::trace;

use crate::Result;
use crate::flips::{Pfannkuchen, fannkuch};

/// Placeholder tuple that closes the startup measurement record.
pub const STARTUP_SUFFIX: &str = "], [-1.0, -1.0]]";

/// Result of running the flip counter several times in one process.
#[derive(Debug, Clone, PartialEq)]
pub struct IterationReport {
    /// The result every iteration produced.
    pub result: Pfannkuchen,
    /// Wall-clock time of each iteration, in order.
    pub timings: Vec<Duration>,
}

impl IterationReport {
    /// Iteration times in seconds as a JSON array.
    pub fn timings_json(&self) -> Result<String> {
        let secs: Vec<f64> = self.timings.iter().map(Duration::as_secs_f64).collect();
        Ok(serde_json::to_string(&secs)?)
    }
}

/// Runs [`fannkuch`] `iterations` times, timing each run with a monotonic clock.
///
/// # Panics
/// Panics if `iterations` is zero, if `n > MAX_ORDER`, or if two iterations
/// disagree (the counter is a pure function of `n`).
pub fn run_iterations(n: usize, iterations: usize) -> IterationReport {
    assert!(iterations > 0, "iterations must be at least 1");

    let mut timings = Vec::with_capacity(iterations);
    let (result, elapsed) = timed(n, 0);
    timings.push(elapsed);
    for iteration in 1..iterations {
        let (again, elapsed) = timed(n, iteration);
        assert_eq!(
            result, again,
            "iteration {iteration} disagrees with the first run"
        );
        timings.push(elapsed);
    }

    IterationReport { result, timings }
}

fn timed(n: usize, iteration: usize) -> (Pfannkuchen, Duration) {
    let start = Instant::now();
    let result = std::hint::black_box(fannkuch(std::hint::black_box(n)));
    let elapsed = start.elapsed();
    trace!(iteration, secs = elapsed.as_secs_f64(), "iteration finished");
    (result, elapsed)
}

/// Clock read by [`monotonic_seconds`]. On Linux the raw clock is used so
/// NTP slewing cannot skew readings taken by different processes.
#[cfg(target_os = "linux")]
const STARTUP_CLOCK: libc::clockid_t = libc::CLOCK_MONOTONIC_RAW;
#[cfg(all(unix, not(target_os = "linux")))]
const STARTUP_CLOCK: libc::clockid_t = libc::CLOCK_MONOTONIC;

/// Reads the system monotonic clock, in seconds since its own epoch.
///
/// Unlike [`Instant`], the reading is absolute: a harness that read the same
/// clock just before launching this process can subtract the two to get the
/// startup time.
#[cfg(unix)]
pub fn monotonic_seconds() -> Result<f64> {
    let mut ts = std::mem::MaybeUninit::<libc::timespec>::uninit();
    if unsafe { libc::clock_gettime(STARTUP_CLOCK, ts.as_mut_ptr()) } != 0 {
        return Err(std::io::Error::last_os_error().into());
    }
    // clock_gettime succeeded, so ts is initialised
    let ts = unsafe { ts.assume_init() };
    Ok(ts.tv_sec as f64 + ts.tv_nsec as f64 / 1e9)
}

#[cfg(not(unix))]
pub fn monotonic_seconds() -> Result<f64> {
    Err(std::io::Error::new(
        std::io::ErrorKind::Unsupported,
        "absolute monotonic clock readings need clock_gettime",
    )
    .into())
}

/// Formats a startup measurement as the harness expects it: the reading,
/// then the fixed `], [-1.0, -1.0]]` tuple closing the record.
pub fn startup_report(secs: f64) -> String {
    format!("{secs:?}{STARTUP_SUFFIX}")
}

use std::io;
use std::num::ParseIntError;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the library and its command-line front ends.
///
/// The flip counter itself cannot fail; these cover input validation and
/// writing results or traces.
#[derive(Error, Debug)]
pub enum Error {
    /// The permutation order was not a non-negative integer.
    #[error("invalid order {input:?}: {source}")]
    InvalidOrder {
        /// Text that failed to parse
        input: String,
        /// Underlying parse failure
        source: ParseIntError,
    },

    /// The permutation order is too large to enumerate.
    #[error("order {n} is too large (maximum is {max})")]
    OrderTooLarge {
        /// Requested order
        n: usize,
        /// Largest supported order
        max: usize,
    },

    /// Writing output or a trace failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Encoding a report as JSON failed.
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

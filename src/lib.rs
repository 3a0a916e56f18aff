#![doc = include_str!("../README.md")]

mod error;
mod flips;
mod order;
mod permutation;
pub mod runner;
pub mod trace;
#[cfg(feature = "wasm")]
mod wasm;

pub use error::{Error, Result};
pub use flips::{Pfannkuchen, count_flips, fannkuch, fannkuch_traced, max_flips};
pub use order::{MAX_ORDER, Order};
pub use permutation::{Permutations, factorial};

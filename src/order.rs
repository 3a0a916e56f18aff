use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// Largest permutation order the crate will enumerate.
///
/// `20!` is the largest factorial that fits in a `u64` permutation count.
pub const MAX_ORDER: usize = 20;

/// A validated permutation order `n` in `0..=MAX_ORDER`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Order(usize);

impl Order {
    /// Order used by the command-line front end when none is given.
    pub const DEFAULT: Order = Order(7);

    /// Validates `n` as a permutation order.
    pub fn new(n: usize) -> Result<Self> {
        if n > MAX_ORDER {
            return Err(Error::OrderTooLarge { n, max: MAX_ORDER });
        }
        Ok(Self(n))
    }

    /// Returns the order as a plain integer.
    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for Order {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for Order {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let n = s.trim().parse::<usize>().map_err(|source| Error::InvalidOrder {
            input: s.to_owned(),
            source,
        })?;
        Self::new(n)
    }
}

impl From<Order> for usize {
    fn from(order: Order) -> usize {
        order.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_in_range_orders() {
        assert_eq!("7".parse::<Order>().unwrap().get(), 7);
        assert_eq!(" 0 ".parse::<Order>().unwrap().get(), 0);
        assert_eq!("20".parse::<Order>().unwrap().get(), MAX_ORDER);
    }

    #[test]
    fn rejects_negative_and_non_numeric() {
        for input in ["-1", "seven", "", "3.5"] {
            let err = input.parse::<Order>().unwrap_err();
            assert!(
                matches!(err, Error::InvalidOrder { .. }),
                "{input:?} should be rejected as invalid, got {err:?}"
            );
        }
    }

    #[test]
    fn rejects_orders_above_maximum() {
        let err = "21".parse::<Order>().unwrap_err();
        assert!(matches!(err, Error::OrderTooLarge { n: 21, max: MAX_ORDER }));
        assert_eq!(err.to_string(), "order 21 is too large (maximum is 20)");
    }

    #[test]
    fn default_is_seven() {
        assert_eq!(Order::default().to_string(), "7");
    }
}

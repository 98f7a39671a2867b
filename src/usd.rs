use anyhow::{bail, Context};
use serde_with::SerializeDisplay;

use std::{
    cmp::Ordering,
    fmt::{Debug, Display},
    ops::{AddAssign, Mul},
    str::FromStr,
};

/// Represents an amount of money in USD currency.
///
/// The amount is stored at full `f64` precision, so that sums of many line
/// items aren't distorted by intermediate rounding. The [`Display`]
/// implementation rounds to 2 decimal places, half away from zero (which is
/// round-half-up for the non-negative amounts this crate produces).
///
/// Amounts written as text, such as `"$3,409.15"`, can be parsed with
/// [`FromStr`].
///
/// ```
/// # use compute_sales::Usd;
/// let price = Usd::from_dollars(0.125);
/// assert_eq!((price * 3.0).to_string(), "0.38");
/// assert_eq!(format!("{:>8}", Usd::from_dollars(12.5)), "   12.50");
/// ```
#[derive(Clone, Copy, Default, SerializeDisplay, PartialEq, PartialOrd)]
pub struct Usd(f64);

impl Usd {
    pub const ZERO: Self = Self(0.0);

    #[must_use]
    pub const fn from_dollars(dollars: f64) -> Self {
        Self(dollars)
    }

    /// Returns the unrounded amount in dollars.
    #[must_use]
    pub fn dollars(self) -> f64 {
        self.0
    }

    /// Returns the amount rounded to whole cents.
    #[must_use]
    pub fn rounded(self) -> f64 {
        // Adding 0.0 turns -0.0 into 0.0.
        (self.0 * 100.0).round() / 100.0 + 0.0
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }

    /// Total ordering over amounts, for sorting.
    #[must_use]
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Debug for Usd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl Display for Usd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(&format!("{:.2}", self.rounded()))
    }
}

impl FromStr for Usd {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let dollars: f64 = s
            .trim()
            .trim_start_matches('$')
            .replace(',', "")
            .parse()
            .with_context(|| format!("invalid amount {s:?}"))?;
        if !dollars.is_finite() {
            bail!("invalid amount {s:?}: not a finite number");
        }
        Ok(Self(dollars))
    }
}

impl AddAssign for Usd {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Mul<f64> for Usd {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        Self(self.0 * rhs)
    }
}

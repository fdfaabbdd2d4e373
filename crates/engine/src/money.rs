use std::fmt;

use serde::{Deserialize, Serialize};

/// Money amount represented as **integer cents** (minor units).
///
/// Trip overrides, expenses and budget totals are stored in minor units. City
/// default costs are major units (`f64`) and are converted with
/// [`MoneyCents::from_major`] only when a budget is totalled.
///
/// # Examples
///
/// ```rust
/// use engine::MoneyCents;
///
/// let amount = MoneyCents::new(12_34);
/// assert_eq!(amount.cents(), 1234);
/// assert_eq!(amount.to_string(), "12.34");
/// assert_eq!(MoneyCents::from_major(45.5).cents(), 4550);
/// ```
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct MoneyCents(i64);

impl MoneyCents {
    pub const ZERO: MoneyCents = MoneyCents(0);

    /// Largest single amount accepted from a client: overrides, expenses and
    /// (in major units) city daily costs.
    pub const MAX: MoneyCents = MoneyCents(100_000_000_000);

    /// Creates a new amount from integer cents.
    #[must_use]
    pub const fn new(cents: i64) -> Self {
        Self(cents)
    }

    /// Converts a major-unit amount, rounding half away from zero to the
    /// nearest cent. Out-of-range values saturate.
    #[must_use]
    pub fn from_major(amount: f64) -> Self {
        Self((amount * 100.0).round() as i64)
    }

    /// Returns the raw value in cents.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Returns `true` if the amount is 0.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the amount is negative.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Checked addition (returns `None` on overflow).
    #[must_use]
    pub fn checked_add(self, rhs: MoneyCents) -> Option<MoneyCents> {
        self.0.checked_add(rhs.0).map(MoneyCents)
    }

    /// Checked subtraction (returns `None` on overflow).
    #[must_use]
    pub fn checked_sub(self, rhs: MoneyCents) -> Option<MoneyCents> {
        self.0.checked_sub(rhs.0).map(MoneyCents)
    }

    /// Checked multiplication by a count (returns `None` on overflow).
    #[must_use]
    pub fn checked_mul(self, rhs: i64) -> Option<MoneyCents> {
        self.0.checked_mul(rhs).map(MoneyCents)
    }
}

impl fmt::Display for MoneyCents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let units = abs / 100;
        let cents = abs % 100;
        write!(f, "{sign}{units}.{cents:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_two_decimals() {
        assert_eq!(MoneyCents::new(0).to_string(), "0.00");
        assert_eq!(MoneyCents::new(1).to_string(), "0.01");
        assert_eq!(MoneyCents::new(1050).to_string(), "10.50");
        assert_eq!(MoneyCents::new(-1050).to_string(), "-10.50");
    }

    #[test]
    fn from_major_rounds_to_nearest_cent() {
        assert_eq!(MoneyCents::from_major(19.999).cents(), 2000);
        assert_eq!(MoneyCents::from_major(0.1 + 0.2).cents(), 30);
        assert_eq!(MoneyCents::from_major(80.0).cents(), 8000);
    }

    #[test]
    fn checked_ops_report_overflow() {
        let big = MoneyCents::new(i64::MAX / 2 + 1);
        assert_eq!(big.checked_mul(2), None);
        assert_eq!(big.checked_add(big), None);
        assert_eq!(MoneyCents::new(i64::MIN).checked_sub(MoneyCents::new(1)), None);
        assert_eq!(
            MoneyCents::new(1_500).checked_sub(MoneyCents::new(2_000)),
            Some(MoneyCents::new(-500))
        );
    }

    #[test]
    fn serializes_as_plain_cents() {
        assert_eq!(serde_json::to_string(&MoneyCents::new(1_250)).unwrap(), "1250");
        assert_eq!(
            serde_json::from_str::<MoneyCents>("-40").unwrap(),
            MoneyCents::new(-40)
        );
    }
}

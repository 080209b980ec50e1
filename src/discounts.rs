//! Discounts
//!
//! Percentage discounts shared by line items and promotion codes.

use std::fmt;

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors specific to discount construction.
#[derive(Debug, Error, PartialEq)]
pub enum DiscountError {
    /// Percent points were outside `0..=100`.
    #[error("discount of {0}% is outside the range 0-100%")]
    OutOfRange(Decimal),

    /// Percentage calculation could not be safely converted.
    #[error("percentage conversion overflowed or was not finite")]
    PercentConversion,
}

/// A percentage taken off an amount, e.g. "15% off".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PercentOff {
    points: Decimal,
    percentage: Percentage,
}

impl PercentOff {
    /// Create a discount from percent points (`15` for 15% off).
    ///
    /// # Errors
    ///
    /// - [`DiscountError::OutOfRange`]: `points` is negative or above 100.
    /// - [`DiscountError::PercentConversion`]: the fraction could not be represented.
    pub fn new(points: Decimal) -> Result<Self, DiscountError> {
        if points < Decimal::ZERO || points > Decimal::ONE_HUNDRED {
            return Err(DiscountError::OutOfRange(points));
        }

        let fraction = points
            .checked_div(Decimal::ONE_HUNDRED)
            .ok_or(DiscountError::PercentConversion)?;

        // Round-trip through the string form so the fraction stays exact.
        let percentage = Percentage::try_from(fraction.normalize().to_string().as_str())
            .map_err(|_err| DiscountError::PercentConversion)?;

        Ok(Self {
            points: points.normalize(),
            percentage,
        })
    }

    /// Create a discount from whole percent points.
    ///
    /// # Errors
    ///
    /// See [`PercentOff::new`].
    pub fn from_points(points: u8) -> Result<Self, DiscountError> {
        Self::new(Decimal::from(points))
    }

    /// Percent points, e.g. `15` for 15% off.
    pub fn points(&self) -> Decimal {
        self.points
    }

    /// The discount as a fractional percentage.
    pub fn percentage(&self) -> Percentage {
        self.percentage
    }

    /// The amount taken off `amount`.
    pub fn of(&self, amount: Decimal) -> Decimal {
        (self.percentage * Decimal::ONE).saturating_mul(amount)
    }

    /// `amount` with the discount applied.
    pub fn apply(&self, amount: Decimal) -> Decimal {
        amount.saturating_sub(self.of(amount))
    }
}

impl fmt::Display for PercentOff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.points)
    }
}

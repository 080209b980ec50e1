//! Cart configuration

use rust_decimal::Decimal;
use rusty_money::iso::{self, Currency};
use thiserror::Error;

/// Flat delivery fee charged on every order, in major units of the default currency.
pub const DEFAULT_DELIVERY_FEE: i64 = 50;

/// Errors raised when building a cart configuration.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// The delivery fee was below zero.
    #[error("delivery fee {0} is negative")]
    NegativeDeliveryFee(Decimal),
}

/// Settings shared by every computation on a cart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CartConfig {
    currency: &'static Currency,
    delivery_fee: Decimal,
}

impl CartConfig {
    /// Create a configuration with the given currency and flat delivery fee.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NegativeDeliveryFee`] if `delivery_fee` is below zero.
    pub fn new(currency: &'static Currency, delivery_fee: Decimal) -> Result<Self, ConfigError> {
        if delivery_fee < Decimal::ZERO {
            return Err(ConfigError::NegativeDeliveryFee(delivery_fee));
        }

        Ok(Self {
            currency,
            delivery_fee,
        })
    }

    /// Cart currency
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Flat delivery fee
    pub fn delivery_fee(&self) -> Decimal {
        self.delivery_fee
    }
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            currency: iso::INR,
            delivery_fee: Decimal::from(DEFAULT_DELIVERY_FEE),
        }
    }
}

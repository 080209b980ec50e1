//! Promotions
//!
//! Promo codes are matched case-insensitively against a static allow-list. At most one
//! promotion is active on a cart at a time.

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::discounts::{DiscountError, PercentOff};

/// Codes every cart accepts unless a different catalog is supplied.
const STANDARD_CODES: [(&str, u8); 3] = [("SAVE10", 10), ("BULK15", 15), ("FIRST20", 20)];

/// Errors returned when applying a promo code.
#[derive(Debug, Error, PartialEq)]
pub enum PromoError {
    /// The code is not in the catalog.
    #[error("promo code {0:?} is not valid")]
    InvalidPromoCode(String),
}

/// A named percentage discount applied to the whole subtotal.
#[derive(Debug, Clone, PartialEq)]
pub struct Promotion {
    code: String,
    discount: PercentOff,
}

impl Promotion {
    /// Create a new promotion. The code is stored upper-case.
    pub fn new(code: &str, discount: PercentOff) -> Self {
        Self {
            code: normalize_code(code),
            discount,
        }
    }

    /// Return the canonical (upper-case) code
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Return the discount
    pub fn discount(&self) -> &PercentOff {
        &self.discount
    }
}

/// The allow-list of promo codes.
#[derive(Debug, Clone, PartialEq)]
pub struct PromoCatalog {
    codes: FxHashMap<String, PercentOff>,
}

impl PromoCatalog {
    /// A catalog with no codes.
    pub fn empty() -> Self {
        Self {
            codes: FxHashMap::default(),
        }
    }

    /// The standard catalog: `SAVE10`, `BULK15` and `FIRST20`.
    ///
    /// # Errors
    ///
    /// Returns a [`DiscountError`] if a standard percentage cannot be represented.
    pub fn standard() -> Result<Self, DiscountError> {
        STANDARD_CODES
            .iter()
            .try_fold(Self::empty(), |catalog, &(code, points)| {
                Ok(catalog.with_code(code, PercentOff::from_points(points)?))
            })
    }

    /// Add or replace a code.
    #[must_use]
    pub fn with_code(mut self, code: &str, discount: PercentOff) -> Self {
        self.codes.insert(normalize_code(code), discount);
        self
    }

    /// Look up a code, ignoring case and surrounding whitespace.
    pub fn lookup(&self, code: &str) -> Option<Promotion> {
        let code = normalize_code(code);

        self.codes.get(&code).map(|discount| Promotion {
            code,
            discount: *discount,
        })
    }

    /// Number of codes in the catalog.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Check if the catalog has no codes.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

//! Promotion Fixtures

use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::{
    promotions::PromoCatalog,
    records::{RecordError, parse_percentage},
};

/// Wrapper for promo codes in YAML
#[derive(Debug, Deserialize)]
pub struct PromotionsFixture {
    /// Map of promo code -> percentage off (e.g., "10%")
    pub promotions: FxHashMap<String, String>,
}

impl PromotionsFixture {
    /// Convert to a [`PromoCatalog`]
    ///
    /// # Errors
    ///
    /// Returns an error if a percentage cannot be parsed or is out of range.
    pub fn try_into_catalog(self) -> Result<PromoCatalog, RecordError> {
        self.promotions
            .iter()
            .try_fold(PromoCatalog::empty(), |catalog, (code, percentage)| {
                Ok(catalog.with_code(code, parse_percentage(percentage)?))
            })
    }
}

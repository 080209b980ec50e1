//! Wishlist Fixtures

use serde::Deserialize;

use crate::records::WishlistItemRecord;

/// Wrapper for wishlist items in YAML
#[derive(Debug, Deserialize)]
pub struct WishlistFixture {
    /// Saved items, in the order they appear in the file
    pub items: Vec<WishlistItemRecord>,
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn wishlist_fixture_defaults_stock_and_rating() -> TestResult {
        let fixture: WishlistFixture = serde_norway::from_str(
            "items:\n  - id: mangoes\n    name: Alphonso Mangoes\n    supplier: FruitKing\n    price: 150 INR\n    unit: dozen\n    added: 2024-01-12\n",
        )?;

        let item = fixture.items.first().ok_or("Expected one item")?;

        assert!(item.in_stock);
        assert!(item.discount.is_none());
        assert_eq!(item.added, jiff::civil::date(2024, 1, 12));

        Ok(())
    }
}

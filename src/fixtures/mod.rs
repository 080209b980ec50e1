//! Fixtures
//!
//! Named YAML fixture sets under `fixtures/`: a seeded cart (`carts/<name>.yml`), promo
//! codes (`promotions/<name>.yml`) and a wishlist (`wishlists/<name>.yml`).

use std::{fs, path::PathBuf};

use thiserror::Error;

use crate::{
    cart::CartStore,
    discounts::DiscountError,
    fixtures::{promotions::PromotionsFixture, wishlists::WishlistFixture},
    promotions::PromoCatalog,
    records::RecordError,
    storage::{CartSnapshot, StorageError},
    wishlist::{Wishlist, WishlistItem},
};

pub mod promotions;
pub mod wishlists;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// A record in the fixture was invalid
    #[error(transparent)]
    Record(#[from] RecordError),

    /// The standard promo catalog could not be built
    #[error(transparent)]
    Discount(#[from] DiscountError),

    /// The cart fixture could not be restored
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// No cart fixture loaded yet
    #[error("No cart loaded; cannot create a cart")]
    NoCart,
}

/// Fixture
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Seeded cart, in snapshot form
    cart: Option<CartSnapshot>,

    /// Promo codes; the standard catalog is used when none are loaded
    catalog: Option<PromoCatalog>,

    /// Saved wishlist items
    wishlist: Vec<WishlistItem<'static>>,
}

impl Fixture {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            cart: None,
            catalog: None,
            wishlist: Vec::new(),
        }
    }

    fn read(&self, category: &str, name: &str) -> Result<String, FixtureError> {
        let file_path = self.base_path.join(category).join(format!("{name}.yml"));

        Ok(fs::read_to_string(&file_path)?)
    }

    /// Load a seeded cart from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_cart(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let contents = self.read("carts", name)?;

        self.cart = Some(serde_norway::from_str(&contents)?);

        Ok(self)
    }

    /// Load promo codes from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or a percentage is invalid.
    pub fn load_promotions(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let contents = self.read("promotions", name)?;
        let fixture: PromotionsFixture = serde_norway::from_str(&contents)?;

        self.catalog = Some(fixture.try_into_catalog()?);

        Ok(self)
    }

    /// Load wishlist items from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or an item is invalid.
    pub fn load_wishlist(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let contents = self.read("wishlists", name)?;
        let fixture: WishlistFixture = serde_norway::from_str(&contents)?;

        for record in &fixture.items {
            self.wishlist.push(WishlistItem::try_from(record)?);
        }

        Ok(self)
    }

    /// Load a complete fixture set (cart, promotions and wishlist with the same name)
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture
            .load_cart(name)?
            .load_promotions(name)?
            .load_wishlist(name)?;

        Ok(fixture)
    }

    /// The loaded cart snapshot
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::NoCart`] if no cart has been loaded.
    pub fn snapshot(&self) -> Result<&CartSnapshot, FixtureError> {
        self.cart.as_ref().ok_or(FixtureError::NoCart)
    }

    /// The loaded promo catalog, or the standard catalog if none was loaded
    ///
    /// # Errors
    ///
    /// Returns an error if the standard catalog cannot be built.
    pub fn catalog(&self) -> Result<PromoCatalog, FixtureError> {
        match &self.catalog {
            Some(catalog) => Ok(catalog.clone()),
            None => Ok(PromoCatalog::standard()?),
        }
    }

    /// Create a cart from the loaded cart fixture
    ///
    /// # Errors
    ///
    /// Returns an error if no cart is loaded or the cart cannot be restored.
    pub fn cart(&self) -> Result<CartStore<'static>, FixtureError> {
        Ok(CartStore::restore(self.snapshot()?, self.catalog()?)?)
    }

    /// Create a wishlist from the loaded wishlist fixture
    pub fn wishlist(&self) -> Wishlist<'static> {
        Wishlist::with_items(self.wishlist.iter().cloned())
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use rust_decimal::Decimal;
    use rusty_money::iso::INR;
    use testresult::TestResult;

    use super::*;

    fn write_fixture(base: &Path, category: &str, name: &str, contents: &str) -> TestResult {
        let dir = base.join(category);

        fs::create_dir_all(&dir)?;
        fs::write(dir.join(format!("{name}.yml")), contents)?;

        Ok(())
    }

    #[test]
    fn fixture_from_set_loads_all_fixtures() -> TestResult {
        let fixture = Fixture::from_set("street-vendor")?;

        assert_eq!(fixture.snapshot()?.items.len(), 3);
        assert_eq!(fixture.catalog()?.len(), 3);
        assert_eq!(fixture.wishlist().len(), 5);

        Ok(())
    }

    #[test]
    fn fixture_cart_restores_seeded_cart() -> TestResult {
        let cart = Fixture::from_set("street-vendor")?.cart()?;

        assert_eq!(cart.len(), 3);
        assert_eq!(cart.currency(), INR);
        assert_eq!(cart.totals().subtotal(), Decimal::from(327));
        assert!(cart.promotion().is_none());

        Ok(())
    }

    #[test]
    fn fixture_without_cart_errors() {
        let fixture = Fixture::new();

        assert!(matches!(fixture.cart(), Err(FixtureError::NoCart)));
    }

    #[test]
    fn fixture_without_promotions_uses_standard_catalog() -> TestResult {
        let dir = tempfile::tempdir()?;

        write_fixture(
            dir.path(),
            "carts",
            "tiny",
            "delivery_fee: 10 INR\nitems:\n  - id: chillies\n    name: Green Chillies\n    price: 25 INR\n    quantity: 2\n    unit: kg\n    max_quantity: 10\n",
        )?;

        let mut fixture = Fixture::with_base_path(dir.path());
        fixture.load_cart("tiny")?;

        let mut cart = fixture.cart()?;
        cart.apply_promo("first20")?;

        assert_eq!(cart.totals().total(), Decimal::from(50));

        Ok(())
    }

    #[test]
    fn fixture_promotions_replace_standard_catalog() -> TestResult {
        let dir = tempfile::tempdir()?;

        write_fixture(
            dir.path(),
            "carts",
            "festival",
            "delivery_fee: 0 INR\nitems:\n  - id: ginger\n    name: Ginger\n    price: 30 INR\n    quantity: 1\n    unit: kg\n    max_quantity: 5\npromo_code: DIWALI25\n",
        )?;

        write_fixture(
            dir.path(),
            "promotions",
            "festival",
            "promotions:\n  DIWALI25: 25%\n",
        )?;

        let mut fixture = Fixture::with_base_path(dir.path());
        fixture.load_cart("festival")?.load_promotions("festival")?;

        let cart = fixture.cart()?;

        assert_eq!(cart.promotion().map(|promotion| promotion.code()), Some("DIWALI25"));
        assert_eq!(cart.totals().total(), Decimal::new(225, 1));

        Ok(())
    }

    #[test]
    fn fixture_missing_file_is_io_error() {
        let mut fixture = Fixture::new();

        assert!(matches!(
            fixture.load_cart("does-not-exist"),
            Err(FixtureError::Io(_))
        ));
    }

    #[test]
    fn fixture_invalid_wishlist_price_is_record_error() -> TestResult {
        let dir = tempfile::tempdir()?;

        write_fixture(
            dir.path(),
            "wishlists",
            "broken",
            "items:\n  - id: saffron\n    name: Saffron\n    supplier: SpiceWorld\n    price: 900 XYZ\n    unit: g\n    added: 2024-01-08\n",
        )?;

        let mut fixture = Fixture::with_base_path(dir.path());

        assert!(matches!(
            fixture.load_wishlist("broken"),
            Err(FixtureError::Record(RecordError::UnknownCurrency(code))) if code == "XYZ"
        ));

        Ok(())
    }
}

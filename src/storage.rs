//! Storage
//!
//! Load/save hooks for cart state. The cart itself never touches storage; callers take a
//! [`CartSnapshot`] and hand it to a [`CartStorage`] implementation.

use std::{fs, io, path::PathBuf};

use rusty_money::Money;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::{
    cart::{CartError, CartStore},
    config::{CartConfig, ConfigError},
    items::LineItem,
    promotions::PromoCatalog,
    records::{LineItemRecord, RecordError, format_price, parse_price},
};

/// Errors raised loading, saving or restoring cart state.
#[derive(Debug, Error)]
pub enum StorageError {
    /// IO error reading or writing a snapshot file
    #[error("Failed to access snapshot file: {0}")]
    Io(#[from] io::Error),

    /// YAML (de)serialisation error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// A record in the snapshot was invalid
    #[error(transparent)]
    Record(#[from] RecordError),

    /// The snapshot configuration was invalid
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The cart refused a line from the snapshot
    #[error(transparent)]
    Cart(#[from] CartError),
}

/// Serialisable cart state.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CartSnapshot {
    /// Flat delivery fee, which also fixes the cart currency (e.g., "50 INR")
    pub delivery_fee: String,

    /// Line items in cart order
    #[serde(default)]
    pub items: Vec<LineItemRecord>,

    /// Active promo code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promo_code: Option<String>,
}

impl CartStore<'_> {
    /// Take a snapshot of the cart's items and active promo code.
    pub fn snapshot(&self) -> CartSnapshot {
        let delivery_fee = Money::from_decimal(self.delivery_fee(), self.currency());

        CartSnapshot {
            delivery_fee: format_price(&delivery_fee),
            items: self.items().iter().map(LineItemRecord::from).collect(),
            promo_code: self.promotion().map(|promotion| promotion.code().to_string()),
        }
    }
}

impl CartStore<'static> {
    /// Rebuild a cart from a snapshot.
    ///
    /// Lines are added in order, so duplicate ids merge as they would through
    /// [`CartStore::add_item`]. A promo code the catalog no longer accepts is dropped.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if a record is malformed, breaks a line item invariant,
    /// or is priced in a different currency from the delivery fee.
    pub fn restore(snapshot: &CartSnapshot, catalog: PromoCatalog) -> Result<Self, StorageError> {
        let (delivery_fee, currency) = parse_price(&snapshot.delivery_fee)?;
        let mut cart = CartStore::with_catalog(CartConfig::new(currency, delivery_fee)?, catalog);

        for record in &snapshot.items {
            cart.add_item(LineItem::try_from(record)?)?;
        }

        if let Some(code) = &snapshot.promo_code {
            if cart.is_empty() {
                warn!(code, "dropped promo code from empty cart snapshot");
            } else if cart.apply_promo(code).is_err() {
                warn!(code, "dropped promo code no longer in catalog");
            }
        }

        Ok(cart)
    }
}

/// Somewhere cart snapshots can be kept between sessions.
pub trait CartStorage {
    /// Load the last saved snapshot, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if stored state exists but cannot be read.
    fn load(&self) -> Result<Option<CartSnapshot>, StorageError>;

    /// Save a snapshot, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the snapshot cannot be written.
    fn save(&mut self, snapshot: &CartSnapshot) -> Result<(), StorageError>;
}

/// Keeps the last snapshot in memory for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    snapshot: Option<CartSnapshot>,
}

impl MemoryStorage {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl CartStorage for MemoryStorage {
    fn load(&self) -> Result<Option<CartSnapshot>, StorageError> {
        Ok(self.snapshot.clone())
    }

    fn save(&mut self, snapshot: &CartSnapshot) -> Result<(), StorageError> {
        self.snapshot = Some(snapshot.clone());

        Ok(())
    }
}

/// Stores a snapshot as a YAML file.
#[derive(Debug, Clone)]
pub struct YamlFileStorage {
    path: PathBuf,
}

impl YamlFileStorage {
    /// Store snapshots at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CartStorage for YamlFileStorage {
    fn load(&self) -> Result<Option<CartSnapshot>, StorageError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        Ok(Some(serde_norway::from_str(&contents)?))
    }

    fn save(&mut self, snapshot: &CartSnapshot) -> Result<(), StorageError> {
        fs::write(&self.path, serde_norway::to_string(snapshot)?)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rusty_money::iso::{INR, USD};
    use testresult::TestResult;

    use crate::discounts::PercentOff;

    use super::*;

    fn cart() -> Result<CartStore<'static>, Box<dyn std::error::Error>> {
        let mut cart = CartStore::new(CartConfig::default())?;

        cart.add_item(
            LineItem::new("tomatoes", "Fresh Tomatoes", Money::from_major(20, INR), 5, "kg", 50)?
                .with_supplier("AgroMart Pvt. Ltd.")
                .with_discount(PercentOff::from_points(15)?),
        )?;

        cart.add_item(LineItem::new(
            "rice",
            "Basmati Rice",
            Money::from_major(40, INR),
            2,
            "kg",
            25,
        )?)?;

        cart.apply_promo("save10")?;

        Ok(cart)
    }

    fn record(id: &str, price: &str, quantity: u32) -> LineItemRecord {
        LineItemRecord {
            id: id.to_string(),
            name: id.to_string(),
            supplier: None,
            price: price.to_string(),
            quantity,
            unit: "kg".to_string(),
            max_quantity: 10,
            discount: None,
        }
    }

    #[test]
    fn snapshot_captures_items_and_promo() -> TestResult {
        let snapshot = cart()?.snapshot();

        assert_eq!(snapshot.delivery_fee, "50 INR");
        assert_eq!(snapshot.items.len(), 2);
        assert_eq!(snapshot.promo_code.as_deref(), Some("SAVE10"));
        assert_eq!(
            snapshot.items.first().and_then(|item| item.discount.as_deref()),
            Some("15%")
        );

        Ok(())
    }

    #[test]
    fn restore_rebuilds_same_totals() -> TestResult {
        let cart = cart()?;
        let restored = CartStore::restore(&cart.snapshot(), PromoCatalog::standard()?)?;

        assert_eq!(restored.totals(), cart.totals());
        assert_eq!(restored.items(), cart.items());
        assert_eq!(restored.promotion(), cart.promotion());

        Ok(())
    }

    #[test]
    fn restore_drops_retired_promo_code() -> TestResult {
        let snapshot = cart()?.snapshot();
        let restored = CartStore::restore(&snapshot, PromoCatalog::empty())?;

        assert!(restored.promotion().is_none());
        assert_eq!(restored.len(), 2);

        Ok(())
    }

    #[test]
    fn restore_drops_promo_code_on_empty_cart() -> TestResult {
        let snapshot = CartSnapshot {
            delivery_fee: "50 INR".to_string(),
            items: vec![],
            promo_code: Some("SAVE10".to_string()),
        };

        let restored = CartStore::restore(&snapshot, PromoCatalog::standard()?)?;

        assert!(restored.is_empty());
        assert!(restored.promotion().is_none());
        assert_eq!(restored.totals().total(), Decimal::from(50));

        Ok(())
    }

    #[test]
    fn restore_merges_duplicate_records() -> TestResult {
        let snapshot = CartSnapshot {
            delivery_fee: "0 INR".to_string(),
            items: vec![record("ginger", "30 INR", 6), record("ginger", "30 INR", 6)],
            promo_code: None,
        };

        let restored = CartStore::restore(&snapshot, PromoCatalog::empty())?;

        assert_eq!(restored.len(), 1);
        assert_eq!(restored.item("ginger").map(LineItem::quantity), Some(10));

        Ok(())
    }

    #[test]
    fn restore_rejects_mixed_currencies() -> TestResult {
        let snapshot = CartSnapshot {
            delivery_fee: "50 INR".to_string(),
            items: vec![record("ginger", "3 USD", 1)],
            promo_code: None,
        };

        let result = CartStore::restore(&snapshot, PromoCatalog::empty());

        assert!(matches!(
            result,
            Err(StorageError::Cart(CartError::CurrencyMismatch(id, item, cart)))
                if id == "ginger" && item == USD.iso_alpha_code && cart == INR.iso_alpha_code
        ));

        Ok(())
    }

    #[test]
    fn memory_storage_round_trips_snapshot() -> TestResult {
        let mut storage = MemoryStorage::new();

        assert_eq!(storage.load()?, None);

        let snapshot = cart()?.snapshot();
        storage.save(&snapshot)?;

        assert_eq!(storage.load()?, Some(snapshot));

        Ok(())
    }

    #[test]
    fn yaml_storage_missing_file_loads_none() -> TestResult {
        let dir = tempfile::tempdir()?;
        let storage = YamlFileStorage::new(dir.path().join("cart.yml"));

        assert_eq!(storage.load()?, None);

        Ok(())
    }

    #[test]
    fn yaml_storage_persists_between_instances() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("cart.yml");
        let cart = cart()?;

        YamlFileStorage::new(&path).save(&cart.snapshot())?;

        let loaded = YamlFileStorage::new(&path)
            .load()?
            .ok_or("Expected a saved snapshot")?;

        let restored = CartStore::restore(&loaded, PromoCatalog::standard()?)?;

        assert_eq!(restored.totals(), cart.totals());

        Ok(())
    }

    #[test]
    fn yaml_storage_reports_malformed_file() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("cart.yml");

        fs::write(&path, "items: [not, a, cart")?;

        assert!(matches!(
            YamlFileStorage::new(&path).load(),
            Err(StorageError::Yaml(_))
        ));

        Ok(())
    }
}

//! Cart
//!
//! [`CartStore`] owns the ordered line items and the active promotion. Every operation
//! that references a line item by id treats an unknown id as a no-op, and quantities are
//! clamped rather than rejected.

use rust_decimal::Decimal;
use rusty_money::iso::Currency;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    config::CartConfig,
    discounts::DiscountError,
    items::LineItem,
    pricing::{CartTotals, compute_totals},
    promotions::{PromoCatalog, PromoError, Promotion},
};

/// Errors related to cart construction or adding items.
#[derive(Debug, Error, PartialEq)]
pub enum CartError {
    /// An item's currency differs from the cart currency (item id, item currency, cart currency).
    #[error("Item {0} has currency {1}, but cart has currency {2}")]
    CurrencyMismatch(String, &'static str, &'static str),

    /// The promo catalog could not be built.
    #[error(transparent)]
    Discount(#[from] DiscountError),
}

/// Result of adding an item to the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The item was appended as a new line.
    Added,

    /// An item with the same id was already present; quantities were summed and clamped.
    Merged {
        /// Quantity of the existing line after merging
        quantity: u32,
    },
}

/// Result of changing an item's quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityUpdate {
    /// The quantity was set as requested.
    Updated(u32),

    /// The requested quantity was above the maximum and was saturated to it.
    Clamped(u32),

    /// The quantity dropped to zero and the line was removed.
    Removed,

    /// No line has the given id; nothing changed.
    UnknownItem,
}

/// Cart
#[derive(Debug, Clone)]
pub struct CartStore<'a> {
    items: Vec<LineItem<'a>>,
    promotion: Option<Promotion>,
    catalog: PromoCatalog,
    config: CartConfig,
}

impl<'a> CartStore<'a> {
    /// Create an empty cart using the standard promo catalog.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError::Discount`] if the standard catalog cannot be built.
    pub fn new(config: CartConfig) -> Result<Self, CartError> {
        Ok(Self::with_catalog(config, PromoCatalog::standard()?))
    }

    /// Create an empty cart with a custom promo catalog.
    pub fn with_catalog(config: CartConfig, catalog: PromoCatalog) -> Self {
        Self {
            items: Vec::new(),
            promotion: None,
            catalog,
            config,
        }
    }

    /// Add an item to the cart.
    ///
    /// If a line with the same id already exists the quantities are summed and clamped to
    /// that line's maximum quantity; the existing line's other attributes are kept.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::CurrencyMismatch`] if the item is not priced in the cart currency.
    pub fn add_item(&mut self, item: LineItem<'a>) -> Result<AddOutcome, CartError> {
        let item_currency = item.price().currency();

        if item_currency != self.config.currency() {
            return Err(CartError::CurrencyMismatch(
                item.id().to_string(),
                item_currency.iso_alpha_code,
                self.config.currency().iso_alpha_code,
            ));
        }

        if let Some(existing) = self.items.iter_mut().find(|line| line.id() == item.id()) {
            let quantity =
                existing.clamp_quantity(existing.quantity().saturating_add(item.quantity()));

            existing.set_quantity(quantity);

            debug!(id = item.id(), quantity, "merged duplicate cart item");

            return Ok(AddOutcome::Merged { quantity });
        }

        debug!(id = item.id(), quantity = item.quantity(), "added cart item");

        self.items.push(item);

        Ok(AddOutcome::Added)
    }

    /// Set the quantity of a line.
    ///
    /// A quantity of zero removes the line; anything above the line's maximum is clamped.
    pub fn set_quantity(&mut self, id: &str, quantity: u32) -> QuantityUpdate {
        if quantity == 0 {
            return match self.remove_item(id) {
                Some(_) => QuantityUpdate::Removed,
                None => QuantityUpdate::UnknownItem,
            };
        }

        let Some(item) = self.items.iter_mut().find(|line| line.id() == id) else {
            debug!(id, "ignored quantity change for unknown cart item");
            return QuantityUpdate::UnknownItem;
        };

        let clamped = item.clamp_quantity(quantity);
        item.set_quantity(clamped);

        debug!(id, requested = quantity, quantity = clamped, "set cart item quantity");

        if clamped == quantity {
            QuantityUpdate::Updated(clamped)
        } else {
            QuantityUpdate::Clamped(clamped)
        }
    }

    /// Add one unit to a line.
    pub fn increment(&mut self, id: &str) -> QuantityUpdate {
        let Some(quantity) = self.item(id).map(LineItem::quantity) else {
            return QuantityUpdate::UnknownItem;
        };

        self.set_quantity(id, quantity.saturating_add(1))
    }

    /// Take one unit off a line, removing it when it reaches zero.
    pub fn decrement(&mut self, id: &str) -> QuantityUpdate {
        let Some(quantity) = self.item(id).map(LineItem::quantity) else {
            return QuantityUpdate::UnknownItem;
        };

        self.set_quantity(id, quantity.saturating_sub(1))
    }

    /// Remove a line, returning it if it was present.
    ///
    /// Removing the last line also clears the active promotion.
    pub fn remove_item(&mut self, id: &str) -> Option<LineItem<'a>> {
        let position = self.items.iter().position(|line| line.id() == id)?;
        let removed = self.items.remove(position);

        debug!(id, "removed cart item");

        if self.items.is_empty() && self.promotion.take().is_some() {
            info!("cart emptied, cleared promotion");
        }

        Some(removed)
    }

    /// Apply a promo code, replacing any active promotion.
    ///
    /// # Errors
    ///
    /// Returns [`PromoError::InvalidPromoCode`] if the code is not in the catalog. The
    /// active promotion is left untouched.
    pub fn apply_promo(&mut self, code: &str) -> Result<&Promotion, PromoError> {
        let Some(promotion) = self.catalog.lookup(code) else {
            debug!(code, "rejected promo code");
            return Err(PromoError::InvalidPromoCode(code.to_string()));
        };

        info!(code = promotion.code(), discount = %promotion.discount(), "applied promo code");

        Ok(&*self.promotion.insert(promotion))
    }

    /// Clear the active promotion, returning it if there was one.
    pub fn remove_promo(&mut self) -> Option<Promotion> {
        let removed = self.promotion.take();

        if let Some(promotion) = &removed {
            info!(code = promotion.code(), "removed promo code");
        }

        removed
    }

    /// Compute the cart totals.
    pub fn totals(&self) -> CartTotals {
        compute_totals(
            &self.items,
            self.promotion.as_ref(),
            self.config.delivery_fee(),
            self.config.currency(),
        )
    }

    /// Line items in the order they were added.
    pub fn items(&self) -> &[LineItem<'a>] {
        &self.items
    }

    /// Get a line by id.
    pub fn item(&self, id: &str) -> Option<&LineItem<'a>> {
        self.items.iter().find(|line| line.id() == id)
    }

    /// Get the number of lines in the cart.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The active promotion, if any.
    pub fn promotion(&self) -> Option<&Promotion> {
        self.promotion.as_ref()
    }

    /// The promo catalog codes are looked up in.
    pub fn catalog(&self) -> &PromoCatalog {
        &self.catalog
    }

    /// Get the currency of the cart.
    pub fn currency(&self) -> &'static Currency {
        self.config.currency()
    }

    /// Flat delivery fee charged on the cart.
    pub fn delivery_fee(&self) -> Decimal {
        self.config.delivery_fee()
    }

    /// Cart configuration.
    pub fn config(&self) -> &CartConfig {
        &self.config
    }
}

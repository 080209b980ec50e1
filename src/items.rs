//! Items

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::discounts::PercentOff;

/// Errors raised when a line item would break its quantity or price invariants.
#[derive(Debug, Error, PartialEq)]
pub enum ItemError {
    /// Unit price was below zero.
    #[error("item {0} has a negative unit price")]
    NegativePrice(String),

    /// Maximum quantity must be at least one.
    #[error("item {0} has a maximum quantity of zero")]
    ZeroMaxQuantity(String),

    /// A line item needs at least one unit.
    #[error("item {0} has a quantity of zero")]
    ZeroQuantity(String),

    /// Quantity was above the item's maximum.
    #[error("item {id} has quantity {quantity}, above its maximum of {max_quantity}")]
    QuantityExceedsMax {
        /// Item identifier
        id: String,
        /// Requested quantity
        quantity: u32,
        /// Maximum allowed quantity
        max_quantity: u32,
    },
}

/// A product entry in the cart with its quantity and price.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem<'a> {
    id: String,
    name: String,
    supplier: Option<String>,
    price: Money<'a, Currency>,
    quantity: u32,
    unit: String,
    max_quantity: u32,
    discount: Option<PercentOff>,
}

impl<'a> LineItem<'a> {
    /// Creates a new line item.
    ///
    /// # Errors
    ///
    /// Returns an [`ItemError`] if the price is negative, `max_quantity` is zero,
    /// or `quantity` is not within `1..=max_quantity`.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: Money<'a, Currency>,
        quantity: u32,
        unit: impl Into<String>,
        max_quantity: u32,
    ) -> Result<Self, ItemError> {
        let id = id.into();

        if *price.amount() < Decimal::ZERO {
            return Err(ItemError::NegativePrice(id));
        }

        if max_quantity == 0 {
            return Err(ItemError::ZeroMaxQuantity(id));
        }

        if quantity == 0 {
            return Err(ItemError::ZeroQuantity(id));
        }

        if quantity > max_quantity {
            return Err(ItemError::QuantityExceedsMax {
                id,
                quantity,
                max_quantity,
            });
        }

        Ok(Self {
            id,
            name: name.into(),
            supplier: None,
            price,
            quantity,
            unit: unit.into(),
            max_quantity,
            discount: None,
        })
    }

    /// Attach a per-item discount.
    #[must_use]
    pub fn with_discount(mut self, discount: PercentOff) -> Self {
        self.discount = Some(discount);
        self
    }

    /// Attach the supplier name.
    #[must_use]
    pub fn with_supplier(mut self, supplier: impl Into<String>) -> Self {
        self.supplier = Some(supplier.into());
        self
    }

    /// Returns the item identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the supplier name, if known
    pub fn supplier(&self) -> Option<&str> {
        self.supplier.as_deref()
    }

    /// Returns the unit price
    pub fn price(&self) -> &Money<'a, Currency> {
        &self.price
    }

    /// Returns the quantity
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Returns the unit label, e.g. "kg"
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Returns the maximum quantity
    pub fn max_quantity(&self) -> u32 {
        self.max_quantity
    }

    /// Returns the per-item discount
    pub fn discount(&self) -> Option<&PercentOff> {
        self.discount.as_ref()
    }

    /// Unit price times quantity, before any discount.
    pub fn gross(&self) -> Decimal {
        self.price.amount().saturating_mul(Decimal::from(self.quantity))
    }

    /// Unit price times quantity, after the per-item discount.
    pub fn net(&self) -> Decimal {
        let gross = self.gross();

        self.discount
            .as_ref()
            .map_or(gross, |discount| discount.apply(gross))
    }

    /// Clamp a requested quantity into `1..=max_quantity`.
    pub fn clamp_quantity(&self, requested: u32) -> u32 {
        requested.clamp(1, self.max_quantity)
    }

    /// Set a quantity that has already been clamped.
    pub(crate) fn set_quantity(&mut self, quantity: u32) {
        debug_assert!(
            (1..=self.max_quantity).contains(&quantity),
            "quantity {quantity} outside 1..={}",
            self.max_quantity
        );

        self.quantity = quantity;
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::INR;
    use testresult::TestResult;

    use super::*;

    fn tomatoes<'a>() -> Result<LineItem<'a>, ItemError> {
        LineItem::new(
            "tomatoes",
            "Fresh Tomatoes",
            Money::from_major(20, INR),
            5,
            "kg",
            50,
        )
    }

    #[test]
    fn new_sets_fields() -> TestResult {
        let item = tomatoes()?.with_supplier("AgroMart Pvt. Ltd.");

        assert_eq!(item.id(), "tomatoes");
        assert_eq!(item.name(), "Fresh Tomatoes");
        assert_eq!(item.supplier(), Some("AgroMart Pvt. Ltd."));
        assert_eq!(item.quantity(), 5);
        assert_eq!(item.unit(), "kg");
        assert_eq!(item.max_quantity(), 50);
        assert!(item.discount().is_none());

        Ok(())
    }

    #[test]
    fn new_rejects_zero_quantity() {
        let result = LineItem::new("rice", "Rice", Money::from_major(40, INR), 0, "kg", 25);

        assert_eq!(result, Err(ItemError::ZeroQuantity("rice".to_string())));
    }

    #[test]
    fn new_rejects_zero_max_quantity() {
        let result = LineItem::new("rice", "Rice", Money::from_major(40, INR), 1, "kg", 0);

        assert_eq!(result, Err(ItemError::ZeroMaxQuantity("rice".to_string())));
    }

    #[test]
    fn new_rejects_quantity_above_max() {
        let result = LineItem::new("rice", "Rice", Money::from_major(40, INR), 30, "kg", 25);

        assert_eq!(
            result,
            Err(ItemError::QuantityExceedsMax {
                id: "rice".to_string(),
                quantity: 30,
                max_quantity: 25,
            })
        );
    }

    #[test]
    fn new_rejects_negative_price() {
        let result = LineItem::new("rice", "Rice", Money::from_major(-1, INR), 1, "kg", 25);

        assert_eq!(result, Err(ItemError::NegativePrice("rice".to_string())));
    }

    #[test]
    fn gross_and_net_apply_item_discount() -> TestResult {
        let item = tomatoes()?.with_discount(PercentOff::from_points(15)?);

        assert_eq!(item.gross(), Decimal::from(100));
        assert_eq!(item.net(), Decimal::from(85));

        Ok(())
    }

    #[test]
    fn net_without_discount_equals_gross() -> TestResult {
        let item = tomatoes()?;

        assert_eq!(item.net(), item.gross());

        Ok(())
    }

    #[test]
    fn clamp_quantity_saturates_at_bounds() -> TestResult {
        let item = tomatoes()?;

        assert_eq!(item.clamp_quantity(0), 1);
        assert_eq!(item.clamp_quantity(12), 12);
        assert_eq!(item.clamp_quantity(500), 50);

        Ok(())
    }
}

//! Records
//!
//! Plain serialisable forms of line items and wishlist entries, shared by fixtures and
//! cart snapshots. Prices are written as `"AMOUNT CURRENCY"` (e.g. `"20.00 INR"`) and
//! discounts as `"15%"`.

use jiff::civil::Date;
use rust_decimal::Decimal;
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, INR, USD},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    discounts::{DiscountError, PercentOff},
    items::{ItemError, LineItem},
    wishlist::WishlistItem,
};

/// Errors raised converting a record into a domain type.
#[derive(Debug, Error, PartialEq)]
pub enum RecordError {
    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Invalid percentage format
    #[error("Invalid percentage format: {0}")]
    InvalidPercentage(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Percentage outside the allowed range.
    #[error(transparent)]
    Discount(#[from] DiscountError),

    /// The record broke a line item invariant.
    #[error(transparent)]
    Item(#[from] ItemError),
}

/// A cart line as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LineItemRecord {
    /// Item identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Supplier name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,

    /// Unit price (e.g., "20.00 INR")
    pub price: String,

    /// Quantity
    pub quantity: u32,

    /// Unit label (e.g., "kg")
    pub unit: String,

    /// Maximum quantity
    pub max_quantity: u32,

    /// Per-item discount (e.g., "15%")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<String>,
}

impl TryFrom<&LineItemRecord> for LineItem<'static> {
    type Error = RecordError;

    fn try_from(record: &LineItemRecord) -> Result<Self, Self::Error> {
        let (amount, currency) = parse_price(&record.price)?;

        let mut item = LineItem::new(
            record.id.as_str(),
            record.name.as_str(),
            Money::from_decimal(amount, currency),
            record.quantity,
            record.unit.as_str(),
            record.max_quantity,
        )?;

        if let Some(discount) = &record.discount {
            item = item.with_discount(parse_percentage(discount)?);
        }

        if let Some(supplier) = &record.supplier {
            item = item.with_supplier(supplier.as_str());
        }

        Ok(item)
    }
}

impl From<&LineItem<'_>> for LineItemRecord {
    fn from(item: &LineItem<'_>) -> Self {
        LineItemRecord {
            id: item.id().to_string(),
            name: item.name().to_string(),
            supplier: item.supplier().map(str::to_string),
            price: format_price(item.price()),
            quantity: item.quantity(),
            unit: item.unit().to_string(),
            max_quantity: item.max_quantity(),
            discount: item.discount().map(PercentOff::to_string),
        }
    }
}

/// A wishlist entry as stored on disk.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WishlistItemRecord {
    /// Item identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Supplier name
    pub supplier: String,

    /// Unit price (e.g., "20.00 INR")
    pub price: String,

    /// Unit label
    pub unit: String,

    /// Average rating out of five
    #[serde(default)]
    pub rating: f32,

    /// Whether the supplier has stock
    #[serde(default = "in_stock_default")]
    pub in_stock: bool,

    /// Sale discount (e.g., "15%")
    #[serde(default)]
    pub discount: Option<String>,

    /// Price before the sale discount
    #[serde(default)]
    pub original_price: Option<String>,

    /// Date the item was saved
    pub added: Date,
}

fn in_stock_default() -> bool {
    true
}

impl TryFrom<&WishlistItemRecord> for WishlistItem<'static> {
    type Error = RecordError;

    fn try_from(record: &WishlistItemRecord) -> Result<Self, Self::Error> {
        let (amount, currency) = parse_price(&record.price)?;

        let mut item = WishlistItem::new(
            record.id.as_str(),
            record.name.as_str(),
            record.supplier.as_str(),
            Money::from_decimal(amount, currency),
            record.unit.as_str(),
            record.added,
        )
        .with_rating(record.rating)
        .with_stock(record.in_stock);

        if let Some(discount) = &record.discount {
            let original_price = record
                .original_price
                .as_deref()
                .map(parse_price)
                .transpose()?
                .map(|(amount, currency)| Money::from_decimal(amount, currency));

            item = item.with_sale(parse_percentage(discount)?, original_price);
        }

        Ok(item)
    }
}

/// Parse price string (e.g., "2.99 INR") into a decimal amount and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount cannot be parsed as a decimal, or if the currency code
/// is not recognized.
pub fn parse_price(s: &str) -> Result<(Decimal, &'static Currency), RecordError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    let [amount, currency_code] = parts.as_slice() else {
        return Err(RecordError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| RecordError::InvalidPrice(s.to_string()))?;

    Ok((amount, parse_currency(currency_code)?))
}

/// Resolve an ISO currency code.
///
/// # Errors
///
/// Returns [`RecordError::UnknownCurrency`] for codes the marketplace does not trade in.
pub fn parse_currency(code: &str) -> Result<&'static Currency, RecordError> {
    match code {
        "INR" => Ok(INR),
        "GBP" => Ok(GBP),
        "USD" => Ok(USD),
        "EUR" => Ok(EUR),
        other => Err(RecordError::UnknownCurrency(other.to_string())),
    }
}

/// Format a price as `"AMOUNT CURRENCY"`.
pub fn format_price(price: &Money<'_, Currency>) -> String {
    format!(
        "{} {}",
        price.amount().normalize(),
        price.currency().iso_alpha_code
    )
}

/// Parse percentage string (e.g., "15%" or "0.15") into a [`PercentOff`]
///
/// Accepts two formats:
/// - Percentage format: "15%" for 15%
/// - Decimal format: "0.15" for 15%
///
/// # Errors
///
/// Returns an error if the string cannot be parsed or is outside 0-100%.
pub fn parse_percentage(s: &str) -> Result<PercentOff, RecordError> {
    let trimmed = s.trim();

    let points = if let Some(percent_str) = trimmed.strip_suffix('%') {
        percent_str
            .trim()
            .parse::<Decimal>()
            .map_err(|_err| RecordError::InvalidPercentage(s.to_string()))?
    } else {
        trimmed
            .parse::<Decimal>()
            .ok()
            .and_then(|fraction| fraction.checked_mul(Decimal::ONE_HUNDRED))
            .ok_or_else(|| RecordError::InvalidPercentage(s.to_string()))?
    };

    Ok(PercentOff::new(points)?)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn onions() -> LineItemRecord {
        LineItemRecord {
            id: "onions".to_string(),
            name: "Red Onions".to_string(),
            supplier: Some("FreshFarm Co.".to_string()),
            price: "18 INR".to_string(),
            quantity: 10,
            unit: "kg".to_string(),
            max_quantity: 100,
            discount: Some("10%".to_string()),
        }
    }

    #[test]
    fn parse_price_rejects_invalid_format() {
        let result = parse_price("2.99INR");

        assert!(matches!(result, Err(RecordError::InvalidPrice(_))));
    }

    #[test]
    fn parse_price_rejects_unknown_currency() {
        let result = parse_price("2.99 ABC");

        assert!(matches!(result, Err(RecordError::UnknownCurrency(code)) if code == "ABC"));
    }

    #[test]
    fn parse_price_keeps_full_precision() -> TestResult {
        let (amount, currency) = parse_price("3.335 INR")?;

        assert_eq!(amount, Decimal::new(3335, 3));
        assert_eq!(currency, INR);

        Ok(())
    }

    #[test]
    fn parse_percentage_accepts_percentage_format() -> TestResult {
        assert_eq!(parse_percentage("15%")?, PercentOff::from_points(15)?);
        assert_eq!(parse_percentage(" 20 % ")?, PercentOff::from_points(20)?);

        Ok(())
    }

    #[test]
    fn parse_percentage_accepts_decimal_format() -> TestResult {
        assert_eq!(parse_percentage("0.15")?, PercentOff::from_points(15)?);

        Ok(())
    }

    #[test]
    fn parse_percentage_rejects_invalid_and_out_of_range() {
        assert!(matches!(
            parse_percentage("lots"),
            Err(RecordError::InvalidPercentage(_))
        ));
        assert!(matches!(
            parse_percentage("150%"),
            Err(RecordError::Discount(DiscountError::OutOfRange(_)))
        ));
    }

    #[test]
    fn line_item_from_record() -> TestResult {
        let item = LineItem::try_from(&onions())?;

        assert_eq!(item.id(), "onions");
        assert_eq!(item.supplier(), Some("FreshFarm Co."));
        assert_eq!(item.net(), Decimal::from(162));

        Ok(())
    }

    #[test]
    fn line_item_record_rejects_broken_invariants() {
        let record = LineItemRecord {
            quantity: 101,
            ..onions()
        };

        assert!(matches!(
            LineItem::try_from(&record),
            Err(RecordError::Item(ItemError::QuantityExceedsMax { .. }))
        ));
    }

    #[test]
    fn record_from_line_item_writes_price_and_discount() -> TestResult {
        let item = LineItem::try_from(&onions())?;
        let record = LineItemRecord::from(&item);

        assert_eq!(record, onions());

        Ok(())
    }
}

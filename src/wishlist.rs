//! Wishlist
//!
//! Products a vendor has saved for later. Unlike the cart, a wishlist never merges:
//! adding an id that is already saved is refused.

use jiff::civil::Date;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;
use tracing::debug;

use crate::{
    cart::{AddOutcome, CartError, CartStore},
    discounts::PercentOff,
    items::{ItemError, LineItem},
};

/// Errors raised moving a wishlist item into the cart.
#[derive(Debug, Error, PartialEq)]
pub enum WishlistError {
    /// The supplier has no stock of the item.
    #[error("item {0} is out of stock")]
    OutOfStock(String),

    /// The item could not be turned into a cart line.
    #[error(transparent)]
    Item(#[from] ItemError),

    /// The cart refused the item.
    #[error(transparent)]
    Cart(#[from] CartError),
}

/// A saved product.
#[derive(Debug, Clone, PartialEq)]
pub struct WishlistItem<'a> {
    id: String,
    name: String,
    supplier: String,
    price: Money<'a, Currency>,
    unit: String,
    rating: f32,
    in_stock: bool,
    discount: Option<PercentOff>,
    original_price: Option<Money<'a, Currency>>,
    added: Date,
}

impl<'a> WishlistItem<'a> {
    /// Create an in-stock wishlist item with no rating or sale.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        supplier: impl Into<String>,
        price: Money<'a, Currency>,
        unit: impl Into<String>,
        added: Date,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            supplier: supplier.into(),
            price,
            unit: unit.into(),
            rating: 0.0,
            in_stock: true,
            discount: None,
            original_price: None,
            added,
        }
    }

    /// Set the average rating.
    #[must_use]
    pub fn with_rating(mut self, rating: f32) -> Self {
        self.rating = rating;
        self
    }

    /// Set whether the supplier has stock.
    #[must_use]
    pub fn with_stock(mut self, in_stock: bool) -> Self {
        self.in_stock = in_stock;
        self
    }

    /// Mark the item as on sale.
    #[must_use]
    pub fn with_sale(
        mut self,
        discount: PercentOff,
        original_price: Option<Money<'a, Currency>>,
    ) -> Self {
        self.discount = Some(discount);
        self.original_price = original_price;
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

    /// Returns the supplier name
    pub fn supplier(&self) -> &str {
        &self.supplier
    }

    /// Returns the current unit price
    pub fn price(&self) -> &Money<'a, Currency> {
        &self.price
    }

    /// Returns the unit label
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Returns the average rating
    pub fn rating(&self) -> f32 {
        self.rating
    }

    /// Whether the supplier has stock
    pub fn in_stock(&self) -> bool {
        self.in_stock
    }

    /// Sale discount, if on sale
    pub fn discount(&self) -> Option<&PercentOff> {
        self.discount.as_ref()
    }

    /// Price before the sale, if known
    pub fn original_price(&self) -> Option<&Money<'a, Currency>> {
        self.original_price.as_ref()
    }

    /// Date the item was saved
    pub fn added(&self) -> Date {
        self.added
    }

    /// Whether the item name or supplier contains `needle`, which must already be lower-case.
    fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.supplier.to_lowercase().contains(needle)
    }

    /// Build a one-unit cart line for this item.
    ///
    /// # Errors
    ///
    /// Returns an [`ItemError`] if `max_quantity` is zero.
    pub fn to_line_item(&self, max_quantity: u32) -> Result<LineItem<'a>, ItemError> {
        let item = LineItem::new(
            self.id.as_str(),
            self.name.as_str(),
            self.price,
            1,
            self.unit.as_str(),
            max_quantity,
        )?
        .with_supplier(self.supplier.as_str());

        Ok(item)
    }
}

/// Wishlist
#[derive(Debug, Clone, Default)]
pub struct Wishlist<'a> {
    items: Vec<WishlistItem<'a>>,
}

impl<'a> Wishlist<'a> {
    /// Create an empty wishlist.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Create a wishlist from items, skipping duplicate ids.
    pub fn with_items(items: impl IntoIterator<Item = WishlistItem<'a>>) -> Self {
        let mut wishlist = Self::new();

        for item in items {
            wishlist.add(item);
        }

        wishlist
    }

    /// Save an item. Returns `false` if an item with the same id is already saved.
    pub fn add(&mut self, item: WishlistItem<'a>) -> bool {
        if self.contains(item.id()) {
            debug!(id = item.id(), "ignored duplicate wishlist item");
            return false;
        }

        self.items.push(item);

        true
    }

    /// Remove an item, returning it if it was saved.
    pub fn remove(&mut self, id: &str) -> Option<WishlistItem<'a>> {
        let position = self.items.iter().position(|item| item.id() == id)?;

        Some(self.items.remove(position))
    }

    /// Whether an item with this id is saved.
    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|item| item.id() == id)
    }

    /// Items whose name or supplier contains `query`, ignoring case.
    pub fn search(&self, query: &str) -> Vec<&WishlistItem<'a>> {
        let needle = query.trim().to_lowercase();

        self.items.iter().filter(|item| item.matches(&needle)).collect()
    }

    /// Items the supplier has in stock.
    pub fn in_stock(&self) -> Vec<&WishlistItem<'a>> {
        self.items.iter().filter(|item| item.in_stock()).collect()
    }

    /// Items the supplier has run out of.
    pub fn out_of_stock(&self) -> Vec<&WishlistItem<'a>> {
        self.items.iter().filter(|item| !item.in_stock()).collect()
    }

    /// Items currently discounted.
    pub fn on_sale(&self) -> Vec<&WishlistItem<'a>> {
        self.items
            .iter()
            .filter(|item| item.discount().is_some())
            .collect()
    }

    /// Items ordered newest first. Items saved on the same day keep their saved order.
    pub fn recently_added(&self) -> Vec<&WishlistItem<'a>> {
        let mut items: Vec<&WishlistItem<'a>> = self.items.iter().collect();

        items.sort_by(|a, b| b.added().cmp(&a.added()));

        items
    }

    /// Move one unit of an item into the cart.
    ///
    /// The item leaves the wishlist only once the cart has accepted it. Returns `Ok(None)`
    /// if no item has this id.
    ///
    /// # Errors
    ///
    /// - [`WishlistError::OutOfStock`]: the supplier has no stock.
    /// - [`WishlistError::Item`]: `max_quantity` is zero.
    /// - [`WishlistError::Cart`]: the cart uses a different currency.
    pub fn move_to_cart(
        &mut self,
        id: &str,
        cart: &mut CartStore<'a>,
        max_quantity: u32,
    ) -> Result<Option<AddOutcome>, WishlistError> {
        let Some(item) = self.items.iter().find(|item| item.id() == id) else {
            return Ok(None);
        };

        if !item.in_stock() {
            return Err(WishlistError::OutOfStock(id.to_string()));
        }

        let outcome = cart.add_item(item.to_line_item(max_quantity)?)?;

        self.remove(id);

        debug!(id, "moved wishlist item to cart");

        Ok(Some(outcome))
    }

    /// All saved items in the order they were saved.
    pub fn items(&self) -> &[WishlistItem<'a>] {
        &self.items
    }

    /// Get the number of saved items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the wishlist is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

//! Haat
//!
//! Haat is the cart pricing engine of a street-vendor marketplace: line items with
//! per-item discounts, promo codes, a flat delivery fee and the totals derived from them,
//! plus a wishlist, storage hooks and a terminal receipt.

pub mod cart;
pub mod config;
pub mod discounts;
pub mod fixtures;
pub mod items;
pub mod prelude;
pub mod pricing;
pub mod promotions;
pub mod receipt;
pub mod records;
pub mod storage;
pub mod utils;
pub mod wishlist;

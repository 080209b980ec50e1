//! Haat prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{AddOutcome, CartError, CartStore, QuantityUpdate},
    config::{CartConfig, ConfigError, DEFAULT_DELIVERY_FEE},
    discounts::{DiscountError, PercentOff},
    fixtures::{Fixture, FixtureError},
    items::{ItemError, LineItem},
    pricing::{CartTotals, compute_totals, round_for_display},
    promotions::{PromoCatalog, PromoError, Promotion},
    receipt::{Receipt, ReceiptError},
    storage::{CartSnapshot, CartStorage, MemoryStorage, StorageError, YamlFileStorage},
    wishlist::{Wishlist, WishlistError, WishlistItem},
};

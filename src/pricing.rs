//! Pricing
//!
//! Totals are computed at full decimal precision. Rounding to two places only happens
//! when a value is turned into [`Money`] for display.

use rust_decimal::{Decimal, RoundingStrategy};
use rusty_money::{Money, iso::Currency};

use crate::{items::LineItem, promotions::Promotion};

/// Decimal places shown to the user.
const DISPLAY_DP: u32 = 2;

/// Totals derived from a cart's line items, promotion and delivery fee.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CartTotals {
    original_total: Decimal,
    subtotal: Decimal,
    promo_discount: Decimal,
    delivery_fee: Decimal,
    total: Decimal,
    total_savings: Decimal,
    currency: &'static Currency,
}

impl CartTotals {
    /// Sum of unit price times quantity, before any discount.
    pub fn original_total(&self) -> Decimal {
        self.original_total
    }

    /// Sum of per-item discounted prices, before promotion and delivery fee.
    pub fn subtotal(&self) -> Decimal {
        self.subtotal
    }

    /// Amount taken off the subtotal by the active promotion.
    pub fn promo_discount(&self) -> Decimal {
        self.promo_discount
    }

    /// Flat delivery fee.
    pub fn delivery_fee(&self) -> Decimal {
        self.delivery_fee
    }

    /// Amount payable: subtotal less promotion discount, plus delivery fee.
    pub fn total(&self) -> Decimal {
        self.total
    }

    /// Original total less the amount payable, with the delivery fee held constant.
    pub fn total_savings(&self) -> Decimal {
        self.total_savings
    }

    /// Currency the totals are expressed in.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Round `amount` for display in the totals' currency.
    pub fn to_money(&self, amount: Decimal) -> Money<'static, Currency> {
        Money::from_decimal(round_for_display(amount), self.currency)
    }
}

/// Round an amount to two decimal places, midpoints away from zero.
pub fn round_for_display(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(DISPLAY_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// Compute cart totals.
///
/// This is a pure function of its inputs: the same items, promotion and fee always
/// produce identical totals.
pub fn compute_totals(
    items: &[LineItem<'_>],
    promotion: Option<&Promotion>,
    delivery_fee: Decimal,
    currency: &'static Currency,
) -> CartTotals {
    let (original_total, subtotal) = items
        .iter()
        .fold((Decimal::ZERO, Decimal::ZERO), |(gross, net), item| {
            (gross.saturating_add(item.gross()), net.saturating_add(item.net()))
        });

    let promo_discount =
        promotion.map_or(Decimal::ZERO, |promotion| promotion.discount().of(subtotal));

    let total = subtotal
        .saturating_sub(promo_discount)
        .saturating_add(delivery_fee);

    let total_savings = original_total
        .saturating_sub(total)
        .saturating_add(delivery_fee);

    CartTotals {
        original_total,
        subtotal,
        promo_discount,
        delivery_fee,
        total,
        total_savings,
        currency,
    }
}

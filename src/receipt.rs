//! Receipt
//!
//! Terminal order summary for a cart. Amounts are rounded to two decimal places here and
//! nowhere earlier.

use std::{fmt::Write, io};

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use smallvec::{SmallVec, smallvec};
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{cart::CartStore, items::LineItem, pricing::CartTotals, promotions::Promotion};

/// Errors that can occur when writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// IO error
    #[error("IO error")]
    IO,
}

/// One rendered cart line.
#[derive(Debug, Clone, PartialEq)]
struct ReceiptLine {
    name: String,
    supplier: String,
    quantity: String,
    unit_price: String,
    discount: String,
    line_total: String,
    discounted: bool,
}

impl ReceiptLine {
    fn new(item: &LineItem<'_>, totals: &CartTotals) -> Self {
        Self {
            name: item.name().to_string(),
            supplier: item.supplier().unwrap_or_default().to_string(),
            quantity: format!("{} {}", item.quantity(), item.unit()),
            unit_price: format!("{}", totals.to_money(*item.price().amount())),
            discount: item
                .discount()
                .map(|discount| format!("-{discount}"))
                .unwrap_or_default(),
            line_total: format!("{}", totals.to_money(item.net())),
            discounted: item.discount().is_some(),
        }
    }
}

/// Order summary for a cart at a point in time.
#[derive(Debug, Clone)]
pub struct Receipt {
    lines: Vec<ReceiptLine>,
    promotion: Option<Promotion>,
    totals: CartTotals,
}

impl Receipt {
    /// Take a receipt of the cart's current lines, promotion and totals.
    pub fn from_cart(cart: &CartStore<'_>) -> Self {
        let totals = cart.totals();

        Self {
            lines: cart
                .items()
                .iter()
                .map(|item| ReceiptLine::new(item, &totals))
                .collect(),
            promotion: cart.promotion().cloned(),
            totals,
        }
    }

    /// Totals the receipt was taken with
    pub fn totals(&self) -> &CartTotals {
        &self.totals
    }

    /// Promotion applied when the receipt was taken
    pub fn promotion(&self) -> Option<&Promotion> {
        self.promotion.as_ref()
    }

    /// Amount payable, rounded for display
    pub fn total(&self) -> Money<'static, Currency> {
        self.totals.to_money(self.totals.total())
    }

    /// Writes the receipt.
    ///
    /// # Errors
    ///
    /// Returns an error if the receipt cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        let mut builder = Builder::default();
        let mut color_ops: SmallVec<[(usize, usize, Color); 32]> = smallvec![];

        builder.push_record([
            "",
            "Item",
            "Supplier",
            "Qty",
            "Unit Price",
            "Discount",
            "Line Total",
        ]);

        for (idx, line) in self.lines.iter().enumerate() {
            let row = idx + 1;

            builder.push_record([
                format!("#{:<3}", idx + 1),
                line.name.clone(),
                line.supplier.clone(),
                line.quantity.clone(),
                line.unit_price.clone(),
                line.discount.clone(),
                line.line_total.clone(),
            ]);

            color_ops.push((row, 2, color_dark_grey()));

            if line.discounted {
                color_ops.push((row, 6, Color::FG_GREEN));
            }
        }

        write_receipt_table(&mut out, builder, color_ops)?;

        self.write_summary(&mut out)
    }

    fn write_summary(&self, out: &mut impl io::Write) -> Result<(), ReceiptError> {
        let totals = &self.totals;
        let mut rows: SmallVec<[(String, String); 5]> = smallvec![(
            " Subtotal:".to_string(),
            format!("{}  ", totals.to_money(totals.subtotal()))
        )];

        if let Some(promotion) = &self.promotion {
            rows.push((
                format!(" Promo {} ({}):", promotion.code(), promotion.discount()),
                format!("-{}  ", totals.to_money(totals.promo_discount())),
            ));
        }

        rows.push((
            " Delivery Fee:".to_string(),
            format!("{}  ", totals.to_money(totals.delivery_fee())),
        ));

        if totals.total_savings() > Decimal::ZERO {
            rows.push((
                " Total Savings:".to_string(),
                format!("{}  ", totals.to_money(totals.total_savings())),
            ));
        }

        rows.push((
            " \x1b[1mTotal:\x1b[0m".to_string(),
            format!("\x1b[1m{}  \x1b[0m", self.total()),
        ));

        let label_width = rows
            .iter()
            .map(|(label, _)| visible_width(label))
            .max()
            .unwrap_or_default();

        let value_width = rows
            .iter()
            .map(|(_, value)| visible_width(value))
            .max()
            .unwrap_or_default();

        for (label, value) in &rows {
            write_summary_line(out, label, value, label_width, value_width)?;
        }

        writeln!(out).map_err(|_err| ReceiptError::IO)
    }
}

fn write_receipt_table(
    out: &mut impl io::Write,
    builder: Builder,
    color_ops: SmallVec<[(usize, usize, Color); 32]>,
) -> Result<(), ReceiptError> {
    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());
    let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(1, separator);

    table.with(theme);
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(3..7), Alignment::right());

    for (row, col, color) in color_ops {
        table.modify((row, col), color);
    }

    let table_str = colorize_borders(&table.to_string());

    writeln!(out, "\n{table_str}").map_err(|_err| ReceiptError::IO)
}

/// Wraps runs of UTF-8 box-drawing characters (U+2500..U+257F) in ANSI dark-grey escape
/// codes, leaving cell content untouched.
fn colorize_borders(table: &str) -> String {
    let mut out = String::with_capacity(table.len() + 256);
    let mut in_run = false;

    for ch in table.chars() {
        let box_char = ('\u{2500}'..='\u{257F}').contains(&ch);

        if box_char && !in_run {
            _ = out.write_str("\x1b[90m");
            in_run = true;
        } else if !box_char && in_run {
            _ = out.write_str("\x1b[0m");
            in_run = false;
        }

        out.push(ch);
    }

    if in_run {
        _ = out.write_str("\x1b[0m");
    }

    out
}

/// Returns the visible (non-ANSI) width of a string.
fn visible_width(s: &str) -> usize {
    let mut width = 0usize;
    let mut in_escape = false;

    for ch in s.chars() {
        if in_escape {
            if ch.is_ascii_alphabetic() {
                in_escape = false;
            }
        } else if ch == '\x1b' {
            in_escape = true;
        } else {
            width += 1;
        }
    }

    width
}

/// Writes a summary line with a right-aligned label and a right-aligned value column.
fn write_summary_line(
    out: &mut impl io::Write,
    label: &str,
    value: &str,
    label_col_width: usize,
    value_col_width: usize,
) -> Result<(), ReceiptError> {
    let label_pad = label_col_width.saturating_sub(visible_width(label));
    let value_pad = value_col_width.saturating_sub(visible_width(value));

    writeln!(
        out,
        "{:>label_pad$}{label}  {value_pad}{value}",
        "",
        value_pad = " ".repeat(value_pad)
    )
    .map_err(|_err| ReceiptError::IO)
}

/// ANSI dark grey foreground.
fn color_dark_grey() -> Color {
    Color::new("\x1b[90m", "\x1b[0m")
}

//! Cart Example
//!
//! This example seeds a cart from a fixture set and prints its receipt.
//!
//! Use `-f` to load a fixture set by name
//! Use `-p` to apply a promo code
//! Use `-w` to move a wishlist item into the cart first
//! Use `-s` to save the resulting cart snapshot as YAML

use std::io;

use anyhow::Result;

use clap::Parser;
use haat::{
    fixtures::Fixture,
    receipt::Receipt,
    storage::{CartStorage, YamlFileStorage},
    utils::ExampleCartArgs,
};
use tracing::warn;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Largest quantity a wishlist item can be bought in once moved into the cart.
const WISHLIST_MAX_QUANTITY: u32 = 25;

/// Cart Example
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().compact().with_target(true))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_err| EnvFilter::new("info")))
        .init();

    let args = ExampleCartArgs::parse();

    let fixture = Fixture::from_set(&args.fixture)?;
    let mut cart = fixture.cart()?;

    if let Some(id) = args.wishlist.as_deref() {
        let mut wishlist = fixture.wishlist();

        if wishlist
            .move_to_cart(id, &mut cart, WISHLIST_MAX_QUANTITY)?
            .is_none()
        {
            warn!(id, "no such wishlist item");
        }
    }

    if let Some(code) = args.promo.as_deref() {
        match cart.apply_promo(code) {
            Ok(promotion) => println!("Applied {} ({} off)", promotion.code(), promotion.discount()),
            Err(err) => println!("{err}"),
        }
    }

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    Receipt::from_cart(&cart).write_to(&mut handle)?;

    if let Some(path) = args.save {
        YamlFileStorage::new(&path).save(&cart.snapshot())?;

        println!("Saved cart to {}", path.display());
    }

    Ok(())
}

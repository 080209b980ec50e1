//! Utils

use std::path::PathBuf;

use clap::Parser;

/// Arguments for the cart example
#[derive(Debug, Parser)]
pub struct ExampleCartArgs {
    /// Fixture set to seed the cart, promo codes & wishlist from
    #[clap(short, long, default_value = "street-vendor")]
    pub fixture: String,

    /// Promo code to apply
    #[clap(short, long)]
    pub promo: Option<String>,

    /// Move a wishlist item into the cart by id
    #[clap(short, long)]
    pub wishlist: Option<String>,

    /// Save the resulting cart snapshot to this YAML file
    #[clap(short, long)]
    pub save: Option<PathBuf>,
}

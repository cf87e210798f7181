pub mod client;
pub mod tags;

pub use client::{client, init, ShopifyClient, ShopifyError, ShopifyOrder};

pub mod config;
pub mod shopify;

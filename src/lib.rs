//! Cleaning and aggregation core of the delivery growth dashboard.
//!
//! A run loads the delivery CSV ([`loader`]), cleans it ([`cleaner`]),
//! applies the view filters ([`filter`]) and computes the summaries of one
//! dashboard page ([`reports`], [`views`]).
pub mod cleaner;
pub mod error;
pub mod filter;
pub mod loader;
pub mod output;
pub mod reports;
pub mod settings;
pub mod types;
pub mod util;
pub mod views;

#[cfg(test)]
mod test_support;

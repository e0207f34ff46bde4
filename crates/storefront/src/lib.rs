//! Foodipy storefront data layer.
//!
//! A single-store food-ordering application persisted in a local
//! string-keyed JSON store: user directory, product catalog, order ledger,
//! session state, shopping cart, checkout, and the admin management
//! surface. There is no HTTP server and no database - an embedding UI calls
//! these services in-process and renders what they return.
//!
//! [`state::App`] assembles everything with explicit init and teardown.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod store;

pub use config::AppConfig;
pub use error::{AppError, Result};
pub use state::App;

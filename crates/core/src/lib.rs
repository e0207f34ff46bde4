//! Foodipy Core - Shared types library.
//!
//! This crate provides common types used across all Foodipy components:
//! - `storefront` - The application data layer (directory, catalog, ledger,
//!   session, cart, checkout, admin surface)
//! - `integration-tests` - End-to-end flows over a temporary store
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access. This
//! keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, roles,
//!   and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;

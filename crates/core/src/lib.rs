//! Kirana Core - Shared types library.
//!
//! This crate provides common types used across all Kirana components:
//! - `shop` - In-process storefront services (catalog, cart, checkout, auth)
//! - `cli` - Command-line tools for browsing the catalog and demo flows
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no async, no services. This
//! keeps it lightweight and allows it to be used anywhere, including from the
//! mobile shell's bridge layer.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, contact details,
//!   and ratings

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;

//! Kirana shop services library.
//!
//! Everything the mobile app's screens call into lives here: the product
//! catalog and its filter/sort query pipeline, the session cart, the two
//! checkout flows, the mocked authentication service, and the session state
//! that ties them together.
//!
//! There is no server and no persistent storage. All state is in memory for
//! the lifetime of the app session; "network" calls are simulated with timed
//! delays inside the mock identity provider.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod session;
pub mod state;

//! In-process services.
//!
//! Every "backend" the screens talk to is a local mock behind a trait, so a
//! real implementation can be swapped in without touching callers.

pub mod auth;

//! Driftwood Core - Shared types library.
//!
//! This crate provides common types and pure helpers used across Driftwood
//! components:
//! - `storefront` - Headless storefront core (Shopify client + client state)
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Price display formatting and parsing

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;

//! Driftwood Storefront library.
//!
//! This crate provides the storefront functionality as a library: a Shopify
//! Storefront API client that flattens catalog payloads into UI-ready
//! products, plus the persisted client-side state (cart, favorites,
//! recently viewed) that page-level UI consumes.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod persist;
pub mod services;
pub mod shopify;
pub mod state;
pub mod stores;
pub mod telemetry;

//! Core types for Driftwood.
//!
//! This module provides shared domain helpers with no I/O dependencies.

pub mod price;

pub use price::{format_display_price, parse_display_price};

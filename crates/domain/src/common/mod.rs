//! Common utility functions shared across the domain and the engine.
//!
//! - **Pure functions only** - no side effects, no I/O
//! - **WASM compatible** - all code must work in both native and WASM targets

pub mod datetime;
pub mod string;

pub use datetime::{format_timestamp, parse_datetime, parse_datetime_or};
pub use string::{none_if_empty, StringExt};

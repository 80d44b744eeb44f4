//! Infrastructure implementations.
//!
//! Port traits for the host boundary plus the adapters and utilities the
//! sheet runs on.

pub mod clock;
pub mod debounce;
pub mod logging;
pub mod memory_blob;
pub mod notifier;
pub mod ports;
pub mod settings;

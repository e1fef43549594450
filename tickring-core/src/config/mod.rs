//! Configuration types
//!
//! Board-agnostic configuration structures, stored either as TOML text or
//! as postcard binary data.

pub mod types;

pub use types::*;

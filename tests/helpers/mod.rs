//! Test helper modules
//!
//! Shared builders for Telegram objects used across integration tests.

pub mod test_data;

pub use test_data::*;

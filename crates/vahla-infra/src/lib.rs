//! Infrastructure layer for VAHLA.
//!
//! Contains implementations of the storage traits defined in `vahla-core`:
//! SQLite persistence for the cart draft and the HTTP client for the
//! community registry, plus configuration loading.

pub mod community;
pub mod config;
pub mod sqlite;

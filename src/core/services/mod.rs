//! External services integration
//!
//! This module contains integrations with external APIs and services:
//! - Song details client used to enrich newly created songs
//! - Stub details server for local runs and tests

pub mod lookup;
pub mod stub;

// Re-export main types
pub use lookup::LookupClient;

//! Command Line Interface module
//!
//! - `serve`: run the HTTP API (optionally with the stub details service)
//! - `songs`: add, list, verses, update and delete against the local store
//! - `stub`: run only the stub details service
//! - `config`: inspect configuration

pub mod config;
pub mod serve;
pub mod songs;
pub mod stub;

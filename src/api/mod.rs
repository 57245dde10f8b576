//! HTTP transport for the catalog
//!
//! - `server`: router, middleware and the serve loop
//! - `handlers`: request decoding and catalog calls
//! - `response`: the `{"status": ...}` envelope and error mapping

pub mod handlers;
pub mod response;
pub mod server;

pub use server::run;

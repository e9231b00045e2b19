//! HTTP server for the portal API

pub mod http;

pub use http::{run, AppState};

//! Stylus Portal - submissions aggregation API
//!
//! Backs the learning portal's submissions/leaderboard view by reconciling
//! user progress and certification state across the portal's MongoDB
//! collections and the SQLite challenge ledger.
//!
//! ## Services
//!
//! - **Submissions**: cross-source aggregation, statistics, and pagination
//! - **Health**: liveness/readiness probes and build version info

pub mod config;
pub mod db;
pub mod routes;
pub mod server;
pub mod submissions;
pub mod types;

pub use config::Args;
pub use server::{run, AppState};
pub use types::{PortalError, Result};

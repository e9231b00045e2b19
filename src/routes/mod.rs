//! HTTP routes for the portal API

pub mod health;
pub mod submissions;

pub use health::{health_check, readiness_check, version_info};
pub use submissions::handle_submissions;

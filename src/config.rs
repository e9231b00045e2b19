//! Configuration for the portal API
//!
//! CLI arguments and environment variable handling using clap.

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use uuid::Uuid;

/// Stylus Portal - submissions aggregation API
#[derive(Parser, Debug, Clone)]
#[command(name = "stylus-portal")]
#[command(about = "Submissions aggregation API for the Stylus learning portal")]
pub struct Args {
    /// Unique node identifier for this API instance
    #[arg(long, env = "NODE_ID", default_value_t = Uuid::new_v4())]
    pub node_id: Uuid,

    /// Address to listen on
    #[arg(long, env = "LISTEN", default_value = "0.0.0.0:8080")]
    pub listen: SocketAddr,

    /// MongoDB connection URI (foundation/advocate/progress/mint collections)
    #[arg(long, env = "MONGODB_URI", default_value = "mongodb://localhost:27017")]
    pub mongodb_uri: String,

    /// MongoDB database name
    #[arg(long, env = "MONGODB_DB", default_value = "stylus_portal")]
    pub mongodb_db: String,

    /// Path to the SQLite challenge ledger database
    #[arg(long, env = "CHALLENGE_DB", default_value = "challenges.db")]
    pub challenge_db: PathBuf,

    /// Page size for the submissions listing
    #[arg(long, env = "PAGE_SIZE", default_value_t = crate::submissions::DEFAULT_PAGE_SIZE)]
    pub page_size: usize,

    /// Cache-Control max-age in seconds for the submissions response
    #[arg(long, env = "CACHE_MAX_AGE_SECS", default_value = "30")]
    pub cache_max_age_secs: u64,

    /// Enable development mode (MongoDB connection becomes optional)
    #[arg(long, env = "DEV_MODE", default_value = "false")]
    pub dev_mode: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.page_size == 0 {
            return Err("PAGE_SIZE must be at least 1".to_string());
        }

        if self.mongodb_db.is_empty() {
            return Err("MONGODB_DB must not be empty".to_string());
        }

        Ok(())
    }
}

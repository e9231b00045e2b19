//! SQLite challenge ledger reader
//!
//! The review tooling writes one row per `(user_address, challenge_id)`
//! submission into `challenge_submissions`. This reader pulls the accepted
//! rows grouped per user. Connections are opened read-only per fetch on the
//! blocking pool; the ledger file lives on shared storage and is less
//! reliable than MongoDB in this deployment, so callers treat failures as a
//! degraded (empty) contribution.

use rusqlite::Connection;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::types::PortalError;

/// Accepted challenge submissions for one user
#[derive(Debug, Clone, PartialEq)]
pub struct AcceptedChallenges {
    /// Canonical (lower-cased) user address
    pub user_address: String,
    /// Number of distinct accepted challenge ids
    pub challenge_count: i64,
    /// Unix timestamp of the most recent accepted submission
    pub latest_submission: i64,
}

/// Read-only handle to the challenge ledger database
#[derive(Debug, Clone)]
pub struct ChallengeLedger {
    db_path: PathBuf,
}

impl ChallengeLedger {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Fetch accepted submissions grouped per user
    ///
    /// Addresses are lower-cased inside the query so mixed-case rows for the
    /// same wallet collapse into one group.
    pub async fn accepted_by_user(&self) -> Result<Vec<AcceptedChallenges>, PortalError> {
        let path = self.db_path.clone();
        tokio::task::spawn_blocking(move || read_accepted(&path))
            .await
            .map_err(|e| PortalError::Ledger(format!("Ledger read task failed: {}", e)))?
    }
}

fn read_accepted(path: &Path) -> Result<Vec<AcceptedChallenges>, PortalError> {
    if !path.exists() {
        return Err(PortalError::Ledger(format!(
            "Challenge ledger not found at {}",
            path.display()
        )));
    }

    let conn = Connection::open(path).map_err(ledger_err)?;

    // Read-only mode to avoid taking write locks on the shared file
    conn.execute("PRAGMA query_only = ON", []).map_err(ledger_err)?;

    let mut stmt = conn
        .prepare(
            "SELECT LOWER(TRIM(user_address)),
                    COUNT(DISTINCT challenge_id),
                    MAX(submitted_at)
             FROM challenge_submissions
             WHERE review_status = 'accepted'
               AND user_address IS NOT NULL
               AND TRIM(user_address) != ''
             GROUP BY LOWER(TRIM(user_address))
             ORDER BY LOWER(TRIM(user_address)) ASC",
        )
        .map_err(ledger_err)?;

    let rows = stmt
        .query_map([], |row| {
            Ok(AcceptedChallenges {
                user_address: row.get(0)?,
                challenge_count: row.get(1)?,
                latest_submission: row.get(2)?,
            })
        })
        .map_err(ledger_err)?;

    let mut accepted = Vec::new();
    for row in rows {
        accepted.push(row.map_err(ledger_err)?);
    }

    debug!("Ledger read: {} user(s) with accepted challenges", accepted.len());

    Ok(accepted)
}

fn ledger_err(e: rusqlite::Error) -> PortalError {
    PortalError::Ledger(format!("Database error: {}", e))
}

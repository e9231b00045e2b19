//! Store clients for the portal API
//!
//! MongoDB holds the portal-owned collections (foundation submissions,
//! advocate applications, per-user progress, NFT mints). The challenge
//! ledger lives in a separate SQLite database written by the review tooling.
//! This service only ever reads from both.

pub mod ledger;
pub mod mongo;
pub mod schemas;

pub use ledger::{AcceptedChallenges, ChallengeLedger};
pub use mongo::MongoClient;

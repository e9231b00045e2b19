//! Foundation submission document schema
//!
//! One document per user who submitted the Stylus Foundation track; existence
//! of the document implies participation.

use bson::{oid::ObjectId, Bson};
use serde::{Deserialize, Serialize};

/// Collection name for foundation submissions
pub const FOUNDATION_COLLECTION: &str = "foundation_submissions";

/// Foundation submission document stored in MongoDB
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct FoundationDoc {
    /// MongoDB document ID
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// Wallet address of the submitter (raw casing as stored)
    #[serde(default)]
    pub user_address: Option<String>,

    /// GitHub repository of the submitted project
    #[serde(default)]
    pub github_repo: Option<String>,

    /// Deployed contract address on testnet
    #[serde(default)]
    pub contract_address: Option<String>,

    /// Raw certification value (array or single object across document
    /// generations)
    #[serde(default)]
    pub certification: Option<Bson>,

    /// Submission timestamp
    #[serde(default)]
    pub submitted_at: Option<bson::DateTime>,
}

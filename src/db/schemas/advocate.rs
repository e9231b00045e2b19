//! Advocate application document schema

use bson::{oid::ObjectId, Bson};
use serde::{Deserialize, Serialize};

/// Collection name for advocate applications
pub const ADVOCATE_COLLECTION: &str = "advocate_applications";

/// Advocate application document stored in MongoDB
///
/// Only applications with `isEligible == true` count as completions; the
/// adapter filters at the store, so ineligible advocates never enter the
/// aggregation at all.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct AdvocateDoc {
    /// MongoDB document ID
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// Wallet address of the applicant (raw casing as stored)
    #[serde(default)]
    pub user_address: Option<String>,

    /// Set by the review flow once the application passes
    #[serde(default)]
    pub is_eligible: bool,

    /// Social handle submitted with the application
    #[serde(default)]
    pub twitter_handle: Option<String>,

    /// Raw certification value (array or single object)
    #[serde(default)]
    pub certification: Option<Bson>,
}

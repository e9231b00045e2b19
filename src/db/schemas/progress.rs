//! Per-user module progress document schema

use bson::{oid::ObjectId, Bson};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Collection name for per-user module progress
pub const PROGRESS_COLLECTION: &str = "user_progress";

/// One user's progress across all learning modules
///
/// The `modules` map is keyed by module id string. Keys outside the
/// `ModuleId::PROGRESS_MODULES` whitelist (retired or experimental modules)
/// are ignored by the adapter.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserProgressDoc {
    /// MongoDB document ID
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// Wallet address (raw casing as stored)
    #[serde(default)]
    pub user_address: Option<String>,

    /// Per-module progress, keyed by module id
    #[serde(default)]
    pub modules: HashMap<String, ModuleProgress>,
}

/// Progress within a single module
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ModuleProgress {
    #[serde(default)]
    pub is_completed: bool,

    /// Chapter ids the user has finished
    #[serde(default)]
    pub completed_chapters: Vec<String>,

    /// Raw certification value (array or single object)
    #[serde(default)]
    pub certification: Option<Bson>,
}

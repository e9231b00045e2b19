//! Normalized completion records
//!
//! `CompletionRecord` is the common shape every source adapter maps into: one
//! record per "user X completed module Y via source Z" fact.

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::submissions::modules::ModuleId;

/// Which store a completion record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Foundation,
    Advocate,
    ModuleProgress,
    ChallengeLedger,
}

impl SourceKind {
    /// Declared merge precedence. The aggregation engine iterates sources in
    /// this order regardless of fetch completion order; first-seen wins when
    /// seeding per-user summaries.
    pub const PRECEDENCE: [SourceKind; 4] = [
        SourceKind::Foundation,
        SourceKind::Advocate,
        SourceKind::ModuleProgress,
        SourceKind::ChallengeLedger,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Foundation => "foundation",
            SourceKind::Advocate => "advocate",
            SourceKind::ModuleProgress => "module-progress",
            SourceKind::ChallengeLedger => "challenge-ledger",
        }
    }

    /// The `type` tag exposed in the submissions listing. Both the progress
    /// and ledger tracks surface as `module` entries to the UI.
    pub fn submission_type(&self) -> &'static str {
        match self {
            SourceKind::Foundation => "foundation",
            SourceKind::Advocate => "advocate",
            SourceKind::ModuleProgress | SourceKind::ChallengeLedger => "module",
        }
    }

    fn serialize_type<S: Serializer>(kind: &SourceKind, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(kind.submission_type())
    }
}

/// Proof that a user claimed/minted a badge for a completed module
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Certification {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_hash: Option<String>,
    /// Whether the badge has been minted on-chain (as opposed to merely
    /// eligible/completed)
    pub claimed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minted_at: Option<String>,
}

/// One normalized "user completed something" fact
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionRecord {
    /// Canonical (lower-cased) user address
    pub user_address: String,
    #[serde(rename = "type", serialize_with = "SourceKind::serialize_type")]
    pub source: SourceKind,
    pub module_id: ModuleId,
    pub module_name: &'static str,
    pub is_completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certification: Option<Certification>,
    /// Source-specific fields (github repo, contract address, chapter counts,
    /// challenge counts)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CompletionRecord {
    /// Build a completed record with no source-specific extras
    pub fn new(user_address: String, source: SourceKind, module_id: ModuleId) -> Self {
        Self {
            user_address,
            source,
            module_id,
            module_name: module_id.display_name(),
            is_completed: true,
            certification: None,
            extra: Map::new(),
        }
    }

    pub fn with_certification(mut self, certification: Option<Certification>) -> Self {
        self.certification = certification;
        self
    }

    pub fn with_extra(mut self, key: &str, value: Value) -> Self {
        self.extra.insert(key.to_string(), value);
        self
    }

    /// Whether this record carries an on-chain minted badge
    pub fn has_claimed_certification(&self) -> bool {
        self.certification.as_ref().is_some_and(|c| c.claimed)
    }
}

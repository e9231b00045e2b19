//! Module identity
//!
//! One authoritative enumeration of every module the portal tracks, replacing
//! the ad-hoc string lists that used to be duplicated per call site. Adapters
//! and the filter layer consume this table instead of hard-coding ids.

use serde::{Serialize, Serializer};
use std::fmt;

/// A named learning unit a user can complete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ModuleId {
    /// Foundation submission track (one synthetic module)
    StylusFoundation,
    /// Advocate program (one synthetic module)
    XcanAdvocate,
    /// Challenge-ledger track (one synthetic module per user)
    ArbitrumStylus,
    // Progress-tracked learning modules
    StylusIntro,
    RustBasics,
    StylusContracts,
    StylusAdvanced,
    ZkFundamentals,
}

impl ModuleId {
    /// Every module the portal tracks, in display order
    pub const ALL: [ModuleId; 8] = [
        ModuleId::StylusFoundation,
        ModuleId::XcanAdvocate,
        ModuleId::ArbitrumStylus,
        ModuleId::StylusIntro,
        ModuleId::RustBasics,
        ModuleId::StylusContracts,
        ModuleId::StylusAdvanced,
        ModuleId::ZkFundamentals,
    ];

    /// Whitelist of module ids tracked by per-user progress documents
    pub const PROGRESS_MODULES: [ModuleId; 5] = [
        ModuleId::StylusIntro,
        ModuleId::RustBasics,
        ModuleId::StylusContracts,
        ModuleId::StylusAdvanced,
        ModuleId::ZkFundamentals,
    ];

    /// Stable identifier used in stored documents and query params
    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleId::StylusFoundation => "stylus-foundation",
            ModuleId::XcanAdvocate => "xcan-advocate",
            ModuleId::ArbitrumStylus => "arbitrum-stylus",
            ModuleId::StylusIntro => "stylus-intro",
            ModuleId::RustBasics => "rust-basics",
            ModuleId::StylusContracts => "stylus-contracts",
            ModuleId::StylusAdvanced => "stylus-advanced",
            ModuleId::ZkFundamentals => "zk-fundamentals",
        }
    }

    /// Human-readable name for dashboards
    pub fn display_name(&self) -> &'static str {
        match self {
            ModuleId::StylusFoundation => "Stylus Foundation",
            ModuleId::XcanAdvocate => "xCAN Advocate",
            ModuleId::ArbitrumStylus => "Arbitrum Stylus",
            ModuleId::StylusIntro => "Intro to Stylus",
            ModuleId::RustBasics => "Rust Basics",
            ModuleId::StylusContracts => "Stylus Smart Contracts",
            ModuleId::StylusAdvanced => "Advanced Stylus",
            ModuleId::ZkFundamentals => "ZK Fundamentals",
        }
    }

    /// Parse a stored/query module id. Unknown ids are `None` (treated as
    /// "no matches" downstream, never an error).
    pub fn parse(s: &str) -> Option<ModuleId> {
        ModuleId::ALL.iter().copied().find(|m| m.as_str() == s)
    }

    /// Whether this id is tracked by per-user progress documents
    pub fn is_progress_module(&self) -> bool {
        ModuleId::PROGRESS_MODULES.contains(self)
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ModuleId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

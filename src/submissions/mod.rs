//! Cross-source submission aggregation
//!
//! The engine behind the portal's submissions/leaderboard view. Adapters fan
//! out to the backing stores concurrently, records are normalized and
//! certification-resolved at the boundary, and a purely computational merge
//! produces the per-user and per-module views, summary statistics, and the
//! paginated listing. Everything here is request-scoped; nothing is cached
//! or persisted.

pub mod aggregate;
pub mod certification;
pub mod modules;
pub mod normalize;
pub mod paginate;
pub mod record;
pub mod sources;
pub mod stats;

pub use aggregate::{aggregate, Aggregation, ModuleUserCount, UserModuleSummary};
pub use modules::ModuleId;
pub use normalize::normalize_address;
pub use paginate::{paginate, ModuleFilter, Pagination, DEFAULT_PAGE_SIZE};
pub use record::{Certification, CompletionRecord, SourceKind};
pub use sources::{MintedNft, SourceFetch, SubmissionSources};
pub use stats::{NftBreakdown, Stats};

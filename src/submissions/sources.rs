//! Source adapters
//!
//! One adapter per backing store, each mapping raw records into the common
//! `CompletionRecord` shape. Normalization and certification resolution
//! happen here, at the boundary, and nowhere else.
//!
//! Failure policy: the MongoDB collections are primary sources and their
//! failures are fatal for the request. The challenge ledger is the flaky one
//! in this deployment, so its failure degrades to an empty contribution.

use bson::doc;
use serde_json::json;
use tracing::warn;

use crate::db::schemas::{
    AdvocateDoc, FoundationDoc, NftMintDoc, UserProgressDoc, ADVOCATE_COLLECTION,
    FOUNDATION_COLLECTION, NFT_MINT_COLLECTION, PROGRESS_COLLECTION,
};
use crate::db::{AcceptedChallenges, ChallengeLedger, MongoClient};
use crate::submissions::certification;
use crate::submissions::modules::ModuleId;
use crate::submissions::normalize::normalize_address;
use crate::submissions::record::{Certification, CompletionRecord, SourceKind};
use crate::types::Result;

/// One entry from the minted-NFT side table, keyed by canonical address
#[derive(Debug, Clone)]
pub struct MintedNft {
    pub user_address: String,
    pub level: Option<i64>,
    pub level_name: Option<String>,
    pub transaction_hash: Option<String>,
    pub minted_at: Option<String>,
}

/// Fully-collected adapter output for one request
#[derive(Debug, Default)]
pub struct SourceFetch {
    /// Completion records from all four sources, in declared precedence order
    pub records: Vec<CompletionRecord>,
    /// Minted-NFT side table (consumed by the statistics calculator)
    pub mints: Vec<MintedNft>,
}

/// Request-scoped handle over all backing stores
pub struct SubmissionSources {
    mongo: MongoClient,
    ledger: ChallengeLedger,
}

impl SubmissionSources {
    pub fn new(mongo: MongoClient, ledger: ChallengeLedger) -> Self {
        Self { mongo, ledger }
    }

    /// Fan out to every store concurrently, then collect fully.
    ///
    /// The returned `records` are ordered by `SourceKind::PRECEDENCE`, never
    /// by fetch completion order; the aggregation engine depends on that.
    pub async fn fetch_all(&self) -> Result<SourceFetch> {
        let (foundation, advocates, progress, mint_docs, ledger_rows) = tokio::join!(
            self.mongo
                .find_many::<FoundationDoc>(FOUNDATION_COLLECTION, doc! {}),
            self.mongo
                .find_many::<AdvocateDoc>(ADVOCATE_COLLECTION, doc! { "isEligible": true }),
            self.mongo
                .find_many::<UserProgressDoc>(PROGRESS_COLLECTION, doc! {}),
            self.mongo
                .find_many::<NftMintDoc>(NFT_MINT_COLLECTION, doc! {}),
            fetch_accepted_or_empty(&self.ledger),
        );

        let foundation = foundation?;
        let advocates = advocates?;
        let progress = progress?;
        let mints: Vec<MintedNft> = mint_docs?.iter().filter_map(mint_entry).collect();

        let mut records = Vec::new();
        records.extend(foundation.iter().filter_map(foundation_record));
        records.extend(advocates.iter().filter_map(advocate_record));
        for doc in &progress {
            records.extend(progress_records(doc));
        }
        records.extend(
            ledger_rows
                .iter()
                .filter_map(|row| ledger_record(row, &mints)),
        );

        Ok(SourceFetch { records, mints })
    }
}

/// Ledger fetch with graceful degradation: on failure the request proceeds
/// with an empty ledger contribution instead of surfacing a 500.
pub async fn fetch_accepted_or_empty(ledger: &ChallengeLedger) -> Vec<AcceptedChallenges> {
    match ledger.accepted_by_user().await {
        Ok(rows) => rows,
        Err(e) => {
            warn!("Challenge ledger unavailable, degrading to empty contribution: {}", e);
            Vec::new()
        }
    }
}

/// Foundation adapter: existence of the document implies participation
pub fn foundation_record(doc: &FoundationDoc) -> Option<CompletionRecord> {
    let address = normalize_address(doc.user_address.as_deref()?)?;
    let cert = doc.certification.as_ref().and_then(certification::resolve);

    let mut record = CompletionRecord::new(address, SourceKind::Foundation, ModuleId::StylusFoundation)
        .with_certification(cert);
    if let Some(ref repo) = doc.github_repo {
        record = record.with_extra("githubRepo", json!(repo));
    }
    if let Some(ref contract) = doc.contract_address {
        record = record.with_extra("contractAddress", json!(contract));
    }
    if let Some(submitted_at) = doc.submitted_at {
        if let Ok(ts) = submitted_at.try_to_rfc3339_string() {
            record = record.with_extra("submittedAt", json!(ts));
        }
    }
    Some(record)
}

/// Advocate adapter: eligible applications only
pub fn advocate_record(doc: &AdvocateDoc) -> Option<CompletionRecord> {
    if !doc.is_eligible {
        return None;
    }
    let address = normalize_address(doc.user_address.as_deref()?)?;
    let cert = doc.certification.as_ref().and_then(certification::resolve);

    let mut record = CompletionRecord::new(address, SourceKind::Advocate, ModuleId::XcanAdvocate)
        .with_certification(cert);
    if let Some(ref handle) = doc.twitter_handle {
        record = record.with_extra("twitterHandle", json!(handle));
    }
    Some(record)
}

/// Module-progress adapter: one record per completed whitelisted module
pub fn progress_records(doc: &UserProgressDoc) -> Vec<CompletionRecord> {
    let Some(address) = doc
        .user_address
        .as_deref()
        .and_then(normalize_address)
    else {
        return Vec::new();
    };

    let mut records = Vec::new();
    // Iterate the whitelist, not the stored map, for deterministic output
    for module in ModuleId::PROGRESS_MODULES {
        let Some(progress) = doc.modules.get(module.as_str()) else {
            continue;
        };
        if !progress.is_completed {
            continue;
        }
        let cert = progress.certification.as_ref().and_then(certification::resolve);
        records.push(
            CompletionRecord::new(address.clone(), SourceKind::ModuleProgress, module)
                .with_certification(cert)
                .with_extra(
                    "completedChapters",
                    json!(progress.completed_chapters.len()),
                ),
        );
    }
    records
}

/// Challenge-ledger adapter: one synthetic record per user. The certification
/// comes from the minted-NFT side table since the ledger itself knows nothing
/// about badges.
pub fn ledger_record(row: &AcceptedChallenges, mints: &[MintedNft]) -> Option<CompletionRecord> {
    let address = normalize_address(&row.user_address)?;
    if row.challenge_count == 0 {
        return None;
    }

    let cert = mints
        .iter()
        .find(|m| m.user_address == address)
        .map(|m| Certification {
            level: m.level,
            level_name: m.level_name.clone(),
            transaction_hash: m.transaction_hash.clone(),
            claimed: true,
            minted_at: m.minted_at.clone(),
        });

    Some(
        CompletionRecord::new(address, SourceKind::ChallengeLedger, ModuleId::ArbitrumStylus)
            .with_certification(cert)
            .with_extra("challengesCompleted", json!(row.challenge_count))
            .with_extra("latestSubmission", json!(row.latest_submission)),
    )
}

/// NFT-mint adapter: normalize the side table entries
pub fn mint_entry(doc: &NftMintDoc) -> Option<MintedNft> {
    let address = normalize_address(doc.user_address.as_deref()?)?;
    Some(MintedNft {
        user_address: address,
        level: doc.level,
        level_name: doc.level_name.clone(),
        transaction_hash: doc.transaction_hash.clone(),
        minted_at: doc
            .minted_at
            .and_then(|dt| dt.try_to_rfc3339_string().ok()),
    })
}

//! Aggregation engine
//!
//! Merges adapter outputs into three views: the flat per-source list the
//! pagination layer slices, per-module record groupings, and de-duplicated
//! per-user module summaries.
//!
//! Merge precedence is the declared `SourceKind::PRECEDENCE` list, never the
//! fetch completion order or any map iteration order. The per-user module set
//! uses idempotent adds, so a user reported by several sources for the same
//! module is counted once.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::submissions::modules::ModuleId;
use crate::submissions::record::{CompletionRecord, SourceKind};

/// De-duplicated per-user summary
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserModuleSummary {
    pub user_address: String,
    pub module_count: usize,
    pub modules: BTreeSet<ModuleId>,
}

/// Distinct-user count for one module
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ModuleUserCount {
    pub module_id: ModuleId,
    pub module_name: &'static str,
    pub user_count: usize,
}

/// The three merged views over one request's records
#[derive(Debug)]
pub struct Aggregation {
    /// Raw per-source completion list in precedence order. Intentionally not
    /// deduplicated across sources: a user legitimately appears once per
    /// module/source here. Pagination input.
    pub flat: Vec<CompletionRecord>,
    /// Completed records grouped per module
    pub by_module: BTreeMap<ModuleId, Vec<CompletionRecord>>,
    /// Per-user summaries, sorted desc by module count (address asc on ties)
    pub by_user: Vec<UserModuleSummary>,
    /// Per-module distinct-user counts, sorted desc (module id asc on ties)
    pub module_user_counts: Vec<ModuleUserCount>,
}

/// Merge adapter outputs into the three views
pub fn aggregate(records: &[CompletionRecord]) -> Aggregation {
    // Per-user merged module sets, idempotent add in precedence order
    let mut merged: BTreeMap<&str, BTreeSet<ModuleId>> = BTreeMap::new();
    for kind in SourceKind::PRECEDENCE {
        for record in completed_from(records, kind) {
            merged
                .entry(record.user_address.as_str())
                .or_default()
                .insert(record.module_id);
        }
    }

    let mut by_user: Vec<UserModuleSummary> = merged
        .into_iter()
        .map(|(address, modules)| UserModuleSummary {
            user_address: address.to_string(),
            module_count: modules.len(),
            modules,
        })
        .collect();
    by_user.sort_by(|a, b| {
        b.module_count
            .cmp(&a.module_count)
            .then_with(|| a.user_address.cmp(&b.user_address))
    });

    // Flat list and per-module groupings, both in precedence order
    let mut flat = Vec::with_capacity(records.len());
    let mut by_module: BTreeMap<ModuleId, Vec<CompletionRecord>> = BTreeMap::new();
    for kind in SourceKind::PRECEDENCE {
        for record in completed_from(records, kind) {
            flat.push(record.clone());
            by_module
                .entry(record.module_id)
                .or_default()
                .push(record.clone());
        }
    }

    // Distinct users per module, over the merged per-user sets
    let mut module_user_counts: Vec<ModuleUserCount> = ModuleId::ALL
        .iter()
        .map(|&module| ModuleUserCount {
            module_id: module,
            module_name: module.display_name(),
            user_count: by_user.iter().filter(|u| u.modules.contains(&module)).count(),
        })
        .collect();
    module_user_counts.sort_by(|a, b| {
        b.user_count
            .cmp(&a.user_count)
            .then_with(|| a.module_id.cmp(&b.module_id))
    });

    Aggregation {
        flat,
        by_module,
        by_user,
        module_user_counts,
    }
}

fn completed_from(
    records: &[CompletionRecord],
    kind: SourceKind,
) -> impl Iterator<Item = &CompletionRecord> {
    records
        .iter()
        .filter(move |r| r.source == kind && r.is_completed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn record(address: &str, source: SourceKind, module: ModuleId) -> CompletionRecord {
        CompletionRecord::new(address.to_string(), source, module)
    }

    #[test]
    fn test_same_module_from_two_sources_counts_once() {
        // Foundation and progress both report stylus-foundation for one user
        let records = vec![
            record("0xaaa", SourceKind::Foundation, ModuleId::StylusFoundation),
            record("0xaaa", SourceKind::ModuleProgress, ModuleId::StylusFoundation),
        ];

        let agg = aggregate(&records);
        assert_eq!(agg.by_user.len(), 1);
        assert_eq!(agg.by_user[0].module_count, 1);
        // Flat is intentionally not deduplicated
        assert_eq!(agg.flat.len(), 2);
    }

    #[test]
    fn test_mixed_case_inputs_merge_into_one_user() {
        // Two adapters saw the same wallet with different casing; both
        // normalize at the boundary, so the merge sees one canonical key
        let foundation = crate::submissions::sources::foundation_record(
            &crate::db::schemas::FoundationDoc {
                user_address: Some("0xABCdef".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
        let advocate = crate::submissions::sources::advocate_record(
            &crate::db::schemas::AdvocateDoc {
                user_address: Some("0xabcDEF".to_string()),
                is_eligible: true,
                ..Default::default()
            },
        )
        .unwrap();

        let agg = aggregate(&[foundation, advocate]);
        assert_eq!(agg.by_user.len(), 1);
        assert_eq!(agg.by_user[0].user_address, "0xabcdef");
        assert_eq!(agg.by_user[0].module_count, 2);
    }

    #[test]
    fn test_distinct_modules_from_two_sources_count_twice() {
        let records = vec![
            record("0xaaa", SourceKind::Foundation, ModuleId::StylusFoundation),
            record("0xaaa", SourceKind::ModuleProgress, ModuleId::RustBasics),
        ];

        let agg = aggregate(&records);
        assert_eq!(agg.by_user.len(), 1);
        assert_eq!(agg.by_user[0].module_count, 2);
    }

    #[test]
    fn test_module_count_matches_module_set_size() {
        let records = vec![
            record("0xaaa", SourceKind::Foundation, ModuleId::StylusFoundation),
            record("0xaaa", SourceKind::Advocate, ModuleId::XcanAdvocate),
            record("0xaaa", SourceKind::ModuleProgress, ModuleId::RustBasics),
            record("0xaaa", SourceKind::ChallengeLedger, ModuleId::ArbitrumStylus),
            record("0xbbb", SourceKind::ModuleProgress, ModuleId::RustBasics),
        ];

        let agg = aggregate(&records);
        for summary in &agg.by_user {
            assert_eq!(summary.module_count, summary.modules.len());
        }
    }

    #[test]
    fn test_incomplete_records_are_excluded_everywhere() {
        let mut incomplete = record("0xaaa", SourceKind::ModuleProgress, ModuleId::RustBasics);
        incomplete.is_completed = false;
        let records = vec![
            incomplete,
            record("0xbbb", SourceKind::ModuleProgress, ModuleId::RustBasics),
        ];

        let agg = aggregate(&records);
        assert_eq!(agg.flat.len(), 1);
        assert_eq!(agg.by_user.len(), 1);
        let rust_basics = agg
            .module_user_counts
            .iter()
            .find(|c| c.module_id == ModuleId::RustBasics)
            .unwrap();
        assert_eq!(rust_basics.user_count, 1);
    }

    #[test]
    fn test_result_is_independent_of_input_order() {
        let records = vec![
            record("0xaaa", SourceKind::Foundation, ModuleId::StylusFoundation),
            record("0xbbb", SourceKind::Advocate, ModuleId::XcanAdvocate),
            record("0xaaa", SourceKind::ModuleProgress, ModuleId::RustBasics),
            record("0xccc", SourceKind::ChallengeLedger, ModuleId::ArbitrumStylus),
            record("0xbbb", SourceKind::ModuleProgress, ModuleId::StylusContracts),
        ];
        let mut reversed = records.clone();
        reversed.reverse();

        let a = aggregate(&records);
        let b = aggregate(&reversed);

        assert_eq!(a.by_user, b.by_user);
        assert_eq!(a.module_user_counts, b.module_user_counts);
        assert_eq!(a.flat.len(), b.flat.len());
        // Flat order is precedence order, not input order
        let order_a: Vec<&str> = a.flat.iter().map(|r| r.source.as_str()).collect();
        let order_b: Vec<&str> = b.flat.iter().map(|r| r.source.as_str()).collect();
        assert_eq!(order_a, order_b);
    }

    #[test]
    fn test_module_user_counts_agree_with_direct_counting() {
        let records = vec![
            record("0xaaa", SourceKind::Foundation, ModuleId::StylusFoundation),
            record("0xbbb", SourceKind::Foundation, ModuleId::StylusFoundation),
            record("0xaaa", SourceKind::ModuleProgress, ModuleId::StylusFoundation),
            record("0xaaa", SourceKind::ModuleProgress, ModuleId::RustBasics),
        ];

        let agg = aggregate(&records);
        for count in &agg.module_user_counts {
            let direct: HashSet<&str> = records
                .iter()
                .filter(|r| r.is_completed && r.module_id == count.module_id)
                .map(|r| r.user_address.as_str())
                .collect();
            assert_eq!(count.user_count, direct.len(), "module {}", count.module_id);
        }
    }

    #[test]
    fn test_user_summaries_sorted_desc_by_module_count() {
        let records = vec![
            record("0xccc", SourceKind::ModuleProgress, ModuleId::RustBasics),
            record("0xaaa", SourceKind::Foundation, ModuleId::StylusFoundation),
            record("0xaaa", SourceKind::ModuleProgress, ModuleId::RustBasics),
        ];

        let agg = aggregate(&records);
        assert_eq!(agg.by_user[0].user_address, "0xaaa");
        assert_eq!(agg.by_user[0].module_count, 2);
        assert_eq!(agg.by_user[1].user_address, "0xccc");
    }

    #[test]
    fn test_empty_input_yields_empty_views() {
        let agg = aggregate(&[]);
        assert!(agg.flat.is_empty());
        assert!(agg.by_user.is_empty());
        assert!(agg.by_module.is_empty());
        assert!(agg.module_user_counts.iter().all(|c| c.user_count == 0));
    }
}

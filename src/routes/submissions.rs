//! Submissions endpoint
//!
//! `GET /submissions?module=<id|all>&page=<n>` - the aggregated,
//! de-duplicated submissions/leaderboard view. The whole pipeline is
//! recomputed from the stores on every call; the response carries a short
//! Cache-Control TTL so the HTTP layer can absorb repeat traffic.

use bytes::Bytes;
use http_body_util::Full;
use hyper::{Response, StatusCode};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{error, info};

use crate::server::AppState;
use crate::submissions::{
    aggregate, stats, CompletionRecord, ModuleFilter, ModuleId, ModuleUserCount, Pagination,
    Stats, SubmissionSources, UserModuleSummary,
};

/// Full response envelope for the submissions view
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionsResponse {
    pub success: bool,
    /// Paginated, filtered flat listing
    pub submissions: Vec<CompletionRecord>,
    pub submissions_by_module: BTreeMap<ModuleId, Vec<CompletionRecord>>,
    pub total_submissions: i64,
    pub unique_users: usize,
    /// Sorted desc by module count
    pub user_module_counts: Vec<UserModuleSummary>,
    /// Sorted desc by user count
    pub module_user_counts: Vec<ModuleUserCount>,
    pub pagination: Pagination,
    pub stats: Stats,
}

/// Fixed error envelope for unrecoverable failures
#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: &'static str,
}

/// Parsed query parameters
#[derive(Debug, PartialEq)]
pub struct SubmissionsQuery {
    pub module: Option<String>,
    pub page: usize,
}

/// Parse the raw query string. Unparseable page values fall back to page 1;
/// page 0 stays 0 and yields an empty page downstream.
pub fn parse_query(query: Option<&str>) -> SubmissionsQuery {
    let mut module = None;
    let mut page = 1usize;

    for pair in query.unwrap_or("").split('&') {
        let Some((key, value)) = pair.split_once('=') else {
            continue;
        };
        match key {
            "module" => module = Some(value.to_string()),
            "page" => page = value.parse().unwrap_or(1),
            _ => {}
        }
    }

    SubmissionsQuery { module, page }
}

/// Handle the submissions request
pub async fn handle_submissions(state: Arc<AppState>, query: Option<&str>) -> Response<Full<Bytes>> {
    let Some(ref mongo) = state.mongo else {
        error!("Submissions request with no document store connection");
        return error_response();
    };

    let sources = SubmissionSources::new(mongo.clone(), state.ledger.clone());
    let fetch = match sources.fetch_all().await {
        Ok(fetch) => fetch,
        Err(e) => {
            // Document-store failure is fatal; the ledger already degraded
            // inside the adapter if it was the problem
            error!("Submissions fetch failed: {}", e);
            return error_response();
        }
    };

    let query = parse_query(query);
    let filter = ModuleFilter::from_param(query.module.as_deref());

    let agg = aggregate(&fetch.records);
    let stats = stats::compute(&agg, &fetch.mints);
    let (items, pagination) = paginate_page(&state, &agg.flat, &filter, query.page);

    info!(
        records = agg.flat.len(),
        users = agg.by_user.len(),
        page = query.page,
        "Submissions view computed"
    );

    let response = SubmissionsResponse {
        success: true,
        submissions: items,
        submissions_by_module: agg.by_module,
        total_submissions: stats.total_submissions(),
        unique_users: agg.by_user.len(),
        user_module_counts: agg.by_user,
        module_user_counts: agg.module_user_counts,
        pagination,
        stats,
    };

    match serde_json::to_string(&response) {
        Ok(body) => {
            let max_age = state.args.cache_max_age_secs;
            Response::builder()
                .status(StatusCode::OK)
                .header("Content-Type", "application/json")
                .header("Access-Control-Allow-Origin", "*")
                .header(
                    "Cache-Control",
                    format!("public, max-age={}, stale-while-revalidate={}", max_age, max_age * 2),
                )
                .body(Full::new(Bytes::from(body)))
                .unwrap_or_else(|_| error_response())
        }
        Err(e) => {
            error!("Submissions serialization failed: {}", e);
            error_response()
        }
    }
}

fn paginate_page(
    state: &AppState,
    flat: &[CompletionRecord],
    filter: &ModuleFilter,
    page: usize,
) -> (Vec<CompletionRecord>, Pagination) {
    crate::submissions::paginate(flat, filter, page, state.args.page_size)
}

fn error_response() -> Response<Full<Bytes>> {
    let body = serde_json::to_string(&ErrorResponse {
        success: false,
        error: "Failed to load submissions",
    })
    .unwrap_or_else(|_| r#"{"success":false,"error":"Failed to load submissions"}"#.to_string());

    Response::builder()
        .status(StatusCode::INTERNAL_SERVER_ERROR)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(Full::new(Bytes::from(body)))
        .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::submissions::record::SourceKind;
    use crate::submissions::MintedNft;

    #[test]
    fn test_parse_query_defaults() {
        assert_eq!(
            parse_query(None),
            SubmissionsQuery {
                module: None,
                page: 1
            }
        );
        assert_eq!(
            parse_query(Some("")),
            SubmissionsQuery {
                module: None,
                page: 1
            }
        );
    }

    #[test]
    fn test_parse_query_module_and_page() {
        assert_eq!(
            parse_query(Some("module=xcan-advocate&page=3")),
            SubmissionsQuery {
                module: Some("xcan-advocate".to_string()),
                page: 3
            }
        );
    }

    #[test]
    fn test_parse_query_bad_page_falls_back_to_one() {
        assert_eq!(parse_query(Some("page=abc")).page, 1);
        assert_eq!(parse_query(Some("page=-2")).page, 1);
        assert_eq!(parse_query(Some("page=0")).page, 0);
    }

    #[test]
    fn test_envelope_uses_portal_keys() {
        let records = vec![CompletionRecord::new(
            "0xaaa".to_string(),
            SourceKind::Foundation,
            ModuleId::StylusFoundation,
        )];
        let agg = aggregate(&records);
        let mints: Vec<MintedNft> = Vec::new();
        let stats = stats::compute(&agg, &mints);
        let (items, pagination) =
            crate::submissions::paginate(&agg.flat, &ModuleFilter::All, 1, 30);

        let response = SubmissionsResponse {
            success: true,
            submissions: items,
            submissions_by_module: agg.by_module,
            total_submissions: stats.total_submissions(),
            unique_users: agg.by_user.len(),
            user_module_counts: agg.by_user,
            module_user_counts: agg.module_user_counts,
            pagination,
            stats,
        };

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["success"], true);
        assert!(value.get("submissions").is_some());
        assert!(value.get("submissionsByModule").is_some());
        assert!(value.get("totalSubmissions").is_some());
        assert!(value.get("uniqueUsers").is_some());
        assert!(value.get("userModuleCounts").is_some());
        assert!(value.get("moduleUserCounts").is_some());
        assert!(value.get("pagination").is_some());
        assert!(value.get("stats").is_some());
        // byModule map is keyed by stable module ids
        assert!(value["submissionsByModule"]
            .get("stylus-foundation")
            .is_some());
    }

    #[test]
    fn test_error_envelope_shape() {
        let response = error_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

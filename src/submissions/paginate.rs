//! Pagination and module filtering
//!
//! Pure slicing over the flat list. Out-of-range pages and unknown module
//! ids yield empty results, never errors.

use serde::Serialize;

use crate::submissions::modules::ModuleId;
use crate::submissions::record::CompletionRecord;

/// Default page size for the submissions listing
pub const DEFAULT_PAGE_SIZE: usize = 30;

/// Module filter parsed from the `module` query param
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleFilter {
    /// No filter (`module` absent or `"all"`)
    All,
    /// Filter to one known module
    Only(ModuleId),
    /// Unknown module id: matches nothing
    Unknown,
}

impl ModuleFilter {
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            None | Some("all") | Some("") => ModuleFilter::All,
            Some(id) => match ModuleId::parse(id) {
                Some(module) => ModuleFilter::Only(module),
                None => ModuleFilter::Unknown,
            },
        }
    }

    fn matches(&self, record: &CompletionRecord) -> bool {
        match self {
            ModuleFilter::All => true,
            ModuleFilter::Only(module) => record.module_id == *module,
            ModuleFilter::Unknown => false,
        }
    }
}

/// Pagination metadata for the response envelope
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: usize,
    pub limit: usize,
    pub total_pages: usize,
    pub total_count: usize,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

/// Filter the flat list, then slice the requested page window.
///
/// Pages are 1-based; page 0 and past-the-end pages return an empty slice
/// with metadata still describing the filtered set.
pub fn paginate(
    flat: &[CompletionRecord],
    filter: &ModuleFilter,
    page: usize,
    page_size: usize,
) -> (Vec<CompletionRecord>, Pagination) {
    let filtered: Vec<&CompletionRecord> = flat.iter().filter(|r| filter.matches(r)).collect();

    let total_count = filtered.len();
    let total_pages = total_count.div_ceil(page_size);

    let items = if page == 0 {
        Vec::new()
    } else {
        filtered
            .iter()
            .skip((page - 1).saturating_mul(page_size))
            .take(page_size)
            .map(|r| (*r).clone())
            .collect()
    };

    let pagination = Pagination {
        page,
        limit: page_size,
        total_pages,
        total_count,
        has_next_page: page < total_pages,
        has_prev_page: page > 1,
    };

    (items, pagination)
}

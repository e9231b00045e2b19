//! Address normalization
//!
//! Wallet addresses arrive from four stores with inconsistent casing. The
//! canonical comparison key is the trimmed, lower-cased form, applied exactly
//! once at adapter-output time. Mixed-case duplicates of the same user were a
//! real bug in the portal's leaderboard, so this is the only place casing is
//! touched.

/// Canonicalize a user address. Empty or whitespace-only input is invalid and
/// the owning record must be excluded from all aggregates.
pub fn normalize_address(address: &str) -> Option<String> {
    let trimmed = address.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_mixed_case_address() {
        assert_eq!(
            normalize_address("0xAbC123DeF"),
            Some("0xabc123def".to_string())
        );
    }

    #[test]
    fn test_mixed_case_variants_share_one_key() {
        assert_eq!(
            normalize_address("0xABC"),
            normalize_address("0xabc"),
        );
    }

    #[test]
    fn test_trims_whitespace() {
        assert_eq!(normalize_address("  0xabc  "), Some("0xabc".to_string()));
    }

    #[test]
    fn test_empty_is_invalid() {
        assert_eq!(normalize_address(""), None);
        assert_eq!(normalize_address("   "), None);
    }
}

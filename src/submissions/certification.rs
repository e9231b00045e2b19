//! Certification resolution
//!
//! Stored certification fields predate a schema migration: older documents
//! hold a single embedded object, newer ones hold an array of entries. The
//! shape is normalized exactly once here; nothing downstream branches on it.

use bson::{Bson, Document};

use crate::submissions::record::Certification;

/// Select the authoritative certification entry from a raw stored value.
///
/// A single object is treated as a one-element array. The entry with
/// `claimed == true` wins; if none is claimed, entry 0 is used as a
/// provisional value. Empty, absent, or non-document input resolves to `None`.
pub fn resolve(raw: &Bson) -> Option<Certification> {
    let entries: Vec<&Document> = match raw {
        Bson::Array(items) => items.iter().filter_map(Bson::as_document).collect(),
        Bson::Document(doc) => vec![doc],
        _ => return None,
    };

    let authoritative = entries
        .iter()
        .find(|doc| doc.get_bool("claimed").unwrap_or(false))
        .or_else(|| entries.first())?;

    Some(from_document(authoritative))
}

fn from_document(doc: &Document) -> Certification {
    Certification {
        level: int_field(doc, "level"),
        level_name: str_field(doc, "levelName"),
        transaction_hash: str_field(doc, "transactionHash"),
        claimed: doc.get_bool("claimed").unwrap_or(false),
        minted_at: timestamp_field(doc, "mintedAt"),
    }
}

fn int_field(doc: &Document, key: &str) -> Option<i64> {
    match doc.get(key)? {
        Bson::Int32(v) => Some(i64::from(*v)),
        Bson::Int64(v) => Some(*v),
        Bson::Double(v) => Some(*v as i64),
        _ => None,
    }
}

fn str_field(doc: &Document, key: &str) -> Option<String> {
    doc.get_str(key).ok().map(str::to_string)
}

fn timestamp_field(doc: &Document, key: &str) -> Option<String> {
    match doc.get(key)? {
        Bson::DateTime(dt) => dt.try_to_rfc3339_string().ok(),
        Bson::String(s) => Some(s.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    #[test]
    fn test_claimed_entry_wins_over_earlier_entries() {
        let raw = Bson::Array(vec![
            Bson::Document(doc! { "claimed": false, "transactionHash": "0x0" }),
            Bson::Document(doc! { "claimed": true, "transactionHash": "0x1", "level": 2 }),
        ]);

        let cert = resolve(&raw).unwrap();
        assert!(cert.claimed);
        assert_eq!(cert.transaction_hash.as_deref(), Some("0x1"));
        assert_eq!(cert.level, Some(2));
    }

    #[test]
    fn test_first_entry_is_provisional_when_none_claimed() {
        let raw = Bson::Array(vec![
            Bson::Document(doc! { "claimed": false, "levelName": "Bronze" }),
            Bson::Document(doc! { "claimed": false, "levelName": "Silver" }),
        ]);

        let cert = resolve(&raw).unwrap();
        assert!(!cert.claimed);
        assert_eq!(cert.level_name.as_deref(), Some("Bronze"));
    }

    #[test]
    fn test_single_object_is_wrapped() {
        let raw = Bson::Document(doc! { "claimed": true, "transactionHash": "0xff" });

        let cert = resolve(&raw).unwrap();
        assert!(cert.claimed);
        assert_eq!(cert.transaction_hash.as_deref(), Some("0xff"));
    }

    #[test]
    fn test_empty_array_resolves_to_none() {
        assert_eq!(resolve(&Bson::Array(vec![])), None);
    }

    #[test]
    fn test_scalar_input_resolves_to_none() {
        assert_eq!(resolve(&Bson::String("claimed".to_string())), None);
        assert_eq!(resolve(&Bson::Null), None);
    }

    #[test]
    fn test_non_document_entries_are_skipped() {
        let raw = Bson::Array(vec![
            Bson::String("garbage".to_string()),
            Bson::Document(doc! { "claimed": true, "transactionHash": "0x1" }),
        ]);

        let cert = resolve(&raw).unwrap();
        assert_eq!(cert.transaction_hash.as_deref(), Some("0x1"));
    }

    #[test]
    fn test_minted_at_accepts_string_or_datetime() {
        let raw = Bson::Document(doc! { "claimed": true, "mintedAt": "2025-06-01T00:00:00Z" });
        let cert = resolve(&raw).unwrap();
        assert_eq!(cert.minted_at.as_deref(), Some("2025-06-01T00:00:00Z"));

        let raw = Bson::Document(doc! {
            "claimed": true,
            "mintedAt": bson::DateTime::from_millis(1_700_000_000_000),
        });
        let cert = resolve(&raw).unwrap();
        assert!(cert.minted_at.is_some());
    }
}

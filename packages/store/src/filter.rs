//! Text search and categorical filters over an already-fetched collection.
//!
//! [`filter_records`] is a pure function of the records and a [`ListQuery`]:
//! it never reorders or mutates the source slice, so it is safe to run on
//! every keystroke.

use std::collections::BTreeMap;

use crate::list::Record;

/// Filter value that disables a filter, same as an empty selection.
pub const FILTER_ALL: &str = "all";

/// User-entered search text plus the selected categorical filters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub text: String,
    pub filters: BTreeMap<String, String>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the search text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Builder method to select a filter value.
    pub fn with_filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_filter(field, value);
        self
    }

    pub fn set_filter(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.filters.insert(field.into(), value.into());
    }

    /// Filters whose value actually constrains the result.
    pub fn active_filters(&self) -> impl Iterator<Item = (&str, &str)> {
        self.filters
            .iter()
            .filter(|(_, v)| is_active(v))
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Case-folded search needle, or `None` when the text is blank.
    pub fn needle(&self) -> Option<String> {
        let trimmed = self.text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(fold_case(trimmed))
        }
    }

    /// True when neither text nor any filter constrains the result.
    pub fn is_inert(&self) -> bool {
        self.needle().is_none() && self.active_filters().next().is_none()
    }
}

/// Char-by-char lowercasing: `fold_case(a + b) == fold_case(a) + fold_case(b)`,
/// which `str::to_lowercase` breaks for a word-final capital sigma.
fn fold_case(text: &str) -> String {
    text.chars().flat_map(char::to_lowercase).collect()
}

fn is_active(value: &str) -> bool {
    let v = value.trim();
    !v.is_empty() && !v.eq_ignore_ascii_case(FILTER_ALL)
}

/// Whether a single record passes the query.
pub fn matches<T: Record>(record: &T, query: &ListQuery) -> bool {
    matches_with_needle(record, query, query.needle().as_deref())
}

fn matches_with_needle<T: Record>(record: &T, query: &ListQuery, needle: Option<&str>) -> bool {
    let filters_pass = query
        .active_filters()
        .all(|(field, wanted)| record.field(field).as_deref() == Some(wanted));
    if !filters_pass {
        return false;
    }

    match needle {
        None => true,
        Some(needle) => record
            .search_fields()
            .into_iter()
            .flatten()
            .any(|text| fold_case(text).contains(needle)),
    }
}

/// Records passing `query`, in their original relative order.
pub fn filter_records<'a, T: Record>(records: &'a [T], query: &ListQuery) -> Vec<&'a T> {
    let needle = query.needle();
    records
        .iter()
        .filter(|r| matches_with_needle(*r, query, needle.as_deref()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Surat, SuratStatus};
    use proptest::prelude::*;

    fn surat(id: i64, asal: Option<&str>, status: SuratStatus) -> Surat {
        Surat {
            id,
            asal_instansi: asal.map(str::to_string),
            nomor_surat: Some(format!("{id}/X/2024")),
            tujuan_jabatan: None,
            keterangan: None,
            status,
            created_at: None,
            processed_at: None,
            disposisi: Default::default(),
            photos: Vec::new(),
        }
    }

    fn seven_letters() -> Vec<Surat> {
        use SuratStatus::*;
        vec![
            surat(1, Some("Dinas A"), Pending),
            surat(2, Some("Dinas B"), Processed),
            surat(3, None, Processed),
            surat(4, Some("Bappeda"), Pending),
            surat(5, Some("Dinas C"), Processed),
            surat(6, Some("Kecamatan"), Pending),
            surat(7, Some("Dinas D"), Processed),
        ]
    }

    #[test]
    fn test_status_filter_keeps_order() {
        let records = seven_letters();
        let query = ListQuery::new().with_filter("status", "processed");
        let visible = filter_records(&records, &query);
        let ids: Vec<i64> = visible.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![2, 3, 5, 7]);
        assert!(visible.iter().all(|s| s.status == SuratStatus::Processed));
    }

    #[test]
    fn test_inert_filters() {
        let records = seven_letters();
        for value in ["all", "", "ALL", "  "] {
            let query = ListQuery::new().with_filter("status", value);
            assert!(query.is_inert());
            assert_eq!(filter_records(&records, &query).len(), 7);
        }
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let records = seven_letters();
        let query = ListQuery::new().with_text("dinas");
        let ids: Vec<i64> = filter_records(&records, &query).iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2, 5, 7]);
    }

    #[test]
    fn test_whitespace_query_is_empty() {
        let records = seven_letters();
        let query = ListQuery::new().with_text("   \t");
        assert_eq!(filter_records(&records, &query).len(), 7);
    }

    #[test]
    fn test_absent_fields_do_not_match() {
        let records = vec![surat(3, None, SuratStatus::Pending)];
        let query = ListQuery::new().with_text("dinas");
        assert!(filter_records(&records, &query).is_empty());
        let query = ListQuery::new().with_filter("tujuan_jabatan", "Sekretaris");
        assert!(filter_records(&records, &query).is_empty());
    }

    #[test]
    fn test_search_and_filter_combine() {
        let records = seven_letters();
        let query = ListQuery::new()
            .with_text("dinas")
            .with_filter("status", "pending");
        let ids: Vec<i64> = filter_records(&records, &query).iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn test_empty_records() {
        let records: Vec<Surat> = Vec::new();
        let query = ListQuery::new().with_text("x").with_filter("status", "pending");
        assert!(filter_records(&records, &query).is_empty());
    }

    #[test]
    fn test_greek_sigma_search_narrows() {
        let records = vec![surat(1, Some("ΑΣΑ"), SuratStatus::Pending)];
        let base = filter_records(&records, &ListQuery::new().with_text("ΑΣ")).len();
        let longer = filter_records(&records, &ListQuery::new().with_text("ΑΣΑ")).len();
        assert_eq!(base, 1);
        assert_eq!(longer, 1);
        assert_eq!(filter_records(&records, &ListQuery::new().with_text("ασα")).len(), 1);
    }

    #[test]
    fn test_fold_case_is_per_char() {
        assert_eq!(fold_case("ΑΣ"), "ασ");
        assert_eq!(fold_case("ΑΣΑ"), "ασα");
        assert_eq!(fold_case("Dinas"), "dinas");
    }

    fn arb_records() -> impl Strategy<Value = Vec<Surat>> {
        prop::collection::vec(
            (
                proptest::option::of("[a-zA-ZΑΣασςÄäİ ]{0,12}"),
                prop_oneof![Just(SuratStatus::Pending), Just(SuratStatus::Processed)],
            ),
            0..20,
        )
        .prop_map(|items| {
            items
                .into_iter()
                .enumerate()
                .map(|(i, (asal, status))| surat(i as i64, asal.as_deref(), status))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_filter_is_pure(
            records in arb_records(),
            text in "[a-zA-Z ]{0,6}",
            status in prop_oneof![Just("all"), Just("pending"), Just("processed")],
        ) {
            let before = records.clone();
            let query = ListQuery::new().with_text(text).with_filter("status", status);
            let first: Vec<Surat> = filter_records(&records, &query).into_iter().cloned().collect();
            let second: Vec<Surat> = filter_records(&records, &query).into_iter().cloned().collect();
            prop_assert_eq!(first, second);
            prop_assert_eq!(before, records);
        }

        #[test]
        fn prop_longer_query_never_widens(
            records in arb_records(),
            text in "[a-zA-ZΑΣασςÄäİ ]{1,6}",
            extra in "[a-zA-ZΑΣασςÄäİ ]",
        ) {
            let base = ListQuery::new().with_text(text.clone());
            let longer = ListQuery::new().with_text(format!("{text}{extra}"));
            prop_assert!(
                filter_records(&records, &longer).len() <= filter_records(&records, &base).len()
            );
        }
    }
}

//! Case- and diacritic-insensitive matching over loaded records.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::record::DisplayRecord;

/// Lower-case and strip diacritical marks for comparison purposes.
///
/// Decomposes to NFD and drops combining marks, so `"Àbc"` becomes `"abc"`
/// and a name typed with a stray accent still matches. Idempotent.
pub fn normalize(s: &str) -> String {
    s.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

/// Filter `items` against an already-normalized `query`.
///
/// An empty query is the identity (all records, original order). Otherwise a
/// record matches iff its decimal id equals the query exactly, or its
/// normalized name starts with the query, or contains it as a substring.
/// Matches keep their original relative order; a starts-with match is not
/// ranked above a contains match.
pub fn filter_records<'a>(items: &'a [DisplayRecord], query: &str) -> Vec<&'a DisplayRecord> {
    if query.is_empty() {
        return items.iter().collect();
    }

    items
        .iter()
        .filter(|record| {
            let name = normalize(&record.name);
            let by_id = record.id.to_string() == query;
            let starts = name.starts_with(query);
            let contains = name.contains(query);
            by_id || starts || contains
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u32, name: &str) -> DisplayRecord {
        DisplayRecord {
            id,
            name: name.to_string(),
            image_url: format!("https://sprites.example/{id}.png"),
        }
    }

    #[test]
    fn test_normalize_case_folds() {
        assert_eq!(normalize("Pikachu"), "pikachu");
    }

    #[test]
    fn test_normalize_strips_diacritics() {
        assert_eq!(normalize("Àbc"), "abc");
        assert_eq!(normalize("charizard\u{0301}"), "charizard");
        assert_eq!(normalize("Flabe\u{0301}be\u{0301}"), "flabebe");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for s in ["Pikachu", "Àbc", "charizard\u{0301}", "MR-MIME", ""] {
            let once = normalize(s);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn test_empty_query_is_identity() {
        let items = vec![record(1, "bulbasaur"), record(4, "charmander")];
        let filtered = filter_records(&items, "");
        assert_eq!(filtered, items.iter().collect::<Vec<_>>());
    }

    #[test]
    fn test_matches_by_exact_id_string() {
        let items = vec![record(1, "bulbasaur"), record(12, "butterfree")];
        let filtered = filter_records(&items, "1");
        // "1" matches id 1 exactly but not id 12; neither name contains "1".
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, 1);
    }

    #[test]
    fn test_matches_by_prefix_and_substring() {
        let items = vec![
            record(78, "rapidash"),
            record(16, "pidgey"),
            record(18, "pidgeot"),
        ];
        let filtered = filter_records(&items, "pid");
        let ids: Vec<u32> = filtered.iter().map(|r| r.id).collect();
        // rapidash contains "pid"; the others start with it. Original order
        // is kept: the contains-only match stays interleaved, not demoted.
        assert_eq!(ids, vec![78, 16, 18]);
    }

    #[test]
    fn test_every_match_satisfies_the_predicate() {
        let items: Vec<DisplayRecord> = (1..=151)
            .map(|id| record(id, &format!("mon-{id}")))
            .collect();
        let query = "5";
        for r in filter_records(&items, query) {
            let name = normalize(&r.name);
            assert!(
                r.id.to_string() == query || name.starts_with(query) || name.contains(query),
                "{} should not have matched",
                r.name
            );
        }
    }

    #[test]
    fn test_no_match_yields_empty() {
        let items = vec![record(1, "bulbasaur")];
        assert!(filter_records(&items, "mewtwo").is_empty());
    }
}

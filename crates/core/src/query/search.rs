/// Case-insensitive substring test.
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Keep records whose text field contains `needle`, ignoring case.
///
/// No ranking: matches keep their input order. An empty needle matches all.
pub fn search<T, F>(records: Vec<T>, needle: &str, field: F) -> Vec<T>
where
    F: Fn(&T) -> &str,
{
    records
        .into_iter()
        .filter(|r| contains_ci(field(r), needle))
        .collect()
}

/// Keep records whose key equals `wanted`, preserving order.
pub fn filter_eq<T, K, F>(records: Vec<T>, key: F, wanted: &K) -> Vec<T>
where
    K: PartialEq,
    F: Fn(&T) -> K,
{
    records.into_iter().filter(|r| key(r) == *wanted).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn names() -> Vec<&'static str> {
        vec![
            "The Musical Hop",
            "Park Square Live Music & Coffee",
            "The Dueling Pianos Bar",
        ]
    }

    #[test]
    fn matches_substring_ignoring_case() {
        assert_eq!(search(names(), "hop", |s| *s), vec!["The Musical Hop"]);
        assert_eq!(
            search(names(), "MUSIC", |s| *s),
            vec!["The Musical Hop", "Park Square Live Music & Coffee"]
        );
    }

    #[test]
    fn no_match_is_empty() {
        assert!(search(names(), "xyz", |s| *s).is_empty());
    }

    #[test]
    fn empty_needle_keeps_everything() {
        assert_eq!(search(names(), "", |s| *s).len(), 3);
    }

    #[test]
    fn filter_eq_preserves_order() {
        let rows = vec![(1, 'a'), (2, 'b'), (1, 'c'), (3, 'd'), (1, 'e')];
        let ones = filter_eq(rows, |r| r.0, &1);
        assert_eq!(ones, vec![(1, 'a'), (1, 'c'), (1, 'e')]);
    }

    #[test]
    fn contains_ci_handles_non_ascii() {
        assert!(contains_ci("Café Ünder", "ünd"));
    }

    #[test]
    fn search_folds_non_ascii_case() {
        let rows = vec!["CAFÉ ÜNDER", "Bar"];
        assert_eq!(search(rows, "café", |s| *s), vec!["CAFÉ ÜNDER"]);
    }

    proptest! {
        /// Property: every hit contains the needle and no non-hit does.
        #[test]
        fn search_is_exact_partition(words in proptest::collection::vec("[a-zA-Z ]{0,12}", 0..20), needle in "[a-zA-Z]{1,3}") {
            let hits = search(words.clone(), &needle, |s| s.as_str());
            let lowered = needle.to_lowercase();
            for w in &words {
                let is_hit = w.to_lowercase().contains(&lowered);
                prop_assert_eq!(hits.contains(w), is_hit);
            }
        }
    }
}

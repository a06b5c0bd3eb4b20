//! Case-insensitive substring matching
//!
//! SQLite's `lower()` only folds ASCII, so search terms are matched in Rust
//! with full Unicode case folding.

/// Keep the items whose key contains `term` ignoring case, preserving their
/// order. An empty term keeps everything.
pub fn filter_matches<T, F>(items: Vec<T>, term: &str, key: F) -> Vec<T>
where
    F: Fn(&T) -> &str,
{
    if term.is_empty() {
        return items;
    }
    let folded = term.to_lowercase();
    items
        .into_iter()
        .filter(|item| key(item).to_lowercase().contains(&folded))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(text: &'static str, term: &str) -> bool {
        !filter_matches(vec![text], term, |s| *s).is_empty()
    }

    #[test]
    fn test_folds_non_ascii_letters() {
        assert!(matches("Café Émile", "émile"));
        assert!(matches("What is an ÉCLAIR?", "éclair"));
        assert!(matches("Ökonomie", "öKONOMIE"));
        assert!(!matches("Café Émile", "emile"));
    }

    #[test]
    fn test_empty_term_keeps_everything() {
        assert_eq!(filter_matches(vec!["a", "b"], "", |s| *s), vec!["a", "b"]);
    }

    #[test]
    fn test_filter_keeps_order() {
        let names = vec!["Blue Hall", "Zed Hall", "apple HALL", "Barn"];
        assert_eq!(
            filter_matches(names, "hall", |s| *s),
            vec!["Blue Hall", "Zed Hall", "apple HALL"]
        );
    }
}

//! Verification of provider results against the search term

use crate::results::TorrentResult;

/// Split a term into lower-cased tokens on single spaces
///
/// Consecutive, leading or trailing spaces produce empty tokens, which
/// match every name.
pub fn tokenize(term: &str) -> Vec<String> {
    term.split(' ').map(str::to_lowercase).collect()
}

/// Keep only results whose name contains every token of `term`
///
/// Matching is a case-insensitive substring test per token, independent of
/// token order. Results without a name are always dropped.
pub fn verify_results(results: Vec<TorrentResult>, term: &str) -> Vec<TorrentResult> {
    if results.is_empty() {
        return results;
    }

    let tokens = tokenize(term);
    results
        .into_iter()
        .filter(|result| result.contains_all(&tokens))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(names: &[&str]) -> Vec<TorrentResult> {
        names.iter().map(|name| TorrentResult::new(*name)).collect()
    }

    fn names(results: &[TorrentResult]) -> Vec<&str> {
        results.iter().filter_map(|r| r.name()).collect()
    }

    #[test]
    fn test_tokenize() {
        assert_eq!(tokenize("Foo BAR"), vec!["foo", "bar"]);
        assert_eq!(tokenize("foo  bar"), vec!["foo", "", "bar"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(verify_results(Vec::new(), "foo").is_empty());
    }

    #[test]
    fn test_all_tokens_any_order() {
        let results = named(&["Foo", "Bar Foo", "foobar", "Baz"]);
        let verified = verify_results(results, "foo bar");

        assert_eq!(names(&verified), vec!["Bar Foo", "foobar"]);
    }

    #[test]
    fn test_single_token_substring() {
        let verified = verify_results(named(&["Foo", "Bar Foo"]), "foo");
        assert_eq!(names(&verified), vec!["Foo", "Bar Foo"]);
    }

    #[test]
    fn test_case_insensitive() {
        let verified = verify_results(named(&["UBUNTU 22.04 iso"]), "Ubuntu ISO");
        assert_eq!(verified.len(), 1);
    }

    #[test]
    fn test_missing_names_dropped() {
        let results = vec![
            TorrentResult::unnamed().with_field("magnet", "magnet:?xt=1"),
            TorrentResult::new(""),
            TorrentResult::new("Foo"),
        ];

        assert_eq!(names(&verify_results(results.clone(), "foo")), vec!["Foo"]);
        // The empty token matches everything except nameless entries
        assert_eq!(names(&verify_results(results, "")), vec!["Foo"]);
    }

    #[test]
    fn test_idempotent() {
        let results = named(&["Foo", "Bar Foo", "foo bar baz", "Qux"]);
        let once = verify_results(results, "bar foo");
        let twice = verify_results(once.clone(), "bar foo");

        assert_eq!(once, twice);
    }

    #[test]
    fn test_pass_through_fields_kept() {
        let results = vec![TorrentResult::new("Foo").with_field("seeders", 9)];
        let verified = verify_results(results.clone(), "foo");

        assert_eq!(verified, results);
    }
}

use super::*;

fn with_candidates(candidates: &[&str]) -> SearchResolver {
    let mut resolver = SearchResolver::default();
    let (seq, _) = resolver.input_changed("x").expect("lookup issued");
    let candidates = candidates.iter().map(|c| c.to_string()).collect();
    assert!(resolver.autocomplete_settled(seq, Ok(candidates), Ok(Vec::new())));
    resolver
}

#[test]
fn merges_compounds_before_elements() {
    let mut resolver = SearchResolver::default();
    let (seq, prefix) = resolver.input_changed("  Na ").expect("lookup issued");
    assert_eq!(prefix, "Na");

    resolver.autocomplete_settled(
        seq,
        Ok(vec!["NaCl".to_string(), "NaOH".to_string()]),
        Ok(vec!["Na".to_string()]),
    );

    assert_eq!(resolver.candidates(), ["NaCl", "NaOH", "Na"]);
    assert!(resolver.list_visible());
    assert_eq!(resolver.highlighted(), None);
}

#[test]
fn empty_input_clears_without_lookup() {
    let mut resolver = with_candidates(&["NaCl"]);
    resolver.result = SearchResultCard::NotFound;

    assert_eq!(resolver.input_changed("   "), None);
    assert!(resolver.candidates().is_empty());
    assert!(!resolver.list_visible());
    assert_eq!(resolver.result, SearchResultCard::None);
}

#[test]
fn stale_autocomplete_responses_are_discarded() {
    let mut resolver = SearchResolver::default();
    let (first, _) = resolver.input_changed("N").expect("first");
    let (second, _) = resolver.input_changed("Na").expect("second");

    assert!(resolver.autocomplete_settled(second, Ok(vec!["NaCl".to_string()]), Ok(Vec::new())));
    assert!(!resolver.autocomplete_settled(
        first,
        Ok(vec!["NH3".to_string()]),
        Ok(vec!["N".to_string()])
    ));
    assert_eq!(resolver.candidates(), ["NaCl"]);
}

#[test]
fn late_response_after_clearing_does_not_reopen_list() {
    let mut resolver = SearchResolver::default();
    let (seq, _) = resolver.input_changed("Na").expect("lookup");
    resolver.input_changed("");

    assert!(!resolver.autocomplete_settled(seq, Ok(vec!["NaCl".to_string()]), Ok(Vec::new())));
    assert!(!resolver.list_visible());
}

#[test]
fn failed_lookup_half_degrades_to_empty() {
    let mut resolver = SearchResolver::default();
    let (seq, _) = resolver.input_changed("Na").expect("lookup");
    resolver.autocomplete_settled(
        seq,
        Err(ServiceError::Transport("connection refused".to_string())),
        Ok(vec!["Na".to_string()]),
    );
    assert_eq!(resolver.candidates(), ["Na"]);

    let (seq, _) = resolver.input_changed("Zz").expect("lookup");
    resolver.autocomplete_settled(
        seq,
        Err(ServiceError::Malformed("eof".to_string())),
        Err(ServiceError::Malformed("eof".to_string())),
    );
    assert!(resolver.candidates().is_empty());
    assert!(!resolver.list_visible());
}

#[test]
fn arrow_navigation_is_clamped_without_wraparound() {
    let mut resolver = with_candidates(&["NaCl", "NaOH", "Na"]);

    resolver.key(SearchKey::ArrowDown);
    assert_eq!(resolver.highlighted(), Some(0));
    for _ in 0..5 {
        resolver.key(SearchKey::ArrowDown);
    }
    assert_eq!(resolver.highlighted(), Some(2));
    for _ in 0..5 {
        resolver.key(SearchKey::ArrowUp);
    }
    assert_eq!(resolver.highlighted(), Some(0));
}

#[test]
fn arrow_up_from_no_selection_highlights_first() {
    let mut resolver = with_candidates(&["NaCl", "NaOH"]);
    resolver.key(SearchKey::ArrowUp);
    assert_eq!(resolver.highlighted(), Some(0));
}

#[test]
fn enter_commits_only_a_highlighted_candidate() {
    let mut resolver = with_candidates(&["NaCl", "NaOH"]);
    assert_eq!(resolver.key(SearchKey::Enter), None);
    resolver.key(SearchKey::ArrowDown);
    resolver.key(SearchKey::ArrowDown);
    assert_eq!(resolver.key(SearchKey::Enter), Some("NaOH".to_string()));
}

#[test]
fn keys_are_ignored_while_list_is_hidden() {
    let mut resolver = with_candidates(&["NaCl"]);
    resolver.dismiss();
    resolver.key(SearchKey::ArrowDown);
    assert_eq!(resolver.highlighted(), None);
    assert_eq!(resolver.candidate(0), None);
}

#[test]
fn local_match_never_needs_the_network() {
    let catalog = Catalog::builtin();
    let mut resolver = with_candidates(&["NaOH"]);

    assert_eq!(resolver.commit("NaOH", &catalog), CommitOutcome::Local);
    assert!(!resolver.list_visible());
    assert_eq!(resolver.input(), "NaOH");
    assert_eq!(
        resolver.addable_entry().map(CatalogEntry::identity),
        Some("NaOH")
    );
    assert_eq!(
        resolver.result.render(),
        "Compound: Sodium Hydroxide (NaOH) [Add to Tumbler]"
    );
}

#[test]
fn local_miss_falls_back_to_web_search() {
    let catalog = Catalog::builtin();
    let mut resolver = SearchResolver::default();

    let CommitOutcome::WebSearch { seq, query } = resolver.commit("C6H12O6", &catalog) else {
        panic!("expected web fallback");
    };
    assert_eq!(query, "C6H12O6");
    assert_eq!(resolver.result.render(), SEARCHING_WEB);
    assert_eq!(resolver.addable_entry(), None);

    assert!(resolver.web_search_settled(seq, query, Ok(Some("Glucose".to_string()))));
    assert_eq!(resolver.result.render(), "Web Result for: C6H12O6\nGlucose");
}

#[test]
fn missing_or_failed_web_result_shows_not_found() {
    let catalog = Catalog::builtin();
    let mut resolver = SearchResolver::default();

    let CommitOutcome::WebSearch { seq, query } = resolver.commit("Xx", &catalog) else {
        panic!("expected web fallback");
    };
    resolver.web_search_settled(seq, query, Ok(None));
    assert_eq!(resolver.result, SearchResultCard::NotFound);

    let CommitOutcome::WebSearch { seq, query } = resolver.commit("Yy", &catalog) else {
        panic!("expected web fallback");
    };
    resolver.web_search_settled(seq, query, Err(ServiceError::Transport("down".to_string())));
    assert_eq!(resolver.result.render(), NOT_FOUND_ONLINE);
}

#[test]
fn stale_web_result_does_not_replace_newer_commit() {
    let catalog = Catalog::builtin();
    let mut resolver = SearchResolver::default();

    let CommitOutcome::WebSearch { seq: old, query } = resolver.commit("Xx", &catalog) else {
        panic!("expected web fallback");
    };
    assert_eq!(resolver.commit("HCl", &catalog), CommitOutcome::Local);
    assert!(!resolver.web_search_settled(old, query, Ok(Some("late".to_string()))));
    assert_eq!(
        resolver.addable_entry().map(CatalogEntry::identity),
        Some("HCl")
    );
}

#[test]
fn commit_invalidates_outstanding_autocomplete() {
    let catalog = Catalog::builtin();
    let mut resolver = SearchResolver::default();
    let (seq, _) = resolver.input_changed("Na").expect("lookup");
    resolver.commit("Na", &catalog);

    assert!(!resolver.autocomplete_settled(seq, Ok(vec!["NaCl".to_string()]), Ok(Vec::new())));
    assert!(!resolver.list_visible());
}

#[test]
fn web_result_after_clearing_input_is_discarded() {
    let catalog = Catalog::builtin();
    let mut resolver = SearchResolver::default();

    let CommitOutcome::WebSearch { seq, query } = resolver.commit("Xx", &catalog) else {
        panic!("expected web fallback");
    };
    assert!(resolver.web_search_pending());
    assert_eq!(resolver.input_changed("  "), None);

    assert!(!resolver.web_search_settled(seq, query, Ok(Some("late".to_string()))));
    assert_eq!(resolver.result, SearchResultCard::None);
    assert!(!resolver.web_search_pending());
}

#[test]
fn typing_again_abandons_outstanding_web_search() {
    let catalog = Catalog::builtin();
    let mut resolver = SearchResolver::default();

    let CommitOutcome::WebSearch { seq, query } = resolver.commit("Xx", &catalog) else {
        panic!("expected web fallback");
    };
    assert!(resolver.input_changed("Na").is_some());
    assert_eq!(resolver.result, SearchResultCard::None);

    assert!(!resolver.web_search_settled(seq, query, Ok(Some("late".to_string()))));
    assert_eq!(resolver.result, SearchResultCard::None);
}

#[test]
fn web_result_is_applied_once() {
    let catalog = Catalog::builtin();
    let mut resolver = SearchResolver::default();

    let CommitOutcome::WebSearch { seq, query } = resolver.commit("Xx", &catalog) else {
        panic!("expected web fallback");
    };
    assert!(resolver.web_search_settled(seq, query.clone(), Ok(Some("first".to_string()))));
    assert!(!resolver.web_search_settled(seq, query, Ok(Some("again".to_string()))));
    assert_eq!(resolver.result.render(), "Web Result for: Xx\nfirst");
}

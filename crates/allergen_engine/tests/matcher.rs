use std::collections::BTreeSet;

use allergen_engine::{contains_whole_word, find_allergens, ClassifiedText, DEFAULT_ALLERGENS};

fn classified(ingredients: &[&str], info: &[&str]) -> ClassifiedText {
    ClassifiedText {
        ingredients: ingredients.iter().map(ToString::to_string).collect(),
        info: info.iter().map(ToString::to_string).collect(),
    }
}

fn set(tokens: &[&str]) -> BTreeSet<String> {
    tokens.iter().map(ToString::to_string).collect()
}

#[test]
fn matches_whole_words_only() {
    assert!(contains_whole_word("contains egg", "egg"));
    assert!(contains_whole_word("egg", "egg"));
    assert!(contains_whole_word("free-range egg, salt", "egg"));
    assert!(!contains_whole_word("parmeggiano reggiano", "egg"));
    assert!(!contains_whole_word("eggs", "egg"));
}

#[test]
fn matching_is_case_insensitive() {
    assert!(contains_whole_word("Contains EGG.", "egg"));
    assert!(contains_whole_word("contains egg", "EGG"));
}

#[test]
fn later_occurrences_are_found_after_a_bounded_miss() {
    // The first "egg" is inside a word; the scan must continue past it.
    assert!(contains_whole_word("parmeggiano and egg", "egg"));
}

#[test]
fn empty_token_never_matches() {
    assert!(!contains_whole_word("anything", ""));
}

#[test]
fn ingredients_bucket_is_authoritative() {
    let text = classified(&["no allergens here"], &["contains egg"]);
    assert_eq!(find_allergens(&text, DEFAULT_ALLERGENS), Some(set(&[])));
}

#[test]
fn info_bucket_is_a_fallback() {
    let text = classified(&[], &["may contain egg"]);
    assert_eq!(find_allergens(&text, DEFAULT_ALLERGENS), Some(set(&["egg"])));
}

#[test]
fn both_buckets_empty_means_no_data() {
    assert_eq!(
        find_allergens(&ClassifiedText::default(), DEFAULT_ALLERGENS),
        None
    );
}

#[test]
fn all_matching_tokens_are_collected_across_lines() {
    let text = classified(&["Milk, cultures", "free range EGG"], &[]);
    let vocabulary = ["egg", "milk", "peanut"];
    assert_eq!(
        find_allergens(&text, &vocabulary),
        Some(set(&["egg", "milk"]))
    );
}

#[test]
fn spec_example_contains_egg() {
    let text = classified(&["contains egg"], &[]);
    assert_eq!(find_allergens(&text, DEFAULT_ALLERGENS), Some(set(&["egg"])));

    let text = classified(&["parmeggiano reggiano"], &[]);
    assert_eq!(find_allergens(&text, DEFAULT_ALLERGENS), Some(set(&[])));
}

use super::drawing::*;
use crate::{
    assert_that, check_that, contains_entries, contains_entries_matching,
    contains_entries_matching_keys, equal_to, expect_failure, ContainsEntries, Matcher,
};
use std::collections::{BTreeMap, HashMap};

fn greetings(entries: &[(i32, &'static str)]) -> BTreeMap<i32, &'static str> {
    entries.iter().copied().collect()
}

#[test]
fn test_both_absent() {
    let matcher = ContainsEntries::<i32, &str>::absent();
    assert_that("Null maps", None::<&BTreeMap<i32, &str>>, &matcher);
}

#[test]
fn test_absent_expected_fails() {
    let actual = greetings(&[(0, "Hello")]);
    let matcher = ContainsEntries::<i32, &str>::absent();

    expect_failure()
        .when(|| assert_that("Null map", Some(&actual), &matcher))
        .then(|failure| {
            insta::assert_snapshot!(failure.message(), @r###"
            Null map
            Expected: null
                 but: was not null
            "###);
        });
}

#[test]
fn test_absent_candidate_fails() {
    let expected = greetings(&[(0, "Hello")]);

    expect_failure()
        .when(|| {
            assert_that(
                "Non-null map",
                None::<&BTreeMap<i32, &str>>,
                &contains_entries(&expected),
            )
        })
        .then(|failure| {
            insta::assert_snapshot!(failure.message(), @r###"
            Non-null map
            Expected: Map with 1 entries
                 but: was null
            "###);
        });
}

#[test]
fn test_same_entries() {
    let expected = greetings(&[(1, "World"), (0, "Hello")]);
    let actual: HashMap<i32, &str> = [(0, "Hello"), (1, "World")].into_iter().collect();
    assert_that("Matching", Some(&actual), &contains_entries(&expected));
}

#[test]
fn test_missing_entries() {
    let expected = greetings(&[(0, "Hello"), (1, "World"), (2, "Peace")]);
    let actual = greetings(&[(0, "Hello"), (2, "Peace")]);

    expect_failure()
        .when(|| assert_that("Missing", Some(&actual), &contains_entries(&expected)))
        .then(|failure| {
            insta::assert_snapshot!(failure.message(), @r###"
            Missing
            Expected: Map entry set with 3 members
                 but: was missing 1 members=[1=World]
            "###);
        });
}

#[test]
fn test_unexpected_entries() {
    let expected = greetings(&[(0, "Hello"), (1, "World")]);
    let actual = greetings(&[(0, "Hello"), (1, "World"), (2, "Peace"), (3, "Now")]);

    expect_failure()
        .when(|| assert_that("Unexpected", Some(&actual), &contains_entries(&expected)))
        .then(|failure| {
            insta::assert_snapshot!(failure.message(), @r###"
            Unexpected
            Expected: Map entry set with 2 members
                 but: had 2 unexpected members=[2=Peace, 3=Now]
            "###);
        });
}

#[test]
fn test_text_is_not_a_map() {
    let expected = greetings(&[(0, "Hello"), (1, "World")]);
    let matcher = ContainsEntries::of(&expected);
    let actual = String::from("Hello, World");

    assert!(!matcher.matches(Some(&actual)));
    let failure = check_that("Matching a non-map", Some(&actual), &matcher).unwrap_err();
    insta::assert_snapshot!(failure.message(), @r###"
    Matching a non-map
    Expected: Map with 2 entries
         but: was not a Map
    "###);
}

fn drawings_by_index(greens: Drawing) -> BTreeMap<i32, Drawing> {
    BTreeMap::from([
        (0, Drawing::new("Reds", vec![triangle(RED), rectangle(RED), circle(RED)])),
        (1, greens),
    ])
}

#[test]
fn test_value_matcher() {
    let expected = drawings_by_index(Drawing::new(
        "Greens",
        vec![triangle(GREEN), rectangle(GREEN), circle(GREEN)],
    ));
    let actual = drawings_by_index(Drawing::new(
        "Greens",
        vec![circle(GREEN), triangle(GREEN), rectangle(GREEN)],
    ));

    let matcher = contains_entries_matching(drawing_matcher)(&expected);
    assert_that("Value matchers", Some(&actual), &matcher);
}

#[test]
fn test_value_matcher_fails() {
    let expected = drawings_by_index(Drawing::new(
        "Greens",
        vec![triangle(GREEN), rectangle(GREEN), circle(GREEN)],
    ));
    let actual = drawings_by_index(Drawing::new(
        "Greens",
        vec![triangle(GREEN), rectangle(GREEN), circle(BLUE)],
    ));
    let matcher = contains_entries_matching(drawing_matcher)(&expected);

    expect_failure()
        .when(|| assert_that("Value matchers", Some(&actual), &matcher))
        .then(|failure| {
            insta::assert_snapshot!(failure.message(), @r###"
            Value matchers
            Expected: Map entry set containing 1=Drawing[Greens] matching value=Drawing[Greens] matching elements=Iterable containing CIRCLE[Color[0,255,0]] matching color=Color[0,255,0]
                 but: was Color[0,0,255]
            "###);
        });
}

fn indexes_by_drawing(greens: Drawing) -> HashMap<Drawing, i32> {
    HashMap::from([
        (Drawing::new("Reds", vec![triangle(RED), rectangle(RED), circle(RED)]), 0),
        (greens, 1),
    ])
}

#[test]
fn test_key_matcher() {
    let expected = indexes_by_drawing(Drawing::new(
        "Greens",
        vec![triangle(GREEN), rectangle(GREEN), circle(GREEN)],
    ));
    let actual = indexes_by_drawing(Drawing::new(
        "Greens",
        vec![rectangle(GREEN), circle(GREEN), triangle(GREEN)],
    ));

    let matcher = contains_entries_matching_keys(drawing_matcher, equal_to::<i32>)(&expected);
    assert_that("Key matchers", Some(&actual), &matcher);
}

#[test]
fn test_key_matcher_fails() {
    let expected = indexes_by_drawing(Drawing::new(
        "Greens",
        vec![triangle(GREEN), rectangle(GREEN), circle(GREEN)],
    ));
    let actual = indexes_by_drawing(Drawing::new(
        "Greens",
        vec![triangle(GREEN), rectangle(BLUE), circle(GREEN)],
    ));
    let matcher = contains_entries_matching_keys(drawing_matcher, equal_to::<i32>)(&expected);

    expect_failure()
        .when(|| assert_that("Key matchers", Some(&actual), &matcher))
        .then(|failure| {
            insta::assert_snapshot!(failure.message(), @r###"
            Key matchers
            Expected: Map entry set containing Drawing[Greens]=1 matching key=Drawing[Greens] matching elements=Iterable containing RECTANGLE[Color[0,255,0]] matching color=Color[0,255,0]
                 but: was Color[0,0,255]
            "###);
        });
}

#[test]
fn test_reused_across_maps() {
    let matcher = contains_entries(&greetings(&[(0, "Hello")]));
    let verdicts: Vec<bool> = [vec![(0, "Hello")], vec![(0, "Goodbye")]]
        .into_iter()
        .map(|entries| {
            let actual: HashMap<i32, &str> = entries.into_iter().collect();
            matcher.matches(Some(&actual))
        })
        .collect();
    assert_eq!(verdicts, vec![true, false]);
}

use crate::description::{description_of, mismatch_for};
use crate::{
    assert_that, assert_that_array, assert_that_iterator, expect_failure, visits, visits_list,
    visits_members, ContainsMembers, Matcher, Visits,
};

#[test]
fn test_both_absent() {
    let matcher = ContainsMembers::<&str>::absent();
    assert_that("Null iterators", None::<&Visits<std::vec::IntoIter<&str>>>, &matcher);
}

#[test]
fn test_absent_expected_fails() {
    let matcher = ContainsMembers::<&str>::absent();

    expect_failure()
        .when(|| assert_that_iterator("Null iterator", vec!["Red", "Green", "Blue"], &matcher))
        .then(|failure| {
            insta::assert_snapshot!(failure.message(), @r###"
            Null iterator
            Expected: null
                 but: was not null
            "###);
        });
}

#[test]
fn test_members_in_any_order() {
    let matcher = visits_members(vec!["Red", "Green", "Blue"]);
    assert_that_iterator("Iterators", vec!["Green", "Blue", "Red"], &matcher);
}

#[test]
fn test_members_fail() {
    let matcher = visits_members(vec!["Red", "Green", "Blue"]);

    expect_failure()
        .when(|| assert_that_iterator("Iterators", vec!["Green", "Red"], &matcher))
        .then(|failure| {
            insta::assert_snapshot!(failure.message(), @r###"
            Iterators
            Expected: Iterable with 3 members
                 but: was missing 1 members=[Blue]
            "###);
        });
}

#[test]
fn test_list_in_order() {
    let matcher = visits_list(vec!["Red", "Green", "Blue"]);
    assert_that_iterator("Iterators", vec!["Red", "Green", "Blue"], &matcher);
}

#[test]
fn test_list_fails() {
    let matcher = visits_list(vec!["Red", "Green", "Blue"]);

    expect_failure()
        .when(|| assert_that_iterator("Iterators", vec!["Green", "Red", "Blue"], &matcher))
        .then(|failure| {
            insta::assert_snapshot!(failure.message(), @r###"
            Iterators
            Expected: Sequence of 3 members
                 but: at index=0, found Green instead of Red
            "###);
        });
}

#[test]
fn test_array_candidate() {
    let matcher = visits_list(vec![1, 2, 3]);
    assert_that_array("Array", &[1, 2, 3], &matcher);

    expect_failure()
        .when(|| assert_that_array("Array", &[1, 3, 2], &matcher))
        .then(|failure| {
            insta::assert_snapshot!(failure.message(), @r###"
            Array
            Expected: Sequence of 3 members
                 but: at index=1, found 3 instead of 2
            "###);
        });
}

#[test]
fn test_drained_candidate_described_once() {
    let matcher = visits_members(vec!["Red", "Green"]);
    let actual = visits(vec!["Red", "Blue"]);

    assert!(!matcher.matches(Some(&actual)));
    assert!(actual.is_consumed());

    let expected_mismatch =
        "was missing 1 members=[Green]\n     and: had 1 unexpected members=[Blue]";
    assert_eq!(mismatch_for(&matcher, Some(&actual)), expected_mismatch);
    assert_eq!(mismatch_for(&matcher, Some(&actual)), expected_mismatch);
    assert_eq!(description_of(&matcher), "Iterable with 2 members");
}

#[test]
fn test_visits_debug_state() {
    let actual = visits(vec![1, 2]);
    assert_eq!(format!("{:?}", actual), "Visits { state: \"pending\" }");

    let matcher = visits_members(vec![1, 2]);
    assert!(matcher.matches(Some(&actual)));
    assert_eq!(format!("{:?}", actual), "Visits { state: \"consumed\" }");
}

#[test]
fn test_same_iterator_matched_twice() {
    let matcher = visits_list(vec!["Red", "Green"]);
    let actual = visits(vec!["Red", "Green"]);

    assert!(matcher.matches(Some(&actual)));
    assert!(matcher.matches(Some(&actual)));
    assert_eq!(description_of(&matcher), "Sequence of 2 members");
}

#[test]
fn test_each_iterator_evaluated() {
    let matcher = visits_members(vec!["Red", "Green"]);
    let verdicts: Vec<bool> = [vec!["Green", "Red"], vec!["Green", "Blue"]]
        .into_iter()
        .map(|members| matcher.matches(Some(&visits(members))))
        .collect();
    assert_eq!(verdicts, vec![true, false]);
}

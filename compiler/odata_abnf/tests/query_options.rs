//! Query options after the `?`.

#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use abnf_runtime::{Input, Realized};
use odata_abnf::{grammar, parser, recognize, Error, QUERY_OPTIONS};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn texts(tree: &Realized<'_>, rule: &str) -> Vec<String> {
    let id = grammar().lookup(rule).unwrap();
    tree.find_all(id).into_iter().map(Realized::text).collect()
}

#[test]
fn test_accepted_options() {
    for query in [
        "$top=10",
        "top=10",
        "$skip=5",
        "$top=1&$skip=2",
        "$count=true",
        "$filter=Price lt 10",
        "$filter=@p eq 1&@p=5",
        "$orderby=Name desc,Price",
        "$select=*",
        "$select=Name,Address/City",
        "$select=NS.*",
        "$expand=Category",
        "$expand=*",
        "$expand=*/$ref",
        "$expand=Orders/$ref",
        "$expand=Orders/$count",
        "$expand=Orders($filter=Amount gt 5;$top=2)",
        "$expand=Orders($levels=max)",
        "$expand=Orders($expand=Items;$levels=2)",
        "$format=json",
        "$format=application/json",
        "$skiptoken=abc123",
        "@p=5",
        "debug=true",
        "flag",
        "flag&$top=1",
    ] {
        assert_eq!(recognize(QUERY_OPTIONS, query), Ok(()), "{query}");
    }
}

#[test]
fn test_rejected_options() {
    for query in [
        "",
        "$top=",
        "$top=abc",
        "$filter=",
        "$select=",
        "$levels=0",
        "&$top=1",
        "$top=1&",
        "$orderby=Name sideways",
    ] {
        assert!(recognize(QUERY_OPTIONS, query).is_err(), "{query}");
    }
}

#[test]
fn test_bad_count_names_the_digit_rule() {
    let Err(Error::Syntax(err)) = recognize(QUERY_OPTIONS, "$top=x") else {
        panic!("expected a syntax error");
    };
    assert_eq!(err.position(), 5);
    assert_eq!(err.expected, vec!["DIGIT".to_string()]);
    assert_eq!(err.message, "expected `DIGIT`, found 'x'");
}

#[test]
fn test_orderby_items_and_directions() {
    let parser = parser(QUERY_OPTIONS).unwrap();
    let input = Input::new("$orderby=Name desc,Price asc,Id");
    let tree = parser.parse(&input).unwrap();

    assert_eq!(texts(&tree, "orderbyItem"), vec!["Name desc", "Price asc", "Id"]);
    assert_eq!(texts(&tree, "orderbyItem.order"), vec!["desc", "asc"]);
}

#[test]
fn test_nested_expand_options() {
    let parser = parser(QUERY_OPTIONS).unwrap();
    let input = Input::new("$expand=Orders($filter=Amount gt 5;$top=2),Category");
    let tree = parser.parse(&input).unwrap();

    assert_eq!(texts(&tree, "filter"), vec!["$filter=Amount gt 5"]);
    assert_eq!(texts(&tree, "top"), vec!["$top=2"]);
    assert_eq!(texts(&tree, "expandPath"), vec!["Orders", "Category"]);
}

#[test]
fn test_plain_keyword_is_a_system_option() {
    let parser = parser(QUERY_OPTIONS).unwrap();
    let query_option = grammar().lookup("queryOption").unwrap();

    for (query, alternative) in [("top=10", 0), ("@p=1", 1), ("topx=10", 2)] {
        let input = Input::new(query);
        let tree = parser.parse(&input).unwrap();
        let option = tree.find(query_option).unwrap();
        assert_eq!(option.alternative(), Some(alternative), "{query}");
    }
}

proptest! {
    #[test]
    fn paging_options_accept_any_count(top in 0u64..1_000_000_000, skip in 0u64..1_000_000) {
        let query = format!("$skip={skip}&$top={top}");
        prop_assert_eq!(recognize(QUERY_OPTIONS, &query), Ok(()));
    }

    #[test]
    fn custom_options_keep_their_name(name in "[a-z][a-z0-9]{0,8}", value in "[a-z0-9]{0,8}") {
        // Without the `$`, these names are system options.
        let system = ["count", "expand", "filter", "format", "orderby", "select", "skip", "top"];
        prop_assume!(!system.contains(&name.as_str()));

        let query = format!("{name}={value}");
        let parser = parser(QUERY_OPTIONS).unwrap();
        let input = Input::new(&query);
        let tree = parser.parse(&input).unwrap();
        let custom = grammar().lookup("customName").unwrap();
        prop_assert_eq!(tree.find(custom).map(Realized::text), Some(name));
    }
}

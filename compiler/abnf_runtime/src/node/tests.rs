#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use std::cell::Cell;

use super::*;
use crate::combinator::{CharClass, SequenceSlot};
use crate::cursor::Input;
use crate::grammar::GrammarBuilder;
use pretty_assertions::assert_eq;

const X30: RuleId = RuleId::new(0);
const ZERO: RuleId = RuleId::new(1);
const SEQ: RuleId = RuleId::new(2);
const XA: RuleId = RuleId::new(3);

fn counted<'a>(
    runs: &'a Cell<u32>,
    rule: RuleId,
    pred: OutcomeCell<'a>,
    class: CharClass,
) -> Deferred<'a> {
    let inner = Deferred::terminal(rule, pred, class);
    Deferred::new(rule, move || {
        runs.set(runs.get() + 1);
        inner.realize()
    })
}

#[test]
fn test_origin_is_an_empty_realized_match() {
    let input = Input::new("abc");
    let origin = Deferred::origin(input.cursor());
    assert!(origin.is_forced());
    assert_eq!(origin.rule(), RuleId::ORIGIN);

    let outcome = origin.realize();
    let node = outcome.node().unwrap();
    assert_eq!(node.kind(), &RealizedKind::Origin);
    assert_eq!(node.span(), Span::new(0, 0));
    assert_eq!(outcome.position(), 0);
}

#[test]
fn test_realize_is_memoized() {
    let runs = Cell::new(0);
    let input = Input::new("0");
    let origin = Deferred::origin(input.cursor());
    let zero = counted(&runs, X30, origin.outcome_cell().clone(), CharClass::Exact('0'));

    let first = zero.realize();
    let second = zero.realize();
    assert_eq!(first, second);
    assert_eq!(runs.get(), 1);
}

#[test]
fn test_convert_of_unforced_node_shares_cell_without_forcing() {
    let runs = Cell::new(0);
    let input = Input::new("0");
    let origin = Deferred::origin(input.cursor());
    let zero = counted(&runs, X30, origin.outcome_cell().clone(), CharClass::Exact('0'));

    let converted = zero.convert();
    assert_eq!(runs.get(), 0);
    assert!(!converted.is_forced());
    assert!(LazyCell::ptr_eq(converted.outcome_cell(), zero.outcome_cell()));

    converted.realize();
    assert!(zero.is_forced());
    zero.realize();
    assert_eq!(runs.get(), 1);
}

#[test]
fn test_convert_of_forced_node_is_prefilled() {
    let input = Input::new("0");
    let origin = Deferred::origin(input.cursor());
    let zero = Deferred::terminal(X30, origin.outcome_cell().clone(), CharClass::Exact('0'));
    let outcome = zero.realize();

    let converted = zero.convert();
    assert!(converted.is_forced());
    assert!(!LazyCell::ptr_eq(converted.outcome_cell(), zero.outcome_cell()));
    assert_eq!(converted.realize(), outcome);
}

#[test]
fn test_realized_convert_round_trips() {
    let input = Input::new("0");
    let origin = Deferred::origin(input.cursor());
    let zero = Deferred::terminal(X30, origin.outcome_cell().clone(), CharClass::Exact('0'));
    let node = zero.realize().into_node().unwrap();

    let deferred = node.convert();
    assert!(deferred.is_forced());
    assert_eq!(deferred.rule(), X30);
    assert_eq!(deferred.realize(), MatchOutcome::matched(node.clone(), node.end()));
    assert_eq!(node.realize(), deferred.realize());
}

#[test]
fn test_literal_around_already_matched_terminal() {
    let input = Input::new("0");
    let origin = Deferred::origin(input.cursor());
    let x30 = Deferred::terminal(X30, origin.outcome_cell().clone(), CharClass::Exact('0'));
    let matched = x30.realize().into_node().unwrap();

    let literal = Deferred::literal(ZERO, matched.convert());
    let node = literal.realize().into_node().unwrap();

    assert_eq!(node.rule(), ZERO);
    assert_eq!(node.text(), "0");
    assert_eq!(node.span(), Span::new(0, 1));
    assert_eq!(node.kind(), &RealizedKind::Literal(matched.clone()));
    assert_eq!(node.children(), vec![&matched]);
}

#[test]
fn test_node_enum_dispatches() {
    let runs = Cell::new(0);
    let input = Input::new("0");
    let origin = Deferred::origin(input.cursor());
    let zero = counted(&runs, X30, origin.outcome_cell().clone(), CharClass::Exact('0'));

    let deferred = Node::from(zero);
    assert!(!deferred.is_realized());
    assert_eq!(deferred.rule(), X30);
    let _ = deferred.convert();
    assert_eq!(runs.get(), 0);

    let realized = Node::from(deferred.realize().into_node().unwrap());
    assert!(realized.is_realized());
    assert!(deferred.is_realized());
    assert_eq!(realized.realize(), deferred.realize());
    assert_eq!(runs.get(), 1);
}

#[test]
fn test_sequence_accessors() {
    let input = Input::new("0A");
    let origin = Deferred::origin(input.cursor());
    let zero = Deferred::terminal(X30, origin.outcome_cell().clone(), CharClass::Exact('0'));
    let a = Deferred::terminal(XA, zero.outcome_cell().clone(), CharClass::CaseInsensitive('a'));
    let seq = Deferred::sequence(
        SEQ,
        origin.outcome_cell().clone(),
        vec![SequenceSlot::ready("_0_1", zero), SequenceSlot::ready("_A_1", a)],
    );

    let node = seq.realize().into_node().unwrap();
    assert_eq!(node.text(), "0A");
    assert_eq!(node.tokens(), &['0', 'A']);
    assert_eq!(node.member("_0_1").map(Realized::text), Some("0".to_string()));
    assert_eq!(node.member("_A_1").map(Realized::span), Some(Span::new(1, 2)));
    assert_eq!(node.member("_B_1"), None);
    assert_eq!(node.children().len(), 2);
    assert_eq!(node.alternative(), None);
    assert_eq!(node.find(XA).map(Realized::text), Some("A".to_string()));
    assert_eq!(node.find(SEQ).map(Realized::rule), Some(SEQ));
    assert_eq!(node.find(ZERO), None);
    assert_eq!(node.find_all(X30).len(), 1);
}

#[test]
fn test_realized_equality_is_structural() {
    let input = Input::new("00");
    let a = {
        let origin = Deferred::origin(input.cursor());
        Deferred::terminal(X30, origin.outcome_cell().clone(), CharClass::Exact('0'))
            .realize()
            .into_node()
            .unwrap()
    };
    let b = {
        let origin = Deferred::origin(input.cursor());
        Deferred::terminal(X30, origin.outcome_cell().clone(), CharClass::Exact('0'))
            .realize()
            .into_node()
            .unwrap()
    };
    assert_eq!(a, b);
    assert!(!Realized::ptr_eq(&a, &b));
}

#[test]
fn test_dump_renders_tree() {
    let mut b = GrammarBuilder::new();
    b.sequence("pair", &["key", "\"=\"", "value"])
        .range("key", 'a', 'z')
        .alternation("value", &["word", "DIGIT"])
        .char("word", 'w')
        .range("DIGIT", '0', '9');
    let grammar = b.build().unwrap();
    let parser = crate::Parser::new(&grammar, "pair").unwrap();
    let input = Input::new("a=7");
    let tree = parser.parse(&input).unwrap();

    let expected = "\
pair 0..3
  _key_1: key 0..1 'a'
  _=_1: \"=\" 1..2 \"=\"
  _value_1: value/1 2..3
    DIGIT 2..3 '7'
";
    assert_eq!(tree.dump(&grammar), expected);
}

#[test]
fn test_shared_children_survive_parent_drop() {
    let input = Input::new("0");
    let origin = Deferred::origin(input.cursor());
    let zero = Deferred::terminal(X30, origin.outcome_cell().clone(), CharClass::Exact('0'));
    let child = zero.realize().into_node().unwrap();

    let literal = Deferred::literal(ZERO, child.convert());
    let parent = literal.realize().into_node().unwrap();
    drop(literal);
    drop(parent);
    assert_eq!(child.text(), "0");
    assert_eq!(child.kind(), &RealizedKind::Token('0'));
}

#[test]
fn test_dump_renders_repeat_items_and_optional() {
    let mut b = GrammarBuilder::new();
    b.sequence("number", &["[SIGN]", "1*DIGIT"])
        .char("SIGN", '-')
        .range("DIGIT", '0', '9');
    let grammar = b.build().unwrap();
    let parser = crate::Parser::new(&grammar, "number").unwrap();
    let input = Input::new("12");
    let tree = parser.parse(&input).unwrap();

    let expected = "\
number 0..2
  _[SIGN]_1: [SIGN] 0..0
  _1*DIGIT_1: 1*DIGIT 0..2
    DIGIT 0..1 '1'
    DIGIT 1..2 '2'
";
    assert_eq!(tree.dump(&grammar), expected);
}

#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use std::cell::Cell;

use abnf_diagnostic::Span;

use super::*;
use crate::cursor::Input;
use crate::node::RealizedKind;
use pretty_assertions::assert_eq;

const DIGIT: RuleId = RuleId::new(0);
const X30: RuleId = RuleId::new(1);
const XA: RuleId = RuleId::new(2);
const SEQ: RuleId = RuleId::new(3);
const ALT: RuleId = RuleId::new(4);
const REP: RuleId = RuleId::new(5);
const SLASH: RuleId = RuleId::new(6);
const EQ: RuleId = RuleId::new(7);

fn origin_cell(input: &Input) -> OutcomeCell<'_> {
    Deferred::origin(input.cursor()).outcome_cell().clone()
}

// --- CharClass ---

#[test]
fn test_char_class_matching() {
    assert!(CharClass::Exact('/').matches('/'));
    assert!(!CharClass::Exact('a').matches('A'));
    assert!(CharClass::CaseInsensitive('a').matches('A'));
    assert!(CharClass::CaseInsensitive('a').matches('a'));
    assert!(!CharClass::CaseInsensitive('a').matches('b'));
    assert!(CharClass::Range('0', '9').matches('0'));
    assert!(CharClass::Range('0', '9').matches('9'));
    assert!(!CharClass::Range('0', '9').matches('a'));
}

#[test]
fn test_char_class_display() {
    assert_eq!(CharClass::Exact('/').to_string(), "%x2F");
    assert_eq!(CharClass::CaseInsensitive('t').to_string(), "%i\"t\"");
    assert_eq!(CharClass::Range('A', 'Z').to_string(), "%x41-5A");
}

// --- Terminal ---

#[test]
fn test_terminal_slash_and_equals() {
    let input = Input::new("/=");
    let origin = origin_cell(&input);
    let slash = Deferred::terminal(SLASH, origin, CharClass::Exact('/'));
    let eq = Deferred::terminal(EQ, slash.outcome_cell().clone(), CharClass::Exact('='));

    let outcome = eq.realize();
    let node = outcome.node().unwrap();
    assert_eq!(node.kind(), &RealizedKind::Token('='));
    assert_eq!(node.span(), Span::new(1, 2));
    assert!(outcome.remainder().is_at_end());
    assert_eq!(slash.realize().node().map(Realized::text), Some("/".to_string()));
}

#[test]
fn test_terminal_failure_stays_put() {
    let input = Input::new("x");
    let digit = Deferred::terminal(DIGIT, origin_cell(&input), CharClass::Range('0', '9'));
    assert_eq!(
        digit.realize(),
        MatchOutcome::failed(input.cursor(), Expected::single(DIGIT))
    );
}

#[test]
fn test_terminal_at_end_of_input_fails() {
    let input = Input::new("");
    let digit = Deferred::terminal(DIGIT, origin_cell(&input), CharClass::Range('0', '9'));
    assert!(digit.realize().is_failure());
}

#[test]
fn test_failed_predecessor_propagates() {
    let input = Input::new("x0");
    let first = Deferred::terminal(DIGIT, origin_cell(&input), CharClass::Range('0', '9'));
    let second = Deferred::terminal(X30, first.outcome_cell().clone(), CharClass::Exact('0'));
    assert_eq!(second.realize(), first.realize());
}

// --- Literal ---

#[test]
fn test_literal_failure_passes_through_verbatim() {
    let input = Input::new("1");
    let x30 = Deferred::terminal(X30, origin_cell(&input), CharClass::Exact('0'));
    let child_outcome = x30.realize();
    let literal = Deferred::literal(RuleId::new(9), x30);
    assert_eq!(literal.realize(), child_outcome);
}

// --- Sequence ---

#[test]
fn test_sequence_zero_a() {
    let input = Input::new("0a");
    let origin = origin_cell(&input);
    let zero = Deferred::terminal(X30, origin.clone(), CharClass::Exact('0'));
    let a = Deferred::terminal(XA, zero.outcome_cell().clone(), CharClass::CaseInsensitive('a'));
    let seq = Deferred::sequence(
        SEQ,
        origin,
        vec![SequenceSlot::ready("_0_1", zero), SequenceSlot::ready("_A_1", a)],
    );

    let outcome = seq.realize();
    let node = outcome.node().unwrap();
    assert_eq!(node.text(), "0a");
    assert_eq!(outcome.position(), 2);
    let labels: Vec<&str> = match node.kind() {
        RealizedKind::Sequence(members) => members.iter().map(|m| &*m.label).collect(),
        other => panic!("expected sequence, got {other:?}"),
    };
    assert_eq!(labels, vec!["_0_1", "_A_1"]);
}

#[test]
fn test_sequence_fails_when_first_member_fails() {
    // The second member is bound to a point where it would match on its
    // own; the sequence must still fail because the first member does.
    let input = Input::new("XA");
    let origin = origin_cell(&input);
    let zero = Deferred::terminal(X30, origin.clone(), CharClass::Exact('0'));
    let after_x = Deferred::origin(input.cursor().advance());
    let a = Deferred::terminal(XA, after_x.outcome_cell().clone(), CharClass::Exact('A'));
    assert!(a.realize().is_success());

    let seq = Deferred::sequence(
        SEQ,
        origin,
        vec![SequenceSlot::ready("_0_1", zero), SequenceSlot::ready("_A_1", a)],
    );
    assert_eq!(
        seq.realize(),
        MatchOutcome::failed(input.cursor(), Expected::single(X30))
    );
}

#[test]
fn test_sequence_short_circuits() {
    let built = Cell::new(0);
    let input = Input::new("x0");
    let origin = origin_cell(&input);
    let zero = Deferred::terminal(X30, origin.clone(), CharClass::Exact('0'));
    let zero_cell = zero.outcome_cell().clone();
    let later = LazyCell::new(|| {
        built.set(built.get() + 1);
        Deferred::terminal(XA, zero_cell, CharClass::Exact('A'))
    });

    let seq = Deferred::sequence(
        SEQ,
        origin,
        vec![SequenceSlot::ready("_0_1", zero), SequenceSlot::new("_A_1", later)],
    );
    assert!(seq.realize().is_failure());
    assert_eq!(built.get(), 0);
}

#[test]
fn test_empty_sequence_matches_empty() {
    let input = Input::new("abc");
    let seq = Deferred::sequence(SEQ, origin_cell(&input), Vec::new());
    let outcome = seq.realize();
    assert_eq!(outcome.position(), 0);
    assert_eq!(outcome.node().map(Realized::text), Some(String::new()));
}

// --- Alternation ---

#[test]
fn test_alternation_takes_first_success() {
    let input = Input::new("12");
    let origin = origin_cell(&input);
    let one = Deferred::terminal(DIGIT, origin.clone(), CharClass::Range('0', '9'));
    let two = {
        let first = Deferred::terminal(DIGIT, origin.clone(), CharClass::Range('0', '9'));
        let second = Deferred::terminal(DIGIT, first.outcome_cell().clone(), CharClass::Range('0', '9'));
        Deferred::sequence(
            SEQ,
            origin.clone(),
            vec![SequenceSlot::ready("_a_1", first), SequenceSlot::ready("_b_1", second)],
        )
    };
    let alt = Deferred::alternation(ALT, origin, vec![LazyCell::ready(one), LazyCell::ready(two)]);

    let node = alt.realize().into_node().unwrap();
    assert_eq!(node.alternative(), Some(0));
    assert_eq!(node.text(), "1");
}

#[test]
fn test_alternation_skips_failures_and_stops_at_winner() {
    let built = Cell::new(0);
    let input = Input::new("a");
    let origin = origin_cell(&input);
    let counter = &built;
    let third_pred = origin.clone();
    let alternatives = vec![
        LazyCell::ready(Deferred::terminal(DIGIT, origin.clone(), CharClass::Range('0', '9'))),
        LazyCell::ready(Deferred::terminal(XA, origin.clone(), CharClass::CaseInsensitive('a'))),
        LazyCell::new(move || {
            counter.set(counter.get() + 1);
            Deferred::terminal(X30, third_pred, CharClass::Exact('0'))
        }),
    ];
    let alt = Deferred::alternation(ALT, origin.clone(), alternatives);

    let node = alt.realize().into_node().unwrap();
    assert_eq!(node.alternative(), Some(1));
    assert_eq!(node.span(), Span::new(0, 1));
    assert_eq!(built.get(), 0);
}

#[test]
fn test_alternation_reports_furthest_failure() {
    let input = Input::new("0b");
    let origin = origin_cell(&input);
    let near = Deferred::terminal(XA, origin.clone(), CharClass::Exact('A'));
    let far = {
        let zero = Deferred::terminal(X30, origin.clone(), CharClass::Exact('0'));
        let digit = Deferred::terminal(DIGIT, zero.outcome_cell().clone(), CharClass::Range('0', '9'));
        Deferred::sequence(
            SEQ,
            origin.clone(),
            vec![SequenceSlot::ready("_0_1", zero), SequenceSlot::ready("_d_1", digit)],
        )
    };
    let alt = Deferred::alternation(ALT, origin, vec![LazyCell::ready(near), LazyCell::ready(far)]);

    assert_eq!(
        alt.realize(),
        MatchOutcome::failed(input.cursor().advance(), Expected::single(DIGIT))
    );
}

#[test]
fn test_alternation_merges_equal_failures() {
    let input = Input::new("?");
    let origin = origin_cell(&input);
    let alt = Deferred::alternation(
        ALT,
        origin.clone(),
        vec![
            LazyCell::ready(Deferred::terminal(SLASH, origin.clone(), CharClass::Exact('/'))),
            LazyCell::ready(Deferred::terminal(EQ, origin, CharClass::Exact('='))),
        ],
    );
    let expected: Expected = [SLASH, EQ].into_iter().collect();
    assert_eq!(alt.realize(), MatchOutcome::failed(input.cursor(), expected));
}

// --- Repeat ---

fn digits<'src>(input: &'src Input, min: u32, max: Option<u32>) -> MatchOutcome<'src> {
    let origin = origin_cell(input);
    repeat(REP, &origin, min, max, |prev| {
        Deferred::terminal(DIGIT, prev, CharClass::Range('0', '9'))
    })
}

#[test]
fn test_repeat_is_greedy_up_to_max() {
    let input = Input::new("12345x");
    assert_eq!(digits(&input, 0, None).position(), 5);
    assert_eq!(digits(&input, 1, Some(3)).position(), 3);

    let node = digits(&input, 1, Some(3)).into_node().unwrap();
    assert_eq!(node.children().len(), 3);
    assert_eq!(node.text(), "123");
}

#[test]
fn test_repeat_zero_matches_is_empty_success() {
    let input = Input::new("x");
    let outcome = digits(&input, 0, Some(1));
    assert!(outcome.is_success());
    assert_eq!(outcome.position(), 0);
}

#[test]
fn test_repeat_below_min_fails_at_stopping_point() {
    let input = Input::new("12x");
    assert_eq!(
        digits(&input, 3, None),
        MatchOutcome::failed(input.cursor().at(2), Expected::single(DIGIT))
    );
}

#[test]
fn test_repeat_stops_on_zero_width_item() {
    let input = Input::new("abc");
    let origin = origin_cell(&input);
    let outcome = repeat(REP, &origin, 2, None, |prev| {
        Deferred::sequence(SEQ, prev, Vec::new())
    });
    let node = outcome.into_node().unwrap();
    assert_eq!(node.children().len(), 1);
    assert_eq!(node.span(), Span::new(0, 0));
}

//! Node combinators.
//!
//! Each function here is the body of a deferred node: it computes a
//! [`MatchOutcome`] from the node's predecessor and children. None of them
//! touch the grammar table, so they work just as well on hand-built node
//! chains (see the `Deferred::terminal` family of constructors) as inside a
//! [`Session`](crate::Session).
//!
//! Every combinator begins by forcing its predecessor. A failed predecessor
//! is returned unchanged; nothing downstream of a failure matches.
//!
//! # Sequence and alternation
//!
//! A sequence forces its members in order and stops at the first failure,
//! returning that member's outcome. Members after it are never constructed.
//! An alternation constructs and realizes alternatives one at a time and
//! returns the first success. When all fail, the result is the failure that
//! reached furthest into the input, with the expected sets of equally-far
//! failures merged.

mod char_class;

use std::sync::Arc;

use tracing::trace;

use crate::cursor::Cursor;
use crate::grammar::RuleId;
use crate::lazy::LazyCell;
use crate::node::{CstNode, Deferred, Member, OutcomeCell, Realized};
use crate::outcome::{furthest, Expected, MatchOutcome};

pub use char_class::CharClass;

#[cfg(test)]
mod tests;

/// One labelled member of a sequence, constructed on first use.
#[derive(Clone)]
pub struct SequenceSlot<'src> {
    pub label: Arc<str>,
    pub node: LazyCell<'src, Deferred<'src>>,
}

impl<'src> SequenceSlot<'src> {
    pub fn new(label: &str, node: LazyCell<'src, Deferred<'src>>) -> Self {
        SequenceSlot {
            label: Arc::from(label),
            node,
        }
    }

    /// A slot holding an already-constructed node.
    pub fn ready(label: &str, node: Deferred<'src>) -> Self {
        Self::new(label, LazyCell::ready(node))
    }
}

/// Where the predecessor stopped, or its failure.
fn start_cursor<'src>(pred: &OutcomeCell<'src>) -> Result<Cursor<'src>, MatchOutcome<'src>> {
    match pred.force() {
        MatchOutcome::Matched { remainder, .. } => Ok(*remainder),
        failed @ MatchOutcome::Failed { .. } => Err(failed.clone()),
    }
}

/// Match one token of `class` at the predecessor's remainder.
pub fn terminal<'src>(rule: RuleId, pred: &OutcomeCell<'src>, class: CharClass) -> MatchOutcome<'src> {
    let start = match start_cursor(pred) {
        Ok(cursor) => cursor,
        Err(failed) => return failed,
    };
    match start.current() {
        Some(c) if class.matches(c) => {
            let end = start.advance();
            MatchOutcome::matched(Realized::token(rule, start, end, c), end)
        }
        _ => MatchOutcome::failed(start, Expected::single(rule)),
    }
}

/// Wrap `child`'s match; a failing child's outcome passes through unchanged.
pub fn literal<'src>(rule: RuleId, child: &Deferred<'src>) -> MatchOutcome<'src> {
    match child.realize() {
        MatchOutcome::Matched { node, remainder } => {
            MatchOutcome::matched(Realized::literal(rule, node), remainder)
        }
        failed @ MatchOutcome::Failed { .. } => failed,
    }
}

/// Match every slot in order.
pub fn sequence<'src>(
    rule: RuleId,
    pred: &OutcomeCell<'src>,
    slots: &[SequenceSlot<'src>],
) -> MatchOutcome<'src> {
    let start = match start_cursor(pred) {
        Ok(cursor) => cursor,
        Err(failed) => return failed,
    };

    let mut members = Vec::with_capacity(slots.len());
    let mut end = start;
    for slot in slots {
        match slot.node.force().realize() {
            MatchOutcome::Matched { node, remainder } => {
                members.push(Member {
                    label: Arc::clone(&slot.label),
                    node,
                });
                end = remainder;
            }
            failed @ MatchOutcome::Failed { .. } => {
                trace!(?rule, label = %slot.label, pos = failed.position(), "sequence member failed");
                return failed;
            }
        }
    }
    MatchOutcome::matched(Realized::sequence(rule, start, end, members), end)
}

/// Match the first alternative that succeeds.
///
/// `alternatives` is consumed lazily; alternatives after the winner are never
/// constructed.
pub fn alternation<'src, I>(rule: RuleId, pred: &OutcomeCell<'src>, alternatives: I) -> MatchOutcome<'src>
where
    I: IntoIterator<Item = Deferred<'src>>,
{
    let start = match start_cursor(pred) {
        Ok(cursor) => cursor,
        Err(failed) => return failed,
    };

    let mut best = (start, Expected::none());
    for (index, alternative) in alternatives.into_iter().enumerate() {
        match alternative.realize() {
            MatchOutcome::Matched { node, remainder } => {
                return MatchOutcome::matched(Realized::choice(rule, index, node), remainder);
            }
            MatchOutcome::Failed { at, expected } => {
                best = furthest(best, (at, expected));
            }
        }
    }
    let (at, expected) = best;
    MatchOutcome::failed(at, expected)
}

/// Match `min..=max` consecutive items.
///
/// `next` builds the item bound to the previous item's outcome (the
/// predecessor's, for the first). Iteration stops at `max`, at the first
/// failing item, or after an item that matched without consuming anything;
/// the last case counts as satisfying `min` since the item could match there
/// forever.
pub fn repeat<'src, F>(
    rule: RuleId,
    pred: &OutcomeCell<'src>,
    min: u32,
    max: Option<u32>,
    mut next: F,
) -> MatchOutcome<'src>
where
    F: FnMut(OutcomeCell<'src>) -> Deferred<'src>,
{
    let start = match start_cursor(pred) {
        Ok(cursor) => cursor,
        Err(failed) => return failed,
    };

    let mut items = Vec::new();
    let mut prev = pred.clone();
    let mut end = start;
    let mut stalled = false;
    let mut failure = None;
    while max.map_or(true, |max| items.len() < max as usize) {
        let item = next(prev);
        match item.realize() {
            MatchOutcome::Matched { node, remainder } => {
                stalled = remainder.position() == end.position();
                items.push(node);
                end = remainder;
                prev = item.outcome_cell().clone();
                if stalled {
                    break;
                }
            }
            failed @ MatchOutcome::Failed { .. } => {
                failure = Some(failed);
                break;
            }
        }
    }

    if items.len() < min as usize && !stalled {
        if let Some(failed) = failure {
            return failed;
        }
    }
    MatchOutcome::matched(Realized::repeat(rule, start, end, items), end)
}

impl<'src> Deferred<'src> {
    /// A terminal bound to `pred`.
    pub fn terminal(rule: RuleId, pred: OutcomeCell<'src>, class: CharClass) -> Self {
        Deferred::new(rule, move || terminal(rule, &pred, class))
    }

    /// A literal around `child`. The child keeps its own binding.
    pub fn literal(rule: RuleId, child: Deferred<'src>) -> Self {
        Deferred::new(rule, move || literal(rule, &child))
    }

    /// A sequence over `slots`, starting where `pred` ends.
    ///
    /// The caller binds each slot's node to the previous one; the sequence
    /// only checks that every member matches.
    pub fn sequence(rule: RuleId, pred: OutcomeCell<'src>, slots: Vec<SequenceSlot<'src>>) -> Self {
        Deferred::new(rule, move || sequence(rule, &pred, &slots))
    }

    /// An alternation over lazily-built alternatives, each bound to `pred`.
    pub fn alternation(
        rule: RuleId,
        pred: OutcomeCell<'src>,
        alternatives: Vec<LazyCell<'src, Deferred<'src>>>,
    ) -> Self {
        Deferred::new(rule, move || {
            alternation(rule, &pred, alternatives.iter().map(|cell| cell.force().clone()))
        })
    }
}

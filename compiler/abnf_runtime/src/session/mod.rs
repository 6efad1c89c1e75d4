//! Parse sessions: grammar-driven node construction with packrat memoization.
//!
//! A [`Session`] ties a [`Grammar`] to one input. [`Session::deferred`] turns
//! a rule id and a predecessor into a deferred node whose thunk looks up the
//! rule's production and runs the matching combinator. Results are cached per
//! `(rule, position)`, so a rule evaluated at the same position from two
//! different places in the grammar runs once.
//!
//! The cache also guards against left recursion the static check missed: a
//! rule that re-enters itself at the same position finds its own
//! in-progress marker and panics instead of looping.
//!
//! The session remembers the furthest failure any terminal or literal
//! reached, which is what [`Parser`](crate::Parser) reports on a failed parse.

mod stats;

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::Arc;

use abnf_stack::ensure_sufficient_stack;
use rustc_hash::FxHashMap;
use tracing::trace;

use crate::combinator::{self, SequenceSlot};
use crate::config::ParseConfig;
use crate::cursor::{Cursor, Input};
use crate::grammar::{Grammar, Production, RuleId, SeqMember};
use crate::lazy::LazyCell;
use crate::node::{Deferred, OutcomeCell};
use crate::outcome::{furthest, Expected, MatchOutcome};

pub use stats::ParseStats;


#[derive(Clone)]
enum MemoEntry<'src> {
    InProgress,
    /// `reported` is false when the failure was muted by an enclosing
    /// literal and has not reached the furthest-failure record yet.
    Done {
        outcome: MatchOutcome<'src>,
        reported: bool,
    },
}

struct Inner<'src> {
    grammar: &'src Grammar,
    origin: Cursor<'src>,
    config: ParseConfig,
    memo: RefCell<FxHashMap<(RuleId, usize), MemoEntry<'src>>>,
    stats: RefCell<ParseStats>,
    furthest: RefCell<Option<(Cursor<'src>, Expected)>>,
    /// Nonzero while evaluating inside a literal, whose own failure is
    /// reported in place of its characters'.
    quiet: Cell<u32>,
}

/// Shared state for one parse of one input. Cheap to clone.
#[derive(Clone)]
pub struct Session<'src> {
    inner: Rc<Inner<'src>>,
}

impl<'src> Session<'src> {
    pub fn new(grammar: &'src Grammar, input: &'src Input, config: ParseConfig) -> Self {
        Session {
            inner: Rc::new(Inner {
                grammar,
                origin: input.cursor(),
                config,
                memo: RefCell::new(FxHashMap::default()),
                stats: RefCell::new(ParseStats::default()),
                furthest: RefCell::new(None),
                quiet: Cell::new(0),
            }),
        }
    }

    #[inline]
    pub fn grammar(&self) -> &'src Grammar {
        self.inner.grammar
    }

    #[inline]
    pub fn config(&self) -> ParseConfig {
        self.inner.config
    }

    /// The empty match at the start of the input.
    pub fn origin(&self) -> Deferred<'src> {
        Deferred::origin(self.inner.origin)
    }

    /// `rule` bound to the origin.
    pub fn start(&self, rule: RuleId) -> Deferred<'src> {
        self.deferred(rule, self.origin().outcome_cell().clone())
    }

    /// `rule` bound to `pred`: it will try to match where `pred` ends.
    pub fn deferred(&self, rule: RuleId, pred: OutcomeCell<'src>) -> Deferred<'src> {
        let session = self.clone();
        Deferred::new(rule, move || session.evaluate(rule, &pred))
    }

    /// Snapshot of the evaluation counters.
    pub fn stats(&self) -> ParseStats {
        self.inner.stats.borrow().clone()
    }

    /// Furthest failure seen so far, with what was expected there.
    pub fn furthest_failure(&self) -> Option<(Cursor<'src>, Expected)> {
        self.inner.furthest.borrow().clone()
    }

    /// Number of cached `(rule, position)` results.
    pub fn memo_len(&self) -> usize {
        self.inner
            .memo
            .borrow()
            .values()
            .filter(|entry| matches!(entry, MemoEntry::Done { .. }))
            .count()
    }

    fn evaluate(&self, rule: RuleId, pred: &OutcomeCell<'src>) -> MatchOutcome<'src> {
        let start = match pred.force() {
            MatchOutcome::Matched { remainder, .. } => *remainder,
            failed @ MatchOutcome::Failed { .. } => return failed.clone(),
        };
        let pos = start.position();
        let key = (rule, pos);
        let name = self.inner.grammar.name(rule);

        let cached = self.inner.memo.borrow().get(&key).cloned();
        match cached {
            Some(MemoEntry::Done { outcome, reported }) => {
                self.inner.stats.borrow_mut().record_memo_hit();
                trace!(rule = name, pos, "memo hit");
                if !reported && self.note_failure(rule, &outcome) {
                    self.inner.memo.borrow_mut().insert(
                        key,
                        MemoEntry::Done {
                            outcome: outcome.clone(),
                            reported: true,
                        },
                    );
                }
                return outcome;
            }
            Some(MemoEntry::InProgress) => {
                panic!("rule `{name}` re-entered at position {pos} without consuming input (left recursion)")
            }
            None => {}
        }

        self.inner.memo.borrow_mut().insert(key, MemoEntry::InProgress);
        trace!(rule = name, pos, "evaluate");

        let outcome = ensure_sufficient_stack(|| self.evaluate_production(rule, pred));

        self.inner.stats.borrow_mut().record_evaluation(rule);
        let reported = self.note_failure(rule, &outcome);
        {
            let mut memo = self.inner.memo.borrow_mut();
            if self.inner.config.memoize {
                memo.insert(
                    key,
                    MemoEntry::Done {
                        outcome: outcome.clone(),
                        reported,
                    },
                );
            } else {
                memo.remove(&key);
            }
        }

        trace!(
            rule = name,
            pos,
            matched = outcome.is_success(),
            end = outcome.position(),
            "evaluated"
        );
        outcome
    }

    fn evaluate_production(&self, rule: RuleId, pred: &OutcomeCell<'src>) -> MatchOutcome<'src> {
        let grammar = self.inner.grammar;
        match grammar.production(rule) {
            Production::Terminal(class) => combinator::terminal(rule, pred, *class),
            Production::Literal(child) => {
                let child = self.deferred(*child, pred.clone());
                self.inner.quiet.set(self.inner.quiet.get() + 1);
                let outcome = combinator::literal(rule, &child);
                self.inner.quiet.set(self.inner.quiet.get() - 1);
                outcome
            }
            Production::Sequence(members) => {
                let slots = self.sequence_slots(members, pred);
                combinator::sequence(rule, pred, &slots)
            }
            Production::Alternation(alternatives) => combinator::alternation(
                rule,
                pred,
                alternatives
                    .iter()
                    .map(|&alternative| self.deferred(alternative, pred.clone())),
            ),
            Production::Repeat {
                rule: item,
                min,
                max,
            } => combinator::repeat(rule, pred, *min, *max, |prev| self.deferred(*item, prev)),
            Production::Unimplemented => panic!(
                "rule `{}` has no production; Parser::new rejects start rules that reach it",
                grammar.name(rule)
            ),
        }
    }

    /// One lazily-built slot per member, each bound to the member before it.
    fn sequence_slots(
        &self,
        members: &'src [SeqMember],
        pred: &OutcomeCell<'src>,
    ) -> Vec<SequenceSlot<'src>> {
        let mut slots: Vec<SequenceSlot<'src>> = Vec::with_capacity(members.len());
        for member in members {
            let session = self.clone();
            let rule = member.rule;
            let node = match slots.last() {
                None => {
                    let pred = pred.clone();
                    LazyCell::new(move || session.deferred(rule, pred))
                }
                Some(previous) => {
                    let previous = previous.node.clone();
                    LazyCell::new(move || {
                        let pred = previous.force().outcome_cell().clone();
                        session.deferred(rule, pred)
                    })
                }
            };
            slots.push(SequenceSlot {
                label: Arc::clone(&member.label),
                node,
            });
        }
        slots
    }

    /// Feed a terminal or literal failure into the furthest-failure record.
    ///
    /// Returns false only when the failure was muted by an enclosing literal,
    /// so a later memo hit outside that literal can still report it.
    fn note_failure(&self, rule: RuleId, outcome: &MatchOutcome<'src>) -> bool {
        let MatchOutcome::Failed { at, expected } = outcome else {
            return true;
        };
        let expected = match self.inner.grammar.production(rule) {
            Production::Terminal(_) => expected.clone(),
            Production::Literal(_) => Expected::single(rule),
            _ => return true,
        };
        if self.inner.quiet.get() > 0 {
            return false;
        }

        let mut slot = self.inner.furthest.borrow_mut();
        *slot = Some(match slot.take() {
            None => (*at, expected),
            Some(current) => furthest(current, (*at, expected)),
        });
        true
    }
}

//! Match outcomes.
//!
//! Every realization ends in a [`MatchOutcome`]: either a realized node plus
//! the cursor just after it, or a failure position plus the rules that could
//! have matched there. Failures carry an [`Expected`] set so alternation can
//! report the furthest point any alternative reached, the same way a
//! hand-written parser accumulates expected tokens across `one_of!` arms.

use smallvec::SmallVec;

use crate::cursor::Cursor;
use crate::grammar::RuleId;
use crate::node::Realized;


/// Rules that would have allowed a match at a failure position.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Expected(SmallVec<[RuleId; 4]>);

impl Expected {
    #[inline]
    pub fn none() -> Self {
        Expected(SmallVec::new())
    }

    #[inline]
    pub fn single(rule: RuleId) -> Self {
        let mut set = SmallVec::new();
        set.push(rule);
        Expected(set)
    }

    /// Add `rule` unless already present. Insertion order is kept.
    pub fn insert(&mut self, rule: RuleId) {
        if !self.0.contains(&rule) {
            self.0.push(rule);
        }
    }

    /// Add every rule in `other`.
    pub fn union_with(&mut self, other: &Expected) {
        for &rule in &other.0 {
            self.insert(rule);
        }
    }

    #[inline]
    pub fn contains(&self, rule: RuleId) -> bool {
        self.0.contains(&rule)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = RuleId> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<RuleId> for Expected {
    fn from_iter<I: IntoIterator<Item = RuleId>>(iter: I) -> Self {
        let mut set = Expected::none();
        for rule in iter {
            set.insert(rule);
        }
        set
    }
}

/// Result of realizing a node.
///
/// On success, `remainder` is the cursor immediately after the matched
/// tokens. On failure, `at` is the cursor where matching stopped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MatchOutcome<'src> {
    Matched {
        node: Realized<'src>,
        remainder: Cursor<'src>,
    },
    Failed {
        at: Cursor<'src>,
        expected: Expected,
    },
}

impl<'src> MatchOutcome<'src> {
    #[inline]
    pub fn matched(node: Realized<'src>, remainder: Cursor<'src>) -> Self {
        MatchOutcome::Matched { node, remainder }
    }

    #[cold]
    pub fn failed(at: Cursor<'src>, expected: Expected) -> Self {
        MatchOutcome::Failed { at, expected }
    }

    /// Outcome of the origin node: an empty match at `cursor`.
    pub fn origin(cursor: Cursor<'src>) -> Self {
        MatchOutcome::matched(Realized::origin(cursor), cursor)
    }

    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, MatchOutcome::Matched { .. })
    }

    #[inline]
    pub fn is_failure(&self) -> bool {
        matches!(self, MatchOutcome::Failed { .. })
    }

    /// The cursor after the match, or where the failure happened.
    #[inline]
    pub fn remainder(&self) -> Cursor<'src> {
        match self {
            MatchOutcome::Matched { remainder, .. } => *remainder,
            MatchOutcome::Failed { at, .. } => *at,
        }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.remainder().position()
    }

    pub fn node(&self) -> Option<&Realized<'src>> {
        match self {
            MatchOutcome::Matched { node, .. } => Some(node),
            MatchOutcome::Failed { .. } => None,
        }
    }

    pub fn into_node(self) -> Option<Realized<'src>> {
        match self {
            MatchOutcome::Matched { node, .. } => Some(node),
            MatchOutcome::Failed { .. } => None,
        }
    }

    pub fn expected(&self) -> Option<&Expected> {
        match self {
            MatchOutcome::Matched { .. } => None,
            MatchOutcome::Failed { expected, .. } => Some(expected),
        }
    }

    /// Try `f` if this outcome failed, keeping the furthest failure.
    ///
    /// When both fail, the failure that got further wins; at equal positions
    /// the expected sets are merged.
    #[must_use]
    pub fn or_else_accumulate(self, f: impl FnOnce() -> MatchOutcome<'src>) -> MatchOutcome<'src> {
        match self {
            MatchOutcome::Matched { .. } => self,
            MatchOutcome::Failed { at, expected } => match f() {
                ok @ MatchOutcome::Matched { .. } => ok,
                MatchOutcome::Failed {
                    at: other_at,
                    expected: other_expected,
                } => {
                    let (at, expected) = furthest((at, expected), (other_at, other_expected));
                    MatchOutcome::Failed { at, expected }
                }
            },
        }
    }
}

/// The further of two failures; equal positions merge their expected sets.
pub(crate) fn furthest<'src>(
    a: (Cursor<'src>, Expected),
    b: (Cursor<'src>, Expected),
) -> (Cursor<'src>, Expected) {
    use std::cmp::Ordering;

    match a.0.position().cmp(&b.0.position()) {
        Ordering::Greater => a,
        Ordering::Less => b,
        Ordering::Equal => {
            let (at, mut expected) = a;
            expected.union_with(&b.1);
            (at, expected)
        }
    }
}

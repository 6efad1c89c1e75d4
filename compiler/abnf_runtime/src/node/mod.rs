//! Concrete syntax tree nodes.
//!
//! A node exists in one of two shapes:
//!
//! - [`Deferred`]: a rule bound to a predecessor whose match has not been
//!   computed yet. It owns a shared [`OutcomeCell`]; realizing forces the cell.
//! - [`Realized`]: a successful match with its span and children. Realized
//!   values are only produced by the combinators in this crate, never built by
//!   hand, so every one of them describes tokens that actually matched.
//!
//! [`Node`] holds either shape, and [`CstNode`] is the interface both share:
//! `realize` produces the outcome, `convert` produces a deferred handle that
//! can be spliced into a larger tree without re-parsing anything.
//!
//! ```compile_fail
//! use abnf_runtime::{Input, Realized, RuleId};
//!
//! let input = Input::new("a");
//! // Realized nodes come from combinators only.
//! let forged = Realized::token(RuleId::new(0), input.cursor(), input.cursor().advance(), 'a');
//! ```

mod dump;

use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use abnf_diagnostic::Span;

use crate::cursor::Cursor;
use crate::grammar::RuleId;
use crate::lazy::LazyCell;
use crate::outcome::MatchOutcome;

#[cfg(test)]
mod tests;

/// Shared storage for a node's eventual outcome.
pub type OutcomeCell<'src> = LazyCell<'src, MatchOutcome<'src>>;

/// Operations every node shape supports.
pub trait CstNode<'src> {
    /// Compute (or read back) the match outcome.
    fn realize(&self) -> MatchOutcome<'src>;

    /// A deferred handle to this node.
    ///
    /// Never forces anything. A node that already holds its outcome becomes
    /// a deferred wrapping a pre-filled cell; a node that does not shares its
    /// existing cell, so the eventual evaluation still happens exactly once.
    fn convert(&self) -> Deferred<'src>;
}

/// A successfully matched node.
///
/// Cheap to clone. Equality is structural.
#[derive(Clone, PartialEq, Eq)]
pub struct Realized<'src>(Rc<RealizedData<'src>>);

#[derive(PartialEq, Eq)]
struct RealizedData<'src> {
    rule: RuleId,
    start: Cursor<'src>,
    end: Cursor<'src>,
    kind: RealizedKind<'src>,
}

/// Children owned only by this node are unlinked onto a worklist, so a deep
/// tree drops without recursing once per level.
impl Drop for RealizedData<'_> {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.kind.take_children(&mut pending);
        while let Some(Realized(node)) = pending.pop() {
            if let Ok(mut data) = Rc::try_unwrap(node) {
                data.kind.take_children(&mut pending);
            }
        }
    }
}

/// What a realized node matched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RealizedKind<'src> {
    /// The empty match every parse starts from.
    Origin,
    /// One token accepted by a terminal.
    Token(char),
    /// A quoted literal and the node it wraps.
    Literal(Realized<'src>),
    /// Every member of a sequence, in order.
    Sequence(Vec<Member<'src>>),
    /// The first alternative that matched, by index.
    Choice {
        alternative: usize,
        node: Realized<'src>,
    },
    /// Each iteration of a repetition.
    Repeat(Vec<Realized<'src>>),
}

impl<'src> RealizedKind<'src> {
    /// Move the children out, leaving an empty origin behind.
    fn take_children(&mut self, out: &mut Vec<Realized<'src>>) {
        match std::mem::replace(self, RealizedKind::Origin) {
            RealizedKind::Origin | RealizedKind::Token(_) => {}
            RealizedKind::Literal(child) | RealizedKind::Choice { node: child, .. } => out.push(child),
            RealizedKind::Sequence(members) => out.extend(members.into_iter().map(|m| m.node)),
            RealizedKind::Repeat(items) => out.extend(items),
        }
    }
}

/// A labelled sequence member.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Member<'src> {
    pub label: Arc<str>,
    pub node: Realized<'src>,
}

impl<'src> Realized<'src> {
    fn from_parts(
        rule: RuleId,
        start: Cursor<'src>,
        end: Cursor<'src>,
        kind: RealizedKind<'src>,
    ) -> Self {
        Realized(Rc::new(RealizedData {
            rule,
            start,
            end,
            kind,
        }))
    }

    pub(crate) fn origin(at: Cursor<'src>) -> Self {
        Self::from_parts(RuleId::ORIGIN, at, at, RealizedKind::Origin)
    }

    pub(crate) fn token(rule: RuleId, start: Cursor<'src>, end: Cursor<'src>, token: char) -> Self {
        Self::from_parts(rule, start, end, RealizedKind::Token(token))
    }

    pub(crate) fn literal(rule: RuleId, child: Realized<'src>) -> Self {
        let (start, end) = (child.start(), child.end());
        Self::from_parts(rule, start, end, RealizedKind::Literal(child))
    }

    pub(crate) fn sequence(
        rule: RuleId,
        start: Cursor<'src>,
        end: Cursor<'src>,
        members: Vec<Member<'src>>,
    ) -> Self {
        Self::from_parts(rule, start, end, RealizedKind::Sequence(members))
    }

    pub(crate) fn choice(rule: RuleId, alternative: usize, node: Realized<'src>) -> Self {
        let (start, end) = (node.start(), node.end());
        Self::from_parts(rule, start, end, RealizedKind::Choice { alternative, node })
    }

    pub(crate) fn repeat(
        rule: RuleId,
        start: Cursor<'src>,
        end: Cursor<'src>,
        items: Vec<Realized<'src>>,
    ) -> Self {
        Self::from_parts(rule, start, end, RealizedKind::Repeat(items))
    }

    #[inline]
    pub fn rule(&self) -> RuleId {
        self.0.rule
    }

    #[inline]
    pub fn kind(&self) -> &RealizedKind<'src> {
        &self.0.kind
    }

    /// Cursor at the first matched token.
    #[inline]
    pub fn start(&self) -> Cursor<'src> {
        self.0.start
    }

    /// Cursor just past the last matched token.
    #[inline]
    pub fn end(&self) -> Cursor<'src> {
        self.0.end
    }

    #[inline]
    pub fn span(&self) -> Span {
        self.0.start.span_to(self.0.end)
    }

    /// Matched tokens.
    #[inline]
    pub fn tokens(&self) -> &'src [char] {
        self.0.start.slice_to(self.0.end)
    }

    /// Matched text.
    pub fn text(&self) -> String {
        self.tokens().iter().collect()
    }

    /// Direct children in order.
    pub fn children(&self) -> Vec<&Realized<'src>> {
        match &self.0.kind {
            RealizedKind::Origin | RealizedKind::Token(_) => Vec::new(),
            RealizedKind::Literal(child) | RealizedKind::Choice { node: child, .. } => vec![child],
            RealizedKind::Sequence(members) => members.iter().map(|m| &m.node).collect(),
            RealizedKind::Repeat(items) => items.iter().collect(),
        }
    }

    /// Sequence member by label.
    pub fn member(&self, label: &str) -> Option<&Realized<'src>> {
        match &self.0.kind {
            RealizedKind::Sequence(members) => members
                .iter()
                .find(|m| &*m.label == label)
                .map(|m| &m.node),
            _ => None,
        }
    }

    /// Index of the alternative a choice node took.
    pub fn alternative(&self) -> Option<usize> {
        match &self.0.kind {
            RealizedKind::Choice { alternative, .. } => Some(*alternative),
            _ => None,
        }
    }

    /// First node for `rule` in pre-order, this node included.
    pub fn find(&self, rule: RuleId) -> Option<&Realized<'src>> {
        if self.0.rule == rule {
            return Some(self);
        }
        self.children().into_iter().find_map(|child| child.find(rule))
    }

    /// Every node for `rule` in pre-order.
    pub fn find_all(&self, rule: RuleId) -> Vec<&Realized<'src>> {
        let mut found = Vec::new();
        self.collect(rule, &mut found);
        found
    }

    fn collect<'n>(&'n self, rule: RuleId, found: &mut Vec<&'n Realized<'src>>) {
        if self.0.rule == rule {
            found.push(self);
        }
        for child in self.children() {
            child.collect(rule, found);
        }
    }

    /// Whether two handles share the same allocation.
    #[inline]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }
}

impl<'src> CstNode<'src> for Realized<'src> {
    fn realize(&self) -> MatchOutcome<'src> {
        MatchOutcome::matched(self.clone(), self.end())
    }

    fn convert(&self) -> Deferred<'src> {
        Deferred::from_realized(self)
    }
}

impl fmt::Debug for Realized<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} {:?} ", self.0.rule, self.span())?;
        match &self.0.kind {
            RealizedKind::Origin => f.write_str("Origin"),
            RealizedKind::Token(c) => write!(f, "Token({c:?})"),
            RealizedKind::Literal(child) => f.debug_tuple("Literal").field(child).finish(),
            RealizedKind::Sequence(members) => f
                .debug_map()
                .entries(members.iter().map(|m| (&m.label, &m.node)))
                .finish(),
            RealizedKind::Choice { alternative, node } => {
                write!(f, "Choice#{alternative} ")?;
                node.fmt(f)
            }
            RealizedKind::Repeat(items) => f.debug_list().entries(items).finish(),
        }
    }
}

/// A node whose outcome has not necessarily been computed.
#[derive(Clone)]
pub struct Deferred<'src> {
    rule: RuleId,
    outcome: OutcomeCell<'src>,
}

impl<'src> Deferred<'src> {
    /// A deferred node for `rule` whose outcome `thunk` computes on demand.
    pub fn new(rule: RuleId, thunk: impl FnOnce() -> MatchOutcome<'src> + 'src) -> Self {
        Deferred {
            rule,
            outcome: LazyCell::new(thunk),
        }
    }

    /// A deferred node sharing an existing cell.
    pub fn from_cell(rule: RuleId, outcome: OutcomeCell<'src>) -> Self {
        Deferred { rule, outcome }
    }

    /// A deferred node whose cell is pre-filled with `node`'s outcome.
    pub fn from_realized(node: &Realized<'src>) -> Self {
        Deferred {
            rule: node.rule(),
            outcome: LazyCell::ready(node.realize()),
        }
    }

    /// The origin node: an empty match at `cursor`.
    pub fn origin(cursor: Cursor<'src>) -> Self {
        Deferred {
            rule: RuleId::ORIGIN,
            outcome: LazyCell::ready(MatchOutcome::origin(cursor)),
        }
    }

    #[inline]
    pub fn rule(&self) -> RuleId {
        self.rule
    }

    /// The shared cell; successors bind to this.
    #[inline]
    pub fn outcome_cell(&self) -> &OutcomeCell<'src> {
        &self.outcome
    }

    #[inline]
    pub fn is_forced(&self) -> bool {
        self.outcome.is_forced()
    }

    /// Force the cell and borrow the outcome.
    #[inline]
    pub fn force(&self) -> &MatchOutcome<'src> {
        self.outcome.force()
    }
}

impl<'src> CstNode<'src> for Deferred<'src> {
    fn realize(&self) -> MatchOutcome<'src> {
        self.outcome.force().clone()
    }

    fn convert(&self) -> Deferred<'src> {
        match self.outcome.get() {
            Some(outcome) => Deferred {
                rule: self.rule,
                outcome: LazyCell::ready(outcome.clone()),
            },
            None => self.clone(),
        }
    }
}

impl fmt::Debug for Deferred<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deferred")
            .field("rule", &self.rule)
            .field("outcome", &self.outcome)
            .finish()
    }
}

/// A node in either shape.
#[derive(Clone, Debug)]
pub enum Node<'src> {
    Deferred(Deferred<'src>),
    Realized(Realized<'src>),
}

impl<'src> Node<'src> {
    pub fn rule(&self) -> RuleId {
        match self {
            Node::Deferred(d) => d.rule(),
            Node::Realized(r) => r.rule(),
        }
    }

    /// Whether the node's outcome is known without evaluating anything.
    pub fn is_realized(&self) -> bool {
        match self {
            Node::Deferred(d) => d.is_forced(),
            Node::Realized(_) => true,
        }
    }
}

impl<'src> CstNode<'src> for Node<'src> {
    fn realize(&self) -> MatchOutcome<'src> {
        match self {
            Node::Deferred(d) => d.realize(),
            Node::Realized(r) => r.realize(),
        }
    }

    fn convert(&self) -> Deferred<'src> {
        match self {
            Node::Deferred(d) => d.convert(),
            Node::Realized(r) => r.convert(),
        }
    }
}

impl<'src> From<Deferred<'src>> for Node<'src> {
    fn from(node: Deferred<'src>) -> Self {
        Node::Deferred(node)
    }
}

impl<'src> From<Realized<'src>> for Node<'src> {
    fn from(node: Realized<'src>) -> Self {
        Node::Realized(node)
    }
}

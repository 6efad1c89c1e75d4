//! Grammar tables.
//!
//! A [`Grammar`] is a flat table of named rules, each with one
//! [`Production`]. Rules refer to each other by [`RuleId`], so recursion in
//! the grammar is just an index that points back up the table. Tables are
//! built with [`GrammarBuilder`], which resolves names, synthesizes the small
//! rules ABNF writes inline (quoted literals, `%x` terminals, `[optional]`,
//! `n*m` repetition) and validates the result.

mod builder;
mod element;
mod validate;

use std::fmt;
use std::sync::Arc;

use abnf_diagnostic::{Diagnostic, ErrorCode};
use rustc_hash::FxHashMap;

use crate::combinator::CharClass;

pub use builder::GrammarBuilder;


/// Index of a rule in its [`Grammar`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RuleId(u32);

impl RuleId {
    /// The origin node's rule. Not present in any table.
    pub const ORIGIN: RuleId = RuleId(u32::MAX);

    #[inline]
    pub const fn new(index: u32) -> Self {
        RuleId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn is_origin(self) -> bool {
        self.0 == u32::MAX
    }
}

impl fmt::Debug for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_origin() {
            write!(f, "RuleId::ORIGIN")
        } else {
            write!(f, "RuleId({})", self.0)
        }
    }
}

/// A labelled reference inside a sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeqMember {
    pub label: Arc<str>,
    pub rule: RuleId,
}

/// How a rule matches.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Production {
    /// One token from a character class.
    Terminal(CharClass),
    /// A quoted literal wrapping a single child rule.
    Literal(RuleId),
    /// Every member, in order.
    Sequence(Vec<SeqMember>),
    /// The first alternative that matches.
    Alternation(Vec<RuleId>),
    /// `min` to `max` consecutive matches of `rule`; no `max` means unbounded.
    Repeat {
        rule: RuleId,
        min: u32,
        max: Option<u32>,
    },
    /// Declared but not written yet. Start rules must not reach one.
    Unimplemented,
}

impl Production {
    /// Rules this production refers to, in order.
    pub fn references(&self) -> Vec<RuleId> {
        match self {
            Production::Terminal(_) | Production::Unimplemented => Vec::new(),
            Production::Literal(child) | Production::Repeat { rule: child, .. } => vec![*child],
            Production::Sequence(members) => members.iter().map(|m| m.rule).collect(),
            Production::Alternation(alternatives) => alternatives.clone(),
        }
    }
}

/// A named rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rule {
    pub name: Arc<str>,
    pub production: Production,
}

/// An immutable, validated rule table.
#[derive(Clone, Debug)]
pub struct Grammar {
    rules: Vec<Rule>,
    by_name: FxHashMap<Arc<str>, RuleId>,
}

impl Grammar {
    pub(crate) fn from_rules(rules: Vec<Rule>) -> Self {
        let by_name = rules
            .iter()
            .enumerate()
            .map(|(index, rule)| (Arc::clone(&rule.name), RuleId::new(index_to_u32(index))))
            .collect();
        Grammar { rules, by_name }
    }

    /// The rule behind `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not from this grammar.
    #[inline]
    pub fn rule(&self, id: RuleId) -> &Rule {
        &self.rules[id.index()]
    }

    #[inline]
    pub fn production(&self, id: RuleId) -> &Production {
        &self.rule(id).production
    }

    /// Rule name, or `<origin>` for [`RuleId::ORIGIN`].
    pub fn name(&self, id: RuleId) -> &str {
        if id.is_origin() {
            return "<origin>";
        }
        self.rules.get(id.index()).map_or("<unknown>", |rule| &rule.name)
    }

    pub fn lookup(&self, name: &str) -> Option<RuleId> {
        self.by_name.get(name).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// All rules with their ids, in table order.
    pub fn iter(&self) -> impl Iterator<Item = (RuleId, &Rule)> {
        self.rules
            .iter()
            .enumerate()
            .map(|(index, rule)| (RuleId::new(index_to_u32(index)), rule))
    }

    /// Rules declared with no production yet.
    pub fn unimplemented(&self) -> Vec<RuleId> {
        self.iter()
            .filter(|(_, rule)| rule.production == Production::Unimplemented)
            .map(|(id, _)| id)
            .collect()
    }

    /// Every rule reachable from `start`, `start` included, in visit order.
    pub fn reachable(&self, start: RuleId) -> Vec<RuleId> {
        let mut seen = vec![false; self.rules.len()];
        let mut order = Vec::new();
        let mut stack = vec![start];
        while let Some(id) = stack.pop() {
            if std::mem::replace(&mut seen[id.index()], true) {
                continue;
            }
            order.push(id);
            let refs = self.production(id).references();
            stack.extend(refs.into_iter().rev());
        }
        order
    }

    /// Check that `start` can be parsed from: no reachable unimplemented
    /// production and no left recursion in its closure.
    pub fn check_start(&self, start: RuleId) -> Result<(), GrammarError> {
        let reachable = self.reachable(start);
        if let Some(stub) = reachable
            .iter()
            .copied()
            .find(|&id| *self.production(id) == Production::Unimplemented)
        {
            return Err(GrammarError::UnimplementedReachable {
                start: self.name(start).to_string(),
                rule: self.name(stub).to_string(),
            });
        }
        match validate::left_recursion(self, &reachable).into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// [`check_start`](Self::check_start) for each named start rule,
    /// collecting every problem.
    pub fn validate(&self, starts: &[&str]) -> Result<(), Vec<GrammarError>> {
        let errors: Vec<GrammarError> = starts
            .iter()
            .filter_map(|&name| match self.lookup(name) {
                Some(start) => self.check_start(start).err(),
                None => Some(GrammarError::UnknownStart {
                    name: name.to_string(),
                }),
            })
            .collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Problems with a grammar table.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GrammarError {
    #[error("rule `{rule}` refers to undefined rule `{missing}`")]
    UndefinedRule { rule: String, missing: String },

    #[error("rule `{name}` is defined more than once")]
    DuplicateRule { name: String },

    #[error("rule `{rule}` is left-recursive: {}", cycle.join(" -> "))]
    LeftRecursion { rule: String, cycle: Vec<String> },

    #[error("rule `{rule}` repeats at least {min} but at most {max} times")]
    InvalidRepeat { rule: String, min: u32, max: u32 },

    #[error("malformed element `{element}` in rule `{rule}`")]
    MalformedElement { rule: String, element: String },

    #[error("start rule `{start}` reaches unimplemented rule `{rule}`")]
    UnimplementedReachable { start: String, rule: String },

    #[error("unknown start rule `{name}`")]
    UnknownStart { name: String },
}

impl GrammarError {
    pub fn code(&self) -> ErrorCode {
        match self {
            GrammarError::UndefinedRule { .. } => ErrorCode::E9001,
            GrammarError::DuplicateRule { .. } => ErrorCode::E9002,
            GrammarError::LeftRecursion { .. } => ErrorCode::E9003,
            GrammarError::UnimplementedReachable { .. } => ErrorCode::E9004,
            GrammarError::UnknownStart { .. } => ErrorCode::E9005,
            GrammarError::InvalidRepeat { .. } | GrammarError::MalformedElement { .. } => {
                ErrorCode::E9006
            }
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.code()).with_message(self.to_string());
        match self {
            GrammarError::LeftRecursion { .. } => {
                diag.with_note("a packrat parser cannot evaluate a rule that calls itself before consuming input")
            }
            GrammarError::UnimplementedReachable { rule, .. } => {
                diag.with_suggestion(format!("write a production for `{rule}` or pick a start rule that does not reach it"))
            }
            _ => diag,
        }
    }
}

#[inline]
fn index_to_u32(index: usize) -> u32 {
    u32::try_from(index).unwrap_or(u32::MAX)
}

//! Static left-recursion check.
//!
//! A rule is left-recursive when it can reach itself without consuming a
//! token. Which references are "in left position" depends on nullability:
//! in `a = [b] c`, both `b` and `c` are in left position because `[b]` can
//! match nothing.

use super::{Grammar, GrammarError, Production, RuleId};

#[derive(Copy, Clone, PartialEq, Eq)]
enum Mark {
    Unvisited,
    Active,
    Done,
}

/// Rules that can match the empty string.
pub(crate) fn nullable_rules(grammar: &Grammar) -> Vec<bool> {
    let mut nullable = vec![false; grammar.len()];
    loop {
        let mut changed = false;
        for (id, rule) in grammar.iter() {
            if nullable[id.index()] {
                continue;
            }
            let now = match &rule.production {
                Production::Terminal(_) | Production::Unimplemented => false,
                Production::Literal(child) => nullable[child.index()],
                Production::Sequence(members) => members.iter().all(|m| nullable[m.rule.index()]),
                Production::Alternation(alternatives) => {
                    alternatives.iter().any(|a| nullable[a.index()])
                }
                Production::Repeat { rule, min, .. } => *min == 0 || nullable[rule.index()],
            };
            if now {
                nullable[id.index()] = true;
                changed = true;
            }
        }
        if !changed {
            return nullable;
        }
    }
}

/// References `id` may evaluate before consuming anything.
fn left_calls(grammar: &Grammar, nullable: &[bool], id: RuleId) -> Vec<RuleId> {
    match grammar.production(id) {
        Production::Terminal(_) | Production::Unimplemented => Vec::new(),
        Production::Literal(child) | Production::Repeat { rule: child, .. } => vec![*child],
        Production::Alternation(alternatives) => alternatives.clone(),
        Production::Sequence(members) => {
            let mut calls = Vec::new();
            for member in members {
                calls.push(member.rule);
                if !nullable[member.rule.index()] {
                    break;
                }
            }
            calls
        }
    }
}

/// One error per left-recursive cycle reachable from `roots`.
pub(super) fn left_recursion(grammar: &Grammar, roots: &[RuleId]) -> Vec<GrammarError> {
    let nullable = nullable_rules(grammar);
    let mut walk = Walk {
        grammar,
        nullable: &nullable,
        marks: vec![Mark::Unvisited; grammar.len()],
        path: Vec::new(),
        errors: Vec::new(),
    };
    for &root in roots {
        walk.visit(root);
    }
    walk.errors
}

struct Walk<'g> {
    grammar: &'g Grammar,
    nullable: &'g [bool],
    marks: Vec<Mark>,
    path: Vec<RuleId>,
    errors: Vec<GrammarError>,
}

impl Walk<'_> {
    fn visit(&mut self, id: RuleId) {
        match self.marks[id.index()] {
            Mark::Done => return,
            Mark::Active => {
                self.report(id);
                return;
            }
            Mark::Unvisited => {}
        }
        self.marks[id.index()] = Mark::Active;
        self.path.push(id);
        for callee in left_calls(self.grammar, self.nullable, id) {
            self.visit(callee);
        }
        self.path.pop();
        self.marks[id.index()] = Mark::Done;
    }

    fn report(&mut self, id: RuleId) {
        let start = self.path.iter().position(|&r| r == id).unwrap_or(0);
        let mut cycle: Vec<String> = self.path[start..]
            .iter()
            .map(|&r| self.grammar.name(r).to_string())
            .collect();
        cycle.push(self.grammar.name(id).to_string());
        self.errors.push(GrammarError::LeftRecursion {
            rule: self.grammar.name(id).to_string(),
            cycle,
        });
    }
}

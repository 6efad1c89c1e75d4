//! Indented text rendering of realized trees.
//!
//! ```text
//! pair 0..3
//!   _key_1: key 0..1 'a'
//!   _=_1: "=" 1..2 "="
//!   _value_1: value/1 2..3
//!     DIGIT 2..3 '7'
//! ```
//!
//! Literals print their text and stop; their inner terminals add nothing a
//! reader needs.

use std::fmt;

use super::{Realized, RealizedKind};
use crate::grammar::Grammar;

impl Realized<'_> {
    /// Render the tree with rule names from `grammar`, two spaces per level.
    pub fn dump(&self, grammar: &Grammar) -> String {
        Dump {
            node: self,
            grammar,
        }
        .to_string()
    }
}

struct Dump<'a, 'src> {
    node: &'a Realized<'src>,
    grammar: &'a Grammar,
}

impl fmt::Display for Dump<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_node(f, self.grammar, self.node, None, 0)
    }
}

fn write_node(
    f: &mut fmt::Formatter<'_>,
    grammar: &Grammar,
    node: &Realized<'_>,
    label: Option<&str>,
    depth: usize,
) -> fmt::Result {
    let indent = "  ".repeat(depth);
    let name = grammar.name(node.rule());
    let span = node.span();
    let label = label.map(|l| format!("{l}: ")).unwrap_or_default();

    match node.kind() {
        RealizedKind::Token(c) => writeln!(f, "{indent}{label}{name} {span:?} {c:?}")?,
        RealizedKind::Literal(_) => writeln!(f, "{indent}{label}{name} {span:?} {:?}", node.text())?,
        RealizedKind::Choice { alternative, .. } => {
            writeln!(f, "{indent}{label}{name}/{alternative} {span:?}")?;
        }
        RealizedKind::Origin | RealizedKind::Sequence(_) | RealizedKind::Repeat(_) => {
            writeln!(f, "{indent}{label}{name} {span:?}")?;
        }
    }

    match node.kind() {
        RealizedKind::Sequence(members) => {
            for member in members {
                write_node(f, grammar, &member.node, Some(&member.label), depth + 1)?;
            }
        }
        RealizedKind::Choice { node: chosen, .. } => write_node(f, grammar, chosen, None, depth + 1)?,
        RealizedKind::Repeat(items) => {
            for item in items {
                write_node(f, grammar, item, None, depth + 1)?;
            }
        }
        RealizedKind::Origin | RealizedKind::Token(_) | RealizedKind::Literal(_) => {}
    }
    Ok(())
}

//! Packrat concrete-syntax-tree runtime for ABNF grammar tables.
//!
//! Parsing builds a graph of [`Deferred`] nodes. Each node is bound to the
//! node before it (its predecessor) and knows nothing about where it starts
//! until it is realized: realizing forces the predecessor, then runs the
//! node's combinator from wherever the predecessor ended. Nodes that are never
//! realized cost one allocation and no matching work.
//!
//! The pieces, bottom-up:
//!
//! - [`LazyCell`]: once-evaluated shared cells with cycle detection
//! - [`Input`] / [`Cursor`]: the token buffer and immutable positions in it
//! - [`MatchOutcome`]: matched node plus remainder, or failure plus expectations
//! - [`Deferred`] / [`Realized`] / [`Node`]: the two node shapes and their union
//! - [`combinator`]: terminal, literal, sequence, alternation, repetition
//! - [`Grammar`] / [`GrammarBuilder`]: rule tables and their validation
//! - [`Session`]: grammar-driven node construction with per-position memoization
//! - [`Parser`]: start-rule checks, full-input parsing and syntax errors

pub mod combinator;
mod config;
mod cursor;
mod error;
mod grammar;
mod lazy;
mod node;
mod outcome;
mod parser;
mod session;

pub use combinator::{CharClass, SequenceSlot};
pub use config::ParseConfig;
pub use cursor::{Cursor, Input};
pub use error::SyntaxError;
pub use grammar::{Grammar, GrammarBuilder, GrammarError, Production, Rule, RuleId, SeqMember};
pub use lazy::LazyCell;
pub use node::{CstNode, Deferred, Member, Node, OutcomeCell, Realized, RealizedKind};
pub use outcome::{Expected, MatchOutcome};
pub use parser::Parser;
pub use session::{ParseStats, Session};

#[cfg(test)]
mod tests;

static TRACING_INIT: std::sync::Once = std::sync::Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing when `RUST_LOG` is unset, and nothing after the first call.
/// Rule evaluations log at `trace`, whole parses at `debug`:
///
/// ```text
/// RUST_LOG=abnf_runtime=trace cargo test -p odata_abnf
/// ```
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

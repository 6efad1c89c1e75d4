//! Parsing entry point.

use tracing::debug;

use crate::config::ParseConfig;
use crate::cursor::{Cursor, Input};
use crate::error::SyntaxError;
use crate::grammar::{Grammar, GrammarError, RuleId};
use crate::node::{CstNode, Realized};
use crate::outcome::{Expected, MatchOutcome};
use crate::session::Session;


/// Parses inputs from one start rule of a grammar.
///
/// Construction checks the start rule's closure once: a start rule that can
/// reach an unimplemented production, or that is left-recursive, is rejected
/// here instead of failing in the middle of some later parse.
#[derive(Clone, Debug)]
pub struct Parser<'g> {
    grammar: &'g Grammar,
    start: RuleId,
    config: ParseConfig,
}

impl<'g> Parser<'g> {
    pub fn new(grammar: &'g Grammar, start: &str) -> Result<Self, GrammarError> {
        let start_id = grammar
            .lookup(start)
            .ok_or_else(|| GrammarError::UnknownStart {
                name: start.to_string(),
            })?;
        grammar.check_start(start_id)?;
        Ok(Parser {
            grammar,
            start: start_id,
            config: ParseConfig::default(),
        })
    }

    #[must_use]
    pub fn with_config(mut self, config: ParseConfig) -> Self {
        self.config = config;
        self
    }

    #[inline]
    pub fn grammar(&self) -> &'g Grammar {
        self.grammar
    }

    #[inline]
    pub fn start_rule(&self) -> RuleId {
        self.start
    }

    #[inline]
    pub fn config(&self) -> ParseConfig {
        self.config
    }

    /// A fresh session over `input`, for callers that want the raw nodes
    /// or the evaluation counters.
    pub fn session<'src>(&self, input: &'src Input) -> Session<'src>
    where
        'g: 'src,
    {
        Session::new(self.grammar, input, self.config)
    }

    /// Match the start rule against a prefix of `input`.
    pub fn parse_prefix<'src>(&self, input: &'src Input) -> MatchOutcome<'src>
    where
        'g: 'src,
    {
        self.session(input).start(self.start).realize()
    }

    /// Parse `input` into a concrete syntax tree.
    ///
    /// With [`ParseConfig::require_full_input`] set (the default), input left
    /// over after the start rule matches is an error.
    pub fn parse<'src>(&self, input: &'src Input) -> Result<Realized<'src>, SyntaxError>
    where
        'g: 'src,
    {
        debug!(start = self.grammar.name(self.start), len = input.len(), "parse");
        let session = self.session(input);
        let outcome = session.start(self.start).realize();
        let result = self.finish(&session, outcome, input);

        let stats = session.stats();
        debug!(
            ok = result.is_ok(),
            evaluations = stats.total_evaluations(),
            memo_hits = stats.memo_hits(),
            "parse finished"
        );
        result
    }

    fn finish<'src>(
        &self,
        session: &Session<'src>,
        outcome: MatchOutcome<'src>,
        input: &'src Input,
    ) -> Result<Realized<'src>, SyntaxError> {
        match outcome {
            MatchOutcome::Matched { node, remainder }
                if remainder.is_at_end() || !self.config.require_full_input =>
            {
                Ok(node)
            }
            MatchOutcome::Matched { remainder, .. } => match session.furthest_failure() {
                Some((at, expected)) if at.position() >= remainder.position() => {
                    Err(self.unexpected(at, &expected))
                }
                _ => Err(SyntaxError::trailing(
                    remainder.position(),
                    input.len(),
                    remainder.current(),
                )),
            },
            MatchOutcome::Failed { at, expected } => {
                let (at, expected) = session
                    .furthest_failure()
                    .filter(|(furthest, _)| furthest.position() >= at.position())
                    .unwrap_or((at, expected));
                Err(self.unexpected(at, &expected))
            }
        }
    }

    fn unexpected(&self, at: Cursor<'_>, expected: &Expected) -> SyntaxError {
        let names = expected
            .iter()
            .map(|rule| self.grammar.name(rule).to_string())
            .collect();
        SyntaxError::unexpected(at.position(), at.current(), names)
    }
}

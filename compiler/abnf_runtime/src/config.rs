//! Parse session configuration.

/// Knobs for a parse session.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ParseConfig {
    /// Cache each `(rule, position)` result for the session. Turning this off
    /// keeps the tree identical but lets shared sub-rules re-evaluate.
    pub memoize: bool,
    /// `Parser::parse` rejects input left over after the start rule matches.
    pub require_full_input: bool,
}

impl Default for ParseConfig {
    fn default() -> Self {
        ParseConfig {
            memoize: true,
            require_full_input: true,
        }
    }
}

impl ParseConfig {
    #[must_use]
    pub fn with_memoize(mut self, memoize: bool) -> Self {
        self.memoize = memoize;
        self
    }

    #[must_use]
    pub fn with_full_input(mut self, require: bool) -> Self {
        self.require_full_input = require;
        self
    }
}

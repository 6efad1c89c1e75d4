//! Error codes for runtime and grammar-table diagnostics.
//!
//! Format: E#### where the first digit indicates where the problem lives:
//! - E1xxx: Syntax errors (input does not match the grammar)
//! - E9xxx: Grammar-table errors (the table itself is incomplete or broken)

use std::fmt;

/// Error codes for all diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Syntax Errors (E1xxx)
    /// Unexpected character
    E1001,
    /// Unexpected end of input
    E1002,
    /// Trailing input after a complete match
    E1003,

    // Grammar-Table Errors (E9xxx)
    /// Reference to an undefined rule
    E9001,
    /// Rule defined more than once
    E9002,
    /// Left-recursive rule
    E9003,
    /// Unimplemented production reachable from a start rule
    E9004,
    /// Unknown start rule
    E9005,
    /// Malformed rule element or repetition bounds
    E9006,
}

impl ErrorCode {
    /// Every code, in declaration order.
    pub const ALL: &'static [ErrorCode] = &[
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E1003,
        ErrorCode::E9001,
        ErrorCode::E9002,
        ErrorCode::E9003,
        ErrorCode::E9004,
        ErrorCode::E9005,
        ErrorCode::E9006,
    ];

    /// Get the numeric code as a string (e.g., "E1001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E9001 => "E9001",
            ErrorCode::E9002 => "E9002",
            ErrorCode::E9003 => "E9003",
            ErrorCode::E9004 => "E9004",
            ErrorCode::E9005 => "E9005",
            ErrorCode::E9006 => "E9006",
        }
    }

    /// One-line description used by `--explain` style lookups.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E1001 => "unexpected character",
            ErrorCode::E1002 => "unexpected end of input",
            ErrorCode::E1003 => "trailing input after a complete match",
            ErrorCode::E9001 => "reference to an undefined rule",
            ErrorCode::E9002 => "rule defined more than once",
            ErrorCode::E9003 => "left-recursive rule",
            ErrorCode::E9004 => "unimplemented production is reachable",
            ErrorCode::E9005 => "unknown start rule",
            ErrorCode::E9006 => "malformed rule element",
        }
    }

    /// Check if this is a syntax error (E1xxx range).
    pub fn is_syntax_error(&self) -> bool {
        matches!(self, ErrorCode::E1001 | ErrorCode::E1002 | ErrorCode::E1003)
    }

    /// Check if this is a grammar-table error (E9xxx range).
    pub fn is_grammar_error(&self) -> bool {
        !self.is_syntax_error()
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse an error code string like `"E1001"`. Case-insensitive.
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        Self::ALL
            .iter()
            .find(|code| code.as_str() == upper)
            .copied()
            .ok_or(())
    }
}

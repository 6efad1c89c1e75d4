//! OData 4.01 URL grammar as a rule table for [`abnf_runtime`].
//!
//! The table covers the OData ABNF's resource paths, query options,
//! primitive literals and a `$filter` expression subset. Productions that are
//! not written yet are declared as stubs ([`KNOWN_STUBS`]); the entry points
//! never reach them.
//!
//! ```
//! use abnf_runtime::Input;
//!
//! let parser = odata_abnf::parser(odata_abnf::ODATA_RELATIVE_URI).unwrap();
//! let input = Input::new("Products(1)/Category?$select=Name");
//! let tree = parser.parse(&input).unwrap();
//! assert_eq!(tree.text(), "Products(1)/Category?$select=Name");
//! ```

mod table;

use std::sync::OnceLock;

use abnf_diagnostic::Diagnostic;
use abnf_runtime::{Grammar, GrammarError, Input, Parser, SyntaxError};
use tracing::debug;

/// A URL relative to the service root: `$batch`, `$metadata` or a resource
/// path with query options.
pub const ODATA_RELATIVE_URI: &str = "odataRelativeUri";
/// The query part of a URL, after the `?`.
pub const QUERY_OPTIONS: &str = "queryOptions";
/// A literal value as written in a URL.
pub const PRIMITIVE_LITERAL: &str = "primitiveLiteral";
/// A `$filter` expression.
pub const BOOL_COMMON_EXPR: &str = "boolCommonExpr";

pub const ENTRY_POINTS: [&str; 4] = [
    ODATA_RELATIVE_URI,
    QUERY_OPTIONS,
    PRIMITIVE_LITERAL,
    BOOL_COMMON_EXPR,
];

/// Rules declared without a production.
pub const KNOWN_STUBS: [&str; 6] = [
    "dateValue",
    "dateTimeOffsetValue",
    "timeOfDayValue",
    "durationValue",
    "geographyPoint",
    "geometryPoint",
];

static GRAMMAR: OnceLock<Grammar> = OnceLock::new();

/// The OData grammar, built on first use.
pub fn grammar() -> &'static Grammar {
    GRAMMAR.get_or_init(|| {
        let grammar = table::build().unwrap_or_else(|errors| {
            let errors: Vec<String> = errors.iter().map(ToString::to_string).collect();
            panic!("OData grammar table is malformed: {}", errors.join("; "))
        });
        debug!(
            rules = grammar.len(),
            stubs = grammar.unimplemented().len(),
            "built OData grammar"
        );
        grammar
    })
}

/// A parser for one of the [`ENTRY_POINTS`], or any other rule whose
/// closure is fully implemented.
pub fn parser(start: &str) -> Result<Parser<'static>, GrammarError> {
    Parser::new(grammar(), start)
}

/// Whether `text` is a complete `start`.
pub fn recognize(start: &str, text: &str) -> Result<(), Error> {
    let parser = parser(start)?;
    let input = Input::new(text);
    parser.parse(&input)?;
    Ok(())
}

/// Why [`recognize`] rejected its input.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Grammar(#[from] GrammarError),
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
}

impl Error {
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            Error::Grammar(err) => err.to_diagnostic(),
            Error::Syntax(err) => err.to_diagnostic(),
        }
    }
}

//! The OData rule table, one module per section of the ABNF.
//!
//! Rule names follow the OData ABNF. Groups the ABNF writes inline get a
//! helper rule named after their parent, such as `decimalValue.fraction`,
//! so that each one shows up as its own node in the tree.

mod core_rules;
mod expressions;
mod literals;
mod names;
mod query;
mod resource_path;

use abnf_runtime::{Grammar, GrammarBuilder, GrammarError};


pub(crate) fn build() -> Result<Grammar, Vec<GrammarError>> {
    let mut b = GrammarBuilder::new();
    core_rules::define(&mut b);
    names::define(&mut b);
    literals::define(&mut b);
    resource_path::define(&mut b);
    query::define(&mut b);
    expressions::define(&mut b);
    b.build()
}

//! Diagnostic types shared by the packrat runtime and grammar tables.
//!
//! - Error codes for searchability
//! - Clear messages (what went wrong)
//! - Primary span (where it went wrong)
//! - Notes and help lines (how to fix)
//!
//! Spans count input *tokens* (characters), not bytes, because the runtime
//! cursor walks a character buffer.

mod diagnostic;
mod error_code;
mod span;
pub mod span_utils;

pub use diagnostic::{Diagnostic, Label, Severity};
pub use error_code::ErrorCode;
pub use span::{Span, SpanError};

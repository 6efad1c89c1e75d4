//! Line/column lookup for token-offset spans.
//!
//! Offsets count characters, matching the runtime's character cursor, so a
//! column is simply the distance from the line start.

use crate::Span;

/// Pre-computed line start table for O(log L) line/column lookup.
///
/// ```
/// use abnf_diagnostic::span_utils::LineOffsetTable;
///
/// let table = LineOffsetTable::build("ab\ncd");
/// assert_eq!(table.offset_to_line_col(0), (1, 1));
/// assert_eq!(table.offset_to_line_col(4), (2, 2));
/// ```
#[derive(Clone, Debug, Default)]
pub struct LineOffsetTable {
    /// Character offset of each line start; `offsets[0] == 0`.
    offsets: Vec<u32>,
}

impl LineOffsetTable {
    /// Build the table with one pass over the source.
    pub fn build(source: &str) -> Self {
        let mut offsets = vec![0u32];
        for (i, ch) in source.chars().enumerate() {
            if ch == '\n' {
                offsets.push(u32::try_from(i + 1).unwrap_or(u32::MAX));
            }
        }
        LineOffsetTable { offsets }
    }

    /// 1-based line containing `offset`.
    #[inline]
    pub fn line_from_offset(&self, offset: u32) -> u32 {
        let line_idx = match self.offsets.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert.saturating_sub(1),
        };
        u32::try_from(line_idx).unwrap_or(u32::MAX - 1) + 1
    }

    /// 1-based (line, column) of `offset`.
    pub fn offset_to_line_col(&self, offset: u32) -> (u32, u32) {
        let line = self.line_from_offset(offset);
        let line_start = self.line_start_offset(line).unwrap_or(0);
        (line, offset.saturating_sub(line_start) + 1)
    }

    /// Character offset of a line start (1-based line number).
    pub fn line_start_offset(&self, line: u32) -> Option<u32> {
        if line == 0 {
            return None;
        }
        self.offsets.get((line - 1) as usize).copied()
    }

    /// Text of a line without its terminating newline.
    pub fn line_text(&self, source: &str, line: u32) -> Option<String> {
        let start = self.line_start_offset(line)? as usize;
        Some(
            source
                .chars()
                .skip(start)
                .take_while(|&c| c != '\n')
                .collect(),
        )
    }

    /// Number of lines in the source.
    pub fn line_count(&self) -> usize {
        self.offsets.len()
    }
}

/// 1-based (line, column) where `span` starts.
///
/// For repeated lookups build a [`LineOffsetTable`] once instead.
pub fn span_line_col(source: &str, span: Span) -> (u32, u32) {
    LineOffsetTable::build(source).offset_to_line_col(span.start)
}

#[cfg(test)]
mod tests;

//! C3: the location helper.
//!
//! Every node `ruff_python_ast` hands us carries a [`TextRange`] byte
//! offset, not a line number. `LineIndex` converts offsets to 1-based line
//! numbers for diagnostics, the same way the teacher's `Parser` precomputes
//! `line_ends` once per file and binary-searches it rather than rescanning
//! the source on every lookup.
//!
//! Because every `ruff_python_ast` node is fully constructed (and therefore
//! fully ranged) the moment it exists, "copy locations onto a synthesized
//! node" here is just "stamp the new node with a range taken from a nearby
//! original node" at construction time — there is no separate pass that
//! fills in missing locations afterwards the way the original's
//! `copy_locations` does over a looser, post-hoc-mutable tree.

use ruff_text_size::{TextRange, TextSize};

/// Maps byte offsets to 1-based line numbers for a single source file.
pub struct LineIndex {
    /// Byte offset immediately after each line's terminating `\n` (or the
    /// end of the source for the final line).
    line_ends: Vec<TextSize>,
}

impl LineIndex {
    #[must_use]
    pub fn from_source(source: &str) -> Self {
        let mut line_ends = Vec::new();
        for (offset, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                line_ends.push(TextSize::try_from(offset + 1).unwrap_or_default());
            }
        }
        line_ends.push(TextSize::try_from(source.len()).unwrap_or_default());
        Self { line_ends }
    }

    /// 1-based line number containing `offset`.
    #[must_use]
    pub fn line(&self, offset: TextSize) -> u32 {
        let line_idx = self.line_ends.partition_point(|&end| end <= offset);
        // Saturate rather than panic: a synthesized node's range can, in
        // principle, point at end-of-file.
        u32::try_from(line_idx + 1).unwrap_or(u32::MAX)
    }

    /// Convenience for diagnostics: the line at the start of `range`.
    #[must_use]
    pub fn line_of(&self, range: TextRange) -> u32 {
        self.line(range.start())
    }
}

/// Stamps a range taken from a nearby original node onto a synthesized one.
/// A thin, named wrapper so every synthesis site reads the same way; see
/// the module docs for why there is no descendant-filling pass here.
#[must_use]
pub fn at(near: TextRange) -> TextRange {
    near
}

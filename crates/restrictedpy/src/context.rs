//! Per-compilation state, owned and threaded explicitly through the walk
//! rather than kept as ambient/global mutable state (SPEC_FULL.md §9).

use ahash::AHashSet;
use ruff_text_size::TextRange;

use crate::dialect::Dialect;
use crate::diagnostics::Diagnostics;
use crate::location::LineIndex;
use crate::print_collector::PrintScopeStack;

pub struct TransformContext {
    pub diagnostics: Diagnostics,
    used_names: AHashSet<String>,
    temp_counter: u32,
    pub print_scopes: PrintScopeStack,
    pub dialect: Dialect,
    line_index: LineIndex,
}

impl TransformContext {
    #[must_use]
    pub fn new(source: &str, dialect: Dialect) -> Self {
        Self {
            diagnostics: Diagnostics::new(),
            used_names: AHashSet::new(),
            temp_counter: 0,
            print_scopes: PrintScopeStack::new(),
            dialect,
            line_index: LineIndex::from_source(source),
        }
    }

    /// Records `name` as appearing in load position (§3, used-names set).
    /// Synthetic temporaries never pass through this — only names observed
    /// directly in user source do.
    pub fn record_used_name(&mut self, name: &str) {
        self.used_names.insert(name.to_owned());
    }

    #[must_use]
    pub fn used_names(&self) -> &AHashSet<String> {
        &self.used_names
    }

    /// Mints a fresh temporary name `_tmp0`, `_tmp1`, ... Exempt from the
    /// name policy by construction: the policy forbids user identifiers
    /// starting with `_`, so nothing minted here can ever collide with
    /// something `check_name` would also admit.
    pub fn fresh_temp_name(&mut self) -> String {
        let name = format!("_tmp{}", self.temp_counter);
        self.temp_counter += 1;
        name
    }

    #[must_use]
    pub fn line(&self, range: TextRange) -> Option<u32> {
        Some(self.line_index.line_of(range))
    }

    pub fn error(&mut self, range: TextRange, message: impl Into<std::borrow::Cow<'static, str>>) {
        let line = self.line(range);
        self.diagnostics.error(line, message);
    }

    pub fn warn(&mut self, range: TextRange, message: impl Into<std::borrow::Cow<'static, str>>) {
        let line = self.line(range);
        self.diagnostics.warn(line, message);
    }
}

//! C6: the print-collector injector.
//!
//! See SPEC_FULL.md §4.6 for the module/function/lambda split and the
//! lambda special case (push/pop for flag bookkeeping, but no injection,
//! since a lambda body is a single expression with no statement list to
//! prepend to).

use ruff_python_ast::{Stmt, StmtAssign, StmtImportFrom};
use ruff_text_size::TextRange;

use crate::ast_build;
use crate::diagnostics::Diagnostics;

/// Per-scope flags; two booleans is the entire state, per SPEC_FULL.md §3.
#[derive(Debug, Default, Clone, Copy)]
pub struct PrintScope {
    print_used: bool,
    printed_used: bool,
}

impl PrintScope {
    #[must_use]
    pub fn needs_collector(self) -> bool {
        self.print_used || self.printed_used
    }
}

/// Strictly-nested stack of [`PrintScope`]s, owned by the
/// [`crate::context::TransformContext`] for one compilation. `push`/`pop`
/// are the save/restore pair SPEC_FULL.md §3 describes; unlike the
/// original's context-manager, there is no `Drop`-based guard here because
/// every caller already pops explicitly on every path (the walk has no
/// early-return/`?` point between push and pop) — see the module/function
/// handlers in `transformer::stmt`.
#[derive(Debug, Default)]
pub struct PrintScopeStack {
    frames: Vec<PrintScope>,
}

impl PrintScopeStack {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self) {
        self.frames.push(PrintScope::default());
    }

    /// Pops the current scope's flags. Panics if called without a matching
    /// `push` — a precondition violation, not a user-facing error (§7).
    pub fn pop(&mut self) -> PrintScope {
        self.frames.pop().expect("print scope pushed without a matching pop")
    }

    pub fn mark_print_used(&mut self) {
        if let Some(top) = self.frames.last_mut() {
            top.print_used = true;
        }
    }

    pub fn mark_printed_used(&mut self) {
        if let Some(top) = self.frames.last_mut() {
            top.printed_used = true;
        }
    }
}

/// `_print = _print_(_getattr_)`, the collector-construction assignment
/// prepended to a scope's body.
fn collector_assignment(range: TextRange) -> Stmt {
    let call = ast_build::call(
        ast_build::load_name("_print_", range),
        vec![ast_build::load_name("_getattr_", range)],
        range,
    );
    Stmt::Assign(StmtAssign {
        range,
        targets: vec![ast_build::store_name("_print", range)],
        value: Box::new(call),
    })
}

/// For a module body, the insertion point skips any leading `from
/// __future__ import ...` statements (SPEC_FULL.md §4.6).
#[must_use]
pub fn module_insertion_index(body: &[Stmt]) -> usize {
    body.iter()
        .take_while(|stmt| is_future_import(stmt))
        .count()
}

fn is_future_import(stmt: &Stmt) -> bool {
    matches!(
        stmt,
        Stmt::ImportFrom(StmtImportFrom { module: Some(module), .. }) if module.as_str() == "__future__"
    )
}

/// Applies the §4.6 injection-and-warning step for a module or function
/// scope: on entry, the scope's flags have already been set during the
/// body walk by [`PrintScopeStack::mark_print_used`]/
/// `mark_printed_used`; this inserts the collector assignment (if needed)
/// at `insertion_index` and records the imbalance warning (if any).
pub fn inject(
    body: &mut Vec<Stmt>,
    scope: PrintScope,
    diagnostics: &mut Diagnostics,
    line: Option<u32>,
    insertion_index: usize,
    range: TextRange,
) {
    if scope.needs_collector() {
        body.insert(insertion_index, collector_assignment(range));
    }
    if scope.print_used && !scope.printed_used {
        diagnostics.warn(line, "Prints, but never reads 'printed' variable.");
    } else if scope.printed_used && !scope.print_used {
        diagnostics.warn(line, "Doesn't print, but reads 'printed' variable.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ruff_python_ast::{Alias, Identifier};
    use ruff_text_size::TextSize;

    const R: TextRange = TextRange::new(TextSize::new(0), TextSize::new(0));

    #[test]
    fn balanced_usage_emits_no_warning() {
        let mut stack = PrintScopeStack::new();
        stack.push();
        stack.mark_print_used();
        stack.mark_printed_used();
        let scope = stack.pop();
        let mut diagnostics = Diagnostics::new();
        let mut body = vec![];
        inject(&mut body, scope, &mut diagnostics, None, 0, R);
        assert!(diagnostics.warnings().is_empty());
        assert_eq!(body.len(), 1);
    }

    #[test]
    fn print_without_printed_warns() {
        let mut stack = PrintScopeStack::new();
        stack.push();
        stack.mark_print_used();
        let scope = stack.pop();
        let mut diagnostics = Diagnostics::new();
        let mut body = vec![];
        inject(&mut body, scope, &mut diagnostics, None, 0, R);
        assert_eq!(diagnostics.warnings().len(), 1);
        assert!(diagnostics.warnings()[0].message.contains("Prints, but never"));
    }

    #[test]
    fn printed_without_print_warns() {
        let mut stack = PrintScopeStack::new();
        stack.push();
        stack.mark_printed_used();
        let scope = stack.pop();
        let mut diagnostics = Diagnostics::new();
        let mut body = vec![];
        inject(&mut body, scope, &mut diagnostics, None, 0, R);
        assert_eq!(diagnostics.warnings().len(), 1);
        assert!(diagnostics.warnings()[0].message.contains("Doesn't print"));
    }

    #[test]
    fn unused_scope_injects_nothing() {
        let mut stack = PrintScopeStack::new();
        stack.push();
        let scope = stack.pop();
        let mut diagnostics = Diagnostics::new();
        let mut body = vec![];
        inject(&mut body, scope, &mut diagnostics, None, 0, R);
        assert!(body.is_empty());
        assert!(diagnostics.warnings().is_empty());
    }

    #[test]
    fn module_insertion_index_skips_future_imports() {
        let future_import = Stmt::ImportFrom(StmtImportFrom {
            range: R,
            module: Some(Identifier::new("__future__", R)),
            names: vec![Alias {
                range: R,
                name: Identifier::new("annotations", R),
                asname: None,
            }],
            level: 0,
        });
        let body = vec![future_import];
        assert_eq!(module_insertion_index(&body), 1);
    }
}

//! C7: the node dispatcher, and the crate's single public entry point.
//!
//! Dispatch is a `match` per node enum in `stmt.rs`/`expr.rs` with one arm
//! per variant `ruff_python_ast` currently defines — never a wildcard arm.
//! Node kinds with no counterpart in SPEC_FULL.md's accepted surface get an
//! explicit arm that calls [`not_allowed`], which is this crate's
//! "default handler": it is reached by construction for those kinds, not by
//! falling through a catch-all, so the compiler enforces that every new
//! `ruff_python_ast` variant gets a conscious decision (SPEC_FULL.md §9).

pub mod expr;
pub mod stmt;

use ruff_python_ast::ModModule;
use ruff_text_size::TextRange;

use crate::context::TransformContext;
use crate::dialect::Dialect;
use crate::diagnostics::Diagnostics;

/// Records the standard reject-by-default diagnostic pair for a node kind
/// with no handler in this spec's accepted surface: a warning naming the
/// kind (diagnostic for maintainers auditing new grammar) and an error
/// refusing it (the safety guarantee). See SPEC_FULL.md §4.7/§7.
pub fn not_allowed(ctx: &mut TransformContext, range: TextRange, kind: &str) {
    ctx.warn(range, format!("{kind} statement is not known"));
    ctx.error(range, format!("{kind} statements are not allowed"));
}

/// Transforms a parsed module to completion. This is the crate's only
/// public entry point: a pure function from a parsed tree (plus the
/// source text it came from, used solely for line-number lookups, and a
/// [`Dialect`]) to a rewritten tree and the diagnostics accumulated while
/// producing it. Never panics on syntactically valid input (§7); a small
/// number of `debug_assert!`/`unreachable!()` sites exist only for tree
/// shapes the grammar guarantees cannot occur (see `expr::transform_slice_expr`).
#[must_use]
pub fn transform(module: ModModule, source: &str, dialect: Dialect) -> (ModModule, Diagnostics) {
    let mut ctx = TransformContext::new(source, dialect);
    let transformed = stmt::transform_module(&mut ctx, module);
    (transformed, ctx.diagnostics)
}

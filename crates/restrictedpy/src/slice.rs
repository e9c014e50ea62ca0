//! C5: the slice transformer.
//!
//! `ruff_python_ast` has no separate `Index`/`ExtSlice` node kinds (those
//! only existed pre-3.9 in the reference grammar); a subscript's slice
//! child is just an `Expr`, so this dispatches on `Expr::Slice` (stepped
//! slice), `Expr::Tuple` (extended slice), or anything else (simple index)
//! directly, per SPEC_FULL.md §4.5.

use ruff_python_ast::{Expr, ExprContext, ExprTuple, TupleParenthesized};
use ruff_text_size::TextRange;

use crate::ast_build;

/// Rewrites a subscript's slice expression. `transform_expr` is the
/// caller's ordinary expression-transform entry point (C7), applied to
/// every sub-expression so nested rewrites (e.g. an attribute access inside
/// a slice bound) still happen.
pub fn transform_slice(slice: Expr, range: TextRange, mut transform_expr: impl FnMut(Expr) -> Expr) -> Expr {
    match slice {
        Expr::Slice(s) => {
            let lower = s
                .lower
                .map(|e| transform_expr(*e))
                .unwrap_or_else(|| ast_build::none_literal(range));
            let upper = s
                .upper
                .map(|e| transform_expr(*e))
                .unwrap_or_else(|| ast_build::none_literal(range));
            let step = s
                .step
                .map(|e| transform_expr(*e))
                .unwrap_or_else(|| ast_build::none_literal(range));
            ast_build::call(
                ast_build::load_name("slice", range),
                vec![lower, upper, step],
                range,
            )
        }
        Expr::Tuple(t) => {
            // Extended slice: a[i, j:k] — recursively transform each
            // sub-slice, preserving tuple shape.
            let elts = t
                .elts
                .into_iter()
                .map(|e| transform_slice(e, range, &mut transform_expr))
                .collect();
            Expr::Tuple(ExprTuple {
                range: t.range,
                elts,
                ctx: ExprContext::Load,
                parenthesized: TupleParenthesized::Bool(true),
            })
        }
        simple_index => transform_expr(simple_index),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ruff_python_ast::{ExprNumberLiteral, Number};
    use ruff_text_size::TextSize;

    const R: TextRange = TextRange::new(TextSize::new(0), TextSize::new(0));

    fn int(n: i64) -> Expr {
        Expr::NumberLiteral(ExprNumberLiteral {
            range: R,
            value: Number::Int(n.into()),
        })
    }

    #[test]
    fn simple_index_passes_through_unwrapped() {
        let out = transform_slice(int(1), R, |e| e);
        assert!(matches!(out, Expr::NumberLiteral(_)));
    }

    #[test]
    fn slice_without_bounds_becomes_slice_of_nones() {
        use ruff_python_ast::ExprSlice;
        let slice_expr = Expr::Slice(ExprSlice {
            range: R,
            lower: None,
            upper: None,
            step: None,
        });
        let out = transform_slice(slice_expr, R, |e| e);
        match out {
            Expr::Call(call) => {
                assert_eq!(call.arguments.args.len(), 3);
                for arg in call.arguments.args.iter() {
                    assert!(matches!(arg, Expr::NoneLiteral(_)));
                }
            }
            _ => panic!("expected a call to slice(...)"),
        }
    }

    #[test]
    fn stepped_slice_forwards_each_bound() {
        use ruff_python_ast::ExprSlice;
        let slice_expr = Expr::Slice(ExprSlice {
            range: R,
            lower: Some(Box::new(int(1))),
            upper: Some(Box::new(int(2))),
            step: None,
        });
        let out = transform_slice(slice_expr, R, |e| e);
        match out {
            Expr::Call(call) => {
                assert!(matches!(call.arguments.args[0], Expr::NumberLiteral(_)));
                assert!(matches!(call.arguments.args[1], Expr::NumberLiteral(_)));
                assert!(matches!(call.arguments.args[2], Expr::NoneLiteral(_)));
            }
            _ => panic!("expected a call to slice(...)"),
        }
    }
}

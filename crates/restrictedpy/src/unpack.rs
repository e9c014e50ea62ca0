//! C4: the unpack-spec builder.
//!
//! See SPEC_FULL.md §3/§4.4 for the worked example this implementation is
//! grounded on (`gen_unpack_spec` in the original RestrictedPython source).

use ruff_python_ast::{Expr, ExprContext};
use ruff_text_size::TextRange;

use crate::ast_build;

/// A nested descriptor of a sequence-unpacking target's shape. Only
/// sequence sub-targets contribute `children`; plain names are left for the
/// surrounding destructuring assignment to bind directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnpackSpec {
    pub min_len: i64,
    pub children: Vec<(i64, UnpackSpec)>,
}

/// Returns `Some(elements)` if `target` is itself a sequence pattern
/// (`Expr::Tuple` or `Expr::List`), i.e. something this builder recurses
/// into; `None` for a plain name or any other leaf target.
fn as_sequence_target(target: &Expr) -> Option<&[Expr]> {
    match target {
        Expr::Tuple(tuple) => Some(&tuple.elts),
        Expr::List(list) => Some(&list.elts),
        _ => None,
    }
}

/// Builds the unpack spec for a sequence target's element list, per
/// SPEC_FULL.md §4.4:
/// - `min_len` counts only non-starred elements.
/// - A starred element shifts every subsequent child index so it is
///   counted from the end (negative).
/// - Only nested sequence sub-targets emit a child record; plain names do
///   not.
#[must_use]
pub fn build_spec(elements: &[Expr]) -> UnpackSpec {
    let min_len = elements
        .iter()
        .filter(|e| !matches!(e, Expr::Starred(_)))
        .count() as i64;

    let mut children = Vec::new();
    let mut offset: i64 = 0;
    for (i, element) in elements.iter().enumerate() {
        let i = i as i64;
        if matches!(element, Expr::Starred(_)) {
            offset = min_len + 1;
            continue;
        }
        if let Some(sub_elements) = as_sequence_target(element) {
            let child_index = i - offset;
            children.push((child_index, build_spec(sub_elements)));
        }
        // plain name: nothing emitted, the destructuring assign binds it.
    }

    UnpackSpec { min_len, children }
}

/// Convenience for handlers that only have the target expression itself
/// (e.g. a `for`-loop target, a `with`-item target): `None` if `target` is
/// not a sequence pattern at all.
#[must_use]
pub fn build_spec_for_target(target: &Expr) -> Option<UnpackSpec> {
    as_sequence_target(target).map(build_spec)
}

impl UnpackSpec {
    /// Renders this spec as the literal dict `{"min_len": N, "children":
    /// [(index, spec), ...]}` the runtime hook `_unpack_sequence_` expects,
    /// stamped with `range` throughout (every synthesized node in this tree
    /// shares one source position, per C3).
    #[must_use]
    pub fn to_expr(&self, range: TextRange) -> Expr {
        use ruff_python_ast::{DictItem, Expr as E, ExprDict, ExprTuple, TupleParenthesized};

        let children_elts: Vec<Expr> = self
            .children
            .iter()
            .map(|(index, spec)| {
                E::Tuple(ExprTuple {
                    range,
                    elts: vec![
                        ast_build::int_literal(*index, range),
                        spec.to_expr(range),
                    ],
                    ctx: ExprContext::Load,
                    parenthesized: TupleParenthesized::Bool(true),
                })
            })
            .collect();

        E::Dict(ExprDict {
            range,
            items: vec![
                DictItem {
                    key: Some(ast_build::string_literal("min_len", range)),
                    value: ast_build::int_literal(self.min_len, range),
                },
                DictItem {
                    key: Some(ast_build::string_literal("children", range)),
                    value: E::Tuple(ExprTuple {
                        range,
                        elts: children_elts,
                        ctx: ExprContext::Load,
                        parenthesized: TupleParenthesized::Bool(true),
                    }),
                },
            ],
        })
    }
}

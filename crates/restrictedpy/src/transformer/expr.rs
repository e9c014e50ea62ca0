//! C8 expression handlers, dispatched by the exhaustive match in
//! [`transform_expr`]. See SPEC_FULL.md §4.8.

use ruff_python_ast::{
    Comprehension, Expr, ExprAttribute, ExprBoolOp, ExprBinOp, ExprCall, ExprCompare,
    ExprContext, ExprDict, ExprDictComp, ExprGenerator, ExprIf, ExprLambda, ExprList,
    ExprListComp, ExprSet, ExprSetComp, ExprStarred, ExprSubscript, ExprTuple, ExprUnaryOp,
    Keyword, Operator,
};

use crate::ast_build;
use crate::context::TransformContext;
use crate::policy;
use crate::unpack;
use crate::slice;

use super::not_allowed;

/// The single exhaustive dispatch point for expressions (C7 applied to
/// `Expr`). Every `ruff_python_ast::Expr` variant has an arm; kinds with no
/// counterpart in this spec's accepted surface call [`not_allowed`].
pub fn transform_expr(ctx: &mut TransformContext, expr: Expr) -> Expr {
    match expr {
        Expr::BoolOp(b) => transform_bool_op(ctx, b),
        Expr::Named(n) => {
            not_allowed(ctx, n.range, "Named expression");
            Expr::Named(n)
        }
        Expr::BinOp(b) => transform_bin_op(ctx, b),
        Expr::UnaryOp(u) => transform_unary_op(ctx, u),
        Expr::Lambda(l) => transform_lambda(ctx, l),
        Expr::If(i) => transform_if_exp(ctx, i),
        Expr::Dict(d) => transform_dict(ctx, d),
        Expr::Set(s) => transform_set(ctx, s),
        Expr::ListComp(lc) => transform_list_comp(ctx, lc),
        Expr::SetComp(sc) => transform_set_comp(ctx, sc),
        Expr::DictComp(dc) => transform_dict_comp(ctx, dc),
        Expr::Generator(g) => transform_generator(ctx, g),
        Expr::Await(a) => {
            not_allowed(ctx, a.range, "Await");
            Expr::Await(a)
        }
        Expr::Yield(y) => {
            not_allowed(ctx, y.range, "Yield");
            Expr::Yield(y)
        }
        Expr::YieldFrom(y) => {
            not_allowed(ctx, y.range, "Yield from");
            Expr::YieldFrom(y)
        }
        Expr::Compare(c) => transform_compare(ctx, c),
        Expr::Call(c) => transform_call(ctx, c),
        Expr::FString(f) => {
            not_allowed(ctx, f.range, "F-string");
            Expr::FString(f)
        }
        Expr::StringLiteral(_)
        | Expr::BytesLiteral(_)
        | Expr::NumberLiteral(_)
        | Expr::BooleanLiteral(_)
        | Expr::NoneLiteral(_) => expr,
        Expr::EllipsisLiteral(e) => {
            not_allowed(ctx, e.range, "Ellipsis literal");
            Expr::EllipsisLiteral(e)
        }
        Expr::Attribute(a) => transform_attribute(ctx, a),
        Expr::Subscript(s) => transform_subscript(ctx, s),
        Expr::Starred(s) => transform_starred(ctx, s),
        Expr::Name(n) => transform_name(ctx, n),
        Expr::List(l) => transform_list(ctx, l),
        Expr::Tuple(t) => transform_tuple(ctx, t),
        Expr::Slice(s) => {
            // A subscript's slice child is intercepted by
            // `transform_subscript` before reaching this match; seeing one
            // here means the tree shape the grammar guarantees does not
            // hold (§7's "malformed tree structure" carve-out).
            unreachable!(
                "Expr::Slice (range {:?}) reached outside a subscript's slice position",
                s.range
            )
        }
        Expr::IpyEscapeCommand(i) => {
            not_allowed(ctx, i.range, "IPython escape command");
            Expr::IpyEscapeCommand(i)
        }
    }
}

fn transform_bool_op(ctx: &mut TransformContext, b: ExprBoolOp) -> Expr {
    Expr::BoolOp(ExprBoolOp {
        range: b.range,
        op: b.op,
        values: b.values.into_iter().map(|v| transform_expr(ctx, v)).collect(),
    })
}

fn transform_bin_op(ctx: &mut TransformContext, b: ExprBinOp) -> Expr {
    if b.op == Operator::MatMult {
        let message = ctx.dialect.matmul_diagnostic();
        ctx.error(b.range, message);
    }
    Expr::BinOp(ExprBinOp {
        range: b.range,
        left: Box::new(transform_expr(ctx, *b.left)),
        op: b.op,
        right: Box::new(transform_expr(ctx, *b.right)),
    })
}

fn transform_unary_op(ctx: &mut TransformContext, u: ExprUnaryOp) -> Expr {
    Expr::UnaryOp(ExprUnaryOp {
        range: u.range,
        op: u.op,
        operand: Box::new(transform_expr(ctx, *u.operand)),
    })
}

fn transform_if_exp(ctx: &mut TransformContext, i: ExprIf) -> Expr {
    Expr::If(ExprIf {
        range: i.range,
        test: Box::new(transform_expr(ctx, *i.test)),
        body: Box::new(transform_expr(ctx, *i.body)),
        orelse: Box::new(transform_expr(ctx, *i.orelse)),
    })
}

fn transform_dict(ctx: &mut TransformContext, d: ExprDict) -> Expr {
    use ruff_python_ast::DictItem;
    Expr::Dict(ExprDict {
        range: d.range,
        items: d
            .items
            .into_iter()
            .map(|item| DictItem {
                key: item.key.map(|k| transform_expr(ctx, k)),
                value: transform_expr(ctx, item.value),
            })
            .collect(),
    })
}

fn transform_set(ctx: &mut TransformContext, s: ExprSet) -> Expr {
    Expr::Set(ExprSet {
        range: s.range,
        elts: s.elts.into_iter().map(|e| transform_expr(ctx, e)).collect(),
    })
}

fn transform_comprehensions(
    ctx: &mut TransformContext,
    generators: Vec<Comprehension>,
) -> Vec<Comprehension> {
    generators
        .into_iter()
        .map(|comp| transform_comprehension(ctx, comp))
        .collect()
}

/// Wraps a comprehension/for-loop's iterable in `_getiter_`, or in
/// `_iter_unpack_sequence_` when the target is itself a sequence pattern
/// (§4.8, "Iteration guard").
fn transform_comprehension(ctx: &mut TransformContext, comp: Comprehension) -> Comprehension {
    let range = comp.range;
    if comp.is_async {
        ctx.error(range, "Async comprehensions are not allowed.");
    }
    let target = transform_expr(ctx, comp.target);
    let transformed_iter = transform_expr(ctx, comp.iter);
    let iter = match unpack::build_spec_for_target(&target) {
        Some(spec) => {
            let spec_expr = spec.to_expr(range);
            ast_build::call(
                ast_build::load_name("_iter_unpack_sequence_", range),
                vec![transformed_iter, spec_expr, ast_build::load_name("_getiter_", range)],
                range,
            )
        }
        None => ast_build::call(ast_build::load_name("_getiter_", range), vec![transformed_iter], range),
    };
    Comprehension {
        range,
        target,
        iter,
        ifs: comp.ifs.into_iter().map(|e| transform_expr(ctx, e)).collect(),
        is_async: comp.is_async,
    }
}

fn transform_list_comp(ctx: &mut TransformContext, lc: ExprListComp) -> Expr {
    Expr::ListComp(ExprListComp {
        range: lc.range,
        elt: Box::new(transform_expr(ctx, *lc.elt)),
        generators: transform_comprehensions(ctx, lc.generators),
    })
}

fn transform_set_comp(ctx: &mut TransformContext, sc: ExprSetComp) -> Expr {
    Expr::SetComp(ExprSetComp {
        range: sc.range,
        elt: Box::new(transform_expr(ctx, *sc.elt)),
        generators: transform_comprehensions(ctx, sc.generators),
    })
}

fn transform_dict_comp(ctx: &mut TransformContext, dc: ExprDictComp) -> Expr {
    Expr::DictComp(ExprDictComp {
        range: dc.range,
        key: Box::new(transform_expr(ctx, *dc.key)),
        value: Box::new(transform_expr(ctx, *dc.value)),
        generators: transform_comprehensions(ctx, dc.generators),
    })
}

fn transform_generator(ctx: &mut TransformContext, g: ExprGenerator) -> Expr {
    Expr::Generator(ExprGenerator {
        range: g.range,
        elt: Box::new(transform_expr(ctx, *g.elt)),
        generators: transform_comprehensions(ctx, g.generators),
        parenthesized: g.parenthesized,
    })
}

fn transform_compare(ctx: &mut TransformContext, c: ExprCompare) -> Expr {
    Expr::Compare(ExprCompare {
        range: c.range,
        left: Box::new(transform_expr(ctx, *c.left)),
        ops: c.ops,
        comparators: c.comparators.into_iter().map(|e| transform_expr(ctx, e)).collect(),
    })
}

/// `f(args…, *a, **k)` → `_apply_(f, args…, *a, **k)` when any positional
/// argument is starred or any keyword is a bare `**k` (absent keyword
/// name); `exec`/`eval` callees are rejected outright. See §4.8, "Call".
fn transform_call(ctx: &mut TransformContext, call: ExprCall) -> Expr {
    let range = call.range;

    if let Expr::Name(name) = call.func.as_ref() {
        match name.id.as_str() {
            "exec" => ctx.error(range, "Exec calls are not allowed."),
            "eval" => ctx.error(range, "Eval calls are not allowed."),
            _ => {}
        }
    }

    let has_variadic_call_args = call.arguments.args.iter().any(|a| matches!(a, Expr::Starred(_)))
        || call.arguments.keywords.iter().any(|kw| kw.arg.is_none());

    let func = transform_expr(ctx, *call.func);
    let args: Vec<Expr> = Vec::from(call.arguments.args)
        .into_iter()
        .map(|a| transform_expr(ctx, a))
        .collect();
    let keywords: Vec<Keyword> = Vec::from(call.arguments.keywords)
        .into_iter()
        .map(|kw| Keyword {
            range: kw.range,
            arg: kw.arg,
            value: transform_expr(ctx, kw.value),
        })
        .collect();

    if has_variadic_call_args {
        let mut new_args = Vec::with_capacity(args.len() + 1);
        new_args.push(func);
        new_args.extend(args);
        ast_build::call_with_keywords(ast_build::load_name("_apply_", range), new_args, keywords, range)
    } else {
        ast_build::call_with_keywords(func, args, keywords, range)
    }
}

fn transform_attribute(ctx: &mut TransformContext, attr: ExprAttribute) -> Expr {
    let range = attr.range;
    let line = ctx.line(range);
    policy::check_attr_name(&mut ctx.diagnostics, line, attr.attr.as_str());

    match attr.ctx {
        ExprContext::Load => {
            let value = transform_expr(ctx, *attr.value);
            ast_build::call(
                ast_build::load_name("_getattr_", range),
                vec![value, ast_build::string_literal(attr.attr.as_str(), range)],
                range,
            )
        }
        ExprContext::Store | ExprContext::Del => {
            let value = transform_expr(ctx, *attr.value);
            let wrapped = ast_build::call(ast_build::load_name("_write_", range), vec![value], range);
            Expr::Attribute(ExprAttribute {
                range,
                value: Box::new(wrapped),
                attr: attr.attr,
                ctx: attr.ctx,
            })
        }
        ExprContext::Invalid => Expr::Attribute(attr),
    }
}

fn transform_subscript(ctx: &mut TransformContext, sub: ExprSubscript) -> Expr {
    let range = sub.range;
    match sub.ctx {
        ExprContext::Load => {
            let value = transform_expr(ctx, *sub.value);
            let slice = slice::transform_slice(*sub.slice, range, |e| transform_expr(ctx, e));
            ast_build::call(
                ast_build::load_name("_getitem_", range),
                vec![value, slice],
                range,
            )
        }
        ExprContext::Store | ExprContext::Del => {
            let value = transform_expr(ctx, *sub.value);
            let wrapped = ast_build::call(ast_build::load_name("_write_", range), vec![value], range);
            let slice = slice::transform_slice(*sub.slice, range, |e| transform_expr(ctx, e));
            Expr::Subscript(ExprSubscript {
                range,
                value: Box::new(wrapped),
                slice: Box::new(slice),
                ctx: sub.ctx,
            })
        }
        ExprContext::Invalid => Expr::Subscript(sub),
    }
}

fn transform_starred(ctx: &mut TransformContext, s: ExprStarred) -> Expr {
    Expr::Starred(ExprStarred {
        range: s.range,
        value: Box::new(transform_expr(ctx, *s.value)),
    })
}

/// `print`/`printed` are magic in load position; every other name is
/// recorded in the used-names set and checked against the name policy
/// regardless of context. See §4.8, "Names".
pub fn transform_name(ctx: &mut TransformContext, name: ruff_python_ast::ExprName) -> Expr {
    let range = name.range;
    let line = ctx.line(range);
    match name.ctx {
        ExprContext::Load => match name.id.as_str() {
            "printed" => {
                ctx.print_scopes.mark_printed_used();
                ast_build::call(ast_build::load_name("_print", range), vec![], range)
            }
            "print" => {
                ctx.print_scopes.mark_print_used();
                ast_build::attribute(
                    ast_build::load_name("_print", range),
                    "_call_print",
                    ExprContext::Load,
                    range,
                )
            }
            id => {
                ctx.record_used_name(id);
                policy::check_name(&mut ctx.diagnostics, line, Some(id));
                Expr::Name(name)
            }
        },
        ExprContext::Store | ExprContext::Del => {
            policy::check_name(&mut ctx.diagnostics, line, Some(name.id.as_str()));
            Expr::Name(name)
        }
        ExprContext::Invalid => Expr::Name(name),
    }
}

fn transform_list(ctx: &mut TransformContext, l: ExprList) -> Expr {
    Expr::List(ExprList {
        range: l.range,
        elts: l.elts.into_iter().map(|e| transform_expr(ctx, e)).collect(),
        ctx: l.ctx,
    })
}

fn transform_tuple(ctx: &mut TransformContext, t: ExprTuple) -> Expr {
    Expr::Tuple(ExprTuple {
        range: t.range,
        elts: t.elts.into_iter().map(|e| transform_expr(ctx, e)).collect(),
        ctx: t.ctx,
        parenthesized: t.parenthesized,
    })
}

fn transform_lambda(ctx: &mut TransformContext, l: ExprLambda) -> Expr {
    // Print-scope is pushed/popped for flag bookkeeping only; a lambda
    // body is a single expression with no statement list to prepend a
    // collector to. See SPEC_FULL.md §4.6.
    ctx.print_scopes.push();
    let parameters = l.parameters.map(|p| super::stmt::transform_parameters(ctx, *p));
    let body = Box::new(transform_expr(ctx, *l.body));
    ctx.print_scopes.pop();
    Expr::Lambda(ExprLambda {
        range: l.range,
        parameters: parameters.map(Box::new),
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::Dialect;
    use ruff_text_size::{TextRange, TextSize};

    const R: TextRange = TextRange::new(TextSize::new(0), TextSize::new(0));

    fn ctx() -> TransformContext {
        TransformContext::new("", Dialect::default())
    }

    fn name_load(id: &str) -> Expr {
        Expr::Name(ruff_python_ast::ExprName {
            range: R,
            id: ruff_python_ast::name::Name::new(id),
            ctx: ExprContext::Load,
        })
    }

    #[test]
    fn printed_becomes_print_collector_call() {
        let mut c = ctx();
        let out = transform_expr(&mut c, name_load("printed"));
        match out {
            Expr::Call(call) => assert!(matches!(*call.func, Expr::Name(ref n) if n.id.as_str() == "_print")),
            _ => panic!("expected a call"),
        }
    }

    #[test]
    fn print_becomes_call_print_attribute() {
        let mut c = ctx();
        let out = transform_expr(&mut c, name_load("print"));
        match out {
            Expr::Attribute(attr) => assert_eq!(attr.attr.as_str(), "_call_print"),
            _ => panic!("expected an attribute"),
        }
    }

    #[test]
    fn ordinary_name_records_used_name() {
        let mut c = ctx();
        let _ = transform_expr(&mut c, name_load("total"));
        assert!(c.used_names().contains("total"));
    }

    #[test]
    fn leading_underscore_attribute_is_rejected() {
        let mut c = ctx();
        let attr = Expr::Attribute(ExprAttribute {
            range: R,
            value: Box::new(name_load("a")),
            attr: ruff_python_ast::Identifier::new("_b", R),
            ctx: ExprContext::Load,
        });
        let _ = transform_expr(&mut c, attr);
        assert!(c.diagnostics.has_errors());
    }

    #[test]
    fn plain_attribute_read_rewrites_to_getattr() {
        let mut c = ctx();
        let attr = Expr::Attribute(ExprAttribute {
            range: R,
            value: Box::new(name_load("a")),
            attr: ruff_python_ast::Identifier::new("b", R),
            ctx: ExprContext::Load,
        });
        let out = transform_expr(&mut c, attr);
        match out {
            Expr::Call(call) => {
                assert!(matches!(*call.func, Expr::Name(ref n) if n.id.as_str() == "_getattr_"));
                assert_eq!(call.arguments.args.len(), 2);
            }
            _ => panic!("expected a call to _getattr_"),
        }
        assert!(!c.diagnostics.has_errors());
    }

    #[test]
    fn matmul_is_rejected() {
        let mut c = ctx();
        let bin = Expr::BinOp(ExprBinOp {
            range: R,
            left: Box::new(name_load("a")),
            op: Operator::MatMult,
            right: Box::new(name_load("b")),
        });
        let _ = transform_expr(&mut c, bin);
        assert!(c.diagnostics.has_errors());
    }

    #[test]
    fn exec_call_is_rejected() {
        let mut c = ctx();
        let call = Expr::Call(ExprCall {
            range: R,
            func: Box::new(name_load("exec")),
            arguments: ruff_python_ast::Arguments {
                range: R,
                args: Box::new([]),
                keywords: Box::new([]),
            },
        });
        let _ = transform_expr(&mut c, call);
        assert!(c.diagnostics.has_errors());
    }

    #[test]
    fn star_args_rewrite_to_apply() {
        let mut c = ctx();
        let starred = Expr::Starred(ExprStarred {
            range: R,
            value: Box::new(name_load("a")),
        });
        let call = Expr::Call(ExprCall {
            range: R,
            func: Box::new(name_load("f")),
            arguments: ruff_python_ast::Arguments {
                range: R,
                args: Box::new([starred]),
                keywords: Box::new([]),
            },
        });
        let out = transform_expr(&mut c, call);
        match out {
            Expr::Call(call) => {
                assert!(matches!(*call.func, Expr::Name(ref n) if n.id.as_str() == "_apply_"));
                assert_eq!(call.arguments.args.len(), 2); // f, *a
            }
            _ => panic!("expected a call to _apply_"),
        }
    }

    #[test]
    fn ellipsis_literal_is_rejected() {
        let mut c = ctx();
        let e = Expr::EllipsisLiteral(ruff_python_ast::ExprEllipsisLiteral { range: R });
        let _ = transform_expr(&mut c, e);
        assert!(c.diagnostics.has_errors());
    }

    #[test]
    fn yield_is_rejected() {
        let mut c = ctx();
        let y = Expr::Yield(ruff_python_ast::ExprYield { range: R, value: None });
        let _ = transform_expr(&mut c, y);
        assert!(c.diagnostics.has_errors());
        assert_eq!(c.diagnostics.warnings().len(), 1);
    }
}

//! Small private constructor helpers for synthesized AST nodes, in the
//! style of the teacher's `ParseError::syntax(...)`-style private
//! constructors: one function per node shape we ever need to mint, so call
//! sites read as intent ("a call to `_getattr_`") rather than struct-literal
//! noise.

use ruff_python_ast::name::Name;
use ruff_python_ast::{
    self as ast, Arguments, Expr, ExprAttribute, ExprCall, ExprContext, ExprName,
    ExprNoneLiteral, ExprNumberLiteral, ExprStringLiteral, Keyword, Number, StringLiteral,
    StringLiteralFlags, StringLiteralValue,
};
use ruff_text_size::TextRange;

/// `name` in load position, e.g. a policy hook reference like `_getattr_`.
pub fn load_name(name: &str, range: TextRange) -> Expr {
    Expr::Name(ExprName {
        range,
        id: Name::new(name),
        ctx: ExprContext::Load,
    })
}

/// `name` in store position, used when synthesizing assignment targets.
pub fn store_name(name: &str, range: TextRange) -> Expr {
    Expr::Name(ExprName {
        range,
        id: Name::new(name),
        ctx: ExprContext::Store,
    })
}

/// `del`-position reference to `name`.
pub fn del_name(name: &str, range: TextRange) -> Expr {
    Expr::Name(ExprName {
        range,
        id: Name::new(name),
        ctx: ExprContext::Del,
    })
}

/// `value.attr`, in the given context (load for a read, store/del when the
/// surrounding handler has already rewritten `value` to `_write_(...)`).
pub fn attribute(value: Expr, attr: &str, ctx: ExprContext, range: TextRange) -> Expr {
    Expr::Attribute(ExprAttribute {
        range,
        value: Box::new(value),
        attr: ast::Identifier::new(attr, range),
        ctx,
    })
}

/// `func(args...)` with no keyword arguments, the common case for
/// synthesized policy-hook calls (`_getattr_(obj, "name")`,
/// `_getiter_(iterable)`, ...).
pub fn call(func: Expr, args: Vec<Expr>, range: TextRange) -> Expr {
    Expr::Call(ExprCall {
        range,
        func: Box::new(func),
        arguments: Arguments {
            range,
            args: args.into_boxed_slice(),
            keywords: Box::new([]),
        },
    })
}

/// `func(args..., key=value, ...)`.
pub fn call_with_keywords(
    func: Expr,
    args: Vec<Expr>,
    keywords: Vec<Keyword>,
    range: TextRange,
) -> Expr {
    Expr::Call(ExprCall {
        range,
        func: Box::new(func),
        arguments: Arguments {
            range,
            args: args.into_boxed_slice(),
            keywords: keywords.into_boxed_slice(),
        },
    })
}

/// A plain (non-f) string literal, used for attribute-name arguments to
/// `_getattr_`/`_write_` and for the `"op="` token passed to
/// `_inplacevar_`.
pub fn string_literal(value: &str, range: TextRange) -> Expr {
    Expr::StringLiteral(ExprStringLiteral {
        range,
        value: StringLiteralValue::single(StringLiteral {
            range,
            value: value.into(),
            flags: StringLiteralFlags::empty(),
        }),
    })
}

/// The host's *none* literal, used for omitted slice bounds.
pub fn none_literal(range: TextRange) -> Expr {
    Expr::NoneLiteral(ExprNoneLiteral { range })
}

/// An integer literal, used when rendering an unpack spec's `min_len` and
/// child indices.
pub fn int_literal(value: i64, range: TextRange) -> Expr {
    Expr::NumberLiteral(ExprNumberLiteral {
        range,
        value: Number::Int(value.into()),
    })
}

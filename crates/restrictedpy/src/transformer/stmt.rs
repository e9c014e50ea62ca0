//! C8 statement handlers, dispatched by the exhaustive match in
//! [`transform_stmt`]. See SPEC_FULL.md §4.8.
//!
//! Most handlers return a single replacement statement, but assignment can
//! expand one source statement into several (one per target, when any
//! target is a sequence pattern — §4.8, "Assignment"), so every handler
//! returns `Vec<Stmt>` and [`transform_body`] flattens.

use ruff_python_ast::{
    self as ast, Alias, Arguments, Decorator, ElifElseClause, ExceptHandler,
    ExceptHandlerExceptHandler, Expr, ExprContext, Identifier, Keyword, ModModule, Operator,
    Parameter, ParameterWithDefault, Parameters, Stmt, StmtAssert, StmtAssign, StmtAugAssign,
    StmtClassDef, StmtDelete, StmtFor, StmtFunctionDef, StmtIf, StmtImport, StmtImportFrom,
    StmtRaise, StmtReturn, StmtTry, StmtWhile, StmtWith, WithItem,
};
use ruff_text_size::TextRange;

use crate::ast_build;
use crate::context::TransformContext;
use crate::policy;
use crate::print_collector;
use crate::unpack;

use super::expr::transform_expr;
use super::not_allowed;

fn is_sequence_pattern(expr: &Expr) -> bool {
    matches!(expr, Expr::Tuple(_) | Expr::List(_))
}

/// Transforms a module to completion: walks the body, then injects the
/// module-scope print collector past any leading `__future__` imports
/// (§4.6).
pub fn transform_module(ctx: &mut TransformContext, module: ModModule) -> ModModule {
    ctx.print_scopes.push();
    let mut body = transform_body(ctx, module.body);
    let scope = ctx.print_scopes.pop();
    let insertion_index = print_collector::module_insertion_index(&body);
    print_collector::inject(&mut body, scope, &mut ctx.diagnostics, None, insertion_index, module.range);
    ModModule { range: module.range, body }
}

pub fn transform_body(ctx: &mut TransformContext, body: Vec<Stmt>) -> Vec<Stmt> {
    body.into_iter().flat_map(|stmt| transform_stmt(ctx, stmt)).collect()
}

/// The single exhaustive dispatch point for statements (C7 applied to
/// `Stmt`). Every `ruff_python_ast::Stmt` variant has an arm; kinds with no
/// counterpart in this spec's accepted surface call [`not_allowed`].
pub fn transform_stmt(ctx: &mut TransformContext, stmt: Stmt) -> Vec<Stmt> {
    match stmt {
        Stmt::FunctionDef(f) => vec![transform_function_def(ctx, f)],
        Stmt::ClassDef(c) => vec![transform_class_def(ctx, c)],
        Stmt::Return(r) => vec![Stmt::Return(StmtReturn {
            range: r.range,
            value: r.value.map(|v| Box::new(transform_expr(ctx, *v))),
        })],
        Stmt::Delete(d) => vec![Stmt::Delete(StmtDelete {
            range: d.range,
            targets: d.targets.into_iter().map(|t| transform_expr(ctx, t)).collect(),
        })],
        Stmt::Assign(a) => transform_assign(ctx, a),
        Stmt::AugAssign(a) => transform_aug_assign(ctx, a),
        Stmt::AnnAssign(a) => {
            not_allowed(ctx, a.range, "Annotated assignment");
            vec![Stmt::AnnAssign(a)]
        }
        Stmt::TypeAlias(t) => {
            not_allowed(ctx, t.range, "Type alias");
            vec![Stmt::TypeAlias(t)]
        }
        Stmt::For(f) => vec![transform_for(ctx, f)],
        Stmt::While(w) => vec![Stmt::While(StmtWhile {
            range: w.range,
            test: Box::new(transform_expr(ctx, *w.test)),
            body: transform_body(ctx, w.body),
            orelse: transform_body(ctx, w.orelse),
        })],
        Stmt::If(i) => vec![transform_if(ctx, i)],
        Stmt::With(w) => vec![transform_with(ctx, w)],
        Stmt::Match(m) => {
            not_allowed(ctx, m.range, "Match");
            vec![Stmt::Match(m)]
        }
        Stmt::Raise(r) => vec![Stmt::Raise(StmtRaise {
            range: r.range,
            exc: r.exc.map(|e| Box::new(transform_expr(ctx, *e))),
            cause: r.cause.map(|c| Box::new(transform_expr(ctx, *c))),
        })],
        Stmt::Try(t) => vec![transform_try(ctx, t)],
        Stmt::Assert(a) => vec![Stmt::Assert(StmtAssert {
            range: a.range,
            test: Box::new(transform_expr(ctx, *a.test)),
            msg: a.msg.map(|m| Box::new(transform_expr(ctx, *m))),
        })],
        Stmt::Import(i) => vec![transform_import(ctx, i)],
        Stmt::ImportFrom(i) => vec![transform_import_from(ctx, i)],
        Stmt::Global(g) => vec![Stmt::Global(g)],
        Stmt::Nonlocal(n) => {
            not_allowed(ctx, n.range, "Nonlocal");
            vec![Stmt::Nonlocal(n)]
        }
        Stmt::Expr(e) => vec![Stmt::Expr(ast::StmtExpr {
            range: e.range,
            value: Box::new(transform_expr(ctx, *e.value)),
        })],
        Stmt::Pass(p) => vec![Stmt::Pass(p)],
        Stmt::Break(b) => vec![Stmt::Break(b)],
        Stmt::Continue(c) => vec![Stmt::Continue(c)],
        Stmt::IpyEscapeCommand(i) => {
            not_allowed(ctx, i.range, "IPython escape command");
            vec![Stmt::IpyEscapeCommand(i)]
        }
    }
}

/// `t1 = t2 = ... = expr`. When no target is a sequence pattern this is a
/// plain pass-through; otherwise each target becomes its own assignment,
/// emitted right-most target first, sequence-pattern targets receiving
/// `_unpack_sequence_(expr, spec, _getiter_)` instead of `expr` (§4.8).
fn transform_assign(ctx: &mut TransformContext, assign: StmtAssign) -> Vec<Stmt> {
    let range = assign.range;
    let value = transform_expr(ctx, *assign.value);
    let targets: Vec<Expr> = assign.targets.into_iter().map(|t| transform_expr(ctx, t)).collect();

    if !targets.iter().any(is_sequence_pattern) {
        return vec![Stmt::Assign(StmtAssign { range, targets, value: Box::new(value) })];
    }

    let mut stmts = Vec::with_capacity(targets.len());
    for target in targets.into_iter().rev() {
        let rhs = match unpack::build_spec_for_target(&target) {
            Some(spec) => {
                let spec_expr = spec.to_expr(range);
                ast_build::call(
                    ast_build::load_name("_unpack_sequence_", range),
                    vec![value.clone(), spec_expr, ast_build::load_name("_getiter_", range)],
                    range,
                )
            }
            None => value.clone(),
        };
        stmts.push(Stmt::Assign(StmtAssign { range, targets: vec![target], value: Box::new(rhs) }));
    }
    stmts
}

/// The textual in-place operator token `_inplacevar_` expects. `MatMult`
/// has no real token (the original's `IOPERATOR_TO_STR` table has no entry
/// for it either) — SPEC_FULL.md §4.8 records this as an error rather than
/// a panic, matching the "diagnostics, never exceptions" rule (§7).
fn inplace_operator_token(ctx: &mut TransformContext, op: Operator, range: TextRange) -> &'static str {
    match op {
        Operator::Add => "+=",
        Operator::Sub => "-=",
        Operator::Mult => "*=",
        Operator::Div => "/=",
        Operator::Mod => "%=",
        Operator::Pow => "**=",
        Operator::LShift => "<<=",
        Operator::RShift => ">>=",
        Operator::BitOr => "|=",
        Operator::BitXor => "^=",
        Operator::BitAnd => "&=",
        Operator::FloorDiv => "//=",
        Operator::MatMult => {
            ctx.error(range, "Augmented matrix multiplication is not allowed.");
            "@="
        }
    }
}

fn transform_aug_assign(ctx: &mut TransformContext, aug: StmtAugAssign) -> Vec<Stmt> {
    let range = aug.range;
    match *aug.target {
        Expr::Attribute(_) => {
            ctx.error(range, "Augmented assignment of attributes is not allowed.");
            vec![Stmt::AugAssign(StmtAugAssign { range, target: aug.target, op: aug.op, value: aug.value })]
        }
        Expr::Subscript(_) => {
            ctx.error(range, "Augmented assignment of object items and slices is not allowed.");
            vec![Stmt::AugAssign(StmtAugAssign { range, target: aug.target, op: aug.op, value: aug.value })]
        }
        Expr::Name(name) => {
            let token = inplace_operator_token(ctx, aug.op, range);
            let value = transform_expr(ctx, *aug.value);
            let read = ast_build::load_name(name.id.as_str(), name.range);
            let call = ast_build::call(
                ast_build::load_name("_inplacevar_", range),
                vec![ast_build::string_literal(token, range), read, value],
                range,
            );
            vec![Stmt::Assign(StmtAssign { range, targets: vec![Expr::Name(name)], value: Box::new(call) })]
        }
        other => {
            not_allowed(ctx, range, "Augmented assignment target");
            vec![Stmt::AugAssign(StmtAugAssign { range, target: Box::new(other), op: aug.op, value: aug.value })]
        }
    }
}

fn transform_for(ctx: &mut TransformContext, for_stmt: StmtFor) -> Stmt {
    let range = for_stmt.range;
    if for_stmt.is_async {
        not_allowed(ctx, range, "Async for");
    }
    let target = transform_expr(ctx, *for_stmt.target);
    let transformed_iter = transform_expr(ctx, *for_stmt.iter);
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
    Stmt::For(StmtFor {
        range,
        is_async: for_stmt.is_async,
        target: Box::new(target),
        iter: Box::new(iter),
        body: transform_body(ctx, for_stmt.body),
        orelse: transform_body(ctx, for_stmt.orelse),
    })
}

fn transform_if(ctx: &mut TransformContext, i: StmtIf) -> Stmt {
    let test = Box::new(transform_expr(ctx, *i.test));
    let body = transform_body(ctx, i.body);
    let elif_else_clauses = i
        .elif_else_clauses
        .into_iter()
        .map(|clause| ElifElseClause {
            range: clause.range,
            test: clause.test.map(|t| transform_expr(ctx, t)),
            body: transform_body(ctx, clause.body),
        })
        .collect();
    Stmt::If(StmtIf { range: i.range, test, body, elif_else_clauses })
}

fn transform_with(ctx: &mut TransformContext, w: StmtWith) -> Stmt {
    let range = w.range;
    if w.is_async {
        not_allowed(ctx, range, "Async with");
    }
    let mut prelude: Vec<Stmt> = Vec::new();
    let items: Vec<WithItem> = w
        .items
        .into_iter()
        .map(|item| transform_with_item(ctx, item, range, &mut prelude))
        .collect();
    let mut body = transform_body(ctx, w.body);
    for stmt in prelude.into_iter().rev() {
        body.insert(0, stmt);
    }
    Stmt::With(StmtWith { range, is_async: w.is_async, items, body })
}

/// A sequence-pattern `as`-target gets a fresh temporary bound to the
/// context value, with a guarded `try: pattern = _unpack_sequence_(tmp,
/// spec, _getiter_) finally: del tmp` prepended to the with-body. A plain
/// `Name` target is instead validated like `except as name` (Open Question
/// resolved — SPEC_FULL.md §4.8).
fn transform_with_item(
    ctx: &mut TransformContext,
    item: WithItem,
    with_range: TextRange,
    prelude: &mut Vec<Stmt>,
) -> WithItem {
    let context_expr = transform_expr(ctx, item.context_expr);
    let optional_vars = item.optional_vars.map(|v| {
        let transformed = transform_expr(ctx, v);
        match unpack::build_spec_for_target(&transformed) {
            Some(spec) => {
                let tmp = ctx.fresh_temp_name();
                let unpack_call = ast_build::call(
                    ast_build::load_name("_unpack_sequence_", with_range),
                    vec![
                        ast_build::load_name(&tmp, with_range),
                        spec.to_expr(with_range),
                        ast_build::load_name("_getiter_", with_range),
                    ],
                    with_range,
                );
                let assign_pattern = Stmt::Assign(StmtAssign {
                    range: with_range,
                    targets: vec![transformed],
                    value: Box::new(unpack_call),
                });
                let del_tmp = Stmt::Delete(StmtDelete {
                    range: with_range,
                    targets: vec![ast_build::del_name(&tmp, with_range)],
                });
                prelude.push(Stmt::Try(StmtTry {
                    range: with_range,
                    body: vec![assign_pattern],
                    handlers: vec![],
                    orelse: vec![],
                    finalbody: vec![del_tmp],
                    is_star: false,
                }));
                ast_build::store_name(&tmp, with_range)
            }
            None => {
                if let Expr::Name(name) = &transformed {
                    let line = ctx.line(with_range);
                    policy::check_name(&mut ctx.diagnostics, line, Some(name.id.as_str()));
                }
                transformed
            }
        }
    });
    WithItem { range: item.range, context_expr, optional_vars }
}

fn transform_try(ctx: &mut TransformContext, t: StmtTry) -> Stmt {
    let range = t.range;
    if t.is_star {
        not_allowed(ctx, range, "Try-star (exception groups)");
    }
    Stmt::Try(StmtTry {
        range,
        body: transform_body(ctx, t.body),
        handlers: t.handlers.into_iter().map(|h| transform_except_handler(ctx, h)).collect(),
        orelse: transform_body(ctx, t.orelse),
        finalbody: transform_body(ctx, t.finalbody),
        is_star: t.is_star,
    })
}

fn transform_except_handler(ctx: &mut TransformContext, handler: ExceptHandler) -> ExceptHandler {
    match handler {
        ExceptHandler::ExceptHandler(h) => {
            let line = ctx.line(h.range);
            if let Some(name) = &h.name {
                policy::check_name(&mut ctx.diagnostics, line, Some(name.as_str()));
            }
            ExceptHandler::ExceptHandler(ExceptHandlerExceptHandler {
                range: h.range,
                type_: h.type_.map(|t| Box::new(transform_expr(ctx, *t))),
                name: h.name,
                body: transform_body(ctx, h.body),
            })
        }
    }
}

fn check_alias_names(ctx: &mut TransformContext, line: Option<u32>, names: &[Alias]) {
    for alias in names {
        policy::check_name(&mut ctx.diagnostics, line, Some(alias.name.as_str()));
        if let Some(asname) = &alias.asname {
            policy::check_name(&mut ctx.diagnostics, line, Some(asname.as_str()));
        }
    }
}

fn transform_import(ctx: &mut TransformContext, imp: StmtImport) -> Stmt {
    let line = ctx.line(imp.range);
    check_alias_names(ctx, line, &imp.names);
    Stmt::Import(imp)
}

fn transform_import_from(ctx: &mut TransformContext, imp: StmtImportFrom) -> Stmt {
    let line = ctx.line(imp.range);
    check_alias_names(ctx, line, &imp.names);
    Stmt::ImportFrom(imp)
}

fn transform_parameter_with_default(ctx: &mut TransformContext, pwd: ParameterWithDefault) -> ParameterWithDefault {
    ParameterWithDefault {
        range: pwd.range,
        parameter: Parameter {
            range: pwd.parameter.range,
            name: pwd.parameter.name,
            annotation: pwd.parameter.annotation.map(|a| Box::new(transform_expr(ctx, *a))),
        },
        default: pwd.default.map(|d| Box::new(transform_expr(ctx, *d))),
    }
}

fn transform_bare_parameter(ctx: &mut TransformContext, p: Parameter) -> Parameter {
    Parameter {
        range: p.range,
        name: p.name,
        annotation: p.annotation.map(|a| Box::new(transform_expr(ctx, *a))),
    }
}

/// Validates every formal parameter name (positional, var-arg, kw-arg,
/// keyword-only) via the name policy, then recurses into annotations and
/// defaults. A nested sequence-pattern parameter (legacy-2-only) cannot
/// occur under the modern grammar this crate parses — see SPEC_FULL.md
/// §4.8's "legacy-2-only rewrite" note.
pub fn transform_parameters(ctx: &mut TransformContext, params: Parameters) -> Parameters {
    for pwd in params.posonlyargs.iter().chain(params.args.iter()).chain(params.kwonlyargs.iter()) {
        let line = ctx.line(pwd.parameter.range);
        policy::check_name(&mut ctx.diagnostics, line, Some(pwd.parameter.name.as_str()));
    }
    if let Some(vararg) = &params.vararg {
        let line = ctx.line(vararg.range);
        policy::check_name(&mut ctx.diagnostics, line, Some(vararg.name.as_str()));
    }
    if let Some(kwarg) = &params.kwarg {
        let line = ctx.line(kwarg.range);
        policy::check_name(&mut ctx.diagnostics, line, Some(kwarg.name.as_str()));
    }

    Parameters {
        range: params.range,
        posonlyargs: params.posonlyargs.into_iter().map(|p| transform_parameter_with_default(ctx, p)).collect(),
        args: params.args.into_iter().map(|p| transform_parameter_with_default(ctx, p)).collect(),
        vararg: params.vararg.map(|v| Box::new(transform_bare_parameter(ctx, *v))),
        kwonlyargs: params.kwonlyargs.into_iter().map(|p| transform_parameter_with_default(ctx, p)).collect(),
        kwarg: params.kwarg.map(|v| Box::new(transform_bare_parameter(ctx, *v))),
    }
}

fn transform_decorators(ctx: &mut TransformContext, decorators: Vec<Decorator>) -> Vec<Decorator> {
    decorators
        .into_iter()
        .map(|d| Decorator { range: d.range, expression: transform_expr(ctx, d.expression) })
        .collect()
}

/// Validates the function name and every parameter name, opens a
/// print-scope, transforms the body, and injects the print collector at
/// the top of the body on exit (§4.6, §4.8).
fn transform_function_def(ctx: &mut TransformContext, f: StmtFunctionDef) -> Stmt {
    let range = f.range;
    let line = ctx.line(range);
    policy::check_name(&mut ctx.diagnostics, line, Some(f.name.as_str()));
    if f.is_async {
        not_allowed(ctx, range, "Async function definition");
    }

    let decorator_list = transform_decorators(ctx, f.decorator_list);
    let parameters = Box::new(transform_parameters(ctx, *f.parameters));
    let returns = f.returns.map(|r| Box::new(transform_expr(ctx, *r)));

    ctx.print_scopes.push();
    let mut body = transform_body(ctx, f.body);
    let scope = ctx.print_scopes.pop();
    print_collector::inject(&mut body, scope, &mut ctx.diagnostics, line, 0, range);

    Stmt::FunctionDef(StmtFunctionDef {
        range,
        is_async: f.is_async,
        decorator_list,
        name: f.name,
        type_params: f.type_params,
        parameters,
        returns,
        body,
    })
}

/// Validates the class name; rejects an explicit `metaclass=` keyword if
/// present, otherwise injects `metaclass=__metaclass__` (§4.8).
fn transform_class_def(ctx: &mut TransformContext, c: StmtClassDef) -> Stmt {
    let range = c.range;
    let line = ctx.line(range);
    policy::check_name(&mut ctx.diagnostics, line, Some(c.name.as_str()));

    let metaclass_keyword = || Keyword {
        range,
        arg: Some(Identifier::new("metaclass", range)),
        value: ast_build::load_name("__metaclass__", range),
    };

    let arguments = match c.arguments {
        Some(args) => {
            let source_args: Vec<Expr> = Vec::from(args.args).into_iter().map(|a| transform_expr(ctx, a)).collect();
            let mut new_keywords = Vec::new();
            let mut has_metaclass = false;
            for kw in Vec::from(args.keywords) {
                if kw.arg.as_ref().is_some_and(|a| a.as_str() == "metaclass") {
                    has_metaclass = true;
                    ctx.error(range, "The keyword argument \"metaclass\" is not allowed.");
                }
                new_keywords.push(Keyword { range: kw.range, arg: kw.arg, value: transform_expr(ctx, kw.value) });
            }
            if !has_metaclass {
                new_keywords.push(metaclass_keyword());
            }
            Some(Box::new(Arguments {
                range: args.range,
                args: source_args.into_boxed_slice(),
                keywords: new_keywords.into_boxed_slice(),
            }))
        }
        None => Some(Box::new(Arguments {
            range,
            args: Box::new([]),
            keywords: vec![metaclass_keyword()].into_boxed_slice(),
        })),
    };

    Stmt::ClassDef(StmtClassDef {
        range,
        decorator_list: transform_decorators(ctx, c.decorator_list),
        name: c.name,
        type_params: c.type_params,
        arguments,
        body: transform_body(ctx, c.body),
    })
}

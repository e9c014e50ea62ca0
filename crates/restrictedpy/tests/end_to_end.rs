//! End-to-end scenarios: real source, parsed by `ruff_python_parser`,
//! pushed through `restrictedpy::transform`, checked against the rewritten
//! tree's shape and the diagnostics produced. See SPEC_FULL.md §8.

use pretty_assertions::assert_eq;
use ruff_python_ast::{Expr, ExprContext, Stmt};
use restrictedpy::{transform, Dialect, Diagnostics};

fn compile(source: &str) -> (ruff_python_ast::ModModule, Diagnostics) {
    let parsed = ruff_python_parser::parse_module(source).expect("fixture source must parse");
    transform(parsed.into_syntax(), source, Dialect::default())
}

fn call_func_name(expr: &Expr) -> Option<&str> {
    match expr {
        Expr::Call(call) => match call.func.as_ref() {
            Expr::Name(name) => Some(name.id.as_str()),
            _ => None,
        },
        _ => None,
    }
}

#[test]
fn attribute_read_rewrites_to_getattr() {
    let (module, diagnostics) = compile("a.b\n");
    assert!(!diagnostics.has_errors());
    let Stmt::Expr(stmt) = &module.body[0] else { panic!("expected an expression statement") };
    assert_eq!(call_func_name(&stmt.value), Some("_getattr_"));
}

#[test]
fn attribute_write_wraps_value_in_write_call() {
    let (module, diagnostics) = compile("a.b = 1\n");
    assert!(!diagnostics.has_errors());
    let Stmt::Assign(assign) = &module.body[0] else { panic!("expected an assignment") };
    let Expr::Attribute(attr) = &assign.targets[0] else { panic!("expected an attribute target") };
    assert_eq!(call_func_name(&attr.value), Some("_write_"));
}

#[test]
fn leading_underscore_name_is_rejected() {
    let (_module, diagnostics) = compile("_x = 1\n");
    assert!(diagnostics.has_errors());
    assert!(diagnostics.errors()[0].message.contains("starts with"));
}

#[test]
fn roles_suffix_name_is_rejected() {
    let (_module, diagnostics) = compile("x__roles__ = 1\n");
    assert!(diagnostics.has_errors());
    assert!(diagnostics.errors()[0].message.contains("__roles__"));
}

#[test]
fn function_scope_print_use_injects_collector_and_warns_imbalance() {
    let (module, diagnostics) = compile("def f():\n    print(1)\n");
    assert!(!diagnostics.has_errors());
    let Stmt::FunctionDef(f) = &module.body[0] else { panic!("expected a function definition") };
    assert_eq!(f.body.len(), 2, "collector assignment should be prepended");
    let Stmt::Assign(collector) = &f.body[0] else { panic!("expected the collector assignment first") };
    assert_eq!(call_func_name(&collector.value), Some("_print_"));
    assert_eq!(diagnostics.warnings().len(), 1);
    assert!(diagnostics.warnings()[0].message.contains("Prints, but never"));
}

#[test]
fn module_scope_print_without_printed_also_warns() {
    let (module, diagnostics) = compile("print(1)\n");
    assert_eq!(module.body.len(), 2, "collector assignment should be prepended at module scope");
    assert_eq!(diagnostics.warnings().len(), 1);
}

#[test]
fn for_loop_over_plain_target_wraps_getiter() {
    let (module, diagnostics) = compile("for x in xs:\n    pass\n");
    assert!(!diagnostics.has_errors());
    let Stmt::For(for_stmt) = &module.body[0] else { panic!("expected a for loop") };
    assert_eq!(call_func_name(&for_stmt.iter), Some("_getiter_"));
}

#[test]
fn for_loop_over_tuple_target_uses_iter_unpack_sequence() {
    let (module, diagnostics) = compile("for a, b in pairs:\n    pass\n");
    assert!(!diagnostics.has_errors());
    let Stmt::For(for_stmt) = &module.body[0] else { panic!("expected a for loop") };
    assert_eq!(call_func_name(&for_stmt.iter), Some("_iter_unpack_sequence_"));
}

#[test]
fn tuple_pattern_assignment_rewrites_to_unpack_sequence() {
    let (module, diagnostics) = compile("a, b = xs\n");
    assert!(!diagnostics.has_errors());
    let Stmt::Assign(assign) = &module.body[0] else { panic!("expected an assignment") };
    assert_eq!(call_func_name(&assign.value), Some("_unpack_sequence_"));
}

#[test]
fn multi_target_assignment_without_pattern_expands_right_to_left() {
    // `a = b = expr` has no sequence-pattern target, so it passes through
    // as a single multi-target assignment (§4.8).
    let (module, diagnostics) = compile("a = b = 1\n");
    assert!(!diagnostics.has_errors());
    let Stmt::Assign(assign) = &module.body[0] else { panic!("expected an assignment") };
    assert_eq!(assign.targets.len(), 2);
}

#[test]
fn augmented_assign_on_name_rewrites_to_inplacevar() {
    let (module, diagnostics) = compile("n += 1\n");
    assert!(!diagnostics.has_errors());
    let Stmt::Assign(assign) = &module.body[0] else { panic!("expected an assignment") };
    assert_eq!(call_func_name(&assign.value), Some("_inplacevar_"));
}

#[test]
fn augmented_assign_on_attribute_is_rejected() {
    let (_module, diagnostics) = compile("a.b += 1\n");
    assert!(diagnostics.has_errors());
    assert!(diagnostics.errors()[0].message.contains("Augmented assignment of attributes"));
}

#[test]
fn class_without_metaclass_gets_one_injected() {
    let (module, diagnostics) = compile("class C:\n    pass\n");
    assert!(!diagnostics.has_errors());
    let Stmt::ClassDef(class_def) = &module.body[0] else { panic!("expected a class definition") };
    let arguments = class_def.arguments.as_ref().expect("metaclass keyword should have been injected");
    assert_eq!(arguments.keywords.len(), 1);
    assert_eq!(arguments.keywords[0].arg.as_ref().unwrap().as_str(), "metaclass");
}

#[test]
fn explicit_metaclass_keyword_is_rejected() {
    let (_module, diagnostics) = compile("class C(metaclass=M):\n    pass\n");
    assert!(diagnostics.has_errors());
    assert!(diagnostics.errors()[0].message.contains("metaclass"));
}

#[test]
fn exec_call_is_rejected() {
    let (_module, diagnostics) = compile("exec(x)\n");
    assert!(diagnostics.has_errors());
    assert!(diagnostics.errors()[0].message.contains("Exec"));
}

#[test]
fn async_function_definition_is_rejected() {
    let (_module, diagnostics) = compile("async def f():\n    pass\n");
    assert!(diagnostics.has_errors());
}

#[test]
fn with_statement_over_tuple_target_guards_unpack_with_a_temporary() {
    let (module, diagnostics) = compile("with ctx() as (a, b):\n    pass\n");
    assert!(!diagnostics.has_errors());
    let Stmt::With(with_stmt) = &module.body[0] else { panic!("expected a with statement") };
    assert_eq!(with_stmt.body.len(), 2, "a guarded unpack try/finally should be prepended");
    assert!(matches!(with_stmt.body[0], Stmt::Try(_)));
    let optional_vars = with_stmt.items[0].optional_vars.as_ref().expect("with-item should bind a temporary");
    match optional_vars {
        Expr::Name(name) => {
            assert!(name.id.as_str().starts_with("_tmp"));
            assert_eq!(name.ctx, ExprContext::Store);
        }
        _ => panic!("expected the with-item to bind a plain temporary name"),
    }
}

#[test]
fn with_statement_over_plain_name_target_validates_the_name() {
    let (_module, diagnostics) = compile("with ctx() as _bad:\n    pass\n");
    assert!(diagnostics.has_errors());
}

#[test]
fn star_args_call_rewrites_to_apply() {
    let (module, diagnostics) = compile("f(*args, **kwargs)\n");
    assert!(!diagnostics.has_errors());
    let Stmt::Expr(stmt) = &module.body[0] else { panic!("expected an expression statement") };
    assert_eq!(call_func_name(&stmt.value), Some("_apply_"));
}

#[test]
fn matrix_multiplication_is_rejected() {
    let (_module, diagnostics) = compile("a @ b\n");
    assert!(diagnostics.has_errors());
}

//! C2: the name policy — the reserved-prefix/suffix rules that are the
//! actual security boundary for identifiers reaching into the sandbox.

use crate::diagnostics::Diagnostics;

const ROLES_SUFFIX: &str = "__roles__";

/// Validates an identifier used as a variable, function/class name, formal
/// parameter, import name/alias, or exception binding. Records an error on
/// the first matching rule and returns `false`; `true` if `name` is clean.
///
/// A `None` name (absent var-arg/kw-arg slot) is silently accepted.
pub fn check_name(diagnostics: &mut Diagnostics, line: Option<u32>, name: Option<&str>) -> bool {
    let Some(name) = name else {
        return true;
    };

    if name != "_" && name.starts_with('_') {
        diagnostics.error(
            line,
            format!("\"{name}\" is an invalid variable name because it starts with \"_\""),
        );
        return false;
    }
    if name.ends_with(ROLES_SUFFIX) {
        diagnostics.error(
            line,
            format!("\"{name}\" is an invalid variable name because it ends with \"{ROLES_SUFFIX}\""),
        );
        return false;
    }
    if name == "print" {
        diagnostics.error(line, "\"print\" is a reserved name.");
        return false;
    }
    if name == "printed" {
        diagnostics.error(line, "\"printed\" is a reserved name.");
        return false;
    }
    true
}

/// Validates an identifier used as an attribute name (`obj.name`). Unlike
/// [`check_name`], there is no carve-out for a bare `_` — see the resolved
/// Open Question in SPEC_FULL.md §4.2.
pub fn check_attr_name(diagnostics: &mut Diagnostics, line: Option<u32>, name: &str) -> bool {
    if name.starts_with('_') {
        diagnostics.error(
            line,
            format!("\"{name}\" is an invalid attribute name because it starts with \"_\""),
        );
        return false;
    }
    if name.ends_with(ROLES_SUFFIX) {
        diagnostics.error(
            line,
            format!(
                "\"{name}\" is an invalid attribute name because it ends with \"{ROLES_SUFFIX}\""
            ),
        );
        return false;
    }
    true
}

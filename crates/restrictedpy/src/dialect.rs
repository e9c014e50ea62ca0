//! The single configuration value gating version-specific grammar
//! differences, per SPEC_FULL.md §6/§9, rather than scattered conditionals.

use strum::{Display, EnumString};

/// Which vintage of the host grammar this compilation targets. Carried on
/// [`crate::context::TransformContext`], consulted at the one decision
/// point it actually changes under the modern `ruff_python_ast` grammar
/// this crate parses: the wording of the matrix-multiplication-operator
/// diagnostic. See SPEC_FULL.md §6 for why the `Legacy2`-only grammar
/// shapes (tuple parameter unpacking, bare `print` statement,
/// `exec`-statement) never actually reach the transformer in this crate's
/// pipeline even though the enum represents them.
///
/// `Display`/`EnumString` let the CLI take `--dialect=legacy2` on the
/// command line and echo the active dialect back in its banner, the same
/// way the teacher's CLI flags use `strum` rather than a hand-rolled
/// `match` over string literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum Dialect {
    /// Python 2.x: `print` statement, tuple parameter unpacking, `exec`
    /// statement, no matrix-multiplication operator.
    Legacy2,
    /// Python 3.0–3.4: no matrix-multiplication operator.
    Modern3_4,
    /// Python 3.5+: matrix-multiplication operator exists in the grammar
    /// (and is still rejected by policy).
    #[default]
    Modern3_5Plus,
}

impl Dialect {
    /// The matrix-multiplication operator is always rejected; only the
    /// phrasing differs depending on whether the dialect's grammar even
    /// has the operator.
    #[must_use]
    pub fn matmul_diagnostic(self) -> &'static str {
        match self {
            Dialect::Legacy2 | Dialect::Modern3_4 => {
                "Matrix multiplication is not part of this dialect."
            }
            Dialect::Modern3_5Plus => "Matrix multiplication is not allowed.",
        }
    }
}

use serde::Serialize;

use super::container::IrContainer;

/// Target of a divert instruction.
///
/// Codegen always emits `Path`; the resolution pass rewrites every path
/// into `Resolved` or reports it. A `Path` surviving past resolution means
/// the export already failed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DivertTarget {
    /// Symbolic path as written in the source.
    Path(String),
    /// Concrete dotted flow address.
    Resolved(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum IrOp {
    /// Marks the start of an evaluation span (literals and assignments run
    /// on the evaluation stack, not as narrative output).
    EvalStart,
    EvalEnd,

    /// Push an integer literal.
    IntLiteral { value: i64 },

    /// Narrative text output.
    Text { value: String },

    /// Pop the stack into a variable. `is_visit_count` tags assignments to
    /// the implicit per-flow counters so the interpreter can store them
    /// alongside ordinary globals.
    VarAssign { name: String, is_visit_count: bool },

    /// Push a variable's current value.
    VarRead { name: String },

    /// Jump to another container.
    Divert { target: DivertTarget },

    /// A nested, addressable sub-container.
    Container(IrContainer),
}

impl std::fmt::Display for IrOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IrOp::EvalStart => write!(f, "EvalStart"),
            IrOp::EvalEnd => write!(f, "EvalEnd"),
            IrOp::IntLiteral { value } => write!(f, "IntLiteral {}", value),
            IrOp::Text { value } => write!(f, "Text {:?}", value),
            IrOp::VarAssign {
                name,
                is_visit_count,
            } => {
                if *is_visit_count {
                    write!(f, "VarAssign counts['{}'] <- pop", name)
                } else {
                    write!(f, "VarAssign '{}' <- pop", name)
                }
            }
            IrOp::VarRead { name } => write!(f, "VarRead '{}'", name),
            IrOp::Divert { target } => match target {
                DivertTarget::Path(path) => write!(f, "Divert -> ?'{}'", path),
                DivertTarget::Resolved(address) => write!(f, "Divert -> {}", address),
            },
            IrOp::Container(container) => write!(
                f,
                "Container '{}' ({} op(s))",
                container.name.as_deref().unwrap_or("<anon>"),
                container.len()
            ),
        }
    }
}

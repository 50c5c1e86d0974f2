//! file: core/src/ast/kind.rs
//! description: AST node kind definitions.
//!
//! Defines `AstNodeKind`, the closed set of node shapes the export stage
//! consumes. Flattening, symbol gathering and codegen are exhaustive matches
//! over this enum, so a new kind shows up as a compile error in every pass
//! that has to handle it.

use super::node::AstNode;

#[derive(Debug, Clone, PartialEq)]
pub enum AstNodeKind {
    /// A named narrative scope: a knot, or a stitch when nested inside a
    /// knot's body. Its fully-qualified dotted address doubles as the name
    /// of its implicit visit-count variable, so addresses must be globally
    /// unique in the flattened story.
    Flow { name: String, body: Vec<AstNode> },

    /// Placeholder for a source-level include directive. `document` holds
    /// the included file's top-level content, or `None` when loading or
    /// parsing that file already failed upstream (the loader has reported
    /// the failure before handing the marker over).
    ///
    /// Loader contract: the content in `document` is already include-free.
    /// Recursive includes are resolved bottom-up, so one flattening pass at
    /// any level suffices.
    Include {
        file: String,
        document: Option<Vec<AstNode>>,
    },

    /// A run of narrative text.
    Text { value: String },

    /// A jump to another flow, by symbolic path. Resolution rewrites the
    /// target into a concrete dotted address after codegen.
    Divert { target: String },

    /// An ordinary global variable declaration with its initial value.
    VarDecl { name: String, value: i64 },

    /// A read of an ordinary declared variable.
    VarRead { name: String },

    /// A read of a flow's visit counter, by flow address.
    ReadCount { target: String },
}

impl AstNodeKind {
    /// Whether this kind is a named scope definition. Flattening partitions
    /// included content on exactly this predicate.
    pub fn is_flow(&self) -> bool {
        matches!(self, AstNodeKind::Flow { .. })
    }

    pub fn flow_name(&self) -> Option<&str> {
        match self {
            AstNodeKind::Flow { name, .. } => Some(name),
            _ => None,
        }
    }
}

pub mod ast;
pub mod flatten;
pub mod ir;
pub mod location;
pub mod reports;
pub mod story;
pub mod symbols;

pub use ast::{AstNode, AstNodeKind};
pub use ir::{DivertTarget, IrContainer, IrDocument, IrOp};
pub use location::Location;
pub use reports::{Report, ReportCollector, Severity};
pub use story::{ExportError, Story};

/// One-shot convenience: wrap parsed content in a [`Story`] and export it.
///
/// Callers that need to inspect diagnostics, retry after a reset, or reuse
/// the story should construct a [`Story`] and drive it directly.
pub fn compile_story(content: Vec<AstNode>) -> Result<IrDocument, ExportError> {
    let mut story = Story::new(content);
    story.export()
}

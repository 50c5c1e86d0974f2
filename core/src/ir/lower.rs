//! file: core/src/ir/lower.rs
//! description: generic AST -> IR codegen.
//!
//! Lowers the flattened content tree into nested `IrContainer`s. The root
//! container starts with the implicit initializer block: one zeroing
//! assignment per flow address, emitted before any other root instruction,
//! so reading the counter of a never-visited flow never hits an undefined
//! variable in the interpreter.

use std::collections::BTreeSet;

use log::debug;

use crate::ast::{AstNode, AstNodeKind};
use crate::reports::ReportCollector;
use crate::symbols::VariableScope;

use super::container::IrContainer;
use super::op::{DivertTarget, IrOp};

/// Lower the story's top-level content into the base (anonymous) root
/// container. Divert targets are left symbolic for the resolution pass.
pub fn lower_story(
    content: &[AstNode],
    scope: &VariableScope<'_>,
    reports: &mut ReportCollector,
) -> IrContainer {
    let mut root = IrContainer::new(None);
    emit_visit_count_initializers(&mut root, scope.flows);
    for node in content {
        lower_node(node, &mut root, scope, reports);
    }
    root
}

/// The implicit initializer block: `EvalStart`, one `IntLiteral 0` plus
/// visit-count `VarAssign` per flow address, `EvalEnd`. The address set is
/// sorted, so the block's instruction order is reproducible across runs;
/// the assignments themselves are order-insensitive.
fn emit_visit_count_initializers(root: &mut IrContainer, flows: &BTreeSet<String>) {
    debug!("emitting visit-count initializers for {} flow(s)", flows.len());
    root.emit_op(IrOp::EvalStart);
    for address in flows {
        root.emit_op(IrOp::IntLiteral { value: 0 });
        root.emit_op(IrOp::VarAssign {
            name: address.clone(),
            is_visit_count: true,
        });
    }
    root.emit_op(IrOp::EvalEnd);
}

fn lower_node(
    node: &AstNode,
    out: &mut IrContainer,
    scope: &VariableScope<'_>,
    reports: &mut ReportCollector,
) {
    match &node.kind {
        AstNodeKind::Flow { name, body } => {
            let mut container = IrContainer::new(Some(name.clone()));
            for child in body {
                lower_node(child, &mut container, scope, reports);
            }
            out.emit_op(IrOp::Container(container));
        }

        AstNodeKind::Text { value } => out.emit_op(IrOp::Text {
            value: value.clone(),
        }),

        AstNodeKind::Divert { target } => out.emit_op(IrOp::Divert {
            target: DivertTarget::Path(target.clone()),
        }),

        AstNodeKind::VarDecl { name, value } => {
            out.emit_op(IrOp::EvalStart);
            out.emit_op(IrOp::IntLiteral { value: *value });
            out.emit_op(IrOp::VarAssign {
                name: name.clone(),
                is_visit_count: false,
            });
            out.emit_op(IrOp::EvalEnd);
        }

        AstNodeKind::VarRead { name } => {
            if !scope.has_own_variable(name, false) {
                reports.report(
                    &format!("variable '{}' is not declared", name),
                    node.get_location(),
                );
            }
            emit_read(out, name);
        }

        AstNodeKind::ReadCount { target } => {
            if !scope.has_own_variable(target, true) {
                reports.report(
                    &format!("no flow named '{}' to read a visit count from", target),
                    node.get_location(),
                );
            }
            emit_read(out, target);
        }

        AstNodeKind::Include { file, .. } => {
            // Flattening removes every marker before codegen runs.
            reports.report(
                &format!("include of '{}' survived flattening", file),
                node.get_location(),
            );
        }
    }
}

fn emit_read(out: &mut IrContainer, name: &str) {
    out.emit_op(IrOp::EvalStart);
    out.emit_op(IrOp::VarRead {
        name: name.to_string(),
    });
    out.emit_op(IrOp::EvalEnd);
}

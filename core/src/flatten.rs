//! file: core/src/flatten.rs
//! description: include flattening over a story's top-level content.
//!
//! Rewrites the top-level content list so that no `Include` marker survives:
//! loose content from an included file is spliced in at the position its
//! include directive occupied, and flow definitions are hoisted to the end
//! of the list, in the order the directives were encountered. Runs once,
//! during `Story` construction.

use log::debug;

use crate::ast::{AstNode, AstNodeKind};

/// Eliminate every `Include` marker from `content` in a single
/// left-to-right scan.
///
/// Each marker is removed; a marker with no attached document (the load
/// failed upstream and was already reported) leaves no gap. Otherwise the
/// sub-document's content is partitioned: non-flow nodes replace the marker
/// in place, flow definitions are appended after the scan completes.
///
/// Precondition (loader contract): sub-documents are already include-free.
pub fn flatten_includes(content: &mut Vec<AstNode>) {
    let mut hoisted_flows: Vec<AstNode> = Vec::new();
    let mut i = 0;

    while i < content.len() {
        if !matches!(content[i].kind, AstNodeKind::Include { .. }) {
            i += 1;
            continue;
        }
        let marker = content.remove(i);
        if let AstNodeKind::Include { file, document } = marker.kind {
            let Some(sub_content) = document else {
                // Load failed upstream; the marker just vanishes.
                debug!("include '{}' has no document, dropped", file);
                continue;
            };

            let mut inline: Vec<AstNode> = Vec::new();
            let mut flows: Vec<AstNode> = Vec::new();
            for child in sub_content {
                debug_assert!(
                    !matches!(child.kind, AstNodeKind::Include { .. }),
                    "sub-document handed to the flattener must be include-free"
                );
                if child.kind.is_flow() {
                    flows.push(child);
                } else {
                    inline.push(child);
                }
            }
            debug!(
                "include '{}': splicing {} node(s), hoisting {} flow(s)",
                file,
                inline.len(),
                flows.len()
            );

            let spliced = inline.len();
            content.splice(i..i, inline);
            i += spliced;
            hoisted_flows.extend(flows);
        }
    }

    content.append(&mut hoisted_flows);
}

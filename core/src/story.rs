//! file: core/src/story.rs
//! description: the document root and the export orchestrator.
//!
//! A `Story` owns the flattened top-level content, the transient flow
//! address set, the report collector with its sticky failure flag, and the
//! most recent compiled document. `export` sequences symbol collection,
//! codegen and reference resolution, and gates the result on the flag.
//!
//! Single-threaded by design: a `Story` is meant to be driven by one
//! compilation thread at a time. Nothing here locks, and concurrent exports
//! on a shared story are the caller's bug, not a library guarantee.

use std::collections::BTreeSet;

use log::debug;

use crate::ast::{AstNode, AstNodeKind};
use crate::flatten;
use crate::ir::{self, IrDocument};
use crate::reports::{Report, ReportCollector};
use crate::symbols::{self, VariableScope};

#[derive(Debug)]
pub struct Story {
    content: Vec<AstNode>,
    /// Dotted addresses of every flow, rebuilt on each export.
    addresses: BTreeSet<String>,
    /// Names of top-level variable declarations, rebuilt on each export.
    declared: BTreeSet<String>,
    reports: ReportCollector,
    compiled: Option<IrDocument>,
}

/// Failure value of [`Story::export`]: a snapshot of every report on record
/// when the export was rejected, stale ones included.
#[derive(Debug, Clone)]
pub struct ExportError {
    pub reports: Vec<Report>,
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "export failed with {} report(s) on record", self.reports.len())
    }
}

impl std::error::Error for ExportError {}

impl Story {
    /// Build a story from parsed top-level content. Include markers are
    /// flattened away here, during construction; the content tree is not
    /// reshaped again afterwards.
    pub fn new(mut content: Vec<AstNode>) -> Self {
        flatten::flatten_includes(&mut content);
        Story {
            content,
            addresses: BTreeSet::new(),
            declared: BTreeSet::new(),
            reports: ReportCollector::new(),
            compiled: None,
        }
    }

    pub fn content(&self) -> &[AstNode] {
        &self.content
    }

    pub fn reports(&self) -> &ReportCollector {
        &self.reports
    }

    /// Mutable access to the diagnostic sink, so collaborators that run
    /// before export (the loader, above all) report through the same
    /// collector that gates the result.
    pub fn reports_mut(&mut self) -> &mut ReportCollector {
        &mut self.reports
    }

    /// The flow addresses gathered by the most recent export.
    pub fn addresses(&self) -> &BTreeSet<String> {
        &self.addresses
    }

    /// The document built by the most recent export, kept even when the
    /// export was rejected (it is stale until a clean re-export).
    pub fn compiled(&self) -> Option<&IrDocument> {
        self.compiled.as_ref()
    }

    /// Clear the sticky failure flag so a corrected story can export again.
    /// Collected reports and any stale compiled document are untouched.
    pub fn reset_reports(&mut self) {
        self.reports.reset();
    }

    /// Whether `name` is a variable in this story's scope, as of the most
    /// recent export. With `allow_read_counts`, every flow address acts as
    /// an implicitly declared, readable visit-count variable.
    pub fn has_own_variable(&self, name: &str, allow_read_counts: bool) -> bool {
        VariableScope {
            flows: &self.addresses,
            declared: &self.declared,
        }
        .has_own_variable(name, allow_read_counts)
    }

    /// Compile the story into its runtime document.
    ///
    /// The address set and the document are rebuilt from scratch on every
    /// call, so the operation is idempotent given an unchanged tree. Every
    /// step reports through the collector and keeps going; the sticky flag
    /// is checked once, at the very end. A flag left set by an earlier,
    /// unreset run rejects this export too — callers that retry after a
    /// correction must [`reset_reports`] first.
    ///
    /// [`reset_reports`]: Story::reset_reports
    pub fn export(&mut self) -> Result<IrDocument, ExportError> {
        debug!("export: collecting flow addresses");
        self.addresses = symbols::collect_flow_addresses(&self.content, &mut self.reports);
        self.declared = declared_variable_names(&self.content);

        debug!("export: lowering {} top-level node(s)", self.content.len());
        let scope = VariableScope {
            flows: &self.addresses,
            declared: &self.declared,
        };
        let root = ir::lower::lower_story(&self.content, &scope, &mut self.reports);
        let mut document = IrDocument::new(root);

        debug!("export: resolving references");
        ir::resolve::resolve_references(&mut document, &self.addresses, &mut self.reports);

        // The story owns the fresh build either way; the flag only decides
        // whether the caller gets it.
        self.compiled = Some(document.clone());
        if self.reports.has_failed() {
            debug!(
                "export: rejected, {} report(s) on record",
                self.reports.len()
            );
            Err(ExportError {
                reports: self.reports.reports().to_vec(),
            })
        } else {
            Ok(document)
        }
    }
}

fn declared_variable_names(content: &[AstNode]) -> BTreeSet<String> {
    content
        .iter()
        .filter_map(|node| match &node.kind {
            AstNodeKind::VarDecl { name, .. } => Some(name.clone()),
            _ => None,
        })
        .collect()
}

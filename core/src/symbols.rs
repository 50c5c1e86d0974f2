//! file: core/src/symbols.rs
//! description: flow address collection and the implicit-variable lookup.
//!
//! Walks the flattened content tree and records the fully-qualified dotted
//! address of every flow. The address set is transient, derived data: the
//! export orchestrator rebuilds it from scratch on every run. Addresses
//! double as the names of implicit visit-count variables, which is why a
//! collision is a compile error rather than a silent set deduplication.

use std::collections::BTreeSet;

use crate::ast::{AstNode, AstNodeKind};
use crate::reports::ReportCollector;

/// Joins ancestor flow names into a dotted address.
pub const ADDRESS_SEPARATOR: char = '.';

/// Collect the dotted address of every flow reachable from the root,
/// including nested stitches.
///
/// A `BTreeSet` keeps the addresses in sorted order so everything driven by
/// the set, the visit-count initializer block in particular, comes out
/// deterministic and diffable across runs.
///
/// Duplicate addresses are reported as errors at the second definition; the
/// address stays in the set so later stages still resolve against it.
pub fn collect_flow_addresses(
    content: &[AstNode],
    reports: &mut ReportCollector,
) -> BTreeSet<String> {
    let mut addresses = BTreeSet::new();
    collect_into(content, "", &mut addresses, reports);
    addresses
}

fn collect_into(
    content: &[AstNode],
    prefix: &str,
    addresses: &mut BTreeSet<String>,
    reports: &mut ReportCollector,
) {
    for node in content {
        if let AstNodeKind::Flow { name, body } = &node.kind {
            let address = if prefix.is_empty() {
                name.clone()
            } else {
                format!("{}{}{}", prefix, ADDRESS_SEPARATOR, name)
            };
            if !addresses.insert(address.clone()) {
                reports.report(
                    &format!("duplicate flow address '{}'", address),
                    node.get_location(),
                );
            }
            collect_into(body, &address, addresses, reports);
        }
    }
}

/// Name lookup that treats every known flow address as an implicitly
/// declared, always-readable integer variable.
///
/// Borrowed views over the story's symbol set and declared-variable set;
/// codegen consults this while lowering reads, and `Story::has_own_variable`
/// delegates to it.
#[derive(Debug, Clone, Copy)]
pub struct VariableScope<'a> {
    /// Dotted addresses of every flow in the story.
    pub flows: &'a BTreeSet<String>,
    /// Names declared by top-level `VarDecl` nodes.
    pub declared: &'a BTreeSet<String>,
}

impl VariableScope<'_> {
    /// Whether `name` resolves to a variable in this scope. With
    /// `allow_read_counts`, every flow address counts as a readable
    /// visit-count variable; without it, only declared variables do.
    pub fn has_own_variable(&self, name: &str, allow_read_counts: bool) -> bool {
        if allow_read_counts && self.flows.contains(name) {
            return true;
        }
        self.declared.contains(name)
    }
}

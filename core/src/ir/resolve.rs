//! file: core/src/ir/resolve.rs
//! description: symbolic reference resolution over the compiled document.
//!
//! Walks the IR in place, rewriting every symbolic divert path into a
//! concrete dotted flow address. A path is tried as a fully-qualified
//! address first, then relative to each enclosing container from the
//! innermost out, then as a unique suffix anywhere in the story.
//! Unresolvable and ambiguous paths are reported; resolution keeps going so
//! one run surfaces every bad reference.

use std::collections::BTreeSet;

use log::debug;

use crate::reports::ReportCollector;
use crate::symbols::ADDRESS_SEPARATOR;

use super::container::{IrContainer, IrDocument};
use super::op::{DivertTarget, IrOp};

enum ResolveFailure {
    Unknown,
    Ambiguous(usize),
}

/// Resolve every divert target in `document` against the story's flow
/// address set, reporting each failure through `reports`.
pub fn resolve_references(
    document: &mut IrDocument,
    addresses: &BTreeSet<String>,
    reports: &mut ReportCollector,
) {
    let mut enclosing: Vec<String> = Vec::new();
    resolve_container(&mut document.root, &mut enclosing, addresses, reports);
}

fn resolve_container(
    container: &mut IrContainer,
    enclosing: &mut Vec<String>,
    addresses: &BTreeSet<String>,
    reports: &mut ReportCollector,
) {
    for op in &mut container.ops {
        match op {
            IrOp::Container(child) => {
                let named = child.name.is_some();
                if let Some(name) = &child.name {
                    enclosing.push(name.clone());
                }
                resolve_container(child, enclosing, addresses, reports);
                if named {
                    enclosing.pop();
                }
            }
            IrOp::Divert { target } => {
                if let DivertTarget::Path(path) = target {
                    match resolve_path(path, enclosing, addresses) {
                        Ok(address) => {
                            debug!("divert '{}' resolved to '{}'", path, address);
                            *target = DivertTarget::Resolved(address);
                        }
                        Err(ResolveFailure::Unknown) => reports.report(
                            &format!("divert target '{}' could not be resolved", path),
                            None,
                        ),
                        Err(ResolveFailure::Ambiguous(count)) => reports.report(
                            &format!(
                                "divert target '{}' is ambiguous ({} flows match)",
                                path, count
                            ),
                            None,
                        ),
                    }
                }
            }
            _ => {}
        }
    }
}

fn resolve_path(
    path: &str,
    enclosing: &[String],
    addresses: &BTreeSet<String>,
) -> Result<String, ResolveFailure> {
    // Fully-qualified address.
    if addresses.contains(path) {
        return Ok(path.to_string());
    }

    // Relative to an enclosing flow, innermost first: a stitch can divert
    // to a sibling by short name.
    for depth in (1..=enclosing.len()).rev() {
        let mut qualified = String::new();
        for name in &enclosing[..depth] {
            qualified.push_str(name);
            qualified.push(ADDRESS_SEPARATOR);
        }
        qualified.push_str(path);
        if addresses.contains(&qualified) {
            return Ok(qualified);
        }
    }

    // Unique suffix anywhere in the story.
    let suffix = format!("{}{}", ADDRESS_SEPARATOR, path);
    let candidates: Vec<&String> = addresses.iter().filter(|a| a.ends_with(&suffix)).collect();
    match candidates.as_slice() {
        [only] => Ok((*only).clone()),
        [] => Err(ResolveFailure::Unknown),
        many => Err(ResolveFailure::Ambiguous(many.len())),
    }
}

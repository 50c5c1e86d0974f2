use serde::Serialize;

use super::op::IrOp;
use crate::symbols::ADDRESS_SEPARATOR;

/// An ordered run of instructions, optionally addressable by name.
///
/// Flow definitions lower to named containers nested in their parent's op
/// list; the story root lowers to one anonymous container holding
/// everything else.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct IrContainer {
    pub name: Option<String>,
    pub ops: Vec<IrOp>,
}

impl IrContainer {
    pub fn new(name: Option<String>) -> Self {
        IrContainer {
            name,
            ops: Vec::new(),
        }
    }

    pub fn emit_op(&mut self, op: IrOp) {
        self.ops.push(op);
    }

    pub fn get_ops(&self) -> &Vec<IrOp> {
        &self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Look up a nested container by dotted address relative to this one.
    pub fn find_container(&self, address: &str) -> Option<&IrContainer> {
        let mut current = self;
        for segment in address.split(ADDRESS_SEPARATOR) {
            current = current.child(segment)?;
        }
        Some(current)
    }

    fn child(&self, name: &str) -> Option<&IrContainer> {
        self.ops.iter().find_map(|op| match op {
            IrOp::Container(c) if c.name.as_deref() == Some(name) => Some(c),
            _ => None,
        })
    }
}

impl std::fmt::Display for IrContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fmt_indented(self, f, 0)
    }
}

fn fmt_indented(
    container: &IrContainer,
    f: &mut std::fmt::Formatter<'_>,
    depth: usize,
) -> std::fmt::Result {
    let pad = "  ".repeat(depth);
    for (i, op) in container.ops.iter().enumerate() {
        match op {
            IrOp::Container(child) => {
                writeln!(
                    f,
                    "{}{:04}: Container '{}'",
                    pad,
                    i,
                    child.name.as_deref().unwrap_or("<anon>")
                )?;
                fmt_indented(child, f, depth + 1)?;
            }
            other => writeln!(f, "{}{:04}: {}", pad, i, other)?,
        }
    }
    Ok(())
}

/// The distinguished IR-document root handed to the interpreter. Owned by
/// the story once an export completes, replacing any earlier build.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IrDocument {
    pub root: IrContainer,
}

impl IrDocument {
    pub fn new(root: IrContainer) -> Self {
        IrDocument { root }
    }

    /// Serialize the compiled document as pretty-printed JSON, the
    /// toolchain's on-disk runtime format.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl std::fmt::Display for IrDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.root)
    }
}

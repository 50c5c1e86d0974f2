use crate::location;

use super::kind::AstNodeKind;

#[derive(Clone)]
pub struct AstNode {
    id: usize,
    pub kind: AstNodeKind,
    pub location: Option<location::Location>,
}

impl AstNode {
    fn create_id() -> usize {
        use std::sync::atomic::{AtomicUsize, Ordering};
        static COUNTER: AtomicUsize = AtomicUsize::new(1);
        COUNTER.fetch_add(1, Ordering::Relaxed)
    }

    pub fn new(kind: AstNodeKind, location: Option<location::Location>) -> Self {
        AstNode {
            id: Self::create_id(),
            kind,
            location,
        }
    }

    pub fn with_location(mut self, location: location::Location) -> Self {
        self.location = Some(location);
        self
    }

    pub fn get_id(&self) -> usize {
        self.id
    }
    pub fn get_kind(&self) -> &AstNodeKind {
        &self.kind
    }
    pub fn get_location(&self) -> Option<&location::Location> {
        self.location.as_ref()
    }

    /// ============================================================
    /// Shorthand constructors, mainly for tests and for loaders that
    /// synthesize nodes without a source position.

    pub fn flow(name: &str, body: Vec<AstNode>) -> Self {
        AstNode::new(
            AstNodeKind::Flow {
                name: name.to_string(),
                body,
            },
            None,
        )
    }

    pub fn include(file: &str, document: Option<Vec<AstNode>>) -> Self {
        AstNode::new(
            AstNodeKind::Include {
                file: file.to_string(),
                document,
            },
            None,
        )
    }

    pub fn text(value: &str) -> Self {
        AstNode::new(
            AstNodeKind::Text {
                value: value.to_string(),
            },
            None,
        )
    }

    pub fn divert(target: &str) -> Self {
        AstNode::new(
            AstNodeKind::Divert {
                target: target.to_string(),
            },
            None,
        )
    }

    pub fn var_decl(name: &str, value: i64) -> Self {
        AstNode::new(
            AstNodeKind::VarDecl {
                name: name.to_string(),
                value,
            },
            None,
        )
    }

    pub fn var_read(name: &str) -> Self {
        AstNode::new(
            AstNodeKind::VarRead {
                name: name.to_string(),
            },
            None,
        )
    }

    pub fn read_count(target: &str) -> Self {
        AstNode::new(
            AstNodeKind::ReadCount {
                target: target.to_string(),
            },
            None,
        )
    }
}

// Equality is structural: ids record allocation order, not structure, so
// they are excluded. Two trees built the same way compare equal.
impl PartialEq for AstNode {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.location == other.location
    }
}

use std::fmt;

impl fmt::Display for AstNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(loc) => write!(f, "AstNode #{} {:?} at {}", self.id, self.kind, loc),
            None => write!(f, "AstNode #{} {:?}", self.id, self.kind),
        }
    }
}

impl fmt::Debug for AstNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Delegate to Display so both "{}" and "{:?}" are pretty
        write!(f, "{}", self)
    }
}

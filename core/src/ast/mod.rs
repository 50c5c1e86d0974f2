pub mod kind;
pub mod node;

pub use kind::AstNodeKind;
pub use node::AstNode;

pub mod container;
pub mod lower;
pub mod op;
pub mod resolve;

pub use container::{IrContainer, IrDocument};
pub use op::{DivertTarget, IrOp};

//! Typed flow model extracted from a diagram

mod flow;
mod kind;
mod node;

pub use flow::FlowModel;
pub use kind::NodeKind;
pub use node::{Flag, NodeRecord, TextProperty};

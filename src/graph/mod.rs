pub mod node;
pub mod link;

pub use node::{Node, NodeId};
pub use link::{Link, LinkId};

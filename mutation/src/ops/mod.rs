//! Command implementations.
//!
//! One module per operation. Each type implements `Reversible` against
//! `Graph`.

mod add_edge;
mod add_node;
mod remove_edge;
mod remove_node;
mod update;

pub use add_edge::AddEdge;
pub use add_node::AddNode;
pub use remove_edge::RemoveEdge;
pub use remove_node::RemoveNode;
pub use update::{ChangeNodeColor, EditNodeProperties, MoveNode};

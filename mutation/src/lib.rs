//! CDG Mutation
//!
//! The closed set of reversible operations on a diagram.
//!
//! Responsibilities:
//! - Add and remove nodes and edges
//! - Move nodes, edit node properties, change node color
//! - Capture everything needed to revert, as owned values keyed by id
//!
//! Commands are executed through `cdg_history::History`.

mod command;
mod error;
mod ops;

pub use command::Command;
pub use error::{MutationError, MutationResult};
pub use ops::{AddEdge, AddNode, ChangeNodeColor, EditNodeProperties, MoveNode, RemoveEdge, RemoveNode};

/// Undo/redo history over diagram commands.
pub type CommandHistory = cdg_history::History<Command>;

//! CDG Document
//!
//! JSON persistence for diagrams.
//!
//! Responsibilities:
//! - Serialize a graph to the `.cdg` document shape and back
//! - Reject malformed documents without touching any live graph
//! - Carry selected subgraphs as text for an external clipboard
//!
//! Enum fields are stored by name. Derived values (RPN, highlights) are
//! never written.

mod document;
mod error;
mod fragment;

pub use document::{from_json, load, save, to_json, Document};
pub use error::{DocumentError, DocumentResult};
pub use fragment::Fragment;

/// File extension used for saved diagrams.
pub const EXTENSION: &str = "cdg";

//! CDG Core Types
//!
//! This crate defines the fundamental types used throughout CDG:
//! - Identity types (NodeId, EdgeId)
//! - Entities (Node, Edge) and their editable property snapshot
//! - Risk ratings (Rating) and the derived RPN
//! - Forbidden-link rules between node categories
//! - Graph errors

mod entity;
mod error;
mod id;
mod rating;
mod rule;

pub use entity::*;
pub use error::*;
pub use id::*;
pub use rating::*;
pub use rule::*;

//! CDG Graph
//!
//! The authoritative store of a causal diagram.
//!
//! Responsibilities:
//! - Store nodes, edges and forbidden rules in insertion order
//! - Lookup by id
//! - Incident-edge queries
//!
//! The graph does no validation and keeps no history. Edges may name
//! nodes that are not (or no longer) stored.

mod graph;

pub use graph::Graph;

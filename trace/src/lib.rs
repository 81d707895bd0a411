//! CDG Trace
//!
//! Backward path enumeration from an effect to its root causes.
//!
//! Responsibilities:
//! - Enumerate causal paths ending at a target, breadth first
//! - Bound the work by path count, path depth and total expansion
//! - Derive highlight sets and a root-cause report
//!
//! The tracer only reads the graph. Its output is not stored on nodes or
//! edges.

mod error;
mod path;
mod tracer;

pub use error::{TraceError, TraceResult};
pub use path::{CausalPath, Highlight, PathEnd, RootCause, Trace};
pub use tracer::{CausalTracer, TraceConfig};

/// Default cap on completed paths.
pub const DEFAULT_MAX_PATHS: usize = 100;

/// Default cap on path length, in edges.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Default multiplier for the expansion budget (`max_paths * work_factor`).
pub const DEFAULT_WORK_FACTOR: usize = 64;

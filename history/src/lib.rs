//! CDG History
//!
//! A generic undo/redo manager over reversible commands.
//!
//! ```text
//!   execute(c) ──► [ undo stack ] ── undo() ──► [ redo stack ]
//!                  [            ] ◄── redo() ── [            ]
//!   execute() clears the redo stack; nothing else does.
//! ```

mod history;

pub use history::{History, HistoryConfig, HistoryState, Reversible};

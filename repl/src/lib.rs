//! CDG REPL library - a line-oriented front end for the editor.
//!
//! - `repl`: REPL state, script and interactive loops
//! - `executor`: one function per command, each building an editor action
//! - `tokenize`: splitting input lines into words and quoted strings
//! - `format`: output formatting utilities

mod executor;
mod format;
mod repl;
mod tokenize;

pub use format::print_help;
pub use repl::Repl;

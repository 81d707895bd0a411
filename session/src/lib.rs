//! CDG Session
//!
//! Editing session over a single diagram.
//!
//! Responsibilities:
//! - Turn user actions into commands and run them through the history
//! - Consult forbidden rules when linking
//! - Trace root causes and keep the last result as transient highlight
//! - Open, save and replace documents
//! - Configuration and logging setup

mod action;
mod config;
mod editor;
mod error;
mod logging;
mod result;

pub use action::Action;
pub use config::{CanvasConfig, EditorConfig, LinksConfig, PasteConfig};
pub use editor::Editor;
pub use error::{ConfigError, SessionError, SessionResult};
pub use logging::init_tracing;
pub use result::Outcome;

//! Editor configuration.

use cdg_history::HistoryConfig;
use cdg_trace::TraceConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

/// Editor configuration, one section per concern.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`CDG_*`)
/// 2. Config file, when given
/// 3. Compiled defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub trace: TraceConfig,
    pub links: LinksConfig,
    pub canvas: CanvasConfig,
    pub paste: PasteConfig,
    pub history: HistoryConfig,
}

/// Linking behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinksConfig {
    /// Block links that match a forbidden rule unless explicitly overridden.
    pub enforce_forbidden: bool,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            enforce_forbidden: true,
        }
    }
}

/// Placement of new and moved nodes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub snap_to_grid: bool,
    pub grid_step: f32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            snap_to_grid: true,
            grid_step: 20.0,
        }
    }
}

impl CanvasConfig {
    /// Round `value` to the nearest grid line when snapping is on.
    /// A grid step that is not a positive finite number disables snapping.
    pub fn snap(&self, value: f32) -> f32 {
        if self.snap_to_grid && self.grid_step.is_finite() && self.grid_step > 0.0 {
            (value / self.grid_step).round() * self.grid_step
        } else {
            value
        }
    }
}

/// Where pasted nodes land relative to their originals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PasteConfig {
    pub offset: f32,
    /// Extra shift added per pasted node.
    pub cascade_step: f32,
}

impl Default for PasteConfig {
    fn default() -> Self {
        Self {
            offset: 20.0,
            cascade_step: 10.0,
        }
    }
}

impl EditorConfig {
    /// Load configuration: defaults, then `path` if given, then environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Read a TOML file. Unknown keys are ignored.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::Parse {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Apply `CDG_TRACE_MAX_PATHS`, `CDG_TRACE_MAX_DEPTH` and
    /// `CDG_ENFORCE_FORBIDDEN`. Unparseable values are ignored with a warning.
    pub fn apply_env_overrides(&mut self) {
        if let Some(v) = env_parse("CDG_TRACE_MAX_PATHS") {
            self.trace.max_paths = v;
        }
        if let Some(v) = env_parse("CDG_TRACE_MAX_DEPTH") {
            self.trace.max_depth = v;
        }
        if let Some(v) = env_parse("CDG_ENFORCE_FORBIDDEN") {
            self.links.enforce_forbidden = v;
        }
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.trace.max_paths == 0 {
            return Err(ConfigError::invalid("trace.max_paths", "must be at least 1"));
        }
        if self.trace.work_factor == 0 {
            return Err(ConfigError::invalid("trace.work_factor", "must be at least 1"));
        }
        if self.canvas.snap_to_grid && !(self.canvas.grid_step.is_finite() && self.canvas.grid_step > 0.0) {
            return Err(ConfigError::invalid("canvas.grid_step", "must be a positive number"));
        }
        if !self.paste.offset.is_finite() || !self.paste.cascade_step.is_finite() {
            return Err(ConfigError::invalid("paste", "offsets must be finite"));
        }
        if self.history.limit == Some(0) {
            return Err(ConfigError::invalid("history.limit", "must be at least 1 when set"));
        }
        Ok(())
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(key, value = %raw, "ignoring unparseable environment override");
            None
        }
    }
}

//! Gesture scripts replayed by the demo host.
//!
//! A script is a JSON document naming the widget configuration, the surface
//! it is laid out in and an ordered list of steps:
//!
//! ```json
//! {
//!   "config": { "target_count": 9, "animation": "middle" },
//!   "surface": { "x0": 0, "y0": 0, "x1": 320, "y1": 320 },
//!   "steps": [
//!     { "action": "trace", "targets": [0, 4, 8] },
//!     { "action": "wait", "ms": 500 }
//!   ]
//! }
//! ```

use connectpattern_core::{ConfigError, PatternConfig, PointerEvent};
use connectpattern_render::RendererError;
use kurbo::Rect;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Script errors.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Failed to read script {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid script: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Render(#[from] RendererError),
    #[error("Step {step}: target {index} is not active")]
    UnknownTarget { step: usize, index: usize },
    #[error("Step {step}: a trace needs at least one target")]
    EmptyTrace { step: usize },
}

/// Result type for script operations.
pub type ScriptResult<T> = Result<T, ScriptError>;

/// One scripted host action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    /// Raw pointer event in surface coordinates.
    Pointer { event: PointerEvent },
    /// Press on the first target, drag through the rest in order, release.
    Trace { targets: Vec<usize> },
    /// Let the clock run.
    Wait { ms: u64 },
    AnimateIn {
        #[serde(default)]
        delay_ms: u64,
    },
    AnimateOut {
        #[serde(default)]
        delay_ms: u64,
    },
    CancelAnimation,
    SetEnabled { enabled: bool },
    /// Lay the widget out in a new surface.
    Resize { surface: Rect },
}

fn default_surface() -> Rect {
    Rect::new(0.0, 0.0, 320.0, 320.0)
}

/// A full replayable session description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub config: PatternConfig,
    #[serde(default = "default_surface")]
    pub surface: Rect,
    /// Whether the sample host reactions (animate out after a three-target
    /// pattern, reappear a second after disappearing) are active.
    #[serde(default = "default_true")]
    pub sample_host: bool,
    #[serde(default)]
    pub steps: Vec<Step>,
}

fn default_true() -> bool {
    true
}

impl Script {
    /// Parse and validate a script.
    pub fn from_json(json: &str) -> ScriptResult<Self> {
        let script: Script = serde_json::from_str(json)?;
        script.config.validate()?;
        Ok(script)
    }

    pub fn load(path: impl AsRef<Path>) -> ScriptResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ScriptError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> ScriptResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Built-in session: the widget appears, a short pattern is rejected as
    /// abandoned, a two-target pattern is entered, then a three-target
    /// pattern sends the widget out and back in.
    pub fn demo() -> Self {
        Self {
            config: PatternConfig::default(),
            surface: default_surface(),
            sample_host: true,
            steps: vec![
                Step::AnimateIn { delay_ms: 0 },
                Step::Wait { ms: 800 },
                Step::Trace { targets: vec![4] },
                Step::Wait { ms: 400 },
                Step::Trace {
                    targets: vec![0, 1],
                },
                Step::Wait { ms: 400 },
                Step::Trace {
                    targets: vec![0, 4, 8],
                },
                Step::Wait { ms: 3000 },
            ],
        }
    }
}

//! Connect-Pattern Core Library
//!
//! Toolkit-agnostic engine for a "connect the dots" pattern widget: grid
//! layout, pointer gesture tracking, result delivery and the appear/disappear
//! transitions that move the targets around.

pub mod animation;
pub mod config;
pub mod event;
pub mod gesture;
pub mod input;
pub mod layout;
pub mod outcome;
pub mod schedule;
pub mod state;
pub mod view;

pub use animation::{AnimationKind, AnimatorPhase, Easing, TransitionKind};
pub use config::{ConfigError, ConfigResult, PatternConfig, SerializableColor};
pub use event::{PatternEvent, PatternListener};
pub use input::PointerEvent;
pub use layout::{CENTER_SLOT, SLOT_COUNT, Target, TargetCount};
pub use outcome::PatternOutcome;
pub use state::{PatternState, Visibility};
pub use view::ConnectPatternView;

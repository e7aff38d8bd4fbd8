//! Connect-Pattern demo host
//!
//! Replays JSON gesture scripts against a headless pattern view, reacting to
//! its events the way the sample application does, and reports what
//! happened.

pub mod script;
pub mod session;

pub use script::{Script, ScriptError, ScriptResult, Step};
pub use session::{Session, SessionReport, TranscriptEntry};

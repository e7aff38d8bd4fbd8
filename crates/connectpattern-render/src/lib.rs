//! Connect-Pattern Render Library
//!
//! Turns a pattern view into an ordered list of draw commands and hands them
//! to a pluggable [`Renderer`] backend.

mod renderer;
pub mod stamp;

pub use renderer::{
    DrawCommand, PatternStyle, RecordingRenderer, RenderContext, RenderResult, Renderer,
    RendererError, build_draw_list,
};
pub use stamp::StampImage;

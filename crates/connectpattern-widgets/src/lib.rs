//! egui host for the connect-pattern widget.
//!
//! - **Pattern**: [`PatternWidget`] lays out, feeds pointer input to and
//!   paints a [`connectpattern_core::ConnectPatternView`]
//! - **Painter**: an egui-backed [`connectpattern_render::Renderer`] plus
//!   color and stamp texture conversion helpers

pub mod painter;
pub mod pattern;

pub use painter::{EguiRenderer, load_stamp_texture, to_color32, to_pos2, to_rect};
pub use pattern::PatternWidget;

/// Standard sizing constants.
pub mod sizing {
    /// Side of the square widget when no size is requested
    pub const DEFAULT_SIDE: f32 = 320.0;
    /// Smallest side used when the available space is unbounded or empty
    pub const MIN_SIDE: f32 = 96.0;
    /// Background corner radius
    pub const CORNER_RADIUS: u8 = 8;
}

/// Standard colors.
pub mod theme {
    use egui::Color32;

    /// Widget background
    pub const BACKGROUND: Color32 = Color32::from_rgb(250, 250, 252);
    /// Fallback fill for stamps whose texture is not loaded
    pub const STAMP_PLACEHOLDER: Color32 = Color32::from_rgb(220, 220, 220);
}

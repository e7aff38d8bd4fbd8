//! egui painter backend and conversions between kurbo/peniko and egui.

use connectpattern_render::{DrawCommand, Renderer, StampImage};
use egui::{Color32, Painter, Pos2, Rect, Stroke, TextureHandle, TextureId, TextureOptions};
use peniko::Color;

use crate::theme;

/// Convert a peniko color to egui's (unmultiplied) 8-bit color.
pub fn to_color32(color: Color) -> Color32 {
    let rgba = color.to_rgba8();
    Color32::from_rgba_unmultiplied(rgba.r, rgba.g, rgba.b, rgba.a)
}

pub fn to_pos2(point: kurbo::Point) -> Pos2 {
    Pos2::new(point.x as f32, point.y as f32)
}

pub fn to_rect(rect: kurbo::Rect) -> Rect {
    Rect::from_min_max(
        Pos2::new(rect.x0 as f32, rect.y0 as f32),
        Pos2::new(rect.x1 as f32, rect.y1 as f32),
    )
}

pub(crate) fn from_rect(rect: Rect) -> kurbo::Rect {
    kurbo::Rect::new(
        rect.min.x as f64,
        rect.min.y as f64,
        rect.max.x as f64,
        rect.max.y as f64,
    )
}

pub(crate) fn from_pos2(pos: Pos2) -> kurbo::Point {
    kurbo::Point::new(pos.x as f64, pos.y as f64)
}

/// Upload a stamp image as an egui texture.
pub fn load_stamp_texture(ctx: &egui::Context, stamp: &StampImage) -> TextureHandle {
    let image = egui::ColorImage::from_rgba_unmultiplied(stamp.size(), stamp.rgba());
    ctx.load_texture("connectpattern-stamp", image, TextureOptions::LINEAR)
}

/// Paints draw commands with an egui [`Painter`].
pub struct EguiRenderer<'a> {
    painter: &'a Painter,
    stamp: Option<TextureId>,
}

impl<'a> EguiRenderer<'a> {
    pub fn new(painter: &'a Painter) -> Self {
        Self {
            painter,
            stamp: None,
        }
    }

    /// Texture used for [`DrawCommand::Stamp`].
    pub fn with_stamp(mut self, texture: Option<TextureId>) -> Self {
        self.stamp = texture;
        self
    }
}

impl Renderer for EguiRenderer<'_> {
    fn draw(&mut self, command: &DrawCommand) {
        match *command {
            DrawCommand::Line {
                from,
                to,
                color,
                width,
            } => {
                self.painter.line_segment(
                    [to_pos2(from), to_pos2(to)],
                    Stroke::new(width as f32, to_color32(color)),
                );
            }
            DrawCommand::Circle {
                center,
                radius,
                color,
            } => {
                self.painter
                    .circle_filled(to_pos2(center), radius as f32, to_color32(color));
            }
            DrawCommand::Stamp { bounds } => {
                let rect = to_rect(bounds);
                match self.stamp {
                    Some(texture) => {
                        let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
                        self.painter.image(texture, rect, uv, Color32::WHITE);
                    }
                    None => {
                        self.painter.circle_filled(
                            rect.center(),
                            rect.width() / 2.0,
                            theme::STAMP_PLACEHOLDER,
                        );
                    }
                }
            }
        }
    }
}

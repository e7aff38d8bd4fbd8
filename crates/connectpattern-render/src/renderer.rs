//! Renderer trait abstraction.

use crate::stamp::StampImage;
use connectpattern_core::{ConnectPatternView, PatternConfig, Visibility};
use kurbo::{Point, Rect};
use peniko::Color;
use std::path::PathBuf;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Failed to read stamp image {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to decode stamp image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("Stamp image has no pixels")]
    EmptyStamp,
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// One primitive, in paint order.
#[derive(Debug, Clone, Copy)]
pub enum DrawCommand {
    /// Connective line between two target centres, or from the last target
    /// to the pointer.
    Line {
        from: Point,
        to: Point,
        color: Color,
        width: f64,
    },
    /// Filled target circle.
    Circle {
        center: Point,
        radius: f64,
        color: Color,
    },
    /// Stamp image stretched over a target's bounding box.
    Stamp { bounds: Rect },
}

/// Paint settings derived from the configuration.
#[derive(Debug, Clone)]
pub struct PatternStyle {
    pub circle_color: Color,
    pub line_color: Color,
    pub line_width: f64,
    /// Drawn instead of circles when present.
    pub stamp: Option<StampImage>,
}

impl Default for PatternStyle {
    fn default() -> Self {
        Self::plain(&PatternConfig::default())
    }
}

impl PatternStyle {
    /// Colors and line width from `config`, ignoring any stamp.
    pub fn plain(config: &PatternConfig) -> Self {
        Self {
            circle_color: config.circle_color(),
            line_color: config.line_color(),
            line_width: config.line_width,
            stamp: None,
        }
    }

    /// Full style from `config`, loading the stamp image if one is set.
    pub fn from_config(config: &PatternConfig) -> RenderResult<Self> {
        let stamp = config.stamp.as_ref().map(StampImage::load).transpose()?;
        Ok(Self {
            stamp,
            ..Self::plain(config)
        })
    }

    pub fn with_stamp(mut self, stamp: StampImage) -> Self {
        self.stamp = Some(stamp);
        self
    }
}

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The view to render.
    pub view: &'a ConnectPatternView,
    pub style: &'a PatternStyle,
}

impl<'a> RenderContext<'a> {
    pub fn new(view: &'a ConnectPatternView, style: &'a PatternStyle) -> Self {
        Self { view, style }
    }
}

/// Paint order: connective lines in selection order, the rubber band to the
/// pointer, then every active target on top.
///
/// Hidden or unlaid-out views produce nothing.
pub fn build_draw_list(ctx: &RenderContext) -> Vec<DrawCommand> {
    let view = ctx.view;
    let style = ctx.style;
    if view.visibility() != Visibility::Visible || !view.is_laid_out() {
        return Vec::new();
    }

    let centers: Vec<Point> = view
        .selection()
        .iter()
        .filter_map(|&index| view.target(index))
        .map(|target| target.center())
        .collect();

    let mut commands = Vec::with_capacity(centers.len() + view.active_indices().len());
    for pair in centers.windows(2) {
        commands.push(DrawCommand::Line {
            from: pair[0],
            to: pair[1],
            color: style.line_color,
            width: style.line_width,
        });
    }

    let region = view.pointer_region();
    if !region.is_zero_area() {
        if let Some(&last) = centers.last() {
            commands.push(DrawCommand::Line {
                from: last,
                to: region.center(),
                color: style.line_color,
                width: style.line_width,
            });
        }
    }

    for target in view.targets() {
        let command = match style.stamp {
            Some(_) => DrawCommand::Stamp {
                bounds: target.bounds,
            },
            None => DrawCommand::Circle {
                center: target.center(),
                radius: target.radius(),
                color: style.circle_color,
            },
        };
        commands.push(command);
    }
    commands
}

/// Trait for rendering backends.
pub trait Renderer {
    /// Called once before a frame's commands are drawn.
    fn begin_frame(&mut self, _ctx: &RenderContext) {}

    /// Paint a single command.
    fn draw(&mut self, command: &DrawCommand);

    /// Build and paint the whole frame.
    fn build_scene(&mut self, ctx: &RenderContext) {
        self.begin_frame(ctx);
        for command in build_draw_list(ctx) {
            self.draw(&command);
        }
    }
}

/// Renderer that keeps the last frame's commands, for headless hosts and
/// tests.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    commands: Vec<DrawCommand>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn line_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|command| matches!(command, DrawCommand::Line { .. }))
            .count()
    }
}

impl Renderer for RecordingRenderer {
    fn begin_frame(&mut self, _ctx: &RenderContext) {
        self.commands.clear();
    }

    fn draw(&mut self, command: &DrawCommand) {
        self.commands.push(*command);
    }
}

//! Grid geometry for the nine target slots.
//!
//! Slots are numbered row by row:
//!
//! ```text
//! 0 1 2
//! 3 4 5
//! 6 7 8
//! ```

use crate::config::ConfigError;
use kurbo::{Point, Rect};

/// Number of slots in the grid, whatever the active count.
pub const SLOT_COUNT: usize = 9;
/// Slot in the middle of the grid.
pub const CENTER_SLOT: usize = 4;

/// Supported numbers of active targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetCount {
    Two,
    Three,
    Five,
    Nine,
}

impl TargetCount {
    /// The active index set for this count, in hit-test order.
    pub fn indices(self) -> &'static [usize] {
        match self {
            TargetCount::Two => &[0, 2],
            TargetCount::Three => &[0, 2, 4],
            TargetCount::Five => &[0, 2, 4, 6, 8],
            TargetCount::Nine => &[0, 1, 2, 3, 4, 5, 6, 7, 8],
        }
    }

    pub fn count(self) -> usize {
        self.indices().len()
    }
}

impl TryFrom<u8> for TargetCount {
    type Error = ConfigError;

    fn try_from(count: u8) -> Result<Self, Self::Error> {
        match count {
            2 => Ok(TargetCount::Two),
            3 => Ok(TargetCount::Three),
            5 => Ok(TargetCount::Five),
            9 => Ok(TargetCount::Nine),
            other => Err(ConfigError::UnsupportedTargetCount(other)),
        }
    }
}

/// Axis along which a target edge is moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Compute the canonical rectangle of every slot inside `content`.
///
/// The outer rows and columns hug the content edges, the middle ones are
/// centred on the content midpoint.
pub fn slot_rects(content: Rect, diameter: f64) -> [Rect; SLOT_COUNT] {
    let radius = diameter / 2.0;
    let center = content.center();
    let columns = [content.x0, center.x - radius, content.x1 - diameter];
    let rows = [content.y0, center.y - radius, content.y1 - diameter];

    std::array::from_fn(|slot| {
        let x = columns[slot % 3];
        let y = rows[slot / 3];
        Rect::new(x, y, x + diameter, y + diameter)
    })
}

/// One selectable circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    /// Grid slot (0..9).
    pub index: usize,
    /// Current bounding box.
    pub bounds: Rect,
}

impl Target {
    pub fn center(&self) -> Point {
        self.bounds.center()
    }

    pub fn radius(&self) -> f64 {
        self.bounds.width() / 2.0
    }
}

/// Current and canonical rectangles for every slot.
///
/// All nine slots exist regardless of how many targets are active; the
/// current rectangles move during transitions while the canonical ones only
/// change when the surface is laid out again.
#[derive(Debug, Clone)]
pub struct TargetGrid {
    diameter: f64,
    canonical: Option<[Rect; SLOT_COUNT]>,
    current: [Rect; SLOT_COUNT],
}

impl TargetGrid {
    /// Create an empty grid for circles of the given diameter.
    pub fn new(diameter: f64) -> Self {
        Self {
            diameter,
            canonical: None,
            current: [Rect::ZERO; SLOT_COUNT],
        }
    }

    pub fn diameter(&self) -> f64 {
        self.diameter
    }

    /// Whether canonical positions have been computed.
    pub fn is_laid_out(&self) -> bool {
        self.canonical.is_some()
    }

    /// Recompute canonical positions for a new content rectangle.
    ///
    /// When `reset_current` is false the current rectangles are left to
    /// whichever transition is moving them.
    pub fn layout(&mut self, content: Rect, reset_current: bool) {
        let slots = slot_rects(content, self.diameter);
        self.canonical = Some(slots);
        if reset_current {
            self.current = slots;
        }
    }

    /// Forget the layout (e.g. the surface collapsed to zero size).
    pub fn clear(&mut self) {
        self.canonical = None;
        self.current = [Rect::ZERO; SLOT_COUNT];
    }

    /// Move every target back to its rest position.
    pub fn reset_to_canonical(&mut self) {
        if let Some(slots) = self.canonical {
            self.current = slots;
        }
    }

    /// Current rectangle of a slot.
    pub fn rect(&self, index: usize) -> Rect {
        self.current.get(index).copied().unwrap_or(Rect::ZERO)
    }

    /// Rest rectangle of a slot, if laid out.
    pub fn canonical(&self, index: usize) -> Option<Rect> {
        self.canonical.and_then(|slots| slots.get(index).copied())
    }

    pub fn target(&self, index: usize) -> Target {
        Target {
            index,
            bounds: self.rect(index),
        }
    }

    /// Write the leading edge of a slot along `axis`, keeping the diameter.
    pub fn set_leading_edge(&mut self, index: usize, axis: Axis, value: f64) {
        let diameter = self.diameter;
        let Some(rect) = self.current.get_mut(index) else {
            return;
        };
        match axis {
            Axis::Horizontal => {
                rect.x0 = value;
                rect.x1 = value + diameter;
            }
            Axis::Vertical => {
                rect.y0 = value;
                rect.y1 = value + diameter;
            }
        }
    }
}

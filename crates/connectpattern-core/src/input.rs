//! Pointer events as delivered by a host.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Single-contact pointer event in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PointerEvent {
    Down { position: Point },
    Move { position: Point },
    Up,
    /// The platform took the gesture away (e.g. a parent started scrolling).
    Cancel,
}

impl PointerEvent {
    pub fn position(&self) -> Option<Point> {
        match self {
            PointerEvent::Down { position } | PointerEvent::Move { position } => Some(*position),
            PointerEvent::Up | PointerEvent::Cancel => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_shape() {
        let event: PointerEvent =
            serde_json::from_str(r#"{ "type": "down", "position": { "x": 1.0, "y": 2.0 } }"#)
                .unwrap();
        assert_eq!(
            event,
            PointerEvent::Down {
                position: Point::new(1.0, 2.0)
            }
        );
        assert_eq!(event.position(), Some(Point::new(1.0, 2.0)));

        let up: PointerEvent = serde_json::from_str(r#"{ "type": "up" }"#).unwrap();
        assert_eq!(up, PointerEvent::Up);
        assert_eq!(up.position(), None);
    }
}

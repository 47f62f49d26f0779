//! Normalized pointer input for mouse and touch events.
//!
//! The host UI translates its native events into [`PointerInput`] and hands
//! them to the interaction state machines. Nothing here listens globally.

use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Where a pointer event came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PointerSource {
    Mouse {
        client: Point,
    },
    Touch {
        /// Touch points still on the surface.
        touches: Vec<Point>,
        /// Touch points that changed in this event (lifted fingers on release).
        changed_touches: Vec<Point>,
    },
}

/// Pointer event type for unified mouse/touch handling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointerInput {
    pub source: PointerSource,
    /// Bounding rectangle of the element the event targeted, in client coordinates.
    pub target_rect: Rect,
}

impl PointerInput {
    /// A mouse event at the given client coordinates.
    pub fn mouse(x: f64, y: f64) -> Self {
        Self {
            source: PointerSource::Mouse {
                client: Point::new(x, y),
            },
            target_rect: Rect::ZERO,
        }
    }

    /// A touch move/start event with the given active touch points.
    pub fn touch(touches: Vec<Point>) -> Self {
        Self {
            source: PointerSource::Touch {
                changed_touches: touches.clone(),
                touches,
            },
            target_rect: Rect::ZERO,
        }
    }

    /// A touch end event: no fingers remain, `lifted` lists the released ones.
    pub fn touch_end(lifted: Vec<Point>) -> Self {
        Self {
            source: PointerSource::Touch {
                touches: Vec::new(),
                changed_touches: lifted,
            },
            target_rect: Rect::ZERO,
        }
    }

    /// Attach the target element's bounding rectangle.
    pub fn with_target(mut self, rect: Rect) -> Self {
        self.target_rect = rect;
        self
    }

    /// Client position of the mouse, or of the first active touch.
    pub fn client_position(&self) -> Option<Point> {
        match &self.source {
            PointerSource::Mouse { client } => Some(*client),
            PointerSource::Touch { touches, .. } => touches.first().copied(),
        }
    }

    /// Client position at release.
    ///
    /// Touch end events have no active touches left, so the first changed
    /// touch is used, falling back to the first active one.
    pub fn release_position(&self) -> Option<Point> {
        match &self.source {
            PointerSource::Mouse { client } => Some(*client),
            PointerSource::Touch {
                touches,
                changed_touches,
            } => changed_touches.first().or(touches.first()).copied(),
        }
    }

    /// Offset of the pointer from the target rectangle's top-left corner.
    pub fn grab_offset(&self) -> Option<Vec2> {
        self.client_position()
            .map(|client| client - self.target_rect.origin())
    }

    /// Pointer position relative to `surface`, e.g. a drawing area.
    pub fn local_position(&self, surface: Rect) -> Option<Point> {
        self.client_position()
            .map(|client| (client - surface.origin()).to_point())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mouse_position() {
        let input = PointerInput::mouse(12.0, 34.0);
        assert_eq!(input.client_position(), Some(Point::new(12.0, 34.0)));
        assert_eq!(input.release_position(), Some(Point::new(12.0, 34.0)));
    }

    #[test]
    fn test_first_touch_wins() {
        let input = PointerInput::touch(vec![Point::new(1.0, 2.0), Point::new(50.0, 60.0)]);
        assert_eq!(input.client_position(), Some(Point::new(1.0, 2.0)));
    }

    #[test]
    fn test_touch_end_uses_changed_touches() {
        let input = PointerInput::touch_end(vec![Point::new(7.0, 8.0)]);
        assert_eq!(input.client_position(), None);
        assert_eq!(input.release_position(), Some(Point::new(7.0, 8.0)));
    }

    #[test]
    fn test_grab_offset() {
        let input = PointerInput::mouse(30.0, 45.0).with_target(Rect::new(10.0, 20.0, 60.0, 80.0));
        assert_eq!(input.grab_offset(), Some(Vec2::new(20.0, 25.0)));
    }

    #[test]
    fn test_local_position() {
        let input = PointerInput::mouse(110.0, 205.0);
        let surface = Rect::new(100.0, 200.0, 500.0, 600.0);
        assert_eq!(input.local_position(surface), Some(Point::new(10.0, 5.0)));
    }
}

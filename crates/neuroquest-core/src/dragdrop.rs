//! Drag-and-drop between draggable items and typed drop zones.
//!
//! One item can be in flight at a time. A drop lands in the first registered
//! zone whose rectangle contains the release point and whose accepted kinds
//! include the item's kind.

use crate::input::PointerInput;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// An item that can be dragged into drop zones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DragItem {
    pub id: String,
    /// Type tag matched against [`DropZone::accepts`].
    pub kind: String,
    /// Opaque payload owned by the quest.
    pub data: serde_json::Value,
    /// Current position in client coordinates.
    pub position: Point,
}

impl DragItem {
    pub fn new(id: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            data: serde_json::Value::Null,
            position: Point::ZERO,
        }
    }

    /// Attach a payload.
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = data;
        self
    }
}

/// A rectangular target accepting certain item kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropZone {
    pub id: String,
    pub accepts: Vec<String>,
    pub rect: Rect,
    /// Items dropped here, in drop order. Duplicates are kept.
    pub items: Vec<DragItem>,
}

impl DropZone {
    /// Create an empty zone at `(x, y)` with the given size.
    pub fn new<S: Into<String>>(
        id: impl Into<String>,
        accepts: impl IntoIterator<Item = S>,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Self {
        Self {
            id: id.into(),
            accepts: accepts.into_iter().map(Into::into).collect(),
            rect: Rect::new(x, y, x + width, y + height),
            items: Vec::new(),
        }
    }

    /// Edge-inclusive containment test.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.rect.x0
            && point.x <= self.rect.x1
            && point.y >= self.rect.y0
            && point.y <= self.rect.y1
    }

    pub fn accepts_kind(&self, kind: &str) -> bool {
        self.accepts.iter().any(|k| k == kind)
    }

    fn accepts_at(&self, point: Point, kind: &str) -> bool {
        self.contains(point) && self.accepts_kind(kind)
    }
}

/// Tracks a single drag gesture and the registered drop zones.
#[derive(Debug, Clone, Default)]
pub struct DragDropCoordinator {
    /// Item currently being dragged.
    dragged: Option<DragItem>,
    /// Zones in registration order.
    zones: Vec<DropZone>,
    /// Offset of the grab point from the item's top-left corner.
    drag_offset: Vec2,
    /// Zone under the pointer that would accept the dragged item.
    hovered_zone: Option<String>,
}

impl DragDropCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin dragging `item` from the element the event targeted.
    pub fn start_drag(&mut self, mut item: DragItem, event: &PointerInput) {
        let (Some(client), Some(offset)) = (event.client_position(), event.grab_offset()) else {
            return;
        };
        self.drag_offset = offset;
        item.position = client;
        self.dragged = Some(item);
        self.hovered_zone = None;
    }

    /// Move the dragged item and refresh the hovered zone.
    pub fn update_drag_position(&mut self, event: &PointerInput) {
        let Some(client) = event.client_position() else {
            return;
        };
        let Some(item) = self.dragged.as_mut() else {
            return;
        };
        item.position = client - self.drag_offset;
        let kind = item.kind.clone();
        self.hovered_zone = self.zone_at(client, &kind).map(|zone| zone.id.clone());
    }

    /// Release the dragged item.
    ///
    /// Returns the id of the zone that received it, if any. Drag state is
    /// cleared either way.
    pub fn end_drag(&mut self, event: &PointerInput) -> Option<String> {
        let item = self.dragged.take()?;
        self.drag_offset = Vec2::ZERO;
        self.hovered_zone = None;

        let release = event.release_position()?;
        let Some(zone) = self
            .zones
            .iter_mut()
            .find(|zone| zone.accepts_at(release, &item.kind))
        else {
            log::debug!("Item {} released outside any accepting zone", item.id);
            return None;
        };

        log::debug!("Dropped item {} into zone {}", item.id, zone.id);
        zone.items.push(item);
        Some(zone.id.clone())
    }

    /// Add a zone, or replace the zone with the same id (items included).
    pub fn register_drop_zone(&mut self, zone: DropZone) {
        match self.zones.iter_mut().find(|z| z.id == zone.id) {
            Some(existing) => *existing = zone,
            None => self.zones.push(zone),
        }
    }

    /// Remove every entry of `item_id` from a zone.
    pub fn remove_from_drop_zone(&mut self, zone_id: &str, item_id: &str) {
        if let Some(zone) = self.drop_zone_mut(zone_id) {
            zone.items.retain(|item| item.id != item_id);
        }
    }

    /// Remove all items from a zone.
    pub fn clear_drop_zone(&mut self, zone_id: &str) {
        if let Some(zone) = self.drop_zone_mut(zone_id) {
            zone.items.clear();
        }
    }

    /// First zone, in registration order, that would accept `kind` at `point`.
    pub fn zone_at(&self, point: Point, kind: &str) -> Option<&DropZone> {
        self.zones.iter().find(|zone| zone.accepts_at(point, kind))
    }

    pub fn dragged_item(&self) -> Option<&DragItem> {
        self.dragged.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragged.is_some()
    }

    pub fn hovered_zone(&self) -> Option<&str> {
        self.hovered_zone.as_deref()
    }

    pub fn drop_zones(&self) -> &[DropZone] {
        &self.zones
    }

    pub fn drop_zone(&self, id: &str) -> Option<&DropZone> {
        self.zones.iter().find(|zone| zone.id == id)
    }

    fn drop_zone_mut(&mut self, id: &str) -> Option<&mut DropZone> {
        self.zones.iter_mut().find(|zone| zone.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coordinator_with_zone() -> DragDropCoordinator {
        let mut dd = DragDropCoordinator::new();
        dd.register_drop_zone(DropZone::new("bin", ["x"], 0.0, 0.0, 100.0, 100.0));
        dd
    }

    fn grab(x: f64, y: f64) -> PointerInput {
        PointerInput::mouse(x, y).with_target(Rect::new(x - 5.0, y - 5.0, x + 20.0, y + 20.0))
    }

    #[test]
    fn test_drop_inside_zone() {
        let mut dd = coordinator_with_zone();
        dd.start_drag(DragItem::new("a", "x"), &grab(300.0, 300.0));
        assert!(dd.is_dragging());

        let dropped = dd.end_drag(&PointerInput::mouse(50.0, 50.0));
        assert_eq!(dropped.as_deref(), Some("bin"));
        assert!(!dd.is_dragging());
        let zone = dd.drop_zone("bin").unwrap();
        assert_eq!(zone.items.len(), 1);
        assert_eq!(zone.items[0].id, "a");
    }

    #[test]
    fn test_drop_outside_zone() {
        let mut dd = coordinator_with_zone();
        dd.start_drag(DragItem::new("a", "x"), &grab(300.0, 300.0));

        assert_eq!(dd.end_drag(&PointerInput::mouse(200.0, 200.0)), None);
        assert!(!dd.is_dragging());
        assert!(dd.drop_zone("bin").unwrap().items.is_empty());
    }

    #[test]
    fn test_wrong_kind_rejected() {
        let mut dd = coordinator_with_zone();
        dd.start_drag(DragItem::new("a", "y"), &grab(300.0, 300.0));

        assert_eq!(dd.end_drag(&PointerInput::mouse(50.0, 50.0)), None);
        assert!(dd.drop_zone("bin").unwrap().items.is_empty());
    }

    #[test]
    fn test_no_zones_never_drops() {
        let mut dd = DragDropCoordinator::new();
        dd.start_drag(DragItem::new("a", "x"), &grab(10.0, 10.0));
        dd.update_drag_position(&PointerInput::mouse(20.0, 20.0));

        assert_eq!(dd.end_drag(&PointerInput::mouse(20.0, 20.0)), None);
        assert!(!dd.is_dragging());
        assert!(dd.hovered_zone().is_none());
    }

    #[test]
    fn test_idle_calls_are_noops() {
        let mut dd = coordinator_with_zone();
        dd.update_drag_position(&PointerInput::mouse(50.0, 50.0));
        assert!(dd.hovered_zone().is_none());
        assert_eq!(dd.end_drag(&PointerInput::mouse(50.0, 50.0)), None);
        assert!(dd.drop_zone("bin").unwrap().items.is_empty());
    }

    #[test]
    fn test_position_follows_grab_offset() {
        let mut dd = coordinator_with_zone();
        let start = PointerInput::mouse(110.0, 120.0).with_target(Rect::new(100.0, 100.0, 150.0, 150.0));
        dd.start_drag(DragItem::new("a", "x"), &start);
        assert_eq!(dd.dragged_item().unwrap().position, Point::new(110.0, 120.0));

        dd.update_drag_position(&PointerInput::mouse(60.0, 70.0));
        assert_eq!(dd.dragged_item().unwrap().position, Point::new(50.0, 50.0));
    }

    #[test]
    fn test_hover_tracks_accepting_zone() {
        let mut dd = coordinator_with_zone();
        dd.start_drag(DragItem::new("a", "x"), &grab(300.0, 300.0));

        dd.update_drag_position(&PointerInput::mouse(40.0, 40.0));
        assert_eq!(dd.hovered_zone(), Some("bin"));

        dd.update_drag_position(&PointerInput::mouse(400.0, 40.0));
        assert_eq!(dd.hovered_zone(), None);

        dd.update_drag_position(&PointerInput::mouse(100.0, 100.0));
        assert_eq!(dd.hovered_zone(), Some("bin"));

        dd.end_drag(&PointerInput::mouse(100.0, 100.0));
        assert_eq!(dd.hovered_zone(), None);
    }

    #[test]
    fn test_overlapping_zones_first_registered_wins() {
        let mut dd = DragDropCoordinator::new();
        dd.register_drop_zone(DropZone::new("first", ["x"], 0.0, 0.0, 100.0, 100.0));
        dd.register_drop_zone(DropZone::new("second", ["x"], 50.0, 50.0, 100.0, 100.0));
        dd.start_drag(DragItem::new("a", "x"), &grab(300.0, 300.0));

        dd.update_drag_position(&PointerInput::mouse(75.0, 75.0));
        assert_eq!(dd.hovered_zone(), Some("first"));
        assert_eq!(dd.end_drag(&PointerInput::mouse(75.0, 75.0)).as_deref(), Some("first"));
        assert!(dd.drop_zone("second").unwrap().items.is_empty());
    }

    #[test]
    fn test_duplicate_drops_kept() {
        let mut dd = coordinator_with_zone();
        for _ in 0..2 {
            dd.start_drag(DragItem::new("a", "x"), &grab(300.0, 300.0));
            dd.end_drag(&PointerInput::mouse(10.0, 10.0));
        }
        assert_eq!(dd.drop_zone("bin").unwrap().items.len(), 2);

        dd.remove_from_drop_zone("bin", "a");
        assert!(dd.drop_zone("bin").unwrap().items.is_empty());
    }

    #[test]
    fn test_register_replaces_zone() {
        let mut dd = coordinator_with_zone();
        dd.start_drag(DragItem::new("a", "x"), &grab(300.0, 300.0));
        dd.end_drag(&PointerInput::mouse(10.0, 10.0));

        dd.register_drop_zone(DropZone::new("bin", ["y"], 200.0, 200.0, 50.0, 50.0));
        assert_eq!(dd.drop_zones().len(), 1);
        let zone = dd.drop_zone("bin").unwrap();
        assert!(zone.items.is_empty());
        assert_eq!(zone.accepts, vec!["y".to_string()]);
        assert_eq!(zone.rect, Rect::new(200.0, 200.0, 250.0, 250.0));
    }

    #[test]
    fn test_remove_and_clear() {
        let mut dd = coordinator_with_zone();
        for id in ["a", "b", "c"] {
            dd.start_drag(DragItem::new(id, "x"), &grab(300.0, 300.0));
            dd.end_drag(&PointerInput::mouse(10.0, 10.0));
        }

        dd.remove_from_drop_zone("bin", "b");
        let ids: Vec<_> = dd.drop_zone("bin").unwrap().items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);

        dd.clear_drop_zone("bin");
        assert!(dd.drop_zone("bin").unwrap().items.is_empty());
    }

    #[test]
    fn test_unknown_zone_is_noop() {
        let mut dd = coordinator_with_zone();
        dd.remove_from_drop_zone("nowhere", "a");
        dd.clear_drop_zone("nowhere");
        assert_eq!(dd.drop_zones().len(), 1);
    }

    #[test]
    fn test_touch_drag() {
        let mut dd = coordinator_with_zone();
        let start = PointerInput::touch(vec![Point::new(300.0, 300.0)])
            .with_target(Rect::new(290.0, 290.0, 330.0, 330.0));
        dd.start_drag(DragItem::new("a", "x").with_data(serde_json::json!({"label": "Ice"})), &start);

        dd.update_drag_position(&PointerInput::touch(vec![Point::new(30.0, 30.0)]));
        assert_eq!(dd.hovered_zone(), Some("bin"));

        let dropped = dd.end_drag(&PointerInput::touch_end(vec![Point::new(30.0, 30.0)]));
        assert_eq!(dropped.as_deref(), Some("bin"));
        assert_eq!(dd.drop_zone("bin").unwrap().items[0].data["label"], "Ice");
    }
}

//! Freehand sketch surface with linear undo/redo.

use crate::input::PointerInput;
use crate::tools::{SerializableColor, StrokeStyle, ToolKind};
use kurbo::{BezPath, PathEl, Rect};
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use uuid::Uuid;

/// A committed path on the surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathElement {
    pub id: String,
    /// SVG path data (`M x y L x y ...`).
    pub d: String,
    pub stroke: SerializableColor,
    pub stroke_width: f64,
    /// `None` means unfilled.
    pub fill: Option<SerializableColor>,
}

impl PathElement {
    /// Create an unfilled path with a fresh id.
    pub fn new(d: impl Into<String>, style: StrokeStyle) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            d: d.into(),
            stroke: style.color,
            stroke_width: style.width,
            fill: None,
        }
    }
}

/// Format a path as SVG path data with space-separated tokens.
pub fn svg_path_data(path: &BezPath) -> String {
    let mut out = String::new();
    for el in path.elements() {
        if !out.is_empty() {
            out.push(' ');
        }
        let _ = match el {
            PathEl::MoveTo(p) => write!(out, "M {} {}", p.x, p.y),
            PathEl::LineTo(p) => write!(out, "L {} {}", p.x, p.y),
            PathEl::QuadTo(p1, p2) => write!(out, "Q {} {} {} {}", p1.x, p1.y, p2.x, p2.y),
            PathEl::CurveTo(p1, p2, p3) => write!(
                out,
                "C {} {} {} {} {} {}",
                p1.x, p1.y, p2.x, p2.y, p3.x, p3.y
            ),
            PathEl::ClosePath => write!(out, "Z"),
        };
    }
    out
}

/// Linear snapshot history.
///
/// Always holds at least one entry (the empty canvas) and `index` always
/// points at a valid entry. Committing after an undo drops the redo entries.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<Vec<PathElement>>,
    index: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    pub fn new() -> Self {
        Self {
            entries: vec![Vec::new()],
            index: 0,
        }
    }

    /// Record `elements` as the newest entry.
    pub fn commit(&mut self, elements: Vec<PathElement>) {
        self.entries.truncate(self.index + 1);
        self.entries.push(elements);
        self.index = self.entries.len() - 1;
        log::debug!("History commit, index {}", self.index);
    }

    /// Step back, returning the restored snapshot.
    pub fn undo(&mut self) -> Option<&[PathElement]> {
        if !self.can_undo() {
            return None;
        }
        self.index -= 1;
        log::debug!("Undo to history index {}", self.index);
        Some(self.current())
    }

    /// Step forward, returning the restored snapshot.
    pub fn redo(&mut self) -> Option<&[PathElement]> {
        if !self.can_redo() {
            return None;
        }
        self.index += 1;
        log::debug!("Redo to history index {}", self.index);
        Some(self.current())
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    pub fn current(&self) -> &[PathElement] {
        debug_assert!(self.index < self.entries.len());
        &self.entries[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A drawing surface capturing pen strokes into [`PathElement`]s.
#[derive(Debug, Clone, Default)]
pub struct SketchSurface {
    elements: Vec<PathElement>,
    history: History,
    current_path: Option<BezPath>,
    is_drawing: bool,
    tool: ToolKind,
    style: StrokeStyle,
    /// Surface bounds in client coordinates.
    surface_rect: Rect,
}

impl SketchSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a surface occupying `rect` in client coordinates.
    pub fn with_rect(rect: Rect) -> Self {
        Self {
            surface_rect: rect,
            ..Self::default()
        }
    }

    pub fn set_surface_rect(&mut self, rect: Rect) {
        self.surface_rect = rect;
    }

    pub fn set_tool(&mut self, tool: ToolKind) {
        self.tool = tool;
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    pub fn set_stroke_color(&mut self, color: SerializableColor) {
        self.style.color = color;
    }

    pub fn set_stroke_width(&mut self, width: f64) {
        self.style.width = width;
    }

    pub fn style(&self) -> StrokeStyle {
        self.style
    }

    /// Begin a stroke at the pointer position.
    pub fn start_drawing(&mut self, event: &PointerInput) {
        let Some(point) = event.local_position(self.surface_rect) else {
            return;
        };
        self.is_drawing = true;
        if self.tool.captures_paths() {
            let mut path = BezPath::new();
            path.move_to(point);
            self.current_path = Some(path);
        }
    }

    /// Extend the stroke to the pointer position.
    pub fn draw(&mut self, event: &PointerInput) {
        if !self.is_drawing || !self.tool.captures_paths() {
            return;
        }
        let Some(point) = event.local_position(self.surface_rect) else {
            return;
        };
        if let Some(path) = self.current_path.as_mut() {
            path.line_to(point);
        }
    }

    /// Finish the stroke, committing it as a new element.
    ///
    /// Returns the new element's id, if one was committed.
    pub fn stop_drawing(&mut self) -> Option<String> {
        let path = self.current_path.take();
        let was_drawing = std::mem::replace(&mut self.is_drawing, false);
        if !was_drawing || !self.tool.captures_paths() {
            return None;
        }
        let path = path.filter(|p| !p.elements().is_empty())?;

        let element = PathElement::new(svg_path_data(&path), self.style);
        let id = element.id.clone();
        self.elements.push(element);
        self.commit();
        Some(id)
    }

    /// Insert an element under a freshly generated id, returning the id.
    pub fn add_element(&mut self, mut element: PathElement) -> String {
        element.id = Uuid::new_v4().to_string();
        let id = element.id.clone();
        self.elements.push(element);
        self.commit();
        id
    }

    /// Remove the element with `id`. Commits a history entry even when nothing matched.
    pub fn remove_element(&mut self, id: &str) {
        self.elements.retain(|el| el.id != id);
        self.commit();
    }

    /// Remove every element.
    pub fn clear_canvas(&mut self) {
        self.elements.clear();
        self.current_path = None;
        self.commit();
    }

    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(snapshot) => {
                self.elements = snapshot.to_vec();
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(snapshot) => {
                self.elements = snapshot.to_vec();
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn elements(&self) -> &[PathElement] {
        &self.elements
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn is_drawing(&self) -> bool {
        self.is_drawing
    }

    /// SVG data of the stroke in progress, for live preview.
    pub fn current_path_svg(&self) -> Option<String> {
        self.current_path.as_ref().map(svg_path_data)
    }

    fn commit(&mut self) {
        self.history.commit(self.elements.clone());
    }
}

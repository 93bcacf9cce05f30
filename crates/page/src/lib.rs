//! Page-level glue around the highlight engine.
//!
//! [`Page`] owns the document tree plus the interaction state around it
//! (active selection, registered overlay chrome). [`route_pointer_event`]
//! feeds host pointer events through the engine and orchestrates
//! resolve-then-mark when a drag completes.

mod probe;
mod route;

pub use crate::probe::PageProbe;
pub use crate::route::route_pointer_event;

use dom::{Caret, Id, Node, dom_utils};
use layout::{HitResult, TextMeasurer, layout_document};

/// One live page.
///
/// Geometry queries (`hit_at`, `caret_from_point`) lay the document out
/// fresh per call, so answers always reflect the current tree rather than
/// the tree as it was at pointer-down.
pub struct Page {
    doc: Node,
    view_width: f32,
    selection: Option<(Caret, Caret)>,
    overlay_roots: Vec<Id>,
}

impl Page {
    pub fn new(doc: Node, view_width: f32) -> Self {
        Self {
            doc,
            view_width,
            selection: None,
            overlay_roots: Vec::new(),
        }
    }

    pub fn document(&self) -> &Node {
        &self.doc
    }

    pub fn document_mut(&mut self) -> &mut Node {
        &mut self.doc
    }

    pub fn view_width(&self) -> f32 {
        self.view_width
    }

    /// Register a subtree as overlay chrome (floating control, color
    /// picker). Gestures originating inside it are ignored.
    pub fn register_overlay(&mut self, id: Id) {
        if !self.overlay_roots.contains(&id) {
            self.overlay_roots.push(id);
        }
    }

    pub fn overlay_roots(&self) -> &[Id] {
        &self.overlay_roots
    }

    pub fn selection(&self) -> Option<(Caret, Caret)> {
        self.selection
    }

    pub fn set_selection(&mut self, anchor: Caret, focus: Caret) {
        self.selection = Some((anchor, focus));
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    pub fn text_content(&self) -> String {
        dom_utils::text_content(&self.doc)
    }

    /// Hit-test at a viewport point against a fresh layout.
    pub fn hit_at(&self, measurer: &dyn TextMeasurer, point: (f32, f32)) -> Option<HitResult> {
        let tree = layout_document(&self.doc, self.view_width, measurer);
        layout::hit_test(&tree, point)
    }

    /// Caret at a viewport point against a fresh layout.
    pub fn caret_from_point(
        &self,
        measurer: &dyn TextMeasurer,
        point: (f32, f32),
    ) -> Option<Caret> {
        let tree = layout_document(&self.doc, self.view_width, measurer);
        layout::caret_from_point(&tree, point, measurer)
    }
}

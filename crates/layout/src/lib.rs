pub mod caret;
mod inline;
mod text;

pub use crate::caret::caret_from_point;
pub use crate::hit_test::{HitKind, HitResult, hit_test};
pub use crate::inline::{LineBox, TextFragment};
pub use crate::text::{FixedMeasurer, TextMeasurer, caret_from_x_in_range};

use crate::inline::{InlineItem, collect_inline_items, layout_inline_run};
use dom::{Node, dom_utils};

/// A rectangle in CSS px units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rectangle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rectangle {
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.x + self.width && py >= self.y && py <= self.y + self.height
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoxKind {
    Block,
    Replaced,
}

/// A node in the layout tree: a dom node, its geometry, child boxes for
/// block-level children, and line boxes for its inline content.
pub struct LayoutBox<'a> {
    pub kind: BoxKind,
    pub node: &'a Node,
    pub rect: Rectangle,
    pub children: Vec<LayoutBox<'a>>,
    pub lines: Vec<LineBox<'a>>,
}

impl LayoutBox<'_> {
    pub fn node_id(&self) -> dom::Id {
        self.node.id()
    }
}

// Replaced elements get a fixed box until intrinsic sizing exists.
const REPLACED_WIDTH: f32 = 120.0;
const REPLACED_HEIGHT: f32 = 24.0;

/// Compute layout for a document.
///
/// Block-level children stack vertically; runs of inline-level children
/// become line boxes on their containing block.
pub fn layout_document<'a>(
    root: &'a Node,
    viewport_width: f32,
    measurer: &dyn TextMeasurer,
) -> LayoutBox<'a> {
    let (root_box, _next_y) = layout_container(root, 0.0, 0.0, viewport_width, measurer);
    root_box
}

fn is_inline_level(node: &Node) -> bool {
    match node {
        Node::Text { .. } => true,
        Node::Element { name, .. } => matches!(
            name.as_str(),
            "a" | "b" | "i" | "em" | "strong" | "span" | "code" | "mark" | "small" | "u" | "s"
                | "sub" | "sup"
        ),
        _ => false,
    }
}

fn is_replaced(node: &Node) -> bool {
    matches!(
        node.name(),
        Some("img" | "input" | "textarea" | "select" | "button")
    )
}

fn layout_container<'a>(
    node: &'a Node,
    x: f32,
    y: f32,
    width: f32,
    measurer: &dyn TextMeasurer,
) -> (LayoutBox<'a>, f32) {
    let mut children_boxes = Vec::new();
    let mut lines = Vec::new();
    let mut cursor_y = y;
    let mut run: Vec<InlineItem<'a>> = Vec::new();

    let kids: &[Node] = node.children().unwrap_or(&[]);
    for child in kids {
        if is_inline_level(child) {
            collect_inline_items(child, node.id(), None, &mut run);
            continue;
        }

        cursor_y = flush_inline_run(&mut run, &mut lines, x, cursor_y, width, measurer);

        match child {
            Node::Comment { .. } => {}
            c if dom_utils::is_non_rendering_element(c) => {}
            c if is_replaced(c) => {
                let rect = Rectangle {
                    x,
                    y: cursor_y,
                    width: REPLACED_WIDTH.min(width),
                    height: REPLACED_HEIGHT,
                };
                children_boxes.push(LayoutBox {
                    kind: BoxKind::Replaced,
                    node: c,
                    rect,
                    children: Vec::new(),
                    lines: Vec::new(),
                });
                cursor_y += REPLACED_HEIGHT;
            }
            c => {
                let (child_box, next_y) = layout_container(c, x, cursor_y, width, measurer);
                cursor_y = next_y;
                children_boxes.push(child_box);
            }
        }
    }
    cursor_y = flush_inline_run(&mut run, &mut lines, x, cursor_y, width, measurer);

    let mut height = cursor_y - y;
    if height <= 0.0 && !matches!(node, Node::Document { .. }) {
        // an empty block still occupies one line row
        height = measurer.line_height();
        cursor_y = y + height;
    }

    let rect = Rectangle {
        x,
        y,
        width,
        height,
    };
    (
        LayoutBox {
            kind: BoxKind::Block,
            node,
            rect,
            children: children_boxes,
            lines,
        },
        cursor_y,
    )
}

fn flush_inline_run<'a>(
    run: &mut Vec<InlineItem<'a>>,
    lines: &mut Vec<LineBox<'a>>,
    x: f32,
    cursor_y: f32,
    width: f32,
    measurer: &dyn TextMeasurer,
) -> f32 {
    if run.is_empty() {
        return cursor_y;
    }
    let new_lines = layout_inline_run(run, x, cursor_y, width, measurer);
    let end = new_lines.last().map(|l| l.rect.bottom()).unwrap_or(cursor_y);
    lines.extend(new_lines);
    run.clear();
    end
}

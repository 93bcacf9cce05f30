//! Shared fixtures and lookup helpers for tests across the workspace.
//!
//! The lookup helpers panic on missing fixtures; they are test plumbing,
//! not production lookups.

use dom::build::{document, element, element_with, text};
use dom::{Id, Node, dom_utils};

/// The smallest page that exercises every gesture rule: a heading, two
/// paragraphs (one with a link), a form control, and a floating-control
/// overlay stand-in.
///
/// With a fixed 10px advance and 20px line height at 400px width, the
/// vertical bands are: h1 0..20, first paragraph 20..40, second paragraph
/// 40..60, input 60..84, overlay 84..104.
pub fn sample_article() -> Node {
    document(vec![
        element("h1", vec![text("Title")]),
        element("p", vec![text("hello world")]),
        element(
            "p",
            vec![
                text("foo bar"),
                element_with("a", vec![("href", Some("#next"))], vec![text("next page")]),
            ],
        ),
        element("input", vec![]),
        element_with("div", vec![("class", Some("floating-control"))], vec![text("B")]),
    ])
}

/// Id of the first text node containing `needle`.
pub fn text_node_id(root: &Node, needle: &str) -> Id {
    fn walk(node: &Node, needle: &str) -> Option<Id> {
        if let Node::Text { id, text } = node
            && text.contains(needle)
        {
            return Some(*id);
        }
        node.children()?.iter().find_map(|c| walk(c, needle))
    }
    walk(root, needle).unwrap_or_else(|| panic!("no text node containing {needle:?}"))
}

/// Id of the first element carrying `class`.
pub fn element_with_class_id(root: &Node, class: &str) -> Id {
    fn walk(node: &Node, class: &str) -> Option<Id> {
        if node.is_element() && dom_utils::has_class(node, class) {
            return Some(node.id());
        }
        node.children()?.iter().find_map(|c| walk(c, class))
    }
    walk(root, class).unwrap_or_else(|| panic!("no element with class {class:?}"))
}

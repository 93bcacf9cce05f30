use crate::resolve::ResolvedRange;
use core_types::Color;
use dom::{Id, MarkerSpec, Node, RangeError, dom_utils};

/// Class carried by every highlight marker element.
pub const MARKER_CLASS: &str = "krayon-highlight";

/// Element name used for markers.
pub const MARKER_TAG: &str = "mark";

fn marker_spec(color: Color) -> MarkerSpec {
    MarkerSpec {
        name: MARKER_TAG.to_string(),
        attributes: vec![("class".to_string(), Some(MARKER_CLASS.to_string()))],
        // markers never intercept pointer events and never block selecting
        // or copying the text they wrap
        style: vec![
            ("background-color".to_string(), color.to_css()),
            ("pointer-events".to_string(), "none".to_string()),
            ("user-select".to_string(), "text".to_string()),
        ],
    }
}

/// Wrap a resolved range in a marker element carrying `color`.
///
/// Delegates the tree surgery to [`dom::wrap_range`]: validation happens
/// before the first edit, so a failure leaves no partial marker behind.
pub fn mark(root: &mut Node, range: &ResolvedRange, color: Color) -> Result<Id, RangeError> {
    dom::wrap_range(root, range.start, range.end, marker_spec(color))
}

/// Remove every marker, splicing children back into place. Safe with zero
/// markers present. Returns the number removed.
pub fn clear_all(root: &mut Node) -> usize {
    dom::strip_elements_with_class(root, MARKER_CLASS)
}

pub fn marker_count(root: &Node) -> usize {
    dom::count_elements_with_class(root, MARKER_CLASS)
}

pub fn is_marker(node: &Node) -> bool {
    node.is_element() && dom_utils::has_class(node, MARKER_CLASS)
}

use core_types::Point;
use dom::{Caret, Id};
use std::cmp::Ordering;

/// Geometry and document lookups the engine consumes but does not own:
/// the stand-ins for the host's native caret/element-from-point APIs.
///
/// Every id-taking method treats an unknown id as "not connected": the
/// engine re-validates captured references through this trait instead of
/// assuming they survived the gesture.
pub trait DocumentProbe {
    /// Precise caret at a viewport coordinate, if it lands in text.
    fn caret_from_point(&self, point: Point) -> Option<Caret>;

    /// Whether the node is currently connected to the document.
    fn is_connected(&self, id: Id) -> bool;

    /// Byte length of a text node's data; `None` for non-text or
    /// disconnected nodes.
    fn text_len(&self, id: Id) -> Option<usize>;

    /// Document-order comparison of two carets; `None` when either node is
    /// not connected.
    fn compare_carets(&self, a: Caret, b: Caret) -> Option<Ordering>;
}

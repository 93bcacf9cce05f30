use crate::error::{Boundary, ResolveError};
use crate::gesture::GesturePoint;
use crate::probe::DocumentProbe;
use dom::Caret;
use std::cmp::Ordering;

/// A normalized range: start precedes end in document order and the two
/// carets never coincide. Guaranteed by [`resolve`]; marking relies on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedRange {
    pub start: Caret,
    pub end: Caret,
}

/// Resolve a gesture's two points to one forward-ordered range.
///
/// Fast path: both points captured offsets in the same, still-connected
/// text node. The offsets are ordered numerically and used directly; this
/// is the common case of dragging within one run of text.
///
/// Otherwise the captured offsets may be stale (layout shifted, nodes
/// changed), so both screen coordinates are re-probed and the two carets
/// ordered by document position. The result is independent of drag
/// direction.
pub fn resolve(
    start: &GesturePoint,
    end: &GesturePoint,
    probe: &dyn DocumentProbe,
) -> Result<ResolvedRange, ResolveError> {
    if let (Some(a), Some(b)) = (start.text_offset, end.text_offset)
        && a.node == b.node
        && probe.is_connected(a.node)
    {
        let len = probe.text_len(a.node).ok_or(ResolveError::Stale(a.node))?;
        let (lo, hi) = if a.offset <= b.offset { (a, b) } else { (b, a) };
        if hi.offset > len {
            return Err(ResolveError::OffsetOutOfBounds {
                node: hi.node,
                offset: hi.offset,
                len,
            });
        }
        if lo.offset == hi.offset {
            return Err(ResolveError::Collapsed);
        }
        return Ok(ResolvedRange { start: lo, end: hi });
    }

    let a = probe
        .caret_from_point(start.point)
        .ok_or(ResolveError::NoCaret(Boundary::Start))?;
    let b = probe
        .caret_from_point(end.point)
        .ok_or(ResolveError::NoCaret(Boundary::End))?;

    match probe.compare_carets(a, b) {
        Some(Ordering::Less) => Ok(ResolvedRange { start: a, end: b }),
        // the user dragged backward; the range still runs forward
        Some(Ordering::Greater) => Ok(ResolvedRange { start: b, end: a }),
        Some(Ordering::Equal) => Err(ResolveError::Collapsed),
        None => Err(ResolveError::Stale(a.node)),
    }
}

use dom::{Id, RangeError};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Boundary {
    Start,
    End,
}

/// Why a gesture's two points could not be resolved to a range.
///
/// All variants are recoverable: the gesture simply yields no highlight and
/// a diagnostic entry is recorded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolveError {
    /// The probe found no caret at this boundary's coordinates.
    NoCaret(Boundary),
    /// A node captured earlier no longer resolves in the tree.
    Stale(Id),
    /// The two points collapse to a single caret.
    Collapsed,
    /// A captured offset no longer fits its node's text.
    OffsetOutOfBounds { node: Id, offset: usize, len: usize },
}

impl ResolveError {
    /// Short category string for the diagnostic channel.
    pub fn category(&self) -> &'static str {
        match self {
            ResolveError::Stale(_) => "StaleReference",
            _ => "UnresolvedRange",
        }
    }
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::NoCaret(Boundary::Start) => write!(f, "no caret at the start point"),
            ResolveError::NoCaret(Boundary::End) => write!(f, "no caret at the end point"),
            ResolveError::Stale(id) => write!(f, "node {} vanished mid-gesture", id.0),
            ResolveError::Collapsed => write!(f, "points collapse to a single caret"),
            ResolveError::OffsetOutOfBounds { node, offset, len } => write!(
                f,
                "captured offset {offset} no longer fits node {} (len {len})",
                node.0
            ),
        }
    }
}

impl std::error::Error for ResolveError {}

/// Diagnostic category for a failed marking attempt.
pub fn mark_error_category(err: &RangeError) -> &'static str {
    match err {
        RangeError::Missing(_) => "StaleReference",
        _ => "MarkingFailed",
    }
}

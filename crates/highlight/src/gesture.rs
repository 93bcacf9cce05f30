use core_types::Point;
use dom::{Caret, Id};

/// Movement at or below this (Euclidean px) stays a click.
pub const DRAG_THRESHOLD_PX: f32 = 5.0;

/// Presses released faster than this over a link pass through to
/// navigation.
pub const LINK_CLICK_MAX_MS: f64 = 200.0;

/// Classification of the element under a gesture point, computed by the
/// routing layer at event time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TargetFlags {
    /// Inside host-registered overlay chrome (floating control, picker).
    pub in_overlay: bool,
    /// On a native form control (input/textarea/select/contenteditable).
    pub form_control: bool,
    /// Inside a hyperlink.
    pub in_link: bool,
    /// Inside an existing highlight marker.
    pub in_marker: bool,
}

/// One end of a gesture, captured when its pointer event fired.
/// Immutable once constructed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GesturePoint {
    pub point: Point,
    /// Deepest element under the pointer.
    pub target: Id,
    pub flags: TargetFlags,
    /// Caret under the pointer when the coordinate lands in text. May be
    /// stale by the time the gesture ends; resolution re-validates it.
    pub text_offset: Option<Caret>,
}

/// `Idle -> Pressed -> (Dragging | Idle)`; anything returns to `Idle` on
/// pointer-up or on `disable()`.
#[derive(Debug, Default)]
pub(crate) enum GestureState {
    #[default]
    Idle,
    Pressed {
        start: GesturePoint,
        down_time_ms: f64,
    },
    Dragging {
        start: GesturePoint,
    },
}

use crate::gesture::{DRAG_THRESHOLD_PX, GesturePoint, GestureState, LINK_CLICK_MAX_MS};
use crate::listener::{EventKind, ListenerSet};
use crate::marker;
use crate::resolve::ResolvedRange;
use core_types::{Color, EventDisposition, PointerButton, PointerEvent};
use dom::{Id, Node, RangeError};

/// The highlight engine: one explicit instance owning the current color,
/// the listener set, and the in-flight gesture. All mutation goes through
/// these operations; there is no ambient module state.
///
/// The engine holds no document references between operations. Points and
/// trees are handed in per call, and captured ids inside them are
/// re-validated before use.
#[derive(Debug)]
pub struct HighlightEngine {
    color: Color,
    listeners: ListenerSet,
    gesture: GestureState,
}

impl Default for HighlightEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl HighlightEngine {
    pub fn new() -> Self {
        Self {
            color: Color::DEFAULT_HIGHLIGHT,
            listeners: ListenerSet::default(),
            gesture: GestureState::Idle,
        }
    }

    /// Begin listening for gestures with the given marker color. No-op when
    /// already enabled.
    pub fn enable(&mut self, color: Color) {
        if !self.listeners.register() {
            log::trace!(target: "highlight", "enable: already enabled");
            return;
        }
        self.color = color;
        log::debug!(target: "highlight", "enabled with color {}", color.to_css());
    }

    /// Stop listening and tear down the listener set atomically. Any
    /// in-flight gesture is abandoned. Safe when already disabled.
    pub fn disable(&mut self) {
        self.listeners.clear();
        self.gesture = GestureState::Idle;
        log::debug!(target: "highlight", "disabled");
    }

    pub fn is_enabled(&self) -> bool {
        self.listeners.is_registered()
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Color for subsequently created markers. Existing markers keep the
    /// color they were created with.
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Whether a gesture is currently being tracked (pressed or dragging).
    pub fn is_tracking(&self) -> bool {
        !matches!(self.gesture, GestureState::Idle)
    }

    /// Abandon the in-flight gesture (pointer left the document, target
    /// vanished, ...).
    pub fn abort_gesture(&mut self) {
        self.gesture = GestureState::Idle;
    }

    pub fn pointer_down(&mut self, point: GesturePoint, event: &PointerEvent) -> EventDisposition {
        if !self.listeners.accepts(EventKind::PointerDown) {
            return EventDisposition::Pass;
        }
        // native behavior wins for chrome, form controls, secondary buttons
        // and the allow-native modifier
        if point.flags.in_overlay || point.flags.form_control {
            return EventDisposition::Pass;
        }
        if event.button != PointerButton::Primary {
            return EventDisposition::Pass;
        }
        if event.modifiers.ctrl {
            return EventDisposition::Pass;
        }

        self.gesture = GestureState::Pressed {
            start: point,
            down_time_ms: event.time_ms,
        };

        // links keep their default behavior unless this press becomes a drag
        if point.flags.in_link {
            EventDisposition::Pass
        } else {
            EventDisposition::Consume
        }
    }

    pub fn pointer_move(&mut self, point: GesturePoint, event: &PointerEvent) -> EventDisposition {
        if !self.listeners.accepts(EventKind::PointerMove) {
            return EventDisposition::Pass;
        }
        if event.modifiers.ctrl || point.flags.form_control {
            return EventDisposition::Pass;
        }

        match self.gesture {
            GestureState::Idle => EventDisposition::Pass,
            GestureState::Pressed { start, .. } => {
                if point.point.distance_to(start.point) > DRAG_THRESHOLD_PX {
                    log::trace!(target: "highlight", "drag begins at {:?}", point.point);
                    self.gesture = GestureState::Dragging { start };
                    EventDisposition::Consume
                } else {
                    EventDisposition::Pass
                }
            }
            GestureState::Dragging { .. } => EventDisposition::Consume,
        }
    }

    /// Finish the gesture. Returns the `(start, end)` pair when the release
    /// completes a qualifying drag; clicks yield `None` and keep their
    /// default behavior (notably fast clicks on links).
    pub fn pointer_up(
        &mut self,
        point: GesturePoint,
        event: &PointerEvent,
    ) -> (EventDisposition, Option<(GesturePoint, GesturePoint)>) {
        if !self.listeners.accepts(EventKind::PointerUp) {
            return (EventDisposition::Pass, None);
        }
        let state = std::mem::take(&mut self.gesture);

        if event.modifiers.ctrl {
            return (EventDisposition::Pass, None);
        }

        match state {
            GestureState::Idle => (EventDisposition::Pass, None),
            GestureState::Pressed { down_time_ms, .. } => {
                let duration = event.time_ms - down_time_ms;
                if point.flags.in_link && duration < LINK_CLICK_MAX_MS {
                    log::trace!(
                        target: "highlight",
                        "fast link click ({duration:.0}ms): passing through"
                    );
                }
                (EventDisposition::Pass, None)
            }
            GestureState::Dragging { start } => {
                (EventDisposition::Consume, Some((start, point)))
            }
        }
    }

    /// Wrap a resolved range in a marker carrying the current color.
    pub fn mark(&self, root: &mut Node, range: &ResolvedRange) -> Result<Id, RangeError> {
        marker::mark(root, range, self.color)
    }

    /// Remove all markers. Safe with zero markers present.
    pub fn clear_all(&self, root: &mut Node) -> usize {
        marker::clear_all(root)
    }

    pub fn marker_count(&self, root: &Node) -> usize {
        marker::marker_count(root)
    }
}

/// Pointer event kinds the engine subscribes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventKind {
    PointerDown,
    PointerMove,
    PointerUp,
}

/// The engine's record of its event subscriptions.
///
/// Registration is all-or-nothing: `enable()` fills the set once and
/// `disable()` empties it atomically, so partial registration and
/// double-registration cannot occur. An empty set means stray events are
/// dropped before they can touch gesture state.
#[derive(Debug, Default)]
pub struct ListenerSet {
    kinds: Vec<EventKind>,
}

impl ListenerSet {
    /// Register the full gesture listener set. Returns `false` (and changes
    /// nothing) when already registered.
    pub fn register(&mut self) -> bool {
        if !self.kinds.is_empty() {
            return false;
        }
        self.kinds.extend([
            EventKind::PointerDown,
            EventKind::PointerMove,
            EventKind::PointerUp,
        ]);
        true
    }

    pub fn clear(&mut self) {
        self.kinds.clear();
    }

    pub fn accepts(&self, kind: EventKind) -> bool {
        self.kinds.contains(&kind)
    }

    pub fn is_registered(&self) -> bool {
        !self.kinds.is_empty()
    }
}

//! # highlight
//!
//! The drag-to-highlight engine: gesture classification, range resolution,
//! and marker management over a document tree.
//!
//! This crate provides the core building blocks:
//! - [`HighlightEngine`]: one explicit instance owning color, listener set,
//!   and in-flight gesture state
//! - [`GesturePoint`] / [`TargetFlags`]: what the routing layer captures per
//!   pointer event
//! - [`resolve`] / [`ResolvedRange`]: two screen points to one normalized,
//!   forward-ordered range
//! - [`mark`] / [`clear_all`]: marker application and lossless removal
//!
//! ## Design Principles
//!
//! This crate is intentionally UI-agnostic and does not depend on layout,
//! hit-testing, or any rendering backend. Geometry arrives through the
//! [`DocumentProbe`] trait, so resolution can be tested with a fake probe
//! and reused across hosts.
//!
//! Node references captured during a gesture are treated as weak: the
//! engine re-validates every id through the probe (or the tree itself)
//! before acting on it. A vanished node is a recoverable resolution
//! failure, never a panic.
//!
//! Failures are reported on the `log` facade under the `highlight` target
//! with a short category string; nothing here surfaces an error to the
//! user.

mod engine;
mod error;
mod gesture;
mod listener;
mod marker;
mod probe;
mod resolve;

pub use crate::engine::HighlightEngine;
pub use crate::error::{Boundary, ResolveError, mark_error_category};
pub use crate::gesture::{DRAG_THRESHOLD_PX, GesturePoint, LINK_CLICK_MAX_MS, TargetFlags};
pub use crate::listener::{EventKind, ListenerSet};
pub use crate::marker::{MARKER_CLASS, MARKER_TAG, clear_all, is_marker, mark, marker_count};
pub use crate::probe::DocumentProbe;
pub use crate::resolve::{ResolvedRange, resolve};

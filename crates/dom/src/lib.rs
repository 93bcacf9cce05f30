pub mod build;
pub mod dom_utils;
pub mod range;
#[cfg(any(test, feature = "dom-snapshot"))]
pub mod snapshot;
pub mod traverse;

mod types;

pub use crate::range::{
    MarkerSpec, RangeError, count_elements_with_class, range_text, strip_elements_with_class,
    wrap_range,
};
pub use crate::types::{Caret, Id, Node, NodeId};

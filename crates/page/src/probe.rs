use crate::Page;
use core_types::Point;
use dom::{Caret, Id, dom_utils, traverse};
use highlight::DocumentProbe;
use layout::TextMeasurer;
use std::cmp::Ordering;

/// [`DocumentProbe`] over a page and a measurer.
///
/// Bridges the engine's geometry needs to the layout crate the same way the
/// captured ids bridge to the live tree: every query runs against the
/// document as it is now.
pub struct PageProbe<'a> {
    page: &'a Page,
    measurer: &'a dyn TextMeasurer,
}

impl<'a> PageProbe<'a> {
    pub fn new(page: &'a Page, measurer: &'a dyn TextMeasurer) -> Self {
        Self { page, measurer }
    }
}

impl DocumentProbe for PageProbe<'_> {
    fn caret_from_point(&self, point: Point) -> Option<Caret> {
        self.page.caret_from_point(self.measurer, (point.x, point.y))
    }

    fn is_connected(&self, id: Id) -> bool {
        dom_utils::find_node_by_id(self.page.document(), id).is_some()
    }

    fn text_len(&self, id: Id) -> Option<usize> {
        dom_utils::find_node_by_id(self.page.document(), id)?
            .text()
            .map(str::len)
    }

    fn compare_carets(&self, a: Caret, b: Caret) -> Option<Ordering> {
        traverse::compare_carets(self.page.document(), a, b)
    }
}

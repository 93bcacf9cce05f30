use crate::inline::{LineBox, TextFragment};
use crate::text::{TextMeasurer, caret_from_x_in_range};
use crate::LayoutBox;
use dom::Caret;

/// Map a viewport coordinate to the caret it lands on, the
/// `caretRangeFromPoint` stand-in.
///
/// Within a text-bearing block the result snaps to the nearest line by y,
/// the nearest fragment by x, then the nearest character boundary by
/// measured prefix width. Points over blocks with no line boxes resolve to
/// `None`.
pub fn caret_from_point(
    root: &LayoutBox<'_>,
    point: (f32, f32),
    measurer: &dyn TextMeasurer,
) -> Option<Caret> {
    let block = find_text_block(root, point)?;
    let line = line_at_y(&block.lines, point.1)?;
    caret_in_line(line, point.0, measurer)
}

fn find_text_block<'a, 'b>(
    node_box: &'b LayoutBox<'a>,
    point: (f32, f32),
) -> Option<&'b LayoutBox<'a>> {
    if !node_box.rect.contains(point.0, point.1) {
        return None;
    }

    // later children paint on top; prefer them
    for child in node_box.children.iter().rev() {
        if let Some(found) = find_text_block(child, point) {
            return Some(found);
        }
    }

    if node_box.lines.iter().any(|l| !l.fragments.is_empty()) {
        return Some(node_box);
    }
    None
}

fn line_at_y<'a, 'b>(lines: &'b [LineBox<'a>], y: f32) -> Option<&'b LineBox<'a>> {
    for line in lines {
        if y < line.rect.bottom() {
            return Some(line);
        }
    }
    lines.last()
}

fn caret_in_line(line: &LineBox<'_>, x: f32, measurer: &dyn TextMeasurer) -> Option<Caret> {
    let first = line.fragments.first()?;

    let mut prev: Option<&TextFragment<'_>> = None;
    for frag in &line.fragments {
        let left = frag.rect.x;
        let right = frag.rect.x + frag.rect.width.max(0.0);

        if x < left {
            // in a gap: snap to the nearer of the two edges
            let caret = match prev {
                None => caret_in_fragment(first, left, measurer),
                Some(p) => {
                    let prev_right = p.rect.x + p.rect.width.max(0.0);
                    if left - x < x - prev_right {
                        caret_in_fragment(frag, left, measurer)
                    } else {
                        caret_in_fragment(p, prev_right, measurer)
                    }
                }
            };
            return Some(caret);
        }
        if x <= right {
            return Some(caret_in_fragment(frag, x, measurer));
        }
        prev = Some(frag);
    }

    let last = prev.unwrap_or(first);
    let last_right = last.rect.x + last.rect.width.max(0.0);
    Some(caret_in_fragment(last, last_right, measurer))
}

fn caret_in_fragment(frag: &TextFragment<'_>, x: f32, measurer: &dyn TextMeasurer) -> Caret {
    let local_x = (x - frag.rect.x).max(0.0);
    let offset = caret_from_x_in_range(frag.text, frag.range.0, frag.range.1, local_x, measurer);
    Caret::new(frag.node, offset)
}

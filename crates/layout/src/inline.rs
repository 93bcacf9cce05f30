use crate::{Rectangle, text::TextMeasurer};
use dom::{Id, Node, dom_utils};

/// One laid-out run of characters from a single text node.
#[derive(Clone, Debug)]
pub struct TextFragment<'a> {
    /// The source text node.
    pub node: Id,
    /// Full text of the source node; `range` indexes into it.
    pub text: &'a str,
    /// Byte range of this fragment within `text`.
    pub range: (usize, usize),
    pub rect: Rectangle,
    /// Deepest element containing the text node (the event target).
    pub origin: Id,
    /// Nearest enclosing link: (anchor element id, href).
    pub link: Option<(Id, Option<&'a str>)>,
}

#[derive(Clone, Debug)]
pub struct LineBox<'a> {
    pub rect: Rectangle,
    pub fragments: Vec<TextFragment<'a>>,
}

pub(crate) struct InlineItem<'a> {
    node: Id,
    text: &'a str,
    origin: Id,
    link: Option<(Id, Option<&'a str>)>,
}

/// Flatten an inline subtree into text items in document order, tracking the
/// enclosing element and the nearest link ancestor.
pub(crate) fn collect_inline_items<'a>(
    node: &'a Node,
    origin: Id,
    link: Option<(Id, Option<&'a str>)>,
    out: &mut Vec<InlineItem<'a>>,
) {
    match node {
        Node::Text { id, text } => {
            if !text.is_empty() {
                out.push(InlineItem {
                    node: *id,
                    text,
                    origin,
                    link,
                });
            }
        }
        Node::Element { children, .. } => {
            let link = if dom_utils::is_link(node) {
                Some((node.id(), dom_utils::attr(node, "href")))
            } else {
                link
            };
            for c in children {
                collect_inline_items(c, node.id(), link, out);
            }
        }
        _ => {}
    }
}

/// Greedy line breaking with break opportunities after whitespace.
///
/// Fragments never span text nodes; adjacent segments of one node on one
/// line coalesce into a single fragment.
pub(crate) fn layout_inline_run<'a>(
    items: &[InlineItem<'a>],
    x: f32,
    y: f32,
    width: f32,
    measurer: &dyn TextMeasurer,
) -> Vec<LineBox<'a>> {
    let line_h = measurer.line_height();
    let mut lines: Vec<LineBox<'a>> = Vec::new();
    let mut fragments: Vec<TextFragment<'a>> = Vec::new();
    let mut cursor_x = 0.0f32;
    let mut line_index = 0usize;

    for item in items {
        for (seg_start, seg) in split_segments(item.text) {
            let w = measurer.measure(seg);
            if cursor_x > 0.0 && cursor_x + w > width {
                lines.push(LineBox {
                    rect: Rectangle {
                        x,
                        y: y + line_index as f32 * line_h,
                        width,
                        height: line_h,
                    },
                    fragments: std::mem::take(&mut fragments),
                });
                line_index += 1;
                cursor_x = 0.0;
            }

            let seg_end = seg_start + seg.len();
            let line_y = y + line_index as f32 * line_h;
            match fragments.last_mut() {
                Some(last) if last.node == item.node && last.range.1 == seg_start => {
                    last.range.1 = seg_end;
                    last.rect.width += w;
                }
                _ => fragments.push(TextFragment {
                    node: item.node,
                    text: item.text,
                    range: (seg_start, seg_end),
                    rect: Rectangle {
                        x: x + cursor_x,
                        y: line_y,
                        width: w,
                        height: line_h,
                    },
                    origin: item.origin,
                    link: item.link,
                }),
            }
            cursor_x += w;
        }
    }

    if !fragments.is_empty() {
        lines.push(LineBox {
            rect: Rectangle {
                x,
                y: y + line_index as f32 * line_h,
                width,
                height: line_h,
            },
            fragments,
        });
    }
    lines
}

/// Yields `(byte offset, segment)` pieces that cover the text exactly,
/// breaking after each whitespace character.
fn split_segments(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.split_inclusive(char::is_whitespace)
        .scan(0usize, |off, seg| {
            let start = *off;
            *off += seg.len();
            Some((start, seg))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FixedMeasurer;
    use dom::build::{document, element, text};

    #[test]
    fn segments_cover_text_exactly() {
        let segs: Vec<(usize, &str)> = split_segments("ab  cd e").collect();
        assert_eq!(segs, vec![(0, "ab "), (3, " "), (4, "cd "), (7, "e")]);
        let rebuilt: String = segs.iter().map(|(_, s)| *s).collect();
        assert_eq!(rebuilt, "ab  cd e");
    }

    #[test]
    fn run_wraps_at_whitespace_and_coalesces_fragments() {
        let m = FixedMeasurer::new(10.0, 20.0);
        let doc = document(vec![element("p", vec![text("hello world again")])]);
        let p = &doc.children().unwrap()[0];
        let mut items = Vec::new();
        collect_inline_items(&p.children().unwrap()[0], p.id(), None, &mut items);

        // 100px fits one 60px word segment per line
        let lines = layout_inline_run(&items, 0.0, 0.0, 100.0, &m);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].fragments.len(), 1);
        assert_eq!(lines[0].fragments[0].range, (0, 6));
        assert_eq!(lines[1].fragments[0].range, (6, 12));
        assert_eq!(lines[2].fragments[0].range, (12, 17));
        assert_eq!(lines[1].rect.y, 20.0);
        assert_eq!(lines[2].rect.y, 40.0);

        // a wide viewport keeps one line and coalesces the segments
        let lines = layout_inline_run(&items, 0.0, 0.0, 400.0, &m);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].fragments.len(), 1);
        assert_eq!(lines[0].fragments[0].range, (0, 17));
        assert_eq!(lines[0].fragments[0].rect.width, 170.0);
    }

    #[test]
    fn link_context_reaches_nested_text() {
        let doc = document(vec![element(
            "p",
            vec![
                text("go "),
                dom::build::element_with(
                    "a",
                    vec![("href", Some("#dest"))],
                    vec![element("b", vec![text("there")])],
                ),
            ],
        )]);
        let p = &doc.children().unwrap()[0];
        let mut items = Vec::new();
        for c in p.children().unwrap() {
            collect_inline_items(c, p.id(), None, &mut items);
        }
        assert_eq!(items.len(), 2);
        assert!(items[0].link.is_none());
        let (a_id, href) = items[1].link.expect("nested text inherits the link");
        assert_eq!(href, Some("#dest"));
        assert_ne!(a_id, items[1].origin, "origin is the deepest element");
    }
}

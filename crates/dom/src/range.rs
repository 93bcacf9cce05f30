//! Range wrapping and unwrapping.
//!
//! A range is a pair of carets in document order. Wrapping moves the range's
//! content into a fresh marker element; clearing splices marker children back
//! into place. Invariants:
//!
//! - Validation happens before the first edit; a rejected range leaves the
//!   tree untouched, so no partial marker ever survives a failure.
//! - Document text (`dom_utils::collect_text`) is preserved byte-for-byte by
//!   both wrapping and clearing.
//! - Boundary carets always sit in text nodes. Only text nodes are split in
//!   place; partially covered elements on a boundary chain are shell-cloned
//!   into the extracted fragment, fully covered siblings move wholesale.
//! - Emptied split remainders are dropped rather than left as zero-length
//!   text nodes.
//! - New nodes are created with `Id::UNSET`; ids are assigned over the tree
//!   after the splice.

use crate::dom_utils::{assign_node_ids, has_class};
use crate::traverse::{node_at_path, node_at_path_mut, path_to};
use crate::{Caret, Id, Node};
use std::cmp::Ordering;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RangeError {
    /// A boundary node is not connected to this tree.
    Missing(Id),
    /// A boundary caret does not point at a text node.
    NotText(Id),
    /// A boundary offset lies past the end of its text node.
    OutOfBounds { node: Id, offset: usize, len: usize },
    /// A boundary offset splits a multi-byte character.
    NotCharBoundary { node: Id, offset: usize },
    /// The end caret precedes the start caret in document order.
    Unordered,
    /// The range selects no text.
    Collapsed,
}

impl fmt::Display for RangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeError::Missing(id) => write!(f, "node {} is not in the tree", id.0),
            RangeError::NotText(id) => write!(f, "node {} is not a text node", id.0),
            RangeError::OutOfBounds { node, offset, len } => write!(
                f,
                "offset {offset} out of bounds for text node {} (len {len})",
                node.0
            ),
            RangeError::NotCharBoundary { node, offset } => write!(
                f,
                "offset {offset} is not a char boundary in text node {}",
                node.0
            ),
            RangeError::Unordered => write!(f, "range end precedes range start"),
            RangeError::Collapsed => write!(f, "range selects no text"),
        }
    }
}

impl std::error::Error for RangeError {}

/// Blueprint for the marker element a wrap creates.
pub struct MarkerSpec {
    pub name: String,
    pub attributes: Vec<(String, Option<String>)>,
    pub style: Vec<(String, String)>,
}

impl MarkerSpec {
    fn into_node(self, children: Vec<Node>) -> Node {
        Node::Element {
            id: Id::UNSET,
            name: self.name,
            attributes: self.attributes,
            style: self.style,
            children,
        }
    }
}

struct RangePlan {
    start_path: Vec<usize>,
    end_path: Vec<usize>,
}

/// Text selected by the range, in document order.
///
/// `None` when a boundary is invalid for the current tree; an empty string
/// when the carets coincide.
pub fn range_text(root: &Node, start: Caret, end: Caret) -> Option<String> {
    #[derive(PartialEq)]
    enum Phase {
        Before,
        Inside,
        Done,
        Invalid,
    }

    fn boundary_ok(text: &str, offset: usize) -> bool {
        offset <= text.len() && text.is_char_boundary(offset)
    }

    fn walk(node: &Node, start: Caret, end: Caret, phase: &mut Phase, out: &mut String) {
        match node {
            Node::Text { id, text } => {
                if *id == start.node && *id == end.node {
                    if *phase == Phase::Before
                        && start.offset <= end.offset
                        && boundary_ok(text, start.offset)
                        && boundary_ok(text, end.offset)
                    {
                        out.push_str(&text[start.offset..end.offset]);
                        *phase = Phase::Done;
                    } else {
                        *phase = Phase::Invalid;
                    }
                } else if *id == start.node {
                    if *phase == Phase::Before && boundary_ok(text, start.offset) {
                        out.push_str(&text[start.offset..]);
                        *phase = Phase::Inside;
                    } else {
                        *phase = Phase::Invalid;
                    }
                } else if *id == end.node {
                    if *phase == Phase::Inside && boundary_ok(text, end.offset) {
                        out.push_str(&text[..end.offset]);
                        *phase = Phase::Done;
                    } else {
                        *phase = Phase::Invalid;
                    }
                } else if *phase == Phase::Inside {
                    out.push_str(text);
                }
            }
            Node::Document { children, .. } | Node::Element { children, .. } => {
                for c in children {
                    walk(c, start, end, phase, out);
                    if matches!(phase, Phase::Done | Phase::Invalid) {
                        return;
                    }
                }
            }
            Node::Comment { .. } => {}
        }
    }

    let mut out = String::new();
    let mut phase = Phase::Before;
    walk(root, start, end, &mut phase, &mut out);
    (phase == Phase::Done).then_some(out)
}

/// Wrap `[start, end)` in a marker element built from `spec`.
///
/// The direct surround succeeds when splitting text nodes suffices (both
/// boundaries in one text node, or in sibling text nodes under one parent).
/// Any deeper boundary falls back to extraction with shell clones. Returns
/// the id of the inserted marker.
pub fn wrap_range(
    root: &mut Node,
    start: Caret,
    end: Caret,
    spec: MarkerSpec,
) -> Result<Id, RangeError> {
    let plan = validate_range(root, start, end)?;

    let marker_path = match try_surround(root, &plan, start, end, spec) {
        Ok(path) => {
            log::trace!(target: "dom.range", "surround {start:?}..{end:?}");
            path
        }
        Err(spec) => {
            log::trace!(target: "dom.range", "extract fallback {start:?}..{end:?}");
            extract_and_wrap(root, &plan, start, end, spec)
        }
    };

    assign_node_ids(root);
    let id = node_at_path(root, &marker_path).map(Node::id).unwrap_or(Id::UNSET);
    debug_assert_ne!(id, Id::UNSET, "marker must be reachable after insertion");
    Ok(id)
}

fn validate_range(root: &Node, start: Caret, end: Caret) -> Result<RangePlan, RangeError> {
    let start_path = path_to(root, start.node).ok_or(RangeError::Missing(start.node))?;
    let end_path = path_to(root, end.node).ok_or(RangeError::Missing(end.node))?;

    check_boundary(root, &start_path, start)?;
    check_boundary(root, &end_path, end)?;

    match start_path.cmp(&end_path) {
        Ordering::Greater => return Err(RangeError::Unordered),
        Ordering::Equal => match start.offset.cmp(&end.offset) {
            Ordering::Greater => return Err(RangeError::Unordered),
            Ordering::Equal => return Err(RangeError::Collapsed),
            Ordering::Less => {}
        },
        Ordering::Less => {}
    }

    // a range that spans nodes can still select nothing, e.g. end-of-one
    // paragraph to start-of-the-next
    let selected = range_text(root, start, end).ok_or(RangeError::Collapsed)?;
    if selected.is_empty() {
        return Err(RangeError::Collapsed);
    }

    Ok(RangePlan {
        start_path,
        end_path,
    })
}

fn check_boundary(root: &Node, path: &[usize], caret: Caret) -> Result<(), RangeError> {
    let node = node_at_path(root, path).ok_or(RangeError::Missing(caret.node))?;
    let Node::Text { text, .. } = node else {
        return Err(RangeError::NotText(caret.node));
    };
    if caret.offset > text.len() {
        return Err(RangeError::OutOfBounds {
            node: caret.node,
            offset: caret.offset,
            len: text.len(),
        });
    }
    if !text.is_char_boundary(caret.offset) {
        return Err(RangeError::NotCharBoundary {
            node: caret.node,
            offset: caret.offset,
        });
    }
    Ok(())
}

/// Attempt the direct surround. Refuses (returning the spec for the fallback)
/// when a boundary chain would force an element to be split.
fn try_surround(
    root: &mut Node,
    plan: &RangePlan,
    start: Caret,
    end: Caret,
    spec: MarkerSpec,
) -> Result<Vec<usize>, MarkerSpec> {
    if start.node == end.node {
        return Ok(surround_single(root, &plan.start_path, start.offset, end.offset, spec));
    }

    let same_parent = plan.start_path.len() == plan.end_path.len()
        && plan.start_path[..plan.start_path.len() - 1] == plan.end_path[..plan.end_path.len() - 1];
    if same_parent {
        return Ok(surround_siblings(root, plan, start, end, spec));
    }

    Err(spec)
}

/// Both carets in one text node: split into left / selected / right.
fn surround_single(
    root: &mut Node,
    path: &[usize],
    start_offset: usize,
    end_offset: usize,
    spec: MarkerSpec,
) -> Vec<usize> {
    let Some((&idx, parent_path)) = path.split_last() else {
        unreachable!("a text node always has a parent");
    };
    let Some(parent) = node_at_path_mut(root, parent_path) else {
        unreachable!("boundary path validated");
    };
    let Some(children) = parent.children_mut() else {
        unreachable!("boundary path validated");
    };
    let Node::Text { id, text } = &children[idx] else {
        unreachable!("boundary validated as text");
    };

    let orig = *id;
    let left = text[..start_offset].to_string();
    let selected = text[start_offset..end_offset].to_string();
    let right = text[end_offset..].to_string();

    let mut replacement = Vec::with_capacity(3);
    if !left.is_empty() {
        replacement.push(Node::Text { id: orig, text: left });
    }
    let marker_offset = replacement.len();
    replacement.push(spec.into_node(vec![Node::Text {
        id: Id::UNSET,
        text: selected,
    }]));
    if !right.is_empty() {
        replacement.push(Node::Text {
            id: Id::UNSET,
            text: right,
        });
    }
    children.splice(idx..idx + 1, replacement);

    let mut marker_path = parent_path.to_vec();
    marker_path.push(idx + marker_offset);
    marker_path
}

/// Carets in two sibling text nodes under one parent: split both in place and
/// move everything between them into the marker.
fn surround_siblings(
    root: &mut Node,
    plan: &RangePlan,
    start: Caret,
    end: Caret,
    spec: MarkerSpec,
) -> Vec<usize> {
    let parent_path = &plan.start_path[..plan.start_path.len() - 1];
    let (Some(&ia), Some(&ib)) = (plan.start_path.last(), plan.end_path.last()) else {
        unreachable!("a text node always has a parent");
    };
    debug_assert!(ia < ib);

    let Some(parent) = node_at_path_mut(root, parent_path) else {
        unreachable!("boundary path validated");
    };
    let Some(children) = parent.children_mut() else {
        unreachable!("boundary path validated");
    };

    let old = std::mem::take(children);
    let mut frag = Vec::new();
    let mut marker_slot = 0;
    for (i, child) in old.into_iter().enumerate() {
        if i < ia || i > ib {
            children.push(child);
        } else if i == ia {
            let Node::Text { id, text } = child else {
                unreachable!("boundary validated as text");
            };
            let left = text[..start.offset].to_string();
            let tail = text[start.offset..].to_string();
            if !left.is_empty() {
                children.push(Node::Text { id, text: left });
            }
            marker_slot = children.len();
            if !tail.is_empty() {
                frag.push(Node::Text {
                    id: Id::UNSET,
                    text: tail,
                });
            }
        } else if i < ib {
            frag.push(child);
        } else {
            let Node::Text { id, text } = child else {
                unreachable!("boundary validated as text");
            };
            let head = text[..end.offset].to_string();
            let rest = text[end.offset..].to_string();
            if !head.is_empty() {
                frag.push(Node::Text {
                    id: Id::UNSET,
                    text: head,
                });
            }
            if !rest.is_empty() {
                children.push(Node::Text { id, text: rest });
            }
        }
    }
    children.insert(marker_slot, spec.into_node(frag));

    let mut marker_path = parent_path.to_vec();
    marker_path.push(marker_slot);
    marker_path
}

/// General fallback: extract the range content into a fragment, shell-cloning
/// the partially covered elements along both boundary chains, then insert the
/// marker at the collapsed start position.
fn extract_and_wrap(
    root: &mut Node,
    plan: &RangePlan,
    start: Caret,
    end: Caret,
    spec: MarkerSpec,
) -> Vec<usize> {
    let ca_len = common_prefix_len(&plan.start_path, &plan.end_path);
    let ca_path = &plan.start_path[..ca_len];
    let ia = plan.start_path[ca_len];
    let ib = plan.end_path[ca_len];
    debug_assert!(ia < ib, "document order validated");

    let deep_start = plan.start_path.len() > ca_len + 1;
    let deep_end = plan.end_path.len() > ca_len + 1;

    let (frag, marker_slot) = {
        let Some(ca) = node_at_path_mut(root, ca_path) else {
            unreachable!("common ancestor lies on a validated path");
        };
        let Some(children) = ca.children_mut() else {
            unreachable!("common ancestor has children");
        };

        let old = std::mem::take(children);
        let mut frag = Vec::new();
        let mut marker_slot = 0;
        for (i, mut child) in old.into_iter().enumerate() {
            if i < ia || i > ib {
                children.push(child);
            } else if i == ia {
                if deep_start {
                    let tail =
                        extract_tail(&mut child, &plan.start_path[ca_len + 1..], start.offset);
                    children.push(child);
                    frag.extend(tail);
                } else {
                    let Node::Text { id, text } = child else {
                        unreachable!("boundary validated as text");
                    };
                    let left = text[..start.offset].to_string();
                    let tail = text[start.offset..].to_string();
                    if !left.is_empty() {
                        children.push(Node::Text { id, text: left });
                    }
                    marker_slot = children.len();
                    if !tail.is_empty() {
                        frag.push(Node::Text {
                            id: Id::UNSET,
                            text: tail,
                        });
                    }
                }
            } else if i < ib {
                frag.push(child);
            } else if deep_end {
                let head = extract_head(&mut child, &plan.end_path[ca_len + 1..], end.offset);
                frag.extend(head);
                children.push(child);
            } else {
                let Node::Text { id, text } = child else {
                    unreachable!("boundary validated as text");
                };
                let head = text[..end.offset].to_string();
                let rest = text[end.offset..].to_string();
                if !head.is_empty() {
                    frag.push(Node::Text {
                        id: Id::UNSET,
                        text: head,
                    });
                }
                if !rest.is_empty() {
                    children.push(Node::Text { id, text: rest });
                }
            }
        }
        (frag, marker_slot)
    };

    let marker = spec.into_node(frag);

    if deep_start {
        // The marker lands inside the start chain, right after the kept
        // boundary text. Indices at or below the boundary are untouched by
        // the extraction, so the validated path still addresses these nodes.
        let parent_path = &plan.start_path[..plan.start_path.len() - 1];
        let Some(&idx) = plan.start_path.last() else {
            unreachable!("a text node always has a parent");
        };
        let Some(parent) = node_at_path_mut(root, parent_path) else {
            unreachable!("start chain kept in place");
        };
        let Some(children) = parent.children_mut() else {
            unreachable!("start chain kept in place");
        };
        let insert_idx = (idx + usize::from(start.offset > 0)).min(children.len());
        children.insert(insert_idx, marker);

        let mut marker_path = parent_path.to_vec();
        marker_path.push(insert_idx);
        marker_path
    } else {
        let Some(ca) = node_at_path_mut(root, ca_path) else {
            unreachable!("common ancestor lies on a validated path");
        };
        let Some(children) = ca.children_mut() else {
            unreachable!("common ancestor has children");
        };
        let slot = marker_slot.min(children.len());
        children.insert(slot, marker);

        let mut marker_path = ca_path.to_vec();
        marker_path.push(slot);
        marker_path
    }
}

fn common_prefix_len(a: &[usize], b: &[usize]) -> usize {
    a.iter().zip(b.iter()).take_while(|(x, y)| x == y).count()
}

/// Clone-out everything after the caret within `node`'s subtree. `rel_path`
/// addresses the boundary text node; `node` keeps the content before the
/// caret. Returns `None` when nothing follows the caret.
fn extract_tail(node: &mut Node, rel_path: &[usize], offset: usize) -> Option<Node> {
    match node {
        Node::Text { text, .. } => {
            debug_assert!(rel_path.is_empty());
            if offset >= text.len() {
                return None;
            }
            let tail = text.split_off(offset);
            Some(Node::Text {
                id: Id::UNSET,
                text: tail,
            })
        }
        Node::Element {
            name,
            attributes,
            style,
            children,
            ..
        } => {
            let i = rel_path[0];
            let inner = extract_tail(&mut children[i], &rel_path[1..], offset);
            let emptied = matches!(&children[i], Node::Text { text, .. } if text.is_empty());
            let after = if emptied {
                children.remove(i);
                i
            } else {
                i + 1
            };
            let moved: Vec<Node> = children.split_off(after.min(children.len()));

            let mut sub = Vec::with_capacity(moved.len() + 1);
            sub.extend(inner);
            sub.extend(moved);
            if sub.is_empty() {
                return None;
            }
            Some(Node::Element {
                id: Id::UNSET,
                name: name.clone(),
                attributes: attributes.clone(),
                style: style.clone(),
                children: sub,
            })
        }
        _ => None,
    }
}

/// Mirror of [`extract_tail`]: clone-out everything before the caret, leaving
/// `node` with the content from the caret on.
fn extract_head(node: &mut Node, rel_path: &[usize], offset: usize) -> Option<Node> {
    match node {
        Node::Text { text, .. } => {
            debug_assert!(rel_path.is_empty());
            if offset == 0 {
                return None;
            }
            let rest = text.split_off(offset);
            let head = std::mem::replace(text, rest);
            Some(Node::Text {
                id: Id::UNSET,
                text: head,
            })
        }
        Node::Element {
            name,
            attributes,
            style,
            children,
            ..
        } => {
            let i = rel_path[0];
            let inner = extract_head(&mut children[i], &rel_path[1..], offset);
            let emptied = matches!(&children[i], Node::Text { text, .. } if text.is_empty());
            let mut moved: Vec<Node> = children.drain(..i).collect();
            if emptied {
                children.remove(0);
            }
            moved.extend(inner);
            if moved.is_empty() {
                return None;
            }
            Some(Node::Element {
                id: Id::UNSET,
                name: name.clone(),
                attributes: attributes.clone(),
                style: style.clone(),
                children: moved,
            })
        }
        _ => None,
    }
}

/// Remove every element carrying `class`, splicing its children into its
/// former position. Single bottom-up pass; nested occurrences flatten too.
/// Returns the number of elements removed.
pub fn strip_elements_with_class(root: &mut Node, class: &str) -> usize {
    fn walk(node: &mut Node, class: &str, removed: &mut usize) {
        let Some(children) = node.children_mut() else {
            return;
        };
        let old = std::mem::take(children);
        children.reserve(old.len());
        for mut child in old {
            walk(&mut child, class, removed);
            if child.is_element() && has_class(&child, class) {
                *removed += 1;
                if let Some(grand) = child.children_mut() {
                    children.append(grand);
                }
            } else {
                children.push(child);
            }
        }
    }

    let mut removed = 0;
    walk(root, class, &mut removed);
    removed
}

pub fn count_elements_with_class(root: &Node, class: &str) -> usize {
    fn walk(node: &Node, class: &str, count: &mut usize) {
        if node.is_element() && has_class(node, class) {
            *count += 1;
        }
        if let Some(children) = node.children() {
            for c in children {
                walk(c, class, count);
            }
        }
    }

    let mut count = 0;
    walk(root, class, &mut count);
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::{document, element, element_with, text};
    use crate::dom_utils::text_content;
    use crate::snapshot::{DomSnapshot, DomSnapshotOptions};

    const CLASS: &str = "krayon-highlight";

    fn marker_spec() -> MarkerSpec {
        MarkerSpec {
            name: "mark".to_string(),
            attributes: vec![("class".to_string(), Some(CLASS.to_string()))],
            style: Vec::new(),
        }
    }

    fn text_id(root: &Node, needle: &str) -> Id {
        fn walk(node: &Node, needle: &str) -> Option<Id> {
            if let Node::Text { id, text } = node
                && text.contains(needle)
            {
                return Some(*id);
            }
            node.children()?.iter().find_map(|c| walk(c, needle))
        }
        walk(root, needle).expect("fixture text present")
    }

    fn marker_text(root: &Node) -> String {
        fn walk<'a>(node: &'a Node) -> Option<&'a Node> {
            if node.is_element() && has_class(node, CLASS) {
                return Some(node);
            }
            node.children()?.iter().find_map(walk)
        }
        text_content(walk(root).expect("marker present"))
    }

    #[test]
    fn single_node_wrap_splits_text() {
        let mut doc = document(vec![element("p", vec![text("hello world")])]);
        let t = text_id(&doc, "hello");

        let id = wrap_range(&mut doc, Caret::new(t, 3), Caret::new(t, 8), marker_spec()).unwrap();
        assert_ne!(id, Id::UNSET);
        assert_eq!(marker_text(&doc), "lo wo");
        assert_eq!(text_content(&doc), "hello world");
        assert_eq!(count_elements_with_class(&doc, CLASS), 1);

        let p = &doc.children().unwrap()[0];
        let kids = p.children().unwrap();
        assert_eq!(kids.len(), 3);
        assert_eq!(kids[0].text(), Some("hel"));
        assert_eq!(kids[2].text(), Some("rld"));
    }

    #[test]
    fn single_node_wrap_at_edges_drops_empty_remainders() {
        let mut doc = document(vec![element("p", vec![text("abc")])]);
        let t = text_id(&doc, "abc");

        wrap_range(&mut doc, Caret::new(t, 0), Caret::new(t, 3), marker_spec()).unwrap();
        let p = &doc.children().unwrap()[0];
        assert_eq!(p.children().unwrap().len(), 1);
        assert_eq!(marker_text(&doc), "abc");
        assert_eq!(text_content(&doc), "abc");
    }

    #[test]
    fn sibling_text_nodes_surround_without_clones() {
        let mut doc = document(vec![element(
            "p",
            vec![text("ab"), element("b", vec![text("cd")]), text("ef")],
        )]);
        let t1 = text_id(&doc, "ab");
        let t2 = text_id(&doc, "ef");

        wrap_range(&mut doc, Caret::new(t1, 1), Caret::new(t2, 1), marker_spec()).unwrap();
        assert_eq!(marker_text(&doc), "bcde");
        assert_eq!(text_content(&doc), "abcdef");

        let p = &doc.children().unwrap()[0];
        let kids = p.children().unwrap();
        assert_eq!(kids.len(), 3);
        assert_eq!(kids[0].text(), Some("a"));
        assert!(has_class(&kids[1], CLASS));
        assert_eq!(kids[2].text(), Some("f"));
    }

    #[test]
    fn cross_paragraph_fallback_clones_shells() {
        let mut doc = document(vec![
            element("p", vec![text("hello world")]),
            element("p", vec![text("foo bar")]),
        ]);
        let t1 = text_id(&doc, "hello");
        let t2 = text_id(&doc, "foo");

        wrap_range(&mut doc, Caret::new(t1, 6), Caret::new(t2, 3), marker_spec()).unwrap();
        assert_eq!(count_elements_with_class(&doc, CLASS), 1);
        assert_eq!(marker_text(&doc), "worldfoo");
        assert_eq!(text_content(&doc), "hello worldfoo bar");

        // marker sits inside the first paragraph, after the kept text
        let p1 = &doc.children().unwrap()[0];
        let kids = p1.children().unwrap();
        assert_eq!(kids[0].text(), Some("hello "));
        assert!(has_class(&kids[1], CLASS));

        // both original paragraphs survive
        let p2 = &doc.children().unwrap()[1];
        assert_eq!(text_content(p2), " bar");
    }

    #[test]
    fn fallback_and_clear_preserve_text_exactly() {
        let mut doc = document(vec![
            element("p", vec![text("hello world")]),
            element("p", vec![text("foo bar")]),
        ]);
        let before = text_content(&doc);
        let t1 = text_id(&doc, "hello");
        let t2 = text_id(&doc, "foo");

        wrap_range(&mut doc, Caret::new(t1, 6), Caret::new(t2, 3), marker_spec()).unwrap();
        assert_eq!(strip_elements_with_class(&mut doc, CLASS), 1);
        assert_eq!(count_elements_with_class(&doc, CLASS), 0);
        assert_eq!(text_content(&doc), before);
        assert_eq!(doc.children().unwrap().len(), 2);
    }

    #[test]
    fn deep_boundary_chain_is_shell_cloned() {
        let mut doc = document(vec![
            element("p", vec![element("b", vec![text("bold tail")]), text(" outer")]),
            element("p", vec![text("next")]),
        ]);
        let t1 = text_id(&doc, "bold");
        let t2 = text_id(&doc, "next");

        wrap_range(&mut doc, Caret::new(t1, 5), Caret::new(t2, 2), marker_spec()).unwrap();
        assert_eq!(marker_text(&doc), "tail outerne");
        assert_eq!(text_content(&doc), "bold tail outernext");

        // the <b> kept its head, and the marker was inserted right after it,
        // at the collapsed start position inside <b>
        let p1 = &doc.children().unwrap()[0];
        let b = &p1.children().unwrap()[0];
        assert_eq!(b.name(), Some("b"));
        let b_kids = b.children().unwrap();
        assert_eq!(b_kids[0].text(), Some("bold "));
        assert!(has_class(&b_kids[1], CLASS));
    }

    #[test]
    fn whole_node_boundaries_leave_empty_elements_behind() {
        let mut doc = document(vec![
            element("p", vec![text("ab")]),
            element("p", vec![text("cd")]),
        ]);
        let t1 = text_id(&doc, "ab");
        let t2 = text_id(&doc, "cd");

        wrap_range(&mut doc, Caret::new(t1, 0), Caret::new(t2, 2), marker_spec()).unwrap();
        assert_eq!(marker_text(&doc), "abcd");
        assert_eq!(text_content(&doc), "abcd");
        assert_eq!(count_elements_with_class(&doc, CLASS), 1);
    }

    #[test]
    fn collapsed_and_unordered_ranges_are_rejected() {
        let mut doc = document(vec![element("p", vec![text("hello")])]);
        let t = text_id(&doc, "hello");

        assert_eq!(
            wrap_range(&mut doc, Caret::new(t, 2), Caret::new(t, 2), marker_spec()).unwrap_err(),
            RangeError::Collapsed
        );
        assert_eq!(
            wrap_range(&mut doc, Caret::new(t, 4), Caret::new(t, 1), marker_spec()).unwrap_err(),
            RangeError::Unordered
        );
        assert_eq!(count_elements_with_class(&doc, CLASS), 0);
        assert_eq!(text_content(&doc), "hello");
    }

    #[test]
    fn empty_cross_node_selection_is_collapsed() {
        let mut doc = document(vec![
            element("p", vec![text("ab")]),
            element("p", vec![text("cd")]),
        ]);
        let t1 = text_id(&doc, "ab");
        let t2 = text_id(&doc, "cd");

        assert_eq!(
            wrap_range(&mut doc, Caret::new(t1, 2), Caret::new(t2, 0), marker_spec()).unwrap_err(),
            RangeError::Collapsed
        );
    }

    #[test]
    fn stale_and_invalid_boundaries_are_rejected_without_mutation() {
        let mut doc = document(vec![element("p", vec![text("a€b")])]);
        let t = text_id(&doc, "a€b");
        let snapshot = DomSnapshot::new(&doc, DomSnapshotOptions::default()).render();

        assert_eq!(
            wrap_range(&mut doc, Caret::new(Id(999), 0), Caret::new(t, 1), marker_spec())
                .unwrap_err(),
            RangeError::Missing(Id(999))
        );
        assert_eq!(
            wrap_range(&mut doc, Caret::new(t, 0), Caret::new(t, 99), marker_spec()).unwrap_err(),
            RangeError::OutOfBounds {
                node: t,
                offset: 99,
                len: 5
            }
        );
        assert_eq!(
            wrap_range(&mut doc, Caret::new(t, 0), Caret::new(t, 2), marker_spec()).unwrap_err(),
            RangeError::NotCharBoundary { node: t, offset: 2 }
        );
        let p_id = doc.children().unwrap()[0].id();
        assert_eq!(
            wrap_range(&mut doc, Caret::new(p_id, 0), Caret::new(t, 1), marker_spec())
                .unwrap_err(),
            RangeError::NotText(p_id)
        );

        let after = DomSnapshot::new(&doc, DomSnapshotOptions::default()).render();
        assert_eq!(snapshot, after, "rejected ranges must not touch the tree");
    }

    #[test]
    fn range_text_spans_elements_in_document_order() {
        let doc = document(vec![
            element("p", vec![text("one "), element("i", vec![text("two")])]),
            element("p", vec![text("three")]),
        ]);
        let t1 = text_id(&doc, "one");
        let t3 = text_id(&doc, "three");

        assert_eq!(
            range_text(&doc, Caret::new(t1, 2), Caret::new(t3, 3)).as_deref(),
            Some("e twothr")
        );
        assert_eq!(range_text(&doc, Caret::new(t3, 3), Caret::new(t1, 2)), None);
    }

    #[test]
    fn strip_flattens_nested_markers() {
        let mut doc = document(vec![element("p", vec![text("abcdef")])]);
        let t = text_id(&doc, "abcdef");
        wrap_range(&mut doc, Caret::new(t, 0), Caret::new(t, 6), marker_spec()).unwrap();
        let inner = text_id(&doc, "abcdef");
        wrap_range(&mut doc, Caret::new(inner, 1), Caret::new(inner, 5), marker_spec()).unwrap();
        assert_eq!(count_elements_with_class(&doc, CLASS), 2);

        assert_eq!(strip_elements_with_class(&mut doc, CLASS), 2);
        assert_eq!(count_elements_with_class(&doc, CLASS), 0);
        assert_eq!(text_content(&doc), "abcdef");
    }

    #[test]
    fn strip_on_clean_tree_is_structural_noop() {
        let mut doc = document(vec![
            element_with("div", vec![("id", Some("main"))], vec![text("x")]),
            element("p", vec![]),
        ]);
        let before = DomSnapshot::new(&doc, DomSnapshotOptions { ignore_ids: false }).render();
        assert_eq!(strip_elements_with_class(&mut doc, CLASS), 0);
        let after = DomSnapshot::new(&doc, DomSnapshotOptions { ignore_ids: false }).render();
        assert_eq!(before, after);
    }
}

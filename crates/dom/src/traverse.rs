use crate::{Caret, Id, Node};
use std::cmp::Ordering;

/// Child-index path from `root` down to the node with `id`.
///
/// An empty path means `root` itself. `None` means the node is not connected
/// to this tree, which is the existence check callers run before trusting a
/// stale id.
pub fn path_to(root: &Node, id: Id) -> Option<Vec<usize>> {
    fn walk(node: &Node, id: Id, path: &mut Vec<usize>) -> bool {
        if node.id() == id {
            return true;
        }
        if let Some(children) = node.children() {
            for (i, c) in children.iter().enumerate() {
                path.push(i);
                if walk(c, id, path) {
                    return true;
                }
                path.pop();
            }
        }
        false
    }

    let mut path = Vec::new();
    walk(root, id, &mut path).then_some(path)
}

pub fn node_at_path<'a>(root: &'a Node, path: &[usize]) -> Option<&'a Node> {
    let mut node = root;
    for &i in path {
        node = node.children()?.get(i)?;
    }
    Some(node)
}

pub fn node_at_path_mut<'a>(root: &'a mut Node, path: &[usize]) -> Option<&'a mut Node> {
    let mut node = root;
    for &i in path {
        node = node.children_mut()?.get_mut(i)?;
    }
    Some(node)
}

/// Compare two carets in document order.
///
/// `None` when either caret's node is not in the tree. Boundary carets on the
/// same node compare by offset.
pub fn compare_carets(root: &Node, a: Caret, b: Caret) -> Option<Ordering> {
    let pa = path_to(root, a.node)?;
    let pb = path_to(root, b.node)?;
    match pa.cmp(&pb) {
        Ordering::Equal => Some(a.offset.cmp(&b.offset)),
        other => Some(other),
    }
}

/// Inclusive ancestor check: true when `id` is `ancestor` or lies inside it.
pub fn is_within(root: &Node, ancestor: Id, id: Id) -> bool {
    fn contains(node: &Node, id: Id) -> bool {
        if node.id() == id {
            return true;
        }
        if let Some(children) = node.children() {
            return children.iter().any(|c| contains(c, id));
        }
        false
    }

    match crate::dom_utils::find_node_by_id(root, ancestor) {
        Some(node) => contains(node, id),
        None => false,
    }
}

/// Nearest inclusive ancestor of `id` matching `pred`, the `closest()`
/// analog.
pub fn ancestor_matching(
    root: &Node,
    id: Id,
    pred: impl Fn(&Node) -> bool + Copy,
) -> Option<Id> {
    fn walk<'a>(
        node: &'a Node,
        id: Id,
        pred: impl Fn(&Node) -> bool + Copy,
        chain: &mut Vec<&'a Node>,
    ) -> Option<Id> {
        chain.push(node);
        if node.id() == id {
            let found = chain.iter().rev().find(|n| pred(n)).map(|n| n.id());
            chain.pop();
            return found;
        }
        if let Some(children) = node.children() {
            for c in children {
                if let Some(found) = walk(c, id, pred, chain) {
                    chain.pop();
                    return Some(found);
                }
            }
        }
        chain.pop();
        None
    }

    let mut chain = Vec::new();
    walk(root, id, pred, &mut chain)
}

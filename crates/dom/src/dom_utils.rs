use crate::{Id, Node};

/// Assign ids to nodes that still carry [`Id::UNSET`].
///
/// Existing ids are never reassigned; new ids start above the highest id
/// currently in the tree, so connected nodes keep stable identities across
/// repeated passes.
pub fn assign_node_ids(root: &mut Node) {
    fn max_id(node: &Node, max: &mut u32) {
        if node.id().0 > *max {
            *max = node.id().0;
        }
        if let Some(children) = node.children() {
            for c in children {
                max_id(c, max);
            }
        }
    }

    fn walk(node: &mut Node, next: &mut u32) {
        // only assign if currently unset
        if node.id() == Id::UNSET {
            let id = Id(*next);
            *next = next.wrapping_add(1);
            node.set_id(id);
        }

        if let Some(children) = node.children_mut() {
            for c in children {
                walk(c, next);
            }
        }
    }

    let mut max = 0;
    max_id(root, &mut max);
    let mut next = max + 1;
    walk(root, &mut next);
}

pub fn find_node_by_id(node: &Node, id: Id) -> Option<&Node> {
    if node.id() == id {
        return Some(node);
    }
    if let Some(children) = node.children() {
        for c in children {
            if let Some(found) = find_node_by_id(c, id) {
                return Some(found);
            }
        }
    }
    None
}

pub fn find_node_by_id_mut(node: &mut Node, id: Id) -> Option<&mut Node> {
    if node.id() == id {
        return Some(node);
    }
    if let Some(children) = node.children_mut() {
        for c in children {
            if let Some(found) = find_node_by_id_mut(c, id) {
                return Some(found);
            }
        }
    }
    None
}

/// Concatenate all text-node data in document order, verbatim.
///
/// No trimming or whitespace collapsing: markers must preserve this
/// byte-for-byte across wrapping and clearing.
pub fn collect_text(node: &Node, out: &mut String) {
    match node {
        Node::Text { text, .. } => out.push_str(text),
        Node::Document { children, .. } | Node::Element { children, .. } => {
            for c in children {
                collect_text(c, out);
            }
        }
        _ => {}
    }
}

pub fn text_content(node: &Node) -> String {
    let mut out = String::new();
    collect_text(node, &mut out);
    out
}

/// Attribute value lookup; `None` for missing or valueless attributes.
pub fn attr<'a>(node: &'a Node, name: &str) -> Option<&'a str> {
    match node {
        Node::Element { attributes, .. } => attributes
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .and_then(|(_, v)| v.as_deref()),
        _ => None,
    }
}

pub fn has_class(node: &Node, class: &str) -> bool {
    attr(node, "class")
        .map(|v| v.split_whitespace().any(|c| c == class))
        .unwrap_or(false)
}

pub fn is_non_rendering_element(node: &Node) -> bool {
    match node {
        Node::Element { name, .. } => {
            matches!(
                name.as_str(),
                "head" | "style" | "script" | "title" | "meta" | "link"
            )
        }
        _ => false,
    }
}

/// Native form controls keep their default interaction; gestures over them
/// are never tracked.
pub fn is_form_control(node: &Node) -> bool {
    match node {
        Node::Element { name, .. } => {
            matches!(name.as_str(), "input" | "textarea" | "select")
                || attr(node, "contenteditable") == Some("true")
        }
        _ => false,
    }
}

pub fn is_link(node: &Node) -> bool {
    matches!(node, Node::Element { name, .. } if name == "a")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::{document, element, element_with, text};

    #[test]
    fn assign_ids_does_not_collide_after_insertion() {
        let mut doc = document(vec![element("p", vec![text("a")])]);
        let before: Vec<u32> = {
            fn ids(n: &Node, out: &mut Vec<u32>) {
                out.push(n.id().0);
                if let Some(c) = n.children() {
                    for child in c {
                        ids(child, out);
                    }
                }
            }
            let mut v = Vec::new();
            ids(&doc, &mut v);
            v
        };

        doc.children_mut().unwrap().push(element("p", vec![text("b")]));
        assign_node_ids(&mut doc);

        let mut all = Vec::new();
        fn ids(n: &Node, out: &mut Vec<u32>) {
            out.push(n.id().0);
            if let Some(c) = n.children() {
                for child in c {
                    ids(child, out);
                }
            }
        }
        ids(&doc, &mut all);

        let mut sorted = all.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), all.len(), "duplicate ids after reassignment");
        for id in before {
            assert!(all.contains(&id), "existing id {id} was reassigned");
        }
    }

    #[test]
    fn text_content_is_verbatim() {
        let doc = document(vec![
            element("p", vec![text("  hello "), element("b", vec![text("world")])]),
            element("p", vec![text("!")]),
        ]);
        assert_eq!(text_content(&doc), "  hello world!");
    }

    #[test]
    fn class_matching_is_token_based() {
        let el = element_with("span", vec![("class", Some("a highlight b"))], vec![]);
        assert!(has_class(&el, "highlight"));
        assert!(!has_class(&el, "high"));
    }

    #[test]
    fn form_control_detection() {
        assert!(is_form_control(&element("input", vec![])));
        assert!(is_form_control(&element_with(
            "div",
            vec![("contenteditable", Some("true"))],
            vec![]
        )));
        assert!(!is_form_control(&element("p", vec![])));
    }
}

//! Programmatic document construction.
//!
//! Documents here are built in code rather than parsed; these helpers keep
//! fixture and demo trees readable. Nodes are created with [`Id::UNSET`] and
//! [`document`] assigns ids over the finished tree.

use crate::dom_utils::assign_node_ids;
use crate::{Id, Node};

/// Build a document root and assign ids to the whole tree.
pub fn document(children: Vec<Node>) -> Node {
    let mut doc = Node::Document {
        id: Id::UNSET,
        doctype: None,
        children,
    };
    assign_node_ids(&mut doc);
    doc
}

pub fn element(name: &str, children: Vec<Node>) -> Node {
    Node::Element {
        id: Id::UNSET,
        name: name.to_ascii_lowercase(),
        attributes: Vec::new(),
        style: Vec::new(),
        children,
    }
}

pub fn element_with(
    name: &str,
    attributes: Vec<(&str, Option<&str>)>,
    children: Vec<Node>,
) -> Node {
    Node::Element {
        id: Id::UNSET,
        name: name.to_ascii_lowercase(),
        attributes: attributes
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.map(str::to_string)))
            .collect(),
        style: Vec::new(),
        children,
    }
}

pub fn text(s: &str) -> Node {
    Node::Text {
        id: Id::UNSET,
        text: s.to_string(),
    }
}

pub fn comment(s: &str) -> Node {
    Node::Comment {
        id: Id::UNSET,
        text: s.to_string(),
    }
}

use crate::Node;
use std::fmt::{self, Write};

/// Deterministic DOM serialization and equality for tests.
/// Not a public stable format; intended for internal test comparisons.
///
/// Equivalence rules:
/// - Node kinds must match.
/// - Element names must match.
/// - Attribute list order is significant; names and values must match.
/// - Text nodes and comments must match exactly.
/// - IDs can be ignored by options (the default, since ids depend on
///   assignment history).
#[derive(Clone, Copy, Debug)]
pub struct DomSnapshotOptions {
    pub ignore_ids: bool,
}

impl Default for DomSnapshotOptions {
    fn default() -> Self {
        Self { ignore_ids: true }
    }
}

#[derive(Debug)]
pub struct DomSnapshot {
    lines: Vec<String>,
}

impl DomSnapshot {
    pub fn new(root: &Node, options: DomSnapshotOptions) -> Self {
        let mut lines = Vec::new();
        walk_snapshot(root, &options, 0, &mut lines);
        Self { lines }
    }

    pub fn as_lines(&self) -> &[String] {
        &self.lines
    }

    pub fn render(&self) -> String {
        self.lines.join("\n")
    }
}

impl fmt::Display for DomSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.lines.iter().enumerate() {
            if i != 0 {
                f.write_str("\n")?;
            }
            f.write_str(line)?;
        }
        Ok(())
    }
}

pub fn assert_dom_eq(expected: &Node, actual: &Node, options: DomSnapshotOptions) {
    let expected = DomSnapshot::new(expected, options);
    let actual = DomSnapshot::new(actual, options);
    if expected.as_lines() != actual.as_lines() {
        panic!(
            "DOM mismatch\nexpected:\n{}\nactual:\n{}",
            expected.render(),
            actual.render()
        );
    }
}

fn walk_snapshot(node: &Node, options: &DomSnapshotOptions, depth: usize, out: &mut Vec<String>) {
    let mut line = String::new();
    for _ in 0..depth * 2 {
        line.push(' ');
    }
    write_node_line(&mut line, node, options);
    out.push(line);
    if let Some(children) = node.children() {
        for child in children {
            walk_snapshot(child, options, depth + 1, out);
        }
    }
}

fn write_node_line(out: &mut String, node: &Node, options: &DomSnapshotOptions) {
    match node {
        Node::Document { doctype, id, .. } => {
            out.push_str("#document");
            if let Some(dt) = doctype {
                out.push_str(" doctype=\"");
                write_escaped(out, dt);
                out.push('"');
            }
            if !options.ignore_ids {
                let _ = write!(out, " id={}", id.0);
            }
        }
        Node::Element {
            id,
            name,
            attributes,
            style,
            ..
        } => {
            out.push('<');
            out.push_str(name);
            for (attr, value) in attributes {
                out.push(' ');
                out.push_str(attr);
                if let Some(value) = value {
                    out.push_str("=\"");
                    write_escaped(out, value);
                    out.push('"');
                }
            }
            if !options.ignore_ids {
                let _ = write!(out, " data-node-id=\"{}\"", id.0);
            }
            if !style.is_empty() {
                out.push_str(" style=[");
                for (i, (k, v)) in style.iter().enumerate() {
                    if i != 0 {
                        out.push_str("; ");
                    }
                    out.push_str(k);
                    out.push_str(": ");
                    write_escaped(out, v);
                }
                out.push(']');
            }
            out.push('>');
        }
        Node::Text { text, id } => {
            out.push('"');
            write_escaped(out, text);
            out.push('"');
            if !options.ignore_ids {
                let _ = write!(out, " id={}", id.0);
            }
        }
        Node::Comment { text, id } => {
            out.push_str("<!-- ");
            write_escaped(out, text);
            out.push_str(" -->");
            if !options.ignore_ids {
                let _ = write!(out, " id={}", id.0);
            }
        }
    }
}

fn write_escaped(out: &mut String, value: &str) {
    for ch in value.chars() {
        match ch {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            _ if ch.is_ascii() => out.push(ch),
            _ => {
                let _ = write!(out, "\\u{{{:X}}}", ch as u32);
            }
        }
    }
}

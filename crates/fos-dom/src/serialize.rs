//! Markup serialization (`outerHTML` / `innerHTML`)

use crate::{Document, NodeData, NodeId};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta",
    "source", "track", "wbr",
];

enum Step<'a> {
    Open(NodeId),
    Close(&'a str),
}

pub(crate) fn serialize_node(doc: &Document, id: NodeId, out: &mut String) {
    let mut stack = vec![Step::Open(id)];

    while let Some(step) = stack.pop() {
        let id = match step {
            Step::Open(id) => id,
            Step::Close(tag) => {
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
                continue;
            }
        };
        let Some(node) = doc.tree().get(id) else {
            continue;
        };

        match &node.data {
            NodeData::Document => push_children(doc, id, &mut stack),
            NodeData::Text(text) => escape_into(text, false, out),
            NodeData::Comment(text) => {
                out.push_str("<!--");
                out.push_str(text);
                out.push_str("-->");
            }
            NodeData::Element(elem) => {
                out.push('<');
                out.push_str(&elem.tag);
                for attr in elem.attrs.iter() {
                    push_attr(&attr.name, &attr.value, out);
                }
                if !elem.style.is_empty() {
                    push_attr("style", &elem.style.css_text(), out);
                }
                out.push('>');
                if VOID_ELEMENTS.contains(&elem.tag.as_str()) {
                    continue;
                }
                stack.push(Step::Close(&elem.tag));
                match elem.markup.as_deref() {
                    Some(markup) => out.push_str(markup),
                    None => push_children(doc, id, &mut stack),
                }
            }
        }
    }
}

/// Queue children so they pop in document order
fn push_children<'a>(doc: &'a Document, id: NodeId, stack: &mut Vec<Step<'a>>) {
    let children: Vec<NodeId> = doc.tree().children(id).collect();
    stack.extend(children.into_iter().rev().map(Step::Open));
}

pub(crate) fn serialize_children(doc: &Document, id: NodeId, out: &mut String) {
    if let Some(markup) = doc.tree().get(id).and_then(|n| n.as_element()).and_then(|e| e.markup.as_deref()) {
        out.push_str(markup);
        return;
    }
    for child in doc.tree().children(id) {
        serialize_node(doc, child, out);
    }
}

fn push_attr(name: &str, value: &str, out: &mut String) {
    out.push(' ');
    out.push_str(name);
    if !value.is_empty() {
        out.push_str("=\"");
        escape_into(value, true, out);
        out.push('"');
    }
}

fn escape_into(text: &str, attribute: bool, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' if attribute => out.push_str("&quot;"),
            '<' if !attribute => out.push_str("&lt;"),
            '>' if !attribute => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
}

//! Portable Text to HTML serialization
//!
//! Produces the Kontent.ai rich text dialect, so the output can be fed back into
//! the resolver: item links, assets and components are written with the same
//! `data-*` attributes the editor emits.

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::marks::{nest_marks, MarkNode};
use crate::model::{
    Block, ComponentOrItem, Image, ListType, MarkDef, PortableTextObject, Reference, Table,
    TableCell, TableRow,
};
use crate::options::HtmlOptions;

/// `type` attribute value of linked item and component placeholders
pub const OBJECT_TYPE_KENTICO: &str = "application/kenticocloud";

const STYLE_MARKS: &[&str] = &["strong", "em", "sub", "sup", "code"];

/// Serialize Portable Text objects to HTML
pub fn to_html(objects: &[PortableTextObject], options: &HtmlOptions) -> String {
    let mut output = String::with_capacity(1024);
    serialize_objects(objects, Some(options), &mut output);
    output
}

/// Serialize a sequence, grouping consecutive list item blocks into lists.
/// `options` is only passed at the top level.
fn serialize_objects(objects: &[PortableTextObject], options: Option<&HtmlOptions>, out: &mut String) {
    let pretty = options.is_some_and(|o| o.pretty);
    let mut i = 0;

    while i < objects.len() {
        if pretty && i > 0 {
            out.push('\n');
        }

        if is_list_item(&objects[i]) {
            let end = objects[i..]
                .iter()
                .position(|o| !is_list_item(o))
                .map_or(objects.len(), |p| i + p);
            let items: Vec<&Block> = objects[i..end]
                .iter()
                .filter_map(|o| match o {
                    PortableTextObject::Block(block) => Some(block),
                    _ => None,
                })
                .collect();
            serialize_list(&items, out);
            i = end;
            continue;
        }

        serialize_object(&objects[i], out);
        i += 1;
    }
}

fn is_list_item(object: &PortableTextObject) -> bool {
    matches!(object, PortableTextObject::Block(block) if block.is_list_item())
}

fn serialize_object(object: &PortableTextObject, out: &mut String) {
    match object {
        PortableTextObject::Block(block) => serialize_block(block, out),
        PortableTextObject::Span(span) => push_text(&span.text, out),
        PortableTextObject::Image(image) => serialize_image(image, out),
        PortableTextObject::ComponentOrItem(component) => serialize_component(component, out),
        PortableTextObject::Table(table) => serialize_table(table, out),
        PortableTextObject::Row(row) => serialize_row(row, out),
        PortableTextObject::Cell(cell) => serialize_cell(cell, out),
        // Mark definitions and bare references only make sense through a block
        PortableTextObject::Link(_)
        | PortableTextObject::ItemLink(_)
        | PortableTextObject::Reference(_) => {}
    }
}

fn block_tag(style: &str) -> &str {
    match style {
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => style,
        _ => "p",
    }
}

fn serialize_block(block: &Block, out: &mut String) {
    let tag = block_tag(&block.style);
    out.push('<');
    out.push_str(tag);
    out.push('>');
    serialize_spans(block, out);
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

fn list_tag(list_type: ListType) -> &'static str {
    match list_type {
        ListType::Number => "ol",
        ListType::Bullet | ListType::Unknown => "ul",
    }
}

/// Serialize a run of list item blocks, nesting by `level`.
fn serialize_list(items: &[&Block], out: &mut String) {
    let mut open: Vec<ListType> = Vec::new();

    for item in items {
        let level = item.level.unwrap_or(1).max(1) as usize;
        let list_type = item.list_item.unwrap_or(ListType::Bullet);

        while open.len() > level {
            if let Some(closed) = open.pop() {
                out.push_str("</li></");
                out.push_str(list_tag(closed));
                out.push('>');
            }
        }

        if open.len() == level {
            out.push_str("</li>");
            if open.last() != Some(&list_type) {
                if let Some(closed) = open.pop() {
                    out.push_str("</");
                    out.push_str(list_tag(closed));
                    out.push('>');
                }
            }
        }

        while open.len() < level {
            out.push('<');
            out.push_str(list_tag(list_type));
            out.push('>');
            open.push(list_type);
        }

        out.push_str("<li>");
        serialize_spans(item, out);
    }

    while let Some(closed) = open.pop() {
        out.push_str("</li></");
        out.push_str(list_tag(closed));
        out.push('>');
    }
}

fn serialize_spans(block: &Block, out: &mut String) {
    for node in nest_marks(&block.children) {
        serialize_mark_node(&node, block, out);
    }
}

fn serialize_mark_node(node: &MarkNode, block: &Block, out: &mut String) {
    match node {
        MarkNode::Text(text) => push_text(text, out),
        MarkNode::Mark { mark, children } => {
            let close = open_mark(mark, block, out);
            for child in children {
                serialize_mark_node(child, block, out);
            }
            if let Some(tag) = close {
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
        }
    }
}

/// Write the opening tag for a mark and return the tag to close it with.
/// Marks pointing at no known definition are dropped.
fn open_mark<'a>(mark: &'a str, block: &Block, out: &mut String) -> Option<&'a str> {
    if STYLE_MARKS.contains(&mark) {
        out.push('<');
        out.push_str(mark);
        out.push('>');
        return Some(mark);
    }

    match block.mark_def(mark)? {
        MarkDef::Link(link) => {
            out.push_str("<a");
            for (name, value) in &link.attributes {
                push_attr(name, value, out);
            }
            out.push('>');
        }
        MarkDef::ItemLink(link) => {
            out.push_str("<a");
            push_reference_attr("data-item-", &link.reference, out);
            out.push('>');
        }
    }
    Some("a")
}

fn serialize_image(image: &Image, out: &mut String) {
    out.push_str("<figure");
    let attr = format!("data-asset-{}", image.asset.reference_type.as_str());
    push_attr(&attr, &image.asset.reference, out);
    out.push_str("><img");
    push_attr("src", &image.asset.url, out);
    push_attr("alt", &image.asset.alt, out);
    out.push_str("></figure>");
}

fn serialize_component(component: &ComponentOrItem, out: &mut String) {
    out.push_str("<object");
    push_attr("type", OBJECT_TYPE_KENTICO, out);
    match component.data_type.as_str() {
        "component" | "link" => {
            push_attr("data-type", "item", out);
            push_attr("data-rel", &component.data_type, out);
        }
        other => push_attr("data-type", other, out),
    }
    push_reference_attr("data-", &component.component, out);
    out.push_str("></object>");
}

fn serialize_table(table: &Table, out: &mut String) {
    out.push_str("<table><tbody>");
    for row in &table.rows {
        serialize_row(row, out);
    }
    out.push_str("</tbody></table>");
}

fn serialize_row(row: &TableRow, out: &mut String) {
    out.push_str("<tr>");
    for cell in &row.cells {
        serialize_cell(cell, out);
    }
    out.push_str("</tr>");
}

fn serialize_cell(cell: &TableCell, out: &mut String) {
    out.push_str("<td>");
    serialize_objects(&cell.content, None, out);
    out.push_str("</td>");
}

fn push_text(text: &str, out: &mut String) {
    let escaped = encode_text(text);
    out.push_str(&escaped.replace('\n', "<br>"));
}

fn push_attr(name: &str, value: &str, out: &mut String) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&encode_double_quoted_attribute(value));
    out.push('"');
}

fn push_reference_attr(prefix: &str, reference: &Reference, out: &mut String) {
    let name = format!("{}{}", prefix, reference.reference_type.as_str());
    push_attr(&name, &reference.reference, out);
}

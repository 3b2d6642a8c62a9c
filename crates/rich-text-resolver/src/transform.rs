//! Convert a generic node tree into Portable Text.
//!
//! The walk is depth-first and children-first: every element's children are
//! transformed before the element itself, and the element then assembles its
//! own objects from theirs. HTML expresses structure by containment, Portable
//! Text by flat arrays plus keys, so the assembly step is where marks are
//! accumulated onto spans, links are lifted into the enclosing block's
//! `markDefs`, and nested list items are re-emitted as siblings with a `level`.

use log::trace;
use rich_text_core::{
    create_block, create_component_or_item_block, create_external_link, create_image_block,
    create_item_link, create_list_block, create_reference, create_span, create_table,
    create_table_cell, create_table_row, ExternalLink, ItemLink, KeyGenerator, ListType, MarkDef,
    PortableTextObject,
};

use crate::categorize::{categorize, Categorized};
use crate::classify::{
    require_reference, ElementKind, ASSET_REFERENCE_ATTRIBUTES, ITEM_LINK_REFERENCE_ATTRIBUTES,
    ITEM_REFERENCE_ATTRIBUTES,
};
use crate::node::{Element, Node};
use crate::Result;

/// List nesting seen from the current node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ListContext {
    depth: u32,
    list_type: ListType,
}

impl Default for ListContext {
    fn default() -> Self {
        Self {
            depth: 0,
            list_type: ListType::Unknown,
        }
    }
}

/// Transform top-level nodes into Portable Text objects, in document order.
///
/// Fails on the first unsupported tag or missing reference; there is no
/// partial result.
pub fn transform(nodes: &[Node], keys: &dyn KeyGenerator) -> Result<Vec<PortableTextObject>> {
    transform_nodes(nodes, ListContext::default(), keys)
}

fn transform_nodes(
    nodes: &[Node],
    ctx: ListContext,
    keys: &dyn KeyGenerator,
) -> Result<Vec<PortableTextObject>> {
    let mut output = Vec::new();
    for node in nodes {
        output.extend(transform_node(node, ctx, keys)?);
    }
    Ok(output)
}

fn transform_node(
    node: &Node,
    ctx: ListContext,
    keys: &dyn KeyGenerator,
) -> Result<Vec<PortableTextObject>> {
    let element = match node {
        Node::Text(content) => {
            let span = create_span(keys.next_key(), Vec::new(), content);
            return Ok(vec![PortableTextObject::Span(span)]);
        }
        Node::Element(element) => element,
    };

    let kind = ElementKind::classify(element)?;
    let ctx = match kind {
        ElementKind::List(list_type) => ListContext {
            depth: ctx.depth + 1,
            list_type,
        },
        _ => ctx,
    };
    trace!(
        "<{}> as {:?} (list depth {})",
        element.tag_name,
        kind,
        ctx.depth
    );

    let children = transform_nodes(&element.children, ctx, keys)?;

    match kind {
        ElementKind::Block => Ok(process_block(element, children, keys)),
        ElementKind::Mark | ElementKind::ExternalLink | ElementKind::ItemLink => {
            process_mark(element, kind, children, keys)
        }
        ElementKind::List(_) | ElementKind::PassThrough => Ok(children),
        ElementKind::ListItem => Ok(process_list_item(children, ctx, keys)),
        ElementKind::LineBreak => {
            let span = create_span(keys.next_key(), Vec::new(), "\n");
            Ok(vec![PortableTextObject::Span(span)])
        }
        ElementKind::Image => process_image(element, children, keys),
        ElementKind::LinkedItemOrComponent => {
            process_linked_item_or_component(element, children, keys)
        }
        ElementKind::Table => Ok(process_table(children, keys)),
        ElementKind::TableRow => Ok(process_table_row(children, keys)),
        ElementKind::TableCell => Ok(process_table_cell(children, keys)),
    }
}

/// External links first, then item links, each in encounter order
fn mark_defs(links: Vec<ExternalLink>, content_item_links: Vec<ItemLink>) -> Vec<MarkDef> {
    links
        .into_iter()
        .map(MarkDef::Link)
        .chain(content_item_links.into_iter().map(MarkDef::ItemLink))
        .collect()
}

fn process_block(
    element: &Element,
    children: Vec<PortableTextObject>,
    keys: &dyn KeyGenerator,
) -> Vec<PortableTextObject> {
    let Categorized {
        spans,
        links,
        content_item_links,
        ..
    } = categorize(children);
    let style = match element.tag_name.as_str() {
        "p" => "normal",
        heading => heading,
    };

    let block = create_block(keys.next_key(), mark_defs(links, content_item_links), style, spans);
    vec![PortableTextObject::Block(block)]
}

/// Append this element's mark to every span below it.
///
/// Style elements mark with their tag name; links create a mark definition whose
/// key becomes the mark. Definitions from deeper links pass through unchanged.
fn process_mark(
    element: &Element,
    kind: ElementKind,
    children: Vec<PortableTextObject>,
    keys: &dyn KeyGenerator,
) -> Result<Vec<PortableTextObject>> {
    let Categorized {
        spans,
        links,
        content_item_links,
        ..
    } = categorize(children);

    let (mark, definition) = match kind {
        ElementKind::ExternalLink => {
            let key = keys.next_key();
            let link = create_external_link(key.clone(), element.attributes.clone());
            (key, Some(PortableTextObject::Link(link)))
        }
        ElementKind::ItemLink => {
            let (reference, reference_type) =
                require_reference(element, &ITEM_LINK_REFERENCE_ATTRIBUTES)?;
            let key = keys.next_key();
            let link = create_item_link(key.clone(), reference, reference_type);
            (key, Some(PortableTextObject::ItemLink(link)))
        }
        _ => (element.tag_name.clone(), None),
    };

    let mut output: Vec<PortableTextObject> = spans
        .into_iter()
        .map(|mut span| {
            span.marks.push(mark.clone());
            PortableTextObject::Span(span)
        })
        .collect();
    output.extend(links.into_iter().map(PortableTextObject::Link));
    output.extend(content_item_links.into_iter().map(PortableTextObject::ItemLink));
    output.extend(definition);

    Ok(output)
}

/// One list block for the item itself, followed by the items nested inside it.
///
/// A list item holds inline content and nested lists only. Paragraphs, images,
/// components and tables inside an item have no place in a list block and are
/// dropped.
fn process_list_item(
    children: Vec<PortableTextObject>,
    ctx: ListContext,
    keys: &dyn KeyGenerator,
) -> Vec<PortableTextObject> {
    let Categorized {
        spans,
        links,
        content_item_links,
        list_blocks,
        blocks,
        images,
        components_or_items,
        tables,
        ..
    } = categorize(children);

    let dropped = blocks.len() + images.len() + components_or_items.len() + tables.len();
    if dropped > 0 {
        trace!("dropping {dropped} non-inline objects inside <li>");
    }

    let block = create_list_block(
        keys.next_key(),
        ctx.depth,
        ctx.list_type,
        mark_defs(links, content_item_links),
        "normal",
        spans,
    );

    let mut output = Vec::with_capacity(list_blocks.len() + 1);
    output.push(PortableTextObject::Block(block));
    output.extend(list_blocks.into_iter().map(PortableTextObject::Block));
    output
}

fn process_image(
    element: &Element,
    children: Vec<PortableTextObject>,
    keys: &dyn KeyGenerator,
) -> Result<Vec<PortableTextObject>> {
    let (reference, reference_type) = require_reference(element, &ASSET_REFERENCE_ATTRIBUTES)?;
    let img = element.element_children().find(|child| child.tag_name == "img");
    let url = img.and_then(|img| img.attr("src")).unwrap_or_default();
    let alt = img.and_then(|img| img.attr("alt")).unwrap_or_default();

    let image = create_image_block(keys.next_key(), reference, url, reference_type, alt);
    Ok(followed_by(PortableTextObject::Image(image), children))
}

fn process_linked_item_or_component(
    element: &Element,
    children: Vec<PortableTextObject>,
    keys: &dyn KeyGenerator,
) -> Result<Vec<PortableTextObject>> {
    let (reference, reference_type) = require_reference(element, &ITEM_REFERENCE_ATTRIBUTES)?;
    let data_type = element
        .attr("data-rel")
        .or_else(|| element.attr("data-type"))
        .unwrap_or_default();

    let component = create_component_or_item_block(
        keys.next_key(),
        create_reference(reference, reference_type),
        data_type,
    );
    Ok(followed_by(PortableTextObject::ComponentOrItem(component), children))
}

/// Placeholders have no content of their own; whatever a parser nested inside one
/// follows it. html5ever does this for `<object/>`, which is not a void element.
fn followed_by(
    object: PortableTextObject,
    children: Vec<PortableTextObject>,
) -> Vec<PortableTextObject> {
    let mut output = Vec::with_capacity(children.len() + 1);
    output.push(object);
    output.extend(children);
    output
}

fn process_table(children: Vec<PortableTextObject>, keys: &dyn KeyGenerator) -> Vec<PortableTextObject> {
    let Categorized { rows, .. } = categorize(children);
    vec![PortableTextObject::Table(create_table(keys.next_key(), rows))]
}

fn process_table_row(
    children: Vec<PortableTextObject>,
    keys: &dyn KeyGenerator,
) -> Vec<PortableTextObject> {
    let Categorized { cells, .. } = categorize(children);
    vec![PortableTextObject::Row(create_table_row(keys.next_key(), cells))]
}

/// Inline content directly in a cell is wrapped in a normal block; nested
/// blocks are kept as they are.
fn process_table_cell(
    children: Vec<PortableTextObject>,
    keys: &dyn KeyGenerator,
) -> Vec<PortableTextObject> {
    let has_inline = children
        .iter()
        .any(|child| matches!(child, PortableTextObject::Span(_)));

    let content = if has_inline {
        let Categorized {
            spans,
            links,
            content_item_links,
            ..
        } = categorize(children);
        let block = create_block(keys.next_key(), mark_defs(links, content_item_links), "normal", spans);
        vec![PortableTextObject::Block(block)]
    } else {
        children
    };

    vec![PortableTextObject::Cell(create_table_cell(keys.next_key(), content))]
}

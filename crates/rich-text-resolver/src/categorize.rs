//! Partition transformed children by object type.

use rich_text_core::{
    Block, ComponentOrItem, ExternalLink, Image, ItemLink, PortableTextObject, Reference, Span,
    Table, TableCell, TableRow,
};

/// Children of an element, bucketed by `_type` in encounter order
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Categorized {
    pub spans: Vec<Span>,
    pub links: Vec<ExternalLink>,
    pub content_item_links: Vec<ItemLink>,
    /// Blocks carrying `listItem`
    pub list_blocks: Vec<Block>,
    pub blocks: Vec<Block>,
    pub cells: Vec<TableCell>,
    pub rows: Vec<TableRow>,
    pub images: Vec<Image>,
    pub components_or_items: Vec<ComponentOrItem>,
    pub tables: Vec<Table>,
    pub references: Vec<Reference>,
}

/// Partition `items` in a single pass
pub fn categorize(items: Vec<PortableTextObject>) -> Categorized {
    let mut categorized = Categorized::default();

    for item in items {
        match item {
            PortableTextObject::Span(span) => categorized.spans.push(span),
            PortableTextObject::Link(link) => categorized.links.push(link),
            PortableTextObject::ItemLink(link) => categorized.content_item_links.push(link),
            PortableTextObject::Block(block) if block.is_list_item() => {
                categorized.list_blocks.push(block)
            }
            PortableTextObject::Block(block) => categorized.blocks.push(block),
            PortableTextObject::Cell(cell) => categorized.cells.push(cell),
            PortableTextObject::Row(row) => categorized.rows.push(row),
            PortableTextObject::Image(image) => categorized.images.push(image),
            PortableTextObject::ComponentOrItem(component) => {
                categorized.components_or_items.push(component)
            }
            PortableTextObject::Table(table) => categorized.tables.push(table),
            PortableTextObject::Reference(reference) => categorized.references.push(reference),
        }
    }

    categorized
}

//! Constructors for every Portable Text object shape.
//!
//! Factories never generate keys themselves; callers pass one in, usually from a
//! [`KeyGenerator`](crate::KeyGenerator).

use indexmap::IndexMap;

use crate::model::{
    AssetReference, Block, ComponentOrItem, ExternalLink, Image, ItemLink, ListType, MarkDef,
    PortableTextObject, Reference, ReferenceKind, Span, Table, TableCell, TableRow,
};

pub fn create_span(key: String, marks: Vec<String>, text: &str) -> Span {
    Span {
        key,
        marks,
        text: text.to_string(),
    }
}

pub fn create_block(key: String, mark_defs: Vec<MarkDef>, style: &str, children: Vec<Span>) -> Block {
    Block {
        key,
        mark_defs,
        style: style.to_string(),
        children,
        list_item: None,
        level: None,
    }
}

pub fn create_list_block(
    key: String,
    level: u32,
    list_item: ListType,
    mark_defs: Vec<MarkDef>,
    style: &str,
    children: Vec<Span>,
) -> Block {
    Block {
        key,
        mark_defs,
        style: style.to_string(),
        children,
        list_item: Some(list_item),
        level: Some(level),
    }
}

pub fn create_external_link(key: String, attributes: IndexMap<String, String>) -> ExternalLink {
    ExternalLink { key, attributes }
}

pub fn create_reference(reference: &str, reference_type: ReferenceKind) -> Reference {
    Reference {
        reference: reference.to_string(),
        reference_type,
    }
}

pub fn create_item_link(key: String, reference: &str, reference_type: ReferenceKind) -> ItemLink {
    ItemLink {
        key,
        reference: create_reference(reference, reference_type),
    }
}

pub fn create_image_block(
    key: String,
    reference: &str,
    url: &str,
    reference_type: ReferenceKind,
    alt: &str,
) -> Image {
    Image {
        key,
        asset: AssetReference {
            reference: reference.to_string(),
            reference_type,
            url: url.to_string(),
            alt: alt.to_string(),
        },
    }
}

pub fn create_component_or_item_block(
    key: String,
    reference: Reference,
    data_type: &str,
) -> ComponentOrItem {
    ComponentOrItem {
        key,
        component: reference,
        data_type: data_type.to_string(),
    }
}

pub fn create_table(key: String, rows: Vec<TableRow>) -> Table {
    Table { key, rows }
}

pub fn create_table_row(key: String, cells: Vec<TableCell>) -> TableRow {
    TableRow { key, cells }
}

pub fn create_table_cell(key: String, content: Vec<PortableTextObject>) -> TableCell {
    TableCell { key, content }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::{KeyGenerator, SequentialKeys};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_list_block_carries_level() {
        let keys = SequentialKeys::new();
        let span = create_span(keys.next_key(), vec![], "one");
        let block = create_list_block(keys.next_key(), 2, ListType::Number, vec![], "normal", vec![span]);

        assert_eq!(block.key, "1");
        assert_eq!(block.level, Some(2));
        assert_eq!(block.list_item, Some(ListType::Number));
        assert!(block.is_list_item());
        assert_eq!(block.children[0].key, "0");
    }

    #[test]
    fn test_item_link_reference() {
        let link = create_item_link("l".to_string(), "about-us", ReferenceKind::Codename);
        assert_eq!(link.reference.reference, "about-us");
        assert_eq!(link.reference.reference_type, ReferenceKind::Codename);
    }

    #[test]
    fn test_table_cell_counts_blocks() {
        let block = create_block("b".to_string(), vec![], "normal", vec![]);
        let cell = create_table_cell("c".to_string(), vec![PortableTextObject::Block(block)]);
        assert_eq!(cell.child_blocks_count(), 1);
    }
}

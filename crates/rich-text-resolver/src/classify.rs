//! Node classification for the rich text vocabulary.
//!
//! Predicates answer questions about a single element from its tag name and
//! attributes only. [`ElementKind::classify`] folds them into one closed enum
//! that the transformer matches on.

use rich_text_core::{ListType, ReferenceKind, OBJECT_TYPE_KENTICO};

use crate::node::Element;
use crate::{ResolverError, Result};

/// Paragraph and heading elements
pub const BLOCK_ELEMENTS: &[&str] = &["p", "h1", "h2", "h3", "h4", "h5", "h6"];

/// Inline style elements that become literal marks
pub const MARK_ELEMENTS: &[&str] = &["strong", "em", "sub", "sup", "code"];

/// Structural elements with no output of their own
pub const PASS_THROUGH_ELEMENTS: &[&str] = &["tbody", "img"];

/// Ordered `(attribute, kind)` pairs; the first attribute present wins
pub type ReferenceAttributes = [(&'static str, ReferenceKind); 3];

pub const ASSET_REFERENCE_ATTRIBUTES: ReferenceAttributes = [
    ("data-asset-id", ReferenceKind::Id),
    ("data-asset-external-id", ReferenceKind::ExternalId),
    ("data-asset-codename", ReferenceKind::Codename),
];

pub const ITEM_REFERENCE_ATTRIBUTES: ReferenceAttributes = [
    ("data-id", ReferenceKind::Id),
    ("data-external-id", ReferenceKind::ExternalId),
    ("data-codename", ReferenceKind::Codename),
];

pub const ITEM_LINK_REFERENCE_ATTRIBUTES: ReferenceAttributes = [
    ("data-item-id", ReferenceKind::Id),
    ("data-item-external-id", ReferenceKind::ExternalId),
    ("data-item-codename", ReferenceKind::Codename),
];

pub fn is_block_element(element: &Element) -> bool {
    BLOCK_ELEMENTS.contains(&element.tag_name.as_str())
}

pub fn is_mark_element(element: &Element) -> bool {
    MARK_ELEMENTS.contains(&element.tag_name.as_str())
}

pub fn is_list_block(element: &Element) -> bool {
    matches!(element.tag_name.as_str(), "ol" | "ul")
}

pub fn is_list_item(element: &Element) -> bool {
    element.tag_name == "li"
}

pub fn is_line_break(element: &Element) -> bool {
    element.tag_name == "br"
}

pub fn is_table(element: &Element) -> bool {
    element.tag_name == "table"
}

pub fn is_table_row(element: &Element) -> bool {
    element.tag_name == "tr"
}

pub fn is_table_cell(element: &Element) -> bool {
    element.tag_name == "td"
}

pub fn is_anchor(element: &Element) -> bool {
    element.tag_name == "a"
}

fn has_any(element: &Element, attributes: &ReferenceAttributes) -> bool {
    attributes.iter().any(|(name, _)| element.has_attr(name))
}

/// Anchor pointing at a content item
pub fn is_item_link(element: &Element) -> bool {
    is_anchor(element) && has_any(element, &ITEM_LINK_REFERENCE_ATTRIBUTES)
}

/// Any other anchor: web, asset, email and phone links alike
pub fn is_external_link(element: &Element) -> bool {
    is_anchor(element) && !is_item_link(element)
}

/// Asset figure
pub fn is_image(element: &Element) -> bool {
    element.tag_name == "figure" && has_any(element, &ASSET_REFERENCE_ATTRIBUTES)
}

/// Linked item or component placeholder
pub fn is_linked_item_or_component(element: &Element) -> bool {
    element.tag_name == "object" && element.attr("type") == Some(OBJECT_TYPE_KENTICO)
}

pub fn is_pass_through(element: &Element) -> bool {
    PASS_THROUGH_ELEMENTS.contains(&element.tag_name.as_str())
}

/// Resolve a reference from the first attribute of `attributes` present on `element`
pub fn resolve_reference<'a>(
    element: &'a Element,
    attributes: &ReferenceAttributes,
) -> Option<(&'a str, ReferenceKind)> {
    attributes
        .iter()
        .find_map(|(name, kind)| element.attr(name).map(|value| (value, *kind)))
}

/// Like [`resolve_reference`], but a missing reference is an error
pub fn require_reference<'a>(
    element: &'a Element,
    attributes: &ReferenceAttributes,
) -> Result<(&'a str, ReferenceKind)> {
    resolve_reference(element, attributes).ok_or_else(|| ResolverError::MissingReference {
        tag: element.tag_name.clone(),
        expected: attributes
            .iter()
            .map(|(name, _)| *name)
            .collect::<Vec<_>>()
            .join(", "),
    })
}

/// What an element turns into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Block,
    Mark,
    ExternalLink,
    ItemLink,
    List(ListType),
    ListItem,
    LineBreak,
    /// `figure`; the asset reference is checked when the image is built
    Image,
    LinkedItemOrComponent,
    Table,
    TableRow,
    TableCell,
    PassThrough,
}

impl ElementKind {
    /// Classify an element, failing on anything outside the rich text vocabulary
    pub fn classify(element: &Element) -> Result<Self> {
        let kind = match element.tag_name.as_str() {
            "ul" => ElementKind::List(ListType::Bullet),
            "ol" => ElementKind::List(ListType::Number),
            "figure" => ElementKind::Image,
            _ if is_block_element(element) => ElementKind::Block,
            _ if is_mark_element(element) => ElementKind::Mark,
            _ if is_item_link(element) => ElementKind::ItemLink,
            _ if is_external_link(element) => ElementKind::ExternalLink,
            _ if is_list_item(element) => ElementKind::ListItem,
            _ if is_line_break(element) => ElementKind::LineBreak,
            _ if is_linked_item_or_component(element) => ElementKind::LinkedItemOrComponent,
            _ if is_table(element) => ElementKind::Table,
            _ if is_table_row(element) => ElementKind::TableRow,
            _ if is_table_cell(element) => ElementKind::TableCell,
            _ if is_pass_through(element) => ElementKind::PassThrough,
            other => return Err(ResolverError::UnsupportedTag(other.to_string())),
        };
        Ok(kind)
    }
}

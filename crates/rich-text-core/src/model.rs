//! Portable Text object model
//!
//! This module defines the objects a rich text document is transformed into.
//! Every object serializes with a `_type` discriminator and a `_key`, matching the
//! JSON shape consumed by Portable Text renderers.

use indexmap::IndexMap;
use serde::Serialize;

/// Any object that can appear in a Portable Text array.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PortableTextObject {
    Block(Block),
    Span(Span),
    Link(ExternalLink),
    ItemLink(ItemLink),
    Image(Image),
    ComponentOrItem(ComponentOrItem),
    Table(Table),
    Row(TableRow),
    Cell(TableCell),
    Reference(Reference),
}

impl PortableTextObject {
    /// The `_type` discriminator this object serializes with.
    pub fn type_name(&self) -> &'static str {
        match self {
            PortableTextObject::Block(_) => "block",
            PortableTextObject::Span(_) => "span",
            PortableTextObject::Link(_) => "link",
            PortableTextObject::ItemLink(_) => "contentItemLink",
            PortableTextObject::Image(_) => "image",
            PortableTextObject::ComponentOrItem(_) => "componentOrItem",
            PortableTextObject::Table(_) => "table",
            PortableTextObject::Row(_) => "row",
            PortableTextObject::Cell(_) => "cell",
            PortableTextObject::Reference(_) => "reference",
        }
    }

    /// The `_key` of this object. Bare references are payloads and carry none.
    pub fn key(&self) -> Option<&str> {
        match self {
            PortableTextObject::Block(o) => Some(&o.key),
            PortableTextObject::Span(o) => Some(&o.key),
            PortableTextObject::Link(o) => Some(&o.key),
            PortableTextObject::ItemLink(o) => Some(&o.key),
            PortableTextObject::Image(o) => Some(&o.key),
            PortableTextObject::ComponentOrItem(o) => Some(&o.key),
            PortableTextObject::Table(o) => Some(&o.key),
            PortableTextObject::Row(o) => Some(&o.key),
            PortableTextObject::Cell(o) => Some(&o.key),
            PortableTextObject::Reference(_) => None,
        }
    }
}

/// The way a content item or asset is addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ReferenceKind {
    #[serde(rename = "id")]
    Id,
    #[serde(rename = "external-id")]
    ExternalId,
    #[serde(rename = "codename")]
    Codename,
}

impl ReferenceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReferenceKind::Id => "id",
            ReferenceKind::ExternalId => "external-id",
            ReferenceKind::Codename => "codename",
        }
    }
}

/// List flavour of a list item block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListType {
    Number,
    Bullet,
    /// Emitted only for list items found outside of any `ol`/`ul`
    Unknown,
}

/// Paragraph, heading or list item
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "_type", rename = "block", rename_all = "camelCase")]
pub struct Block {
    #[serde(rename = "_key")]
    pub key: String,
    pub mark_defs: Vec<MarkDef>,
    pub style: String,
    pub children: Vec<Span>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_item: Option<ListType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
}

impl Block {
    pub fn is_list_item(&self) -> bool {
        self.list_item.is_some()
    }

    /// Find the mark definition a span mark points to
    pub fn mark_def(&self, mark: &str) -> Option<&MarkDef> {
        self.mark_defs.iter().find(|def| def.key() == mark)
    }
}

/// Inline text run
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "_type", rename = "span")]
pub struct Span {
    #[serde(rename = "_key")]
    pub key: String,
    pub marks: Vec<String>,
    pub text: String,
}

/// Block-scoped definition referenced from span marks
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MarkDef {
    Link(ExternalLink),
    ItemLink(ItemLink),
}

impl MarkDef {
    pub fn key(&self) -> &str {
        match self {
            MarkDef::Link(link) => &link.key,
            MarkDef::ItemLink(link) => &link.key,
        }
    }
}

/// Link to anything that is not a content item (web, asset, email, phone)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "_type", rename = "link")]
pub struct ExternalLink {
    #[serde(rename = "_key")]
    pub key: String,
    /// HTML attributes of the anchor, in document order
    #[serde(flatten)]
    pub attributes: IndexMap<String, String>,
}

impl ExternalLink {
    pub fn href(&self) -> Option<&str> {
        self.attributes.get("href").map(String::as_str)
    }
}

/// Link to a content item
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "_type", rename = "contentItemLink")]
pub struct ItemLink {
    #[serde(rename = "_key")]
    pub key: String,
    pub reference: Reference,
}

/// Reference payload pointing at another entity
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "_type", rename = "reference", rename_all = "camelCase")]
pub struct Reference {
    #[serde(rename = "_ref")]
    pub reference: String,
    pub reference_type: ReferenceKind,
}

/// Inline asset
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "_type", rename = "image")]
pub struct Image {
    #[serde(rename = "_key")]
    pub key: String,
    pub asset: AssetReference,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "_type", rename = "reference", rename_all = "camelCase")]
pub struct AssetReference {
    #[serde(rename = "_ref")]
    pub reference: String,
    pub reference_type: ReferenceKind,
    pub url: String,
    pub alt: String,
}

/// Embedded linked item or component
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "_type", rename = "componentOrItem", rename_all = "camelCase")]
pub struct ComponentOrItem {
    #[serde(rename = "_key")]
    pub key: String,
    pub component: Reference,
    /// `data-rel` of the placeholder when present, otherwise `data-type`
    pub data_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "_type", rename = "table")]
pub struct Table {
    #[serde(rename = "_key")]
    pub key: String,
    pub rows: Vec<TableRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "_type", rename = "row")]
pub struct TableRow {
    #[serde(rename = "_key")]
    pub key: String,
    pub cells: Vec<TableCell>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "_type", rename = "cell")]
pub struct TableCell {
    #[serde(rename = "_key")]
    pub key: String,
    pub content: Vec<PortableTextObject>,
}

impl TableCell {
    pub fn child_blocks_count(&self) -> usize {
        self.content.len()
    }
}

/// Serialize a Portable Text array to its JSON form
pub fn to_json(objects: &[PortableTextObject]) -> serde_json::Result<serde_json::Value> {
    serde_json::to_value(objects)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_list_block_json_shape() {
        let block = Block {
            key: "b1".to_string(),
            mark_defs: vec![],
            style: "normal".to_string(),
            children: vec![Span {
                key: "s1".to_string(),
                marks: vec!["strong".to_string()],
                text: "item".to_string(),
            }],
            list_item: Some(ListType::Bullet),
            level: Some(1),
        };

        assert_eq!(
            to_json(&[PortableTextObject::Block(block)]).unwrap(),
            json!([{
                "_type": "block",
                "_key": "b1",
                "markDefs": [],
                "style": "normal",
                "children": [{ "_type": "span", "_key": "s1", "marks": ["strong"], "text": "item" }],
                "listItem": "bullet",
                "level": 1
            }])
        );
    }

    #[test]
    fn test_plain_block_omits_list_fields() {
        let block = Block {
            key: "b1".to_string(),
            mark_defs: vec![],
            style: "h2".to_string(),
            children: vec![],
            list_item: None,
            level: None,
        };

        let value = serde_json::to_value(&block).unwrap();
        assert!(value.get("listItem").is_none());
        assert!(value.get("level").is_none());
        assert_eq!(value["style"], "h2");
    }

    #[test]
    fn test_external_link_flattens_attributes() {
        let mut attributes = IndexMap::new();
        attributes.insert("href".to_string(), "https://kontent.ai".to_string());
        attributes.insert("data-new-window".to_string(), "true".to_string());
        let link = ExternalLink {
            key: "l1".to_string(),
            attributes,
        };

        assert_eq!(
            serde_json::to_value(&link).unwrap(),
            json!({
                "_type": "link",
                "_key": "l1",
                "href": "https://kontent.ai",
                "data-new-window": "true"
            })
        );
        assert_eq!(link.href(), Some("https://kontent.ai"));
    }

    #[test]
    fn test_image_asset_reference() {
        let image = Image {
            key: "i1".to_string(),
            asset: AssetReference {
                reference: "asset-id".to_string(),
                reference_type: ReferenceKind::ExternalId,
                url: "https://assets/x.png".to_string(),
                alt: "x".to_string(),
            },
        };

        assert_eq!(
            serde_json::to_value(&image).unwrap(),
            json!({
                "_type": "image",
                "_key": "i1",
                "asset": {
                    "_type": "reference",
                    "_ref": "asset-id",
                    "referenceType": "external-id",
                    "url": "https://assets/x.png",
                    "alt": "x"
                }
            })
        );
    }

    #[test]
    fn test_type_names() {
        let span = PortableTextObject::Span(Span {
            key: "k".to_string(),
            marks: vec![],
            text: String::new(),
        });
        assert_eq!(span.type_name(), "span");
        assert_eq!(span.key(), Some("k"));
        assert_eq!(ReferenceKind::Codename.as_str(), "codename");
    }

    #[test]
    fn test_to_json_returns_result() {
        assert_eq!(to_json(&[]).unwrap(), json!([]));

        let reference = PortableTextObject::Reference(Reference {
            reference: "r".to_string(),
            reference_type: ReferenceKind::Id,
        });
        let value = to_json(&[reference]).unwrap();
        assert_eq!(value, json!([{ "_type": "reference", "_ref": "r", "referenceType": "id" }]));
    }
}

//! rich-text-core - Portable Text model and serialization
//!
//! This crate provides the Portable Text object model produced from Kontent.ai
//! rich text, the factories that build it, and serializers back to HTML and
//! Markdown. It is used by `rich-text-resolver`, which parses rich text HTML.
//!
//! # Architecture
//!
//! ```text
//!                            ┌─────────────────┐ ──▶ HTML (Kontent.ai dialect)
//! rich-text-resolver ──────▶ │  Portable Text  │
//!                            │                 │ ──▶ Markdown
//!                            └─────────────────┘ ──▶ JSON
//! ```
//!
//! # Example
//!
//! ```rust
//! use rich_text_core::{create_block, create_span, to_markdown, MarkdownOptions, PortableTextObject};
//!
//! let block = create_block(
//!     "block-1".to_string(),
//!     vec![],
//!     "h1",
//!     vec![create_span("span-1".to_string(), vec![], "Hello World")],
//! );
//!
//! let markdown = to_markdown(&[PortableTextObject::Block(block)], &MarkdownOptions::default());
//! assert_eq!(markdown, "# Hello World");
//! ```

mod factory;
mod html;
mod key;
mod markdown;
mod marks;
mod model;
mod options;

pub use factory::{
    create_block, create_component_or_item_block, create_external_link, create_image_block,
    create_item_link, create_list_block, create_reference, create_span, create_table,
    create_table_cell, create_table_row,
};
pub use html::{to_html, OBJECT_TYPE_KENTICO};
pub use key::{KeyGenerator, SequentialKeys, UuidKeys};
pub use markdown::to_markdown;
pub use model::{
    to_json, AssetReference, Block, ComponentOrItem, ExternalLink, Image, ItemLink, ListType,
    MarkDef, PortableTextObject, Reference, ReferenceKind, Span, Table, TableCell, TableRow,
};
pub use options::{HeadingStyle, HtmlOptions, MarkdownOptions};

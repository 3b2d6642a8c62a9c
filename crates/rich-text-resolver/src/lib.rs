//! # rich-text-resolver
//!
//! Convert Kontent.ai rich text HTML into [Portable Text](https://portabletext.org).
//!
//! Rich text from the Delivery and Management APIs is a restricted HTML dialect:
//! paragraphs, headings, inline styles, links to the web and to content items,
//! lists, tables, asset figures and `<object>` placeholders for components and
//! linked items. This crate parses it into a generic [`Node`] tree and
//! transforms that tree into the flat, keyed object array defined by
//! [`rich_text_core`].
//!
//! ## Design
//!
//! ```text
//! HTML ──▶ normalize ──▶ engine (html5ever | tl) ──▶ Node tree ──▶ transform ──▶ Portable Text
//! ```
//!
//! - **Parser agnostic**: both engines convert to the same [`Node`] structure,
//!   and a caller holding a DOM already can call [`RichTextResolver::transform_nodes`]
//! - **Strict vocabulary**: any element outside the rich text dialect is an error
//! - **Injected keys**: random by default, sequential for reproducible output
//!
//! ## Example
//!
//! ```rust
//! use rich_text_resolver::{RichTextResolver, PortableTextObject, SequentialKeys};
//!
//! let resolver = RichTextResolver::new().with_key_generator(SequentialKeys::new());
//! let objects = resolver.transform("<p>Hello <strong>World</strong></p>").unwrap();
//!
//! let PortableTextObject::Block(block) = &objects[0] else { unreachable!() };
//! assert_eq!(block.style, "normal");
//! assert_eq!(block.children[1].marks, vec!["strong"]);
//! ```

pub mod categorize;
pub mod classify;
pub mod engine;
#[cfg(feature = "html")]
pub mod html;
pub mod node;
mod service;
#[cfg(feature = "tl")]
pub mod tl_dom;
mod transform;

pub use categorize::{categorize, Categorized};
pub use classify::ElementKind;
pub use engine::{normalize_html, ParserEngine};
pub use node::{Element, Node};
pub use rich_text_core::*;
pub use service::{transform_to_portable_text, ResolverOptions, RichTextResolver};
pub use transform::transform;

/// Error type for rich text resolution
#[derive(Debug, thiserror::Error)]
pub enum ResolverError {
    #[error("Unsupported tag encountered: <{0}>")]
    UnsupportedTag(String),

    #[error("Missing reference on <{tag}>: expected one of {expected}")]
    MissingReference { tag: String, expected: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Parser engine not compiled in: {0}")]
    EngineUnavailable(&'static str),
}

pub type Result<T> = std::result::Result<T, ResolverError>;

//! RichTextResolver - the main entry point for rich text to Portable Text conversion.

use log::debug;
use rich_text_core::{
    to_html, to_markdown, HtmlOptions, KeyGenerator, MarkdownOptions, PortableTextObject, UuidKeys,
};

use crate::engine::ParserEngine;
use crate::node::Node;
use crate::transform::transform;
use crate::Result;

/// Options for RichTextResolver
#[derive(Debug, Clone, Default)]
pub struct ResolverOptions {
    /// HTML engine used by [`RichTextResolver::parse`] and [`RichTextResolver::transform`]
    pub engine: ParserEngine,
}

/// The main service for converting rich text HTML to Portable Text
pub struct RichTextResolver {
    options: ResolverOptions,
    keys: Box<dyn KeyGenerator>,
}

impl std::fmt::Debug for RichTextResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RichTextResolver")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Default for RichTextResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl RichTextResolver {
    /// Create a new RichTextResolver with default options and random keys
    pub fn new() -> Self {
        Self::with_options(ResolverOptions::default())
    }

    /// Create a RichTextResolver with custom options
    pub fn with_options(options: ResolverOptions) -> Self {
        Self {
            options,
            keys: Box::new(UuidKeys),
        }
    }

    /// Replace the key generator, e.g. with [`rich_text_core::SequentialKeys`] for
    /// reproducible output
    pub fn with_key_generator<K: KeyGenerator + 'static>(mut self, keys: K) -> Self {
        self.keys = Box::new(keys);
        self
    }

    /// Normalize and parse rich text HTML into top-level nodes
    pub fn parse(&self, html: &str) -> Result<Vec<Node>> {
        self.options.engine.parse(html)
    }

    /// Convert rich text HTML to Portable Text
    pub fn transform(&self, html: &str) -> Result<Vec<PortableTextObject>> {
        debug!(
            "Transforming {} bytes of rich text with {}",
            html.len(),
            self.options.engine.name()
        );
        let nodes = self.parse(html)?;
        let output = self.transform_nodes(&nodes)?;
        debug!("Produced {} top-level objects", output.len());
        Ok(output)
    }

    /// Convert an already parsed node tree to Portable Text
    pub fn transform_nodes(&self, nodes: &[Node]) -> Result<Vec<PortableTextObject>> {
        transform(nodes, self.keys.as_ref())
    }

    /// Render Portable Text back to rich text HTML
    pub fn to_html(&self, objects: &[PortableTextObject], options: &HtmlOptions) -> String {
        to_html(objects, options)
    }

    /// Render Portable Text as Markdown
    pub fn to_markdown(&self, objects: &[PortableTextObject], options: &MarkdownOptions) -> String {
        to_markdown(objects, options)
    }

    /// Get the current options
    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    /// Get mutable access to options
    pub fn options_mut(&mut self) -> &mut ResolverOptions {
        &mut self.options
    }
}

/// Convert rich text HTML to Portable Text with the default resolver
pub fn transform_to_portable_text(html: &str) -> Result<Vec<PortableTextObject>> {
    RichTextResolver::new().transform(html)
}

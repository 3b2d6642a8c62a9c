//! HTML parsing via the tl parser.
//!
//! tl is a fast, headless parser. Unlike html5ever it keeps entities encoded,
//! attribute names as written and attributes unordered, so values are decoded,
//! names lowercased and document order restored here to give the same [`Node`] tree.

use html_escape::decode_html_entities;
use tl::{HTMLTag, NodeHandle, Parser, ParserOptions};

use crate::node::{Element, Node};
use crate::{ResolverError, Result};

/// Parse an HTML fragment into its top-level nodes using tl.
pub fn parse_html(html: &str) -> Result<Vec<Node>> {
    let dom = tl::parse(html, ParserOptions::default())
        .map_err(|e| ResolverError::Parse(format!("{e:?}")))?;
    let parser = dom.parser();

    Ok(convert_handles(parser, dom.children()))
}

fn convert_handles(parser: &Parser, handles: &[NodeHandle]) -> Vec<Node> {
    let mut nodes = Vec::new();

    for handle in handles {
        match handle.get(parser) {
            Some(tl::Node::Tag(tag)) => nodes.push(convert_tag(parser, tag)),
            Some(tl::Node::Raw(text)) => {
                let text_str = text.as_utf8_str();
                if !text_str.is_empty() {
                    nodes.push(Node::text(&decode_html_entities(&text_str)));
                }
            }
            _ => {}
        }
    }

    nodes
}

fn convert_tag(parser: &Parser, tag: &HTMLTag) -> Node {
    // `<br/>` comes through with the slash as part of the name
    let name = tag.name().as_utf8_str();
    let mut element = Element::new(name.trim_end_matches('/'));

    // tl stores attributes in a hash map, so the order comes from the markup
    let order = attribute_order(&tag.raw().as_utf8_str());
    let mut attributes: Vec<(String, String)> = tag
        .attributes()
        .iter()
        .map(|(name, value)| {
            let value = value.as_deref().unwrap_or("");
            (name.to_lowercase(), decode_html_entities(value).into_owned())
        })
        .collect();
    attributes.sort_by_key(|(name, _)| order.iter().position(|n| n == name).unwrap_or(usize::MAX));

    for (name, value) in attributes {
        element.set_attr(&name, &value);
    }

    let children = tag.children();
    element.children = convert_handles(parser, children.top().as_slice());

    Node::Element(element)
}

fn is_delimiter(c: char) -> bool {
    c.is_ascii_whitespace() || matches!(c, '=' | '>' | '/' | '"' | '\'')
}

/// Lowercase attribute names of the opening tag at the start of `raw`, in source order
fn attribute_order(raw: &str) -> Vec<String> {
    let mut names = Vec::new();
    let tag = raw.trim_start_matches('<');
    let mut rest = tag.trim_start_matches(|c: char| !is_delimiter(c));

    loop {
        rest = rest.trim_start_matches(|c: char| c.is_ascii_whitespace() || c == '/');
        if rest.is_empty() || rest.starts_with('>') {
            break;
        }

        let end = rest.find(is_delimiter).unwrap_or(rest.len());
        if end == 0 {
            // stray `=` or quote; all delimiters are ASCII
            rest = &rest[1..];
            continue;
        }
        names.push(rest[..end].to_ascii_lowercase());

        rest = rest[end..].trim_start_matches(|c: char| c.is_ascii_whitespace());
        if let Some(value) = rest.strip_prefix('=') {
            let value = value.trim_start_matches(|c: char| c.is_ascii_whitespace());
            rest = match value.chars().next() {
                Some(quote @ ('"' | '\'')) => value[1..].find(quote).map_or("", |i| &value[i + 2..]),
                _ => {
                    let end = value
                        .find(|c: char| c.is_ascii_whitespace() || c == '>')
                        .unwrap_or(value.len());
                    &value[end..]
                }
            };
        }
    }

    names
}

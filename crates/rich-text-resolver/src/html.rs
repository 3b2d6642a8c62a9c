//! HTML parsing via html5ever.
//!
//! This module parses rich text HTML with `scraper` and converts it to the
//! generic [`Node`] structure used by the transformer.

use scraper::{ElementRef, Html, Node as ScraperNode};

use crate::node::{Element, Node};

/// Parse an HTML fragment into its top-level nodes.
///
/// The fragment is parsed in a `<body>` context; the returned nodes are the
/// children of the fragment root. Comments and processing instructions are dropped.
///
/// # Example
///
/// ```rust
/// use rich_text_resolver::html::parse_html;
///
/// let nodes = parse_html("<p>Hello <strong>World</strong></p>");
/// assert_eq!(nodes.len(), 1);
/// ```
pub fn parse_html(html: &str) -> Vec<Node> {
    let document = Html::parse_fragment(html);
    convert_children(document.root_element())
}

fn convert_children(element: ElementRef) -> Vec<Node> {
    let mut nodes = Vec::new();

    for child in element.children() {
        match child.value() {
            ScraperNode::Text(text) => {
                nodes.push(Node::text(&text.text));
            }
            ScraperNode::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    nodes.push(scraper_to_node(child_element));
                }
            }
            _ => {}
        }
    }

    nodes
}

/// Convert a scraper ElementRef to our Node structure
fn scraper_to_node(element: ElementRef) -> Node {
    let mut node = Element::new(element.value().name());

    for (name, value) in element.value().attrs() {
        node.set_attr(name, value);
    }
    node.children = convert_children(element);

    Node::Element(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_returns_top_level_nodes() {
        let nodes = parse_html("<p>One</p><p>Two</p>");
        assert_eq!(nodes.len(), 2);
        assert!(nodes.iter().all(Node::is_element));
    }

    #[test]
    fn test_parse_attributes_and_children() {
        let nodes = parse_html(r#"<p><a href="https://kontent.ai" data-new-window="true">Link</a></p>"#);
        let mut a = Node::element_with_attrs(
            "a",
            vec![("href", "https://kontent.ai"), ("data-new-window", "true")],
        );
        a.add_child(Node::text("Link"));
        let mut p = Node::element("p");
        p.add_child(a);

        assert_eq!(nodes, vec![p]);
    }

    #[test]
    fn test_parse_decodes_entities_and_drops_comments() {
        let nodes = parse_html("<p>a &amp; b<!-- note --></p>");
        assert_eq!(nodes[0].text_content(), "a & b");
        assert_eq!(nodes[0].as_element().map(|e| e.children.len()), Some(1));
    }

    #[test]
    fn test_parse_keeps_attribute_order() {
        let nodes = parse_html(r#"<a title="Kontent" data-new-window="true" href="https://kontent.ai" rel="noopener">x</a>"#);
        let a = nodes[0].as_element().unwrap();

        let names: Vec<&str> = a.attributes.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["title", "data-new-window", "href", "rel"]);
    }
}

//! Generic DOM node structure for rich text transformation.
//!
//! Both HTML engines convert their output to this structure, so the transformer
//! never sees parser-specific types. Any other parser can target it as well.

use indexmap::IndexMap;

/// A parsed HTML node: either text or an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Text(String),
    Element(Element),
}

/// An HTML element with lowercase tag name, ordered attributes and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag_name: String,
    /// Attribute names as supplied by the engine, unique, in document order
    pub attributes: IndexMap<String, String>,
    pub children: Vec<Node>,
}

impl Node {
    /// Create a new element node
    pub fn element(tag_name: &str) -> Self {
        Node::Element(Element::new(tag_name))
    }

    /// Create a new element node with attributes
    pub fn element_with_attrs(tag_name: &str, attrs: Vec<(&str, &str)>) -> Self {
        let mut element = Element::new(tag_name);
        for (name, value) in attrs {
            element.set_attr(name, value);
        }
        Node::Element(element)
    }

    /// Create a new text node
    pub fn text(content: &str) -> Self {
        Node::Text(content.to_string())
    }

    /// Check if this is an element node
    pub fn is_element(&self) -> bool {
        matches!(self, Node::Element(_))
    }

    /// Check if this is a text node
    pub fn is_text(&self) -> bool {
        matches!(self, Node::Text(_))
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }

    /// Add a child node. Text nodes have no children, so this is a no-op for them.
    pub fn add_child(&mut self, child: Node) -> &mut Self {
        if let Node::Element(element) = self {
            element.children.push(child);
        }
        self
    }

    /// Get all text content from this node and descendants
    pub fn text_content(&self) -> String {
        match self {
            Node::Text(content) => content.clone(),
            Node::Element(element) => element
                .children
                .iter()
                .map(Node::text_content)
                .collect::<Vec<_>>()
                .join(""),
        }
    }
}

impl Element {
    pub fn new(tag_name: &str) -> Self {
        Self {
            tag_name: tag_name.to_lowercase(),
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Get an attribute value by name
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Check if an attribute exists
    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Set an attribute, keeping the position of an existing one
    pub fn set_attr(&mut self, name: &str, value: &str) {
        self.attributes.insert(name.to_string(), value.to_string());
    }

    /// Get only element children
    pub fn element_children(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_element() {
        let node = Node::element("P");
        assert!(node.is_element());
        assert_eq!(node.as_element().map(|e| e.tag_name.as_str()), Some("p"));
    }

    #[test]
    fn test_create_text() {
        let node = Node::text("Hello World");
        assert!(node.is_text());
        assert_eq!(node.text_content(), "Hello World");
    }

    #[test]
    fn test_attributes() {
        let node = Node::element_with_attrs("a", vec![("href", "https://example.com"), ("title", "Example")]);
        let element = node.as_element().unwrap();
        assert_eq!(element.attr("href"), Some("https://example.com"));
        assert_eq!(element.attr("title"), Some("Example"));
        assert_eq!(element.attr("class"), None);
        assert!(element.has_attr("title"));
    }

    #[test]
    fn test_attribute_order_is_kept() {
        let mut element = Element::new("a");
        element.set_attr("title", "t");
        element.set_attr("href", "h");
        element.set_attr("title", "u");

        let names: Vec<&str> = element.attributes.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["title", "href"]);
        assert_eq!(element.attr("title"), Some("u"));
    }

    #[test]
    fn test_children() {
        let mut parent = Node::element("p");
        parent
            .add_child(Node::text("Hello"))
            .add_child(Node::element("strong"))
            .add_child(Node::text("World"));

        let element = parent.as_element().unwrap();
        assert_eq!(element.children.len(), 3);
        assert_eq!(element.element_children().count(), 1);
    }

    #[test]
    fn test_text_content() {
        let mut p = Node::element("p");
        p.add_child(Node::text("Hello "));
        let mut strong = Node::element("strong");
        strong.add_child(Node::text("World"));
        p.add_child(strong);

        assert_eq!(p.text_content(), "Hello World");
    }
}

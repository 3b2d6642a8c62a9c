//! HTML engine selection and input normalization.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::node::Node;
use crate::Result;

/// Newlines followed by indentation are formatting left by the editor, not content.
static EDITOR_WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\s*").expect("editor whitespace pattern is valid"));

/// Remove every newline together with the whitespace run that follows it
pub fn normalize_html(html: &str) -> String {
    EDITOR_WHITESPACE.replace_all(html, "").into_owned()
}

/// The HTML parser used to build the node tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParserEngine {
    /// Standards-compliant html5ever parser (via scraper), `html` feature
    #[default]
    Html5ever,
    /// Lightweight tl parser, `tl` feature
    Tl,
}

impl ParserEngine {
    pub fn name(&self) -> &'static str {
        match self {
            ParserEngine::Html5ever => "html5ever",
            ParserEngine::Tl => "tl",
        }
    }

    /// Normalize `html` and parse it into top-level nodes
    pub fn parse(&self, html: &str) -> Result<Vec<Node>> {
        let html = normalize_html(html);
        match self {
            ParserEngine::Html5ever => parse_html5ever(&html),
            ParserEngine::Tl => parse_tl(&html),
        }
    }
}

#[cfg(feature = "html")]
fn parse_html5ever(html: &str) -> Result<Vec<Node>> {
    Ok(crate::html::parse_html(html))
}

#[cfg(not(feature = "html"))]
fn parse_html5ever(_html: &str) -> Result<Vec<Node>> {
    Err(crate::ResolverError::EngineUnavailable("html5ever"))
}

#[cfg(feature = "tl")]
fn parse_tl(html: &str) -> Result<Vec<Node>> {
    crate::tl_dom::parse_html(html)
}

#[cfg(not(feature = "tl"))]
fn parse_tl(_html: &str) -> Result<Vec<Node>> {
    Err(crate::ResolverError::EngineUnavailable("tl"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("<p>a</p>\n    <p>b</p>", "<p>a</p><p>b</p>")]
    #[case("<ul>\n\t<li>a</li>\n</ul>", "<ul><li>a</li></ul>")]
    #[case("<p>keep  inner  spaces</p>", "<p>keep  inner  spaces</p>")]
    #[case("line\n\n\nbreaks", "linebreaks")]
    fn test_normalize_html(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_html(input), expected);
    }

    #[cfg(all(feature = "html", feature = "tl"))]
    #[test]
    fn test_engines_agree_on_node_trees() {
        let html = r#"<p>Text <strong>bold</strong> &amp; <a TITLE="t" href="https://x.y" Data-New-Window="true" rel="noopener">link</a></p>
            <ol><li>one<br/>two<br></li></ol>
            <table><tbody><tr><td>cell</td></tr></tbody></table>"#;

        let html5ever = ParserEngine::Html5ever.parse(html).unwrap();
        let tl = ParserEngine::Tl.parse(html).unwrap();
        assert_eq!(html5ever, tl);
        // IndexMap equality ignores order
        assert_eq!(attribute_names(&html5ever), attribute_names(&tl));
        assert_eq!(
            attribute_names(&tl)[0],
            vec!["title", "href", "data-new-window", "rel"]
        );
    }

    #[cfg(all(feature = "html", feature = "tl"))]
    fn attribute_names(nodes: &[Node]) -> Vec<Vec<String>> {
        let mut names = Vec::new();
        let mut stack: Vec<&Node> = nodes.iter().rev().collect();
        while let Some(node) = stack.pop() {
            if let Node::Element(element) = node {
                if !element.attributes.is_empty() {
                    names.push(element.attributes.keys().cloned().collect());
                }
                stack.extend(element.children.iter().rev());
            }
        }
        names
    }
}

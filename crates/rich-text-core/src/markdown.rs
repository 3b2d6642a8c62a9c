//! Portable Text to Markdown serialization

use crate::marks::{nest_marks, MarkNode};
use crate::model::{Block, ListType, MarkDef, PortableTextObject, Table, TableCell};
use crate::options::{HeadingStyle, MarkdownOptions};

/// Serialize Portable Text objects to a Markdown string
pub fn to_markdown(objects: &[PortableTextObject], options: &MarkdownOptions) -> String {
    let mut output = String::with_capacity(4096);
    serialize_objects(objects, options, &mut output);

    // Post-process: collapse multiple newlines and trim
    collapse_and_trim(&mut output);
    output
}

fn serialize_objects(objects: &[PortableTextObject], options: &MarkdownOptions, out: &mut String) {
    // One counter per list level, reset whenever a list run ends
    let mut counters: Vec<u32> = Vec::new();

    for object in objects {
        match object {
            PortableTextObject::Block(block) if block.is_list_item() => {
                serialize_list_item(block, options, &mut counters, out);
                continue;
            }
            _ => {
                if !counters.is_empty() {
                    counters.clear();
                    out.push('\n');
                }
            }
        }

        match object {
            PortableTextObject::Block(block) => serialize_block(block, options, out),
            PortableTextObject::Span(span) => {
                out.push_str(&escape_markdown(&span.text));
                out.push_str("\n\n");
            }
            PortableTextObject::Image(image) => {
                out.push_str("![");
                out.push_str(&image.asset.alt);
                out.push_str("](");
                out.push_str(&image.asset.url);
                out.push_str(")\n\n");
            }
            PortableTextObject::Table(table) => serialize_table(table, options, out),
            // Components need the host application to resolve them
            PortableTextObject::ComponentOrItem(_)
            | PortableTextObject::Link(_)
            | PortableTextObject::ItemLink(_)
            | PortableTextObject::Row(_)
            | PortableTextObject::Cell(_)
            | PortableTextObject::Reference(_) => {}
        }
    }

    if !counters.is_empty() {
        out.push('\n');
    }
}

fn serialize_block(block: &Block, options: &MarkdownOptions, out: &mut String) {
    let start_len = out.len();
    serialize_spans(block, options, out);

    if out[start_len..].trim().is_empty() {
        out.truncate(start_len);
        return;
    }

    match heading_level(&block.style) {
        Some(level) => {
            let text = out[start_len..].to_string();
            out.truncate(start_len);
            serialize_heading(level, &text, options, out);
        }
        None => out.push_str("\n\n"),
    }
}

fn heading_level(style: &str) -> Option<usize> {
    let level = style.strip_prefix('h')?.parse::<usize>().ok()?;
    (1..=6).contains(&level).then_some(level)
}

fn serialize_heading(level: usize, text: &str, options: &MarkdownOptions, out: &mut String) {
    match options.heading_style {
        HeadingStyle::Setext if level <= 2 => {
            out.push_str(text);
            out.push('\n');
            let underline = if level == 1 { '=' } else { '-' };
            for _ in 0..text.chars().count() {
                out.push(underline);
            }
            out.push_str("\n\n");
        }
        _ => {
            for _ in 0..level {
                out.push('#');
            }
            out.push(' ');
            out.push_str(text);
            out.push_str("\n\n");
        }
    }
}

fn serialize_list_item(
    block: &Block,
    options: &MarkdownOptions,
    counters: &mut Vec<u32>,
    out: &mut String,
) {
    let level = block.level.unwrap_or(1).max(1) as usize;
    counters.truncate(level);
    while counters.len() < level {
        counters.push(0);
    }
    counters[level - 1] += 1;

    let indent = "    ".repeat(level - 1);
    out.push_str(&indent);

    let prefix_len = match block.list_item {
        Some(ListType::Number) => {
            let num = counters[level - 1].to_string();
            out.push_str(&num);
            out.push_str(".  ");
            num.len() + 3
        }
        _ => {
            out.push(options.bullet_list_marker);
            out.push_str("   ");
            4
        }
    };

    let start_len = out.len();
    serialize_spans(block, options, out);

    // Indent continuation lines
    let content = out[start_len..].to_string();
    out.truncate(start_len);
    let continuation_indent = " ".repeat(prefix_len);
    for (i, line) in content.lines().enumerate() {
        if i > 0 {
            out.push('\n');
            out.push_str(&indent);
            out.push_str(&continuation_indent);
        }
        out.push_str(line);
    }
    out.push('\n');
}

fn serialize_table(table: &Table, options: &MarkdownOptions, out: &mut String) {
    let rows: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| row.cells.iter().map(|cell| cell_text(cell, options)).collect())
        .collect();

    let Some(headers) = rows.first() else {
        return;
    };

    // Calculate column widths
    let col_count = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![3; col_count];
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    serialize_table_row(headers, &widths, out);

    // Separator row
    out.push('|');
    for &width in &widths {
        out.push(' ');
        for _ in 0..width {
            out.push('-');
        }
        out.push_str(" |");
    }
    out.push('\n');

    for row in &rows[1..] {
        serialize_table_row(row, &widths, out);
    }

    out.push('\n');
}

fn serialize_table_row(cells: &[String], widths: &[usize], out: &mut String) {
    out.push('|');
    for (i, &width) in widths.iter().enumerate() {
        let text = cells.get(i).map(String::as_str).unwrap_or("");
        out.push(' ');
        out.push_str(text);
        for _ in text.chars().count()..width {
            out.push(' ');
        }
        out.push_str(" |");
    }
    out.push('\n');
}

/// Flatten a cell to a single line of inline Markdown
fn cell_text(cell: &TableCell, options: &MarkdownOptions) -> String {
    let mut parts = Vec::new();
    for object in &cell.content {
        let mut part = String::new();
        match object {
            PortableTextObject::Block(block) => serialize_spans(block, options, &mut part),
            PortableTextObject::Span(span) => part.push_str(&escape_markdown(&span.text)),
            PortableTextObject::Image(image) => {
                part.push_str(&format!("![{}]({})", image.asset.alt, image.asset.url));
            }
            _ => {}
        }
        let part = part.trim().replace('\n', " ").replace('|', "\\|");
        if !part.is_empty() {
            parts.push(part);
        }
    }
    parts.join(" ")
}

fn serialize_spans(block: &Block, options: &MarkdownOptions, out: &mut String) {
    for node in nest_marks(&block.children) {
        serialize_mark_node(&node, block, options, out);
    }
}

fn serialize_mark_node(node: &MarkNode, block: &Block, options: &MarkdownOptions, out: &mut String) {
    match node {
        MarkNode::Text(text) => {
            out.push_str(&escape_markdown(text).replace('\n', "  \n"));
        }
        MarkNode::Mark { mark, children } => {
            let start = out.len();
            for child in children {
                serialize_mark_node(child, block, options, out);
            }
            if out[start..].trim().is_empty() {
                return;
            }

            let inner = out[start..].to_string();
            out.truncate(start);
            match *mark {
                "strong" => {
                    out.push_str(&options.strong_delimiter);
                    out.push_str(&inner);
                    out.push_str(&options.strong_delimiter);
                }
                "em" => {
                    out.push(options.em_delimiter);
                    out.push_str(&inner);
                    out.push(options.em_delimiter);
                }
                "code" => {
                    let backticks = if inner.contains('`') { "``" } else { "`" };
                    out.push_str(backticks);
                    out.push_str(&inner);
                    out.push_str(backticks);
                }
                "sub" | "sup" => {
                    out.push_str(&format!("<{mark}>{inner}</{mark}>"));
                }
                key => match block.mark_def(key) {
                    Some(MarkDef::Link(link)) => {
                        out.push('[');
                        out.push_str(&inner);
                        out.push_str("](");
                        out.push_str(link.href().unwrap_or(""));
                        if let Some(title) = link.attributes.get("title") {
                            out.push_str(" \"");
                            out.push_str(title);
                            out.push('"');
                        }
                        out.push(')');
                    }
                    // Item links need the host application to resolve a URL
                    Some(MarkDef::ItemLink(_)) | None => out.push_str(&inner),
                },
            }
        }
    }
}

/// Escape markdown special characters in text
fn escape_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '\\' | '*' | '_' | '[' | ']' | '`' => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
    }

    result
}

/// Collapse multiple consecutive newlines into at most two and trim surrounding ones
fn collapse_and_trim(s: &mut String) {
    let mut result = String::with_capacity(s.len());
    let mut newline_count = 0;

    for c in s.trim_matches('\n').chars() {
        if c == '\n' {
            newline_count += 1;
            if newline_count <= 2 {
                result.push(c);
            }
        } else {
            newline_count = 0;
            result.push(c);
        }
    }

    *s = result;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::*;
    use crate::model::{ReferenceKind, Span};
    use indexmap::IndexMap;
    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn span(key: &str, marks: &[&str], text: &str) -> Span {
        create_span(key.to_string(), marks.iter().map(|m| m.to_string()).collect(), text)
    }

    fn block(style: &str, children: Vec<Span>) -> PortableTextObject {
        PortableTextObject::Block(create_block("b".to_string(), vec![], style, children))
    }

    fn list_item(level: u32, list_type: ListType, text: &str) -> PortableTextObject {
        PortableTextObject::Block(create_list_block(
            "l".to_string(),
            level,
            list_type,
            vec![],
            "normal",
            vec![span("s", &[], text)],
        ))
    }

    #[rstest]
    #[case(HeadingStyle::Atx, "h1", "# Title")]
    #[case(HeadingStyle::Atx, "h3", "### Title")]
    #[case(HeadingStyle::Setext, "h1", "Title\n=====")]
    #[case(HeadingStyle::Setext, "h2", "Title\n-----")]
    #[case(HeadingStyle::Setext, "h4", "#### Title")]
    fn test_headings(#[case] heading_style: HeadingStyle, #[case] style: &str, #[case] expected: &str) {
        let options = MarkdownOptions {
            heading_style,
            ..Default::default()
        };
        let objects = vec![block(style, vec![span("s", &[], "Title")])];
        assert_eq!(to_markdown(&objects, &options), expected);
    }

    #[test]
    fn test_marks() {
        let objects = vec![block(
            "normal",
            vec![
                span("a", &["strong"], "bold"),
                span("b", &[], " "),
                span("c", &["em"], "it"),
                span("d", &[], " "),
                span("e", &["code"], "x"),
                span("f", &[], " H"),
                span("g", &["sub"], "2"),
                span("h", &[], "O"),
            ],
        )];
        assert_snapshot!(
            to_markdown(&objects, &MarkdownOptions::default()),
            @"**bold** _it_ `x` H<sub>2</sub>O"
        );
    }

    #[test]
    fn test_links() {
        let mut attributes = IndexMap::new();
        attributes.insert("href".to_string(), "https://kontent.ai".to_string());
        attributes.insert("title".to_string(), "Kontent".to_string());
        let objects = vec![PortableTextObject::Block(create_block(
            "b".to_string(),
            vec![
                MarkDef::Link(create_external_link("ext".to_string(), attributes)),
                MarkDef::ItemLink(create_item_link("itm".to_string(), "x", ReferenceKind::Id)),
            ],
            "normal",
            vec![span("a", &["strong", "ext"], "site"), span("b", &[], ", "), span("c", &["itm"], "item")],
        ))];
        assert_snapshot!(
            to_markdown(&objects, &MarkdownOptions::default()),
            @r#"[**site**](https://kontent.ai "Kontent"), item"#
        );
    }

    #[test]
    fn test_lists() {
        let objects = vec![
            list_item(1, ListType::Number, "First"),
            list_item(2, ListType::Bullet, "Nested"),
            list_item(1, ListType::Number, "Second"),
            block("normal", vec![span("s", &[], "After")]),
        ];
        assert_snapshot!(to_markdown(&objects, &MarkdownOptions::default()), @r"
        1.  First
            *   Nested
        2.  Second

        After
        ");
    }

    #[test]
    fn test_image_and_line_break() {
        let image = create_image_block("i".to_string(), "a", "https://a/x.png", ReferenceKind::Id, "X");
        let objects = vec![
            block("normal", vec![span("s", &[], "one\ntwo")]),
            PortableTextObject::Image(image),
        ];
        assert_eq!(
            to_markdown(&objects, &MarkdownOptions::default()),
            "one  \ntwo\n\n![X](https://a/x.png)"
        );
    }

    #[test]
    fn test_table() {
        let cell = |text: &str| {
            create_table_cell(
                "c".to_string(),
                vec![block("normal", vec![span("s", &[], text)])],
            )
        };
        let table = create_table(
            "t".to_string(),
            vec![
                create_table_row("r0".to_string(), vec![cell("Name"), cell("Qty")]),
                create_table_row("r1".to_string(), vec![cell("Apples"), cell("3")]),
            ],
        );
        assert_snapshot!(to_markdown(&[PortableTextObject::Table(table)], &MarkdownOptions::default()), @r"
        | Name   | Qty |
        | ------ | --- |
        | Apples | 3   |
        ");
    }

    #[test]
    fn test_escapes_text() {
        let objects = vec![block("normal", vec![span("s", &[], "a_b*c")])];
        assert_eq!(to_markdown(&objects, &MarkdownOptions::default()), "a\\_b\\*c");
    }
}

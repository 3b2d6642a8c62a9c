//! Rebuild inline nesting from the flat mark lists of a block's spans.
//!
//! Spans only record which marks apply to them. Serializers need a tree where a
//! mark shared by consecutive spans wraps all of them once, so adjacent spans
//! are grouped under the longest-running marks first.

use crate::model::Span;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum MarkNode<'a> {
    Text(&'a str),
    Mark {
        mark: &'a str,
        children: Vec<MarkNode<'a>>,
    },
}

/// Group spans into a mark tree.
///
/// Marks that keep applying to the following spans open first (outermost).
/// Ties go to the mark recorded last on the span, which is the outer element
/// in the source markup.
pub(crate) fn nest_marks(spans: &[Span]) -> Vec<MarkNode<'_>> {
    let mut root = Vec::new();
    let mut stack: Vec<(&str, Vec<MarkNode<'_>>)> = Vec::new();

    for (i, span) in spans.iter().enumerate() {
        let keep = stack
            .iter()
            .take_while(|(open, _)| span.marks.iter().any(|m| m.as_str() == *open))
            .count();
        while stack.len() > keep {
            close_top(&mut stack, &mut root);
        }

        let mut pending: Vec<(usize, &str)> = span
            .marks
            .iter()
            .enumerate()
            .filter(|(_, m)| !stack.iter().any(|(open, _)| *open == m.as_str()))
            .map(|(idx, m)| (idx, m.as_str()))
            .collect();
        pending.sort_by(|a, b| {
            run_length(spans, i, b.1)
                .cmp(&run_length(spans, i, a.1))
                .then(b.0.cmp(&a.0))
        });
        for (_, mark) in pending {
            stack.push((mark, Vec::new()));
        }

        push_node(&mut stack, &mut root, MarkNode::Text(&span.text));
    }

    while !stack.is_empty() {
        close_top(&mut stack, &mut root);
    }

    root
}

/// Number of consecutive spans starting at `from` that carry `mark`
fn run_length(spans: &[Span], from: usize, mark: &str) -> usize {
    spans[from..]
        .iter()
        .take_while(|s| s.marks.iter().any(|m| m == mark))
        .count()
}

fn close_top<'a>(stack: &mut Vec<(&'a str, Vec<MarkNode<'a>>)>, root: &mut Vec<MarkNode<'a>>) {
    if let Some((mark, children)) = stack.pop() {
        push_node(stack, root, MarkNode::Mark { mark, children });
    }
}

fn push_node<'a>(
    stack: &mut [(&'a str, Vec<MarkNode<'a>>)],
    root: &mut Vec<MarkNode<'a>>,
    node: MarkNode<'a>,
) {
    match stack.last_mut() {
        Some((_, children)) => children.push(node),
        None => root.push(node),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn span(marks: &[&str], text: &str) -> Span {
        Span {
            key: text.to_string(),
            marks: marks.iter().map(|m| m.to_string()).collect(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_last_mark_is_outermost() {
        let spans = vec![span(&["em", "strong"], "x")];
        assert_eq!(
            nest_marks(&spans),
            vec![MarkNode::Mark {
                mark: "strong",
                children: vec![MarkNode::Mark {
                    mark: "em",
                    children: vec![MarkNode::Text("x")],
                }],
            }]
        );
    }

    #[test]
    fn test_shared_mark_wraps_consecutive_spans() {
        let spans = vec![span(&["link"], "a"), span(&["strong", "link"], "b"), span(&[], "c")];
        assert_eq!(
            nest_marks(&spans),
            vec![
                MarkNode::Mark {
                    mark: "link",
                    children: vec![
                        MarkNode::Text("a"),
                        MarkNode::Mark {
                            mark: "strong",
                            children: vec![MarkNode::Text("b")],
                        },
                    ],
                },
                MarkNode::Text("c"),
            ]
        );
    }

    #[test]
    fn test_overlapping_marks_split_the_later_one() {
        let spans = vec![span(&["strong"], "a"), span(&["strong", "link"], "b"), span(&["link"], "c")];
        let tree = nest_marks(&spans);

        assert_eq!(tree.len(), 2);
        assert_eq!(
            tree[1],
            MarkNode::Mark {
                mark: "link",
                children: vec![MarkNode::Text("c")],
            }
        );
    }
}

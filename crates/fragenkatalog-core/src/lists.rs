//! Nesting of flat Markdown lists into LaTeX list environments
//!
//! Lists are detected on tab-indented text without a Markdown parser. The
//! rewrite is a fixed point: the first list block still opening with an
//! unconverted marker is wrapped in an environment, its markers at the
//! block's own indentation become `\item`, and the search starts again.
//! Sub-lists one level deeper are left as they are and get wrapped by a
//! later round. Ordered lists are handled completely before unordered ones.
//!
//! A block continues only through lines at its own indentation or exactly
//! one level deeper; anything indented further ends it.

use crate::ordinal::numeric_marker_len;

/// Kind of list environment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    /// `1.`, `2.`, ... markers, `enumerate`
    Ordered,
    /// `-` or `*` markers, `itemize`
    Unordered,
}

impl ListKind {
    fn environment(self) -> &'static str {
        match self {
            ListKind::Ordered => "enumerate",
            ListKind::Unordered => "itemize",
        }
    }

    /// Whether `content` starts a new list of this kind
    fn opens(self, content: &str) -> bool {
        match self {
            ListKind::Ordered => content.starts_with("1. "),
            ListKind::Unordered => content.starts_with("- ") || content.starts_with("* "),
        }
    }

    /// Length of this kind's marker at the start of `content`
    fn marker_len(self, content: &str) -> Option<usize> {
        match self {
            ListKind::Ordered => numeric_marker_len(content),
            ListKind::Unordered => bullet_marker_len(content),
        }
    }
}

fn bullet_marker_len(content: &str) -> Option<usize> {
    matches!(content.as_bytes().first(), Some(b'-' | b'*')).then_some(1)
}

fn any_marker_len(content: &str) -> Option<usize> {
    bullet_marker_len(content).or_else(|| numeric_marker_len(content))
}

/// Split a line into its number of leading tabs and the rest
fn split_indent(line: &str) -> (usize, &str) {
    let rest = line.trim_start_matches('\t');
    (line.len() - rest.len(), rest)
}

/// A marker followed by a space and at least one more character
fn is_item(content: &str, marker_len: Option<usize>) -> bool {
    marker_len
        .and_then(|len| content[len..].strip_prefix(' '))
        .is_some_and(|text| !text.is_empty())
}

/// Whether `line` continues a block of `kind` opened at `indent`
fn continues(kind: ListKind, indent: usize, line: &str) -> bool {
    let (depth, content) = split_indent(line);
    if depth == indent {
        is_item(content, kind.marker_len(content))
    } else if depth == indent + 1 {
        is_item(content, any_marker_len(content))
    } else {
        false
    }
}

/// A list block spanning `lines[start..end]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Block {
    start: usize,
    end: usize,
    indent: usize,
}

/// First block of `kind` opening at or after line `from`
fn find_block(lines: &[String], kind: ListKind, from: usize) -> Option<Block> {
    let start = (from..lines.len()).find(|&i| kind.opens(split_indent(&lines[i]).1))?;
    let indent = split_indent(&lines[start]).0;
    let end = (start + 1..lines.len())
        .find(|&i| !continues(kind, indent, &lines[i]))
        .unwrap_or(lines.len());
    Some(Block { start, end, indent })
}

/// Replace the block's lines by a list environment
fn wrap_block(lines: &mut Vec<String>, kind: ListKind, block: Block) {
    let environment = kind.environment();
    let tabs = "\t".repeat(block.indent);

    let mut replacement = Vec::with_capacity(block.end - block.start + 2);
    replacement.push(format!("\\begin{{{environment}}}"));
    for line in &lines[block.start..block.end] {
        let (depth, content) = split_indent(line);
        match kind.marker_len(content) {
            Some(len) if depth == block.indent => {
                replacement.push(format!("{tabs}\t\\item{}", &content[len..]));
            }
            _ => replacement.push(line.clone()),
        }
    }
    replacement.push(format!("\\end{{{environment}}}"));

    lines.splice(block.start..block.end, replacement);
}

/// Wrap every flat list in `text` into `enumerate` / `itemize` environments
pub fn rewrite_lists(text: &str) -> String {
    let mut lines: Vec<String> = text.split('\n').map(str::to_string).collect();

    for kind in [ListKind::Ordered, ListKind::Unordered] {
        // Lines before the last wrapped block never change, so the search resumes there.
        let mut from = 0;
        while let Some(block) = find_block(&lines, kind, from) {
            wrap_block(&mut lines, kind, block);
            from = block.start;
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests;

//! Section directories
//!
//! A section is a directory named `<digits> <title>` containing further
//! sections and question files named `<digits>.md`. Children are ordered by
//! byte-wise comparison of their names, so numeric prefixes must be written
//! with equal width (`02`, `10`) to sort numerically.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::images::ImageAsset;
use crate::node::{Node, Render};
use crate::options::RenderOptions;
use crate::ordinal::{Ordinal, starts_with_ordinal};
use crate::paths;
use crate::question::QuestionFile;

/// A directory of the catalog
#[derive(Debug, Clone)]
pub struct Section {
    path: PathBuf,
    name: String,
    ordinal: Option<Ordinal>,
    is_root: bool,
    children: Vec<Node>,
}

/// Kind of a directory entry that becomes a child
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryKind {
    Section,
    Question,
}

/// Classify a directory entry; `None` for entries that are not part of the catalog
fn classify(name: &str, is_dir: bool) -> Option<EntryKind> {
    if is_dir {
        Ordinal::split_name(name).map(|_| EntryKind::Section)
    } else {
        name.strip_suffix(".md")
            .and_then(Ordinal::parse)
            .map(|_| EntryKind::Question)
    }
}

impl Section {
    /// Build the tree rooted at `directory`
    pub fn build_root(directory: &Path) -> Result<Self> {
        Self::build(directory, true)
    }

    /// Build a section and all of its descendants
    ///
    /// Fails on the first unreadable directory or malformed question file.
    pub fn build(directory: &Path, is_root: bool) -> Result<Self> {
        let path = paths::absolute(directory).map_err(|e| Error::io(directory, e))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let mut entries = Vec::new();
        for entry in fs::read_dir(&path).map_err(|e| Error::io(&path, e))? {
            let entry = entry.map_err(|e| Error::io(&path, e))?;
            let entry_path = entry.path();
            let Some(entry_name) = entry.file_name().to_str().map(str::to_string) else {
                tracing::debug!(path = %entry_path.display(), "Skipping non UTF-8 entry");
                continue;
            };
            match classify(&entry_name, entry_path.is_dir()) {
                Some(kind) => entries.push((entry_name, kind)),
                None => tracing::debug!(path = %entry_path.display(), "Skipping entry"),
            }
        }
        entries.sort_by(|a, b| a.0.cmp(&b.0));

        let mut children = Vec::with_capacity(entries.len());
        for (entry_name, kind) in entries {
            let child_path = path.join(&entry_name);
            let child = match kind {
                EntryKind::Section => Node::Section(Self::build(&child_path, false)?),
                EntryKind::Question => Node::Question(QuestionFile::parse(&child_path)?),
            };
            children.push(child);
        }

        let ordinal = Ordinal::split_name(&name).map(|(ordinal, _)| ordinal);
        tracing::debug!(
            path = %path.display(),
            children = children.len(),
            "Built section"
        );

        Ok(Self {
            path,
            name,
            ordinal,
            is_root,
            children,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Numeric prefix; `None` for a title-only root
    pub fn ordinal(&self) -> Option<&Ordinal> {
        self.ordinal.as_ref()
    }

    /// Name without the numeric prefix
    pub fn title(&self) -> &str {
        Ordinal::split_name(&self.name).map_or(self.name.as_str(), |(_, title)| title)
    }

    pub fn is_root(&self) -> bool {
        self.is_root
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Number of question files in this section and all subsections
    pub fn question_count(&self) -> usize {
        self.children
            .iter()
            .map(|child| match child {
                Node::Section(section) => section.question_count(),
                Node::Question(_) => 1,
            })
            .sum()
    }
}

impl Render for Section {
    fn render_text(&self, options: &RenderOptions) -> String {
        let mut text = match &self.ordinal {
            Some(ordinal) => format!("{ordinal}. {}:", self.title()),
            None => format!("{}:", self.name),
        };
        for child in &self.children {
            text.push_str("\n\n");
            let child_text = child.render_text(options);
            match &self.ordinal {
                Some(ordinal) => {
                    let prefixed: Vec<String> = child_text
                        .split('\n')
                        .map(|line| {
                            if starts_with_ordinal(line) {
                                format!("{ordinal}.{line}")
                            } else {
                                line.to_string()
                            }
                        })
                        .collect();
                    text.push_str(&prefixed.join("\n"));
                }
                None => text.push_str(&child_text),
            }
        }
        text
    }

    fn render_markdown(&self, options: &RenderOptions, assets: &mut Vec<ImageAsset>) -> String {
        let mut markdown = match &self.ordinal {
            Some(ordinal) => format!("{ordinal}. **{}**", self.title()),
            None => format!("# {}", self.name),
        };
        for child in &self.children {
            markdown.push_str("\n\n");
            markdown.push_str(&child.render_markdown(options, assets).replace('\n', "\n\t"));
        }
        markdown
    }

    fn render_latex(&self, options: &RenderOptions) -> String {
        let mut latex = String::new();
        if self.ordinal.is_some() {
            latex.push_str("\\newChapter");
        }
        for child in &self.children {
            latex.push_str(&child.render_latex(options));
        }
        latex
    }
}

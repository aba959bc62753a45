//! Tagged Markdown question files
//!
//! A question file is a sequence of blocks, each introduced by a `# <tag>`
//! heading line:
//!
//! ```text
//! # F
//! What is 2+2?
//! # A
//! 4
//! # E
//! Because arithmetic.
//! ```
//!
//! `F` (question) is mandatory, `A` (answer) and `E` (explanation) are
//! optional. Other tags are kept but not rendered.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::images::{self, ImageAsset};
use crate::latex::to_latex;
use crate::node::Render;
use crate::options::{ImageMode, RenderOptions};
use crate::ordinal::Ordinal;
use crate::paths::{relative_path, to_markup};
use crate::plain::to_plain_text;

/// Fields interpreted by the renderers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// `# F`
    Question,
    /// `# A`
    Answer,
    /// `# E`
    Explanation,
}

impl Field {
    pub const fn tag(self) -> &'static str {
        match self {
            Field::Question => "F",
            Field::Answer => "A",
            Field::Explanation => "E",
        }
    }
}

/// A parsed question file
#[derive(Debug, Clone)]
pub struct QuestionFile {
    path: PathBuf,
    ordinal: Ordinal,
    fields: BTreeMap<String, String>,
}

impl QuestionFile {
    /// Read and parse a question file
    pub fn parse(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_source(path, &source)
    }

    /// Parse question file content; `path` supplies the ordinal and the image base directory
    pub fn from_source(path: &Path, source: &str) -> Result<Self> {
        let ordinal = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .and_then(Ordinal::parse)
            .ok_or_else(|| Error::InvalidName {
                path: path.to_path_buf(),
            })?;

        let mut fields: BTreeMap<String, String> = BTreeMap::new();
        let mut current: Option<String> = None;

        for line in source.lines() {
            if let Some(label) = heading_label(line) {
                let label = label.trim();
                current = (!label.is_empty()).then(|| label.to_string());
            } else if let Some(tag) = &current {
                let body = fields.entry(tag.clone()).or_default();
                body.push_str(line);
                body.push('\n');
            }
        }

        if !fields.contains_key(Field::Question.tag()) {
            return Err(Error::MissingQuestion {
                path: path.to_path_buf(),
            });
        }

        Ok(Self {
            path: path.to_path_buf(),
            ordinal,
            fields,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn ordinal(&self) -> &Ordinal {
        &self.ordinal
    }

    /// Raw body of any tag
    pub fn get(&self, tag: &str) -> Option<&str> {
        self.fields.get(tag).map(String::as_str)
    }

    pub fn field(&self, field: Field) -> Option<&str> {
        self.get(field.tag())
    }

    /// The mandatory question body
    pub fn question(&self) -> &str {
        self.field(Field::Question).unwrap_or_default()
    }

    /// All tags present in the file, in sorted order
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    fn answer(&self, options: &RenderOptions) -> Option<&str> {
        self.field(Field::Answer).filter(|_| options.answers)
    }

    fn explanation(&self, options: &RenderOptions) -> Option<&str> {
        self.field(Field::Explanation).filter(|_| options.explanations)
    }

    fn source_dir(&self) -> &Path {
        self.path.parent().unwrap_or(Path::new(""))
    }

    /// Markdown lines of a block with image references handled per [`ImageMode`]
    fn markdown_block(
        &self,
        block: &str,
        options: &RenderOptions,
        assets: &mut Vec<ImageAsset>,
    ) -> String {
        let prefix = to_markup(&relative_path(self.source_dir(), &options.output_dir));
        block
            .trim()
            .split('\n')
            .map(|line| match options.image_mode {
                ImageMode::Reference => images::prefix_paths(line, &prefix),
                ImageMode::Embed => {
                    images::embed_images(line, self.source_dir(), &options.output_dir, assets)
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// `# <label>` heading; returns the label
fn heading_label(line: &str) -> Option<&str> {
    line.strip_prefix("# ").filter(|label| !label.is_empty())
}

/// Indent every line of a LaTeX block by one tab
fn push_indented(out: &mut String, latex: &str) {
    for line in latex.split('\n') {
        out.push('\t');
        out.push_str(line);
        out.push('\n');
    }
}

impl Render for QuestionFile {
    fn render_text(&self, options: &RenderOptions) -> String {
        let answer = self.answer(options);
        let explanation = self.explanation(options);
        let labelled = answer.is_some() && explanation.is_some();

        let mut text = format!("{}.{}", self.ordinal, to_plain_text(self.question()));
        if answer.is_some() || explanation.is_some() {
            text.push_str("\n\n");
        }
        if let Some(answer) = answer {
            if labelled {
                text.push_str(&format!("\t{}:\n\n", options.labels.answer));
            }
            text.push_str(&to_plain_text(answer));
        }
        if let Some(explanation) = explanation {
            if labelled {
                text.push_str(&format!("\n\n\t{}:\n\n", options.labels.explanation));
            }
            text.push_str(&to_plain_text(explanation));
        }
        text
    }

    fn render_markdown(&self, options: &RenderOptions, assets: &mut Vec<ImageAsset>) -> String {
        let mut markdown = format!(
            "{}. {}",
            self.ordinal,
            self.markdown_block(self.question(), options, assets)
        );
        for block in [self.answer(options), self.explanation(options)]
            .into_iter()
            .flatten()
        {
            markdown.push_str("\n\n");
            markdown.push_str(&self.markdown_block(block, options, assets));
        }
        markdown
    }

    fn render_latex(&self, options: &RenderOptions) -> String {
        let workdir = &options.latex_workdir;
        let answer = self.answer(options);
        let explanation = self.explanation(options);
        let labelled = answer.is_some() && explanation.is_some();

        let mut body = String::new();
        if labelled {
            body.push_str(&format!("\t\\textbf{{{}:}}\n\n", options.labels.answer));
        }
        if let Some(answer) = answer {
            push_indented(&mut body, &to_latex(answer, &self.path, workdir));
            body.push('\n');
        }
        if labelled {
            body.push_str(&format!("\t\\textbf{{{}:}}\n\n", options.labels.explanation));
        }
        if let Some(explanation) = explanation {
            push_indented(&mut body, &to_latex(explanation, &self.path, workdir));
        }

        let question = to_latex(self.question(), &self.path, workdir);
        format!(
            "\n\t\\question{{\n\t\t{}\n\t}}{{\n\t\t{}\n\t}}",
            question.trim(),
            body.trim_end()
        )
    }
}

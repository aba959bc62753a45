//! The rendering contract shared by sections and question files

use crate::images::ImageAsset;
use crate::options::RenderOptions;
use crate::question::QuestionFile;
use crate::section::Section;

/// Rendering into the three output formats
pub trait Render {
    /// Plain indented text
    fn render_text(&self, options: &RenderOptions) -> String;

    /// Markdown; images to be copied next to the output are pushed onto `assets`
    fn render_markdown(&self, options: &RenderOptions, assets: &mut Vec<ImageAsset>) -> String;

    /// LaTeX fragment built from `\newChapter` and `\question{..}{..}`
    fn render_latex(&self, options: &RenderOptions) -> String;
}

/// A child of a [`Section`]
#[derive(Debug, Clone)]
pub enum Node {
    Section(Section),
    Question(QuestionFile),
}

impl Render for Node {
    fn render_text(&self, options: &RenderOptions) -> String {
        match self {
            Node::Section(section) => section.render_text(options),
            Node::Question(question) => question.render_text(options),
        }
    }

    fn render_markdown(&self, options: &RenderOptions, assets: &mut Vec<ImageAsset>) -> String {
        match self {
            Node::Section(section) => section.render_markdown(options, assets),
            Node::Question(question) => question.render_markdown(options, assets),
        }
    }

    fn render_latex(&self, options: &RenderOptions) -> String {
        match self {
            Node::Section(section) => section.render_latex(options),
            Node::Question(question) => question.render_latex(options),
        }
    }
}

//! Options shared by all render operations

use std::path::PathBuf;

/// How images are handled in the Markdown rendering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ImageMode {
    /// Rewrite image paths relative to the output directory, pointing at the originals
    #[default]
    Reference,
    /// Keep image paths as written and copy the files next to the output
    Embed,
}

/// Labels placed in front of answers and explanations when both are shown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    pub answer: String,
    pub explanation: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            answer: "Antwort".to_string(),
            explanation: "Erklärung".to_string(),
        }
    }
}

/// Options for rendering a catalog
///
/// Passed explicitly into every render call.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Include `# A` blocks
    pub answers: bool,
    /// Include `# E` blocks
    pub explanations: bool,
    /// Image handling for Markdown output
    pub image_mode: ImageMode,
    /// Directory the Markdown document is written to (absolute)
    pub output_dir: PathBuf,
    /// Directory the LaTeX source is compiled in (absolute)
    pub latex_workdir: PathBuf,
    pub labels: Labels,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            answers: false,
            explanations: false,
            image_mode: ImageMode::default(),
            output_dir: PathBuf::from("output"),
            latex_workdir: default_latex_workdir(),
            labels: Labels::default(),
        }
    }
}

/// Default LaTeX working directory inside the system temp directory
pub fn default_latex_workdir() -> PathBuf {
    std::env::temp_dir().join("fragenkatalog-latex")
}

//! fragenkatalog-export: Catalog-level export operations
//!
//! This crate turns a catalog directory into output documents:
//! - `<name>.txt` with the plain text rendering
//! - `<name>.md` with the Markdown rendering and, optionally, copied images
//! - `<name>.pdf` by substituting the LaTeX rendering into a template and
//!   running an external compiler
//!
//! Compilation goes through the [`LatexCompiler`] trait so that callers can
//! replace `pdflatex`.

pub mod assets;
pub mod compiler;

pub use compiler::{CompileOutput, LatexCompiler, Pdflatex};

use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use fragenkatalog_core::options::default_latex_workdir;
use fragenkatalog_core::{ImageMode, Labels, Render, RenderOptions, Section, paths};

/// Default LaTeX template
pub const DEFAULT_TEMPLATE: &str = include_str!("../templates/template.tex");

/// Token in the template replaced by the rendered catalog
pub const TEMPLATE_PLACEHOLDER: &str = "<INSERT>";

/// Base name of the LaTeX source inside the working directory
const LATEX_JOB_NAME: &str = "tmp";

/// Errors that can occur during export
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error(transparent)]
    Document(#[from] fragenkatalog_core::Error),

    #[error("Failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No output format selected")]
    NoOutputFormat,

    #[error("Failed to read LaTeX template {}: {source}", .path.display())]
    Template {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("LaTeX template does not contain the <INSERT> placeholder")]
    MissingPlaceholder,

    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "LaTeX compilation produced no PDF (exit status: {}); see {}",
        .status.map_or_else(|| "none".to_string(), |code| code.to_string()),
        .workdir.display()
    )]
    Compile {
        status: Option<i32>,
        log: String,
        workdir: PathBuf,
    },
}

impl ExportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for export operations
pub type Result<T> = std::result::Result<T, ExportError>;

/// Read a LaTeX template and check that it can take the rendered catalog
pub fn load_template(path: &Path) -> Result<String> {
    let template = fs::read_to_string(path).map_err(|source| ExportError::Template {
        path: path.to_path_buf(),
        source,
    })?;
    if !template.contains(TEMPLATE_PLACEHOLDER) {
        return Err(ExportError::MissingPlaceholder);
    }
    Ok(template)
}

/// Output document kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OutputFormat {
    Text,
    Markdown,
    Latex,
}

impl OutputFormat {
    /// Extension of the written file
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Text => "txt",
            OutputFormat::Markdown => "md",
            OutputFormat::Latex => "pdf",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Text => "text",
            OutputFormat::Markdown => "markdown",
            OutputFormat::Latex => "pdf",
        };
        f.write_str(name)
    }
}

/// A loaded catalog directory
#[derive(Debug, Clone)]
pub struct Catalog {
    section: Section,
}

impl Catalog {
    /// Build the section tree rooted at `root`
    pub fn load(root: &Path) -> Result<Self> {
        let section = Section::build_root(root)?;
        tracing::debug!(
            root = %section.path().display(),
            questions = section.question_count(),
            "Loaded catalog"
        );
        Ok(Self { section })
    }

    /// Catalog name, used as the base name of every output file
    pub fn name(&self) -> &str {
        self.section.name()
    }

    /// Absolute catalog directory
    pub fn root(&self) -> &Path {
        self.section.path()
    }

    pub fn section(&self) -> &Section {
        &self.section
    }
}

/// Options for exporting a catalog
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub formats: BTreeSet<OutputFormat>,
    /// Output directory (None = `<root>/output`); relative paths are resolved
    /// against the current directory
    pub output_dir: Option<PathBuf>,
    /// LaTeX working directory (None = a directory in the system temp dir)
    pub latex_workdir: Option<PathBuf>,
    pub answers: bool,
    pub explanations: bool,
    pub image_mode: ImageMode,
    pub labels: Labels,
    /// LaTeX template containing [`TEMPLATE_PLACEHOLDER`]
    pub template: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            formats: BTreeSet::new(),
            output_dir: None,
            latex_workdir: None,
            answers: false,
            explanations: false,
            image_mode: ImageMode::default(),
            labels: Labels::default(),
            template: DEFAULT_TEMPLATE.to_string(),
        }
    }
}

/// Result of an export
#[derive(Debug, Clone, Default)]
pub struct ExportResult {
    /// Written files: documents in format order, followed by copied images
    pub output_files: Vec<PathBuf>,
}

/// Writes the requested documents for a catalog
pub struct Exporter<'a> {
    catalog: &'a Catalog,
    options: &'a ExportOptions,
    compiler: Box<dyn LatexCompiler + 'a>,
}

impl<'a> Exporter<'a> {
    /// Create an exporter compiling with the default [`Pdflatex`]
    pub fn new(catalog: &'a Catalog, options: &'a ExportOptions) -> Self {
        Self {
            catalog,
            options,
            compiler: Box::new(Pdflatex::default()),
        }
    }

    pub fn with_compiler(mut self, compiler: impl LatexCompiler + 'a) -> Self {
        self.compiler = Box::new(compiler);
        self
    }

    fn render_options(&self) -> Result<RenderOptions> {
        let output_dir = match &self.options.output_dir {
            Some(dir) => paths::absolute(dir).map_err(|e| ExportError::io(dir, e))?,
            None => self.catalog.root().join("output"),
        };
        let latex_workdir = match &self.options.latex_workdir {
            Some(dir) => paths::absolute(dir).map_err(|e| ExportError::io(dir, e))?,
            None => default_latex_workdir(),
        };
        Ok(RenderOptions {
            answers: self.options.answers,
            explanations: self.options.explanations,
            image_mode: self.options.image_mode,
            output_dir,
            latex_workdir,
            labels: self.options.labels.clone(),
        })
    }

    fn output_path(&self, render: &RenderOptions, format: OutputFormat) -> PathBuf {
        render
            .output_dir
            .join(format!("{}.{}", self.catalog.name(), format.extension()))
    }

    /// Write every requested format into the output directory
    pub fn export(&self) -> Result<ExportResult> {
        if self.options.formats.is_empty() {
            return Err(ExportError::NoOutputFormat);
        }
        if self.options.formats.contains(&OutputFormat::Latex)
            && !self.options.template.contains(TEMPLATE_PLACEHOLDER)
        {
            return Err(ExportError::MissingPlaceholder);
        }

        let render = self.render_options()?;
        fs::create_dir_all(&render.output_dir)
            .map_err(|e| ExportError::io(&render.output_dir, e))?;

        let mut output_files = Vec::new();
        let mut images = Vec::new();
        for &format in &self.options.formats {
            let path = match format {
                OutputFormat::Text => self.write_text(&render)?,
                OutputFormat::Markdown => {
                    let (path, copied) = self.write_markdown(&render)?;
                    images = copied;
                    path
                }
                OutputFormat::Latex => self.write_pdf(&render)?,
            };
            tracing::info!(path = %path.display(), "Wrote {format}");
            output_files.push(path);
        }
        output_files.extend(images);

        Ok(ExportResult { output_files })
    }

    fn write_text(&self, render: &RenderOptions) -> Result<PathBuf> {
        let path = self.output_path(render, OutputFormat::Text);
        let text = self.catalog.section().render_text(render);
        fs::write(&path, text).map_err(|e| ExportError::io(&path, e))?;
        Ok(path)
    }

    fn write_markdown(&self, render: &RenderOptions) -> Result<(PathBuf, Vec<PathBuf>)> {
        let mut image_assets = Vec::new();
        let markdown = self
            .catalog
            .section()
            .render_markdown(render, &mut image_assets);

        assets::purge_images(&render.output_dir, &image_assets)?;
        let copied = assets::copy_assets(&image_assets)?;

        let path = self.output_path(render, OutputFormat::Markdown);
        fs::write(&path, markdown).map_err(|e| ExportError::io(&path, e))?;
        Ok((path, copied))
    }

    /// Compile inside a fresh directory below the configured working directory
    ///
    /// Each run starts without leftovers and only that directory is removed
    /// afterwards. On failure it is kept for inspection and reported in the
    /// error.
    fn write_pdf(&self, render: &RenderOptions) -> Result<PathBuf> {
        let parent = &render.latex_workdir;
        fs::create_dir_all(parent).map_err(|e| ExportError::io(parent, e))?;
        let jobdir = tempfile::Builder::new()
            .prefix("fragenkatalog-")
            .tempdir_in(parent)
            .map_err(|e| ExportError::io(parent, e))?;
        let workdir = jobdir.path();

        // Image paths are relative to the directory the compiler runs in
        let job_render = RenderOptions {
            latex_workdir: workdir.to_path_buf(),
            ..render.clone()
        };
        let fragment = self.catalog.section().render_latex(&job_render);
        let document = self.options.template.replace(TEMPLATE_PLACEHOLDER, &fragment);
        let source_name = format!("{LATEX_JOB_NAME}.tex");
        let source = workdir.join(&source_name);
        fs::write(&source, document).map_err(|e| ExportError::io(&source, e))?;

        let output = self.compiler.compile(workdir, Path::new(&source_name))?;
        if !output.success {
            tracing::warn!(status = ?output.status, "LaTeX compiler exited with an error");
        }

        let pdf = workdir.join(format!("{LATEX_JOB_NAME}.pdf"));
        if !pdf.is_file() {
            let workdir = jobdir.keep();
            tracing::debug!(workdir = %workdir.display(), "Keeping LaTeX working directory");
            return Err(ExportError::Compile {
                status: output.status,
                log: output.log,
                workdir,
            });
        }

        let target = self.output_path(render, OutputFormat::Latex);
        move_file(&pdf, &target)?;
        let workdir = workdir.to_path_buf();
        jobdir.close().map_err(|e| ExportError::io(&workdir, e))?;
        Ok(target)
    }
}

/// Rename `from` to `to`, copying when they are on different filesystems
fn move_file(from: &Path, to: &Path) -> Result<()> {
    if fs::rename(from, to).is_ok() {
        return Ok(());
    }
    fs::copy(from, to).map_err(|e| ExportError::io(to, e))?;
    fs::remove_file(from).map_err(|e| ExportError::io(from, e))?;
    Ok(())
}

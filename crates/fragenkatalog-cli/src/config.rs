//! Configuration file support for the fragenkatalog CLI
//!
//! Loads settings from a `_fragenkatalog.toml` file in the catalog directory.

use anyhow::{Context, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file name, looked up in the catalog directory
pub const CONFIG_FILE_NAME: &str = "_fragenkatalog.toml";

/// Schema reference written into generated configuration files
///
/// Produce the file with `fragenkatalog init --schema > fragenkatalog.schema.json`.
pub const SCHEMA_URL: &str = "./fragenkatalog.schema.json";

/// Root configuration structure
#[derive(Debug, Default, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct Config {
    /// Output location
    #[serde(skip_serializing_if = "OutputConfig::is_empty")]
    pub output: OutputConfig,
    /// Which blocks of a question are rendered, and their labels
    #[serde(skip_serializing_if = "ContentConfig::is_empty")]
    pub content: ContentConfig,
    /// Markdown output configuration
    #[serde(skip_serializing_if = "MarkdownConfig::is_empty")]
    pub markdown: MarkdownConfig,
    /// PDF output configuration
    #[serde(skip_serializing_if = "LatexConfig::is_empty")]
    pub latex: LatexConfig,
}

/// Output location
#[derive(Debug, Default, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output directory, relative to the catalog directory (default: "output")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

impl OutputConfig {
    fn is_empty(&self) -> bool {
        self.dir.is_none()
    }
}

/// Question content configuration
#[derive(Debug, Default, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct ContentConfig {
    /// Include answers (`# A`) (default: false)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<bool>,
    /// Include explanations (`# E`) (default: false)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<bool>,
    /// Label in front of answers when explanations are shown too (default: "Antwort")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer_label: Option<String>,
    /// Label in front of explanations when answers are shown too (default: "Erklärung")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation_label: Option<String>,
}

impl ContentConfig {
    fn is_empty(&self) -> bool {
        self.answer.is_none()
            && self.explanation.is_none()
            && self.answer_label.is_none()
            && self.explanation_label.is_none()
    }
}

/// Markdown output configuration
#[derive(Debug, Default, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct MarkdownConfig {
    /// Copy images next to the Markdown file instead of referencing the originals (default: false)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embed_images: Option<bool>,
}

impl MarkdownConfig {
    fn is_empty(&self) -> bool {
        self.embed_images.is_none()
    }
}

/// PDF output configuration
#[derive(Debug, Default, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct LatexConfig {
    /// LaTeX template containing `<INSERT>`, relative to the catalog directory
    /// (default: built-in template)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<PathBuf>,
    /// Directory in which each run compiles inside its own subdirectory; the
    /// subdirectory is removed after a successful run
    /// (default: "fragenkatalog-latex" in the system temp directory)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workdir: Option<PathBuf>,
    /// Compiler program (default: "pdflatex")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program: Option<String>,
    /// Arguments placed before the source file (default: ["-interaction=nonstopmode"])
    #[serde(skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<String>>,
}

impl LatexConfig {
    fn is_empty(&self) -> bool {
        self.template.is_none()
            && self.workdir.is_none()
            && self.program.is_none()
            && self.args.is_none()
    }
}

impl Config {
    /// Load configuration from a specific file path
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Try to load configuration from a catalog directory (looks for `_fragenkatalog.toml`)
    ///
    /// Returns `Ok(None)` if the config file doesn't exist.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Generate JSON schema for the configuration
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }

    /// Generate JSON schema as a string
    pub fn json_schema_string() -> Result<String> {
        let schema = Self::json_schema();
        serde_json::to_string_pretty(&schema).context("Failed to serialize JSON schema")
    }

    /// Serialize configuration to TOML string with schema directive
    pub fn to_toml_with_schema(&self) -> Result<String> {
        let toml_content =
            toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        Ok(format!("#:schema {}\n\n{}", SCHEMA_URL, toml_content))
    }

    /// Create a sample configuration with the built-in defaults for the init command
    pub fn sample() -> Self {
        Config {
            output: OutputConfig {
                dir: Some(PathBuf::from("output")),
            },
            content: ContentConfig {
                answer: Some(false),
                explanation: Some(false),
                answer_label: Some("Antwort".to_string()),
                explanation_label: Some("Erklärung".to_string()),
            },
            markdown: MarkdownConfig {
                embed_images: Some(false),
            },
            latex: LatexConfig {
                template: None, // built-in template
                workdir: None,  // system temp directory
                program: Some("pdflatex".to_string()),
                args: Some(vec!["-interaction=nonstopmode".to_string()]),
            },
        }
    }
}

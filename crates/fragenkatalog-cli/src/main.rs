//! fragenkatalog: CLI tool to export Markdown question catalogs

mod config;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use std::collections::BTreeSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use fragenkatalog_core::{ImageMode, Labels};
use fragenkatalog_export::{
    Catalog, DEFAULT_TEMPLATE, ExportOptions, Exporter, OutputFormat, Pdflatex, load_template,
};

use config::Config;

#[derive(Parser, Debug)]
#[command(name = "fragenkatalog")]
#[command(about = "Export a directory of Markdown questions as text, Markdown or PDF")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
#[command(subcommand_negates_reqs = true)]
#[command(after_help = "Examples:
  fragenkatalog -t katalog/             # Questions only, as katalog/output/katalog.txt
  fragenkatalog -m -a -e katalog/       # Markdown with answers and explanations
  fragenkatalog -x -a -o build katalog/ # PDF with answers into build/
  fragenkatalog init -o katalog/_fragenkatalog.toml")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Catalog directory
    #[arg(required = true)]
    directory: Option<PathBuf>,

    /// Write a plain text file
    #[arg(short, long)]
    text: bool,

    /// Write a Markdown file
    #[arg(short, long)]
    markdown: bool,

    /// Write a PDF compiled with LaTeX
    #[arg(short = 'x', long)]
    latex: bool,

    /// Include answers
    #[arg(short, long)]
    answer: bool,

    /// Include explanations
    #[arg(short, long)]
    explanation: bool,

    /// Copy images next to the Markdown file instead of referencing the originals
    #[arg(short, long)]
    images: bool,

    /// Output directory (defaults to <DIRECTORY>/output)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Configuration file (defaults to <DIRECTORY>/_fragenkatalog.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbose output, including the LaTeX compiler log
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode - only show errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a sample configuration file
    Init {
        /// Destination file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the JSON schema of the configuration instead
        #[arg(long)]
        schema: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Some(Command::Init { output, schema }) => run_init(output.as_deref(), *schema),
        None => run_export(&cli),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:?}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else if quiet {
        EnvFilter::new("error")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Formats selected on the command line
fn selected_formats(cli: &Cli) -> BTreeSet<OutputFormat> {
    [
        (cli.text, OutputFormat::Text),
        (cli.markdown, OutputFormat::Markdown),
        (cli.latex, OutputFormat::Latex),
    ]
    .into_iter()
    .filter_map(|(selected, format)| selected.then_some(format))
    .collect()
}

fn run_export(cli: &Cli) -> Result<ExitCode> {
    let formats = selected_formats(cli);
    if formats.is_empty() {
        let mut stderr = std::io::stderr();
        writeln!(
            stderr,
            "No output format selected. Choose at least one of -t, -m or -x.\n"
        )?;
        Cli::command().write_help(&mut stderr)?;
        return Ok(ExitCode::FAILURE);
    }

    let directory = cli
        .directory
        .as_deref()
        .context("Missing catalog directory")?;
    if !directory.is_dir() {
        anyhow::bail!("Catalog directory does not exist: {}", directory.display());
    }

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_from_dir(directory)?.unwrap_or_default(),
    };

    let options = export_options(cli, &config, directory, formats)?;
    let catalog = Catalog::load(directory)
        .with_context(|| format!("Failed to load catalog: {}", directory.display()))?;

    let defaults = Pdflatex::default();
    let compiler = Pdflatex {
        program: config.latex.program.clone().unwrap_or(defaults.program),
        args: config.latex.args.clone().unwrap_or(defaults.args),
        stream: cli.verbose,
    };

    let result = Exporter::new(&catalog, &options)
        .with_compiler(compiler)
        .export()
        .with_context(|| format!("Failed to export catalog: {}", catalog.name()))?;

    if !cli.quiet {
        for path in &result.output_files {
            println!("{}", path.display());
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Merge command line flags over the configuration file
///
/// Flags can only switch options on. Relative paths from the configuration
/// are resolved against the catalog directory.
fn export_options(
    cli: &Cli,
    config: &Config,
    directory: &Path,
    formats: BTreeSet<OutputFormat>,
) -> Result<ExportOptions> {
    let content = &config.content;
    let defaults = Labels::default();
    let labels = Labels {
        answer: content.answer_label.clone().unwrap_or(defaults.answer),
        explanation: content
            .explanation_label
            .clone()
            .unwrap_or(defaults.explanation),
    };

    let embed = cli.images || config.markdown.embed_images.unwrap_or(false);

    let template = match &config.latex.template {
        Some(path) if formats.contains(&OutputFormat::Latex) => {
            let path = directory.join(path);
            tracing::debug!("Using LaTeX template {}", path.display());
            load_template(&path)?
        }
        _ => DEFAULT_TEMPLATE.to_string(),
    };

    let output_dir = cli
        .output
        .clone()
        .or_else(|| config.output.dir.as_ref().map(|dir| directory.join(dir)));
    let latex_workdir = config.latex.workdir.as_ref().map(|dir| directory.join(dir));

    Ok(ExportOptions {
        formats,
        output_dir,
        latex_workdir,
        answers: cli.answer || content.answer.unwrap_or(false),
        explanations: cli.explanation || content.explanation.unwrap_or(false),
        image_mode: if embed {
            ImageMode::Embed
        } else {
            ImageMode::Reference
        },
        labels,
        template,
    })
}

fn run_init(output: Option<&Path>, schema: bool) -> Result<ExitCode> {
    let content = if schema {
        Config::json_schema_string()?
    } else {
        Config::sample().to_toml_with_schema()?
    };

    match output {
        Some(path) => {
            if path.exists() {
                anyhow::bail!("Refusing to overwrite existing file: {}", path.display());
            }
            fs::write(path, &content)
                .with_context(|| format!("Failed to write: {}", path.display()))?;
            eprintln!("Wrote {}", path.display());
        }
        None => {
            print!("{content}");
            if !content.ends_with('\n') {
                println!();
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

//! External LaTeX compilation

use std::io::{BufRead, BufReader};
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

use crate::{ExportError, Result};

/// Outcome of a compiler run
#[derive(Debug, Clone, Default)]
pub struct CompileOutput {
    /// Exit code, `None` if the process was killed by a signal
    pub status: Option<i32>,
    pub success: bool,
    /// Captured compiler output
    pub log: String,
}

impl CompileOutput {
    fn new(status: ExitStatus, log: String) -> Self {
        Self {
            status: status.code(),
            success: status.success(),
            log,
        }
    }
}

/// Turns a LaTeX source file into a PDF next to it
///
/// `source` is relative to `workdir`; the PDF is expected in `workdir`
/// with the same file stem.
pub trait LatexCompiler {
    fn compile(&self, workdir: &Path, source: &Path) -> Result<CompileOutput>;
}

impl<T: LatexCompiler + ?Sized> LatexCompiler for &T {
    fn compile(&self, workdir: &Path, source: &Path) -> Result<CompileOutput> {
        (**self).compile(workdir, source)
    }
}

/// Runs `pdflatex` (or a compatible program) in the working directory
#[derive(Debug, Clone)]
pub struct Pdflatex {
    pub program: String,
    /// Arguments placed before the source file name
    pub args: Vec<String>,
    /// Log every output line while the compiler runs instead of after it exits
    pub stream: bool,
}

impl Default for Pdflatex {
    fn default() -> Self {
        Self {
            program: "pdflatex".to_string(),
            args: vec!["-interaction=nonstopmode".to_string()],
            stream: false,
        }
    }
}

impl Pdflatex {
    fn spawn_error(&self, source: std::io::Error) -> ExportError {
        ExportError::Spawn {
            program: self.program.clone(),
            source,
        }
    }

    fn run_streaming(&self, mut command: Command, workdir: &Path) -> Result<CompileOutput> {
        let mut child = command
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| self.spawn_error(e))?;

        let mut log = String::new();
        if let Some(stdout) = child.stdout.take() {
            let mut reader = BufReader::new(stdout);
            let mut buf = Vec::new();
            loop {
                buf.clear();
                let read = reader
                    .read_until(b'\n', &mut buf)
                    .map_err(|e| ExportError::io(workdir, e))?;
                if read == 0 {
                    break;
                }
                let line = String::from_utf8_lossy(&buf);
                let line = line.trim_end_matches(['\n', '\r']);
                tracing::info!(target: "fragenkatalog::latex", "{line}");
                log.push_str(line);
                log.push('\n');
            }
        }

        let status = child.wait().map_err(|e| self.spawn_error(e))?;
        Ok(CompileOutput::new(status, log))
    }

    fn run_buffered(&self, mut command: Command) -> Result<CompileOutput> {
        let output = command.output().map_err(|e| self.spawn_error(e))?;
        let mut log = String::from_utf8_lossy(&output.stdout).into_owned();
        log.push_str(&String::from_utf8_lossy(&output.stderr));
        for line in log.lines() {
            tracing::debug!(target: "fragenkatalog::latex", "{line}");
        }
        Ok(CompileOutput::new(output.status, log))
    }
}

impl LatexCompiler for Pdflatex {
    fn compile(&self, workdir: &Path, source: &Path) -> Result<CompileOutput> {
        tracing::info!(
            program = %self.program,
            workdir = %workdir.display(),
            "Compiling LaTeX"
        );

        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .arg(source)
            .current_dir(workdir)
            .stdin(Stdio::null());

        if self.stream {
            self.run_streaming(command, workdir)
        } else {
            self.run_buffered(command)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pdflatex() {
        let compiler = Pdflatex::default();
        assert_eq!(compiler.program, "pdflatex");
        assert_eq!(compiler.args, vec!["-interaction=nonstopmode"]);
        assert!(!compiler.stream);
    }

    #[test]
    fn test_missing_program_is_a_spawn_error() {
        let dir = tempfile::tempdir().unwrap();
        let compiler = Pdflatex {
            program: "fragenkatalog-no-such-latex".to_string(),
            ..Default::default()
        };
        let err = compiler
            .compile(dir.path(), Path::new("tmp.tex"))
            .unwrap_err();
        assert!(matches!(err, ExportError::Spawn { .. }));
        assert!(err.to_string().contains("fragenkatalog-no-such-latex"));
    }

    #[cfg(unix)]
    #[test]
    fn test_buffered_output_is_captured() {
        let dir = tempfile::tempdir().unwrap();
        let compiler = Pdflatex {
            program: "sh".to_string(),
            args: vec!["-c".to_string(), "echo compiled \"$0\"; exit 3".to_string()],
            stream: false,
        };
        let output = compiler.compile(dir.path(), Path::new("tmp.tex")).unwrap();
        assert_eq!(output.status, Some(3));
        assert!(!output.success);
        assert_eq!(output.log, "compiled tmp.tex\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_streamed_output_is_captured() {
        let dir = tempfile::tempdir().unwrap();
        let compiler = Pdflatex {
            program: "sh".to_string(),
            args: vec!["-c".to_string(), "echo eins; echo zwei".to_string()],
            stream: true,
        };
        let output = compiler.compile(dir.path(), Path::new("tmp.tex")).unwrap();
        assert!(output.success);
        assert_eq!(output.log, "eins\nzwei\n");
    }
}

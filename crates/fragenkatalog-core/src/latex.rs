//! Markdown block to LaTeX

use std::path::Path;

use crate::images;
use crate::lists::rewrite_lists;
use crate::paths::{relative_path, to_markup};

/// Convert a raw Markdown block into a LaTeX fragment
///
/// `origin` is the Markdown file the block comes from; image paths are
/// rewritten relative to `workdir`, the directory the LaTeX source is
/// compiled in. Each output line ends with a newline.
pub fn to_latex(block: &str, origin: &Path, workdir: &Path) -> String {
    let source_dir = origin.parent().unwrap_or(Path::new(""));
    let prefix = to_markup(&relative_path(source_dir, workdir));

    let mut latex = String::with_capacity(block.len() + 16);
    for line in block.trim().split('\n') {
        let line = images::to_includegraphics(line, &prefix)
            .replace('"', "''")
            .replace("    ", "\t");
        latex.push_str(&line);
        latex.push('\n');
    }

    rewrite_lists(&latex)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn convert(block: &str) -> String {
        to_latex(block, Path::new("/kat/01 Grundlagen/1.md"), Path::new("/tmp/textmp"))
    }

    #[test]
    fn test_plain_lines() {
        assert_eq!(convert("Was ist 2+2?\n"), "Was ist 2+2?\n");
    }

    #[test]
    fn test_quotes() {
        assert_eq!(convert("Ein \"Zitat\""), "Ein ''Zitat''\n");
    }

    #[test]
    fn test_image_relative_to_workdir() {
        assert_eq!(
            convert("![Skizze](img/s.png)"),
            "\\includegraphics[width=4.5cm]{../../kat/01 Grundlagen/img/s.png}\n"
        );
    }

    #[test]
    fn test_flat_enumeration() {
        assert_eq!(
            convert("1. first\n1. second"),
            "\\begin{enumerate}\n\t\\item first\n\t\\item second\n\\end{enumerate}\n"
        );
    }

    #[test]
    fn test_space_indented_sub_list() {
        let block = "Vorteile:\n- schnell\n    - sehr schnell\n- billig";
        let expected = "Vorteile:\n\
                        \\begin{itemize}\n\
                        \t\\item schnell\n\
                        \\begin{itemize}\n\
                        \t\t\\item sehr schnell\n\
                        \\end{itemize}\n\
                        \t\\item billig\n\
                        \\end{itemize}\n";
        assert_eq!(convert(block), expected);
    }

    #[test]
    fn test_output_is_stable_under_list_rewrite() {
        let once = convert("1. a\n    * b\n    * c\n2. d");
        assert_eq!(rewrite_lists(&once), once);
    }
}

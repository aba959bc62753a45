//! Lexical path helpers
//!
//! Image references are rewritten relative to other directories (the
//! Markdown output directory, the LaTeX working directory). These helpers
//! work purely on path components and never touch the filesystem.

use std::path::{Component, Path, PathBuf};

/// Resolve `.` and `..` components without following symlinks
pub fn normalize(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = matches!(result.components().next_back(), Some(Component::Normal(_)))
                    && result.pop();
                if !popped && !result.has_root() {
                    result.push("..");
                }
            }
            other => result.push(other.as_os_str()),
        }
    }
    result
}

/// Make a path absolute (against the current directory) and normalize it
pub fn absolute(path: &Path) -> std::io::Result<PathBuf> {
    Ok(normalize(&std::path::absolute(path)?))
}

/// Path of `target` relative to `base`
///
/// Both paths should be absolute (or both relative to the same directory).
/// Returns `.` when they are equal.
pub fn relative_path(target: &Path, base: &Path) -> PathBuf {
    let target = normalize(target);
    let base = normalize(base);
    let target: Vec<_> = target.components().collect();
    let base: Vec<_> = base.components().collect();

    let common = target
        .iter()
        .zip(&base)
        .take_while(|(a, b)| a == b)
        .count();

    let mut result = PathBuf::new();
    for _ in common..base.len() {
        result.push("..");
    }
    for component in &target[common..] {
        result.push(component.as_os_str());
    }
    if result.as_os_str().is_empty() {
        result.push(".");
    }
    result
}

/// Render a relative path with `/` separators for use inside Markdown or LaTeX
pub fn to_markup(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(Path::new("/a/b/../c/./d")), PathBuf::from("/a/c/d"));
        assert_eq!(normalize(Path::new("katalog/.")), PathBuf::from("katalog"));
        assert_eq!(normalize(Path::new("../x")), PathBuf::from("../x"));
        assert_eq!(normalize(Path::new("/..")), PathBuf::from("/"));
    }

    #[test]
    fn test_relative_path_sibling() {
        assert_eq!(
            relative_path(Path::new("/a/b"), Path::new("/a/c")),
            PathBuf::from("../b")
        );
    }

    #[test]
    fn test_relative_path_descendant() {
        assert_eq!(
            relative_path(Path::new("/kat/01 Grundlagen"), Path::new("/kat/output")),
            PathBuf::from("../01 Grundlagen")
        );
        assert_eq!(
            relative_path(Path::new("/kat/output/img"), Path::new("/kat/output")),
            PathBuf::from("img")
        );
    }

    #[test]
    fn test_relative_path_disjoint() {
        assert_eq!(
            relative_path(Path::new("/home/u/kat/01 A"), Path::new("/tmp/textmp")),
            PathBuf::from("../../home/u/kat/01 A")
        );
    }

    #[test]
    fn test_relative_path_same() {
        assert_eq!(relative_path(Path::new("/a/b"), Path::new("/a/b/.")), PathBuf::from("."));
    }

    #[test]
    fn test_to_markup() {
        assert_eq!(to_markup(Path::new("../01 A/img")), "../01 A/img");
        assert_eq!(to_markup(Path::new(".")), ".");
    }
}

//! Markdown image references

use regex::{Captures, Regex};
use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;

use crate::paths;

/// `![alt](path)`, capturing alt text and path
static IMAGE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\]]*)\]\(([^\)]+)\)").unwrap());

/// Placeholder for images in plain text output
pub const IMAGE_PLACEHOLDER: &str = "<BILD>";

/// Fixed image width in the LaTeX output
pub const LATEX_IMAGE_WIDTH: &str = "4.5cm";

/// An image file that must be copied next to the Markdown output
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ImageAsset {
    /// Original image file
    pub source: PathBuf,
    /// Destination inside the output directory
    pub destination: PathBuf,
}

/// Replace every image by [`IMAGE_PLACEHOLDER`]
pub fn replace_with_placeholder(text: &str) -> String {
    IMAGE_PATTERN
        .replace_all(text, regex::NoExpand(IMAGE_PLACEHOLDER))
        .into_owned()
}

/// Rewrite every image into an `\includegraphics` command with `prefix/` in front of its path
pub fn to_includegraphics(line: &str, prefix: &str) -> String {
    IMAGE_PATTERN
        .replace_all(line, |caps: &Captures| {
            format!(
                "\\includegraphics[width={LATEX_IMAGE_WIDTH}]{{{prefix}/{}}}",
                &caps[2]
            )
        })
        .into_owned()
}

/// Prefix the path of every image with `prefix/`
pub fn prefix_paths(line: &str, prefix: &str) -> String {
    IMAGE_PATTERN
        .replace_all(line, |caps: &Captures| {
            format!("![{}]({prefix}/{})", &caps[1], &caps[2])
        })
        .into_owned()
}

/// Paths of all images referenced on a line
pub fn image_paths(line: &str) -> impl Iterator<Item = &str> {
    IMAGE_PATTERN
        .captures_iter(line)
        .filter_map(|caps| caps.get(2).map(|m| m.as_str()))
}

/// Location of an embedded image relative to the output directory
///
/// Paths that stay inside the output directory keep their layout. Paths that
/// would leave it (`../shared.png`, absolute paths) are flattened to their
/// file name, so a copy can never land outside the output directory.
fn embedded_path(path: &str) -> Option<(PathBuf, bool)> {
    let normalized = paths::normalize(Path::new(path));
    let mut components = normalized.components().peekable();
    let inside = components.peek().is_some()
        && components.all(|c| matches!(c, Component::Normal(_)));
    if inside {
        Some((normalized, false))
    } else {
        normalized.file_name().map(|name| (PathBuf::from(name), true))
    }
}

/// Record an asset for every image on `line`, resolved against `source_dir`
///
/// Returns the line with references rewritten where an image had to be
/// flattened into the output directory.
pub(crate) fn embed_images(
    line: &str,
    source_dir: &Path,
    output_dir: &Path,
    assets: &mut Vec<ImageAsset>,
) -> String {
    IMAGE_PATTERN
        .replace_all(line, |caps: &Captures| {
            let path = &caps[2];
            let Some((relative, flattened)) = embedded_path(path) else {
                tracing::warn!(path, "Image path has no file name, not copied");
                return caps[0].to_string();
            };
            assets.push(ImageAsset {
                source: paths::normalize(&source_dir.join(path)),
                destination: output_dir.join(&relative),
            });
            if flattened {
                format!("![{}]({})", &caps[1], paths::to_markup(&relative))
            } else {
                caps[0].to_string()
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder() {
        assert_eq!(
            replace_with_placeholder("a ![Skizze](img/s.png) b ![](x.jpg)"),
            "a <BILD> b <BILD>"
        );
    }

    #[test]
    fn test_includegraphics() {
        assert_eq!(
            to_includegraphics("Siehe ![Skizze](img/s.png)", "../kat/01 A"),
            "Siehe \\includegraphics[width=4.5cm]{../kat/01 A/img/s.png}"
        );
    }

    #[test]
    fn test_prefix_paths_keeps_alt_text() {
        assert_eq!(
            prefix_paths("![Skizze](s.png) und ![](t.png)", "../01 A"),
            "![Skizze](../01 A/s.png) und ![](../01 A/t.png)"
        );
    }

    #[test]
    fn test_image_paths() {
        let paths: Vec<_> = image_paths("![a](x.png) text ![b](y/z.jpg)").collect();
        assert_eq!(paths, vec!["x.png", "y/z.jpg"]);
        assert_eq!(image_paths("no images [link](a.md)").count(), 0);
    }

    fn embed(line: &str) -> (String, Vec<ImageAsset>) {
        let mut assets = Vec::new();
        let line = embed_images(
            line,
            Path::new("/kat/01 A"),
            Path::new("/kat/output"),
            &mut assets,
        );
        (line, assets)
    }

    #[test]
    fn test_embed_keeps_nested_paths() {
        let (line, assets) = embed("![a](img/x.png)");
        assert_eq!(line, "![a](img/x.png)");
        assert_eq!(
            assets,
            vec![ImageAsset {
                source: PathBuf::from("/kat/01 A/img/x.png"),
                destination: PathBuf::from("/kat/output/img/x.png"),
            }]
        );
    }

    #[test]
    fn test_embed_flattens_parent_paths() {
        let (line, assets) = embed("Siehe ![b](../img/x.png).");
        assert_eq!(line, "Siehe ![b](x.png).");
        assert_eq!(
            assets,
            vec![ImageAsset {
                source: PathBuf::from("/kat/img/x.png"),
                destination: PathBuf::from("/kat/output/x.png"),
            }]
        );
    }

    #[test]
    fn test_embed_flattens_absolute_paths() {
        let (line, assets) = embed("![c](/srv/bilder/y.jpg)");
        assert_eq!(line, "![c](y.jpg)");
        assert_eq!(
            assets,
            vec![ImageAsset {
                source: PathBuf::from("/srv/bilder/y.jpg"),
                destination: PathBuf::from("/kat/output/y.jpg"),
            }]
        );
    }

    #[test]
    fn test_embed_resolves_inner_parent_components() {
        let (line, assets) = embed("![d](img/../z.png)");
        assert_eq!(line, "![d](img/../z.png)");
        assert_eq!(assets[0].destination, PathBuf::from("/kat/output/z.png"));
    }

    #[test]
    fn test_embed_skips_paths_without_file_name() {
        let (line, assets) = embed("![e](..)");
        assert_eq!(line, "![e](..)");
        assert!(assets.is_empty());
    }
}

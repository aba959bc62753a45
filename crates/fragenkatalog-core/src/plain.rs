//! Markdown block to plain text

use regex::Regex;
use std::sync::LazyLock;

use crate::images;

/// A line break, a whitespace-only line and the following line break
static BLANK_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n[\t ]*?\n").unwrap());

/// `$$x$$` on a single line
static DISPLAY_MATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\$([^\n]+?)\$\$").unwrap());

/// Convert a raw Markdown block into indented plain text
///
/// Every line is indented by one tab, whitespace-only lines are dropped,
/// images become `<BILD>` and `$$` math delimiters are removed.
pub fn to_plain_text(block: &str) -> String {
    let indented = format!("\t{}", block.trim().replace('\n', "\n\t"));
    let collapsed = collapse_blank_lines(&indented);
    let without_images = images::replace_with_placeholder(&collapsed);
    DISPLAY_MATH
        .replace_all(&without_images, "${1}")
        .into_owned()
}

/// Remove whitespace-only lines
///
/// Matches are leftmost and non-overlapping, so of two consecutive
/// whitespace-only lines only the first is removed in one pass.
pub fn collapse_blank_lines(text: &str) -> String {
    BLANK_LINE.replace_all(text, "\n").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_indents_every_line() {
        assert_eq!(to_plain_text("erste\nzweite\n"), "\terste\n\tzweite");
    }

    #[test]
    fn test_trims_block() {
        assert_eq!(to_plain_text("\n\n  Was ist 2+2?  \n\n"), "\tWas ist 2+2?");
    }

    #[test]
    fn test_drops_blank_lines() {
        assert_eq!(to_plain_text("a\n\nb\n   \nc"), "\ta\n\tb\n\tc");
    }

    #[test]
    fn test_keeps_nested_indentation() {
        assert_eq!(to_plain_text("Liste:\n- a\n    - b"), "\tListe:\n\t- a\n\t    - b");
    }

    #[test]
    fn test_image_placeholder() {
        assert_eq!(
            to_plain_text("Siehe\n![Skizze](img/skizze.png)"),
            "\tSiehe\n\t<BILD>"
        );
    }

    #[test]
    fn test_strips_display_math() {
        assert_eq!(
            to_plain_text("Es gilt $$a^2 + b^2 = c^2$$ und $$x$$."),
            "\tEs gilt a^2 + b^2 = c^2 und x."
        );
    }

    #[test]
    fn test_math_across_lines_untouched() {
        assert_eq!(to_plain_text("$$a\nb$$"), "\t$$a\n\tb$$");
    }

    #[test]
    fn test_collapse_is_noop_without_blank_lines() {
        let text = "\ta\n\tb\n\t- c";
        assert_eq!(collapse_blank_lines(text), text);
        let once = collapse_blank_lines("\ta\n\t\n\tb");
        assert_eq!(collapse_blank_lines(&once), once);
    }
}

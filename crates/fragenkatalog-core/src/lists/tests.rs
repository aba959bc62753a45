use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_flat_enumeration() {
    assert_eq!(
        rewrite_lists("1. first\n1. second"),
        "\\begin{enumerate}\n\t\\item first\n\t\\item second\n\\end{enumerate}"
    );
}

#[test]
fn test_enumeration_accepts_any_following_number() {
    assert_eq!(
        rewrite_lists("1. a\n5. b\n12. c"),
        "\\begin{enumerate}\n\t\\item a\n\t\\item b\n\t\\item c\n\\end{enumerate}"
    );
}

#[test]
fn test_enumeration_must_start_with_one() {
    assert_eq!(rewrite_lists("2. a\n3. b"), "2. a\n3. b");
}

#[test]
fn test_itemize_with_both_bullets() {
    assert_eq!(
        rewrite_lists("- a\n* b"),
        "\\begin{itemize}\n\t\\item a\n\t\\item b\n\\end{itemize}"
    );
}

#[test]
fn test_surrounding_text_preserved() {
    assert_eq!(
        rewrite_lists("Intro\n- a\n- b\nOutro\n"),
        "Intro\n\\begin{itemize}\n\t\\item a\n\t\\item b\n\\end{itemize}\nOutro\n"
    );
}

#[test]
fn test_markers_inside_a_line_are_ignored() {
    assert_eq!(rewrite_lists("a - b\nPunkt 1. x"), "a - b\nPunkt 1. x");
}

#[test]
fn test_itemize_nested_in_enumeration() {
    let input = "1. a\n\t- x\n\t- y\n2. b";
    let expected = "\\begin{enumerate}\n\
                    \t\\item a\n\
                    \\begin{itemize}\n\
                    \t\t\\item x\n\
                    \t\t\\item y\n\
                    \\end{itemize}\n\
                    \t\\item b\n\
                    \\end{enumerate}";
    assert_eq!(rewrite_lists(input), expected);
}

#[test]
fn test_enumeration_nested_in_enumeration() {
    let input = "1. a\n\t1. x\n\t2. y\n2. b";
    let expected = "\\begin{enumerate}\n\
                    \t\\item a\n\
                    \\begin{enumerate}\n\
                    \t\t\\item x\n\
                    \t\t\\item y\n\
                    \\end{enumerate}\n\
                    \t\\item b\n\
                    \\end{enumerate}";
    assert_eq!(rewrite_lists(input), expected);
}

#[test]
fn test_indented_list() {
    assert_eq!(
        rewrite_lists("\t- a\n\t- b"),
        "\\begin{itemize}\n\t\t\\item a\n\t\t\\item b\n\\end{itemize}"
    );
}

#[test]
fn test_two_levels_deeper_ends_the_block() {
    let input = "- a\n\t\t- deep\n- b";
    let expected = "\\begin{itemize}\n\
                    \t\\item a\n\
                    \\end{itemize}\n\
                    \\begin{itemize}\n\
                    \t\t\t\\item deep\n\
                    \\end{itemize}\n\
                    \\begin{itemize}\n\
                    \t\\item b\n\
                    \\end{itemize}";
    assert_eq!(rewrite_lists(input), expected);
}

#[test]
fn test_enumeration_inside_itemize_splits_outer_list() {
    // Ordered lists are wrapped first, so the bullet list no longer continues past them.
    let input = "- a\n\t1. x\n- b";
    let expected = "\\begin{itemize}\n\
                    \t\\item a\n\
                    \\end{itemize}\n\
                    \\begin{enumerate}\n\
                    \t\t\\item x\n\
                    \\end{enumerate}\n\
                    \\begin{itemize}\n\
                    \t\\item b\n\
                    \\end{itemize}";
    assert_eq!(rewrite_lists(input), expected);
}

#[test]
fn test_marker_without_text_ends_the_block() {
    assert_eq!(
        rewrite_lists("1. a\n2.\nText"),
        "\\begin{enumerate}\n\t\\item a\n\\end{enumerate}\n2.\nText"
    );
}

#[test]
fn test_empty_input() {
    assert_eq!(rewrite_lists(""), "");
}

#[test]
fn test_rewrite_is_idempotent() {
    let inputs = [
        "1. first\n1. second",
        "1. a\n\t- x\n\t- y\n2. b\n",
        "- a\n\t\t- deep\n- b",
        "- a\n\t1. x\n- b",
        "Text\n\n* eins\n* zwei\n\t* drei\n\nEnde",
        "2. a\n3. b",
    ];
    for input in inputs {
        let once = rewrite_lists(input);
        assert_eq!(rewrite_lists(&once), once, "input: {input:?}");
    }
}

#[test]
fn test_find_block_bounds() {
    let lines: Vec<String> = ["x", "- a", "\t1. b", "- c", "y"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(
        find_block(&lines, ListKind::Unordered, 0),
        Some(Block {
            start: 1,
            end: 4,
            indent: 0
        })
    );
    assert_eq!(
        find_block(&lines, ListKind::Ordered, 0),
        Some(Block {
            start: 2,
            end: 3,
            indent: 1
        })
    );
    assert_eq!(find_block(&lines, ListKind::Ordered, 3), None);
}

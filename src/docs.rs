//! Doc-comment text utilities.

use lazy_static::lazy_static;
use regex::Regex;

/// Prefix each continuation line of `comment` so the text stays valid inside a
/// `/** ... */` block. The first line is left as is.
pub fn linewrap_comment(comment: Option<&str>) -> String {
    let comment = match comment {
        Some(c) if !c.is_empty() => c,
        _ => return String::new(),
    };

    let comment = escape_terminator(comment);
    comment
        .split('\n')
        .enumerate()
        .map(|(i, line)| {
            let line = line.trim_end_matches('\r');
            if i == 0 {
                line.to_string()
            } else {
                format!(" * {}", line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Lines of a complete doc block, empty when there is nothing to say.
/// `tags` are appended after a blank separator line.
pub fn doc_block(text: Option<&str>, tags: &[String]) -> Vec<String> {
    let body = linewrap_comment(text.map(str::trim));
    if body.is_empty() && tags.is_empty() {
        return Vec::new();
    }

    let mut lines = vec!["/**".to_string()];
    if !body.is_empty() {
        let mut wrapped = body.split('\n');
        if let Some(first) = wrapped.next() {
            lines.push(format!(" * {}", first));
        }
        lines.extend(wrapped.map(str::to_string));
        if !tags.is_empty() {
            lines.push(" *".to_string());
        }
    }
    lines.extend(tags.iter().map(|tag| format!(" * {}", tag)));
    lines.push(" */".to_string());
    lines
}

/// A literal `*/` in manifest text would close the block early.
fn escape_terminator(text: &str) -> String {
    lazy_static! {
        static ref TERMINATOR_RE: Regex = Regex::new(r"\*/").unwrap();
    }
    TERMINATOR_RE.replace_all(text, "*\\/").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linewrap_single_line() {
        assert_eq!(linewrap_comment(Some("Shows a badge.")), "Shows a badge.");
    }

    #[test]
    fn test_linewrap_multi_line() {
        assert_eq!(
            linewrap_comment(Some("First line.\nSecond line.\nThird.")),
            "First line.\n * Second line.\n * Third."
        );
    }

    #[test]
    fn test_linewrap_absent() {
        assert_eq!(linewrap_comment(None), "");
        assert_eq!(linewrap_comment(Some("")), "");
    }

    #[test]
    fn test_terminator_is_escaped() {
        assert_eq!(linewrap_comment(Some("a */ b")), "a *\\/ b");
    }

    #[test]
    fn test_doc_block_with_tags() {
        let lines = doc_block(
            Some("Buttons represent actions.\nUse them."),
            &["@param {ButtonProps} props".to_string()],
        );
        assert_eq!(
            lines,
            vec![
                "/**",
                " * Buttons represent actions.",
                " * Use them.",
                " *",
                " * @param {ButtonProps} props",
                " */",
            ]
        );
    }

    #[test]
    fn test_doc_block_empty() {
        assert!(doc_block(None, &[]).is_empty());
        assert!(doc_block(Some("   "), &[]).is_empty());
    }
}

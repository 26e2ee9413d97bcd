//! Formatter
//!
//! Canonicalizes emitted source text before it is written. The default
//! implementation checks the text with the oxc parser so a broken template
//! never reaches disk, then normalizes layout.

use std::path::Path;

use oxc_allocator::Allocator;
use oxc_parser::Parser;
use oxc_span::SourceType;

use crate::error::{GenError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    JavaScript,
    TypeScriptDeclaration,
}

impl Language {
    fn source_type(self) -> SourceType {
        let source_type = SourceType::default().with_module(true);
        match self {
            Language::JavaScript => source_type,
            Language::TypeScriptDeclaration => source_type
                .with_typescript(true)
                .with_typescript_definition(true),
        }
    }
}

pub trait Formatter: Send + Sync {
    /// `path` only labels errors.
    fn format(&self, path: &Path, source: &str, language: Language) -> Result<String>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct OxcFormatter;

impl Formatter for OxcFormatter {
    fn format(&self, path: &Path, source: &str, language: Language) -> Result<String> {
        let allocator = Allocator::default();
        let ret = Parser::new(&allocator, source, language.source_type()).parse();

        if ret.panicked || !ret.errors.is_empty() {
            let message = ret
                .errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(GenError::Formatter {
                path: path.to_path_buf(),
                message: if message.is_empty() {
                    "parser aborted".to_string()
                } else {
                    message
                },
            });
        }

        Ok(canonicalize(source))
    }
}

/// LF endings, no trailing whitespace, at most one blank line in a row, no
/// leading blank lines, exactly one trailing newline.
pub fn canonicalize(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut pending_blank = false;

    for line in source.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            pending_blank = !out.is_empty();
            continue;
        }
        if pending_blank {
            out.push('\n');
            pending_blank = false;
        }
        out.push_str(line);
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonicalize_layout() {
        assert_eq!(
            canonicalize("\n\nconst a = 1;   \r\n\n\n\nconst b = 2;\n\n"),
            "const a = 1;\n\nconst b = 2;\n"
        );
    }

    #[test]
    fn test_canonicalize_is_idempotent() {
        let once = canonicalize("a\n\n\n b  \n");
        assert_eq!(canonicalize(&once), once);
    }

    #[test]
    fn test_format_valid_javascript() {
        let out = OxcFormatter
            .format(
                Path::new("index.js"),
                "export { default as SlButton } from \"./components/button.js\";",
                Language::JavaScript,
            )
            .unwrap();
        assert_eq!(
            out,
            "export { default as SlButton } from \"./components/button.js\";\n"
        );
    }

    #[test]
    fn test_format_valid_declaration() {
        let source = "declare global {\n  interface HTMLElementTagNameMap {\n    \"sl-button\": SlButtonElement;\n  }\n}\n";
        assert!(OxcFormatter
            .format(Path::new("index.d.ts"), source, Language::TypeScriptDeclaration)
            .is_ok());
    }

    #[test]
    fn test_syntax_error_is_formatter_error() {
        let err = OxcFormatter
            .format(
                Path::new("broken.js"),
                "const PROP_MAP = { \"a\": ;",
                Language::JavaScript,
            )
            .unwrap_err();
        assert_eq!(err.code(), crate::error::ERR_FORMAT);
        assert!(err.to_string().contains("broken.js"));
    }
}

//! Source extraction for annotated functions.
//!
//! A compiled binary cannot reflect on its own source, so the text of the
//! target function is obtained through a [`SourceExtractor`]: either handed
//! over verbatim at decoration time ([`ExplicitSource`]) or sliced out of a
//! source file on disk by function name ([`FileSource`]).

use crate::errors::{Error, Result};
use std::fs;
use std::path::PathBuf;
use syn::spanned::Spanned;

/// Obtains the exact source text of a target function.
///
/// Extraction failures are fatal to decoration and surface immediately,
/// never at call time.
pub trait SourceExtractor {
    fn extract(&self) -> Result<String>;
}

/// Source text supplied directly by the call site.
#[derive(Debug, Clone)]
pub struct ExplicitSource {
    text: String,
}

impl ExplicitSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl SourceExtractor for ExplicitSource {
    fn extract(&self) -> Result<String> {
        if self.text.trim().is_empty() {
            return Err(Error::source_unavailable("explicit source text is empty"));
        }
        Ok(self.text.clone())
    }
}

/// Locates a named free function in a source file and extracts its text,
/// doc comments and attributes included.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    function: String,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>, function: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            function: function.into(),
        }
    }
}

impl SourceExtractor for FileSource {
    fn extract(&self) -> Result<String> {
        let content = fs::read_to_string(&self.path).map_err(|e| {
            Error::source_unavailable_with_path(
                format!("cannot read source file: {e}"),
                &self.path,
            )
        })?;

        let file = syn::parse_file(&content).map_err(|e| {
            Error::source_unavailable_with_path(
                format!("cannot parse source file: {e}"),
                &self.path,
            )
        })?;

        let item = find_fn(&file.items, &self.function).ok_or_else(|| {
            Error::source_unavailable_with_path(
                format!("no function named `{}` found", self.function),
                &self.path,
            )
        })?;

        Ok(slice_item(&content, item))
    }
}

/// Search top-level items and inline modules for a function by name.
fn find_fn<'a>(items: &'a [syn::Item], name: &str) -> Option<&'a syn::ItemFn> {
    for item in items {
        match item {
            syn::Item::Fn(func) if func.sig.ident == name => return Some(func),
            syn::Item::Mod(module) => {
                if let Some((_, nested)) = &module.content {
                    if let Some(found) = find_fn(nested, name) {
                        return Some(found);
                    }
                }
            }
            _ => {}
        }
    }
    None
}

/// Slice the physical lines covered by an item's span out of the original
/// text, preserving formatting exactly as written.
fn slice_item(content: &str, item: &syn::ItemFn) -> String {
    let start = item.span().start().line;
    let end = item.span().end().line;

    content
        .lines()
        .skip(start.saturating_sub(1))
        .take(end.saturating_sub(start) + 1)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Convenience extractor for the file the caller is written in.
///
/// Expands to a [`FileSource`] for `file!()` and the given function name,
/// which only resolves when the crate runs from its source tree (tests,
/// local tooling). Distributed binaries should prefer [`ExplicitSource`].
#[macro_export]
macro_rules! file_source {
    ($function:ident) => {
        $crate::source::FileSource::new(file!(), stringify!($function))
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use std::io::Write;

    #[test]
    fn test_explicit_source_roundtrip() {
        let text = "fn add(x: i64, y: i64) -> i64 { x + y }";
        let source = ExplicitSource::new(text);
        assert_eq!(source.extract().unwrap(), text);
    }

    #[test]
    fn test_explicit_source_empty_fails() {
        let err = ExplicitSource::new("   \n").extract().unwrap_err();
        assert!(matches!(err, Error::SourceUnavailable { .. }));
    }

    #[test]
    fn test_file_source_extracts_exact_text() {
        let content = indoc! {r#"
            use std::fmt;

            /// Adds two numbers.
            fn add(x: i64, y: i64) -> i64 {
                x + y
            }

            fn other() {}
        "#};
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();

        let extracted = FileSource::new(file.path(), "add").extract().unwrap();
        assert_eq!(
            extracted,
            "/// Adds two numbers.\nfn add(x: i64, y: i64) -> i64 {\n    x + y\n}"
        );
    }

    #[test]
    fn test_file_source_finds_fn_in_inline_module() {
        let content = "mod inner {\n    fn hidden() -> u8 { 7 }\n}\n";
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();

        let extracted = FileSource::new(file.path(), "hidden").extract().unwrap();
        assert!(extracted.contains("fn hidden"));
    }

    #[test]
    fn test_file_source_missing_function() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"fn present() {}\n").unwrap();

        let err = FileSource::new(file.path(), "absent").extract().unwrap_err();
        assert!(matches!(err, Error::SourceUnavailable { .. }));
        assert!(err.to_string().contains("absent"));
    }

    #[test]
    fn test_file_source_unreadable_path() {
        let err = FileSource::new("/nonexistent/never.rs", "f")
            .extract()
            .unwrap_err();
        assert!(matches!(err, Error::SourceUnavailable { .. }));
    }
}

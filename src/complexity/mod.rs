//! Cyclomatic complexity analysis over a single function's source text.

pub mod cyclomatic;

use crate::errors::{Error, Result};

pub use cyclomatic::calculate_cyclomatic;

/// Parse source text into a free function item.
///
/// The text must be exactly one `fn` item, attributes and doc comments
/// included, as produced by the source extractors.
pub fn parse_function(source: &str) -> Result<syn::ItemFn> {
    syn::parse_str::<syn::ItemFn>(source)
        .map_err(|e| Error::parse_at(e.to_string(), e.span().start().line))
}

/// Parse source text and compute its cyclomatic complexity.
pub fn cyclomatic_complexity(source: &str) -> Result<u32> {
    let func = parse_function(source)?;
    Ok(calculate_cyclomatic(&func.block))
}

//! The annotation wrapper: marks a function as AI-generated and carries the
//! analysis computed from its source.
//!
//! Decoration is a one-time transform. [`annotate`] extracts the source,
//! parses it, runs the complexity and anti-pattern analyses and the system
//! snapshot, then returns an [`Annotated`] wrapper. Calls through the wrapper
//! delegate to the original function unchanged; panics and `Err` returns
//! propagate as-is.

use crate::complexity::{self, calculate_cyclomatic};
use crate::config::AnnotateOptions;
use crate::errors::Result;
use crate::patterns::{self, AntiPattern};
use crate::source::SourceExtractor;
use crate::system::{self, SystemSnapshot};
use chrono::Utc;
use quote::ToTokens;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Callable-by-argument-tuple, standing in for a variadic call.
///
/// Implemented for `Fn` values of up to eight arguments; the argument list
/// is passed as a tuple, so a two-argument function is called with
/// `wrapper.call((a, b))`.
pub trait Invoke<Args> {
    type Output;

    fn invoke(&self, args: Args) -> Self::Output;
}

macro_rules! impl_invoke {
    ($($arg:ident),*) => {
        impl<Func, $($arg,)* Out> Invoke<($($arg,)*)> for Func
        where
            Func: Fn($($arg),*) -> Out,
        {
            type Output = Out;

            #[allow(non_snake_case)]
            fn invoke(&self, ($($arg,)*): ($($arg,)*)) -> Out {
                (self)($($arg),*)
            }
        }
    };
}

impl_invoke!();
impl_invoke!(A1);
impl_invoke!(A1, A2);
impl_invoke!(A1, A2, A3);
impl_invoke!(A1, A2, A3, A4);
impl_invoke!(A1, A2, A3, A4, A5);
impl_invoke!(A1, A2, A3, A4, A5, A6);
impl_invoke!(A1, A2, A3, A4, A5, A6, A7);
impl_invoke!(A1, A2, A3, A4, A5, A6, A7, A8);

/// A function marked as AI-generated, with its analysis attached.
///
/// Analysis results are fixed at decoration time; the wrapper exposes them
/// read-only and introduces no synchronization of its own.
#[derive(Debug, Clone)]
pub struct Annotated<F> {
    func: F,
    name: String,
    signature: String,
    doc: Option<String>,
    complexity: u32,
    anti_patterns: Vec<AntiPattern>,
    system: SystemSnapshot,
    options: AnnotateOptions,
}

/// Wrap a function, analyzing its source once.
///
/// Fails fast at decoration time: extraction, parse, and configuration
/// problems all surface here, never on a later call.
pub fn annotate<F, S>(func: F, source: S, options: AnnotateOptions) -> Result<Annotated<F>>
where
    S: SourceExtractor,
{
    let text = source.extract()?;
    let item = complexity::parse_function(&text)?;

    let complexity = calculate_cyclomatic(&item.block);
    let anti_patterns = patterns::detect(&text, &item, &options.patterns);
    let system = system::snapshot();

    let name = item.sig.ident.to_string();
    let signature = item.sig.to_token_stream().to_string();
    let doc = doc_comment(&item.attrs);

    if options.verbose {
        log_decoration(&name, complexity, &anti_patterns, &system);
    }

    Ok(Annotated {
        func,
        name,
        signature,
        doc,
        complexity,
        anti_patterns,
        system,
        options,
    })
}

impl<F> Annotated<F> {
    /// Call the wrapped function with an argument tuple.
    ///
    /// Behaviorally transparent: the original receives exactly these
    /// arguments and its result, panic included, comes back unchanged. With
    /// `verbose`, one log line naming the function and the argument values
    /// is emitted first.
    pub fn call<Args>(&self, args: Args) -> F::Output
    where
        F: Invoke<Args>,
        Args: fmt::Debug,
    {
        if self.options.verbose {
            self.log_call(&args);
        }
        self.func.invoke(args)
    }

    /// Name of the wrapped function, as written in its source.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The wrapped function's signature, rendered from its tokens.
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Doc comment of the wrapped function, if it has one.
    pub fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    /// Cyclomatic complexity of the wrapped function.
    pub fn complexity(&self) -> u32 {
        self.complexity
    }

    /// Anti-patterns detected in the wrapped function, ordered by line.
    pub fn anti_patterns(&self) -> &[AntiPattern] {
        &self.anti_patterns
    }

    /// Host snapshot taken at decoration time.
    pub fn system(&self) -> &SystemSnapshot {
        &self.system
    }

    /// The options this wrapper was decorated with.
    pub fn options(&self) -> &AnnotateOptions {
        &self.options
    }

    /// Marker mirroring the attached metadata: always true for a wrapper.
    pub fn is_ai_generated(&self) -> bool {
        true
    }

    /// Recover the original function, discarding the annotation.
    pub fn into_inner(self) -> F {
        self.func
    }

    fn log_call(&self, args: &dyn fmt::Debug) {
        let line = format!(
            "{} fn={} args={:?}",
            Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ"),
            self.name,
            args
        );
        log::warn!("{line}");

        if let Some(path) = &self.options.log_file {
            if let Err(err) = append_line(path, &line) {
                log::warn!("failed to append call log to {}: {err}", path.display());
            }
        }
    }
}

fn log_decoration(
    name: &str,
    complexity: u32,
    anti_patterns: &[AntiPattern],
    system: &SystemSnapshot,
) {
    let report = serde_json::json!({
        "anti_patterns": anti_patterns,
        "system": system,
    });
    log::info!("annotated fn={name} complexity={complexity} report={report}");
}

/// One scoped append per line: open, write, flush, close. Concurrent
/// callers writing whole lines in append mode do not interleave.
fn append_line(path: &Path, line: &str) -> std::io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{line}")?;
    file.flush()
}

/// Join `///` doc lines from an attribute list.
fn doc_comment(attrs: &[syn::Attribute]) -> Option<String> {
    let lines: Vec<String> = attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| match &attr.meta {
            syn::Meta::NameValue(meta) => match &meta.value {
                syn::Expr::Lit(syn::ExprLit {
                    lit: syn::Lit::Str(text),
                    ..
                }) => Some(text.value().trim().to_string()),
                _ => None,
            },
            _ => None,
        })
        .collect();

    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::ExplicitSource;

    fn annotate_add() -> Annotated<fn(i64, i64) -> i64> {
        fn add(x: i64, y: i64) -> i64 {
            x + y
        }
        annotate(
            add as fn(i64, i64) -> i64,
            ExplicitSource::new("/// Adds.\nfn add(x: i64, y: i64) -> i64 { x + y }"),
            AnnotateOptions::new(),
        )
        .unwrap()
    }

    #[test]
    fn test_identity_metadata_preserved() {
        let wrapped = annotate_add();
        assert_eq!(wrapped.name(), "add");
        assert!(wrapped.signature().contains("fn add"));
        assert_eq!(wrapped.doc(), Some("Adds."));
        assert!(wrapped.is_ai_generated());
    }

    #[test]
    fn test_zero_arity_call() {
        let wrapped = annotate(
            || 42u8,
            ExplicitSource::new("fn answer() -> u8 { 42 }"),
            AnnotateOptions::new(),
        )
        .unwrap();
        assert_eq!(wrapped.call(()), 42);
    }

    #[test]
    fn test_into_inner_recovers_function() {
        let wrapped = annotate_add();
        let original = wrapped.into_inner();
        assert_eq!(original(2, 3), 5);
    }

    #[test]
    fn test_redecoration_is_independent() {
        let first = annotate_add();
        let second = annotate_add();
        assert_eq!(first.complexity(), second.complexity());
        assert_eq!(first.anti_patterns(), second.anti_patterns());
    }

    #[test]
    fn test_doc_comment_absent() {
        let item: syn::ItemFn = syn::parse_str("fn f() {}").unwrap();
        assert_eq!(doc_comment(&item.attrs), None);
    }
}

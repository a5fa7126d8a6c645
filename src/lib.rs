//! `dio` marks a function value as AI-generated and attaches descriptive
//! metadata computed once from its source text: cyclomatic complexity,
//! anti-pattern findings (long lines, deep nesting), and a host system
//! snapshot. The wrapper is behaviorally transparent; calls delegate to the
//! original function unchanged.
//!
//! ```
//! use dio::{annotate, AnnotateOptions, ExplicitSource};
//!
//! let wrapped = annotate(
//!     |x: i64, y: i64| x + y,
//!     ExplicitSource::new("fn add(x: i64, y: i64) -> i64 { x + y }"),
//!     AnnotateOptions::new(),
//! )
//! .unwrap();
//!
//! assert_eq!(wrapped.call((3, 5)), 8);
//! assert_eq!(wrapped.complexity(), 1);
//! assert!(wrapped.anti_patterns().is_empty());
//! ```

// Export modules for library usage
pub mod annotate;
pub mod complexity;
pub mod config;
pub mod errors;
pub mod patterns;
pub mod source;
pub mod system;

// Re-export commonly used types
pub use crate::annotate::{annotate, Annotated, Invoke};
pub use crate::complexity::{calculate_cyclomatic, cyclomatic_complexity, parse_function};
pub use crate::config::AnnotateOptions;
pub use crate::errors::{Error, Result};
pub use crate::patterns::{AntiPattern, AntiPatternKind, PatternThresholds};
pub use crate::source::{ExplicitSource, FileSource, SourceExtractor};
pub use crate::system::{snapshot, SystemSnapshot};

//! Anti-pattern detection over a single function's source text.
//!
//! Two shapes are flagged: physical lines over a length threshold, and
//! conditional/loop blocks nested beyond a depth threshold. Nesting is
//! measured on the block hierarchy of the AST, never on indentation, so the
//! result is stable under reformatting. Findings are independent, never
//! deduplicated, and ordered by source line ascending.

use serde::{Deserialize, Serialize};
use syn::spanned::Spanned;
use syn::{visit::Visit, Expr, ItemFn};

/// Kinds of detected anti-patterns, with their measured value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AntiPatternKind {
    LongLine { length: usize },
    DeepNesting { depth: u32 },
}

/// A detected anti-pattern with its location and details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AntiPattern {
    #[serde(flatten)]
    pub kind: AntiPatternKind,
    /// 1-based line within the analyzed source text
    pub line: usize,
    pub message: String,
}

/// Detection thresholds.
///
/// Defaults: lines over 100 characters (common style-guide limit) and
/// conditional/loop nesting deeper than 3 levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PatternThresholds {
    #[serde(default = "default_max_line_length")]
    pub max_line_length: usize,

    #[serde(default = "default_max_nesting_depth")]
    pub max_nesting_depth: u32,
}

fn default_max_line_length() -> usize {
    100
}

fn default_max_nesting_depth() -> u32 {
    3
}

impl Default for PatternThresholds {
    fn default() -> Self {
        Self {
            max_line_length: default_max_line_length(),
            max_nesting_depth: default_max_nesting_depth(),
        }
    }
}

/// Scan a function for anti-patterns.
///
/// `source` is the raw text the long-line scan runs over; `func` is the same
/// text parsed, walked for deep nesting.
pub fn detect(source: &str, func: &ItemFn, thresholds: &PatternThresholds) -> Vec<AntiPattern> {
    let mut findings = detect_long_lines(source, thresholds.max_line_length);
    findings.extend(detect_deep_nesting(func, thresholds.max_nesting_depth));
    findings.sort_by_key(|finding| finding.line);
    findings
}

/// Flag every physical line whose length exceeds the threshold.
pub fn detect_long_lines(source: &str, max_line_length: usize) -> Vec<AntiPattern> {
    source
        .lines()
        .enumerate()
        .filter(|(_, line)| line.chars().count() > max_line_length)
        .map(|(idx, line)| {
            let length = line.chars().count();
            AntiPattern {
                kind: AntiPatternKind::LongLine { length },
                line: idx + 1,
                message: format!("line exceeds {max_line_length} characters ({length})"),
            }
        })
        .collect()
}

/// Flag each independent structure nested beyond the depth threshold.
///
/// A finding is emitted at the node that first crosses the threshold; blocks
/// deeper inside the same structure are not reported again, while sibling
/// structures each produce their own finding.
pub fn detect_deep_nesting(func: &ItemFn, max_nesting_depth: u32) -> Vec<AntiPattern> {
    let mut visitor = NestingVisitor {
        depth: 0,
        threshold: max_nesting_depth,
        findings: Vec::new(),
    };
    visitor.visit_block(&func.block);
    visitor.findings
}

struct NestingVisitor {
    depth: u32,
    threshold: u32,
    findings: Vec<AntiPattern>,
}

fn is_nesting_structure(expr: &Expr) -> bool {
    matches!(
        expr,
        Expr::If(_) | Expr::While(_) | Expr::ForLoop(_) | Expr::Loop(_) | Expr::Match(_)
    )
}

impl<'ast> Visit<'ast> for NestingVisitor {
    fn visit_expr(&mut self, expr: &'ast Expr) {
        if !is_nesting_structure(expr) {
            syn::visit::visit_expr(self, expr);
            return;
        }

        self.depth += 1;
        if self.depth == self.threshold + 1 {
            self.findings.push(AntiPattern {
                kind: AntiPatternKind::DeepNesting { depth: self.depth },
                line: expr.span().start().line,
                message: format!(
                    "nesting depth {} exceeds threshold {}",
                    self.depth, self.threshold
                ),
            });
        }
        syn::visit::visit_expr(self, expr);
        self.depth -= 1;
    }
}

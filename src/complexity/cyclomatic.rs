use syn::{visit::Visit, Block, Expr};

/// Compute cyclomatic complexity for a function body.
///
/// Starts at 1 and adds one per decision point: `if` (each `else if` is its
/// own `if`), `while`, `for`, `loop`, short-circuit `&&`/`||`, and `?`. A
/// `match` with n arms contributes n - 1, one per additional path.
pub fn calculate_cyclomatic(block: &Block) -> u32 {
    let mut visitor = CyclomaticVisitor { complexity: 1 };
    visitor.visit_block(block);
    visitor.complexity
}

struct CyclomaticVisitor {
    complexity: u32,
}

fn calculate_expr_complexity(expr: &Expr) -> u32 {
    match expr {
        Expr::If(_) | Expr::While(_) | Expr::ForLoop(_) | Expr::Loop(_) | Expr::Try(_) => 1,
        Expr::Match(expr_match) => expr_match.arms.len().saturating_sub(1) as u32,
        Expr::Binary(binary) if is_logical_operator(&binary.op) => 1,
        _ => 0,
    }
}

impl<'ast> Visit<'ast> for CyclomaticVisitor {
    fn visit_expr(&mut self, expr: &'ast Expr) {
        self.complexity += calculate_expr_complexity(expr);
        syn::visit::visit_expr(self, expr);
    }
}

fn is_logical_operator(op: &syn::BinOp) -> bool {
    matches!(op, syn::BinOp::And(_) | syn::BinOp::Or(_))
}

use dio::cyclomatic_complexity;
use indoc::indoc;
use pretty_assertions::assert_eq;

#[test]
fn test_branchless_function_is_one() {
    assert_eq!(
        cyclomatic_complexity("fn add(x: i64, y: i64) -> i64 { x + y }").unwrap(),
        1
    );
}

#[test]
fn test_n_decision_points_score_n_plus_one() {
    // Three independent decision points, no boolean-operator branching
    let source = indoc! {r#"
        fn f(x: i32) -> i32 {
            let mut total = 0;
            if x > 0 {
                total += 1;
            }
            for i in 0..x {
                total += i;
            }
            while total > 100 {
                total -= 1;
            }
            total
        }
    "#};
    assert_eq!(cyclomatic_complexity(source).unwrap(), 4);
}

#[test]
fn test_loop_with_nested_if_else_scores_three() {
    // 1 base + for + if, matching a two-deep conditional body
    let source = indoc! {r#"
        fn example(x: i64, y: i64) -> i64 {
            let mut result = 0;
            for _ in 0..x {
                if y > 0 {
                    result += y;
                } else {
                    result -= y;
                }
            }
            result
        }
    "#};
    assert_eq!(cyclomatic_complexity(source).unwrap(), 3);
}

#[test]
fn test_boolean_short_circuit_counts_per_operator() {
    let source = "fn f(a: bool, b: bool, c: bool) -> bool { (a && b) || c }";
    assert_eq!(cyclomatic_complexity(source).unwrap(), 3);
}

#[test]
fn test_try_expressions_count_like_handlers() {
    let source = indoc! {r#"
        fn f(a: &str, b: &str) -> Result<i64, std::num::ParseIntError> {
            let x = a.parse::<i64>()?;
            let y = b.parse::<i64>()?;
            Ok(x + y)
        }
    "#};
    assert_eq!(cyclomatic_complexity(source).unwrap(), 3);
}

#[test]
fn test_comments_and_names_do_not_matter() {
    let plain = "fn f(x: i32) -> i32 { if x > 0 { 1 } else { 0 } }";
    let noisy = indoc! {r#"
        fn completely_different_name(value_with_long_name: i32) -> i32 {
            // decide
            if value_with_long_name > 0 {
                1
            } else {
                0
            }
        }
    "#};
    assert_eq!(
        cyclomatic_complexity(plain).unwrap(),
        cyclomatic_complexity(noisy).unwrap()
    );
}

#[test]
fn test_invalid_source_is_a_parse_error() {
    let err = cyclomatic_complexity("fn broken(x: { !!").unwrap_err();
    assert!(matches!(err, dio::Error::Parse { .. }));
}

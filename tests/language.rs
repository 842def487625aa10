use std::fs::{self};

use newton::{
    Error, Evaluator,
    error::{EvaluationError, LexError, ParseError},
    interpreter::{
        evaluator::{core::DivisionPolicy, function::FunctionTable},
        parser::core::MAX_NESTING_DEPTH,
        value::{Value, approx_eq},
    },
    parse, parse_and_evaluate,
};
use walkdir::WalkDir;

#[test]
fn book_examples_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("book/src").into_iter()
                                .filter_map(Result::ok)
                                .filter(|e| e.path().extension().is_some_and(|ext| ext == "md"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        for (i, block) in extract_example_blocks(&content).into_iter().enumerate() {
            count += check_example_block(&block).unwrap_or_else(|message| {
                                                     panic!("Example {} in {:?} failed:\n{}\n{}",
                                                            i + 1,
                                                            path,
                                                            block,
                                                            message)
                                                 });
        }
    }

    assert!(count > 0, "No examples found in book/src");
}

fn extract_example_blocks(content: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut inside = false;
    let mut buf = String::new();

    for line in content.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```newton") {
            inside = true;
            buf.clear();
            continue;
        }
        if inside && trimmed.starts_with("```") {
            inside = false;
            blocks.push(buf.clone());
            continue;
        }
        if inside {
            buf.push_str(line);
            buf.push('\n');
        }
    }

    blocks
}

/// Checks a block of `expression => expected` lines.
///
/// A line `x = <value>` binds the variable for the lines after it. The
/// expected side is a number, `inf`, `-inf`, `NaN`, or `error`.
fn check_example_block(block: &str) -> Result<usize, String> {
    let mut x = 0.0;
    let mut checked = 0;

    for line in block.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if !line.contains("=>")
           && let Some(value) = line.strip_prefix("x =")
        {
            x = value.trim()
                     .parse()
                     .map_err(|e| format!("bad binding '{line}': {e}"))?;
            continue;
        }

        let (source, expected) = line.split_once("=>")
                                     .ok_or_else(|| format!("missing '=>' in '{line}'"))?;
        let (source, expected) = (source.trim(), expected.trim());
        let result = parse_and_evaluate(source, x);

        if expected == "error" {
            if let Ok(v) = result {
                return Err(format!("'{source}' evaluated to {v}, expected an error"));
            }
        } else {
            let expected: Value =
                expected.parse()
                        .map_err(|e| format!("bad expected value '{expected}': {e}"))?;
            let actual = result.map_err(|e| format!("'{source}' failed: {e}"))?;
            let same = approx_eq(actual, expected, 1e-9) || (actual.is_nan() && expected.is_nan());
            if !same {
                return Err(format!("'{source}' at x = {x} gave {actual}, expected {expected}"));
            }
        }
        checked += 1;
    }

    Ok(checked)
}

fn eval(src: &str) -> Value {
    parse_and_evaluate(src, 0.0).unwrap_or_else(|e| panic!("'{src}' failed: {e}"))
}

fn eval_at(src: &str, x: Value) -> Value {
    parse_and_evaluate(src, x).unwrap_or_else(|e| panic!("'{src}' failed: {e}"))
}

fn assert_close(actual: Value, expected: Value) {
    assert!(approx_eq(actual, expected, 1e-6),
            "expected {expected}, got {actual}");
}

fn assert_lex_error(src: &str) -> LexError {
    match parse(src) {
        Err(Error::Lex(e)) => e,
        other => panic!("'{src}': expected a lex error, got {other:?}"),
    }
}

fn assert_parse_error(src: &str) -> ParseError {
    match parse(src) {
        Err(Error::Parse(e)) => e,
        other => panic!("'{src}': expected a parse error, got {other:?}"),
    }
}

fn assert_evaluation_error(src: &str) -> EvaluationError {
    match parse_and_evaluate(src, 0.0) {
        Err(Error::Evaluation(e)) => e,
        other => panic!("'{src}': expected an evaluation error, got {other:?}"),
    }
}

#[test]
fn basic_arithmetic() {
    assert_eq!(eval("1+2+3+4"), 10.0);
    assert_eq!(eval("1*2*3*4"), 24.0);
    assert_eq!(eval("125"), 125.0);
    assert_eq!(eval("1 + 2.5"), 3.5);
}

#[test]
fn operator_precedence() {
    assert_eq!(eval("1*2+3*4"), 14.0);
    assert_eq!(eval("1+2*3+4"), 11.0);
    assert_eq!(eval("1+(2*3)*(4+5)"), 55.0);
    assert_eq!(eval("1+(2*3)/4+5"), 7.5);
    assert_close(eval("5/(4+3)/2"), 5.0 / 14.0);
}

#[test]
fn parentheses_change_grouping() {
    assert_eq!(eval("(1+2)*(3+4)"), 21.0);
    assert_eq!(eval("((((7))))"), 7.0);
    assert_eq!(eval("2*(3+4)"), 14.0);
}

#[test]
fn left_associativity() {
    assert_eq!(eval("1-2-3-4"), -8.0);
    assert_close(eval("1/2/3/4"), 0.041_666_7);
    assert_eq!(parse("8/4/2").unwrap().to_string(), "((8 / 4) / 2)");
}

#[test]
fn unary_minus_composition() {
    assert_eq!(eval("-1"), -1.0);
    assert_eq!(eval("-1+(-2)"), -3.0);
    assert_eq!(eval("-1+(-2.0)"), -3.0);
    assert_eq!(eval("--1"), 1.0);
    assert_eq!(eval("-(-1)"), 1.0);
    assert_eq!(eval("2*-3"), -6.0);
    assert_eq!(eval("1 - -1"), 2.0);
}

#[test]
fn exponent_binds_tighter_than_multiplication_and_is_right_associative() {
    assert_eq!(eval("2*3^2"), 18.0);
    assert_eq!(eval("2^3^2"), 512.0);
    assert_eq!(parse("2^3^2").unwrap().to_string(), "(2 ^ (3 ^ 2))");
}

#[test]
fn leading_minus_applies_to_the_whole_power() {
    assert_eq!(eval("-2^2"), -4.0);
    assert_eq!(eval("(-2)^2"), 4.0);
    assert_eq!(parse("-2^2").unwrap().to_string(), "(-(2 ^ 2))");
}

#[test]
fn fractional_and_negative_exponents() {
    assert_eq!(eval("4^0.5"), 2.0);
    assert_eq!(eval("2^-1"), 0.5);
    assert_close(eval("27^(1/3)"), 3.0);
}

#[test]
fn whitespace_is_ignored() {
    assert_eq!(eval(" 124.15  "), 124.15);
    assert_eq!(eval("\t1 +\n2 "), 3.0);
    assert_eq!(eval("  15"), 15.0);
    assert_eq!(eval("1\u{a0}+\u{2003}1"), 2.0);
}

#[test]
fn variable_is_bound_per_call() {
    assert_eq!(eval_at("x", 4.0), 4.0);
    assert_eq!(eval_at("x^2 - 2*x + 1", 3.0), 4.0);
    assert_eq!(eval_at("-x", 2.5), -2.5);
}

#[test]
fn pi_and_trigonometry() {
    assert_close(eval("pi"), std::f64::consts::PI);
    assert_close(eval("sin(pi/2)"), 1.0);
    assert_close(eval("cos(pi)"), -1.0);
    assert_close(eval("tan(pi/4)"), 1.0);
    assert_close(eval_at("sin(x)^2 + cos(x)^2", 0.7), 1.0);
}

// `sec`, `csc` and `cot` are the inverse functions in the standard table, not
// the reciprocals their names usually denote.
#[test]
fn sec_csc_cot_are_inverse_functions_in_the_standard_table() {
    assert_close(eval("sec(1)"), 0.0);
    assert_close(eval("sec(0)"), std::f64::consts::FRAC_PI_2);
    assert_close(eval("csc(1)"), std::f64::consts::FRAC_PI_2);
    assert_close(eval("cot(1)"), std::f64::consts::FRAC_PI_4);
    assert!(eval("sec(2)").is_nan());
}

#[test]
fn conventional_table_uses_reciprocals() {
    let evaluator = Evaluator::default().with_functions(FunctionTable::conventional());
    let at = |src: &str, x: Value| evaluator.eval(&parse(src).unwrap(), x).unwrap();

    assert_close(at("sec(x)", 0.0), 1.0);
    assert_close(at("csc(x)", std::f64::consts::FRAC_PI_2), 1.0);
    assert_close(at("cot(x)", std::f64::consts::FRAC_PI_4), 1.0);
    assert_close(at("sec(x)", 1.0), 1.0 / 1f64.cos());
}

#[test]
fn division_by_zero_follows_ieee_by_default() {
    assert_eq!(eval("1/0"), Value::INFINITY);
    assert_eq!(eval("-1/0"), Value::NEG_INFINITY);
    assert!(eval("0/0").is_nan());
    assert_eq!(eval_at("1/x", 0.0), Value::INFINITY);
}

#[test]
fn division_by_zero_is_an_error_under_the_strict_policy() {
    let evaluator = Evaluator::default().with_division_policy(DivisionPolicy::Error);
    let expr = parse("1 + 2/x").unwrap();

    assert_eq!(evaluator.eval(&expr, 0.0),
               Err(EvaluationError::DivisionByZero { position: 5 }));
    assert_eq!(evaluator.eval(&expr, 2.0), Ok(2.0));
}

#[test]
fn lex_errors_carry_character_and_position() {
    assert_eq!(assert_lex_error("1*2,5"),
               LexError::UnexpectedCharacter { character: ',',
                                               position:  3, });
    assert_eq!(assert_lex_error("   1*2,5").position(), 6);
    assert_eq!(assert_lex_error("1 + 2&5"),
               LexError::UnexpectedCharacter { character: '&',
                                               position:  5, });
    assert!(matches!(assert_lex_error("1 % 2"),
                     LexError::UnexpectedCharacter { character: '%', .. }));
    assert!(matches!(assert_lex_error("x = 1"),
                     LexError::UnexpectedCharacter { character: '=', .. }));
}

#[test]
fn malformed_numbers_are_lex_errors() {
    assert_eq!(assert_lex_error("1 * 2.5.6"),
               LexError::MalformedNumber { literal:  ".6".to_string(),
                                           position: 7, });
    assert_eq!(assert_lex_error("3. + 1"),
               LexError::MalformedNumber { literal:  "3.".to_string(),
                                           position: 0, });
    assert!(matches!(assert_lex_error("."), LexError::MalformedNumber { .. }));
    assert!(matches!(assert_lex_error("1 + .5"), LexError::MalformedNumber { .. }));
}

#[test]
fn misplaced_tokens_are_parse_errors() {
    assert_eq!(assert_parse_error("1 ** 2.5"),
               ParseError::UnexpectedToken { token:    "'*'".to_string(),
                                             position: 3, });
    assert_eq!(assert_parse_error("*1 / 2.5"),
               ParseError::UnexpectedToken { token:    "'*'".to_string(),
                                             position: 0, });
    assert!(matches!(assert_parse_error("()"), ParseError::UnexpectedToken { .. }));
    assert!(matches!(assert_parse_error("1 + )"), ParseError::UnexpectedToken { .. }));
}

#[test]
fn adjacency_without_an_operator_is_rejected() {
    assert!(matches!(assert_parse_error("M1 + 2.5"),
                     ParseError::UnexpectedTrailingTokens { position: 1, .. }));
    assert!(matches!(assert_parse_error("2x"),
                     ParseError::UnexpectedTrailingTokens { .. }));
    assert!(matches!(assert_parse_error("2(3)"),
                     ParseError::UnexpectedTrailingTokens { .. }));
    assert!(matches!(assert_parse_error("2.5e2"),
                     ParseError::UnexpectedTrailingTokens { .. }));
    assert!(matches!(assert_parse_error("1)"),
                     ParseError::UnexpectedTrailingTokens { .. }));
}

#[test]
fn unbalanced_parentheses() {
    assert_eq!(assert_parse_error("(1 + 2"),
               ParseError::ExpectedClosingParen { open:     0,
                                                  position: 6, });
    assert_eq!(assert_parse_error("sin(x"),
               ParseError::ExpectedClosingParen { open:     3,
                                                  position: 5, });
    assert!(matches!(assert_parse_error("((1)"),
                     ParseError::ExpectedClosingParen { open: 0, .. }));
}

#[test]
fn input_exhausted_mid_expression() {
    assert_eq!(assert_parse_error(""),
               ParseError::UnexpectedEndOfInput { position: 0 });
    assert_eq!(assert_parse_error("   "),
               ParseError::UnexpectedEndOfInput { position: 3 });
    assert_eq!(assert_parse_error("1 +"),
               ParseError::UnexpectedEndOfInput { position: 3 });
    assert!(matches!(assert_parse_error("2^"), ParseError::UnexpectedEndOfInput { .. }));
    assert!(matches!(assert_parse_error("-"), ParseError::UnexpectedEndOfInput { .. }));
}

#[test]
fn nesting_past_the_limit_is_a_parse_error() {
    let minus = format!("{}1", "-".repeat(100_000));
    assert_eq!(assert_parse_error(&minus),
               ParseError::NestingTooDeep { limit:    MAX_NESTING_DEPTH,
                                            position: MAX_NESTING_DEPTH + 1, });

    let parens = format!("{}1{}", "(".repeat(100_000), ")".repeat(100_000));
    assert!(matches!(assert_parse_error(&parens),
                     ParseError::NestingTooDeep { position, .. } if position == MAX_NESTING_DEPTH + 1));

    let powers = format!("{}1", "2^".repeat(100_000));
    assert!(matches!(assert_parse_error(&powers), ParseError::NestingTooDeep { .. }));

    let calls = format!("{}x{}", "sin(".repeat(100_000), ")".repeat(100_000));
    assert!(matches!(assert_parse_error(&calls), ParseError::NestingTooDeep { .. }));

    assert!(matches!(newton::compile(&minus),
                     Err(Error::Parse(ParseError::NestingTooDeep { .. }))));
}

#[test]
fn nesting_up_to_the_limit_is_accepted() {
    let minus = format!("{}1", "-".repeat(MAX_NESTING_DEPTH));
    assert_eq!(eval(&minus), 1.0);

    let parens = format!("{}7{}", "(".repeat(MAX_NESTING_DEPTH), ")".repeat(MAX_NESTING_DEPTH));
    assert_eq!(eval(&parens), 7.0);

    let calls = format!("{}0{}", "sin(".repeat(100), ")".repeat(100));
    assert_eq!(eval(&calls), 0.0);
}

// The whole input is tokenized before parsing, so a lex error anywhere wins
// over a parse error that occurs earlier in the text.
#[test]
fn lex_errors_take_precedence_over_earlier_parse_errors() {
    assert_eq!(assert_lex_error("*1,"),
               LexError::UnexpectedCharacter { character: ',',
                                               position:  2, });
    assert!(matches!(assert_lex_error("(1 + ) 2.5.6"), LexError::MalformedNumber { .. }));
    assert_eq!(assert_parse_error("*1"),
               ParseError::UnexpectedToken { token:    "'*'".to_string(),
                                             position: 0, });
}

#[test]
fn unknown_names_fail_at_evaluation_not_parsing() {
    assert!(parse("foo(1)").is_ok());
    assert!(parse("e").is_ok());

    assert_eq!(assert_evaluation_error("foo(1)"),
               EvaluationError::UnknownFunction { name:     "foo".to_string(),
                                                  position: 0, });
    assert_eq!(assert_evaluation_error("2 * e"),
               EvaluationError::UnknownKeyword { name:     "e".to_string(),
                                                 position: 4, });
    assert!(matches!(assert_evaluation_error("x(2)"),
                     EvaluationError::UnknownFunction { .. }));
    assert!(matches!(assert_evaluation_error("sin(PI)"),
                     EvaluationError::UnknownKeyword { .. }));
}

#[test]
fn function_arity_is_checked() {
    use newton::{Expr, ast::BinaryOperator};

    let call = Expr::FunctionCall { name:      "sin".to_string(),
                                    arguments: vec![Expr::Number { value:    1.0,
                                                                   position: 4, },
                                                    Expr::Number { value:    2.0,
                                                                   position: 7, }],
                                    position:  0, };
    assert_eq!(Evaluator::default().eval(&call, 0.0),
               Err(EvaluationError::ArgumentCountMismatch { name:     "sin".to_string(),
                                                            expected: 1,
                                                            found:    2,
                                                            position: 0, }));

    let nested = Expr::BinaryOp { left:     Box::new(Expr::Variable { position: 0 }),
                                  op:       BinaryOperator::Add,
                                  right:    Box::new(call),
                                  position: 2, };
    assert!(Evaluator::default().validate(&nested).is_err());
}

#[test]
fn custom_tables_extend_the_language() {
    let evaluator = Evaluator::default().with_function("sqrt", f64::sqrt)
                                        .with_keyword("e", std::f64::consts::E);

    assert_eq!(evaluator.eval(&parse("sqrt(x)").unwrap(), 16.0), Ok(4.0));
    assert_close(evaluator.eval(&parse("e^1").unwrap(), 0.0).unwrap(),
                 std::f64::consts::E);
    assert!(Evaluator::default().eval(&parse("sqrt(x)").unwrap(), 16.0)
                                .is_err());

    let bare = Evaluator::default().with_functions(FunctionTable::empty());
    assert!(matches!(bare.eval(&parse("sin(x)").unwrap(), 0.0),
                     Err(EvaluationError::UnknownFunction { .. })));
    assert_eq!(bare.eval(&parse("pi * x").unwrap(), 1.0),
               Ok(std::f64::consts::PI));
}

#[test]
fn nodes_and_errors_point_into_the_source() {
    let expr = parse("1 + sin(x)").unwrap();
    assert_eq!(expr.position(), 2);
    let newton::Expr::BinaryOp { left, right, .. } = &expr else {
        panic!("expected a binary operation, got {expr:?}");
    };
    assert_eq!((left.position(), right.position()), (0, 4));

    assert_eq!(assert_parse_error("(1 + 2").position(), 6);
    assert_eq!(assert_parse_error("1 + 2 3").position(), 6);
}

#[test]
fn error_messages_name_the_cause() {
    let message = |src: &str| parse_and_evaluate(src, 0.0).unwrap_err().to_string();

    assert_eq!(message("foo(1)"), "Error at position 0: Unknown function 'foo'.");
    assert_eq!(message("1 $ 2"), "Error at position 2: Unexpected character '$'.");
    assert!(message("(1").contains("Expected closing parenthesis"));
    assert!(message("1 +").contains("Unexpected end of input"));
    assert_eq!(message(&format!("{}1", "-".repeat(300))),
               "Error at position 129: Expression is nested more than 128 levels deep.");
}

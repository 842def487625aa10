use std::thread;

use newton::{
    Error, Evaluator, compile, compile_with,
    error::EvaluationError,
    interpreter::{evaluator::core::DivisionPolicy, value::Value},
    parse_and_evaluate,
};

#[test]
fn compiled_function_matches_one_shot_evaluation() {
    let source = "3*x^3 - 2*x + sin(x) / (1 + x^2)";
    let f = compile(source).unwrap();

    for x in [-3.0, -0.5, 0.0, 0.25, 1.0, 7.5] {
        assert_eq!(f.call(x).unwrap(), parse_and_evaluate(source, x).unwrap());
    }
}

#[test]
fn repeated_calls_are_identical() {
    let f = compile("tan(x) * pi - x^0.5").unwrap();

    for x in [0.1, 0.2, 1.3, 42.0] {
        let first = f.call(x).unwrap();
        let second = f.call(x).unwrap();
        assert_eq!(first.to_bits(), second.to_bits());
    }
}

#[test]
fn calls_with_different_values_do_not_interfere() {
    let f = compile("x * 2").unwrap();

    assert_eq!(f.call(1.0).unwrap(), 2.0);
    assert_eq!(f.call(10.0).unwrap(), 20.0);
    assert_eq!(f.call(1.0).unwrap(), 2.0);
}

#[test]
fn unknown_names_are_reported_when_compiling() {
    assert!(matches!(compile("sin(x) + foo(x)"),
                     Err(Error::Evaluation(EvaluationError::UnknownFunction { .. }))));
    assert!(matches!(compile("x * tau"),
                     Err(Error::Evaluation(EvaluationError::UnknownKeyword { .. }))));
    assert!(matches!(compile("x +"), Err(Error::Parse(_))));
    assert!(matches!(compile("x # 1"), Err(Error::Lex(_))));
}

#[test]
fn strict_division_surfaces_per_call() {
    let evaluator = Evaluator::default().with_division_policy(DivisionPolicy::Error);
    let f = compile_with("1 / x", evaluator).unwrap();

    assert_eq!(f.call(4.0), Ok(0.25));
    assert!(matches!(f.call(0.0), Err(EvaluationError::DivisionByZero { .. })));
}

#[test]
fn compiled_function_is_shared_across_threads() {
    let f = compile("x^2 + cos(x)").unwrap();
    let expected: Vec<Value> = (0..64_u32).map(|i| f.call(f64::from(i)).unwrap()).collect();

    thread::scope(|scope| {
        for _ in 0..8 {
            let f = &f;
            let expected = &expected;
            scope.spawn(move || {
                     for (i, want) in expected.iter().enumerate() {
                         let x = f64::from(u32::try_from(i).unwrap());
                         assert_eq!(f.call(x).unwrap().to_bits(), want.to_bits());
                     }
                 });
        }
    });
}

#[test]
fn clones_share_the_tree() {
    let f = compile("x + 1").unwrap();
    let g = f.clone();

    let handle = thread::spawn(move || g.call(41.0).unwrap());
    assert_eq!(handle.join().unwrap(), 42.0);
    assert_eq!(f.expr().to_string(), "(x + 1)");
}

#[test]
fn closure_view_behaves_like_call() {
    let f = compile("-x").unwrap();
    let g = f.as_fn();

    assert_eq!(g(3.0), Ok(-3.0));
    assert_eq!(g(-3.0), f.call(-3.0));
}

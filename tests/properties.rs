use infixa::complex::{ComplexNumber, Value, new_parser};
use proptest::prelude::*;

/// Well-formed expressions over small integers, `x` and `i`.
fn expression() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![(0_u32..100).prop_map(|n| n.to_string()),
                           Just("x".to_string()),
                           Just("i".to_string())];
    leaf.prop_recursive(4, 32, 2, |inner| {
            let operator = prop::sample::select(vec!["+", "-", "*", "/", "^"]);
            prop_oneof![(inner.clone(), operator, inner.clone()).prop_map(|(a, op, b)| {
                                                                     format!("{a}{op}{b}")
                                                                 }),
                        inner.clone().prop_map(|e| format!("({e})")),
                        inner.prop_map(|e| format!("-{e}"))]
        })
}

fn eval(src: &str) -> Option<ComplexNumber> {
    let mut parser = new_parser().unwrap();
    parser.compile(src).ok()?;
    parser.evaluate().ok()?;
    parser.result()?.complex().ok()
}

proptest! {
    #[test]
    fn arbitrary_text_never_panics(src in "\\PC{0,24}") {
        let mut parser = new_parser().unwrap();
        if parser.compile(&src).is_ok() {
            let _ = parser.evaluate();
        }
    }

    #[test]
    fn expression_like_text_never_panics(src in "[0-9xi+*/^()!~;=,. -]{0,32}") {
        let mut parser = new_parser().unwrap();
        parser.set_variable("x", Value::from(1.5)).unwrap();
        if parser.compile(&src).is_ok() {
            let _ = parser.evaluate();
        }
    }

    #[test]
    fn evaluate_repeats_the_same_result(src in expression(), x in -10.0..10.0_f64) {
        let mut parser = new_parser().unwrap();
        parser.set_variable("x", Value::from(x)).unwrap();
        // Constant parts fold while compiling, so `1/0` fails here.
        if parser.compile(&src).is_err() {
            return Ok(());
        }

        let first = parser.evaluate().map(|()| parser.result().cloned());
        for _ in 0..3 {
            let again = parser.evaluate().map(|()| parser.result().cloned());
            prop_assert_eq!(&again, &first);
        }
    }

    #[test]
    fn integer_arithmetic_matches_rust(a in 0_i32..1000, b in 0_i32..1000, c in 1_i32..1000) {
        let (fa, fb, fc) = (f64::from(a), f64::from(b), f64::from(c));

        prop_assert_eq!(eval(&format!("{a}+{b}*{c}")), Some(ComplexNumber::from(fa + fb * fc)));
        prop_assert_eq!(eval(&format!("{a}-{b}-{c}")), Some(ComplexNumber::from(fa - fb - fc)));
        prop_assert_eq!(eval(&format!("({a}-{b})*{c}")), Some(ComplexNumber::from((fa - fb) * fc)));
        prop_assert_eq!(eval(&format!("-{a}+{b}")), Some(ComplexNumber::from(-fa + fb)));
    }

    #[test]
    fn one_compile_serves_many_bindings(xs in prop::collection::vec(-100.0..100.0_f64, 1..8)) {
        let mut parser = new_parser().unwrap();
        parser.compile("3x - x*x").unwrap();

        for x in xs {
            parser.set_variable("x", Value::from(x)).unwrap();
            parser.evaluate().unwrap();
            prop_assert_eq!(parser.result(), Some(&Value::from(3.0 * x - x * x)));
        }
    }
}

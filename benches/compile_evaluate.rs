//! Compares compiling and evaluating an expression on every use against
//! compiling it once and only re-evaluating.

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use infixa::complex::{Value, new_parser};

const EXPRESSION: &str = "3x^3 - 2x^2 + sin(x) * cos(pi() / 4) + sqrt(x + 1) - 7";

fn bench_compile_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("polynomial");

    group.bench_function("compile_and_evaluate", |b| {
             let mut parser = new_parser().expect("builtins install");
             let mut x = 0.0;
             b.iter(|| {
                  x += 0.5;
                  parser.set_variable("x", Value::from(x)).expect("x is a valid name");
                  parser.compile(black_box(EXPRESSION)).expect("expression compiles");
                  parser.evaluate().expect("expression evaluates");
                  black_box(parser.result().cloned())
              });
         });

    group.bench_function("evaluate_only", |b| {
             let mut parser = new_parser().expect("builtins install");
             parser.compile(EXPRESSION).expect("expression compiles");
             let mut x = 0.0;
             b.iter(|| {
                  x += 0.5;
                  parser.set_variable("x", Value::from(x)).expect("x is a valid name");
                  parser.evaluate().expect("expression evaluates");
                  black_box(parser.result().cloned())
              });
         });

    group.finish();
}

fn bench_constant_folding(c: &mut Criterion) {
    c.bench_function("folded_constant", |b| {
         let mut parser = new_parser().expect("builtins install");
         parser.compile("sum(1, 2, 3, 4, 5) * product(1, 2, 3) / (2^10 - 1)")
               .expect("expression compiles");
         b.iter(|| {
              parser.evaluate().expect("expression evaluates");
              black_box(parser.result().cloned())
          });
     });
}

criterion_group!(benches, bench_compile_evaluate, bench_constant_folding);
criterion_main!(benches);

use infixa::{
    ErrorKind,
    engine::registry::{
        Arity, Associativity, Fixity, Function, Operator, Registry, TokenTable, UnaryOperator,
    },
};

fn add() -> Operator<f64> {
    Operator::new("+", 10, Associativity::Left, |a, b, _| Ok(a.value() + b.value()))
}

#[test]
fn longest_key_wins_regardless_of_insertion_order() {
    let mut forward = TokenTable::new();
    forward.insert("+", 1);
    forward.insert("++", 2);

    let mut backward = TokenTable::new();
    backward.insert("++", 2);
    backward.insert("+", 1);

    for table in [&forward, &backward] {
        assert_eq!(table.longest_match("++1").map(|(_, v)| *v), Some(2));
        assert_eq!(table.longest_match("+1").map(|(_, v)| *v), Some(1));
    }
}

#[test]
fn longest_match_ignores_keys_longer_than_the_input() {
    let mut table = TokenTable::new();
    table.insert("sin", 1);
    table.insert("sinh", 2);

    assert_eq!(table.longest_match("sin").map(|(_, v)| *v), Some(1));
    assert_eq!(table.longest_match("sinh(1)").map(|(_, v)| *v), Some(2));
    assert!(table.longest_match("si").is_none());
}

#[test]
fn empty_key_matches_anything() {
    let mut table = TokenTable::new();
    table.insert("", 0);
    table.insert("*", 1);

    assert_eq!(table.longest_match("*2").map(|(_, v)| *v), Some(1));
    assert_eq!(table.longest_match("x").map(|(_, v)| *v), Some(0));
    assert_eq!(table.longest_match("").map(|(_, v)| *v), Some(0));
}

#[test]
fn reinserting_a_key_replaces_it() {
    let mut table = TokenTable::new();
    assert_eq!(table.insert("x", 1), None);
    assert_eq!(table.insert("x", 2), Some(1));
    assert_eq!(table.len(), 1);
    assert_eq!(table.get("x"), Some(&2));
}

#[test]
fn fresh_registry_holds_only_the_group_function() {
    let registry = Registry::<f64>::new();

    assert_eq!(registry.functions().len(), 1);
    let group = registry.functions().get("").unwrap();
    assert_eq!(group.arity(), Arity::Fixed(1));
    assert_eq!(group.call(&[4.0]).unwrap(), 4.0);

    assert!(registry.operators().is_empty());
    assert!(registry.variables().is_empty());
}

#[test]
fn group_function_cannot_be_replaced() {
    let mut registry = Registry::<f64>::new();
    let err = registry.add_function("", Function::new(Arity::Fixed(0), |_| Ok(0.0)))
                      .unwrap_err();

    assert_eq!(err.kind(), &ErrorKind::EmptyName);
    assert_eq!(registry.functions().get("").unwrap().arity(), Arity::Fixed(1));
}

#[test]
fn unary_operators_need_a_symbol() {
    let mut registry = Registry::<f64>::new();
    let err = registry.add_unary_operator(UnaryOperator::new("", Fixity::Prefix, 1, Ok))
                      .unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::EmptyName);
}

#[test]
fn operators_may_use_the_empty_symbol() {
    let mut registry = Registry::<f64>::new();
    registry.add_operator(Operator::new("", 5, Associativity::Left, |a, b, _| {
                              Ok(a.value() * b.value())
                          }));
    registry.add_operator(add());

    assert_eq!(registry.operators().len(), 2);
    assert!(registry.operators().contains(""));
}

#[test]
fn prefix_and_postfix_tables_are_separate() {
    let mut registry = Registry::<f64>::new();
    registry.add_unary_operator(UnaryOperator::new("-", Fixity::Prefix, 10, |x: f64| Ok(-x)))
            .unwrap();
    registry.add_unary_operator(UnaryOperator::new("!", Fixity::Postfix, 1, Ok))
            .unwrap();

    assert!(registry.unary_operators(Fixity::Prefix).contains("-"));
    assert!(!registry.unary_operators(Fixity::Prefix).contains("!"));
    assert!(registry.unary_operators(Fixity::Postfix).contains("!"));
}

#[test]
fn variables_by_name_and_id() {
    let mut registry = Registry::<f64>::new();
    registry.set_variable("x", 1.0).unwrap();
    registry.set_variable(3_usize, 2.0).unwrap();

    assert_eq!(registry.get_variable("x"), Some(&1.0));
    assert_eq!(registry.get_variable("3"), Some(&2.0));
    assert_eq!(registry.get_variable(3_usize), Some(&2.0));

    assert!(registry.remove_variable("x"));
    assert!(!registry.remove_variable("x"));
    assert_eq!(registry.get_variable("x"), None);

    let err = registry.set_variable("", 0.0).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::EmptyName);
}

#[test]
fn displacement_follows_priority_and_associativity() {
    let mul = Operator::<f64>::new("*", 5, Associativity::Left, |a, b, _| Ok(a.value() * b.value()));
    let pow = Operator::<f64>::new("^", 4, Associativity::Right, |a, b, _| {
        Ok(a.value().powf(*b.value()))
    });

    // `a * b + c`: `+` pops `*`.
    assert!(add().displaces(&mul));
    // `a + b * c`: `*` waits for its right operand.
    assert!(!mul.displaces(&add()));
    // `a ^ b ^ c`: right associative, `^` waits.
    assert!(!pow.displaces(&pow));
    // `a * b * c`: left associative, `*` pops `*`.
    assert!(mul.displaces(&mul));
}

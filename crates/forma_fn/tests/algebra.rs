//! Algebraic laws of the combinators.
//!
//! These tests exercise composition, construction, consumers, predicates and
//! conditions together through the public prelude.

use std::sync::Arc;

use forma_fn::prelude::*;
use forma_tuple::prelude::*;
use parking_lot::Mutex;
use proptest::prelude::*;

// ─────────────────────────────────────────────────────────────────────────
// Composition
// ─────────────────────────────────────────────────────────────────────────

#[test]
fn composition_runs_left_to_right() {
    let unit = compose(|x: &i32| x + 1, |x: &i32| x * 10);
    assert_eq!(unit.apply(&2).unwrap(), 30);
    assert_eq!(unit.stage_count(), 2);
}

#[test]
fn composition_stays_flat_when_extended() {
    let base = (|x: &i32| x + 1).pipe(|x: &i32| x * 2).build();
    let extended = base.and_then(|x: &i32| x - 3).build();

    assert_eq!(base.stage_count(), 2);
    assert_eq!(extended.stage_count(), 3);
    assert_eq!(extended.apply(&4).unwrap(), 7);
}

#[test]
fn composition_changes_types_between_stages() {
    let unit = (|x: &i32| x.to_string())
        .pipe(|s: &String| s.len())
        .and_then(|n: &usize| *n > 2)
        .build();

    assert!(unit.apply(&1234).unwrap());
    assert!(!unit.apply(&7).unwrap());
}

#[test]
fn composition_stops_at_first_error() {
    let calls = Arc::new(Mutex::new(0));
    let seen = Arc::clone(&calls);
    let unit = try_fn(|x: &i32| {
        if *x < 0 {
            Err(FnError::failed("negative"))
        } else {
            Ok(*x)
        }
    })
    .pipe(move |x: &i32| {
        *seen.lock() += 1;
        *x
    })
    .build();

    assert!(unit.apply(&-1).is_err());
    assert_eq!(*calls.lock(), 0);
    assert_eq!(unit.apply(&1).unwrap(), 1);
    assert_eq!(*calls.lock(), 1);
}

proptest! {
    #[test]
    fn composition_is_associative(x in -1000i64..1000, a in -50i64..50, b in 1i64..20) {
        let f = move |v: &i64| v + a;
        let g = move |v: &i64| v * b;
        let h = |v: &i64| v - 7;

        let left = compose(compose(f, g), h);
        let right = compose(f, compose(g, h));

        prop_assert_eq!(left.apply(&x).unwrap(), right.apply(&x).unwrap());
    }
}

// ─────────────────────────────────────────────────────────────────────────
// Construction
// ─────────────────────────────────────────────────────────────────────────

#[test]
fn fork_collects_outputs_in_order() {
    let pair = Construction::new(|x: &i32| x + 1)
        .fork(|x: &i32| x * 2)
        .build();
    assert_eq!(pair.apply(&3).unwrap(), (4, 6));
}

#[test]
fn single_output_is_unwrapped() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);

    let single = Construction::new(|x: &i32| x * 3)
        .with_consumer(consumer(move |x: &i32| sink.lock().push(*x)))
        .build();

    assert_eq!(single.member_count(), 2);
    assert_eq!(single.apply(&5).unwrap(), 15);
    assert_eq!(*log.lock(), vec![5]);
}

#[test]
fn consumers_only_produce_unit() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let first = Arc::clone(&log);
    let second = Arc::clone(&log);

    let effects = Construction::from_consumer(consumer(move |x: &i32| first.lock().push(*x)))
        .with_consumer(consumer(move |x: &i32| second.lock().push(x * 10)))
        .build();

    effects.apply(&2).unwrap();
    assert_eq!(*log.lock(), vec![2, 20]);
}

#[test]
fn unbounded_construction_collects_a_tpn() {
    let wide = Construction::many()
        .fork_dyn(|x: &i32| *x)
        .fork_dyn(|x: &i32| x.to_string())
        .fork_dyn(|x: &i32| *x > 0)
        .build();

    let collected = wide.apply(&9).unwrap();
    assert_eq!(collected.len(), 3);
    let tuple = collected.into_tuple();
    assert_eq!(tuple.get_as::<i32>(0), Some(&9));
    assert_eq!(tuple.get_as::<String>(1).map(String::as_str), Some("9"));
    assert_eq!(tuple.get_as::<bool>(2), Some(&true));
    assert!(tuple.get(3).is_none());
}

#[test]
fn selector_reads_from_constructed_tuples() {
    let second = Construction::new(|x: &i32| x + 1)
        .fork(|x: &i32| x * 2)
        .build()
        .pipe(select::<i32>(1))
        .build();

    assert_eq!(second.apply(&5).unwrap(), Some(10));
}

// ─────────────────────────────────────────────────────────────────────────
// Consumers
// ─────────────────────────────────────────────────────────────────────────

#[test]
fn combined_consumers_stay_flat_and_ordered() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let (a, b, c) = (Arc::clone(&log), Arc::clone(&log), Arc::clone(&log));

    let chain = consumer(move |x: &i32| a.lock().push(("a", *x)))
        .combine(consumer(move |x: &i32| b.lock().push(("b", *x))))
        .combine(consumer(move |x: &i32| c.lock().push(("c", *x))));

    assert!(chain.is_group());
    assert_eq!(chain.len(), 3);

    chain.accept(&1).unwrap();
    assert_eq!(*log.lock(), vec![("a", 1), ("b", 1), ("c", 1)]);
}

// ─────────────────────────────────────────────────────────────────────────
// Predicates and conditions
// ─────────────────────────────────────────────────────────────────────────

#[test]
fn and_short_circuits_in_order() {
    let evaluated = Arc::new(Mutex::new(Vec::new()));
    let (first, second) = (Arc::clone(&evaluated), Arc::clone(&evaluated));

    let positive = Predicate::new(move |x: &i32| {
        first.lock().push("positive");
        *x > 0
    });
    let even = Predicate::new(move |x: &i32| {
        second.lock().push("even");
        x % 2 == 0
    });
    let both = positive.and(even);

    assert!(!both.test(&-4).unwrap());
    assert_eq!(*evaluated.lock(), vec!["positive"]);

    evaluated.lock().clear();
    assert!(both.test(&4).unwrap());
    assert_eq!(*evaluated.lock(), vec!["positive", "even"]);

    evaluated.lock().clear();
    assert!(!both.test(&3).unwrap());
    assert_eq!(*evaluated.lock(), vec!["positive", "even"]);
}

#[test]
fn chained_and_flattens() {
    let all = Predicate::new(|x: &i32| *x > 0)
        .and(Predicate::new(|x: &i32| *x < 100))
        .and(Predicate::new(|x: &i32| x % 5 == 0));

    assert_eq!(all.kind(), PredicateKind::And);
    assert_eq!(all.arity(), 3);
    assert!(all.test(&25).unwrap());
    assert!(!all.test(&26).unwrap());
}

#[test]
fn double_negation_returns_the_original() {
    let even = Predicate::new(|x: &i32| x % 2 == 0);
    let back = even.clone().negate().negate();

    assert!(back.ptr_eq(&even));
    assert_eq!(back.kind(), PredicateKind::Leaf);
}

#[test]
fn condition_without_otherwise_is_absent() {
    let halve = if_true(|x: &i32| x % 2 == 0).then(|x: &i32| x / 2).build();

    assert_eq!(halve.apply(&8).unwrap(), Some(4));
    assert_eq!(halve.apply(&7).unwrap(), None);
}

#[test]
fn condition_with_otherwise_always_answers() {
    let collatz = if_true(|x: &u64| x % 2 == 0)
        .then(|x: &u64| x / 2)
        .otherwise(|x: &u64| 3 * x + 1)
        .build();

    assert_eq!(collatz.apply(&10).unwrap(), Some(5));
    assert_eq!(collatz.apply(&5).unwrap(), Some(16));
}

proptest! {
    #[test]
    fn de_morgan_holds(x in any::<i32>()) {
        let p = Predicate::new(|v: &i32| *v > 0);
        let q = Predicate::new(|v: &i32| v % 3 == 0);

        let left = p.clone().and(q.clone()).negate();
        let right = p.negate().or(q.negate());

        prop_assert_eq!(left.test(&x).unwrap(), right.test(&x).unwrap());
    }
}

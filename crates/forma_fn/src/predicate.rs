//! Predicates and their boolean algebra.
//!
//! A [`Predicate`] is a tagged tree of leaves, negations and n-ary and/or
//! nodes. The builders keep the tree shallow:
//!
//! - `and` on an and-node appends to it instead of nesting (same for `or`)
//! - `negate` on a negation returns the original predicate
//!
//! And-nodes stop at the first `false` member, or-nodes at the first `true`.
//!
//! # Example
//!
//! ```
//! use forma_fn::prelude::*;
//!
//! let positive = Predicate::new(|x: &i32| *x > 0);
//! let even = Predicate::new(|x: &i32| x % 2 == 0);
//!
//! let positive_even = positive.clone().and(even.clone());
//! assert!(positive_even.test(&4).unwrap());
//! assert!(!positive_even.test(&-4).unwrap());
//!
//! let odd = even.clone().negate();
//! assert!(odd.test(&3).unwrap());
//! assert!(odd.negate().ptr_eq(&even));
//! ```

use core::fmt;
use std::sync::Arc;

use forma_tuple::element::Element;
use forma_tuple::tuple::Tuple;

use crate::error::FnError;
use crate::func::{Func, Value};

/// The shape of a predicate's root node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredicateKind {
    /// A single test.
    Leaf,
    /// The negation of another predicate.
    Not,
    /// True when every member is true.
    And,
    /// True when any member is true.
    Or,
}

enum Node<I> {
    Leaf(Arc<dyn Func<I, bool>>),
    Not(Predicate<I>),
    And(Vec<Predicate<I>>),
    Or(Vec<Predicate<I>>),
}

impl<I> Clone for Node<I> {
    fn clone(&self) -> Self {
        match self {
            Node::Leaf(func) => Node::Leaf(Arc::clone(func)),
            Node::Not(inner) => Node::Not(inner.clone()),
            Node::And(members) => Node::And(members.clone()),
            Node::Or(members) => Node::Or(members.clone()),
        }
    }
}

/// A boolean-valued unit composable with `and`, `or` and `negate`.
///
/// Cloning is cheap and clones share structure, which
/// [`ptr_eq`](Self::ptr_eq) can observe.
pub struct Predicate<I> {
    node: Arc<Node<I>>,
}

impl<I> Clone for Predicate<I> {
    fn clone(&self) -> Self {
        Self {
            node: Arc::clone(&self.node),
        }
    }
}

impl<I: Value> Predicate<I> {
    /// Creates a predicate from a closure.
    pub fn new<F>(test: F) -> Self
    where
        F: Fn(&I) -> bool + Send + Sync + 'static,
    {
        Self::from_func(test)
    }

    /// Creates a predicate from any boolean-valued unit.
    pub fn from_func<F: Func<I, bool>>(func: F) -> Self {
        Self::from_node(Node::Leaf(Arc::new(func)))
    }

    fn from_node(node: Node<I>) -> Self {
        Self {
            node: Arc::new(node),
        }
    }

    /// Evaluates the predicate.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by an evaluated leaf. Members skipped by
    /// short-circuiting are never evaluated.
    pub fn test(&self, input: &I) -> Result<bool, FnError> {
        match &*self.node {
            Node::Leaf(func) => func.apply(input),
            Node::Not(inner) => Ok(!inner.test(input)?),
            Node::And(members) => {
                for member in members {
                    if !member.test(input)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Node::Or(members) => {
                for member in members {
                    if member.test(input)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
        }
    }

    /// Conjunction. Appends `other` when `self` is already an and-node.
    #[must_use]
    pub fn and(mut self, other: Predicate<I>) -> Self {
        if matches!(*self.node, Node::And(_)) {
            if let Node::And(members) = Arc::make_mut(&mut self.node) {
                members.push(other);
            }
            return self;
        }
        Self::from_node(Node::And(vec![self, other]))
    }

    /// Disjunction. Appends `other` when `self` is already an or-node.
    #[must_use]
    pub fn or(mut self, other: Predicate<I>) -> Self {
        if matches!(*self.node, Node::Or(_)) {
            if let Node::Or(members) = Arc::make_mut(&mut self.node) {
                members.push(other);
            }
            return self;
        }
        Self::from_node(Node::Or(vec![self, other]))
    }

    /// Negation. Negating a negation returns the original predicate.
    #[must_use]
    pub fn negate(self) -> Self {
        if let Node::Not(inner) = &*self.node {
            return inner.clone();
        }
        Self::from_node(Node::Not(self))
    }

    /// The kind of the root node.
    #[must_use]
    pub fn kind(&self) -> PredicateKind {
        match &*self.node {
            Node::Leaf(_) => PredicateKind::Leaf,
            Node::Not(_) => PredicateKind::Not,
            Node::And(_) => PredicateKind::And,
            Node::Or(_) => PredicateKind::Or,
        }
    }

    /// Number of direct members: the list length for and/or nodes, 1 otherwise.
    #[must_use]
    pub fn arity(&self) -> usize {
        match &*self.node {
            Node::And(members) | Node::Or(members) => members.len(),
            Node::Leaf(_) | Node::Not(_) => 1,
        }
    }

    /// Returns `true` if both handles share the same node.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.node, &other.node)
    }
}

impl<I: Value> Func<I, bool> for Predicate<I> {
    fn apply(&self, input: &I) -> Result<bool, FnError> {
        self.test(input)
    }

    fn is_pure(&self) -> bool {
        match &*self.node {
            Node::Leaf(func) => func.is_pure(),
            Node::Not(inner) => inner.is_pure(),
            Node::And(members) | Node::Or(members) => members.iter().all(Func::<I, bool>::is_pure),
        }
    }

    fn name(&self) -> &'static str {
        "predicate"
    }
}

impl<I: 'static> fmt::Debug for Predicate<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.node {
            Node::Leaf(func) => f.debug_tuple("Leaf").field(&func.name()).finish(),
            Node::Not(inner) => f.debug_tuple("Not").field(inner).finish(),
            Node::And(members) => f.debug_tuple("And").field(members).finish(),
            Node::Or(members) => f.debug_tuple("Or").field(members).finish(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// PredicateConstruction
// ─────────────────────────────────────────────────────────────────────────────

type ElementTest = Arc<dyn Fn(&dyn Element) -> bool + Send + Sync>;

/// Positional predicates over a tuple: member `i` tests element `i`.
///
/// The whole test is `true` only when the tuple's size equals the number of
/// members and every member accepts its element. A size mismatch, or an
/// element of an unexpected type, is `false` rather than an error.
///
/// ```
/// use forma_fn::prelude::*;
///
/// let shape = PredicateConstruction::new()
///     .with(|n: &i32| *n > 0)
///     .with(|s: &String| !s.is_empty());
///
/// assert!(shape.test(&(1_i32, String::from("a"))));
/// assert!(!shape.test(&(0_i32, String::from("a"))));
/// assert!(!shape.test(&(1_i32, String::from("a"), true)));
/// ```
#[derive(Clone, Default)]
pub struct PredicateConstruction {
    members: Vec<ElementTest>,
}

impl PredicateConstruction {
    /// Creates an empty construction, which only accepts the empty tuple.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a test for the next position.
    #[must_use]
    pub fn with<T, F>(mut self, test: F) -> Self
    where
        T: Element,
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.members.push(Arc::new(move |element: &dyn Element| {
            element.downcast_ref::<T>().is_some_and(&test)
        }));
        self
    }

    /// Number of positional tests.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` when there are no positional tests.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Tests every element of `tuple` against its positional member.
    pub fn test(&self, tuple: &dyn Tuple) -> bool {
        tuple.size() == self.members.len()
            && self
                .members
                .iter()
                .enumerate()
                .all(|(index, member)| tuple.get(index).is_some_and(|element| member(element)))
    }
}

impl<T: Tuple + Value> Func<T, bool> for PredicateConstruction {
    fn apply(&self, input: &T) -> Result<bool, FnError> {
        Ok(self.test(input))
    }

    fn name(&self) -> &'static str {
        "predicate construction"
    }
}

impl fmt::Debug for PredicateConstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PredicateConstruction")
            .field("members", &self.members.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::func::{impure, try_fn};
    use core::sync::atomic::{AtomicUsize, Ordering};

    fn counted(
        counter: &Arc<AtomicUsize>,
        test: impl Fn(&i32) -> bool + Send + Sync + 'static,
    ) -> Predicate<i32> {
        let counter = Arc::clone(counter);
        Predicate::new(move |x: &i32| {
            counter.fetch_add(1, Ordering::SeqCst);
            test(x)
        })
    }

    #[test]
    fn and_short_circuits_on_first_false() {
        let positive_calls = Arc::new(AtomicUsize::new(0));
        let even_calls = Arc::new(AtomicUsize::new(0));
        let both = counted(&positive_calls, |x| *x > 0).and(counted(&even_calls, |x| x % 2 == 0));

        assert!(!both.test(&-4).unwrap());
        assert_eq!(positive_calls.load(Ordering::SeqCst), 1);
        assert_eq!(even_calls.load(Ordering::SeqCst), 0);

        assert!(both.test(&4).unwrap());
        assert_eq!(even_calls.load(Ordering::SeqCst), 1);

        assert!(!both.test(&3).unwrap());
    }

    #[test]
    fn or_short_circuits_on_first_true() {
        let second_calls = Arc::new(AtomicUsize::new(0));
        let either = Predicate::new(|x: &i32| *x == 1).or(counted(&second_calls, |x| *x == 2));

        assert!(either.test(&1).unwrap());
        assert_eq!(second_calls.load(Ordering::SeqCst), 0);
        assert!(either.test(&2).unwrap());
        assert!(!either.test(&3).unwrap());
    }

    #[test]
    fn repeated_and_flattens() {
        let p = Predicate::new(|x: &i32| *x > 0)
            .and(Predicate::new(|x: &i32| *x < 100))
            .and(Predicate::new(|x: &i32| x % 2 == 0))
            .and(Predicate::new(|x: &i32| x % 3 == 0));

        assert_eq!(p.kind(), PredicateKind::And);
        assert_eq!(p.arity(), 4);
        assert!(p.test(&6).unwrap());
        assert!(!p.test(&9).unwrap());
    }

    #[test]
    fn repeated_or_flattens() {
        let first_calls = Arc::new(AtomicUsize::new(0));
        let second_calls = Arc::new(AtomicUsize::new(0));
        let third_calls = Arc::new(AtomicUsize::new(0));
        let any = counted(&first_calls, |x| *x == 1)
            .or(counted(&second_calls, |x| *x == 2))
            .or(counted(&third_calls, |x| *x == 3));

        assert_eq!(any.kind(), PredicateKind::Or);
        assert_eq!(any.arity(), 3);

        assert!(any.test(&2).unwrap());
        assert_eq!(first_calls.load(Ordering::SeqCst), 1);
        assert_eq!(second_calls.load(Ordering::SeqCst), 1);
        assert_eq!(third_calls.load(Ordering::SeqCst), 0);

        assert!(!any.test(&4).unwrap());
        assert_eq!(third_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn debug_shows_the_tree() {
        let p = Predicate::new(|x: &i32| *x > 0).and(Predicate::new(|x: &i32| *x < 10));
        let rendered = format!("{:?}", p);
        assert!(rendered.starts_with("And(["));
        assert!(rendered.contains("Leaf("));
        assert!(format!("{:?}", p.negate()).starts_with("Not(And"));
    }

    #[test]
    fn and_then_or_nests_once() {
        let p = Predicate::new(|x: &i32| *x > 0)
            .and(Predicate::new(|x: &i32| *x < 10))
            .or(Predicate::new(|x: &i32| *x == -1));

        assert_eq!(p.kind(), PredicateKind::Or);
        assert_eq!(p.arity(), 2);
        assert!(p.test(&-1).unwrap());
        assert!(p.test(&5).unwrap());
        assert!(!p.test(&50).unwrap());
    }

    #[test]
    fn flattening_a_shared_node_leaves_the_original_untouched() {
        let base = Predicate::new(|x: &i32| *x > 0).and(Predicate::new(|x: &i32| *x < 10));
        let extended = base.clone().and(Predicate::new(|x: &i32| *x != 5));

        assert_eq!(base.arity(), 2);
        assert_eq!(extended.arity(), 3);
        assert!(base.test(&5).unwrap());
        assert!(!extended.test(&5).unwrap());
    }

    #[test]
    fn double_negation_returns_original() {
        let p = Predicate::new(|x: &i32| *x > 0);
        let negated = p.clone().negate();
        assert_eq!(negated.kind(), PredicateKind::Not);
        assert!(negated.test(&-1).unwrap());

        let back = negated.negate();
        assert!(back.ptr_eq(&p));
        assert_eq!(back.kind(), PredicateKind::Leaf);
    }

    #[test]
    fn errors_propagate() {
        let failing = Predicate::from_func(try_fn(|_: &i32| -> Result<bool, FnError> {
            Err(FnError::failed("cannot decide"))
        }));
        let p = Predicate::new(|_: &i32| true).and(failing);
        assert!(matches!(p.test(&0), Err(FnError::Failed(_))));
    }

    #[test]
    fn purity_follows_leaves() {
        let pure = Predicate::new(|x: &i32| *x > 0);
        let side_effect = Predicate::from_func(impure(|x: &i32| *x > 0));
        assert!(pure.is_pure());
        assert!(!pure.and(side_effect).is_pure());
    }

    #[test]
    fn construction_rejects_size_mismatch() {
        let two = PredicateConstruction::new()
            .with(|x: &i32| *x > 0)
            .with(|x: &i32| *x > 0);

        assert!(two.test(&(1_i32, 2_i32)));
        assert!(!two.test(&(1_i32,)));
        assert!(!two.test(&(1_i32, 2_i32, 3_i32)));
    }

    #[test]
    fn construction_rejects_unexpected_types() {
        let one = PredicateConstruction::new().with(|x: &i32| *x > 0);
        assert!(!one.test(&(1_u64,)));
        assert!(one.apply(&(1_i32,)).unwrap());
    }

    #[test]
    fn construction_over_float_elements() {
        let in_unit = PredicateConstruction::new()
            .with(|x: &f64| (0.0..=1.0).contains(x))
            .with(|label: &&str| !label.is_empty());

        assert!(in_unit.test(&(0.5_f64, "half")));
        assert!(!in_unit.test(&(1.5_f64, "over")));
        assert!(!in_unit.test(&(0.5_f32, "narrow")));
    }

    #[test]
    fn empty_construction_accepts_empty_tuple() {
        let none = PredicateConstruction::new();
        assert!(none.test(&()));
        assert!(!none.test(&(1_i32,)));
    }
}

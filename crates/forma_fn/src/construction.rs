//! Construction: one input distributed to many members.
//!
//! Members run sequentially on the caller's thread, in the order they were
//! registered. Every function member contributes one output slot; consumer
//! members run for their side effect and contribute nothing. The collected
//! slots then collapse:
//!
//! | Function members | Output |
//! |------------------|--------|
//! | 0 | `()` |
//! | 1 | the member's value, unwrapped |
//! | 2..=8 | a native tuple in registration order |
//!
//! Constructions wider than the fixed tuple arities use
//! [`Construction::many`], which collects into [`Collected`].
//!
//! # Example
//!
//! ```
//! use forma_fn::prelude::*;
//!
//! let stats = Construction::new(|v: &Vec<i32>| v.len())
//!     .fork(|v: &Vec<i32>| v.iter().sum::<i32>())
//!     .fork(|v: &Vec<i32>| v.iter().copied().max())
//!     .build();
//!
//! assert_eq!(stats.apply(&vec![3, 1, 2]).unwrap(), (3, 6, Some(3)));
//! ```

use core::any::type_name;
use core::fmt;
use core::marker::PhantomData;
use std::sync::Arc;

use forma_tuple::element::Element;
use forma_tuple::tpn::TpN;
use forma_tuple::tuple::Tuple;
use variadics_please::all_tuples;

use crate::erased::{AnyValue, SharedFunc, downcast_value, erase};
use crate::error::FnError;
use crate::func::{Func, Signature, Value};

const UNIT_NAME: &str = "construction";

// ─────────────────────────────────────────────────────────────────────────────
// Members
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub(crate) enum Member {
    Function(SharedFunc),
    Consumer(SharedFunc),
}

impl Member {
    fn unit(&self) -> &SharedFunc {
        match self {
            Member::Function(unit) | Member::Consumer(unit) => unit,
        }
    }
}

/// Runs every member on `input`, returning the function members' outputs.
pub(crate) fn run_members<I: Value>(
    members: &[Member],
    input: &I,
) -> Result<Vec<AnyValue>, FnError> {
    let mut outputs = Vec::with_capacity(members.len());
    for member in members {
        match member {
            Member::Function(unit) => outputs.push(unit.apply_erased(input)?),
            Member::Consumer(unit) => {
                unit.apply_erased(input)?;
            }
        }
    }
    Ok(outputs)
}

// ─────────────────────────────────────────────────────────────────────────────
// Slots
// ─────────────────────────────────────────────────────────────────────────────

/// Describes how collected outputs collapse into a construction's result.
///
/// `S` in [`Construction<I, S>`] is the tuple of output types registered so
/// far; [`Many`] marks the unbounded form.
pub trait Slots: 'static {
    /// The construction's result type.
    type Output: Value;

    /// Assembles the outputs, given in registration order.
    ///
    /// # Errors
    ///
    /// Returns an error when `values` does not match the registered types.
    fn assemble(values: Vec<AnyValue>) -> Result<Self::Output, FnError>;
}

fn take<T: Value>(values: &mut impl Iterator<Item = AnyValue>) -> Result<T, FnError> {
    let value = values.next().ok_or(FnError::MissingOutput {
        expected: type_name::<T>(),
        unit: UNIT_NAME,
    })?;
    downcast_value(value, UNIT_NAME)
}

impl Slots for () {
    type Output = ();

    fn assemble(_values: Vec<AnyValue>) -> Result<(), FnError> {
        Ok(())
    }
}

impl<A: Value> Slots for (A,) {
    type Output = A;

    fn assemble(values: Vec<AnyValue>) -> Result<A, FnError> {
        take(&mut values.into_iter())
    }
}

macro_rules! impl_slots {
    ($($P:ident),*) => {
        impl<$($P: Value),*> Slots for ($($P,)*) {
            type Output = Self;

            fn assemble(values: Vec<AnyValue>) -> Result<Self, FnError> {
                let mut values = values.into_iter();
                Ok(($(take::<$P>(&mut values)?,)*))
            }
        }
    };
}

all_tuples!(impl_slots, 2, 8, P);

/// Type-level append of one output slot.
pub trait Push<V> {
    /// The slot tuple after appending `V`.
    type Pushed: Slots;
}

macro_rules! impl_push {
    ($($P:ident),*) => {
        impl<$($P: Value,)* V: Value> Push<V> for ($($P,)*) {
            type Pushed = ($($P,)* V,);
        }
    };
}

all_tuples!(impl_push, 0, 7, P);

// ─────────────────────────────────────────────────────────────────────────────
// Unbounded form
// ─────────────────────────────────────────────────────────────────────────────

/// Slot marker for constructions of any width.
#[derive(Debug, Clone, Copy)]
pub struct Many;

/// Result of an unbounded construction.
#[derive(Debug)]
pub enum Collected {
    /// No function members.
    Absent,
    /// Exactly one function member.
    Single(Box<dyn Element>),
    /// Two or more function members, in registration order.
    Tuple(TpN),
}

impl Collected {
    fn from_elements(mut elements: Vec<Box<dyn Element>>) -> Self {
        match elements.len() {
            0 => Collected::Absent,
            1 => match elements.pop() {
                Some(single) => Collected::Single(single),
                None => Collected::Absent,
            },
            _ => Collected::Tuple(TpN::new(elements)),
        }
    }

    /// Returns `true` for [`Collected::Absent`].
    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self, Collected::Absent)
    }

    /// Number of collected values.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Collected::Absent => 0,
            Collected::Single(_) => 1,
            Collected::Tuple(tuple) => tuple.size(),
        }
    }

    /// Returns `true` when nothing was collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the value of a single-member construction.
    #[must_use]
    pub fn as_single(&self) -> Option<&dyn Element> {
        match self {
            Collected::Single(element) => Some(&**element),
            _ => None,
        }
    }

    /// Returns the tuple of a multi-member construction.
    #[must_use]
    pub fn as_tuple(&self) -> Option<&TpN> {
        match self {
            Collected::Tuple(tuple) => Some(tuple),
            _ => None,
        }
    }

    /// Converts any result into a tuple of its collected values.
    #[must_use]
    pub fn into_tuple(self) -> TpN {
        match self {
            Collected::Absent => TpN::empty(),
            Collected::Single(element) => TpN::new(vec![element]),
            Collected::Tuple(tuple) => tuple,
        }
    }
}

impl Slots for Many {
    type Output = Collected;

    fn assemble(values: Vec<AnyValue>) -> Result<Collected, FnError> {
        let elements = values
            .into_iter()
            .map(|value| downcast_value::<Box<dyn Element>>(value, UNIT_NAME))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Collected::from_elements(elements))
    }
}

/// A functional unit whose output has been boxed as a tuple element.
///
/// Used to build constructions wider than eight members, where each member
/// may produce a different type.
pub struct DynFunc<I> {
    unit: SharedFunc,
    _signature: Signature<I, Box<dyn Element>>,
}

impl<I: Value> DynFunc<I> {
    /// Wraps `func` so its output is boxed as an [`Element`].
    pub fn new<F, V>(func: F) -> Self
    where
        F: Func<I, V>,
        V: Element,
    {
        Self {
            unit: erase::<_, I, Box<dyn Element>>(ToElement {
                func,
                _value: PhantomData::<fn() -> V>,
            }),
            _signature: PhantomData,
        }
    }
}

impl<I> fmt::Debug for DynFunc<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DynFunc").field(&self.unit.name()).finish()
    }
}

struct ToElement<F, V> {
    func: F,
    _value: PhantomData<fn() -> V>,
}

impl<I, V, F> Func<I, Box<dyn Element>> for ToElement<F, V>
where
    V: Element,
    F: Func<I, V>,
{
    fn apply(&self, input: &I) -> Result<Box<dyn Element>, FnError> {
        Ok(Box::new(self.func.apply(input)?))
    }

    fn is_pure(&self) -> bool {
        self.func.is_pure()
    }

    fn name(&self) -> &'static str {
        self.func.name()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Construction (builder)
// ─────────────────────────────────────────────────────────────────────────────

/// Builder for a construction taking `I` and collecting the slot types `S`.
pub struct Construction<I, S> {
    pub(crate) members: Vec<Member>,
    _signature: Signature<I, S>,
}

impl<I, S> Clone for Construction<I, S> {
    fn clone(&self) -> Self {
        Self {
            members: self.members.clone(),
            _signature: PhantomData,
        }
    }
}

impl<I: Value> Construction<I, ()> {
    /// Starts a construction with no members.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            members: Vec::new(),
            _signature: PhantomData,
        }
    }

    /// Starts a construction with its first function member.
    pub fn new<F, O>(first: F) -> Construction<I, (O,)>
    where
        F: Func<I, O>,
        O: Value,
    {
        Self::empty().fork(first)
    }

    /// Starts a construction whose first member is a consumer.
    pub fn from_consumer<C, X>(consumer: C) -> Self
    where
        C: Func<I, X>,
        X: Value,
    {
        Self::empty().with_consumer(consumer)
    }
}

impl<I: Value, S: Slots> Construction<I, S> {
    /// Appends a function member, adding one output slot.
    pub fn fork<V, G>(mut self, member: G) -> Construction<I, S::Pushed>
    where
        S: Push<V>,
        V: Value,
        G: Func<I, V>,
    {
        self.members.push(Member::Function(erase(member)));
        Construction {
            members: self.members,
            _signature: PhantomData,
        }
    }

    /// Appends a consumer member. Its output, if any, is discarded and it
    /// takes no output slot.
    pub fn with_consumer<C, X>(mut self, consumer: C) -> Self
    where
        C: Func<I, X>,
        X: Value,
    {
        self.members
            .push(Member::Consumer(erase(consumer.into_consumer())));
        self
    }

    /// Total number of members, consumers included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` if no member has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Number of members that contribute an output slot.
    #[must_use]
    pub fn output_count(&self) -> usize {
        self.members
            .iter()
            .filter(|member| matches!(member, Member::Function(_)))
            .count()
    }

    /// Freezes the member list into an immutable, shareable unit.
    #[must_use]
    pub fn build(self) -> Constructed<I, S> {
        tracing::trace!(
            members = self.members.len(),
            outputs = self.output_count(),
            "construction built"
        );
        Constructed {
            members: self.members.into(),
            _signature: PhantomData,
        }
    }
}

impl<I: Value> Construction<I, Many> {
    /// Starts an unbounded construction with no members.
    #[must_use]
    pub fn many() -> Self {
        Self {
            members: Vec::new(),
            _signature: PhantomData,
        }
    }

    /// Starts an unbounded construction from a list of members.
    pub fn of_all(members: impl IntoIterator<Item = DynFunc<I>>) -> Self {
        members.into_iter().fold(Self::many(), Self::push_dyn)
    }

    /// Appends a boxed-output member.
    #[must_use]
    pub fn push_dyn(mut self, member: DynFunc<I>) -> Self {
        self.members.push(Member::Function(member.unit));
        self
    }

    /// Appends a function member whose output is boxed as an [`Element`].
    pub fn fork_dyn<V, G>(self, member: G) -> Self
    where
        V: Element,
        G: Func<I, V>,
    {
        self.push_dyn(DynFunc::new(member))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Constructed (frozen)
// ─────────────────────────────────────────────────────────────────────────────

/// A frozen construction.
pub struct Constructed<I, S> {
    members: Arc<[Member]>,
    _signature: Signature<I, S>,
}

impl<I, S> Clone for Constructed<I, S> {
    fn clone(&self) -> Self {
        Self {
            members: Arc::clone(&self.members),
            _signature: PhantomData,
        }
    }
}

impl<I: Value, S: Slots> Constructed<I, S> {
    /// Total number of members, consumers included.
    #[must_use]
    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Returns a builder seeded with this construction's members.
    #[must_use]
    pub fn reopen(&self) -> Construction<I, S> {
        Construction {
            members: self.members.to_vec(),
            _signature: PhantomData,
        }
    }
}

impl<I: Value, S: Slots> Func<I, S::Output> for Constructed<I, S> {
    fn apply(&self, input: &I) -> Result<S::Output, FnError> {
        S::assemble(run_members(&self.members, input)?)
    }

    fn is_pure(&self) -> bool {
        self.members.iter().all(|member| member.unit().is_pure())
    }

    fn name(&self) -> &'static str {
        UNIT_NAME
    }
}

impl<I, S> fmt::Debug for Constructed<I, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        for member in self.members.iter() {
            match member {
                Member::Function(unit) => list.entry(&unit.name()),
                Member::Consumer(unit) => list.entry(&format_args!("consumer {}", unit.name())),
            };
        }
        list.finish()
    }
}

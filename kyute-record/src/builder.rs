//! Path builders.
use crate::{
    lens::{Lens, LensCompose, SomeLens},
    mutation::Mutation,
    path::{FieldPath, StructuralPath},
    predicate::{Predicate, Technique},
    value::Value,
};
use std::{cell::RefCell, fmt, mem, rc::Rc};
use tracing::trace;

/// The list of records of a recorder, shared by every builder spawned from it.
///
/// Single-threaded: the list is behind an `Rc<RefCell<_>>`, so neither the accumulator nor the
/// builders holding it can leave the thread that created them.
pub(crate) struct Accumulator<R>(Rc<RefCell<Vec<R>>>);

impl<R> Accumulator<R> {
    pub(crate) fn new() -> Accumulator<R> {
        Accumulator(Rc::new(RefCell::new(Vec::new())))
    }

    /// Appends a record.
    pub(crate) fn push(&self, record: R) {
        // the recorder holds the other reference until it is finished
        debug_assert!(
            Rc::strong_count(&self.0) > 1,
            "record appended after its recorder was finished"
        );
        self.0.borrow_mut().push(record)
    }

    pub(crate) fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Removes and returns all records.
    pub(crate) fn take(&self) -> Vec<R> {
        mem::take(&mut *self.0.borrow_mut())
    }
}

// #26925
impl<R> Clone for Accumulator<R> {
    fn clone(&self) -> Self {
        Accumulator(self.0.clone())
    }
}

impl<R: fmt::Debug> fmt::Debug for Accumulator<R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.0.borrow().iter()).finish()
    }
}

//--------------------------------------------------------------------------------------------------

/// Walking cursor over the fields of `Root`.
///
/// `Leaf` is the type of the field reached so far, `L` the lens from `Root` to it, and `R` the kind of
/// record produced by the terminal operations ([`Mutation`] or [`Predicate`]).
///
/// Navigating never records anything; only the terminal operations (`set`, `is_equal`, `is_less`,
/// `is_greater`) append a record to the recorder the builder was spawned from.
#[must_use = "a path builder records nothing until a terminal operation is called"]
pub struct PathBuilder<Root, Leaf, L, R> {
    records: Accumulator<R>,
    path: StructuralPath<Root, Leaf, L>,
}

impl<Root, Leaf, L, R> PathBuilder<Root, Leaf, L, R>
where
    L: Lens<Root, Leaf>,
{
    pub(crate) fn new(records: Accumulator<R>, lens: L) -> PathBuilder<Root, Leaf, L, R> {
        PathBuilder {
            records,
            path: StructuralPath::new(lens),
        }
    }

    /// Navigates to a field of the current field.
    pub fn field<M, Next>(self, lens: M) -> PathBuilder<Root, Next, LensCompose<L, M, Leaf>, R>
    where
        M: Lens<Leaf, Next>,
    {
        PathBuilder {
            records: self.records,
            path: self.path.extend(lens),
        }
    }

    /// Navigates to an optional field of the current field, and through it to the wrapped value.
    ///
    /// Shorthand for `.field(lens).some()`.
    #[allow(clippy::type_complexity)]
    pub fn field_opt<M, Next>(
        self,
        lens: M,
    ) -> PathBuilder<Root, Next, LensCompose<LensCompose<L, M, Leaf>, SomeLens<Next>, Option<Next>>, R>
    where
        M: Lens<Leaf, Option<Next>>,
        Next: 'static,
    {
        self.field(lens).some()
    }

    /// Returns the keys traversed so far.
    pub fn steps(&self) -> &FieldPath {
        self.path.steps()
    }
}

impl<Root, T, L, R> PathBuilder<Root, Option<T>, L, R>
where
    L: Lens<Root, Option<T>>,
    T: 'static,
{
    /// Navigates through the current optional field to the wrapped value.
    ///
    /// Records built past this point are skipped (mutations) or fail (predicates) on instances
    /// where the option is `None`.
    pub fn some(self) -> PathBuilder<Root, T, LensCompose<L, SomeLens<T>, Option<T>>, R> {
        self.field(SomeLens::new())
    }
}

impl<Root, Leaf, L> PathBuilder<Root, Leaf, L, Mutation<Root>>
where
    Root: 'static,
    Leaf: Value,
    L: Lens<Root, Leaf> + Send + Sync + 'static,
{
    /// Records a write of `value` to the current field.
    pub fn set(self, value: Leaf) {
        let (lens, steps) = self.path.into_parts();
        trace!(path = %steps, ?value, "recorded mutation");
        self.records.push(Mutation::new(steps, lens, value));
    }
}

impl<Root, Leaf, L> PathBuilder<Root, Leaf, L, Predicate<Root>>
where
    Root: 'static,
    Leaf: Value,
    L: Lens<Root, Leaf> + Send + Sync + 'static,
{
    /// Records a test that the current field is equal to `value`.
    pub fn is_equal(self, to: Leaf) {
        self.record(Technique::Equal, to, |field, value| field == value)
    }

    /// Records a test that the current field is less than `value`.
    pub fn is_less(self, than: Leaf)
    where
        Leaf: Ord,
    {
        self.record(Technique::LessThan, than, |field, value| field < value)
    }

    /// Records a test that the current field is greater than `value`.
    pub fn is_greater(self, than: Leaf)
    where
        Leaf: Ord,
    {
        self.record(Technique::GreaterThan, than, |field, value| field > value)
    }

    fn record(self, technique: Technique, value: Leaf, compare: fn(&Leaf, &Leaf) -> bool) {
        let (lens, steps) = self.path.into_parts();
        trace!(path = %steps, ?technique, ?value, "recorded predicate");
        self.records
            .push(Predicate::new(steps, lens, technique, value, compare));
    }
}

impl<Root, Leaf, L, R> fmt::Debug for PathBuilder<Root, Leaf, L, R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("PathBuilder")
            .field("steps", &format_args!("{}", self.path.steps()))
            .finish_non_exhaustive()
    }
}

use crate::path::FieldPath;
use std::marker::PhantomData;

mod field;
pub(crate) mod option;

pub use field::{FieldKey, FieldLens};
pub use option::SomeLens;

/// Trait implemented by "lens" types, which act like a reified accessor for
/// some "child" part of type B of a "parent" object of type A.
///
/// Access is done in closure-passing style: the lens hands a reference to the child part to the
/// closure instead of returning it. Both accessors return `None` if the part is not reachable on
/// this particular instance (e.g. the path goes through an `Option` that is `None`).
pub trait Lens<A, B> {
    // --- Accessors ---
    fn try_with<R, F: FnOnce(&B) -> R>(&self, data: &A, f: F) -> Option<R>;
    fn try_with_mut<R, F: FnOnce(&mut B) -> R>(&self, data: &mut A, f: F) -> Option<R>;

    // --- Composition ---

    /// Returns the sequence of field keys traversed by this lens, from A to B.
    ///
    /// Two lenses with equal paths access the same part of A.
    fn path(&self) -> FieldPath;

    /// Lens composition.
    fn compose<K, C>(self, rhs: K) -> LensCompose<Self, K, B>
    where
        Self: Sized,
        K: Lens<B, C>,
    {
        LensCompose(self, rhs, PhantomData)
    }
}

pub trait LensExt<A, B>: Lens<A, B> {
    /// Returns a copy of the part, if reachable.
    fn get(&self, data: &A) -> Option<B>
    where
        B: Clone,
    {
        self.try_with(data, B::clone)
    }

    /// Overwrites the part. Returns `false` (and drops `value`) if the part is not reachable.
    fn put(&self, data: &mut A, value: B) -> bool {
        self.try_with_mut(data, |slot| *slot = value).is_some()
    }
}

impl<A, B, L: Lens<A, B>> LensExt<A, B> for L {}

/// Lens composition: combines `Lens<U,V>` and `Lens<V,W>` to `Lens<U,W>`.
///
/// Equivalent to applying two lenses in succession.
#[derive(Debug)]
pub struct LensCompose<K, L, B>(pub K, pub L, pub PhantomData<fn(&B)>);

// #26925
impl<K: Clone, L: Clone, B> Clone for LensCompose<K, L, B> {
    fn clone(&self) -> Self {
        LensCompose(self.0.clone(), self.1.clone(), PhantomData)
    }
}

impl<K: Copy, L: Copy, B> Copy for LensCompose<K, L, B> {}

impl<K, L, A, B, C> Lens<A, C> for LensCompose<K, L, B>
where
    K: Lens<A, B>,
    L: Lens<B, C>,
{
    fn try_with<R, F: FnOnce(&C) -> R>(&self, data: &A, f: F) -> Option<R> {
        self.0.try_with(data, |data| self.1.try_with(data, f)).flatten()
    }

    fn try_with_mut<R, F: FnOnce(&mut C) -> R>(&self, data: &mut A, f: F) -> Option<R> {
        self.0.try_with_mut(data, |data| self.1.try_with_mut(data, f)).flatten()
    }

    fn path(&self) -> FieldPath {
        self.0.path().concat(&self.1.path())
    }
}

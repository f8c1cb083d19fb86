use crate::{
    lens::{FieldKey, Lens},
    path::FieldPath,
};
use std::{fmt, marker::PhantomData};

/// Name of the step contributed by [`SomeLens`] to a path.
pub(crate) const SOME_STEP: &str = "?";

/// A lens that looks through an `Option<T>` at the wrapped value.
///
/// Reading through `None` yields no value, and writing through `None` does nothing: the option is
/// never populated by the lens.
pub struct SomeLens<T>(PhantomData<fn(&T)>);

impl<T> SomeLens<T> {
    pub const fn new() -> SomeLens<T> {
        SomeLens(PhantomData)
    }
}

impl<T> Default for SomeLens<T> {
    fn default() -> Self {
        Self::new()
    }
}

// #26925
impl<T> Clone for SomeLens<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for SomeLens<T> {}

impl<T> fmt::Debug for SomeLens<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("SomeLens")
    }
}

impl<T: 'static> Lens<Option<T>, T> for SomeLens<T> {
    fn try_with<R, F: FnOnce(&T) -> R>(&self, data: &Option<T>, f: F) -> Option<R> {
        data.as_ref().map(f)
    }

    fn try_with_mut<R, F: FnOnce(&mut T) -> R>(&self, data: &mut Option<T>, f: F) -> Option<R> {
        data.as_mut().map(f)
    }

    fn path(&self) -> FieldPath {
        FieldPath::from(FieldKey::new::<Option<T>>(SOME_STEP))
    }
}

use crate::{
    error::ApplyError,
    lens::Lens,
    path::FieldPath,
    value::{ErasedValue, Value},
};
use std::{
    fmt,
    hash::{Hash, Hasher},
    sync::Arc,
};

/// A recorded write of a value to a field of `Root`.
///
/// Two mutations are equal if they write equal values at the same path. Mutations are cheap to
/// clone, and can be shared between threads once the recording is finished.
pub struct Mutation<Root> {
    path: FieldPath,
    value: ErasedValue,
    apply: Arc<dyn Fn(&mut Root) -> bool + Send + Sync>,
    matches: Arc<dyn Fn(&Root) -> bool + Send + Sync>,
}

// #26925
impl<Root> Clone for Mutation<Root> {
    fn clone(&self) -> Self {
        Mutation {
            path: self.path.clone(),
            value: self.value.clone(),
            apply: self.apply.clone(),
            matches: self.matches.clone(),
        }
    }
}

impl<Root: 'static> Mutation<Root> {
    pub(crate) fn new<L, T>(path: FieldPath, lens: L, value: T) -> Mutation<Root>
    where
        L: Lens<Root, T> + Send + Sync + 'static,
        T: Value,
    {
        let lens = Arc::new(lens);
        let value = Arc::new(value);

        let apply = {
            let lens = lens.clone();
            let value = value.clone();
            move |target: &mut Root| lens.try_with_mut(target, |field| *field = T::clone(&value)).is_some()
        };

        let matches = {
            let value = value.clone();
            move |target: &Root| lens.try_with(target, |field| *field == *value).unwrap_or(false)
        };

        Mutation {
            path,
            value: ErasedValue::from_arc(value),
            apply: Arc::new(apply),
            matches: Arc::new(matches),
        }
    }
}

impl<Root> Mutation<Root> {
    /// Returns the keys of the path written by this mutation, one per hop.
    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    /// Returns the written value, if it is of type `T`.
    pub fn value<T: 'static>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    pub fn erased_value(&self) -> &ErasedValue {
        &self.value
    }

    /// Writes the value to `target`.
    ///
    /// Fails, leaving `target` untouched, if the path goes through an optional value that is absent
    /// on `target`.
    pub fn apply(&self, target: &mut Root) -> Result<(), ApplyError> {
        if (self.apply)(target) {
            Ok(())
        } else {
            Err(ApplyError::Unreachable {
                path: self.path.clone(),
            })
        }
    }

    /// Returns whether the field of `target` already holds the value written by this mutation.
    ///
    /// Returns `false` if the field is not reachable on `target`.
    pub fn matches(&self, target: &Root) -> bool {
        (self.matches)(target)
    }

    /// Returns whether the path of this mutation starts with the path of `prefix`, i.e. whether this
    /// mutation writes to the part of `Root` that `prefix` looks at.
    pub fn has_prefix<B, P>(&self, prefix: &P) -> bool
    where
        P: Lens<Root, B>,
    {
        self.path.starts_with(&prefix.path())
    }

    /// Returns whether the path of this mutation ends with the path of `suffix`.
    ///
    /// `suffix` may start at any type along the path.
    pub fn has_suffix<A, B, P>(&self, suffix: &P) -> bool
    where
        P: Lens<A, B>,
    {
        self.path.ends_with(&suffix.path())
    }

    /// Like [`has_suffix`](Self::has_suffix), but also requires `test` to accept the written value.
    ///
    /// Returns `false` without calling `test` if the path does not match or the value is not a `B`.
    pub fn has_suffix_where<A, B, P>(&self, suffix: &P, test: impl FnOnce(&B) -> bool) -> bool
    where
        P: Lens<A, B>,
        B: 'static,
    {
        self.has_suffix(suffix) && self.value::<B>().map_or(false, test)
    }
}

impl<Root> PartialEq for Mutation<Root> {
    fn eq(&self, other: &Self) -> bool {
        // equal paths imply equal value types
        self.path == other.path && self.value == other.value
    }
}

impl<Root> Eq for Mutation<Root> {}

impl<Root> Hash for Mutation<Root> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
        self.value.hash(state);
    }
}

impl<Root> fmt::Debug for Mutation<Root> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} = {:?}", self.path, self.value)
    }
}

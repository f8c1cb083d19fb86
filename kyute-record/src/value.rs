//! Type-erased record values.
use std::{
    any::Any,
    fmt,
    hash::{Hash, Hasher},
    sync::Arc,
};

/// Trait for values that can be stored in a record.
///
/// Implemented for every type that is comparable, hashable, cloneable, printable and shareable
/// across threads.
pub trait Value: Eq + Hash + Clone + fmt::Debug + Send + Sync + 'static {}

impl<T> Value for T where T: Eq + Hash + Clone + fmt::Debug + Send + Sync + 'static {}

/// Object-safe counterpart of `Value`.
///
/// The methods are monomorphized when the value is boxed, so comparing or hashing never needs
/// to know the concrete type.
trait DynValue: fmt::Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn dyn_eq(&self, other: &dyn DynValue) -> bool;
    fn dyn_hash(&self, state: &mut dyn Hasher);
}

impl<T: Value> DynValue for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn dyn_eq(&self, other: &dyn DynValue) -> bool {
        // values of different types are never equal
        other.as_any().downcast_ref::<T>().map_or(false, |other| self == other)
    }

    fn dyn_hash(&self, mut state: &mut dyn Hasher) {
        self.hash(&mut state)
    }
}

/// A shared, type-erased value that remembers how to compare and hash itself.
#[derive(Clone)]
pub struct ErasedValue(Arc<dyn DynValue>);

impl ErasedValue {
    pub fn new<T: Value>(value: T) -> ErasedValue {
        ErasedValue(Arc::new(value))
    }

    pub(crate) fn from_arc<T: Value>(value: Arc<T>) -> ErasedValue {
        ErasedValue(value)
    }

    /// Returns a reference to the value if it is of type `T`.
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.0.as_any().downcast_ref::<T>()
    }

    pub fn is<T: 'static>(&self) -> bool {
        self.0.as_any().is::<T>()
    }
}

impl PartialEq for ErasedValue {
    fn eq(&self, other: &Self) -> bool {
        self.0.dyn_eq(&*other.0)
    }
}

impl Eq for ErasedValue {}

impl Hash for ErasedValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.dyn_hash(state)
    }
}

impl fmt::Debug for ErasedValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

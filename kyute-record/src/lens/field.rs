//! Lenses over struct fields.
use crate::{lens::Lens, path::FieldPath};
use std::{
    any::{self, TypeId},
    fmt,
    hash::{Hash, Hasher},
};

/// Identity of a single-hop lens: a field name within an owner type.
///
/// Keys are compared by owner type and field name. The owner is stored as a function pointer
/// rather than a `TypeId` so that keys (and the lenses that carry them) can be built in constant
/// expressions.
#[derive(Copy, Clone)]
pub struct FieldKey {
    owner: fn() -> TypeId,
    owner_name: fn() -> &'static str,
    name: &'static str,
}

impl FieldKey {
    /// Creates the key for the field `name` of `T`.
    pub const fn new<T: ?Sized + 'static>(name: &'static str) -> FieldKey {
        FieldKey {
            owner: TypeId::of::<T>,
            owner_name: any::type_name::<T>,
            name,
        }
    }

    /// Returns the `TypeId` of the type that contains the field.
    pub fn owner(&self) -> TypeId {
        (self.owner)()
    }

    /// Returns the name of the type that contains the field.
    pub fn owner_name(&self) -> &'static str {
        (self.owner_name)()
    }

    /// Returns the name of the field.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for FieldKey {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.owner() == other.owner()
    }
}

impl Eq for FieldKey {}

impl Hash for FieldKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.owner().hash(state);
        self.name.hash(state);
    }
}

impl fmt::Debug for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}::{}", self.owner_name(), self.name)
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name)
    }
}

#[cfg(feature = "serializing")]
impl serde::Serialize for FieldKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name)
    }
}

/// A lens that looks at a named field of a struct.
///
/// Usually obtained from the associated constants generated by `#[derive(Lens)]` (`Root::v`), or
/// with the [`field!`](crate::field) macro.
pub struct FieldLens<A, B> {
    key: FieldKey,
    read: fn(&A) -> &B,
    write: fn(&mut A) -> &mut B,
}

// #26925
impl<A, B> Clone for FieldLens<A, B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A, B> Copy for FieldLens<A, B> {}

impl<A: 'static, B> FieldLens<A, B> {
    pub const fn new(name: &'static str, read: fn(&A) -> &B, write: fn(&mut A) -> &mut B) -> FieldLens<A, B> {
        FieldLens {
            key: FieldKey::new::<A>(name),
            read,
            write,
        }
    }
}

impl<A, B> FieldLens<A, B> {
    pub fn key(&self) -> FieldKey {
        self.key
    }
}

impl<A, B> fmt::Debug for FieldLens<A, B> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("FieldLens").field(&self.key).finish()
    }
}

impl<A, B> Lens<A, B> for FieldLens<A, B> {
    fn try_with<R, F: FnOnce(&B) -> R>(&self, data: &A, f: F) -> Option<R> {
        Some(f((self.read)(data)))
    }

    fn try_with_mut<R, F: FnOnce(&mut B) -> R>(&self, data: &mut A, f: F) -> Option<R> {
        Some(f((self.write)(data)))
    }

    fn path(&self) -> FieldPath {
        FieldPath::from(self.key)
    }
}

/// Creates a [`FieldLens`] for a field of a struct, without deriving `Lens` on the struct.
///
/// ```
/// use kyute_record::{field, LensExt};
///
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// let x = field!(Point, x);
/// assert_eq!(x.get(&Point { x: 1, y: 2 }), Some(1));
/// ```
#[macro_export]
macro_rules! field {
    ($ty:ty, $field:tt) => {
        $crate::FieldLens::<$ty, _>::new(
            ::std::stringify!($field),
            |data| &data.$field,
            |data| &mut data.$field,
        )
    };
}

#[cfg(test)]
mod tests {
    use super::FieldKey;
    use crate::Lens;
    use std::collections::HashSet;

    struct First {
        a: i32,
        b: i32,
    }

    struct Second {
        a: i32,
    }

    #[test]
    fn keys_compare_by_owner_and_name() {
        assert_eq!(FieldKey::new::<First>("a"), FieldKey::new::<First>("a"));
        assert_ne!(FieldKey::new::<First>("a"), FieldKey::new::<First>("b"));
        assert_ne!(FieldKey::new::<First>("a"), FieldKey::new::<Second>("a"));

        let keys: HashSet<_> = [
            FieldKey::new::<First>("a"),
            FieldKey::new::<First>("a"),
            FieldKey::new::<Second>("a"),
        ]
        .into_iter()
        .collect();
        assert_eq!(keys.len(), 2);
    }

    #[test]
    fn macro_lens_carries_field_key() {
        let lens = field!(First, b);
        assert_eq!(lens.key(), FieldKey::new::<First>("b"));
        assert_eq!(lens.path().to_string(), "b");
        assert!(format!("{:?}", lens.key()).ends_with("First::b"));

        let data = First { a: 1, b: 2 };
        assert_eq!(lens.try_with(&data, |b| *b + data.a), Some(3));
        let second = Second { a: 4 };
        assert_eq!(field!(Second, a).try_with(&second, |a| *a), Some(4));
    }
}

//! Field paths.
use crate::lens::{option::SOME_STEP, FieldKey, Lens, LensCompose};
use smallvec::SmallVec;
use std::{fmt, marker::PhantomData};

/// An ordered sequence of field keys.
///
/// Each key is relative to the type reached after the previous one: the first key is a field of the
/// root type, the second a field of that field's type, and so on.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath(SmallVec<[FieldKey; 4]>);

impl FieldPath {
    /// Creates an empty path.
    pub fn new() -> FieldPath {
        FieldPath(SmallVec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldKey> + '_ {
        self.0.iter()
    }

    pub fn push(&mut self, key: FieldKey) {
        self.0.push(key)
    }

    /// Appends all keys of `other` to this path.
    pub fn append(&mut self, other: &FieldPath) {
        self.0.extend_from_slice(&other.0)
    }

    /// Returns the concatenation of this path and `other`.
    pub fn concat(&self, other: &FieldPath) -> FieldPath {
        let mut path = self.clone();
        path.append(other);
        path
    }

    /// Returns whether `prefix` is a leading subsequence of this path.
    ///
    /// Keys are compared element-wise from the root; a path is a prefix of itself.
    pub fn starts_with(&self, prefix: &FieldPath) -> bool {
        prefix.len() <= self.len() && self.0.iter().zip(prefix.0.iter()).all(|(a, b)| a == b)
    }

    /// Returns whether `suffix` is a trailing subsequence of this path (aligned at the leaf).
    pub fn ends_with(&self, suffix: &FieldPath) -> bool {
        suffix.len() <= self.len() && self.0.iter().rev().zip(suffix.0.iter().rev()).all(|(a, b)| a == b)
    }
}

impl From<FieldKey> for FieldPath {
    fn from(key: FieldKey) -> Self {
        let mut path = FieldPath::new();
        path.push(key);
        path
    }
}

impl FromIterator<FieldKey> for FieldPath {
    fn from_iter<I: IntoIterator<Item = FieldKey>>(iter: I) -> Self {
        FieldPath(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a FieldPath {
    type Item = &'a FieldKey;
    type IntoIter = std::slice::Iter<'a, FieldKey>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Formats as `v.a`, or `p?.x` when going through an `Option`.
impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, key) in self.0.iter().enumerate() {
            if i > 0 && key.name() != SOME_STEP {
                f.write_str(".")?;
            }
            write!(f, "{}", key)?;
        }
        Ok(())
    }
}

impl fmt::Debug for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "FieldPath({})", self)
    }
}

#[cfg(feature = "serializing")]
impl serde::Serialize for FieldPath {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter())
    }
}

//--------------------------------------------------------------------------------------------------

/// A lens from `Root` to `Leaf`, together with the per-hop keys it was built from.
///
/// The composed lens is used to read and write the leaf; the steps are used to compare paths.
/// A structural path always has at least one step.
pub struct StructuralPath<Root, Leaf, L> {
    lens: L,
    steps: FieldPath,
    _phantom: PhantomData<fn(&Root) -> &Leaf>,
}

// #26925
impl<Root, Leaf, L: Clone> Clone for StructuralPath<Root, Leaf, L> {
    fn clone(&self) -> Self {
        StructuralPath {
            lens: self.lens.clone(),
            steps: self.steps.clone(),
            _phantom: PhantomData,
        }
    }
}

impl<Root, Leaf, L: Lens<Root, Leaf>> StructuralPath<Root, Leaf, L> {
    /// Creates a path from a first step.
    pub fn new(lens: L) -> StructuralPath<Root, Leaf, L> {
        let steps = lens.path();
        debug_assert!(!steps.is_empty(), "first step of a structural path has no field key");
        StructuralPath {
            lens,
            steps,
            _phantom: PhantomData,
        }
    }

    /// Extends the path by one step.
    pub fn extend<M, Next>(self, step: M) -> StructuralPath<Root, Next, LensCompose<L, M, Leaf>>
    where
        M: Lens<Leaf, Next>,
    {
        let mut steps = self.steps;
        steps.append(&step.path());
        StructuralPath {
            lens: LensCompose(self.lens, step, PhantomData),
            steps,
            _phantom: PhantomData,
        }
    }
}

impl<Root, Leaf, L> StructuralPath<Root, Leaf, L> {
    /// Returns the composed lens.
    pub fn lens(&self) -> &L {
        &self.lens
    }

    pub fn steps(&self) -> &FieldPath {
        &self.steps
    }

    pub fn into_parts(self) -> (L, FieldPath) {
        (self.lens, self.steps)
    }
}

impl<Root, Leaf, L> fmt::Debug for StructuralPath<Root, Leaf, L> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("StructuralPath").field(&format_args!("{}", self.steps)).finish()
    }
}

use crate::{
    lens::Lens,
    path::FieldPath,
    value::{ErasedValue, Value},
};
use std::{
    fmt,
    hash::{Hash, Hasher},
    sync::Arc,
};

/// How a predicate compares a field with its value.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serializing", derive(serde::Serialize))]
pub enum Technique {
    Equal,
    LessThan,
    GreaterThan,
    /// Reserved: no builder operation produces it.
    NotEqual,
}

impl Technique {
    /// The comparison operator, as written in Rust.
    pub fn symbol(self) -> &'static str {
        match self {
            Technique::Equal => "==",
            Technique::LessThan => "<",
            Technique::GreaterThan => ">",
            Technique::NotEqual => "!=",
        }
    }
}

impl fmt::Display for Technique {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A recorded comparison of a field of `Root` with a value.
///
/// Two predicates are equal if they compare the same path with equal values, using the same
/// technique.
pub struct Predicate<Root> {
    path: FieldPath,
    technique: Technique,
    value: ErasedValue,
    test: Arc<dyn Fn(&Root) -> bool + Send + Sync>,
}

// #26925
impl<Root> Clone for Predicate<Root> {
    fn clone(&self) -> Self {
        Predicate {
            path: self.path.clone(),
            technique: self.technique,
            value: self.value.clone(),
            test: self.test.clone(),
        }
    }
}

impl<Root: 'static> Predicate<Root> {
    /// `compare` is called with the field of the target first, and the recorded value second.
    pub(crate) fn new<L, T>(
        path: FieldPath,
        lens: L,
        technique: Technique,
        value: T,
        compare: fn(&T, &T) -> bool,
    ) -> Predicate<Root>
    where
        L: Lens<Root, T> + Send + Sync + 'static,
        T: Value,
    {
        let value = Arc::new(value);
        let test = {
            let value = value.clone();
            move |target: &Root| lens.try_with(target, |field| compare(field, &value)).unwrap_or(false)
        };
        Predicate {
            path,
            technique,
            value: ErasedValue::from_arc(value),
            test: Arc::new(test),
        }
    }
}

impl<Root> Predicate<Root> {
    /// Returns the path of the compared field.
    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    pub fn technique(&self) -> Technique {
        self.technique
    }

    /// Returns the value the field is compared with, if it is of type `T`.
    pub fn value<T: 'static>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    pub fn erased_value(&self) -> &ErasedValue {
        &self.value
    }

    /// Evaluates the predicate on `target`.
    ///
    /// A field that is not reachable on `target` fails the test.
    pub fn test(&self, target: &Root) -> bool {
        (self.test)(target)
    }
}

impl<Root> PartialEq for Predicate<Root> {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path && self.technique == other.technique && self.value == other.value
    }
}

impl<Root> Eq for Predicate<Root> {}

impl<Root> Hash for Predicate<Root> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
        self.value.hash(state);
        self.technique.hash(state);
    }
}

impl<Root> fmt::Debug for Predicate<Root> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} {:?}", self.path, self.technique, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::{Predicate, Technique};
    use crate::{field, Lens, SomeLens};

    #[derive(Default)]
    struct Sample {
        count: u32,
        name: Option<String>,
    }

    fn count(technique: Technique, value: u32, compare: fn(&u32, &u32) -> bool) -> Predicate<Sample> {
        let lens = field!(Sample, count);
        Predicate::new(lens.path(), lens, technique, value, compare)
    }

    #[test]
    fn tests_the_field() {
        let greater = count(Technique::GreaterThan, 3, |field, value| field > value);
        let mut sample = Sample::default();
        assert!(!greater.test(&sample));
        sample.count = 4;
        assert!(greater.test(&sample));
        assert_eq!(format!("{:?}", greater), "count > 3");
    }

    #[test]
    fn reserved_technique_still_compares() {
        let not_equal = count(Technique::NotEqual, 3, |field, value| field != value);
        let sample = Sample::default();
        assert!(not_equal.test(&sample));
        assert_eq!(not_equal.technique().symbol(), "!=");
    }

    #[test]
    fn equality_includes_technique() {
        let less = count(Technique::LessThan, 3, |field, value| field < value);
        let greater = count(Technique::GreaterThan, 3, |field, value| field > value);
        assert_ne!(less, greater);
        assert_eq!(less, less.clone());
        assert_eq!(less, count(Technique::LessThan, 3, |field, value| field < value));
    }

    #[test]
    fn absent_field_fails() {
        let lens = field!(Sample, name)
            .compose(SomeLens::<String>::new());
        let named = Predicate::new(lens.path(), lens, Technique::Equal, "x".to_string(), |field, value| {
            field == value
        });
        let mut sample = Sample::default();
        assert!(!named.test(&sample));
        sample.name = Some("x".to_string());
        assert!(named.test(&sample));
        assert_eq!(named.value::<String>().map(String::as_str), Some("x"));
    }
}

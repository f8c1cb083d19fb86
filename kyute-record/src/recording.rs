//! Recordings.
//!
//! A recording is an ordered list of records against a root type, built with the [`PathBuilder`]s
//! of a [`Recorder`]. Mutation recordings can be applied to instances of the root type, and
//! predicate recordings can be matched against them.
use crate::{
    builder::{Accumulator, PathBuilder},
    error::ApplyError,
    lens::{Lens, LensCompose, SomeLens},
    mutation::Mutation,
    predicate::Predicate,
};
use std::{fmt, marker::PhantomData};
use tracing::{debug, trace};

/// A recording of mutations.
pub type Mutations<Root> = Recording<Root, Mutation<Root>>;

/// A recording of predicates.
pub type Predicates<Root> = Recording<Root, Predicate<Root>>;

/// An in-progress recording: hands out [`PathBuilder`]s that append to it.
///
/// The builders share the recorder's list through an `Rc<RefCell<_>>`, so a recorder stays on the
/// thread that created it. Call [`finish`](Self::finish) to get a [`Recording`] that can be shared.
pub struct Recorder<Root, R> {
    records: Accumulator<R>,
    _phantom: PhantomData<fn(&Root)>,
}

impl<Root, R> Recorder<Root, R> {
    pub fn new() -> Recorder<Root, R> {
        Recorder {
            records: Accumulator::new(),
            _phantom: PhantomData,
        }
    }

    /// Starts a path at a field of the root.
    pub fn field<L, B>(&self, lens: L) -> PathBuilder<Root, B, L, R>
    where
        L: Lens<Root, B>,
    {
        PathBuilder::new(self.records.clone(), lens)
    }

    /// Starts a path at an optional field of the root, going through it to the wrapped value.
    pub fn field_opt<L, B>(&self, lens: L) -> PathBuilder<Root, B, LensCompose<L, SomeLens<B>, Option<B>>, R>
    where
        L: Lens<Root, Option<B>>,
        B: 'static,
    {
        self.field(lens).some()
    }

    /// Returns the number of records so far.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Ends the recording.
    ///
    /// Builders must not outlive this call: a record terminated on a builder afterwards is lost
    /// (and trips a debug assertion).
    pub fn finish(self) -> Recording<Root, R> {
        let records = self.records.take();
        trace!(count = records.len(), "finished recording");
        Recording {
            records,
            _phantom: PhantomData,
        }
    }
}

impl<Root, R> Default for Recorder<Root, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Root, R: fmt::Debug> fmt::Debug for Recorder<Root, R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Recorder").field(&self.records).finish()
    }
}

//--------------------------------------------------------------------------------------------------

/// A finished, ordered list of records of kind `R` against `Root`.
///
/// Owns its records: a recording of [`Mutation`]s or [`Predicate`]s is `Send + Sync` and can be
/// read from several threads at once.
pub struct Recording<Root, R> {
    records: Vec<R>,
    _phantom: PhantomData<fn(&Root)>,
}

impl<Root, R> Recording<Root, R> {
    /// Creates an empty recording.
    pub fn new() -> Recording<Root, R> {
        Recording {
            records: Vec::new(),
            _phantom: PhantomData,
        }
    }

    /// Returns a recorder whose [`finish`](Recorder::finish) produces a recording of this type.
    pub fn recorder() -> Recorder<Root, R> {
        Recorder::new()
    }

    /// Creates a recording from the records issued by `f`.
    ///
    /// # Examples
    ///
    /// ```
    /// use kyute_record::{Lens, Predicates};
    ///
    /// #[derive(Lens)]
    /// struct Version {
    ///     major: u32,
    /// }
    ///
    /// let is_v1 = Predicates::<Version>::build(|rec| rec.field(Version::major).is_equal(1));
    /// assert!(is_v1.matches(&Version { major: 1 }));
    /// ```
    pub fn build(f: impl FnOnce(&mut Recorder<Root, R>)) -> Recording<Root, R> {
        let mut recorder = Recorder::new();
        f(&mut recorder);
        recorder.finish()
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns a copy of the records, in the order they were recorded.
    pub fn changes(&self) -> Vec<R>
    where
        R: Clone,
    {
        self.records.clone()
    }

    /// Consumes the recording and returns its records, in the order they were recorded.
    pub fn into_changes(self) -> Vec<R> {
        self.records
    }
}

impl<Root: 'static> Recording<Root, Mutation<Root>> {
    /// Applies every mutation to `target`, in the order they were recorded.
    ///
    /// Later mutations overwrite earlier ones on the same field. Mutations whose path is not
    /// reachable on `target` are skipped.
    pub fn apply(&self, target: &mut Root) {
        if let Err(err) = self.try_apply(target) {
            debug!("{}", err);
        }
    }

    /// Like [`apply`](Self::apply), but reports the skipped mutations.
    ///
    /// All reachable mutations are applied even if an error is returned.
    pub fn try_apply(&self, target: &mut Root) -> Result<(), ApplyError> {
        trace!(count = self.records.len(), "applying mutations");
        let mut skipped = Vec::new();
        for mutation in &self.records {
            if let Err(ApplyError::Unreachable { path }) = mutation.apply(target) {
                debug!(%path, "skipping mutation with unreachable path");
                skipped.push(path);
            }
        }

        if skipped.is_empty() {
            Ok(())
        } else {
            Err(ApplyError::Skipped { paths: skipped })
        }
    }

    /// Returns whether every mutation already holds on `target`.
    pub fn is_applied(&self, target: &Root) -> bool {
        self.records.iter().all(|m| m.matches(target))
    }
}

impl<Root: 'static> Recording<Root, Predicate<Root>> {
    /// Returns whether every predicate holds on `target`.
    ///
    /// An empty recording matches everything.
    pub fn matches(&self, target: &Root) -> bool {
        self.records.iter().all(|p| p.test(target))
    }
}

impl<Root, R> Default for Recording<Root, R> {
    fn default() -> Self {
        Self::new()
    }
}

// #26925
impl<Root, R: Clone> Clone for Recording<Root, R> {
    fn clone(&self) -> Self {
        Recording {
            records: self.records.clone(),
            _phantom: PhantomData,
        }
    }
}

impl<Root, R: PartialEq> PartialEq for Recording<Root, R> {
    fn eq(&self, other: &Self) -> bool {
        self.records == other.records
    }
}

impl<Root, R: Eq> Eq for Recording<Root, R> {}

impl<Root, R: fmt::Debug> fmt::Debug for Recording<Root, R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Recording").field(&self.records).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{Mutations, Predicates};
    use crate::{field, ApplyError};

    #[derive(Clone, Debug, Default, PartialEq)]
    struct Settings {
        volume: u8,
        muted: bool,
        device: Option<Device>,
    }

    #[derive(Clone, Debug, Default, PartialEq)]
    struct Device {
        id: u32,
    }

    #[test]
    fn navigation_records_nothing() {
        let rec = Mutations::<Settings>::recorder();
        let _builder = rec.field(field!(Settings, device)).some().field(field!(Device, id));
        assert!(rec.is_empty());
        assert!(rec.finish().is_empty());
    }

    #[test]
    fn builder_debug_shows_steps() {
        let rec = Mutations::<Settings>::recorder();
        let builder = rec.field_opt(field!(Settings, device)).field(field!(Device, id));
        assert_eq!(format!("{:?}", builder), "PathBuilder { steps: device?.id, .. }");
        assert_eq!(builder.steps().to_string(), "device?.id");
    }

    #[test]
    fn finished_recordings_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Mutations<Settings>>();
        assert_send_sync::<Predicates<Settings>>();
    }

    #[test]
    fn recorder_finish_moves_records() {
        let rec = Predicates::<Settings>::recorder();
        rec.field(field!(Settings, muted)).is_equal(true);
        rec.field(field!(Settings, volume)).is_less(4);
        assert_eq!(rec.len(), 2);

        let predicates = rec.finish();
        assert_eq!(predicates.len(), 2);
        assert!(predicates.matches(&Settings {
            volume: 1,
            muted: true,
            device: None,
        }));
        assert_eq!(predicates.clone(), predicates);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "recorder was finished")]
    fn builder_outliving_its_recorder() {
        let rec = Mutations::<Settings>::recorder();
        let builder = rec.field(field!(Settings, volume));
        let _mutations = rec.finish();
        builder.set(9);
    }

    #[test]
    fn last_write_wins() {
        let rec = Mutations::<Settings>::build(|rec| {
            rec.field(field!(Settings, volume)).set(3);
            rec.field(field!(Settings, muted)).set(true);
            rec.field(field!(Settings, volume)).set(7);
        });
        assert_eq!(rec.len(), 3);

        let mut settings = Settings::default();
        rec.apply(&mut settings);
        assert_eq!(settings.volume, 7);
        assert!(settings.muted);
        // the overwritten mutation no longer holds
        assert!(!rec.is_applied(&settings));
    }

    #[test]
    fn unreachable_mutations_are_skipped() {
        let rec = Mutations::<Settings>::build(|rec| {
            rec.field_opt(field!(Settings, device)).field(field!(Device, id)).set(12);
            rec.field(field!(Settings, volume)).set(5);
        });

        let mut settings = Settings::default();
        let err = rec.try_apply(&mut settings).unwrap_err();
        match &err {
            ApplyError::Skipped { paths } => {
                assert_eq!(paths.len(), 1);
                assert_eq!(paths[0].to_string(), "device?.id");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(err.to_string(), "1 mutation(s) skipped, unreachable paths: `device?.id`");
        assert_eq!(settings.volume, 5);
        assert_eq!(settings.device, None);

        settings.device = Some(Device::default());
        assert_eq!(rec.try_apply(&mut settings), Ok(()));
        assert_eq!(settings.device, Some(Device { id: 12 }));
        assert!(rec.is_applied(&settings));
    }

    #[test]
    fn empty_predicates_match_everything() {
        let rec = Predicates::<Settings>::new();
        assert!(rec.matches(&Settings::default()));
    }

    #[test]
    fn into_changes_keeps_order() {
        let rec = Predicates::<Settings>::build(|rec| {
            rec.field(field!(Settings, volume)).is_greater(2);
            rec.field(field!(Settings, muted)).is_equal(false);
        });
        let changes = rec.into_changes();
        let rendered: Vec<_> = changes.iter().map(|p| format!("{:?}", p)).collect();
        assert_eq!(rendered, ["volume > 2", "muted == false"]);
    }
}

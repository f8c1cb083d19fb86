//! Deferred edits and predicates over structured values.
//!
//! A [`Recording`] is built through a [`Recorder`], by walking field lenses exactly as one would
//! read a real instance and terminating each walk with [`set`](PathBuilder::set) (for mutations) or
//! one of the comparison operations (for predicates). Nothing touches a live value until the
//! recording is applied to, or matched against, a concrete instance.
//!
//! ```
//! use kyute_record::{Lens, Mutations};
//!
//! #[derive(Clone, Debug, Lens)]
//! struct Inner {
//!     a: i32,
//! }
//!
//! #[derive(Clone, Debug, Lens)]
//! struct Root {
//!     v: Inner,
//! }
//!
//! let edits = Mutations::<Root>::build(|rec| {
//!     rec.field(Root::v).field(Inner::a).set(9);
//! });
//!
//! let mut root = Root { v: Inner { a: 8 } };
//! edits.apply(&mut root);
//! assert_eq!(root.v.a, 9);
//! ```
//!
//! # Terminology
//!
//! - _lens_: a reified, composable accessor for some part of type `B` of a value of type `A`.
//! - _field key_: the identity of a single-hop lens (owner type + field name).
//! - _field path_: the sequence of field keys traversed by a (possibly composed) lens.
//! - _record_: a [`Mutation`] or a [`Predicate`], the unit stored in a recording.

mod builder;
mod error;
mod lens;
mod mutation;
mod path;
mod predicate;
mod recording;
mod value;

pub use builder::PathBuilder;
pub use error::ApplyError;
pub use kyute_record_macros::Lens;
pub use lens::{FieldKey, FieldLens, Lens, LensCompose, LensExt, SomeLens};
pub use mutation::Mutation;
pub use path::{FieldPath, StructuralPath};
pub use predicate::{Predicate, Technique};
pub use recording::{Mutations, Predicates, Recorder, Recording};
pub use value::{ErasedValue, Value};

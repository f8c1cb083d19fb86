use crate::path::FieldPath;
use std::fmt;
use thiserror::Error;

/// Errors reported when applying mutations.
///
/// Applying never stops at the first failure: the reported mutations were skipped, every other
/// mutation has been applied.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApplyError {
    /// The path of the mutation is not reachable on the target (it goes through an absent
    /// optional value).
    #[error("`{path}` is not reachable on the target")]
    Unreachable { path: FieldPath },
    /// Some mutations of a recording were skipped.
    #[error("{} mutation(s) skipped, unreachable paths: {}", .paths.len(), PathList(.paths))]
    Skipped { paths: Vec<FieldPath> },
}

struct PathList<'a>(&'a [FieldPath]);

impl fmt::Display for PathList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, path) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "`{}`", path)?;
        }
        Ok(())
    }
}

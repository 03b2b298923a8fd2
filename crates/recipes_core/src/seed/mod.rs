//! Best-effort recipe bootstrap from a JSON seed file.
//!
//! # Responsibility
//! - Decode a JSON array of recipe objects into stored records.
//! - Turn read/parse failures into a discardable diagnostic.
//!
//! # Invariants
//! - Loading never fails; a broken seed yields an empty collection.
//! - Every returned record has a non-empty id and a timestamp.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod load;

pub use load::{load_seed, parse_seed, SeedLoad};

pub type SeedResult<T> = Result<T, SeedError>;

#[derive(Debug)]
pub enum SeedError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(serde_json::Error),
}

impl Display for SeedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read seed file `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid seed JSON: {err}"),
        }
    }
}

impl Error for SeedError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for SeedError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

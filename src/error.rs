//! Error types shared by the path helpers and the traversal primitives.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures of the path normalizer and file helpers.
#[derive(Debug, Error)]
pub enum PathError {
    /// `target` cannot be expressed relative to `base` (mixed rooted and
    /// unrooted paths, different volumes, or a base that climbs with `..`).
    #[error("can't make {target} relative to {base}")]
    NotRelative { base: String, target: String },

    /// The current working directory was needed but could not be read.
    #[error("failed to resolve current directory for {path}: {source}")]
    CurrentDir {
        path: String,
        #[source]
        source: io::Error,
    },

    /// Filesystem access failed while resolving `path`.
    #[error("{path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl PathError {
    pub(crate) fn io(path: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// A per-entry failure reported by a [`Walk`](crate::find::Walk) primitive.
///
/// The tree matcher never surfaces these; they tell it not to descend further
/// at `path`.
#[derive(Debug, Error)]
pub enum WalkError {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}: filesystem loop", path.display())]
    Loop { path: PathBuf },
}

impl WalkError {
    /// Path the error relates to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            WalkError::Io { path, .. } | WalkError::Loop { path } => path,
        }
    }
}

impl From<walkdir::Error> for WalkError {
    fn from(err: walkdir::Error) -> Self {
        let path = err.path().map(PathBuf::from).unwrap_or_default();
        match err.into_io_error() {
            Some(source) => WalkError::Io { path, source },
            None => WalkError::Loop { path },
        }
    }
}

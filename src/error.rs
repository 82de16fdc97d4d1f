//! # Errors
//!
//! `RegionError` describes why a single statement could not be turned into a
//! region. The driver wraps it in [`Error::Parse`] together with the line it
//! came from, so callers of a whole-file parse always know where it failed.

use std::path::PathBuf;
use thiserror::Error;

/// Failure while classifying or decoding one statement.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegionError {
    #[error("region `{region_type}` appears before any coordinate system declaration")]
    UnboundCoordinateSystem { region_type: String },

    #[error("unknown unit suffix `{suffix}` in `{literal}`")]
    UnknownUnitSuffix { literal: String, suffix: char },

    #[error("malformed numeric literal `{literal}`")]
    MalformedNumericLiteral { literal: String },

    #[error("`{region_type}` expects {expected} fields but {found} were given")]
    FieldCountMismatch {
        region_type: String,
        expected: usize,
        found: usize,
    },

    #[error("composite region with {members} member(s) left open at end of input")]
    DanglingComposite { members: usize },
}

impl RegionError {
    pub(crate) fn malformed(literal: &str) -> Self {
        RegionError::MalformedNumericLiteral {
            literal: literal.to_string(),
        }
    }
}

/// Error returned by the whole-file entry points.
#[derive(Debug, Error)]
pub enum Error {
    #[error("line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: RegionError,
    },

    #[error("failed to read region file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read region input: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// The statement-level cause, if this is a parse failure.
    pub fn region_error(&self) -> Option<&RegionError> {
        match self {
            Error::Parse { source, .. } => Some(source),
            Error::Read { .. } | Error::Io(_) => None,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

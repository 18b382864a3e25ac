use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IoError {
    /// Opening, reading, writing or flushing a file failed.
    #[error("{}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Parent sample file header is not the one the writer produces.
    #[error("unexpected header: expected '{expected}', found '{found}'")]
    HeaderMismatch { expected: String, found: String },

    #[error("line {line}: expected {expected} fields, found {found}")]
    FieldCount { line: u64, expected: usize, found: usize },

    #[error("line {line} (cast '{cast}'): cannot parse filter pore size '{value}'")]
    PoreSize { line: u64, cast: String, value: String },

    #[error("line {line}: duplicate cast '{cast}'")]
    DuplicateCast { line: u64, cast: String },

    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

impl IoError {
    pub(crate) fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::File {
            path: path.into(),
            source,
        }
    }

    /// True when the file was readable but its content is malformed.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            Self::Csv(_)
                | Self::HeaderMismatch { .. }
                | Self::FieldCount { .. }
                | Self::PoreSize { .. }
                | Self::DuplicateCast { .. }
        )
    }
}

use thiserror::Error;

use crate::diff::RecordDiff;

#[derive(Debug, Error)]
pub enum ReconError {
    /// The pore size column is absent or the row is too short to reach it.
    #[error("line {line} (cruise '{cruise}'): missing filter pore size")]
    MissingPoreSize { line: u64, cruise: String },

    /// The pore size cell has no numeric leading token.
    #[error("line {line} (cruise '{cruise}'): cannot parse filter pore size '{value}'")]
    PoreSizeParse { line: u64, cruise: String, value: String },

    /// Two subsamples of one cast disagree on cast-level metadata, i.e. the
    /// cast looks like it had more than one net tow.
    #[error("cast '{cast}': line {line} differs from reference line {reference_line}\n{diff}")]
    InconsistentCast {
        cast: String,
        reference_line: u64,
        line: u64,
        diff: RecordDiff,
    },

    /// Malformed delimited text.
    #[error("line {line}: {message}")]
    Csv { line: u64, message: String },
}

impl ReconError {
    /// True for input errors (as opposed to convention violations).
    pub fn is_parse_error(&self) -> bool {
        !matches!(self, Self::InconsistentCast { .. })
    }
}

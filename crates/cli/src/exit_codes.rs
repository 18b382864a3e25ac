//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract; batch scripts rely on them.
//!
//! | Code | Meaning                                             |
//! |------|-----------------------------------------------------|
//! | 0    | Success                                             |
//! | 1    | Reserved                                            |
//! | 2    | Usage error (bad or missing option combination)     |
//! | 3    | File or database I/O failure                        |
//! | 4    | Malformed input (pore size, CSV structure, header)  |
//! | 5    | Subsamples of one cast disagree (multiple net tows) |
//! | 6    | Settings file unreadable or invalid alias           |

use nettow_io::IoError;
use nettow_recon::ReconError;

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// Usage error - bad arguments, missing required options.
/// Matches clap's own exit code for argument errors.
pub const EXIT_USAGE: u8 = 2;

/// Cannot read/write a file or open/write the database.
pub const EXIT_IO: u8 = 3;

/// Input could not be parsed.
pub const EXIT_PARSE: u8 = 4;

/// A cast's subsamples carry differing metadata.
pub const EXIT_INCONSISTENT_CAST: u8 = 5;

/// Settings could not be loaded or the database alias is invalid.
pub const EXIT_CONFIG: u8 = 6;

/// Map a ReconError to its exit code.
pub fn recon_exit_code(err: &ReconError) -> u8 {
    match err {
        ReconError::InconsistentCast { .. } => EXIT_INCONSISTENT_CAST,
        ReconError::MissingPoreSize { .. }
        | ReconError::PoreSizeParse { .. }
        | ReconError::Csv { .. } => EXIT_PARSE,
    }
}

/// Map an IoError to its exit code.
pub fn io_exit_code(err: &IoError) -> u8 {
    if err.is_parse_error() {
        EXIT_PARSE
    } else {
        EXIT_IO
    }
}

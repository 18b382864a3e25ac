// File I/O operations

pub mod error;
pub mod parent_csv;
pub mod store;
pub mod text;

pub use error::IoError;
pub use parent_csv::{read_parent_csv, write_parent_csv, write_parent_csv_file};
pub use store::{SampleLoader, SqliteSampleLoader};
pub use text::read_file_as_utf8;

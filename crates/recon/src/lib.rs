//! Net tow subsample reconciliation engine.
//!
//! Pure engine crate: decodes subsample field-sheet rows, groups them by CTD
//! cast and reduces each cast to a single parent sample. No filesystem writes.

pub mod diff;
pub mod engine;
pub mod error;
pub mod input;
pub mod model;
pub mod pore_size;

pub use engine::{collect_samples, reconcile};
pub use error::ReconError;
pub use input::load_subsample_rows;
pub use model::{ParentSamples, Reconciliation, SampleMetadata, SubsampleRecord, PARENT_HEADER};
pub use pore_size::{format_pore_size, parse_pore_size};

//! `nettow --loadFile ...`: load a parent Sample CSV into the database.

use std::path::Path;

use nettow_config::Settings;
use nettow_io::{read_parent_csv, SampleLoader, SqliteSampleLoader};

use crate::CliError;

pub fn cmd_load_samples(database: &str, load_file: &Path) -> Result<(), CliError> {
    let settings = Settings::load().map_err(CliError::config)?;
    let db_path = settings.database_path(database).map_err(CliError::config)?;
    log::info!("database '{database}' resolves to {}", db_path.display());

    // Parse before touching the database so a bad file leaves it untouched.
    let samples = read_parent_csv(load_file).map_err(CliError::io)?;

    let mut loader = SqliteSampleLoader::open(&db_path).map_err(CliError::io)?;
    let count = loader.load(&samples).map_err(CliError::io)?;

    eprintln!("loaded {count} cast(s) into {}", db_path.display());
    Ok(())
}

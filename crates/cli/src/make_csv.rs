//! `nettow --subsampleFile ... --csvFile ...`: reconcile subsamples into a
//! parent Sample CSV.

use std::path::Path;

use nettow_io::{read_file_as_utf8, write_parent_csv_file};
use nettow_recon::ReconError;

use crate::CliError;

const INCONSISTENT_BANNER: &str = "*** Sample metadata differs for net tow within a CTD cast ***";

pub fn cmd_make_csv(database: &str, subsample_file: &Path, csv_file: &Path) -> Result<(), CliError> {
    log::debug!("database '{database}' is not used when writing a csv file");

    let text = read_file_as_utf8(subsample_file).map_err(CliError::io)?;

    // The output file is only created once every cast has passed.
    let reconciliation = nettow_recon::reconcile(&text).map_err(|e| match e {
        ReconError::InconsistentCast { .. } => {
            eprintln!("{INCONSISTENT_BANNER}\n");
            CliError::recon(e).with_hint(
                "multiple net tows per CTD cast are not supported; correct the subsample file by hand",
            )
        }
        _ => CliError::recon(e)
            .with_hint(format!("while reading {}", subsample_file.display())),
    })?;

    write_parent_csv_file(&reconciliation.samples, csv_file).map_err(CliError::io)?;

    eprintln!(
        "reconciled {} subsample row(s) into {} cast(s); wrote {}",
        reconciliation.subsample_count,
        reconciliation.samples.len(),
        csv_file.display(),
    );
    Ok(())
}

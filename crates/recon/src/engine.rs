use std::collections::BTreeMap;

use crate::diff::diff_metadata;
use crate::error::ReconError;
use crate::input::load_subsample_rows;
use crate::model::{ParentSamples, Reconciliation, SampleMetadata, SubsampleRecord};

/// Decode a subsample file and reconcile it into parent samples.
pub fn reconcile(csv_data: &str) -> Result<Reconciliation, ReconError> {
    let rows = load_subsample_rows(csv_data)?;
    let subsample_count = rows.len();
    log::info!("read {subsample_count} subsample row(s)");

    let samples = collect_samples(rows)?;
    log::info!("{} cast(s) consistent", samples.len());

    Ok(Reconciliation {
        samples,
        subsample_count,
    })
}

/// Group subsamples by cast (file order within each cast). Keys iterate in
/// ascending order.
pub fn group_by_cast(records: Vec<SubsampleRecord>) -> BTreeMap<String, Vec<SubsampleRecord>> {
    let mut groups: BTreeMap<String, Vec<SubsampleRecord>> = BTreeMap::new();
    for record in records {
        groups.entry(record.cruise.clone()).or_default().push(record);
    }
    groups
}

/// Reduce subsamples to one parent sample per cast.
///
/// Casts are checked in ascending key order. Every subsample must match the
/// first one seen for its cast; the first mismatch anywhere aborts the whole
/// reconciliation and nothing is returned.
pub fn collect_samples(records: Vec<SubsampleRecord>) -> Result<ParentSamples, ReconError> {
    group_by_cast(records)
        .into_iter()
        .try_fold(ParentSamples::new(), |mut samples, (cast, members)| {
            log::debug!("cast '{cast}': checking {} subsample(s)", members.len());
            let mut members = members.into_iter();
            if let Some(reference) = members.next() {
                let metadata = check_cast(&cast, reference, members)?;
                samples.insert(cast, metadata);
            }
            Ok::<_, ReconError>(samples)
        })
}

/// Verify the rest of a cast against its reference (first) subsample and
/// return the reference metadata.
fn check_cast(
    cast: &str,
    reference: SubsampleRecord,
    mut rest: impl Iterator<Item = SubsampleRecord>,
) -> Result<SampleMetadata, ReconError> {
    match rest.find(|m| !reference.same_fields(m)) {
        Some(other) => Err(ReconError::InconsistentCast {
            cast: cast.to_string(),
            reference_line: reference.line,
            line: other.line,
            diff: diff_metadata(&reference.metadata, &other.metadata),
        }),
        None => Ok(reference.metadata),
    }
}

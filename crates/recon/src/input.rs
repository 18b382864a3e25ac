use crate::error::ReconError;
use crate::model::{
    SampleMetadata, SubsampleRecord, COL_CRUISE, COL_DEPTH, COL_FILTER_DIAMETER,
    COL_FILTER_PORE_SIZE, COL_NAME, COL_SAMPLE_TYPE, COL_VOLUME, SUBSAMPLE_COLUMNS,
};
use crate::pore_size::parse_pore_size;

/// Column positions resolved from a subsample file header. Any column may be
/// absent; absent text columns read as empty strings.
#[derive(Debug, Clone, Copy)]
struct SubsampleColumns {
    cruise: Option<usize>,
    name: Option<usize>,
    depth: Option<usize>,
    sample_type: Option<usize>,
    volume: Option<usize>,
    filter_diameter: Option<usize>,
    filter_pore_size: Option<usize>,
}

impl SubsampleColumns {
    fn resolve(headers: &csv::StringRecord) -> Self {
        let idx = |name: &str| headers.iter().position(|h| h == name);
        Self {
            cruise: idx(COL_CRUISE),
            name: idx(COL_NAME),
            depth: idx(COL_DEPTH),
            sample_type: idx(COL_SAMPLE_TYPE),
            volume: idx(COL_VOLUME),
            filter_diameter: idx(COL_FILTER_DIAMETER),
            filter_pore_size: idx(COL_FILTER_PORE_SIZE),
        }
    }

    fn record(&self, line: u64, record: &csv::StringRecord) -> Result<SubsampleRecord, ReconError> {
        let text = |col: Option<usize>| -> String {
            col.and_then(|i| record.get(i)).unwrap_or("").to_string()
        };

        let cruise = text(self.cruise);

        let raw_pore_size = self
            .filter_pore_size
            .and_then(|i| record.get(i))
            .ok_or_else(|| ReconError::MissingPoreSize {
                line,
                cruise: cruise.clone(),
            })?;
        let filter_pore_size =
            parse_pore_size(raw_pore_size).ok_or_else(|| ReconError::PoreSizeParse {
                line,
                cruise: cruise.clone(),
                value: raw_pore_size.to_string(),
            })?;

        Ok(SubsampleRecord {
            line,
            metadata: SampleMetadata {
                name: text(self.name),
                depth: text(self.depth),
                sample_type: text(self.sample_type),
                volume: text(self.volume),
                filter_diameter: text(self.filter_diameter),
                filter_pore_size,
            },
            cruise,
        })
    }
}

/// Decode a subsample file (comma-delimited, header row) into records, in
/// file order. Stops at the first row whose pore size cannot be parsed.
pub fn load_subsample_rows(csv_data: &str) -> Result<Vec<SubsampleRecord>, ReconError> {
    let csv_data = csv_data.strip_prefix('\u{feff}').unwrap_or(csv_data);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_data.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| csv_error(1, &e))?
        .clone();

    for column in SUBSAMPLE_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            log::warn!("subsample file has no '{column}' column");
        }
    }

    let columns = SubsampleColumns::resolve(&headers);
    let mut rows = Vec::new();

    for result in reader.records() {
        let record = result.map_err(|e| {
            let line = e.position().map(|p| p.line()).unwrap_or(0);
            csv_error(line, &e)
        })?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        let row = columns.record(line, &record)?;
        log::trace!("line {line}: cruise '{}' {:?}", row.cruise, row.metadata);
        rows.push(row);
    }

    Ok(rows)
}

fn csv_error(line: u64, err: &csv::Error) -> ReconError {
    ReconError::Csv {
        line,
        message: err.to_string(),
    }
}

// Parent sample CSV export/import
//
// Layout: `Cast,name,depth,sampletype,volume,filterdiameter,filterporesize`,
// then one row per cast in ascending cast order.

use std::collections::btree_map::Entry;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use nettow_recon::{parse_pore_size, ParentSamples, SampleMetadata, PARENT_HEADER};

use crate::error::IoError;
use crate::text::read_file_as_utf8;

/// Write parent samples as CSV to any writer.
///
/// Comma-free values are written bare; values containing a delimiter, quote or
/// newline are quoted so the column layout survives.
pub fn write_parent_csv<W: Write>(samples: &ParentSamples, writer: W) -> Result<(), IoError> {
    write_records(samples, writer).map_err(|e| IoError::Csv(e.into()))
}

/// Create (or truncate) `path` and write parent samples to it. The file is
/// flushed before returning and closed on every path out of this function.
pub fn write_parent_csv_file(samples: &ParentSamples, path: &Path) -> Result<(), IoError> {
    let file = File::create(path).map_err(|e| IoError::file(path, e))?;
    write_records(samples, BufWriter::new(file)).map_err(|e| IoError::file(path, e))?;
    log::info!("wrote {} parent sample(s) to {}", samples.len(), path.display());
    Ok(())
}

fn write_records<W: Write>(samples: &ParentSamples, writer: W) -> std::io::Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    writer.write_record(PARENT_HEADER).map_err(std::io::Error::from)?;

    for (cast, metadata) in samples {
        let values = metadata.field_values();
        let record = std::iter::once(cast.as_str()).chain(values.iter().map(String::as_str));
        writer.write_record(record).map_err(std::io::Error::from)?;
    }

    writer.flush()
}

/// Read a parent sample CSV file produced by [`write_parent_csv_file`].
pub fn read_parent_csv(path: &Path) -> Result<ParentSamples, IoError> {
    let content = read_file_as_utf8(path)?;
    let samples = parse_parent_csv(&content)?;
    log::info!("read {} parent sample(s) from {}", samples.len(), path.display());
    Ok(samples)
}

/// Parse parent sample CSV text. The header must match exactly; every row
/// must carry all seven fields and a unique cast.
pub fn parse_parent_csv(content: &str) -> Result<ParentSamples, IoError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?;
    if headers.iter().ne(PARENT_HEADER) {
        return Err(IoError::HeaderMismatch {
            expected: PARENT_HEADER.join(","),
            found: headers.iter().collect::<Vec<_>>().join(","),
        });
    }

    let mut samples = ParentSamples::new();

    for result in reader.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        if record.len() != PARENT_HEADER.len() {
            return Err(IoError::FieldCount {
                line,
                expected: PARENT_HEADER.len(),
                found: record.len(),
            });
        }

        let field = |i: usize| record.get(i).unwrap_or("").to_string();
        let cast = field(0);
        let raw_pore_size = field(6);
        let filter_pore_size =
            parse_pore_size(&raw_pore_size).ok_or_else(|| IoError::PoreSize {
                line,
                cast: cast.clone(),
                value: raw_pore_size.clone(),
            })?;

        let metadata = SampleMetadata {
            name: field(1),
            depth: field(2),
            sample_type: field(3),
            volume: field(4),
            filter_diameter: field(5),
            filter_pore_size,
        };

        match samples.entry(cast) {
            Entry::Occupied(e) => {
                return Err(IoError::DuplicateCast {
                    line,
                    cast: e.key().clone(),
                });
            }
            Entry::Vacant(e) => {
                e.insert(metadata);
            }
        }
    }

    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Cast,name,depth,sampletype,volume,filterdiameter,filterporesize";

    fn metadata(name: &str, pore: f64) -> SampleMetadata {
        SampleMetadata {
            name: name.into(),
            depth: "150".into(),
            sample_type: "VerticalNetTow".into(),
            volume: "1800".into(),
            filter_diameter: "25".into(),
            filter_pore_size: pore,
        }
    }

    fn render(samples: &ParentSamples) -> String {
        let mut out = Vec::new();
        write_parent_csv(samples, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn writes_header_and_sorted_rows() {
        let mut samples = ParentSamples::new();
        samples.insert("C2".into(), metadata("b", 0.45));
        samples.insert("C1".into(), metadata("a", 202.0));

        assert_eq!(
            render(&samples),
            format!(
                "{HEADER}\n\
                 C1,a,150,VerticalNetTow,1800,25,202.0\n\
                 C2,b,150,VerticalNetTow,1800,25,0.45\n"
            )
        );
    }

    #[test]
    fn empty_mapping_writes_header_only() {
        assert_eq!(render(&ParentSamples::new()), format!("{HEADER}\n"));
    }

    #[test]
    fn blank_fields_stay_blank() {
        let mut samples = ParentSamples::new();
        let mut m = metadata("a", 1.0);
        m.depth.clear();
        m.volume.clear();
        samples.insert("C1".into(), m);
        assert_eq!(render(&samples), format!("{HEADER}\nC1,a,,VerticalNetTow,,25,1.0\n"));
    }

    #[test]
    fn embedded_comma_is_quoted() {
        let mut samples = ParentSamples::new();
        samples.insert("C1".into(), metadata("tow 1, net B", 1.0));
        let out = render(&samples);
        assert!(out.contains("C1,\"tow 1, net B\",150"));
        assert_eq!(parse_parent_csv(&out).unwrap(), samples);
    }

    #[test]
    fn parse_reads_rows() {
        let text = format!("{HEADER}\nC1,a,150,VerticalNetTow,1800,25,202.0\n");
        let samples = parse_parent_csv(&text).unwrap();
        assert_eq!(samples.len(), 1);
        assert_eq!(samples["C1"], metadata("a", 202.0));
    }

    #[test]
    fn parse_rejects_wrong_header() {
        let err = parse_parent_csv("Cruise,Name\nC1,a\n").unwrap_err();
        assert!(matches!(err, IoError::HeaderMismatch { ref found, .. } if found == "Cruise,Name"));
        assert!(err.is_parse_error());
    }

    #[test]
    fn parse_rejects_short_row() {
        let err = parse_parent_csv(&format!("{HEADER}\nC1,a,150\n")).unwrap_err();
        assert!(matches!(err, IoError::FieldCount { line: 2, expected: 7, found: 3 }));
    }

    #[test]
    fn parse_rejects_bad_pore_size() {
        let err = parse_parent_csv(&format!("{HEADER}\nC1,a,150,Net,1800,25,large\n")).unwrap_err();
        assert!(matches!(err, IoError::PoreSize { line: 2, ref value, .. } if value == "large"));
    }

    #[test]
    fn parse_rejects_duplicate_cast() {
        let text = format!(
            "{HEADER}\n\
             C1,a,150,Net,1800,25,1.0\n\
             C1,a,150,Net,1800,25,1.0\n"
        );
        let err = parse_parent_csv(&text).unwrap_err();
        assert!(matches!(err, IoError::DuplicateCast { line: 3, ref cast } if cast == "C1"));
    }
}

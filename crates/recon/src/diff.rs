use std::fmt;

use crate::model::SampleMetadata;
use crate::pore_size::format_pore_size;

/// One field that differs between a cast's reference record and another
/// record of the same cast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDiff {
    pub field: &'static str,
    pub expected: String,
    pub found: String,
}

impl fmt::Display for FieldDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: '{}' != '{}'", self.field, self.expected, self.found)
    }
}

/// Structural diff of two records, in output field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordDiff {
    pub fields: Vec<FieldDiff>,
}

impl RecordDiff {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Display for RecordDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, d) in self.fields.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  {d}")?;
        }
        Ok(())
    }
}

/// Compare two metadata sets field by field.
///
/// Text fields compare as strings; the pore size compares numerically and is
/// reported in its rendered form.
pub fn diff_metadata(expected: &SampleMetadata, found: &SampleMetadata) -> RecordDiff {
    let text_fields: [(&'static str, &str, &str); 5] = [
        ("name", expected.name.as_str(), found.name.as_str()),
        ("depth", expected.depth.as_str(), found.depth.as_str()),
        ("sampletype", expected.sample_type.as_str(), found.sample_type.as_str()),
        ("volume", expected.volume.as_str(), found.volume.as_str()),
        ("filterdiameter", expected.filter_diameter.as_str(), found.filter_diameter.as_str()),
    ];

    let mut fields: Vec<FieldDiff> = text_fields
        .into_iter()
        .filter(|(_, a, b)| a != b)
        .map(|(field, a, b)| FieldDiff {
            field,
            expected: a.to_string(),
            found: b.to_string(),
        })
        .collect();

    if expected.filter_pore_size != found.filter_pore_size {
        fields.push(FieldDiff {
            field: "filterporesize",
            expected: format_pore_size(expected.filter_pore_size),
            found: format_pore_size(found.filter_pore_size),
        });
    }

    RecordDiff { fields }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata() -> SampleMetadata {
        SampleMetadata {
            name: "a".into(),
            depth: "100".into(),
            sample_type: "Pteropod".into(),
            volume: "250".into(),
            filter_diameter: "25".into(),
            filter_pore_size: 1.0,
        }
    }

    #[test]
    fn identical_records_have_empty_diff() {
        assert!(diff_metadata(&metadata(), &metadata()).is_empty());
    }

    #[test]
    fn reports_each_differing_field_in_order() {
        let mut other = metadata();
        other.filter_pore_size = 1.6;
        other.name = "b".into();
        let diff = diff_metadata(&metadata(), &other);
        assert_eq!(
            diff.fields,
            vec![
                FieldDiff { field: "name", expected: "a".into(), found: "b".into() },
                FieldDiff { field: "filterporesize", expected: "1.0".into(), found: "1.6".into() },
            ]
        );
    }

    #[test]
    fn display_one_line_per_field() {
        let mut other = metadata();
        other.depth = "150".into();
        other.volume = "".into();
        let rendered = diff_metadata(&metadata(), &other).to_string();
        assert_eq!(rendered, "  depth: '100' != '150'\n  volume: '250' != ''");
    }
}

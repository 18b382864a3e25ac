use std::collections::BTreeMap;

use crate::pore_size::format_pore_size;

// ---------------------------------------------------------------------------
// Input columns
// ---------------------------------------------------------------------------

/// Subsample file column holding the cast (grouping) key.
pub const COL_CRUISE: &str = "Cruise";
pub const COL_NAME: &str = "Name";
pub const COL_DEPTH: &str = "Depth [m]";
pub const COL_SAMPLE_TYPE: &str = "Sample Type";
pub const COL_VOLUME: &str = "Sample Volume [mL]";
pub const COL_FILTER_DIAMETER: &str = "Filter Diameter [mm]";
pub const COL_FILTER_PORE_SIZE: &str = "Filter Pore Size [uM]";

/// Every column the reconciler reads, in field order.
pub const SUBSAMPLE_COLUMNS: [&str; 7] = [
    COL_CRUISE,
    COL_NAME,
    COL_DEPTH,
    COL_SAMPLE_TYPE,
    COL_VOLUME,
    COL_FILTER_DIAMETER,
    COL_FILTER_PORE_SIZE,
];

// ---------------------------------------------------------------------------
// Parent sample
// ---------------------------------------------------------------------------

/// Header of the parent-sample CSV: the cast key followed by
/// [`SampleMetadata::FIELD_NAMES`].
pub const PARENT_HEADER: [&str; 7] = [
    "Cast",
    "name",
    "depth",
    "sampletype",
    "volume",
    "filterdiameter",
    "filterporesize",
];

/// Cast-level metadata shared by every subsample of a net tow.
///
/// This is also the reconciled parent sample: once a cast passes the
/// consistency check, its first record's metadata is carried forward as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleMetadata {
    pub name: String,
    pub depth: String,
    pub sample_type: String,
    pub volume: String,
    pub filter_diameter: String,
    pub filter_pore_size: f64,
}

impl SampleMetadata {
    /// Output field names, in the fixed column order.
    pub const FIELD_NAMES: [&'static str; 6] = [
        "name",
        "depth",
        "sampletype",
        "volume",
        "filterdiameter",
        "filterporesize",
    ];

    /// Field values rendered as text, in [`Self::FIELD_NAMES`] order.
    pub fn field_values(&self) -> [String; 6] {
        [
            self.name.clone(),
            self.depth.clone(),
            self.sample_type.clone(),
            self.volume.clone(),
            self.filter_diameter.clone(),
            format_pore_size(self.filter_pore_size),
        ]
    }
}

// ---------------------------------------------------------------------------
// Subsample
// ---------------------------------------------------------------------------

/// One decoded row of the subsample file.
#[derive(Debug, Clone)]
pub struct SubsampleRecord {
    /// 1-based line in the source file (header is line 1).
    pub line: u64,
    pub cruise: String,
    pub metadata: SampleMetadata,
}

impl SubsampleRecord {
    /// Structural equality over the record's fields. The source line is
    /// bookkeeping and does not take part.
    pub fn same_fields(&self, other: &SubsampleRecord) -> bool {
        self.cruise == other.cruise && self.metadata == other.metadata
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Reconciled parent samples keyed by cast, ascending.
pub type ParentSamples = BTreeMap<String, SampleMetadata>;

/// Result of reconciling one subsample file.
#[derive(Debug, Clone)]
pub struct Reconciliation {
    pub samples: ParentSamples,
    /// Number of subsample rows consumed.
    pub subsample_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata(name: &str) -> SampleMetadata {
        SampleMetadata {
            name: name.into(),
            depth: "100".into(),
            sample_type: "Pteropod".into(),
            volume: "250".into(),
            filter_diameter: "25".into(),
            filter_pore_size: 1.0,
        }
    }

    #[test]
    fn parent_header_is_cast_plus_fields() {
        assert_eq!(PARENT_HEADER[0], "Cast");
        assert_eq!(&PARENT_HEADER[1..], &SampleMetadata::FIELD_NAMES[..]);
    }

    #[test]
    fn field_values_follow_field_order() {
        let values = metadata("a").field_values();
        assert_eq!(values, ["a", "100", "Pteropod", "250", "25", "1.0"].map(String::from));
    }

    #[test]
    fn same_fields_ignores_line() {
        let a = SubsampleRecord { line: 2, cruise: "C1".into(), metadata: metadata("a") };
        let b = SubsampleRecord { line: 9, cruise: "C1".into(), metadata: metadata("a") };
        let c = SubsampleRecord { line: 3, cruise: "C1".into(), metadata: metadata("b") };
        assert!(a.same_fields(&b));
        assert!(!a.same_fields(&c));
    }
}

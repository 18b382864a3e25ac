use std::path::PathBuf;

use nettow_io::{read_file_as_utf8, read_parent_csv, write_parent_csv_file};
use nettow_io::{SampleLoader, SqliteSampleLoader};

fn recon_fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../recon/tests/fixtures").join(name)
}

const HEADER: &str = "Cast,name,depth,sampletype,volume,filterdiameter,filterporesize";

#[test]
fn written_file_has_parent_header() {
    let text = read_file_as_utf8(&recon_fixture("simz_2013_consistent.csv")).unwrap();
    let result = nettow_recon::reconcile(&text).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("parents.csv");
    write_parent_csv_file(&result.samples, &out).unwrap();

    let written = std::fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines[0], HEADER);
    assert_eq!(
        &lines[1..],
        [
            "2013_SIMZ_TL_C11,2013_SIMZ_TL_C11_1,,VerticalNetTow,,25,0.45",
            "2013_SIMZ_TL_C2,2013_SIMZ_TL_C2_1,150,VerticalNetTow,1800,25,202.0",
            "2013_SIMZ_TL_C5,2013_SIMZ_TL_C5_1,200,VerticalNetTow,2300,25,202.0",
        ]
    );

    assert_eq!(read_parent_csv(&out).unwrap(), result.samples);
}

#[test]
fn overwrite_truncates_previous_content() {
    let text = read_file_as_utf8(&recon_fixture("simz_2013_consistent.csv")).unwrap();
    let result = nettow_recon::reconcile(&text).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("parents.csv");
    std::fs::write(&out, "stale\n".repeat(100)).unwrap();

    write_parent_csv_file(&result.samples, &out).unwrap();
    let written = std::fs::read_to_string(&out).unwrap();
    assert!(!written.contains("stale"));
    assert_eq!(written.lines().count(), 4);
}

#[test]
fn unwritable_destination_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("missing-dir").join("parents.csv");
    let err = write_parent_csv_file(&Default::default(), &out).unwrap_err();
    assert!(err.to_string().contains("missing-dir"));
}

#[test]
fn load_file_into_sqlite() {
    let text = read_file_as_utf8(&recon_fixture("simz_2013_consistent.csv")).unwrap();
    let result = nettow_recon::reconcile(&text).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("parents.csv");
    write_parent_csv_file(&result.samples, &csv_path).unwrap();

    let db_path = dir.path().join("db").join("stoqs_simz_aug2013_t.sqlite");
    let mut loader = SqliteSampleLoader::open(&db_path).unwrap();
    let samples = read_parent_csv(&csv_path).unwrap();
    assert_eq!(loader.load(&samples).unwrap(), 3);
    assert_eq!(loader.load(&samples).unwrap(), 3);
    drop(loader);

    let reopened = SqliteSampleLoader::open(&db_path).unwrap();
    assert_eq!(reopened.stored_samples().unwrap(), result.samples);
}

#[test]
fn parent_reader_rejects_subsample_file() {
    let err = read_parent_csv(&recon_fixture("simz_2013_consistent.csv")).unwrap_err();
    assert!(err.is_parse_error());
    assert!(err.to_string().starts_with("unexpected header"));
}

struct CountingLoader {
    calls: usize,
}

impl SampleLoader for CountingLoader {
    fn load(&mut self, samples: &nettow_recon::ParentSamples) -> Result<usize, nettow_io::IoError> {
        self.calls += 1;
        Ok(samples.len())
    }
}

#[test]
fn loader_trait_object() {
    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("parents.csv");
    std::fs::write(&csv_path, format!("{HEADER}\nC1,a,10,Net,100,25,1.0\n")).unwrap();
    let samples = read_parent_csv(&csv_path).unwrap();

    let mut counting = CountingLoader { calls: 0 };
    let mut sqlite = SqliteSampleLoader::open(&dir.path().join("x.sqlite")).unwrap();
    {
        let loaders: [&mut dyn SampleLoader; 2] = [&mut counting, &mut sqlite];
        for loader in loaders {
            assert_eq!(loader.load(&samples).unwrap(), 1);
        }
    }
    assert_eq!(counting.calls, 1);
    assert_eq!(sqlite.stored_samples().unwrap(), samples);
}

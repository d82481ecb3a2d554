//! Integration tests for Feather persistence of fetched tables.
//!
//! Offline like the fetch tests: seeded cache, unroutable catalog address.

use std::fmt::Write as _;
use std::path::Path;

use arrow::array::{Float64Array, Int8Array};
use arrow::datatypes::DataType;

use traer::digits::{DATASET_NAME, DATASET_VERSION, FEATURE_FILE, LABEL_FILE};
use traer::openml::CachedDescription;
use traer::persist::read_feather;
use traer::{DigitsFetcher, OpenMlClient};

fn digit_fixture(rows: usize) -> String {
    let mut text = String::from("@relation mnist_784\n");
    for p in 1..=784 {
        let _ = writeln!(text, "@attribute pixel{p} numeric");
    }
    text.push_str("@attribute class {0,1,2,3,4,5,6,7,8,9}\n@data\n");
    for r in 0..rows {
        let _ = writeln!(text, "{{{} {}, 784 {}}}", r % 784, (r * 3 + 7) % 256, r % 10);
    }
    text
}

fn seeded_fetcher(cache_dir: &Path, rows: usize) -> DigitsFetcher {
    let client = OpenMlClient::new(cache_dir)
        .expect("operation should succeed")
        .api_base("http://127.0.0.1:9");
    let description = CachedDescription {
        did: 554,
        name: DATASET_NAME.to_string(),
        version: DATASET_VERSION,
        url: "https://www.openml.org/data/v1/download/52667/mnist_784.arff".to_string(),
        default_target_attribute: Some("class".to_string()),
    };
    client
        .cache()
        .store(&description, &digit_fixture(rows))
        .expect("operation should succeed");
    DigitsFetcher::with_client(client)
}

fn dir_entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("operation should succeed")
        .map(|entry| {
            entry
                .expect("operation should succeed")
                .file_name()
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    names.sort();
    names
}

#[test]
fn test_persist_writes_exactly_two_fixed_names() {
    let cache = tempfile::tempdir().expect("operation should succeed");
    let out = tempfile::tempdir().expect("operation should succeed");
    let fetcher = seeded_fetcher(cache.path(), 10);

    fetcher.fetch(Some(out.path())).expect("operation should succeed");

    assert_eq!(
        dir_entries(out.path()),
        vec![FEATURE_FILE.to_string(), LABEL_FILE.to_string()]
    );
}

#[test]
fn test_fetch_without_persist_writes_nothing() {
    let cache = tempfile::tempdir().expect("operation should succeed");
    let out = tempfile::tempdir().expect("operation should succeed");
    let fetcher = seeded_fetcher(cache.path(), 10);

    fetcher.fetch(None).expect("operation should succeed");

    assert!(dir_entries(out.path()).is_empty());
}

#[test]
fn test_persisted_tables_match_returned_tables() {
    let cache = tempfile::tempdir().expect("operation should succeed");
    let out = tempfile::tempdir().expect("operation should succeed");
    let fetcher = seeded_fetcher(cache.path(), 25);

    let (features, labels) = fetcher.fetch(Some(out.path())).expect("operation should succeed");

    let feature_batch = read_feather(&out.path().join(FEATURE_FILE))
        .expect("operation should succeed");
    assert_eq!(feature_batch.num_rows(), 25);
    assert_eq!(feature_batch.num_columns(), 784);
    assert_eq!(feature_batch.schema().field(0).name(), "pixel1");
    assert_eq!(feature_batch.schema().field(0).data_type(), &DataType::Float64);
    let first_column = feature_batch
        .column(0)
        .as_any()
        .downcast_ref::<Float64Array>()
        .expect("column should be Float64");
    assert!((first_column.value(0) - features.values()[[0, 0]]).abs() < f64::EPSILON);

    let label_batch = read_feather(&out.path().join(LABEL_FILE)).expect("operation should succeed");
    assert_eq!(label_batch.num_rows(), 25);
    assert_eq!(label_batch.num_columns(), 1);
    assert_eq!(label_batch.schema().field(0).name(), "class");
    assert_eq!(label_batch.schema().field(0).data_type(), &DataType::Int8);
    let label_column = label_batch
        .column(0)
        .as_any()
        .downcast_ref::<Int8Array>()
        .expect("column should be Int8");
    assert_eq!(label_column.values().to_vec(), labels.values().to_vec());
}

#[test]
fn test_repeat_persist_is_byte_identical() {
    let cache = tempfile::tempdir().expect("operation should succeed");
    let out = tempfile::tempdir().expect("operation should succeed");
    let fetcher = seeded_fetcher(cache.path(), 12);

    fetcher.fetch(Some(out.path())).expect("operation should succeed");
    let first_features = std::fs::read(out.path().join(FEATURE_FILE))
        .expect("operation should succeed");
    let first_labels = std::fs::read(out.path().join(LABEL_FILE)).expect("operation should succeed");

    fetcher.fetch(Some(out.path())).expect("operation should succeed");
    let second_features = std::fs::read(out.path().join(FEATURE_FILE))
        .expect("operation should succeed");
    let second_labels =
        std::fs::read(out.path().join(LABEL_FILE)).expect("operation should succeed");

    assert_eq!(first_features, second_features);
    assert_eq!(first_labels, second_labels);
}

#[test]
fn test_persist_overwrites_stale_files() {
    let cache = tempfile::tempdir().expect("operation should succeed");
    let out = tempfile::tempdir().expect("operation should succeed");
    std::fs::write(out.path().join(FEATURE_FILE), b"stale").expect("operation should succeed");
    std::fs::write(out.path().join(LABEL_FILE), b"stale").expect("operation should succeed");
    let fetcher = seeded_fetcher(cache.path(), 8);

    fetcher.fetch(Some(out.path())).expect("operation should succeed");

    let feature_batch = read_feather(&out.path().join(FEATURE_FILE))
        .expect("operation should succeed");
    assert_eq!(feature_batch.num_rows(), 8);
}

#[test]
fn test_missing_persist_dir_creates_nothing() {
    let cache = tempfile::tempdir().expect("operation should succeed");
    let out = tempfile::tempdir().expect("operation should succeed");
    let missing = out.path().join("absent");
    let fetcher = seeded_fetcher(cache.path(), 5);

    let err = fetcher.fetch(Some(&missing)).unwrap_err();
    assert!(matches!(err, traer::Error::MissingOutputDir { .. }));
    assert!(!missing.exists());
}

#[test]
fn test_unreachable_catalog_with_persist_writes_nothing() {
    let cache = tempfile::tempdir().expect("operation should succeed");
    let out = tempfile::tempdir().expect("operation should succeed");
    let client = OpenMlClient::new(cache.path())
        .expect("operation should succeed")
        .api_base("http://127.0.0.1:9");
    let fetcher = DigitsFetcher::with_client(client);

    let err = fetcher.fetch(Some(out.path())).unwrap_err();
    assert!(err.is_remote());
    assert!(dir_entries(out.path()).is_empty());
}

#[test]
fn test_failed_fetch_leaves_output_dir_untouched() {
    let mut arff = String::from("@relation mnist_784\n");
    for p in 1..=784 {
        let _ = writeln!(arff, "@attribute pixel{p} numeric");
    }
    arff.push_str("@attribute class {0,300}\n@data\n{0 1, 784 300}\n");

    let cache = tempfile::tempdir().expect("operation should succeed");
    let out = tempfile::tempdir().expect("operation should succeed");
    let client = OpenMlClient::new(cache.path())
        .expect("operation should succeed")
        .api_base("http://127.0.0.1:9");
    let description = CachedDescription {
        did: 554,
        name: DATASET_NAME.to_string(),
        version: DATASET_VERSION,
        url: "https://www.openml.org/data/v1/download/52667/mnist_784.arff".to_string(),
        default_target_attribute: Some("class".to_string()),
    };
    client.cache().store(&description, &arff).expect("operation should succeed");
    let fetcher = DigitsFetcher::with_client(client);

    let err = fetcher.fetch(Some(out.path())).unwrap_err();
    assert!(matches!(err, traer::Error::LabelRange { .. }));
    assert!(dir_entries(out.path()).is_empty());
}

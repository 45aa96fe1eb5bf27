//! End-to-end run over file input and output.

use std::io::Write as _;

use spf_flattener::{run_flatten, Config};
use tempfile::{tempdir, NamedTempFile};

#[tokio::test]
async fn empty_input_produces_an_empty_output_file() {
    let mut input = NamedTempFile::new().unwrap();
    writeln!(input, "# no domains here").unwrap();
    writeln!(input).unwrap();

    let dir = tempdir().unwrap();
    let output_path = dir.path().join("results.txt");

    let config = Config {
        file: input.path().to_path_buf(),
        output: output_path.clone(),
        ..Default::default()
    };

    let report = run_flatten(config).await.expect("run succeeds");
    assert_eq!(report.total_domains, 0);
    assert_eq!(report.resolved, 0);
    assert_eq!(report.failed, 0);
    assert_eq!(report.output_path, output_path);

    let contents = std::fs::read_to_string(&output_path).expect("output file exists");
    assert!(contents.is_empty());
}

#[tokio::test]
async fn unreadable_input_fails_with_context() {
    let dir = tempdir().unwrap();
    let config = Config {
        file: dir.path().join("does-not-exist.txt"),
        output: dir.path().join("results.txt"),
        ..Default::default()
    };

    let err = run_flatten(config).await.expect_err("missing input should fail");
    assert!(format!("{err:#}").contains("Failed to open input file"));
}

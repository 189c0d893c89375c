mod common;

use common::{init_logging, write_tree};
use contextmap::config::{load_config_from, load_config_from_path, CohesionWeights};
use contextmap::{analyze_context, collect_sources, AnalysisInputs, IssueKind, Severity};
use indoc::indoc;
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

const STRICT_CONFIG: &str = indoc! {r#"
    [thresholds]
    max_depth = 1

    [ignore]
    patterns = ["src/generated/**"]
"#};

#[test]
fn test_config_found_from_nested_directory() {
    init_logging();
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".contextmap.toml"), STRICT_CONFIG).unwrap();
    let nested = dir.path().join("src/orders");
    fs::create_dir_all(&nested).unwrap();

    let config = load_config_from(&nested);
    assert_eq!(config.thresholds.max_depth, 1);
    assert_eq!(config.get_ignore_patterns(), vec!["src/generated/**"]);
    assert_eq!(config.cohesion, CohesionWeights::default());
}

#[test]
fn test_thresholds_and_ignore_patterns_drive_analysis() {
    init_logging();
    let dir = TempDir::new().unwrap();
    write_tree(
        dir.path(),
        &[
            (".contextmap.toml", STRICT_CONFIG),
            ("src/types/order.ts", common::TYPES_ORDER),
            ("src/orders/create.ts", common::ORDERS_CREATE),
            ("src/index.ts", common::INDEX),
            ("src/generated/client.ts", "export const client = {};"),
        ],
    );

    let config = load_config_from(dir.path());
    let sources = collect_sources(dir.path(), &config.get_ignore_patterns()).unwrap();
    assert_eq!(sources.len(), 3);

    let report = analyze_context(&sources, &AnalysisInputs::new(), &config);
    let index = report.result_for("src/index.ts").unwrap();
    assert_eq!(index.import_depth, 2);
    assert_eq!(index.issues[0].kind, IssueKind::ImportDepth);
    assert_eq!(index.severity, Severity::Critical);

    let create = report.result_for("src/orders/create.ts").unwrap();
    assert!(create.issues.is_empty());
}

#[test]
fn test_invalid_weights_fall_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(".contextmap.toml");
    fs::write(
        &path,
        indoc! {r#"
            [cohesion]
            import_based = -1.0

            [thresholds]
            min_cohesion = 0.5
        "#},
    )
    .unwrap();

    let config = load_config_from_path(&path).unwrap();
    assert_eq!(config.cohesion, CohesionWeights::default());
    assert_eq!(config.thresholds.min_cohesion, 0.5);
}

#[test]
fn test_malformed_file_is_a_configuration_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(".contextmap.toml");
    fs::write(&path, "[thresholds\nmax_depth = ").unwrap();

    let err = load_config_from_path(&path).unwrap_err();
    assert!(matches!(err, contextmap::Error::Configuration(_)));

    // The ancestor search logs and carries on with defaults
    let config = load_config_from(dir.path());
    assert_eq!(config.thresholds.max_depth, 5);
}

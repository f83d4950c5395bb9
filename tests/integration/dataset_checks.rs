use super::support::{CONSISTENT_VARIANTS_YAML, VARIANTS_YAML};
use super::IntegrationHarness;
use anyhow::Result;
use moneymap::config::AppConfig;
use moneymap::matrix::{ValidationIssue, DEFAULT_TOP_N};
use moneymap::{classify_by_tags, classify_by_text, load_app_data, validate_app_data};

#[test]
fn consistent_dataset_validates_clean() -> Result<()> {
    let harness = IntegrationHarness::new();
    harness.seed_matrix_tables();
    harness.write("variants.yaml", CONSISTENT_VARIANTS_YAML);

    let data = load_app_data(harness.data_dir(), &AppConfig::default())?;
    assert_eq!(data.matrix.cells.len(), 8);
    assert_eq!(data.matrix.cells[0].label, "Работа на время");
    assert_eq!(data.catalog.len(), 2);
    assert_eq!(validate_app_data(&data), Vec::<ValidationIssue>::new());
    Ok(())
}

#[test]
fn untagged_variants_are_reported() -> Result<()> {
    let harness = IntegrationHarness::new();
    harness.seed_matrix_tables();
    harness.write("variants.yaml", VARIANTS_YAML);

    let data = load_app_data(harness.data_dir(), &AppConfig::default())?;
    let issues = validate_app_data(&data);
    assert!(issues.contains(&ValidationIssue::VariantAxis {
        variant: "v_courier".into(),
        field: "risk_level",
        value: String::new(),
    }));
    assert!(!issues
        .iter()
        .any(|issue| matches!(issue, ValidationIssue::VariantCells { .. })));
    // a_first has no primary way at all
    assert!(issues.contains(&ValidationIssue::VariantWay {
        variant: "a_first".into(),
        way: String::new(),
    }));
    Ok(())
}

#[test]
fn missing_matrix_table_fails_loading() {
    let harness = IntegrationHarness::new();
    harness.seed_matrix_tables();
    harness.write("variants.yaml", CONSISTENT_VARIANTS_YAML);
    std::fs::remove_file(harness.data_dir().join("keywords.yaml")).expect("remove fixture");

    let err = load_app_data(harness.data_dir(), &AppConfig::default()).unwrap_err();
    assert!(err.to_string().contains("Data file not found"), "{err}");
    assert!(err.to_string().contains("keywords.yaml"), "{err}");
}

#[test]
fn loaded_tables_drive_classification() -> Result<()> {
    let harness = IntegrationHarness::new();
    harness.seed_matrix_tables();
    harness.write("variants.yaml", CONSISTENT_VARIANTS_YAML);
    let data = load_app_data(harness.data_dir(), &AppConfig::default())?;

    let by_tags = classify_by_tags(
        &data.matrix,
        &["result"],
        &["platform"],
        &["percent"],
        DEFAULT_TOP_N,
    );
    assert!(!by_tags.taxonomy_scores.is_empty());
    assert!(!by_tags.cell_scores.is_empty());
    assert_eq!(by_tags.taxonomy_scores[0].0, "fee_for_result");

    let by_text = classify_by_text(
        &data.matrix,
        "Я получаю процент с продаж на платформе",
        DEFAULT_TOP_N,
    );
    assert!(by_text.tags.value.contains(&"percent".to_string()));
    assert_eq!(by_text.cell_scores[0], ("P3".to_string(), 1.4));

    let hinted = classify_by_text(&data.matrix, "Оклад и премия", DEFAULT_TOP_N);
    assert_eq!(hinted.taxonomy_scores, [("salary".to_string(), 2.0)]);
    Ok(())
}

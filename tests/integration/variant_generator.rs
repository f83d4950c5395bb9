use super::IntegrationHarness;
use anyhow::Result;
use moneymap::config::{CoverageThresholds, GeneratorSettings};
use moneymap::generator::{run, GeneratorError, GeneratorPaths};
use moneymap::model::VariantsFile;
use moneymap::Variant;
use std::collections::HashSet;
use std::fs;

fn generate(harness: &IntegrationHarness) -> Result<(GeneratorPaths, moneymap::generator::Generation)> {
    let paths = GeneratorPaths::in_data_dir(harness.data_dir());
    let generation = run(&paths, &GeneratorSettings::default())?;
    Ok((paths, generation))
}

#[test]
fn repeated_runs_write_identical_bytes() -> Result<()> {
    let harness = IntegrationHarness::new();
    harness.seed_generator_inputs();
    let (paths, _) = generate(&harness)?;
    let first = fs::read(&paths.output)?;

    let second_paths = GeneratorPaths {
        output: harness.variants_dir().join("second.json"),
        ..paths.clone()
    };
    run(&second_paths, &GeneratorSettings::default())?;
    let second = fs::read(&second_paths.output)?;

    assert!(!first.is_empty());
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn generated_tags_respect_caps() -> Result<()> {
    let harness = IntegrationHarness::new();
    harness.seed_generator_inputs();
    let (_, generation) = generate(&harness)?;

    assert!(!generation.variants.is_empty());
    for variant in &generation.variants {
        assert!(variant.sell_tags.len() <= 3, "{}", variant.id);
        assert!(variant.to_whom_tags.len() <= 2, "{}", variant.id);
        assert!(variant.value_tags.len() <= 2, "{}", variant.id);
        assert!(variant.matrix_cells.len() <= 3, "{}", variant.id);
        assert!(variant.bridge_ids.len() <= 8, "{}", variant.id);
        assert!(variant.route_ids.len() <= 3, "{}", variant.id);
        assert!(!variant.to_whom_tags.is_empty(), "{}", variant.id);
        assert!(!variant.value_tags.is_empty(), "{}", variant.id);
    }
    Ok(())
}

#[test]
fn salary_variants_stay_within_allowed_audiences() -> Result<()> {
    let harness = IntegrationHarness::new();
    harness.seed_generator_inputs();
    let (_, generation) = generate(&harness)?;

    let allowed: HashSet<&str> = ["single_client", "platform"].into_iter().collect();
    let salary: Vec<&Variant> = generation
        .variants
        .iter()
        .filter(|v| v.id.starts_with("salary.courier."))
        .collect();
    assert!(salary.len() >= 4);
    for variant in &salary {
        assert_eq!(variant.primary_way_id, "salary");
        assert!(variant
            .to_whom_tags
            .iter()
            .all(|tag| allowed.contains(tag.as_str())));
        assert!(variant
            .value_tags
            .iter()
            .all(|tag| tag == "rate" || tag == "price"));
    }

    let direct = generation
        .variants
        .iter()
        .find(|v| v.id == "salary.courier.direct_client")
        .expect("primary channel variant");
    assert_eq!(direct.title, "Курьер напрямую");
    assert_eq!(direct.to_whom_tags, vec!["single_client", "platform"]);
    assert_eq!(direct.risk_level, "low");
    assert_eq!(direct.activity_profile.role_family, "LOGISTICS");
    assert!(generation
        .variants
        .iter()
        .any(|v| v.id == "salary.courier.freelance_platform"));
    Ok(())
}

#[test]
fn duplicate_archetypes_are_dropped_after_the_first() -> Result<()> {
    let harness = IntegrationHarness::new();
    harness.seed_generator_inputs();
    let (_, generation) = generate(&harness)?;

    let ids: HashSet<&str> = generation.variants.iter().map(|v| v.id.as_str()).collect();
    assert!(ids.contains("salary.courier.direct_client"));
    assert!(!ids.contains("salary.courier_copy.direct_client"));
    assert!(!ids.contains("salary.courier_copy.freelance_platform"));
    assert_eq!(ids.len(), generation.variants.len());
    Ok(())
}

#[test]
fn copywriter_lists_are_filtered_and_ordered() -> Result<()> {
    let harness = IntegrationHarness::new();
    harness.seed_generator_inputs();
    let (_, generation) = generate(&harness)?;

    let base = generation
        .variants
        .iter()
        .find(|v| v.id == "fee_for_result.copywriter.direct_client")
        .expect("copywriter primary variant");
    assert_eq!(base.sell_tags, vec!["skill", "result", "time"]);
    assert_eq!(base.matrix_cells, vec!["A2", "A4", "P1"]);
    assert_eq!(base.value_tags, vec!["price"]);
    assert_eq!(base.bridge_ids.len(), 7);
    assert_eq!(base.notes.as_deref(), Some("Тексты под заказ."));
    Ok(())
}

#[test]
fn risk_levels_and_channel_state_follow_modifiers() -> Result<()> {
    let harness = IntegrationHarness::new();
    harness.seed_generator_inputs();
    let (_, generation) = generate(&harness)?;

    for variant in &generation.variants {
        if variant.primary_way_id == "entrepreneurship_margin" {
            assert_eq!(variant.risk_level, "high", "{}", variant.id);
        }
        if variant.id.starts_with("salary.") {
            let expected = if variant.id.ends_with(".leverage") { "high" } else { "low" };
            assert_eq!(variant.risk_level, expected, "{}", variant.id);
        }
        assert_eq!(
            variant.channel_state.automation,
            variant.id.ends_with(".automation"),
            "{}",
            variant.id
        );
    }
    Ok(())
}

#[test]
fn coverage_violations_do_not_block_the_output() -> Result<()> {
    let harness = IntegrationHarness::new();
    harness.seed_generator_inputs();
    let (paths, generation) = generate(&harness)?;

    assert!(!generation.report.is_ok());
    assert_eq!(generation.report.exit_status(), 1);
    assert!(paths.output.exists());
    assert!(generation
        .report
        .violations
        .iter()
        .any(|v| v.starts_with("Total variants")));
    assert!(generation
        .report
        .violations
        .contains(&"Role family OPS has only 0 variants".to_string()));

    let written: VariantsFile<Variant> = serde_json::from_str(&fs::read_to_string(&paths.output)?)?;
    assert_eq!(written.variants, generation.variants);
    Ok(())
}

#[test]
fn relaxed_thresholds_pass() -> Result<()> {
    let harness = IntegrationHarness::new();
    harness.seed_generator_inputs();
    let settings = GeneratorSettings {
        thresholds: CoverageThresholds {
            mechanism: 0,
            role_family: 0,
            matrix_cell: 0,
            sell_tag: 0,
            to_whom_tag: 0,
            value_tag: 0,
            total: 1,
            suspicious_titles_shown: 5,
        },
        ..GeneratorSettings::default()
    };
    let generation = run(&GeneratorPaths::in_data_dir(harness.data_dir()), &settings)?;
    assert!(generation.report.is_ok(), "{}", generation.report);
    assert_eq!(generation.report.exit_status(), 0);
    Ok(())
}

#[test]
fn unknown_mechanism_is_a_configuration_error() {
    let harness = IntegrationHarness::new();
    harness.write(
        "variants/archetypes.yaml",
        "archetypes:\n  - arch_id: ticket\n    mechanism_id: lottery\n    base_title: Lotto\n",
    );
    harness.write("variants/modifiers.yaml", super::support::MODIFIERS_YAML);

    let paths = GeneratorPaths::in_data_dir(harness.data_dir());
    let err = run(&paths, &GeneratorSettings::default()).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<GeneratorError>(),
        Some(GeneratorError::UnknownMechanism { mechanism_id, .. }) if mechanism_id == "lottery"
    ));
    assert!(!paths.output.exists());
}

#[test]
fn missing_inputs_are_reported() {
    let harness = IntegrationHarness::new();
    let err = run(
        &GeneratorPaths::in_data_dir(harness.data_dir()),
        &GeneratorSettings::default(),
    )
    .unwrap_err();
    assert!(err.to_string().contains("Generator input not found"));
}

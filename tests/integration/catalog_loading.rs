use super::support::{
    ACTIVITY_PROFILES_YAML, ACTIVITY_SUBPROFILES_YAML, AUTO_TAGGING_YAML, VARIANTS_YAML,
};
use super::IntegrationHarness;
use anyhow::Result;
use moneymap::config::AppConfig;
use moneymap::load_catalog;
use moneymap::model::UNKNOWN_ROLE;
use serde_json::json;

fn seeded() -> IntegrationHarness {
    let harness = IntegrationHarness::new();
    harness.write("variants.yaml", VARIANTS_YAML);
    harness.write("auto_tagging.yaml", AUTO_TAGGING_YAML);
    harness.write("activity_profiles.yaml", ACTIVITY_PROFILES_YAML);
    harness.write("activity_subprofiles.yaml", ACTIVITY_SUBPROFILES_YAML);
    harness
}

#[test]
fn loader_backfills_only_unset_labels() -> Result<()> {
    let harness = seeded();
    let catalog = load_catalog(harness.data_dir(), &AppConfig::default())?;

    let courier = catalog.get("v_courier").expect("courier variant");
    assert_eq!(courier.activity_profile.role_family, "LOGISTICS");
    assert_eq!(courier.profile_id.as_deref(), Some("delivery"));
    assert_eq!(courier.subprofile_id.as_deref(), Some("delivery.bike"));
    assert_eq!(courier.work_format_ids, vec!["outdoor"]);
    assert!(courier.entry_level_ids.is_empty());
    assert_eq!(courier.extra.get("hints_fit"), Some(&json!(["outdoor"])));

    let kept = catalog.get("v_admin_kept").expect("preset role variant");
    assert_eq!(kept.activity_profile.role_family, "ADMIN");
    assert_eq!(kept.profile_id.as_deref(), Some("delivery"));
    assert_eq!(kept.subprofile_id, None);

    let manual = catalog.get("a_first").expect("manual profile variant");
    assert_eq!(manual.profile_id.as_deref(), Some("manual_profile"));
    assert_eq!(manual.activity_profile.role_family, UNKNOWN_ROLE);
    Ok(())
}

#[test]
fn keywords_and_definition_tags_drive_profiles() -> Result<()> {
    let harness = seeded();
    let catalog = load_catalog(harness.data_dir(), &AppConfig::default())?;

    let design = catalog.get("v_design").expect("design variant");
    assert_eq!(design.profile_id.as_deref(), Some("creative"));
    assert_eq!(design.subprofile_id.as_deref(), Some("creative.graphics"));
    assert_eq!(design.work_format_ids, vec!["remote"]);
    assert_eq!(catalog.activity_profiles.len(), 2);
    assert_eq!(catalog.activity_subprofiles.len(), 2);
    assert!(catalog.work_formats.is_empty());
    Ok(())
}

#[test]
fn strict_threshold_leaves_weak_profiles_unset() -> Result<()> {
    let harness = seeded();
    let mut config = AppConfig::default();
    config.profile_tagging.confidence_threshold = 0.6;
    let catalog = load_catalog(harness.data_dir(), &config)?;

    assert_eq!(catalog.get("v_admin_kept").unwrap().profile_id, None);
    assert_eq!(
        catalog.get("v_courier").unwrap().profile_id.as_deref(),
        Some("delivery")
    );
    Ok(())
}

#[test]
fn variants_are_ordered_and_indexed() -> Result<()> {
    let harness = seeded();
    let catalog = load_catalog(harness.data_dir(), &AppConfig::default())?;

    let ids: Vec<&str> = catalog.variants.iter().map(|v| v.id.as_str()).collect();
    assert_eq!(ids, ["a_first", "v_admin_kept", "v_courier", "v_design"]);

    let salary: Vec<&str> = catalog.by_way("salary").into_iter().map(|v| v.id.as_str()).collect();
    assert_eq!(salary, ["a_first", "v_admin_kept", "v_courier"]);
    let p2: Vec<&str> = catalog.by_cell("P2").into_iter().map(|v| v.id.as_str()).collect();
    assert_eq!(p2, ["v_admin_kept", "v_design"]);
    assert!(catalog.by_cell("A4").is_empty());
    assert_eq!(catalog.len(), 4);
    Ok(())
}

#[test]
fn generated_table_wins_and_manual_overrides_merge() -> Result<()> {
    let harness = IntegrationHarness::new();
    harness.write("variants.yaml", VARIANTS_YAML);
    harness.write(
        "variants/variants.generated.json",
        r#"{"variants": [
            {"id": "salary.courier.direct_client", "title": "Курьер напрямую", "primary_way_id": "salary",
             "notes": "Доставка", "activity_profile": {"role_family": "LOGISTICS"}},
            {"id": "salary.clerk.direct_client", "title": "Sachbearbeiter", "primary_way_id": "salary"}
        ]}"#,
    );
    harness.write(
        "variants/variants.manual.yaml",
        r#"
variants:
  - id: salary.courier.direct_client
    title: Курьер на велосипеде
  - id: manual.only
    title: Hausmeister
    primary_way_id: salary
"#,
    );

    let catalog = load_catalog(harness.data_dir(), &AppConfig::default())?;
    let ids: Vec<&str> = catalog.variants.iter().map(|v| v.id.as_str()).collect();
    assert_eq!(
        ids,
        ["manual.only", "salary.clerk.direct_client", "salary.courier.direct_client"]
    );

    let courier = catalog.get("salary.courier.direct_client").unwrap();
    assert_eq!(courier.title, "Курьер на велосипеде");
    assert_eq!(courier.notes.as_deref(), Some("Доставка"));
    assert_eq!(courier.activity_profile.role_family, "LOGISTICS");

    assert_eq!(
        catalog.get("salary.clerk.direct_client").unwrap().activity_profile.role_family,
        "ADMIN"
    );
    assert!(catalog.get("v_courier").is_none());
    Ok(())
}

#[test]
fn missing_variants_file_names_the_path() {
    let harness = IntegrationHarness::new();
    let err = load_catalog(harness.data_dir(), &AppConfig::default()).unwrap_err();
    assert!(err.to_string().contains("variants.yaml"), "{err}");
}

use super::IntegrationHarness;
use anyhow::Result;
use moneymap::config::{RoleClassifierSettings, ScoringRules};
use moneymap::tagging::{role_classifier_from_settings, Detail, RoleClassifier, RoleLabel};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const VOCABULARY: &[&str] = &[
    "Verkäufer", "Kundenservice", "Kurier", "Lager", "m/w/d", "Vollzeit", "Büro", "Reparatur",
    "Designer", "SQL", "service", "berater", "Schicht", "Straße", "Größe", "…", "!!", "", "  ",
    "ab sofort", "Wartung", "Dashboard", "ремонт", "доставка", "Key Account", "lead", "leader",
];

fn random_text(rng: &mut StdRng) -> String {
    let words = rng.gen_range(0..12);
    (0..words)
        .map(|_| VOCABULARY[rng.gen_range(0..VOCABULARY.len())])
        .collect::<Vec<_>>()
        .join(" ")
}

#[test]
fn boilerplate_does_not_change_the_role() -> Result<()> {
    let classifier = RoleClassifier::reference()?;
    for (noisy, plain) in [
        ("Verkäufer m/w/d Vollzeit", "Verkäufer"),
        ("Kurier (m/w/d) ab sofort gesucht", "Kurier"),
        ("Junior Servicetechniker Teilzeit", "Servicetechniker"),
    ] {
        assert_eq!(
            classifier.classify(noisy, None),
            classifier.classify(plain, None),
            "{noisy}"
        );
    }
    assert_eq!(
        classifier.classify("Verkäufer m/w/d Vollzeit", None),
        RoleLabel::Role("SALES".into())
    );
    Ok(())
}

#[test]
fn random_texts_are_classified_deterministically() -> Result<()> {
    let classifier = RoleClassifier::reference()?;
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..500 {
        let title = random_text(&mut rng);
        let summary = random_text(&mut rng);
        let first = classifier.classify_with(&title, Some(&summary), Detail::Debug);
        let second = classifier.classify_with(&title, Some(&summary), Detail::Debug);
        assert_eq!(first, second, "{title} / {summary}");

        let debug = first.debug.expect("debug payload");
        assert_eq!(debug.best_role, first.label);
        assert!(debug.best_score >= debug.second_score);
        if let RoleLabel::Role(role) = &first.label {
            assert!(debug.best_score - debug.second_score >= 2, "{title}");
            assert_eq!(debug.scores[role], debug.best_score);
        }
    }
    Ok(())
}

#[test]
fn classifier_is_shareable_across_threads() -> Result<()> {
    let classifier = RoleClassifier::reference()?;
    let titles = ["Kurier", "Kundenservice Hotline", "Data Analyst SQL", "Nebenjob"];
    let expected: Vec<RoleLabel> = titles.iter().map(|t| classifier.classify(t, None)).collect();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| titles.map(|t| classifier.classify(t, None))))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().expect("worker panicked").to_vec(), expected);
        }
    });
    Ok(())
}

#[test]
fn dictionary_file_replaces_reference_phrases() -> Result<()> {
    let harness = IntegrationHarness::new();
    let path = harness.write(
        "roles.yaml",
        r#"
roles:
  - id: GARDEN
    strong: [gärtner, landschaftsbau]
    weak: [rasen, hecke, pflanzen]
  - id: KITCHEN
    strong: [koch, küchenhilfe]
    weak: [spülen, küche]
neutral_weak: [pflanzen]
stopwords: [aushilfe]
confusable_pairs:
  - [GARDEN, KITCHEN]
"#,
    );
    let settings = RoleClassifierSettings {
        rules: ScoringRules::default(),
        dictionary: Some(path),
    };
    let classifier = role_classifier_from_settings(&settings)?;

    let ids: Vec<&str> = classifier.role_ids().collect();
    assert_eq!(ids, ["GARDEN", "KITCHEN"]);
    assert_eq!(
        classifier.classify("Aushilfe Gärtner", Some("Rasen und Hecke")),
        RoleLabel::Role("GARDEN".into())
    );
    assert_eq!(classifier.classify("Gärtner und Koch", None), RoleLabel::Unknown);
    assert_eq!(classifier.classify("Kurier", None), RoleLabel::Unknown);
    Ok(())
}

#[test]
fn invalid_dictionary_is_rejected_at_startup() {
    let harness = IntegrationHarness::new();
    let path = harness.write(
        "roles.yaml",
        "roles:\n  - id: EMPTY\n    strong: []\n    weak: []\n",
    );
    let settings = RoleClassifierSettings {
        rules: ScoringRules::default(),
        dictionary: Some(path),
    };
    let err = role_classifier_from_settings(&settings).unwrap_err();
    assert!(err.to_string().contains("EMPTY"), "{err}");
}

#[test]
fn stricter_rules_raise_the_bar() -> Result<()> {
    let rules = ScoringRules {
        min_strong_score: 6,
        min_score: 6,
        ..ScoringRules::default()
    };
    let settings = RoleClassifierSettings {
        rules,
        dictionary: None,
    };
    let strict = role_classifier_from_settings(&settings)?;
    assert_eq!(strict.classify("Kurier", None), RoleLabel::Unknown);
    assert_eq!(
        strict.classify("Kurier Zusteller", None),
        RoleLabel::Role("LOGISTICS".into())
    );
    Ok(())
}

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::model::RoleFamily;

/// Phrase lists of one role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RolePhrases {
    pub id: String,
    #[serde(default)]
    pub strong: Vec<String>,
    #[serde(default)]
    pub weak: Vec<String>,
}

/// Serializable phrase configuration of the role classifier.
///
/// Role order is significant: it is the tie-break order when two roles
/// reach the same score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleDictionary {
    pub roles: Vec<RolePhrases>,
    /// Weak phrases shared by many roles; they get a stricter per-role cap.
    #[serde(default)]
    pub neutral_weak: Vec<String>,
    #[serde(default)]
    pub stopwords: Vec<String>,
    /// Role pairs that force an unknown result when both score heavily.
    #[serde(default)]
    pub confusable_pairs: Vec<[String; 2]>,
}

impl RoleDictionary {
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read role dictionary {:?}", path))?;
        serde_yaml::from_str(&data)
            .with_context(|| format!("Failed to parse role dictionary {:?}", path))
    }

    /// Built-in dictionary for German/Russian job and activity titles.
    pub fn reference() -> Self {
        let roles = RoleFamily::ALL
            .into_iter()
            .map(|role| {
                let (strong, weak) = reference_phrases(role);
                RolePhrases {
                    id: role.as_str().to_string(),
                    strong: to_strings(strong),
                    weak: to_strings(weak),
                }
            })
            .collect();
        Self {
            roles,
            neutral_weak: to_strings(NEUTRAL_WEAK),
            stopwords: to_strings(STOPWORDS),
            confusable_pairs: CONFUSABLE_PAIRS
                .iter()
                .map(|(a, b)| [a.as_str().to_string(), b.as_str().to_string()])
                .collect(),
        }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

const STOPWORDS: &[&str] = &[
    "m w d",
    "mw d",
    "mwd",
    "vollzeit",
    "teilzeit",
    "minijob",
    "gesucht",
    "ab sofort",
    "sofort",
    "jetzt",
    "bewerben",
    "unbefristet",
    "befristet",
    "homeoffice",
    "hybrid",
    "quereinsteiger",
    "junior",
    "senior",
    "d",
    "w",
    "m",
];

const NEUTRAL_WEAK: &[&str] = &[
    "service", "berater", "kunden", "lager", "dokument", "office", "admin", "support",
];

const CONFUSABLE_PAIRS: &[(RoleFamily, RoleFamily)] = &[
    (RoleFamily::Sales, RoleFamily::Support),
    (RoleFamily::Ops, RoleFamily::Logistics),
    (RoleFamily::Ops, RoleFamily::Maintenance),
];

fn reference_phrases(role: RoleFamily) -> (&'static [&'static str], &'static [&'static str]) {
    match role {
        RoleFamily::Sales => (
            &[
                "vertrieb",
                "akquise",
                "closing",
                "key account",
                "account manager",
                "verkaeufer",
                "verkauf",
                "sales manager",
                "sales representative",
            ],
            &[
                "crm",
                "angebot",
                "lead",
                "abschluss",
                "berater",
                "aussendienst",
                "innendienst",
                "kundenberater",
            ],
        ),
        RoleFamily::Support => (
            &[
                "kundenservice",
                "callcenter",
                "hotline",
                "helpdesk",
                "service desk",
                "1st level",
                "2nd level",
                "customer service",
                "support agent",
            ],
            &[
                "ticket",
                "ticketsystem",
                "chat support",
                "kundenbetreuung",
                "reklamation",
                "anfragen",
                "telefonservice",
                "поддержк",
                "клиент",
                "колл",
                "звонк",
            ],
        ),
        RoleFamily::Admin => (
            &[
                "backoffice",
                "rezeption",
                "empfang",
                "sekretariat",
                "assistenz",
                "sachbearbeiter",
                "buerokaufmann",
                "office manager",
            ],
            &[
                "administration",
                "buero",
                "dokument",
                "ablage",
                "datenerfassung",
                "stammdaten",
                "poststelle",
                "auftragsbearbeitung",
                "документ",
                "офис",
                "админ",
                "секрет",
            ],
        ),
        RoleFamily::Logistics => (
            &[
                "logistik",
                "zusteller",
                "lieferfahrer",
                "kurier",
                "spedition",
                "transport",
                "fahrer",
                "dispatch",
                "disponent",
            ],
            &[
                "route",
                "tour",
                "lieferung",
                "fuhrpark",
                "paket",
                "sendung",
                "verladung",
                "entladung",
                "доставк",
                "курьер",
                "склад",
            ],
        ),
        RoleFamily::Ops => (
            &[
                "produktionsmitarbeiter",
                "maschinenbediener",
                "fertigung",
                "qualitaetskontrolle",
                "sortierer",
                "assembly line",
                "production",
            ],
            &[
                "packen",
                "packing",
                "picker",
                "picking",
                "packer",
                "scannen",
                "sortieren",
                "schicht",
                "kommissionierer",
                "kommissionierung",
            ],
        ),
        RoleFamily::Maintenance => (
            &[
                "servicetechniker",
                "instandhaltung",
                "wartung",
                "installation",
                "monteur",
                "stoerung",
                "kundendiensttechniker",
            ],
            &[
                "reparatur",
                "ersatzteile",
                "werkzeug",
                "serviceeinsatz",
                "elektriker",
                "mechatroniker",
                "hausmeister",
                "ремонт",
                "техник",
                "монтаж",
            ],
        ),
        RoleFamily::Content => (
            &[
                "content creator",
                "video editor",
                "grafikdesigner",
                "designer",
                "fotograf",
                "videograf",
                "ux designer",
            ],
            &[
                "video",
                "schnitt",
                "youtube",
                "blog",
                "copywriting",
                "texter",
                "social media",
                "branding",
                "контент",
                "видео",
                "дизайн",
            ],
        ),
        RoleFamily::Analytics => (
            &[
                "data analyst",
                "business analyst",
                "reporting",
                "dashboard",
                "etl",
                "sql",
                "automation",
                "bi",
            ],
            &[
                "analyse",
                "auswertung",
                "kpi",
                "optimierung",
                "statistik",
                "research",
                "forecast",
                "modell",
                "аналит",
                "данные",
                "отчет",
            ],
        ),
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier stored in `activity_profile.role_family` when no role is known.
pub const UNKNOWN_ROLE: &str = "UNKNOWN";

const UNKNOWN_LABEL: &str = "Не задано";

/// Closed set of reference role families, in tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoleFamily {
    Ops,
    Admin,
    Sales,
    Support,
    Logistics,
    Maintenance,
    Content,
    Analytics,
}

impl RoleFamily {
    pub const ALL: [RoleFamily; 8] = [
        RoleFamily::Ops,
        RoleFamily::Admin,
        RoleFamily::Sales,
        RoleFamily::Support,
        RoleFamily::Logistics,
        RoleFamily::Maintenance,
        RoleFamily::Content,
        RoleFamily::Analytics,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoleFamily::Ops => "OPS",
            RoleFamily::Admin => "ADMIN",
            RoleFamily::Sales => "SALES",
            RoleFamily::Support => "SUPPORT",
            RoleFamily::Logistics => "LOGISTICS",
            RoleFamily::Maintenance => "MAINTENANCE",
            RoleFamily::Content => "CONTENT",
            RoleFamily::Analytics => "ANALYTICS",
        }
    }

    /// Display label used by the dataset UI.
    pub fn label(&self) -> &'static str {
        match self {
            RoleFamily::Ops => "Операционные процессы",
            RoleFamily::Admin => "Админка / офис / документы",
            RoleFamily::Sales => "Продажи / переговоры / сделки",
            RoleFamily::Support => "Поддержка / сервис / клиентский контакт",
            RoleFamily::Logistics => "Логистика / перемещения / доставка",
            RoleFamily::Maintenance => "Техобслуживание / ремонт / монтаж",
            RoleFamily::Content => "Контент / творчество / медиа",
            RoleFamily::Analytics => "Аналитика / исследование / настройка систем",
        }
    }
}

impl fmt::Display for RoleFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoleFamily {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        RoleFamily::ALL
            .into_iter()
            .find(|role| role.as_str() == value)
            .ok_or_else(|| anyhow::anyhow!("Unknown role family '{value}'"))
    }
}

/// Label for a stored role id; anything unrecognised renders as the unknown label.
pub fn role_family_label(role_family: &str) -> &'static str {
    role_family
        .parse::<RoleFamily>()
        .map(|role| role.label())
        .unwrap_or(UNKNOWN_LABEL)
}

/// True when a stored role id still needs classification.
pub fn is_unset_role(role_family: &str) -> bool {
    let trimmed = role_family.trim();
    trimmed.is_empty() || trimmed == UNKNOWN_ROLE
}

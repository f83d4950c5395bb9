/// Tag values a mechanism accepts.
///
/// Order matters: when filtering leaves a variant without any value, the
/// first entry is used as the fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MechanismCompat {
    pub mechanism_id: &'static str,
    pub to_whom: &'static [&'static str],
    pub measure: &'static [&'static str],
}

impl MechanismCompat {
    pub fn allows_to_whom(&self, value: &str) -> bool {
        self.to_whom.contains(&value)
    }

    pub fn allows_measure(&self, value: &str) -> bool {
        self.measure.contains(&value)
    }
}

const fn compat(
    mechanism_id: &'static str,
    to_whom: &'static [&'static str],
    measure: &'static [&'static str],
) -> MechanismCompat {
    MechanismCompat {
        mechanism_id,
        to_whom,
        measure,
    }
}

/// Compatibility table of the fourteen money mechanisms.
pub const MECHANISMS: [MechanismCompat; 14] = [
    compat("salary", &["single_client", "platform"], &["rate", "price"]),
    compat(
        "fee_for_result",
        &["single_client", "many_people", "platform"],
        &["price"],
    ),
    compat("commission", &["market", "platform", "many_people"], &["percent"]),
    compat(
        "entrepreneurship_margin",
        &["many_people", "market", "platform"],
        &["price", "rent"],
    ),
    compat("rent_access", &["single_client", "many_people"], &["rent"]),
    compat("interest_dividends", &["market"], &["percent", "payout"]),
    compat("appreciation", &["market"], &["appreciation"]),
    compat(
        "intellectual_property",
        &["many_people", "platform"],
        &["price", "rent", "appreciation"],
    ),
    compat(
        "attention_audience",
        &["platform", "many_people"],
        &["payout", "price", "percent"],
    ),
    compat(
        "data_compute",
        &["platform", "many_people", "single_client"],
        &["rent", "price"],
    ),
    compat("grants_prizes", &["state", "platform"], &["payout"]),
    compat("transfers_insurance", &["state"], &["payout"]),
    compat("gifts_inheritance", &["many_people"], &["payout"]),
    compat("savings_effect", &["market", "state"], &["price", "payout"]),
];

pub fn lookup(mechanism_id: &str) -> Option<&'static MechanismCompat> {
    MECHANISMS
        .iter()
        .find(|entry| entry.mechanism_id == mechanism_id)
}

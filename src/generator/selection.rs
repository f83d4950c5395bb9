use super::archetype::{Archetype, Modifier, ModifierCategory};
use super::compat::MechanismCompat;
use super::stable_hash::StableHash;
use crate::config::GeneratorSettings;

/// Modifiers applied together to produce one variant.
pub type ModSet<'a> = Vec<&'a Modifier>;

fn sorted_by_id<'a>(modifiers: &[&'a Modifier], category: ModifierCategory) -> Vec<&'a Modifier> {
    let mut selected: Vec<&Modifier> = modifiers
        .iter()
        .copied()
        .filter(|m| m.category == category)
        .collect();
    selected.sort_by(|a, b| a.id.cmp(&b.id));
    selected
}

fn same_ids(a: &[&Modifier], b: &[&Modifier]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.id == y.id)
}

/// Picks the modifier sets for one archetype.
///
/// Every choice is driven by [`StableHash`] of the archetype id, so the
/// same tables always yield the same sets. An archetype with no usable
/// channel produces no sets.
pub fn select_mod_sets<'a>(
    archetype: &Archetype,
    modifiers: &'a [Modifier],
    compat: &MechanismCompat,
    settings: &GeneratorSettings,
) -> Vec<ModSet<'a>> {
    let applicable: Vec<&Modifier> = modifiers
        .iter()
        .filter(|m| m.applies_to(&archetype.mechanism_id))
        .collect();

    let mut channels = sorted_by_id(&applicable, ModifierCategory::Channel);
    channels.retain(|m| {
        m.changes
            .to_whom_add
            .iter()
            .any(|value| compat.allows_to_whom(value))
    });
    let packaging = sorted_by_id(&applicable, ModifierCategory::Packaging);
    let risk = sorted_by_id(&applicable, ModifierCategory::Risk);

    let base_to_whom = &archetype.base_classifiers.to_whom;
    let Some(primary) = channels
        .iter()
        .copied()
        .find(|m| m.changes.to_whom_add.iter().any(|v| base_to_whom.contains(v)))
        .or_else(|| channels.first().copied())
    else {
        return Vec::new();
    };

    let arch_hash = StableHash::of(&archetype.arch_id);
    let mut mod_sets: Vec<ModSet<'a>> = vec![vec![primary]];

    if channels.len() > 1 {
        let idx = arch_hash.index(channels.len() - 1);
        let candidates: Vec<&Modifier> = channels
            .iter()
            .copied()
            .filter(|m| !std::ptr::eq(*m, primary))
            .collect();
        mod_sets.push(vec![candidates[idx % candidates.len()]]);
    }

    if !packaging.is_empty() {
        let pkg_hash = StableHash::of(&format!("{}-pkg", archetype.arch_id));
        let first = pkg_hash.index(packaging.len());
        let second = pkg_hash.div(7).index(packaging.len());
        mod_sets.push(vec![primary, packaging[first]]);
        if second != first {
            mod_sets.push(vec![primary, packaging[second]]);
        }
    }

    if let Some(first_risk) = risk.first() {
        if arch_hash.is_even() {
            mod_sets.push(vec![primary, *first_risk]);
        }
    }

    let min_sets = settings.min_variants_per_archetype;
    if mod_sets.len() < min_sets {
        for pkg in &packaging {
            let candidate = vec![primary, *pkg];
            if !mod_sets.iter().any(|set| same_ids(set, &candidate)) {
                mod_sets.push(candidate);
            }
            if mod_sets.len() >= min_sets {
                break;
            }
        }
    }

    mod_sets.truncate(settings.max_mod_sets);
    mod_sets
}

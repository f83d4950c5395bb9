use indexmap::IndexMap;
use std::collections::BTreeMap;
use std::fmt;

use super::apply::CELL_PRIORITY;
use super::normalize_title;
use crate::config::CoverageThresholds;
use crate::model::{RoleFamily, Variant};

/// Bucket counts of a generated variant table and the thresholds they miss.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageReport {
    pub total: usize,
    pub by_mechanism: BTreeMap<String, usize>,
    /// Every reference role family, in declaration order.
    pub by_role_family: IndexMap<String, usize>,
    /// Every matrix cell, in priority order.
    pub by_matrix_cell: IndexMap<String, usize>,
    pub by_sell_tag: BTreeMap<String, usize>,
    pub by_to_whom_tag: BTreeMap<String, usize>,
    pub by_value_tag: BTreeMap<String, usize>,
    /// Normalised titles shared by more than one variant, most frequent first.
    pub suspicious_titles: Vec<(String, usize)>,
    pub thresholds: CoverageThresholds,
    pub violations: Vec<String>,
}

fn tally<'a>(values: impl Iterator<Item = &'a String>) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for value in values {
        *counts.entry(value.clone()).or_insert(0) += 1;
    }
    counts
}

impl CoverageReport {
    pub fn build(variants: &[Variant], thresholds: CoverageThresholds) -> Self {
        let by_mechanism = tally(variants.iter().map(|v| &v.primary_way_id));
        let roles = tally(variants.iter().map(|v| &v.activity_profile.role_family));
        let cells = tally(variants.iter().flat_map(|v| &v.matrix_cells));
        let by_role_family = RoleFamily::ALL
            .iter()
            .map(|role| {
                let id = role.as_str();
                (id.to_string(), roles.get(id).copied().unwrap_or(0))
            })
            .collect();
        let by_matrix_cell = CELL_PRIORITY
            .iter()
            .map(|cell| (cell.to_string(), cells.get(*cell).copied().unwrap_or(0)))
            .collect();

        let mut titles: IndexMap<String, usize> = IndexMap::new();
        for variant in variants {
            *titles.entry(normalize_title(&variant.title)).or_insert(0) += 1;
        }
        let mut suspicious_titles: Vec<(String, usize)> =
            titles.into_iter().filter(|(_, count)| *count > 1).collect();
        suspicious_titles.sort_by(|a, b| b.1.cmp(&a.1));
        suspicious_titles.truncate(thresholds.suspicious_titles_shown);

        let mut report = Self {
            total: variants.len(),
            by_mechanism,
            by_role_family,
            by_matrix_cell,
            by_sell_tag: tally(variants.iter().flat_map(|v| &v.sell_tags)),
            by_to_whom_tag: tally(variants.iter().flat_map(|v| &v.to_whom_tags)),
            by_value_tag: tally(variants.iter().flat_map(|v| &v.value_tags)),
            suspicious_titles,
            thresholds,
            violations: Vec::new(),
        };
        report.violations = report.collect_violations();
        report
    }

    fn collect_violations(&self) -> Vec<String> {
        let t = &self.thresholds;
        let mut violations = Vec::new();
        check(&mut violations, &self.by_mechanism, t.mechanism, "Mechanism");
        check(&mut violations, &self.by_role_family, t.role_family, "Role family");
        check(&mut violations, &self.by_matrix_cell, t.matrix_cell, "Matrix cell");
        check(&mut violations, &self.by_sell_tag, t.sell_tag, "Sell tag");
        check(&mut violations, &self.by_to_whom_tag, t.to_whom_tag, "To_whom tag");
        check(&mut violations, &self.by_value_tag, t.value_tag, "Value tag");
        if self.total < t.total {
            violations.push(format!("Total variants {} < {}", self.total, t.total));
        }
        violations
    }

    pub fn is_ok(&self) -> bool {
        self.violations.is_empty()
    }

    /// Process exit status of a generator run: 0 when every threshold holds, 1 otherwise.
    pub fn exit_status(&self) -> u8 {
        if self.is_ok() {
            0
        } else {
            1
        }
    }
}

fn check<'a>(
    violations: &mut Vec<String>,
    buckets: impl IntoIterator<Item = (&'a String, &'a usize)>,
    min: usize,
    label: &str,
) {
    for (key, count) in buckets {
        if *count < min {
            violations.push(format!("{label} {key} has only {count} variants"));
        }
    }
}

fn write_section<'a>(
    f: &mut fmt::Formatter<'_>,
    heading: &str,
    buckets: impl Iterator<Item = (&'a String, &'a usize)>,
    min: Option<usize>,
) -> fmt::Result {
    writeln!(f, "\n{heading}:")?;
    for (key, count) in buckets {
        match min {
            Some(min) if *count < min => writeln!(f, "  {key}: {count}  <{min}")?,
            _ => writeln!(f, "  {key}: {count}")?,
        }
    }
    Ok(())
}

impl fmt::Display for CoverageReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let t = &self.thresholds;
        writeln!(f, "Total variants: {}", self.total)?;
        write_section(f, "By mechanism", self.by_mechanism.iter(), Some(t.mechanism))?;
        write_section(f, "By role_family", self.by_role_family.iter(), None)?;
        write_section(f, "By matrix cell", self.by_matrix_cell.iter(), Some(t.matrix_cell))?;
        write_section(f, "By sell tag", self.by_sell_tag.iter(), Some(t.sell_tag))?;
        write_section(f, "By to_whom tag", self.by_to_whom_tag.iter(), Some(t.to_whom_tag))?;
        write_section(f, "By value tag", self.by_value_tag.iter(), Some(t.value_tag))?;

        writeln!(
            f,
            "\nTop-{} suspicious duplicate titles:",
            t.suspicious_titles_shown
        )?;
        if self.suspicious_titles.is_empty() {
            writeln!(f, "  (none)")?;
        }
        for (title, count) in &self.suspicious_titles {
            writeln!(f, "  {title}: {count}")?;
        }

        if !self.violations.is_empty() {
            writeln!(f, "\nCoverage errors:")?;
            for violation in &self.violations {
                writeln!(f, "- {violation}")?;
            }
        }
        Ok(())
    }
}

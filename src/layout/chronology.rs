use once_cell::sync::Lazy;
use regex::Regex;

use super::types::Node;
use crate::config::LayoutConfig;

static LEADING_YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*([0-9]{4})(?:[^0-9]|$)").unwrap());

/// Year at the start of a date string such as `1925-03-15` or `1925`.
pub fn birth_year(date: &str) -> Option<i32> {
    LEADING_YEAR_RE
        .captures(date)
        .and_then(|caps| caps.get(1))
        .and_then(|year| year.as_str().parse().ok())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChronologyReport {
    pub min_year: i32,
    pub overridden: usize,
}

/// Replaces `y` with `(year - min_year) * pixels_per_year` for every node
/// whose date of birth starts with a year. Nodes without one keep their
/// hierarchical `y`; `x` is never touched.
pub fn apply_chronology(nodes: &mut [Node], config: &LayoutConfig) -> ChronologyReport {
    let years: Vec<Option<i32>> = nodes
        .iter()
        .map(|node| {
            let year = node.data.dob.as_deref().and_then(birth_year);
            if year.is_none() {
                if let Some(dob) = node.data.dob.as_deref() {
                    tracing::debug!(node = %node.id, dob, "unparsable birth date, keeping rank position");
                }
            }
            year
        })
        .collect();
    let min_year = years
        .iter()
        .flatten()
        .copied()
        .min()
        .unwrap_or(config.default_reference_year);

    let mut overridden = 0;
    for (node, year) in nodes.iter_mut().zip(&years) {
        if let Some(year) = year {
            node.position.y = f64::from(year - min_year) * config.pixels_per_year;
            overridden += 1;
        }
    }
    ChronologyReport {
        min_year,
        overridden,
    }
}

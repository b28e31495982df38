use std::collections::BTreeMap;

use super::types::Node;
use crate::config::LayoutConfig;

/// Slack for float rounding when comparing a gap against its minimum.
const GAP_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionReport {
    pub iterations: usize,
    /// Colliding pairs left when the resolver stopped (cross-band pairs only
    /// resolve by accident).
    pub residual: usize,
}

/// Band key: `y` rounded to the nearest multiple of the band height.
pub fn band_key(y: f64, band_height: f64) -> i64 {
    let band_height = if band_height > 0.0 { band_height } else { 1.0 };
    (y / band_height).round() as i64
}

pub fn collides(a: &Node, b: &Node, config: &LayoutConfig) -> bool {
    let dx = (a.position.x - b.position.x).abs();
    let dy = (a.position.y - b.position.y).abs();
    dx < config.min_horizontal_gap() - GAP_EPSILON && dy < config.min_vertical_gap() - GAP_EPSILON
}

/// All colliding index pairs `(i, j)` with `i < j`.
pub fn find_collisions(nodes: &[Node], config: &LayoutConfig) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for i in 0..nodes.len() {
        for j in (i + 1)..nodes.len() {
            if collides(&nodes[i], &nodes[j], config) {
                pairs.push((i, j));
            }
        }
    }
    pairs
}

/// Best-effort overlap removal. Each iteration buckets nodes into bands,
/// sorts each band by `x` and pushes nodes right until neighbours are at
/// least `min_horizontal_gap` apart. Stops when no collision remains, when a
/// sweep moves nothing, or after `max_collision_iterations`. Only ever
/// increases `x`; `y` is never touched.
pub fn resolve_collisions(nodes: &mut [Node], config: &LayoutConfig) -> CollisionReport {
    let min_gap = config.min_horizontal_gap();
    let mut iterations = 0;
    while iterations < config.max_collision_iterations {
        if find_collisions(nodes, config).is_empty() {
            break;
        }
        iterations += 1;

        let mut bands: BTreeMap<i64, Vec<usize>> = BTreeMap::new();
        for (idx, node) in nodes.iter().enumerate() {
            bands
                .entry(band_key(node.position.y, config.band_height))
                .or_default()
                .push(idx);
        }

        let mut moved = false;
        for band in bands.values_mut() {
            if band.len() < 2 {
                continue;
            }
            band.sort_by(|a, b| {
                nodes[*a]
                    .position
                    .x
                    .total_cmp(&nodes[*b].position.x)
                    .then_with(|| a.cmp(b))
            });
            for pair in band.windows(2) {
                let left = nodes[pair[0]].position.x;
                let current = &mut nodes[pair[1]].position.x;
                if *current - left < min_gap - GAP_EPSILON {
                    *current = left + min_gap;
                    moved = true;
                }
            }
        }
        if !moved {
            break;
        }
    }

    let residual = find_collisions(nodes, config).len();
    tracing::debug!(iterations, residual, "collision resolution finished");
    CollisionReport {
        iterations,
        residual,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::ir::PersonRecord;
    use crate::layout::builder::build_graph;

    fn nodes_at(points: &[(f64, f64)]) -> Vec<Node> {
        let records: Vec<PersonRecord> = (0..points.len())
            .map(|idx| PersonRecord::new(idx.to_string(), "P"))
            .collect();
        let mut nodes = build_graph(&records, &Settings::default()).nodes;
        for (node, (x, y)) in nodes.iter_mut().zip(points) {
            node.position.x = *x;
            node.position.y = *y;
        }
        nodes
    }

    fn xs(nodes: &[Node]) -> Vec<f64> {
        nodes.iter().map(|n| n.position.x).collect()
    }

    #[test]
    fn band_rounds_to_nearest_multiple() {
        assert_eq!(band_key(0.0, 50.0), 0);
        assert_eq!(band_key(24.0, 50.0), 0);
        assert_eq!(band_key(25.0, 50.0), 1);
        assert_eq!(band_key(110.0, 50.0), 2);
        assert_eq!(band_key(10.0, 0.0), 10);
    }

    #[test]
    fn pushes_overlapping_row_to_the_right() {
        let mut nodes = nodes_at(&[(0.0, 0.0), (50.0, 10.0), (60.0, 0.0)]);
        let report = resolve_collisions(&mut nodes, &LayoutConfig::default());
        assert_eq!(xs(&nodes), vec![0.0, 200.0, 400.0]);
        assert_eq!(report.residual, 0);
        assert!(nodes.iter().all(|n| n.position.y <= 10.0));
    }

    #[test]
    fn never_moves_nodes_left_or_vertically() {
        let mut nodes = nodes_at(&[(300.0, 0.0), (310.0, 0.0), (0.0, 500.0)]);
        let before = nodes.clone();
        resolve_collisions(&mut nodes, &LayoutConfig::default());
        for (a, b) in before.iter().zip(&nodes) {
            assert!(b.position.x >= a.position.x);
            assert_eq!(a.position.y, b.position.y);
        }
        assert_eq!(xs(&nodes), vec![300.0, 500.0, 0.0]);
    }

    #[test]
    fn resolving_twice_changes_nothing() {
        let mut nodes = nodes_at(&[(0.0, 0.0), (10.0, 0.0), (20.0, 0.0), (5.0, 150.0), (7.0, 150.0)]);
        let config = LayoutConfig::default();
        resolve_collisions(&mut nodes, &config);
        let first = nodes.clone();
        let report = resolve_collisions(&mut nodes, &config);
        assert_eq!(first, nodes);
        assert_eq!(report.iterations, 0);
    }

    #[test]
    fn cross_band_overlap_is_left_alone() {
        // 24 and 26 round into different bands but still collide vertically.
        let mut nodes = nodes_at(&[(0.0, 24.0), (10.0, 26.0)]);
        let report = resolve_collisions(&mut nodes, &LayoutConfig::default());
        assert_eq!(xs(&nodes), vec![0.0, 10.0]);
        assert_eq!(report.residual, 1);
        assert_eq!(report.iterations, 1);
    }

    #[test]
    fn zero_iteration_cap_returns_input_unchanged() {
        let mut nodes = nodes_at(&[(0.0, 0.0), (10.0, 0.0)]);
        let config = LayoutConfig {
            max_collision_iterations: 0,
            ..LayoutConfig::default()
        };
        let report = resolve_collisions(&mut nodes, &config);
        assert_eq!(xs(&nodes), vec![0.0, 10.0]);
        assert_eq!(report.residual, 1);
    }
}

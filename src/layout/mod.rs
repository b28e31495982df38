mod builder;
mod chronology;
mod collision;
mod error;
mod hierarchy;
mod ranking;
pub(crate) mod types;
pub use builder::{FamilyGraph, Link, build_graph, edge_id};
pub use chronology::{ChronologyReport, apply_chronology, birth_year};
pub use collision::{CollisionReport, band_key, collides, find_collisions, resolve_collisions};
pub use error::LayoutWarning;
pub use hierarchy::{HierarchyLayout, layout_hierarchy};
pub use types::*;

use crate::config::{Config, LayoutConfig};
use crate::ir::PersonRecord;

/// Runs the full pipeline: graph building, layered placement, chronological
/// override and collision resolution. Pure in its inputs; every call builds
/// a fresh layout.
pub fn compute_layout(records: &[PersonRecord], config: &Config) -> Layout {
    let FamilyGraph {
        mut nodes,
        edges,
        links,
        mut warnings,
    } = build_graph(records, &config.settings);

    let keep = ranking::break_cycles(nodes.len(), &links);
    let mut kept_edges = Vec::with_capacity(edges.len());
    let mut kept_links = Vec::with_capacity(links.len());
    for ((edge, link), keep) in edges.into_iter().zip(links).zip(keep) {
        if keep {
            kept_edges.push(edge);
            kept_links.push(link);
        } else {
            let warning = LayoutWarning::CyclicAncestry {
                edge_id: edge.id,
                parent: edge.source,
                child: edge.target,
            };
            tracing::warn!("{warning}");
            warnings.push(warning);
        }
    }

    let hierarchy = layout_hierarchy(nodes.len(), &kept_links, &config.layout);
    let (source_handle, target_handle) = HandleSide::for_direction(config.layout.direction);
    for (node, position) in nodes.iter_mut().zip(&hierarchy.positions) {
        node.position = *position;
        node.source_handle = source_handle;
        node.target_handle = target_handle;
    }

    let chronology = apply_chronology(&mut nodes, &config.layout);
    warnings.extend(reset_non_finite_positions(&mut nodes));
    let collisions = resolve_collisions(&mut nodes, &config.layout);
    tracing::debug!(
        nodes = nodes.len(),
        edges = kept_edges.len(),
        min_year = chronology.min_year,
        dated = chronology.overridden,
        collision_iterations = collisions.iterations,
        residual_collisions = collisions.residual,
        "family tree laid out"
    );

    let (width, height) = bounds(&nodes, &config.layout);
    let settings = &config.settings;
    Layout {
        direction: config.layout.direction,
        nodes,
        edges: kept_edges,
        warnings,
        display: CardDisplay {
            show_death_icons: settings.show_death_icons,
            show_birth_icons: settings.show_birth_icons,
            show_deceased_banner: settings.show_deceased_banner,
            font_size: settings.font_size,
        },
        width,
        height,
    }
}

fn reset_non_finite_positions(nodes: &mut [Node]) -> Vec<LayoutWarning> {
    let mut warnings = Vec::new();
    for node in nodes.iter_mut() {
        if node.position.is_finite() {
            continue;
        }
        node.position = Position::default();
        let warning = LayoutWarning::NonFinitePosition {
            node_id: node.id.clone(),
        };
        tracing::warn!("{warning}");
        warnings.push(warning);
    }
    warnings
}

fn bounds(nodes: &[Node], config: &LayoutConfig) -> (f64, f64) {
    if nodes.is_empty() {
        return (0.0, 0.0);
    }
    let mut min_x = f64::MAX;
    let mut min_y = f64::MAX;
    let mut max_x = f64::MIN;
    let mut max_y = f64::MIN;
    for node in nodes {
        min_x = min_x.min(node.position.x);
        min_y = min_y.min(node.position.y);
        max_x = max_x.max(node.position.x + config.node_width);
        max_y = max_y.max(node.position.y + config.node_height);
    }
    ((max_x - min_x).max(0.0), (max_y - min_y).max(0.0))
}

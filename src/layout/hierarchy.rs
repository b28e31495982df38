use super::builder::Link;
use super::ranking::{compute_ranks, count_crossings, group_by_rank, order_rank_nodes};
use super::types::Position;
use crate::config::LayoutConfig;
use crate::ir::Direction;

#[derive(Debug, Clone)]
pub struct HierarchyLayout {
    pub ranks: Vec<usize>,
    /// Node indices per rank, left to right after crossing reduction.
    pub order: Vec<Vec<usize>>,
    pub positions: Vec<Position>,
}

/// Layered placement: rank by longest path, order each rank by the median
/// heuristic, then place ranks `vertical_spacing` apart and slots
/// `horizontal_spacing` apart with every rank centred on the widest one.
/// `links` must be acyclic.
pub fn layout_hierarchy(node_count: usize, links: &[Link], config: &LayoutConfig) -> HierarchyLayout {
    let ranks = compute_ranks(node_count, links);
    let mut order = group_by_rank(&ranks);
    order_rank_nodes(&mut order, links, config.order_passes);
    tracing::debug!(
        ranks = order.len(),
        crossings = count_crossings(&order, &ranks, links),
        "ranked hierarchy"
    );

    let widest = order.iter().map(Vec::len).max().unwrap_or(0);
    let (slot_step, rank_step) = match config.direction {
        Direction::TopDown => (config.horizontal_spacing(), config.vertical_spacing()),
        Direction::LeftRight => (
            config.node_height + config.node_spacing,
            config.node_width + config.rank_spacing,
        ),
    };

    let mut positions = vec![Position::default(); node_count];
    for (rank, bucket) in order.iter().enumerate() {
        let offset = (widest - bucket.len()) as f64 * slot_step * 0.5;
        let main = rank as f64 * rank_step;
        for (slot, node) in bucket.iter().enumerate() {
            let cross = offset + slot as f64 * slot_step;
            positions[*node] = match config.direction {
                Direction::TopDown => Position::new(cross, main),
                Direction::LeftRight => Position::new(main, cross),
            };
        }
    }

    HierarchyLayout {
        ranks,
        order,
        positions,
    }
}

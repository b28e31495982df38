use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use super::builder::Link;

/// Walks links in input order and keeps each one unless the child can already
/// reach the parent through previously kept links (or the link is a
/// self-reference). Returns a keep-flag per link.
pub(super) fn break_cycles(node_count: usize, links: &[Link]) -> Vec<bool> {
    let mut adj: Vec<Vec<usize>> = vec![Vec::new(); node_count];
    let mut keep = Vec::with_capacity(links.len());
    for link in links {
        let closes_cycle = link.parent == link.child || reaches(&adj, link.child, link.parent);
        if !closes_cycle {
            adj[link.parent].push(link.child);
        }
        keep.push(!closes_cycle);
    }
    keep
}

fn reaches(adj: &[Vec<usize>], from: usize, to: usize) -> bool {
    let mut visited = vec![false; adj.len()];
    let mut stack = vec![from];
    while let Some(node) = stack.pop() {
        if node == to {
            return true;
        }
        if std::mem::replace(&mut visited[node], true) {
            continue;
        }
        stack.extend(adj[node].iter().copied().filter(|next| !visited[*next]));
    }
    false
}

/// Longest-path rank from any root. `links` must be acyclic.
pub(super) fn compute_ranks(node_count: usize, links: &[Link]) -> Vec<usize> {
    let mut adj: Vec<Vec<usize>> = vec![Vec::new(); node_count];
    let mut indeg = vec![0usize; node_count];
    for link in links {
        adj[link.parent].push(link.child);
        indeg[link.child] += 1;
    }

    let mut ready: BinaryHeap<Reverse<usize>> = (0..node_count)
        .filter(|idx| indeg[*idx] == 0)
        .map(Reverse)
        .collect();
    let mut ranks = vec![0usize; node_count];
    while let Some(Reverse(node)) = ready.pop() {
        let rank = ranks[node];
        for &next in &adj[node] {
            ranks[next] = ranks[next].max(rank + 1);
            indeg[next] -= 1;
            if indeg[next] == 0 {
                ready.push(Reverse(next));
            }
        }
    }
    ranks
}

/// Buckets node indices by rank, each bucket in input order.
pub(super) fn group_by_rank(ranks: &[usize]) -> Vec<Vec<usize>> {
    let depth = ranks.iter().copied().max().map_or(0, |max| max + 1);
    let mut buckets = vec![Vec::new(); depth];
    for (idx, rank) in ranks.iter().enumerate() {
        buckets[*rank].push(idx);
    }
    buckets
}

/// Median-heuristic crossing reduction: alternating down sweeps (ordering by
/// parents) and up sweeps (ordering by children). Ties keep the current
/// order, then input order. The ordering with the fewest crossings seen
/// (the incoming one included) wins; on equal counts the earlier one is kept.
pub(super) fn order_rank_nodes(rank_nodes: &mut [Vec<usize>], links: &[Link], passes: usize) {
    if rank_nodes.len() <= 1 {
        return;
    }
    let ranks = rank_of(rank_nodes);
    let mut best = rank_nodes.to_vec();
    let mut best_crossings = count_crossings(rank_nodes, &ranks, links);
    let mut incoming: HashMap<usize, Vec<usize>> = HashMap::new();
    let mut outgoing: HashMap<usize, Vec<usize>> = HashMap::new();
    for link in links {
        outgoing.entry(link.parent).or_default().push(link.child);
        incoming.entry(link.child).or_default().push(link.parent);
    }

    let mut positions: HashMap<usize, usize> = HashMap::new();
    let update_positions = |rank_nodes: &mut [Vec<usize>], positions: &mut HashMap<usize, usize>| {
        positions.clear();
        for bucket in rank_nodes.iter() {
            for (idx, node) in bucket.iter().enumerate() {
                positions.insert(*node, idx);
            }
        }
    };
    update_positions(rank_nodes, &mut positions);

    let sort_bucket = |bucket: &mut Vec<usize>,
                       neighbors: &HashMap<usize, Vec<usize>>,
                       positions: &HashMap<usize, usize>| {
        let current: HashMap<usize, usize> = bucket
            .iter()
            .enumerate()
            .map(|(idx, node)| (*node, idx))
            .collect();
        bucket.sort_by(|a, b| {
            let a_score = median_position(*a, neighbors, positions, &current);
            let b_score = median_position(*b, neighbors, positions, &current);
            a_score
                .total_cmp(&b_score)
                .then_with(|| current[a].cmp(&current[b]))
                .then_with(|| a.cmp(b))
        });
    };

    for _ in 0..passes.max(1) {
        if best_crossings == 0 {
            break;
        }
        for rank in 1..rank_nodes.len() {
            if rank_nodes[rank].len() <= 1 {
                continue;
            }
            sort_bucket(&mut rank_nodes[rank], &incoming, &positions);
            update_positions(rank_nodes, &mut positions);
        }
        for rank in (0..rank_nodes.len() - 1).rev() {
            if rank_nodes[rank].len() <= 1 {
                continue;
            }
            sort_bucket(&mut rank_nodes[rank], &outgoing, &positions);
            update_positions(rank_nodes, &mut positions);
        }
        let crossings = count_crossings(rank_nodes, &ranks, links);
        if crossings < best_crossings {
            best.clone_from_slice(rank_nodes);
            best_crossings = crossings;
        }
    }
    rank_nodes.clone_from_slice(&best);
}

fn rank_of(rank_nodes: &[Vec<usize>]) -> Vec<usize> {
    let node_count = rank_nodes
        .iter()
        .flatten()
        .copied()
        .max()
        .map_or(0, |max| max + 1);
    let mut ranks = vec![0usize; node_count];
    for (rank, bucket) in rank_nodes.iter().enumerate() {
        for node in bucket {
            ranks[*node] = rank;
        }
    }
    ranks
}

/// Median slot of a node's neighbours; nodes without neighbours keep their
/// current slot.
pub(super) fn median_position(
    node: usize,
    neighbors: &HashMap<usize, Vec<usize>>,
    positions: &HashMap<usize, usize>,
    current_positions: &HashMap<usize, usize>,
) -> f64 {
    let fallback = current_positions.get(&node).copied().unwrap_or(0) as f64;
    let Some(list) = neighbors.get(&node) else {
        return fallback;
    };
    let mut values: Vec<f64> = list
        .iter()
        .filter_map(|neighbor| positions.get(neighbor).map(|pos| *pos as f64))
        .collect();
    if values.is_empty() {
        return fallback;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        values[mid]
    } else {
        (values[mid - 1] + values[mid]) * 0.5
    }
}

/// Number of pairwise crossings between links joining adjacent ranks.
pub(super) fn count_crossings(rank_nodes: &[Vec<usize>], ranks: &[usize], links: &[Link]) -> usize {
    let mut slot = vec![0usize; ranks.len()];
    for bucket in rank_nodes {
        for (idx, node) in bucket.iter().enumerate() {
            slot[*node] = idx;
        }
    }
    let mut by_layer: HashMap<usize, Vec<(usize, usize)>> = HashMap::new();
    for link in links {
        if ranks[link.child] == ranks[link.parent] + 1 {
            by_layer
                .entry(ranks[link.parent])
                .or_default()
                .push((slot[link.parent], slot[link.child]));
        }
    }
    let mut crossings = 0;
    for segments in by_layer.values() {
        for (i, a) in segments.iter().enumerate() {
            for b in &segments[i + 1..] {
                if (a.0 < b.0 && a.1 > b.1) || (a.0 > b.0 && a.1 < b.1) {
                    crossings += 1;
                }
            }
        }
    }
    crossings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(parent: usize, child: usize) -> Link {
        Link { parent, child }
    }

    #[test]
    fn two_cycle_drops_the_closing_link() {
        let keep = break_cycles(2, &[link(1, 0), link(0, 1)]);
        assert_eq!(keep, vec![true, false]);
    }

    #[test]
    fn self_parent_is_dropped() {
        let keep = break_cycles(1, &[link(0, 0)]);
        assert_eq!(keep, vec![false]);
    }

    #[test]
    fn long_cycle_drops_only_the_last_link() {
        let keep = break_cycles(3, &[link(0, 1), link(1, 2), link(2, 0), link(0, 2)]);
        assert_eq!(keep, vec![true, true, false, true]);
    }

    #[test]
    fn rank_is_longest_path_from_a_root() {
        // 0 -> 1 -> 2 and a shortcut 0 -> 2; 3 is isolated.
        let ranks = compute_ranks(4, &[link(0, 1), link(1, 2), link(0, 2)]);
        assert_eq!(ranks, vec![0, 1, 2, 0]);
    }

    #[test]
    fn child_is_below_every_parent() {
        // Grandparent 0 has child 2; 1 is a root married into rank 1.
        let links = [link(0, 2), link(2, 3), link(1, 3)];
        let ranks = compute_ranks(4, &links);
        for l in &links {
            assert!(ranks[l.child] > ranks[l.parent]);
        }
        assert_eq!(ranks[1], 0);
        assert_eq!(ranks[3], 2);
    }

    #[test]
    fn ordering_removes_simple_crossing() {
        // Parents 0, 1 in rank 0; children 2 (of 1) and 3 (of 0) in rank 1.
        let links = [link(1, 2), link(0, 3)];
        let ranks = compute_ranks(4, &links);
        let mut rank_nodes = group_by_rank(&ranks);
        assert_eq!(count_crossings(&rank_nodes, &ranks, &links), 1);
        order_rank_nodes(&mut rank_nodes, &links, 4);
        assert_eq!(count_crossings(&rank_nodes, &ranks, &links), 0);
    }

    #[test]
    fn ordering_never_adds_crossings() {
        let links = [
            link(0, 1),
            link(0, 3),
            link(0, 3),
            link(4, 5),
            link(1, 5),
            link(0, 6),
            link(1, 6),
            link(3, 7),
            link(1, 8),
            link(7, 8),
            link(8, 9),
            link(8, 10),
        ];
        let ranks = compute_ranks(11, &links);
        let mut rank_nodes = group_by_rank(&ranks);
        let initial = rank_nodes.clone();
        assert_eq!(count_crossings(&rank_nodes, &ranks, &links), 0);
        order_rank_nodes(&mut rank_nodes, &links, 4);
        assert_eq!(count_crossings(&rank_nodes, &ranks, &links), 0);
        assert_eq!(rank_nodes, initial);
    }

    #[test]
    fn best_ordering_is_no_worse_than_input() {
        // Two interleaved families across three ranks.
        let links = [
            link(0, 3),
            link(1, 2),
            link(2, 5),
            link(3, 4),
            link(0, 4),
            link(1, 5),
        ];
        let ranks = compute_ranks(6, &links);
        let mut rank_nodes = group_by_rank(&ranks);
        let before = count_crossings(&rank_nodes, &ranks, &links);
        order_rank_nodes(&mut rank_nodes, &links, 4);
        assert!(count_crossings(&rank_nodes, &ranks, &links) <= before);
    }

    #[test]
    fn median_of_even_neighbors_is_midpoint() {
        let neighbors = HashMap::from([(9, vec![0, 1])]);
        let positions = HashMap::from([(0, 1), (1, 4)]);
        let current = HashMap::from([(9, 0)]);
        assert_eq!(median_position(9, &neighbors, &positions, &current), 2.5);
    }
}

//! Layered layout for the genealogy graph.
//!
//! Classic three-phase pipeline: rank assignment by longest path from the
//! roots, crossing reduction with barycenter ordering sweeps, then centered
//! coordinate assignment. A final family-specific pass seats the founder
//! couple symmetrically on either side of the union node.
//!
//! The pass is total: any graph the deriver can produce, including ones with
//! cyclic parent references left behind by hand-edited data, gets finite
//! coordinates for every node.

use std::collections::{HashMap, VecDeque};

use shared::{FamilyGraph, FamilyRole, TreeNodeKind};

/// Node footprint in canvas units, matching what the tree page renders.
pub const NODE_WIDTH: f64 = 150.0;
pub const NODE_HEIGHT: f64 = 150.0;
/// Horizontal gap between adjacent nodes in a rank.
pub const NODE_SEP: f64 = 70.0;
/// Vertical gap between ranks.
pub const RANK_SEP: f64 = 120.0;
/// Margin above the first rank.
const TOP_MARGIN: f64 = 50.0;
/// Horizontal distance between the union node and each founder's center.
const FOUNDER_SPREAD: f64 = 160.0;
/// Ordering sweeps before settling for the best order seen so far.
const MAX_ORDERING_PASSES: usize = 4;

/// Assign center coordinates to every node of the graph, in place.
pub fn position_graph(graph: &mut FamilyGraph) {
    if graph.nodes.is_empty() {
        return;
    }

    let index: HashMap<String, usize> = graph
        .nodes
        .iter()
        .enumerate()
        .map(|(i, node)| (node.id.clone(), i))
        .collect();

    let node_count = graph.nodes.len();
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); node_count];
    let mut parents: Vec<Vec<usize>> = vec![Vec::new(); node_count];
    for edge in &graph.edges {
        if let (Some(&source), Some(&target)) = (index.get(&edge.source), index.get(&edge.target))
        {
            if source != target {
                children[source].push(target);
                parents[target].push(source);
            }
        }
    }

    let ranks = assign_ranks(node_count, &children, &parents);
    let mut buckets = rank_buckets(&ranks);
    minimize_crossings(&mut buckets, &parents, &children, &ranks);

    let widest = buckets
        .iter()
        .map(|bucket| rank_width(bucket.len()))
        .fold(0.0, f64::max);
    for (rank, bucket) in buckets.iter().enumerate() {
        let offset = (widest - rank_width(bucket.len())) / 2.0;
        let y = TOP_MARGIN + NODE_HEIGHT / 2.0 + rank as f64 * (NODE_HEIGHT + RANK_SEP);
        for (slot, &node) in bucket.iter().enumerate() {
            graph.nodes[node].x = offset + slot as f64 * (NODE_WIDTH + NODE_SEP) + NODE_WIDTH / 2.0;
            graph.nodes[node].y = y;
        }
    }

    apply_founder_symmetry(graph);
}

/// Longest-path ranks via Kahn's algorithm. Nodes trapped in a cycle never
/// reach the queue; they are parked one rank below everything that resolved.
fn assign_ranks(node_count: usize, children: &[Vec<usize>], parents: &[Vec<usize>]) -> Vec<usize> {
    let mut in_degree: Vec<usize> = parents.iter().map(|p| p.len()).collect();
    let mut ranks = vec![0usize; node_count];
    let mut visited = vec![false; node_count];
    let mut queue: VecDeque<usize> = (0..node_count).filter(|&v| in_degree[v] == 0).collect();

    let mut max_rank = 0;
    while let Some(node) = queue.pop_front() {
        visited[node] = true;
        max_rank = max_rank.max(ranks[node]);
        for &child in &children[node] {
            if ranks[node] + 1 > ranks[child] {
                ranks[child] = ranks[node] + 1;
            }
            in_degree[child] -= 1;
            if in_degree[child] == 0 {
                queue.push_back(child);
            }
        }
    }

    for node in 0..node_count {
        if !visited[node] {
            ranks[node] = max_rank + 1;
        }
    }
    ranks
}

fn rank_buckets(ranks: &[usize]) -> Vec<Vec<usize>> {
    let rank_count = ranks.iter().copied().max().map_or(0, |max| max + 1);
    let mut buckets = vec![Vec::new(); rank_count];
    for (node, &rank) in ranks.iter().enumerate() {
        buckets[rank].push(node);
    }
    buckets
}

/// Alternate downward and upward barycenter sweeps, keeping the best order
/// seen. Stops early once a sweep fails to reduce crossings.
fn minimize_crossings(
    buckets: &mut Vec<Vec<usize>>,
    parents: &[Vec<usize>],
    children: &[Vec<usize>],
    ranks: &[usize],
) {
    let mut best = buckets.clone();
    let mut best_crossings = count_crossings(buckets, children, ranks);

    for _ in 0..MAX_ORDERING_PASSES {
        if best_crossings == 0 {
            break;
        }

        for rank in 1..buckets.len() {
            let upper_pos: HashMap<usize, usize> = buckets[rank - 1]
                .iter()
                .enumerate()
                .map(|(pos, &node)| (node, pos))
                .collect();
            let mut bucket = std::mem::take(&mut buckets[rank]);
            sort_by_barycenter(&mut bucket, &upper_pos, parents);
            buckets[rank] = bucket;
        }
        for rank in (0..buckets.len().saturating_sub(1)).rev() {
            let lower_pos: HashMap<usize, usize> = buckets[rank + 1]
                .iter()
                .enumerate()
                .map(|(pos, &node)| (node, pos))
                .collect();
            let mut bucket = std::mem::take(&mut buckets[rank]);
            sort_by_barycenter(&mut bucket, &lower_pos, children);
            buckets[rank] = bucket;
        }

        let crossings = count_crossings(buckets, children, ranks);
        if crossings < best_crossings {
            best_crossings = crossings;
            best = buckets.clone();
        } else {
            break;
        }
    }

    *buckets = best;
}

/// Reorder one rank by the mean position of each node's neighbors in the
/// adjacent rank. Nodes without neighbors there keep their current slot.
fn sort_by_barycenter(
    bucket: &mut Vec<usize>,
    neighbor_pos: &HashMap<usize, usize>,
    neighbors_of: &[Vec<usize>],
) {
    let mut keyed: Vec<(f64, usize, usize)> = bucket
        .iter()
        .enumerate()
        .map(|(slot, &node)| {
            let positions: Vec<usize> = neighbors_of[node]
                .iter()
                .filter_map(|n| neighbor_pos.get(n).copied())
                .collect();
            let key = if positions.is_empty() {
                slot as f64
            } else {
                positions.iter().sum::<usize>() as f64 / positions.len() as f64
            };
            (key, slot, node)
        })
        .collect();

    keyed.sort_by(|a, b| {
        a.0.partial_cmp(&b.0)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.1.cmp(&b.1))
    });
    *bucket = keyed.into_iter().map(|(_, _, node)| node).collect();
}

/// Count pairwise edge crossings between each pair of adjacent ranks.
fn count_crossings(buckets: &[Vec<usize>], children: &[Vec<usize>], ranks: &[usize]) -> usize {
    let mut total = 0;
    for upper in 0..buckets.len().saturating_sub(1) {
        let lower = upper + 1;
        let lower_pos: HashMap<usize, usize> = buckets[lower]
            .iter()
            .enumerate()
            .map(|(pos, &node)| (node, pos))
            .collect();

        let mut segments: Vec<(usize, usize)> = Vec::new();
        for (upper_slot, &node) in buckets[upper].iter().enumerate() {
            for &child in &children[node] {
                if ranks[child] == lower {
                    if let Some(&child_slot) = lower_pos.get(&child) {
                        segments.push((upper_slot, child_slot));
                    }
                }
            }
        }

        for i in 0..segments.len() {
            for j in (i + 1)..segments.len() {
                let (a, b) = segments[i];
                let (c, d) = segments[j];
                if (a < c && b > d) || (a > c && b < d) {
                    total += 1;
                }
            }
        }
    }
    total
}

fn rank_width(len: usize) -> f64 {
    if len == 0 {
        return 0.0;
    }
    len as f64 * NODE_WIDTH + (len as f64 - 1.0) * NODE_SEP
}

/// Seat the founders on the first row, mirrored around the union node.
/// Runs only while the union exists; a lone founder keeps its computed slot.
fn apply_founder_symmetry(graph: &mut FamilyGraph) {
    let Some(union_index) = graph.nodes.iter().position(|n| n.is_union()) else {
        return;
    };

    let center_x = graph.nodes[union_index].x;
    let top_y = TOP_MARGIN + NODE_HEIGHT / 2.0;
    graph.nodes[union_index].y = top_y;

    for node in &mut graph.nodes {
        let role = match &node.kind {
            TreeNodeKind::Member(member) => member.role,
            TreeNodeKind::Union => continue,
        };
        match role {
            FamilyRole::Patriarch => {
                node.x = center_x - FOUNDER_SPREAD;
                node.y = top_y;
            }
            FamilyRole::Matriarch => {
                node.x = center_x + FOUNDER_SPREAD;
                node.y = top_y;
            }
            FamilyRole::Descendant => {}
        }
    }
}

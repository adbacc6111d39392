//-------------------------------------------------------
// Minimum Spanning Tree (Kruskal's Algorithm)
//-------------------------------------------------------
use bevy::math::Vec3;

use super::union_find::DisjointSet;

#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub a: usize,
    pub b: usize,
    pub weight: f32,
}

/// Builds the complete graph over `positions`, one edge per unordered pair
/// `a < b`, weighted by Euclidean distance.
pub fn candidate_edges(positions: &[Vec3]) -> Vec<Edge> {
    let n = positions.len();
    let mut edges = Vec::with_capacity(n * n.saturating_sub(1) / 2);
    for (a, pos_a) in positions.iter().enumerate() {
        for (b, pos_b) in positions.iter().enumerate().skip(a + 1) {
            edges.push(Edge {
                a,
                b,
                weight: pos_a.distance(*pos_b),
            });
        }
    }
    edges
}

/// Selects spanning tree edges in the order Kruskal accepts them. The output
/// is never re-sorted: acceptance order is the reveal order.
pub fn kruskal_mst(edges: Vec<Edge>, num_nodes: usize) -> Vec<Edge> {
    let mut sorted_edges = edges;
    // Stable, so equal weights keep candidate order.
    sorted_edges.sort_by(|e1, e2| e1.weight.total_cmp(&e2.weight));

    let target = num_nodes.saturating_sub(1);
    let mut sets = DisjointSet::new(num_nodes);
    let mut mst = Vec::with_capacity(target);

    for edge in sorted_edges {
        if mst.len() == target {
            break;
        }
        if sets.union(edge.a, edge.b) {
            mst.push(edge);
        }
    }

    mst
}

pub fn build_mst(positions: &[Vec3]) -> Vec<Edge> {
    kruskal_mst(candidate_edges(positions), positions.len())
}

pub fn total_weight(edges: &[Edge]) -> f32 {
    edges.iter().map(|edge| edge.weight).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn random_positions(n: usize, seed: u64) -> Vec<Vec3> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..n)
            .map(|_| {
                Vec3::new(
                    rng.gen_range(-50.0..50.0),
                    rng.gen_range(-50.0..50.0),
                    rng.gen_range(-50.0..50.0),
                )
            })
            .collect()
    }

    /// Prim's algorithm over a dense distance matrix, used only as a reference.
    fn brute_force_mst_weight(positions: &[Vec3]) -> f32 {
        let n = positions.len();
        let dist: Vec<Vec<f32>> = positions
            .iter()
            .map(|p| positions.iter().map(|q| p.distance(*q)).collect())
            .collect();

        let mut in_tree = vec![false; n];
        let mut best = vec![f32::INFINITY; n];
        best[0] = 0.0;
        let mut total = 0.0;
        for _ in 0..n {
            let next = (0..n)
                .filter(|&v| !in_tree[v])
                .min_by(|&u, &v| best[u].total_cmp(&best[v]))
                .unwrap();
            in_tree[next] = true;
            total += best[next];
            for v in 0..n {
                if !in_tree[v] && dist[next][v] < best[v] {
                    best[v] = dist[next][v];
                }
            }
        }
        total
    }

    fn is_spanning_tree(edges: &[Edge], n: usize) -> bool {
        if edges.len() != n.saturating_sub(1) {
            return false;
        }
        let mut adjacency = vec![Vec::new(); n];
        for edge in edges {
            adjacency[edge.a].push(edge.b);
            adjacency[edge.b].push(edge.a);
        }
        let mut seen = vec![false; n];
        let mut stack = vec![0];
        while let Some(node) = stack.pop() {
            if std::mem::replace(&mut seen[node], true) {
                continue;
            }
            stack.extend(adjacency[node].iter().copied().filter(|&v| !seen[v]));
        }
        // n - 1 edges plus connectivity rules out cycles.
        seen.into_iter().all(|v| v)
    }

    #[test]
    fn test_candidate_edges_cover_every_pair_once() {
        let positions = random_positions(7, 1);
        let edges = candidate_edges(&positions);
        assert_eq!(edges.len(), 7 * 6 / 2);
        assert!(edges.iter().all(|e| e.a < e.b));
        let first = &edges[0];
        assert_eq!(first.weight, positions[0].distance(positions[1]));
    }

    #[test]
    fn test_collinear_points() {
        let positions = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(10.0, 0.0, 0.0),
        ];
        let mst = build_mst(&positions);
        let pairs: Vec<(usize, usize)> = mst.iter().map(|e| (e.a, e.b)).collect();
        assert_eq!(pairs, vec![(0, 1), (1, 2), (2, 3)]);
        assert_eq!(mst.iter().map(|e| e.weight).collect::<Vec<_>>(), vec![1.0, 1.0, 8.0]);
        assert_eq!(total_weight(&mst), 10.0);
    }

    #[test]
    fn test_edge_count_and_tree_shape() {
        for n in 1..40 {
            let positions = random_positions(n, n as u64);
            let mst = build_mst(&positions);
            assert_eq!(mst.len(), n - 1);
            assert!(is_spanning_tree(&mst, n), "not a spanning tree for n = {}", n);
        }
    }

    #[test]
    fn test_matches_brute_force_weight() {
        for n in 4..=8 {
            for seed in 0..10 {
                let positions = random_positions(n, seed * 31 + n as u64);
                let kruskal = total_weight(&build_mst(&positions));
                let prim = brute_force_mst_weight(&positions);
                assert!(
                    (kruskal - prim).abs() < 1e-3,
                    "n = {}, seed = {}: kruskal {} vs prim {}",
                    n,
                    seed,
                    kruskal,
                    prim
                );
            }
        }
    }

    #[test]
    fn test_acceptance_order_is_ascending() {
        let mst = build_mst(&random_positions(64, 7));
        assert!(mst.windows(2).all(|w| w[0].weight <= w[1].weight));
    }

    #[test]
    fn test_deterministic() {
        let positions = random_positions(32, 99);
        assert_eq!(build_mst(&positions), build_mst(&positions));
    }

    #[test]
    fn test_degenerate_inputs() {
        assert!(build_mst(&[]).is_empty());
        assert!(build_mst(&[Vec3::ONE]).is_empty());
    }

    #[test]
    fn test_disconnected_input_yields_forest() {
        let edges = vec![
            Edge {
                a: 0,
                b: 1,
                weight: 1.0,
            },
            Edge {
                a: 2,
                b: 3,
                weight: 2.0,
            },
        ];
        assert_eq!(kruskal_mst(edges, 4).len(), 2);
    }

    #[test]
    fn test_stops_after_spanning() {
        let edges = vec![
            Edge {
                a: 0,
                b: 1,
                weight: 1.0,
            },
            Edge {
                a: 1,
                b: 2,
                weight: 2.0,
            },
            Edge {
                a: 0,
                b: 2,
                weight: 3.0,
            },
        ];
        let mst = kruskal_mst(edges, 3);
        assert_eq!(mst.len(), 2);
        assert_eq!(total_weight(&mst), 3.0);
    }
}

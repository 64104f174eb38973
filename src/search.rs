//! This module implements a variant of
//! [pathfinding's dijkstra function](https://docs.rs/pathfinding/latest/pathfinding/directed/dijkstra/index.html)
//! which can either stop as soon as the goal is settled or drain the queue completely.
use indexmap::map::Entry::{Occupied, Vacant};
use num_traits::Zero;

use crate::FxIndexMap;
use log::warn;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::Hash;

struct SmallestCostHolder<K> {
    cost: K,
    index: usize,
}

impl<K: PartialEq> Eq for SmallestCostHolder<K> {}

impl<K: PartialEq> PartialEq for SmallestCostHolder<K> {
    fn eq(&self, other: &Self) -> bool {
        self.cost.eq(&other.cost)
    }
}

impl<K: PartialOrd> PartialOrd for SmallestCostHolder<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: PartialOrd> Ord for SmallestCostHolder<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so the max-heap pops the smallest cost first. Non-negative
        // weights never sum to NaN, so costs are always comparable.
        other
            .cost
            .partial_cmp(&self.cost)
            .unwrap_or(Ordering::Equal)
    }
}

/// Walks the parent indices back from `start` and returns the nodes in forward order.
fn reverse_path<N, V, F>(parents: &FxIndexMap<N, V>, mut parent: F, start: usize) -> Vec<N>
where
    N: Eq + Hash + Clone,
    F: FnMut(&V) -> usize,
{
    let mut i = start;
    let mut path: Vec<N> = std::iter::from_fn(|| {
        parents.get_index(i).map(|(node, value)| {
            i = parent(value);
            node.clone()
        })
    })
    .collect();
    path.reverse();
    path
}

/// Computes a shortest path from `start` to `goal` and its cost, or [None] if the goal
/// is never reached. `successors` yields the neighbours of a node with the cost of the
/// move, which must be non-negative.
///
/// Nodes are not decreased in place: an improved node is pushed again and the outdated
/// heap entry is skipped when it is popped. With `early_exit` the search stops once the
/// goal is popped, otherwise the whole reachable part of the graph is settled first.
pub fn dijkstra<N, C, FN, IN>(
    start: &N,
    goal: &N,
    mut successors: FN,
    early_exit: bool,
) -> Option<(Vec<N>, C)>
where
    N: Eq + Hash + Clone,
    C: Zero + PartialOrd + Copy,
    FN: FnMut(&N) -> IN,
    IN: IntoIterator<Item = (N, C)>,
{
    let mut to_see = BinaryHeap::new();
    to_see.push(SmallestCostHolder {
        cost: Zero::zero(),
        index: 0,
    });
    let mut parents: FxIndexMap<N, (usize, C)> = FxIndexMap::default();
    parents.insert(start.clone(), (usize::MAX, Zero::zero()));
    while let Some(SmallestCostHolder { cost, index }) = to_see.pop() {
        let successors = {
            let Some((node, &(_, c))) = parents.get_index(index) else {
                continue;
            };
            // Stale entry, the node was pushed again with a smaller cost.
            if cost > c {
                continue;
            }
            if early_exit && node == goal {
                break;
            }
            successors(node)
        };
        for (successor, move_cost) in successors {
            let new_cost = cost + move_cost;
            let n; // index for successor
            match parents.entry(successor) {
                Vacant(e) => {
                    n = e.index();
                    e.insert((index, new_cost));
                }
                Occupied(mut e) => {
                    if e.get().1 > new_cost {
                        n = e.index();
                        e.insert((index, new_cost));
                    } else {
                        continue;
                    }
                }
            }

            to_see.push(SmallestCostHolder {
                cost: new_cost,
                index: n,
            });
        }
    }
    match parents.get_full(goal) {
        Some((goal_index, _, &(_, cost))) => {
            Some((reverse_path(&parents, |&(p, _)| p, goal_index), cost))
        }
        None => {
            warn!("Goal could not be reached from the start");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_successors(node: &u32) -> Vec<(u32, f64)> {
        // 0 - 1 - 2 - 3, with a costly shortcut 0 - 3
        match node {
            0 => vec![(1, 1.0), (3, 10.0)],
            1 => vec![(0, 1.0), (2, 1.0)],
            2 => vec![(1, 1.0), (3, 1.0)],
            3 => vec![(2, 1.0), (0, 10.0)],
            _ => vec![],
        }
    }

    #[test]
    fn prefers_cheaper_detour() {
        for early_exit in [false, true] {
            let (path, cost) = dijkstra(&0, &3, line_successors, early_exit).unwrap();
            assert_eq!(path, vec![0, 1, 2, 3]);
            assert_eq!(cost, 3.0);
        }
    }

    #[test]
    fn start_is_goal() {
        let (path, cost) = dijkstra(&2, &2, line_successors, false).unwrap();
        assert_eq!(path, vec![2]);
        assert_eq!(cost, 0.0);
    }

    #[test]
    fn unreachable_goal() {
        assert!(dijkstra(&0, &7, line_successors, false).is_none());
        assert!(dijkstra(&7, &0, line_successors, true).is_none());
    }

    #[test]
    fn stale_entries_are_skipped() {
        // Node 2 is first pushed with cost 5 through node 0, then improved to 2 via node 1.
        let successors = |node: &u32| match node {
            0 => vec![(2, 5.0), (1, 1.0)],
            1 => vec![(2, 1.0)],
            2 => vec![(3, 1.0)],
            _ => vec![],
        };
        let (path, cost) = dijkstra(&0, &3, successors, false).unwrap();
        assert_eq!(path, vec![0, 1, 2, 3]);
        assert_eq!(cost, 3.0);
    }

    #[test]
    fn integer_costs() {
        let successors = |node: &char| match node {
            'a' => vec![('b', 2_u32), ('c', 7)],
            'b' => vec![('c', 3)],
            _ => vec![],
        };
        assert_eq!(
            dijkstra(&'a', &'c', successors, false),
            Some((vec!['a', 'b', 'c'], 5))
        );
    }
}

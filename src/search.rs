//! Search engine: uniform-cost, greedy best-first and A* over board states.
//!
//! All three strategies share one skeleton: a binary-heap frontier with
//! lazy deletion, an explored set of grid keys, and a predecessor map used
//! only for path reconstruction. They differ in how a successor's priority
//! is computed and in when a duplicate may replace earlier bookkeeping.
//!
//! Each call owns its frontier, explored set and predecessor map, runs
//! synchronously to completion, and discards them afterward; nothing is
//! shared between runs.

use crate::board::{BoardState, Grid};
use crate::heuristics::Heuristic;
use crate::moves::{Move, Successor};
use clap::ValueEnum;
use log::debug;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

/// Caller-selectable search strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Uniform-cost search: priority is the path length so far. Optimal
    /// under unit move costs.
    Ucs,
    /// Greedy best-first: priority is the heuristic value alone.
    Greedy,
    /// A*: priority is accumulated cost plus heuristic. Optimal when the
    /// heuristic is admissible.
    Astar,
}

/// One entry of a solution path. `mv` is `None` exactly for the initial
/// state; every later entry records the move that produced it from its
/// predecessor.
#[derive(Debug, Clone)]
pub struct PathStep {
    pub state: BoardState,
    pub mv: Option<Move>,
}

/// Outcome of one search run. An empty path is the defined "no solution"
/// result, not an error; `nodes_visited` counts every frontier pop,
/// including stale entries discarded by lazy deletion.
#[derive(Debug, Clone)]
pub struct Solution {
    pub path: Vec<PathStep>,
    pub nodes_visited: usize,
}

impl Solution {
    pub fn is_solvable(&self) -> bool {
        !self.path.is_empty()
    }

    /// Number of moves in the path (one less than the number of states).
    pub fn move_count(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Frontier entry. Ordered by priority ascending, then by insertion
/// sequence ascending, so equal-priority nodes pop in the order they were
/// pushed. Priorities are finite and non-negative, so `total_cmp` is a
/// plain numeric comparison here.
#[derive(Debug, Clone)]
struct SearchNode {
    state: BoardState,
    cost: u32,
    priority: f32,
    seq: u64,
}

impl PartialEq for SearchNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SearchNode {}

impl PartialOrd for SearchNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SearchNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap, the smallest priority must
        // pop first.
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Run one search over the reachable states of `initial`.
///
/// UCS ignores the heuristic. The returned path is empty when the frontier
/// is exhausted without reaching a solved state; otherwise `path[0]` is the
/// initial state and the last entry satisfies [`BoardState::is_solved`].
pub fn solve(initial: &BoardState, strategy: Strategy, heuristic: Heuristic) -> Solution {
    let mut frontier: BinaryHeap<SearchNode> = BinaryHeap::new();
    let mut explored: HashSet<Grid> = HashSet::new();
    let mut came_from: HashMap<Grid, (BoardState, Move)> = HashMap::new();
    // Best known accumulated cost per state key; A* only.
    let mut best_cost: HashMap<Grid, u32> = HashMap::new();
    let mut next_seq: u64 = 0;
    let mut nodes_visited: usize = 0;

    let initial_priority = match strategy {
        Strategy::Ucs => 0.0,
        Strategy::Greedy | Strategy::Astar => heuristic.evaluate(initial),
    };
    if strategy == Strategy::Astar {
        best_cost.insert(initial.grid().clone(), 0);
    }
    frontier.push(SearchNode {
        state: initial.clone(),
        cost: 0,
        priority: initial_priority,
        seq: next_seq,
    });
    next_seq += 1;

    while let Some(node) = frontier.pop() {
        nodes_visited += 1;

        if node.state.is_solved() {
            debug!(
                "{:?} reached goal at depth {} after {} pops",
                strategy, node.cost, nodes_visited
            );
            return Solution {
                path: reconstruct(&came_from, node.state),
                nodes_visited,
            };
        }

        // Lazy deletion: the node went stale while queued.
        if explored.contains(node.state.grid()) {
            continue;
        }
        explored.insert(node.state.grid().clone());

        let next_cost = node.cost + 1;
        for Successor { state, mv } in node.state.legal_moves() {
            match strategy {
                Strategy::Ucs => {
                    if !explored.contains(state.grid()) {
                        // First predecessor wins: expansion happens in cost
                        // order, so the first recording is along a shortest
                        // path.
                        came_from
                            .entry(state.grid().clone())
                            .or_insert_with(|| (node.state.clone(), mv));
                        frontier.push(SearchNode {
                            state,
                            cost: next_cost,
                            priority: next_cost as f32,
                            seq: next_seq,
                        });
                        next_seq += 1;
                    }
                }
                Strategy::Greedy => {
                    if !explored.contains(state.grid()) {
                        came_from
                            .entry(state.grid().clone())
                            .or_insert_with(|| (node.state.clone(), mv));
                        let priority = heuristic.evaluate(&state);
                        frontier.push(SearchNode {
                            state,
                            cost: next_cost,
                            priority,
                            seq: next_seq,
                        });
                        next_seq += 1;
                    }
                }
                Strategy::Astar => {
                    let improved = best_cost
                        .get(state.grid())
                        .map_or(true, |&best| next_cost < best);
                    if improved {
                        best_cost.insert(state.grid().clone(), next_cost);
                        came_from.insert(state.grid().clone(), (node.state.clone(), mv));
                        if !explored.contains(state.grid()) {
                            let priority = next_cost as f32 + heuristic.evaluate(&state);
                            frontier.push(SearchNode {
                                state,
                                cost: next_cost,
                                priority,
                                seq: next_seq,
                            });
                            next_seq += 1;
                        }
                    }
                }
            }
        }
    }

    debug!(
        "{:?} exhausted the frontier after {} pops, no solution",
        strategy, nodes_visited
    );
    Solution {
        path: Vec::new(),
        nodes_visited,
    }
}

/// Walk predecessor links back from the goal, then reverse so the path
/// starts at the initial state.
fn reconstruct(came_from: &HashMap<Grid, (BoardState, Move)>, goal: BoardState) -> Vec<PathStep> {
    let mut steps = Vec::new();
    let mut current = goal;
    loop {
        match came_from.get(current.grid()).cloned() {
            Some((prev, mv)) => {
                steps.push(PathStep {
                    state: current,
                    mv: Some(mv),
                });
                current = prev;
            }
            None => {
                steps.push(PathStep {
                    state: current,
                    mv: None,
                });
                break;
            }
        }
    }
    steps.reverse();
    steps
}

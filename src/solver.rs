use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

use itertools::Itertools;
use tracing::debug;

use crate::location::Position;
use crate::maze::{Maze, MazeCell};

/// Outcome of the resource-aware search. An infeasible maze is a value here,
/// never an error.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Solution {
    /// Whether any path reaches the end with surviving health.
    pub feasible: bool,
    /// The representative optimal path, start and end included. It is the
    /// first optimum found in enqueue order, which the fixed up, down, left,
    /// right neighbor order makes deterministic.
    pub path: Option<Vec<Position>>,
    /// Steps taken by the optimal paths.
    pub steps: usize,
    /// Health remaining at the end of the representative path.
    pub final_health: i32,
    /// Every feasible path achieving the optimal step count.
    pub all_optimal_paths: Vec<Vec<Position>>,
}

impl Solution {
    fn infeasible() -> Self {
        Self {
            feasible: false,
            path: None,
            steps: 0,
            final_health: 0,
            all_optimal_paths: Vec::new(),
        }
    }
}

/// Outcome of the resource-blind structural reachability check.
#[derive(Clone, Debug)]
pub struct Connectivity {
    /// Whether the end is reachable at all, ignoring health and pickups.
    pub feasible: bool,
    /// A shortest structural path when one exists, start and end included.
    pub path: Option<Vec<Position>>,
    /// Length of that path in steps.
    pub steps: usize,
    /// A human-readable account of the outcome.
    pub diagnostic: String,
}

// The minimal state on which future reachability depends. Two states agreeing
// on all three fields are interchangeable, whatever paths led to them.
#[derive(Clone, Eq, Hash, PartialEq)]
struct StateKey {
    position: Position,
    health: i32,
    collected: BTreeSet<Position>,
}

// A frontier node: a state plus the full path that reached it. The frontier
// owns each path exclusively; children take extended copies.
#[derive(Clone)]
struct PathState {
    position: Position,
    health: i32,
    collected: BTreeSet<Position>,
    path: Vec<Position>,
    steps: usize,
}

impl PathState {
    fn key(&self) -> StateKey {
        StateKey {
            position: self.position,
            health: self.health,
            collected: self.collected.clone(),
        }
    }
}

/// Breadth-first search over `(position, health, collected)` states of a
/// maze.
///
/// Health must stay strictly positive at every intermediate cell; stepping
/// onto the end is always allowed, but only counts as feasible when at least
/// 1 health survives it. Exploration is exhaustive, so among feasible paths
/// the minimum step count found is the true optimum.
pub struct Solver<'a> {
    maze: &'a Maze,
}

impl<'a> Solver<'a> {
    /// A solver borrowing `maze`.
    pub fn new(maze: &'a Maze) -> Self {
        Self { maze }
    }

    /// Resource-blind reachability from start to end.
    ///
    /// Answers on the maze's walkability graph, and reconstructs one shortest
    /// structural path by predecessor search when the answer is yes. The
    /// reconstruction expands grid neighbors in the same up, down, left,
    /// right order the resource-aware search uses, so tie-breaking agrees
    /// between the two.
    pub fn basic_connectivity(&self) -> Connectivity {
        let start = self.maze.position_to_vertex(self.maze.start());
        let end = self.maze.position_to_vertex(self.maze.end());

        let reached = self.maze.graph().bfs_from(start).unwrap();
        if !reached.contains(&end) {
            return Connectivity {
                feasible: false,
                path: None,
                steps: 0,
                diagnostic: "end is not reachable from start, even ignoring health".into(),
            };
        }

        let path = self.shortest_structural_path();
        let steps = path.len() - 1;
        Connectivity {
            feasible: true,
            path: Some(path),
            steps,
            diagnostic: format!("structural path of {steps} steps found, ignoring health and pickups"),
        }
    }

    // Predecessor BFS over grid neighbors; only called once reachability is
    // established.
    fn shortest_structural_path(&self) -> Vec<Position> {
        let start = self.maze.start();
        let end = self.maze.end();

        let mut parents: HashMap<Position, Position> = HashMap::new();
        let mut queue = VecDeque::from([start]);
        parents.insert(start, start);

        while let Some(current) = queue.pop_front() {
            if current == end {
                break;
            }
            for neighbor in self.maze.neighbors(current) {
                if !parents.contains_key(&neighbor) {
                    parents.insert(neighbor, current);
                    queue.push_back(neighbor);
                }
            }
        }

        let mut path = vec![end];
        let mut current = end;
        while current != start {
            current = parents[&current];
            path.push(current);
        }
        path.reverse();
        path
    }

    /// Minimum-step feasible path search over the full state space.
    ///
    /// A cheap structural reachability check runs first; when the end is not
    /// reachable at all, the exponential-in-pickups state search is skipped
    /// entirely. Repeated calls return identical step counts and final
    /// health.
    pub fn solve(&self) -> Solution {
        // the triple space is finite, so an unbounded search always drains
        self.solve_within(usize::MAX).unwrap()
    }

    /// [`solve`](Self::solve) under an explored-state budget.
    ///
    /// Returns `None` when the budget runs out before the frontier drains, in
    /// which case nothing can be claimed about feasibility either way.
    pub fn solve_within(&self, max_states: usize) -> Option<Solution> {
        if !self.basic_connectivity().feasible {
            debug!("end unreachable structurally, skipping the state search");
            return Some(Solution::infeasible());
        }

        let terminal = self.feasible_terminal_states(max_states)?;
        if terminal.is_empty() {
            return Some(Solution::infeasible());
        }

        // BFS dequeues in nondecreasing step order, so the first recorded
        // terminal state already carries the optimal step count
        let optimal_steps = terminal[0].steps;
        let optimal =
            terminal.iter().take_while(|state| state.steps == optimal_steps).collect_vec();

        Some(Solution {
            feasible: true,
            path: Some(optimal[0].path.clone()),
            steps: optimal_steps,
            final_health: optimal[0].health,
            all_optimal_paths: optimal.iter().map(|state| state.path.clone()).collect_vec(),
        })
    }

    fn feasible_terminal_states(&self, max_states: usize) -> Option<Vec<PathState>> {
        let start = self.maze.start();
        let end = self.maze.end();

        let mut feasible = Vec::new();
        let mut visited: HashSet<StateKey> = HashSet::new();
        let mut queue = VecDeque::new();

        let initial = PathState {
            position: start,
            health: self.maze.initial_health(),
            collected: BTreeSet::new(),
            path: vec![start],
            steps: 0,
        };
        visited.insert(initial.key());
        queue.push_back(initial);

        let mut expanded = 0usize;
        while let Some(current) = queue.pop_front() {
            if current.position == end {
                if current.health >= 1 {
                    feasible.push(current);
                }
                // goal states are terminal either way
                continue;
            }

            expanded += 1;
            if expanded > max_states {
                debug!(expanded, "state budget exhausted before the frontier drained");
                return None;
            }

            for neighbor in self.maze.neighbors(current.position) {
                let cell = self.maze.cell_at(neighbor).unwrap();

                let freshly_collected =
                    cell == MazeCell::Pickup && !current.collected.contains(&neighbor);
                let mut collected = current.collected.clone();
                if freshly_collected {
                    collected.insert(neighbor);
                }

                let cost = if neighbor == end || neighbor == start {
                    0
                } else if freshly_collected {
                    -5
                } else if let MazeCell::Cost(digit) = cell {
                    i32::from(digit)
                } else {
                    // free cell, or a pickup visited again: no second refund
                    0
                };

                let health = current.health - cost;
                if health <= 0 && neighbor != end {
                    continue;
                }

                let key = StateKey { position: neighbor, health, collected: collected.clone() };
                if !visited.insert(key) {
                    continue;
                }

                let mut path = current.path.clone();
                path.push(neighbor);
                queue.push_back(PathState {
                    position: neighbor,
                    health,
                    collected,
                    path,
                    steps: current.steps + 1,
                });
            }
        }

        debug!(expanded, feasible = feasible.len(), "state frontier exhausted");
        Some(feasible)
    }
}

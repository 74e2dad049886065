#![warn(missing_docs)]

//! # `minotaur`
//!
//! A small graph-algorithms library and a maze solver derived from it.
//!
//! The library half models directed/undirected, weighted/unweighted graphs in
//! adjacency-list form ([`Graph`]) with degree statistics, BFS/DFS traversal,
//! and connected-component extraction, plus a textual description format
//! ([`parse_description`]). The solver half ([`Maze`], [`Solver`]) treats a
//! rectangular grid as an implicit graph and runs a state-augmented
//! breadth-first search in which the state carries not just a position but a
//! health resource, drained by numbered cells and refunded once per pickup
//! cell.
//!
//! # Internals
//! Structural questions ("is the exit reachable at all?") are answered on an
//! explicit [`Graph`] built by joining every non-wall cell to its
//! 4-directional non-wall neighbors. The resource-aware search works on the
//! grid directly: its states are `(position, health, collected)` triples,
//! deduplicated on exactly that triple, which is the minimal key on which
//! future reachability depends. The collected set only ever grows along a
//! path, so the state space stays finite and the search exhausts it. Because
//! exploration is breadth first, the first goal state found is step-minimal;
//! ties among co-optimal paths are pinned by the fixed up/down/left/right
//! neighbor order.

pub use describe::{parse_description, parse_description_as};
pub use edge::{Edge, Vertex};
pub use error::{GraphError, MazeError};
pub use graph::Graph;
pub use location::{Direction, Position};
pub use maze::{ConnectivityReport, Maze, MazeCell};
pub use solver::{Connectivity, Solution, Solver};

pub(crate) mod describe;
pub(crate) mod edge;
pub(crate) mod error;
pub(crate) mod graph;
pub(crate) mod location;
pub(crate) mod maze;
pub(crate) mod solver;
mod tests;
pub(crate) mod traverse;

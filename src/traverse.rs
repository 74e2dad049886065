use std::collections::VecDeque;

use ndarray::Array2;

use crate::edge::Vertex;
use crate::error::GraphError;
use crate::graph::Graph;

impl Graph {
    /// Vertices reachable from `start` in level order, `start` included.
    ///
    /// Each vertex is enqueued at most once; the returned order is enqueue
    /// order. Fails with [`OutOfRange`](GraphError::OutOfRange) when `start`
    /// is not a vertex.
    pub fn bfs_from(&self, start: Vertex) -> Result<Vec<Vertex>, GraphError> {
        self.validate(start)?;

        let mut visited = vec![false; self.vertices];
        let mut queue = VecDeque::from([start]);
        let mut order = vec![start];
        visited[start] = true;

        while let Some(v) = queue.pop_front() {
            for edge in &self.adjacency[v] {
                let u = edge.neighbor_of(v)?;
                if !visited[u] {
                    visited[u] = true;
                    order.push(u);
                    queue.push_back(u);
                }
            }
        }

        Ok(order)
    }

    /// Vertices reachable from `start` in iterative depth-first order.
    ///
    /// Visits happen on pop, not on push, so a vertex may sit on the stack
    /// more than once before its first pop claims it; the re-check at pop
    /// keeps the order well defined. Push order is not traversal order.
    pub fn dfs_from(&self, start: Vertex) -> Result<Vec<Vertex>, GraphError> {
        self.validate(start)?;

        let mut visited = vec![false; self.vertices];
        let mut stack = vec![start];
        let mut order = Vec::new();

        while let Some(v) = stack.pop() {
            if visited[v] {
                continue;
            }
            visited[v] = true;
            order.push(v);
            for edge in &self.adjacency[v] {
                let u = edge.neighbor_of(v)?;
                if !visited[u] {
                    stack.push(u);
                }
            }
        }

        Ok(order)
    }

    /// Partition all vertices into components by repeated BFS from the
    /// lowest-numbered unvisited vertex.
    ///
    /// Components come out in discovery order, vertices within a component in
    /// traversal order. On a directed graph this partitions by plain
    /// reachability from the chosen roots, not strong connectivity; see
    /// [`Graph::connected_components`] for the latter.
    pub fn connected_components_bfs(&self) -> Vec<Vec<Vertex>> {
        self.components_by(Self::bfs_from)
    }

    /// [`Graph::connected_components_bfs`] with DFS as the inner traversal.
    pub fn connected_components_dfs(&self) -> Vec<Vec<Vertex>> {
        self.components_by(Self::dfs_from)
    }

    fn components_by(
        &self,
        traverse: fn(&Self, Vertex) -> Result<Vec<Vertex>, GraphError>,
    ) -> Vec<Vec<Vertex>> {
        let mut visited = vec![false; self.vertices];
        let mut components = Vec::new();
        for s in 0..self.vertices {
            if visited[s] {
                continue;
            }
            let component = traverse(self, s).unwrap();
            for &v in &component {
                visited[v] = true;
            }
            components.push(component);
        }
        components
    }

    /// Component partition via a transitive-closure reachability matrix
    /// (Warshall, O(V^3)).
    ///
    /// Two vertices share a component when mutually reachable on a directed
    /// graph (strong connectivity) or one-way reachable on an undirected one.
    /// The quadratic memory and cubic time buy what the cheaper traversal
    /// variants cannot express: strong connectivity on directed graphs. On
    /// undirected graphs it reproduces the BFS partition and serves as a
    /// cross-check.
    pub fn connected_components(&self) -> Vec<Vec<Vertex>> {
        let n = self.vertices;
        let mut reach = Array2::from_elem((n, n), false);

        for v in 0..n {
            reach[[v, v]] = true;
            for edge in &self.adjacency[v] {
                let u = edge.endpoints().1;
                reach[[v, u]] = true;
                if !self.directed {
                    reach[[u, v]] = true;
                }
            }
        }

        for k in 0..n {
            for i in 0..n {
                if !reach[[i, k]] {
                    // row i gains nothing through k
                    continue;
                }
                for j in 0..n {
                    if reach[[k, j]] {
                        reach[[i, j]] = true;
                    }
                }
            }
        }

        let mut visited = vec![false; n];
        let mut components = Vec::new();
        for v in 0..n {
            if visited[v] {
                continue;
            }
            let mut component = Vec::new();
            for u in 0..n {
                let together = if self.directed {
                    reach[[v, u]] && reach[[u, v]]
                } else {
                    reach[[v, u]]
                };
                if together && !visited[u] {
                    visited[u] = true;
                    component.push(u);
                }
            }
            components.push(component);
        }
        components
    }
}

use std::collections::HashSet;
use std::fmt::{Display, Formatter};

use itertools::Itertools;
use unordered_pair::UnorderedPair;

use crate::edge::{Edge, Vertex};
use crate::error::GraphError;

/// An adjacency-list graph over the fixed vertex set `0..V`.
///
/// Undirected graphs store every inserted edge twice, once under each
/// endpoint with the second record reversed, while counting the logical edge
/// once; [`Graph::edges`] undoes that duplication. Insertion performs no
/// duplicate suppression of its own. A caller that wants a simple graph
/// checks [`Graph::has_edge`] first.
pub struct Graph {
    pub(crate) directed: bool,
    pub(crate) weighted: bool,
    pub(crate) vertices: usize,
    pub(crate) adjacency: Vec<Vec<Edge>>,
    pub(crate) edges: usize,
}

impl Graph {
    /// An undirected, unweighted graph with `vertices` vertices and no edges.
    pub fn undirected(vertices: usize) -> Self {
        Self::with_flags(false, false, vertices)
    }

    /// An undirected graph whose edges carry costs.
    pub fn undirected_weighted(vertices: usize) -> Self {
        Self::with_flags(false, true, vertices)
    }

    /// A directed, unweighted graph with `vertices` vertices and no edges.
    pub fn directed(vertices: usize) -> Self {
        Self::with_flags(true, false, vertices)
    }

    /// A directed graph whose edges carry costs.
    pub fn directed_weighted(vertices: usize) -> Self {
        Self::with_flags(true, true, vertices)
    }

    /// Build the graph kind selected by the two orthogonal booleans.
    pub fn with_flags(directed: bool, weighted: bool, vertices: usize) -> Self {
        Self {
            directed,
            weighted,
            vertices,
            adjacency: vec![Vec::new(); vertices],
            edges: 0,
        }
    }

    pub(crate) fn validate(&self, vertex: Vertex) -> Result<(), GraphError> {
        if vertex >= self.vertices {
            return Err(GraphError::OutOfRange { vertex, vertices: self.vertices });
        }
        Ok(())
    }

    /// Insert `edge`, rejecting endpoints outside `[0, V)`.
    ///
    /// On an undirected graph the reverse record is synthesized into the
    /// second endpoint's list; the edge count still increments once.
    pub fn insert_edge(&mut self, edge: Edge) -> Result<(), GraphError> {
        let (u, v) = edge.endpoints();
        self.validate(u)?;
        self.validate(v)?;

        self.adjacency[u].push(edge);
        if !self.directed {
            self.adjacency[v].push(edge.reversed());
        }
        self.edges += 1;
        Ok(())
    }

    /// The stored records incident to `v`. Every record in the slice has `v`
    /// as its first endpoint.
    pub fn neighbors_of(&self, v: Vertex) -> Result<&[Edge], GraphError> {
        self.validate(v)?;
        Ok(self.adjacency[v].as_slice())
    }

    /// Number of vertices, fixed at construction.
    pub fn vertex_count(&self) -> usize {
        self.vertices
    }

    /// Number of logical edges.
    pub fn edge_count(&self) -> usize {
        self.edges
    }

    /// Whether a record leads from `u` to `v`, by linear scan of `u`'s list.
    pub fn has_edge(&self, u: Vertex, v: Vertex) -> Result<bool, GraphError> {
        self.validate(u)?;
        self.validate(v)?;
        Ok(self.adjacency[u].iter().any(|edge| edge.endpoints().1 == v))
    }

    /// Iterate every logical edge exactly once.
    ///
    /// Undirected storage holds two records per edge; the canonical one is
    /// the record whose stored pair leads with the lower endpoint, which is
    /// the first record met when scanning adjacency lists in vertex order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        let mut seen: HashSet<UnorderedPair<Vertex>> = HashSet::with_capacity(self.edges);
        self.adjacency
            .iter()
            .flatten()
            .filter(move |edge| self.directed || seen.insert(UnorderedPair::from(edge.endpoints())))
    }

    fn in_unchecked(&self, v: Vertex) -> usize {
        if self.directed {
            self.adjacency.iter().flatten().filter(|edge| edge.endpoints().1 == v).count()
        } else {
            self.adjacency[v].len()
        }
    }

    fn total_unchecked(&self, v: Vertex) -> usize {
        if self.directed {
            self.in_unchecked(v) + self.adjacency[v].len()
        } else {
            self.adjacency[v].len()
        }
    }

    /// Count of records arriving at `v`.
    ///
    /// On a directed graph this scans every adjacency list, an O(V+E)
    /// operation; it is not on any hot path. On an undirected graph the
    /// symmetric storage makes it the list length.
    pub fn degree_in(&self, v: Vertex) -> Result<usize, GraphError> {
        self.validate(v)?;
        Ok(self.in_unchecked(v))
    }

    /// Count of records leaving `v`, the adjacency-list length.
    pub fn degree_out(&self, v: Vertex) -> Result<usize, GraphError> {
        self.validate(v)?;
        Ok(self.adjacency[v].len())
    }

    /// Degree of `v`: in plus out on a directed graph, the plain incidence
    /// count on an undirected one (so totals summed over all vertices come to
    /// twice the edge count).
    pub fn degree_total(&self, v: Vertex) -> Result<usize, GraphError> {
        self.validate(v)?;
        Ok(self.total_unchecked(v))
    }

    /// Largest total degree over all vertices, 0 for an empty graph.
    pub fn degree_max(&self) -> usize {
        (0..self.vertices).map(|v| self.total_unchecked(v)).max().unwrap_or(0)
    }

    /// Smallest total degree over all vertices, 0 for an empty graph.
    pub fn degree_min(&self) -> usize {
        (0..self.vertices).map(|v| self.total_unchecked(v)).min().unwrap_or(0)
    }

    /// Mean total degree over all vertices, 0 for an empty graph.
    pub fn degree_mean(&self) -> f64 {
        if self.vertices == 0 {
            return 0.0;
        }
        let sum: usize = (0..self.vertices).map(|v| self.total_unchecked(v)).sum();
        sum as f64 / self.vertices as f64
    }

    /// Vertices with no incident records in either direction.
    pub fn isolated_count(&self) -> usize {
        (0..self.vertices)
            .filter(|&v| self.adjacency[v].is_empty() && self.in_unchecked(v) == 0)
            .count()
    }
}

impl Display for Graph {
    /// Emits the graph as a description [`parse_description`] accepts back:
    /// a `kind=` line, the vertex count, then canonical edge tokens.
    ///
    /// [`parse_description`]: crate::describe::parse_description
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let kind = match (self.directed, self.weighted) {
            (true, true) => "directed_weighted",
            (true, false) => "directed",
            (false, true) => "undirected_weighted",
            (false, false) => "undirected",
        };
        writeln!(f, "kind={kind}")?;
        writeln!(f, "{}", self.vertices)?;
        for chunk in &self.edges().chunks(10) {
            let line = chunk
                .map(|edge| {
                    let (u, v) = edge.endpoints();
                    match edge.weight() {
                        Some(weight) => format!("({u},{v},{weight})"),
                        None => format!("({u},{v})"),
                    }
                })
                .join(" ");
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

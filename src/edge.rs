use std::fmt::{Display, Formatter};

use crate::error::GraphError;

/// An integer vertex identifier in `[0, V)`. Identity is positional; there is
/// no separate vertex object.
pub type Vertex = usize;

/// A connection between two vertices, in the four flavors of
/// directed/undirected crossed with weighted/unweighted.
///
/// Directed variants keep their endpoints ordered; undirected variants treat
/// the stored order as incidental. Build one directly, or through
/// [`Edge::with_flags`] when directedness and weightedness are only known at
/// runtime.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Edge {
    /// Unordered pair `{u, v}`.
    Undirected {
        /// One endpoint.
        u: Vertex,
        /// The other endpoint.
        v: Vertex,
    },
    /// Unordered pair `{u, v}` with a traversal cost.
    UndirectedWeighted {
        /// One endpoint.
        u: Vertex,
        /// The other endpoint.
        v: Vertex,
        /// Cost of crossing the edge.
        weight: f64,
    },
    /// Ordered pair `(origin, destination)`.
    Directed {
        /// The tail of the arc.
        origin: Vertex,
        /// The head of the arc.
        destination: Vertex,
    },
    /// Ordered pair `(origin, destination)` with a traversal cost.
    DirectedWeighted {
        /// The tail of the arc.
        origin: Vertex,
        /// The head of the arc.
        destination: Vertex,
        /// Cost of crossing the edge.
        weight: f64,
    },
}

impl Edge {
    /// Build the variant selected by the two orthogonal booleans. `weight` is
    /// ignored by the unweighted variants.
    pub fn with_flags(directed: bool, weighted: bool, u: Vertex, v: Vertex, weight: f64) -> Self {
        match (directed, weighted) {
            (true, true) => Self::DirectedWeighted { origin: u, destination: v, weight },
            (true, false) => Self::Directed { origin: u, destination: v },
            (false, true) => Self::UndirectedWeighted { u, v, weight },
            (false, false) => Self::Undirected { u, v },
        }
    }

    /// The endpoint pair in stored order; for directed variants this is
    /// `(origin, destination)`.
    pub fn endpoints(&self) -> (Vertex, Vertex) {
        match *self {
            Self::Undirected { u, v } | Self::UndirectedWeighted { u, v, .. } => (u, v),
            Self::Directed { origin, destination }
            | Self::DirectedWeighted { origin, destination, .. } => (origin, destination),
        }
    }

    /// Whether this edge is one of the directed variants.
    pub fn is_directed(&self) -> bool {
        matches!(self, Self::Directed { .. } | Self::DirectedWeighted { .. })
    }

    /// The traversal cost, when this edge carries one.
    pub fn weight(&self) -> Option<f64> {
        match *self {
            Self::UndirectedWeighted { weight, .. } | Self::DirectedWeighted { weight, .. } => {
                Some(weight)
            }
            _ => None,
        }
    }

    /// The endpoint reached by crossing this edge from `x`.
    ///
    /// A directed edge resolves only from its origin; asking from the
    /// destination (or any other vertex) is an [`InvalidEndpoint`]
    /// error. An undirected edge resolves from either endpoint, returning the
    /// other.
    ///
    /// [`InvalidEndpoint`]: GraphError::InvalidEndpoint
    pub fn neighbor_of(&self, x: Vertex) -> Result<Vertex, GraphError> {
        let (u, v) = self.endpoints();
        if x == u {
            Ok(v)
        } else if x == v && !self.is_directed() {
            Ok(u)
        } else {
            Err(GraphError::InvalidEndpoint { queried: x, u, v })
        }
    }

    // The symmetric record stored under the second endpoint of an undirected
    // insertion.
    pub(crate) fn reversed(&self) -> Self {
        match *self {
            Self::Undirected { u, v } => Self::Undirected { u: v, v: u },
            Self::UndirectedWeighted { u, v, weight } => {
                Self::UndirectedWeighted { u: v, v: u, weight }
            }
            Self::Directed { origin, destination } => {
                Self::Directed { origin: destination, destination: origin }
            }
            Self::DirectedWeighted { origin, destination, weight } => {
                Self::DirectedWeighted { origin: destination, destination: origin, weight }
            }
        }
    }
}

impl Display for Edge {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match *self {
            Self::Undirected { u, v } => write!(f, "({u},{v})"),
            Self::UndirectedWeighted { u, v, weight } => write!(f, "({u},{v},{weight})"),
            Self::Directed { origin, destination } => write!(f, "({origin}->{destination})"),
            Self::DirectedWeighted { origin, destination, weight } => {
                write!(f, "({origin}->{destination},{weight})")
            }
        }
    }
}

//! Parsing of textual graph descriptions.
//!
//! A description is a `kind=` line naming one of `directed`, `undirected`,
//! `directed_weighted`, or `undirected_weighted`, followed by a vertex count
//! and edge tokens of the form `(u,v)` or `(u,v,w)`, separated by whitespace
//! or semicolons. `#` starts a comment running to the end of the line. File
//! handling stays with the caller; these functions only ever see text.

use itertools::Itertools;

use crate::edge::{Edge, Vertex};
use crate::error::GraphError;
use crate::graph::Graph;

fn strip_comment(line: &str) -> &str {
    line.split_once('#').map_or(line, |(head, _)| head).trim()
}

/// Parse a graph description, honoring the `kind=` line in the text.
///
/// Fails with [`MalformedDescription`](GraphError::MalformedDescription) when
/// the kind is missing or unknown, and as [`parse_description_as`] otherwise.
pub fn parse_description(text: &str) -> Result<Graph, GraphError> {
    let kind = text
        .lines()
        .map(strip_comment)
        .filter(|line| !line.is_empty())
        .find_map(|line| line.strip_prefix("kind="))
        .ok_or_else(|| GraphError::MalformedDescription("missing kind= line".into()))?;

    let (directed, weighted) = match kind.trim() {
        "directed" => (true, false),
        "undirected" => (false, false),
        "directed_weighted" => (true, true),
        "undirected_weighted" => (false, true),
        other => {
            return Err(GraphError::MalformedDescription(format!("unknown kind '{other}'")));
        }
    };

    parse_description_as(text, directed, weighted)
}

/// Parse a graph description with the kind fixed by the caller; any `kind=`
/// lines in the text are skipped.
///
/// The first token is the vertex count, every following token one edge. A
/// missing weight on a weighted graph defaults to 0. A description with no
/// tokens at all yields an empty graph, as a description of zero vertices
/// would. Edge endpoints outside `[0, V)` surface as
/// [`OutOfRange`](GraphError::OutOfRange) from the underlying insertion.
pub fn parse_description_as(
    text: &str,
    directed: bool,
    weighted: bool,
) -> Result<Graph, GraphError> {
    let tokens = text
        .lines()
        .map(strip_comment)
        .filter(|line| !line.is_empty() && !line.starts_with("kind="))
        .flat_map(|line| line.split([';', ' ', '\t']))
        .filter(|token| !token.is_empty())
        .collect_vec();

    let Some((&head, edge_tokens)) = tokens.split_first() else {
        return Ok(Graph::with_flags(directed, weighted, 0));
    };

    let vertices: usize = head
        .parse()
        .map_err(|_| GraphError::MalformedDescription(format!("bad vertex count '{head}'")))?;

    let mut graph = Graph::with_flags(directed, weighted, vertices);
    for &token in edge_tokens {
        let fields = token.trim_start_matches('(').trim_end_matches(')').split(',').collect_vec();
        let (u, v) = match fields.as_slice() {
            &[u, v] | &[u, v, _] => (parse_vertex(u, token)?, parse_vertex(v, token)?),
            _ => {
                return Err(GraphError::MalformedDescription(format!("bad edge token '{token}'")));
            }
        };
        let weight = fields.get(2).and_then(|raw| raw.trim().parse::<f64>().ok()).unwrap_or(0.0);
        graph.insert_edge(Edge::with_flags(directed, weighted, u, v, weight))?;
    }

    Ok(graph)
}

fn parse_vertex(raw: &str, token: &str) -> Result<Vertex, GraphError> {
    raw.trim().parse().map_err(|_| {
        GraphError::MalformedDescription(format!("bad vertex '{}' in token '{token}'", raw.trim()))
    })
}

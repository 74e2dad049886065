use std::fmt::{Display, Formatter};

use itertools::Itertools;
use ndarray::Array2;
use strum::VariantArray;
use tracing::debug;

use crate::edge::{Edge, Vertex};
use crate::error::MazeError;
use crate::graph::Graph;
use crate::location::{Direction, Position};

/// One cell tag on a maze grid.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum MazeCell {
    /// Impassable cell, `#`.
    Wall,
    /// The unique entry cell, `S`.
    Start,
    /// The unique exit cell, `E`.
    End,
    /// A cell refunding 5 health the first time it is stepped on, `T`.
    Pickup,
    /// A cell draining the given digit of health on every visit, `0`-`9`.
    Cost(u8),
    /// A free cell; any other character reads as this.
    #[default]
    Empty,
}

impl MazeCell {
    pub(crate) fn glyph(&self) -> char {
        match *self {
            Self::Wall => '#',
            Self::Start => 'S',
            Self::End => 'E',
            Self::Pickup => 'T',
            Self::Cost(digit) => (b'0' + digit) as char,
            Self::Empty => ' ',
        }
    }
}

impl From<char> for MazeCell {
    fn from(value: char) -> Self {
        match value {
            '#' => Self::Wall,
            'S' => Self::Start,
            'E' => Self::End,
            'T' => Self::Pickup,
            '0'..='9' => Self::Cost(value as u8 - b'0'),
            _ => Self::Empty,
        }
    }
}

impl Display for MazeCell {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

/// Structural connectivity report over a maze's walkability graph, ignoring
/// all cost and pickup semantics.
#[derive(Clone, Debug)]
pub struct ConnectivityReport {
    /// Walkable components, vertices mapped back to grid positions in
    /// traversal order. Wall cells, which are never wired into the graph, are
    /// left out; an isolated walkable cell still counts as a component.
    pub components: Vec<Vec<Position>>,
    /// Index into `components` of the component holding the start cell.
    pub start_component: usize,
    /// Index into `components` of the component holding the end cell.
    pub end_component: usize,
    /// Whether start and end share a component.
    pub is_connected: bool,
    /// Vertices in the underlying graph, walls included (`rows * cols`).
    pub vertex_count: usize,
    /// Logical undirected edge count of the walkability graph.
    pub edge_count: usize,
    /// Number of walkable components.
    pub component_count: usize,
}

/// An immutable maze: a rectangular grid of typed cells with a unique start
/// and a unique end, plus the health budget a run begins with.
///
/// Construction validates the grid invariants and wires up the structural
/// connectivity graph once; a maze never changes afterward. Grids smaller
/// than 10x10 and health budgets under 10 are rejected.
pub struct Maze {
    rows: usize,
    cols: usize,
    initial_health: i32,
    cells: Array2<MazeCell>,
    start: Position,
    end: Position,
    graph: Graph,
}

impl Maze {
    /// Validate `cells` and build the maze around it.
    pub fn new(initial_health: i32, cells: Array2<MazeCell>) -> Result<Self, MazeError> {
        let (rows, cols) = cells.dim();
        if rows < 10 || cols < 10 {
            return Err(MazeError::TooSmall { rows, cols });
        }
        if initial_health < 10 {
            return Err(MazeError::HealthTooLow(initial_health));
        }

        let start = Self::unique_cell(&cells, MazeCell::Start)?;
        let end = Self::unique_cell(&cells, MazeCell::End)?;
        let graph = Self::build_graph(&cells);
        debug!(
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            "walkability graph built"
        );

        Ok(Self { rows, cols, initial_health, cells, start, end, graph })
    }

    /// Parse a maze from its textual form.
    ///
    /// The first non-blank line is a header `N=<rows>, M=<cols>, P=<health>`;
    /// the next `N` lines are the grid. Short lines are space-padded and long
    /// lines truncated to `M` columns, so ragged input still produces a
    /// rectangular grid.
    pub fn parse(text: &str) -> Result<Self, MazeError> {
        let mut lines = text.lines().skip_while(|line| line.trim().is_empty());
        let header = lines
            .next()
            .ok_or_else(|| MazeError::MalformedHeader("empty input".into()))?;
        let (rows, cols, health) = parse_header(header)?;

        let grid_lines = lines.take(rows).collect_vec();
        if grid_lines.len() < rows {
            return Err(MazeError::MissingRows { declared: rows, found: grid_lines.len() });
        }

        let mut cells = Array2::from_elem((rows, cols), MazeCell::Empty);
        for (r, line) in grid_lines.iter().enumerate() {
            for (c, ch) in line.trim_end().chars().take(cols).enumerate() {
                cells[[r, c]] = MazeCell::from(ch);
            }
        }

        Self::new(health, cells)
    }

    fn unique_cell(cells: &Array2<MazeCell>, tag: MazeCell) -> Result<Position, MazeError> {
        let hits = cells
            .indexed_iter()
            .filter(|(_, cell)| **cell == tag)
            .map(|(index, _)| Position::from(index))
            .collect_vec();
        match hits.as_slice() {
            [only] => Ok(*only),
            _ => Err(MazeError::CellCount { tag: tag.glyph(), found: hits.len() }),
        }
    }

    // Every non-wall cell joins its 4-directional non-wall neighbors with an
    // undirected edge; the has_edge probe keeps the symmetric second pass
    // from inserting the pair again.
    fn build_graph(cells: &Array2<MazeCell>) -> Graph {
        let (rows, cols) = cells.dim();
        let mut graph = Graph::undirected(rows * cols);

        for (index, cell) in cells.indexed_iter() {
            if *cell == MazeCell::Wall {
                continue;
            }
            let position = Position::from(index);
            for direction in Direction::VARIANTS {
                let neighbor = direction.attempt_from(position);
                match cells.get(neighbor.as_index()) {
                    None | Some(MazeCell::Wall) => continue,
                    Some(_) => {}
                }
                let u = position.0 * cols + position.1;
                let v = neighbor.0 * cols + neighbor.1;
                // both endpoints bounds-checked above
                if !graph.has_edge(u, v).unwrap() {
                    graph.insert_edge(Edge::Undirected { u, v }).unwrap();
                }
            }
        }

        graph
    }

    /// Row count of the grid.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Column count of the grid.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The health budget a run begins with.
    pub fn initial_health(&self) -> i32 {
        self.initial_health
    }

    /// The unique start cell.
    pub fn start(&self) -> Position {
        self.start
    }

    /// The unique end cell.
    pub fn end(&self) -> Position {
        self.end
    }

    /// The structural walkability graph, vertex ids assigned row-major.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// The tag at `position`, or `None` outside the grid.
    pub fn cell_at(&self, position: Position) -> Option<MazeCell> {
        self.cells.get(position.as_index()).copied()
    }

    /// Whether `position` is a wall cell.
    pub fn is_wall(&self, position: Position) -> bool {
        self.cell_at(position) == Some(MazeCell::Wall)
    }

    /// Whether `position` is inside the grid and not a wall.
    pub fn is_valid_move(&self, position: Position) -> bool {
        matches!(self.cell_at(position), Some(cell) if cell != MazeCell::Wall)
    }

    /// The walkable 4-directional neighbors of `position`, in the fixed
    /// up, down, left, right order.
    pub fn neighbors(&self, position: Position) -> Vec<Position> {
        Direction::VARIANTS
            .iter()
            .map(|direction| direction.attempt_from(position))
            .filter(|candidate| self.is_valid_move(*candidate))
            .collect_vec()
    }

    /// The graph vertex id of `position` (`row * cols + col`).
    pub fn position_to_vertex(&self, position: Position) -> Vertex {
        position.0 * self.cols + position.1
    }

    /// The grid position of a graph vertex id.
    pub fn vertex_to_position(&self, vertex: Vertex) -> Position {
        Position(vertex / self.cols, vertex % self.cols)
    }

    /// Partition the walkable cells into connected components and report how
    /// start and end fall across them.
    pub fn connectivity_analysis(&self) -> ConnectivityReport {
        let components = self
            .graph
            .connected_components_bfs()
            .into_iter()
            .map(|component| {
                component.into_iter().map(|v| self.vertex_to_position(v)).collect_vec()
            })
            .filter(|component| !self.is_wall(component[0]))
            .collect_vec();

        // start and end are walkable, so each sits in some kept component
        let start_component =
            components.iter().position(|c| c.contains(&self.start)).unwrap();
        let end_component = components.iter().position(|c| c.contains(&self.end)).unwrap();

        ConnectivityReport {
            start_component,
            end_component,
            is_connected: start_component == end_component,
            vertex_count: self.graph.vertex_count(),
            edge_count: self.graph.edge_count(),
            component_count: components.len(),
            components,
        }
    }
}

impl Display for Maze {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for row in self.cells.rows() {
            for cell in row {
                write!(f, "{cell}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn parse_header(line: &str) -> Result<(usize, usize, i32), MazeError> {
    let mut rows = None;
    let mut cols = None;
    let mut health = None;

    for field in line.split(',') {
        let Some((key, value)) = field.split_once('=') else {
            return Err(MazeError::MalformedHeader(format!("bad parameter '{}'", field.trim())));
        };
        let value: i64 = value
            .trim()
            .parse()
            .map_err(|_| MazeError::MalformedHeader(format!("bad value '{}'", value.trim())))?;
        match key.trim() {
            "N" => rows = Some(value),
            "M" => cols = Some(value),
            "P" => health = Some(value),
            // unknown parameters pass through harmlessly
            _ => {}
        }
    }

    let require = |name: &str, field: Option<i64>| {
        field.ok_or_else(|| MazeError::MalformedHeader(format!("missing parameter {name}")))
    };
    let rows = require("N", rows)?;
    let cols = require("M", cols)?;
    let health = require("P", health)?;
    if rows < 0 || cols < 0 {
        return Err(MazeError::MalformedHeader(format!("negative dimension {rows}x{cols}")));
    }

    Ok((rows as usize, cols as usize, health as i32))
}

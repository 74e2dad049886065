#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use ndarray::Array2;

    use crate::describe::{parse_description, parse_description_as};
    use crate::edge::Edge;
    use crate::error::{GraphError, MazeError};
    use crate::graph::Graph;
    use crate::location::Position;
    use crate::maze::{Maze, MazeCell};
    use crate::solver::Solver;

    fn maze_from(rows: &[&str], health: i32) -> Maze {
        let cells = Array2::from_shape_fn((rows.len(), rows[0].len()), |(r, c)| {
            MazeCell::from(rows[r].as_bytes()[c] as char)
        });
        Maze::new(health, cells).unwrap()
    }

    fn normalize(components: Vec<Vec<usize>>) -> Vec<Vec<usize>> {
        let mut normalized = components
            .into_iter()
            .map(|mut component| {
                component.sort();
                component
            })
            .collect_vec();
        normalized.sort();
        normalized
    }

    const WALL: &str = "##########";

    #[test]
    fn edge_neighbor_semantics() {
        let arc = Edge::Directed { origin: 0, destination: 1 };
        assert_eq!(arc.neighbor_of(0), Ok(1));
        assert_eq!(
            arc.neighbor_of(1),
            Err(GraphError::InvalidEndpoint { queried: 1, u: 0, v: 1 })
        );

        let edge = Edge::Undirected { u: 0, v: 1 };
        assert_eq!(edge.neighbor_of(0), Ok(1));
        assert_eq!(edge.neighbor_of(1), Ok(0));
        assert!(edge.neighbor_of(7).is_err());
    }

    #[test]
    fn edge_factory_and_display() {
        assert_eq!(Edge::with_flags(true, true, 2, 3, 1.5).weight(), Some(1.5));
        assert_eq!(Edge::with_flags(false, false, 2, 3, 1.5).weight(), None);
        assert!(Edge::with_flags(true, false, 2, 3, 0.0).is_directed());
        assert!(!Edge::with_flags(false, true, 2, 3, 2.0).is_directed());
        assert_eq!(Edge::with_flags(false, true, 2, 3, 2.0).endpoints(), (2, 3));

        assert_eq!(Edge::Undirected { u: 0, v: 1 }.to_string(), "(0,1)");
        assert_eq!(Edge::Directed { origin: 0, destination: 1 }.to_string(), "(0->1)");
        assert_eq!(
            Edge::DirectedWeighted { origin: 0, destination: 1, weight: 2.5 }.to_string(),
            "(0->1,2.5)"
        );
    }

    #[test]
    fn insert_rejects_out_of_range() {
        let mut graph = Graph::undirected(3);
        assert_eq!(
            graph.insert_edge(Edge::Undirected { u: 0, v: 3 }),
            Err(GraphError::OutOfRange { vertex: 3, vertices: 3 })
        );
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(
            graph.bfs_from(5),
            Err(GraphError::OutOfRange { vertex: 5, vertices: 3 })
        );
    }

    #[test]
    fn undirected_storage_is_symmetric_but_counts_once() {
        let mut graph = Graph::undirected(4);
        graph.insert_edge(Edge::Undirected { u: 2, v: 1 }).unwrap();

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.neighbors_of(1).unwrap().len(), 1);
        assert_eq!(graph.neighbors_of(2).unwrap().len(), 1);
        assert!(graph.has_edge(1, 2).unwrap());
        assert!(graph.has_edge(2, 1).unwrap());
        assert!(!graph.has_edge(0, 1).unwrap());

        // the canonical record is the one leading with the lower endpoint
        let canonical = graph.edges().map(Edge::endpoints).collect_vec();
        assert_eq!(canonical, vec![(1, 2)]);
    }

    #[test]
    fn degree_family_undirected() {
        // path 0-1-2 plus isolated vertex 3
        let mut graph = Graph::undirected(4);
        graph.insert_edge(Edge::Undirected { u: 0, v: 1 }).unwrap();
        graph.insert_edge(Edge::Undirected { u: 1, v: 2 }).unwrap();

        assert_eq!(graph.edges().count(), graph.edge_count());
        assert_eq!(graph.degree_total(1), Ok(2));
        assert_eq!(graph.degree_total(0), Ok(1));
        assert_eq!(graph.degree_total(3), Ok(0));
        assert_eq!(graph.degree_in(1), Ok(2));
        assert_eq!(graph.degree_out(1), Ok(2));

        let total: usize = (0..4).map(|v| graph.degree_total(v).unwrap()).sum();
        assert_eq!(total, 2 * graph.edge_count());

        assert_eq!(graph.degree_max(), 2);
        assert_eq!(graph.degree_min(), 0);
        assert_eq!(graph.degree_mean(), 1.0);
        assert_eq!(graph.isolated_count(), 1);
    }

    #[test]
    fn degree_family_directed() {
        let mut graph = Graph::directed(3);
        graph.insert_edge(Edge::Directed { origin: 0, destination: 1 }).unwrap();
        graph.insert_edge(Edge::Directed { origin: 2, destination: 1 }).unwrap();

        assert_eq!(graph.degree_out(0), Ok(1));
        assert_eq!(graph.degree_out(1), Ok(0));
        assert_eq!(graph.degree_in(1), Ok(2));
        assert_eq!(graph.degree_total(1), Ok(2));
        assert_eq!(graph.edges().count(), 2);
        assert!(graph.has_edge(0, 1).unwrap());
        assert!(!graph.has_edge(1, 0).unwrap());
        assert_eq!(graph.isolated_count(), 0);
    }

    #[test]
    fn bfs_is_level_order() {
        let mut graph = Graph::undirected(4);
        graph.insert_edge(Edge::Undirected { u: 0, v: 1 }).unwrap();
        graph.insert_edge(Edge::Undirected { u: 0, v: 2 }).unwrap();
        graph.insert_edge(Edge::Undirected { u: 1, v: 3 }).unwrap();

        assert_eq!(graph.bfs_from(0), Ok(vec![0, 1, 2, 3]));
        assert_eq!(graph.bfs_from(3), Ok(vec![3, 1, 0, 2]));
    }

    #[test]
    fn dfs_visits_on_pop() {
        // diamond: 0 pushes 1 then 2, so 2 pops first and claims 3; the
        // second push of 1 is discarded at pop
        let mut graph = Graph::undirected(4);
        graph.insert_edge(Edge::Undirected { u: 0, v: 1 }).unwrap();
        graph.insert_edge(Edge::Undirected { u: 0, v: 2 }).unwrap();
        graph.insert_edge(Edge::Undirected { u: 1, v: 3 }).unwrap();
        graph.insert_edge(Edge::Undirected { u: 2, v: 3 }).unwrap();

        assert_eq!(graph.dfs_from(0), Ok(vec![0, 2, 3, 1]));
    }

    #[test]
    fn component_variants_agree_on_undirected_graphs() {
        let mut graph = Graph::undirected(7);
        graph.insert_edge(Edge::Undirected { u: 0, v: 1 }).unwrap();
        graph.insert_edge(Edge::Undirected { u: 1, v: 2 }).unwrap();
        graph.insert_edge(Edge::Undirected { u: 3, v: 4 }).unwrap();
        graph.insert_edge(Edge::Undirected { u: 5, v: 6 }).unwrap();

        let by_bfs = normalize(graph.connected_components_bfs());
        let by_dfs = normalize(graph.connected_components_dfs());
        let by_closure = normalize(graph.connected_components());

        assert_eq!(by_bfs, vec![vec![0, 1, 2], vec![3, 4], vec![5, 6]]);
        assert_eq!(by_bfs, by_dfs);
        assert_eq!(by_bfs, by_closure);
    }

    #[test]
    fn closure_components_capture_strong_connectivity() {
        // 0 -> 1 -> 2 -> 0 cycle with a dangling 2 -> 3
        let mut graph = Graph::directed(4);
        graph.insert_edge(Edge::Directed { origin: 0, destination: 1 }).unwrap();
        graph.insert_edge(Edge::Directed { origin: 1, destination: 2 }).unwrap();
        graph.insert_edge(Edge::Directed { origin: 2, destination: 0 }).unwrap();
        graph.insert_edge(Edge::Directed { origin: 2, destination: 3 }).unwrap();

        assert_eq!(graph.connected_components(), vec![vec![0, 1, 2], vec![3]]);
        // plain traversal cannot tell 3 apart from the cycle
        assert_eq!(graph.connected_components_bfs(), vec![vec![0, 1, 2, 3]]);
    }

    #[test]
    fn description_parses_comments_separators_and_kinds() {
        let text = "# a tiny ring\nkind=undirected\n5\n(0,1) (1,2); (2,0)\n";
        let graph = parse_description(text).unwrap();
        assert_eq!(graph.vertex_count(), 5);
        assert_eq!(graph.edge_count(), 3);
        assert!(graph.has_edge(2, 0).unwrap());
        assert!(graph.has_edge(0, 2).unwrap());

        let text = "kind=directed_weighted\n3\n(0,1,2.5) (1,2)\n";
        let graph = parse_description(text).unwrap();
        assert_eq!(graph.neighbors_of(0).unwrap()[0].weight(), Some(2.5));
        // a missing weight on a weighted kind defaults to 0
        assert_eq!(graph.neighbors_of(1).unwrap()[0].weight(), Some(0.0));
        assert!(!graph.has_edge(1, 0).unwrap());
    }

    #[test]
    fn description_failures() {
        assert!(matches!(
            parse_description("3\n(0,1)"),
            Err(GraphError::MalformedDescription(_))
        ));
        assert!(matches!(
            parse_description("kind=sideways\n3\n(0,1)"),
            Err(GraphError::MalformedDescription(_))
        ));
        assert!(matches!(
            parse_description("kind=undirected\nthree\n(0,1)"),
            Err(GraphError::MalformedDescription(_))
        ));
        assert!(matches!(
            parse_description("kind=undirected\n3\n(0)"),
            Err(GraphError::MalformedDescription(_))
        ));
        assert!(matches!(
            parse_description("kind=undirected\n2\n(0,5)"),
            Err(GraphError::OutOfRange { vertex: 5, vertices: 2 })
        ));

        // no tokens at all is just an empty graph
        let graph = parse_description_as("", false, false).unwrap();
        assert_eq!(graph.vertex_count(), 0);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn description_roundtrips_through_display() {
        let mut graph = Graph::undirected_weighted(4);
        graph.insert_edge(Edge::UndirectedWeighted { u: 0, v: 1, weight: 1.5 }).unwrap();
        graph.insert_edge(Edge::UndirectedWeighted { u: 2, v: 3, weight: 0.25 }).unwrap();

        let parsed = parse_description(&graph.to_string()).unwrap();
        assert_eq!(parsed.vertex_count(), 4);
        assert_eq!(parsed.edge_count(), 2);
        assert!(parsed.has_edge(3, 2).unwrap());
        assert_eq!(parsed.neighbors_of(0).unwrap()[0].weight(), Some(1.5));
    }

    #[test]
    fn maze_validation() {
        assert!(matches!(
            Maze::new(15, Array2::from_elem((5, 10), MazeCell::Empty)),
            Err(MazeError::TooSmall { rows: 5, cols: 10 })
        ));
        assert!(matches!(
            Maze::new(9, Array2::from_elem((10, 10), MazeCell::Empty)),
            Err(MazeError::HealthTooLow(9))
        ));
        assert!(matches!(
            Maze::new(10, Array2::from_elem((10, 10), MazeCell::Empty)),
            Err(MazeError::CellCount { tag: 'S', found: 0 })
        ));

        let mut cells = Array2::from_elem((10, 10), MazeCell::Empty);
        cells[[1, 1]] = MazeCell::Start;
        cells[[2, 2]] = MazeCell::Start;
        cells[[3, 3]] = MazeCell::End;
        assert!(matches!(
            Maze::new(10, cells),
            Err(MazeError::CellCount { tag: 'S', found: 2 })
        ));
    }

    #[test]
    fn maze_parse_header_padding_and_truncation() {
        let text = [
            "N=10, M=10, P=15",
            WALL,
            "#S9E", // short line, padded with empty cells
            "#########################", // long line, truncated
            WALL,
            WALL,
            WALL,
            WALL,
            WALL,
            WALL,
            WALL,
        ]
        .join("\n");

        let maze = Maze::parse(&text).unwrap();
        assert_eq!((maze.rows(), maze.cols()), (10, 10));
        assert_eq!(maze.initial_health(), 15);
        assert_eq!(maze.start(), Position(1, 1));
        assert_eq!(maze.cell_at(Position(1, 2)), Some(MazeCell::Cost(9)));
        assert_eq!(maze.cell_at(Position(1, 9)), Some(MazeCell::Empty));
        assert_eq!(maze.cell_at(Position(2, 9)), Some(MazeCell::Wall));

        assert!(matches!(
            Maze::parse("N=10, M=ten, P=15\n"),
            Err(MazeError::MalformedHeader(_))
        ));
        assert!(matches!(
            Maze::parse("N=10, M=10\n"),
            Err(MazeError::MalformedHeader(_))
        ));
        assert!(matches!(
            Maze::parse(&format!("N=10, M=10, P=15\n{WALL}\n{WALL}\n")),
            Err(MazeError::MissingRows { declared: 10, found: 2 })
        ));
    }

    fn corridor() -> Maze {
        maze_from(
            &[WALL, "#S9E######", WALL, WALL, WALL, WALL, WALL, WALL, WALL, WALL],
            10,
        )
    }

    #[test]
    fn adapter_mirrors_walkability() {
        let maze = corridor();
        let graph = maze.graph();

        assert_eq!(graph.vertex_count(), 100);
        // three open cells in a row make exactly two undirected edges
        assert_eq!(graph.edge_count(), 2);
        let u = maze.position_to_vertex(Position(1, 1));
        let v = maze.position_to_vertex(Position(1, 2));
        assert!(graph.has_edge(u, v).unwrap());
        // wall cells are never wired in
        assert_eq!(graph.degree_total(0), Ok(0));

        assert_eq!(maze.neighbors(Position(1, 2)), vec![Position(1, 1), Position(1, 3)]);
        assert_eq!(maze.to_string().lines().nth(1), Some("#S9E######"));
    }

    #[test]
    fn connectivity_report_on_a_connected_maze() {
        let report = corridor().connectivity_analysis();
        assert!(report.is_connected);
        assert_eq!(report.component_count, 1);
        assert_eq!(report.start_component, report.end_component);
        assert_eq!(report.vertex_count, 100);
        assert_eq!(report.edge_count, 2);
        assert_eq!(report.components[0].len(), 3);
    }

    #[test]
    fn corridor_with_one_nine_is_barely_feasible() {
        let maze = corridor();
        let solver = Solver::new(&maze);

        let connectivity = solver.basic_connectivity();
        assert!(connectivity.feasible);
        assert_eq!(connectivity.steps, 2);
        assert_eq!(
            connectivity.path,
            Some(vec![Position(1, 1), Position(1, 2), Position(1, 3)])
        );

        let solution = solver.solve();
        assert!(solution.feasible);
        assert_eq!(solution.steps, 2);
        assert_eq!(solution.final_health, 1);
        assert_eq!(solution.all_optimal_paths.len(), 1);
        assert_eq!(
            solution.path,
            Some(vec![Position(1, 1), Position(1, 2), Position(1, 3)])
        );
    }

    #[test]
    fn exhausted_health_means_infeasible_not_error() {
        // two nines in a row: 10 - 9 = 1 survives the first, dies on the second
        let maze = maze_from(
            &[WALL, "#S99E#####", WALL, WALL, WALL, WALL, WALL, WALL, WALL, WALL],
            10,
        );
        let solver = Solver::new(&maze);

        // structural reachability holds even though no run survives
        assert!(solver.basic_connectivity().feasible);

        let solution = solver.solve();
        assert!(!solution.feasible);
        assert_eq!(solution.path, None);
        assert_eq!(solution.all_optimal_paths.len(), 0);
    }

    #[test]
    fn walled_off_end_short_circuits() {
        let split = "#   #    #";
        let maze = maze_from(
            &[WALL, "#S  #   E#", split, split, split, split, split, split, split, WALL],
            10,
        );
        let solver = Solver::new(&maze);

        let connectivity = solver.basic_connectivity();
        assert!(!connectivity.feasible);
        assert_eq!(connectivity.path, None);

        assert!(!solver.solve().feasible);

        let report = maze.connectivity_analysis();
        assert!(!report.is_connected);
        assert_eq!(report.component_count, 2);
        assert_ne!(report.start_component, report.end_component);
    }

    #[test]
    fn pickup_detour_rescues_a_dead_run() {
        // straight through two sevens is fatal; banking the pickup first
        // stretches the run to five steps but survives
        let maze = maze_from(
            &[WALL, "#S77E#####", "#T########", WALL, WALL, WALL, WALL, WALL, WALL, WALL],
            10,
        );
        let solution = Solver::new(&maze).solve();

        assert!(solution.feasible);
        assert_eq!(solution.steps, 5);
        assert_eq!(solution.final_health, 1);
        let path = solution.path.unwrap();
        assert!(path.contains(&Position(2, 1)));
        assert_eq!(path.len(), 6);
    }

    #[test]
    fn direct_route_beats_an_unneeded_detour() {
        // survivable without the pickup, so the three-step run must win
        let maze = maze_from(
            &[WALL, "#S54E#####", "#T########", WALL, WALL, WALL, WALL, WALL, WALL, WALL],
            10,
        );
        let solution = Solver::new(&maze).solve();

        assert!(solution.feasible);
        assert_eq!(solution.steps, 3);
        assert_eq!(solution.final_health, 1);
        assert!(!solution.path.unwrap().contains(&Position(2, 1)));
    }

    #[test]
    fn co_optimal_paths_are_all_reported() {
        // two 2-step routes with distinct terminal states: over the pickup,
        // or through the 5-cost cell
        let maze = maze_from(
            &[WALL, "#ST#######", "#5E#######", WALL, WALL, WALL, WALL, WALL, WALL, WALL],
            10,
        );
        let solution = Solver::new(&maze).solve();

        assert!(solution.feasible);
        assert_eq!(solution.steps, 2);
        assert_eq!(solution.all_optimal_paths.len(), 2);
        // down comes before right in neighbor order, so the costly route is
        // found first and becomes the representative
        assert_eq!(
            solution.path,
            Some(vec![Position(1, 1), Position(2, 1), Position(2, 2)])
        );
        assert_eq!(solution.final_health, 5);
        assert!(solution
            .all_optimal_paths
            .contains(&vec![Position(1, 1), Position(1, 2), Position(2, 2)]));
    }

    #[test]
    fn solve_is_deterministic() {
        let maze = maze_from(
            &[WALL, "#S77E#####", "#T########", WALL, WALL, WALL, WALL, WALL, WALL, WALL],
            10,
        );
        let solver = Solver::new(&maze);
        assert_eq!(solver.solve(), solver.solve());
    }

    #[test]
    fn state_budget_surfaces_unknown() {
        let maze = maze_from(
            &[WALL, "#S77E#####", "#T########", WALL, WALL, WALL, WALL, WALL, WALL, WALL],
            10,
        );
        let solver = Solver::new(&maze);

        assert_eq!(solver.solve_within(1), None);
        assert_eq!(solver.solve_within(10_000), Some(solver.solve()));
    }
}

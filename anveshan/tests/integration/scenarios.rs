//! End-to-end acceptance scenarios for planning, tracing and targeting.

use approx::assert_relative_eq;

use anveshan::boundary::BoundaryTracer;
use anveshan::config::TargetSection;
use anveshan::core::{GridCoord, Polyline};
use anveshan::exploration::PotentialField;
use anveshan::grid::{OccupancyGrid, VisitField};
use anveshan::pathfinding::find_path;
use anveshan::visibility::GraphBuilder;
use anveshan::Environment;

use crate::common::{p, polygon_contains};

#[test]
fn empty_square_gives_direct_path() {
    let env = Environment::empty(100.0, 100.0).unwrap();
    let grid = OccupancyGrid::new(100.0, 100.0, 10.0, 2);
    let graph = GraphBuilder::new(&env, 10.0).build(&[], &grid);

    let result = find_path(&graph, p(1.0, 1.0), p(50.0, 50.0));
    assert!(result.success);
    assert_eq!(result.path_world, vec![p(1.0, 1.0), p(50.0, 50.0)]);
    assert_relative_eq!(result.cost, p(1.0, 1.0).distance(&p(50.0, 50.0)), epsilon = 1e-4);
}

#[test]
fn enclosing_rectangle_gives_empty_path() {
    let enclosure = Polyline::rectangle(p(20.0, 20.0), p(80.0, 80.0));
    let env = Environment::new(100.0, 100.0, vec![enclosure]).unwrap();
    let grid = OccupancyGrid::new(100.0, 100.0, 10.0, 2);
    let graph = GraphBuilder::new(&env, 10.0).build(&[], &grid);
    assert!(graph.node_count() > 0);

    let result = find_path(&graph, p(50.0, 50.0), p(90.0, 90.0));
    assert!(!result.success);
    assert!(result.path_world.is_empty());

    // Inside to inside still works
    assert!(find_path(&graph, p(50.0, 50.0), p(30.0, 30.0)).success);
}

#[test]
fn patch_around_agent_gives_one_enclosing_wall() {
    let mut grid = OccupancyGrid::new(200.0, 200.0, 10.0, 2);
    for x in 9..=11 {
        for y in 9..=11 {
            grid.mark_discovered(GridCoord::new(x, y));
        }
    }

    let walls = BoundaryTracer::default().trace(&grid);
    assert_eq!(walls.len(), 1);
    let wall = &walls[0];
    assert!(wall.is_closed());
    assert!(wall.outline.length() > 0.0);

    let outline = wall.outline.points();
    assert!(polygon_contains(outline, p(100.0, 100.0)));
    assert!(!polygon_contains(outline, p(20.0, 20.0)));
    // Every vertex lies in undiscovered space
    for q in outline {
        assert!(!grid.is_discovered(grid.world_to_cell(*q)));
    }
}

#[test]
fn potential_peaks_next_to_lone_frontier() {
    let hole = GridCoord::new(6, 5);
    let mut grid = OccupancyGrid::new(200.0, 200.0, 10.0, 2);
    for c in grid.coords_column_major() {
        if grid.in_environment(c) && c != hole {
            grid.mark_discovered(c);
        }
    }
    let visits = VisitField::new(grid.width(), grid.height());

    let field = PotentialField::compute(&grid, &visits, &TargetSection::default());
    let (best, _) = field.argmax().unwrap();
    assert!(best.chebyshev_distance(&GridCoord::new(5, 5)) <= 1);
}

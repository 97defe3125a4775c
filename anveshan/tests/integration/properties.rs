//! Invariants checked over a running engine.

use approx::assert_relative_eq;

use anveshan::boundary::BoundaryTracer;
use anveshan::core::WorldPoint;
use anveshan::visibility::is_visible;

use crate::common::{init_logging, p, room, seeded_engine};

#[test]
fn discovery_is_monotonic() {
    init_logging();
    let mut engine = seeded_engine(room(), 11);
    let mut previous = engine.grid().clone();

    for _ in 0..400 {
        engine.advance();
        let grid = engine.grid();
        assert!(grid.discovered_count() >= previous.discovered_count());
        for c in previous.coords_column_major() {
            if previous.is_discovered(c) {
                assert!(grid.is_discovered(c), "cell ({},{}) forgotten", c.x, c.y);
            }
        }
        previous = grid.clone();
    }
}

#[test]
fn visibility_graph_is_symmetric() {
    let mut engine = seeded_engine(room(), 12);
    for tick in 0..300 {
        engine.advance();
        if tick % 50 != 0 {
            continue;
        }
        let graph = engine.visibility_graph();
        for i in 0..graph.node_count() {
            for &(j, w) in graph.neighbors(i) {
                assert!(graph.has_edge(j, i));
                assert_relative_eq!(w, graph.nodes()[i].distance(&graph.nodes()[j]), epsilon = 1e-3);
                assert!(is_visible(graph.nodes()[i], graph.nodes()[j], graph.walls()));
            }
        }
    }
}

#[test]
fn tracing_is_idempotent() {
    let mut engine = seeded_engine(room(), 13);
    for _ in 0..150 {
        engine.advance();
    }
    let tracer = BoundaryTracer::default();
    let first = tracer.trace(engine.grid());
    let second = tracer.trace(engine.grid());
    assert_eq!(first, second);
    assert_eq!(first, engine.virtual_walls());
}

#[test]
fn planned_paths_keep_endpoints_and_avoid_walls() {
    let mut engine = seeded_engine(room(), 14);
    for _ in 0..100 {
        engine.advance();
    }
    let start = engine.pose().position;
    let goals: Vec<WorldPoint> = vec![p(60.0, 60.0), p(120.0, 250.0), p(280.0, 40.0)];

    for goal in goals {
        let result = engine.plan_path(goal);
        if !result.success {
            continue;
        }
        assert_eq!(result.path_world.first(), Some(&start));
        assert_eq!(result.path_world.last(), Some(&goal));
        let walls = engine.visibility_graph().walls();
        for w in result.path_world.windows(2) {
            assert!(is_visible(w[0], w[1], walls));
        }
    }
}

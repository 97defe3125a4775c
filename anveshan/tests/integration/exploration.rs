//! Multi-tick exploration runs.

use anveshan::core::Segment;
use anveshan::{ControlMode, ExplorationState, SteerCommand};

use crate::common::{init_logging, room, seeded_engine};

#[test]
fn seeded_run_makes_progress_safely() {
    init_logging();
    let env = room();
    let walls = env.solid_walls();
    let mut engine = seeded_engine(env, 7);
    let initial = engine.coverage();
    let mut coverage = initial;
    let mut position = engine.pose().position;

    for _ in 0..1500 {
        let report = engine.advance();
        assert!(!report.paused);

        let now = engine.pose().position;
        assert!((0.0..=300.0).contains(&now.x) && (0.0..=300.0).contains(&now.y));
        if now != position {
            let step = Segment::new(position, now);
            assert!(
                !walls.iter().any(|w| step.blocked_after_start(w)),
                "moved through a wall at tick {}",
                report.tick
            );
        }
        position = now;

        assert!(engine.coverage() >= coverage);
        coverage = engine.coverage();
    }
    assert!(coverage > initial);
}

#[test]
fn same_seed_same_trajectory() {
    let mut a = seeded_engine(room(), 99);
    let mut b = seeded_engine(room(), 99);
    for _ in 0..600 {
        let ra = a.advance();
        let rb = b.advance();
        assert_eq!(ra, rb);
        assert_eq!(a.pose(), b.pose());
    }
    assert_eq!(a.path(), b.path());
}

#[test]
fn path_starts_at_agent_while_following() {
    let mut engine = seeded_engine(room(), 3);
    for _ in 0..500 {
        engine.advance();
        if engine.state() == ExplorationState::FollowingPath && !engine.path().is_empty() {
            assert_eq!(engine.path()[0], engine.pose().position);
        }
    }
}

#[test]
fn paused_engine_is_frozen() {
    let mut engine = seeded_engine(room(), 5);
    for _ in 0..20 {
        engine.advance();
    }
    engine.pause();
    let before = engine.snapshot();
    for _ in 0..10 {
        assert!(engine.advance().paused);
    }
    let after = engine.snapshot();
    assert_eq!(after.tick, before.tick);
    assert_eq!(after.pose, before.pose);
    assert_eq!(after.path, before.path);
    assert_eq!(after.grid.discovered_count(), before.grid.discovered_count());

    engine.resume();
    assert!(!engine.advance().paused);
}

#[test]
fn manual_mode_ignores_planner() {
    let mut engine = seeded_engine(room(), 8);
    engine.set_mode(ControlMode::Manual);
    for _ in 0..10 {
        let report = engine.advance();
        assert!(!report.replanned);
        assert_eq!(report.mode, ControlMode::Manual);
    }
    assert_eq!(engine.pose().position, engine.config().start.position());

    engine.steer(SteerCommand {
        forward: 0.0,
        turn: 1.0,
    });
    engine.advance();
    assert!(engine.pose().heading > 0.0);

    assert_eq!(engine.toggle_mode(), ControlMode::Autonomous);
    assert!(engine.advance().replanned);
}

//! Integration tests for the Navigator → controllers → motion pipeline.
//!
//! Every scenario runs the full service against [`MockRobot`] and asserts on
//! the recorded motion calls and emitted events.

use crate::mock_hw::{MockRobot, MotionCall, RecordingSink};

use wanderbot::app::events::NavEvent;
use wanderbot::app::ports::MotionCommand;
use wanderbot::app::service::Navigator;
use wanderbot::config::NavConfig;
use wanderbot::fsm::context::FloorClass;
use wanderbot::fsm::{Phase, Probe, TerminationReason};
use wanderbot::{ConfigError, Error};

fn make_nav() -> (Navigator, RecordingSink) {
    let nav = Navigator::new(NavConfig::default()).expect("defaults are valid");
    (nav, RecordingSink::new())
}

const CRUISE: MotionCommand = MotionCommand { left: 25, right: 24 };
const BACKUP: MotionCommand = MotionCommand { left: -5, right: -5 };

// ── Straight travel ──────────────────────────────────────────

#[test]
fn clear_path_drives_until_within_stop_distance() {
    let (mut nav, mut sink) = make_nav();
    let mut hw = MockRobot::new().distances(&[50.0, 40.0, 30.0, 20.0, 14.9]);

    nav.start(&mut hw, &mut sink);
    let phase = nav.step(&mut hw, &mut sink);

    assert_eq!(phase, Phase::Driving);
    assert_eq!(hw.drives(), vec![CRUISE; 4]);
    assert!(hw.stops().is_empty(), "a finished segment is not a stop");
    assert!(sink.events.contains(&NavEvent::SegmentFinished {
        commands: 4,
        final_distance: 14.9,
    }));
}

#[test]
fn next_cycle_after_segment_starts_evasion() {
    let (mut nav, mut sink) = make_nav();
    let mut hw = MockRobot::new().distances(&[50.0, 14.9]);

    nav.start(&mut hw, &mut sink);
    assert_eq!(nav.step(&mut hw, &mut sink), Phase::Driving);
    assert_eq!(nav.step(&mut hw, &mut sink), Phase::BackingUp);
    assert_eq!(hw.last_call(), Some(&MotionCall::Stop(1000)));
}

#[test]
fn boundary_floor_ends_segment() {
    let (mut nav, mut sink) = make_nav();
    let mut hw = MockRobot::new()
        .distances(&[100.0])
        .floors(&[FloorClass::White, FloorClass::White, FloorClass::Red]);

    nav.start(&mut hw, &mut sink);
    assert_eq!(nav.step(&mut hw, &mut sink), Phase::Driving);
    assert_eq!(hw.drives().len(), 2);

    assert_eq!(nav.step(&mut hw, &mut sink), Phase::BackingUp);
    assert_eq!(nav.state().last_frame.floor, FloorClass::Red);
}

#[test]
fn reading_at_stop_distance_reports_no_segment() {
    let (mut nav, mut sink) = make_nav();
    let mut hw = MockRobot::new().distances(&[15.0]);

    nav.start(&mut hw, &mut sink);
    for _ in 0..3 {
        assert_eq!(nav.step(&mut hw, &mut sink), Phase::Driving);
    }

    assert!(hw.drives().is_empty());
    assert_eq!(
        sink.count(|e| matches!(e, NavEvent::SegmentFinished { .. })),
        0
    );
}

// ── Evasion ──────────────────────────────────────────────────

#[test]
fn back_up_reverses_between_settle_stops() {
    let (mut nav, mut sink) = make_nav();
    let mut hw = MockRobot::new().distances(&[10.0]);

    nav.start(&mut hw, &mut sink);
    assert_eq!(nav.step(&mut hw, &mut sink), Phase::BackingUp);
    assert_eq!(
        nav.step(&mut hw, &mut sink),
        Phase::Probing(Probe::Right)
    );

    assert_eq!(
        hw.calls,
        vec![
            MotionCall::Stop(1000),
            MotionCall::Stop(500),
            MotionCall::DriveFor(BACKUP, 2000),
            MotionCall::Stop(500),
        ]
    );
}

#[test]
fn immediate_dead_end_probes_three_times_then_stops() {
    let (mut nav, mut sink) = make_nav();
    let mut hw = MockRobot::new().distances(&[10.0]);

    let reason = nav.run(&mut hw, &mut sink);

    assert_eq!(reason, TerminationReason::DeadEnd);
    assert_eq!(
        sink.probes(),
        vec![(Probe::Right, false), (Probe::About, false), (Probe::Left, false)]
    );
    assert_eq!(hw.last_call(), Some(&MotionCall::Stop(1000)));
    assert_eq!(
        sink.count(|e| matches!(e, NavEvent::Terminated(_))),
        1,
        "exactly one termination"
    );
    // Start, then two re-zeros per probe.
    assert_eq!(hw.hard_resets, 7);
    assert_eq!(hw.angle_resets, 7);
}

#[test]
fn probes_spin_in_their_own_directions() {
    let (mut nav, mut sink) = make_nav();
    let mut hw = MockRobot::new().distances(&[10.0]);

    nav.run(&mut hw, &mut sink);

    let spins: Vec<MotionCommand> = hw
        .drives()
        .into_iter()
        .filter(|c| c.left != c.right)
        .collect();
    let cw = MotionCommand::new(25, -25);
    let ccw = MotionCommand::new(-25, 25);

    // 6° per sample: 84 → 14 samples, 174 → 29 samples.
    assert_eq!(spins.len(), 14 + 29 + 14);
    assert!(spins[..14].iter().all(|c| *c == cw));
    assert!(spins[14..].iter().all(|c| *c == ccw));
}

#[test]
fn phase_changes_follow_escape_sequence() {
    let (mut nav, mut sink) = make_nav();
    let mut hw = MockRobot::new().distances(&[10.0]);

    nav.run(&mut hw, &mut sink);

    let path: Vec<Phase> = sink
        .events
        .iter()
        .filter_map(|e| match e {
            NavEvent::PhaseChanged { to, .. } => Some(*to),
            _ => None,
        })
        .collect();
    assert_eq!(
        path,
        vec![
            Phase::BackingUp,
            Phase::Probing(Probe::Right),
            Phase::Probing(Probe::About),
            Phase::Probing(Probe::Left),
            Phase::Terminated(TerminationReason::DeadEnd),
        ]
    );
}

#[test]
fn clear_probe_returns_to_driving() {
    let (mut nav, mut sink) = make_nav();
    // Entry, right probe, about probe.
    let mut hw = MockRobot::new().distances(&[10.0, 10.0, 40.0]);

    nav.start(&mut hw, &mut sink);
    for _ in 0..4 {
        nav.step(&mut hw, &mut sink);
    }

    assert_eq!(nav.phase(), Phase::Driving);
    assert_eq!(
        sink.probes(),
        vec![(Probe::Right, false), (Probe::About, true)]
    );
    assert_eq!(sink.count(|e| matches!(e, NavEvent::Terminated(_))), 0);
}

#[test]
fn boundary_floor_blocks_a_probe() {
    let (mut nav, mut sink) = make_nav();
    let mut hw = MockRobot::new()
        .distances(&[10.0, 200.0])
        .floors(&[FloorClass::White, FloorClass::Red]);

    let reason = nav.run(&mut hw, &mut sink);

    assert_eq!(reason, TerminationReason::DeadEnd);
    assert!(sink.probes().iter().all(|(_, clear)| !clear));
}

#[test]
fn unreadable_range_ends_at_dead_end() {
    let (mut nav, mut sink) = make_nav();
    let mut hw = MockRobot::new().distances(&[f32::NAN]);

    let reason = nav.run(&mut hw, &mut sink);

    assert_eq!(reason, TerminationReason::DeadEnd);
    assert_eq!(
        sink.probes(),
        vec![(Probe::Right, false), (Probe::About, false), (Probe::Left, false)]
    );
}

#[test]
fn stop_distance_exactly_blocks_a_probe() {
    let (mut nav, mut sink) = make_nav();
    let mut hw = MockRobot::new().distances(&[10.0, 15.0]);

    let reason = nav.run(&mut hw, &mut sink);

    assert_eq!(reason, TerminationReason::DeadEnd);
}

// ── User stop ────────────────────────────────────────────────

#[test]
fn stop_during_forward_drive_skips_evasion() {
    let (mut nav, mut sink) = make_nav();
    let mut hw = MockRobot::new().distances(&[100.0]).stop_after_drives(2);

    let reason = nav.run(&mut hw, &mut sink);

    assert_eq!(reason, TerminationReason::UserRequested);
    assert_eq!(
        hw.calls,
        vec![
            MotionCall::Drive(CRUISE),
            MotionCall::Drive(CRUISE),
            MotionCall::Stop(1000),
        ]
    );
    assert!(sink.probes().is_empty());
}

#[test]
fn stop_during_rotation_ends_without_probe_result() {
    let (mut nav, mut sink) = make_nav();
    let mut hw = MockRobot::new().distances(&[10.0]).stop_after_drives(5);

    let reason = nav.run(&mut hw, &mut sink);

    assert_eq!(reason, TerminationReason::UserRequested);
    assert_eq!(hw.drives().len(), 5);
    assert!(sink.probes().is_empty());
    assert_eq!(hw.last_call(), Some(&MotionCall::Stop(1000)));
    assert!(sink.events.contains(&NavEvent::Terminated(
        TerminationReason::UserRequested
    )));
}

#[test]
fn stop_before_first_cycle_terminates_immediately() {
    let (mut nav, mut sink) = make_nav();
    let mut hw = MockRobot::new().stop_after_drives(0);

    let reason = nav.run(&mut hw, &mut sink);

    assert_eq!(reason, TerminationReason::UserRequested);
    assert_eq!(hw.calls, vec![MotionCall::Stop(1000)]);
}

#[test]
fn step_after_termination_is_a_no_op() {
    let (mut nav, mut sink) = make_nav();
    let mut hw = MockRobot::new().distances(&[10.0]);
    nav.run(&mut hw, &mut sink);

    let calls = hw.calls.len();
    let events = sink.events.len();
    let phase = nav.step(&mut hw, &mut sink);

    assert_eq!(phase, Phase::Terminated(TerminationReason::DeadEnd));
    assert_eq!(hw.calls.len(), calls);
    assert_eq!(sink.events.len(), events);
}

// ── Construction ─────────────────────────────────────────────

#[test]
fn invalid_config_is_rejected() {
    let config = NavConfig {
        stop_distance: 0.0,
        ..NavConfig::default()
    };
    assert!(matches!(
        Navigator::new(config),
        Err(Error::Config(ConfigError::ValidationFailed(_)))
    ));
}

#[test]
fn config_from_json_drives_navigator() {
    let config = NavConfig::from_json(r#"{ "cruise_speed": 40, "stop_distance": 20.0 }"#)
        .expect("valid document");
    let mut nav = Navigator::new(config).expect("valid config");
    let mut sink = RecordingSink::new();
    let mut hw = MockRobot::new().distances(&[30.0, 20.0]);

    nav.start(&mut hw, &mut sink);
    nav.step(&mut hw, &mut sink);

    assert_eq!(hw.drives(), vec![MotionCommand::new(40, 38)]);
}

//! Integration tests for the invocation → sequence → device pipeline.
//!
//! These run against the recording mock registry and check commands,
//! pending-set membership, re-arm requests and debug output together.

use super::mock_devices::{DEBUG_TAG, MockDirectory, RecordingSink};

use dockctl::adapters::log_sink::LogEventSink;
use dockctl::app::events::DockEvent;
use dockctl::fsm::{ConnectorStatus as C, DockCommand, PistonStatus as P};
use dockctl::{DispatchOutcome, DockConfig, DockController, DockError, Invocation, TriggerKind};

fn controller() -> DockController {
    DockController::new(DockConfig::default()).unwrap()
}

/// Fire heartbeats until one sweeps; every throttled beat must re-arm.
fn heartbeat_until_sweep(
    ctl: &mut DockController,
    dir: &mut MockDirectory,
    sink: &mut RecordingSink,
) -> DispatchOutcome {
    let interval = ctl.config().sweep_interval;
    loop {
        let out = ctl.dispatch(&Invocation::heartbeat(), dir, sink);
        if ctl.scheduler().tick_index() % interval == 0 {
            return out;
        }
        assert!(out.run_again, "throttled heartbeat must re-arm");
    }
}

fn has_line(out: &DispatchOutcome, line: &str) -> bool {
    out.debug.iter().any(|l| l == line)
}

// ── Docking ──────────────────────────────────────────────────

#[test]
fn toggle_on_undocked_group_extends_and_goes_pending() {
    let mut ctl = controller();
    let mut dir = MockDirectory::new();
    let mut sink = RecordingSink::new();
    dir.add_group("DockA", Some(P::Retracted), Some(C::Unconnectable));

    let out = ctl.dispatch(&Invocation::toggle("DockA"), &mut dir, &mut sink);

    assert_eq!(dir.calls_for("DockA"), vec![DockCommand::ExtendPiston]);
    assert!(ctl.is_pending("DockA"));
    assert!(out.run_again);
    assert!(has_line(&out, "Group name: 'DockA'"));
    assert!(has_line(&out, "Update source: Explicit"));
    assert!(has_line(&out, "Piston status (before): Retracted"));
    assert!(has_line(&out, "Connector status (before): Unconnectable"));
    assert!(has_line(&out, "Piston status (after): Extending"));
    assert!(has_line(&out, "Connector status (after): Unconnectable"));
    assert!(sink.events.contains(&DockEvent::Pending("DockA".into())));
}

#[test]
fn debug_lines_reach_tagged_display() {
    let mut ctl = controller();
    let mut dir = MockDirectory::new();
    dir.add_group("DockA", Some(P::Retracted), Some(C::Unconnectable));
    dir.add_display("DockA", "status");

    let out = ctl.dispatch(&Invocation::toggle("DockA"), &mut dir, &mut ());

    let debug = dir.display("DockA", 0).unwrap();
    let expected: String = out.debug.iter().map(|l| format!("{l}\n")).collect();
    assert_eq!(debug.text.as_deref(), Some(expected.as_str()));
    assert_eq!(debug.content_type, dockctl::app::ports::ContentType::TextAndImage);
    assert_ne!(debug.tag, DEBUG_TAG, "tag matched case-insensitively");

    let untagged = dir.display("DockA", 1).unwrap();
    assert!(untagged.text.is_none());
}

#[test]
fn recheck_connects_when_piston_extended() {
    let mut ctl = controller();
    let mut dir = MockDirectory::new();
    let mut sink = RecordingSink::new();
    dir.add_group("DockA", Some(P::Retracted), Some(C::Unconnectable));
    ctl.dispatch(&Invocation::toggle("DockA"), &mut dir, &mut sink);
    dir.clear_calls();

    dir.set_piston("DockA", P::Extended);
    dir.set_connector("DockA", C::Connectable);
    let out = heartbeat_until_sweep(&mut ctl, &mut dir, &mut sink);

    assert_eq!(dir.calls_for("DockA"), vec![DockCommand::Connect]);
    assert_eq!(dir.connector("DockA"), Some(C::Connected));
    assert!(!ctl.is_pending("DockA"));
    assert!(!out.run_again, "nothing left to poll");
    assert!(has_line(&out, "Update source: Scheduled"));
    assert!(has_line(&out, "Tick index: 20"));
    assert!(sink.events.contains(&DockEvent::Settled("DockA".into())));
}

#[test]
fn recheck_connects_early_while_extending_if_connectable() {
    let mut ctl = controller();
    let mut dir = MockDirectory::new();
    dir.add_group("DockA", Some(P::Retracted), Some(C::Unconnectable));
    ctl.dispatch(&Invocation::toggle("DockA"), &mut dir, &mut ());
    dir.clear_calls();

    dir.set_connector("DockA", C::Connectable);
    let out = heartbeat_until_sweep(&mut ctl, &mut dir, &mut RecordingSink::new());

    assert_eq!(dir.piston("DockA"), Some(P::Extending));
    assert_eq!(dir.calls_for("DockA"), vec![DockCommand::Connect]);
    assert!(!out.run_again);
}

#[test]
fn recheck_mid_travel_stays_pending() {
    let mut ctl = controller();
    let mut dir = MockDirectory::new();
    let mut sink = RecordingSink::new();
    dir.add_group("DockA", Some(P::Retracted), Some(C::Unconnectable));
    ctl.dispatch(&Invocation::toggle("DockA"), &mut dir, &mut sink);
    dir.clear_calls();

    dir.set_piston("DockA", P::Retracting);
    let out = heartbeat_until_sweep(&mut ctl, &mut dir, &mut sink);

    assert!(dir.calls().is_empty());
    assert!(ctl.is_pending("DockA"));
    assert!(out.run_again);
}

// ── Undocking ────────────────────────────────────────────────

#[test]
fn toggle_on_docked_group_disconnects_then_retracts() {
    let mut ctl = controller();
    let mut dir = MockDirectory::new();
    let mut sink = RecordingSink::new();
    dir.add_group("DockA", Some(P::Extended), Some(C::Connected));

    let out = ctl.dispatch(&Invocation::toggle("DockA"), &mut dir, &mut sink);

    assert_eq!(
        dir.calls_for("DockA"),
        vec![DockCommand::Disconnect, DockCommand::RetractPiston]
    );
    assert!(ctl.is_pending("DockA"));
    assert!(out.run_again);
    assert!(has_line(&out, "Connector status (after): Connectable"));

    dir.clear_calls();
    dir.set_piston("DockA", P::Retracted);
    let out = heartbeat_until_sweep(&mut ctl, &mut dir, &mut sink);

    assert!(dir.calls().is_empty(), "retracted is terminal, nothing to issue");
    assert!(!ctl.is_pending("DockA"));
    assert!(!out.run_again);
}

// ── Idempotence ──────────────────────────────────────────────

#[test]
fn double_toggle_extends_twice() {
    let mut ctl = controller();
    let mut dir = MockDirectory::new();
    dir.add_group("DockA", Some(P::Retracted), Some(C::Unconnectable));

    ctl.dispatch(&Invocation::toggle("DockA"), &mut dir, &mut ());
    ctl.dispatch(&Invocation::toggle("DockA"), &mut dir, &mut ());

    assert_eq!(
        dir.calls_for("DockA"),
        vec![DockCommand::ExtendPiston, DockCommand::ExtendPiston]
    );
    assert_eq!(ctl.scheduler().pending().len(), 1);
}

// ── Missing devices ──────────────────────────────────────────

#[test]
fn group_without_piston_never_goes_pending() {
    let mut ctl = controller();
    let mut dir = MockDirectory::new();
    let mut sink = RecordingSink::new();
    dir.add_group("NoPiston", None, Some(C::Connected));

    for trigger in [
        TriggerKind::Explicit,
        TriggerKind::Scheduled,
        TriggerKind::Both,
        TriggerKind::None,
    ] {
        let inv = Invocation {
            argument: "NoPiston".into(),
            trigger,
        };
        let out = ctl.dispatch(&inv, &mut dir, &mut sink);
        assert!(!ctl.is_pending("NoPiston"), "{trigger}");
        assert!(!out.run_again, "{trigger}");
        assert!(has_line(&out, "No piston detected in group: 'NoPiston'."));
    }

    assert!(dir.calls().is_empty());
    // The error still reaches the group's own debug display.
    let text = dir.display("NoPiston", 0).unwrap().text.clone().unwrap();
    assert!(text.contains("No piston detected"));
    assert!(sink.events.iter().all(|e| !matches!(e, DockEvent::Pending(_))));
}

#[test]
fn group_without_connector_is_reported() {
    let mut ctl = controller();
    let mut dir = MockDirectory::new();
    let mut sink = RecordingSink::new();
    dir.add_group("NoConn", Some(P::Retracted), None);

    let out = ctl.dispatch(&Invocation::toggle("NoConn"), &mut dir, &mut sink);

    assert!(has_line(&out, "No connector detected in group: 'NoConn'."));
    assert!(dir.calls().is_empty());
    assert!(sink.events.contains(&DockEvent::Fault {
        group: "NoConn".into(),
        error: DockError::ConnectorMissing("NoConn".into()),
    }));
}

#[test]
fn vanished_group_is_dropped_on_next_sweep() {
    let mut ctl = controller();
    let mut dir = MockDirectory::new();
    let mut sink = RecordingSink::new();
    dir.add_group("DockA", Some(P::Retracted), Some(C::Unconnectable));
    ctl.dispatch(&Invocation::toggle("DockA"), &mut dir, &mut sink);

    dir.remove_group("DockA");
    let out = heartbeat_until_sweep(&mut ctl, &mut dir, &mut sink);

    assert!(!ctl.is_pending("DockA"));
    assert!(!out.run_again);
    assert!(has_line(&out, "Group does not exist: 'DockA'."));
}

// ── Sweeps ───────────────────────────────────────────────────

#[test]
fn sweep_visits_every_snapshot_member_once() {
    let mut ctl = controller();
    let mut dir = MockDirectory::new();
    dir.add_group("A", Some(P::Retracted), Some(C::Unconnectable));
    dir.add_group("B", Some(P::Retracted), Some(C::Unconnectable));
    ctl.dispatch(&Invocation::toggle("A"), &mut dir, &mut ());
    ctl.dispatch(&Invocation::toggle("B"), &mut dir, &mut ());
    dir.clear_calls();

    // A is still moving and gets re-added during the sweep; B has arrived.
    dir.set_piston("A", P::Retracting);
    dir.set_piston("B", P::Extended);
    let out = heartbeat_until_sweep(&mut ctl, &mut dir, &mut RecordingSink::new());

    let visits = |g: &str| {
        out.debug
            .iter()
            .filter(|l| **l == format!("Group name: '{g}'"))
            .count()
    };
    assert_eq!(visits("A"), 1);
    assert_eq!(visits("B"), 1);
    assert_eq!(dir.calls_for("B"), vec![DockCommand::Connect]);
    assert!(dir.calls_for("A").is_empty());
    assert_eq!(ctl.scheduler().pending(), ["A".to_string()]);
    assert!(out.run_again);
}

#[test]
fn throttled_heartbeat_touches_no_group() {
    let mut ctl = controller();
    let mut dir = MockDirectory::new();
    dir.add_group("DockA", Some(P::Retracted), Some(C::Unconnectable));
    ctl.dispatch(&Invocation::toggle("DockA"), &mut dir, &mut ());
    dir.set_piston("DockA", P::Extended);
    dir.clear_calls();

    let out = ctl.dispatch(&Invocation::heartbeat(), &mut dir, &mut ());

    assert_eq!(out.debug, vec!["Tick index: 1".to_string()]);
    assert!(dir.calls().is_empty());
    assert!(out.run_again);
}

#[test]
fn named_scheduled_invocation_runs_recheck_branch() {
    let mut ctl = controller();
    let mut dir = MockDirectory::new();
    dir.add_group("DockA", Some(P::Extended), Some(C::Connectable));

    let inv = Invocation {
        argument: "DockA".into(),
        trigger: TriggerKind::Scheduled,
    };
    let out = ctl.dispatch(&inv, &mut dir, &mut ());

    assert_eq!(dir.calls_for("DockA"), vec![DockCommand::Connect]);
    assert_eq!(ctl.scheduler().tick_index(), 0, "not a heartbeat");
    assert!(!out.run_again);
}

#[test]
fn explicit_invocation_does_not_advance_heartbeat() {
    let mut ctl = controller();
    let mut dir = MockDirectory::new();
    dir.add_group("DockA", Some(P::Retracted), Some(C::Unconnectable));

    ctl.dispatch(&Invocation::heartbeat(), &mut dir, &mut ());
    ctl.dispatch(&Invocation::toggle("DockA"), &mut dir, &mut ());
    assert_eq!(ctl.scheduler().tick_index(), 1);
}

#[test]
fn every_heartbeat_sweeps_with_unit_interval() {
    let config = DockConfig::from_json(r#"{ "heartbeat_period": 5, "sweep_interval": 1 }"#).unwrap();
    let mut ctl = DockController::new(config).unwrap();
    let mut dir = MockDirectory::new();
    let mut sink = LogEventSink::new();
    dir.add_group("DockA", Some(P::Retracted), Some(C::Unconnectable));
    ctl.dispatch(&Invocation::toggle("DockA"), &mut dir, &mut sink);

    dir.set_piston("DockA", P::Stopped);
    let out = ctl.dispatch(&Invocation::heartbeat(), &mut dir, &mut sink);
    assert!(has_line(&out, "Group name: 'DockA'"));
    assert!(out.run_again);

    dir.set_piston("DockA", P::Extended);
    let out = ctl.dispatch(&Invocation::heartbeat(), &mut dir, &mut sink);
    assert_eq!(dir.calls_for("DockA").last(), Some(&DockCommand::Connect));
    assert!(!out.run_again);
}

//! Snoozing from alert buttons and the command palette

use serde_json::json;
use termwatch::{HostCommand, MonitorCommand};

use crate::common::{terminations, token_of, Harness};

#[test]
fn test_snooze_button_suspends_alerts() {
    let mut h = Harness::new(json!({"obnoxiousMode": true}));
    h.start(1, "zsh");
    h.advance_to(60_000);
    let token = token_of(&h.take_alerts()[0]);

    h.advance_to(61_000);
    h.respond(token, "Snooze 5m");
    let exec = h.monitor.registry().get(1).unwrap();
    assert_eq!(exec.snoozed_until, 61_000 + 5 * 60_000);
    assert!(!exec.idle_alerted);
    assert!(!exec.obnoxious_alerted);

    h.advance_to(360_000);
    assert!(h.take_alerts().is_empty());

    h.advance_to(361_000);
    let alerts = h.take_alerts();
    assert_eq!(alerts.len(), 1);
    assert!(matches!(alerts[0], HostCommand::ShowModal { .. }));
}

#[test]
fn test_obnoxious_snooze_escalates_next_alert() {
    let mut h = Harness::new(json!({"obnoxiousSnooze": true}));
    h.start(1, "zsh");
    h.focus(1);
    h.advance_to(60_000);
    let token = token_of(&h.take_alerts()[0]);

    h.advance_to(61_000);
    h.take();
    h.command(MonitorCommand::Snooze5);
    assert_eq!(h.take(), vec![HostCommand::CloseNotification { token }]);
    assert!(h.monitor.registry().get(1).unwrap().force_next_obnoxious);

    h.advance_to(361_000);
    let alerts = h.take_alerts();
    assert_eq!(alerts.len(), 1);
    assert!(matches!(alerts[0], HostCommand::ShowModal { .. }));
    assert!(!h.monitor.registry().get(1).unwrap().force_next_obnoxious);
}

#[test]
fn test_snoozed_execution_is_not_auto_terminated() {
    let mut h = Harness::new(json!({
        "autoTerminateEnabled": true,
        "autoTerminateTimeout": 1
    }));
    h.start(1, "zsh");
    h.focus(1);
    h.advance_to(10_000);
    h.command(MonitorCommand::Snooze5);

    h.advance_to(309_000);
    let commands = h.take();
    assert!(terminations(&commands).is_empty());
    assert!(commands.iter().all(|c| !crate::common::is_alert(c)));

    h.advance_to(310_000);
    assert_eq!(
        terminations(&h.take()),
        vec![HostCommand::SendSignal {
            terminal: 1,
            data: "\u{3}".to_string()
        }]
    );
}

#[test]
fn test_snooze_without_focused_execution_does_nothing() {
    let mut h = Harness::with_defaults();
    h.start(1, "zsh");
    h.command(MonitorCommand::Snooze10);
    assert_eq!(h.monitor.registry().get(1).unwrap().snoozed_until, 0);

    h.advance_to(60_000);
    assert_eq!(h.take_alerts().len(), 1);
}

#[test]
fn test_snooze_rearms_total_alert() {
    let mut h = Harness::new(json!({"idleTimeout": 0, "totalTimeout": 1}));
    h.start(1, "zsh");
    h.focus(1);
    h.advance_to(60_000);
    assert_eq!(h.take_alerts().len(), 1);

    h.command(MonitorCommand::Snooze5);
    h.advance_to(360_000);
    let alerts = h.take_alerts();
    assert_eq!(alerts.len(), 1);
    assert!(matches!(
        &alerts[0],
        HostCommand::ShowNotification { title, .. } if title == "Long-running command"
    ));
}

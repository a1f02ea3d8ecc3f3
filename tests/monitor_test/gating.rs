//! One alert at a time, the dismissal cooldown and the monitoring switches

use serde_json::json;
use termwatch::monitor::DISMISS_COOLDOWN_MS;
use termwatch::{HostCommand, HostEvent, MonitorCommand};

use crate::common::{terminations, token_of, Harness};

#[test]
fn test_single_alert_across_executions() {
    let mut h = Harness::with_defaults();
    h.start(1, "zsh");
    h.start(2, "bash");

    h.advance_to(60_000);
    let alerts = h.take_alerts();
    assert_eq!(alerts.len(), 1);
    let first = token_of(&alerts[0]);
    assert_eq!(h.monitor.coordinator().active().unwrap().execution, 1);

    // Execution 2 waits while the first alert is up
    h.advance_to(90_000);
    assert!(h.take_alerts().is_empty());

    h.send(HostEvent::NotificationClosed { token: first });
    h.advance_to(90_000 + DISMISS_COOLDOWN_MS - 1_000);
    assert!(h.take_alerts().is_empty());

    h.advance_to(90_000 + DISMISS_COOLDOWN_MS);
    let alerts = h.take_alerts();
    assert_eq!(alerts.len(), 1);
    assert_eq!(h.monitor.coordinator().active().unwrap().execution, 2);
}

#[test]
fn test_stale_dismissal_is_ignored() {
    let mut h = Harness::with_defaults();
    h.start(1, "zsh");
    h.advance_to(60_000);
    let token = token_of(&h.take_alerts()[0]);

    h.send(HostEvent::NotificationClosed { token: token + 100 });
    assert!(h.monitor.coordinator().is_showing());
    assert_eq!(h.monitor.coordinator().last_dismissed_at(), None);

    h.send(HostEvent::NotificationClosed { token });
    h.send(HostEvent::NotificationClosed { token });
    assert_eq!(h.monitor.coordinator().last_dismissed_at(), Some(60_000));
}

#[test]
fn test_only_monitor_active_terminal() {
    let mut h = Harness::new(json!({"onlyMonitorActive": true}));
    h.start(1, "zsh");
    h.start(2, "bash");
    h.focus(2);

    h.advance_to(120_000);
    let alerts = h.take_alerts();
    assert_eq!(alerts.len(), 1);
    assert_eq!(h.monitor.coordinator().active().unwrap().execution, 2);
    assert!(!h.monitor.registry().get(1).unwrap().idle_alerted);
}

#[test]
fn test_disabled_monitor_stays_quiet() {
    let mut h = Harness::new(json!({"enabled": false}));
    h.start(1, "zsh");
    h.advance_to(600_000);

    let commands = h.take();
    assert!(commands.iter().all(|c| !crate::common::is_alert(c)));
    assert!(commands.contains(&HostCommand::SetStatus {
        text: "$(eye-closed) Idle monitor: off".to_string(),
        tooltip: "Terminal idle monitoring is disabled".to_string(),
        visible: true,
        command: MonitorCommand::ShowMenu,
    }));
}

#[test]
fn test_disable_command_closes_quiet_alert() {
    let mut h = Harness::with_defaults();
    h.start(1, "zsh");
    h.advance_to(60_000);
    let token = token_of(&h.take_alerts()[0]);

    h.command(MonitorCommand::Disable);
    let commands = h.take();
    assert!(commands.contains(&HostCommand::WriteSetting {
        key: "enabled".to_string(),
        value: json!(false),
        scope: termwatch::config::ConfigScope::Global,
    }));
    assert!(commands.contains(&HostCommand::CloseNotification { token }));
    assert!(!h.monitor.settings().enabled);

    h.command(MonitorCommand::Enable);
    assert!(h.monitor.settings().enabled);
}

#[test]
fn test_auto_terminate_bypasses_showing_alert() {
    let mut h = Harness::new(json!({
        "idleTimeout": 30,
        "autoTerminateEnabled": true,
        "autoTerminateTimeout": 1,
        "useSigInt": false
    }));
    h.start(1, "zsh");

    h.advance_to(30_000);
    assert_eq!(h.take_alerts().len(), 1);

    h.advance_to(59_000);
    assert!(terminations(&h.take()).is_empty());

    h.advance_to(60_000);
    assert_eq!(
        terminations(&h.take()),
        vec![HostCommand::DestroyTerminal { terminal: 1 }]
    );
    assert!(h.monitor.coordinator().is_showing());

    // Destroyed once; the record waits for the host to report the end
    h.advance_to(120_000);
    assert!(terminations(&h.take()).is_empty());
    assert!(h.monitor.registry().get(1).unwrap().destroy_requested);
}

#[test]
fn test_status_follows_focused_terminal() {
    let mut h = Harness::with_defaults();
    h.start(1, "zsh");
    h.advance_to(10_000);
    h.start(2, "bash");
    h.focus(2);
    h.advance_to(15_000);

    let status = h
        .take()
        .into_iter()
        .filter_map(|c| match c {
            HostCommand::SetStatus { text, tooltip, .. } => Some((text, tooltip)),
            _ => None,
        })
        .last()
        .unwrap();
    assert_eq!(status.0, "$(clock) make · idle 5s · total 5s");
    assert_eq!(status.1, "2 commands monitored · click for actions");
}

#[test]
fn test_restarted_execution_releases_its_alert() {
    let mut h = Harness::with_defaults();
    h.start(1, "zsh");
    h.advance_to(60_000);
    let token = token_of(&h.take_alerts()[0]);

    // The host reports the same handle starting again
    h.start(1, "zsh");
    assert_eq!(h.take(), vec![HostCommand::CloseNotification { token }]);
    assert!(!h.monitor.coordinator().is_showing());

    h.start(2, "bash");
    h.advance_to(h.now + 60_000);
    let alerts = h.take_alerts();
    assert_eq!(alerts.len(), 1);
    assert_ne!(token_of(&alerts[0]), token);
}

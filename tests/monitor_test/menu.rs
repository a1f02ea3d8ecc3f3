//! Quick menu and palette commands

use serde_json::json;
use termwatch::config::ConfigScope;
use termwatch::{HostCommand, HostEvent, MonitorCommand};

use crate::common::Harness;

fn menu_items(h: &mut Harness) -> Vec<String> {
    h.command(MonitorCommand::ShowMenu);
    match h.take().pop() {
        Some(HostCommand::ShowMenu { items }) => items,
        other => panic!("expected a menu, got {:?}", other),
    }
}

#[test]
fn test_menu_without_tracked_focus() {
    let mut h = Harness::with_defaults();
    assert_eq!(
        menu_items(&mut h),
        vec![
            "Enable Auto-Terminate",
            "Use Hard Kill",
            "Open Settings",
            "Disable Monitoring"
        ]
    );
}

#[test]
fn test_menu_with_tracked_focus() {
    let mut h = Harness::new(json!({"autoTerminateEnabled": true, "useSigInt": false}));
    h.start(1, "zsh");
    h.focus(1);

    let items = menu_items(&mut h);
    assert_eq!(items[0], "Reset Timer");
    assert!(items.contains(&"Snooze 15m".to_string()));
    assert!(items.contains(&"Exclude Terminal".to_string()));
    assert!(items.contains(&"Disable Auto-Terminate".to_string()));
    assert!(items.contains(&"Use Interrupt Signal".to_string()));
}

#[test]
fn test_menu_toggles_write_settings() {
    let mut h = Harness::with_defaults();

    h.send(HostEvent::MenuSelection {
        choice: Some("Enable Auto-Terminate".to_string()),
    });
    h.send(HostEvent::MenuSelection {
        choice: Some("Use Hard Kill".to_string()),
    });
    let writes: Vec<HostCommand> = h
        .take()
        .into_iter()
        .filter(|c| matches!(c, HostCommand::WriteSetting { .. }))
        .collect();
    assert_eq!(
        writes,
        vec![
            HostCommand::WriteSetting {
                key: "autoTerminateEnabled".to_string(),
                value: json!(true),
                scope: ConfigScope::Workspace,
            },
            HostCommand::WriteSetting {
                key: "useSigInt".to_string(),
                value: json!(false),
                scope: ConfigScope::Global,
            },
        ]
    );
    assert!(h.monitor.settings().auto_terminate_enabled);
    assert!(!h.monitor.settings().use_sig_int);
}

#[test]
fn test_menu_reset_timer_acts_on_focus() {
    let mut h = Harness::with_defaults();
    h.start(1, "zsh");
    h.focus(1);
    h.advance_to(30_000);

    h.send(HostEvent::MenuSelection {
        choice: Some("Reset Timer".to_string()),
    });
    assert_eq!(h.monitor.registry().get(1).unwrap().last_activity_at, 30_000);
}

#[test]
fn test_dismissed_menu_and_unknown_choices_are_ignored() {
    let mut h = Harness::with_defaults();
    h.send(HostEvent::MenuSelection { choice: None });
    h.send(HostEvent::MenuSelection {
        choice: Some("Make Coffee".to_string()),
    });
    assert!(h.take().is_empty());
}

#[test]
fn test_open_settings() {
    let mut h = Harness::with_defaults();
    h.command(MonitorCommand::OpenSettings);
    h.send(HostEvent::MenuSelection {
        choice: Some("Open Settings".to_string()),
    });
    assert_eq!(
        h.take(),
        vec![HostCommand::OpenSettings, HostCommand::OpenSettings]
    );
}

#[test]
fn test_workspace_setting_wins_over_global() {
    let mut h = Harness::new(json!({"idleTimeout": 10}));
    h.send(HostEvent::ConfigChanged {
        scope: ConfigScope::Workspace,
        values: serde_json::from_value(json!({"idleTimeout": 20})).unwrap(),
    });
    h.start(1, "zsh");

    h.advance_to(19_000);
    assert!(h.take_alerts().is_empty());
    h.advance_to(20_000);
    assert_eq!(h.take_alerts().len(), 1);
}

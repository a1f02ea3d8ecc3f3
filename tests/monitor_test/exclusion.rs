//! Excluded terminals and the Exclude Terminal action

use serde_json::json;
use termwatch::config::ConfigScope;
use termwatch::{HostCommand, HostEvent, MonitorCommand};

use crate::common::{token_of, Harness};

#[test]
fn test_excluded_terminal_is_never_tracked() {
    let mut h = Harness::new(json!({"excludePatterns": "bash, npm: *"}));
    h.start(1, "NPM: watch");
    h.start(2, "bash");
    h.start(3, "bash (2)");

    assert_eq!(h.monitor.registry().ids(), vec![3]);
}

#[test]
fn test_patterns_ignored_when_exclusions_disabled() {
    let mut h = Harness::new(json!({"enableExclusions": false, "excludePatterns": "*"}));
    h.start(1, "zsh");
    assert!(h.monitor.registry().contains(1));
}

#[test]
fn test_exclude_button_persists_pattern() {
    let mut h = Harness::new(json!({"obnoxiousMode": true, "excludePatterns": "bash"}));
    h.start(1, "build, test");
    h.advance_to(60_000);
    let token = token_of(&h.take_alerts()[0]);

    h.respond(token, "Exclude Terminal");
    let commands = h.take();
    assert!(commands.contains(&HostCommand::WriteSetting {
        key: "excludePatterns".to_string(),
        value: json!("bash, build* test"),
        scope: ConfigScope::Workspace,
    }));
    assert!(h.monitor.registry().is_empty());
    assert_eq!(
        h.monitor.config().layer(ConfigScope::Workspace).unwrap().get("excludePatterns"),
        Some(&json!("bash, build* test"))
    );

    // A new command in the same terminal is not tracked
    h.start(2, "build, test");
    assert!(h.monitor.registry().is_empty());
}

#[test]
fn test_exclude_enables_exclusions() {
    let mut h = Harness::new(json!({"enableExclusions": false}));
    h.start(1, "zsh");
    h.focus(1);

    h.command(MonitorCommand::Exclude);
    let writes: Vec<(String, serde_json::Value)> = h
        .take()
        .into_iter()
        .filter_map(|c| match c {
            HostCommand::WriteSetting { key, value, .. } => Some((key, value)),
            _ => None,
        })
        .collect();
    assert_eq!(
        writes,
        vec![
            ("enableExclusions".to_string(), json!(true)),
            ("excludePatterns".to_string(), json!("zsh")),
        ]
    );
    assert!(h.monitor.settings().enable_exclusions);
    assert!(h.monitor.registry().is_empty());
}

#[test]
fn test_exclude_does_not_duplicate_pattern() {
    let mut h = Harness::new(json!({"enableExclusions": false, "excludePatterns": "other, zsh"}));
    h.start(1, "ZSH");
    h.focus(1);
    h.command(MonitorCommand::Exclude);

    assert_eq!(h.monitor.settings().exclude_patterns, "other, zsh");
    assert!(h.monitor.registry().is_empty());
}

#[test]
fn test_config_change_drops_matching_executions() {
    let mut h = Harness::with_defaults();
    h.start(1, "zsh");
    h.start(2, "bash");
    h.advance_to(60_000);
    let token = token_of(&h.take_alerts()[0]);

    h.send(HostEvent::ConfigChanged {
        scope: ConfigScope::Workspace,
        values: serde_json::from_value(json!({"excludePatterns": "z*"})).unwrap(),
    });
    assert_eq!(h.monitor.registry().ids(), vec![2]);
    assert_eq!(h.take(), vec![HostCommand::CloseNotification { token }]);
}

#[test]
fn test_renamed_terminal_is_excluded_on_next_tick() {
    let mut h = Harness::new(json!({"excludePatterns": "server*"}));
    h.start(1, "zsh");
    h.send(HostEvent::TerminalRenamed {
        terminal: 1,
        name: "server: api".to_string(),
    });
    assert!(h.monitor.registry().contains(1));

    h.advance_to(1_000);
    assert!(h.monitor.registry().is_empty());
}

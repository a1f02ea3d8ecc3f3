//! Interrupt-then-destroy termination

use serde_json::json;
use termwatch::{HostCommand, HostEvent, MonitorCommand};

use crate::common::{terminations, token_of, Harness};

fn interrupt(terminal: u64) -> HostCommand {
    HostCommand::SendSignal {
        terminal,
        data: "\u{3}".to_string(),
    }
}

#[test]
fn test_terminate_escalates_after_retries() {
    let mut h = Harness::with_defaults();
    h.start_in(7, 3, "zsh");
    h.focus(3);

    for _ in 0..4 {
        h.command(MonitorCommand::Terminate);
    }
    assert_eq!(
        terminations(&h.take()),
        vec![
            interrupt(3),
            interrupt(3),
            interrupt(3),
            HostCommand::DestroyTerminal { terminal: 3 }
        ]
    );

    let exec = h.monitor.registry().get(7).unwrap();
    assert_eq!(exec.termination_attempts, 4);
    assert!(exec.destroy_requested);

    h.send(HostEvent::ExecutionEnded { execution: 7 });
    assert!(h.monitor.registry().is_empty());
}

#[test]
fn test_hard_kill_destroys_immediately() {
    let mut h = Harness::new(json!({"useSigInt": false}));
    h.start(1, "zsh");
    h.focus(1);

    h.command(MonitorCommand::Terminate);
    assert_eq!(
        terminations(&h.take()),
        vec![HostCommand::DestroyTerminal { terminal: 1 }]
    );
}

#[test]
fn test_custom_retry_count() {
    let mut h = Harness::new(json!({"hardTerminateRetries": 1}));
    h.start(1, "zsh");
    h.focus(1);

    h.command(MonitorCommand::Terminate);
    h.command(MonitorCommand::Terminate);
    assert_eq!(
        terminations(&h.take()),
        vec![interrupt(1), HostCommand::DestroyTerminal { terminal: 1 }]
    );
}

#[test]
fn test_terminate_button_on_modal() {
    let mut h = Harness::new(json!({"obnoxiousMode": true}));
    h.start(1, "zsh");
    h.advance_to(60_000);
    let token = token_of(&h.take_alerts()[0]);

    h.respond(token, "Terminate");
    let commands = h.take();
    assert_eq!(terminations(&commands), vec![interrupt(1)]);
    assert!(commands.contains(&HostCommand::SetFlash { color: None }));
    assert!(!h.monitor.coordinator().is_showing());
}

#[test]
fn test_terminate_after_end_is_noop() {
    let mut h = Harness::new(json!({"obnoxiousMode": true}));
    h.start(1, "zsh");
    h.advance_to(60_000);
    let token = token_of(&h.take_alerts()[0]);

    // The command finished while the modal was open
    h.send(HostEvent::ExecutionEnded { execution: 1 });
    h.respond(token, "Terminate");
    assert!(terminations(&h.take()).is_empty());
}

#[test]
fn test_auto_terminate_interrupts_each_tick_then_destroys() {
    let mut h = Harness::new(json!({
        "idleTimeout": 0,
        "autoTerminateEnabled": true,
        "autoTerminateTimeout": 1
    }));
    h.start(1, "zsh");

    h.advance_to(63_000);
    assert_eq!(
        terminations(&h.take()),
        vec![
            interrupt(1),
            interrupt(1),
            interrupt(1),
            HostCommand::DestroyTerminal { terminal: 1 }
        ]
    );

    h.advance_to(70_000);
    assert!(terminations(&h.take()).is_empty());
}

#[test]
fn test_closed_terminal_drops_its_executions() {
    let mut h = Harness::with_defaults();
    h.start_in(1, 5, "zsh");
    h.start_in(2, 5, "zsh");
    h.start_in(3, 6, "bash");
    h.focus(5);

    h.send(HostEvent::TerminalClosed { terminal: 5 });
    assert_eq!(h.monitor.registry().ids(), vec![3]);
    assert_eq!(h.monitor.focused(), None);
}

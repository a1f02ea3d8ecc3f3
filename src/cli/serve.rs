//! Serve command implementation: the JSON-lines bridge to the host

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::BufReader;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use termwatch::config::{save_layer, ConfigPaths, ConfigScope, Values};
use termwatch::host::{EventReader, Host, HostError, StdioHost};
use termwatch::monitor::{Monitor, TICK_INTERVAL_MS};
use termwatch::{now_millis, HostCommand};

/// Host wrapper that remembers which settings scopes were written
struct PersistingHost<H: Host> {
    inner: H,
    dirty: Vec<ConfigScope>,
}

impl<H: Host> PersistingHost<H> {
    fn new(inner: H) -> Self {
        Self {
            inner,
            dirty: Vec::new(),
        }
    }

    fn take_dirty(&mut self) -> Vec<ConfigScope> {
        std::mem::take(&mut self.dirty)
    }
}

impl<H: Host> Host for PersistingHost<H> {
    fn dispatch(&mut self, command: HostCommand) -> Result<(), HostError> {
        if let HostCommand::WriteSetting { scope, .. } = &command {
            if !self.dirty.contains(scope) {
                self.dirty.push(*scope);
            }
        }
        self.inner.dispatch(command)
    }
}

/// Run the monitor against a host speaking JSON lines on stdin/stdout
pub async fn serve_command(workspace: Option<&Path>) -> Result<()> {
    let paths = ConfigPaths::discover(workspace);
    let config = paths.load().context("Failed to load settings")?;
    let host = PersistingHost::new(StdioHost::new(std::io::stdout()));
    let mut monitor = Monitor::new(host, config);

    let mut events = EventReader::new(BufReader::new(tokio::io::stdin()));
    let mut ticker = tokio::time::interval(Duration::from_millis(TICK_INTERVAL_MS));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    info!("Monitoring started");
    loop {
        tokio::select! {
            _ = ticker.tick() => monitor.tick(now_millis()),
            event = events.next_event() => match event.context("Failed to read from host")? {
                Some(event) => monitor.handle_event(event, now_millis()),
                None => {
                    info!("Host closed stdin, stopping");
                    break;
                }
            },
        }
        persist_written(&mut monitor, &paths);
    }

    Ok(())
}

/// Save every layer touched since the last call, off the tick path
fn persist_written<H: Host>(monitor: &mut Monitor<PersistingHost<H>>, paths: &ConfigPaths) {
    for scope in monitor.host_mut().take_dirty() {
        let Some(path) = paths.for_scope(scope).map(Path::to_path_buf) else {
            continue;
        };
        let Some(values) = monitor.config().layer(scope).cloned() else {
            continue;
        };
        tokio::task::spawn_blocking(move || save(path, values));
    }
}

fn save(path: PathBuf, values: Values) {
    match save_layer(&path, &values) {
        Ok(()) => debug!("Persisted settings to {}", path.display()),
        Err(e) => warn!("Failed to persist settings to {}: {}", path.display(), e),
    }
}

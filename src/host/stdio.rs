//! JSON-lines transport: one event or command object per line.

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, Split};

use super::{Host, HostError};
use crate::domain::{HostCommand, HostEvent};

/// Host that writes each command as a JSON line to a writer (usually stdout)
pub struct StdioHost<W: Write> {
    out: W,
    closed: bool,
}

impl<W: Write> StdioHost<W> {
    pub fn new(out: W) -> Self {
        Self { out, closed: false }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Host for StdioHost<W> {
    fn dispatch(&mut self, command: HostCommand) -> Result<(), HostError> {
        if self.closed {
            return Err(HostError::Closed);
        }
        let line = serde_json::to_string(&command)?;
        let written = writeln!(self.out, "{}", line).and_then(|_| self.out.flush());
        if let Err(e) = written {
            if e.kind() == std::io::ErrorKind::BrokenPipe {
                self.closed = true;
            }
            return Err(e.into());
        }
        Ok(())
    }
}

/// Parse one input line; blank and malformed lines yield `None`
pub fn parse_event(line: &str) -> Option<HostEvent> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    match serde_json::from_str(line) {
        Ok(event) => Some(event),
        Err(e) => {
            tracing::warn!("Ignoring malformed host event: {}", e);
            None
        }
    }
}

/// Reads host events from a JSON-lines stream.
///
/// Lines that are not UTF-8 or not a known event are logged and skipped;
/// only end of input or a failing reader stops it.
pub struct EventReader<R> {
    segments: Split<R>,
}

impl<R: AsyncBufRead + Unpin> EventReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            segments: reader.split(b'\n'),
        }
    }

    /// Next well-formed event, or `None` at end of input.
    ///
    /// Cancel safe: a line is consumed only once it has been read in full.
    pub async fn next_event(&mut self) -> std::io::Result<Option<HostEvent>> {
        while let Some(segment) = self.segments.next_segment().await? {
            let line = match String::from_utf8(segment) {
                Ok(line) => line,
                Err(e) => {
                    tracing::warn!("Ignoring host line that is not UTF-8: {}", e);
                    continue;
                }
            };
            if let Some(event) = parse_event(&line) {
                return Ok(Some(event));
            }
        }
        Ok(None)
    }
}

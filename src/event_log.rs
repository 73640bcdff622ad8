//! Append-only JSON-lines event log.
//!
//! One record per line:
//!
//! ```json
//! {"session":0,"tick":0,"event":{"kind":"session_start","seed":42,"cols":10,"rows":20}}
//! {"session":0,"tick":57,"event":{"kind":"locked","color":3,"lines_cleared":1,"score_delta":10}}
//! ```
//!
//! The log never interrupts play: the first failed write turns it off.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::core::SessionEvent;
use crate::types::GameConfig;

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum Marker {
    SessionStart { seed: u64, cols: u8, rows: u8 },
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Entry<'a> {
    Marker(Marker),
    Session(&'a SessionEvent),
}

#[derive(Debug, Serialize)]
struct Record<'a> {
    session: u32,
    tick: u64,
    event: Entry<'a>,
}

pub struct EventLog<W: Write = BufWriter<File>> {
    out: Option<W>,
}

impl EventLog<BufWriter<File>> {
    /// Open `path` for appending, creating it if needed.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path.as_ref())?;
        Ok(Self::from_writer(BufWriter::new(file)))
    }

    pub fn disabled() -> Self {
        Self { out: None }
    }
}

impl<W: Write> EventLog<W> {
    pub fn from_writer(out: W) -> Self {
        Self { out: Some(out) }
    }

    pub fn is_enabled(&self) -> bool {
        self.out.is_some()
    }

    /// Mark the start of a session, then log whatever it emitted while starting.
    pub fn session_start(
        &mut self,
        session: u32,
        seed: u64,
        config: &GameConfig,
        events: &[SessionEvent],
    ) {
        let marker = Marker::SessionStart {
            seed,
            cols: config.cols,
            rows: config.rows,
        };
        self.write(&Record {
            session,
            tick: 0,
            event: Entry::Marker(marker),
        });
        self.record(session, 0, events);
    }

    /// Log the events of one tick.
    pub fn record(&mut self, session: u32, tick: u64, events: &[SessionEvent]) {
        for event in events {
            self.write(&Record {
                session,
                tick,
                event: Entry::Session(event),
            });
        }
        if !events.is_empty() {
            self.flush();
        }
    }

    pub fn into_inner(self) -> Option<W> {
        self.out
    }

    fn write(&mut self, record: &Record<'_>) {
        let Some(out) = self.out.as_mut() else {
            return;
        };
        let written = serde_json::to_writer(&mut *out, record)
            .map_err(io::Error::from)
            .and_then(|()| out.write_all(b"\n"));
        if written.is_err() {
            self.out = None;
        }
    }

    fn flush(&mut self) {
        if let Some(out) = self.out.as_mut() {
            if out.flush().is_err() {
                self.out = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameOverReason;
    use crate::types::ShapeId;

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn lines(log: EventLog<Vec<u8>>) -> Vec<serde_json::Value> {
        let bytes = log.into_inner().unwrap();
        String::from_utf8(bytes)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn writes_one_json_object_per_line() {
        let mut log = EventLog::from_writer(Vec::new());
        log.session_start(
            0,
            42,
            &GameConfig::default(),
            &[SessionEvent::Spawned {
                shape: ShapeId::T,
                color: 2,
            }],
        );
        log.record(
            0,
            9,
            &[SessionEvent::GameOver {
                score: 30,
                reason: GameOverReason::SpawnBlocked,
            }],
        );

        let records = lines(log);
        assert_eq!(records.len(), 3);
        assert_eq!(records[0]["event"]["kind"], "session_start");
        assert_eq!(records[0]["event"]["seed"], 42);
        assert_eq!(records[1]["event"]["kind"], "spawned");
        assert_eq!(records[2]["tick"], 9);
        assert_eq!(records[2]["event"]["reason"], "spawn_blocked");
    }

    #[test]
    fn empty_tick_writes_nothing() {
        let mut log = EventLog::from_writer(Vec::new());
        log.record(0, 1, &[]);
        assert!(lines(log).is_empty());
    }

    #[test]
    fn write_failure_disables_log() {
        let mut log = EventLog::from_writer(Broken);
        assert!(log.is_enabled());
        log.record(
            0,
            1,
            &[SessionEvent::Locked {
                color: 1,
                lines_cleared: 0,
                score_delta: 0,
            }],
        );
        assert!(!log.is_enabled());
    }

    #[test]
    fn disabled_log_is_a_no_op() {
        let mut log = EventLog::disabled();
        log.session_start(0, 1, &GameConfig::default(), &[]);
        assert!(!log.is_enabled());
    }
}

use std::{
    borrow::Cow,
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use serde::Serialize;

use crate::{Event, Result, query::RecordedEvents};

/// Writes recorded sequences as JSON Lines, one event per line:
///
/// ```text
/// {"seq":0,"timestamp":1718000000000000000,"kind":"LOGIN_REQUEST","payload":"LoginRequest"}
/// ```
///
/// Handy for dumping what a failing test actually saw.
pub struct Recorder<W: Write> {
    writer: W,
}

#[derive(Serialize)]
struct Line<'a, E> {
    seq: usize,
    timestamp: u64,
    kind: Cow<'static, str>,
    payload: &'a E,
}

impl Recorder<BufWriter<File>> {
    /// Create a recorder that writes to the file at `path`, truncating it.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> Recorder<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Append every event of `events` and flush.
    pub fn record<E>(&mut self, events: &RecordedEvents<E>) -> Result
    where
        E: Event + Serialize,
    {
        for entry in events.iter() {
            let line = Line {
                seq: entry.seq(),
                timestamp: entry.meta().timestamp(),
                kind: entry.kind(),
                payload: entry.event(),
            };
            serde_json::to_writer(&mut self.writer, &line)?;
            self.writer.write_all(b"\n")?;
        }
        self.writer.flush()?;
        tracing::debug!(events = events.len(), "recorded sequence written");
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

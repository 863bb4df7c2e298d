use super::InputChannel;
use crate::error::{Error, Result};
use crate::protocol::{AbsInfo, InputEvent, code_name, event_type_name};
use serde::Serialize;
use std::collections::HashMap;
use std::io::{self, Write};
use tracing::debug;

#[derive(Serialize)]
struct TraceRecord {
    #[serde(rename = "type")]
    event_type: &'static str,
    code: &'static str,
    value: i32,
}
impl From<&InputEvent> for TraceRecord {
    fn from(event: &InputEvent) -> Self {
        Self {
            event_type: event_type_name(event.event_type),
            code: code_name(event.event_type, event.code),
            value: event.value,
        }
    }
}

/// Dry-run channel: one JSON object per event, one event per line.
///
/// Axis ranges are whatever was registered with [`TraceChannel::with_axis`];
/// any other axis answers like a device without that capability.
pub struct TraceChannel<W: Write> {
    writer: W,
    axes: HashMap<u16, AbsInfo>,
}

impl<W: Write> TraceChannel<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            axes: HashMap::new(),
        }
    }

    pub fn with_axis(mut self, code: u16, info: AbsInfo) -> Self {
        self.axes.insert(code, info);
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_record(&mut self, event: &InputEvent) -> io::Result<()> {
        serde_json::to_writer(&mut self.writer, &TraceRecord::from(event))?;
        self.writer.write_all(b"\n")
    }
}

impl<W: Write> InputChannel for TraceChannel<W> {
    fn emit(&mut self, event: InputEvent) -> Result<()> {
        self.write_record(&event)
            .map_err(|source| Error::WriteFailed { event, source })
    }

    fn query_abs(&mut self, code: u16) -> Result<AbsInfo> {
        self.axes.get(&code).copied().ok_or_else(|| Error::QueryFailed {
            code,
            source: io::Error::from_raw_os_error(libc::EINVAL),
        })
    }

    fn grab(&mut self) -> Result<()> {
        debug!("Dry run: grab is a no-op");
        Ok(())
    }
}

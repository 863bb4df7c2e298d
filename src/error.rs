use crate::protocol::InputEvent;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Why a slot operation was refused before anything was written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotRejection {
    OutOfRange,
    NotActive,
}
impl std::fmt::Display for SlotRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SlotRejection::OutOfRange => f.write_str("out of range"),
            SlotRejection::NotActive => f.write_str("not active"),
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to open {}: {source}", .path.display())]
    OpenFailed { path: PathBuf, source: io::Error },

    #[error("failed to write {event}: {source}")]
    WriteFailed { event: InputEvent, source: io::Error },

    #[error("capability query for axis {code:#04x} failed: {source}")]
    QueryFailed { code: u16, source: io::Error },

    #[error("slot {slot} is {reason} (capacity {capacity})")]
    InvalidSlot {
        slot: i32,
        capacity: usize,
        reason: SlotRejection,
    },

    #[error("exclusive grab failed: {source}")]
    GrabFailed { source: io::Error },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;

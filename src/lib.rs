//! Touchinject - touch-screen input synthesis for Linux evdev nodes
//!
//! This library turns taps, swipes and multitouch slot updates into the
//! exact event sequences a touch-screen driver would produce, and writes
//! them to an input device node.

pub mod channel;
pub mod command;
pub mod config;
pub mod encoder;
pub mod error;
pub mod gesture;
pub mod mapper;
pub mod protocol;
pub mod session;
pub mod slots;

// Re-export commonly used types
pub use channel::{DeviceChannel, InputChannel, TraceChannel};
pub use command::Command;
pub use config::Config;
pub use encoder::EventEncoder;
pub use error::{Error, Result, SlotRejection};
pub use gesture::{DEFAULT_TAP_HOLD_MS, GestureEngine};
pub use mapper::{CoordinateMapper, Dimension, LogicalExtent};
pub use protocol::{AbsInfo, InputEvent};
pub use session::TouchSession;
pub use slots::SlotTracker;

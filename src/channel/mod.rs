//! Output side of the pipeline: where synthesized events end up.
//!
//! [`DeviceChannel`] writes to a real evdev node, [`TraceChannel`] prints
//! the same stream as JSON lines for dry runs.

use crate::error::Result;
use crate::protocol::{AbsInfo, InputEvent};

mod device;
mod trace;

pub use device::DeviceChannel;
pub use trace::TraceChannel;

/// Sink for input events plus the two device ioctls the engine needs
pub trait InputChannel {
    /// Write one complete record
    fn emit(&mut self, event: InputEvent) -> Result<()>;

    /// Read the range of one absolute axis
    fn query_abs(&mut self, code: u16) -> Result<AbsInfo>;

    /// Ask for exclusive delivery of everything written from now on
    fn grab(&mut self) -> Result<()>;
}

impl<C: InputChannel + ?Sized> InputChannel for Box<C> {
    fn emit(&mut self, event: InputEvent) -> Result<()> {
        (**self).emit(event)
    }

    fn query_abs(&mut self, code: u16) -> Result<AbsInfo> {
        (**self).query_abs(code)
    }

    fn grab(&mut self) -> Result<()> {
        (**self).grab()
    }
}

#[cfg(test)]
pub(crate) mod scripted {
    use super::InputChannel;
    use crate::error::{Error, Result};
    use crate::protocol::{AbsInfo, InputEvent};
    use std::collections::HashMap;
    use std::io;

    /// In-memory channel with canned axis ranges and an optional write failure
    #[derive(Debug, Default)]
    pub struct ScriptedChannel {
        pub events: Vec<InputEvent>,
        pub axes: HashMap<u16, AbsInfo>,
        pub queries: Vec<u16>,
        /// Zero-based emission attempt that fails
        pub fail_at: Option<usize>,
        pub attempts: usize,
        pub grab_fails: bool,
        pub grabbed: bool,
    }
    impl ScriptedChannel {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_axis(mut self, code: u16, minimum: i32, maximum: i32) -> Self {
            self.axes.insert(code, AbsInfo::new(minimum, maximum));
            self
        }

        pub fn failing_at(mut self, attempt: usize) -> Self {
            self.fail_at = Some(attempt);
            self
        }
    }
    impl InputChannel for ScriptedChannel {
        fn emit(&mut self, event: InputEvent) -> Result<()> {
            let attempt = self.attempts;
            self.attempts += 1;
            if self.fail_at == Some(attempt) {
                return Err(Error::WriteFailed {
                    event,
                    source: io::Error::new(io::ErrorKind::WriteZero, "short write"),
                });
            }
            self.events.push(event);
            Ok(())
        }

        fn query_abs(&mut self, code: u16) -> Result<AbsInfo> {
            self.queries.push(code);
            self.axes.get(&code).copied().ok_or_else(|| Error::QueryFailed {
                code,
                source: io::Error::from_raw_os_error(libc::EINVAL),
            })
        }

        fn grab(&mut self) -> Result<()> {
            if self.grab_fails {
                return Err(Error::GrabFailed {
                    source: io::Error::from_raw_os_error(libc::EBUSY),
                });
            }
            self.grabbed = true;
            Ok(())
        }
    }
}

use super::InputChannel;
use crate::error::{Error, Result};
use crate::protocol::{AbsInfo, InputEvent, wire_bytes};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::os::unix::fs::OpenOptionsExt;
use std::os::unix::io::AsRawFd;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, info, trace};

// EVIOCGRAB = _IOW('E', 0x90, int)
nix::ioctl_write_int!(eviocgrab, b'E', 0x90);

/// Base request number of EVIOCGABS(abs) = _IOR('E', 0x40 + abs, struct input_absinfo)
const EVIOCGABS_NR: u16 = 0x40;

/// Write handle to an evdev node.
///
/// The node is closed when this value is dropped, which also ends any grab.
pub struct DeviceChannel {
    file: File,
    path: PathBuf,
    grabbed: bool,
}

impl DeviceChannel {
    /// Open `path` for non-blocking, write-only access
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .write(true)
            .custom_flags(libc::O_NONBLOCK)
            .open(&path)
            .map_err(|source| Error::OpenFailed {
                path: path.clone(),
                source,
            })?;

        info!("Opened input device {}", path.display());

        Ok(Self {
            file,
            path,
            grabbed: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_grabbed(&self) -> bool {
        self.grabbed
    }
}

impl InputChannel for DeviceChannel {
    fn emit(&mut self, event: InputEvent) -> Result<()> {
        let wire = event.to_wire(SystemTime::now());
        let bytes = wire_bytes(&wire);

        match self.file.write(bytes) {
            Ok(written) if written == bytes.len() => {
                trace!("{}: {}", self.path.display(), event);
                Ok(())
            }
            Ok(written) => Err(Error::WriteFailed {
                event,
                source: io::Error::new(
                    io::ErrorKind::WriteZero,
                    format!("short write: {} of {} bytes", written, bytes.len()),
                ),
            }),
            Err(source) => Err(Error::WriteFailed { event, source }),
        }
    }

    fn query_abs(&mut self, code: u16) -> Result<AbsInfo> {
        let mut info: libc::input_absinfo = unsafe { std::mem::zeroed() };
        let nr = EVIOCGABS_NR + code;
        let request =
            nix::request_code_read!(b'E', nr, std::mem::size_of::<libc::input_absinfo>());

        let ret = unsafe {
            libc::ioctl(
                self.file.as_raw_fd(),
                request,
                &mut info as *mut libc::input_absinfo,
            )
        };
        if ret < 0 {
            return Err(Error::QueryFailed {
                code,
                source: io::Error::last_os_error(),
            });
        }

        let info = AbsInfo::from(info);
        debug!(
            "EVIOCGABS({:#04x}) on {}: [{}, {}]",
            code,
            self.path.display(),
            info.minimum,
            info.maximum
        );
        Ok(info)
    }

    fn grab(&mut self) -> Result<()> {
        unsafe { eviocgrab(self.file.as_raw_fd(), 1) }
            .map_err(|errno| Error::GrabFailed {
                source: errno.into(),
            })?;
        self.grabbed = true;
        info!("Grabbed {}", self.path.display());
        Ok(())
    }
}

impl Drop for DeviceChannel {
    fn drop(&mut self) {
        debug!("Closed input device {}", self.path.display());
    }
}

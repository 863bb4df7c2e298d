use crate::mapper::LogicalExtent;
use std::ffi::OsString;
use std::path::PathBuf;

/// Device node used when neither the command line nor the environment names one
pub const DEFAULT_DEVICE: &str = "/dev/input/event1";

/// Environment variable overriding [`DEFAULT_DEVICE`]
pub const DEVICE_ENV: &str = "TOUCHINJECT_DEVICE";

/// Settings for one session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Device node to write to
    pub device: PathBuf,
    /// Request exclusive access right after opening
    pub grab: bool,
    /// Logical coordinate space; zero in a dimension disables rescaling
    pub logical_extent: LogicalExtent,
    /// Slot capacity; read from the device's ABS_MT_SLOT range when unset
    pub slots: Option<usize>,
    /// Print events as JSON lines on stdout instead of opening the device.
    /// No axis ranges are known then, so `logical_extent` has no effect.
    pub dry_run: bool,
}

/// Pick the device path: explicit argument, then environment, then default
pub fn resolve_device(explicit: Option<PathBuf>, from_env: Option<OsString>) -> PathBuf {
    explicit
        .or_else(|| from_env.filter(|v| !v.is_empty()).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DEVICE))
}

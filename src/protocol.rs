use std::time::{SystemTime, UNIX_EPOCH};

// Event types
pub const EV_SYN: u16 = 0x00;
pub const EV_KEY: u16 = 0x01;
pub const EV_ABS: u16 = 0x03;

// EV_SYN codes
pub const SYN_REPORT: u16 = 0x00;
pub const SYN_MT_REPORT: u16 = 0x02;

// EV_KEY codes
pub const BTN_TOOL_FINGER: u16 = 0x145;
pub const BTN_TOUCH: u16 = 0x14a;

// EV_ABS codes
pub const ABS_X: u16 = 0x00;
pub const ABS_Y: u16 = 0x01;
pub const ABS_MT_SLOT: u16 = 0x2f;
pub const ABS_MT_POSITION_X: u16 = 0x35;
pub const ABS_MT_POSITION_Y: u16 = 0x36;
pub const ABS_MT_TRACKING_ID: u16 = 0x39;

/// Tracking id value that releases a multitouch slot
pub const TRACKING_ID_RELEASE: i32 = -1;

/// One input record, minus the timestamp the channel adds at emission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEvent {
    pub event_type: u16,
    pub code: u16,
    pub value: i32,
}
impl InputEvent {
    pub const fn new(event_type: u16, code: u16, value: i32) -> Self {
        Self {
            event_type,
            code,
            value,
        }
    }

    pub const fn key(code: u16, pressed: bool) -> Self {
        Self::new(EV_KEY, code, if pressed { 1 } else { 0 })
    }

    pub const fn abs(code: u16, value: i32) -> Self {
        Self::new(EV_ABS, code, value)
    }

    /// SYN_REPORT, ends one batch the consumer applies atomically
    pub const fn report() -> Self {
        Self::new(EV_SYN, SYN_REPORT, 0)
    }

    /// SYN_MT_REPORT, the legacy per-contact separator
    pub const fn mt_report() -> Self {
        Self::new(EV_SYN, SYN_MT_REPORT, 0)
    }

    /// Build the kernel `struct input_event` stamped with `time`
    pub fn to_wire(&self, time: SystemTime) -> libc::input_event {
        let since_epoch = time.duration_since(UNIX_EPOCH).unwrap_or_default();
        libc::input_event {
            time: libc::timeval {
                tv_sec: since_epoch.as_secs() as libc::time_t,
                tv_usec: since_epoch.subsec_micros() as libc::suseconds_t,
            },
            type_: self.event_type,
            code: self.code,
            value: self.value,
        }
    }
}
impl std::fmt::Display for InputEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {}",
            event_type_name(self.event_type),
            code_name(self.event_type, self.code),
            self.value
        )
    }
}

/// Exact byte image of a wire record, as written to the device node
pub fn wire_bytes(event: &libc::input_event) -> &[u8] {
    unsafe {
        std::slice::from_raw_parts(
            (event as *const libc::input_event).cast::<u8>(),
            std::mem::size_of::<libc::input_event>(),
        )
    }
}

/// Range of one absolute axis as reported by EVIOCGABS
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbsInfo {
    pub minimum: i32,
    pub maximum: i32,
}
impl AbsInfo {
    pub const fn new(minimum: i32, maximum: i32) -> Self {
        Self { minimum, maximum }
    }
}
impl From<libc::input_absinfo> for AbsInfo {
    fn from(info: libc::input_absinfo) -> Self {
        Self {
            minimum: info.minimum,
            maximum: info.maximum,
        }
    }
}

pub fn event_type_name(event_type: u16) -> &'static str {
    match event_type {
        EV_SYN => "EV_SYN",
        EV_KEY => "EV_KEY",
        EV_ABS => "EV_ABS",
        _ => "EV_UNKNOWN",
    }
}

pub fn code_name(event_type: u16, code: u16) -> &'static str {
    match (event_type, code) {
        (EV_SYN, SYN_REPORT) => "SYN_REPORT",
        (EV_SYN, SYN_MT_REPORT) => "SYN_MT_REPORT",
        (EV_KEY, BTN_TOOL_FINGER) => "BTN_TOOL_FINGER",
        (EV_KEY, BTN_TOUCH) => "BTN_TOUCH",
        (EV_ABS, ABS_X) => "ABS_X",
        (EV_ABS, ABS_Y) => "ABS_Y",
        (EV_ABS, ABS_MT_SLOT) => "ABS_MT_SLOT",
        (EV_ABS, ABS_MT_POSITION_X) => "ABS_MT_POSITION_X",
        (EV_ABS, ABS_MT_POSITION_Y) => "ABS_MT_POSITION_Y",
        (EV_ABS, ABS_MT_TRACKING_ID) => "ABS_MT_TRACKING_ID",
        _ => "UNKNOWN",
    }
}

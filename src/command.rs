/// One gesture request, already parsed into numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Tap {
        x: i32,
        y: i32,
        hold_ms: u64,
    },
    Press {
        x: i32,
        y: i32,
    },
    Release,
    LongPress {
        x: i32,
        y: i32,
        hold_ms: u64,
    },
    Swipe {
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        duration_ms: u64,
        steps: i32,
    },
    MtDown {
        slot: i32,
        x: i32,
        y: i32,
    },
    MtMove {
        slot: i32,
        x: i32,
        y: i32,
    },
    MtUp {
        slot: i32,
    },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Tap { .. } => "tap",
            Command::Press { .. } => "press",
            Command::Release => "release",
            Command::LongPress { .. } => "longpress",
            Command::Swipe { .. } => "swipe",
            Command::MtDown { .. } => "mt-down",
            Command::MtMove { .. } => "mt-move",
            Command::MtUp { .. } => "mt-up",
        }
    }
}

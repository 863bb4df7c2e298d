use crate::channel::{DeviceChannel, InputChannel, TraceChannel};
use crate::command::Command;
use crate::config::Config;
use crate::encoder::EventEncoder;
use crate::error::Result;
use crate::gesture::GestureEngine;
use crate::mapper::LogicalExtent;
use crate::protocol::ABS_MT_SLOT;
use crate::slots::{MAX_SLOT_CAPACITY, SlotTracker};
use std::io::Write;
use tracing::{debug, info, warn};

/// Everything one invocation needs: the encoder bound to its channel and
/// the multitouch slot table.
pub struct TouchSession<C: InputChannel> {
    encoder: EventEncoder<C>,
    tracker: SlotTracker,
}

impl<C: InputChannel> TouchSession<C> {
    /// Wrap an already opened channel, grabbing it if configured
    pub fn new(channel: C, config: &Config) -> Result<Self> {
        let mut encoder = EventEncoder::new(channel, config.logical_extent);

        if config.grab {
            if let Err(e) = encoder.channel_mut().grab() {
                warn!("{}; continuing without exclusive access", e);
            }
        }

        let capacity = match config.slots {
            Some(capacity) => capacity,
            None => discover_slot_capacity(encoder.channel_mut()),
        };
        let tracker = SlotTracker::new(capacity)?;
        debug!("Session ready with {} slot(s)", tracker.capacity());

        Ok(Self { encoder, tracker })
    }

    pub fn encoder(&self) -> &EventEncoder<C> {
        &self.encoder
    }

    pub fn tracker(&self) -> &SlotTracker {
        &self.tracker
    }

    pub fn into_channel(self) -> C {
        self.encoder.into_channel()
    }

    /// Run one command to completion
    pub async fn execute(&mut self, command: Command) -> Result<()> {
        info!("Running {}", command.name());

        match command {
            Command::Tap { x, y, hold_ms } => {
                GestureEngine::new(&mut self.encoder).tap(x, y, hold_ms).await
            }
            Command::Press { x, y } => GestureEngine::new(&mut self.encoder).press(x, y),
            Command::Release => GestureEngine::new(&mut self.encoder).release(),
            Command::LongPress { x, y, hold_ms } => {
                GestureEngine::new(&mut self.encoder)
                    .long_press(x, y, hold_ms)
                    .await
            }
            Command::Swipe {
                x1,
                y1,
                x2,
                y2,
                duration_ms,
                steps,
            } => {
                GestureEngine::new(&mut self.encoder)
                    .swipe(x1, y1, x2, y2, duration_ms, steps)
                    .await
            }
            Command::MtDown { slot, x, y } => self.tracker.down(&mut self.encoder, slot, x, y),
            Command::MtMove { slot, x, y } => {
                self.tracker.move_to(&mut self.encoder, slot, x, y)
            }
            Command::MtUp { slot } => self.tracker.up(&mut self.encoder, slot),
        }
    }
}

/// Open the channel `config` asks for: the device node, or stdout for a dry run
pub fn open(config: &Config) -> Result<TouchSession<Box<dyn InputChannel>>> {
    let channel: Box<dyn InputChannel> = if config.dry_run {
        info!("Dry run, writing events to stdout");
        Box::new(dry_run_channel(std::io::stdout(), config))
    } else {
        Box::new(DeviceChannel::open(&config.device)?)
    };

    TouchSession::new(channel, config)
}

/// Trace sink for a dry run. It knows no axis ranges, so coordinates are
/// written unmapped even when a logical extent is configured.
fn dry_run_channel<W: Write>(writer: W, config: &Config) -> TraceChannel<W> {
    if config.logical_extent != LogicalExtent::disabled() {
        warn!("Dry run has no axis ranges, --map is ignored and coordinates pass through");
    }
    TraceChannel::new(writer)
}

/// Slot count from the device's ABS_MT_SLOT range, or 1 if it has none
fn discover_slot_capacity<C: InputChannel + ?Sized>(channel: &mut C) -> usize {
    match channel.query_abs(ABS_MT_SLOT) {
        Ok(range) => {
            let capacity = (range.maximum as i64 + 1).clamp(1, MAX_SLOT_CAPACITY as i64) as usize;
            debug!("Device reports {} multitouch slot(s)", capacity);
            capacity
        }
        Err(e) => {
            debug!("{}; assuming a single slot", e);
            1
        }
    }
}

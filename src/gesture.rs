use crate::channel::InputChannel;
use crate::encoder::EventEncoder;
use crate::error::Result;
use std::time::Duration;
use tokio::time::sleep;
use tracing::debug;

/// Hold time for a tap when the caller gives none
pub const DEFAULT_TAP_HOLD_MS: u64 = 100;

/// Step count used when a swipe is asked for with zero or negative steps
pub const FALLBACK_SWIPE_STEPS: i32 = 10;

/// Single-contact gestures played back in real time.
///
/// Delays are plain awaits on the current task; nothing else is driven while
/// a gesture is sleeping and a gesture cannot be cancelled halfway. If a
/// write fails the gesture stops right there, and a contact that was already
/// pressed stays pressed on the device.
pub struct GestureEngine<'a, C: InputChannel> {
    encoder: &'a mut EventEncoder<C>,
}

impl<'a, C: InputChannel> GestureEngine<'a, C> {
    pub fn new(encoder: &'a mut EventEncoder<C>) -> Self {
        Self { encoder }
    }

    /// Press at (x, y), hold for `hold_ms`, lift
    pub async fn tap(&mut self, x: i32, y: i32, hold_ms: u64) -> Result<()> {
        debug!("tap ({}, {}) hold {}ms", x, y, hold_ms);
        self.encoder.contact_update(x, y)?;
        pause(hold_ms).await;
        self.encoder.contact_end()
    }

    /// Same as [`tap`](Self::tap) with a mandatory hold time
    pub async fn long_press(&mut self, x: i32, y: i32, hold_ms: u64) -> Result<()> {
        self.tap(x, y, hold_ms).await
    }

    /// Press and leave the contact down
    pub fn press(&mut self, x: i32, y: i32) -> Result<()> {
        debug!("press ({}, {})", x, y);
        self.encoder.contact_update(x, y)
    }

    /// Lift the single-touch contact wherever it currently is
    pub fn release(&mut self) -> Result<()> {
        debug!("release");
        self.encoder.contact_end()
    }

    /// Drag from (x1, y1) to (x2, y2) in `steps` linear increments spread
    /// over `duration_ms`.
    ///
    /// Intermediate reports go out on ABS_X/ABS_Y rather than the multitouch
    /// axes used by the initial contact. The start is a bare contact update,
    /// not a full tap, so no lift is sent before the first step.
    pub async fn swipe(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        duration_ms: u64,
        steps: i32,
    ) -> Result<()> {
        let steps = if steps < 1 { FALLBACK_SWIPE_STEPS } else { steps };
        let step_delay = duration_ms / steps as u64;
        debug!(
            "swipe ({}, {}) -> ({}, {}) over {}ms in {} steps",
            x1, y1, x2, y2, duration_ms, steps
        );

        self.encoder.contact_update(x1, y1)?;

        for i in 1..=steps {
            let t = i as f32 / steps as f32;
            let x = interpolate(x1, x2, t);
            let y = interpolate(y1, y2, t);
            self.encoder.position(x, y)?;
            pause(step_delay).await;
        }

        self.encoder.touch_key(false)
    }
}

/// Single-precision lerp, truncated toward zero and saturated to i32.
/// The span is taken in i64 so opposite extremes don't overflow.
fn interpolate(from: i32, to: i32, t: f32) -> i32 {
    let span = to as i64 - from as i64;
    (from as f32 + span as f32 * t) as i32
}

async fn pause(ms: u64) {
    if ms > 0 {
        sleep(Duration::from_millis(ms)).await;
    }
}

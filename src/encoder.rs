use crate::channel::InputChannel;
use crate::error::Result;
use crate::mapper::{CoordinateMapper, Dimension, LogicalExtent};
use crate::protocol::*;

/// Builds the ordered event batches for contact updates and releases.
///
/// Coordinates passed in are logical; mapping to device units happens here,
/// before the first event of a batch is written. A failed write stops the
/// batch and nothing after it is attempted.
pub struct EventEncoder<C: InputChannel> {
    channel: C,
    mapper: CoordinateMapper,
}

impl<C: InputChannel> EventEncoder<C> {
    pub fn new(channel: C, extent: LogicalExtent) -> Self {
        Self {
            channel,
            mapper: CoordinateMapper::new(extent),
        }
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    pub fn channel_mut(&mut self) -> &mut C {
        &mut self.channel
    }

    pub fn into_channel(self) -> C {
        self.channel
    }

    /// Map a logical point to device coordinates
    pub fn map_point(&mut self, x: i32, y: i32) -> (i32, i32) {
        let x = self.mapper.map(&mut self.channel, Dimension::X, x);
        let y = self.mapper.map(&mut self.channel, Dimension::Y, y);
        (x, y)
    }

    fn emit_all(&mut self, events: &[InputEvent]) -> Result<()> {
        for event in events {
            self.channel.emit(*event)?;
        }
        Ok(())
    }

    /// Single-touch contact at a logical point
    pub fn contact_update(&mut self, x: i32, y: i32) -> Result<()> {
        let (x, y) = self.map_point(x, y);
        self.emit_all(&[
            InputEvent::key(BTN_TOUCH, true),
            InputEvent::key(BTN_TOOL_FINGER, true),
            InputEvent::abs(ABS_MT_POSITION_X, x),
            InputEvent::abs(ABS_MT_POSITION_Y, y),
            InputEvent::mt_report(),
            InputEvent::report(),
        ])
    }

    /// Single-touch lift; the device keeps whatever position it last saw
    pub fn contact_end(&mut self) -> Result<()> {
        self.emit_all(&[
            InputEvent::key(BTN_TOUCH, false),
            InputEvent::key(BTN_TOOL_FINGER, false),
            InputEvent::mt_report(),
            InputEvent::report(),
        ])
    }

    /// Plain ABS_X/ABS_Y position report, used by swipe steps
    pub fn position(&mut self, x: i32, y: i32) -> Result<()> {
        let (x, y) = self.map_point(x, y);
        self.emit_all(&[
            InputEvent::abs(ABS_X, x),
            InputEvent::abs(ABS_Y, y),
            InputEvent::report(),
        ])
    }

    /// BTN_TOUCH on its own report
    pub fn touch_key(&mut self, pressed: bool) -> Result<()> {
        self.emit_all(&[InputEvent::key(BTN_TOUCH, pressed), InputEvent::report()])
    }

    /// Position a multitouch slot. `tracking_id` is only sent when the
    /// contact is new.
    pub fn slot_update(&mut self, slot: i32, tracking_id: Option<i32>, x: i32, y: i32) -> Result<()> {
        let (x, y) = self.map_point(x, y);
        self.channel.emit(InputEvent::abs(ABS_MT_SLOT, slot))?;
        if let Some(id) = tracking_id {
            self.channel.emit(InputEvent::abs(ABS_MT_TRACKING_ID, id))?;
        }
        self.emit_all(&[
            InputEvent::abs(ABS_MT_POSITION_X, x),
            InputEvent::abs(ABS_MT_POSITION_Y, y),
            InputEvent::mt_report(),
            InputEvent::report(),
        ])
    }

    /// Release a multitouch slot
    pub fn slot_end(&mut self, slot: i32) -> Result<()> {
        self.emit_all(&[
            InputEvent::abs(ABS_MT_SLOT, slot),
            InputEvent::abs(ABS_MT_TRACKING_ID, TRACKING_ID_RELEASE),
            InputEvent::mt_report(),
            InputEvent::report(),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::scripted::ScriptedChannel;
    use crate::error::Error;

    fn mapped_encoder(channel: ScriptedChannel) -> EventEncoder<ScriptedChannel> {
        let channel = channel
            .with_axis(ABS_MT_POSITION_X, 0, 4000)
            .with_axis(ABS_MT_POSITION_Y, 0, 2000);
        EventEncoder::new(channel, LogicalExtent::new(800, 400))
    }

    #[test]
    fn contact_update_sequence() {
        let mut encoder = mapped_encoder(ScriptedChannel::new());
        encoder.contact_update(400, 100).unwrap();

        assert_eq!(
            encoder.channel().events,
            vec![
                InputEvent::key(BTN_TOUCH, true),
                InputEvent::key(BTN_TOOL_FINGER, true),
                InputEvent::abs(ABS_MT_POSITION_X, 2000),
                InputEvent::abs(ABS_MT_POSITION_Y, 500),
                InputEvent::mt_report(),
                InputEvent::report(),
            ]
        );
    }

    #[test]
    fn contact_end_sequence() {
        let mut encoder = EventEncoder::new(ScriptedChannel::new(), LogicalExtent::disabled());
        encoder.contact_end().unwrap();

        assert_eq!(
            encoder.channel().events,
            vec![
                InputEvent::key(BTN_TOUCH, false),
                InputEvent::key(BTN_TOOL_FINGER, false),
                InputEvent::mt_report(),
                InputEvent::report(),
            ]
        );
    }

    #[test]
    fn slot_update_sends_tracking_id_only_for_new_contacts() {
        let mut encoder = mapped_encoder(ScriptedChannel::new());
        encoder.slot_update(1, Some(7), 0, 400).unwrap();
        encoder.slot_update(1, None, 800, 0).unwrap();

        assert_eq!(
            encoder.channel().events,
            vec![
                InputEvent::abs(ABS_MT_SLOT, 1),
                InputEvent::abs(ABS_MT_TRACKING_ID, 7),
                InputEvent::abs(ABS_MT_POSITION_X, 0),
                InputEvent::abs(ABS_MT_POSITION_Y, 2000),
                InputEvent::mt_report(),
                InputEvent::report(),
                InputEvent::abs(ABS_MT_SLOT, 1),
                InputEvent::abs(ABS_MT_POSITION_X, 4000),
                InputEvent::abs(ABS_MT_POSITION_Y, 0),
                InputEvent::mt_report(),
                InputEvent::report(),
            ]
        );
    }

    #[test]
    fn slot_end_uses_release_sentinel() {
        let mut encoder = EventEncoder::new(ScriptedChannel::new(), LogicalExtent::disabled());
        encoder.slot_end(3).unwrap();

        assert_eq!(
            encoder.channel().events,
            vec![
                InputEvent::abs(ABS_MT_SLOT, 3),
                InputEvent::abs(ABS_MT_TRACKING_ID, -1),
                InputEvent::mt_report(),
                InputEvent::report(),
            ]
        );
    }

    #[test]
    fn failed_write_stops_the_batch() {
        let mut encoder = mapped_encoder(ScriptedChannel::new().failing_at(2));
        let err = encoder.contact_update(10, 10).unwrap_err();

        assert!(matches!(
            err,
            Error::WriteFailed { event, .. } if event.code == ABS_MT_POSITION_X
        ));
        assert_eq!(encoder.channel().attempts, 3);
        assert_eq!(encoder.channel().events.len(), 2);
    }
}

use crate::channel::InputChannel;
use crate::protocol::{ABS_MT_POSITION_X, ABS_MT_POSITION_Y, ABS_X, ABS_Y, AbsInfo};
use tracing::debug;

/// Width and height of the caller's coordinate space. Zero disables
/// rescaling for that dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LogicalExtent {
    pub width: u32,
    pub height: u32,
}
impl LogicalExtent {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub const fn disabled() -> Self {
        Self::new(0, 0)
    }

    fn of(&self, dimension: Dimension) -> u32 {
        match dimension {
            Dimension::X => self.width,
            Dimension::Y => self.height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    X,
    Y,
}
impl Dimension {
    /// Multitouch position axis, queried first
    pub const fn primary_axis(self) -> u16 {
        match self {
            Dimension::X => ABS_MT_POSITION_X,
            Dimension::Y => ABS_MT_POSITION_Y,
        }
    }

    /// Single-touch position axis, used when the device lacks the multitouch one
    pub const fn fallback_axis(self) -> u16 {
        match self {
            Dimension::X => ABS_X,
            Dimension::Y => ABS_Y,
        }
    }
}

/// Rescales logical coordinates into the device's native axis ranges.
///
/// Each dimension's range is looked up at most once per mapper. A mapper is
/// created together with the channel it reads from, so the cache lives as
/// long as that channel does.
#[derive(Debug)]
pub struct CoordinateMapper {
    extent: LogicalExtent,
    x_range: Option<Option<AbsInfo>>,
    y_range: Option<Option<AbsInfo>>,
}

impl CoordinateMapper {
    pub fn new(extent: LogicalExtent) -> Self {
        Self {
            extent,
            x_range: None,
            y_range: None,
        }
    }

    /// Map one logical coordinate to a device coordinate
    pub fn map<C: InputChannel + ?Sized>(
        &mut self,
        channel: &mut C,
        dimension: Dimension,
        value: i32,
    ) -> i32 {
        let extent = self.extent.of(dimension);
        if extent == 0 {
            return value;
        }

        match self.range(channel, dimension) {
            Some(range) => rescale(value, extent, range),
            None => value,
        }
    }

    fn range<C: InputChannel + ?Sized>(
        &mut self,
        channel: &mut C,
        dimension: Dimension,
    ) -> Option<AbsInfo> {
        let cached = match dimension {
            Dimension::X => &mut self.x_range,
            Dimension::Y => &mut self.y_range,
        };

        *cached.get_or_insert_with(|| resolve_range(channel, dimension))
    }
}

fn resolve_range<C: InputChannel + ?Sized>(channel: &mut C, dimension: Dimension) -> Option<AbsInfo> {
    let primary = dimension.primary_axis();
    let fallback = dimension.fallback_axis();

    match channel.query_abs(primary) {
        Ok(range) => Some(range),
        Err(e) => {
            debug!("{:?} range: {}, trying axis {:#04x}", dimension, e, fallback);
            match channel.query_abs(fallback) {
                Ok(range) => Some(range),
                Err(e) => {
                    debug!("{:?} range: {}, passing coordinates through", dimension, e);
                    None
                }
            }
        }
    }
}

/// `value * (max - min) / extent + min`, truncating toward zero
pub fn rescale(value: i32, extent: u32, range: AbsInfo) -> i32 {
    let span = range.maximum as i64 - range.minimum as i64;
    (value as i64 * span / extent as i64 + range.minimum as i64) as i32
}

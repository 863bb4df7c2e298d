use crate::channel::InputChannel;
use crate::encoder::EventEncoder;
use crate::error::{Error, Result, SlotRejection};
use tracing::debug;

/// Tracking ids run 1..=TRACKING_ID_LIMIT and then start over at 1
pub const TRACKING_ID_LIMIT: i32 = 1_000_000;

/// Upper bound on configurable slot capacity
pub const MAX_SLOT_CAPACITY: usize = 256;

const FREE: i32 = 0;

/// Type-B multitouch slot table.
///
/// Each slot is free (tracking id 0) or holds the id of a pressed contact.
/// BTN_TOUCH follows the number of held contacts: pressed when the first
/// one goes down, released when the last one comes up.
///
/// The table lives only as long as this value. A new tracker knows nothing
/// about contacts another process left pressed on the device, so moving or
/// lifting those is refused with [`Error::InvalidSlot`].
#[derive(Debug, Clone)]
pub struct SlotTracker {
    slots: Vec<i32>,
    next_tracking_id: i32,
    active: usize,
}

impl SlotTracker {
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 || capacity > MAX_SLOT_CAPACITY {
            return Err(Error::InvalidConfig(format!(
                "slot capacity must be between 1 and {}, got {}",
                MAX_SLOT_CAPACITY, capacity
            )));
        }

        Ok(Self {
            slots: vec![FREE; capacity],
            next_tracking_id: 1,
            active: 0,
        })
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of contacts currently held
    pub fn active_count(&self) -> usize {
        self.active
    }

    /// Tracking id held by `slot`, if the slot is in range and active
    pub fn tracking_id(&self, slot: i32) -> Option<i32> {
        usize::try_from(slot)
            .ok()
            .and_then(|index| self.slots.get(index))
            .copied()
            .filter(|&id| id != FREE)
    }

    /// Put a new contact down in `slot`.
    ///
    /// A slot that is already active gets a fresh tracking id, which the
    /// device reads as the old contact ending and a new one starting; the
    /// held-contact count is not bumped twice for it.
    pub fn down<C: InputChannel>(
        &mut self,
        encoder: &mut EventEncoder<C>,
        slot: i32,
        x: i32,
        y: i32,
    ) -> Result<()> {
        let index = self.index(slot)?;
        let tracking_id = self.allocate_tracking_id();
        let was_free = self.slots[index] == FREE;
        self.slots[index] = tracking_id;
        debug!("slot {} down with tracking id {}", slot, tracking_id);

        if was_free {
            if self.active == 0 {
                encoder.touch_key(true)?;
            }
            self.active += 1;
        }

        encoder.slot_update(slot, Some(tracking_id), x, y)
    }

    /// Move the contact held in `slot`
    pub fn move_to<C: InputChannel>(
        &mut self,
        encoder: &mut EventEncoder<C>,
        slot: i32,
        x: i32,
        y: i32,
    ) -> Result<()> {
        self.active_index(slot)?;
        encoder.slot_update(slot, None, x, y)
    }

    /// Lift the contact held in `slot`
    pub fn up<C: InputChannel>(&mut self, encoder: &mut EventEncoder<C>, slot: i32) -> Result<()> {
        let index = self.active_index(slot)?;
        encoder.slot_end(slot)?;

        debug!("slot {} up (tracking id {})", slot, self.slots[index]);
        self.slots[index] = FREE;
        self.active = self.active.saturating_sub(1);

        if self.active == 0 {
            encoder.touch_key(false)?;
        }
        Ok(())
    }

    fn index(&self, slot: i32) -> Result<usize> {
        usize::try_from(slot)
            .ok()
            .filter(|&index| index < self.slots.len())
            .ok_or(Error::InvalidSlot {
                slot,
                capacity: self.slots.len(),
                reason: SlotRejection::OutOfRange,
            })
    }

    fn active_index(&self, slot: i32) -> Result<usize> {
        let index = self.index(slot)?;
        if self.slots[index] == FREE {
            return Err(Error::InvalidSlot {
                slot,
                capacity: self.slots.len(),
                reason: SlotRejection::NotActive,
            });
        }
        Ok(index)
    }

    fn allocate_tracking_id(&mut self) -> i32 {
        loop {
            let id = self.next_tracking_id;
            self.next_tracking_id = if id >= TRACKING_ID_LIMIT { 1 } else { id + 1 };
            if !self.slots.contains(&id) {
                return id;
            }
        }
    }
}

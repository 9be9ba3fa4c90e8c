/// Allocates vertex input slots from a fixed pool.
///
/// Slots are handed out first-fit, lowest free index first. Slots that a
/// vertex shader declares are reserved up front so that generated locations
/// never collide with them.
///
/// # Example
///
/// ```ignore
/// let mut pool = SlotPool::new(32);
/// pool.reserve(0);              // declared by the shader
/// let a = pool.alloc();         // Some(1)
/// let m = pool.alloc_run(4);    // Some(2), slots 2..6
/// ```

use crate::config::MAX_ATTRIBUTE_SLOTS;

pub struct SlotPool {
    used: u32,
    capacity: u32,
}

impl SlotPool {
    /// Create an empty pool of `capacity` slots (clamped to MAX_ATTRIBUTE_SLOTS)
    pub fn new(capacity: u32) -> Self {
        Self {
            used: 0,
            capacity: capacity.min(MAX_ATTRIBUTE_SLOTS),
        }
    }

    /// Mark a slot as taken. Returns false when it lies outside the pool.
    pub fn reserve(&mut self, slot: u32) -> bool {
        if slot >= self.capacity {
            return false;
        }
        self.used |= 1 << slot;
        true
    }

    /// Whether a slot lies inside the pool and is not taken
    pub fn is_free(&self, slot: u32) -> bool {
        slot < self.capacity && self.used & (1 << slot) == 0
    }

    /// Allocate the lowest free slot
    pub fn alloc(&mut self) -> Option<u32> {
        self.alloc_run(1)
    }

    /// Allocate `count` consecutive slots, returning the first one
    pub fn alloc_run(&mut self, count: u32) -> Option<u32> {
        if count == 0 || count > self.capacity {
            return None;
        }
        let base = (0..=self.capacity - count)
            .find(|&base| (base..base + count).all(|slot| self.is_free(slot)))?;
        for slot in base..base + count {
            self.used |= 1 << slot;
        }
        Some(base)
    }

    /// Number of slots currently taken
    pub fn len(&self) -> u32 {
        self.used.count_ones()
    }

    /// Whether no slot is taken
    pub fn is_empty(&self) -> bool {
        self.used == 0
    }

    /// Total number of slots
    pub fn capacity(&self) -> u32 {
        self.capacity
    }
}

impl Default for SlotPool {
    fn default() -> Self {
        Self::new(MAX_ATTRIBUTE_SLOTS)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "slot_pool_tests.rs"]
mod tests;

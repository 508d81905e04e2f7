//! A slot arena of rectangles for code that builds and discards many short-lived boxes.

use crate::shape::Rectangle;

/// Handle to a rectangle in a [`RectangleArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(usize);

/// Contiguous storage for rectangles, addressed by [`SlotId`].
///
/// The arena hands out slots and lets callers reset them in place, so a decomposition or query
/// loop can reuse the same memory. The backing buffer can be viewed as raw `f64` coordinates.
#[derive(Debug, Clone, Default)]
pub struct RectangleArena {
    slots: Vec<Rectangle>,
}

impl RectangleArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
        }
    }

    /// Store a rectangle and return its slot.
    pub fn alloc(&mut self, rect: Rectangle) -> SlotId {
        self.slots.push(rect);
        SlotId(self.slots.len() - 1)
    }

    pub fn get(&self, id: SlotId) -> Option<&Rectangle> {
        self.slots.get(id.0)
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut Rectangle> {
        self.slots.get_mut(id.0)
    }

    /// Overwrite the bounds stored in a slot. Returns `false` if the slot does not exist.
    pub fn reset(&mut self, id: SlotId, min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> bool {
        match self.slots.get_mut(id.0) {
            Some(rect) => {
                rect.reset(min_x, max_x, min_y, max_y);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Drop every rectangle, keeping the allocation. Previously issued slots become invalid.
    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// The stored rectangles as a flat `[min_x, max_x, min_y, max_y, ...]` buffer.
    pub fn as_coords(&self) -> &[f64] {
        bytemuck::cast_slice(&self.slots)
    }
}

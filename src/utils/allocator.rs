use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Generation-checked index into the scene's body arena.
///
/// Handles stay valid for exactly as long as the body they were issued for;
/// once the body is removed the slot's generation advances and every old
/// handle for it dereferences to `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct BodyHandle {
    index: usize,
    generation: u32,
}

impl BodyHandle {
    pub fn new(index: usize, generation: u32) -> Self {
        Self { index, generation }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn is_null(&self) -> bool {
        self.index == usize::MAX
    }
}

impl Default for BodyHandle {
    fn default() -> Self {
        Self::new(usize::MAX, 0)
    }
}

/// Generational arena giving the scene exclusive ownership of its bodies
/// while callers hold only [`BodyHandle`]s.
pub struct Arena<T> {
    slots: Vec<Option<T>>,
    generations: Vec<u32>,
    free_slots: VecDeque<usize>,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Arena<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            generations: Vec::new(),
            free_slots: VecDeque::new(),
        }
    }

    pub fn insert(&mut self, value: T) -> BodyHandle {
        if let Some(index) = self.free_slots.pop_front() {
            self.slots[index] = Some(value);
            return BodyHandle::new(index, self.generations[index]);
        }

        let index = self.slots.len();
        self.slots.push(Some(value));
        self.generations.push(0);
        BodyHandle::new(index, 0)
    }

    pub fn get(&self, handle: BodyHandle) -> Option<&T> {
        if self.is_live(handle) {
            self.slots.get(handle.index).and_then(|slot| slot.as_ref())
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, handle: BodyHandle) -> Option<&mut T> {
        if self.is_live(handle) {
            self.slots
                .get_mut(handle.index)
                .and_then(|slot| slot.as_mut())
        } else {
            None
        }
    }

    /// Disjoint mutable access to two different slots at once.
    pub fn get2_mut(&mut self, a: BodyHandle, b: BodyHandle) -> Option<(&mut T, &mut T)> {
        if a.index == b.index || !self.is_live(a) || !self.is_live(b) {
            return None;
        }

        let (low, high, flipped) = if a.index < b.index {
            (a.index, b.index, false)
        } else {
            (b.index, a.index, true)
        };

        let (left, right) = self.slots.split_at_mut(high);
        let low_slot = left.get_mut(low).and_then(|slot| slot.as_mut())?;
        let high_slot = right.first_mut().and_then(|slot| slot.as_mut())?;

        if flipped {
            Some((high_slot, low_slot))
        } else {
            Some((low_slot, high_slot))
        }
    }

    pub fn remove(&mut self, handle: BodyHandle) -> Option<T> {
        if !self.is_live(handle) {
            return None;
        }
        let slot = self.slots.get_mut(handle.index)?;
        let value = slot.take();
        if value.is_some() {
            self.generations[handle.index] = self.generations[handle.index].wrapping_add(1);
            self.free_slots.push_back(handle.index);
        }
        value
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.slots.iter().filter_map(|slot| slot.as_ref())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.slots.iter_mut().filter_map(|slot| slot.as_mut())
    }

    pub fn handles(&self) -> impl Iterator<Item = BodyHandle> + '_ {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.as_ref()
                .map(|_| BodyHandle::new(index, self.generations[index]))
        })
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn is_live(&self, handle: BodyHandle) -> bool {
        self.generations
            .get(handle.index)
            .map(|generation| *generation == handle.generation)
            .unwrap_or(false)
    }
}

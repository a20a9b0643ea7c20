//! Brute-force spatial index.
//!
//! Entries are stored in a flat arena and every radius query is a linear
//! scan with distance filtering. Slower than [`SpatialHash`] for anything
//! but tiny collections, but trivially correct, so it serves as the
//! reference the grid index is checked against.
//!
//! [`SpatialHash`]: crate::spatial_hash::SpatialHash

use antfarm_core::spatial::{within_radius, Handle, Located, SpatialIndex};
use antfarm_core::vector::Vector;

/// Linear-scan index over located entries.
#[derive(Debug, Clone)]
pub struct LinearIndex<T> {
    slots: Vec<(u32, Option<T>)>,
    free: Vec<u32>,
    len: usize,
}

impl<T> LinearIndex<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            len: 0,
        }
    }
}

impl<T> Default for LinearIndex<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Located> SpatialIndex<T> for LinearIndex<T> {
    fn insert(&mut self, entry: T) -> Handle {
        self.len += 1;
        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.1 = Some(entry);
                Handle::new(index, slot.0)
            }
            None => {
                self.slots.push((0, Some(entry)));
                Handle::new((self.slots.len() - 1) as u32, 0)
            }
        }
    }

    fn remove(&mut self, handle: Handle) -> Option<T> {
        let (generation, entry) = self.slots.get_mut(handle.index())?;
        if *generation != handle.generation() {
            return None;
        }
        let removed = entry.take()?;
        *generation = generation.wrapping_add(1);
        self.free.push(handle.index() as u32);
        self.len -= 1;
        Some(removed)
    }

    fn get(&self, handle: Handle) -> Option<&T> {
        match self.slots.get(handle.index())? {
            (generation, Some(entry)) if *generation == handle.generation() => Some(entry),
            _ => None,
        }
    }

    fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        match self.slots.get_mut(handle.index())? {
            (generation, Some(entry)) if *generation == handle.generation() => Some(entry),
            _ => None,
        }
    }

    fn len(&self) -> usize {
        self.len
    }

    fn iter<'a>(&'a self) -> impl Iterator<Item = (Handle, &'a T)> + 'a
    where
        T: 'a,
    {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, (generation, entry))| {
                entry
                    .as_ref()
                    .map(|e| (Handle::new(index as u32, *generation), e))
            })
    }

    fn iter_mut<'a>(&'a mut self) -> impl Iterator<Item = (Handle, &'a mut T)> + 'a
    where
        T: 'a,
    {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(index, (generation, entry))| {
                let generation = *generation;
                entry
                    .as_mut()
                    .map(|e| (Handle::new(index as u32, generation), e))
            })
    }

    fn query_radius<'a>(
        &'a self,
        center: Vector,
        radius: f64,
    ) -> impl Iterator<Item = (Handle, &'a T)> + 'a
    where
        T: 'a,
    {
        self.iter()
            .filter(move |(_, entry)| within_radius(&center, &entry.position(), radius))
    }
}

//! Spatial index: position-keyed storage with radius queries.
//!
//! Food, hills, and both pheromone trails each live in their own index.
//! Entries are identified by the `Handle` returned from `insert`, never by
//! their position, so two entries at the same `(x, y)` stay distinct.

use crate::vector::Vector;
use serde::{Deserialize, Serialize};

/// Anything with a fixed position in the plane.
pub trait Located {
    fn position(&self) -> Vector;
}

impl Located for Vector {
    fn position(&self) -> Vector {
        *self
    }
}

/// Opaque identity of an entry inside one spatial index.
///
/// A handle names an arena slot plus the generation of the occupant it was
/// issued for. Once the entry is removed and the slot reused, the old
/// handle no longer resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Handle {
    index: u32,
    generation: u32,
}

impl Handle {
    pub fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    pub fn index(&self) -> usize {
        self.index as usize
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

/// A dynamic set of located entries supporting radius queries.
///
/// This is a trait rather than a concrete type so that the grid index used
/// by the simulation can be checked against a brute-force reference.
///
/// Enumeration borrows the index, so structural changes while iterating
/// are ruled out by the compiler. Passes that need to drop entries collect
/// their handles first and call `remove` afterwards.
pub trait SpatialIndex<T: Located> {
    /// Store an entry and return its handle. No deduplication.
    fn insert(&mut self, entry: T) -> Handle;

    /// Remove the entry behind `handle`.
    ///
    /// Returns `None` if the handle is stale or was never issued by this
    /// index. That is an expected outcome, not an error.
    fn remove(&mut self, handle: Handle) -> Option<T>;

    fn get(&self, handle: Handle) -> Option<&T>;

    /// Mutable access for non-positional fields.
    ///
    /// Moving an entry through this reference would desynchronize it from
    /// its cell; positions are fixed for the lifetime of an entry.
    fn get_mut(&mut self, handle: Handle) -> Option<&mut T>;

    /// Number of live entries.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All live entries, in unspecified order.
    fn iter<'a>(&'a self) -> impl Iterator<Item = (Handle, &'a T)> + 'a
    where
        T: 'a;

    /// All live entries with mutable access to their non-positional fields.
    fn iter_mut<'a>(&'a mut self) -> impl Iterator<Item = (Handle, &'a mut T)> + 'a
    where
        T: 'a;

    /// Entries whose distance to `center` is at most `radius`.
    ///
    /// A zero radius matches only exact positions. A negative or NaN
    /// radius matches nothing.
    fn query_radius<'a>(
        &'a self,
        center: Vector,
        radius: f64,
    ) -> impl Iterator<Item = (Handle, &'a T)> + 'a
    where
        T: 'a;

    /// Handles of all entries matching `predicate`.
    ///
    /// Convenience for the list-then-remove pattern.
    fn handles_where<F>(&self, mut predicate: F) -> Vec<Handle>
    where
        F: FnMut(&T) -> bool,
    {
        self.iter()
            .filter(|(_, entry)| predicate(entry))
            .map(|(handle, _)| handle)
            .collect()
    }
}

/// Whether `point` lies within `radius` of `center` (inclusive).
///
/// Shared by every index implementation so they agree on boundary cases.
pub fn within_radius(center: &Vector, point: &Vector, radius: f64) -> bool {
    radius >= 0.0 && center.distance_squared_to(point) <= radius * radius
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn within_radius_is_inclusive() {
        let c = Vector::ZERO;
        assert!(within_radius(&c, &Vector::new(3.0, 4.0), 5.0));
        assert!(!within_radius(&c, &Vector::new(3.0, 4.01), 5.0));
    }

    #[test]
    fn zero_radius_matches_exact_position_only() {
        let c = Vector::new(2.0, 2.0);
        assert!(within_radius(&c, &c, 0.0));
        assert!(!within_radius(&c, &Vector::new(2.0, 2.0 + 1e-9), 0.0));
    }

    #[test]
    fn negative_and_nan_radius_match_nothing() {
        let c = Vector::ZERO;
        assert!(!within_radius(&c, &c, -1.0));
        assert!(!within_radius(&c, &c, f64::NAN));
    }

    #[test]
    fn handle_accessors() {
        let h = Handle::new(7, 3);
        assert_eq!(h.index(), 7);
        assert_eq!(h.generation(), 3);
        assert_ne!(h, Handle::new(7, 4));
    }
}

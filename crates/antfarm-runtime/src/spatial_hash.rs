//! Uniform-grid spatial hash backing the food, hill, and trail indexes.
//!
//! Entries live in an arena of slots; each occupied grid cell keeps a
//! bucket of slot indices. A cell is keyed by `(floor(x/S), floor(y/S))`
//! for cell size `S`.
//!
//! Radius queries prune in two phases: a whole cell is rejected when the
//! closest point of its box lies outside the radius, and only members of
//! surviving cells are distance-tested. When the square of candidate cells
//! would outnumber the occupied cells, the occupied cells are scanned
//! instead, so huge radii cost no more than a full pass.

use antfarm_core::error::{AntfarmError, Result};
use antfarm_core::spatial::{Handle, Located, SpatialIndex};
use antfarm_core::vector::Vector;
use std::collections::BTreeMap;

/// Cell size used by `SpatialHash::default()`.
pub const DEFAULT_CELL_SIZE: f64 = 25.0;

type CellKey = (i64, i64);

#[derive(Debug, Clone)]
struct Slot<T> {
    generation: u32,
    occupant: Option<Occupant<T>>,
}

#[derive(Debug, Clone)]
struct Occupant<T> {
    value: T,
    position: Vector,
    cell: CellKey,
}

/// Grid-bucketed index over located entries.
#[derive(Debug, Clone)]
pub struct SpatialHash<T> {
    cell_size: f64,
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    // ordered so scans visit cells the same way on every run
    cells: BTreeMap<CellKey, Vec<u32>>,
    len: usize,
}

impl<T: Located> SpatialHash<T> {
    /// Create an empty index. The cell size must be positive and finite.
    pub fn new(cell_size: f64) -> Result<Self> {
        if !(cell_size.is_finite() && cell_size > 0.0) {
            return Err(AntfarmError::invalid_cell_size(cell_size));
        }
        Ok(Self {
            cell_size,
            slots: Vec::new(),
            free: Vec::new(),
            cells: BTreeMap::new(),
            len: 0,
        })
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Number of grid cells currently holding at least one entry.
    pub fn occupied_cells(&self) -> usize {
        self.cells.len()
    }

    /// Drop every entry. Outstanding handles stop resolving.
    pub fn clear(&mut self) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.occupant.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(index as u32);
            }
        }
        self.cells.clear();
        self.len = 0;
    }

    fn key(&self, position: &Vector) -> CellKey {
        (
            (position.x / self.cell_size).floor() as i64,
            (position.y / self.cell_size).floor() as i64,
        )
    }

    /// Whether any part of the cell's box lies within the radius.
    ///
    /// Keys pinned at the edge of the `i64` range collect everything beyond
    /// it, so their box says nothing and they always pass.
    fn cell_overlaps(&self, key: CellKey, center: &Vector, radius_sq: f64) -> bool {
        let edge = |k: i64| k == i64::MIN || k == i64::MAX;
        if edge(key.0) || edge(key.1) {
            return true;
        }
        let min_x = key.0 as f64 * self.cell_size;
        let min_y = key.1 as f64 * self.cell_size;
        let closest = Vector::new(
            center.x.clamp(min_x, min_x + self.cell_size),
            center.y.clamp(min_y, min_y + self.cell_size),
        );
        closest.distance_squared_to(center) <= radius_sq
    }

    /// Buckets that may hold entries within the radius of `center`.
    ///
    /// Ring keys that would leave the `i64` range are skipped; no entry can
    /// live there.
    fn candidate_buckets<'a>(
        &'a self,
        center: Vector,
        radius: f64,
    ) -> impl Iterator<Item = &'a [u32]> + 'a {
        let usable = radius >= 0.0 && center.is_finite() && !self.cells.is_empty();
        let radius_sq = radius * radius;
        let rings = (radius / self.cell_size).ceil();
        let side = 2.0 * rings + 1.0;
        let scan_all = usable && side * side > self.cells.len() as f64;
        let walk_rings = usable && !scan_all;

        let scanned = scan_all.then(move || {
            self.cells
                .iter()
                .filter(move |(key, _)| self.cell_overlaps(**key, &center, radius_sq))
                .map(|(_, bucket)| bucket.as_slice())
        });

        let walked = walk_rings.then(move || {
            let rings = rings as i64;
            let (cx, cy) = self.key(&center);
            (-rings..=rings)
                .flat_map(move |dx| (-rings..=rings).map(move |dy| (dx, dy)))
                .filter_map(move |(dx, dy)| Some((cx.checked_add(dx)?, cy.checked_add(dy)?)))
                .filter_map(move |key| self.cells.get(&key).map(|bucket| (key, bucket)))
                .filter(move |(key, _)| self.cell_overlaps(*key, &center, radius_sq))
                .map(|(_, bucket)| bucket.as_slice())
        });

        scanned
            .into_iter()
            .flatten()
            .chain(walked.into_iter().flatten())
    }

    fn occupant(&self, handle: Handle) -> Option<&Occupant<T>> {
        let slot = self.slots.get(handle.index())?;
        if slot.generation != handle.generation() {
            return None;
        }
        slot.occupant.as_ref()
    }

    fn handle_at(&self, index: u32) -> Handle {
        Handle::new(index, self.slots[index as usize].generation)
    }
}

impl<T: Located> Default for SpatialHash<T> {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            slots: Vec::new(),
            free: Vec::new(),
            cells: BTreeMap::new(),
            len: 0,
        }
    }
}

impl<T: Located> SpatialIndex<T> for SpatialHash<T> {
    fn insert(&mut self, entry: T) -> Handle {
        let position = entry.position();
        let cell = self.key(&position);
        let occupant = Occupant {
            value: entry,
            position,
            cell,
        };

        let index = match self.free.pop() {
            Some(index) => {
                self.slots[index as usize].occupant = Some(occupant);
                index
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    occupant: Some(occupant),
                });
                (self.slots.len() - 1) as u32
            }
        };

        self.cells.entry(cell).or_default().push(index);
        self.len += 1;
        self.handle_at(index)
    }

    fn remove(&mut self, handle: Handle) -> Option<T> {
        let slot = self.slots.get_mut(handle.index())?;
        if slot.generation != handle.generation() {
            return None;
        }
        let occupant = slot.occupant.take()?;
        slot.generation = slot.generation.wrapping_add(1);

        let index = handle.index() as u32;
        if let Some(bucket) = self.cells.get_mut(&occupant.cell) {
            if let Some(at) = bucket.iter().position(|&i| i == index) {
                bucket.swap_remove(at);
            }
            if bucket.is_empty() {
                self.cells.remove(&occupant.cell);
            }
        }

        self.free.push(index);
        self.len -= 1;
        Some(occupant.value)
    }

    fn get(&self, handle: Handle) -> Option<&T> {
        self.occupant(handle).map(|o| &o.value)
    }

    fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        let slot = self.slots.get_mut(handle.index())?;
        if slot.generation != handle.generation() {
            return None;
        }
        slot.occupant.as_mut().map(|o| &mut o.value)
    }

    fn len(&self) -> usize {
        self.len
    }

    fn iter<'a>(&'a self) -> impl Iterator<Item = (Handle, &'a T)> + 'a
    where
        T: 'a,
    {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.occupant
                .as_ref()
                .map(|o| (Handle::new(index as u32, slot.generation), &o.value))
        })
    }

    fn iter_mut<'a>(&'a mut self) -> impl Iterator<Item = (Handle, &'a mut T)> + 'a
    where
        T: 'a,
    {
        self.slots.iter_mut().enumerate().filter_map(|(index, slot)| {
            let generation = slot.generation;
            slot.occupant
                .as_mut()
                .map(|o| (Handle::new(index as u32, generation), &mut o.value))
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
        let radius_sq = radius * radius;
        self.candidate_buckets(center, radius)
            .flat_map(|bucket| bucket.iter().copied())
            .filter_map(move |index| {
                let slot = &self.slots[index as usize];
                let occupant = slot.occupant.as_ref()?;
                (occupant.position.distance_squared_to(&center) <= radius_sq)
                    .then(|| (Handle::new(index, slot.generation), &occupant.value))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> SpatialHash<Vector> {
        SpatialHash::new(1.0).unwrap()
    }

    #[test]
    fn rejects_bad_cell_size() {
        assert!(SpatialHash::<Vector>::new(0.0).is_err());
        assert!(SpatialHash::<Vector>::new(-2.0).is_err());
        assert!(SpatialHash::<Vector>::new(f64::NAN).is_err());
        assert!(SpatialHash::<Vector>::new(f64::INFINITY).is_err());
    }

    #[test]
    fn insert_then_remove_round_trips() {
        let mut idx = grid();
        idx.insert(Vector::new(9.0, 9.0));
        let before = idx.len();

        let h = idx.insert(Vector::new(5.0, 5.0));
        assert_eq!(idx.len(), before + 1);
        assert_eq!(idx.remove(h), Some(Vector::new(5.0, 5.0)));
        assert_eq!(idx.len(), before);
        assert_eq!(idx.iter().count(), before);
    }

    #[test]
    fn remove_missing_is_noop() {
        let mut idx = grid();
        let h = idx.insert(Vector::new(5.0, 5.0));
        assert_eq!(idx.remove(Handle::new(42, 0)), None);
        assert_eq!(idx.remove(h), Some(Vector::new(5.0, 5.0)));
        // second removal of the same handle
        assert_eq!(idx.remove(h), None);
        assert!(idx.is_empty());
    }

    #[test]
    fn co_located_entries_are_distinct() {
        let mut idx = grid();
        let p = Vector::new(3.5, 3.5);
        let a = idx.insert(p);
        let b = idx.insert(p);
        assert_ne!(a, b);
        assert_eq!(idx.query_radius(p, 0.0).count(), 2);

        idx.remove(a);
        let left: Vec<Handle> = idx.iter().map(|(h, _)| h).collect();
        assert_eq!(left, vec![b]);
    }

    #[test]
    fn stale_handle_does_not_alias_reused_slot() {
        let mut idx = grid();
        let old = idx.insert(Vector::new(1.0, 1.0));
        idx.remove(old);
        let new = idx.insert(Vector::new(2.0, 2.0));
        assert_eq!(old.index(), new.index(), "slot should be reused");
        assert!(idx.get(old).is_none());
        assert_eq!(idx.remove(old), None);
        assert_eq!(idx.get(new), Some(&Vector::new(2.0, 2.0)));
    }

    #[test]
    fn empty_cells_are_dropped() {
        let mut idx = grid();
        let a = idx.insert(Vector::new(0.5, 0.5));
        let b = idx.insert(Vector::new(10.5, 0.5));
        assert_eq!(idx.occupied_cells(), 2);
        idx.remove(a);
        assert_eq!(idx.occupied_cells(), 1);
        idx.remove(b);
        assert_eq!(idx.occupied_cells(), 0);
    }

    #[test]
    fn negative_coordinates_bucket_correctly() {
        let mut idx = grid();
        idx.insert(Vector::new(-0.5, -0.5));
        idx.insert(Vector::new(0.5, 0.5));
        assert_eq!(idx.occupied_cells(), 2);
        let hits: Vec<_> = idx.query_radius(Vector::new(-0.4, -0.4), 0.2).collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(*hits[0].1, Vector::new(-0.5, -0.5));
    }

    #[test]
    fn radius_query_is_inclusive() {
        let mut idx = grid();
        idx.insert(Vector::new(3.0, 4.0));
        idx.insert(Vector::new(3.0, 4.5));
        let hits: Vec<_> = idx.query_radius(Vector::ZERO, 5.0).map(|(_, v)| *v).collect();
        assert_eq!(hits, vec![Vector::new(3.0, 4.0)]);
    }

    #[test]
    fn invalid_radius_returns_nothing() {
        let mut idx = grid();
        idx.insert(Vector::new(1.0, 1.0));
        assert_eq!(idx.query_radius(Vector::new(1.0, 1.0), -1.0).count(), 0);
        assert_eq!(idx.query_radius(Vector::new(1.0, 1.0), f64::NAN).count(), 0);
    }

    #[test]
    fn huge_radius_scans_occupied_cells() {
        let mut idx = grid();
        for i in 0..10 {
            idx.insert(Vector::new(i as f64 * 50.0, 0.0));
        }
        assert_eq!(idx.query_radius(Vector::ZERO, 1e9).count(), 10);
        assert_eq!(idx.query_radius(Vector::ZERO, f64::INFINITY).count(), 10);
    }

    #[test]
    fn far_away_center_finds_nothing() {
        let mut idx = SpatialHash::new(10.0).unwrap();
        for i in 0..9 {
            idx.insert(Vector::new(i as f64 * 10.0 + 5.0, 5.0));
        }
        // the center's cell key saturates at the edge of the i64 range
        let far = Vector::new(1e300, 1e300);
        assert_eq!(idx.query_radius(far, 1.0).count(), 0);
        assert_eq!(idx.query_radius(-far, 1.0).count(), 0);
        assert_eq!(idx.query_radius(Vector::new(5.0, 1e300), 1.0).count(), 0);
    }

    #[test]
    fn entries_far_out_are_still_found() {
        let mut idx = SpatialHash::new(10.0).unwrap();
        let far = Vector::new(1e300, 1e300);
        let h = idx.insert(far);
        idx.insert(Vector::new(5.0, 5.0));
        let hits: Vec<Handle> = idx.query_radius(far, 0.0).map(|(h, _)| h).collect();
        assert_eq!(hits, vec![h]);
    }

    #[test]
    fn query_order_is_stable_across_builds() {
        let build = || {
            let mut idx = SpatialHash::new(1.0).unwrap();
            for i in 0..200 {
                let t = i as f64 * 0.37;
                idx.insert(Vector::new((t * 7.3) % 40.0, (t * 3.1) % 40.0));
            }
            idx
        };
        let (a, b) = (build(), build());
        let center = Vector::new(20.0, 20.0);
        for radius in [0.5, 3.0, 1e6] {
            let first: Vec<Handle> = a.query_radius(center, radius).map(|(h, _)| h).collect();
            let second: Vec<Handle> = b.query_radius(center, radius).map(|(h, _)| h).collect();
            assert_eq!(first, second, "radius {}", radius);
        }
    }

    #[test]
    fn get_mut_updates_in_place() {
        let mut idx: SpatialHash<antfarm_core::types::Food> = SpatialHash::new(10.0).unwrap();
        let h = idx.insert(antfarm_core::types::Food::new(Vector::new(1.0, 1.0), 3));
        idx.get_mut(h).unwrap().amount -= 1;
        assert_eq!(idx.get(h).unwrap().amount, 2);
        assert_eq!(idx.query_radius(Vector::new(1.0, 1.0), 0.5).count(), 1);
    }

    #[test]
    fn clear_invalidates_handles() {
        let mut idx = grid();
        let h = idx.insert(Vector::new(1.0, 1.0));
        idx.clear();
        assert!(idx.is_empty());
        assert!(idx.get(h).is_none());
        let again = idx.insert(Vector::new(1.0, 1.0));
        assert_ne!(h, again);
    }
}

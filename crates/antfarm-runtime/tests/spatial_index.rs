//! Grid index vs. brute-force reference
//!
//! The spatial hash must return exactly what a linear scan returns, for
//! random clouds of points, random query centres (including ones outside
//! the populated area) and radii from zero to larger than the world.

use antfarm_core::prelude::*;
use antfarm_runtime::linear_index::LinearIndex;
use antfarm_runtime::spatial_hash::SpatialHash;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

fn sorted(points: Vec<Vector>) -> Vec<(u64, u64)> {
    let mut keys: Vec<(u64, u64)> = points
        .into_iter()
        .map(|p| (p.x.to_bits(), p.y.to_bits()))
        .collect();
    keys.sort_unstable();
    keys
}

fn populate(
    rng: &mut SmallRng,
    count: usize,
    cell_size: f64,
) -> (SpatialHash<Vector>, LinearIndex<Vector>) {
    let mut grid = SpatialHash::new(cell_size).unwrap();
    let mut linear = LinearIndex::new();
    for _ in 0..count {
        let p = Vector::new(rng.gen_range(-50.0..550.0), rng.gen_range(-50.0..550.0));
        grid.insert(p);
        linear.insert(p);
    }
    (grid, linear)
}

#[test]
fn radius_queries_match_brute_force() {
    let mut rng = SmallRng::seed_from_u64(2024);

    for &cell_size in &[1.0, 7.5, 25.0, 400.0] {
        let (grid, linear) = populate(&mut rng, 800, cell_size);

        for _ in 0..200 {
            let center = Vector::new(rng.gen_range(-100.0..600.0), rng.gen_range(-100.0..600.0));
            let radius = match rng.gen_range(0..4) {
                0 => 0.0,
                1 => rng.gen_range(0.0..cell_size),
                2 => rng.gen_range(0.0..120.0),
                _ => rng.gen_range(500.0..2000.0),
            };

            let got = sorted(grid.query_radius(center, radius).map(|(_, p)| *p).collect());
            let want = sorted(linear.query_radius(center, radius).map(|(_, p)| *p).collect());
            assert_eq!(
                got, want,
                "cell size {} center {:?} radius {}",
                cell_size, center, radius
            );
        }
    }
}

#[test]
fn queries_stay_correct_after_removals() {
    let mut rng = SmallRng::seed_from_u64(7);
    let mut grid = SpatialHash::new(10.0).unwrap();
    let mut linear = LinearIndex::new();
    let mut handles = Vec::new();

    for _ in 0..500 {
        let p = Vector::new(rng.gen_range(0.0..200.0), rng.gen_range(0.0..200.0));
        handles.push((grid.insert(p), linear.insert(p)));
    }

    // Drop every third entry from both.
    for (i, (g, l)) in handles.iter().enumerate() {
        if i % 3 == 0 {
            assert_eq!(grid.remove(*g), linear.remove(*l));
        }
    }
    assert_eq!(grid.len(), linear.len());
    assert_eq!(grid.iter().count(), grid.len());

    for _ in 0..100 {
        let center = Vector::new(rng.gen_range(0.0..200.0), rng.gen_range(0.0..200.0));
        let radius = rng.gen_range(0.0..60.0);
        let got = sorted(grid.query_radius(center, radius).map(|(_, p)| *p).collect());
        let want = sorted(linear.query_radius(center, radius).map(|(_, p)| *p).collect());
        assert_eq!(got, want);
    }
}

#[test]
fn exact_position_matches_with_zero_radius() {
    let mut grid = SpatialHash::new(5.0).unwrap();
    let p = Vector::new(12.5, 12.5);
    grid.insert(p);
    grid.insert(Vector::new(12.5, 12.6));
    let hits: Vec<_> = grid.query_radius(p, 0.0).map(|(_, v)| *v).collect();
    assert_eq!(hits, vec![p]);
}

#[test]
fn points_on_cell_boundaries_are_found() {
    let mut grid = SpatialHash::new(10.0).unwrap();
    let mut linear = LinearIndex::new();
    for i in -3..=3 {
        for j in -3..=3 {
            let p = Vector::new(i as f64 * 10.0, j as f64 * 10.0);
            grid.insert(p);
            linear.insert(p);
        }
    }
    for radius in [0.0, 9.999, 10.0, 14.2, 20.0] {
        let center = Vector::new(0.0, 0.0);
        assert_eq!(
            grid.query_radius(center, radius).count(),
            linear.query_radius(center, radius).count(),
            "radius {}",
            radius
        );
    }
}

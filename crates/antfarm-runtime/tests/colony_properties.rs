//! Whole-colony invariants
//!
//! Runs full worlds and checks properties that must hold on every tick:
//! food is conserved, collection never decreases, pheromone amounts stay
//! in range, and a fixed seed reproduces a run exactly.

use antfarm_runtime::prelude::*;

fn small_world(seed: u64) -> Colony {
    let world = WorldConfig {
        size: 300.0,
        ant_count: 120,
        food_clusters: 3,
        cluster_size: 20,
        cluster_radius: 15.0,
        food_per_site: 3,
        ..Default::default()
    };
    let params = Params {
        sense_radius: 40.0,
        drop_prob: 0.2,
        ..Default::default()
    };
    ColonyBuilder::new()
        .with_world(world)
        .with_params(params)
        .with_seed(seed)
        .build()
        .unwrap()
}

#[test]
fn food_is_conserved_every_tick() {
    let mut colony = small_world(1);
    let mut last_collected = 0;

    for _ in 0..600 {
        colony.tick();
        let stats = colony.stats();
        assert!(stats.food_is_conserved(), "food leaked at tick {}: {:?}", stats.tick, stats);
        assert!(stats.collected_food >= last_collected, "collected count went down");
        assert!(stats.collected_food <= stats.total_food_placed);
        assert_eq!(stats.foraging_ants + stats.returning_ants, 120);
        last_collected = stats.collected_food;
    }
}

#[test]
fn every_pickup_removes_exactly_one_unit() {
    let mut colony = small_world(2);
    for _ in 0..300 {
        let before = colony.stats();
        let report = colony.tick();
        let after = colony.stats();
        assert_eq!(
            before.remaining_food - after.remaining_food,
            report.pickups as u64,
            "tick {}",
            after.tick
        );
        assert_eq!(
            after.collected_food - before.collected_food,
            report.deliveries as u64
        );
    }
}

#[test]
fn pheromone_amounts_stay_in_range() {
    let mut colony = small_world(3);
    colony.run(200);
    for trail in Trail::ALL {
        for (_, p) in colony.trail(trail).iter() {
            assert!(p.amount > PHEROMONE_FLOOR && p.amount <= FRESH_PHEROMONE);
        }
    }
    let stats = colony.stats();
    assert_eq!(stats.forage_pheromones, colony.trail(Trail::Forage).len());
    assert_eq!(stats.return_pheromones, colony.trail(Trail::Return).len());
}

#[test]
fn budgets_never_exceed_start() {
    let mut colony = small_world(4);
    let start = colony.params().pheromone_start;
    for _ in 0..200 {
        colony.tick();
        assert!(colony.ants().iter().all(|a| a.pheromone_budget <= start));
    }
}

#[test]
fn wrapped_ants_stay_in_world() {
    let mut colony = small_world(5);
    let size = colony.world_size();
    for _ in 0..400 {
        colony.tick();
        for ant in colony.ants() {
            assert!(
                (0.0..=size).contains(&ant.position.x) && (0.0..=size).contains(&ant.position.y),
                "ant escaped to {:?}",
                ant.position
            );
        }
    }
}

#[test]
fn same_seed_same_run() {
    let mut a = small_world(9);
    let mut b = small_world(9);
    a.run(250);
    b.run(250);
    assert_eq!(a.stats(), b.stats());
    assert_eq!(a.ants(), b.ants());
}

#[test]
fn reconfigure_between_ticks() {
    let mut colony = small_world(6);
    colony.run(10);
    let frozen = Params {
        ant_speed: 0.0,
        ant_rotation: 0.0,
        sense_prob: 0.0,
        ..colony.params().clone()
    };
    colony.configure(frozen).unwrap();

    let before: Vec<Vector> = colony.ants().iter().map(|a| a.position).collect();
    colony.tick();
    let after: Vec<Vector> = colony.ants().iter().map(|a| a.position).collect();
    assert_eq!(before, after, "speed 0 should take effect on the next tick");
}

#[test]
fn colony_is_send() {
    fn assert_send<T: Send>() {}
    assert_send::<Colony>();
}

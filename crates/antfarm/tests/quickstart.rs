//! End-to-end: ants find food near the hill and bring it home.

use antfarm::prelude::*;

#[test]
fn colony_collects_food_near_hill() {
    let mut colony = ColonyBuilder::new()
        .with_world(WorldConfig {
            size: 400.0,
            ant_count: 150,
            food_clusters: 0,
            ..Default::default()
        })
        .with_seed(3)
        .build()
        .unwrap();

    // A ring of food just outside the hill's drop-off radius
    for i in 0..12 {
        let dir = Vector::from_degrees(i as f64 * 30.0);
        colony.insert_food(Vector::new(200.0, 200.0) + dir * 30.0, 20);
    }

    colony.run(1200);

    let stats = colony.stats();
    assert!(stats.collected_food > 0, "no food collected: {:?}", stats);
    assert!(stats.food_is_conserved());
    assert_eq!(stats.total_food_placed, 240);
}

#[test]
fn turn_boundary_keeps_ants_near_world() {
    let params = Params {
        boundary: BoundaryPolicy::Turn,
        ..Default::default()
    };
    let mut colony = ColonyBuilder::new()
        .with_world(WorldConfig {
            size: 100.0,
            ant_count: 40,
            food_clusters: 0,
            ..Default::default()
        })
        .with_params(params.clone())
        .with_seed(8)
        .build()
        .unwrap();

    colony.run(500);
    // Positions are not clamped, but a turned ant can overshoot by at most
    // a couple of steps before its heading carries it back.
    let slack = 5.0 * params.ant_speed;
    for ant in colony.ants() {
        assert!(ant.position.x > -slack && ant.position.x < 100.0 + slack);
        assert!(ant.position.y > -slack && ant.position.y < 100.0 + slack);
    }
}

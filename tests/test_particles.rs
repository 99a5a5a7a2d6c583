use laser_arcade::geometry::Rgb;
use laser_arcade::particles::*;
use laser_arcade::surface::Surface;

#[test]
fn burst_emits_fixed_number_of_sparks() {
    let g = ParticleGroup::burst((10.0, 10.0), &[Rgb(255, 0, 0)]);
    assert_eq!(g.len(), SPARK_COUNT);
    assert!(!g.is_spent());
}

#[test]
fn burst_with_empty_palette_still_emits() {
    let g = ParticleGroup::burst((10.0, 10.0), &[]);
    assert_eq!(g.len(), SPARK_COUNT);
}

#[test]
fn group_is_spent_after_lifetime() {
    let mut g = ParticleGroup::burst((10.0, 10.0), &[Rgb::WHITE]);
    for _ in 0..SPARK_LIFETIME - 1 {
        g.update();
    }
    assert!(!g.is_spent());
    g.update();
    assert!(g.is_spent());
}

#[test]
fn sparks_draw_near_impact() {
    let mut g = ParticleGroup::burst((10.0, 10.0), &[Rgb::WHITE]);
    g.update();
    let mut s = Surface::new(20, 20);
    g.draw(&mut s);
    assert!(s.opaque_cells() > 0);
    assert!(s.opaque_cells() <= SPARK_COUNT);
}

#[test]
fn particle_dies_when_life_runs_out() {
    let mut p = Particle {
        pos: (1.0, 1.0),
        vel: (1.0, 0.0),
        color: Rgb::WHITE,
        life: 1,
        max_life: 4,
    };
    assert!(p.is_alive());
    p.update();
    assert_eq!(p.pos, (2.0, 1.0));
    assert!(!p.is_alive());
}

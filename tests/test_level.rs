mod common;

use common::*;

use laser_arcade::entities::{Enemy, EnemyKind, Laser, Side, Sprite};
use laser_arcade::events::{EventQueue, GameEvent, Key, MouseButton};
use laser_arcade::screens::{CursorStyle, Level, ScreenKey};

fn player_laser(x: f32, y: f32, damage: f32) -> Laser {
    Laser::new(x, y, 0.0, damage, Side::Player)
}

fn enemy_laser(x: f32, y: f32, damage: f32) -> Laser {
    Laser::new(x, y, 0.0, damage, Side::Enemy)
}

/// A stationary brute whose body spans x 10..13, y 10..12.
fn brute() -> Enemy {
    Enemy::new(EnemyKind::Brute, 10.0, 10.0, 10.0)
}

fn drone() -> Enemy {
    Enemy::new(EnemyKind::Drone, 10.0, 10.0, 10.0)
}

// ── Construction ──────────────────────────────────────────────────────────────

#[test]
fn new_level_starts_clean() {
    let level = Level::new(&ctx());
    let p = level.player().rect();
    assert_eq!(level.score(), 0.0);
    assert_eq!(p.x, WIDTH as f32 / 2.0 - p.w / 2.0);
    assert_eq!(p.y, HEIGHT as f32 - 2.0 * p.h);
    assert!(level.particle_groups().is_empty());
    assert!(!level.is_paused());
    assert_eq!(level.cursor(), CursorStyle::Crosshair);
    assert_eq!(level.hud().len(), 2);
    assert_eq!(level.hud().refreshes(), 1);
}

// ── Player lasers vs enemies ──────────────────────────────────────────────────

#[test]
fn laser_hit_damages_enemy_and_spawns_one_explosion() {
    let mut s = scripted_level(vec![brute()]);
    s.level.player_mut().lasers_mut().push(player_laser(11.0, 10.5, 25.0));
    s.level.player_mut().lasers_mut().push(player_laser(60.0, 5.0, 25.0));

    let mut q = EventQueue::new();
    s.level.update(&mut q);

    assert_eq!(s.level.enemies()[0].health(), 75.0);
    let remaining = s.level.player().lasers();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].rect.x, 60.0);
    assert_eq!(s.level.particle_groups().len(), 1);
    assert_eq!(s.level.score(), 0.0);
    assert!(q.is_empty());
}

#[test]
fn each_hit_spawns_its_own_explosion() {
    let mut s = scripted_level(vec![brute()]);
    for _ in 0..3 {
        s.level.player_mut().lasers_mut().push(player_laser(11.0, 10.5, 10.0));
    }
    s.level.update(&mut EventQueue::new());
    assert_eq!(s.level.enemies()[0].health(), 70.0);
    assert!(s.level.player().lasers().is_empty());
    assert_eq!(s.level.particle_groups().len(), 3);
}

#[test]
fn score_added_once_when_enemy_starts_dying() {
    let mut s = scripted_level(vec![drone()]);
    // Two lasers kill the 50 hp drone, the third overkills in the same frame
    for _ in 0..3 {
        s.level.player_mut().lasers_mut().push(player_laser(11.0, 10.5, 25.0));
    }
    let mut q = EventQueue::new();
    s.level.update(&mut q);
    assert_eq!(s.level.score(), 100.0);
    assert!(s.level.enemies()[0].is_dying());

    // Later lasers pass through a dying enemy and never re-score
    s.level.player_mut().lasers_mut().push(player_laser(11.0, 10.5, 25.0));
    s.level.update(&mut q);
    assert_eq!(s.level.score(), 100.0);
    assert_eq!(s.level.player().lasers().len(), 1);
}

#[test]
fn score_shows_on_hud_after_kill() {
    let mut s = scripted_level(vec![brute()]);
    let before = s.level.hud().refreshes();
    s.level.player_mut().lasers_mut().push(player_laser(11.0, 10.5, 100.0));
    s.level.update(&mut EventQueue::new());
    assert_eq!(s.level.hud().refreshes(), before + 1);
    assert!(s.level.surface().contains_text("250"));
}

#[test]
fn missing_laser_leaves_enemy_untouched() {
    let mut s = scripted_level(vec![brute()]);
    s.level.player_mut().lasers_mut().push(player_laser(13.0, 10.5, 25.0)); // touches edge only
    s.level.update(&mut EventQueue::new());
    assert_eq!(s.level.enemies()[0].health(), 100.0);
    assert_eq!(s.level.player().lasers().len(), 1);
    assert!(s.level.particle_groups().is_empty());
}

// ── Enemy lasers vs player ────────────────────────────────────────────────────

fn laser_on_player(level: &Level, damage: f32) -> Laser {
    let p = level.player().rect();
    enemy_laser(p.x + 0.5, p.y + 0.5, damage)
}

#[test]
fn enemy_laser_damages_player_and_refreshes_hud() {
    let mut s = scripted_level(vec![brute()]);
    let laser = laser_on_player(&s.level, 10.0);
    s.level.level_state_mut().group_mut()[0].lasers_mut().push(laser);
    let before = s.level.hud().refreshes();

    let mut q = EventQueue::new();
    s.level.update(&mut q);

    assert_eq!(s.level.player().health(), 90.0);
    assert!(s.level.enemies()[0].lasers().is_empty());
    assert_eq!(s.level.hud().refreshes(), before + 1);
    assert_eq!(s.level.stats().health_fraction, 0.9);
    assert!(q.is_empty());
}

#[test]
fn dying_enemy_lasers_still_hit() {
    let mut enemy = drone();
    enemy.take_damage(100.0);
    let mut s = scripted_level(vec![enemy]);
    let laser = laser_on_player(&s.level, 10.0);
    s.level.level_state_mut().group_mut()[0].lasers_mut().push(laser);
    s.level.update(&mut EventQueue::new());
    assert_eq!(s.level.player().health(), 90.0);
}

#[test]
fn player_death_posts_single_game_over_and_short_circuits() {
    let mut s = scripted_level(vec![brute()]);
    for _ in 0..12 {
        let laser = laser_on_player(&s.level, 10.0);
        s.level.level_state_mut().group_mut()[0].lasers_mut().push(laser);
    }
    // Held fire and a moving laser would both show up if sprites updated
    s.level.check_events(&GameEvent::KeyDown(Key::Space), &mut EventQueue::new());
    s.level
        .player_mut()
        .lasers_mut()
        .push(Laser::new(50.0, 20.0, -1.0, 25.0, Side::Player));

    let mut q = EventQueue::new();
    s.level.update(&mut q);

    let events: Vec<_> = q.iter().cloned().collect();
    assert_eq!(
        events,
        vec![GameEvent::ChangeScreen { next_screen: ScreenKey::GameOver }]
    );
    assert!(s.level.player().health() <= 0.0);
    let lasers = s.level.player().lasers();
    assert_eq!(lasers.len(), 1);
    assert_eq!(lasers[0].rect.y, 20.0);
    assert_eq!(s.level.stats().health_fraction, 0.0);

    // Later frames never signal again
    s.level.update(&mut q);
    s.level.update(&mut q);
    assert_eq!(q.len(), 1);
}

// ── Dying & removal ───────────────────────────────────────────────────────────

#[test]
fn dying_enemy_stays_until_particles_fade() {
    let mut s = scripted_level(vec![brute()]);
    s.level.player_mut().lasers_mut().push(player_laser(11.0, 10.5, 500.0));
    let mut q = EventQueue::new();

    let mut frames = 0;
    loop {
        s.level.update(&mut q);
        frames += 1;
        match s.level.enemies().first() {
            Some(enemy) => {
                assert!(enemy.is_dying());
                assert!(enemy.has_visible_particles());
            }
            None => break,
        }
        assert!(frames < 100, "dying enemy was never removed");
    }
    assert!(frames > 1);
}

#[test]
fn dying_particles_render_instead_of_sprite() {
    let mut s = scripted_level(vec![brute()]);
    s.level.update(&mut EventQueue::new());
    assert!(s.level.surface().contains_text("(◉)"));

    s.level.player_mut().lasers_mut().push(player_laser(11.0, 10.5, 500.0));
    s.level.update(&mut EventQueue::new());
    assert!(!s.level.surface().contains_text("(◉)"));
    assert!(s.level.surface().contains_text("●"));
}

// ── Laser culling ─────────────────────────────────────────────────────────────

#[test]
fn lasers_outside_vertical_bounds_are_culled() {
    let mut s = scripted_level(Vec::new());
    let h = HEIGHT as f32;
    for y in [-1.0, -5.0, h, h + 3.0] {
        s.level.player_mut().lasers_mut().push(player_laser(5.0, y, 1.0));
    }
    s.level.player_mut().lasers_mut().push(player_laser(5.0, -0.5, 1.0));
    s.level.player_mut().lasers_mut().push(player_laser(6.0, h - 1.0, 1.0));

    s.level.update(&mut EventQueue::new());

    let ys: Vec<f32> = s.level.player().lasers().iter().map(|l| l.rect.y).collect();
    assert_eq!(ys, vec![-0.5, h - 1.0]);
}

#[test]
fn enemy_lasers_are_culled_too() {
    let mut s = scripted_level(vec![brute()]);
    s.level.level_state_mut().group_mut()[0]
        .lasers_mut()
        .push(enemy_laser(5.0, HEIGHT as f32 + 1.0, 1.0));
    s.level.update(&mut EventQueue::new());
    assert!(s.level.enemies()[0].lasers().is_empty());
}

// ── Particle groups ───────────────────────────────────────────────────────────

#[test]
fn spent_particle_groups_are_dropped() {
    let mut s = scripted_level(vec![brute()]);
    s.level.player_mut().lasers_mut().push(player_laser(11.0, 10.5, 1.0));
    let mut q = EventQueue::new();
    s.level.update(&mut q);
    assert_eq!(s.level.particle_groups().len(), 1);
    for _ in 0..laser_arcade::particles::SPARK_LIFETIME {
        s.level.update(&mut q);
    }
    assert!(s.level.particle_groups().is_empty());
}

// ── Events & pause ────────────────────────────────────────────────────────────

#[test]
fn escape_posts_pause_instead_of_pausing() {
    let mut s = scripted_level(Vec::new());
    let mut q = EventQueue::new();
    s.level.check_events(&GameEvent::KeyDown(Key::Escape), &mut q);
    assert!(!s.level.is_paused());
    assert_eq!(q.take_pending(), vec![GameEvent::Pause]);

    s.level.check_events(&GameEvent::Pause, &mut q);
    assert!(s.level.is_paused());
    assert!(s.level.level_state().is_paused());
    assert_eq!(s.level.cursor(), CursorStyle::Pointer);

    s.level.check_events(&GameEvent::Pause, &mut q);
    assert!(!s.level.is_paused());
    assert!(!s.level.level_state().is_paused());
    assert_eq!(s.level.cursor(), CursorStyle::Crosshair);
}

#[test]
fn unrouted_events_reach_level_state() {
    let mut s = scripted_level(Vec::new());
    let mut q = EventQueue::new();
    let motion = GameEvent::MouseMotion { pos: (3.0, 4.0) };
    s.level.check_events(&motion, &mut q);
    s.level.check_events(&GameEvent::KeyDown(Key::Left), &mut q);
    assert_eq!(*s.seen.borrow(), vec![motion]);
}

#[test]
fn pause_signal_reaches_level_state_before_toggling() {
    let mut s = scripted_level(Vec::new());
    let mut q = EventQueue::new();
    s.level.check_events(&GameEvent::Pause, &mut q);
    assert_eq!(*s.seen.borrow(), vec![GameEvent::Pause]);
    assert!(s.level.is_paused());
    assert!(s.level.level_state().is_paused());
}

#[test]
fn pause_freezes_level_state_and_sprites() {
    let mut s = scripted_level(vec![brute()]);
    let mut q = EventQueue::new();
    s.level.update(&mut q);
    assert_eq!(*s.updates.borrow(), 1);

    s.level.check_events(&GameEvent::Pause, &mut q);
    s.level
        .player_mut()
        .lasers_mut()
        .push(Laser::new(50.0, 20.0, -1.0, 1.0, Side::Player));
    for _ in 0..5 {
        s.level.update(&mut q);
    }
    assert_eq!(*s.updates.borrow(), 1);
    assert_eq!(s.level.player().lasers()[0].rect.y, 20.0);
    assert!(s.level.surface().contains_text("PAUSED"));
}

#[test]
fn presses_while_paused_are_ignored_by_player() {
    let mut s = scripted_level(Vec::new());
    let mut q = EventQueue::new();
    s.level.check_events(&GameEvent::Pause, &mut q);
    let x0 = s.level.player().rect().x;

    s.level.check_events(&GameEvent::KeyDown(Key::Space), &mut q);
    s.level.check_events(&GameEvent::KeyDown(Key::Right), &mut q);
    s.level.check_events(&GameEvent::MouseDown { pos: (0.0, 0.0), button: MouseButton::Left }, &mut q);
    assert!(!s.level.player().is_firing());

    // Escape on the pause menu asks to resume
    s.level.check_events(&GameEvent::KeyDown(Key::Escape), &mut q);
    assert_eq!(q.take_pending(), vec![GameEvent::Pause]);
    s.level.check_events(&GameEvent::Pause, &mut q);

    s.level.update(&mut q);
    assert_eq!(s.level.player().rect().x, x0);
    assert!(s.level.player().lasers().is_empty());
}

#[test]
fn releases_while_paused_clear_held_input() {
    let mut s = scripted_level(Vec::new());
    let mut q = EventQueue::new();
    s.level.check_events(&GameEvent::KeyDown(Key::Space), &mut q);
    s.level.check_events(&GameEvent::KeyDown(Key::Right), &mut q);
    s.level.check_events(&GameEvent::MouseDown { pos: (0.0, 0.0), button: MouseButton::Left }, &mut q);
    assert!(s.level.player().is_firing());

    s.level.check_events(&GameEvent::Pause, &mut q);
    s.level.check_events(&GameEvent::KeyUp(Key::Space), &mut q);
    s.level.check_events(&GameEvent::KeyUp(Key::Right), &mut q);
    s.level.check_events(&GameEvent::MouseUp { pos: (0.0, 0.0), button: MouseButton::Left }, &mut q);
    assert!(!s.level.player().is_firing());
    assert!(q.is_empty());

    s.level.check_events(&GameEvent::Pause, &mut q);
    let x0 = s.level.player().rect().x;
    s.level.update(&mut q);
    assert_eq!(s.level.player().rect().x, x0);
    assert!(s.level.player().lasers().is_empty());
}

#[test]
fn pause_menu_buttons_post_signals() {
    let mut s = scripted_level(Vec::new());
    let mut q = EventQueue::new();
    s.level.check_events(&GameEvent::Pause, &mut q);
    let menu = s.level.pause_menu().menu();
    let resume = menu.button_center(laser_arcade::screens::menu::ButtonKey::Resume).unwrap();
    let main = menu.button_center(laser_arcade::screens::menu::ButtonKey::MainMenu).unwrap();

    for pos in [resume, main] {
        s.level.check_events(&GameEvent::MouseDown { pos, button: MouseButton::Left }, &mut q);
        s.level.check_events(&GameEvent::MouseUp { pos, button: MouseButton::Left }, &mut q);
    }
    assert_eq!(
        q.take_pending(),
        vec![
            GameEvent::Pause,
            GameEvent::ChangeScreen { next_screen: ScreenKey::MainMenu }
        ]
    );
}

#[test]
fn pause_then_unpause_matches_uninterrupted_run() {
    let mut straight = Level::new(&ctx());
    let mut interrupted = Level::new(&ctx());
    let mut q = EventQueue::new();

    for _ in 0..150 {
        straight.update(&mut q);
    }

    for _ in 0..60 {
        interrupted.update(&mut q);
    }
    interrupted.check_events(&GameEvent::Pause, &mut q);
    for _ in 0..25 {
        interrupted.update(&mut q);
    }
    interrupted.check_events(&GameEvent::Pause, &mut q);
    for _ in 0..90 {
        interrupted.update(&mut q);
    }

    let positions = |level: &Level| -> Vec<(f32, f32)> {
        level.enemies().iter().map(|e| (e.rect().x, e.rect().y)).collect()
    };
    assert!(!straight.enemies().is_empty());
    assert_eq!(positions(&straight), positions(&interrupted));
    assert_eq!(straight.player().health(), interrupted.player().health());
}

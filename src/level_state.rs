//! Level content: who spawns, when, and how enemies behave.
//!
//! The `Level` orchestrator only needs the `LevelState` contract; `LevelOne`
//! is the stock wave script.

use rand::rngs::StdRng;
use rand::Rng;

use crate::entities::{Enemy, EnemyKind, Sprite};
use crate::events::GameEvent;

pub trait LevelState {
    /// Advance enemy AI one frame, steering toward `player_x`.
    /// Does nothing while paused.
    fn update(&mut self, player_x: f32);
    /// Events the level did not route elsewhere.
    fn check_events(&mut self, event: &GameEvent);
    fn pause(&mut self);
    fn unpause(&mut self);
    fn is_paused(&self) -> bool;
    fn group(&self) -> &[Enemy];
    fn group_mut(&mut self) -> &mut Vec<Enemy>;
}

// ── LevelOne ─────────────────────────────────────────────────────────────────

/// Frames between spawns.
pub const SPAWN_INTERVAL: u32 = 90;
/// Spawning pauses while this many enemies are in the group.
pub const MAX_ENEMIES: usize = 6;
const FIRST_SPAWN_DELAY: u32 = 30;

pub struct LevelOne {
    group: Vec<Enemy>,
    paused: bool,
    spawn_timer: u32,
    frame: u64,
    width: f32,
    height: f32,
    rng: StdRng,
}

impl LevelOne {
    pub fn new(width: f32, height: f32, rng: StdRng) -> Self {
        Self {
            group: Vec::new(),
            paused: false,
            spawn_timer: FIRST_SPAWN_DELAY,
            frame: 0,
            width,
            height,
            rng,
        }
    }

    /// Frames simulated so far (paused frames are not counted).
    pub fn frame(&self) -> u64 {
        self.frame
    }

    fn spawn(&mut self) {
        let kind = if self.rng.gen_bool(0.7) {
            EnemyKind::Drone
        } else {
            EnemyKind::Brute
        };
        let art_w = kind.art().width();
        let x = self.rng.gen_range(0.0..(self.width - art_w).max(1.0));
        let hover_y = self
            .rng
            .gen_range(3.0..(self.height / 3.0).max(4.0))
            .floor();
        log::debug!("spawning {:?} at x={:.1}, hover row {}", kind, x, hover_y);
        self.group.push(Enemy::new(kind, x, -2.0, hover_y));
    }
}

impl LevelState for LevelOne {
    fn update(&mut self, player_x: f32) {
        if self.paused {
            return;
        }
        self.frame += 1;

        self.spawn_timer = self.spawn_timer.saturating_sub(1);
        if self.spawn_timer == 0 {
            let alive = self.group.iter().filter(|e| e.is_alive()).count();
            if alive < MAX_ENEMIES {
                self.spawn();
            }
            self.spawn_timer = SPAWN_INTERVAL;
        }

        for enemy in &mut self.group {
            if enemy.is_alive() {
                enemy.update(player_x);
            } else if enemy.is_dying() {
                enemy.update_particles();
            }
        }
    }

    fn check_events(&mut self, event: &GameEvent) {
        log::trace!("level one ignoring {:?}", event);
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn unpause(&mut self) {
        self.paused = false;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn group(&self) -> &[Enemy] {
        &self.group
    }

    fn group_mut(&mut self) -> &mut Vec<Enemy> {
        &mut self.group
    }
}

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use laser_arcade::audio::Audio;
use laser_arcade::entities::{Enemy, Sprite};
use laser_arcade::events::GameEvent;
use laser_arcade::level_state::LevelState;
use laser_arcade::screens::{Context, Level};

pub const WIDTH: u16 = 80;
pub const HEIGHT: u16 = 40;

pub fn ctx() -> Context {
    Context::new(WIDTH, HEIGHT).with_seed(Some(7))
}

/// Level content with a fixed group: enemies never move or shoot unless
/// `ai` is on, but dying enemies still fade.
pub struct ScriptedLevel {
    pub group: Vec<Enemy>,
    pub paused: bool,
    pub ai: bool,
    pub updates: Rc<RefCell<u32>>,
    pub seen: Rc<RefCell<Vec<GameEvent>>>,
}

impl LevelState for ScriptedLevel {
    fn update(&mut self, player_x: f32) {
        if self.paused {
            return;
        }
        *self.updates.borrow_mut() += 1;
        for enemy in &mut self.group {
            if enemy.is_alive() {
                if self.ai {
                    enemy.update(player_x);
                }
            } else if enemy.is_dying() {
                enemy.update_particles();
            }
        }
    }

    fn check_events(&mut self, event: &GameEvent) {
        self.seen.borrow_mut().push(event.clone());
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

pub struct Scripted {
    pub level: Level,
    pub updates: Rc<RefCell<u32>>,
    pub seen: Rc<RefCell<Vec<GameEvent>>>,
}

pub fn scripted_level(group: Vec<Enemy>) -> Scripted {
    let updates = Rc::new(RefCell::new(0));
    let seen = Rc::new(RefCell::new(Vec::new()));
    let state = ScriptedLevel {
        group,
        paused: false,
        ai: false,
        updates: updates.clone(),
        seen: seen.clone(),
    };
    Scripted {
        level: Level::with_state(&ctx(), Box::new(state)),
        updates,
        seen,
    }
}

/// Audio backend that remembers every request.
#[derive(Default)]
pub struct RecordingAudio {
    pub calls: RefCell<Vec<String>>,
}

impl Audio for RecordingAudio {
    fn play_looping(&self, name: &str, _volume: f32) {
        self.calls.borrow_mut().push(format!("play {}", name));
    }

    fn stop(&self, name: &str) {
        self.calls.borrow_mut().push(format!("stop {}", name));
    }
}

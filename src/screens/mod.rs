//! Top-level game modes and the fixed registry that builds them.

pub mod level;
pub mod menu;

use std::rc::Rc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::audio::{Audio, SilentAudio};
use crate::events::{EventQueue, GameEvent};
use crate::surface::Surface;

pub use level::{Level, LevelStats};
pub use menu::{GameOver, MainMenu, PauseMenu};

/// Every screen the controller can switch to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreenKey {
    MainMenu,
    Level,
    GameOver,
    PauseMenu,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorStyle {
    Crosshair,
    Pointer,
}

/// What every screen constructor gets to see.
#[derive(Clone)]
pub struct Context {
    pub width: u16,
    pub height: u16,
    pub audio: Rc<dyn Audio>,
    pub music_volume: f32,
    pub seed: Option<u64>,
}

impl Context {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            audio: Rc::new(SilentAudio),
            music_volume: 0.1,
            seed: None,
        }
    }

    pub fn with_audio(mut self, audio: Rc<dyn Audio>) -> Self {
        self.audio = audio;
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_music_volume(mut self, volume: f32) -> Self {
        self.music_volume = volume;
        self
    }

    /// Seeded when a seed was configured, otherwise from OS entropy.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// Build a fresh screen for `key`.
pub fn build(key: ScreenKey, ctx: &Context) -> Screen {
    match key {
        ScreenKey::MainMenu => Screen::MainMenu(MainMenu::new(ctx)),
        ScreenKey::Level => Screen::Level(Box::new(Level::new(ctx))),
        ScreenKey::GameOver => Screen::GameOver(GameOver::new(ctx)),
        ScreenKey::PauseMenu => Screen::PauseMenu(PauseMenu::new(ctx)),
    }
}

pub enum Screen {
    MainMenu(MainMenu),
    Level(Box<Level>),
    GameOver(GameOver),
    PauseMenu(PauseMenu),
}

impl Screen {
    pub fn key(&self) -> ScreenKey {
        match self {
            Screen::MainMenu(_) => ScreenKey::MainMenu,
            Screen::Level(_) => ScreenKey::Level,
            Screen::GameOver(_) => ScreenKey::GameOver,
            Screen::PauseMenu(_) => ScreenKey::PauseMenu,
        }
    }

    pub fn check_events(&mut self, event: &GameEvent, queue: &mut EventQueue) {
        match self {
            Screen::MainMenu(s) => s.check_events(event, queue),
            Screen::Level(s) => s.check_events(event, queue),
            Screen::GameOver(s) => s.check_events(event, queue),
            Screen::PauseMenu(s) => s.check_events(event, queue),
        }
    }

    pub fn update(&mut self, queue: &mut EventQueue) {
        match self {
            Screen::MainMenu(s) => s.update(),
            Screen::Level(s) => s.update(queue),
            Screen::GameOver(s) => s.update(),
            Screen::PauseMenu(s) => s.update(),
        }
    }

    pub fn surface(&self) -> &Surface {
        match self {
            Screen::MainMenu(s) => s.surface(),
            Screen::Level(s) => s.surface(),
            Screen::GameOver(s) => s.surface(),
            Screen::PauseMenu(s) => s.surface(),
        }
    }

    pub fn position(&self) -> (i32, i32) {
        match self {
            Screen::MainMenu(s) => s.position(),
            Screen::Level(s) => s.position(),
            Screen::GameOver(s) => s.position(),
            Screen::PauseMenu(s) => s.position(),
        }
    }

    pub fn cursor(&self) -> CursorStyle {
        match self {
            Screen::Level(s) => s.cursor(),
            _ => CursorStyle::Pointer,
        }
    }

    pub fn as_level(&self) -> Option<&Level> {
        match self {
            Screen::Level(s) => Some(&**s),
            _ => None,
        }
    }

    pub fn as_level_mut(&mut self) -> Option<&mut Level> {
        match self {
            Screen::Level(s) => Some(&mut **s),
            _ => None,
        }
    }
}

//! Built-in sprite art, palettes and HUD widget constructors.
//!
//! Stands in for an asset loader: the core only ever asks this module for
//! ready-made art, colours and widgets.

use crate::geometry::Rgb;
use crate::hud::{ProgressBar, TextSurface};
use crate::screens::level::LevelStats;

// ── Sprite art ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpriteArt {
    pub lines: &'static [&'static str],
    pub color: Rgb,
}

impl SpriteArt {
    pub fn width(&self) -> f32 {
        self.lines
            .iter()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0) as f32
    }

    pub fn height(&self) -> f32 {
        self.lines.len() as f32
    }
}

//   ▲      tip
//  /█\     wings + fuselage
pub const PLAYER_ART: SpriteArt = SpriteArt {
    lines: &[" ▲ ", "/█\\"],
    color: Rgb(230, 230, 240),
};

pub const DRONE_ART: SpriteArt = SpriteArt {
    lines: &["<▼>", "[_]"],
    color: Rgb(40, 220, 90),
};

pub const BRUTE_ART: SpriteArt = SpriteArt {
    lines: &["(◉)", "\\-/"],
    color: Rgb(220, 50, 60),
};

// ── Palettes ─────────────────────────────────────────────────────────────────

pub const PLAYER_PALETTE: &[Rgb] = &[Rgb(230, 230, 240), Rgb(120, 200, 255), Rgb(255, 220, 120)];
pub const DRONE_PALETTE: &[Rgb] = &[Rgb(40, 220, 90), Rgb(150, 255, 150), Rgb(20, 120, 50)];
pub const BRUTE_PALETTE: &[Rgb] = &[Rgb(220, 50, 60), Rgb(255, 140, 60), Rgb(255, 220, 80)];

pub const PLAYER_LASER_COLOR: Rgb = Rgb(80, 220, 255);
pub const ENEMY_LASER_COLOR: Rgb = Rgb(255, 60, 200);

pub const HEALTH_BAR_COLOR: Rgb = Rgb(210, 20, 40);
pub const SCORE_COLOR: Rgb = Rgb(255, 215, 0);
pub const TITLE_COLOR: Rgb = Rgb(0, 200, 255);
pub const BUTTON_COLOR: Rgb = Rgb(200, 200, 200);
pub const BUTTON_PRESSED_COLOR: Rgb = Rgb(255, 255, 0);

// ── Sounds ───────────────────────────────────────────────────────────────────

pub const MAIN_MENU_THEME: &str = "main_menu_theme";

// ── HUD widgets ──────────────────────────────────────────────────────────────

/// Player health bar anchored to the top-left corner.
pub fn health_bar() -> ProgressBar<LevelStats> {
    ProgressBar::new((2, 1), (20, 1), HEALTH_BAR_COLOR, |s: &LevelStats| {
        s.health_fraction
    })
}

/// Integer score anchored near the top-right corner of a `width`-wide
/// screen.
pub fn score_text(width: u16) -> TextSurface<LevelStats> {
    let x = width.saturating_sub(14);
    TextSurface::new((x, 1), SCORE_COLOR, |s: &LevelStats| {
        format!("{}", s.score as i64)
    })
}

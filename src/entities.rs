//! Sprite entities: the player, enemies, their lasers and the colour
//! particles they break into while dying.
//!
//! Shared behaviour (health, lasers, dying, particle rendering) lives on the
//! `Sprite` trait; each concrete entity only supplies its `Body` and art.

use crate::assets::{self, SpriteArt};
use crate::events::{Key, MouseButton};
use crate::geometry::{Rect, Rgb};
use crate::particles::ParticleGroup;
use crate::surface::Surface;

/// A dying entity is removed once none of its particles is brighter than
/// this.
pub const VISIBILITY_THRESHOLD: f32 = 20.0;

// ── Lasers ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Player,
    Enemy,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Laser {
    pub rect: Rect,
    /// Rows per frame; negative travels up the screen.
    pub vy: f32,
    pub damage: f32,
    pub side: Side,
}

impl Laser {
    pub fn new(x: f32, y: f32, vy: f32, damage: f32, side: Side) -> Self {
        Self {
            rect: Rect::new(x, y, 1.0, 1.0),
            vy,
            damage,
            side,
        }
    }

    pub fn update(&mut self) {
        self.rect.y += self.vy;
    }

    pub fn position(&self) -> (f32, f32) {
        (self.rect.center_x(), self.rect.center_y())
    }

    /// Visible while strictly between one laser-height above the top edge
    /// and the bottom edge.
    pub fn in_vertical_bounds(&self, height: f32) -> bool {
        -self.rect.h < self.rect.y && self.rect.y < height
    }

    pub fn draw(&self, surface: &mut Surface) {
        let (glyph, color) = match self.side {
            Side::Player => ('║', assets::PLAYER_LASER_COLOR),
            Side::Enemy => ('↓', assets::ENEMY_LASER_COLOR),
        };
        surface.put_char(
            self.rect.x.floor() as i32,
            self.rect.y.floor() as i32,
            glyph,
            color,
        );
    }
}

// ── Dying particles ──────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct ColorParticle {
    pub positions: Vec<(f32, f32)>,
    velocities: Vec<(f32, f32)>,
    pub color: Rgb,
    pub radius: f32,
    pub alpha: f32,
    /// Alpha lost per frame.
    pub decay: f32,
}

impl ColorParticle {
    /// A ring of `count` points expanding from `center`.
    pub fn ring(center: (f32, f32), count: usize, speed: f32, color: Rgb, decay: f32) -> Self {
        let (positions, velocities) = (0..count)
            .map(|i| {
                let angle = i as f32 / count as f32 * std::f32::consts::TAU;
                (center, (angle.cos() * speed, angle.sin() * speed * 0.5))
            })
            .unzip();
        Self {
            positions,
            velocities,
            color,
            radius: 0.5,
            alpha: 255.0,
            decay,
        }
    }

    pub fn update(&mut self) {
        for (pos, vel) in self.positions.iter_mut().zip(&self.velocities) {
            pos.0 += vel.0;
            pos.1 += vel.1;
        }
        self.alpha = (self.alpha - self.decay).max(0.0);
    }

    pub fn is_visible(&self) -> bool {
        self.alpha > VISIBILITY_THRESHOLD
    }

    pub fn draw(&self, surface: &mut Surface) {
        let color = self.color.faded(self.alpha);
        for &pos in &self.positions {
            surface.draw_circle(pos, self.radius, color);
        }
    }
}

/// Break-up effect spawned when an entity starts dying.
fn death_particles(rect: &Rect, palette: &[Rgb]) -> Vec<ColorParticle> {
    let center = (rect.center_x(), rect.center_y());
    [(6, 0.35, 14.0), (8, 0.6, 18.0), (10, 0.9, 24.0)]
        .iter()
        .enumerate()
        .map(|(i, &(count, speed, decay))| {
            let color = palette.get(i % palette.len().max(1)).copied().unwrap_or(Rgb::WHITE);
            ColorParticle::ring(center, count, speed, color, decay)
        })
        .collect()
}

// ── Shared sprite state ──────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Body {
    pub rect: Rect,
    pub health: f32,
    pub max_health: f32,
    pub dying: bool,
    pub lasers: Vec<Laser>,
    pub color_particles: Vec<ColorParticle>,
    palette: &'static [Rgb],
}

impl Body {
    pub fn new(rect: Rect, health: f32, palette: &'static [Rgb]) -> Self {
        Self {
            rect,
            health,
            max_health: health,
            dying: false,
            lasers: Vec::new(),
            color_particles: Vec::new(),
            palette,
        }
    }
}

/// Capabilities every on-screen entity shares.
pub trait Sprite {
    fn body(&self) -> &Body;
    fn body_mut(&mut self) -> &mut Body;
    fn art(&self) -> &SpriteArt;

    fn rect(&self) -> Rect {
        self.body().rect
    }

    fn set_position(&mut self, x: f32, y: f32) {
        let rect = &mut self.body_mut().rect;
        rect.x = x;
        rect.y = y;
    }

    fn health(&self) -> f32 {
        self.body().health
    }

    fn is_alive(&self) -> bool {
        self.body().health > 0.0
    }

    fn is_dying(&self) -> bool {
        self.body().dying
    }

    fn colors(&self) -> &'static [Rgb] {
        self.body().palette
    }

    fn lasers(&self) -> &[Laser] {
        &self.body().lasers
    }

    fn lasers_mut(&mut self) -> &mut Vec<Laser> {
        &mut self.body_mut().lasers
    }

    fn color_particles(&self) -> &[ColorParticle] {
        &self.body().color_particles
    }

    /// Subtract `amount` from health. Returns `true` only on the call that
    /// moves the entity from alive into dying.
    fn take_damage(&mut self, amount: f32) -> bool {
        let body = self.body_mut();
        body.health -= amount;
        if body.health <= 0.0 && !body.dying {
            body.dying = true;
            body.color_particles = death_particles(&body.rect, body.palette);
            return true;
        }
        false
    }

    /// Per-frame work while dying: fade the break-up particles and let
    /// lasers already in flight keep travelling.
    fn update_particles(&mut self) {
        let body = self.body_mut();
        for p in &mut body.color_particles {
            p.update();
        }
        for laser in &mut body.lasers {
            laser.update();
        }
    }

    fn has_visible_particles(&self) -> bool {
        self.color_particles().iter().any(ColorParticle::is_visible)
    }

    /// Dying and fully faded: ready to leave its group.
    fn is_faded(&self) -> bool {
        self.is_dying() && !self.has_visible_particles()
    }

    fn draw(&self, surface: &mut Surface) {
        let rect = self.rect();
        let art = self.art();
        for (dy, line) in art.lines.iter().enumerate() {
            for (dx, ch) in line.chars().enumerate() {
                if ch != ' ' {
                    surface.put_char(
                        rect.x.round() as i32 + dx as i32,
                        rect.y.round() as i32 + dy as i32,
                        ch,
                        art.color,
                    );
                }
            }
        }
    }

    /// Draw only the particles still above the visibility threshold.
    /// Returns whether anything was drawn.
    fn draw_particles(&self, surface: &mut Surface) -> bool {
        let mut visible = false;
        for p in self.color_particles().iter().filter(|p| p.is_visible()) {
            visible = true;
            p.draw(surface);
        }
        visible
    }
}

// ── Player ───────────────────────────────────────────────────────────────────

pub const PLAYER_HEALTH: f32 = 100.0;
pub const PLAYER_SPEED: f32 = 1.0;
pub const PLAYER_FIRE_COOLDOWN: u32 = 6;
pub const PLAYER_LASER_SPEED: f32 = -1.0;
pub const PLAYER_LASER_DAMAGE: f32 = 25.0;

#[derive(Clone, Debug, Default)]
struct HeldInput {
    left: bool,
    right: bool,
    fire_key: bool,
    fire_mouse: bool,
}

#[derive(Clone, Debug)]
pub struct Player {
    body: Body,
    held: HeldInput,
    cooldown: u32,
    bounds: (f32, f32),
}

impl Player {
    /// A player confined to a `width` × `height` play field, placed at the
    /// origin until positioned.
    pub fn new(width: f32, height: f32) -> Self {
        let art = &assets::PLAYER_ART;
        let rect = Rect::new(0.0, 0.0, art.width(), art.height());
        Self {
            body: Body::new(rect, PLAYER_HEALTH, assets::PLAYER_PALETTE),
            held: HeldInput::default(),
            cooldown: 0,
            bounds: (width, height),
        }
    }

    /// Health as a fraction of the starting value, floored at zero.
    pub fn health_fraction(&self) -> f32 {
        (self.body.health / self.body.max_health).clamp(0.0, 1.0)
    }

    pub fn is_firing(&self) -> bool {
        self.held.fire_key || self.held.fire_mouse
    }

    pub fn keydown_handler(&mut self, key: Key) {
        match key {
            Key::Left | Key::Char('a') | Key::Char('A') => self.held.left = true,
            Key::Right | Key::Char('d') | Key::Char('D') => self.held.right = true,
            Key::Space => self.held.fire_key = true,
            _ => {}
        }
    }

    pub fn keyup_handler(&mut self, key: Key) {
        match key {
            Key::Left | Key::Char('a') | Key::Char('A') => self.held.left = false,
            Key::Right | Key::Char('d') | Key::Char('D') => self.held.right = false,
            Key::Space => self.held.fire_key = false,
            _ => {}
        }
    }

    pub fn mousedown_handler(&mut self, button: MouseButton) {
        if button == MouseButton::Left {
            self.held.fire_mouse = true;
        }
    }

    pub fn mouseup_handler(&mut self, button: MouseButton) {
        if button == MouseButton::Left {
            self.held.fire_mouse = false;
        }
    }

    /// Move from held input, fire if allowed, advance own lasers.
    pub fn update(&mut self) {
        let dx = match (self.held.left, self.held.right) {
            (true, false) => -PLAYER_SPEED,
            (false, true) => PLAYER_SPEED,
            _ => 0.0,
        };
        let rect = &mut self.body.rect;
        rect.x = (rect.x + dx).clamp(0.0, (self.bounds.0 - rect.w).max(0.0));

        self.cooldown = self.cooldown.saturating_sub(1);
        if self.is_firing() && self.cooldown == 0 {
            self.fire();
        }

        for laser in &mut self.body.lasers {
            laser.update();
        }
    }

    fn fire(&mut self) {
        let rect = self.body.rect;
        self.body.lasers.push(Laser::new(
            rect.center_x().floor(),
            rect.y - 1.0,
            PLAYER_LASER_SPEED,
            PLAYER_LASER_DAMAGE,
            Side::Player,
        ));
        self.cooldown = PLAYER_FIRE_COOLDOWN;
    }

    /// Impact burst for one of this player's lasers hitting a target whose
    /// colours are `palette`.
    pub fn laser_explosion(&self, position: (f32, f32), palette: &[Rgb]) -> ParticleGroup {
        ParticleGroup::burst(position, palette)
    }
}

impl Sprite for Player {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn art(&self) -> &SpriteArt {
        &assets::PLAYER_ART
    }
}

// ── Enemies ──────────────────────────────────────────────────────────────────

pub const ENEMY_LASER_SPEED: f32 = 0.5;
pub const ENEMY_LASER_DAMAGE: f32 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyKind {
    Drone,
    Brute,
}

impl EnemyKind {
    pub fn max_health(&self) -> f32 {
        match self {
            EnemyKind::Drone => 50.0,
            EnemyKind::Brute => 100.0,
        }
    }

    /// Score awarded when an enemy of this kind starts dying.
    pub fn points_value(&self) -> f32 {
        match self {
            EnemyKind::Drone => 100.0,
            EnemyKind::Brute => 250.0,
        }
    }

    /// Columns per frame toward the player.
    pub fn steer_speed(&self) -> f32 {
        match self {
            EnemyKind::Drone => 0.35,
            EnemyKind::Brute => 0.15,
        }
    }

    /// Frames between shots.
    pub fn fire_interval(&self) -> u32 {
        match self {
            EnemyKind::Drone => 45,
            EnemyKind::Brute => 30,
        }
    }

    pub fn art(&self) -> &'static SpriteArt {
        match self {
            EnemyKind::Drone => &assets::DRONE_ART,
            EnemyKind::Brute => &assets::BRUTE_ART,
        }
    }

    pub fn palette(&self) -> &'static [Rgb] {
        match self {
            EnemyKind::Drone => assets::DRONE_PALETTE,
            EnemyKind::Brute => assets::BRUTE_PALETTE,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Enemy {
    body: Body,
    pub kind: EnemyKind,
    /// Row the enemy descends to before holding position.
    pub hover_y: f32,
    cooldown: u32,
}

impl Enemy {
    pub fn new(kind: EnemyKind, x: f32, y: f32, hover_y: f32) -> Self {
        let art = kind.art();
        let rect = Rect::new(x, y, art.width(), art.height());
        Self {
            body: Body::new(rect, kind.max_health(), kind.palette()),
            kind,
            hover_y,
            cooldown: kind.fire_interval(),
        }
    }

    pub fn points_value(&self) -> f32 {
        self.kind.points_value()
    }

    /// One AI step: descend to the hover row, drift toward `player_x`, fire
    /// on cooldown, advance own lasers.
    pub fn update(&mut self, player_x: f32) {
        let speed = self.kind.steer_speed();
        let rect = &mut self.body.rect;
        if rect.y < self.hover_y {
            rect.y = (rect.y + 0.25).min(self.hover_y);
        }
        let dx = player_x - rect.center_x();
        rect.x += dx.clamp(-speed, speed);

        self.cooldown = self.cooldown.saturating_sub(1);
        if self.cooldown == 0 {
            let rect = self.body.rect;
            self.body.lasers.push(Laser::new(
                rect.center_x().floor(),
                rect.bottom(),
                ENEMY_LASER_SPEED,
                ENEMY_LASER_DAMAGE,
                Side::Enemy,
            ));
            self.cooldown = self.kind.fire_interval();
        }

        for laser in &mut self.body.lasers {
            laser.update();
        }
    }
}

impl Sprite for Enemy {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn art(&self) -> &SpriteArt {
        self.kind.art()
    }
}

//! The playable screen: owns the player, the level content, the HUD and
//! every particle effect, and runs update → collide → draw each frame.

use crate::assets;
use crate::entities::{Enemy, Laser, Player, Sprite};
use crate::events::{EventQueue, GameEvent, Key};
use crate::hud::{Hud, Widget};
use crate::level_state::{LevelOne, LevelState};
use crate::particles::ParticleGroup;
use crate::screens::menu::PauseMenu;
use crate::screens::{Context, CursorStyle, ScreenKey};
use crate::surface::Surface;

/// The values HUD widgets read from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LevelStats {
    pub health_fraction: f32,
    pub score: f32,
}

fn stats(player: &Player, score: f32) -> LevelStats {
    LevelStats {
        health_fraction: player.health_fraction(),
        score,
    }
}

pub struct Level {
    width: f32,
    height: f32,
    surface: Surface,
    state: Box<dyn LevelState>,
    player: Player,
    /// Set once the player's break-up particles have faded.
    player_removed: bool,
    hud: Hud<LevelStats>,
    particles: Vec<ParticleGroup>,
    pause_menu: PauseMenu,
    score: f32,
    paused: bool,
    cursor: CursorStyle,
    game_over_posted: bool,
}

impl Level {
    pub fn new(ctx: &Context) -> Self {
        let state = LevelOne::new(ctx.width as f32, ctx.height as f32, ctx.rng());
        Self::with_state(ctx, Box::new(state))
    }

    /// A level driven by custom content.
    pub fn with_state(ctx: &Context, state: Box<dyn LevelState>) -> Self {
        let (width, height) = (ctx.width as f32, ctx.height as f32);
        let mut player = Player::new(width, height);
        let rect = player.rect();
        player.set_position(width / 2.0 - rect.w / 2.0, height - rect.h * 2.0);

        let mut hud = Hud::new((ctx.width, ctx.height));
        let widgets: Vec<Box<dyn Widget<LevelStats>>> = vec![
            Box::new(assets::health_bar()),
            Box::new(assets::score_text(ctx.width)),
        ];
        hud.attach(widgets);
        hud.update(&stats(&player, 0.0));

        log::info!("level started ({}x{})", ctx.width, ctx.height);
        Self {
            width,
            height,
            surface: Surface::new(ctx.width, ctx.height),
            state,
            player,
            player_removed: false,
            hud,
            particles: Vec::new(),
            pause_menu: PauseMenu::new(ctx),
            score: 0.0,
            paused: false,
            cursor: CursorStyle::Crosshair,
            game_over_posted: false,
        }
    }

    // ── Accessors ────────────────────────────────────────────────────────────

    pub fn score(&self) -> f32 {
        self.score
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn cursor(&self) -> CursorStyle {
        self.cursor
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn enemies(&self) -> &[Enemy] {
        self.state.group()
    }

    pub fn level_state(&self) -> &dyn LevelState {
        self.state.as_ref()
    }

    pub fn level_state_mut(&mut self) -> &mut dyn LevelState {
        self.state.as_mut()
    }

    pub fn particle_groups(&self) -> &[ParticleGroup] {
        &self.particles
    }

    pub fn hud(&self) -> &Hud<LevelStats> {
        &self.hud
    }

    pub fn pause_menu(&self) -> &PauseMenu {
        &self.pause_menu
    }

    pub fn stats(&self) -> LevelStats {
        stats(&self.player, self.score)
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn position(&self) -> (i32, i32) {
        (0, 0)
    }

    // ── Frame ────────────────────────────────────────────────────────────────

    /// Advance one frame. While paused the scene is frozen and only the
    /// pause menu is updated and drawn over it.
    pub fn update(&mut self, queue: &mut EventQueue) {
        if self.paused {
            self.pause_menu.update();
            self.draw();
            self.surface
                .blit(self.pause_menu.surface(), self.pause_menu.position());
        } else {
            self.advance(queue);
            self.draw();
        }
    }

    fn advance(&mut self, queue: &mut EventQueue) {
        if self.game_over_posted {
            return;
        }
        self.state.update(self.player.rect().center_x());
        if self.check_collisions(queue) {
            return;
        }

        if self.player.is_alive() {
            self.player.update();
        } else if self.player.is_dying() {
            self.player.update_particles();
        }

        for group in &mut self.particles {
            group.update();
        }
        self.particles.retain(|group| !group.is_spent());
    }

    /// Resolve laser hits. Returns `true` when the player died this frame,
    /// in which case a game-over transition has been posted and the rest of
    /// the frame's updates must be skipped.
    fn check_collisions(&mut self, queue: &mut EventQueue) -> bool {
        for enemy in self.state.group_mut().iter_mut() {
            if enemy.is_alive() {
                let target = enemy.rect();
                let (hits, misses): (Vec<Laser>, Vec<Laser>) =
                    std::mem::take(self.player.lasers_mut())
                        .into_iter()
                        .partition(|laser| laser.rect.intersects(&target));
                *self.player.lasers_mut() = misses;

                for laser in hits {
                    let started_dying = enemy.take_damage(laser.damage);
                    self.particles
                        .push(self.player.laser_explosion(laser.position(), enemy.colors()));
                    if started_dying {
                        self.score += enemy.points_value();
                        log::debug!(
                            "{:?} destroyed, +{} (score {})",
                            enemy.kind,
                            enemy.points_value(),
                            self.score
                        );
                        self.hud.update(&stats(&self.player, self.score));
                    }
                }
            }

            let target = self.player.rect();
            let (hits, misses): (Vec<Laser>, Vec<Laser>) = std::mem::take(enemy.lasers_mut())
                .into_iter()
                .partition(|laser| laser.rect.intersects(&target));
            *enemy.lasers_mut() = misses;
            if hits.is_empty() {
                continue;
            }

            for laser in hits {
                self.player.take_damage(laser.damage);
                if self.player.health() <= 0.0 {
                    self.hud.update(&stats(&self.player, self.score));
                    if !self.game_over_posted {
                        log::info!("player destroyed, final score {}", self.score as i64);
                        queue.post(GameEvent::ChangeScreen {
                            next_screen: ScreenKey::GameOver,
                        });
                        self.game_over_posted = true;
                    }
                    return true;
                }
            }
            self.hud.update(&stats(&self.player, self.score));
        }
        false
    }

    fn draw(&mut self) {
        self.surface.clear();

        if !self.player_removed && draw_sprite(&mut self.surface, &mut self.player, self.height) {
            self.player_removed = true;
        }
        for enemy in self.state.group_mut().iter_mut() {
            draw_sprite(&mut self.surface, enemy, self.height);
        }
        // Removal only once the group is no longer being walked.
        self.state.group_mut().retain(|enemy| !enemy.is_faded());

        for group in &self.particles {
            group.draw(&mut self.surface);
        }

        self.surface.blits(self.hud.blit_seq());
    }

    // ── Events ───────────────────────────────────────────────────────────────

    pub fn check_events(&mut self, event: &GameEvent, queue: &mut EventQueue) {
        if self.paused {
            // Releases still reach the player so nothing stays held across
            // the pause; new presses do not.
            if matches!(event, GameEvent::KeyUp(_) | GameEvent::MouseUp { .. }) {
                self.route_to_player(event);
            }
            self.pause_menu.check_events(event, queue);
        } else {
            match event {
                GameEvent::KeyDown(Key::Escape) => queue.post(GameEvent::Pause),
                e if e.is_key_or_mouse() => self.route_to_player(e),
                other => self.state.check_events(other),
            }
        }

        if *event == GameEvent::Pause {
            self.toggle_pause();
        }
    }

    fn route_to_player(&mut self, event: &GameEvent) {
        match event {
            GameEvent::KeyDown(key) => self.player.keydown_handler(*key),
            GameEvent::KeyUp(key) => self.player.keyup_handler(*key),
            GameEvent::MouseDown { button, .. } => self.player.mousedown_handler(*button),
            GameEvent::MouseUp { button, .. } => self.player.mouseup_handler(*button),
            _ => {}
        }
    }

    fn toggle_pause(&mut self) {
        if self.paused {
            self.state.unpause();
            self.paused = false;
            self.cursor = CursorStyle::Crosshair;
            log::info!("level resumed");
        } else {
            self.state.pause();
            self.paused = true;
            self.cursor = CursorStyle::Pointer;
            log::info!("level paused");
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }
}

/// Cull out-of-bounds lasers, draw the rest, then the sprite or its dying
/// particles. Returns `true` once a dying sprite has nothing left to show.
fn draw_sprite<S: Sprite>(surface: &mut Surface, sprite: &mut S, height: f32) -> bool {
    sprite
        .lasers_mut()
        .retain(|laser| laser.in_vertical_bounds(height));
    for laser in sprite.lasers() {
        laser.draw(surface);
    }

    if sprite.is_alive() {
        sprite.draw(surface);
        false
    } else if sprite.is_dying() {
        !sprite.draw_particles(surface)
    } else {
        false
    }
}

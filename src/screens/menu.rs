//! Menu screens: a title above a column of clickable buttons.

use crate::assets;
use crate::audio::LoopingSound;
use crate::events::{EventQueue, GameEvent, Key};
use crate::geometry::Rect;
use crate::screens::{Context, ScreenKey};
use crate::surface::Surface;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonKey {
    Play,
    Quit,
    Resume,
    MainMenu,
    PlayAgain,
}

#[derive(Clone, Debug)]
pub struct Button {
    pub key: ButtonKey,
    pub label: &'static str,
    /// Local to the owning menu's surface.
    pub rect: Rect,
    pressed: bool,
}

impl Button {
    /// On press, arm the button if `pos` is over it. On release, report a
    /// click only when it was armed and `pos` is still over it.
    pub fn check(&mut self, pos: (f32, f32), release: bool) -> bool {
        let over = self.rect.contains(pos);
        if release {
            let clicked = self.pressed && over;
            self.pressed = false;
            clicked
        } else {
            self.pressed = over;
            over
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }
}

// ── Shared menu base ─────────────────────────────────────────────────────────

pub struct Menu {
    title: &'static str,
    buttons: Vec<Button>,
    surface: Surface,
    position: (i32, i32),
    boxed: bool,
}

impl Menu {
    fn new(
        title: &'static str,
        buttons: &[(ButtonKey, &'static str)],
        size: (u16, u16),
        position: (i32, i32),
        boxed: bool,
    ) -> Self {
        let (w, h) = (size.0 as f32, size.1 as f32);
        let first_row = (h / 2.0 - buttons.len() as f32 + 1.0).floor().max(2.0);
        let buttons = buttons
            .iter()
            .enumerate()
            .map(|(i, &(key, label))| {
                let bw = label.chars().count() as f32 + 4.0;
                Button {
                    key,
                    label,
                    rect: Rect::new(((w - bw) / 2.0).floor(), first_row + 2.0 * i as f32, bw, 1.0),
                    pressed: false,
                }
            })
            .collect();
        let mut menu = Self {
            title,
            buttons,
            surface: Surface::new(size.0, size.1),
            position,
            boxed,
        };
        menu.render();
        menu
    }

    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    /// Screen-space centre of the button bound to `key`.
    pub fn button_center(&self, key: ButtonKey) -> Option<(f32, f32)> {
        self.buttons.iter().find(|b| b.key == key).map(|b| {
            (
                b.rect.center_x() + self.position.0 as f32,
                b.rect.center_y() + self.position.1 as f32,
            )
        })
    }

    fn local(&self, (x, y): (f32, f32)) -> (f32, f32) {
        (x - self.position.0 as f32, y - self.position.1 as f32)
    }

    /// Feed mouse presses/releases to the buttons; returns the clicked one.
    fn handle_mouse(&mut self, event: &GameEvent) -> Option<ButtonKey> {
        match event {
            GameEvent::MouseDown { pos, .. } => {
                let local = self.local(*pos);
                for button in &mut self.buttons {
                    button.check(local, false);
                }
                None
            }
            GameEvent::MouseUp { pos, .. } => {
                let local = self.local(*pos);
                let mut clicked = None;
                for button in &mut self.buttons {
                    if button.check(local, true) {
                        clicked = Some(button.key);
                    }
                }
                clicked
            }
            _ => None,
        }
    }

    fn render(&mut self) {
        let (w, h) = (self.surface.width() as i32, self.surface.height() as i32);
        self.surface.clear();
        if self.boxed {
            let edge = assets::BUTTON_COLOR;
            for y in 0..h {
                for x in 0..w {
                    let ch = match (x, y) {
                        (0, 0) => '┌',
                        (x, 0) if x == w - 1 => '┐',
                        (0, y) if y == h - 1 => '└',
                        (x, y) if x == w - 1 && y == h - 1 => '┘',
                        (_, 0) => '─',
                        (_, y) if y == h - 1 => '─',
                        (0, _) => '│',
                        (x, _) if x == w - 1 => '│',
                        _ => ' ',
                    };
                    self.surface.put_char(x, y, ch, edge);
                }
            }
        }

        let title_row = (h / 4).max(1);
        let title_x = (w - self.title.chars().count() as i32) / 2;
        self.surface.put_str(title_x, title_row, self.title, assets::TITLE_COLOR);

        for button in &self.buttons {
            let color = if button.is_pressed() {
                assets::BUTTON_PRESSED_COLOR
            } else {
                assets::BUTTON_COLOR
            };
            self.surface.put_str(
                button.rect.x as i32,
                button.rect.y as i32,
                &format!("[ {} ]", button.label),
                color,
            );
        }
    }
}

// ── Main menu ────────────────────────────────────────────────────────────────

pub const MAIN_MENU_TITLE: &str = "|_| |_ |_";

pub struct MainMenu {
    menu: Menu,
    /// Keeps the theme playing for as long as the menu exists.
    _music: LoopingSound,
}

impl MainMenu {
    pub fn new(ctx: &Context) -> Self {
        Self {
            menu: Menu::new(
                MAIN_MENU_TITLE,
                &[(ButtonKey::Play, "Play"), (ButtonKey::Quit, "Quit")],
                (ctx.width, ctx.height),
                (0, 0),
                false,
            ),
            _music: LoopingSound::start(ctx.audio.clone(), assets::MAIN_MENU_THEME, ctx.music_volume),
        }
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    pub fn check_events(&mut self, event: &GameEvent, queue: &mut EventQueue) {
        let action = match event {
            GameEvent::KeyDown(Key::Enter) => Some(ButtonKey::Play),
            GameEvent::KeyDown(Key::Char('q')) | GameEvent::KeyDown(Key::Char('Q')) => {
                Some(ButtonKey::Quit)
            }
            _ => self.menu.handle_mouse(event),
        };
        match action {
            Some(ButtonKey::Play) => queue.post(GameEvent::ChangeScreen {
                next_screen: ScreenKey::Level,
            }),
            Some(ButtonKey::Quit) => {
                queue.clear();
                queue.post(GameEvent::Quit);
            }
            _ => {}
        }
    }

    pub fn update(&mut self) {
        self.menu.render();
    }

    pub fn surface(&self) -> &Surface {
        &self.menu.surface
    }

    pub fn position(&self) -> (i32, i32) {
        self.menu.position
    }
}

// ── Pause menu ───────────────────────────────────────────────────────────────

pub const PAUSE_MENU_SIZE: (u16, u16) = (30, 11);

pub struct PauseMenu {
    menu: Menu,
}

impl PauseMenu {
    /// Boxed menu centred on a `ctx.width` × `ctx.height` screen.
    pub fn new(ctx: &Context) -> Self {
        let size = (
            PAUSE_MENU_SIZE.0.min(ctx.width),
            PAUSE_MENU_SIZE.1.min(ctx.height),
        );
        let position = (
            (ctx.width.saturating_sub(size.0) / 2) as i32,
            (ctx.height.saturating_sub(size.1) / 2) as i32,
        );
        Self {
            menu: Menu::new(
                "PAUSED",
                &[(ButtonKey::Resume, "Resume"), (ButtonKey::MainMenu, "Main Menu")],
                size,
                position,
                true,
            ),
        }
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    pub fn check_events(&mut self, event: &GameEvent, queue: &mut EventQueue) {
        let action = match event {
            GameEvent::KeyDown(Key::Escape) => Some(ButtonKey::Resume),
            _ => self.menu.handle_mouse(event),
        };
        match action {
            Some(ButtonKey::Resume) => queue.post(GameEvent::Pause),
            Some(ButtonKey::MainMenu) => queue.post(GameEvent::ChangeScreen {
                next_screen: ScreenKey::MainMenu,
            }),
            _ => {}
        }
    }

    pub fn update(&mut self) {
        self.menu.render();
    }

    pub fn surface(&self) -> &Surface {
        &self.menu.surface
    }

    pub fn position(&self) -> (i32, i32) {
        self.menu.position
    }
}

// ── Game over ────────────────────────────────────────────────────────────────

pub struct GameOver {
    menu: Menu,
}

impl GameOver {
    pub fn new(ctx: &Context) -> Self {
        Self {
            menu: Menu::new(
                "GAME OVER",
                &[(ButtonKey::PlayAgain, "Play Again"), (ButtonKey::MainMenu, "Main Menu")],
                (ctx.width, ctx.height),
                (0, 0),
                false,
            ),
        }
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    pub fn check_events(&mut self, event: &GameEvent, queue: &mut EventQueue) {
        let action = match event {
            GameEvent::KeyDown(Key::Char('r')) | GameEvent::KeyDown(Key::Char('R')) => {
                Some(ButtonKey::PlayAgain)
            }
            GameEvent::KeyDown(Key::Char('m')) | GameEvent::KeyDown(Key::Char('M')) => {
                Some(ButtonKey::MainMenu)
            }
            _ => self.menu.handle_mouse(event),
        };
        let next_screen = match action {
            Some(ButtonKey::PlayAgain) => ScreenKey::Level,
            Some(ButtonKey::MainMenu) => ScreenKey::MainMenu,
            _ => return,
        };
        queue.post(GameEvent::ChangeScreen { next_screen });
    }

    pub fn update(&mut self) {
        self.menu.render();
    }

    pub fn surface(&self) -> &Surface {
        &self.menu.surface
    }

    pub fn position(&self) -> (i32, i32) {
        self.menu.position
    }
}

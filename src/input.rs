//! Translates raw terminal events into `GameEvent`s.
//!
//! Terminals that support keyboard enhancement report real key releases.
//! Classic terminals only send presses (OS key-repeat arrives as repeated
//! presses), so a key counts as held while its last press arrived within
//! `HOLD_WINDOW` frames and a `KeyUp` is synthesised once it goes stale.

use std::collections::HashMap;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton as TermButton,
    MouseEvent, MouseEventKind,
};

use crate::events::{GameEvent, Key, MouseButton};

/// A key is considered held if its last press/repeat arrived within this
/// many frames.
pub const HOLD_WINDOW: u64 = 4;

pub fn to_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Char(' ') => Some(Key::Space),
        KeyCode::Char(c) => Some(Key::Char(c)),
        _ => None,
    }
}

/// Keys whose effect lasts while held (movement and fire). Everything else
/// is a one-shot command.
pub fn is_hold_key(key: Key) -> bool {
    matches!(
        key,
        Key::Left
            | Key::Right
            | Key::Space
            | Key::Char('a')
            | Key::Char('A')
            | Key::Char('d')
            | Key::Char('D')
    )
}

fn to_button(button: TermButton) -> MouseButton {
    match button {
        TermButton::Left => MouseButton::Left,
        TermButton::Right => MouseButton::Right,
        TermButton::Middle => MouseButton::Middle,
    }
}

pub struct InputAdapter {
    /// Each held key → the frame it was last seen.
    held: HashMap<Key, u64>,
    frame: u64,
    reports_release: bool,
    pointer: Option<(u16, u16)>,
}

impl InputAdapter {
    pub fn new(reports_release: bool) -> Self {
        Self {
            held: HashMap::new(),
            frame: 0,
            reports_release,
            pointer: None,
        }
    }

    /// Last known mouse cell.
    pub fn pointer(&self) -> Option<(u16, u16)> {
        self.pointer
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains_key(&key)
    }

    pub fn translate(&mut self, event: Event) -> Vec<GameEvent> {
        match event {
            Event::Key(key) => self.translate_key(key),
            Event::Mouse(mouse) => self.translate_mouse(mouse).into_iter().collect(),
            _ => Vec::new(),
        }
    }

    fn translate_key(&mut self, KeyEvent { code, kind, modifiers, .. }: KeyEvent) -> Vec<GameEvent> {
        if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            return vec![GameEvent::Quit];
        }
        let Some(key) = to_key(code) else {
            return Vec::new();
        };
        match kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                let fresh = self.held.insert(key, self.frame).is_none();
                // One-shot keys act on every fresh press, even inside the
                // hold window.
                let one_shot = kind == KeyEventKind::Press && !is_hold_key(key);
                if fresh || one_shot {
                    vec![GameEvent::KeyDown(key)]
                } else {
                    Vec::new()
                }
            }
            KeyEventKind::Release => {
                if self.held.remove(&key).is_some() {
                    vec![GameEvent::KeyUp(key)]
                } else {
                    Vec::new()
                }
            }
        }
    }

    fn translate_mouse(&mut self, mouse: MouseEvent) -> Option<GameEvent> {
        self.pointer = Some((mouse.column, mouse.row));
        // Cell centres, so hit tests against whole-cell rects are unambiguous.
        let pos = (mouse.column as f32 + 0.5, mouse.row as f32 + 0.5);
        match mouse.kind {
            MouseEventKind::Down(b) => Some(GameEvent::MouseDown { pos, button: to_button(b) }),
            MouseEventKind::Up(b) => Some(GameEvent::MouseUp { pos, button: to_button(b) }),
            MouseEventKind::Moved | MouseEventKind::Drag(_) => Some(GameEvent::MouseMotion { pos }),
            _ => None,
        }
    }

    /// Close the current frame: on terminals without release events, emit
    /// `KeyUp` for every key whose last press is older than `HOLD_WINDOW`.
    pub fn end_frame(&mut self) -> Vec<GameEvent> {
        self.frame += 1;
        if self.reports_release {
            return Vec::new();
        }
        let frame = self.frame;
        let mut stale: Vec<Key> = self
            .held
            .iter()
            .filter(|&(_, &last)| frame.saturating_sub(last) > HOLD_WINDOW)
            .map(|(&key, _)| key)
            .collect();
        stale.sort_by_key(|k| format!("{:?}", k));
        for key in &stale {
            self.held.remove(key);
        }
        stale.into_iter().map(GameEvent::KeyUp).collect()
    }
}

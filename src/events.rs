//! The minimal event contract the core understands, and the outbound queue
//! used to defer screen transitions and pause toggles to a safe point in
//! the frame.

use std::collections::VecDeque;

use crate::screens::ScreenKey;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Space,
    Enter,
    Escape,
    Char(char),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    KeyDown(Key),
    KeyUp(Key),
    MouseDown { pos: (f32, f32), button: MouseButton },
    MouseUp { pos: (f32, f32), button: MouseButton },
    MouseMotion { pos: (f32, f32) },
    Quit,
    /// Request a transition; handled by the controller at the next drain.
    ChangeScreen { next_screen: ScreenKey },
    /// Toggle the level's pause state; handled at the next drain.
    Pause,
}

impl GameEvent {
    pub fn is_key_or_mouse(&self) -> bool {
        matches!(
            self,
            GameEvent::KeyDown(_)
                | GameEvent::KeyUp(_)
                | GameEvent::MouseDown { .. }
                | GameEvent::MouseUp { .. }
        )
    }
}

/// FIFO of events waiting for the next drain.
///
/// Handlers never act on a transition directly: they `post` it here and the
/// controller consumes it on the following frame.
#[derive(Debug, Default)]
pub struct EventQueue {
    pending: VecDeque<GameEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn post(&mut self, event: GameEvent) {
        self.pending.push_back(event);
    }

    /// Drop everything not yet handled.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Take a snapshot of the queue in arrival order. Events posted while the
    /// snapshot is being handled wait for the next call.
    pub fn take_pending(&mut self) -> Vec<GameEvent> {
        self.pending.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameEvent> {
        self.pending.iter()
    }
}

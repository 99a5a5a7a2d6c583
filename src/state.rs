//! Top-level controller: owns the active screen and the event queue.

use crate::background::Background;
use crate::events::{EventQueue, GameEvent};
use crate::screens::{self, Context, Screen, ScreenKey};
use crate::surface::Surface;

pub struct State {
    ctx: Context,
    background: Background,
    active: Screen,
    events: EventQueue,
    running: bool,
}

impl State {
    pub fn new(ctx: Context, start: ScreenKey) -> Self {
        let background = Background::new(ctx.width, ctx.height, ctx.rng());
        let active = screens::build(start, &ctx);
        log::info!("starting on {:?}", start);
        Self {
            ctx,
            background,
            active,
            events: EventQueue::new(),
            running: true,
        }
    }

    pub fn active(&self) -> &Screen {
        &self.active
    }

    pub fn active_mut(&mut self) -> &mut Screen {
        &mut self.active
    }

    pub fn events(&self) -> &EventQueue {
        &self.events
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Queue an input event for the next drain.
    pub fn post(&mut self, event: GameEvent) {
        self.events.post(event);
    }

    /// Handle one event: transitions and quit are consumed here, everything
    /// else goes to the active screen untouched.
    pub fn check_events(&mut self, event: GameEvent) {
        match event {
            GameEvent::ChangeScreen { next_screen } => {
                log::info!("screen {:?} -> {:?}", self.active.key(), next_screen);
                self.active = screens::build(next_screen, &self.ctx);
            }
            GameEvent::Quit => {
                log::info!("quit requested");
                self.running = false;
            }
            other => self.active.check_events(&other, &mut self.events),
        }
    }

    /// Handle everything queued so far in arrival order. Events posted
    /// during handling wait for the next call.
    pub fn drain_events(&mut self) {
        for event in self.events.take_pending() {
            if !self.running {
                break;
            }
            self.check_events(event);
        }
    }

    pub fn update(&mut self) {
        self.background.update();
        self.active.update(&mut self.events);
    }

    /// Background first, active screen on top.
    pub fn draw(&self, display: &mut Surface) {
        display.clear();
        display.blit(self.background.surface(), (0, 0));
        display.blit(self.active.surface(), self.active.position());
    }

    /// One full frame: queue `input`, drain, update, draw.
    pub fn frame(&mut self, input: impl IntoIterator<Item = GameEvent>, display: &mut Surface) {
        for event in input {
            self.events.post(event);
        }
        self.drain_events();
        if self.running {
            self.update();
        }
        self.draw(display);
    }
}

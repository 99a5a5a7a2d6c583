//! Heads-up display.
//!
//! Widgets are pull-based: each one holds a callback reading a value out of
//! a data snapshot `D`, and only re-renders when the owner calls
//! [`Hud::update`]. Nothing is pushed to the HUD when game state changes.

use crate::geometry::Rgb;
use crate::surface::Surface;

pub trait Widget<D> {
    /// Re-render from the current data.
    fn refresh(&mut self, data: &D);
    fn surface(&self) -> &Surface;
    fn position(&self) -> (i32, i32);
}

// ── Progress bar ─────────────────────────────────────────────────────────────

pub struct ProgressBar<D> {
    pos: (u16, u16),
    color: Rgb,
    source: Box<dyn Fn(&D) -> f32>,
    surface: Surface,
}

impl<D> ProgressBar<D> {
    pub fn new(
        pos: (u16, u16),
        size: (u16, u16),
        color: Rgb,
        source: impl Fn(&D) -> f32 + 'static,
    ) -> Self {
        Self {
            pos,
            color,
            source: Box::new(source),
            surface: Surface::new(size.0, size.1),
        }
    }
}

impl<D> Widget<D> for ProgressBar<D> {
    fn refresh(&mut self, data: &D) {
        let fraction = (self.source)(data).clamp(0.0, 1.0);
        let width = self.surface.width();
        let filled = (fraction * width as f32).round() as u16;
        let track = self.color.faded(70.0);
        self.surface.clear();
        for y in 0..self.surface.height() as i32 {
            for x in 0..width {
                let (ch, fg) = if x < filled { ('█', self.color) } else { ('░', track) };
                self.surface.put_char(x as i32, y, ch, fg);
            }
        }
    }

    fn surface(&self) -> &Surface {
        &self.surface
    }

    fn position(&self) -> (i32, i32) {
        (self.pos.0 as i32, self.pos.1 as i32)
    }
}

// ── Text ─────────────────────────────────────────────────────────────────────

pub struct TextSurface<D> {
    pos: (u16, u16),
    color: Rgb,
    source: Box<dyn Fn(&D) -> String>,
    surface: Surface,
}

impl<D> TextSurface<D> {
    pub fn new(pos: (u16, u16), color: Rgb, source: impl Fn(&D) -> String + 'static) -> Self {
        Self {
            pos,
            color,
            source: Box::new(source),
            surface: Surface::new(0, 1),
        }
    }
}

impl<D> Widget<D> for TextSurface<D> {
    fn refresh(&mut self, data: &D) {
        let text = (self.source)(data);
        self.surface = Surface::new(text.chars().count() as u16, 1);
        self.surface.put_str(0, 0, &text, self.color);
    }

    fn surface(&self) -> &Surface {
        &self.surface
    }

    fn position(&self) -> (i32, i32) {
        (self.pos.0 as i32, self.pos.1 as i32)
    }
}

// ── Hud ──────────────────────────────────────────────────────────────────────

pub struct Hud<D> {
    size: (u16, u16),
    widgets: Vec<Box<dyn Widget<D>>>,
    refreshes: u64,
}

impl<D> Hud<D> {
    pub fn new(size: (u16, u16)) -> Self {
        Self {
            size,
            widgets: Vec::new(),
            refreshes: 0,
        }
    }

    pub fn attach(&mut self, widgets: Vec<Box<dyn Widget<D>>>) {
        self.widgets.extend(widgets);
    }

    /// Recompute every widget from `data`.
    pub fn update(&mut self, data: &D) {
        for widget in &mut self.widgets {
            widget.refresh(data);
        }
        self.refreshes += 1;
    }

    /// `(surface, position)` pairs for compositing, as of the last
    /// [`update`](Self::update). Widgets placed entirely off the HUD area
    /// are skipped.
    pub fn blit_seq(&self) -> impl Iterator<Item = (&Surface, (i32, i32))> + '_ {
        let (w, h) = (self.size.0 as i32, self.size.1 as i32);
        self.widgets
            .iter()
            .map(|widget| (widget.surface(), widget.position()))
            .filter(move |(_, (x, y))| *x < w && *y < h)
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Number of times [`update`](Self::update) has run.
    pub fn refreshes(&self) -> u64 {
        self.refreshes
    }
}

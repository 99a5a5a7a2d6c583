//! In-memory cell framebuffer.
//!
//! Every screen, widget and background layer renders into its own
//! `Surface`; the controller composites them and the binary flushes the
//! final one to the terminal. Unset cells are transparent when blitted.

use crate::geometry::Rgb;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Rgb,
}

#[derive(Clone, Debug)]
pub struct Surface {
    width: u16,
    height: u16,
    cells: Vec<Option<Cell>>,
}

impl Surface {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Reset every cell to transparent.
    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|c| *c = None);
    }

    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).and_then(|i| self.cells[i])
    }

    /// Write one glyph; out-of-bounds writes are silently clipped.
    pub fn put_char(&mut self, x: i32, y: i32, ch: char, fg: Rgb) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = Some(Cell { ch, fg });
        }
    }

    pub fn put_str(&mut self, x: i32, y: i32, text: &str, fg: Rgb) {
        for (dx, ch) in text.chars().enumerate() {
            self.put_char(x + dx as i32, y, ch, fg);
        }
    }

    /// Filled disc of cells whose centres lie within `radius` of `(cx, cy)`.
    /// A radius below one cell still marks the centre cell.
    pub fn draw_circle(&mut self, (cx, cy): (f32, f32), radius: f32, fg: Rgb) {
        let r = radius.max(0.5);
        let x_min = (cx - r).floor() as i32;
        let x_max = (cx + r).ceil() as i32;
        let y_min = (cy - r).floor() as i32;
        let y_max = (cy + r).ceil() as i32;
        let mut marked = false;
        for y in y_min..=y_max {
            for x in x_min..=x_max {
                let dx = x as f32 + 0.5 - cx;
                let dy = y as f32 + 0.5 - cy;
                if dx * dx + dy * dy <= r * r {
                    self.put_char(x, y, '●', fg);
                    marked = true;
                }
            }
        }
        if !marked {
            self.put_char(cx.floor() as i32, cy.floor() as i32, '●', fg);
        }
    }

    /// Copy every opaque cell of `src` onto `self` with its top-left at
    /// `(x, y)`.
    pub fn blit(&mut self, src: &Surface, (x, y): (i32, i32)) {
        for sy in 0..src.height as i32 {
            for sx in 0..src.width as i32 {
                if let Some(cell) = src.get(sx, sy) {
                    self.put_char(x + sx, y + sy, cell.ch, cell.fg);
                }
            }
        }
    }

    pub fn blits<'a>(&mut self, seq: impl IntoIterator<Item = (&'a Surface, (i32, i32))>) {
        for (src, pos) in seq {
            self.blit(src, pos);
        }
    }

    /// The glyphs of one row, transparent cells rendered as spaces.
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width as i32)
            .map(|x| self.get(x, y as i32).map_or(' ', |c| c.ch))
            .collect()
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        (0..self.height).any(|y| self.row_text(y).contains(needle))
    }

    pub fn opaque_cells(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}

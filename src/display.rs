//! Terminal presentation: flushes a composited `Surface` to the terminal.
//!
//! No game logic happens here; this module only translates cells into
//! terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    QueueableCommand,
};

use crate::geometry::Rgb;
use crate::screens::CursorStyle;
use crate::surface::Surface;

const C_CURSOR: Color = Color::White;

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.0,
        g: rgb.1,
        b: rgb.2,
    }
}

/// Draw one complete frame, then the pointer glyph at `pointer` if given.
pub fn present<W: Write>(
    out: &mut W,
    frame: &Surface,
    pointer: Option<((u16, u16), CursorStyle)>,
) -> std::io::Result<()> {
    for y in 0..frame.height() {
        out.queue(cursor::MoveTo(0, y))?;

        // Batch runs of same-coloured cells into one Print.
        let mut run = String::new();
        let mut run_color: Option<Rgb> = None;
        for x in 0..frame.width() as i32 {
            let cell = frame.get(x, y as i32);
            let color = cell.map(|c| c.fg);
            let ch = cell.map_or(' ', |c| c.ch);
            if color.is_some() && color != run_color {
                if !run.is_empty() {
                    out.queue(Print(&run))?;
                    run.clear();
                }
                if let Some(rgb) = color {
                    out.queue(style::SetForegroundColor(to_color(rgb)))?;
                }
                run_color = color;
            }
            run.push(ch);
        }
        if !run.is_empty() {
            out.queue(Print(&run))?;
        }
    }

    if let Some(((col, row), shape)) = pointer {
        let glyph = match shape {
            CursorStyle::Crosshair => '+',
            CursorStyle::Pointer => '↖',
        };
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(C_CURSOR))?;
        out.queue(Print(glyph))?;
    }

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, frame.height().saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

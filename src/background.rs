//! Scrolling starfield drawn behind every screen.

use rand::rngs::StdRng;
use rand::Rng;

use crate::geometry::Rgb;
use crate::surface::Surface;

const STAR_DENSITY: f32 = 0.02;

#[derive(Clone, Debug)]
struct Star {
    x: f32,
    y: f32,
    /// Rows per frame; slower stars are dimmer.
    speed: f32,
}

pub struct Background {
    stars: Vec<Star>,
    surface: Surface,
    rng: StdRng,
}

impl Background {
    pub fn new(width: u16, height: u16, mut rng: StdRng) -> Self {
        let count = (width as f32 * height as f32 * STAR_DENSITY) as usize;
        let stars = (0..count)
            .map(|_| Star {
                x: rng.gen_range(0.0..width.max(1) as f32),
                y: rng.gen_range(0.0..height.max(1) as f32),
                speed: rng.gen_range(0.05..0.4),
            })
            .collect();
        let mut background = Self {
            stars,
            surface: Surface::new(width, height),
            rng,
        };
        background.render();
        background
    }

    pub fn update(&mut self) {
        let (w, h) = (self.surface.width() as f32, self.surface.height() as f32);
        for star in &mut self.stars {
            star.y += star.speed;
            if star.y >= h {
                star.y -= h;
                star.x = self.rng.gen_range(0.0..w.max(1.0));
            }
        }
        self.render();
    }

    fn render(&mut self) {
        self.surface.clear();
        for star in &self.stars {
            let alpha = 80.0 + star.speed / 0.4 * 175.0;
            let glyph = if star.speed > 0.3 { '+' } else { '.' };
            self.surface.put_char(
                star.x as i32,
                star.y as i32,
                glyph,
                Rgb::WHITE.faded(alpha),
            );
        }
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }
}

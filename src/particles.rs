//! Short-lived particle effects such as laser-impact bursts.

use crate::geometry::Rgb;
use crate::surface::Surface;

/// Frames an impact spark stays on screen.
pub const SPARK_LIFETIME: u32 = 10;
/// Sparks emitted per impact.
pub const SPARK_COUNT: usize = 8;
const SPARK_SPEED: f32 = 0.6;

#[derive(Clone, Debug)]
pub struct Particle {
    pub pos: (f32, f32),
    pub vel: (f32, f32),
    pub color: Rgb,
    /// Remaining frames.
    pub life: u32,
    pub max_life: u32,
}

impl Particle {
    pub fn update(&mut self) {
        self.pos.0 += self.vel.0;
        self.pos.1 += self.vel.1;
        // Sparks slow down as they spread.
        self.vel.0 *= 0.85;
        self.vel.1 *= 0.85;
        self.life = self.life.saturating_sub(1);
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0
    }

    pub fn draw(&self, surface: &mut Surface) {
        let alpha = 255.0 * self.life as f32 / self.max_life.max(1) as f32;
        let glyph = if self.life * 2 > self.max_life { '*' } else { '·' };
        surface.put_char(
            self.pos.0.floor() as i32,
            self.pos.1.floor() as i32,
            glyph,
            self.color.faded(alpha),
        );
    }
}

/// An ordered collection of particles that is finished once every particle
/// has run out of life.
#[derive(Clone, Debug, Default)]
pub struct ParticleGroup {
    particles: Vec<Particle>,
}

impl ParticleGroup {
    /// Radial burst of `SPARK_COUNT` sparks, cycling through `palette`.
    pub fn burst(center: (f32, f32), palette: &[Rgb]) -> Self {
        let fallback = [Rgb::WHITE];
        let palette = if palette.is_empty() { &fallback[..] } else { palette };
        let particles = (0..SPARK_COUNT)
            .map(|i| {
                let angle = i as f32 / SPARK_COUNT as f32 * std::f32::consts::TAU;
                Particle {
                    pos: center,
                    // Cells are roughly twice as tall as wide.
                    vel: (angle.cos() * SPARK_SPEED, angle.sin() * SPARK_SPEED * 0.5),
                    color: palette[i % palette.len()],
                    life: SPARK_LIFETIME,
                    max_life: SPARK_LIFETIME,
                }
            })
            .collect();
        Self { particles }
    }

    pub fn update(&mut self) {
        for p in &mut self.particles {
            p.update();
        }
        self.particles.retain(Particle::is_alive);
    }

    pub fn draw(&self, surface: &mut Surface) {
        for p in &self.particles {
            p.draw(surface);
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// True once every particle has decayed.
    pub fn is_spent(&self) -> bool {
        self.particles.is_empty()
    }
}

use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

use super::draw::{Rgb, Surface2d};

/// One short-lived visual element. Lifetimes count down once per frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: f32,
    pub max_life: f32,
    pub color: Rgb,
    pub size: f32,
}

impl Particle {
    /// Remaining life in \[0, 1\]; drives alpha and radius when drawn.
    #[inline]
    pub fn life_fraction(&self) -> f32 {
        if self.max_life <= 0.0 {
            return 0.0;
        }
        (self.life / self.max_life).clamp(0.0, 1.0)
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }

    #[inline]
    pub fn step(&mut self, physics: Physics) {
        self.pos += self.vel;
        self.vel.y += physics.gravity;
        self.vel *= physics.drag;
        self.life -= 1.0;
    }
}

/// Constant per-frame forces applied to every particle of one effect.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Physics {
    pub gravity: f32,
    pub drag: f32,
}

/// Angle distribution of a burst.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Spread {
    /// `TAU / count` apart, starting at angle zero.
    Even,
    Random,
}

/// Burst shape: particle count plus `(min, max)` ranges sampled uniformly.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BurstSpec {
    pub count: usize,
    pub speed: (f32, f32),
    pub life: (f32, f32),
    pub size: (f32, f32),
}

#[inline]
fn sample<R: Rng>(rng: &mut R, (lo, hi): (f32, f32)) -> f32 {
    lo + rng.gen::<f32>() * (hi - lo)
}

/// Appends `burst.count` particles radiating from `origin`.
pub fn spawn_burst<R, F>(
    out: &mut Vec<Particle>,
    rng: &mut R,
    origin: Vec2,
    burst: &BurstSpec,
    spread: Spread,
    mut color: F,
) where
    R: Rng,
    F: FnMut(&mut R) -> Rgb,
{
    out.reserve(burst.count);
    for i in 0..burst.count {
        let angle = match spread {
            Spread::Even => TAU * i as f32 / burst.count as f32,
            Spread::Random => rng.gen::<f32>() * TAU,
        };
        let speed = sample(rng, burst.speed);
        let life = sample(rng, burst.life);
        let size = sample(rng, burst.size);
        let color = color(rng);
        out.push(Particle {
            pos: origin,
            vel: Vec2::new(angle.cos(), angle.sin()) * speed,
            life,
            max_life: life,
            color,
            size,
        });
    }
}

/// Advances every particle one frame and drops the expired ones.
pub fn integrate(particles: &mut Vec<Particle>, physics: Physics) {
    for p in particles.iter_mut() {
        p.step(physics);
    }
    particles.retain(Particle::is_alive);
}

/// Draws particles as filled circles faded and shrunk by remaining life.
pub fn draw_particles<S: Surface2d + ?Sized>(
    surface: &mut S,
    particles: &[Particle],
    offset_x: f32,
) {
    for p in particles {
        let frac = p.life_fraction();
        if frac <= 0.0 {
            continue;
        }
        surface.set_global_alpha(frac);
        surface.set_fill_color(p.color);
        surface.fill_circle(p.pos.x - offset_x, p.pos.y, p.size * frac);
    }
}

/// Frame counter compared against a fixed duration.
///
/// Idle until `restart`; counts up on `tick` and freezes once it reaches the
/// duration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameTimer {
    elapsed: u32,
    duration: u32,
    started: bool,
}

impl FrameTimer {
    pub const fn new(duration: u32) -> Self {
        Self {
            elapsed: 0,
            duration,
            started: false,
        }
    }

    pub fn restart(&mut self) {
        self.elapsed = 0;
        self.started = true;
    }

    pub fn stop(&mut self) {
        self.elapsed = 0;
        self.started = false;
    }

    /// Advances one frame; returns true once finished.
    pub fn tick(&mut self) -> bool {
        if self.started && self.elapsed < self.duration {
            self.elapsed += 1;
        }
        self.is_finished()
    }

    #[inline]
    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    #[inline]
    pub fn duration(&self) -> u32 {
        self.duration
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.started && self.elapsed < self.duration
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.started && self.elapsed >= self.duration
    }

    #[inline]
    pub fn progress(&self) -> f32 {
        if self.duration == 0 {
            return 1.0;
        }
        self.elapsed as f32 / self.duration as f32
    }
}

//! Transient particle effects and their frame timers.
//!
//! Three independent effects share the same particle record:
//! - fireworks: screen-space celebration bursts, evenly spread,
//! - armor explosion: world-space burst plus shards and a shockwave ring,
//! - sparkle trail: a small capped trail that follows the armored player.
//!
//! All counts, ranges and durations live in `core::constants`.

use glam::Vec2;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::constants::*;
use super::draw::Surface2d;
use super::particles::{draw_particles, integrate, spawn_burst, FrameTimer, Particle, Spread};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CelebrationStatus {
    /// `initialize_fireworks` has not been called since the last reset.
    Idle,
    Running,
    Finished,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArmorStatus {
    Idle,
    Activating,
    Complete,
}

pub struct EffectsManager {
    fireworks: Vec<Particle>,
    explosion: Vec<Particle>,
    sparkles: Vec<Particle>,
    celebration: FrameTimer,
    armor: FrameTimer,
    firework_origin: Vec2,
    armor_center: Vec2,
    rng: StdRng,
}

impl Default for EffectsManager {
    fn default() -> Self {
        Self::new()
    }
}

impl EffectsManager {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Deterministic particle randomness, for tests and replays.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            fireworks: Vec::with_capacity(FIREWORK_PARTICLES * 2),
            explosion: Vec::with_capacity(ARMOR_BURST_PARTICLES + ARMOR_SHARD_PARTICLES),
            sparkles: Vec::with_capacity(SPARKLE_MAX),
            celebration: FrameTimer::new(CELEBRATION_DURATION),
            armor: FrameTimer::new(ARMOR_ACTIVATION_DURATION),
            firework_origin: Vec2::ZERO,
            armor_center: Vec2::ZERO,
            rng,
        }
    }

    // ---------------- Fireworks ----------------

    /// Starts the celebration with one burst at `origin` (screen space).
    pub fn initialize_fireworks(&mut self, origin: Vec2) {
        self.celebration.restart();
        self.firework_origin = origin;
        self.fireworks.clear();
        self.burst_fireworks(origin);
        log::info!(
            "[fx] celebration started at ({:.0},{:.0})",
            origin.x,
            origin.y
        );
    }

    fn burst_fireworks(&mut self, at: Vec2) {
        spawn_burst(
            &mut self.fireworks,
            &mut self.rng,
            at,
            &FIREWORK_BURST,
            Spread::Even,
            |rng| *FIREWORK_PALETTE.choose(rng).unwrap_or(&FIREWORK_PALETTE[0]),
        );
    }

    pub fn update_celebration(&mut self) -> CelebrationStatus {
        integrate(&mut self.fireworks, FIREWORK_PHYSICS);
        if !self.celebration.is_running() {
            return self.celebration_status();
        }
        let finished = self.celebration.tick();
        let elapsed = self.celebration.elapsed();
        if !finished && elapsed % FIREWORK_REBURST_INTERVAL == 0 {
            let offset = Vec2::new(
                self.rng.gen_range(-FIREWORK_SCATTER..=FIREWORK_SCATTER),
                self.rng.gen_range(-FIREWORK_SCATTER..=FIREWORK_SCATTER) * 0.5,
            );
            self.burst_fireworks(self.firework_origin + offset);
        }
        if finished {
            log::info!("[fx] celebration finished after {} frames", elapsed);
        }
        self.celebration_status()
    }

    pub fn celebration_status(&self) -> CelebrationStatus {
        if self.celebration.is_running() {
            CelebrationStatus::Running
        } else if self.celebration.is_finished() {
            CelebrationStatus::Finished
        } else {
            CelebrationStatus::Idle
        }
    }

    #[inline]
    pub fn is_celebrating(&self) -> bool {
        self.celebration.is_running()
    }

    pub fn render_fireworks<S: Surface2d + ?Sized>(&self, surface: &mut S) {
        if self.fireworks.is_empty() {
            return;
        }
        surface.save();
        draw_particles(surface, &self.fireworks, 0.0);
        surface.restore();
    }

    // ---------------- Armor activation ----------------

    /// Replaces any running explosion with a fresh one centered on the player.
    pub fn activate_armor(&mut self, center: Vec2) {
        self.armor.restart();
        self.armor_center = center;
        self.explosion.clear();
        spawn_burst(
            &mut self.explosion,
            &mut self.rng,
            center,
            &ARMOR_BURST,
            Spread::Random,
            |_| ARMOR_BURST_COLOR,
        );
        spawn_burst(
            &mut self.explosion,
            &mut self.rng,
            center,
            &ARMOR_SHARDS,
            Spread::Random,
            |_| ARMOR_SHARD_COLOR,
        );
        log::info!("[fx] armor activated, {} particles", self.explosion.len());
    }

    pub fn update_armor_activation(&mut self) -> ArmorStatus {
        integrate(&mut self.explosion, ARMOR_PHYSICS);
        if self.armor.is_running() && self.armor.tick() {
            log::debug!("[fx] armor activation complete");
        }
        self.armor_status()
    }

    pub fn armor_status(&self) -> ArmorStatus {
        if self.armor.is_running() {
            ArmorStatus::Activating
        } else if self.armor.is_finished() {
            ArmorStatus::Complete
        } else {
            ArmorStatus::Idle
        }
    }

    #[inline]
    pub fn is_armor_activating(&self) -> bool {
        self.armor.is_running()
    }

    /// World-space explosion shifted left by `camera_x`.
    pub fn render_armor_explosion<S: Surface2d + ?Sized>(&self, surface: &mut S, camera_x: f32) {
        if self.explosion.is_empty() && !self.armor.is_running() {
            return;
        }
        surface.save();
        if self.armor.is_running() {
            let progress = self.armor.progress();
            surface.set_global_alpha(1.0 - progress);
            surface.set_stroke_color(ARMOR_BURST_COLOR);
            surface.set_line_width(SHOCKWAVE_LINE_WIDTH);
            surface.stroke_circle(
                self.armor_center.x - camera_x,
                self.armor_center.y,
                SHOCKWAVE_MAX_RADIUS * progress,
            );
        }
        draw_particles(surface, &self.explosion, camera_x);
        surface.restore();
    }

    // ---------------- Sparkle trail ----------------

    /// Maybe spawns one sparkle near `anchor`. Returns whether one was added.
    pub fn add_sparkle_trail(&mut self, anchor: Vec2) -> bool {
        if self.sparkles.len() >= SPARKLE_MAX || !self.rng.gen_bool(SPARKLE_SPAWN_CHANCE) {
            return false;
        }
        let jitter = Vec2::new(
            self.rng.gen_range(-SPARKLE_JITTER..=SPARKLE_JITTER),
            self.rng.gen_range(-SPARKLE_JITTER..=SPARKLE_JITTER),
        );
        spawn_burst(
            &mut self.sparkles,
            &mut self.rng,
            anchor + jitter,
            &SPARKLE,
            Spread::Random,
            |_| SPARKLE_COLOR,
        );
        true
    }

    pub fn update_sparkle_trails(&mut self) {
        integrate(&mut self.sparkles, SPARKLE_PHYSICS);
    }

    pub fn render_sparkle_trails<S: Surface2d + ?Sized>(&self, surface: &mut S, camera_x: f32) {
        if self.sparkles.is_empty() {
            return;
        }
        surface.save();
        surface.set_glow(SPARKLE_GLOW_BLUR, SPARKLE_COLOR);
        draw_particles(surface, &self.sparkles, camera_x);
        surface.restore();
    }

    /// Drops every particle and returns both timers to idle.
    pub fn reset(&mut self) {
        self.fireworks.clear();
        self.explosion.clear();
        self.sparkles.clear();
        self.celebration.stop();
        self.armor.stop();
    }

    pub fn fireworks(&self) -> &[Particle] {
        &self.fireworks
    }

    pub fn explosion(&self) -> &[Particle] {
        &self.explosion
    }

    pub fn sparkles(&self) -> &[Particle] {
        &self.sparkles
    }

    pub fn celebration_timer(&self) -> &FrameTimer {
        &self.celebration
    }

    pub fn armor_timer(&self) -> &FrameTimer {
        &self.armor
    }
}

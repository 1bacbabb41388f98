// Host-side tests for the particle effects manager.
// Rendering goes through a recording surface instead of a canvas.

use glam::Vec2;
use platformer_web::core::*;
use std::f32::consts::TAU;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Save,
    Restore,
    Alpha(f32),
    Fill(Rgb),
    Stroke(Rgb),
    LineWidth(f32),
    Glow(f32, Rgb),
    FillCircle(f32, f32, f32),
    StrokeCircle(f32, f32, f32),
}

#[derive(Default)]
struct Recorder {
    calls: Vec<Call>,
}

impl Recorder {
    fn fill_circles(&self) -> Vec<(f32, f32, f32)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::FillCircle(x, y, r) => Some((*x, *y, *r)),
                _ => None,
            })
            .collect()
    }

    fn stroke_circles(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, Call::StrokeCircle(..)))
            .count()
    }

    fn balanced(&self) -> bool {
        let saves = self.calls.iter().filter(|c| **c == Call::Save).count();
        let restores = self.calls.iter().filter(|c| **c == Call::Restore).count();
        saves == restores
    }
}

impl Surface2d for Recorder {
    fn save(&mut self) {
        self.calls.push(Call::Save);
    }
    fn restore(&mut self) {
        self.calls.push(Call::Restore);
    }
    fn set_global_alpha(&mut self, alpha: f32) {
        self.calls.push(Call::Alpha(alpha));
    }
    fn set_fill_color(&mut self, color: Rgb) {
        self.calls.push(Call::Fill(color));
    }
    fn set_stroke_color(&mut self, color: Rgb) {
        self.calls.push(Call::Stroke(color));
    }
    fn set_line_width(&mut self, width: f32) {
        self.calls.push(Call::LineWidth(width));
    }
    fn set_glow(&mut self, blur: f32, color: Rgb) {
        self.calls.push(Call::Glow(blur, color));
    }
    fn fill_circle(&mut self, x: f32, y: f32, radius: f32) {
        self.calls.push(Call::FillCircle(x, y, radius));
    }
    fn stroke_circle(&mut self, x: f32, y: f32, radius: f32) {
        self.calls.push(Call::StrokeCircle(x, y, radius));
    }
}

fn all_alive(particles: &[Particle]) -> bool {
    particles.iter().all(|p| p.life > 0.0)
}

#[test]
fn integrate_drops_particles_without_life_left() {
    let base = Particle {
        pos: Vec2::ZERO,
        vel: Vec2::new(1.0, 0.0),
        life: 0.0,
        max_life: 10.0,
        color: Rgb(255, 255, 255),
        size: 2.0,
    };
    let mut particles = vec![
        base,
        Particle { life: 1.0, ..base },
        Particle { life: 5.0, ..base },
    ];
    integrate(&mut particles, FIREWORK_PHYSICS);
    assert_eq!(particles.len(), 1);
    assert_eq!(particles[0].life, 4.0);
    assert!((particles[0].pos.x - 1.0).abs() < 1e-6);
}

#[test]
fn particle_step_applies_gravity_then_drag() {
    let mut p = Particle {
        pos: Vec2::new(10.0, 10.0),
        vel: Vec2::new(2.0, 0.0),
        life: 3.0,
        max_life: 3.0,
        color: Rgb(0, 0, 0),
        size: 1.0,
    };
    let physics = Physics {
        gravity: 1.0,
        drag: 0.5,
    };
    p.step(physics);
    assert_eq!(p.pos, Vec2::new(12.0, 10.0));
    assert_eq!(p.vel, Vec2::new(1.0, 0.5));
    assert_eq!(p.life, 2.0);
}

#[test]
fn fireworks_burst_has_configured_count() {
    let mut fx = EffectsManager::with_seed(1);
    assert_eq!(fx.celebration_status(), CelebrationStatus::Idle);
    fx.initialize_fireworks(Vec2::new(400.0, 200.0));
    assert_eq!(fx.fireworks().len(), 40);
    assert_eq!(fx.celebration_status(), CelebrationStatus::Running);
    assert!(fx.is_celebrating());
}

#[test]
fn fireworks_are_evenly_spaced() {
    let mut fx = EffectsManager::with_seed(2);
    fx.initialize_fireworks(Vec2::ZERO);
    for (i, p) in fx.fireworks().iter().enumerate() {
        let angle = TAU * i as f32 / FIREWORK_PARTICLES as f32;
        let dir = p.vel.normalize();
        assert!((dir.x - angle.cos()).abs() < 1e-4, "particle {i}");
        assert!((dir.y - angle.sin()).abs() < 1e-4, "particle {i}");
        let speed = p.vel.length();
        let (lo, hi) = FIREWORK_BURST.speed;
        assert!(speed >= lo - 1e-4 && speed <= hi + 1e-4);
        assert!(FIREWORK_PALETTE.contains(&p.color));
    }
}

#[test]
fn reinitializing_fireworks_replaces_the_burst() {
    let mut fx = EffectsManager::with_seed(3);
    fx.initialize_fireworks(Vec2::ZERO);
    for _ in 0..10 {
        fx.update_celebration();
    }
    fx.initialize_fireworks(Vec2::new(50.0, 50.0));
    assert_eq!(fx.fireworks().len(), FIREWORK_PARTICLES);
    assert_eq!(fx.celebration_timer().elapsed(), 0);
}

#[test]
fn celebration_finishes_at_duration_and_freezes() {
    let mut fx = EffectsManager::with_seed(4);
    fx.initialize_fireworks(Vec2::new(300.0, 150.0));
    for frame in 1..CELEBRATION_DURATION {
        assert_eq!(
            fx.update_celebration(),
            CelebrationStatus::Running,
            "frame {frame}"
        );
        assert!(all_alive(fx.fireworks()));
    }
    assert_eq!(fx.update_celebration(), CelebrationStatus::Finished);

    let count_at_finish = fx.fireworks().len();
    for _ in 0..20 {
        assert_eq!(fx.update_celebration(), CelebrationStatus::Finished);
        assert!(fx.fireworks().len() <= count_at_finish);
    }
    assert_eq!(fx.celebration_timer().elapsed(), CELEBRATION_DURATION);
}

#[test]
fn celebration_spawns_follow_up_bursts() {
    let mut fx = EffectsManager::with_seed(5);
    fx.initialize_fireworks(Vec2::new(300.0, 150.0));
    for _ in 0..FIREWORK_REBURST_INTERVAL {
        fx.update_celebration();
    }
    // the first burst lives at least 60 frames, so both bursts are present
    assert_eq!(fx.fireworks().len(), FIREWORK_PARTICLES * 2);
}

#[test]
fn idle_celebration_reports_idle() {
    let mut fx = EffectsManager::with_seed(6);
    assert_eq!(fx.update_celebration(), CelebrationStatus::Idle);
    assert!(fx.fireworks().is_empty());
}

#[test]
fn armor_explosion_has_burst_plus_shards() {
    let mut fx = EffectsManager::with_seed(7);
    fx.activate_armor(Vec2::new(120.0, 300.0));
    assert_eq!(fx.explosion().len(), 90);
    assert_eq!(
        fx.explosion()
            .iter()
            .filter(|p| p.color == ARMOR_BURST_COLOR)
            .count(),
        ARMOR_BURST_PARTICLES
    );
    assert_eq!(fx.armor_status(), ArmorStatus::Activating);
}

#[test]
fn armor_activation_completes_and_particles_expire() {
    let mut fx = EffectsManager::with_seed(8);
    fx.activate_armor(Vec2::ZERO);
    for _ in 1..ARMOR_ACTIVATION_DURATION {
        assert_eq!(fx.update_armor_activation(), ArmorStatus::Activating);
        assert!(all_alive(fx.explosion()));
    }
    assert_eq!(fx.update_armor_activation(), ArmorStatus::Complete);
    assert!(!fx.is_armor_activating());

    // longest-lived shard is under 70 frames
    for _ in 0..ARMOR_SHARDS.life.1 as u32 {
        fx.update_armor_activation();
    }
    assert!(fx.explosion().is_empty());
    assert_eq!(fx.armor_status(), ArmorStatus::Complete);
}

#[test]
fn sparkle_trail_never_exceeds_cap() {
    let mut fx = EffectsManager::with_seed(9);
    for _ in 0..1000 {
        fx.add_sparkle_trail(Vec2::new(10.0, 10.0));
        assert!(fx.sparkles().len() <= SPARKLE_MAX);
    }
    assert_eq!(fx.sparkles().len(), SPARKLE_MAX);
    assert!(!fx.add_sparkle_trail(Vec2::ZERO));
}

#[test]
fn sparkle_trail_spawn_is_probabilistic() {
    let mut fx = EffectsManager::with_seed(10);
    let mut added = 0;
    for _ in 0..400 {
        if fx.add_sparkle_trail(Vec2::ZERO) {
            added += 1;
        }
        fx.reset();
    }
    assert!(added > 60 && added < 200, "added {added} of 400");
}

#[test]
fn sparkles_stay_near_anchor_and_expire() {
    let mut fx = EffectsManager::with_seed(11);
    let anchor = Vec2::new(500.0, 250.0);
    while fx.sparkles().is_empty() {
        fx.add_sparkle_trail(anchor);
    }
    let p = fx.sparkles()[0];
    assert!((p.pos.x - anchor.x).abs() <= SPARKLE_JITTER);
    assert!((p.pos.y - anchor.y).abs() <= SPARKLE_JITTER);
    for _ in 0..SPARKLE.life.1 as u32 {
        fx.update_sparkle_trails();
        assert!(all_alive(fx.sparkles()));
    }
    assert!(fx.sparkles().is_empty());
}

#[test]
fn reset_clears_particles_and_timers() {
    let mut fx = EffectsManager::with_seed(12);
    fx.initialize_fireworks(Vec2::ZERO);
    fx.activate_armor(Vec2::ZERO);
    while fx.sparkles().is_empty() {
        fx.add_sparkle_trail(Vec2::ZERO);
    }
    fx.reset();
    assert!(fx.fireworks().is_empty());
    assert!(fx.explosion().is_empty());
    assert!(fx.sparkles().is_empty());
    assert_eq!(fx.celebration_status(), CelebrationStatus::Idle);
    assert_eq!(fx.armor_status(), ArmorStatus::Idle);
}

#[test]
fn render_fireworks_fades_with_life() {
    let mut fx = EffectsManager::with_seed(13);
    let mut surface = Recorder::default();
    fx.render_fireworks(&mut surface);
    assert!(surface.calls.is_empty());

    fx.initialize_fireworks(Vec2::new(100.0, 100.0));
    fx.render_fireworks(&mut surface);
    assert_eq!(surface.fill_circles().len(), FIREWORK_PARTICLES);
    assert!(surface.balanced());
    // fresh particles draw at full opacity and size
    assert!(surface.calls.contains(&Call::Alpha(1.0)));
    for ((_, _, r), p) in surface.fill_circles().iter().zip(fx.fireworks()) {
        assert!((r - p.size).abs() < 1e-5);
    }

    for _ in 0..10 {
        fx.update_celebration();
    }
    let mut later = Recorder::default();
    fx.render_fireworks(&mut later);
    for ((_, _, r), p) in later.fill_circles().iter().zip(fx.fireworks()) {
        assert!((r - p.size * p.life_fraction()).abs() < 1e-5);
        assert!(*r < p.size);
    }
}

#[test]
fn render_armor_explosion_offsets_by_camera_and_draws_shockwave() {
    let mut fx = EffectsManager::with_seed(14);
    fx.activate_armor(Vec2::new(300.0, 200.0));
    fx.update_armor_activation();

    let mut surface = Recorder::default();
    fx.render_armor_explosion(&mut surface, 100.0);
    assert_eq!(surface.stroke_circles(), 1);
    assert_eq!(surface.fill_circles().len(), fx.explosion().len());
    for ((x, y, _), p) in surface.fill_circles().iter().zip(fx.explosion()) {
        assert!((x - (p.pos.x - 100.0)).abs() < 1e-4);
        assert!((y - p.pos.y).abs() < 1e-4);
    }
    assert!(surface.balanced());

    while fx.update_armor_activation() != ArmorStatus::Complete {}
    let mut after = Recorder::default();
    fx.render_armor_explosion(&mut after, 100.0);
    assert_eq!(after.stroke_circles(), 0);
}

#[test]
fn render_sparkles_uses_glow() {
    let mut fx = EffectsManager::with_seed(15);
    while fx.sparkles().len() < 3 {
        fx.add_sparkle_trail(Vec2::new(50.0, 50.0));
    }
    let mut surface = Recorder::default();
    fx.render_sparkle_trails(&mut surface, 0.0);
    assert!(surface
        .calls
        .contains(&Call::Glow(SPARKLE_GLOW_BLUR, SPARKLE_COLOR)));
    assert_eq!(surface.fill_circles().len(), 3);
    assert!(surface.balanced());
}

#[test]
fn frame_timer_freezes_at_duration() {
    let mut t = FrameTimer::new(3);
    assert!(!t.tick());
    assert_eq!(t.elapsed(), 0);
    t.restart();
    assert!(!t.tick());
    assert!(!t.tick());
    assert!(t.tick());
    assert!(t.tick());
    assert_eq!(t.elapsed(), 3);
    assert!((t.progress() - 1.0).abs() < 1e-6);
    t.stop();
    assert!(!t.is_running() && !t.is_finished());
}

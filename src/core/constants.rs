use super::draw::Rgb;
use super::particles::{BurstSpec, Physics};

// Gameplay/effects tuning shared by the managers. All durations and lifetimes
// are in animation frames, all speeds in canvas pixels per frame.

// Fireworks (level-complete celebration)
pub const FIREWORK_PARTICLES: usize = 40;
pub const FIREWORK_BURST: BurstSpec = BurstSpec {
    count: FIREWORK_PARTICLES,
    speed: (2.0, 6.0),
    life: (60.0, 100.0),
    size: (2.0, 4.0),
};
pub const FIREWORK_PHYSICS: Physics = Physics {
    gravity: 0.08,
    drag: 0.98,
};
pub const FIREWORK_REBURST_INTERVAL: u32 = 45;
pub const FIREWORK_SCATTER: f32 = 120.0; // max offset of follow-up bursts from the origin
pub const CELEBRATION_DURATION: u32 = 180;

pub const FIREWORK_PALETTE: [Rgb; 6] = [
    Rgb(255, 70, 70),   // red
    Rgb(255, 200, 40),  // gold
    Rgb(80, 220, 120),  // green
    Rgb(70, 160, 255),  // blue
    Rgb(200, 100, 255), // violet
    Rgb(255, 255, 255), // white
];

// Armor activation explosion
pub const ARMOR_BURST_PARTICLES: usize = 60;
pub const ARMOR_SHARD_PARTICLES: usize = 30;
pub const ARMOR_BURST: BurstSpec = BurstSpec {
    count: ARMOR_BURST_PARTICLES,
    speed: (3.0, 8.0),
    life: (30.0, 60.0),
    size: (3.0, 6.0),
};
pub const ARMOR_SHARDS: BurstSpec = BurstSpec {
    count: ARMOR_SHARD_PARTICLES,
    speed: (1.0, 4.0),
    life: (40.0, 70.0),
    size: (1.5, 3.0),
};
pub const ARMOR_PHYSICS: Physics = Physics {
    gravity: 0.15,
    drag: 0.95,
};
pub const ARMOR_ACTIVATION_DURATION: u32 = 60;
pub const ARMOR_BURST_COLOR: Rgb = Rgb(120, 200, 255);
pub const ARMOR_SHARD_COLOR: Rgb = Rgb(255, 255, 255);
pub const SHOCKWAVE_MAX_RADIUS: f32 = 80.0;
pub const SHOCKWAVE_LINE_WIDTH: f32 = 3.0;

// Sparkle trail behind the armored player
pub const SPARKLE_MAX: usize = 20;
pub const SPARKLE_SPAWN_CHANCE: f64 = 0.3;
pub const SPARKLE_JITTER: f32 = 8.0; // spawn offset around the anchor, each axis
pub const SPARKLE: BurstSpec = BurstSpec {
    count: 1,
    speed: (0.2, 1.2),
    life: (20.0, 40.0),
    size: (1.0, 3.0),
};
pub const SPARKLE_PHYSICS: Physics = Physics {
    gravity: 0.02,
    drag: 0.96,
};
pub const SPARKLE_COLOR: Rgb = Rgb(255, 240, 150);
pub const SPARKLE_GLOW_BLUR: f32 = 6.0;

// Player movement
pub const MOVE_SPEED: f32 = 4.0;
pub const DUCK_SPEED_FACTOR: f32 = 0.5;
pub const JUMP_VELOCITY: f32 = 12.0;

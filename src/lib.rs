//! Squish Platformer - rules core for a squash-and-stretch 2D platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, animation state, collisions, round state)
//! - `settings`: Variant presets and tunable feature flags
//! - `platform`: Host bindings (browser via wasm-bindgen)

pub mod platform;
pub mod settings;
pub mod sim;

pub use settings::{InputMode, Settings, Variant};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per rendered frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Play field dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;
    /// Downward acceleration (units/s²)
    pub const GRAVITY: f32 = 300.0;

    /// Player defaults
    pub const PLAYER_START: (f32, f32) = (100.0, 450.0);
    pub const PLAYER_SIZE: f32 = 60.0;
    pub const PLAYER_BOUNCE: f32 = 0.2;
    pub const WALK_SPEED: f32 = 160.0;
    /// Upward impulse applied on jump
    pub const JUMP_IMPULSE: f32 = 330.0;
    /// Drag mode: horizontal velocity per pixel of drag delta
    pub const DRAG_VELOCITY_FACTOR: f32 = 2.0;

    /// Sine rates below are divisors of simulation milliseconds: sin(t / rate).
    /// Walk cycle (~200 ms period) and amplitude (fraction of original scale)
    pub const WALK_RATE_MS: f64 = 32.0;
    pub const WALK_AMPLITUDE: f32 = 0.08;
    /// Walk bob: vertical render offset
    pub const WALK_BOB_RATE_MS: f64 = 16.0;
    pub const WALK_BOB_PIXELS: f32 = 2.0;
    /// Ease back to original scale when idling
    pub const IDLE_RESET_MS: f64 = 150.0;
    /// Jump stretch (x, y) relative to original scale
    pub const JUMP_STRETCH: (f32, f32) = (0.8, 1.2);
    pub const JUMP_TWEEN_MS: f64 = 250.0;
    /// Falling squash (x, y)
    pub const FALL_SQUASH: (f32, f32) = (1.2, 0.8);
    pub const FALL_TWEEN_MS: f64 = 120.0;
    /// Landing squash (x, y)
    pub const LAND_SQUASH: (f32, f32) = (1.4, 0.6);
    pub const LAND_TWEEN_MS: f64 = 100.0;

    /// Villain defaults
    pub const VILLAIN_START: (f32, f32) = (700.0, 100.0);
    pub const VILLAIN_SIZE: (f32, f32) = (60.0, 80.0);
    pub const VILLAIN_BOUNCE: f32 = 1.0;
    /// Anti-stall: below this speed on either axis the villain is re-randomized
    pub const VILLAIN_MIN_AXIS_SPEED: f32 = 50.0;
    /// Random velocity range for villains (per axis)
    pub const VILLAIN_MAX_AXIS_SPEED: f32 = 200.0;
    pub const VILLAIN_START_VY: f32 = 20.0;
    pub const VILLAIN_GLOW_RATE_MS: f64 = 300.0;
    pub const VILLAIN_WOBBLE_RATE_MS: f64 = 200.0;
    pub const VILLAIN_PULSE_RATE_MS: f64 = 150.0;
    pub const VILLAIN_PULSE_AMPLITUDE: f32 = 0.1;
    /// Spawn height for escalation villains
    pub const VILLAIN_SPAWN_Y: f32 = 100.0;

    /// Drip projectiles
    pub const DRIP_CHANCE: f64 = 0.02;
    pub const DRIP_RADIUS: f32 = 5.0;
    pub const DRIP_SPEED: f32 = 100.0;
    pub const DRIP_SPREAD: f32 = 20.0;
    pub const DRIP_DROP: f32 = 40.0;

    /// Collectibles / villagers
    pub const COLLECTIBLE_SIZE: (f32, f32) = (20.0, 20.0);
    pub const COLLECTIBLE_BOUNCE: f32 = 0.8;
    pub const SIMPLE_REWARD: u64 = 10;
    pub const RESCUE_REWARD: u64 = 50;
    /// Respawned group members are staggered across the top of the field
    pub const RESPAWN_STEP_X: f32 = 70.0;
    pub const RESPAWN_MARGIN_X: f32 = 12.0;

    /// NPC idle motion
    pub const NPC_SWAY_RATE_MS: f64 = 300.0;
    pub const NPC_SWAY_RADIANS: f32 = 0.1;
    pub const NPC_BOB_RATE_MS: f64 = 250.0;
    pub const NPC_BOB_PIXELS: f32 = 3.0;
    pub const NPC_BREATH_RATE_MS: f64 = 500.0;
    pub const NPC_BREATH_AMPLITUDE: f32 = 0.1;
    /// Horizontal distance (px) that shifts an NPC's phase by one radian
    pub const NPC_PHASE_SCALE: f32 = 50.0;

    /// Tints (0xRRGGBB)
    pub const DEFEAT_TINT: u32 = 0xff0000;
    pub const NEUTRAL_TINT: u32 = 0xffffff;
}

/// `sin(time_ms / rate_ms + phase)`
#[inline]
pub fn wave(time_ms: f64, rate_ms: f64, phase: f32) -> f32 {
    ((time_ms / rate_ms) as f32 + phase).sin()
}

/// Pack an RGB triple into a 0xRRGGBB tint
#[inline]
pub fn rgb(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

/// Axis-aligned overlap test between two boxes given by center and half extents
#[inline]
pub fn boxes_overlap(a: Vec2, a_half: Vec2, b: Vec2, b_half: Vec2) -> bool {
    let d = (a - b).abs();
    d.x < a_half.x + b_half.x && d.y < a_half.y + b_half.y
}

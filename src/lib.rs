//! Retro Breaker - A Breakout/Arkanoid arcade game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball physics, blocks, bosses, items, stage flow)
//! - `audio`: Sound cue seam consumed by the host's synthesizer
//! - `highscores`: Top-10 ranking and name entry
//! - `persistence`: Ranking/settings stores (memory, JSON file, LocalStorage)
//! - `platform`: Logging bootstrap and the fixed-timestep frame clock
//! - `game`: Host-facing driver tying the above together

pub mod audio;
pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use highscores::HighScores;
pub use settings::{QualityPreset, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep in milliseconds (60 Hz)
    pub const TICK_MS: f64 = 16.67;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield dimensions
    pub const SCREEN_W: f32 = 480.0;
    pub const SCREEN_H: f32 = 640.0;
    /// HUD strip at the top; acts as the ceiling
    pub const STATUS_BAR_H: f32 = 42.0;

    /// Block grid
    pub const BLOCK_W: f32 = 48.0;
    pub const BLOCK_H: f32 = 20.0;
    pub const BLOCK_COLS: i32 = 10;
    pub const BLOCK_OFFSET_X: f32 = 0.0;
    pub const BLOCK_OFFSET_Y: f32 = 50.0;
    pub const MAX_ROWS: i32 = 10;

    /// Ball defaults (velocities are pixels per tick)
    pub const BALL_RADIUS: f32 = 5.0;
    pub const BALL_MAX_SPEED: f32 = 12.0;
    /// Launch speed grows with stage up to this
    pub const BALL_LAUNCH_MAX_SPEED: f32 = 9.0;
    /// Max paddle deflection from vertical (degrees)
    pub const PADDLE_MAX_BOUNCE_DEG: f32 = 70.0;
    /// Upper bound on simultaneous balls (splits + multiball)
    pub const MAX_BALLS: usize = 64;

    /// Paddle defaults
    pub const PADDLE_Y: f32 = SCREEN_H - 90.0;
    pub const PADDLE_BASE_WIDTH: f32 = 80.0;
    pub const PADDLE_HEIGHT: f32 = 12.0;
    pub const PADDLE_KEY_SPEED: f32 = 8.0;
    pub const PADDLE_POINTER_EASE: f32 = 0.15;

    /// One-shot shield line near the bottom
    pub const SHIELD_Y: f32 = SCREEN_H - 30.0;
    pub const SHIELD_BAND: f32 = 6.0;

    /// Session
    pub const START_LIVES: u32 = 3;
    pub const MAX_LIVES: u32 = 5;
    pub const FINAL_STAGE: u32 = 16;
    pub const READY_TICKS: u32 = 120;
    pub const COMBO_WINDOW_TICKS: u32 = 180;
    pub const MAX_COMBO_MULTIPLIER: u64 = 8;
    pub const LIFE_BONUS: u64 = 1000;

    /// Effect durations (ticks at 60 Hz)
    pub const FIREBALL_TICKS: u32 = 480;
    pub const SLOW_TICKS: u32 = 180;
    pub const SCORE_X2_TICKS: u32 = 1200;
    pub const EXPAND_TICKS: u32 = 900;
    pub const SHRINK_TICKS: u32 = 600;
    pub const EXPAND_FACTOR: f32 = 1.8;
    pub const SHRINK_FACTOR: f32 = 0.6;
    pub const MAX_EXPAND_STACKS: usize = 3;
    /// Fireball damage (kills any block in one hit)
    pub const FIREBALL_DAMAGE: i32 = 999;
    /// Ball speed multiplier while slowed
    pub const SLOW_SPEED_MULT: f32 = 0.5;

    /// Falling pickups
    pub const ITEM_W: f32 = 30.0;
    pub const ITEM_H: f32 = 16.0;
    pub const ITEM_FALL_SPEED: f32 = 2.0;

    /// Bosses
    pub const BOSS_Y: f32 = 80.0;
    pub const BOSS_HEIGHT: f32 = 30.0;
    pub const BOSS_INVULN_TICKS: u32 = 10;
    pub const BOSS_HIT_SCORE: u64 = 50;
    pub const BOSS_BULLET_RADIUS: f32 = 4.0;
    pub const CORE_W: f32 = 30.0;
    pub const CORE_H: f32 = 20.0;
}

/// Rotate a vector by `angle` radians (counter-clockwise in math space)
#[inline]
pub fn rotate(v: Vec2, angle: f32) -> Vec2 {
    Vec2::from_angle(angle).rotate(v)
}

/// Combo score multiplier: +1 every 3 consecutive breaks, capped at 8
#[inline]
pub fn combo_multiplier(combo: u32) -> u64 {
    (1 + (combo / 3) as u64).min(consts::MAX_COMBO_MULTIPLIER)
}

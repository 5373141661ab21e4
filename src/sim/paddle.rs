//! The player's paddle and its size modifiers

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;

/// One expand or shrink stack. Carries the factor it applied so expiry
/// removes exactly that factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WidthTimer {
    pub factor: f32,
    pub remaining: u32,
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Center x, clamped to the screen
    pub x: f32,
    /// Top edge
    pub y: f32,
    pub base_width: f32,
    pub height: f32,
    pub expand_timers: Vec<WidthTimer>,
    pub shrink_timers: Vec<WidthTimer>,
}

impl Default for Paddle {
    fn default() -> Self {
        Self {
            x: SCREEN_W / 2.0,
            y: PADDLE_Y,
            base_width: PADDLE_BASE_WIDTH,
            height: PADDLE_HEIGHT,
            expand_timers: Vec::new(),
            shrink_timers: Vec::new(),
        }
    }
}

impl Paddle {
    /// Product of every live size stack. Empty product is exactly 1.0.
    pub fn width_multiplier(&self) -> f32 {
        self.expand_timers
            .iter()
            .chain(self.shrink_timers.iter())
            .map(|t| t.factor)
            .product()
    }

    /// Width as drawn and as used for collisions
    pub fn draw_width(&self) -> f32 {
        self.base_width * self.width_multiplier()
    }

    pub fn rect(&self) -> Rect {
        let w = self.draw_width();
        Rect::new(self.x - w / 2.0, self.y, w, self.height)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Add an expand stack. Returns false when already at the stack cap.
    pub fn expand(&mut self) -> bool {
        if self.expand_timers.len() >= MAX_EXPAND_STACKS {
            return false;
        }
        self.expand_timers.push(WidthTimer {
            factor: EXPAND_FACTOR,
            remaining: EXPAND_TICKS,
        });
        true
    }

    /// Add a shrink stack (uncapped)
    pub fn shrink(&mut self) {
        self.shrink_timers.push(WidthTimer {
            factor: SHRINK_FACTOR,
            remaining: SHRINK_TICKS,
        });
    }

    /// Move toward a pointer target with easing
    pub fn ease_toward(&mut self, target_x: f32) {
        self.x += (target_x - self.x) * PADDLE_POINTER_EASE;
    }

    /// Keyboard nudge: -1 left, +1 right
    pub fn nudge(&mut self, dir: f32) {
        self.x += dir * PADDLE_KEY_SPEED;
    }

    /// Clamp to screen and count down size stacks
    pub fn update(&mut self) {
        self.clamp_to_screen();
        tick_timers(&mut self.expand_timers);
        tick_timers(&mut self.shrink_timers);
    }

    pub fn clamp_to_screen(&mut self) {
        let half = self.draw_width() / 2.0;
        if self.x - half < 0.0 {
            self.x = half;
        }
        if self.x + half > SCREEN_W {
            self.x = SCREEN_W - half;
        }
    }

    /// Center position and drop every size stack
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

fn tick_timers(timers: &mut Vec<WidthTimer>) {
    for timer in timers.iter_mut() {
        timer.remaining = timer.remaining.saturating_sub(1);
    }
    timers.retain(|t| t.remaining > 0);
}

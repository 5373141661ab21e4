//! Ball physics

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::clamp_speed;
use super::paddle::Paddle;
use crate::consts::*;

/// What happened to a ball during its own update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BallStep {
    /// Bounced off the paddle (resets the combo)
    pub paddle_bounce: bool,
    /// Bounced off the shield line (shield consumed)
    pub shield_bounce: bool,
    /// Fell past the bottom edge this tick
    pub missed: bool,
}

/// A ball entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Pixels per tick
    pub vel: Vec2,
    pub radius: f32,
    pub active: bool,
    /// Pinned to the paddle waiting for launch
    pub stuck: bool,
    /// Horizontal offset from paddle center while stuck
    pub stuck_offset: f32,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            radius: BALL_RADIUS,
            active: true,
            stuck: false,
            stuck_offset: 0.0,
        }
    }

    /// A fresh ball resting on the paddle
    pub fn stuck_to(paddle: &Paddle) -> Self {
        let mut ball = Self::new(Vec2::new(paddle.x, paddle.y - BALL_RADIUS), Vec2::ZERO);
        ball.stuck = true;
        ball
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// In play and moving on its own
    #[inline]
    pub fn is_free(&self) -> bool {
        self.active && !self.stuck
    }

    /// Release from the paddle. Launch speed grows with the stage.
    pub fn launch(&mut self, stage: u32, rng: &mut impl Rng) {
        if !self.stuck {
            return;
        }
        let base_speed =
            (5.0 + stage.saturating_sub(1) as f32 * 0.3).min(BALL_LAUNCH_MAX_SPEED);
        self.vel = Vec2::new((rng.random::<f32>() - 0.5) * 3.0, -base_speed);
        self.stuck = false;
    }

    /// Reverse direction entirely (Mirror block)
    pub fn reverse(&mut self) {
        self.vel = -self.vel;
    }

    /// Enforce the global speed cap
    pub fn clamp_speed(&mut self) {
        self.vel = clamp_speed(self.vel, BALL_MAX_SPEED);
    }

    /// Advance one tick: integrate, then resolve walls, ceiling, shield,
    /// bottom edge and paddle, then cap speed.
    pub fn update(&mut self, paddle: &Paddle, slowed: bool, shield: &mut bool) -> BallStep {
        let mut step = BallStep::default();

        if self.stuck {
            self.pos = Vec2::new(paddle.x + self.stuck_offset, paddle.y - self.radius);
            return step;
        }

        let speed_mult = if slowed { SLOW_SPEED_MULT } else { 1.0 };
        self.pos += self.vel * speed_mult;

        // Side walls
        if self.pos.x - self.radius < 0.0 {
            self.pos.x = self.radius;
            self.vel.x = self.vel.x.abs();
        }
        if self.pos.x + self.radius > SCREEN_W {
            self.pos.x = SCREEN_W - self.radius;
            self.vel.x = -self.vel.x.abs();
        }
        // Ceiling sits under the status bar
        if self.pos.y - self.radius < STATUS_BAR_H {
            self.pos.y = STATUS_BAR_H + self.radius;
            self.vel.y = self.vel.y.abs();
        }

        let bottom = self.pos.y + self.radius;
        if *shield && self.vel.y > 0.0 && bottom >= SHIELD_Y && bottom <= SHIELD_Y + SHIELD_BAND {
            self.vel.y = -self.vel.y.abs();
            *shield = false;
            step.shield_bounce = true;
        }

        if self.pos.y - self.radius > SCREEN_H {
            self.active = false;
            step.missed = true;
        }

        let half_w = paddle.draw_width() / 2.0;
        let bottom = self.pos.y + self.radius;
        if self.vel.y > 0.0
            && bottom >= paddle.y
            && bottom <= paddle.y + paddle.height + 4.0
            && self.pos.x >= paddle.x - half_w - self.radius
            && self.pos.x <= paddle.x + half_w + self.radius
        {
            self.bounce_off_paddle(paddle);
            step.paddle_bounce = true;
        }

        self.clamp_speed();
        step
    }

    /// Angle set by where the ball lands: center sends it straight up,
    /// edges up to 70 degrees off vertical. Speed is kept (capped).
    fn bounce_off_paddle(&mut self, paddle: &Paddle) {
        let half_w = paddle.draw_width() / 2.0;
        let rel_x = ((self.pos.x - paddle.x) / half_w).clamp(-1.0, 1.0);
        let angle = rel_x * PADDLE_MAX_BOUNCE_DEG.to_radians();
        let speed = self.speed().min(BALL_MAX_SPEED);
        self.vel = Vec2::new(speed * angle.sin(), -speed * angle.cos());
        self.pos.y = paddle.y - self.radius;
    }
}

//! Collision primitives for axis-aligned geometry
//!
//! Every collider in the playfield is a rectangle (blocks, paddle, boss hit
//! boxes, pickups) and every mover is tested by its bounding square. The
//! response picks the axis of least penetration.

use glam::Vec2;

/// Axis-aligned rectangle in screen space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    /// Rectangle from its top-left corner and size
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            max: Vec2::new(x + w, y + h),
        }
    }

    /// Rectangle centered on a point
    pub fn centered(center: Vec2, w: f32, h: f32) -> Self {
        let half = Vec2::new(w, h) * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }
}

/// Strict overlap between a circle's bounding square and a rectangle.
///
/// This deliberately ignores the rounded corners of the circle: a ball sitting
/// diagonally off a block corner still counts as touching.
#[inline]
pub fn circle_rect_overlap(center: Vec2, radius: f32, rect: &Rect) -> bool {
    center.x + radius > rect.min.x
        && center.x - radius < rect.max.x
        && center.y + radius > rect.min.y
        && center.y - radius < rect.max.y
}

/// Penetration depth of a circle's bounding square past each rectangle edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Penetration {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Penetration {
    pub fn of(center: Vec2, radius: f32, rect: &Rect) -> Self {
        Self {
            left: (center.x + radius) - rect.min.x,
            right: rect.max.x - (center.x - radius),
            top: (center.y + radius) - rect.min.y,
            bottom: rect.max.y - (center.y - radius),
        }
    }

    /// Axis to reflect along: the one with the shallowest penetration.
    /// Ties go to the vertical axis.
    pub fn reflect_axis(&self) -> ReflectAxis {
        let min = self.left.min(self.right).min(self.top).min(self.bottom);
        if min == self.top || min == self.bottom {
            ReflectAxis::Vertical
        } else {
            ReflectAxis::Horizontal
        }
    }
}

/// Which velocity component a collision flips
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReflectAxis {
    /// Hit a top/bottom face: flip vy
    Vertical,
    /// Hit a left/right face: flip vx
    Horizontal,
}

impl ReflectAxis {
    #[inline]
    pub fn apply(self, vel: Vec2) -> Vec2 {
        match self {
            ReflectAxis::Vertical => Vec2::new(vel.x, -vel.y),
            ReflectAxis::Horizontal => Vec2::new(-vel.x, vel.y),
        }
    }
}

/// Rescale a velocity so its magnitude does not exceed `max`.
/// Direction is preserved; both components shrink together.
#[inline]
pub fn clamp_speed(vel: Vec2, max: f32) -> Vec2 {
    let speed = vel.length();
    if speed > max {
        vel * (max / speed)
    } else {
        vel
    }
}

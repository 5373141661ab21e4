//! Pickups and timed power-up effects

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::block::BlockKind;
use super::paddle::Paddle;
use crate::consts::*;

/// Pickup types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    Expand,
    Shrink,
    MultiBall,
    Fireball,
    Shield,
    ScoreX2,
    /// Gold-only bonus life
    ExtraLife,
}

impl ItemKind {
    /// Short label drawn on the falling capsule
    pub fn label(self) -> &'static str {
        match self {
            ItemKind::Expand => "E",
            ItemKind::Shrink => "S",
            ItemKind::MultiBall => "M",
            ItemKind::Fireball => "F",
            ItemKind::Shield => "D",
            ItemKind::ScoreX2 => "x2",
            ItemKind::ExtraLife => "1UP",
        }
    }

    pub fn color(self) -> u32 {
        match self {
            ItemKind::Expand => 0x0000ff,
            ItemKind::Shrink => 0xff0000,
            ItemKind::MultiBall => 0x00ff00,
            ItemKind::Fireball => 0xff6600,
            ItemKind::Shield => 0x00ffff,
            ItemKind::ScoreX2 => 0xffff00,
            ItemKind::ExtraLife => 0xff66cc,
        }
    }
}

const STANDARD_POOL: [ItemKind; 5] = [
    ItemKind::Expand,
    ItemKind::MultiBall,
    ItemKind::Fireball,
    ItemKind::Shield,
    ItemKind::ScoreX2,
];

const GOLD_POOL: [ItemKind; 6] = [
    ItemKind::Expand,
    ItemKind::MultiBall,
    ItemKind::Fireball,
    ItemKind::Shield,
    ItemKind::ScoreX2,
    ItemKind::ExtraLife,
];

const POISON_POOL: [ItemKind; 1] = [ItemKind::Shrink];

/// Which pickups a destroyed block may drop
pub fn drop_pool(kind: BlockKind) -> &'static [ItemKind] {
    match kind {
        BlockKind::Gold => &GOLD_POOL,
        BlockKind::Poison => &POISON_POOL,
        _ => &STANDARD_POOL,
    }
}

/// Roll for a drop. Gold always drops; everything else uses its table rate.
pub fn roll_drop(kind: BlockKind, rng: &mut impl Rng) -> Option<ItemKind> {
    let rate = if kind == BlockKind::Gold {
        1.0
    } else {
        kind.info().drop_rate
    };
    if rng.random::<f32>() >= rate {
        return None;
    }
    let pool = drop_pool(kind);
    Some(pool[rng.random_range(0..pool.len())])
}

/// A falling pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    /// Center
    pub pos: Vec2,
    pub vel: Vec2,
    pub kind: ItemKind,
    pub active: bool,
}

impl Item {
    pub fn new(pos: Vec2, kind: ItemKind) -> Self {
        Self {
            pos,
            vel: Vec2::new(0.0, ITEM_FALL_SPEED),
            kind,
            active: true,
        }
    }

    /// Fall one tick. Returns true if the paddle caught it.
    pub fn update(&mut self, paddle: &Paddle) -> bool {
        if !self.active {
            return false;
        }
        self.pos += self.vel;
        if self.pos.y > SCREEN_H {
            self.active = false;
            return false;
        }
        if self.touches(paddle) {
            self.active = false;
            return true;
        }
        false
    }

    fn touches(&self, paddle: &Paddle) -> bool {
        let half_w = paddle.draw_width() / 2.0;
        self.pos.y + ITEM_H >= paddle.y
            && self.pos.y <= paddle.y + paddle.height
            && self.pos.x + ITEM_W / 2.0 >= paddle.x - half_w
            && self.pos.x - ITEM_W / 2.0 <= paddle.x + half_w
    }
}

/// Timed effects that live outside the paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectKind {
    Fireball,
    Slow,
    ScoreX2,
}

impl EffectKind {
    pub fn label(self) -> &'static str {
        match self {
            EffectKind::Fireball => "FIRE",
            EffectKind::Slow => "SLOW",
            EffectKind::ScoreX2 => "SCOREx2",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedEffect {
    pub kind: EffectKind,
    pub remaining: u32,
}

/// Active power-up effects. One entry per kind; re-activating refreshes it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActiveEffects {
    timed: Vec<TimedEffect>,
    pub shield: bool,
}

impl ActiveEffects {
    /// Start or refresh a timed effect
    pub fn activate(&mut self, kind: EffectKind, ticks: u32) {
        match self.timed.iter_mut().find(|e| e.kind == kind) {
            Some(effect) => effect.remaining = ticks,
            None => self.timed.push(TimedEffect {
                kind,
                remaining: ticks,
            }),
        }
    }

    pub fn remaining(&self, kind: EffectKind) -> u32 {
        self.timed
            .iter()
            .find(|e| e.kind == kind)
            .map_or(0, |e| e.remaining)
    }

    #[inline]
    pub fn is_active(&self, kind: EffectKind) -> bool {
        self.remaining(kind) > 0
    }

    pub fn fireball(&self) -> bool {
        self.is_active(EffectKind::Fireball)
    }

    pub fn slowed(&self) -> bool {
        self.is_active(EffectKind::Slow)
    }

    pub fn score_x2(&self) -> bool {
        self.is_active(EffectKind::ScoreX2)
    }

    pub fn timed(&self) -> &[TimedEffect] {
        &self.timed
    }

    /// Count every timer down one tick and drop the expired ones
    pub fn tick(&mut self) {
        for effect in self.timed.iter_mut() {
            effect.remaining = effect.remaining.saturating_sub(1);
        }
        self.timed.retain(|e| e.remaining > 0);
    }

    pub fn clear(&mut self) {
        self.timed.clear();
        self.shield = false;
    }
}

/// One row of the HUD effect list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectDisplay {
    pub label: &'static str,
    pub remaining: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_gold_always_drops() {
        let mut rng = Pcg32::seed_from_u64(1);
        for _ in 0..200 {
            let kind = roll_drop(BlockKind::Gold, &mut rng);
            assert!(kind.is_some());
            assert!(GOLD_POOL.contains(&kind.unwrap()));
        }
    }

    #[test]
    fn test_poison_never_drops() {
        let mut rng = Pcg32::seed_from_u64(2);
        for _ in 0..200 {
            assert_eq!(roll_drop(BlockKind::Poison, &mut rng), None);
        }
    }

    #[test]
    fn test_standard_pool_excludes_specials() {
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..2000 {
            if let Some(kind) = roll_drop(BlockKind::Splitter, &mut rng) {
                assert_ne!(kind, ItemKind::Shrink);
                assert_ne!(kind, ItemKind::ExtraLife);
            }
        }
    }

    #[test]
    fn test_item_falls_and_expires() {
        let paddle = Paddle::default();
        let mut item = Item::new(Vec2::new(10.0, SCREEN_H - 1.0), ItemKind::Shield);
        // Far from the paddle horizontally
        item.pos.x = if paddle.x > SCREEN_W / 2.0 { 5.0 } else { SCREEN_W - 5.0 };
        assert!(!item.update(&paddle));
        assert!(!item.active);
    }

    #[test]
    fn test_item_caught_by_paddle() {
        let paddle = Paddle::default();
        let mut item = Item::new(Vec2::new(paddle.x, paddle.y - ITEM_H - 1.0), ItemKind::Expand);
        assert!(item.update(&paddle));
        assert!(!item.active);
        // Already consumed
        assert!(!item.update(&paddle));
    }

    #[test]
    fn test_effect_refreshes_instead_of_stacking() {
        let mut effects = ActiveEffects::default();
        effects.activate(EffectKind::Fireball, FIREBALL_TICKS);
        for _ in 0..100 {
            effects.tick();
        }
        assert_eq!(effects.remaining(EffectKind::Fireball), FIREBALL_TICKS - 100);
        effects.activate(EffectKind::Fireball, FIREBALL_TICKS);
        assert_eq!(effects.timed().len(), 1);
        assert_eq!(effects.remaining(EffectKind::Fireball), FIREBALL_TICKS);
    }

    #[test]
    fn test_effect_expires() {
        let mut effects = ActiveEffects::default();
        effects.activate(EffectKind::Slow, 3);
        effects.tick();
        effects.tick();
        assert!(effects.slowed());
        effects.tick();
        assert!(!effects.slowed());
        assert!(effects.timed().is_empty());
    }
}

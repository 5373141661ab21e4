//! Ball-vs-block resolution and destruction side effects

use std::f32::consts::FRAC_PI_6;

use rand::Rng;

use super::ball::Ball;
use super::block::BlockKind;
use super::collision::{Penetration, circle_rect_overlap};
use super::effects::{EffectKind, Item, ItemKind, roll_drop};
use super::events::GameEvent;
use super::state::GameState;
use crate::consts::*;
use crate::{combo_multiplier, rotate};

/// Resolve every free ball against the block grid. Balls spawned mid-pass
/// join the field afterwards, so each ball is tested at most once.
pub fn resolve_blocks(state: &mut GameState) {
    let mut spawned: Vec<Ball> = Vec::new();
    for i in 0..state.balls.len() {
        if state.balls[i].is_free() {
            resolve_ball(state, i, &mut spawned);
        }
    }
    state.balls.append(&mut spawned);
}

/// Resolve one ball against at most one block (the first alive overlap).
/// Returns true when a block was struck.
pub fn resolve_ball(state: &mut GameState, ball_idx: usize, spawned: &mut Vec<Ball>) -> bool {
    let (pos, radius) = {
        let ball = &state.balls[ball_idx];
        (ball.pos, ball.radius)
    };
    let Some(idx) = state
        .blocks
        .iter()
        .position(|b| b.alive && circle_rect_overlap(pos, radius, &b.rect()))
    else {
        return false;
    };

    let fireball = state.effects.fireball();
    let rect = state.blocks[idx].rect();
    let damage = if fireball { FIREBALL_DAMAGE } else { 1 };
    let destroyed = state.blocks[idx].hit(damage);

    // Fireball ploughs straight through
    if !fireball {
        let axis = Penetration::of(pos, radius, &rect).reflect_axis();
        let ball = &mut state.balls[ball_idx];
        ball.vel = axis.apply(ball.vel);
    }

    if destroyed {
        destroy_block(state, idx, Some(ball_idx), spawned);
    } else {
        let color = state.blocks[idx].kind.info().color;
        state.spawn_particles(rect.center(), color, 3);
        state.emit(GameEvent::BlockHit);
    }
    true
}

/// Score and apply the type effect of a block that just reached zero hp.
/// Armor recurses through neighbours; `hit` reports each destruction once so
/// the chain terminates.
pub fn destroy_block(
    state: &mut GameState,
    idx: usize,
    source_ball: Option<usize>,
    spawned: &mut Vec<Ball>,
) {
    let kind = state.blocks[idx].kind;
    let info = kind.info();
    let center = state.blocks[idx].center();

    state.combo += 1;
    state.combo_timer = COMBO_WINDOW_TICKS;
    state.max_combo = state.max_combo.max(state.combo);

    let mut points = info.score * combo_multiplier(state.combo);
    if state.effects.score_x2() {
        points *= 2;
    }
    state.score += points;
    state.spawn_particles(center, info.color, 10);
    state.emit(GameEvent::BlockDestroyed { kind, points });

    match kind {
        BlockKind::Armor => {
            state.emit(GameEvent::Explosion);
            for j in 0..state.blocks.len() {
                if j == idx || !state.blocks[j].alive {
                    continue;
                }
                if state.blocks[idx].within_blast(&state.blocks[j]) && state.blocks[j].hit(1) {
                    destroy_block(state, j, source_ball, spawned);
                }
            }
        }
        BlockKind::Splitter => {
            if let Some(bi) = source_ball {
                if state.can_add_ball(spawned.len()) {
                    let src = &state.balls[bi];
                    spawned.push(Ball::new(src.pos, rotate(src.vel, FRAC_PI_6)));
                }
            }
        }
        BlockKind::Poison => {
            state.effects.activate(EffectKind::Slow, SLOW_TICKS);
        }
        BlockKind::Mirror => {
            for ball in state.balls.iter_mut().chain(spawned.iter_mut()) {
                if ball.is_free() {
                    ball.reverse();
                }
            }
            state.spawn_particles(center, 0xffffff, 15);
        }
        _ => {}
    }

    if let Some(item) = roll_drop(kind, &mut state.rng) {
        state.items.push(Item::new(center, item));
    }
}

/// Apply a caught pickup
pub fn apply_item(state: &mut GameState, kind: ItemKind) {
    log::debug!("Picked up {:?}", kind);
    match kind {
        ItemKind::Expand => {
            state.paddle.expand();
        }
        ItemKind::Shrink => state.paddle.shrink(),
        ItemKind::MultiBall => {
            let Some(src) = state.balls.iter().find(|b| b.is_free()).cloned() else {
                return;
            };
            for _ in 0..2 {
                if !state.can_add_ball(0) {
                    break;
                }
                let angle = (state.rng.random::<f32>() - 0.5) * 1.2;
                state.balls.push(Ball::new(src.pos, rotate(src.vel, angle)));
            }
        }
        ItemKind::Fireball => state.effects.activate(EffectKind::Fireball, FIREBALL_TICKS),
        ItemKind::Shield => state.effects.shield = true,
        ItemKind::ScoreX2 => state.effects.activate(EffectKind::ScoreX2, SCORE_X2_TICKS),
        ItemKind::ExtraLife => state.lives = (state.lives + 1).min(MAX_LIVES),
    }
    state.emit(GameEvent::ItemCaught { kind });
}

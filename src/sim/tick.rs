//! Fixed timestep simulation tick
//!
//! One call advances the session by 16.67 ms. Inside Playing the order is
//! fixed: timers, paddle, balls, ball-vs-block, boss, bullets, block
//! animation, pickups, ball pruning, then the stage-complete check.

use super::boss::{Arena, BossHit, BulletOutcome};
use super::events::GameEvent;
use super::flow::{
    check_stage_complete, dev_clear_stage, launch_balls, lose_life, next_stage, start_game,
    toggle_pause,
};
use super::resolve::{apply_item, resolve_blocks};
use super::state::{GamePhase, GameState};
use crate::consts::*;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer x in playfield coordinates; the paddle eases toward it
    pub pointer_x: Option<f32>,
    /// Held movement keys
    pub left: bool,
    pub right: bool,
    /// Launch parked balls (click/tap/space)
    pub launch: bool,
    /// Pause toggle
    pub pause: bool,
    /// Start / continue / dismiss
    pub confirm: bool,
    /// Clear the current stage (debug/testing)
    pub skip_stage: bool,
    /// Idle/demo mode - AI plays the game
    pub autopilot: bool,
}

impl TickInput {
    /// Drop edge-triggered inputs once they have been consumed
    pub fn clear_one_shots(&mut self) {
        self.launch = false;
        self.pause = false;
        self.confirm = false;
        self.skip_stage = false;
    }

    /// Fold a new frame's input in: held state is replaced, one-shots latch
    pub fn merge(&mut self, other: &TickInput) {
        self.pointer_x = other.pointer_x;
        self.left = other.left;
        self.right = other.right;
        self.autopilot = other.autopilot;
        self.launch |= other.launch;
        self.pause |= other.pause;
        self.confirm |= other.confirm;
        self.skip_stage |= other.skip_stage;
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    let mut input = input.clone();
    if input.autopilot {
        autopilot(state, &mut input);
    }
    let input = &input;

    if input.pause {
        toggle_pause(state);
    }

    match state.phase {
        GamePhase::Title => {
            if input.confirm {
                start_game(state);
            }
        }
        GamePhase::Ready => ready_tick(state, input),
        GamePhase::Playing => playing_tick(state, input),
        GamePhase::Paused => {}
        GamePhase::GameOver => {
            // Once the name has been dealt with, confirm goes back to the title
            if input.confirm && state.name_entry.is_none() {
                state.phase = GamePhase::Title;
            }
        }
        GamePhase::StageClear => {
            state.update_particles();
            if input.confirm {
                next_stage(state);
            }
        }
        GamePhase::Ranking => {
            if input.confirm {
                state.phase = GamePhase::Title;
            }
        }
    }
}

fn move_paddle(state: &mut GameState, input: &TickInput) {
    if let Some(x) = input.pointer_x {
        state.paddle.ease_toward(x);
    }
    if input.left {
        state.paddle.nudge(-1.0);
    }
    if input.right {
        state.paddle.nudge(1.0);
    }
    state.paddle.update();
}

fn ready_tick(state: &mut GameState, input: &TickInput) {
    state.time_ticks += 1;
    move_paddle(state, input);
    for ball in state.balls.iter_mut() {
        ball.update(&state.paddle, false, &mut state.effects.shield);
    }
    state.update_particles();

    state.ready_timer = state.ready_timer.saturating_sub(1);
    if state.ready_timer == 0 {
        state.phase = GamePhase::Playing;
    }
}

fn playing_tick(state: &mut GameState, input: &TickInput) {
    state.time_ticks += 1;

    // Timers
    state.effects.tick();
    if state.combo_timer > 0 {
        state.combo_timer -= 1;
    } else {
        state.combo = 0;
    }

    if input.skip_stage {
        dev_clear_stage(state);
        return;
    }
    if input.launch {
        launch_balls(state);
    }

    move_paddle(state, input);

    // Balls
    let slowed = state.effects.slowed();
    let mut shield_bounces = Vec::new();
    let mut paddle_bounced = false;
    for ball in state.balls.iter_mut() {
        let step = ball.update(&state.paddle, slowed, &mut state.effects.shield);
        paddle_bounced |= step.paddle_bounce;
        if step.shield_bounce {
            shield_bounces.push(ball.pos);
        }
    }
    if paddle_bounced {
        state.combo = 0;
        state.combo_timer = 0;
        state.emit(GameEvent::PaddleBounce);
    }
    for pos in shield_bounces {
        state.spawn_particles(pos, 0x00ffff, 8);
        state.emit(GameEvent::ShieldBounce);
    }

    resolve_blocks(state);

    if update_boss(state) {
        return;
    }

    // Blocks
    let stage = state.stage;
    for block in state.blocks.iter_mut() {
        block.animate(stage);
    }

    // Pickups
    let mut caught = Vec::new();
    for item in state.items.iter_mut() {
        if item.update(&state.paddle) {
            caught.push(item.kind);
        }
    }
    state.items.retain(|i| i.active);
    for kind in caught {
        apply_item(state, kind);
    }

    // Prune lost balls
    if state.balls.iter().all(|b| !b.active) {
        if lose_life(state, true) {
            return;
        }
    } else {
        state.balls.retain(|b| b.active);
    }

    state.update_particles();
    check_stage_complete(state);
}

/// Boss behavior, ball hits and bullets. Returns true when a bullet ended
/// the run.
fn update_boss(state: &mut GameState) -> bool {
    let mut hits = Vec::new();
    if let Some(boss) = state.boss.as_mut() {
        if boss.alive() {
            let mut arena = Arena {
                paddle: state.paddle.center(),
                balls: &mut state.balls,
                blocks: &mut state.blocks,
                bullets: &mut state.bullets,
                rng: &mut state.rng,
            };
            boss.update(&mut arena);

            for ball in state.balls.iter_mut().filter(|b| b.is_free()) {
                match boss.check_hit(ball) {
                    BossHit::Miss => {}
                    hit => hits.push((ball.pos, hit, boss.kind)),
                }
            }
        }
    }
    // Gravity may have pushed a ball past the cap
    for ball in state.balls.iter_mut() {
        ball.clamp_speed();
    }

    for (pos, hit, kind) in hits {
        state.score += BOSS_HIT_SCORE;
        state.spawn_particles(pos, kind.color(), 5);
        match hit {
            BossHit::Damaged { hp_left } => state.emit(GameEvent::BossHit { hp_left }),
            BossHit::Defeated => {
                state.emit(GameEvent::BossHit { hp_left: 0 });
                state.emit(GameEvent::BossDefeated { kind });
                if let Some(center) = state.boss.as_ref().map(|b| b.body.pos) {
                    state.spawn_particles(center, kind.color(), 30);
                }
                log::info!("{} defeated on stage {}", kind.name(), state.stage);
            }
            BossHit::Miss => {}
        }
    }

    // Bullets
    let mut paddle_hits = 0;
    let mut absorbed = 0;
    for bullet in state.bullets.iter_mut() {
        match bullet.update(&state.paddle, &mut state.effects.shield) {
            BulletOutcome::HitPaddle => paddle_hits += 1,
            BulletOutcome::Absorbed => absorbed += 1,
            BulletOutcome::InFlight | BulletOutcome::Offscreen => {}
        }
    }
    state.bullets.retain(|b| b.active);
    for _ in 0..absorbed {
        state.emit(GameEvent::ShieldBounce);
    }
    for _ in 0..paddle_hits {
        if lose_life(state, false) {
            return true;
        }
    }
    false
}

/// Demo driver: chase the most urgent ball, grab pickups when safe, and
/// press through the menus.
fn autopilot(state: &GameState, input: &mut TickInput) {
    match state.phase {
        GamePhase::Title | GamePhase::StageClear | GamePhase::Ranking => {
            input.confirm = true;
            return;
        }
        GamePhase::Ready | GamePhase::Playing => {}
        GamePhase::Paused | GamePhase::GameOver => return,
    }

    if state.balls.iter().any(|b| b.active && b.stuck) {
        input.launch = true;
    }

    // Lowest descending ball is the one about to be missed
    let threat = state
        .balls
        .iter()
        .filter(|b| b.is_free() && b.vel.y > 0.0)
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

    let target = match threat {
        Some(ball) if ball.pos.y > SCREEN_H * 0.4 => Some(ball.pos.x),
        _ => state
            .items
            .iter()
            .filter(|i| i.active)
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            .map(|i| i.pos.x)
            .or(threat.map(|b| b.pos.x)),
    };

    if let Some(x) = target {
        // Jump straight to the target rather than easing
        input.pointer_x = None;
        input.left = x < state.paddle.x - PADDLE_KEY_SPEED;
        input.right = x > state.paddle.x + PADDLE_KEY_SPEED;
    }
}

//! Session flow: run start, stage transitions, lives and game over

use super::events::GameEvent;
use super::stage::generate_stage;
use super::state::{GamePhase, GameState};
use crate::consts::*;
use crate::highscores::NameEntry;

/// Begin a fresh run at stage 1
pub fn start_game(state: &mut GameState) {
    state.score = 0;
    state.lives = START_LIVES;
    state.stage = 1;
    state.combo = 0;
    state.combo_timer = 0;
    state.max_combo = 0;
    state.victory = false;
    state.name_entry = None;
    state.bullets.clear();
    state.paddle.reset();
    generate_stage(state, 1);
    enter_ready(state);
    log::info!("Run started (seed {})", state.seed);
}

/// Advance past a cleared stage, or finish the run after the last one
pub fn next_stage(state: &mut GameState) {
    state.stage += 1;
    state.bullets.clear();
    if state.stage > FINAL_STAGE {
        end_run(state, true);
        return;
    }
    state.paddle.reset();
    let stage = state.stage;
    generate_stage(state, stage);
    enter_ready(state);
}

fn enter_ready(state: &mut GameState) {
    state.reset_ball();
    state.phase = GamePhase::Ready;
    state.ready_timer = READY_TICKS;
}

/// Take one life. Ball loss (`reset_balls`) re-parks a single ball and drops
/// the shield; a bullet hit leaves balls in flight untouched. Returns true
/// when the run ended.
pub fn lose_life(state: &mut GameState, reset_balls: bool) -> bool {
    state.lives = state.lives.saturating_sub(1);
    state.emit(GameEvent::LifeLost {
        lives_left: state.lives,
    });
    log::debug!("Life lost, {} left", state.lives);

    if state.lives == 0 {
        end_run(state, false);
        return true;
    }
    if reset_balls {
        state.reset_ball();
        state.effects.shield = false;
    }
    false
}

fn end_run(state: &mut GameState, victory: bool) {
    state.phase = GamePhase::GameOver;
    state.victory = victory;
    state.name_entry = Some(NameEntry::default());
    state.emit(GameEvent::MusicStop);
    state.emit(GameEvent::GameOver { victory });
    log::info!(
        "Game over ({}): score {}, stage {}, max combo {}",
        if victory { "victory" } else { "defeat" },
        state.score,
        state.stage,
        state.max_combo
    );
}

/// Stage is done once the boss is down, or every block is gone
pub fn stage_complete(state: &GameState) -> bool {
    match &state.boss {
        Some(boss) => !boss.alive(),
        None => state.alive_blocks() == 0,
    }
}

/// Award the lives bonus and move to StageClear when the field is empty
pub fn check_stage_complete(state: &mut GameState) -> bool {
    if !stage_complete(state) {
        return false;
    }
    let bonus = state.lives as u64 * LIFE_BONUS;
    state.score += bonus;
    state.phase = GamePhase::StageClear;
    state.emit(GameEvent::MusicStop);
    state.emit(GameEvent::StageCleared {
        stage: state.stage,
        bonus,
    });
    log::info!("Stage {} clear, bonus {}, score {}", state.stage, bonus, state.score);
    true
}

/// Release every parked ball
pub fn launch_balls(state: &mut GameState) {
    let stage = state.stage;
    for ball in state.balls.iter_mut().filter(|b| b.active && b.stuck) {
        ball.launch(stage, &mut state.rng);
    }
}

/// Debug shortcut: wipe the field and complete the stage
pub fn dev_clear_stage(state: &mut GameState) {
    for block in state.blocks.iter_mut() {
        block.hp = 0;
        block.alive = false;
    }
    if let Some(boss) = state.boss.as_mut() {
        boss.body.alive = false;
        boss.body.hp = 0;
    }
    check_stage_complete(state);
}

/// Playing <-> Paused, with music following
pub fn toggle_pause(state: &mut GameState) {
    match state.phase {
        GamePhase::Playing => {
            state.phase = GamePhase::Paused;
            state.emit(GameEvent::MusicStop);
        }
        GamePhase::Paused => {
            state.phase = GamePhase::Playing;
            let boss = state.is_boss_stage();
            state.emit(GameEvent::MusicStart { boss });
        }
        _ => {}
    }
}

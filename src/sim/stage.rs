//! Stage generation
//!
//! Normal stages are a row/column mask chosen by `stage % 5`, roughened by a
//! 10% random toggle per cell, filled from a tiered type table. Stages 6, 11
//! and 16 hold a boss and no blocks.

use rand::Rng;

use super::block::{Block, BlockKind};
use super::boss::{Boss, BossKind};
use super::events::GameEvent;
use super::state::GameState;
use crate::consts::*;

/// Number of block rows on a normal stage
pub fn row_count(stage: u32) -> i32 {
    (3 + (stage / 2) as i32).min(MAX_ROWS)
}

/// Base placement mask before the random toggle
pub fn pattern_cell(stage: u32, row: i32, col: i32, rows: i32) -> bool {
    match stage % 5 {
        0 => true,
        1 => (row + col) % 2 == 0,
        2 => col > 1 && col < 8,
        3 => row < rows - 1 || col % 2 == 0,
        _ => !((3..=6).contains(&col) && row >= 1 && row <= rows - 2),
    }
}

/// Pick a block type for a stage tier. Locked types fall back to Normal.
pub fn pick_kind(stage: u32, roll: f32) -> BlockKind {
    use BlockKind::*;
    let tier: &[(f32, BlockKind)] = if stage <= 5 {
        &[(0.6, Normal), (0.8, Armor), (0.9, Gold), (0.95, Splitter), (1.0, Moving)]
    } else if stage <= 10 {
        &[
            (0.35, Normal),
            (0.50, Armor),
            (0.60, Gold),
            (0.70, Splitter),
            (0.80, Moving),
            (0.90, Poison),
            (1.0, Invisible),
        ]
    } else {
        &[
            (0.2, Normal),
            (0.3, Armor),
            (0.4, Gold),
            (0.5, Splitter),
            (0.6, Moving),
            (0.72, Poison),
            (0.82, Invisible),
            (0.92, Mirror),
            (1.0, Armor),
        ]
    };
    let kind = tier
        .iter()
        .find(|(bound, _)| roll < *bound)
        .map_or(Armor, |(_, kind)| *kind);
    if kind.unlocked_at(stage) { kind } else { Normal }
}

/// Build the block layout for a normal stage
pub fn build_layout(stage: u32, rng: &mut impl Rng) -> Vec<Block> {
    let rows = row_count(stage);
    let mut blocks = Vec::new();
    for row in 0..rows {
        for col in 0..BLOCK_COLS {
            let mut place = pattern_cell(stage, row, col, rows);
            if rng.random::<f32>() < 0.1 {
                place = !place;
            }
            if !place {
                continue;
            }
            let kind = pick_kind(stage, rng.random::<f32>());
            blocks.push(Block::new(col, row, kind));
        }
    }
    blocks
}

/// Reset per-stage state and populate the field for `stage`
pub fn generate_stage(state: &mut GameState, stage: u32) {
    state.blocks.clear();
    state.items.clear();
    state.bullets.clear();
    state.effects.clear();
    state.boss = None;

    if let Some(kind) = BossKind::for_stage(stage) {
        state.boss = Some(Boss::new(kind));
        log::info!("Stage {}: boss {}", stage, kind.name());
    } else {
        state.blocks = build_layout(stage, &mut state.rng);
        log::info!("Stage {}: {} blocks", stage, state.blocks.len());
    }

    state.emit(GameEvent::MusicStart {
        boss: state.boss.is_some(),
    });
}

//! Block types and per-block state

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;

/// Block types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BlockKind {
    #[default]
    Normal,
    /// 3 hp, damages every neighbour when destroyed
    Armor,
    /// Spawns a second ball on destruction
    Splitter,
    /// Slides back and forth
    Moving,
    /// Slows every ball when destroyed
    Poison,
    /// Always drops a pickup
    Gold,
    /// Flickers; still hittable at any alpha
    Invisible,
    /// Reverses every ball on destruction
    Mirror,
}

/// Static metadata for a block type
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockInfo {
    pub name: &'static str,
    pub color: u32,
    pub hp: i32,
    pub drop_rate: f32,
    pub score: u64,
}

impl BlockKind {
    pub const ALL: [BlockKind; 8] = [
        BlockKind::Normal,
        BlockKind::Armor,
        BlockKind::Splitter,
        BlockKind::Moving,
        BlockKind::Poison,
        BlockKind::Gold,
        BlockKind::Invisible,
        BlockKind::Mirror,
    ];

    pub fn info(self) -> BlockInfo {
        match self {
            BlockKind::Normal => BlockInfo { name: "Normal", color: 0x888888, hp: 1, drop_rate: 0.10, score: 100 },
            BlockKind::Armor => BlockInfo { name: "Armor", color: 0xc0c0c0, hp: 3, drop_rate: 0.20, score: 300 },
            BlockKind::Splitter => BlockInfo { name: "Splitter", color: 0x00cccc, hp: 1, drop_rate: 0.30, score: 150 },
            BlockKind::Moving => BlockInfo { name: "Moving", color: 0xcccc00, hp: 1, drop_rate: 0.15, score: 150 },
            BlockKind::Poison => BlockInfo { name: "Poison", color: 0x9900cc, hp: 1, drop_rate: 0.00, score: 100 },
            BlockKind::Gold => BlockInfo { name: "Gold", color: 0xffcc00, hp: 2, drop_rate: 0.60, score: 500 },
            BlockKind::Invisible => BlockInfo { name: "Invisi", color: 0xffffff, hp: 1, drop_rate: 0.05, score: 200 },
            BlockKind::Mirror => BlockInfo { name: "Mirror", color: 0xeeeeff, hp: 1, drop_rate: 0.10, score: 200 },
        }
    }

    /// First stage on which the generator may place this type
    pub fn unlock_stage(self) -> u32 {
        match self {
            BlockKind::Normal => 1,
            BlockKind::Armor => 2,
            BlockKind::Gold => 3,
            BlockKind::Splitter => 4,
            BlockKind::Moving => 5,
            BlockKind::Poison => 7,
            BlockKind::Invisible => 8,
            BlockKind::Mirror => 9,
        }
    }

    #[inline]
    pub fn unlocked_at(self, stage: u32) -> bool {
        stage >= self.unlock_stage()
    }
}

/// A block on the grid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    col: i32,
    row: i32,
    pub kind: BlockKind,
    pub hp: i32,
    pub max_hp: i32,
    pub alive: bool,
    /// Horizontal slide for Moving blocks
    pub move_offset: f32,
    pub move_dir: f32,
    /// Flicker phase for Invisible blocks (cosmetic only)
    pub invis_phase: f32,
}

impl Block {
    pub fn new(col: i32, row: i32, kind: BlockKind) -> Self {
        let hp = kind.info().hp;
        Self {
            col,
            row,
            kind,
            hp,
            max_hp: hp,
            alive: true,
            move_offset: 0.0,
            move_dir: 1.0,
            invis_phase: flicker_phase(col, row),
        }
    }

    #[inline]
    pub fn col(&self) -> i32 {
        self.col
    }

    #[inline]
    pub fn row(&self) -> i32 {
        self.row
    }

    /// Grid-derived top-left corner, ignoring the slide offset
    pub fn grid_pos(&self) -> Vec2 {
        Vec2::new(
            BLOCK_OFFSET_X + self.col as f32 * BLOCK_W,
            BLOCK_OFFSET_Y + self.row as f32 * BLOCK_H,
        )
    }

    /// Current collision/draw rectangle
    pub fn rect(&self) -> Rect {
        let pos = self.grid_pos();
        let dx = if self.kind == BlockKind::Moving {
            self.move_offset
        } else {
            0.0
        };
        Rect::new(pos.x + dx, pos.y, BLOCK_W, BLOCK_H)
    }

    pub fn center(&self) -> Vec2 {
        self.rect().center()
    }

    /// Within Chebyshev distance 1 on the grid (includes the same cell)
    pub fn within_blast(&self, other: &Block) -> bool {
        (self.col - other.col).abs() <= 1 && (self.row - other.row).abs() <= 1
    }

    /// Apply damage. Returns true exactly once: on the call that takes hp to
    /// zero or below. Hitting a dead block does nothing.
    pub fn hit(&mut self, amount: i32) -> bool {
        if !self.alive {
            return false;
        }
        self.hp = (self.hp - amount).max(0);
        if self.hp == 0 {
            self.alive = false;
            return true;
        }
        false
    }

    /// Per-tick self animation
    pub fn animate(&mut self, stage: u32) {
        if !self.alive {
            return;
        }
        match self.kind {
            BlockKind::Moving => {
                let speed = 0.5 + stage as f32 * 0.15;
                self.move_offset += self.move_dir * speed;
                let max_offset = BLOCK_W * 0.8;
                if self.move_offset.abs() > max_offset {
                    self.move_dir = -self.move_dir;
                    self.move_offset = self.move_offset.signum() * max_offset;
                }
            }
            BlockKind::Invisible => {
                self.invis_phase += 0.03;
            }
            _ => {}
        }
    }

    /// Draw alpha for the renderer. Never consulted by collision.
    pub fn alpha(&self) -> f32 {
        if self.kind == BlockKind::Invisible {
            0.3 + 0.4 * self.invis_phase.sin().abs()
        } else {
            1.0
        }
    }
}

/// Starting flicker phase in [0, TAU), hashed from the cell so gameplay RNG
/// is untouched
fn flicker_phase(col: i32, row: i32) -> f32 {
    let hash = (col as u32)
        .wrapping_mul(2654435761)
        .wrapping_add((row as u32).wrapping_mul(7919))
        .wrapping_mul(2246822519);
    (hash % 1000) as f32 / 1000.0 * std::f32::consts::TAU
}

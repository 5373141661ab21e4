//! Events raised during a tick
//!
//! The simulation never talks to audio or storage directly. It records what
//! happened; the host drains the list after each frame.

use serde::{Deserialize, Serialize};

use super::block::BlockKind;
use super::boss::BossKind;
use super::effects::ItemKind;

/// A gameplay event emitted by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Ball damaged a block without breaking it
    BlockHit,
    /// Block destroyed, with the points it awarded
    BlockDestroyed { kind: BlockKind, points: u64 },
    /// Armor block blew up its neighbours
    Explosion,
    /// Ball bounced off the paddle
    PaddleBounce,
    /// Ball bounced off the shield (shield consumed)
    ShieldBounce,
    /// Pickup caught by the paddle
    ItemCaught { kind: ItemKind },
    /// A life was lost (ball miss or boss bullet)
    LifeLost { lives_left: u32 },
    /// Boss took a hit
    BossHit { hp_left: u32 },
    /// Boss destroyed
    BossDefeated { kind: BossKind },
    /// Stage cleared with lives bonus awarded
    StageCleared { stage: u32, bonus: u64 },
    /// Run ended
    GameOver { victory: bool },
    /// Background music should start
    MusicStart { boss: bool },
    /// Background music should stop
    MusicStop,
}

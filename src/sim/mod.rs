//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering, audio or storage dependencies

pub mod ball;
pub mod block;
pub mod boss;
pub mod collision;
pub mod effects;
pub mod events;
pub mod flow;
pub mod paddle;
pub mod resolve;
pub mod stage;
pub mod state;
pub mod tick;

pub use ball::Ball;
pub use block::{Block, BlockKind};
pub use boss::{Boss, BossBullet, BossKind};
pub use collision::Rect;
pub use effects::{ActiveEffects, EffectDisplay, EffectKind, Item, ItemKind};
pub use events::GameEvent;
pub use flow::{check_stage_complete, lose_life, next_stage, start_game};
pub use paddle::Paddle;
pub use stage::generate_stage;
pub use state::{GamePhase, GameState, Particle};
pub use tick::{TickInput, tick};

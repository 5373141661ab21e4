//! Game state and session bookkeeping
//!
//! One `GameState` holds a full run: the playfield entities, score and lives,
//! the phase machine, and the seeded RNG every gameplay roll draws from.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::ball::Ball;
use super::block::Block;
use super::boss::{Boss, BossBullet};
use super::effects::{ActiveEffects, EffectDisplay, Item};
use super::events::GameEvent;
use super::paddle::Paddle;
use crate::consts::*;
use crate::highscores::NameEntry;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Waiting for the player to start
    Title,
    /// Stage intro countdown, ball parked on the paddle
    Ready,
    /// Active gameplay
    Playing,
    /// Frozen until resumed
    Paused,
    /// Stage done, waiting to continue
    StageClear,
    /// Run ended; name entry open
    GameOver,
    /// Leaderboard shown after name entry
    Ranking,
}

/// A cosmetic particle. Never read by gameplay.
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: u32,
    /// 1.0 at spawn, removed at 0
    pub life: f32,
    pub decay: f32,
    pub size: f32,
}

/// Default particle cap (Medium quality)
pub const DEFAULT_MAX_PARTICLES: usize = 500;

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub phase: GamePhase,
    /// Current stage, 1-based
    pub stage: u32,
    pub score: u64,
    pub lives: u32,
    pub combo: u32,
    /// Ticks left before the combo lapses
    pub combo_timer: u32,
    pub max_combo: u32,
    /// Ticks left in the Ready countdown
    pub ready_timer: u32,
    /// Set when the run ended by clearing the final stage
    pub victory: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub paddle: Paddle,
    pub balls: Vec<Ball>,
    pub blocks: Vec<Block>,
    pub items: Vec<Item>,
    pub boss: Option<Boss>,
    pub bullets: Vec<BossBullet>,
    pub effects: ActiveEffects,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    pub max_particles: usize,
    particle_seq: u32,
    /// Events raised since the host last drained them
    pub events: Vec<GameEvent>,
    /// Open while a finished run waits for the player's name
    pub name_entry: Option<NameEntry>,
}

impl GameState {
    /// Fresh session sitting on the title screen
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Title,
            stage: 1,
            score: 0,
            lives: START_LIVES,
            combo: 0,
            combo_timer: 0,
            max_combo: 0,
            ready_timer: 0,
            victory: false,
            time_ticks: 0,
            paddle: Paddle::default(),
            balls: Vec::new(),
            blocks: Vec::new(),
            items: Vec::new(),
            boss: None,
            bullets: Vec::new(),
            effects: ActiveEffects::default(),
            particles: Vec::new(),
            max_particles: DEFAULT_MAX_PARTICLES,
            particle_seq: 0,
            events: Vec::new(),
            name_entry: None,
        }
    }

    pub fn rng_mut(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    pub fn is_boss_stage(&self) -> bool {
        self.boss.is_some()
    }

    pub fn alive_blocks(&self) -> usize {
        self.blocks.iter().filter(|b| b.alive).count()
    }

    /// Replace every ball with one parked on the paddle
    pub fn reset_ball(&mut self) {
        self.balls.clear();
        self.balls.push(Ball::stuck_to(&self.paddle));
    }

    /// Room for one more ball
    pub fn can_add_ball(&self, pending: usize) -> bool {
        self.balls.len() + pending < MAX_BALLS
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Effects for the HUD, each with ticks remaining
    pub fn active_effects(&self) -> Vec<EffectDisplay> {
        let mut list: Vec<EffectDisplay> = self
            .effects
            .timed()
            .iter()
            .map(|e| EffectDisplay {
                label: e.kind.label(),
                remaining: e.remaining,
            })
            .collect();
        list.extend(self.paddle.expand_timers.iter().map(|t| EffectDisplay {
            label: "EXPAND",
            remaining: t.remaining,
        }));
        list.extend(self.paddle.shrink_timers.iter().map(|t| EffectDisplay {
            label: "SHRINK",
            remaining: t.remaining,
        }));
        list
    }

    /// Burst of particles. Spread comes from a hash of the tick counter so
    /// the gameplay RNG is never consumed.
    pub fn spawn_particles(&mut self, pos: Vec2, color: u32, count: usize) {
        if self.max_particles == 0 {
            return;
        }
        let seed = self.time_ticks as u32;
        for _ in 0..count {
            if self.particles.len() >= self.max_particles {
                // Remove oldest particles to make room
                self.particles.remove(0);
            }
            self.particle_seq = self.particle_seq.wrapping_add(1);
            let hash = seed
                .wrapping_mul(2654435761)
                .wrapping_add(self.particle_seq.wrapping_mul(7919))
                .wrapping_mul(2246822519);
            let r1 = (hash % 1000) as f32 / 1000.0;
            let r2 = (hash / 1000 % 1000) as f32 / 1000.0;
            let r3 = (hash / 1000000 % 1000) as f32 / 1000.0;

            self.particles.push(Particle {
                pos,
                vel: Vec2::new((r1 - 0.5) * 6.0, (r2 - 0.5) * 6.0),
                color,
                life: 1.0,
                decay: 0.02 + r3 * 0.03,
                size: 2.0 + r1 * 3.0,
            });
        }
    }

    pub fn update_particles(&mut self) {
        for p in self.particles.iter_mut() {
            p.pos += p.vel;
            p.vel.y += 0.1;
            p.life -= p.decay;
        }
        self.particles.retain(|p| p.life > 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::effects::EffectKind;

    #[test]
    fn test_new_state_on_title() {
        let state = GameState::new(1);
        assert_eq!(state.phase, GamePhase::Title);
        assert_eq!(state.lives, START_LIVES);
        assert!(state.balls.is_empty());
    }

    #[test]
    fn test_particles_capped_and_decay() {
        let mut state = GameState::new(1);
        state.max_particles = 20;
        state.spawn_particles(Vec2::new(100.0, 100.0), 0xffffff, 50);
        assert_eq!(state.particles.len(), 20);
        for _ in 0..60 {
            state.update_particles();
        }
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_particles_do_not_touch_rng() {
        use rand::Rng;
        let mut a = GameState::new(3);
        let mut b = GameState::new(3);
        a.spawn_particles(Vec2::ZERO, 0, 100);
        assert_eq!(a.rng.random::<u32>(), b.rng.random::<u32>());
    }

    #[test]
    fn test_zero_cap_spawns_nothing() {
        let mut state = GameState::new(1);
        state.max_particles = 0;
        state.spawn_particles(Vec2::ZERO, 0, 10);
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_active_effects_lists_every_source() {
        let mut state = GameState::new(1);
        state.effects.activate(EffectKind::Fireball, 10);
        state.paddle.expand();
        state.paddle.expand();
        state.paddle.shrink();
        let labels: Vec<_> = state.active_effects().iter().map(|e| e.label).collect();
        assert_eq!(labels, vec!["FIRE", "EXPAND", "EXPAND", "SHRINK"]);
    }
}

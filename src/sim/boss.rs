//! Boss archetypes
//!
//! A boss is a shared body (position, hp, invulnerability) driven by one of
//! three behavior programs. Each program owns only the state its archetype
//! needs and reports the hit boxes the ball can currently strike.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::block::{Block, BlockKind};
use super::collision::{Rect, circle_rect_overlap, clamp_speed};
use super::paddle::Paddle;
use crate::consts::*;

/// Boss archetypes, one per boss stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BossKind {
    Gatekeeper,
    Phantom,
    ChaosCore,
}

impl BossKind {
    pub fn name(self) -> &'static str {
        match self {
            BossKind::Gatekeeper => "GATEKEEPER",
            BossKind::Phantom => "PHANTOM",
            BossKind::ChaosCore => "CHAOS CORE",
        }
    }

    pub fn max_hp(self) -> u32 {
        match self {
            BossKind::Gatekeeper => 20,
            BossKind::Phantom => 35,
            BossKind::ChaosCore => 60,
        }
    }

    pub fn width(self) -> f32 {
        match self {
            BossKind::Gatekeeper => 90.0,
            BossKind::Phantom => 80.0,
            BossKind::ChaosCore => 70.0,
        }
    }

    pub fn color(self) -> u32 {
        match self {
            BossKind::Gatekeeper => 0xff4444,
            BossKind::Phantom => 0x9944ff,
            BossKind::ChaosCore => 0xff00ff,
        }
    }

    /// Boss that guards a stage, if any
    pub fn for_stage(stage: u32) -> Option<BossKind> {
        match stage {
            6 => Some(BossKind::Gatekeeper),
            11 => Some(BossKind::Phantom),
            16 => Some(BossKind::ChaosCore),
            _ => None,
        }
    }
}

/// A projectile fired by a boss
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BossBullet {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: u32,
    pub active: bool,
}

/// What a bullet did this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulletOutcome {
    InFlight,
    Offscreen,
    HitPaddle,
    Absorbed,
}

impl BossBullet {
    pub fn new(pos: Vec2, vel: Vec2, color: u32) -> Self {
        Self {
            pos,
            vel,
            radius: BOSS_BULLET_RADIUS,
            color,
            active: true,
        }
    }

    pub fn update(&mut self, paddle: &Paddle, shield: &mut bool) -> BulletOutcome {
        if !self.active {
            return BulletOutcome::Offscreen;
        }
        self.pos += self.vel;

        if self.pos.x < -10.0
            || self.pos.x > SCREEN_W + 10.0
            || self.pos.y < -10.0
            || self.pos.y > SCREEN_H + 10.0
        {
            self.active = false;
            return BulletOutcome::Offscreen;
        }

        let half_w = paddle.draw_width() / 2.0;
        if self.pos.y + self.radius >= paddle.y
            && self.pos.y - self.radius <= paddle.y + paddle.height
            && self.pos.x >= paddle.x - half_w
            && self.pos.x <= paddle.x + half_w
        {
            self.active = false;
            return BulletOutcome::HitPaddle;
        }

        let bottom = self.pos.y + self.radius;
        if *shield && self.vel.y > 0.0 && bottom >= SHIELD_Y && bottom <= SHIELD_Y + SHIELD_BAND {
            self.active = false;
            *shield = false;
            return BulletOutcome::Absorbed;
        }

        BulletOutcome::InFlight
    }
}

/// Body state shared by every archetype
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BossBody {
    /// Center
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub hp: u32,
    pub max_hp: u32,
    pub alive: bool,
    pub move_dir: f32,
    /// Ticks since spawn
    pub timer: u32,
    /// Ticks of invulnerability left after a hit
    pub invuln: u32,
}

impl BossBody {
    fn new(kind: BossKind) -> Self {
        let hp = kind.max_hp();
        Self {
            pos: Vec2::new(SCREEN_W / 2.0, BOSS_Y),
            width: kind.width(),
            height: BOSS_HEIGHT,
            hp,
            max_hp: hp,
            alive: true,
            move_dir: 1.0,
            timer: 0,
            invuln: 0,
        }
    }

    pub fn hp_ratio(&self) -> f32 {
        self.hp as f32 / self.max_hp as f32
    }

    pub fn rect(&self) -> Rect {
        Rect::centered(self.pos, self.width, self.height)
    }

    fn muzzle(&self) -> Vec2 {
        Vec2::new(self.pos.x, self.pos.y + self.height / 2.0)
    }

    fn patrol(&mut self, speed: f32) {
        self.pos.x += self.move_dir * speed;
    }

    /// Flip at the walls, snapping back inside
    fn bounce_clamped(&mut self) {
        let half = self.width / 2.0;
        if self.pos.x - half < 0.0 {
            self.pos.x = half;
            self.move_dir = 1.0;
        }
        if self.pos.x + half > SCREEN_W {
            self.pos.x = SCREEN_W - half;
            self.move_dir = -1.0;
        }
    }

    /// Turn back at the walls without correcting position
    fn bounce_loose(&mut self) {
        let half = self.width / 2.0;
        if self.pos.x - half < 0.0 {
            self.move_dir = 1.0;
        }
        if self.pos.x + half > SCREEN_W {
            self.move_dir = -1.0;
        }
    }

    fn fire_aimed(&self, target: Vec2, speed: f32, color: u32, bullets: &mut Vec<BossBullet>) {
        let dir = (target - self.pos).normalize_or_zero();
        bullets.push(BossBullet::new(self.muzzle(), dir * speed, color));
    }
}

/// Everything a boss may read or touch while it acts
pub struct Arena<'a> {
    pub paddle: Vec2,
    pub balls: &'a mut [Ball],
    pub blocks: &'a mut Vec<Block>,
    pub bullets: &'a mut Vec<BossBullet>,
    pub rng: &'a mut Pcg32,
}

impl Arena<'_> {
    fn alive_blocks(&self) -> usize {
        self.blocks.iter().filter(|b| b.alive).count()
    }

    /// Drop a reinforcement block at a random column within `rows`
    fn spawn_block(&mut self, rows: std::ops::Range<i32>, kind: BlockKind) {
        let col = self.rng.random_range(0..BLOCK_COLS);
        let row = self.rng.random_range(rows);
        self.blocks.push(Block::new(col, row, kind));
    }
}

/// Per-archetype behavior
pub trait BossBehavior {
    /// One tick of movement, attacks and spawns
    fn advance(&mut self, body: &mut BossBody, arena: &mut Arena<'_>);

    /// Boxes the ball can currently damage
    fn hit_boxes(&self, body: &BossBody) -> Vec<Rect> {
        vec![body.rect()]
    }

    /// False while the boss cannot be hit at all
    fn targetable(&self) -> bool {
        true
    }

    fn phase(&self) -> u8 {
        1
    }
}

/// Stage 6: patrols, aims at the paddle, reinforces its wall
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Gatekeeper;

impl BossBehavior for Gatekeeper {
    fn advance(&mut self, body: &mut BossBody, arena: &mut Arena<'_>) {
        body.patrol(2.0);
        body.bounce_clamped();

        if body.timer % 120 == 0 {
            body.fire_aimed(arena.paddle, 3.0, 0xff4444, arena.bullets);
        }
        if body.timer % 180 == 0 && arena.alive_blocks() < 6 {
            arena.spawn_block(3..6, BlockKind::Normal);
        }
    }
}

/// Stage 11: fades in and out, only hittable while visible
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Phantom {
    invis_timer: u32,
    visible: bool,
}

impl Default for Phantom {
    fn default() -> Self {
        Self {
            invis_timer: 0,
            visible: true,
        }
    }
}

impl Phantom {
    const CYCLE: u32 = 120;
    const HIDDEN: u32 = 40;

    pub fn visible(&self) -> bool {
        self.visible
    }
}

impl BossBehavior for Phantom {
    fn advance(&mut self, body: &mut BossBody, arena: &mut Arena<'_>) {
        body.patrol(1.5);
        body.bounce_loose();

        self.invis_timer += 1;
        let cycle = self.invis_timer % Self::CYCLE;
        self.visible = cycle >= Self::HIDDEN;

        if self.visible && body.timer % 90 == 0 {
            body.fire_aimed(arena.paddle, 3.0, 0x9944ff, arena.bullets);
        }
        // Spread on the tick it reappears
        if cycle == Self::HIDDEN {
            for i in -1..=1 {
                let i = i as f32;
                arena.bullets.push(BossBullet::new(
                    Vec2::new(body.pos.x + i * 20.0, body.pos.y + body.height / 2.0),
                    Vec2::new(i * 1.5, 3.0),
                    0xcc66ff,
                ));
            }
        }
        if body.hp * 2 < body.max_hp && body.timer % 150 == 0 && arena.alive_blocks() < 5 {
            arena.spawn_block(3..7, BlockKind::Moving);
        }
    }

    fn targetable(&self) -> bool {
        self.visible
    }
}

/// Orbiting satellite of the Chaos Core
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubCore {
    pub pos: Vec2,
    pub dir: f32,
}

impl SubCore {
    const MARGIN: f32 = 20.0;

    /// Slide at 2 px/tick, heading back inside once past either bound
    fn patrol(&mut self) {
        self.pos.x += self.dir * 2.0;
        if self.pos.x > SCREEN_W - Self::MARGIN {
            self.dir = -1.0;
        }
        if self.pos.x < Self::MARGIN {
            self.dir = 1.0;
        }
    }
}

/// Stage 16: three phases keyed on remaining hp
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChaosCore {
    phase: u8,
    cores: Vec<SubCore>,
    cores_spawned: bool,
}

impl Default for ChaosCore {
    fn default() -> Self {
        Self {
            phase: 1,
            cores: Vec::new(),
            cores_spawned: false,
        }
    }
}

impl ChaosCore {
    pub fn phase_for(ratio: f32) -> u8 {
        if ratio > 0.66 {
            1
        } else if ratio > 0.33 {
            2
        } else {
            3
        }
    }

    pub fn cores(&self) -> &[SubCore] {
        &self.cores
    }

    /// Pull free balls toward the boss, keeping them under the speed cap
    fn gravity(body: &BossBody, balls: &mut [Ball]) {
        for ball in balls.iter_mut().filter(|b| b.is_free()) {
            let delta = body.pos - ball.pos;
            let dist = delta.length();
            if dist > 0.0 && dist < 250.0 {
                ball.vel = clamp_speed(ball.vel + delta / dist * 0.08, BALL_MAX_SPEED);
            }
        }
    }
}

impl BossBehavior for ChaosCore {
    fn advance(&mut self, body: &mut BossBody, arena: &mut Arena<'_>) {
        let phase = Self::phase_for(body.hp_ratio());
        if phase != self.phase {
            log::debug!("Chaos Core phase {} -> {}", self.phase, phase);
            self.phase = phase;
        }

        match phase {
            1 => {
                body.patrol(4.0);
                if body.timer % 60 == 0 {
                    body.fire_aimed(arena.paddle, 4.0, 0xff00ff, arena.bullets);
                }
            }
            2 => {
                body.patrol(2.0);
                Self::gravity(body, arena.balls);
                if body.timer % 45 == 0 {
                    for i in -2..=2 {
                        arena.bullets.push(BossBullet::new(
                            body.muzzle(),
                            Vec2::new(i as f32 * 1.5, 3.5),
                            0xff66ff,
                        ));
                    }
                }
            }
            _ => {
                body.patrol(3.0);
                if !self.cores_spawned {
                    self.cores_spawned = true;
                    self.cores = vec![
                        SubCore {
                            pos: Vec2::new(body.pos.x - 40.0, body.pos.y),
                            dir: 1.0,
                        },
                        SubCore {
                            pos: Vec2::new(body.pos.x + 40.0, body.pos.y),
                            dir: -1.0,
                        },
                    ];
                }
                for core in self.cores.iter_mut() {
                    core.patrol();
                }
                if body.timer % 50 == 0 {
                    body.fire_aimed(arena.paddle, 4.5, 0xff0000, arena.bullets);
                }
                if body.timer % 70 == 0 {
                    for core in &self.cores {
                        arena.bullets.push(BossBullet::new(
                            Vec2::new(core.pos.x, core.pos.y + 10.0),
                            Vec2::new(0.0, 3.0),
                            0xff8800,
                        ));
                    }
                }
            }
        }

        body.bounce_loose();

        if body.timer % 200 == 0 && arena.alive_blocks() < 4 {
            arena.spawn_block(3..6, BlockKind::Armor);
        }
    }

    fn hit_boxes(&self, body: &BossBody) -> Vec<Rect> {
        let mut boxes = vec![body.rect()];
        if self.phase == 3 {
            boxes.extend(
                self.cores
                    .iter()
                    .map(|c| Rect::centered(c.pos, CORE_W, CORE_H)),
            );
        }
        boxes
    }

    fn phase(&self) -> u8 {
        self.phase
    }
}

/// Archetype program, dispatched by variant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum BossProgram {
    Gatekeeper(Gatekeeper),
    Phantom(Phantom),
    ChaosCore(ChaosCore),
}

impl BossProgram {
    fn for_kind(kind: BossKind) -> Self {
        match kind {
            BossKind::Gatekeeper => BossProgram::Gatekeeper(Gatekeeper),
            BossKind::Phantom => BossProgram::Phantom(Phantom::default()),
            BossKind::ChaosCore => BossProgram::ChaosCore(ChaosCore::default()),
        }
    }

    fn behavior(&self) -> &dyn BossBehavior {
        match self {
            BossProgram::Gatekeeper(b) => b,
            BossProgram::Phantom(b) => b,
            BossProgram::ChaosCore(b) => b,
        }
    }

    fn behavior_mut(&mut self) -> &mut dyn BossBehavior {
        match self {
            BossProgram::Gatekeeper(b) => b,
            BossProgram::Phantom(b) => b,
            BossProgram::ChaosCore(b) => b,
        }
    }
}

/// Result of testing a ball against the boss
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BossHit {
    Miss,
    Damaged { hp_left: u32 },
    Defeated,
}

/// A boss on the field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boss {
    pub kind: BossKind,
    pub body: BossBody,
    pub program: BossProgram,
}

impl Boss {
    pub fn new(kind: BossKind) -> Self {
        Self {
            kind,
            body: BossBody::new(kind),
            program: BossProgram::for_kind(kind),
        }
    }

    #[inline]
    pub fn alive(&self) -> bool {
        self.body.alive
    }

    #[inline]
    pub fn hp(&self) -> u32 {
        self.body.hp
    }

    pub fn phase(&self) -> u8 {
        self.program.behavior().phase()
    }

    /// Whether the boss should be drawn solid (Phantom fades out)
    pub fn visible(&self) -> bool {
        self.program.behavior().targetable()
    }

    pub fn hit_boxes(&self) -> Vec<Rect> {
        self.program.behavior().hit_boxes(&self.body)
    }

    /// One tick of behavior. Invulnerability counts down after acting.
    pub fn update(&mut self, arena: &mut Arena<'_>) {
        if !self.body.alive {
            return;
        }
        self.body.timer += 1;
        self.program.behavior_mut().advance(&mut self.body, arena);
        self.body.invuln = self.body.invuln.saturating_sub(1);
    }

    /// Test one ball against every hit box. A hit costs exactly one hp,
    /// flips the ball's vertical velocity and starts the invulnerability
    /// window. Reports `Defeated` only on the hit that reaches zero.
    pub fn check_hit(&mut self, ball: &mut Ball) -> BossHit {
        if !self.body.alive || self.body.invuln > 0 || !self.program.behavior().targetable() {
            return BossHit::Miss;
        }
        let touched = self
            .hit_boxes()
            .iter()
            .any(|rect| circle_rect_overlap(ball.pos, ball.radius, rect));
        if !touched {
            return BossHit::Miss;
        }

        self.body.hp = self.body.hp.saturating_sub(1);
        self.body.invuln = BOSS_INVULN_TICKS;
        ball.vel.y = -ball.vel.y;

        if self.body.hp == 0 {
            self.body.alive = false;
            BossHit::Defeated
        } else {
            BossHit::Damaged {
                hp_left: self.body.hp,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    struct Fixture {
        balls: Vec<Ball>,
        blocks: Vec<Block>,
        bullets: Vec<BossBullet>,
        rng: Pcg32,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                balls: Vec::new(),
                blocks: Vec::new(),
                bullets: Vec::new(),
                rng: Pcg32::seed_from_u64(11),
            }
        }

        fn run(&mut self, boss: &mut Boss, ticks: u32) {
            for _ in 0..ticks {
                let mut arena = Arena {
                    paddle: Vec2::new(SCREEN_W / 2.0, PADDLE_Y),
                    balls: &mut self.balls,
                    blocks: &mut self.blocks,
                    bullets: &mut self.bullets,
                    rng: &mut self.rng,
                };
                boss.update(&mut arena);
            }
        }
    }

    fn ball_at(pos: Vec2) -> Ball {
        Ball::new(pos, Vec2::new(0.0, -5.0))
    }

    #[test]
    fn test_stage_assignment() {
        assert_eq!(BossKind::for_stage(6), Some(BossKind::Gatekeeper));
        assert_eq!(BossKind::for_stage(11), Some(BossKind::Phantom));
        assert_eq!(BossKind::for_stage(16), Some(BossKind::ChaosCore));
        assert_eq!(BossKind::for_stage(5), None);
    }

    #[test]
    fn test_hit_then_invulnerable() {
        let mut boss = Boss::new(BossKind::Gatekeeper);
        let mut ball = ball_at(boss.body.pos + Vec2::new(0.0, 16.0));
        assert_eq!(boss.check_hit(&mut ball), BossHit::Damaged { hp_left: 19 });
        assert_eq!(ball.vel.y, 5.0);

        let mut again = ball_at(boss.body.pos);
        assert_eq!(boss.check_hit(&mut again), BossHit::Miss);
        assert_eq!(boss.hp(), 19);
    }

    #[test]
    fn test_invulnerability_expires_after_ten_updates() {
        let mut fx = Fixture::new();
        let mut boss = Boss::new(BossKind::Gatekeeper);
        boss.check_hit(&mut ball_at(boss.body.pos));
        fx.run(&mut boss, BOSS_INVULN_TICKS - 1);
        assert!(boss.body.invuln > 0);
        fx.run(&mut boss, 1);
        assert_eq!(boss.body.invuln, 0);
        let pos = boss.body.pos;
        assert!(matches!(boss.check_hit(&mut ball_at(pos)), BossHit::Damaged { .. }));
    }

    #[test]
    fn test_defeat_fires_once() {
        let mut boss = Boss::new(BossKind::Gatekeeper);
        boss.body.hp = 1;
        let pos = boss.body.pos;
        assert_eq!(boss.check_hit(&mut ball_at(pos)), BossHit::Defeated);
        assert!(!boss.alive());
        boss.body.invuln = 0;
        assert_eq!(boss.check_hit(&mut ball_at(pos)), BossHit::Miss);
        assert_eq!(boss.hp(), 0);
    }

    #[test]
    fn test_gatekeeper_fires_and_stays_on_screen() {
        let mut fx = Fixture::new();
        let mut boss = Boss::new(BossKind::Gatekeeper);
        fx.run(&mut boss, 120);
        assert_eq!(fx.bullets.len(), 1);
        // Aimed downward at the paddle
        assert!(fx.bullets[0].vel.y > 0.0);
        assert!((fx.bullets[0].vel.length() - 3.0).abs() < 1e-4);

        fx.run(&mut boss, 600);
        let half = boss.body.width / 2.0;
        assert!(boss.body.pos.x >= half && boss.body.pos.x <= SCREEN_W - half);
    }

    #[test]
    fn test_gatekeeper_reinforces_thin_walls() {
        let mut fx = Fixture::new();
        let mut boss = Boss::new(BossKind::Gatekeeper);
        fx.run(&mut boss, 180);
        assert_eq!(fx.blocks.len(), 1);
        assert_eq!(fx.blocks[0].kind, BlockKind::Normal);
        assert!((3..6).contains(&fx.blocks[0].row()));
    }

    #[test]
    fn test_phantom_cannot_be_hit_while_hidden() {
        let mut fx = Fixture::new();
        let mut boss = Boss::new(BossKind::Phantom);
        fx.run(&mut boss, 1);
        assert!(!boss.visible());
        let pos = boss.body.pos;
        assert_eq!(boss.check_hit(&mut ball_at(pos)), BossHit::Miss);

        fx.run(&mut boss, 39);
        assert!(boss.visible());
        // Spread fired on reappearance
        assert_eq!(fx.bullets.len(), 3);
        let pos = boss.body.pos;
        assert!(matches!(boss.check_hit(&mut ball_at(pos)), BossHit::Damaged { .. }));
    }

    #[test]
    fn test_chaos_core_phases() {
        assert_eq!(ChaosCore::phase_for(40.0 / 60.0), 1);
        assert_eq!(ChaosCore::phase_for(39.0 / 60.0), 2);
        assert_eq!(ChaosCore::phase_for(20.0 / 60.0), 2);
        assert_eq!(ChaosCore::phase_for(19.0 / 60.0), 3);
    }

    #[test]
    fn test_chaos_core_spawns_cores_in_phase_three() {
        let mut fx = Fixture::new();
        let mut boss = Boss::new(BossKind::ChaosCore);
        assert_eq!(boss.hit_boxes().len(), 1);
        boss.body.hp = 10;
        fx.run(&mut boss, 1);
        assert_eq!(boss.phase(), 3);
        assert_eq!(boss.hit_boxes().len(), 3);

        // Cores only spawn once
        fx.run(&mut boss, 100);
        assert_eq!(boss.hit_boxes().len(), 3);
    }

    #[test]
    fn test_chaos_core_gravity_respects_speed_cap() {
        let mut fx = Fixture::new();
        let mut boss = Boss::new(BossKind::ChaosCore);
        boss.body.hp = 30;
        fx.balls.push(Ball::new(
            boss.body.pos + Vec2::new(0.0, 100.0),
            Vec2::new(0.0, -BALL_MAX_SPEED),
        ));
        fx.run(&mut boss, 1);
        assert_eq!(boss.phase(), 2);
        assert!(fx.balls[0].speed() <= BALL_MAX_SPEED + 1e-4);
    }

    fn cores_of(boss: &Boss) -> Vec<SubCore> {
        match &boss.program {
            BossProgram::ChaosCore(core) => core.cores().to_vec(),
            _ => Vec::new(),
        }
    }

    #[test]
    fn test_phantom_reinforces_only_below_half() {
        let mut fx = Fixture::new();
        let mut boss = Boss::new(BossKind::Phantom);
        boss.body.hp = 18;
        fx.run(&mut boss, 150);
        assert!(fx.blocks.is_empty());

        let mut fx = Fixture::new();
        let mut boss = Boss::new(BossKind::Phantom);
        boss.body.hp = 17;
        fx.run(&mut boss, 150);
        assert_eq!(fx.blocks.len(), 1);
        assert_eq!(fx.blocks[0].kind, BlockKind::Moving);
        assert!((3..7).contains(&fx.blocks[0].row()));
    }

    #[test]
    fn test_phantom_holds_back_with_five_blocks() {
        let mut fx = Fixture::new();
        fx.blocks = (0..5).map(|c| Block::new(c, 0, BlockKind::Normal)).collect();
        let mut boss = Boss::new(BossKind::Phantom);
        boss.body.hp = 10;
        fx.run(&mut boss, 150);
        assert_eq!(fx.blocks.len(), 5);
    }

    #[test]
    fn test_loose_bounce_recovers_from_past_the_wall() {
        let mut fx = Fixture::new();
        let mut boss = Boss::new(BossKind::Phantom);
        boss.body.pos.x = SCREEN_W;
        fx.run(&mut boss, 100);
        assert!(boss.body.pos.x + boss.body.width / 2.0 <= SCREEN_W);
        assert_eq!(boss.body.move_dir, -1.0);
    }

    #[test]
    fn test_chaos_core_phase_two_spread() {
        let mut fx = Fixture::new();
        let mut boss = Boss::new(BossKind::ChaosCore);
        boss.body.hp = 30;
        fx.run(&mut boss, 44);
        assert!(fx.bullets.is_empty());
        fx.run(&mut boss, 1);
        let vels: Vec<Vec2> = fx.bullets.iter().map(|b| b.vel).collect();
        assert_eq!(
            vels,
            vec![
                Vec2::new(-3.0, 3.5),
                Vec2::new(-1.5, 3.5),
                Vec2::new(0.0, 3.5),
                Vec2::new(1.5, 3.5),
                Vec2::new(3.0, 3.5),
            ]
        );
    }

    #[test]
    fn test_sub_cores_fire_straight_down() {
        let mut fx = Fixture::new();
        let mut boss = Boss::new(BossKind::ChaosCore);
        boss.body.hp = 10;
        fx.run(&mut boss, 69);
        // Only the aimed shot at 50 so far
        assert_eq!(fx.bullets.len(), 1);
        fx.run(&mut boss, 1);
        let drops: Vec<&BossBullet> = fx.bullets.iter().filter(|b| b.vel == Vec2::new(0.0, 3.0)).collect();
        assert_eq!(drops.len(), 2);
        let cores = cores_of(&boss);
        for (bullet, core) in drops.iter().zip(&cores) {
            assert_eq!(bullet.pos, Vec2::new(core.pos.x, core.pos.y + 10.0));
        }
    }

    #[test]
    fn test_sub_cores_spawned_near_wall_return_on_screen() {
        let mut fx = Fixture::new();
        let mut boss = Boss::new(BossKind::ChaosCore);
        boss.body.pos.x = 440.0;
        boss.body.hp = 10;
        fx.run(&mut boss, 1);
        assert!(cores_of(&boss).iter().any(|c| c.pos.x > SCREEN_W - 20.0));

        fx.run(&mut boss, 300);
        for core in cores_of(&boss) {
            // One step of overshoot before turning back
            assert!(core.pos.x >= 18.0 && core.pos.x <= SCREEN_W - 18.0, "core at {}", core.pos.x);
        }
    }

    #[test]
    fn test_chaos_core_armor_reinforcement() {
        let mut fx = Fixture::new();
        let mut boss = Boss::new(BossKind::ChaosCore);
        fx.run(&mut boss, 200);
        assert_eq!(fx.blocks.len(), 1);
        assert_eq!(fx.blocks[0].kind, BlockKind::Armor);
        assert!((3..6).contains(&fx.blocks[0].row()));

        let mut fx = Fixture::new();
        fx.blocks = (0..4).map(|c| Block::new(c, 0, BlockKind::Normal)).collect();
        let mut boss = Boss::new(BossKind::ChaosCore);
        fx.run(&mut boss, 200);
        assert_eq!(fx.blocks.len(), 4);
    }

    #[test]
    fn test_bullet_hits_paddle() {
        let paddle = Paddle::default();
        let mut shield = false;
        let mut bullet = BossBullet::new(Vec2::new(paddle.x, paddle.y - 5.0), Vec2::new(0.0, 3.0), 0);
        assert_eq!(bullet.update(&paddle, &mut shield), BulletOutcome::HitPaddle);
        assert!(!bullet.active);
    }

    #[test]
    fn test_bullet_absorbed_by_shield() {
        let paddle = Paddle::default();
        let mut shield = true;
        let x = if paddle.x > SCREEN_W / 2.0 { 10.0 } else { SCREEN_W - 10.0 };
        let mut bullet = BossBullet::new(Vec2::new(x, SHIELD_Y - 6.0), Vec2::new(0.0, 3.0), 0);
        assert_eq!(bullet.update(&paddle, &mut shield), BulletOutcome::Absorbed);
        assert!(!shield);
    }

    #[test]
    fn test_bullet_leaves_screen() {
        let paddle = Paddle::default();
        let mut shield = false;
        let mut bullet = BossBullet::new(Vec2::new(-8.0, 100.0), Vec2::new(-3.0, 0.0), 0);
        assert_eq!(bullet.update(&paddle, &mut shield), BulletOutcome::Offscreen);
    }
}

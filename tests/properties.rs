//! Property tests for invariants that must hold on every tick

use glam::Vec2;
use proptest::prelude::*;
use retro_breaker::consts::*;
use retro_breaker::highscores::{HighScores, MAX_HIGH_SCORES, MAX_NAME_LEN, NameEntry, RankEntry};
use retro_breaker::sim::collision::clamp_speed;
use retro_breaker::sim::{Block, BlockKind, GamePhase, GameState, Paddle, TickInput, tick};
use retro_breaker::combo_multiplier;

proptest! {
    #[test]
    fn combo_multiplier_is_bounded_and_monotonic(combo in 0u32..1000) {
        let m = combo_multiplier(combo);
        prop_assert!((1..=MAX_COMBO_MULTIPLIER).contains(&m));
        prop_assert!(combo_multiplier(combo + 1) >= m);
    }

    #[test]
    fn clamp_speed_never_exceeds_cap(x in -100f32..100.0, y in -100f32..100.0) {
        let v = clamp_speed(Vec2::new(x, y), BALL_MAX_SPEED);
        prop_assert!(v.length() <= BALL_MAX_SPEED + 1e-3);
    }

    #[test]
    fn paddle_width_returns_to_base(pickups in prop::collection::vec(any::<bool>(), 0..12)) {
        let mut paddle = Paddle::default();
        for expand in pickups {
            if expand {
                paddle.expand();
            } else {
                paddle.shrink();
            }
            paddle.update();
        }
        for _ in 0..EXPAND_TICKS.max(SHRINK_TICKS) {
            paddle.update();
        }
        prop_assert_eq!(paddle.width_multiplier(), 1.0);
        prop_assert_eq!(paddle.draw_width(), PADDLE_BASE_WIDTH);
    }

    #[test]
    fn block_reports_destruction_once(
        kind_idx in 0usize..8,
        damage in prop::collection::vec(1i32..5, 1..20),
    ) {
        let kinds = [
            BlockKind::Normal,
            BlockKind::Armor,
            BlockKind::Splitter,
            BlockKind::Moving,
            BlockKind::Poison,
            BlockKind::Gold,
            BlockKind::Invisible,
            BlockKind::Mirror,
        ];
        let mut block = Block::new(2, 2, kinds[kind_idx]);
        let total: i32 = damage.iter().sum();
        let destroyed = damage.iter().filter(|d| block.hit(**d)).count();
        prop_assert_eq!(destroyed, usize::from(total >= block.max_hp));
        prop_assert_eq!(block.alive, block.hp > 0);
    }

    #[test]
    fn rankings_stay_sorted_and_short(scores in prop::collection::vec(0u64..10_000, 0..40)) {
        let mut table = HighScores::new();
        for (i, score) in scores.iter().enumerate() {
            table.add(RankEntry {
                name: format!("P{}", i),
                score: *score,
                stage: 1,
                date: "2026-10-16".to_string(),
            });
        }
        prop_assert!(table.entries.len() <= MAX_HIGH_SCORES);
        prop_assert!(table.entries.windows(2).all(|w| w[0].score >= w[1].score));
        let mut sorted = scores.clone();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        sorted.truncate(MAX_HIGH_SCORES);
        let kept: Vec<u64> = table.entries.iter().map(|e| e.score).collect();
        prop_assert_eq!(kept, sorted);
    }

    #[test]
    fn name_entry_only_holds_valid_chars(input in ".{0,20}") {
        let mut name = NameEntry::default();
        for c in input.chars() {
            name.push(c);
        }
        prop_assert!(name.text().chars().count() <= MAX_NAME_LEN);
        prop_assert!(name.text().chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == ' '));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(12))]

    #[test]
    fn simulation_invariants_hold(seed in any::<u64>()) {
        let mut state = GameState::new(seed);
        state.max_particles = 20;
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        let mut last_score = 0;
        let mut last_boss_hp = None;
        for _ in 0..6000 {
            tick(&mut state, &input);

            prop_assert!(state.score >= last_score);
            last_score = state.score;
            prop_assert!(state.lives <= MAX_LIVES);
            prop_assert!(state.balls.len() <= MAX_BALLS);
            prop_assert!(state.particles.len() <= 20);
            for ball in &state.balls {
                prop_assert!(ball.vel.length() <= BALL_MAX_SPEED + 1e-3);
            }
            for block in &state.blocks {
                prop_assert!(block.hp >= 0 && block.hp <= block.max_hp);
                prop_assert_eq!(block.alive, block.hp > 0);
            }
            match &state.boss {
                Some(boss) => {
                    if let Some(prev) = last_boss_hp {
                        prop_assert!(boss.hp() <= prev);
                    }
                    last_boss_hp = Some(boss.hp());
                }
                None => last_boss_hp = None,
            }
            if state.phase == GamePhase::GameOver {
                break;
            }
        }
    }
}

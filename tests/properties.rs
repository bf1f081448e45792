//! Session-level invariants, checked over randomized seeds and input
//! streams.

use block_dodge::consts::*;
use block_dodge::sim::{tick, GameState, TickInput};
use proptest::prelude::*;

fn run_session(seed: u64, frames: usize, moves: &[u8]) -> GameState {
    let mut state = GameState::new(seed, 420.0, 780.0);
    for i in 0..frames {
        let m = moves[i % moves.len()];
        let input = TickInput {
            hold_left: m & 1 != 0,
            hold_right: m & 2 != 0,
            ..Default::default()
        };
        tick(&mut state, &input, 16.0);
        if !state.running {
            break;
        }
    }
    state
}

proptest! {
    #[test]
    fn pools_stay_within_caps(seed in any::<u64>(), moves in proptest::collection::vec(0u8..4, 8..32)) {
        let mut state = GameState::new(seed, 420.0, 780.0);
        for i in 0..1200 {
            let m = moves[i % moves.len()];
            let input = TickInput {
                hold_left: m & 1 != 0,
                hold_right: m & 2 != 0,
                ..Default::default()
            };
            tick(&mut state, &input, 16.0);

            let cap = state.tuning.level(state.level_index).max_obstacles;
            prop_assert!(state.obstacles.len() <= cap);
            prop_assert!(state.powerups.len() <= state.tuning.max_powerups);
            prop_assert!(state.particles.len() <= MAX_PARTICLES);
            for ob in &state.obstacles {
                prop_assert!(ob.pos.x >= EDGE_PAD - 1e-3);
                prop_assert!(ob.pos.x + ob.size <= state.view_w - EDGE_PAD + 1e-3);
            }
            if !state.running {
                break;
            }
        }
    }

    #[test]
    fn player_never_leaves_the_field(seed in any::<u64>(), moves in proptest::collection::vec(0u8..4, 8..32)) {
        let mut state = GameState::new(seed, 420.0, 780.0);
        for i in 0..800 {
            let m = moves[i % moves.len()];
            let input = TickInput {
                hold_left: m & 1 != 0,
                hold_right: m & 2 != 0,
                ..Default::default()
            };
            tick(&mut state, &input, 16.0);
            let p = &state.player;
            prop_assert!(p.pos.x >= EDGE_PAD - 1e-3);
            prop_assert!(p.pos.x + p.size.x <= state.view_w - EDGE_PAD + 1e-3);
            prop_assert!(p.vel_x.abs() <= p.max_speed + 1e-3);
        }
    }

    #[test]
    fn resource_bounds_hold(seed in any::<u64>()) {
        let state = run_session(seed, 3000, &[0, 1, 2, 0, 2, 1]);
        prop_assert!(state.lives <= LIVES_MAX);
        prop_assert!(state.player.shield <= SHIELD_MAX);
        if state.running {
            prop_assert!(state.lives > 0);
        } else {
            prop_assert_eq!(state.lives, 0);
        }
    }

    #[test]
    fn score_is_monotonic_between_resets(seed in any::<u64>()) {
        let mut state = GameState::new(seed, 420.0, 780.0);
        let mut last_score = 0u64;
        for _ in 0..2000 {
            tick(&mut state, &TickInput::default(), 16.0);
            prop_assert!(state.score >= last_score);
            last_score = state.score;
            if !state.running {
                break;
            }
        }
    }

    #[test]
    fn powerups_keep_their_minimum_spacing(seed in any::<u64>()) {
        let mut state = GameState::new(seed, 420.0, 780.0);
        state.tuning.max_powerups = 3;
        for i in 0..600 {
            if i % 5 == 0 {
                state.inject_powerup_spawn(None, Some(i % 4), None);
            }
            tick(&mut state, &TickInput::default(), 16.0);
            // Spacing is checked at spawn time against the candidate's
            // top-left corner, so centers sit at least min_dist minus
            // one diagonal apart. Equal fall speeds keep it that way.
            for (a_idx, a) in state.powerups.iter().enumerate() {
                let slack = a.size * std::f32::consts::SQRT_2;
                for b in &state.powerups[a_idx + 1..] {
                    let gap = a.center().distance(b.center());
                    prop_assert!(gap >= state.tuning.min_powerup_dist - slack);
                }
            }
            if !state.running {
                break;
            }
        }
    }

    #[test]
    fn replay_is_deterministic(seed in any::<u64>(), moves in proptest::collection::vec(0u8..4, 4..16)) {
        let a = run_session(seed, 600, &moves);
        let b = run_session(seed, 600, &moves);
        let ja = serde_json::to_string(&a).unwrap();
        let jb = serde_json::to_string(&b).unwrap();
        prop_assert_eq!(ja, jb);
    }
}

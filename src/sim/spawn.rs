//! Spawner
//!
//! Decides when and where obstacles and power-ups are created. Every
//! rejection (pool at capacity, proximity clash, anti-repetition) is a
//! silent no-op; the caller simply tries again next interval.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::lanes::nearest_lane;
use super::state::{GameState, Obstacle, ObstacleKind, PowerUp, PowerUpKind, POWERUP_KINDS};
use crate::clamp_to_field;
use crate::tuning::Tuning;

/// Timed spawn pass: fires a spawn attempt when the interval elapses,
/// side-rolls a power-up, then ramps the interval down toward its floor.
pub fn scheduled(state: &mut GameState, lanes: &[f32], dt: f32) {
    state.spawn_timer_ms += dt;
    if state.spawn_timer_ms <= state.spawn_interval_ms {
        return;
    }
    state.spawn_timer_ms = 0.0;

    spawn_obstacle(state, lanes, None);

    if state.rng.random_bool(state.tuning.powerup_chance) {
        let x = 20.0 + state.rng.random::<f32>() * (state.view_w - 80.0);
        spawn_powerup(state, x, -24.0, None);
    }

    state.spawn_interval_ms = (state.spawn_interval_ms - state.tuning.spawn_ramp_per_spawn)
        .max(state.tuning.min_spawn_interval_ms);
}

/// Create one obstacle, unless the pool is at the level's capacity.
/// Returns whether a spawn occurred.
pub fn spawn_obstacle(state: &mut GameState, lanes: &[f32], forced_lane: Option<usize>) -> bool {
    let cap = state.tuning.level(state.level_index).max_obstacles;
    if state.obstacles.len() >= cap || lanes.is_empty() {
        return false;
    }

    let lane = match forced_lane {
        Some(lane) => lane.min(lanes.len() - 1),
        None => choose_lane(
            &mut state.rng,
            &state.tuning,
            lanes,
            state.player.center_x(),
            state.level_index,
            state.last_spawn_lane,
        ),
    };

    let t = &state.tuning;
    let size_roll: f32 = state.rng.random();
    let speed_roll: f32 = state.rng.random();
    let kind_roll: f32 = state.rng.random();
    let jitter_roll: f32 = state.rng.random();
    let accel_roll: f32 = state.rng.random();
    let phase_roll: f32 = state.rng.random();
    let amp_roll: f32 = state.rng.random();
    let osc_roll: f32 = state.rng.random();
    let drop_roll: f32 = state.rng.random();

    let kind = if kind_roll < t.large_threshold {
        ObstacleKind::Large
    } else if kind_roll < t.zigzag_threshold {
        ObstacleKind::Zigzag
    } else if kind_roll < t.homing_threshold {
        ObstacleKind::Homing
    } else {
        ObstacleKind::Plain
    };

    let mut size = t.obstacle_size_min + size_roll * t.obstacle_size_span;
    let jitter = 1.0 - t.speed_jitter + jitter_roll * t.speed_jitter * 2.0;
    let mut speed =
        (t.base_speed_min + speed_roll * t.base_speed_span) * t.level(state.level_index).speed_mul * jitter;
    let mut osc_amp = t.osc_amp_min + amp_roll * t.osc_amp_span;
    let mut osc_speed = t.osc_speed_min + osc_roll * t.osc_speed_span;

    match kind {
        ObstacleKind::Large => {
            size *= 1.5;
            speed *= 0.75;
        }
        ObstacleKind::Zigzag => {
            osc_amp *= 1.6;
            osc_speed *= 1.5;
        }
        _ => {}
    }

    let x = clamp_to_field(lanes[lane] - size / 2.0, size, state.view_w);
    let y = -size - drop_roll * 120.0;
    let accel = t.fall_accel_min + accel_roll * t.fall_accel_span;
    let phase = phase_roll * std::f32::consts::TAU;

    let id = state.next_entity_id();
    state.obstacles.push(Obstacle {
        id,
        lane,
        pos: Vec2::new(x, y),
        size,
        speed,
        accel,
        kind,
        phase,
        osc_amp,
        osc_speed,
        trail: Vec::new(),
    });
    state.last_spawn_lane = Some(lane);
    true
}

/// Create one power-up with its top-left near `(x, y)`, unless the pool
/// is at its cap or the point sits within the minimum distance of an
/// existing power-up. Returns whether a spawn occurred.
pub fn spawn_powerup(state: &mut GameState, x: f32, y: f32, forced_kind: Option<PowerUpKind>) -> bool {
    let t = &state.tuning;
    if state.powerups.len() >= t.max_powerups {
        return false;
    }
    for p in &state.powerups {
        if p.center().distance(Vec2::new(x, y)) < t.min_powerup_dist {
            return false;
        }
    }

    let kind = match forced_kind {
        Some(kind) => kind,
        None => POWERUP_KINDS[state.rng.random_range(0..POWERUP_KINDS.len())],
    };
    let size = (state.view_w * t.powerup_size_frac).clamp(t.powerup_size_min, t.powerup_size_max);
    let fall_speed = t.powerup_fall_speed;
    let x = clamp_to_field(x, size, state.view_w);

    let id = state.next_entity_id();
    state.powerups.push(PowerUp {
        id,
        kind,
        pos: Vec2::new(x, y),
        size,
        fall_speed,
    });
    true
}

/// Weighted lane targeting. With rising level index the draw shifts
/// toward the player's lane, then an adjacent lane, with the remainder
/// uniform. A bounded number of resamples avoids repeating the previous
/// spawn's lane.
fn choose_lane(
    rng: &mut Pcg32,
    tuning: &Tuning,
    lanes: &[f32],
    player_cx: f32,
    level_index: usize,
    last_lane: Option<usize>,
) -> usize {
    let bias = &tuning.lane_bias;
    let level = level_index as f32;
    let p_player = (bias.player_base + bias.player_per_level * level).min(bias.player_cap);
    let p_adjacent = (bias.adjacent_base + bias.adjacent_per_level * level).min(bias.adjacent_cap);
    let player_lane = nearest_lane(lanes, player_cx);

    let mut pick = 0;
    for _ in 0..=tuning.anti_repeat_retries {
        let roll: f32 = rng.random();
        pick = if roll < p_player {
            player_lane
        } else if roll < p_player + p_adjacent {
            let side = if rng.random_bool(0.5) { 1isize } else { -1 };
            (player_lane as isize + side).clamp(0, lanes.len() as isize - 1) as usize
        } else {
            rng.random_range(0..lanes.len())
        };
        if Some(pick) != last_lane {
            break;
        }
    }
    pick
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::lanes::lane_centers;
    use crate::consts::EDGE_PAD;

    fn fresh() -> (GameState, Vec<f32>) {
        let state = GameState::new(42, 420.0, 780.0);
        let lanes = lane_centers(state.view_w, state.tuning.lane_count);
        (state, lanes)
    }

    #[test]
    fn obstacle_pool_cap_refuses() {
        let (mut state, lanes) = fresh();
        let cap = state.tuning.level(0).max_obstacles;
        for _ in 0..cap * 2 {
            spawn_obstacle(&mut state, &lanes, None);
        }
        assert_eq!(state.obstacles.len(), cap);
        assert!(!spawn_obstacle(&mut state, &lanes, None));
    }

    #[test]
    fn spawned_obstacles_stay_in_field() {
        let (mut state, lanes) = fresh();
        for _ in 0..state.tuning.level(0).max_obstacles {
            spawn_obstacle(&mut state, &lanes, None);
        }
        for ob in &state.obstacles {
            assert!(ob.pos.x >= EDGE_PAD);
            assert!(ob.pos.x + ob.size <= state.view_w - EDGE_PAD + 0.01);
            assert!(ob.pos.y < 0.0);
        }
    }

    #[test]
    fn all_kinds_appear_over_many_spawns() {
        let (mut state, lanes) = fresh();
        let mut seen = [false; 4];
        for _ in 0..300 {
            spawn_obstacle(&mut state, &lanes, None);
            for ob in state.obstacles.drain(..) {
                let idx = match ob.kind {
                    ObstacleKind::Plain => 0,
                    ObstacleKind::Large => 1,
                    ObstacleKind::Zigzag => 2,
                    ObstacleKind::Homing => 3,
                };
                seen[idx] = true;
            }
        }
        assert_eq!(seen, [true; 4]);
    }

    #[test]
    fn forced_lane_is_respected_and_recorded() {
        let (mut state, lanes) = fresh();
        assert!(spawn_obstacle(&mut state, &lanes, Some(2)));
        assert_eq!(state.obstacles[0].lane, 2);
        assert_eq!(state.last_spawn_lane, Some(2));
        // Out-of-range forced lanes clamp instead of panicking
        assert!(spawn_obstacle(&mut state, &lanes, Some(99)));
        assert_eq!(state.obstacles[1].lane, lanes.len() - 1);
    }

    #[test]
    fn powerup_cap_and_proximity_refuse() {
        let (mut state, _) = fresh();
        assert!(spawn_powerup(&mut state, 100.0, -24.0, Some(PowerUpKind::Shield)));
        // Global cap (1 by default)
        assert!(!spawn_powerup(&mut state, 300.0, -24.0, Some(PowerUpKind::Slow)));

        state.tuning.max_powerups = 3;
        // Too close to the first one
        assert!(!spawn_powerup(&mut state, 110.0, -24.0, Some(PowerUpKind::Slow)));
        // Far enough
        assert!(spawn_powerup(&mut state, 300.0, -24.0, Some(PowerUpKind::Slow)));
        assert_eq!(state.powerups.len(), 2);
    }

    #[test]
    fn powerup_size_scales_with_viewport() {
        let (mut state, _) = fresh();
        spawn_powerup(&mut state, 100.0, -24.0, Some(PowerUpKind::Shield));
        let t = &state.tuning;
        let size = state.powerups[0].size;
        assert!(size >= t.powerup_size_min && size <= t.powerup_size_max);
    }

    #[test]
    fn lane_bias_grows_with_level() {
        // At a high level index the player's lane must be drawn more often
        // than a uniform pick would produce.
        let (mut state, lanes) = fresh();
        state.level_index = state.tuning.last_level();
        let player_lane = nearest_lane(&lanes, state.player.center_x());
        let mut hits = 0;
        let total = 400;
        for _ in 0..total {
            spawn_obstacle(&mut state, &lanes, None);
            let ob = state.obstacles.pop().unwrap();
            if ob.lane == player_lane {
                hits += 1;
            }
        }
        // Uniform would be ~25%; the biased policy should clear 32%.
        assert!(hits * 100 > total * 32, "only {hits}/{total} in player lane");
    }

    #[test]
    fn scheduled_ramps_interval_down() {
        let (mut state, lanes) = fresh();
        let before = state.spawn_interval_ms;
        scheduled(&mut state, &lanes, before + 1.0);
        assert_eq!(state.obstacles.len(), 1);
        assert!(state.spawn_interval_ms < before);
        assert_eq!(state.spawn_timer_ms, 0.0);
        // No attempt until the interval elapses again
        scheduled(&mut state, &lanes, 10.0);
        assert_eq!(state.obstacles.len(), 1);
    }
}

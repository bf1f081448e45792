//! Per-frame simulation pass
//!
//! One fixed-order pass per animation frame: player input kinematics,
//! queued external injections, the timed Spawner, the Mover, Collision &
//! Resolution, then the Level Clock. The host supplies elapsed time; the
//! core never reads a wall clock.

use super::lanes::lane_centers;
use super::state::{GameEvent, GameState};
use super::{collision, motion, spawn};
use crate::consts::*;
use crate::events::InjectedEvent;

/// Input commands for a single frame.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Normalized horizontal target (touch/pointer), viewport coordinates.
    pub target_x: Option<f32>,
    /// Left/right hold intent (keyboard).
    pub hold_left: bool,
    pub hold_right: bool,
    /// Toggle the pause flag.
    pub pause: bool,
    /// Reset the whole session.
    pub restart: bool,
    /// Autopilot steering for the headless demo.
    pub idle_mode: bool,
}

/// Advance the simulation by `dt_ms` milliseconds (clamped to
/// [`DT_CLAMP_MS`]). When paused or after game over nothing mutates;
/// the renderer keeps reading the frozen state.
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f32) {
    let dt = dt_ms.clamp(0.0, DT_CLAMP_MS);

    if input.restart {
        state.reset();
        return;
    }
    if input.pause {
        state.paused = !state.paused;
        log::debug!("paused: {}", state.paused);
    }
    if !state.running || state.paused {
        return;
    }

    state.frame += 1;
    state.time_ms += dt as f64;

    let lanes = lane_centers(state.view_w, state.tuning.lane_count);

    let mut input = input.clone();
    if input.idle_mode {
        input.target_x = Some(autopilot_target(state, &lanes));
    }

    apply_player_input(state, &input);
    drain_injections(state, &lanes);
    spawn::scheduled(state, &lanes, dt);
    motion::update(state, &lanes, dt);
    collision::resolve(state);
    level_clock(state, dt);
}

/// Integrate held/targeted input into the player's velocity and
/// position, clamping at the playfield walls.
fn apply_player_input(state: &mut GameState, input: &TickInput) {
    let view_w = state.view_w;
    let p = &mut state.player;

    if let Some(target) = input.target_x {
        // Damped spring toward the pointer target.
        let target = target - p.size.x / 2.0;
        p.vel_x = (p.vel_x + (target - p.pos.x) * 0.048) * p.friction;
    } else if input.hold_left && !input.hold_right {
        p.vel_x -= p.accel * 1.2;
    } else if input.hold_right && !input.hold_left {
        p.vel_x += p.accel * 1.2;
    } else {
        p.vel_x *= p.friction;
        if p.vel_x.abs() < 0.02 {
            p.vel_x = 0.0;
        }
    }

    p.vel_x = p.vel_x.clamp(-p.max_speed, p.max_speed);
    p.pos.x += p.vel_x;

    let min_x = EDGE_PAD;
    let max_x = view_w - p.size.x - EDGE_PAD;
    if p.pos.x < min_x {
        p.pos.x = min_x;
        p.vel_x = 0.0;
    } else if p.pos.x > max_x {
        p.pos.x = max_x;
        p.vel_x = 0.0;
    }
}

/// Apply queued external spawn requests, right before the Spawner step
/// so they never interleave with the collision sweep. The requests go
/// through the same cap and anti-clustering rules as timed spawns.
fn drain_injections(state: &mut GameState, lanes: &[f32]) {
    for event in state.take_pending() {
        match event {
            InjectedEvent::SpawnObstacle { lane } => {
                spawn::spawn_obstacle(state, lanes, lane);
            }
            InjectedEvent::SpawnPowerUp { kind, lane, x } => {
                let size = (state.view_w * state.tuning.powerup_size_frac)
                    .clamp(state.tuning.powerup_size_min, state.tuning.powerup_size_max);
                let x = x
                    .or_else(|| lane.and_then(|l| lanes.get(l).map(|&c| c - size / 2.0)))
                    .unwrap_or(state.view_w / 2.0 - size / 2.0);
                spawn::spawn_powerup(state, x, -24.0, kind);
            }
        }
    }
}

/// Level countdown and promotion. The terminal level is genuinely
/// endless: its countdown pins at zero and never re-fires the bonus.
fn level_clock(state: &mut GameState, dt: f32) {
    if state.level_remaining_ms <= 0.0 {
        return;
    }
    state.level_remaining_ms -= dt;
    if state.level_remaining_ms > 0.0 {
        return;
    }

    if state.level_index < state.tuning.last_level() {
        let next = state.level_index + 1;
        state.apply_level(next);
        state.score += state.tuning.level_bonus;
        state.push_event(GameEvent::LevelUp { level: next });
    } else {
        state.level_remaining_ms = 0.0;
    }
}

/// Demo-mode steering: head for the lane with the most vertical
/// clearance above the player.
fn autopilot_target(state: &GameState, lanes: &[f32]) -> f32 {
    let mut best = lanes[0];
    let mut best_clearance = f32::MIN;
    for (i, &cx) in lanes.iter().enumerate() {
        let mut clearance = f32::MAX;
        for ob in &state.obstacles {
            if ob.lane == i && ob.pos.y < state.player.pos.y {
                clearance = clearance.min(state.player.pos.y - (ob.pos.y + ob.size));
            }
        }
        if clearance > best_clearance {
            best_clearance = clearance;
            best = cx;
        }
    }
    best
}

//! Mover
//!
//! Per-frame kinematics for every live entity. Speeds are expressed in
//! px per 16ms frame-unit, so positions advance by `speed * dt / 16`.
//!
//! Cosmetic randomness (trail sampling) is hash-mixed from the frame
//! counter and entity id rather than drawn from the gameplay RNG, so
//! visuals never perturb the deterministic spawn stream.

use super::lanes::nearest_lane;
use super::state::{GameState, ObstacleKind};
use crate::clamp_to_field;

/// Advance every pool by `dt` milliseconds.
pub fn update(state: &mut GameState, lanes: &[f32], dt: f32) {
    let frame_units = dt / 16.0;
    let player_cx = state.player.center_x();
    let view_w = state.view_w;
    let view_h = state.view_h;

    // Background parallax; wraps to the top.
    for star in &mut state.stars {
        star.pos.y += star.speed * dt * 0.02;
        if star.pos.y > view_h + 8.0 {
            star.pos.y = -10.0;
        }
    }

    let trail_chance = state.tuning.trail_chance;
    let trail_life = state.tuning.trail_life_ms;
    let trail_max = state.tuning.trail_max_len;
    let lane_ease = state.tuning.lane_ease;
    let frame = state.frame;

    for ob in &mut state.obstacles {
        // Homing obstacles re-aim at the player's lane while falling.
        if ob.kind == ObstacleKind::Homing {
            ob.lane = nearest_lane(lanes, player_cx);
        }

        // Ease toward the lane center by a fixed fraction of the
        // remaining distance.
        let target_x = clamp_to_field(lanes[ob.lane.min(lanes.len() - 1)] - ob.size / 2.0, ob.size, view_w);
        ob.pos.x += (target_x - ob.pos.x) * lane_ease;

        // Sinusoidal vertical wobble plus accelerating fall.
        ob.phase += ob.osc_speed * dt;
        let wobble = ob.phase.sin() * ob.osc_amp * 0.03;
        ob.speed += ob.accel * frame_units;
        ob.pos.y += ob.speed * frame_units + wobble;

        // Sample the trail on most frames, not all of them.
        if (mix(frame, ob.id) % 1000) as f32 / 1000.0 < trail_chance {
            ob.record_trail(trail_life, trail_max);
        }
        for point in &mut ob.trail {
            point.age_ms += dt;
        }
        ob.trail.retain(|p| p.age_ms <= p.life_ms);
    }

    for p in &mut state.powerups {
        p.pos.y += p.fall_speed * frame_units;
    }

    for particle in &mut state.particles {
        particle.pos += particle.vel * dt * 0.02;
        particle.age_ms += dt;
    }
    state.particles.retain(|p| p.age_ms <= p.life_ms);
}

/// Deterministic hash mix for cosmetic decisions.
#[inline]
fn mix(frame: u64, id: u32) -> u32 {
    (frame as u32)
        .wrapping_mul(2654435761)
        .wrapping_add(id.wrapping_mul(7919))
}

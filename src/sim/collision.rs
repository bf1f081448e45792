//! Collision detection and resolution
//!
//! Axis-aligned overlap tests with a small inward forgiveness pad, and
//! the consequences: shield absorption, life loss, dodge scoring and
//! power-up effects. Sweeps run back-to-front so removals never skip or
//! double-process a neighbor.

use glam::Vec2;

use super::state::{GameEvent, GameState, ObstacleKind, PowerUpKind};
use crate::consts::*;

/// Particle palette indices for the renderer.
pub const COLOR_HIT: u32 = 0;
pub const COLOR_SHIELD: u32 = 1;
pub const COLOR_BOOM: u32 = 2;

/// AABB intersection with `pad` shrinking both boxes, so edge grazes
/// stay misses.
#[inline]
pub fn aabb_overlap(a_pos: Vec2, a_size: Vec2, b_pos: Vec2, b_size: Vec2, pad: f32) -> bool {
    !(a_pos.x + a_size.x - pad < b_pos.x
        || a_pos.x > b_pos.x + b_size.x - pad
        || a_pos.y + a_size.y - pad < b_pos.y
        || a_pos.y > b_pos.y + b_size.y - pad)
}

/// One resolution pass over both pools.
pub fn resolve(state: &mut GameState) {
    let player_pos = state.player.pos;
    let player_size = state.player.size;

    let mut i = state.obstacles.len();
    while i > 0 {
        i -= 1;
        let ob = &state.obstacles[i];
        if aabb_overlap(player_pos, player_size, ob.pos, Vec2::splat(ob.size), HIT_PAD) {
            state.obstacles.remove(i);
            on_player_hit(state);
            continue;
        }
        if ob.pos.y > state.view_h + OBSTACLE_EXIT_SLACK {
            state.obstacles.remove(i);
            // Successful dodge
            state.score += state.tuning.dodge_score;
        }
    }

    let mut i = state.powerups.len();
    while i > 0 {
        i -= 1;
        let p = &state.powerups[i];
        if aabb_overlap(player_pos, player_size, p.pos, Vec2::splat(p.size), HIT_PAD) {
            let p = state.powerups.remove(i);
            apply_powerup(state, p.kind);
            continue;
        }
        if p.pos.y > state.view_h + POWERUP_EXIT_SLACK {
            state.powerups.remove(i);
        }
    }
}

/// Apply one obstacle hit. Shield charges absorb the hit before any
/// life is lost; at zero lives the round ends exactly once.
fn on_player_hit(state: &mut GameState) {
    let center = state.player.pos + state.player.size / 2.0;
    if state.player.shield > 0 {
        state.player.shield -= 1;
        state.push_event(GameEvent::ShieldAbsorbed);
        burst(state, center, COLOR_SHIELD, 16);
        return;
    }

    state.lives = state.lives.saturating_sub(1);
    state.push_event(GameEvent::Hit);
    burst(state, center, COLOR_HIT, 26);

    if state.lives == 0 && state.running {
        state.running = false;
        state.push_event(GameEvent::GameOver { score: state.score });
        log::info!("game over at level {} with score {}", state.level_index + 1, state.score);
    }
}

/// Apply a collected power-up's effect. Each is a one-shot; nothing
/// here installs a standing modifier.
fn apply_powerup(state: &mut GameState, kind: PowerUpKind) {
    match kind {
        PowerUpKind::Shield => {
            state.player.shield = (state.player.shield + 1).min(SHIELD_MAX);
        }
        PowerUpKind::Slow => {
            let factor = state.tuning.slow_factor;
            for ob in &mut state.obstacles {
                ob.speed *= factor;
            }
        }
        PowerUpKind::ExtraLife => {
            state.lives = (state.lives + 1).min(LIVES_MAX);
        }
        PowerUpKind::ClearBomb => {
            // Partial clear: the large obstacles stay a threat.
            state.obstacles.retain(|ob| ob.kind == ObstacleKind::Large);
            let center = Vec2::new(state.view_w / 2.0, state.view_h / 2.0);
            burst(state, center, COLOR_BOOM, 48);
        }
        PowerUpKind::BonusScore => {
            state.score += state.tuning.bonus_score;
        }
    }
    state.push_event(GameEvent::PowerUpCollected(kind));
}

/// Hash-seeded particle burst; cosmetic only, bounded by MAX_PARTICLES.
fn burst(state: &mut GameState, pos: Vec2, color: u32, count: u32) {
    for i in 0..count {
        if state.particles.len() >= MAX_PARTICLES {
            state.particles.remove(0);
        }
        let hash = (state.frame as u32)
            .wrapping_mul(2654435761)
            .wrapping_add(i.wrapping_mul(7919));
        let r1 = (hash % 1000) as f32 / 1000.0;
        let r2 = ((hash >> 10) % 1000) as f32 / 1000.0;
        let r3 = ((hash >> 20) % 1000) as f32 / 1000.0;
        state.particles.push(super::state::Particle {
            pos,
            vel: Vec2::new((r1 - 0.5) * 3.0, (r2 - 1.5) * -2.6),
            age_ms: 0.0,
            life_ms: 180.0 + r3 * 400.0,
            color,
        });
    }
}

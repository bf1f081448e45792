//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Host-supplied elapsed time only, never a wall clock
//! - Seeded RNG only; cosmetic randomness is hash-mixed, not drawn
//! - One ordered pass per frame: Spawner, Mover, Collision, Level Clock
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod lanes;
pub mod motion;
pub mod spawn;
pub mod state;
pub mod tick;

pub use lanes::{lane_centers, nearest_lane};
pub use state::{
    GameEvent, GameState, Hud, Obstacle, ObstacleKind, Particle, Player, PowerUp, PowerUpKind,
    Star, TrailPoint, POWERUP_KINDS,
};
pub use tick::{tick, TickInput};

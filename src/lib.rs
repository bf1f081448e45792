//! Block Dodge - a lane-dodging arcade game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, motion, collisions, game state)
//! - `events`: Relay message parsing and injected spawn events
//! - `tuning`: Data-driven game balance
//! - `highscores`: Pure leaderboard logic (host persists the JSON)
//!
//! Rendering, input devices, audio and storage are external collaborators:
//! they read the state snapshots and the per-frame event feed, and feed a
//! [`sim::TickInput`] back in. The core never draws, beeps or reads a clock.

pub mod events;
pub mod highscores;
pub mod sim;
pub mod tuning;

pub use highscores::HighScores;
pub use tuning::{LevelDef, Tuning};

/// Game configuration constants
pub mod consts {
    /// Upper bound on per-frame elapsed time (ms). Large gaps after tab
    /// backgrounding are clamped instead of teleporting every entity.
    pub const DT_CLAMP_MS: f32 = 60.0;

    /// Minimum usable viewport; degenerate sizes clamp to this.
    pub const MIN_VIEW_WIDTH: f32 = 300.0;
    pub const MIN_VIEW_HEIGHT: f32 = 480.0;

    /// Symmetric margin subtracted from the viewport before dividing lanes.
    pub const LANE_MARGIN: f32 = 26.0;
    /// Hard clamp keeping every entity inside the playfield edges.
    pub const EDGE_PAD: f32 = 8.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 44.0;
    pub const PLAYER_MAX_SPEED: f32 = 14.0;
    pub const PLAYER_ACCEL: f32 = 1.6;
    pub const PLAYER_FRICTION: f32 = 0.84;
    /// Gap between the player's feet and the bottom edge.
    pub const PLAYER_BOTTOM_OFFSET: f32 = 18.0;

    /// Life / shield economy
    pub const STARTING_LIVES: u8 = 3;
    pub const LIVES_MAX: u8 = 5;
    pub const SHIELD_MAX: u8 = 3;

    /// Inward forgiveness padding for hit tests; near-misses at pixel
    /// edges do not register.
    pub const HIT_PAD: f32 = 6.0;

    /// How far past the bottom edge an entity must travel before it is
    /// swept (obstacles award a dodge point at this threshold).
    pub const OBSTACLE_EXIT_SLACK: f32 = 120.0;
    pub const POWERUP_EXIT_SLACK: f32 = 80.0;

    /// Maximum particles
    pub const MAX_PARTICLES: usize = 256;

    /// Bound on queued external spawn injections.
    pub const INJECT_QUEUE_CAP: usize = 8;
}

/// Clamp an entity's left edge so the whole entity stays inside the
/// playfield, [`consts::EDGE_PAD`] away from either side.
#[inline]
pub fn clamp_to_field(x: f32, width: f32, view_w: f32) -> f32 {
    x.clamp(
        consts::EDGE_PAD,
        (view_w - width - consts::EDGE_PAD).max(consts::EDGE_PAD),
    )
}

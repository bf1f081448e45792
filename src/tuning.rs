//! Data-driven game balance
//!
//! Every spawn, motion and scoring knob lives here so levels can be
//! rebalanced (or overridden from JSON) without touching simulation code.
//! The defaults reproduce the shipped balance.

use serde::{Deserialize, Serialize};

/// One timed difficulty phase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelDef {
    /// Level duration in ms. The final level is effectively endless.
    pub duration_ms: f32,
    /// Base interval between automatic obstacle spawn attempts (ms).
    pub spawn_interval_ms: f32,
    /// Multiplier applied to every obstacle's fall speed.
    pub speed_mul: f32,
    /// Obstacle pool capacity while this level is active.
    pub max_obstacles: usize,
}

/// Lane-targeting weights. Later levels bias spawns toward the player's
/// lane instead of merely moving faster; this is the core difficulty knob.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaneBias {
    pub player_base: f32,
    pub player_per_level: f32,
    pub player_cap: f32,
    pub adjacent_base: f32,
    pub adjacent_per_level: f32,
    pub adjacent_cap: f32,
}

impl Default for LaneBias {
    fn default() -> Self {
        Self {
            player_base: 0.10,
            player_per_level: 0.08,
            player_cap: 0.50,
            adjacent_base: 0.15,
            adjacent_per_level: 0.05,
            adjacent_cap: 0.30,
        }
    }
}

/// Complete balance table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub lane_count: usize,
    pub levels: Vec<LevelDef>,

    /// The spawn interval shortens by this much after every scheduled
    /// attempt, down to `min_spawn_interval_ms`.
    pub spawn_ramp_per_spawn: f32,
    pub min_spawn_interval_ms: f32,

    // Obstacles
    pub obstacle_size_min: f32,
    pub obstacle_size_span: f32,
    pub base_speed_min: f32,
    pub base_speed_span: f32,
    /// Multiplicative jitter on top of the level speed multiplier,
    /// drawn from `1.0 ± speed_jitter`.
    pub speed_jitter: f32,
    pub fall_accel_min: f32,
    pub fall_accel_span: f32,
    pub osc_amp_min: f32,
    pub osc_amp_span: f32,
    pub osc_speed_min: f32,
    pub osc_speed_span: f32,
    /// Cumulative kind thresholds on a uniform [0,1) roll:
    /// below `large_threshold` -> Large, then Zigzag, then Homing,
    /// remainder Plain.
    pub large_threshold: f32,
    pub zigzag_threshold: f32,
    pub homing_threshold: f32,
    pub lane_bias: LaneBias,
    /// Bounded resamples when a draw repeats the previous spawn lane.
    pub anti_repeat_retries: u32,
    /// Fraction of the remaining distance an obstacle closes toward its
    /// lane center each frame.
    pub lane_ease: f32,

    // Power-ups
    pub powerup_chance: f64,
    pub max_powerups: usize,
    pub min_powerup_dist: f32,
    pub powerup_fall_speed: f32,
    pub powerup_size_frac: f32,
    pub powerup_size_min: f32,
    pub powerup_size_max: f32,
    /// One-shot damping applied to live obstacle speeds by the slow pickup.
    pub slow_factor: f32,

    // Trails
    pub trail_life_ms: f32,
    pub trail_max_len: usize,
    pub trail_chance: f32,

    // Scoring
    pub dodge_score: u64,
    pub level_bonus: u64,
    pub bonus_score: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            lane_count: 4,
            levels: vec![
                LevelDef { duration_ms: 12_000.0, spawn_interval_ms: 720.0, speed_mul: 1.3, max_obstacles: 10 },
                LevelDef { duration_ms: 15_000.0, spawn_interval_ms: 600.0, speed_mul: 1.45, max_obstacles: 12 },
                LevelDef { duration_ms: 18_000.0, spawn_interval_ms: 480.0, speed_mul: 1.7, max_obstacles: 14 },
                LevelDef { duration_ms: 22_000.0, spawn_interval_ms: 420.0, speed_mul: 2.0, max_obstacles: 16 },
                LevelDef { duration_ms: 9_999_000.0, spawn_interval_ms: 360.0, speed_mul: 2.5, max_obstacles: 18 },
            ],
            spawn_ramp_per_spawn: 0.18,
            min_spawn_interval_ms: 260.0,

            obstacle_size_min: 20.0,
            obstacle_size_span: 36.0,
            base_speed_min: 2.4,
            base_speed_span: 2.6,
            speed_jitter: 0.1,
            fall_accel_min: 0.01,
            fall_accel_span: 0.03,
            osc_amp_min: 10.0,
            osc_amp_span: 18.0,
            osc_speed_min: 0.006,
            osc_speed_span: 0.01,
            large_threshold: 0.14,
            zigzag_threshold: 0.34,
            homing_threshold: 0.52,
            lane_bias: LaneBias::default(),
            anti_repeat_retries: 3,
            lane_ease: 0.1,

            powerup_chance: 0.06,
            max_powerups: 1,
            min_powerup_dist: 120.0,
            powerup_fall_speed: 1.8,
            powerup_size_frac: 0.08,
            powerup_size_min: 34.0,
            powerup_size_max: 72.0,
            slow_factor: 0.64,

            trail_life_ms: 360.0,
            trail_max_len: 14,
            trail_chance: 0.68,

            dodge_score: 1,
            level_bonus: 6,
            bonus_score: 12,
        }
    }
}

impl Tuning {
    /// Level definition for an index, clamped to the terminal level.
    pub fn level(&self, index: usize) -> &LevelDef {
        let last = self.levels.len().saturating_sub(1);
        &self.levels[index.min(last)]
    }

    /// Index of the terminal (endless) level.
    pub fn last_level(&self) -> usize {
        self.levels.len().saturating_sub(1)
    }

    /// Parse a tuning override from JSON. Missing fields keep their
    /// defaults via `#[serde(default)]`.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

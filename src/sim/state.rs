//! Game state and core simulation types
//!
//! The single session context every component operates on. All gameplay
//! randomness is drawn from the seeded RNG owned by [`GameState`] so a
//! session replays identically from its seed and input stream.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::events::InjectedEvent;
use crate::tuning::Tuning;
use crate::clamp_to_field;

/// Obstacle behavioral types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Falls straight for its lane, nothing special.
    Plain,
    /// Bigger and slower; survives the clear-bomb.
    Large,
    /// Exaggerated lateral oscillation.
    Zigzag,
    /// Retargets its lane to the player's lane while falling.
    Homing,
}

/// Power-up kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    Shield,
    Slow,
    ExtraLife,
    ClearBomb,
    BonusScore,
}

/// Every enabled kind, in draw order.
pub const POWERUP_KINDS: [PowerUpKind; 5] = [
    PowerUpKind::Shield,
    PowerUpKind::Slow,
    PowerUpKind::ExtraLife,
    PowerUpKind::ClearBomb,
    PowerUpKind::BonusScore,
];

impl PowerUpKind {
    /// Wire/asset token, as used by the relay payload.
    pub fn as_token(&self) -> &'static str {
        match self {
            PowerUpKind::Shield => "shield",
            PowerUpKind::Slow => "slow",
            PowerUpKind::ExtraLife => "life",
            PowerUpKind::ClearBomb => "boom",
            PowerUpKind::BonusScore => "score",
        }
    }

    pub fn from_token(s: &str) -> Option<Self> {
        match s {
            "shield" => Some(PowerUpKind::Shield),
            "slow" => Some(PowerUpKind::Slow),
            "life" => Some(PowerUpKind::ExtraLife),
            "boom" => Some(PowerUpKind::ClearBomb),
            "score" => Some(PowerUpKind::BonusScore),
            _ => None,
        }
    }
}

/// Trail point for obstacle rendering
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TrailPoint {
    pub pos: Vec2,
    pub age_ms: f32,
    pub life_ms: f32,
    pub size: f32,
}

/// The player's avatar. Single instance, reset at round start.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel_x: f32,
    pub size: Vec2,
    pub max_speed: f32,
    pub accel: f32,
    pub friction: f32,
    /// Consumable hit buffer, 0..=SHIELD_MAX.
    pub shield: u8,
}

impl Player {
    pub fn new(view_w: f32, view_h: f32) -> Self {
        let size = Vec2::splat(PLAYER_SIZE);
        Self {
            pos: Vec2::new((view_w - size.x) / 2.0, view_h - size.y - PLAYER_BOTTOM_OFFSET),
            vel_x: 0.0,
            size,
            max_speed: PLAYER_MAX_SPEED,
            accel: PLAYER_ACCEL,
            friction: PLAYER_FRICTION,
            shield: 0,
        }
    }

    pub fn center_x(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }
}

/// A falling obstacle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Target lane index; the Mover eases x toward its center.
    pub lane: usize,
    pub pos: Vec2,
    /// Square side length.
    pub size: f32,
    /// Fall speed in px per 16ms frame-unit.
    pub speed: f32,
    /// Per-frame-unit vertical acceleration.
    pub accel: f32,
    pub kind: ObstacleKind,
    /// Oscillation phase accumulator (advanced by osc_speed * dt).
    pub phase: f32,
    pub osc_amp: f32,
    pub osc_speed: f32,
    /// Recent center positions, newest last, for fade-out rendering.
    #[serde(skip)]
    pub trail: Vec<TrailPoint>,
}

impl Obstacle {
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }

    /// Append the current center to the trail, evicting the oldest entry
    /// past `max_len`.
    pub fn record_trail(&mut self, life_ms: f32, max_len: usize) {
        let size = (self.size * 0.28).max(6.0);
        self.trail.push(TrailPoint {
            pos: self.center(),
            age_ms: 0.0,
            life_ms,
            size,
        });
        if self.trail.len() > max_len {
            self.trail.remove(0);
        }
    }
}

/// A falling collectible
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub pos: Vec2,
    /// Square side length, scaled to the viewport.
    pub size: f32,
    /// Fall speed in px per 16ms frame-unit.
    pub fall_speed: f32,
}

impl PowerUp {
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }
}

/// A particle for visual feedback. Not gameplay-relevant.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub age_ms: f32,
    pub life_ms: f32,
    /// Palette index for the renderer.
    pub color: u32,
}

/// Background parallax star. Wraps to the top when it exits.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Star {
    pub pos: Vec2,
    pub radius: f32,
    pub alpha: f32,
    pub speed: f32,
}

/// Side effects surfaced to the rendering/audio collaborator, drained
/// once per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    ShieldAbsorbed,
    Hit,
    GameOver { score: u64 },
    PowerUpCollected(PowerUpKind),
    LevelUp { level: usize },
    Reset,
}

/// Read-only session snapshot for the HUD.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hud {
    pub score: u64,
    pub lives: u8,
    pub shield: u8,
    /// Zero-based level index.
    pub level: usize,
    pub level_remaining_ms: f32,
    pub running: bool,
    pub paused: bool,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    /// Gameplay RNG; every spawn decision draws from this.
    pub rng: Pcg32,
    pub tuning: Tuning,

    pub view_w: f32,
    pub view_h: f32,

    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub powerups: Vec<PowerUp>,
    /// Visual particles (not gameplay-affecting)
    #[serde(skip)]
    pub particles: Vec<Particle>,
    pub stars: Vec<Star>,

    /// Monotonic between resets.
    pub score: u64,
    pub lives: u8,

    pub level_index: usize,
    pub level_remaining_ms: f32,
    pub spawn_interval_ms: f32,
    pub spawn_timer_ms: f32,
    /// Lane of the most recent spawn, for the anti-repetition rule.
    pub last_spawn_lane: Option<usize>,

    /// False once the round ends; only an explicit reset restarts it.
    pub running: bool,
    pub paused: bool,

    pub frame: u64,
    pub time_ms: f64,

    /// Queued external spawn injections, drained before the Spawner step.
    #[serde(skip)]
    pending: Vec<InjectedEvent>,
    /// Per-frame side-effect feed.
    #[serde(skip)]
    events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a session with the default balance table.
    pub fn new(seed: u64, view_w: f32, view_h: f32) -> Self {
        Self::with_tuning(seed, view_w, view_h, Tuning::default())
    }

    pub fn with_tuning(seed: u64, view_w: f32, view_h: f32, tuning: Tuning) -> Self {
        let view_w = clamp_view_w(view_w);
        let view_h = clamp_view_h(view_h);
        let mut rng = Pcg32::seed_from_u64(seed);
        let stars = init_stars(&mut rng, view_w, view_h);
        let level = tuning.level(0).clone();
        Self {
            seed,
            rng,
            view_w,
            view_h,
            player: Player::new(view_w, view_h),
            obstacles: Vec::new(),
            powerups: Vec::new(),
            particles: Vec::new(),
            stars,
            score: 0,
            lives: STARTING_LIVES,
            level_index: 0,
            level_remaining_ms: level.duration_ms,
            spawn_interval_ms: level.spawn_interval_ms,
            spawn_timer_ms: 0.0,
            last_spawn_lane: None,
            running: true,
            paused: false,
            frame: 0,
            time_ms: 0.0,
            pending: Vec::new(),
            events: Vec::new(),
            next_id: 1,
            tuning,
        }
    }

    /// Reinitialize every pool and counter atomically. The seed, tuning
    /// and viewport carry over; no partial reset state is observable.
    pub fn reset(&mut self) {
        let fresh = Self::with_tuning(self.seed, self.view_w, self.view_h, self.tuning.clone());
        *self = fresh;
        self.push_event(GameEvent::Reset);
        log::info!("session reset (seed {})", self.seed);
    }

    /// Apply a new viewport size, clamped to the minimum playfield.
    /// The player is re-anchored to the bottom edge and kept in bounds.
    pub fn set_viewport(&mut self, view_w: f32, view_h: f32) {
        self.view_w = clamp_view_w(view_w);
        self.view_h = clamp_view_h(view_h);
        self.player.pos.y = self.view_h - self.player.size.y - PLAYER_BOTTOM_OFFSET;
        self.player.pos.x = clamp_to_field(self.player.pos.x, self.player.size.x, self.view_w);
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Request an obstacle spawn from outside the frame loop. The request
    /// is queued and applied just before the next Spawner step, subject
    /// to the same capacity rules; a full queue drops it silently.
    pub fn inject_obstacle_spawn(&mut self, lane: Option<usize>) {
        self.inject(InjectedEvent::SpawnObstacle { lane });
    }

    /// Request a power-up spawn of `kind` near `lane` (or at `x`).
    /// Same queueing and cap/anti-clustering rules as the timed Spawner.
    pub fn inject_powerup_spawn(
        &mut self,
        kind: Option<PowerUpKind>,
        lane: Option<usize>,
        x: Option<f32>,
    ) {
        self.inject(InjectedEvent::SpawnPowerUp { kind, lane, x });
    }

    pub fn inject(&mut self, event: InjectedEvent) {
        if self.pending.len() < INJECT_QUEUE_CAP {
            self.pending.push(event);
        }
    }

    pub(crate) fn take_pending(&mut self) -> Vec<InjectedEvent> {
        std::mem::take(&mut self.pending)
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Drain the side effects accumulated since the last call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Read-only HUD snapshot.
    pub fn hud(&self) -> Hud {
        Hud {
            score: self.score,
            lives: self.lives,
            shield: self.player.shield,
            level: self.level_index,
            level_remaining_ms: self.level_remaining_ms.max(0.0),
            running: self.running,
            paused: self.paused,
        }
    }

    /// Enter a level: reset the countdown and the spawn cadence.
    pub(crate) fn apply_level(&mut self, index: usize) {
        let index = index.min(self.tuning.last_level());
        let level = self.tuning.level(index);
        self.level_index = index;
        self.level_remaining_ms = level.duration_ms;
        self.spawn_interval_ms = level.spawn_interval_ms;
        log::info!(
            "level {} (spawn every {:.0}ms, speed x{})",
            index + 1,
            self.spawn_interval_ms,
            level.speed_mul
        );
    }
}

fn clamp_view_w(w: f32) -> f32 {
    if w.is_finite() { w.max(MIN_VIEW_WIDTH) } else { MIN_VIEW_WIDTH }
}

fn clamp_view_h(h: f32) -> f32 {
    if h.is_finite() { h.max(MIN_VIEW_HEIGHT) } else { MIN_VIEW_HEIGHT }
}

/// Seed the background starfield, scaled to the viewport width.
fn init_stars(rng: &mut Pcg32, view_w: f32, view_h: f32) -> Vec<Star> {
    let count = ((view_w * 0.06) as usize).max(40);
    (0..count)
        .map(|_| Star {
            pos: Vec2::new(
                rng.random::<f32>() * view_w,
                rng.random::<f32>() * view_h,
            ),
            radius: 0.6 + rng.random::<f32>() * 1.6,
            alpha: 0.15 + rng.random::<f32>() * 0.7,
            speed: 0.02 + rng.random::<f32>() * 0.07,
        })
        .collect()
}

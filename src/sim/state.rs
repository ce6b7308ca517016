//! Session state
//!
//! One `GameState` is one playthrough: it exclusively owns the character,
//! the obstacle field, the seeded RNG and the progression fields. Everything
//! outside the simulation sees it only through `FrameResult`.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::character::Character;
use super::obstacles::ObstacleField;
use crate::tuning::{ConfigError, Span, Tuning};

/// Level of play; each has its own terrain, music track and sky
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum Level {
    #[default]
    One,
    Two,
    Three,
}

impl Level {
    pub const COUNT: usize = 3;
    pub const ALL: [Level; Level::COUNT] = [Level::One, Level::Two, Level::Three];

    /// 1-based level number, also the music track id
    pub fn number(self) -> u8 {
        self.index() as u8 + 1
    }

    pub fn index(self) -> usize {
        match self {
            Level::One => 0,
            Level::Two => 1,
            Level::Three => 2,
        }
    }

    pub fn next(self) -> Option<Level> {
        match self {
            Level::One => Some(Level::Two),
            Level::Two => Some(Level::Three),
            Level::Three => None,
        }
    }

    pub fn is_final(self) -> bool {
        self.next().is_none()
    }

    /// Background clear colour (RGBA)
    pub fn sky_color(self) -> [f32; 4] {
        match self {
            Level::One => [0.7, 0.85, 1.0, 1.0],
            Level::Two => [0.75, 0.6, 0.9, 1.0],
            Level::Three => [0.7, 0.7, 0.7, 1.0],
        }
    }
}

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Playing,
    Paused,
    /// Lives exhausted; waits for confirm
    GameOver,
    /// Final level finished; waits for confirm
    LevelCleared,
}

/// One-shot intents for the audio layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PlayHitSound { volume: f32 },
    /// Stop whatever plays and loop `track`
    SwitchMusicTrack { track: u8, volume: f32 },
    StopMusic,
    PauseMusic,
    ResumeMusic,
}

/// Complete session state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    tuning: Tuning,
    pub level: Level,
    pub phase: GamePhase,
    pub character: Character,
    pub obstacles: ObstacleField,
    /// Seconds since the last spawn
    pub spawn_timer: f32,
    /// Seconds between the last spawn and the next one
    pub spawn_interval: f32,
    /// Viewport anchor, kept `camera_lead` ahead of the character
    pub camera_anchor_x: f32,
    /// Seconds since the level was cleared
    pub clear_time: f32,
    events: Vec<GameEvent>,
}

impl GameState {
    /// New session with the stock tuning
    pub fn new(seed: u64) -> Self {
        Self::build(seed, Tuning::default())
    }

    /// New session with custom tuning; refuses invalid configuration
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Result<Self, ConfigError> {
        tuning.validate()?;
        Ok(Self::build(seed, tuning))
    }

    fn build(seed: u64, tuning: Tuning) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            level: Level::One,
            phase: GamePhase::Playing,
            character: Character::new(tuning.character),
            obstacles: ObstacleField::new(),
            spawn_timer: 0.0,
            spawn_interval: 0.0,
            camera_anchor_x: 0.0,
            clear_time: 0.0,
            events: Vec::new(),
            tuning,
        };
        state.start_session();
        state
    }

    /// Fresh playthrough at level 1. The RNG keeps running.
    pub fn reset(&mut self) {
        self.start_session();
        log::info!("Session reset (seed {})", self.seed);
    }

    fn start_session(&mut self) {
        self.level = Level::One;
        self.phase = GamePhase::Playing;
        self.character.reset();
        self.obstacles.clear();
        self.spawn_timer = 0.0;
        self.spawn_interval = self.sample(self.tuning.spawn.initial_interval);
        self.clear_time = 0.0;
        self.camera_anchor_x = self.character.position.x + self.tuning.progression.camera_lead;
        self.spawn_obstacle();
        self.switch_music(Level::One);
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Ground height under `x` in the current level
    pub fn ground_height(&self, x: f32) -> f32 {
        self.tuning.ground_height(self.level, x)
    }

    /// Spawn the next obstacle ahead of the character
    pub fn spawn_obstacle(&mut self) {
        let ground = self.tuning.terrain_for(self.level);
        self.obstacles.spawn_next(
            self.character.position.x,
            ground,
            &self.tuning.spawn,
            self.tuning.obstacle_kinds,
            &mut self.rng,
        );
    }

    /// Scroll, re-seat and cull obstacles against the current level's ground
    pub fn scroll_obstacles(&mut self, dt: f32) {
        let ground = self.tuning.terrain_for(self.level);
        self.obstacles
            .tick(dt, self.character.position.x, ground, &self.tuning.spawn);
    }

    /// Draw a uniform sample from `span`
    pub(crate) fn sample(&mut self, span: Span) -> f32 {
        self.rng.random_range(span.min..=span.max)
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub(crate) fn switch_music(&mut self, level: Level) {
        let volume = self.tuning.audio.music_volume;
        self.emit(GameEvent::SwitchMusicTrack {
            track: level.number(),
            volume,
        });
    }

    /// Events emitted since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn is_level_cleared(&self) -> bool {
        self.phase == GamePhase::LevelCleared
    }
}

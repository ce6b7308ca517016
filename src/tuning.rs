//! Data-driven game balance
//!
//! Every number the simulation uses lives here. `Tuning::default()` is the
//! stock game; a JSON file may override any subset of it. Validation happens
//! once, when a session is built, so a bad file never surfaces mid-run.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::terrain::{TerrainProfile, default_profiles};
use crate::sim::Level;

/// Reasons a tuning set is refused
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("at least one obstacle kind is required")]
    NoObstacleKinds,
    #[error("expected {expected} terrain profiles, found {actual}")]
    TerrainLevelCount { expected: usize, actual: usize },
    #[error("terrain for level {level} has a non-finite base or peak")]
    NonFiniteTerrain { level: u8 },
    #[error("terrain for level {level}: hill {index} must satisfy start < crest_start <= crest_end < end")]
    MalformedHill { level: u8, index: usize },
    #[error("terrain for level {level}: hill {index} starts before the previous hill ends")]
    OverlappingHills { level: u8, index: usize },
    #[error("{name} range {min}..{max} is inverted or non-finite")]
    InvalidRange { name: &'static str, min: f32, max: f32 },
    #[error("{name} must be finite")]
    NonFinite { name: &'static str },
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },
    #[error("{name} must lie in 0..=1, got {value}")]
    OutOfUnitRange { name: &'static str, value: f32 },
    #[error("level thresholds must increase: level 2 at {two}, level 3 at {three}, clear at {clear}")]
    UnorderedThresholds { two: f32, three: f32, clear: f32 },
    #[error("invalid tuning json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("could not read tuning file: {0}")]
    Io(#[from] std::io::Error),
}

/// Closed interval `[min, max]` sampled uniformly
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    fn check(&self, name: &'static str) -> Result<(), ConfigError> {
        if self.min.is_finite() && self.max.is_finite() && self.min <= self.max {
            Ok(())
        } else {
            Err(ConfigError::InvalidRange {
                name,
                min: self.min,
                max: self.max,
            })
        }
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { name, value })
    }
}

fn unit(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfUnitRange { name, value })
    }
}

/// Character movement and crash handling
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterTuning {
    /// Spawn point, also the anchor crash recovery eases toward
    pub spawn: Vec2,
    /// Constant acceleration (gravity)
    pub gravity: Vec2,
    /// Upward speed given by a jump
    pub jump_velocity: f32,
    /// Constant forward speed while not crashed
    pub forward_speed: f32,
    /// Backward drift while crashed
    pub knockback_speed: f32,
    /// Seconds spent crashed before recovery
    pub crash_duration: f32,
    /// Fraction of the way back to the spawn x taken on recovery
    pub recovery_blend: f32,
    pub starting_lives: u32,
    /// Side length of the square body
    pub body_size: f32,
}

impl Default for CharacterTuning {
    fn default() -> Self {
        Self {
            spawn: Vec2::new(80.0, 100.0),
            gravity: Vec2::new(0.0, -1500.0),
            jump_velocity: 700.0,
            forward_speed: 100.0,
            knockback_speed: 100.0,
            crash_duration: 1.0,
            recovery_blend: 0.4,
            starting_lives: 3,
            body_size: 64.0,
        }
    }
}

/// Obstacle spawning, scrolling and culling
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnTuning {
    /// Minimum distance ahead of the character for a new obstacle
    pub ahead_distance: f32,
    /// Distance at which difficulty reaches 1
    pub difficulty_distance: f32,
    /// Gap range at difficulty 0
    pub gap_easy: Span,
    /// Gap range at difficulty 1
    pub gap_hard: Span,
    /// Spawn interval drawn at session start and on reset
    pub initial_interval: Span,
    /// Spawn interval drawn after every spawn
    pub interval: Span,
    /// How far obstacles sink into the ground line
    pub embed: f32,
    pub obstacle_size: f32,
    pub scroll_speed: f32,
    /// Obstacles whose right edge is this far behind the character are dropped
    pub cull_distance: f32,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            ahead_distance: 800.0,
            difficulty_distance: 5000.0,
            gap_easy: Span::new(600.0, 1000.0),
            gap_hard: Span::new(300.0, 600.0),
            initial_interval: Span::new(1.0, 2.5),
            interval: Span::new(0.1, 1.0),
            embed: 4.0,
            obstacle_size: 64.0,
            scroll_speed: 300.0,
            cull_distance: 200.0,
        }
    }
}

/// Hitbox insets and the safe-landing band
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionTuning {
    pub character_margin: f32,
    pub obstacle_margin: f32,
    /// Fraction of obstacle height above which the character counts as landing on top
    pub from_above_band: f32,
}

impl Default for CollisionTuning {
    fn default() -> Self {
        Self {
            character_margin: 8.0,
            obstacle_margin: 4.0,
            from_above_band: 0.7,
        }
    }
}

/// Camera and level thresholds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionTuning {
    /// Camera anchor sits this far ahead of the character
    pub camera_lead: f32,
    /// Camera anchor x that moves level 1 to level 2
    pub level_two_at: f32,
    /// Camera anchor x that moves level 2 to level 3
    pub level_three_at: f32,
    /// Character x in the final level that clears the game
    pub clear_distance: f32,
}

impl Default for ProgressionTuning {
    fn default() -> Self {
        Self {
            camera_lead: 300.0,
            level_two_at: 5000.0,
            level_three_at: 10000.0,
            clear_distance: 15000.0,
        }
    }
}

/// Volumes stamped onto audio intents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioTuning {
    pub music_volume: f32,
    pub hit_volume: f32,
}

impl Default for AudioTuning {
    fn default() -> Self {
        Self {
            music_volume: 0.5,
            hit_volume: 0.8,
        }
    }
}

/// Complete balance set for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub character: CharacterTuning,
    pub spawn: SpawnTuning,
    pub collision: CollisionTuning,
    pub progression: ProgressionTuning,
    pub audio: AudioTuning,
    /// Obstacle kinds the renderer can draw (box, rock, sign)
    pub obstacle_kinds: u32,
    /// One ground profile per level
    pub terrain: Vec<TerrainProfile>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            character: CharacterTuning::default(),
            spawn: SpawnTuning::default(),
            collision: CollisionTuning::default(),
            progression: ProgressionTuning::default(),
            audio: AudioTuning::default(),
            obstacle_kinds: 3,
            terrain: default_profiles(),
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read, parse and validate a JSON tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Ground profile for a level
    pub fn terrain_for(&self, level: Level) -> &TerrainProfile {
        &self.terrain[level.index()]
    }

    /// Ground height for a level at horizontal position `x`
    pub fn ground_height(&self, level: Level, x: f32) -> f32 {
        self.terrain_for(level).height_at(x)
    }

    /// Refuse anything the tick loop could not run on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.obstacle_kinds == 0 {
            return Err(ConfigError::NoObstacleKinds);
        }
        if self.terrain.len() != Level::COUNT {
            return Err(ConfigError::TerrainLevelCount {
                expected: Level::COUNT,
                actual: self.terrain.len(),
            });
        }
        for level in Level::ALL {
            self.terrain_for(level).validate(level.number())?;
        }

        let c = &self.character;
        if !c.spawn.is_finite() {
            return Err(ConfigError::NonFinite { name: "character.spawn" });
        }
        if !c.gravity.is_finite() {
            return Err(ConfigError::NonFinite { name: "character.gravity" });
        }
        positive("character.jump_velocity", c.jump_velocity)?;
        positive("character.forward_speed", c.forward_speed)?;
        positive("character.crash_duration", c.crash_duration)?;
        positive("character.body_size", c.body_size)?;
        if !(c.knockback_speed.is_finite() && c.knockback_speed >= 0.0) {
            return Err(ConfigError::NonPositive {
                name: "character.knockback_speed",
                value: c.knockback_speed,
            });
        }
        unit("character.recovery_blend", c.recovery_blend)?;
        if c.starting_lives == 0 {
            return Err(ConfigError::NonPositive {
                name: "character.starting_lives",
                value: 0.0,
            });
        }

        let s = &self.spawn;
        positive("spawn.ahead_distance", s.ahead_distance)?;
        positive("spawn.difficulty_distance", s.difficulty_distance)?;
        positive("spawn.obstacle_size", s.obstacle_size)?;
        positive("spawn.scroll_speed", s.scroll_speed)?;
        positive("spawn.cull_distance", s.cull_distance)?;
        s.gap_easy.check("spawn.gap_easy")?;
        s.gap_hard.check("spawn.gap_hard")?;
        s.initial_interval.check("spawn.initial_interval")?;
        s.interval.check("spawn.interval")?;
        positive("spawn.interval.max", s.interval.max)?;
        if !s.embed.is_finite() {
            return Err(ConfigError::NonFinite { name: "spawn.embed" });
        }

        let k = &self.collision;
        let inset = 2.0 * k.character_margin.max(k.obstacle_margin);
        if !(k.character_margin >= 0.0 && k.obstacle_margin >= 0.0)
            || inset >= c.body_size.min(s.obstacle_size)
        {
            return Err(ConfigError::InvalidRange {
                name: "collision margins",
                min: k.character_margin,
                max: k.obstacle_margin,
            });
        }
        unit("collision.from_above_band", k.from_above_band)?;

        let p = &self.progression;
        if !p.camera_lead.is_finite() {
            return Err(ConfigError::NonFinite { name: "progression.camera_lead" });
        }
        if !(p.level_two_at < p.level_three_at && p.level_three_at.is_finite())
            || !p.clear_distance.is_finite()
        {
            return Err(ConfigError::UnorderedThresholds {
                two: p.level_two_at,
                three: p.level_three_at,
                clear: p.clear_distance,
            });
        }

        unit("audio.music_volume", self.audio.music_volume)?;
        unit("audio.hit_volume", self.audio.hit_volume)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tuning_is_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_from_json_partial_override() {
        let json = r#"{ "obstacle_kinds": 5, "spawn": { "scroll_speed": 450.0 } }"#;
        let tuning = Tuning::from_json(json).expect("valid json");
        assert_eq!(tuning.obstacle_kinds, 5);
        assert_eq!(tuning.spawn.scroll_speed, 450.0);
        // Untouched fields keep their defaults
        assert_eq!(tuning.spawn.ahead_distance, 800.0);
        assert_eq!(tuning.character.jump_velocity, 700.0);
        assert_eq!(tuning.terrain.len(), Level::COUNT);
    }

    #[test]
    fn test_rejects_empty_kind_set() {
        let err = Tuning::from_json(r#"{ "obstacle_kinds": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::NoObstacleKinds));
    }

    #[test]
    fn test_rejects_wrong_terrain_count() {
        let tuning = Tuning {
            terrain: vec![TerrainProfile::flat(100.0)],
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::TerrainLevelCount { expected: 3, actual: 1 })
        ));
    }

    #[test]
    fn test_rejects_inverted_interval() {
        let mut tuning = Tuning::default();
        tuning.spawn.interval = Span::new(1.0, 0.1);
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::InvalidRange { name: "spawn.interval", .. })
        ));
    }

    #[test]
    fn test_rejects_unordered_thresholds() {
        let mut tuning = Tuning::default();
        tuning.progression.level_three_at = 4000.0;
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::UnorderedThresholds { .. })
        ));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_ground_height_by_level() {
        let tuning = Tuning::default();
        assert_eq!(tuning.ground_height(Level::One, 6000.0), 100.0);
        assert_eq!(tuning.ground_height(Level::Two, 6000.0), 200.0);
        assert_eq!(tuning.ground_height(Level::Three, 6000.0), 200.0);
    }
}

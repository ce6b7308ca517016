//! Obstacle field: spawn ahead, scroll toward the character, cull behind
//!
//! Obstacles are kept in spawn order, which is also left-to-right order on
//! screen since every obstacle scrolls at the same speed.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::terrain::TerrainProfile;
use crate::lerp;
use crate::tuning::{Span, SpawnTuning};

/// An obstacle on the ground line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub rect: Rect,
    /// Index into the configured obstacle kinds
    pub kind: u32,
}

#[derive(Debug, Clone, Default)]
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
    /// Furthest x ever spawned at; new obstacles never land before it
    last_spawn_x: f32,
    next_id: u32,
}

impl ObstacleField {
    pub fn new() -> Self {
        Self::default()
    }

    /// 0 at the start line, 1 once the character has covered `difficulty_distance`
    pub fn difficulty(character_x: f32, spawn: &SpawnTuning) -> f32 {
        (character_x / spawn.difficulty_distance).clamp(0.0, 1.0)
    }

    /// Gap range at a given difficulty; both ends shrink as difficulty rises
    pub fn gap_range(difficulty: f32, spawn: &SpawnTuning) -> Span {
        Span::new(
            lerp(spawn.gap_easy.min, spawn.gap_hard.min, difficulty),
            lerp(spawn.gap_easy.max, spawn.gap_hard.max, difficulty),
        )
    }

    /// Spawn one obstacle ahead of the character with a difficulty-scaled gap
    pub fn spawn_next<R: Rng + ?Sized>(
        &mut self,
        character_x: f32,
        ground: &TerrainProfile,
        spawn: &SpawnTuning,
        kinds: u32,
        rng: &mut R,
    ) -> &Obstacle {
        let difficulty = Self::difficulty(character_x, spawn);
        let range = Self::gap_range(difficulty, spawn);
        let gap = rng.random_range(range.min..=range.max);
        let x = (character_x + spawn.ahead_distance).max(self.last_spawn_x + gap);
        let kind = rng.random_range(0..kinds.max(1));
        log::debug!(
            "Spawning obstacle kind {} at x={:.1} (difficulty {:.2}, gap {:.1})",
            kind,
            x,
            difficulty,
            gap
        );
        self.place(x, kind, ground, spawn)
    }

    /// Put an obstacle at `x`, seated on the ground line, and advance the watermark
    pub fn place(
        &mut self,
        x: f32,
        kind: u32,
        ground: &TerrainProfile,
        spawn: &SpawnTuning,
    ) -> &Obstacle {
        let size = spawn.obstacle_size;
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        self.last_spawn_x = self.last_spawn_x.max(x);
        self.obstacles.push(Obstacle {
            id,
            rect: Rect::new(x, ground.height_at(x) - spawn.embed, size, size),
            kind,
        });
        &self.obstacles[self.obstacles.len() - 1]
    }

    /// Scroll every obstacle left, re-seat it on the ground, and drop those far behind
    pub fn tick(
        &mut self,
        dt: f32,
        character_x: f32,
        ground: &TerrainProfile,
        spawn: &SpawnTuning,
    ) {
        let shift = spawn.scroll_speed * dt;
        for obstacle in &mut self.obstacles {
            obstacle.rect.x -= shift;
            obstacle.rect.y = ground.height_at(obstacle.rect.x) - spawn.embed;
        }
        self.cull(character_x - spawn.cull_distance);
    }

    /// Remove obstacles whose right edge is left of `min_x`
    pub fn cull(&mut self, min_x: f32) {
        self.obstacles.retain(|o| o.rect.right() >= min_x);
    }

    pub fn clear(&mut self) {
        self.obstacles.clear();
        self.last_spawn_x = 0.0;
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    pub fn as_slice(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn last_spawn_x(&self) -> f32 {
        self.last_spawn_x
    }
}

//! Per-frame simulation tick
//!
//! Order inside one call: resolve discrete inputs, advance the character,
//! spawn and scroll obstacles, test collisions, apply progression, then
//! capture the frame for the presentation layer.

use glam::Vec2;
use serde::Serialize;

use super::character::CharacterState;
use super::collision;
use super::obstacles::Obstacle;
use super::state::{GameEvent, GamePhase, GameState, Level};
use super::terrain::effort_height;
use crate::sanitize_delta;

/// How far ahead of its front edge the autopilot looks for obstacles
const AUTOPILOT_LOOKAHEAD: f32 = 120.0;

/// Discrete input signals for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TickInput {
    /// Jump was requested
    pub jump: bool,
    /// Pause toggle was requested
    pub pause: bool,
    /// Confirm/restart was requested
    pub confirm: bool,
}

impl TickInput {
    /// Demo driver: jump when an obstacle closes in just ahead of a grounded character
    pub fn autopilot(state: &GameState) -> Self {
        if state.phase != GamePhase::Playing {
            return Self::default();
        }
        let character = &state.character;
        if character.is_jumping || character.is_crashed() {
            return Self::default();
        }
        let front = character.body().right();
        let threat = state.obstacles.iter().any(|o| {
            let gap = o.rect.x - front;
            gap > 0.0 && gap < AUTOPILOT_LOOKAHEAD
        });
        Self {
            jump: threat,
            ..Default::default()
        }
    }
}

/// Everything the renderer and audio layer need from one frame
#[derive(Debug, Clone, Serialize)]
pub struct FrameResult {
    pub position: Vec2,
    pub character_state: CharacterState,
    pub lives: u32,
    pub level: Level,
    pub paused: bool,
    pub game_over: bool,
    pub level_cleared: bool,
    pub camera_anchor_x: f32,
    /// Seconds since the level was cleared (drives the celebration animation)
    pub clear_time: f32,
    /// Effort curve sample at the character's x, for visual pacing
    pub effort: f32,
    pub obstacles: Vec<Obstacle>,
    pub events: Vec<GameEvent>,
}

impl FrameResult {
    fn capture(state: &mut GameState) -> Self {
        Self {
            position: state.character.position,
            character_state: state.character.state,
            lives: state.character.lives,
            level: state.level,
            paused: state.is_paused(),
            game_over: state.is_game_over(),
            level_cleared: state.is_level_cleared(),
            camera_anchor_x: state.camera_anchor_x,
            clear_time: state.clear_time,
            effort: effort_height(state.character.position.x),
            obstacles: state.obstacles.as_slice().to_vec(),
            events: state.drain_events(),
        }
    }
}

/// Advance the session by `dt` seconds.
///
/// Deltas that are zero, negative or non-finite still resolve inputs but do not
/// move anything.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> FrameResult {
    if !dt.is_finite() {
        log::warn!("Non-finite frame delta {} treated as zero", dt);
    }
    let dt = sanitize_delta(dt);

    handle_input(state, input);

    if dt > 0.0 {
        match state.phase {
            GamePhase::Playing => update_playing(state, dt),
            GamePhase::LevelCleared => update_cleared(state, dt),
            GamePhase::Paused | GamePhase::GameOver => {}
        }
    }

    FrameResult::capture(state)
}

fn handle_input(state: &mut GameState, input: &TickInput) {
    match state.phase {
        GamePhase::GameOver | GamePhase::LevelCleared => {
            if input.confirm {
                state.reset();
            }
        }
        GamePhase::Playing => {
            if input.jump {
                state.character.jump();
            }
            if input.pause {
                state.phase = GamePhase::Paused;
                state.emit(GameEvent::PauseMusic);
                log::debug!("Paused");
            }
        }
        GamePhase::Paused => {
            if input.pause {
                state.phase = GamePhase::Playing;
                state.emit(GameEvent::ResumeMusic);
                log::debug!("Resumed");
            }
        }
    }
}

fn update_playing(state: &mut GameState, dt: f32) {
    let ground_y = state.ground_height(state.character.position.x);
    state.character.update(dt, ground_y);
    let x = state.character.position.x;

    let progression = state.tuning().progression;
    if state.level.is_final() && x > progression.clear_distance {
        state.phase = GamePhase::LevelCleared;
        state.clear_time = 0.0;
        state.camera_anchor_x = x + progression.camera_lead;
        state.emit(GameEvent::StopMusic);
        log::info!("Level cleared at x={:.0}", x);
        return;
    }

    // Spawn cadence
    state.spawn_timer += dt;
    if state.spawn_timer >= state.spawn_interval {
        state.spawn_obstacle();
        let interval = state.tuning().spawn.interval;
        state.spawn_interval = state.sample(interval);
        state.spawn_timer = 0.0;
    }

    state.scroll_obstacles(dt);

    resolve_collisions(state);

    if state.phase == GamePhase::Playing {
        advance_level(state);
    }
    state.camera_anchor_x = state.character.position.x + progression.camera_lead;
}

/// Crash on the first side hit; the character's own crash flag stops repeats
fn resolve_collisions(state: &mut GameState) {
    let body = state.character.body();
    let rules = state.tuning().collision;
    let hit = state
        .obstacles
        .iter()
        .map(|o| collision::classify(&body, &o.rect, &rules))
        .any(|contact| collision::is_actionable(contact, state.character.is_crashed()));
    if !hit || !state.character.crash() {
        return;
    }

    let volume = state.tuning().audio.hit_volume;
    state.emit(GameEvent::PlayHitSound { volume });
    log::debug!(
        "Crash at x={:.0}, {} lives left",
        state.character.position.x,
        state.character.lives
    );

    if state.character.lives == 0 {
        state.phase = GamePhase::GameOver;
        state.emit(GameEvent::StopMusic);
        log::info!("Game over at level {}", state.level.number());
    }
}

/// One level step per tick, judged on the camera anchor of the previous frame
fn advance_level(state: &mut GameState) {
    let progression = state.tuning().progression;
    let threshold = match state.level {
        Level::One => progression.level_two_at,
        Level::Two => progression.level_three_at,
        Level::Three => return,
    };
    if state.camera_anchor_x <= threshold {
        return;
    }
    if let Some(next) = state.level.next() {
        state.level = next;
        state.switch_music(next);
        log::info!("Advanced to level {}", next.number());
    }
}

/// After the clear the character keeps running; obstacles and collisions stay frozen
fn update_cleared(state: &mut GameState, dt: f32) {
    state.clear_time += dt;
    let ground_y = state.ground_height(state.character.position.x);
    state.character.update(dt, ground_y);
    state.camera_anchor_x = state.character.position.x + state.tuning().progression.camera_lead;
}

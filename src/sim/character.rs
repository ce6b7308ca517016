//! The player character
//!
//! Runs forward at a constant speed, jumps under gravity, and on a crash
//! drifts back for a fixed recovery window before running again.
//!
//! State machine:
//! - `Run -> Jump` on a jump while grounded
//! - `Jump -> Run` on landing
//! - `Run | Jump -> Crash` on an unresolved collision
//! - `Crash -> Run` once the crash timer runs out

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::tuning::CharacterTuning;
use crate::{lerp, sanitize_delta};

/// Movement state, also what the renderer picks animations from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CharacterState {
    #[default]
    Run,
    Jump,
    Crash,
}

#[derive(Debug, Clone, Serialize)]
pub struct Character {
    pub position: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
    pub state: CharacterState,
    /// Set by a jump, cleared on landing; blocks a second jump
    pub is_jumping: bool,
    pub lives: u32,
    /// Seconds spent in the current state
    pub state_time: f32,
    /// Seconds since the last crash (only advances while crashed)
    pub crash_timer: f32,
    #[serde(skip)]
    tuning: CharacterTuning,
}

impl Character {
    pub fn new(tuning: CharacterTuning) -> Self {
        Self {
            position: tuning.spawn,
            velocity: Vec2::ZERO,
            acceleration: tuning.gravity,
            state: CharacterState::Run,
            is_jumping: false,
            lives: tuning.starting_lives,
            state_time: 0.0,
            crash_timer: 0.0,
            tuning,
        }
    }

    #[inline]
    pub fn is_crashed(&self) -> bool {
        self.state == CharacterState::Crash
    }

    /// Drawn body (un-inset)
    pub fn body(&self) -> Rect {
        let size = self.tuning.body_size;
        Rect::new(self.position.x, self.position.y, size, size)
    }

    /// Advance by `delta` seconds over a ground line at `ground_y`
    pub fn update(&mut self, delta: f32, ground_y: f32) {
        let delta = sanitize_delta(delta);
        if delta == 0.0 {
            return;
        }
        self.state_time += delta;

        if self.is_crashed() {
            self.update_crash(delta);
            return;
        }

        self.velocity += self.acceleration * delta;
        self.position += self.velocity * delta;
        self.position.x += self.tuning.forward_speed * delta;

        if self.position.y <= ground_y {
            self.position.y = ground_y;
            self.velocity.y = 0.0;
            self.is_jumping = false;
        }

        let next = if self.position.y > ground_y {
            CharacterState::Jump
        } else {
            CharacterState::Run
        };
        if next != self.state {
            self.state = next;
            self.state_time = 0.0;
        }
    }

    /// Knockback drift, then recovery toward the spawn anchor
    fn update_crash(&mut self, delta: f32) {
        self.crash_timer += delta;
        self.position.x -= self.tuning.knockback_speed * delta;

        if self.crash_timer >= self.tuning.crash_duration {
            self.state = CharacterState::Run;
            self.position.x = lerp(
                self.position.x,
                self.tuning.spawn.x,
                self.tuning.recovery_blend,
            );
            self.state_time = 0.0;
            self.crash_timer = 0.0;
        }
    }

    /// Returns false when the jump is refused (airborne or crashed)
    pub fn jump(&mut self) -> bool {
        if self.is_jumping || self.is_crashed() {
            return false;
        }
        self.velocity.y = self.tuning.jump_velocity;
        self.is_jumping = true;
        self.state = CharacterState::Jump;
        self.state_time = 0.0;
        true
    }

    /// Returns false when already crashed
    pub fn crash(&mut self) -> bool {
        if self.is_crashed() {
            return false;
        }
        self.state = CharacterState::Crash;
        self.velocity = Vec2::ZERO;
        self.state_time = 0.0;
        self.crash_timer = 0.0;
        self.lives = self.lives.saturating_sub(1);
        true
    }

    /// Back to the spawn point with full lives
    pub fn reset(&mut self) {
        *self = Self::new(self.tuning);
    }
}

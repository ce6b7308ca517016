//! Dash Runner - simulation core of a side-scrolling endless runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (terrain, character, obstacles, collisions, session)
//! - `tuning`: Data-driven game balance and its validation
//!
//! Rendering, audio and input polling live outside this crate. The core talks
//! to them through `sim::TickInput` going in and `sim::FrameResult` coming out.

pub mod sim;
pub mod tuning;

pub use sim::{FrameResult, GameState, TickInput, tick};
pub use tuning::{ConfigError, Tuning};

/// Game loop constants
pub mod consts {
    /// Fixed simulation timestep used by the headless driver (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
}

/// Linear interpolation from `a` to `b` by `t`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Negative and non-finite deltas collapse to zero, which every update treats as a no-op
#[inline]
pub fn sanitize_delta(dt: f32) -> f32 {
    if dt.is_finite() && dt > 0.0 { dt } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        assert_eq!(lerp(600.0, 300.0, 0.0), 600.0);
        assert_eq!(lerp(600.0, 300.0, 1.0), 300.0);
        assert_eq!(lerp(80.0, 180.0, 0.5), 130.0);
    }

    #[test]
    fn test_sanitize_delta() {
        assert_eq!(sanitize_delta(-1.0), 0.0);
        assert_eq!(sanitize_delta(f32::NAN), 0.0);
        assert_eq!(sanitize_delta(f32::INFINITY), 0.0);
        assert_eq!(sanitize_delta(f32::NEG_INFINITY), 0.0);
        assert_eq!(sanitize_delta(0.016), 0.016);
        assert_eq!(sanitize_delta(1.5), 1.5);
    }
}

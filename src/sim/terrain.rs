//! Terrain function: ground height per level
//!
//! Every level's ground is a flat base line broken by trapezoidal hills:
//! a linear ramp up to a plateau, the plateau itself, and a linear ramp back
//! down. Ramps interpolate between base and plateau, so the ground line is
//! continuous in x for any well-formed profile.

use serde::{Deserialize, Serialize};

use crate::lerp;
use crate::tuning::ConfigError;

/// Ground line outside any hill
pub const BASE_GROUND_Y: f32 = 100.0;
/// Height of every hill plateau in the stock levels
pub const PLATEAU_Y: f32 = 200.0;

/// One rise/plateau/fall cycle, given by its four breakpoints along x
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hill {
    /// Where the rising ramp leaves the base line
    pub start: f32,
    /// Where the rising ramp reaches the plateau
    pub crest_start: f32,
    /// Where the falling ramp leaves the plateau
    pub crest_end: f32,
    /// Where the falling ramp is back on the base line
    pub end: f32,
}

impl Hill {
    pub const fn new(start: f32, crest_start: f32, crest_end: f32, end: f32) -> Self {
        Self {
            start,
            crest_start,
            crest_end,
            end,
        }
    }

    /// Breakpoints are finite and ordered `start < crest_start <= crest_end < end`
    pub fn is_well_formed(&self) -> bool {
        [self.start, self.crest_start, self.crest_end, self.end]
            .iter()
            .all(|v| v.is_finite())
            && self.start < self.crest_start
            && self.crest_start <= self.crest_end
            && self.crest_end < self.end
    }

    /// Height at `x`, or `None` when `x` lies outside this hill
    fn height_at(&self, x: f32, base: f32, peak: f32) -> Option<f32> {
        if x < self.start || x > self.end {
            return None;
        }
        let y = if x < self.crest_start {
            lerp(base, peak, (x - self.start) / (self.crest_start - self.start))
        } else if x <= self.crest_end {
            peak
        } else {
            lerp(peak, base, (x - self.crest_end) / (self.end - self.crest_end))
        };
        Some(y)
    }
}

/// Ground profile for a single level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainProfile {
    /// Ground line between hills
    pub base: f32,
    /// Plateau height shared by all hills of this level
    pub peak: f32,
    /// Hills sorted by `start`, non-overlapping
    #[serde(default)]
    pub hills: Vec<Hill>,
}

impl TerrainProfile {
    /// A level with no hills
    pub fn flat(base: f32) -> Self {
        Self {
            base,
            peak: base,
            hills: Vec::new(),
        }
    }

    pub fn with_hills(base: f32, peak: f32, hills: Vec<Hill>) -> Self {
        Self { base, peak, hills }
    }

    /// Ground height at horizontal position `x`
    pub fn height_at(&self, x: f32) -> f32 {
        for hill in &self.hills {
            if x < hill.start {
                break;
            }
            if let Some(y) = hill.height_at(x, self.base, self.peak) {
                return y;
            }
        }
        self.base
    }

    /// Check that the profile describes a continuous ground line
    pub fn validate(&self, level: u8) -> Result<(), ConfigError> {
        if !self.base.is_finite() || !self.peak.is_finite() {
            return Err(ConfigError::NonFiniteTerrain { level });
        }
        let mut previous_end = f32::NEG_INFINITY;
        for (index, hill) in self.hills.iter().enumerate() {
            if !hill.is_well_formed() {
                return Err(ConfigError::MalformedHill { level, index });
            }
            if hill.start < previous_end {
                return Err(ConfigError::OverlappingHills { level, index });
            }
            previous_end = hill.end;
        }
        Ok(())
    }
}

/// Stock profiles for levels 1 to 3
pub fn default_profiles() -> Vec<TerrainProfile> {
    vec![
        TerrainProfile::flat(BASE_GROUND_Y),
        TerrainProfile::with_hills(
            BASE_GROUND_Y,
            PLATEAU_Y,
            vec![Hill::new(5000.0, 5800.0, 7300.0, 8100.0)],
        ),
        TerrainProfile::with_hills(
            BASE_GROUND_Y,
            PLATEAU_Y,
            vec![
                Hill::new(4000.0, 4800.0, 6000.0, 6800.0),
                Hill::new(6800.0, 7600.0, 8600.0, 9400.0),
            ],
        ),
    ]
}

/// Effort undulation used for visual pacing only.
///
/// Independent of level; nothing in collision or character physics reads it.
pub fn effort_height(x: f32) -> f32 {
    if x < 4000.0 {
        BASE_GROUND_Y + x / 40.0
    } else if x < 8000.0 {
        BASE_GROUND_Y + 1000.0 - (x - 4000.0) / 40.0
    } else if x < 12000.0 {
        BASE_GROUND_Y + (x - 8000.0) / 50.0
    } else {
        BASE_GROUND_Y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(n: usize) -> TerrainProfile {
        default_profiles().swap_remove(n - 1)
    }

    #[test]
    fn test_level_one_is_flat() {
        let terrain = level(1);
        for x in [-500.0, 0.0, 5000.0, 12000.0, 20000.0] {
            assert_eq!(terrain.height_at(x), BASE_GROUND_Y);
        }
    }

    #[test]
    fn test_level_two_breakpoints() {
        let terrain = level(2);
        assert_eq!(terrain.height_at(5000.0), 100.0);
        assert_eq!(terrain.height_at(5400.0), 150.0);
        assert_eq!(terrain.height_at(5800.0), 200.0);
        assert_eq!(terrain.height_at(7300.0), 200.0);
        assert_eq!(terrain.height_at(7700.0), 150.0);
        assert_eq!(terrain.height_at(8100.0), 100.0);
        assert_eq!(terrain.height_at(9000.0), 100.0);
    }

    #[test]
    fn test_level_three_two_cycles() {
        let terrain = level(3);
        assert_eq!(terrain.height_at(3999.0), 100.0);
        assert_eq!(terrain.height_at(4800.0), 200.0);
        assert_eq!(terrain.height_at(6000.0), 200.0);
        assert_eq!(terrain.height_at(6800.0), 100.0);
        assert_eq!(terrain.height_at(7600.0), 200.0);
        assert_eq!(terrain.height_at(8600.0), 200.0);
        assert_eq!(terrain.height_at(9400.0), 100.0);
        assert_eq!(terrain.height_at(12000.0), 100.0);
    }

    #[test]
    fn test_ramp_slope_matches_eighth() {
        // 100 units of rise over 800 units of run
        let terrain = level(2);
        let a = terrain.height_at(5100.0);
        let b = terrain.height_at(5200.0);
        assert!((b - a - 12.5).abs() < 0.001);
    }

    #[test]
    fn test_continuity_at_breakpoints() {
        for (i, terrain) in default_profiles().iter().enumerate() {
            for hill in &terrain.hills {
                for b in [hill.start, hill.crest_start, hill.crest_end, hill.end] {
                    let left = terrain.height_at(b - 0.01);
                    let right = terrain.height_at(b + 0.01);
                    assert!(
                        (left - right).abs() < 0.01,
                        "level {} jumps at {}: {} vs {}",
                        i + 1,
                        b,
                        left,
                        right
                    );
                }
            }
        }
    }

    #[test]
    fn test_effort_curve_segments() {
        assert_eq!(effort_height(0.0), 100.0);
        assert_eq!(effort_height(2000.0), 150.0);
        assert_eq!(effort_height(6000.0), 1050.0);
        assert_eq!(effort_height(10000.0), 140.0);
        assert_eq!(effort_height(15000.0), 100.0);
    }

    #[test]
    fn test_validate_rejects_bad_hills() {
        let inverted =
            TerrainProfile::with_hills(100.0, 200.0, vec![Hill::new(10.0, 5.0, 20.0, 30.0)]);
        assert!(matches!(
            inverted.validate(2),
            Err(ConfigError::MalformedHill { level: 2, index: 0 })
        ));

        let overlapping = TerrainProfile::with_hills(
            100.0,
            200.0,
            vec![Hill::new(0.0, 10.0, 20.0, 30.0), Hill::new(25.0, 35.0, 40.0, 50.0)],
        );
        assert!(matches!(
            overlapping.validate(3),
            Err(ConfigError::OverlappingHills { level: 3, index: 1 })
        ));

        let non_finite = TerrainProfile::flat(f32::NAN);
        assert!(matches!(
            non_finite.validate(1),
            Err(ConfigError::NonFiniteTerrain { level: 1 })
        ));

        for (i, terrain) in default_profiles().iter().enumerate() {
            assert!(terrain.validate(i as u8 + 1).is_ok());
        }
    }
}

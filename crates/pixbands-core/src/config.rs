// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Transform configuration. Every section has defaults, is serde-serializable,
// and validates itself before a transform is built from it.

use std::path::Path;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::error::{PixbandsError, Result};
use crate::types::{Band, BandTable, MAX_SUM};

/// Build the random source for a transform: seeded when `seed` is set,
/// OS-seeded otherwise.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

fn check_probability(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(PixbandsError::configuration(format!(
            "{name} must be within [0, 1], got {value}"
        )));
    }
    Ok(())
}

// -- Band regrouping ----------------------------------------------------------

/// Settings for the band shuffle and perturbation transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegroupConfig {
    /// Intensity bands pixels are shuffled within.
    pub bands: BandTable,
    /// Per-channel chance of a perturbation.
    pub perturb_probability: f64,
    /// Size of each perturbation step (applied as + or -).
    pub perturb_magnitude: u8,
    /// Fixed seed for reproducible output.
    pub seed: Option<u64>,
}

impl Default for RegroupConfig {
    fn default() -> Self {
        Self {
            bands: BandTable::ten_band(),
            perturb_probability: 0.2,
            perturb_magnitude: 1,
            seed: None,
        }
    }
}

impl RegroupConfig {
    pub fn validate(&self) -> Result<()> {
        self.bands.validate()?;
        check_probability("perturb_probability", self.perturb_probability)
    }

    pub fn rng(&self) -> StdRng {
        rng_from_seed(self.seed)
    }

    /// Load and validate a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let config: Self = read_json(path.as_ref())?;
        config.validate()?;
        Ok(config)
    }

    /// Write the configuration as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        write_json(path.as_ref(), self)
    }
}

// -- Outer glow ---------------------------------------------------------------

/// One outcome of an intensity tier: draws below `below` (cumulative, checked
/// in order) nudge every colour channel by `magnitude`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JitterStep {
    pub below: f64,
    pub magnitude: u8,
}

impl JitterStep {
    pub const fn new(below: f64, magnitude: u8) -> Self {
        Self { below, magnitude }
    }
}

/// Jitter outcomes for pixels whose sum falls in `band`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntensityTier {
    pub band: Band,
    pub steps: Vec<JitterStep>,
}

impl IntensityTier {
    /// Magnitude selected by the uniform draw `u`, if any step applies.
    pub fn magnitude_for(&self, u: f64) -> Option<u8> {
        self.steps
            .iter()
            .find(|step| u < step.below)
            .map(|step| step.magnitude)
    }
}

/// Settings for the outer-glow emulation sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlowConfig {
    /// Tiles across the output sheet.
    pub columns: u32,
    /// Tiles down the output sheet.
    pub rows: u32,
    /// Per-channel chance of the uniform jitter pass.
    pub uniform_probability: f64,
    pub uniform_magnitude: u8,
    /// Intensity-dependent jitter, first matching tier wins.
    pub tiers: Vec<IntensityTier>,
    pub seed: Option<u64>,
}

impl Default for GlowConfig {
    fn default() -> Self {
        Self {
            columns: 2,
            rows: 10,
            uniform_probability: 0.2,
            uniform_magnitude: 1,
            tiers: vec![
                IntensityTier {
                    band: Band::new(751, MAX_SUM),
                    steps: vec![JitterStep::new(0.08, 1)],
                },
                IntensityTier {
                    band: Band::new(736, 750),
                    steps: vec![JitterStep::new(0.05, 1), JitterStep::new(0.08, 2)],
                },
                IntensityTier {
                    band: Band::new(721, 735),
                    steps: vec![
                        JitterStep::new(0.05, 1),
                        JitterStep::new(0.08, 2),
                        JitterStep::new(0.10, 3),
                    ],
                },
                IntensityTier {
                    band: Band::new(0, 720),
                    steps: vec![
                        JitterStep::new(0.05, 1),
                        JitterStep::new(0.08, 2),
                        JitterStep::new(0.11, 3),
                    ],
                },
            ],
            seed: None,
        }
    }
}

impl GlowConfig {
    pub fn validate(&self) -> Result<()> {
        if self.columns == 0 || self.rows == 0 {
            return Err(PixbandsError::configuration(format!(
                "sheet needs at least one tile, got {}x{}",
                self.columns, self.rows
            )));
        }
        check_probability("uniform_probability", self.uniform_probability)?;

        for (idx, tier) in self.tiers.iter().enumerate() {
            if tier.band.lo > tier.band.hi {
                return Err(PixbandsError::configuration(format!(
                    "tier {idx} band is inverted: {}",
                    tier.band
                )));
            }
            if let Some(other) = self.tiers[..idx]
                .iter()
                .find(|other| other.band.overlaps(&tier.band))
            {
                return Err(PixbandsError::configuration(format!(
                    "tier bands {} and {} overlap",
                    other.band, tier.band
                )));
            }
            let mut previous = 0.0;
            for step in &tier.steps {
                check_probability("tier step threshold", step.below)?;
                if step.below < previous {
                    return Err(PixbandsError::configuration(format!(
                        "tier {idx} thresholds must ascend, {} follows {previous}",
                        step.below
                    )));
                }
                previous = step.below;
            }
        }
        Ok(())
    }

    /// Tier whose band contains `sum`.
    pub fn tier_for(&self, sum: u16) -> Option<&IntensityTier> {
        self.tiers.iter().find(|tier| tier.band.contains(sum))
    }

    pub fn rng(&self) -> StdRng {
        rng_from_seed(self.seed)
    }
}

// -- Darkening ----------------------------------------------------------------

/// A pure-black pixel is lifted to gray `level` when the 1..=100 draw is at
/// most `percent` (cumulative, checked in order).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlackLift {
    pub percent: u8,
    pub level: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DarkenConfig {
    /// Amount subtracted from each colour channel.
    pub step: u8,
    pub black_lift: Vec<BlackLift>,
    pub seed: Option<u64>,
}

impl Default for DarkenConfig {
    fn default() -> Self {
        Self {
            step: 15,
            black_lift: vec![
                BlackLift { percent: 3, level: 1 },
                BlackLift { percent: 5, level: 2 },
                BlackLift { percent: 7, level: 3 },
            ],
            seed: None,
        }
    }
}

impl DarkenConfig {
    pub fn validate(&self) -> Result<()> {
        let mut previous = 0u8;
        for lift in &self.black_lift {
            if !(1..=100).contains(&lift.percent) {
                return Err(PixbandsError::configuration(format!(
                    "black lift percent must be within 1..=100, got {}",
                    lift.percent
                )));
            }
            if lift.percent <= previous {
                return Err(PixbandsError::configuration(format!(
                    "black lift percents must strictly ascend, {} follows {previous}",
                    lift.percent
                )));
            }
            previous = lift.percent;
        }
        Ok(())
    }

    /// Gray level chosen by a 1..=100 draw, if any.
    pub fn lift_for(&self, draw: u8) -> Option<u8> {
        self.black_lift
            .iter()
            .find(|lift| draw <= lift.percent)
            .map(|lift| lift.level)
    }

    pub fn rng(&self) -> StdRng {
        rng_from_seed(self.seed)
    }
}

// -- Statistics ---------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    pub bands: BandTable,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            bands: BandTable::five_band(),
        }
    }
}

impl StatsConfig {
    pub fn validate(&self) -> Result<()> {
        self.bands.validate()
    }
}

// -- Synthesis ----------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthConfig {
    pub width: u32,
    pub height: u32,
    pub seed: Option<u64>,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            width: 200,
            height: 200,
            seed: None,
        }
    }
}

impl SynthConfig {
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(PixbandsError::configuration(format!(
                "synthesized size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    pub fn rng(&self) -> StdRng {
        rng_from_seed(self.seed)
    }
}

// -- Bundle -------------------------------------------------------------------

/// All transform settings in one document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PixbandsConfig {
    pub regroup: RegroupConfig,
    pub glow: GlowConfig,
    pub darken: DarkenConfig,
    pub stats: StatsConfig,
    pub synth: SynthConfig,
}

impl PixbandsConfig {
    pub fn validate(&self) -> Result<()> {
        self.regroup.validate()?;
        self.glow.validate()?;
        self.darken.validate()?;
        self.stats.validate()?;
        self.synth.validate()
    }

    /// Load and validate a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let config: Self = read_json(path.as_ref())?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        write_json(path.as_ref(), self)
    }
}

// -- JSON persistence ---------------------------------------------------------

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let data = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn defaults_validate() {
        assert!(PixbandsConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_probability_outside_unit_interval() {
        for bad in [-0.1, 1.5, f64::NAN, f64::INFINITY] {
            let config = RegroupConfig {
                perturb_probability: bad,
                ..RegroupConfig::default()
            };
            assert!(matches!(
                config.validate(),
                Err(PixbandsError::Configuration(_))
            ));
        }
        let edges = [0.0, 1.0].map(|p| RegroupConfig {
            perturb_probability: p,
            ..RegroupConfig::default()
        });
        assert!(edges.iter().all(|config| config.validate().is_ok()));
    }

    #[test]
    fn validation_is_repeatable() {
        let config = RegroupConfig {
            bands: BandTable::five_band(),
            perturb_probability: 2.0,
            ..RegroupConfig::default()
        };
        let first = config.validate().unwrap_err();
        let second = config.validate().unwrap_err();
        assert!(matches!(first, PixbandsError::Configuration(_)));
        assert!(matches!(second, PixbandsError::Configuration(_)));
        assert_eq!(first.to_string(), second.to_string());
    }

    #[test]
    fn invalid_band_table_surfaces_from_config() {
        let json = r#"{ "bands": [{"lo": 0, "hi": 10}, {"lo": 5, "hi": 765}] }"#;
        let config: RegroupConfig = serde_json::from_str(json).unwrap();
        assert!(matches!(
            config.validate(),
            Err(PixbandsError::Configuration(_))
        ));
        // Missing fields fall back to defaults.
        assert_eq!(config.perturb_probability, 0.2);
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let config = RegroupConfig {
            seed: Some(42),
            ..RegroupConfig::default()
        };
        let mut rng_a = config.rng();
        let mut rng_b = config.rng();
        let seq_a: Vec<u32> = (0..8).map(|_| rng_a.random()).collect();
        let seq_b: Vec<u32> = (0..8).map(|_| rng_b.random()).collect();
        assert_eq!(seq_a, seq_b);
    }

    #[test]
    fn glow_rejects_overlapping_tiers_and_empty_sheet() {
        let mut config = GlowConfig::default();
        config.tiers[0].band = Band::new(700, MAX_SUM);
        assert!(matches!(
            config.validate(),
            Err(PixbandsError::Configuration(_))
        ));

        let empty = GlowConfig {
            rows: 0,
            ..GlowConfig::default()
        };
        assert!(empty.validate().is_err());
    }

    #[test]
    fn glow_rejects_descending_steps() {
        let mut config = GlowConfig::default();
        config.tiers[3].steps = vec![JitterStep::new(0.1, 1), JitterStep::new(0.05, 2)];
        assert!(config.validate().is_err());
    }

    #[test]
    fn glow_tier_lookup() {
        let config = GlowConfig::default();
        let top = config.tier_for(760).unwrap();
        assert_eq!(top.magnitude_for(0.07), Some(1));
        assert_eq!(top.magnitude_for(0.08), None);

        let low = config.tier_for(100).unwrap();
        assert_eq!(low.magnitude_for(0.0), Some(1));
        assert_eq!(low.magnitude_for(0.06), Some(2));
        assert_eq!(low.magnitude_for(0.105), Some(3));
        assert_eq!(low.magnitude_for(0.5), None);
    }

    #[test]
    fn darken_lift_lookup_and_validation() {
        let config = DarkenConfig::default();
        assert_eq!(config.lift_for(1), Some(1));
        assert_eq!(config.lift_for(3), Some(1));
        assert_eq!(config.lift_for(4), Some(2));
        assert_eq!(config.lift_for(7), Some(3));
        assert_eq!(config.lift_for(8), None);

        let bad = DarkenConfig {
            black_lift: vec![
                BlackLift { percent: 5, level: 1 },
                BlackLift { percent: 5, level: 2 },
            ],
            ..DarkenConfig::default()
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn synth_requires_positive_size() {
        let config = SynthConfig {
            width: 0,
            ..SynthConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pixbands.json");

        let mut config = PixbandsConfig::default();
        config.regroup.seed = Some(7);
        config.regroup.perturb_probability = 0.5;
        config.save(&path).unwrap();

        let loaded = PixbandsConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("regroup.json");
        std::fs::write(&path, r#"{ "perturb_probability": 3.0 }"#).unwrap();
        assert!(matches!(
            RegroupConfig::load(&path),
            Err(PixbandsError::Configuration(_))
        ));

        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            RegroupConfig::load(&path),
            Err(PixbandsError::Serialization(_))
        ));

        assert!(matches!(
            RegroupConfig::load(dir.path().join("missing.json")),
            Err(PixbandsError::Io(_))
        ));
    }
}

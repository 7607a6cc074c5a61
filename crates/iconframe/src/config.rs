//! Icon framing configuration.

use std::path::Path;

use iconframe_core::{FrameError, FramingPolicy, Result};
use iconframe_fit::{DollySearch, FitStrategy};
use serde::{Deserialize, Serialize};

/// Default icon edge length in pixels.
pub const DEFAULT_RESOLUTION: u32 = 512;

/// Smallest accepted icon edge length in pixels.
pub const MIN_RESOLUTION: u32 = 32;

/// Default framing scale: a two percent margin around the subject.
pub const DEFAULT_FRAMING_SCALE: f32 = 1.02;

/// Settings for one icon framing run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IconConfig {
    /// Collection to frame. Defaults to the best LOD collection, then the
    /// scene root.
    pub collection: Option<String>,

    /// Camera to move. Defaults to the scene's active camera.
    pub camera: Option<String>,

    /// Square output resolution in pixels.
    pub resolution: u32,

    /// Margin multiplier (1.0 = tight, larger = looser).
    pub framing_scale: f32,

    /// Whether the camera may slide sideways to center the subject.
    pub allow_center: bool,

    /// Preferred fitting strategy.
    pub strategy: FitStrategy,

    /// Dolly search parameters used after viewport alignment.
    pub dolly: DollySearch,
}

impl Default for IconConfig {
    fn default() -> Self {
        Self {
            collection: None,
            camera: None,
            resolution: DEFAULT_RESOLUTION,
            framing_scale: DEFAULT_FRAMING_SCALE,
            allow_center: true,
            strategy: FitStrategy::default(),
            dolly: DollySearch::default(),
        }
    }
}

impl IconConfig {
    /// Parses a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// The framing policy these settings describe.
    #[must_use]
    pub fn policy(&self) -> FramingPolicy {
        FramingPolicy::new(self.framing_scale, self.allow_center)
    }

    /// Checks the resolution, framing policy and dolly search parameters.
    pub fn validate(&self) -> Result<()> {
        if self.resolution < MIN_RESOLUTION {
            return Err(FrameError::InvalidResolution {
                resolution: self.resolution,
                minimum: MIN_RESOLUTION,
            });
        }
        self.policy().validate()?;
        self.dolly.validate()
    }
}

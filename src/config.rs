use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CropperError, Result};

/// Which pointer field resize deltas are read from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeltaSourceKind {
    /// The inter-event movement reported by the input source.
    #[default]
    Native,
    /// Differences between consecutive absolute client positions, for
    /// input sources whose movement reporting is unreliable.
    FromAbsolute,
}

/// Tunables for the crop-box interaction engine.
///
/// Every field has a default, so a config file only needs the keys it
/// overrides.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Half-width of the move zone around the box center, in client pixels.
    pub move_zone_radius: f64,

    /// Half-width of each corner zone, in intrinsic image pixels.
    pub corner_zone_radius: f64,

    /// Divisor applied to every resize delta.
    ///
    /// Raw pointer movement resizes too fast at 1:1; 2 halves it.
    pub zoom_clearance: f64,

    /// Side of the initial square as a fraction of the image's short axis.
    pub initial_fraction: f64,

    /// Where resize deltas come from.
    pub delta_source: DeltaSourceKind,

    /// Extra pixels restored around the old box before the overlay is
    /// redrawn, so antialiased overlay edges do not leave trails.
    pub restore_margin: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            move_zone_radius: 10.0,
            corner_zone_radius: 15.0,
            zoom_clearance: 2.0,
            initial_fraction: 2.0 / 3.0,
            delta_source: DeltaSourceKind::Native,
            restore_margin: 1.0,
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        if !valid_clearance(config.zoom_clearance) {
            return Err(CropperError::ZoomClearance(config.zoom_clearance));
        }
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn set_move_zone_radius(mut self, radius: f64) -> Self {
        self.move_zone_radius = radius;
        self
    }

    pub fn set_corner_zone_radius(mut self, radius: f64) -> Self {
        self.corner_zone_radius = radius;
        self
    }

    /// Non-positive or non-finite values are ignored.
    pub fn set_zoom_clearance(mut self, clearance: f64) -> Self {
        if valid_clearance(clearance) {
            self.zoom_clearance = clearance;
        } else {
            log::warn!("ignoring zoom_clearance {}", clearance);
        }
        self
    }

    pub fn set_initial_fraction(mut self, fraction: f64) -> Self {
        self.initial_fraction = fraction;
        self
    }

    pub fn set_delta_source(mut self, kind: DeltaSourceKind) -> Self {
        self.delta_source = kind;
        self
    }

    pub fn set_restore_margin(mut self, margin: f64) -> Self {
        self.restore_margin = margin;
        self
    }
}

/// Every resize delta is divided by the clearance.
pub(crate) fn valid_clearance(clearance: f64) -> bool {
    clearance.is_finite() && clearance > 0.0
}

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Run configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{HoughError, Result};

/// Number of lines drawn when nothing else is configured.
pub const DEFAULT_LINE_COUNT: usize = 40;
/// Distance quantum of the accumulator, in pixels.
pub const DEFAULT_R_STEP: f64 = 1.25;
/// Angle quantum of the accumulator, in radians.
pub const DEFAULT_PHI_STEP: f64 = 0.012;
/// Sobel magnitude at or above which a pixel counts as an edge.
pub const DEFAULT_EDGE_THRESHOLD: u16 = 128;

/// Which compute backend runs the greyscale, edge and voting kernels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComputeKind {
    /// Reference kernels executed on the host CPU.
    #[default]
    Host,
    /// An external accelerator. No driver ships with this workspace.
    Accelerator,
}

/// What the detected lines are drawn on top of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backdrop {
    /// The edge map, written back into the RGB channels.
    #[default]
    Edges,
    /// The decoded input image, untouched.
    Original,
}

/// Parameters of one detection run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoughConfig {
    /// Image to read.
    pub input: PathBuf,
    /// PNG file to write the overlay to.
    pub output: PathBuf,
    /// How many accumulator peaks to draw.
    pub line_count: usize,
    /// Distance step of the (r, phi) grid.
    pub r_step: f64,
    /// Angle step of the (r, phi) grid.
    pub phi_step: f64,
    /// Compute backend for the kernels.
    pub backend: ComputeKind,
    /// Layer the lines are drawn over.
    pub backdrop: Backdrop,
    /// Binary cut-off applied to the Sobel magnitude.
    pub edge_threshold: u16,
}

impl Default for HoughConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("input.png"),
            output: PathBuf::from("out.png"),
            line_count: DEFAULT_LINE_COUNT,
            r_step: DEFAULT_R_STEP,
            phi_step: DEFAULT_PHI_STEP,
            backend: ComputeKind::Host,
            backdrop: Backdrop::Edges,
            edge_threshold: DEFAULT_EDGE_THRESHOLD,
        }
    }
}

impl HoughConfig {
    /// Read a JSON config file. Missing fields fall back to the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&data)?;
        debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Write the config as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Reject settings that would produce a degenerate parameter space.
    pub fn validate(&self) -> Result<()> {
        if self.input.as_os_str().is_empty() {
            return Err(HoughError::Config("input path is empty".into()));
        }
        if self.output.as_os_str().is_empty() {
            return Err(HoughError::Config("output path is empty".into()));
        }
        if !(self.r_step.is_finite() && self.r_step > 0.0) {
            return Err(HoughError::Config(format!(
                "r_step must be a positive number, got {}",
                self.r_step
            )));
        }
        if !(self.phi_step.is_finite() && self.phi_step > 0.0) {
            return Err(HoughError::Config(format!(
                "phi_step must be a positive number, got {}",
                self.phi_step
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_constants() {
        let config = HoughConfig::default();
        assert_eq!(config.line_count, 40);
        assert_eq!(config.r_step, 1.25);
        assert_eq!(config.phi_step, 0.012);
        assert_eq!(config.backend, ComputeKind::Host);
        assert_eq!(config.backdrop, Backdrop::Edges);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: HoughConfig =
            serde_json::from_str(r#"{ "line_count": 5, "backdrop": "original" }"#).unwrap();
        assert_eq!(config.line_count, 5);
        assert_eq!(config.backdrop, Backdrop::Original);
        assert_eq!(config.r_step, DEFAULT_R_STEP);
    }

    #[test]
    fn zero_step_is_rejected() {
        let config = HoughConfig {
            phi_step: 0.0,
            ..HoughConfig::default()
        };
        assert!(matches!(config.validate(), Err(HoughError::Config(_))));

        let config = HoughConfig {
            r_step: f64::NAN,
            ..HoughConfig::default()
        };
        assert!(matches!(config.validate(), Err(HoughError::Config(_))));
    }

    #[test]
    fn save_then_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hough.json");
        let config = HoughConfig {
            line_count: 12,
            edge_threshold: 90,
            ..HoughConfig::default()
        };
        config.save(&path).unwrap();
        assert_eq!(HoughConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = HoughConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, HoughError::Io(_)));
    }
}

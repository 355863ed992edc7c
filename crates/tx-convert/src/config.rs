//! JSON description of a conversion pipeline.
//!
//! ```json
//! { "steps": [
//!     { "op": "resample", "width": 256, "height": 256, "filter": "catmull_rom" },
//!     { "op": "sharpen", "factor": 1.5 },
//!     { "op": "fix_transparent_edges" }
//! ] }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use texel_ops::{BlendMode, EdgeRepairConfig, ResampleFilter};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Pipeline {
    pub steps: Vec<Step>,
}

impl Pipeline {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("parsing pipeline json")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("in pipeline {}", path.display()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case", deny_unknown_fields)]
pub enum Step {
    Blur {
        #[serde(default = "one")]
        iterations: usize,
    },
    Sharpen {
        factor: f32,
        #[serde(default = "one")]
        iterations: usize,
    },
    /// Custom 3x3 kernel; `scale` defaults to the sum of the weights.
    Filter {
        weights: [f64; 9],
        #[serde(default)]
        scale: Option<f64>,
        #[serde(default)]
        bias: f64,
        #[serde(default = "one")]
        iterations: usize,
    },
    Resample {
        width: usize,
        height: usize,
        #[serde(default)]
        filter: ResampleKind,
    },
    /// `overlay` is resolved against the directory of the pipeline file.
    Combine {
        overlay: PathBuf,
        mode: CombineMode,
        #[serde(default = "full_blend")]
        blend: f32,
    },
    FixTransparentEdges {
        #[serde(default = "default_opacity_threshold")]
        opacity_threshold: u8,
    },
}

impl Step {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Blur { .. } => "blur",
            Self::Sharpen { .. } => "sharpen",
            Self::Filter { .. } => "filter",
            Self::Resample { .. } => "resample",
            Self::Combine { .. } => "combine",
            Self::FixTransparentEdges { .. } => "fix_transparent_edges",
        }
    }
}

fn one() -> usize {
    1
}

fn full_blend() -> f32 {
    1.0
}

fn default_opacity_threshold() -> u8 {
    EdgeRepairConfig::default().opacity_threshold
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ResampleKind {
    #[default]
    Nearest,
    Box,
    Bilinear,
    CatmullRom,
    Lanczos3,
    Gaussian,
}

impl ResampleKind {
    /// `None` selects nearest-neighbor lookup.
    pub fn filter(self) -> Option<ResampleFilter> {
        match self {
            Self::Nearest => None,
            Self::Box => Some(ResampleFilter::Box),
            Self::Bilinear => Some(ResampleFilter::Bilinear),
            Self::CatmullRom => Some(ResampleFilter::CatmullRom),
            Self::Lanczos3 => Some(ResampleFilter::Lanczos3),
            Self::Gaussian => Some(ResampleFilter::Gaussian),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum CombineMode {
    Rgb,
    Alpha,
    RToAlpha,
    AlphaToRgb,
    Add,
    Min,
    Max,
}

impl From<CombineMode> for BlendMode {
    fn from(mode: CombineMode) -> Self {
        match mode {
            CombineMode::Rgb => BlendMode::Rgb,
            CombineMode::Alpha => BlendMode::Alpha,
            CombineMode::RToAlpha => BlendMode::RToAlpha,
            CombineMode::AlphaToRgb => BlendMode::AlphaToRgb,
            CombineMode::Add => BlendMode::Add,
            CombineMode::Min => BlendMode::Min,
            CombineMode::Max => BlendMode::Max,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::{CombineMode, Pipeline, ResampleKind, Step};

    #[test]
    fn parses_steps_with_defaults() {
        let pipeline = Pipeline::from_json(
            r#"{ "steps": [
                { "op": "blur" },
                { "op": "sharpen", "factor": 1.5, "iterations": 2 },
                { "op": "resample", "width": 64, "height": 32 },
                { "op": "combine", "overlay": "mask.png", "mode": "r_to_alpha" },
                { "op": "fix_transparent_edges" }
            ] }"#,
        )
        .expect("valid pipeline");

        assert_eq!(
            pipeline.steps,
            vec![
                Step::Blur { iterations: 1 },
                Step::Sharpen {
                    factor: 1.5,
                    iterations: 2
                },
                Step::Resample {
                    width: 64,
                    height: 32,
                    filter: ResampleKind::Nearest
                },
                Step::Combine {
                    overlay: PathBuf::from("mask.png"),
                    mode: CombineMode::RToAlpha,
                    blend: 1.0
                },
                Step::FixTransparentEdges {
                    opacity_threshold: 128
                },
            ]
        );
    }

    #[test]
    fn filter_step_reads_kernel() {
        let pipeline = Pipeline::from_json(
            r#"{ "steps": [ { "op": "filter", "weights": [0,0,0,0,1,0,0,0,0], "bias": 4 } ] }"#,
        )
        .expect("valid pipeline");
        let Step::Filter {
            weights,
            scale,
            bias,
            iterations,
        } = &pipeline.steps[0]
        else {
            panic!("expected filter step");
        };
        assert_eq!(weights[4], 1.0);
        assert_eq!(*scale, None);
        assert_eq!(*bias, 4.0);
        assert_eq!(*iterations, 1);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(Pipeline::from_json(r#"{ "steps": [ { "op": "blur", "radius": 3 } ] }"#).is_err());
        assert!(Pipeline::from_json(r#"{ "steps": [], "extra": true }"#).is_err());
        assert!(Pipeline::from_json(r#"{ "steps": [ { "op": "emboss" } ] }"#).is_err());
    }

    #[test]
    fn resample_filter_names() {
        let pipeline = Pipeline::from_json(
            r#"{ "steps": [ { "op": "resample", "width": 1, "height": 1, "filter": "catmull_rom" } ] }"#,
        )
        .expect("valid pipeline");
        assert_eq!(pipeline.steps[0].name(), "resample");
        assert!(matches!(
            pipeline.steps[0],
            Step::Resample {
                filter: ResampleKind::CatmullRom,
                ..
            }
        ));
    }
}

//! Applies a [`Pipeline`] to a pixel buffer.
//!
//! Recoverable operation failures degrade to an unmodified copy (or, for
//! filtered resampling, to nearest-neighbor lookup) and the run continues;
//! fatal ones abort it.

use std::path::Path;

use anyhow::{Context, Result};
use texel_ops::{
    ConvolutionKernel, EdgeRepairConfig, PixelBuffer, blur, combine_owned, convolve,
    fix_transparent_edges, recover_with_copy, resample_filtered, resample_nearest, sharpen,
};

use crate::config::{Pipeline, Step};
use crate::store;

pub fn run(pipeline: &Pipeline, input: PixelBuffer, base_dir: &Path) -> Result<PixelBuffer> {
    let mut buffer = input;
    for (index, step) in pipeline.steps.iter().enumerate() {
        tracing::info!(
            step = index,
            op = step.name(),
            width = buffer.width(),
            height = buffer.height(),
            "running pipeline step"
        );
        buffer = apply(step, buffer, base_dir)
            .with_context(|| format!("step {index} ({})", step.name()))?;
    }
    Ok(buffer)
}

pub fn apply(step: &Step, buffer: PixelBuffer, base_dir: &Path) -> Result<PixelBuffer> {
    let out = match *step {
        Step::Blur { iterations } => recover_with_copy(blur(&buffer, iterations), &buffer)?,
        Step::Sharpen { factor, iterations } => {
            recover_with_copy(sharpen(&buffer, factor, iterations), &buffer)?
        }
        Step::Filter {
            weights,
            scale,
            bias,
            iterations,
        } => {
            let kernel = match scale {
                Some(scale) => ConvolutionKernel::new(weights, scale, bias)?,
                None => ConvolutionKernel::new(weights, weights.iter().sum(), bias)?,
            };
            recover_with_copy(convolve(&buffer, &kernel, iterations), &buffer)?
        }
        Step::Resample {
            width,
            height,
            filter,
        } => match filter.filter() {
            None => resample_nearest(&buffer, width, height)?,
            Some(filter) => match resample_filtered(&buffer, width, height, filter) {
                Err(err) if err.is_recoverable() => {
                    tracing::warn!(%err, "filtered resample unavailable, using nearest neighbor");
                    resample_nearest(&buffer, width, height)?
                }
                other => other?,
            },
        },
        Step::Combine {
            ref overlay,
            mode,
            blend,
        } => {
            let path = base_dir.join(overlay);
            let overlay = store::load(&path)?.buffer;
            let mut target = buffer;
            let outcome = combine_owned(&mut target, overlay, mode.into(), blend)?;
            tracing::debug!(?outcome, overlay = %path.display(), "combine finished");
            target
        }
        Step::FixTransparentEdges { opacity_threshold } => {
            let config = EdgeRepairConfig { opacity_threshold };
            recover_with_copy(fix_transparent_edges(&buffer, &config), &buffer)?
        }
    };
    Ok(out)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use texel_ops::PixelBuffer;

    use super::run;
    use crate::config::Pipeline;
    use crate::store;

    fn solid_rgba(w: usize, h: usize, px: [u8; 4]) -> PixelBuffer {
        PixelBuffer::from_vec(w, h, 4, px.repeat(w * h)).expect("valid buffer")
    }

    #[test]
    fn uniform_image_survives_filters() {
        let pipeline = Pipeline::from_json(
            r#"{ "steps": [
                { "op": "blur", "iterations": 3 },
                { "op": "sharpen", "factor": 2.0 },
                { "op": "filter", "weights": [1,1,1,1,1,1,1,1,1] }
            ] }"#,
        )
        .expect("valid pipeline");
        let src = solid_rgba(6, 6, [10, 20, 30, 255]);
        let out = run(&pipeline, src.clone(), std::path::Path::new(".")).expect("runs");
        assert_eq!(out, src);
    }

    #[test]
    fn unsupported_depth_falls_back_to_copy() {
        let pipeline = Pipeline::from_json(
            r#"{ "steps": [ { "op": "blur" }, { "op": "fix_transparent_edges" } ] }"#,
        )
        .expect("valid pipeline");
        let src = PixelBuffer::from_vec(3, 3, 2, (0..18).collect()).expect("valid buffer");
        let out = run(&pipeline, src.clone(), std::path::Path::new(".")).expect("recovers");
        assert_eq!(out, src);
    }

    #[test]
    fn resample_then_combine_with_overlay_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mask = PixelBuffer::from_vec(4, 4, 1, vec![200; 16]).expect("valid buffer");
        store::save(&mask, &dir.path().join("mask.png")).expect("save mask");

        let config = dir.path().join("steps.json");
        fs::write(
            &config,
            r#"{ "steps": [
                { "op": "resample", "width": 4, "height": 4 },
                { "op": "combine", "overlay": "mask.png", "mode": "r_to_alpha" }
            ] }"#,
        )
        .expect("write config");
        let pipeline = Pipeline::load(&config).expect("valid pipeline");

        let src = solid_rgba(2, 2, [1, 2, 3, 0]);
        let out = run(&pipeline, src, dir.path()).expect("runs");
        assert_eq!(out.dimensions(), (4, 4));
        assert!(out.data().chunks_exact(4).all(|px| px == [1, 2, 3, 200]));
    }

    #[test]
    fn dimension_mismatch_aborts() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mask = PixelBuffer::from_vec(3, 3, 3, vec![0; 27]).expect("valid buffer");
        store::save(&mask, &dir.path().join("mask.png")).expect("save mask");

        let pipeline = Pipeline::from_json(
            r#"{ "steps": [ { "op": "combine", "overlay": "mask.png", "mode": "max" } ] }"#,
        )
        .expect("valid pipeline");
        let err = run(&pipeline, solid_rgba(2, 2, [0; 4]), dir.path()).expect_err("fatal");
        assert!(format!("{err:#}").contains("dimension mismatch"));
    }

    #[test]
    fn filtered_resample_of_palette_uses_nearest() {
        let pipeline = Pipeline::from_json(
            r#"{ "steps": [ { "op": "resample", "width": 4, "height": 2, "filter": "lanczos3" } ] }"#,
        )
        .expect("valid pipeline");
        let mut src = PixelBuffer::from_vec(2, 1, 1, vec![5, 9]).expect("valid buffer");
        src.set_interpretation(texel_ops::ColorInterpretation::Palette);
        let out = run(&pipeline, src, std::path::Path::new(".")).expect("recovers");
        assert_eq!(out.data(), &[5, 5, 9, 9, 5, 5, 9, 9]);
    }
}

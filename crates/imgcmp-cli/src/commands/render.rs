//! Render command - draws one comparison (or an alpha sweep) to PNG.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use imgcmp_ops::Registry;
use imgcmp_view::binding::{self, ComparisonSession, ControlSurface, ParamValues, ScriptedSurface};
use imgcmp_view::raster::RasterCanvas;
use imgcmp_view::{Comparator, CompareParams, RenderOptions};
use tracing::info;

use crate::RenderArgs;

pub fn run(args: RenderArgs, verbose: bool) -> Result<()> {
    let (a, b) = super::load_pair(&args.compare)?;
    let params = args.compare.params()?;
    let options = RenderOptions::default().with_figure_width(args.compare.width);
    let canvas = RasterCanvas::new().with_dpi(args.dpi);

    match args.sweep {
        None => {
            let mut canvas = canvas;
            let cmp = Comparator::new(Registry::builtin(), options)
                .compare(&mut canvas, &a, &b, &params)?;
            canvas.save(&args.output)?;
            info!(
                "{} ({}, {}) -> {}",
                params.method,
                cmp.arrangement,
                cmp.image.shape(),
                args.output.display()
            );
        }
        Some(steps) => {
            let mut session = ComparisonSession::with_options(a, b, canvas, options);
            let written = sweep(&mut session, &params, steps, &args.output)?;
            info!("Wrote {written} frames");
        }
    }

    if verbose {
        println!("Done: {}", args.output.display());
    }
    Ok(())
}

/// Renders `steps + 1` frames with alpha evenly spaced over `[0, 1]`.
///
/// The frames go through the alpha slider, which moves in
/// [`binding::ALPHA_STEP`] increments, so `steps` must divide the number of
/// slider positions.
fn sweep(
    session: &mut ComparisonSession<RasterCanvas>,
    params: &CompareParams,
    steps: u32,
    output: &Path,
) -> Result<usize> {
    let positions = slider_positions();
    if steps == 0 || positions % steps != 0 {
        let valid: Vec<String> = (1..=positions)
            .filter(|d| positions % d == 0)
            .map(|d| d.to_string())
            .collect();
        bail!(
            "--sweep {steps} does not fit alpha steps of {}; use one of {}",
            binding::ALPHA_STEP,
            valid.join(", ")
        );
    }

    let initial = ParamValues::from(params).with_number(binding::ALPHA, 0.0);
    let updates = (1..=steps)
        .map(|i| ParamValues::new().with_number(binding::ALPHA, f64::from(i) / f64::from(steps)))
        .collect();
    let mut surface = ScriptedSurface::new(updates).starting_from(initial);

    let controls = session.controls();
    let mut frame = 0usize;
    let result = surface.run(&controls, &mut |values| {
        session.on_change(values)?;
        session.canvas().save(frame_path(output, frame))?;
        frame += 1;
        Ok(())
    });
    result.with_context(|| format!("Sweep stopped after {frame} frames"))?;
    Ok(frame)
}

/// Number of alpha slider steps between 0 and 1.
fn slider_positions() -> u32 {
    (1.0 / binding::ALPHA_STEP).round() as u32
}

/// `out.png` -> `out_007.png`.
fn frame_path(output: &Path, frame: usize) -> PathBuf {
    let stem = output
        .file_stem()
        .map_or_else(|| "frame".into(), |s| s.to_string_lossy());
    let ext = output
        .extension()
        .map_or_else(|| "png".into(), |e| e.to_string_lossy());
    output.with_file_name(format!("{stem}_{frame:03}.{ext}"))
}

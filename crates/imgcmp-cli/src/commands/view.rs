//! View command - interactive comparison viewer.

use anyhow::{Context, Result};
use imgcmp_view::ViewerConfig;

use crate::ViewArgs;

/// Run the view command.
pub fn run(args: ViewArgs, verbose: bool) -> Result<()> {
    let config = viewer_config(&args, verbose)?;
    let (a, b) = super::load_pair(&args.compare)?;
    imgcmp_view::run_viewer(a, b, config).context("Viewer failed")
}

/// Window settings, with the comparison flags as the initial control values.
fn viewer_config(args: &ViewArgs, verbose: bool) -> Result<ViewerConfig> {
    let title = format!(
        "imgcmp - {} vs {}",
        file_name(&args.compare.a),
        file_name(&args.compare.b)
    );
    Ok(ViewerConfig {
        figure_width: args.compare.width,
        title,
        params: args.compare.params()?,
        verbose: u8::from(verbose),
    })
}

fn file_name(path: &std::path::Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}

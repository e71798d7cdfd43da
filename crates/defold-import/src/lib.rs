// Import pipeline: walks an asset tree and projects every supported file
// into a Defold project directory.

pub mod aseprite;
pub mod csv;
pub mod ink;
pub mod walk;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use defold_gen::OutputDir;
use log::info;

/// Run a whole import: discover assets under `root`, project them and
/// write everything generated under `output`.
pub fn run(root: &Path, output: &Path) -> Result<()> {
    let assets = walk::partition(root)?;
    info!(
        "found {} aseprite, {} ink and {} csv files under {}",
        assets.aseprite.len(),
        assets.ink.len(),
        assets.csv.len(),
        root.display(),
    );

    let out = OutputDir::new(output);
    fs::create_dir_all(out.path("img"))
        .with_context(|| format!("Failed to create {}", out.path("img").display()))?;
    aseprite::import(&out, &assets.aseprite)?;
    ink::import(&out, &assets.ink)?;
    csv::import(&out, &assets.csv)?;
    Ok(())
}

/// File stem naming everything generated from an asset.
pub(crate) fn stem(path: &Path) -> Result<String> {
    let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
        bail!("Asset {} has no usable file name", path.display());
    };
    Ok(stem.to_string())
}

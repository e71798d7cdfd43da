// Filesystem sink for generated assets.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::debug;

use import_core::Raster;

use crate::png::encode_png;

/// Writes generated files under one output root. Asset names are
/// root-relative and may carry subdirectories; parents are created as
/// needed.
pub struct OutputDir {
    root: PathBuf,
}

impl OutputDir {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve an asset name against the output root.
    pub fn path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    pub fn write(&self, name: &str, contents: impl AsRef<[u8]>) -> Result<()> {
        let path = self.path(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&path, contents)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        debug!("wrote {}", path.display());
        Ok(())
    }

    /// Encode a raster as PNG and write it under its own name.
    pub fn write_raster(&self, raster: &Raster) -> Result<()> {
        let png =
            encode_png(raster).with_context(|| format!("Failed to encode {}", raster.name))?;
        self.write(&raster.name, png)
    }
}

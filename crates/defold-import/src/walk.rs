// Asset discovery: one sorted walk over the tree, partitioned by
// extension.

use std::path::{Path, PathBuf};

use anyhow::Result;
use log::warn;
use walkdir::WalkDir;

/// Importable files found under the asset root, in walk order.
#[derive(Debug, Default)]
pub struct AssetFiles {
    pub aseprite: Vec<PathBuf>,
    pub ink: Vec<PathBuf>,
    pub csv: Vec<PathBuf>,
}

/// Walk `root` and partition every file by extension. The walk is
/// sorted, which keeps generated ordinals and table indices stable
/// across runs.
pub fn partition(root: &Path) -> Result<AssetFiles> {
    let mut files = AssetFiles::default();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.into_path();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("aseprite") => files.aseprite.push(path),
            Some("ink") => files.ink.push(path),
            Some("csv") => files.csv.push(path),
            _ => warn!("skipping unsupported asset {}", path.display()),
        }
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"").unwrap();
    }

    #[test]
    fn test_partition_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("levels/cave.aseprite"));
        touch(&root.join("dialogue/intro.ink"));
        touch(&root.join("tables/enemies.csv"));
        touch(&root.join("readme.md"));

        let files = partition(root).unwrap();
        assert_eq!(files.aseprite, vec![root.join("levels/cave.aseprite")]);
        assert_eq!(files.ink, vec![root.join("dialogue/intro.ink")]);
        assert_eq!(files.csv, vec![root.join("tables/enemies.csv")]);
    }

    #[test]
    fn test_walk_order_is_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("b/two.aseprite"));
        touch(&root.join("a/one.aseprite"));
        touch(&root.join("a/zero.aseprite"));

        let files = partition(root).unwrap();
        assert_eq!(
            files.aseprite,
            vec![
                root.join("a/one.aseprite"),
                root.join("a/zero.aseprite"),
                root.join("b/two.aseprite"),
            ]
        );
    }

    #[test]
    fn test_directories_are_not_assets() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("shots.csv")).unwrap();
        touch(&root.join("shots.csv/real.csv"));

        let files = partition(root).unwrap();
        assert_eq!(files.csv, vec![root.join("shots.csv/real.csv")]);
    }
}

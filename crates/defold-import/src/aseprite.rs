// Aseprite import driver: decodes each document, routes it by its
// parent directory and writes the per-document and run-wide assets.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ase_model::{AseDecoder, AsepriteFile};
use defold_gen::{
    DATA_SCRIPT, OutputDir, animation_atlas, atlas, collection, data_lua, gui, sprite, tilemap,
};
use import_core::{
    AnimationClip, DataTable, Raster, SceneElement, extract_gui, extract_level, extract_sprite,
};
use log::{info, warn};

use crate::stem;

/// Import every document, then the run-wide outputs: the data-table
/// module and script, the combined animation atlas and the UI atlas.
/// Those four are written even when no document contributed to them.
pub fn import(out: &OutputDir, files: &[PathBuf]) -> Result<()> {
    let mut run = ImportRun::new(out);
    for file in files {
        run.import_file(file)?;
    }
    run.finish()
}

#[derive(Debug, Clone, Copy)]
enum Route {
    Level,
    Sprite,
    Ui,
}

impl Route {
    /// The immediate parent directory decides how a document projects.
    fn of(path: &Path) -> Option<Self> {
        let parent = path.parent()?.file_name()?.to_str()?;
        match parent {
            "levels" => Some(Route::Level),
            "sprites" => Some(Route::Sprite),
            "ui" => Some(Route::Ui),
            _ => None,
        }
    }
}

struct ImportRun<'a> {
    out: &'a OutputDir,
    clips: Vec<AnimationClip>,
    ui_elements: Vec<SceneElement>,
    data: DataTable,
    written: HashSet<String>,
}

impl<'a> ImportRun<'a> {
    fn new(out: &'a OutputDir) -> Self {
        Self {
            out,
            clips: Vec::new(),
            ui_elements: Vec::new(),
            data: DataTable::new(),
            written: HashSet::new(),
        }
    }

    fn import_file(&mut self, path: &Path) -> Result<()> {
        let Some(route) = Route::of(path) else {
            warn!("no support for importing {} yet", path.display());
            return Ok(());
        };
        let name = stem(path)?;
        let doc = AseDecoder::decode(path)
            .with_context(|| format!("Failed to decode {}", path.display()))?;
        match route {
            Route::Level => self.import_level(&name, &doc),
            Route::Sprite => self.import_sprite(&name, &doc),
            Route::Ui => self.import_ui(&name, &doc),
        }
        .with_context(|| format!("Failed to import {}", path.display()))
    }

    fn import_level(&mut self, name: &str, doc: &AsepriteFile) -> Result<()> {
        let scene = extract_level(doc, name, &mut self.data)?;
        for raster in &scene.rasters {
            self.write_raster(raster)?;
        }
        self.write(&format!("{name}.atlas"), atlas(&scene.objects))?;
        if !scene.tiles.is_empty() {
            self.write(&format!("{name}.tilemap"), tilemap(&scene.tiles))?;
        }
        self.write(&format!("{name}.collection"), collection(&scene))?;
        info!("imported level {name}");
        Ok(())
    }

    fn import_sprite(&mut self, name: &str, doc: &AsepriteFile) -> Result<()> {
        let sprite_doc = extract_sprite(doc, name)?;
        for raster in &sprite_doc.rasters {
            self.write_raster(raster)?;
        }
        self.write(
            &format!("{name}.sprite"),
            sprite("all", sprite_doc.default_animation()),
        )?;
        self.clips.extend(sprite_doc.clips);
        info!("imported sprite {name}");
        Ok(())
    }

    fn import_ui(&mut self, name: &str, doc: &AsepriteFile) -> Result<()> {
        let screen = extract_gui(doc, name)?;
        for raster in &screen.rasters {
            self.write_raster(raster)?;
        }
        self.write(&format!("{name}.gui"), gui(&screen))?;
        self.ui_elements.extend(screen.elements);
        info!("imported ui {name}");
        Ok(())
    }

    /// Every output name passes through here; same-stem documents in
    /// different subtrees resolve to the same names, so a repeat write
    /// warns instead of replacing silently.
    fn write(&mut self, name: &str, contents: impl AsRef<[u8]>) -> Result<()> {
        self.note_written(name);
        self.out.write(name, contents)
    }

    fn write_raster(&mut self, raster: &Raster) -> Result<()> {
        self.note_written(&raster.name);
        self.out.write_raster(raster)
    }

    fn note_written(&mut self, name: &str) {
        if !self.written.insert(name.to_string()) {
            warn!("{name} is written more than once");
        }
    }

    fn finish(mut self) -> Result<()> {
        let data = data_lua(&self.data);
        let animations = animation_atlas(&self.clips);
        let ui = atlas(&self.ui_elements);
        self.write("data.lua", data)?;
        self.write("data.script", DATA_SCRIPT)?;
        self.write("all.atlas", animations)?;
        self.write("ui.atlas", ui)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    use ase_model::{Frame, testkit};

    fn write_doc(path: &Path, doc: &AsepriteFile) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, testkit::encode(doc)).unwrap();
    }

    fn level_doc() -> AsepriteFile {
        AsepriteFile {
            width: 64,
            height: 64,
            color_depth: 32,
            frames: vec![Frame {
                duration_ms: 100,
                layers: vec![testkit::layer("bg")],
                cels: vec![testkit::image_cel(0, 4, 4, 16, 16)],
                ..Frame::default()
            }],
        }
    }

    #[test]
    fn test_route_matches_exact_parent_directory() {
        assert!(matches!(
            Route::of(Path::new("assets/levels/cave.aseprite")),
            Some(Route::Level)
        ));
        assert!(matches!(
            Route::of(Path::new("assets/sprites/hero.aseprite")),
            Some(Route::Sprite)
        ));
        assert!(matches!(
            Route::of(Path::new("deep/tree/ui/menu.aseprite")),
            Some(Route::Ui)
        ));
        // A "gui" directory is not the "ui" route.
        assert!(Route::of(Path::new("assets/gui/menu.aseprite")).is_none());
        assert!(Route::of(Path::new("menu.aseprite")).is_none());
    }

    #[test]
    fn test_empty_run_still_writes_run_wide_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let out = OutputDir::new(dir.path());

        import(&out, &[]).unwrap();

        assert_eq!(
            fs::read_to_string(out.path("data.script")).unwrap(),
            "go.property(\"data\", 1)"
        );
        let data = fs::read_to_string(out.path("data.lua")).unwrap();
        assert!(data.starts_with("local data = {}\n"));
        assert_eq!(
            fs::read_to_string(out.path("all.atlas")).unwrap(),
            "margin: 2\nextrude_borders: 0\ninner_padding: 0\n"
        );
        assert!(out.path("ui.atlas").exists());
    }

    #[test]
    fn test_level_file_writes_scene_assets() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write_doc(&root.join("levels/cave.aseprite"), &level_doc());
        let out = OutputDir::new(root.join("import"));

        import(&out, &[root.join("levels/cave.aseprite")]).unwrap();

        assert!(out.path("img/cave_bg.png").exists());
        let atlas_text = fs::read_to_string(out.path("cave.atlas")).unwrap();
        assert!(atlas_text.contains("image: \"/import/img/cave_bg.png\""));
        let collection_text = fs::read_to_string(out.path("cave.collection")).unwrap();
        assert!(collection_text.starts_with("name: \"cave\"\n"));
        assert!(collection_text.contains("id: \"bg\""));
        // No tile placements, no tile map.
        assert!(!out.path("cave.tilemap").exists());
    }

    /// Same-stem documents in different subtrees resolve to the same
    /// output names, text assets included; the run tracks every name it
    /// writes so the second document warns rather than replacing the
    /// first silently.
    #[test]
    fn test_text_outputs_share_the_collision_set() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write_doc(&root.join("a/levels/cave.aseprite"), &level_doc());
        write_doc(&root.join("b/levels/cave.aseprite"), &level_doc());
        let out = OutputDir::new(root.join("import"));

        let mut run = ImportRun::new(&out);
        run.import_file(&root.join("a/levels/cave.aseprite")).unwrap();
        run.import_file(&root.join("b/levels/cave.aseprite")).unwrap();

        for name in ["img/cave_bg.png", "cave.atlas", "cave.collection"] {
            assert!(run.written.contains(name), "{name} is not tracked");
        }
        assert!(out.path("cave.collection").exists());
    }

    #[test]
    fn test_unrouted_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write_doc(&root.join("misc/extra.aseprite"), &level_doc());
        let out = OutputDir::new(root.join("import"));

        import(&out, &[root.join("misc/extra.aseprite")]).unwrap();

        assert!(!out.path("extra.atlas").exists());
        assert!(!out.path("extra.collection").exists());
    }

    #[test]
    fn test_undecodable_file_fails_the_run() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("levels")).unwrap();
        fs::write(root.join("levels/broken.aseprite"), b"not an aseprite file").unwrap();
        let out = OutputDir::new(root.join("import"));

        let err = import(&out, &[root.join("levels/broken.aseprite")]).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to decode"));
    }
}

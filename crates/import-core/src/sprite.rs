use ase_model::AsepriteFile;

use crate::anim::{AnimationClip, clip_from_tag};
use crate::error::ImportError;
use crate::raster::{Raster, check_color_depth, flatten_image_cels};

/// A sprite document's projection: one flattened raster per frame plus
/// the clips its tags define.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpriteDoc {
    pub name: String,
    pub clips: Vec<AnimationClip>,
    pub rasters: Vec<Raster>,
}

impl SpriteDoc {
    /// Id of the first clip, used as the sprite's default animation.
    pub fn default_animation(&self) -> &str {
        self.clips.first().map(|clip| clip.id.as_str()).unwrap_or("")
    }
}

/// Project a sprite document: every frame flattens into
/// `img/<name>_<index>.png`, and every tag (on any frame) becomes a clip
/// referencing those frame rasters.
pub fn extract_sprite(doc: &AsepriteFile, name: &str) -> Result<SpriteDoc, ImportError> {
    check_color_depth(doc)?;
    let mut sprite = SpriteDoc {
        name: name.to_string(),
        ..SpriteDoc::default()
    };

    for (i, frame) in doc.frames.iter().enumerate() {
        let (width, height, rgba) = flatten_image_cels(&frame.cels);
        sprite.rasters.push(Raster {
            name: format!("img/{name}_{i}.png"),
            width,
            height,
            rgba,
        });
        for tag in &frame.tags {
            sprite.clips.push(clip_from_tag(doc, name, tag)?);
        }
    }

    Ok(sprite)
}

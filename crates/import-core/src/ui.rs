use ase_model::{AsepriteFile, CelContent};
use log::warn;

use crate::element::SceneElement;
use crate::error::ImportError;
use crate::geom::to_scene_y;
use crate::raster::{Raster, check_color_depth};

/// A GUI document's projection: box nodes plus the texture groups the
/// screen needs bound.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuiScene {
    pub name: String,
    pub textures: Vec<String>,
    pub elements: Vec<SceneElement>,
    pub rasters: Vec<Raster>,
}

/// Project a GUI document. Image cels become grouped, textured nodes
/// anchored at their top-left corner (only the y flips; GUI nodes are not
/// center-anchored). Slice keys become ungrouped nodes at full authored
/// size, and their presence pulls the shared animation atlas into the
/// screen's texture list.
pub fn extract_gui(doc: &AsepriteFile, name: &str) -> Result<GuiScene, ImportError> {
    check_color_depth(doc)?;
    let canvas_h = doc.height as i32;
    let mut scene = GuiScene {
        name: name.to_string(),
        textures: vec!["ui".to_string()],
        ..GuiScene::default()
    };

    let mut needs_all = false;
    for frame in &doc.frames {
        for cel in &frame.cels {
            let Some(layer) = frame.layers.get(cel.layer_index as usize) else {
                warn!("cel references missing layer {} in {name}", cel.layer_index);
                continue;
            };
            let CelContent::Image {
                width,
                height,
                pixels,
            } = &cel.content
            else {
                warn!("skipping non-image cel on layer '{}' in {name}", layer.name);
                continue;
            };
            scene.rasters.push(Raster {
                name: format!("img/{name}_{}.png", layer.name),
                width: *width,
                height: *height,
                rgba: pixels.clone(),
            });
            scene.elements.push(SceneElement {
                group: name.to_string(),
                name: layer.name.clone(),
                x: cel.x as i32,
                y: to_scene_y(cel.y as i32, canvas_h),
                w: *width as i32,
                h: *height as i32,
                ..SceneElement::default()
            });
        }

        if !frame.slices.is_empty() {
            needs_all = true;
            for slice in &frame.slices {
                for key in &slice.keys {
                    scene.elements.push(SceneElement {
                        name: slice.name.clone(),
                        x: key.x,
                        y: to_scene_y(key.y, canvas_h),
                        w: key.width as i32,
                        h: key.height as i32,
                        ..SceneElement::default()
                    });
                }
            }
        }
    }

    if needs_all {
        scene.textures.push("all".to_string());
    }
    Ok(scene)
}

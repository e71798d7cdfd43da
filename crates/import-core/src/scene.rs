use std::collections::HashMap;

use ase_model::{AsepriteFile, CelContent, Tileset};
use log::{debug, warn};

use crate::element::{DataTable, SceneElement};
use crate::error::ImportError;
use crate::geom::{center, tile_grid, tile_scene_pos, to_scene_y};
use crate::layer::LayerRole;
use crate::raster::{Raster, check_color_depth, tileset_raster};
use crate::trigger::collect_triggers;

/// Everything a level document projects into: positioned objects, trigger
/// volumes, background tile placements and the rasters backing them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelScene {
    pub name: String,
    pub objects: Vec<SceneElement>,
    pub triggers: Vec<SceneElement>,
    pub tiles: Vec<SceneElement>,
    pub rasters: Vec<Raster>,
}

/// Project a level document. One pass per frame: tilesets are indexed
/// (and named ones emit their raster strip), then cels are classified by
/// content and owning-layer role, then slices become triggers. Trigger
/// names are registered in the run-wide data table as they are found.
pub fn extract_level(
    doc: &AsepriteFile,
    name: &str,
    data: &mut DataTable,
) -> Result<LevelScene, ImportError> {
    check_color_depth(doc)?;
    let canvas_h = doc.height as i32;
    let mut scene = LevelScene {
        name: name.to_string(),
        ..LevelScene::default()
    };

    for frame in &doc.frames {
        let mut tilesets: HashMap<u32, &Tileset> = HashMap::new();
        for tileset in &frame.tilesets {
            tilesets.insert(tileset.id, tileset);
            if tileset.name.is_empty() {
                continue;
            }
            scene.rasters.push(tileset_raster(name, tileset)?);
        }

        for cel in &frame.cels {
            let Some(layer) = frame.layers.get(cel.layer_index as usize) else {
                warn!("cel references missing layer {} in {name}", cel.layer_index);
                continue;
            };
            let role = LayerRole::of(layer);

            match &cel.content {
                CelContent::Image {
                    width,
                    height,
                    pixels,
                } => {
                    let w = *width as i32;
                    let h = *height as i32;
                    let cx = center(cel.x as i32, w);
                    let cy = center(cel.y as i32, h);
                    match role {
                        LayerRole::PointObject(object) => scene.objects.push(SceneElement {
                            name: object,
                            x: cx,
                            y: to_scene_y(cy, canvas_h),
                            ..SceneElement::default()
                        }),
                        LayerRole::Visual(layer_name) => {
                            scene.rasters.push(Raster {
                                name: format!("img/{name}_{layer_name}.png"),
                                width: *width,
                                height: *height,
                                rgba: pixels.clone(),
                            });
                            scene.objects.push(SceneElement {
                                group: name.to_string(),
                                name: layer_name,
                                x: cx,
                                y: to_scene_y(cy, canvas_h),
                                w,
                                h,
                                ..SceneElement::default()
                            });
                        }
                    }
                }
                CelContent::Tilemap {
                    width_tiles,
                    height_tiles,
                    tiles,
                } => {
                    let Some(tileset_index) = layer.tileset_index else {
                        debug!(
                            "layer '{}' in {name} has no tileset binding, skipping cel",
                            layer.name
                        );
                        continue;
                    };
                    let Some(tileset) = tilesets.get(&tileset_index) else {
                        debug!(
                            "tileset {tileset_index} for layer '{}' not found in {name}, skipping cel",
                            layer.name
                        );
                        continue;
                    };

                    let expected = 4 * *width_tiles as usize * *height_tiles as usize;
                    if tiles.len() != expected {
                        return Err(ImportError::TileBufferSize {
                            layer: layer.name.clone(),
                            expected,
                            actual: tiles.len(),
                        });
                    }

                    let tile_w = tileset.tile_width as i32;
                    let tile_h = tileset.tile_height as i32;
                    for (i, raw) in tiles.chunks_exact(4).enumerate() {
                        let tile_index = u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]);
                        if tile_index == 0 {
                            continue;
                        }
                        let tx = i as i32 % *width_tiles as i32;
                        let ty = i as i32 / *width_tiles as i32;
                        let (px, py) = tile_scene_pos(
                            cel.x as i32,
                            cel.y as i32,
                            tx,
                            ty,
                            tile_w,
                            tile_h,
                            canvas_h,
                        );
                        match &role {
                            LayerRole::PointObject(object) => scene.objects.push(SceneElement {
                                index: scene.objects.len() as i32 + 1,
                                name: object.clone(),
                                x: px,
                                y: py,
                                ..SceneElement::default()
                            }),
                            LayerRole::Visual(_) => {
                                let (gx, gy) = tile_grid(px, py, tile_w, tile_h);
                                scene.tiles.push(SceneElement {
                                    index: tile_index as i32,
                                    x: gx,
                                    y: gy,
                                    ..SceneElement::default()
                                });
                            }
                        }
                    }
                }
                CelContent::Other { raw_type } => {
                    warn!("unsupported cel type {raw_type} in {name}");
                }
            }
        }

        for slice in &frame.slices {
            collect_triggers(slice, name, canvas_h, data, &mut scene.triggers);
        }
    }

    Ok(scene)
}

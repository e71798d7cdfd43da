// Tile map descriptor: one fixed background layer of cell placements.

use import_core::SceneElement;

/// Tile map over the placements of one level. Cells keep the tile index
/// the document authored; the shared tile source is resolved by path.
pub fn tilemap(tiles: &[SceneElement]) -> String {
    let mut out = String::from(
        "tile_set: \"/game/levels.tilesource\"\nlayers {\n  id: \"background\"\n  z: 0.0\n  is_visible: 1\n",
    );
    for tile in tiles {
        out.push_str(&format!(
            "  cell {{\n    x: {}\n    y: {}\n    tile: {}\n    h_flip: 0\n    v_flip: 0\n    rotate90: 0\n  }}\n",
            tile.x, tile.y, tile.index,
        ));
    }
    out.push_str("}\nmaterial: \"/builtins/materials/tile_map.material\"\nblend_mode: BLEND_MODE_ALPHA\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile(index: i32, x: i32, y: i32) -> SceneElement {
        SceneElement {
            index,
            x,
            y,
            ..SceneElement::default()
        }
    }

    #[test]
    fn test_tilemap_places_cells_in_order() {
        let expected = r#"tile_set: "/game/levels.tilesource"
layers {
  id: "background"
  z: 0.0
  is_visible: 1
  cell {
    x: 0
    y: 3
    tile: 1
    h_flip: 0
    v_flip: 0
    rotate90: 0
  }
  cell {
    x: 1
    y: 2
    tile: 3
    h_flip: 0
    v_flip: 0
    rotate90: 0
  }
}
material: "/builtins/materials/tile_map.material"
blend_mode: BLEND_MODE_ALPHA
"#;
        assert_eq!(tilemap(&[tile(1, 0, 3), tile(3, 1, 2)]), expected);
    }

    #[test]
    fn test_empty_tilemap_keeps_layer_block() {
        let out = tilemap(&[]);
        assert!(out.contains("layers {\n  id: \"background\"\n"));
        assert!(!out.contains("cell {"));
    }
}

// Scene-space geometry. The authoring canvas has y growing downward from
// the top-left corner; the engine scene has y growing upward from the
// bottom-left. All transforms stay in integer pixel space.

/// Flip a canvas y coordinate into scene space.
pub fn to_scene_y(y: i32, canvas_h: i32) -> i32 {
    canvas_h - y
}

/// Center of an extent, computed in canvas space (before any flip) with
/// truncating division.
pub fn center(origin: i32, size: i32) -> i32 {
    origin + size / 2
}

/// Halve a trigger extent, truncating. Box collision shapes take half
/// extents, so authored sizes are stored pre-halved.
pub fn halve(size: i32) -> i32 {
    size / 2
}

/// Scene-space pixel position of the tile at grid cell (tx, ty) within a
/// tilemap cel: x sits at the tile's horizontal center, y is the flipped
/// top edge.
pub fn tile_scene_pos(
    cel_x: i32,
    cel_y: i32,
    tx: i32,
    ty: i32,
    tile_w: i32,
    tile_h: i32,
    canvas_h: i32,
) -> (i32, i32) {
    let x = cel_x + tx * tile_w + tile_w / 2;
    let y = canvas_h - cel_y - ty * tile_h;
    (x, y)
}

/// Tile-grid cell for a scene-space pixel position. The row is shifted
/// down by one: the flipped y lands on a tile's top edge, which belongs
/// to the cell below it.
pub fn tile_grid(x: i32, y: i32, tile_w: i32, tile_h: i32) -> (i32, i32) {
    (x / tile_w, y / tile_h - 1)
}

use ase_model::Slice;

use crate::element::{DataTable, SceneElement};
use crate::geom::{center, halve, to_scene_y};

/// Project a slice's keys into trigger volumes, registering each key's
/// name in the data table. The registration index ties the trigger back
/// to its script data row.
pub fn collect_triggers(
    slice: &Slice,
    group: &str,
    canvas_h: i32,
    data: &mut DataTable,
    out: &mut Vec<SceneElement>,
) {
    for key in &slice.keys {
        let cx = center(key.x, key.width as i32);
        let cy = center(key.y, key.height as i32);
        let index = data.push(&slice.name);
        out.push(SceneElement {
            index,
            group: group.to_string(),
            name: slice.name.clone(),
            x: cx,
            y: to_scene_y(cy, canvas_h),
            w: halve(key.width as i32),
            h: halve(key.height as i32),
        });
    }
}

// Sprite component descriptor bound to an imported atlas.

use crate::pbtext::escape;

/// Sprite descriptor playing `default_animation` out of `<atlas>.atlas`.
/// Also embedded into collections for rendered level regions.
pub fn sprite(atlas: &str, default_animation: &str) -> String {
    format!(
        "tile_set: \"/import/{}.atlas\"\ndefault_animation: \"{}\"\nmaterial: \"/builtins/materials/sprite.material\"\nblend_mode: BLEND_MODE_ALPHA\n",
        escape(atlas),
        escape(default_animation),
    )
}

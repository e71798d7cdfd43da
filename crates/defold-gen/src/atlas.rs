// Atlas descriptors: still images for per-scene atlases and flip-book
// animations for the combined animation sheet.

use import_core::{AnimationClip, Playback, SceneElement};

use crate::pbtext::escape;

const FOOTER: &str = "margin: 2\nextrude_borders: 0\ninner_padding: 0\n";

/// Atlas over still images. One `images` block per grouped element, in
/// element order. Ungrouped elements (markers and triggers) have no
/// raster behind them and are left out.
pub fn atlas(elements: &[SceneElement]) -> String {
    let mut out = String::new();
    for element in elements.iter().filter(|element| element.is_grouped()) {
        out.push_str(&format!(
            "images {{\nimage: \"/import/img/{}_{}.png\"\nsprite_trim_mode: SPRITE_TRIM_MODE_OFF\n}}\n\n",
            escape(&element.group),
            escape(&element.name),
        ));
    }
    out.push_str(FOOTER);
    out
}

/// Atlas over every tagged animation in the run. One `animations` block
/// per clip, frames in playback order.
pub fn animation_atlas(clips: &[AnimationClip]) -> String {
    let mut out = String::new();
    for clip in clips {
        out.push_str(&format!("animations {{\n  id: \"{}\"\n", escape(&clip.id)));
        for frame in &clip.frames {
            out.push_str(&format!(
                "  images {{\n    image: \"/import/{}\"\n    sprite_trim_mode: SPRITE_TRIM_MODE_OFF\n  }}\n",
                escape(frame),
            ));
        }
        out.push_str(&format!(
            "  playback: {}\n  fps: {}\n  flip_horizontal: 0\n  flip_vertical: 0\n}}\n\n",
            playback_mode(clip.playback),
            clip.fps,
        ));
    }
    out.push_str(FOOTER);
    out
}

fn playback_mode(playback: Playback) -> &'static str {
    match playback {
        Playback::LoopForward => "PLAYBACK_LOOP_FORWARD",
        Playback::OnceForward => "PLAYBACK_ONCE_FORWARD",
    }
}

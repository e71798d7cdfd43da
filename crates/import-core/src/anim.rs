use ase_model::{AsepriteFile, Tag};
use log::warn;

use crate::error::ImportError;

/// Engine playback mode for a clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Playback {
    LoopForward,
    OnceForward,
}

/// One tagged frame range, projected for the combined animation atlas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationClip {
    /// `<file>_<tag>`; unique per run as long as stems and tag names are.
    pub id: String,
    /// Output-relative frame raster names, in playback order.
    pub frames: Vec<String>,
    pub playback: Playback,
    pub fps: u16,
}

/// Group a tag's frame range into a clip.
///
/// The first nonzero frame duration in the range becomes the clip's rate;
/// later frames that disagree keep the first value and log a warning. A
/// range with no usable duration, or one whose duration exceeds a second,
/// cannot derive a whole frame rate and fails the document.
pub fn clip_from_tag(
    doc: &AsepriteFile,
    stem: &str,
    tag: &Tag,
) -> Result<AnimationClip, ImportError> {
    let id = format!("{stem}_{}", tag.name);
    let playback = if tag.repeats == 1 {
        Playback::OnceForward
    } else {
        Playback::LoopForward
    };

    let mut frames = Vec::new();
    let mut duration_ms = 0u16;
    for i in tag.from_frame as usize..=tag.to_frame as usize {
        let Some(frame) = doc.frames.get(i) else {
            return Err(ImportError::TagRange {
                clip: id,
                frame: i,
                frames: doc.frames.len(),
            });
        };
        if duration_ms == 0 {
            duration_ms = frame.duration_ms;
        } else if duration_ms != frame.duration_ms {
            warn!(
                "frame duration inconsistency for animation {id}: wanted {duration_ms}, got {}",
                frame.duration_ms
            );
        }
        frames.push(format!("img/{stem}_{i}.png"));
    }

    if duration_ms == 0 || duration_ms > 1000 {
        return Err(ImportError::InvalidFrameRate {
            clip: id,
            duration_ms,
        });
    }

    Ok(AnimationClip {
        id,
        frames,
        playback,
        fps: 1000 / duration_ms,
    })
}

// Scene extraction: projects decoded Aseprite documents into engine-facing
// elements, animation clips, tile placements and trigger volumes

mod anim;
mod element;
mod error;
mod geom;
mod layer;
mod raster;
mod scene;
mod sprite;
mod trigger;
mod ui;

pub use anim::{AnimationClip, Playback};
pub use element::{DataIndex, DataTable, SceneElement};
pub use error::ImportError;
pub use raster::Raster;
pub use scene::{LevelScene, extract_level};
pub use sprite::{SpriteDoc, extract_sprite};
pub use ui::{GuiScene, extract_gui};

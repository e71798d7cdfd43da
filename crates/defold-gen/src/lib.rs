// Defold asset encoders: atlas, tile map, GUI and collection descriptors
// in protobuf text form, Lua data modules, PNG blobs and the output sink.

mod atlas;
mod collection;
mod gui;
mod lua;
mod output;
mod pbtext;
mod png;
mod sprite;
mod tilemap;

pub use atlas::{animation_atlas, atlas};
pub use collection::collection;
pub use gui::gui;
pub use lua::{DATA_SCRIPT, data_lua, ink_lua, lua_quote, rows_lua};
pub use output::OutputDir;
pub use png::encode_png;
pub use sprite::sprite;
pub use tilemap::tilemap;

// Collection descriptor: a level's placed objects, trigger volumes and
// background tile map.

use import_core::{LevelScene, SceneElement};

use crate::pbtext::escape;
use crate::sprite::sprite;

const ROTATION: &str = "  rotation {\n    x: 0.0\n    y: 0.0\n    z: 0.0\n    w: 1.0\n  }\n";

/// Half-depth of trigger boxes; documents only author width and height.
const TRIGGER_HALF_DEPTH: i32 = 10;

/// Collection over a projected level. Rendered regions become embedded
/// objects with a sprite bound to the level atlas, markers become placed
/// instances of the prototype object of the same name, triggers become
/// embedded trigger boxes carrying their data-table index, and any tile
/// placements pull in the level's tile map.
pub fn collection(scene: &LevelScene) -> String {
    let mut chunks = vec![format!(
        "name: \"{}\"\nscale_along_z: 0",
        escape(&scene.name)
    )];
    for object in &scene.objects {
        if object.is_grouped() {
            chunks.push(region_instance(&scene.name, object));
        } else {
            chunks.push(marker_instance(object));
        }
    }
    for trigger in &scene.triggers {
        chunks.push(trigger_instance(trigger));
    }
    if !scene.tiles.is_empty() {
        chunks.push(tilemap_instance(&scene.name));
    }
    let mut out = chunks.join("\n\n");
    out.push('\n');
    out
}

fn region_instance(level: &str, object: &SceneElement) -> String {
    let components = format!(
        "embedded_components {{\n  id: \"sprite\"\n  type: \"sprite\"\n  data: \"{}\"\n}}\n",
        escape(&sprite(level, &object.name)),
    );
    embedded_instance(&object.name, &components, object.x, object.y)
}

fn marker_instance(object: &SceneElement) -> String {
    let id = if object.index == 0 {
        object.name.clone()
    } else {
        format!("{}_{}", object.name, object.index)
    };
    format!(
        "instances {{\n  id: \"{}\"\n  prototype: \"/game/objects/{}.go\"\n{}{}}}",
        escape(&id),
        escape(&object.name),
        position(object.x, object.y),
        ROTATION,
    )
}

const TRIGGER_SHAPE_HEAD: &str = r#"collision_shape: ""
type: COLLISION_OBJECT_TYPE_TRIGGER
mass: 0.0
friction: 0.0
restitution: 0.0
group: "trigger"
mask: "player"
embedded_collision_shape {
  shapes {
    shape_type: TYPE_BOX
    position {
      x: 0.0
      y: 0.0
      z: 0.0
    }
    rotation {
      x: 0.0
      y: 0.0
      z: 0.0
      w: 1.0
    }
    index: 0
    count: 3
  }
"#;

const TRIGGER_SHAPE_TAIL: &str = "}\nlinear_damping: 0.0\nangular_damping: 0.0\nlocked_rotation: false\n";

fn trigger_instance(trigger: &SceneElement) -> String {
    // Box shape data is its half extents; the projection already halved
    // the authored width and height.
    let shape = format!(
        "{TRIGGER_SHAPE_HEAD}  data: {}.0\n  data: {}.0\n  data: {TRIGGER_HALF_DEPTH}.0\n{TRIGGER_SHAPE_TAIL}",
        trigger.w, trigger.h,
    );
    let components = format!(
        "components {{\n  id: \"data\"\n  component: \"/import/data.script\"\n  properties {{\n    id: \"data\"\n    value: \"{}.0\"\n    type: PROPERTY_TYPE_NUMBER\n  }}\n}}\nembedded_components {{\n  id: \"trigger\"\n  type: \"collisionobject\"\n  data: \"{}\"\n}}\n",
        trigger.index,
        escape(&shape),
    );
    let id = format!("{}_{}", trigger.name, trigger.index);
    embedded_instance(&id, &components, trigger.x, trigger.y)
}

fn tilemap_instance(level: &str) -> String {
    let components = format!(
        "components {{\n  id: \"tilemap\"\n  component: \"/import/{}.tilemap\"\n}}\n",
        escape(level),
    );
    embedded_instance("tiles", &components, 0, 0)
}

fn embedded_instance(id: &str, data: &str, x: i32, y: i32) -> String {
    format!(
        "embedded_instances {{\n  id: \"{}\"\n  data: \"{}\"\n{}{}}}",
        escape(id),
        escape(data),
        position(x, y),
        ROTATION,
    )
}

fn position(x: i32, y: i32) -> String {
    format!("  position {{\n    x: {x}.0\n    y: {y}.0\n    z: 0.0\n  }}\n")
}

// GUI scene descriptor: one box node per projected element.

use import_core::{GuiScene, SceneElement};

use crate::pbtext::escape;

/// GUI scene over a projected screen. Each referenced atlas becomes a
/// texture entry, each element a top-left anchored box node in element
/// order. Textured nodes size themselves from the atlas image; bare
/// nodes keep their authored size.
pub fn gui(scene: &GuiScene) -> String {
    let mut chunks = vec!["script: \"\"".to_string()];
    for texture in &scene.textures {
        chunks.push(format!(
            "textures {{\n  name: \"{0}\"\n  texture: \"/import/{0}.atlas\"\n}}",
            escape(texture),
        ));
    }
    chunks.push("background_color {\n  x: 0.0\n  y: 0.0\n  z: 0.0\n  w: 0.0\n}".to_string());
    for element in &scene.elements {
        chunks.push(node(element));
    }
    chunks.push(
        "material: \"/builtins/materials/gui.material\"\nadjust_reference: ADJUST_REFERENCE_PARENT\nmax_nodes: 512"
            .to_string(),
    );
    let mut out = chunks.join("\n\n");
    out.push('\n');
    out
}

fn node(element: &SceneElement) -> String {
    let mut out = String::from("nodes {\n");
    let x = format!("{}.0", element.x);
    let y = format!("{}.0", element.y);
    let w = format!("{}.0", element.w);
    let h = format!("{}.0", element.h);
    out.push_str(&vec4("position", &x, &y, "0.0", "1.0"));
    out.push_str(&vec4("rotation", "0.0", "0.0", "0.0", "1.0"));
    out.push_str(&vec4("scale", "1.0", "1.0", "1.0", "1.0"));
    out.push_str(&vec4("size", &w, &h, "0.0", "1.0"));
    out.push_str(&vec4("color", "1.0", "1.0", "1.0", "1.0"));
    out.push_str("  type: TYPE_BOX\n  blend_mode: BLEND_MODE_ALPHA\n");
    if element.is_grouped() {
        out.push_str(&format!(
            "  texture: \"ui/{}_{}\"\n",
            escape(&element.group),
            escape(&element.name),
        ));
    } else {
        out.push_str("  texture: \"\"\n");
    }
    out.push_str(&format!("  id: \"{}\"\n", escape(&element.name)));
    out.push_str("  xanchor: XANCHOR_NONE\n  yanchor: YANCHOR_NONE\n  pivot: PIVOT_NW\n");
    out.push_str("  adjust_mode: ADJUST_MODE_FIT\n  layer: \"\"\n  inherit_alpha: true\n");
    out.push_str(&vec4("slice9", "0.0", "0.0", "0.0", "0.0"));
    out.push_str("  clipping_mode: CLIPPING_MODE_NONE\n  clipping_visible: true\n");
    out.push_str("  clipping_inverted: false\n  alpha: 1.0\n  template_node_child: false\n");
    out.push_str(if element.is_grouped() {
        "  size_mode: SIZE_MODE_AUTO\n"
    } else {
        "  size_mode: SIZE_MODE_MANUAL\n"
    });
    out.push_str("  custom_type: 0\n  enabled: true\n  visible: true\n}");
    out
}

fn vec4(label: &str, x: &str, y: &str, z: &str, w: &str) -> String {
    format!("  {label} {{\n    x: {x}\n    y: {y}\n    z: {z}\n    w: {w}\n  }}\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gui_scene_with_textured_node() {
        let scene = GuiScene {
            name: "title".into(),
            textures: vec!["ui".into()],
            elements: vec![SceneElement {
                group: "title".into(),
                name: "logo".into(),
                x: 20,
                y: 232,
                w: 16,
                h: 16,
                ..SceneElement::default()
            }],
            rasters: vec![],
        };
        let expected = r#"script: ""

textures {
  name: "ui"
  texture: "/import/ui.atlas"
}

background_color {
  x: 0.0
  y: 0.0
  z: 0.0
  w: 0.0
}

nodes {
  position {
    x: 20.0
    y: 232.0
    z: 0.0
    w: 1.0
  }
  rotation {
    x: 0.0
    y: 0.0
    z: 0.0
    w: 1.0
  }
  scale {
    x: 1.0
    y: 1.0
    z: 1.0
    w: 1.0
  }
  size {
    x: 16.0
    y: 16.0
    z: 0.0
    w: 1.0
  }
  color {
    x: 1.0
    y: 1.0
    z: 1.0
    w: 1.0
  }
  type: TYPE_BOX
  blend_mode: BLEND_MODE_ALPHA
  texture: "ui/title_logo"
  id: "logo"
  xanchor: XANCHOR_NONE
  yanchor: YANCHOR_NONE
  pivot: PIVOT_NW
  adjust_mode: ADJUST_MODE_FIT
  layer: ""
  inherit_alpha: true
  slice9 {
    x: 0.0
    y: 0.0
    z: 0.0
    w: 0.0
  }
  clipping_mode: CLIPPING_MODE_NONE
  clipping_visible: true
  clipping_inverted: false
  alpha: 1.0
  template_node_child: false
  size_mode: SIZE_MODE_AUTO
  custom_type: 0
  enabled: true
  visible: true
}

material: "/builtins/materials/gui.material"
adjust_reference: ADJUST_REFERENCE_PARENT
max_nodes: 512
"#;
        assert_eq!(gui(&scene), expected);
    }

    #[test]
    fn test_bare_node_keeps_authored_size() {
        let scene = GuiScene {
            name: "hud".into(),
            textures: vec!["ui".into(), "all".into()],
            elements: vec![SceneElement {
                name: "healthbar".into(),
                x: 4,
                y: 100,
                w: 40,
                h: 8,
                ..SceneElement::default()
            }],
            rasters: vec![],
        };
        let out = gui(&scene);
        assert!(out.contains("  texture: \"\"\n"));
        assert!(out.contains("  size_mode: SIZE_MODE_MANUAL\n"));
        assert!(out.contains("    x: 40.0\n    y: 8.0\n"));
        assert!(out.contains("texture: \"/import/ui.atlas\""));
        assert!(out.contains("texture: \"/import/all.atlas\""));
    }

    #[test]
    fn test_negative_position_renders_whole_valued() {
        let scene = GuiScene {
            name: "hud".into(),
            textures: vec![],
            elements: vec![SceneElement {
                name: "offscreen".into(),
                x: -5,
                y: 3,
                ..SceneElement::default()
            }],
            rasters: vec![],
        };
        let out = gui(&scene);
        assert!(out.contains("    x: -5.0\n    y: 3.0\n"));
    }
}

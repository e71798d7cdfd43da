use ase_model::Layer;

const OBJECT_SUFFIX: &str = ".object";

/// How a layer's cels project into the scene, decided once per layer.
///
/// A `.object` name suffix turns a layer into a marker layer: its content
/// yields named position markers instead of rendered output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayerRole {
    /// Rendered content, keyed by the full layer name.
    Visual(String),
    /// Named position markers, keyed by the layer name without the suffix.
    PointObject(String),
}

impl LayerRole {
    pub fn of(layer: &Layer) -> Self {
        match layer.name.strip_suffix(OBJECT_SUFFIX) {
            Some(base) => LayerRole::PointObject(base.to_string()),
            None => LayerRole::Visual(layer.name.clone()),
        }
    }
}

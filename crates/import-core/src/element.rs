/// A projected scene entity. Which fields are set depends on what it is:
/// rendered regions carry a group, a size and a raster of the same name;
/// position markers carry only a name and a position; tile placements
/// carry grid coordinates and a tile index; triggers carry everything
/// plus a data-table index.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SceneElement {
    /// Tile index, object ordinal or data-table index; 0 = none.
    pub index: i32,
    /// Grouping key for atlas and texture naming; empty = ungrouped.
    pub group: String,
    pub name: String,
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl SceneElement {
    /// Rendered regions are grouped; position markers and slice-derived
    /// elements are not.
    pub fn is_grouped(&self) -> bool {
        !self.group.is_empty()
    }
}

/// 1-based position of a row in the external data table.
pub type DataIndex = i32;

/// Append-only registry of names referenced from scene data. Rows are
/// addressed 1-based so an index is directly usable as a script property
/// value. One table spans every file in a run; the driver threads it
/// through the per-level calls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataTable {
    names: Vec<String>,
}

impl DataTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a name and return its 1-based index.
    pub fn push(&mut self, name: &str) -> DataIndex {
        self.names.push(name.to_string());
        self.names.len() as DataIndex
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_returns_one_based_index() {
        let mut table = DataTable::new();
        assert_eq!(table.push("spawn"), 1);
        assert_eq!(table.push("exit"), 2);
        assert_eq!(table.push("spawn"), 3);
        assert_eq!(table.names(), &["spawn", "exit", "spawn"]);
    }

    #[test]
    fn test_grouped() {
        let marker = SceneElement {
            name: "enemy".into(),
            ..SceneElement::default()
        };
        assert!(!marker.is_grouped());
        let region = SceneElement {
            group: "level1".into(),
            name: "bg".into(),
            ..SceneElement::default()
        };
        assert!(region.is_grouped());
    }
}

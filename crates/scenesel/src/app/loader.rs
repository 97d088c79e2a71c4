//! Scene file loading.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::app::scene::{ObjectKind, Scene, SceneObject};

/// On-disk representation of a scene.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct SceneFile {
    /// Display name; the file stem is used when absent.
    #[serde(default)]
    pub name: Option<String>,
    pub objects: Vec<ObjectRecord>,
}

/// Serializable representation of a [`SceneObject`]. Kinds are stored as
/// plain strings so files from other tools stay loadable.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ObjectRecord {
    pub name: String,
    #[serde(default = "ObjectRecord::default_kind")]
    pub kind: String,
    #[serde(default)]
    pub selected: bool,
}

impl ObjectRecord {
    fn default_kind() -> String {
        "mesh".into()
    }

    /// Convert the record into a live [`SceneObject`].
    pub fn into_object(self) -> SceneObject {
        SceneObject {
            name: self.name,
            kind: ObjectKind::parse(&self.kind),
            selected: self.selected,
        }
    }
}

/// Read a JSON scene file into a live [`Scene`].
///
/// Object order in the file is preserved. Duplicate names are kept (hosts
/// allow them) but flagged in the log since they make name selection harder
/// to reason about.
pub fn load_scene(path: &Path) -> Result<Scene> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read scene file: {}", path.display()))?;
    let file: SceneFile = serde_json::from_str(&data)
        .with_context(|| format!("invalid scene data in {}", path.display()))?;

    let name = file.name.unwrap_or_else(|| {
        path.file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_else(|| "scene".to_string())
    });

    let mut seen = HashSet::new();
    for record in &file.objects {
        if !seen.insert(record.name.as_str()) {
            tracing::warn!(name = %record.name, "duplicate object name in scene");
        }
    }

    let objects = file
        .objects
        .into_iter()
        .map(ObjectRecord::into_object)
        .collect();
    Ok(Scene::new(name, objects))
}

/// The scene used when no file is given: a handful of objects with the
/// name collisions that make select-by-name worth demonstrating.
pub fn demo_scene() -> Scene {
    Scene::new(
        "demo",
        vec![
            SceneObject::new("Cube", ObjectKind::Mesh),
            SceneObject::new("Cube.001", ObjectKind::Mesh),
            SceneObject::new("Sphere", ObjectKind::Mesh),
            SceneObject::new("Camera", ObjectKind::Camera),
            SceneObject::new("Light", ObjectKind::Light),
            SceneObject::new("Light.001", ObjectKind::Light),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    use tempfile::NamedTempFile;

    #[test]
    fn loads_objects_in_file_order() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "name": "set",
                "objects": [
                    {{"name": "Cube", "kind": "mesh"}},
                    {{"name": "Key Light", "kind": "light", "selected": true}},
                    {{"name": "Rig", "kind": "armature"}}
                ]
            }}"#
        )
        .unwrap();

        let scene = load_scene(file.path()).unwrap();
        assert_eq!(scene.name(), "set");
        assert_eq!(scene.objects().len(), 3);
        assert_eq!(scene.objects()[1].name, "Key Light");
        assert_eq!(scene.objects()[1].kind, ObjectKind::Light);
        assert!(scene.objects()[1].selected);
        assert!(!scene.objects()[0].selected);
    }

    #[test]
    fn unknown_kinds_map_to_other() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"objects": [{{"name": "Fluid", "kind": "volume"}}]}}"#
        )
        .unwrap();

        let scene = load_scene(file.path()).unwrap();
        assert_eq!(scene.objects()[0].kind, ObjectKind::Other);
    }

    #[test]
    fn missing_name_falls_back_to_file_stem() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stage.json");
        std::fs::write(&path, r#"{"objects": []}"#).unwrap();

        let scene = load_scene(&path).unwrap();
        assert_eq!(scene.name(), "stage");
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_scene(&dir.path().join("absent.json"));
        assert!(result.is_err());
    }

    #[test]
    fn invalid_json_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not a scene").unwrap();
        assert!(load_scene(file.path()).is_err());
    }

    #[test]
    fn demo_scene_starts_unselected() {
        let scene = demo_scene();
        assert!(scene.objects().len() > 3);
        assert_eq!(scene.selected_count(), 0);
    }
}

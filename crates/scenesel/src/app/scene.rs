//! Scene objects and the capability seam the selector operates through.

/// Broad object categories, used for display only. Matching never looks at
/// the kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ObjectKind {
    #[default]
    Mesh,
    Light,
    Camera,
    Curve,
    Armature,
    Empty,
    Other,
}

impl ObjectKind {
    /// Map a scene-file kind string onto a known category. Anything
    /// unrecognized becomes [`ObjectKind::Other`] rather than an error.
    pub fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "mesh" => ObjectKind::Mesh,
            "light" => ObjectKind::Light,
            "camera" => ObjectKind::Camera,
            "curve" => ObjectKind::Curve,
            "armature" => ObjectKind::Armature,
            "empty" => ObjectKind::Empty,
            _ => ObjectKind::Other,
        }
    }

    /// Short label shown next to object names in the outliner.
    pub fn label(&self) -> &'static str {
        match self {
            ObjectKind::Mesh => "mesh",
            ObjectKind::Light => "light",
            ObjectKind::Camera => "camera",
            ObjectKind::Curve => "curve",
            ObjectKind::Armature => "armature",
            ObjectKind::Empty => "empty",
            ObjectKind::Other => "other",
        }
    }
}

/// A named, selectable entity in the scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneObject {
    pub name: String,
    pub kind: ObjectKind,
    pub selected: bool,
}

impl SceneObject {
    pub fn new<S: Into<String>>(name: S, kind: ObjectKind) -> Self {
        Self {
            name: name.into(),
            kind,
            selected: false,
        }
    }
}

/// Narrow interface over a live object collection.
///
/// The selector depends only on this trait; any host binding that can
/// enumerate named objects and flip their selection flags qualifies.
pub trait ObjectSet {
    fn len(&self) -> usize;

    fn name_at(&self, index: usize) -> &str;

    fn is_selected(&self, index: usize) -> bool;

    fn set_selected(&mut self, index: usize, selected: bool);

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The in-tree object collection, populated by the loader and owned by the
/// UI shell for the lifetime of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scene {
    name: String,
    objects: Vec<SceneObject>,
}

impl Scene {
    pub fn new<S: Into<String>>(name: S, objects: Vec<SceneObject>) -> Self {
        Self {
            name: name.into(),
            objects,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn object(&self, index: usize) -> Option<&SceneObject> {
        self.objects.get(index)
    }

    /// Flip one object's selection flag. Out-of-range indices are ignored.
    pub fn toggle(&mut self, index: usize) {
        if let Some(object) = self.objects.get_mut(index) {
            object.selected = !object.selected;
        }
    }

    pub fn selected_count(&self) -> usize {
        self.objects.iter().filter(|object| object.selected).count()
    }

    /// Names of the selected objects in scene order.
    pub fn selected_names(&self) -> Vec<&str> {
        self.objects
            .iter()
            .filter(|object| object.selected)
            .map(|object| object.name.as_str())
            .collect()
    }
}

impl ObjectSet for Scene {
    fn len(&self) -> usize {
        self.objects.len()
    }

    fn name_at(&self, index: usize) -> &str {
        &self.objects[index].name
    }

    fn is_selected(&self, index: usize) -> bool {
        self.objects[index].selected
    }

    fn set_selected(&mut self, index: usize, selected: bool) {
        self.objects[index].selected = selected;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_and_ignores_out_of_range() {
        let mut scene = Scene::new(
            "test",
            vec![SceneObject::new("Cube", ObjectKind::Mesh)],
        );
        scene.toggle(0);
        assert!(scene.object(0).unwrap().selected);
        scene.toggle(5);
        assert_eq!(scene.selected_count(), 1);
    }

    #[test]
    fn kind_strings_parse_with_fallback() {
        assert_eq!(ObjectKind::parse("Light"), ObjectKind::Light);
        assert_eq!(ObjectKind::parse("ARMATURE"), ObjectKind::Armature);
        assert_eq!(ObjectKind::parse("volume"), ObjectKind::Other);
    }

    #[test]
    fn selected_names_preserve_scene_order() {
        let mut scene = Scene::new(
            "test",
            vec![
                SceneObject::new("Camera", ObjectKind::Camera),
                SceneObject::new("Cube", ObjectKind::Mesh),
                SceneObject::new("Light", ObjectKind::Light),
            ],
        );
        scene.set_selected(2, true);
        scene.set_selected(0, true);
        assert_eq!(scene.selected_names(), vec!["Camera", "Light"]);
    }
}

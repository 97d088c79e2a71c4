//! Applying name-fragment selection requests to a live object collection.

use crate::app::scene::ObjectSet;
use crate::domain::model::{SelectMode, SelectionRequest, SelectionReport};

/// Whether `name` contains `fragment`, ignoring case on both sides.
///
/// The empty fragment matches every name. Plain substring containment only:
/// no trimming, no wildcards.
pub fn fragment_matches(fragment: &str, name: &str) -> bool {
    name.to_lowercase().contains(&fragment.to_lowercase())
}

/// Applies [`SelectionRequest`]s to any [`ObjectSet`] in one linear pass.
#[derive(Debug, Default, Clone, Copy)]
pub struct Selector;

impl Selector {
    pub fn new() -> Self {
        Self
    }

    /// Walk every object once and set its selection flag per the request
    /// mode. Zero matches is a valid outcome, not an error.
    pub fn apply<S: ObjectSet>(
        &self,
        request: &SelectionRequest,
        objects: &mut S,
    ) -> SelectionReport {
        let needle = request.search_text.to_lowercase();
        let mut report = SelectionReport::default();

        for index in 0..objects.len() {
            let matched = objects.name_at(index).to_lowercase().contains(&needle);
            if matched {
                report.matched += 1;
            }

            let current = objects.is_selected(index);
            let target = match request.mode {
                SelectMode::Replace => matched,
                SelectMode::Add => matched || current,
                SelectMode::Remove => !matched && current,
            };

            if target != current {
                objects.set_selected(index, target);
                if target {
                    report.selected += 1;
                } else {
                    report.deselected += 1;
                }
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::app::scene::{ObjectKind, Scene, SceneObject};
    use crate::domain::model::SelectionRequest;

    fn scene(names: &[&str]) -> Scene {
        let objects = names
            .iter()
            .map(|name| SceneObject::new(*name, ObjectKind::Mesh))
            .collect();
        Scene::new("test", objects)
    }

    fn select(scene: &mut Scene, names: &[&str]) {
        for index in 0..ObjectSet::len(scene) {
            if names.contains(&scene.name_at(index)) {
                scene.set_selected(index, true);
            }
        }
    }

    #[test]
    fn replace_selects_matches_and_clears_the_rest() {
        let mut scene = scene(&["Cube", "Cube.001", "Sphere"]);
        select(&mut scene, &["Sphere"]);

        let report = Selector::new().apply(
            &SelectionRequest::new("cube", SelectMode::Replace),
            &mut scene,
        );

        assert_eq!(scene.selected_names(), vec!["Cube", "Cube.001"]);
        assert_eq!(report.matched, 2);
        assert_eq!(report.selected, 2);
        assert_eq!(report.deselected, 1);
    }

    #[test]
    fn add_keeps_prior_selection() {
        let mut scene = scene(&["Cube", "Cube.001", "Sphere"]);
        select(&mut scene, &["Sphere"]);

        Selector::new().apply(&SelectionRequest::new("cube", SelectMode::Add), &mut scene);

        assert_eq!(scene.selected_names(), vec!["Cube", "Cube.001", "Sphere"]);
    }

    #[test]
    fn remove_only_touches_matches() {
        let mut scene = scene(&["Cube", "Cube.001", "Sphere"]);
        select(&mut scene, &["Cube", "Sphere"]);

        Selector::new().apply(
            &SelectionRequest::new("cube", SelectMode::Remove),
            &mut scene,
        );

        assert_eq!(scene.selected_names(), vec!["Sphere"]);
    }

    #[test]
    fn empty_fragment_replaces_with_everything() {
        let mut scene = scene(&["Cube", "Sphere", "Camera"]);

        let report =
            Selector::new().apply(&SelectionRequest::new("", SelectMode::Replace), &mut scene);

        assert_eq!(scene.selected_count(), 3);
        assert_eq!(report.matched, 3);
    }

    #[test]
    fn matching_ignores_case_on_both_sides() {
        assert!(fragment_matches("CUBE", "my_cube"));
        assert!(fragment_matches("cube", "MY_CUBE"));
        assert_eq!(
            fragment_matches("CuBe", "Sphere"),
            fragment_matches("cube", "SPHERE")
        );
    }

    #[test]
    fn replace_is_idempotent() {
        let mut scene = scene(&["Cube", "Cube.001", "Sphere"]);
        let request = SelectionRequest::new("cube", SelectMode::Replace);
        let selector = Selector::new();

        selector.apply(&request, &mut scene);
        let once = scene.clone();
        let report = selector.apply(&request, &mut scene);

        assert_eq!(scene, once);
        assert_eq!(report.selected, 0);
        assert_eq!(report.deselected, 0);
    }

    #[test]
    fn add_then_remove_leaves_prior_minus_matches() {
        let mut scene = scene(&["Cube", "Cube.001", "Sphere", "Lamp"]);
        select(&mut scene, &["Sphere", "Cube"]);
        let selector = Selector::new();

        selector.apply(&SelectionRequest::new("cube", SelectMode::Add), &mut scene);
        selector.apply(
            &SelectionRequest::new("cube", SelectMode::Remove),
            &mut scene,
        );

        // Originally-selected non-matches survive, matches end unselected.
        assert_eq!(scene.selected_names(), vec!["Sphere"]);
    }

    #[test]
    fn zero_matches_is_a_no_op_under_add_and_remove() {
        let mut scene = scene(&["Cube", "Sphere"]);
        select(&mut scene, &["Sphere"]);
        let before = scene.clone();
        let selector = Selector::new();

        let added = selector.apply(&SelectionRequest::new("torus", SelectMode::Add), &mut scene);
        let removed = selector.apply(
            &SelectionRequest::new("torus", SelectMode::Remove),
            &mut scene,
        );

        assert_eq!(scene, before);
        assert_eq!(added.matched, 0);
        assert_eq!(removed.matched, 0);
    }

    #[test]
    fn zero_matches_under_replace_empties_the_selection() {
        let mut scene = scene(&["Cube", "Sphere"]);
        select(&mut scene, &["Cube", "Sphere"]);

        Selector::new().apply(
            &SelectionRequest::new("torus", SelectMode::Replace),
            &mut scene,
        );

        assert_eq!(scene.selected_count(), 0);
    }
}

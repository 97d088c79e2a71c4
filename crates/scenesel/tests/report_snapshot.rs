use insta::assert_snapshot;

use scenesel::app::loader::demo_scene;
use scenesel::app::selector::Selector;
use scenesel::domain::model::{SelectMode, SelectionRequest};

#[test]
fn light_replace_renders_stable_report() {
    let mut scene = demo_scene();
    let report = Selector::new().apply(
        &SelectionRequest::new("light", SelectMode::Replace),
        &mut scene,
    );

    let rendered = format!("{report}\n{}", scene.selected_names().join("\n"));
    assert_snapshot!("light_replace", rendered);
}

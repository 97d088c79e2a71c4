use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;

use scenesel::app::loader::{demo_scene, load_scene};
use scenesel::app::scene::Scene;
use scenesel::app::selector::Selector;
use scenesel::domain::model::SelectionRequest;
use scenesel::infra::config::Config;
use scenesel::ui::app::UiApp;

#[derive(Parser)]
#[command(author, version, about = "Scene outliner with select-by-name", long_about = None)]
struct Cli {
    /// JSON scene file to open; a built-in demo scene is used when omitted.
    scene: Option<PathBuf>,

    /// Select objects whose name contains FRAGMENT, print the resulting
    /// selection, and exit.
    #[arg(long, value_name = "FRAGMENT")]
    select: Option<String>,

    /// Add matches to the file's selection instead of replacing it.
    #[arg(long, requires = "select")]
    add: bool,

    /// Remove matches from the file's selection instead of replacing it.
    #[arg(long, requires = "select")]
    remove: bool,

    /// Print the scene's objects and exit.
    #[arg(long, conflicts_with = "select")]
    list: bool,

    /// Generate shell completions and exit.
    #[arg(long, value_enum, value_name = "SHELL")]
    completions: Option<Shell>,
}

fn main() -> Result<()> {
    scenesel::init();
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        let mut command = Cli::command();
        clap_complete::generate(shell, &mut command, "scenesel", &mut io::stdout());
        return Ok(());
    }

    let scene = match &cli.scene {
        Some(path) => load_scene(path)?,
        None => demo_scene(),
    };

    if cli.list {
        list_objects(&scene);
        return Ok(());
    }

    if let Some(fragment) = cli.select.as_deref() {
        return run_headless(scene, fragment, cli.add, cli.remove);
    }

    let config = Config::load()?;
    let mut app = UiApp::new(scene, config)?;
    app.run()
}

fn list_objects(scene: &Scene) {
    for object in scene.objects() {
        let marker = if object.selected { "*" } else { " " };
        println!("{marker} {} ({})", object.name, object.kind.label());
    }
}

fn run_headless(mut scene: Scene, fragment: &str, add: bool, remove: bool) -> Result<()> {
    let request = SelectionRequest::from_flags(fragment, add, remove)?;
    let report = Selector::new().apply(&request, &mut scene);
    for name in scene.selected_names() {
        println!("{name}");
    }
    eprintln!("{report}");
    Ok(())
}

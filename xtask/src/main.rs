use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;

#[derive(Parser)]
#[command(author, version, about = "Project automation commands", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run cargo nextest with default configuration
    Nextest {
        #[arg(long)]
        profile: Option<String>,
        #[arg(long)]
        release: bool,
    },
    /// Write sample scene files for manual runs and demos
    Fixtures {
        #[arg(long, default_value = "fixtures")]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Nextest { profile, release } => run_nextest(profile, release)?,
        Commands::Fixtures { out } => write_fixtures(&out)?,
    }
    Ok(())
}

fn run_nextest(profile: Option<String>, release: bool) -> Result<()> {
    let mut cmd = Command::new("cargo");
    cmd.arg("nextest").arg("run");
    if let Some(profile) = profile {
        cmd.arg("--profile").arg(profile);
    }
    if release {
        cmd.arg("--release");
    }
    let status = cmd.status()?;
    if !status.success() {
        anyhow::bail!("cargo nextest run failed");
    }
    Ok(())
}

fn write_fixtures(out: &Path) -> Result<()> {
    fs::create_dir_all(out)
        .with_context(|| format!("failed to create fixture directory {}", out.display()))?;

    let studio = json!({
        "name": "studio",
        "objects": [
            {"name": "Stage", "kind": "mesh"},
            {"name": "Stage.Floor", "kind": "mesh"},
            {"name": "Key Light", "kind": "light"},
            {"name": "Fill Light", "kind": "light"},
            {"name": "Rim Light", "kind": "light"},
            {"name": "Camera.Main", "kind": "camera"},
            {"name": "Camera.Closeup", "kind": "camera"},
            {"name": "Rig", "kind": "armature"}
        ]
    });

    let props = json!({
        "name": "props",
        "objects": [
            {"name": "Crate", "kind": "mesh"},
            {"name": "Crate.001", "kind": "mesh"},
            {"name": "Crate.002", "kind": "mesh", "selected": true},
            {"name": "Barrel", "kind": "mesh"},
            {"name": "Rope", "kind": "curve"},
            {"name": "Anchor", "kind": "empty"}
        ]
    });

    for (file, scene) in [("studio.json", &studio), ("props.json", &props)] {
        let path = out.join(file);
        fs::write(&path, serde_json::to_string_pretty(scene)?)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("wrote {}", path.display());
    }
    Ok(())
}

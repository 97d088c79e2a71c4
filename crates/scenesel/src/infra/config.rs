//! Configuration management utilities.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dirs_next::config_dir;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

static DEFAULT_CONFIG: Lazy<&'static str> =
    Lazy::new(|| include_str!("../../assets/default-config.toml"));
static DEFAULT_WORKSPACE_CONFIG_PATH: &str = ".scenesel/config.toml";

/// Layered configuration loaded from defaults, user, workspace, and env.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub defaults: Defaults,
    #[serde(default)]
    pub keybindings: Keybindings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Defaults {
    /// Show the kind label next to each object in the outliner.
    #[serde(default = "Defaults::default_show_kinds")]
    pub show_kinds: bool,
    /// Cap on the number of selected names listed in the summary panel.
    #[serde(default = "Defaults::default_summary_limit")]
    pub summary_limit: usize,
}

impl Defaults {
    fn default_show_kinds() -> bool {
        true
    }

    fn default_summary_limit() -> usize {
        20
    }
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            show_kinds: Self::default_show_kinds(),
            summary_limit: Self::default_summary_limit(),
        }
    }
}

/// Key chord strings, parsed by the UI layer at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keybindings {
    #[serde(default = "Keybindings::default_up")]
    pub up: String,
    #[serde(default = "Keybindings::default_down")]
    pub down: String,
    #[serde(default = "Keybindings::default_toggle")]
    pub toggle: String,
    #[serde(default = "Keybindings::default_select_by_name")]
    pub select_by_name: String,
    #[serde(default = "Keybindings::default_palette")]
    pub palette: String,
    #[serde(default = "Keybindings::default_quit")]
    pub quit: String,
}

impl Keybindings {
    fn default_up() -> String {
        "k".into()
    }

    fn default_down() -> String {
        "j".into()
    }

    fn default_toggle() -> String {
        "space".into()
    }

    fn default_select_by_name() -> String {
        "ctrl+shift+f".into()
    }

    fn default_palette() -> String {
        ":".into()
    }

    fn default_quit() -> String {
        "q".into()
    }
}

impl Default for Keybindings {
    fn default() -> Self {
        Self {
            up: Self::default_up(),
            down: Self::default_down(),
            toggle: Self::default_toggle(),
            select_by_name: Self::default_select_by_name(),
            palette: Self::default_palette(),
            quit: Self::default_quit(),
        }
    }
}

/// Environment overrides for critical settings.
#[derive(Debug, Default, Clone)]
pub struct EnvOverrides {
    select_chord: Option<String>,
    show_kinds: Option<bool>,
}

impl EnvOverrides {
    fn from_env() -> Self {
        Self {
            select_chord: env::var("SCENESEL_SELECT_CHORD").ok(),
            show_kinds: env::var("SCENESEL_SHOW_KINDS")
                .ok()
                .and_then(|value| parse_bool(&value)),
        }
    }

    #[cfg(test)]
    fn for_tests(select_chord: &str, show_kinds: bool) -> Self {
        Self {
            select_chord: Some(select_chord.to_owned()),
            show_kinds: Some(show_kinds),
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}

impl Config {
    /// Load configuration from defaults, user/global config, workspace
    /// config, and env overrides.
    pub fn load() -> Result<Self> {
        let env = EnvOverrides::from_env();
        let global = global_config_path();
        let workspace = workspace_config_path()?;
        Self::load_with_layers(global, workspace, env)
    }

    fn load_with_layers(
        global: Option<PathBuf>,
        workspace: Option<PathBuf>,
        env_overrides: EnvOverrides,
    ) -> Result<Self> {
        let mut layers: Vec<Config> = Vec::new();

        layers.push(Self::from_str(&DEFAULT_CONFIG)?);

        if let Some(global_path) = global.filter(|path| path.exists()) {
            layers.push(Self::from_file(&global_path)?);
        }

        if let Some(workspace_path) = workspace.filter(|path| path.exists()) {
            layers.push(Self::from_file(&workspace_path)?);
        }

        let merged = layers.into_iter().reduce(Config::merge).unwrap_or_default();
        Ok(apply_env_overrides(merged, env_overrides))
    }

    fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_str(&data)
    }

    fn from_str(contents: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(contents).with_context(|| "failed to parse TOML config".to_string())?;
        Ok(config)
    }

    fn merge(self, other: Self) -> Self {
        Self {
            defaults: merge_defaults(self.defaults, other.defaults),
            keybindings: merge_keybindings(self.keybindings, other.keybindings),
        }
    }
}

fn merge_defaults(base: Defaults, overlay: Defaults) -> Defaults {
    Defaults {
        show_kinds: if overlay.show_kinds != Defaults::default_show_kinds() {
            overlay.show_kinds
        } else {
            base.show_kinds
        },
        summary_limit: if overlay.summary_limit != Defaults::default_summary_limit() {
            overlay.summary_limit
        } else {
            base.summary_limit
        },
    }
}

fn merge_keybindings(base: Keybindings, overlay: Keybindings) -> Keybindings {
    Keybindings {
        up: choose_keybinding(base.up, overlay.up, Keybindings::default_up),
        down: choose_keybinding(base.down, overlay.down, Keybindings::default_down),
        toggle: choose_keybinding(base.toggle, overlay.toggle, Keybindings::default_toggle),
        select_by_name: choose_keybinding(
            base.select_by_name,
            overlay.select_by_name,
            Keybindings::default_select_by_name,
        ),
        palette: choose_keybinding(base.palette, overlay.palette, Keybindings::default_palette),
        quit: choose_keybinding(base.quit, overlay.quit, Keybindings::default_quit),
    }
}

fn choose_keybinding(base: String, overlay: String, default_fn: fn() -> String) -> String {
    if overlay != default_fn() {
        overlay
    } else {
        base
    }
}

fn global_config_path() -> Option<PathBuf> {
    config_dir().map(|base| base.join("scenesel/config.toml"))
}

fn workspace_config_path() -> Result<Option<PathBuf>> {
    let cwd = env::current_dir()?;
    let root = find_repo_root(&cwd).unwrap_or(cwd);
    Ok(Some(root.join(DEFAULT_WORKSPACE_CONFIG_PATH)))
}

fn find_repo_root(start: &Path) -> Option<PathBuf> {
    let mut current = start;
    loop {
        if current.join(".git").exists() {
            return Some(current.to_path_buf());
        }
        match current.parent() {
            Some(parent) => current = parent,
            None => return None,
        }
    }
}

fn apply_env_overrides(mut config: Config, env: EnvOverrides) -> Config {
    if let Some(chord) = env.select_chord {
        config.keybindings.select_by_name = chord;
    }
    if let Some(show_kinds) = env.show_kinds {
        config.defaults.show_kinds = show_kinds;
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_uses_defaults_when_no_files() {
        let config = Config::load_with_layers(None, None, EnvOverrides::default())
            .expect("load default config");
        assert!(config.defaults.show_kinds);
        assert_eq!(config.keybindings.select_by_name, "ctrl+shift+f");
        assert_eq!(config.keybindings.up, "k");
    }

    #[test]
    fn merge_global_and_workspace() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let global = temp.path().join("config.toml");
        fs::write(
            &global,
            r#"
[keybindings]
select_by_name = "ctrl+alt+s"
"#,
        )?;

        let workspace_dir = temp.path().join("repo");
        fs::create_dir_all(workspace_dir.join(".scenesel"))?;
        fs::create_dir_all(workspace_dir.join(".git"))?;
        fs::write(
            workspace_dir.join(".scenesel/config.toml"),
            r#"
[defaults]
summary_limit = 5
"#,
        )?;

        let global_path = Some(global);
        let workspace_path = Some(workspace_dir.join(".scenesel/config.toml"));

        let config =
            Config::load_with_layers(global_path, workspace_path, EnvOverrides::default())?;

        assert_eq!(config.keybindings.select_by_name, "ctrl+alt+s");
        assert_eq!(config.defaults.summary_limit, 5);
        assert!(config.defaults.show_kinds);

        Ok(())
    }

    #[test]
    fn env_overrides_take_precedence() -> Result<()> {
        let overrides = EnvOverrides::for_tests("f2", false);
        let config = Config::load_with_layers(None, None, overrides)?;
        assert_eq!(config.keybindings.select_by_name, "f2");
        assert!(!config.defaults.show_kinds);
        Ok(())
    }

    #[test]
    fn invalid_config_returns_error() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let file = temp.path().join("broken.toml");
        fs::write(&file, "this is not toml")?;
        let result = Config::from_file(&file);
        assert!(result.is_err());
        Ok(())
    }

    #[test]
    fn bool_env_values_parse_loosely() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}

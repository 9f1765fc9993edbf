// Runtime configuration.
// Defaults -> optional TOML file (LIGHTING_CONFIG) -> environment overrides.
// Visual: window size, frame pacing, which scene is shown, and how blocky the soft light looks.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Path of an optional TOML config file.
pub const CONFIG_PATH_VAR: &str = "LIGHTING_CONFIG";
/// Presence alone turns vsync (60 FPS pacing) on.
pub const VSYNC_VAR: &str = "USE_VSYNC";
/// Pin one scene by index instead of cycling.
pub const SCENE_VAR: &str = "SCENE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub window_width: usize,
    pub window_height: usize,
    pub vsync: bool,
    /// `None` cycles through every scene.
    pub scene: Option<usize>,
    /// How long each scene stays up while cycling.
    pub scene_ttl_ms: u32,
    /// Soft-light mask cell size in pixels.
    pub mask_grid_size: u32,
    pub show_hud: bool,
    /// Where P-key snapshots go.
    pub snapshot_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window_width: 1920,
            window_height: 1080,
            vsync: false,
            scene: None,
            scene_ttl_ms: 1000,
            mask_grid_size: 16,
            show_hud: true,
            snapshot_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Load from the process environment.
    pub fn load() -> Result<Self, Error> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Load with an injectable environment lookup.
    pub fn load_with(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let mut config = match lookup(CONFIG_PATH_VAR) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };
        config.apply_env(&lookup)?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))
    }

    pub fn from_toml_str(text: &str) -> Result<Self, Error> {
        toml::from_str(text).map_err(|e: toml::de::Error| Error::Config(e.to_string()))
    }

    /// Environment wins over the file.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<(), Error> {
        if lookup(VSYNC_VAR).is_some() {
            self.vsync = true;
        }
        if let Some(raw) = lookup(SCENE_VAR) {
            let ix = raw
                .trim()
                .parse::<usize>()
                .map_err(|e| Error::Config(format!("{SCENE_VAR}={raw:?}: {e}")))?;
            self.scene = Some(ix);
        }
        Ok(())
    }

    /// Reject values the frame loop cannot work with.
    pub fn validate(&self, scene_count: usize) -> Result<(), Error> {
        if self.window_width == 0 || self.window_height == 0 {
            return Err(Error::Config(format!(
                "window must be non-empty, got {}x{}",
                self.window_width, self.window_height
            )));
        }
        if self.scene_ttl_ms == 0 {
            return Err(Error::Config("scene_ttl_ms must be positive".into()));
        }
        if self.mask_grid_size == 0 {
            return Err(Error::Config("mask_grid_size must be positive".into()));
        }
        if let Some(ix) = self.scene {
            if ix >= scene_count {
                return Err(Error::Config(format!(
                    "scene {ix} out of range (have {scene_count})"
                )));
            }
        }
        Ok(())
    }
}

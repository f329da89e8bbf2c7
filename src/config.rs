//! Application configuration.
//!
//! Every field has a default, so an empty or missing file yields the stock
//! scene: a 1280x720 window showing Tower C by day under Phong shading.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{
    camera::{ProjectionKind, ViewPreset},
    controls::FrameConfig,
    models::{Building, burj::BurjAssets},
    pipelines::LightingModel,
};

/// File looked up in the working directory when `SKYLINE_CONFIG` is unset.
pub const DEFAULT_FILE: &str = "skyline.toml";
pub const PATH_VAR: &str = "SKYLINE_CONFIG";

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            title: "Skyline".to_string(),
        }
    }
}

/// Texture file names, relative to the asset directory.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct TextureConfig {
    pub willis: String,
    pub empire: String,
    pub burj: String,
    pub floor: String,
    pub burj_base: String,
    pub burj_pylon: String,
}

impl Default for TextureConfig {
    fn default() -> Self {
        Self {
            willis: "dice2.png".to_string(),
            empire: "dice3.png".to_string(),
            burj: "dice4.png".to_string(),
            floor: "grass.png".to_string(),
            burj_base: "burj_base.png".to_string(),
            burj_pylon: "burj_pylon.png".to_string(),
        }
    }
}

impl TextureConfig {
    pub fn for_building(&self, building: Building) -> &str {
        match building {
            Building::WillisTower => &self.willis,
            Building::EmpireState => &self.empire,
            Building::BurjAlArab => &self.burj,
        }
    }
}

/// What is on screen when the application starts.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct StartConfig {
    pub lighting: LightingModel,
    pub building: Building,
    pub view: ViewPreset,
    pub projection: ProjectionKind,
    pub day: bool,
}

impl Default for StartConfig {
    fn default() -> Self {
        Self {
            lighting: LightingModel::Phong,
            building: Building::BurjAlArab,
            view: ViewPreset::OrbitLevel,
            projection: ProjectionKind::Perspective,
            day: true,
        }
    }
}

impl StartConfig {
    pub fn frame_config(&self) -> FrameConfig {
        FrameConfig {
            lighting: self.lighting,
            projection: self.projection,
            view: self.view,
            building: self.building,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub asset_dir: PathBuf,
    pub textures: TextureConfig,
    /// Auxiliary mesh of Tower C, OFF or OBJ.
    pub burj_mesh: String,
    pub start: StartConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            asset_dir: PathBuf::from("assets"),
            textures: TextureConfig::default(),
            burj_mesh: "burj_base.off".to_string(),
            start: StartConfig::default(),
        }
    }
}

impl Config {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Reads `$SKYLINE_CONFIG` if set, else `skyline.toml` if it exists, else
    /// falls back to the defaults.
    pub fn load() -> Result<Self, ConfigError> {
        if let Some(path) = std::env::var_os(PATH_VAR) {
            log::info!("loading configuration from {:?}", path);
            return Self::load_from_file(Path::new(&path));
        }
        let path = Path::new(DEFAULT_FILE);
        if path.exists() {
            log::info!("loading configuration from {}", DEFAULT_FILE);
            Self::load_from_file(path)
        } else {
            log::info!("no {} found, using defaults", DEFAULT_FILE);
            Ok(Self::default())
        }
    }

    pub fn burj_assets(&self) -> BurjAssets {
        BurjAssets {
            mesh: self.burj_mesh.clone(),
            base_texture: self.textures.burj_base.clone(),
            pylon_texture: self.textures.burj_pylon.clone(),
        }
    }
}

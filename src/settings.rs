use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use tracing::{error, info};

use gridlink_coord::{GridError, GridPoint, GridSpace, Rounding, SnapMode, WorldPosition};

use crate::script::Step;

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";
const ENV_PREFIX: &str = "GRIDLINK";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub grid: GridSettings,
    pub entity: EntitySettings,
    #[serde(default)]
    pub snap_mode: SnapMode,
    #[serde(default)]
    pub goal: [i32; 2],
    #[serde(default)]
    pub script: Vec<Step>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GridSettings {
    pub cell_size: f64,
    #[serde(default)]
    pub rounding: Rounding,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EntitySettings {
    pub name: String,
    pub position: [f64; 3],
}

impl Settings {
    pub fn goal(&self) -> GridPoint {
        GridPoint::new(self.goal[0], self.goal[1])
    }
}

impl GridSettings {
    /// Builds the grid space, rejecting a non-positive cell size.
    pub fn space(&self) -> Result<GridSpace, GridError> {
        Ok(GridSpace::new(self.cell_size)?.with_rounding(self.rounding))
    }
}

impl EntitySettings {
    pub fn position(&self) -> WorldPosition {
        WorldPosition::from(self.position)
    }
}

/// Loads settings from a TOML file, with `GRIDLINK__*` environment overrides.
pub fn load_settings(path: &str) -> Result<Settings, ConfigError> {
    info!("Attempting to load configuration from {}", path);

    let settings = Config::builder()
        .add_source(File::new(path, FileFormat::Toml).required(true))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .and_then(|config| config.try_deserialize::<Settings>());

    match settings {
        Ok(settings) => {
            info!(
                cell_size = settings.grid.cell_size,
                rounding = ?settings.grid.rounding,
                steps = settings.script.len(),
                "Successfully loaded configuration"
            );
            Ok(settings)
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            Err(e)
        }
    }
}

#[cfg(test)]
pub(crate) fn parse_settings(toml: &str) -> Result<Settings, ConfigError> {
    Config::builder()
        .add_source(File::from_str(toml, FileFormat::Toml))
        .build()?
        .try_deserialize()
}

use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use tracing::{error, info};

use seeker_navigation::ControllerConfig;
use seeker_vision::VisionConfig;

const DEFAULT_CONFIG_PATH: &str = "config/default.toml";
const CONFIG_PATH_VAR: &str = "SEEKER_CONFIG";
const ENV_PREFIX: &str = "SEEKER";

/// Robot start pose and geometry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RobotConfig {
    pub start_x: f64,
    pub start_y: f64,
    /// Radians.
    pub start_heading: f64,
    /// Distance between the wheels (px).
    pub wheel_base: f64,
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            start_x: 50.0,
            start_y: 250.0,
            start_heading: 0.0,
            wheel_base: 20.0,
        }
    }
}

/// Control loop timing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Seconds per control step.
    pub dt: f64,
    /// Step budget before the run is reported as exhausted.
    pub max_steps: usize,
    /// Log progress every this many steps; 0 disables it.
    pub progress_interval: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            dt: 0.1,
            max_steps: 300,
            progress_interval: 25,
        }
    }
}

/// World image source. Without `image_path` a world is synthesized.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub image_path: Option<PathBuf>,
    pub width: u32,
    pub height: u32,
    pub goal_x: i32,
    pub goal_y: i32,
    pub goal_radius: i32,
    pub start_marker_radius: i32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            image_path: None,
            width: 500,
            height: 500,
            goal_x: 400,
            goal_y: 400,
            goal_radius: 20,
            start_marker_radius: 10,
        }
    }
}

/// What to write after a run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
    pub write_trajectory: bool,
    pub write_overlay: bool,
    pub write_mask: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("results"),
            write_trajectory: true,
            write_overlay: true,
            write_mask: false,
        }
    }
}

/// Complete application configuration.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct SeekerConfig {
    pub robot: RobotConfig,
    pub sim: SimConfig,
    pub controller: ControllerConfig,
    pub vision: VisionConfig,
    pub world: WorldConfig,
    pub output: OutputConfig,
}

/// Loads the configuration from built-in defaults, the TOML file and `SEEKER__*` variables.
///
/// The file is `config/default.toml` unless `SEEKER_CONFIG` names another one,
/// in which case it must exist.
pub fn load_config() -> Result<SeekerConfig, ConfigError> {
    let (path, required) = match std::env::var(CONFIG_PATH_VAR) {
        Ok(p) => (p, true),
        Err(_) => (DEFAULT_CONFIG_PATH.to_string(), false),
    };
    info!(path = %path, required, "Attempting to load configuration");

    let settings = Config::builder()
        .add_source(File::new(&path, FileFormat::Toml).required(required))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .and_then(|c| c.try_deserialize::<SeekerConfig>());

    match settings {
        Ok(config) => {
            info!(?config, "Successfully loaded configuration");
            Ok(config)
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            Err(e)
        }
    }
}

/// Parses a configuration from a TOML string layered over the defaults.
#[cfg(test)]
pub fn from_toml(toml: &str) -> Result<SeekerConfig, ConfigError> {
    Config::builder()
        .add_source(File::from_str(toml, FileFormat::Toml))
        .build()?
        .try_deserialize()
}

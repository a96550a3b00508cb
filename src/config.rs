//! Named tuning values. Every field has a default so a config file only needs
//! to list what it overrides.

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Environment variable naming the config file to load.
pub const CONFIG_ENV: &str = "TILE_RUNNER_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "tile_runner.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Added to `vy` every frame, grounded or not.
    pub gravity: f32,
    pub player_speed: f32,
    /// Vertical velocity set by a jump (negative is up).
    pub jump_force: f32,
    pub enemy_speed: f32,
    /// Vertical velocity given to the player after a stomp.
    pub stomp_bounce: f32,
    /// How far below an enemy's centre the player's feet may be and still stomp.
    pub stomp_tolerance: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 0.8,
            player_speed: 5.0,
            jump_force: -16.0,
            enemy_speed: 2.0,
            stomp_bounce: -10.0,
            stomp_tolerance: 15.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub width: f32,
    pub small_height: f32,
    pub big_height: f32,
    pub spawn_x: f32,
    pub spawn_y: f32,
    pub star_seconds: u32,
    pub mercy_seconds: u32,
    pub mushroom_score: u32,
    pub star_score: u32,
    pub stomp_score: u32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            width: 40.0,
            small_height: 50.0,
            big_height: 80.0,
            spawn_x: 100.0,
            spawn_y: 100.0,
            star_seconds: 10,
            mercy_seconds: 2,
            mushroom_score: 100,
            star_score: 500,
            stomp_score: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    pub tile_size: f32,
    pub rows: usize,
    pub base_width: usize,
    /// Extra columns per level number.
    pub width_step: usize,
    /// Number of bottom rows whose last column holds the flag.
    pub flag_rows: usize,
    pub pipe_chance: f64,
    pub enemy_chance: f64,
    pub mushroom_chance: f64,
    pub star_chance: f64,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            tile_size: 50.0,
            rows: 12,
            base_width: 30,
            width_step: 5,
            flag_rows: 3,
            pipe_chance: 0.02,
            enemy_chance: 0.03,
            mushroom_chance: 0.03,
            star_chance: 0.02,
        }
    }
}

/// What happens to the player when a level is cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CarryOver {
    /// Score, size and invincibility survive into the next level.
    Persist,
    /// A fresh player starts every level.
    Reset,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub fps: u32,
    pub view_width: f32,
    pub view_height: f32,
    /// Width of the trailing region that counts as reaching the flag.
    pub finish_zone: f32,
    pub carry_over: CarryOver,
    /// Fixed seed for level generation. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            fps: 60,
            view_width: 800.0,
            view_height: 600.0,
            finish_zone: 250.0,
            carry_over: CarryOver::Persist,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Ring the terminal bell for jump, stomp, power-up and hit cues.
    pub bell: bool,
}

/// Top-level game configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub physics: PhysicsConfig,
    pub player: PlayerConfig,
    pub level: LevelConfig,
    pub session: SessionConfig,
    pub audio: AudioConfig,
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Config, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Config::from_toml_str(&content)
    }

    /// Load the file named by `TILE_RUNNER_CONFIG` (or `tile_runner.toml`).
    /// Falls back to defaults if the file is missing or unusable.
    pub fn load_or_default() -> Config {
        let explicit = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        Config::load_or_default_from(explicit.as_deref())
    }

    /// Load `path`, or `tile_runner.toml` when `None`. Only a missing default
    /// file falls back quietly; every other failure is logged.
    pub fn load_or_default_from(path: Option<&Path>) -> Config {
        let target = path.unwrap_or(Path::new(DEFAULT_CONFIG_PATH));
        match Config::load(target) {
            Ok(config) => {
                tracing::info!("loaded config from {}", target.display());
                config
            }
            Err(ConfigError::Io { ref source, .. })
                if path.is_none() && source.kind() == io::ErrorKind::NotFound =>
            {
                Config::default()
            }
            Err(e) => {
                tracing::warn!("{e}, using defaults");
                Config::default()
            }
        }
    }

    /// Frames of invincibility granted by a star.
    pub fn star_frames(&self) -> u32 {
        self.player.star_seconds.saturating_mul(self.session.fps)
    }

    /// Frames of invincibility granted after shrinking from a hit.
    pub fn mercy_frames(&self) -> u32 {
        self.player.mercy_seconds.saturating_mul(self.session.fps)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
            if value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be positive, got {value}"),
                })
            }
        }
        fn chance(field: &'static str, value: f64) -> Result<(), ConfigError> {
            if (0.0..=1.0).contains(&value) {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be within [0, 1], got {value}"),
                })
            }
        }

        positive("level.tile_size", self.level.tile_size)?;
        positive("player.width", self.player.width)?;
        positive("player.small_height", self.player.small_height)?;
        positive("session.view_width", self.session.view_width)?;
        positive("session.view_height", self.session.view_height)?;
        chance("level.pipe_chance", self.level.pipe_chance)?;
        chance("level.enemy_chance", self.level.enemy_chance)?;
        chance("level.mushroom_chance", self.level.mushroom_chance)?;
        chance("level.star_chance", self.level.star_chance)?;

        if self.player.big_height < self.player.small_height {
            return Err(ConfigError::Invalid {
                field: "player.big_height",
                reason: "must not be smaller than player.small_height".to_string(),
            });
        }
        if self.session.fps == 0 {
            return Err(ConfigError::Invalid {
                field: "session.fps",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.level.rows == 0 {
            return Err(ConfigError::Invalid {
                field: "level.rows",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.level.base_width == 0 {
            return Err(ConfigError::Invalid {
                field: "level.base_width",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.level.flag_rows == 0 {
            return Err(ConfigError::Invalid {
                field: "level.flag_rows",
                reason: "a level needs a flag".to_string(),
            });
        }
        for (field, seconds) in [
            ("player.star_seconds", self.player.star_seconds),
            ("player.mercy_seconds", self.player.mercy_seconds),
        ] {
            if seconds.checked_mul(self.session.fps).is_none() {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!(
                        "{seconds} s at {} fps does not fit in a frame counter",
                        self.session.fps
                    ),
                });
            }
        }
        Ok(())
    }
}

//! RON config loader
//!
//! Loads generator settings from external RON files, with fallback to the
//! built-in defaults.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::world::generation::{CellularSettings, DungeonConfig, NoiseSettings};

/// Settings for every generator, as stored in one profile file
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorProfile {
    pub dungeon: DungeonConfig,
    pub caves: CellularSettings,
    pub noise: NoiseSettings,
}

/// Load settings from a RON file. Missing fields take their defaults.
pub fn load_config<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    ron::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load settings, falling back to defaults if the file is missing or broken
pub fn load_or_default<T: DeserializeOwned + Default>(path: &Path) -> T {
    if !path.exists() {
        log::info!("No config at {:?}, using defaults", path);
        return T::default();
    }
    match load_config(path) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("{}: {}. Using defaults.", e, error_detail(&e));
            T::default()
        }
    }
}

/// Serialize settings to pretty RON
pub fn to_ron<T: Serialize>(value: &T) -> Result<String, ConfigError> {
    Ok(ron::ser::to_string_pretty(value, ron::ser::PrettyConfig::default())?)
}

/// Write settings to a RON file, creating parent directories as needed
pub fn save_config<T: Serialize>(value: &T, path: &Path) -> Result<(), ConfigError> {
    let content = to_ron(value)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, content).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Export the default profile for easy editing
pub fn export_default_profile(path: &Path) -> Result<(), ConfigError> {
    save_config(&GeneratorProfile::default(), path)
}

fn error_detail(error: &ConfigError) -> String {
    match std::error::Error::source(error) {
        Some(source) => source.to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::generation::{RoomShape, RoomStyle};
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("hollowgen-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let text = "(winding_chance: 0.5, rooms: (max_room_size: 9))";
        let config: DungeonConfig = ron::from_str(text).unwrap();
        assert_eq!(config.winding_chance, 0.5);
        assert_eq!(config.rooms.max_room_size, 9);
        assert_eq!(config.rooms.min_room_size, 3);
        assert_eq!(config.dead_end_removal_iterations, i32::MAX);
    }

    #[test]
    fn test_save_and_load_profile() {
        let mut profile = GeneratorProfile::default();
        profile.dungeon.rooms.styles = vec![
            RoomStyle::new(RoomShape::Rounded).with_weight(3),
            RoomStyle::new(RoomShape::Cross).with_value(0.25),
        ];
        profile.dungeon.random_connector_chance = 0.05;
        profile.noise.seed = 1031;

        let path = temp_path("profile.ron");
        save_config(&profile, &path).unwrap();
        let loaded: GeneratorProfile = load_config(&path).unwrap();
        assert_eq!(loaded, profile);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file() {
        let path = temp_path("does-not-exist.ron");
        let result: Result<DungeonConfig, _> = load_config(&path);
        assert!(matches!(result, Err(ConfigError::Read { .. })));
        assert_eq!(load_or_default::<DungeonConfig>(&path), DungeonConfig::default());
    }

    #[test]
    fn test_broken_file_falls_back() {
        let path = temp_path("broken.ron");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "(winding_chance: \"very\")").unwrap();
        let result: Result<DungeonConfig, _> = load_config(&path);
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
        assert_eq!(load_or_default::<DungeonConfig>(&path), DungeonConfig::default());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_export_default_profile() {
        let path = temp_path("nested/default.ron");
        export_default_profile(&path).unwrap();
        let loaded: GeneratorProfile = load_config(&path).unwrap();
        assert_eq!(loaded, GeneratorProfile::default());
        let _ = fs::remove_file(&path);
    }
}

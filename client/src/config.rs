use serde::{Deserialize, Serialize};
use tictactoe_common::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};
use tictactoe_common::games::tictactoe::Difficulty;

const CONFIG_FILE_NAME: &str = "tictactoe_config.yaml";

fn get_config_path() -> String {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(CONFIG_FILE_NAME).to_string_lossy().into_owned();
    }
    CONFIG_FILE_NAME.to_string()
}

pub type ClientConfigManager = ConfigManager<FileContentConfigProvider, Config, YamlConfigSerializer>;

pub fn get_config_manager(path: Option<&str>) -> ClientConfigManager {
    match path {
        Some(path) => ConfigManager::from_yaml_file(path),
        None => ConfigManager::from_yaml_file(&get_config_path()),
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Config {
    pub difficulty: Difficulty,
    pub human_name: String,
    pub computer_name: String,
    #[serde(default)]
    pub max_search_threads: Option<usize>,
    #[serde(default)]
    pub verbose: bool,
}

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        if self.human_name.trim().is_empty() || self.computer_name.trim().is_empty() {
            return Err("Player names must not be empty".to_string());
        }
        if self.max_search_threads == Some(0) {
            return Err("max_search_threads must be at least 1".to_string());
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Hard,
            human_name: "Human".to_string(),
            computer_name: "Computer".to_string(),
            max_search_threads: None,
            verbose: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tictactoe_common::ConfigError;
    use tictactoe_common::config::{ConfigContentProvider, ConfigSerializer};

    fn get_temp_file_path() -> String {
        let mut path = std::env::temp_dir();
        let random_number: u32 = rand::random();
        path.push(format!("temp_tictactoe_config_{}.yaml", random_number));
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_default_config_survives_yaml() {
        let default_config = Config::default();
        let serializer = YamlConfigSerializer::new();

        let serialized = serializer.serialize(&default_config).unwrap();
        let deserialized: Config = serializer.deserialize(&serialized).unwrap();

        assert_eq!(default_config, deserialized);
    }

    #[test]
    fn test_config_is_saved_and_loaded_through_file() {
        let config = Config {
            difficulty: Difficulty::Hardest,
            human_name: "Ada".to_string(),
            max_search_threads: Some(2),
            ..Config::default()
        };
        let file_path = get_temp_file_path();
        let manager = get_config_manager(Some(&file_path));

        manager.set_config(&config).unwrap();
        let reloaded = get_config_manager(Some(&file_path)).get_config().unwrap();
        let _ = std::fs::remove_file(&file_path);

        assert_eq!(config, reloaded);
    }

    #[test]
    fn test_missing_file_returns_default_config() {
        let manager = get_config_manager(Some("this_file_does_not_exist.yaml"));
        assert_eq!(manager.get_config().unwrap(), Config::default());
    }

    #[test]
    fn test_optional_fields_can_be_omitted() {
        let file_path = get_temp_file_path();
        let provider = FileContentConfigProvider::new(file_path.clone());
        provider
            .set_config_content("difficulty: Easy\nhuman_name: Bo\ncomputer_name: Rex\n")
            .unwrap();

        let loaded = get_config_manager(Some(&file_path)).get_config().unwrap();
        let _ = std::fs::remove_file(&file_path);

        assert_eq!(loaded.difficulty, Difficulty::Easy);
        assert_eq!(loaded.max_search_threads, None);
        assert!(!loaded.verbose);
    }

    #[test]
    fn test_invalid_config_cant_be_read() {
        let file_path = get_temp_file_path();
        let provider = FileContentConfigProvider::new(file_path.clone());
        provider
            .set_config_content("difficulty: Hard\nhuman_name: ''\ncomputer_name: Rex\n")
            .unwrap();

        let result = get_config_manager(Some(&file_path)).get_config();
        let _ = std::fs::remove_file(&file_path);

        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_invalid_config_cant_be_saved() {
        let config = Config {
            max_search_threads: Some(0),
            ..Config::default()
        };
        let manager = get_config_manager(Some(&get_temp_file_path()));
        assert!(manager.set_config(&config).is_err());
    }
}

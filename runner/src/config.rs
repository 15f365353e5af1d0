use serde::{Deserialize, Serialize};
use snake_engine::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};
use snake_engine::game::{BotKind, GameSettings};

pub const DEFAULT_CONFIG_FILE: &str = "snake_runner_config.yaml";

pub fn get_config_manager(path: &str) -> ConfigManager<FileContentConfigProvider, RunnerConfig, YamlConfigSerializer> {
    ConfigManager::from_yaml_file(path)
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct RunnerConfig {
    pub game: GameSettings,
    pub high_score_file: String,
    pub bot: BotKind,
    pub hud_every_ticks: u64,
    #[serde(default = "default_event_log_size")]
    pub event_log_size: usize,
}

fn default_event_log_size() -> usize {
    32
}

impl Validate for RunnerConfig {
    fn validate(&self) -> Result<(), String> {
        self.game.validate()?;
        if self.high_score_file.trim().is_empty() {
            return Err("high_score_file must not be empty".to_string());
        }
        if self.hud_every_ticks == 0 {
            return Err("hud_every_ticks must be greater than 0".to_string());
        }
        if self.event_log_size == 0 {
            return Err("event_log_size must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            game: GameSettings::default(),
            high_score_file: "snake_high_score.yaml".to_string(),
            bot: BotKind::Efficient,
            hud_every_ticks: 50,
            event_log_size: default_event_log_size(),
        }
    }
}

use std::sync::Mutex;

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};

pub trait HighScoreStore {
    fn load(&self) -> Result<u32, String>;
    fn persist(&self, value: u32) -> Result<(), String>;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HighScoreRecord {
    pub high_score: u32,
    pub achieved_at: Option<String>,
}

impl Validate for HighScoreRecord {
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

pub struct FileHighScoreStore {
    manager: ConfigManager<FileContentConfigProvider, HighScoreRecord, YamlConfigSerializer>,
}

impl FileHighScoreStore {
    pub fn new(file_path: &str) -> Self {
        Self {
            manager: ConfigManager::from_yaml_file(file_path),
        }
    }

    pub fn record(&self) -> Result<HighScoreRecord, String> {
        self.manager.get_config()
    }
}

impl HighScoreStore for FileHighScoreStore {
    fn load(&self) -> Result<u32, String> {
        Ok(self.manager.get_config()?.high_score)
    }

    fn persist(&self, value: u32) -> Result<(), String> {
        let record = HighScoreRecord {
            high_score: value,
            achieved_at: Some(Local::now().format("%Y-%m-%d %H:%M:%S").to_string()),
        };
        self.manager.set_config(&record)
    }
}

#[derive(Debug, Default)]
pub struct MemoryHighScoreStore {
    value: Mutex<u32>,
}

impl MemoryHighScoreStore {
    pub fn new(initial: u32) -> Self {
        Self {
            value: Mutex::new(initial),
        }
    }
}

impl HighScoreStore for MemoryHighScoreStore {
    fn load(&self) -> Result<u32, String> {
        self.value
            .lock()
            .map(|v| *v)
            .map_err(|_| "High score lock poisoned".to_string())
    }

    fn persist(&self, value: u32) -> Result<(), String> {
        let mut current = self
            .value
            .lock()
            .map_err(|_| "High score lock poisoned".to_string())?;
        *current = value;
        Ok(())
    }
}

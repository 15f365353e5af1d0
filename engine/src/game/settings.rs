use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::Validate;
use super::power_up::PowerUpKind;
use super::types::FieldSize;

pub const DEFAULT_FIELD_SIZE: u32 = 30;
pub const MIN_FIELD_SIZE: u32 = 5;
pub const MAX_FIELD_SIZE: u32 = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Extreme,
}

impl Difficulty {
    pub fn base_tick_interval(&self) -> Duration {
        let ms = match self {
            Difficulty::Easy => 150,
            Difficulty::Medium => 100,
            Difficulty::Hard => 75,
            Difficulty::Extreme => 50,
        };
        Duration::from_millis(ms)
    }
}

impl std::str::FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            "extreme" => Ok(Difficulty::Extreme),
            other => Err(format!("Unknown difficulty '{}'", other)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    Classic,
    TimeAttack,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectDurations {
    pub speed_ticks: u32,
    pub ghost_ticks: u32,
    pub magnet_ticks: u32,
    pub invincibility_ticks: u32,
}

impl EffectDurations {
    pub fn for_kind(&self, kind: PowerUpKind) -> u32 {
        match kind {
            PowerUpKind::Speed => self.speed_ticks,
            PowerUpKind::Ghost => self.ghost_ticks,
            PowerUpKind::Magnet => self.magnet_ticks,
            PowerUpKind::Invincibility => self.invincibility_ticks,
            PowerUpKind::Shrink => 0,
        }
    }
}

impl Default for EffectDurations {
    fn default() -> Self {
        Self {
            speed_ticks: 50,
            ghost_ticks: 40,
            magnet_ticks: 60,
            invincibility_ticks: 40,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub field_width: u32,
    pub field_height: u32,
    pub difficulty: Difficulty,
    pub mode: GameMode,
    pub time_limit_secs: u32,
    pub initial_length: u32,
    pub level_score_step: u32,
    pub level_speedup_ms: u32,
    pub min_tick_interval_ms: u32,
    pub max_power_ups: u32,
    pub power_up_spawn_probability: f32,
    pub power_up_lifetime_ticks: u32,
    pub effect_durations: EffectDurations,
    pub obstacles_per_level: u32,
    pub max_obstacles: u32,
    pub blink_period_ticks: u32,
    pub portal_unlock_level: u32,
    pub sound_enabled: bool,
}

impl GameSettings {
    pub fn field_size(&self) -> FieldSize {
        FieldSize::new(self.field_width, self.field_height)
    }

    pub fn min_tick_interval(&self) -> Duration {
        Duration::from_millis(self.min_tick_interval_ms as u64)
    }

    pub fn level_tick_interval(&self, level: u32) -> Duration {
        let base = self.difficulty.base_tick_interval();
        let speedup = Duration::from_millis(self.level_speedup_ms as u64 * level.saturating_sub(1) as u64);
        base.saturating_sub(speedup).max(self.min_tick_interval())
    }

    pub fn time_limit(&self) -> Option<Duration> {
        match self.mode {
            GameMode::Classic => None,
            GameMode::TimeAttack => Some(Duration::from_secs(self.time_limit_secs as u64)),
        }
    }

    pub fn target_obstacle_count(&self, level: u32) -> usize {
        (level.saturating_sub(1) * self.obstacles_per_level).min(self.max_obstacles) as usize
    }
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            field_width: DEFAULT_FIELD_SIZE,
            field_height: DEFAULT_FIELD_SIZE,
            difficulty: Difficulty::Medium,
            mode: GameMode::Classic,
            time_limit_secs: 120,
            initial_length: 1,
            level_score_step: 100,
            level_speedup_ms: 5,
            min_tick_interval_ms: 40,
            max_power_ups: 3,
            power_up_spawn_probability: 0.02,
            power_up_lifetime_ticks: 100,
            effect_durations: EffectDurations::default(),
            obstacles_per_level: 2,
            max_obstacles: 20,
            blink_period_ticks: 10,
            portal_unlock_level: 2,
            sound_enabled: true,
        }
    }
}

impl Validate for GameSettings {
    fn validate(&self) -> Result<(), String> {
        if !(MIN_FIELD_SIZE..=MAX_FIELD_SIZE).contains(&self.field_width) {
            return Err(format!(
                "Field width must be between {} and {}, got {}",
                MIN_FIELD_SIZE, MAX_FIELD_SIZE, self.field_width
            ));
        }
        if !(MIN_FIELD_SIZE..=MAX_FIELD_SIZE).contains(&self.field_height) {
            return Err(format!(
                "Field height must be between {} and {}, got {}",
                MIN_FIELD_SIZE, MAX_FIELD_SIZE, self.field_height
            ));
        }
        if self.initial_length < 1 || self.initial_length > self.field_width / 2 {
            return Err(format!(
                "Initial length must be between 1 and {}, got {}",
                self.field_width / 2,
                self.initial_length
            ));
        }
        if self.level_score_step == 0 {
            return Err("Level score step must be positive".to_string());
        }
        if self.min_tick_interval_ms < 10 {
            return Err(format!(
                "Minimum tick interval must be at least 10ms, got {}",
                self.min_tick_interval_ms
            ));
        }
        if self.max_power_ups > 10 {
            return Err(format!(
                "Max power-ups must be at most 10, got {}",
                self.max_power_ups
            ));
        }
        if !(0.0..=1.0).contains(&self.power_up_spawn_probability) {
            return Err("Power-up spawn probability must be between 0.0 and 1.0".to_string());
        }
        if self.power_up_lifetime_ticks == 0 {
            return Err("Power-up lifetime must be positive".to_string());
        }
        if self.blink_period_ticks == 0 {
            return Err("Blink period must be positive".to_string());
        }
        if self.mode == GameMode::TimeAttack && self.time_limit_secs == 0 {
            return Err("Time attack requires a positive time limit".to_string());
        }
        Ok(())
    }
}

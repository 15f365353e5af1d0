mod scheduler;

pub use scheduler::{ControlCommand, GameFrontend, TickScheduler};

use std::time::Duration;

use crate::game::{
    ActiveEffect, AchievementTracker, Difficulty, Direction, EndReason, GameSettings, GameState,
    SessionRng, TickEvent,
};
use crate::high_score::HighScoreStore;
use crate::log;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchStatus {
    NotStarted,
    Running,
    Paused,
    Ended(EndReason),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Hud {
    pub score: u32,
    pub high_score: u32,
    pub level: u32,
    pub length: usize,
    pub elapsed: Duration,
    pub effects: Vec<ActiveEffect>,
    pub status: MatchStatus,
}

impl Hud {
    pub fn time_label(&self) -> String {
        let total = self.elapsed.as_secs();
        format!("{:02}:{:02}", total / 60, total % 60)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MatchSummary {
    pub status: MatchStatus,
    pub final_score: u32,
    pub high_score: u32,
    pub level: u32,
    pub length: usize,
    pub ticks: u64,
    pub elapsed: Duration,
    pub achievements: usize,
}

pub struct GameSession<S: HighScoreStore> {
    settings: GameSettings,
    status: MatchStatus,
    state: Option<GameState>,
    rng: SessionRng,
    store: S,
    high_score: u32,
    achievements: AchievementTracker,
    elapsed: Duration,
}

impl<S: HighScoreStore> GameSession<S> {
    pub fn new(settings: GameSettings, rng: SessionRng, store: S) -> Self {
        let high_score = store.load().unwrap_or_else(|e| {
            log!("Failed to load high score: {}", e);
            0
        });

        Self {
            settings,
            status: MatchStatus::NotStarted,
            state: None,
            rng,
            store,
            high_score,
            achievements: AchievementTracker::new(),
            elapsed: Duration::ZERO,
        }
    }

    pub fn status(&self) -> MatchStatus {
        self.status
    }

    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn start(&mut self) -> Result<(), String> {
        match self.status {
            MatchStatus::NotStarted | MatchStatus::Ended(_) => {
                self.reset();
                Ok(())
            }
            MatchStatus::Running | MatchStatus::Paused => {
                Err("Match already in progress".to_string())
            }
        }
    }

    pub fn restart(&mut self) {
        self.reset();
    }

    pub fn toggle_pause(&mut self) -> Result<MatchStatus, String> {
        self.status = match self.status {
            MatchStatus::Running => MatchStatus::Paused,
            MatchStatus::Paused => MatchStatus::Running,
            other => return Err(format!("Cannot pause while {:?}", other)),
        };
        log!("Match {:?}", self.status);
        Ok(self.status)
    }

    pub fn request_direction(&mut self, direction: Direction) -> Result<(), String> {
        if self.status != MatchStatus::Running {
            return Err(format!("Cannot turn while {:?}", self.status));
        }
        match self.state.as_mut() {
            Some(state) => state.set_direction(direction),
            None => Err("No match in progress".to_string()),
        }
    }

    pub fn request_direction_vector(&mut self, dx: i32, dy: i32) -> Result<(), String> {
        let direction = Direction::from_vector(dx, dy)
            .ok_or_else(|| format!("({}, {}) is not a unit direction", dx, dy))?;
        self.request_direction(direction)
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.settings.difficulty = difficulty;
        if let Some(state) = self.state.as_mut() {
            state.set_difficulty(difficulty);
        }
        log!("Difficulty set to {:?}", difficulty);
    }

    pub fn set_sound_enabled(&mut self, enabled: bool) {
        self.settings.sound_enabled = enabled;
    }

    pub fn tick_interval(&self) -> Duration {
        match &self.state {
            Some(state) => state.tick_interval(),
            None => self.settings.level_tick_interval(1),
        }
    }

    pub fn tick(&mut self) -> Vec<TickEvent> {
        if self.status != MatchStatus::Running {
            return Vec::new();
        }
        let Some(state) = self.state.as_mut() else {
            return Vec::new();
        };

        let interval = state.tick_interval();
        let mut events = state.advance(None, &mut self.rng);
        self.elapsed += interval;

        if state.is_alive()
            && let Some(limit) = self.settings.time_limit()
            && self.elapsed >= limit
        {
            state.end_reason = Some(EndReason::TimeUp);
        }

        for achievement in self.achievements.observe(state, &events) {
            log!("Achievement unlocked: {}", achievement.title());
            events.push(TickEvent::AchievementUnlocked(achievement));
        }

        if let Some(reason) = state.end_reason {
            let final_score = state.score;
            events.push(self.end_match(reason, final_score));
        }

        events
    }

    pub fn hud(&self) -> Hud {
        let (score, level, length, effects) = match &self.state {
            Some(state) => (
                state.score,
                state.level,
                state.snake.len(),
                state.effects.iter().copied().collect(),
            ),
            None => (0, 1, 0, Vec::new()),
        };

        Hud {
            score,
            high_score: self.high_score,
            level,
            length,
            elapsed: self.elapsed,
            effects,
            status: self.status,
        }
    }

    pub fn summary(&self) -> MatchSummary {
        let hud = self.hud();
        MatchSummary {
            status: self.status,
            final_score: hud.score,
            high_score: self.high_score,
            level: hud.level,
            length: hud.length,
            ticks: self.state.as_ref().map_or(0, |s| s.tick),
            elapsed: self.elapsed,
            achievements: self.achievements.unlocked_count(),
        }
    }

    fn reset(&mut self) {
        self.state = Some(GameState::new(self.settings.clone(), &mut self.rng));
        self.achievements = AchievementTracker::new();
        self.elapsed = Duration::ZERO;
        self.status = MatchStatus::Running;
        log!(
            "Match started: {}x{} {:?} {:?}",
            self.settings.field_width,
            self.settings.field_height,
            self.settings.difficulty,
            self.settings.mode
        );
    }

    fn end_match(&mut self, reason: EndReason, final_score: u32) -> TickEvent {
        self.status = MatchStatus::Ended(reason);

        let new_record = final_score > self.high_score;
        if new_record {
            self.high_score = final_score;
            if let Err(e) = self.store.persist(final_score) {
                log!("Failed to persist high score: {}", e);
            }
        }
        log!(
            "Match ended: {:?}. Score: {}, high score: {}",
            reason,
            final_score,
            self.high_score
        );

        TickEvent::MatchEnded {
            reason,
            final_score,
            high_score: self.high_score,
            new_record,
        }
    }
}

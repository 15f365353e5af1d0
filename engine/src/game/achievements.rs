use std::collections::HashSet;

use super::events::TickEvent;
use super::food::FoodKind;
use super::game_state::GameState;

pub const POWER_HUNGRY_PICKUPS: u32 = 5;
pub const LONG_SNAKE_LENGTH: usize = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Achievement {
    FirstBite,
    GoldenTouch,
    Centurion,
    HighRoller,
    Veteran,
    LongSnake,
    PortalHopper,
    PowerHungry,
}

impl Achievement {
    pub fn title(&self) -> &'static str {
        match self {
            Achievement::FirstBite => "First Bite",
            Achievement::GoldenTouch => "Golden Touch",
            Achievement::Centurion => "Centurion",
            Achievement::HighRoller => "High Roller",
            Achievement::Veteran => "Veteran",
            Achievement::LongSnake => "Long Snake",
            Achievement::PortalHopper => "Portal Hopper",
            Achievement::PowerHungry => "Power Hungry",
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct AchievementTracker {
    unlocked: HashSet<Achievement>,
    power_ups_collected: u32,
}

impl AchievementTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_unlocked(&self, achievement: Achievement) -> bool {
        self.unlocked.contains(&achievement)
    }

    pub fn unlocked_count(&self) -> usize {
        self.unlocked.len()
    }

    pub fn observe(&mut self, state: &GameState, events: &[TickEvent]) -> Vec<Achievement> {
        let mut candidates = Vec::new();

        for event in events {
            match event {
                TickEvent::AteFood { kind, .. } => {
                    candidates.push(Achievement::FirstBite);
                    if *kind == FoodKind::Golden {
                        candidates.push(Achievement::GoldenTouch);
                    }
                }
                TickEvent::Teleported { .. } => candidates.push(Achievement::PortalHopper),
                TickEvent::CollectedPowerUp(_) => {
                    self.power_ups_collected += 1;
                    if self.power_ups_collected >= POWER_HUNGRY_PICKUPS {
                        candidates.push(Achievement::PowerHungry);
                    }
                }
                _ => {}
            }
        }

        if state.score >= 100 {
            candidates.push(Achievement::Centurion);
        }
        if state.score >= 500 {
            candidates.push(Achievement::HighRoller);
        }
        if state.level >= 5 {
            candidates.push(Achievement::Veteran);
        }
        if state.snake.len() >= LONG_SNAKE_LENGTH {
            candidates.push(Achievement::LongSnake);
        }

        candidates
            .into_iter()
            .filter(|a| self.unlocked.insert(*a))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameSettings, Point, SessionRng};

    fn create_state() -> GameState {
        let mut rng = SessionRng::new(1);
        GameState::new(GameSettings::default(), &mut rng)
    }

    #[test]
    fn test_first_bite_unlocks_once() {
        let state = create_state();
        let mut tracker = AchievementTracker::new();
        let events = vec![TickEvent::AteFood {
            kind: FoodKind::Normal,
            at: Point::new(1, 1),
            score_delta: 10,
        }];

        assert_eq!(tracker.observe(&state, &events), vec![Achievement::FirstBite]);
        assert!(tracker.observe(&state, &events).is_empty());
        assert!(tracker.is_unlocked(Achievement::FirstBite));
    }

    #[test]
    fn test_score_thresholds() {
        let mut state = create_state();
        let mut tracker = AchievementTracker::new();
        state.score = 520;

        let unlocked = tracker.observe(&state, &[]);
        assert!(unlocked.contains(&Achievement::Centurion));
        assert!(unlocked.contains(&Achievement::HighRoller));
        assert_eq!(tracker.unlocked_count(), 2);
    }

    #[test]
    fn test_power_hungry_needs_five_pickups() {
        let state = create_state();
        let mut tracker = AchievementTracker::new();
        let pickup = vec![TickEvent::CollectedPowerUp(crate::game::PowerUpKind::Speed)];

        for _ in 0..POWER_HUNGRY_PICKUPS - 1 {
            assert!(tracker.observe(&state, &pickup).is_empty());
        }
        assert_eq!(tracker.observe(&state, &pickup), vec![Achievement::PowerHungry]);
    }
}

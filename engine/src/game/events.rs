use super::achievements::Achievement;
use super::food::FoodKind;
use super::power_up::PowerUpKind;
use super::types::{CollisionKind, EndReason, Point};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TickEvent {
    AteFood {
        kind: FoodKind,
        at: Point,
        score_delta: i32,
    },
    FoodSpawned(Point),
    CollectedPowerUp(PowerUpKind),
    PowerUpSpawned(PowerUpKind, Point),
    PowerUpExpired(PowerUpKind),
    EffectEnded(PowerUpKind),
    Shrunk {
        removed: usize,
    },
    Teleported {
        from: Point,
        to: Point,
    },
    CollisionIgnored(CollisionKind),
    LeveledUp(u32),
    ObstacleSpawned(Point),
    PortalsOpened {
        a: Point,
        b: Point,
    },
    Died(EndReason),
    AchievementUnlocked(Achievement),
    MatchEnded {
        reason: EndReason,
        final_score: u32,
        high_score: u32,
        new_record: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Eat,
    Die,
    PowerUp,
    LevelUp,
    Portal,
}

impl TickEvent {
    pub fn sound_cue(&self) -> Option<SoundCue> {
        match self {
            TickEvent::AteFood { .. } => Some(SoundCue::Eat),
            TickEvent::CollectedPowerUp(_) => Some(SoundCue::PowerUp),
            TickEvent::Teleported { .. } => Some(SoundCue::Portal),
            TickEvent::LeveledUp(_) => Some(SoundCue::LevelUp),
            TickEvent::Died(_) => Some(SoundCue::Die),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, TickEvent::Died(_))
    }
}

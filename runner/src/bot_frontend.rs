use std::collections::HashMap;

use ringbuffer::{AllocRingBuffer, RingBuffer};
use snake_engine::game::{BotController, BotKind, Direction, GameState, SessionRng, SoundCue, TickEvent};
use snake_engine::log;
use snake_engine::session::{GameFrontend, Hud};

pub struct BotFrontend {
    kind: BotKind,
    rng: SessionRng,
    hud_every_ticks: u64,
    recent_events: AllocRingBuffer<String>,
    sound_counts: HashMap<SoundCue, u32>,
}

impl BotFrontend {
    pub fn new(kind: BotKind, rng: SessionRng, hud_every_ticks: u64, event_log_size: usize) -> Self {
        Self {
            kind,
            rng,
            hud_every_ticks: hud_every_ticks.max(1),
            recent_events: AllocRingBuffer::new(event_log_size.max(1)),
            sound_counts: HashMap::new(),
        }
    }

    pub fn recent_events(&self) -> impl Iterator<Item = &String> {
        self.recent_events.iter()
    }

    pub fn sound_count(&self, cue: SoundCue) -> u32 {
        self.sound_counts.get(&cue).copied().unwrap_or(0)
    }
}

impl GameFrontend for BotFrontend {
    fn render(&mut self, state: &GameState, hud: &Hud) {
        if state.tick % self.hud_every_ticks != 0 {
            return;
        }
        let effects: Vec<String> = hud
            .effects
            .iter()
            .map(|effect| format!("{:?}({})", effect.kind, effect.remaining_ticks))
            .collect();
        log!(
            "[{}] tick {} score {} (best {}) level {} length {} effects [{}]",
            hud.time_label(),
            state.tick,
            hud.score,
            hud.high_score,
            hud.level,
            hud.length,
            effects.join(", ")
        );
    }

    fn play_sound(&mut self, cue: SoundCue) {
        *self.sound_counts.entry(cue).or_insert(0) += 1;
    }

    fn on_events(&mut self, events: &[TickEvent]) {
        for event in events {
            match event {
                TickEvent::FoodSpawned(_) | TickEvent::PowerUpSpawned(..) => continue,
                TickEvent::LeveledUp(level) => log!("Reached level {}", level),
                TickEvent::AchievementUnlocked(achievement) => {
                    log!("Achievement: {}", achievement.title())
                }
                _ => {}
            }
            self.recent_events.enqueue(format!("{:?}", event));
        }
    }

    fn poll_input(&mut self, state: &GameState) -> Option<Direction> {
        BotController::calculate_move(self.kind, state, &mut self.rng)
    }
}

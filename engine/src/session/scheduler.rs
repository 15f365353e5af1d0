use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

use crate::game::{Difficulty, Direction, GameState, SoundCue, TickEvent};
use crate::high_score::HighScoreStore;
use crate::log;
use super::{GameSession, Hud, MatchStatus, MatchSummary};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlCommand {
    Turn(Direction),
    TurnVector(i32, i32),
    TogglePause,
    Restart,
    SetDifficulty(Difficulty),
    SetSound(bool),
    Stop,
}

pub trait GameFrontend {
    fn render(&mut self, state: &GameState, hud: &Hud);

    fn play_sound(&mut self, _cue: SoundCue) {}

    fn on_events(&mut self, _events: &[TickEvent]) {}

    fn poll_input(&mut self, _state: &GameState) -> Option<Direction> {
        None
    }
}

#[derive(Clone, Debug)]
pub struct TickScheduler {
    stop_on_end: bool,
    max_ticks: Option<u64>,
}

impl Default for TickScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl TickScheduler {
    pub fn new() -> Self {
        Self {
            stop_on_end: true,
            max_ticks: None,
        }
    }

    pub fn with_max_ticks(mut self, max_ticks: Option<u64>) -> Self {
        self.max_ticks = max_ticks;
        self
    }

    pub fn with_stop_on_end(mut self, stop_on_end: bool) -> Self {
        self.stop_on_end = stop_on_end;
        self
    }

    pub async fn run<S, F>(
        &self,
        session: &mut GameSession<S>,
        frontend: &mut F,
        mut commands: mpsc::UnboundedReceiver<ControlCommand>,
    ) -> MatchSummary
    where
        S: HighScoreStore,
        F: GameFrontend,
    {
        let mut period = session.tick_interval();
        let mut timer = Self::arm_timer(period);
        let mut ticks_run: u64 = 0;

        loop {
            tokio::select! {
                _ = timer.tick() => {
                    if session.status() != MatchStatus::Running {
                        continue;
                    }

                    let requested = session.state().and_then(|state| frontend.poll_input(state));
                    if let Some(direction) = requested
                        && let Err(e) = session.request_direction(direction)
                    {
                        log!("Frontend turn rejected: {}", e);
                    }

                    let events = session.tick();
                    ticks_run += 1;
                    self.dispatch(session, frontend, &events);

                    if self.stop_on_end && matches!(session.status(), MatchStatus::Ended(_)) {
                        break;
                    }
                    if self.max_ticks.is_some_and(|max| ticks_run >= max) {
                        log!("Tick limit of {} reached", ticks_run);
                        break;
                    }

                }
                command = commands.recv() => {
                    match command {
                        Some(ControlCommand::Stop) | None => break,
                        Some(command) => Self::apply_command(session, command),
                    }
                }
            }

            let next = session.tick_interval();
            if next != period {
                period = next;
                timer = Self::arm_timer(period);
            }
        }

        session.summary()
    }

    fn arm_timer(period: Duration) -> Interval {
        let mut timer = interval_at(Instant::now() + period, period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        timer
    }

    fn dispatch<S, F>(&self, session: &GameSession<S>, frontend: &mut F, events: &[TickEvent])
    where
        S: HighScoreStore,
        F: GameFrontend,
    {
        if !events.is_empty() {
            frontend.on_events(events);
        }
        if session.settings().sound_enabled {
            for cue in events.iter().filter_map(TickEvent::sound_cue) {
                frontend.play_sound(cue);
            }
        }
        if let Some(state) = session.state() {
            frontend.render(state, &session.hud());
        }
    }

    fn apply_command<S: HighScoreStore>(session: &mut GameSession<S>, command: ControlCommand) {
        let result = match command {
            ControlCommand::Turn(direction) => session.request_direction(direction),
            ControlCommand::TurnVector(dx, dy) => session.request_direction_vector(dx, dy),
            ControlCommand::TogglePause => session.toggle_pause().map(|_| ()),
            ControlCommand::Restart => {
                session.restart();
                Ok(())
            }
            ControlCommand::SetDifficulty(difficulty) => {
                session.set_difficulty(difficulty);
                Ok(())
            }
            ControlCommand::SetSound(enabled) => {
                session.set_sound_enabled(enabled);
                Ok(())
            }
            ControlCommand::Stop => Ok(()),
        };

        if let Err(e) = result {
            log!("Command {:?} rejected: {}", command, e);
        }
    }
}

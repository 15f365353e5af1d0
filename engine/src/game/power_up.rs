use super::session_rng::SessionRng;
use super::types::Point;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PowerUpKind {
    Speed,
    Ghost,
    Magnet,
    Shrink,
    Invincibility,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 5] = [
        PowerUpKind::Speed,
        PowerUpKind::Ghost,
        PowerUpKind::Magnet,
        PowerUpKind::Shrink,
        PowerUpKind::Invincibility,
    ];

    pub fn random(rng: &mut SessionRng) -> PowerUpKind {
        PowerUpKind::ALL[rng.random_range(0..PowerUpKind::ALL.len())]
    }

    pub fn is_instant(&self) -> bool {
        matches!(self, PowerUpKind::Shrink)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PowerUp {
    pub position: Point,
    pub kind: PowerUpKind,
    pub remaining_ticks: u32,
}

impl PowerUp {
    pub fn new(position: Point, kind: PowerUpKind, lifetime_ticks: u32) -> Self {
        Self {
            position,
            kind,
            remaining_ticks: lifetime_ticks,
        }
    }

    pub fn age(&mut self) -> bool {
        self.remaining_ticks = self.remaining_ticks.saturating_sub(1);
        self.remaining_ticks == 0
    }
}

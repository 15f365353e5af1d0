use super::session_rng::SessionRng;
use super::types::{Direction, FieldSize, Point};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObstacleKind {
    Static,
    Moving { velocity: Direction },
    Blinking { period_ticks: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Obstacle {
    pub position: Point,
    pub kind: ObstacleKind,
    pub visible: bool,
    ticks_until_toggle: u32,
}

impl Obstacle {
    pub fn new(position: Point, kind: ObstacleKind) -> Self {
        let ticks_until_toggle = match kind {
            ObstacleKind::Blinking { period_ticks } => period_ticks.max(1),
            _ => 0,
        };
        Self {
            position,
            kind,
            visible: true,
            ticks_until_toggle,
        }
    }

    pub fn random_kind(rng: &mut SessionRng, blink_period_ticks: u32) -> ObstacleKind {
        match rng.random_range(0..3u32) {
            0 => ObstacleKind::Static,
            1 => ObstacleKind::Moving {
                velocity: Direction::ALL[rng.random_range(0..Direction::ALL.len())],
            },
            _ => ObstacleKind::Blinking {
                period_ticks: blink_period_ticks,
            },
        }
    }

    pub fn is_solid(&self) -> bool {
        self.visible
    }

    /// Never steps or reappears onto a blocked cell. A moving obstacle
    /// reverses or waits; a blinking one stays hidden and retries next tick.
    pub fn update<F>(&mut self, field_size: &FieldSize, is_blocked: F)
    where
        F: Fn(Point) -> bool,
    {
        let can_enter = |p: Point| field_size.contains(p) && !is_blocked(p);
        match self.kind {
            ObstacleKind::Static => {}
            ObstacleKind::Moving { velocity } => {
                let next = self.position.step(velocity);
                if can_enter(next) {
                    self.position = next;
                    return;
                }
                let reversed = velocity.opposite();
                self.kind = ObstacleKind::Moving { velocity: reversed };
                let back = self.position.step(reversed);
                if can_enter(back) {
                    self.position = back;
                }
            }
            ObstacleKind::Blinking { period_ticks } => {
                self.ticks_until_toggle = self.ticks_until_toggle.saturating_sub(1);
                if self.ticks_until_toggle > 0 {
                    return;
                }
                if !self.visible && is_blocked(self.position) {
                    self.ticks_until_toggle = 1;
                    return;
                }
                self.visible = !self.visible;
                self.ticks_until_toggle = period_ticks.max(1);
            }
        }
    }
}

use super::power_up::PowerUpKind;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActiveEffect {
    pub kind: PowerUpKind,
    pub remaining_ticks: u32,
}

/// Timed power-up effects. Each kind appears at most once; collecting an
/// active kind again refreshes it instead of stacking.
#[derive(Clone, Debug, Default)]
pub struct ActiveEffects {
    effects: Vec<ActiveEffect>,
}

impl ActiveEffects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn activate(&mut self, kind: PowerUpKind, duration_ticks: u32) {
        if duration_ticks == 0 {
            return;
        }
        if let Some(effect) = self.effects.iter_mut().find(|e| e.kind == kind) {
            effect.remaining_ticks = duration_ticks;
        } else {
            self.effects.push(ActiveEffect {
                kind,
                remaining_ticks: duration_ticks,
            });
        }
    }

    pub fn is_active(&self, kind: PowerUpKind) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }

    pub fn remaining(&self, kind: PowerUpKind) -> Option<u32> {
        self.effects
            .iter()
            .find(|e| e.kind == kind)
            .map(|e| e.remaining_ticks)
    }

    pub fn tick(&mut self) -> Vec<PowerUpKind> {
        let mut ended = Vec::new();
        self.effects.retain_mut(|effect| {
            effect.remaining_ticks = effect.remaining_ticks.saturating_sub(1);
            if effect.remaining_ticks == 0 {
                ended.push(effect.kind);
                false
            } else {
                true
            }
        });
        ended
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActiveEffect> {
        self.effects.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

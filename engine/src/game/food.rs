use super::session_rng::SessionRng;
use super::types::Point;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FoodKind {
    Normal,
    Bonus,
    Golden,
    Poison,
}

impl FoodKind {
    pub const ALL: [FoodKind; 4] = [
        FoodKind::Normal,
        FoodKind::Bonus,
        FoodKind::Golden,
        FoodKind::Poison,
    ];

    pub fn score_delta(&self) -> i32 {
        match self {
            FoodKind::Normal => 10,
            FoodKind::Bonus => 20,
            FoodKind::Golden => 50,
            FoodKind::Poison => -10,
        }
    }

    pub fn random(rng: &mut SessionRng) -> FoodKind {
        FoodKind::ALL[rng.random_range(0..FoodKind::ALL.len())]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Food {
    pub position: Point,
    pub kind: FoodKind,
}

impl Food {
    pub fn new(position: Point, kind: FoodKind) -> Self {
        Self { position, kind }
    }
}

use serde::{Deserialize, Serialize};

use super::game_state::GameState;
use super::power_up::PowerUpKind;
use super::session_rng::SessionRng;
use super::types::{Direction, Point};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BotKind {
    Efficient,
    Random,
}

impl std::str::FromStr for BotKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "efficient" => Ok(BotKind::Efficient),
            "random" => Ok(BotKind::Random),
            other => Err(format!("Unknown bot kind '{}'", other)),
        }
    }
}

pub struct BotController;

impl BotController {
    pub fn calculate_move(kind: BotKind, state: &GameState, rng: &mut SessionRng) -> Option<Direction> {
        if !state.is_alive() {
            return None;
        }
        match kind {
            BotKind::Efficient => Self::efficient_pathfinding(state, rng),
            BotKind::Random => Self::random_valid_move(state, rng),
        }
    }

    fn efficient_pathfinding(state: &GameState, rng: &mut SessionRng) -> Option<Direction> {
        let Some(food) = state.food else {
            return Self::random_valid_move(state, rng);
        };

        let head = state.snake.head();
        let mut best_dir = None;
        let mut best_distance = u32::MAX;

        for dir in Self::get_valid_directions(state.snake.direction) {
            if let Some(next_pos) = Self::calculate_next_position(head, dir, state)
                && Self::is_safe_position(next_pos, state)
            {
                let distance = next_pos.manhattan_distance(&food.position);
                if distance < best_distance {
                    best_distance = distance;
                    best_dir = Some(dir);
                }
            }
        }

        best_dir.or_else(|| Self::random_valid_move(state, rng))
    }

    fn random_valid_move(state: &GameState, rng: &mut SessionRng) -> Option<Direction> {
        let head = state.snake.head();
        let safe_directions: Vec<Direction> = Self::get_valid_directions(state.snake.direction)
            .into_iter()
            .filter(|&dir| {
                Self::calculate_next_position(head, dir, state)
                    .is_some_and(|next_pos| Self::is_safe_position(next_pos, state))
            })
            .collect();

        if safe_directions.is_empty() {
            Some(state.snake.direction)
        } else {
            let idx = rng.random_range(0..safe_directions.len());
            Some(safe_directions[idx])
        }
    }

    fn get_valid_directions(current: Direction) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|d| !d.is_opposite(&current))
            .collect()
    }

    fn calculate_next_position(from: Point, direction: Direction, state: &GameState) -> Option<Point> {
        let next = from.step(direction);
        if state.field_size.contains(next) {
            Some(next)
        } else if state.effects.is_active(PowerUpKind::Ghost) {
            Some(state.field_size.wrap(next))
        } else {
            None
        }
    }

    fn is_safe_position(pos: Point, state: &GameState) -> bool {
        if state.effects.is_active(PowerUpKind::Ghost) {
            return true;
        }
        let snake = &state.snake;
        if snake.occupies(pos) && Some(pos) != snake.tail() {
            return false;
        }
        !state.obstacles.iter().any(|o| o.position == pos && o.is_solid())
    }
}

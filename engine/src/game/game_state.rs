use std::time::Duration;

use crate::log;
use super::effects::ActiveEffects;
use super::events::TickEvent;
use super::food::{Food, FoodKind};
use super::obstacle::Obstacle;
use super::portal::PortalPair;
use super::power_up::{PowerUp, PowerUpKind};
use super::session_rng::SessionRng;
use super::settings::{Difficulty, GameSettings};
use super::snake::Snake;
use super::spawner::find_free_cell;
use super::types::{CollisionKind, Direction, EndReason, FieldSize, Point};

const SPAWN_SAFE_DISTANCE: u32 = 3;

#[derive(Clone, Debug)]
pub struct GameState {
    pub snake: Snake,
    pub food: Option<Food>,
    pub power_ups: Vec<PowerUp>,
    pub obstacles: Vec<Obstacle>,
    pub portals: Vec<PortalPair>,
    pub effects: ActiveEffects,
    pub score: u32,
    pub level: u32,
    pub tick: u64,
    pub end_reason: Option<EndReason>,
    pub field_size: FieldSize,
    settings: GameSettings,
}

impl GameState {
    pub fn new(settings: GameSettings, rng: &mut SessionRng) -> Self {
        let field_size = settings.field_size();
        let snake = Snake::new(
            field_size.center(),
            Direction::Right,
            settings.initial_length as usize,
        );

        let mut state = Self {
            snake,
            food: None,
            power_ups: Vec::new(),
            obstacles: Vec::new(),
            portals: Vec::new(),
            effects: ActiveEffects::new(),
            score: 0,
            level: 1,
            tick: 0,
            end_reason: None,
            field_size,
            settings,
        };
        state.spawn_food(rng);
        state
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn is_alive(&self) -> bool {
        self.end_reason.is_none()
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.settings.difficulty = difficulty;
    }

    pub fn set_direction(&mut self, direction: Direction) -> Result<(), String> {
        if !self.is_alive() {
            return Err("Snake is dead".to_string());
        }
        self.snake.queue_direction(direction)
    }

    /// Level interval, halved while a speed effect is active.
    pub fn tick_interval(&self) -> Duration {
        let interval = self.settings.level_tick_interval(self.level);
        if self.effects.is_active(PowerUpKind::Speed) {
            interval / 2
        } else {
            interval
        }
    }

    pub fn is_occupied(&self, point: Point) -> bool {
        self.snake.occupies(point)
            || self.food.is_some_and(|f| f.position == point)
            || self.power_ups.iter().any(|p| p.position == point)
            || self.obstacles.iter().any(|o| o.position == point)
            || self.portals.iter().any(|p| p.contains(point))
    }

    pub fn advance(&mut self, input: Option<Direction>, rng: &mut SessionRng) -> Vec<TickEvent> {
        if !self.is_alive() {
            return Vec::new();
        }

        let mut events = Vec::new();
        self.tick += 1;

        for kind in self.effects.tick() {
            events.push(TickEvent::EffectEnded(kind));
        }

        if let Some(direction) = input
            && let Err(e) = self.snake.queue_direction(direction)
        {
            log!("Turn ignored: {}", e);
        }
        self.snake.commit_direction();

        let Some(next_head) = self.next_head_position(&mut events) else {
            self.finish(EndReason::WallCollision, &mut events);
            return events;
        };

        self.snake.push_head(next_head);
        let ate_food = self.try_eat_food(next_head, &mut events);
        if !ate_food {
            self.snake.pop_tail();
        }

        self.try_collect_power_up(next_head, &mut events);
        self.try_teleport(next_head, &mut events);

        if let Some(kind) = self.detect_collision() {
            if self.effects.is_active(PowerUpKind::Invincibility) {
                events.push(TickEvent::CollisionIgnored(kind));
            } else {
                self.finish(kind.into(), &mut events);
                return events;
            }
        }

        self.update_level(rng, &mut events);

        self.update_obstacles();

        if self.food.is_none() && !self.spawn_food(rng) {
            self.finish(EndReason::BoardFull, &mut events);
            return events;
        }
        if let Some(food) = self.food
            && ate_food
        {
            events.push(TickEvent::FoodSpawned(food.position));
        }

        self.update_power_ups(rng, &mut events);

        if self.effects.is_active(PowerUpKind::Magnet) {
            self.pull_food_towards_head();
        }

        events
    }

    fn next_head_position(&self, events: &mut Vec<TickEvent>) -> Option<Point> {
        let next = self.snake.head().step(self.snake.direction);
        if self.field_size.contains(next) {
            return Some(next);
        }

        if self.effects.is_active(PowerUpKind::Ghost) {
            return Some(self.field_size.wrap(next));
        }
        if self.effects.is_active(PowerUpKind::Invincibility) {
            events.push(TickEvent::CollisionIgnored(CollisionKind::Wall));
            return Some(self.field_size.wrap(next));
        }
        None
    }

    fn try_eat_food(&mut self, head: Point, events: &mut Vec<TickEvent>) -> bool {
        let Some(food) = self.food else {
            return false;
        };
        if food.position != head {
            return false;
        }

        let delta = food.kind.score_delta();
        self.score = self.score.saturating_add_signed(delta);
        self.food = None;
        events.push(TickEvent::AteFood {
            kind: food.kind,
            at: head,
            score_delta: delta,
        });
        log!(
            "Ate {:?} food at ({}, {}). Score: {}",
            food.kind,
            head.x,
            head.y,
            self.score
        );
        true
    }

    fn try_collect_power_up(&mut self, head: Point, events: &mut Vec<TickEvent>) {
        let Some(index) = self.power_ups.iter().position(|p| p.position == head) else {
            return;
        };
        let power_up = self.power_ups.remove(index);
        events.push(TickEvent::CollectedPowerUp(power_up.kind));
        log!("Collected {:?} power-up at ({}, {})", power_up.kind, head.x, head.y);

        if power_up.kind.is_instant() {
            let removed = self.snake.shrink();
            events.push(TickEvent::Shrunk { removed });
        } else {
            let duration = self.settings.effect_durations.for_kind(power_up.kind);
            self.effects.activate(power_up.kind, duration);
        }
    }

    fn try_teleport(&mut self, head: Point, events: &mut Vec<TickEvent>) {
        let Some(exit) = self.portals.iter().find_map(|p| p.exit_for(head)) else {
            return;
        };
        self.snake.replace_head(exit);
        events.push(TickEvent::Teleported { from: head, to: exit });
    }

    fn detect_collision(&self) -> Option<CollisionKind> {
        if self.effects.is_active(PowerUpKind::Ghost) {
            return None;
        }

        let head = self.snake.head();
        if self.snake.body_contains_excluding_head(head) {
            return Some(CollisionKind::SelfCollision);
        }
        if self
            .obstacles
            .iter()
            .any(|o| o.position == head && o.is_solid())
        {
            return Some(CollisionKind::Obstacle);
        }
        None
    }

    fn update_level(&mut self, rng: &mut SessionRng, events: &mut Vec<TickEvent>) {
        let step = self.settings.level_score_step;
        let mut leveled = false;
        while self.score >= self.level.saturating_mul(step) {
            self.level += 1;
            leveled = true;
            events.push(TickEvent::LeveledUp(self.level));
            log!(
                "Level up: {} (tick interval {}ms)",
                self.level,
                self.settings.level_tick_interval(self.level).as_millis()
            );
        }

        if !leveled {
            return;
        }

        let target = self.settings.target_obstacle_count(self.level);
        while self.obstacles.len() < target {
            let Some(pos) = self.find_spawn_cell(rng, SPAWN_SAFE_DISTANCE) else {
                break;
            };
            let kind = Obstacle::random_kind(rng, self.settings.blink_period_ticks);
            self.obstacles.push(Obstacle::new(pos, kind));
            events.push(TickEvent::ObstacleSpawned(pos));
        }

        if self.portals.is_empty() && self.level >= self.settings.portal_unlock_level {
            self.spawn_portals(rng, events);
        }
    }

    fn spawn_portals(&mut self, rng: &mut SessionRng, events: &mut Vec<TickEvent>) {
        let Some(a) = self.find_spawn_cell(rng, SPAWN_SAFE_DISTANCE) else {
            return;
        };
        let head = self.snake.head();
        let b = find_free_cell(&self.field_size, rng, |p| {
            p == a || self.is_occupied(p) || p.manhattan_distance(&head) < SPAWN_SAFE_DISTANCE
        });
        if let Some(b) = b {
            self.portals.push(PortalPair::new(a, b));
            events.push(TickEvent::PortalsOpened { a, b });
            log!("Portals opened at ({}, {}) and ({}, {})", a.x, a.y, b.x, b.y);
        }
    }

    fn update_obstacles(&mut self) {
        for index in 0..self.obstacles.len() {
            let mut obstacle = self.obstacles[index];
            obstacle.update(&self.field_size, |p| self.is_taken_by_other_than(p, index));
            self.obstacles[index] = obstacle;
        }
    }

    fn is_taken_by_other_than(&self, point: Point, obstacle_index: usize) -> bool {
        self.snake.occupies(point)
            || self.food.is_some_and(|f| f.position == point)
            || self.power_ups.iter().any(|p| p.position == point)
            || self.portals.iter().any(|p| p.contains(point))
            || self
                .obstacles
                .iter()
                .enumerate()
                .any(|(i, o)| i != obstacle_index && o.position == point)
    }

    fn find_spawn_cell(&self, rng: &mut SessionRng, safe_distance: u32) -> Option<Point> {
        let head = self.snake.head();
        find_free_cell(&self.field_size, rng, |p| {
            self.is_occupied(p) || p.manhattan_distance(&head) < safe_distance
        })
    }

    fn spawn_food(&mut self, rng: &mut SessionRng) -> bool {
        let Some(pos) = find_free_cell(&self.field_size, rng, |p| self.is_occupied(p)) else {
            log!("No free cell left for food");
            return false;
        };
        let kind = FoodKind::random(rng);
        self.food = Some(Food::new(pos, kind));
        log!("{:?} food spawned at ({}, {})", kind, pos.x, pos.y);
        true
    }

    fn update_power_ups(&mut self, rng: &mut SessionRng, events: &mut Vec<TickEvent>) {
        self.power_ups.retain_mut(|power_up| {
            if power_up.age() {
                events.push(TickEvent::PowerUpExpired(power_up.kind));
                false
            } else {
                true
            }
        });

        if self.power_ups.len() >= self.settings.max_power_ups as usize
            || !rng.chance(self.settings.power_up_spawn_probability)
        {
            return;
        }

        if let Some(pos) = find_free_cell(&self.field_size, rng, |p| self.is_occupied(p)) {
            let kind = PowerUpKind::random(rng);
            self.power_ups
                .push(PowerUp::new(pos, kind, self.settings.power_up_lifetime_ticks));
            events.push(TickEvent::PowerUpSpawned(kind, pos));
        }
    }

    fn pull_food_towards_head(&mut self) {
        let Some(food) = self.food else {
            return;
        };
        let head = self.snake.head();
        let dx = (head.x - food.position.x).signum();
        let dy = (head.y - food.position.y).signum();

        let horizontal = Point::new(food.position.x + dx, food.position.y);
        let vertical = Point::new(food.position.x, food.position.y + dy);
        let candidates = if head.x.abs_diff(food.position.x) >= head.y.abs_diff(food.position.y) {
            [(dx, horizontal), (dy, vertical)]
        } else {
            [(dy, vertical), (dx, horizontal)]
        };

        for (delta, target) in candidates {
            if delta != 0 && !self.is_occupied(target) {
                self.food = Some(Food::new(target, food.kind));
                return;
            }
        }
    }

    fn finish(&mut self, reason: EndReason, events: &mut Vec<TickEvent>) {
        self.end_reason = Some(reason);
        events.push(TickEvent::Died(reason));
        log!("Game over at tick {}: {:?}. Score: {}", self.tick, reason, self.score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::ObstacleKind;

    fn quiet_settings() -> GameSettings {
        GameSettings {
            field_width: 20,
            field_height: 20,
            power_up_spawn_probability: 0.0,
            ..GameSettings::default()
        }
    }

    fn create_state(cells: &[Point], direction: Direction) -> (GameState, SessionRng) {
        let mut rng = SessionRng::new(42);
        let mut state = GameState::new(quiet_settings(), &mut rng);
        state.snake = Snake::from_cells(cells, direction);
        state.food = Some(Food::new(Point::new(0, 19), FoodKind::Normal));
        (state, rng)
    }

    fn body(state: &GameState) -> Vec<Point> {
        state.snake.body.iter().copied().collect()
    }

    #[test]
    fn test_new_state_has_food_off_the_snake() {
        let mut rng = SessionRng::new(9);
        let state = GameState::new(GameSettings::default(), &mut rng);
        let food = state.food.unwrap();
        assert!(!state.snake.occupies(food.position));
        assert_eq!(state.snake.head(), Point::new(15, 15));
        assert_eq!(state.snake.direction, Direction::Right);
        assert_eq!(state.level, 1);
        assert!(state.is_alive());
    }

    #[test]
    fn test_plain_move_translates_snake() {
        let (mut state, mut rng) = create_state(
            &[Point::new(5, 5), Point::new(4, 5), Point::new(3, 5)],
            Direction::Right,
        );

        let events = state.advance(None, &mut rng);
        assert!(events.is_empty());
        assert_eq!(body(&state), vec![Point::new(6, 5), Point::new(5, 5), Point::new(4, 5)]);

        state.advance(Some(Direction::Down), &mut rng);
        assert_eq!(body(&state), vec![Point::new(6, 6), Point::new(6, 5), Point::new(5, 5)]);
        assert_eq!(state.snake.len(), 3);
        assert_eq!(state.tick, 2);
    }

    #[test]
    fn test_eating_food_grows_and_scores() {
        let (mut state, mut rng) = create_state(
            &[Point::new(5, 5), Point::new(4, 5), Point::new(3, 5)],
            Direction::Right,
        );
        state.food = Some(Food::new(Point::new(6, 5), FoodKind::Golden));

        let events = state.advance(None, &mut rng);

        assert_eq!(state.snake.len(), 4);
        assert_eq!(state.score, 50);
        assert!(events.contains(&TickEvent::AteFood {
            kind: FoodKind::Golden,
            at: Point::new(6, 5),
            score_delta: 50,
        }));
        let food = state.food.unwrap();
        assert!(!state.snake.occupies(food.position));
        assert!(state.field_size.contains(food.position));
        assert!(events.contains(&TickEvent::FoodSpawned(food.position)));
    }

    #[test]
    fn test_poison_never_drops_score_below_zero() {
        let (mut state, mut rng) = create_state(&[Point::new(5, 5)], Direction::Right);
        state.food = Some(Food::new(Point::new(6, 5), FoodKind::Poison));

        state.advance(None, &mut rng);

        assert_eq!(state.score, 0);
        assert_eq!(state.snake.len(), 2);
    }

    #[test]
    fn test_self_collision_ends_match() {
        let (mut state, mut rng) = create_state(
            &[
                Point::new(5, 5),
                Point::new(5, 4),
                Point::new(4, 4),
                Point::new(4, 5),
                Point::new(4, 6),
            ],
            Direction::Down,
        );
        state.set_direction(Direction::Left).unwrap();

        let events = state.advance(None, &mut rng);

        assert!(events.contains(&TickEvent::Died(EndReason::SelfCollision)));
        assert_eq!(state.end_reason, Some(EndReason::SelfCollision));
        assert!(state.advance(None, &mut rng).is_empty());
    }

    #[test]
    fn test_moving_into_vacated_tail_is_safe() {
        let (mut state, mut rng) = create_state(
            &[Point::new(5, 5), Point::new(5, 4), Point::new(4, 4), Point::new(4, 5)],
            Direction::Down,
        );
        state.set_direction(Direction::Left).unwrap();

        state.advance(None, &mut rng);

        assert!(state.is_alive());
        assert_eq!(state.snake.head(), Point::new(4, 5));
    }

    #[test]
    fn test_wall_collision_on_right_edge() {
        let (mut state, mut rng) = create_state(
            &[Point::new(19, 7), Point::new(18, 7)],
            Direction::Right,
        );

        let events = state.advance(None, &mut rng);

        assert_eq!(events, vec![TickEvent::Died(EndReason::WallCollision)]);
        assert_eq!(body(&state), vec![Point::new(19, 7), Point::new(18, 7)]);
    }

    #[test]
    fn test_wall_collision_on_left_edge() {
        let (mut state, mut rng) = create_state(
            &[Point::new(0, 7), Point::new(1, 7)],
            Direction::Left,
        );

        let events = state.advance(None, &mut rng);

        assert_eq!(events, vec![TickEvent::Died(EndReason::WallCollision)]);
        assert_eq!(body(&state), vec![Point::new(0, 7), Point::new(1, 7)]);
    }

    #[test]
    fn test_invincibility_wraps_through_wall() {
        let (mut state, mut rng) = create_state(
            &[Point::new(19, 5), Point::new(18, 5)],
            Direction::Right,
        );
        state.effects.activate(PowerUpKind::Invincibility, 10);

        let events = state.advance(None, &mut rng);

        assert!(state.is_alive());
        assert_eq!(state.snake.head(), Point::new(0, 5));
        assert!(events.contains(&TickEvent::CollisionIgnored(CollisionKind::Wall)));
    }

    #[test]
    fn test_opposite_direction_rejected() {
        let (mut state, mut rng) = create_state(
            &[Point::new(5, 5), Point::new(4, 5)],
            Direction::Right,
        );

        assert!(state.set_direction(Direction::Left).is_err());
        state.advance(Some(Direction::Left), &mut rng);

        assert_eq!(state.snake.direction, Direction::Right);
        assert_eq!(state.snake.head(), Point::new(6, 5));
        assert!(state.is_alive());
    }

    #[test]
    fn test_portal_relocates_head_once() {
        let (mut state, mut rng) = create_state(
            &[Point::new(1, 2), Point::new(0, 2)],
            Direction::Right,
        );
        state.portals.push(PortalPair::new(Point::new(2, 2), Point::new(10, 10)));

        let events = state.advance(None, &mut rng);

        assert_eq!(state.snake.head(), Point::new(10, 10));
        let teleports = events
            .iter()
            .filter(|e| matches!(e, TickEvent::Teleported { .. }))
            .count();
        assert_eq!(teleports, 1);
        assert!(events.contains(&TickEvent::Teleported {
            from: Point::new(2, 2),
            to: Point::new(10, 10),
        }));

        let events = state.advance(None, &mut rng);
        assert_eq!(state.snake.head(), Point::new(11, 10));
        assert!(!events.iter().any(|e| matches!(e, TickEvent::Teleported { .. })));
    }

    #[test]
    fn test_speed_effect_restores_after_exact_duration() {
        let settings = GameSettings {
            field_width: 60,
            field_height: 20,
            power_up_spawn_probability: 0.0,
            ..GameSettings::default()
        };
        let mut rng = SessionRng::new(42);
        let mut state = GameState::new(settings, &mut rng);
        state.snake = Snake::from_cells(&[Point::new(1, 10)], Direction::Right);
        state.food = Some(Food::new(Point::new(0, 0), FoodKind::Normal));
        let duration = state.settings().effect_durations.speed_ticks;
        let normal = state.tick_interval();

        state.power_ups.push(PowerUp::new(Point::new(2, 10), PowerUpKind::Speed, 100));
        state.advance(None, &mut rng);
        assert_eq!(state.tick_interval(), normal / 2);

        for _ in 0..duration - 1 {
            state.advance(None, &mut rng);
            assert_eq!(state.tick_interval(), normal / 2);
        }
        let events = state.advance(None, &mut rng);
        assert!(events.contains(&TickEvent::EffectEnded(PowerUpKind::Speed)));
        assert_eq!(state.tick_interval(), normal);
    }

    #[test]
    fn test_repeated_speed_pickups_do_not_drift() {
        let (mut state, mut rng) = create_state(&[Point::new(2, 5)], Direction::Right);
        let normal = state.tick_interval();

        state.power_ups.push(PowerUp::new(Point::new(3, 5), PowerUpKind::Speed, 100));
        state.power_ups.push(PowerUp::new(Point::new(4, 5), PowerUpKind::Speed, 100));
        state.advance(None, &mut rng);
        state.advance(None, &mut rng);

        assert_eq!(state.tick_interval(), normal / 2);
        assert_eq!(
            state.effects.remaining(PowerUpKind::Speed),
            Some(state.settings().effect_durations.speed_ticks)
        );
    }

    #[test]
    fn test_shrink_power_up_removes_tail() {
        let cells: Vec<Point> = (0..8).map(|i| Point::new(10 - i, 5)).collect();
        let (mut state, mut rng) = create_state(&cells, Direction::Right);
        state.power_ups.push(PowerUp::new(Point::new(11, 5), PowerUpKind::Shrink, 100));

        let events = state.advance(None, &mut rng);

        assert!(events.contains(&TickEvent::Shrunk { removed: 3 }));
        assert_eq!(state.snake.len(), 5);
        assert_eq!(state.snake.head(), Point::new(11, 5));
        assert!(state.effects.is_empty());
    }

    #[test]
    fn test_ghost_passes_through_walls_and_body() {
        let (mut state, mut rng) = create_state(
            &[Point::new(19, 5), Point::new(18, 5)],
            Direction::Right,
        );
        state.effects.activate(PowerUpKind::Ghost, 10);

        let events = state.advance(None, &mut rng);
        assert!(state.is_alive());
        assert_eq!(state.snake.head(), Point::new(0, 5));
        assert!(!events.iter().any(|e| matches!(e, TickEvent::CollisionIgnored(_))));

        state.obstacles.push(Obstacle::new(Point::new(1, 5), ObstacleKind::Static));
        state.advance(None, &mut rng);
        assert!(state.is_alive());
    }

    #[test]
    fn test_invincibility_reports_ignored_collisions() {
        let (mut state, mut rng) = create_state(
            &[Point::new(5, 5), Point::new(4, 5)],
            Direction::Right,
        );
        state.effects.activate(PowerUpKind::Invincibility, 10);
        state.obstacles.push(Obstacle::new(Point::new(6, 5), ObstacleKind::Static));

        let events = state.advance(None, &mut rng);

        assert!(state.is_alive());
        assert!(events.contains(&TickEvent::CollisionIgnored(CollisionKind::Obstacle)));
    }

    #[test]
    fn test_solid_obstacle_kills() {
        let (mut state, mut rng) = create_state(
            &[Point::new(5, 5), Point::new(4, 5)],
            Direction::Right,
        );
        state.obstacles.push(Obstacle::new(Point::new(6, 5), ObstacleKind::Static));

        let events = state.advance(None, &mut rng);

        assert!(events.contains(&TickEvent::Died(EndReason::ObstacleCollision)));
    }

    #[test]
    fn test_invisible_obstacle_is_passable() {
        let (mut state, mut rng) = create_state(
            &[Point::new(5, 5), Point::new(4, 5)],
            Direction::Right,
        );
        let mut obstacle = Obstacle::new(Point::new(6, 5), ObstacleKind::Blinking { period_ticks: 1 });
        obstacle.visible = false;
        state.obstacles.push(obstacle);

        state.advance(None, &mut rng);

        assert!(state.is_alive());
    }

    #[test]
    fn test_level_up_speeds_up_and_spawns_hazards() {
        let (mut state, mut rng) = create_state(
            &[Point::new(5, 5), Point::new(4, 5)],
            Direction::Right,
        );
        state.score = 90;
        state.food = Some(Food::new(Point::new(6, 5), FoodKind::Normal));
        let before = state.tick_interval();

        let events = state.advance(None, &mut rng);

        assert!(events.contains(&TickEvent::LeveledUp(2)));
        assert_eq!(state.level, 2);
        assert!(state.tick_interval() < before);
        assert_eq!(state.obstacles.len(), 2);
        assert_eq!(state.portals.len(), 1);
        let head = state.snake.head();
        let spawned: Vec<Point> = events
            .iter()
            .filter_map(|e| match e {
                TickEvent::ObstacleSpawned(pos) => Some(*pos),
                _ => None,
            })
            .collect();
        assert_eq!(spawned.len(), 2);
        for pos in spawned {
            assert!(pos.manhattan_distance(&head) >= SPAWN_SAFE_DISTANCE);
        }
    }

    #[test]
    fn test_power_up_expires() {
        let (mut state, mut rng) = create_state(&[Point::new(5, 5)], Direction::Right);
        state.power_ups.push(PowerUp::new(Point::new(15, 15), PowerUpKind::Magnet, 2));

        state.advance(None, &mut rng);
        assert_eq!(state.power_ups.len(), 1);
        let events = state.advance(None, &mut rng);
        assert!(events.contains(&TickEvent::PowerUpExpired(PowerUpKind::Magnet)));
        assert!(state.power_ups.is_empty());
    }

    #[test]
    fn test_power_ups_respect_cap() {
        let settings = GameSettings {
            power_up_spawn_probability: 1.0,
            power_up_lifetime_ticks: 1000,
            ..quiet_settings()
        };
        let mut rng = SessionRng::new(4);
        let mut state = GameState::new(settings, &mut rng);
        state.snake = Snake::from_cells(&[Point::new(0, 0)], Direction::Down);

        let mut max_seen = 0;
        for _ in 0..10 {
            state.advance(None, &mut rng);
            assert!(state.power_ups.len() <= 3);
            max_seen = max_seen.max(state.power_ups.len());
        }
        assert_eq!(max_seen, 3);
    }

    #[test]
    fn test_magnet_pulls_food_towards_head() {
        let (mut state, mut rng) = create_state(&[Point::new(2, 2)], Direction::Down);
        state.food = Some(Food::new(Point::new(12, 3), FoodKind::Bonus));
        state.effects.activate(PowerUpKind::Magnet, 10);

        state.advance(None, &mut rng);

        let food = state.food.unwrap();
        assert_eq!(food.position, Point::new(11, 3));
        assert_eq!(food.kind, FoodKind::Bonus);
    }

    #[test]
    fn test_board_full_ends_match() {
        let settings = GameSettings {
            field_width: 5,
            field_height: 5,
            power_up_spawn_probability: 0.0,
            ..GameSettings::default()
        };
        let mut rng = SessionRng::new(8);
        let mut state = GameState::new(settings, &mut rng);

        let mut cells = Vec::new();
        for y in 0..5 {
            let row: Vec<i32> = if y % 2 == 0 { (0..5).collect() } else { (0..5).rev().collect() };
            for x in row {
                cells.push(Point::new(x, y));
            }
        }
        state.snake = Snake::from_cells(&cells[1..], Direction::Left);
        state.food = Some(Food::new(cells[0], FoodKind::Normal));

        let events = state.advance(None, &mut rng);

        assert!(events.contains(&TickEvent::Died(EndReason::BoardFull)));
        assert_eq!(state.end_reason, Some(EndReason::BoardFull));
        assert_eq!(state.snake.len(), 25);
    }

    #[test]
    fn test_obstacles_move_after_collision_check() {
        let (mut state, mut rng) = create_state(&[Point::new(5, 5)], Direction::Right);
        state.obstacles.push(Obstacle::new(
            Point::new(6, 5),
            ObstacleKind::Moving { velocity: Direction::Right },
        ));

        let events = state.advance(None, &mut rng);

        assert!(events.contains(&TickEvent::Died(EndReason::ObstacleCollision)));
        assert_eq!(state.obstacles[0].position, Point::new(6, 5));
    }

    #[test]
    fn test_moving_obstacle_reverses_at_field_edge() {
        let (mut state, mut rng) = create_state(&[Point::new(2, 2)], Direction::Down);
        state.obstacles.push(Obstacle::new(
            Point::new(18, 10),
            ObstacleKind::Moving { velocity: Direction::Right },
        ));

        state.advance(None, &mut rng);
        assert_eq!(state.obstacles[0].position, Point::new(19, 10));

        state.advance(None, &mut rng);
        assert_eq!(state.obstacles[0].position, Point::new(18, 10));
        assert_eq!(
            state.obstacles[0].kind,
            ObstacleKind::Moving { velocity: Direction::Left }
        );
    }

    #[test]
    fn test_blinking_obstacle_toggles_each_period() {
        let (mut state, mut rng) = create_state(&[Point::new(2, 2)], Direction::Down);
        state.obstacles.push(Obstacle::new(
            Point::new(10, 10),
            ObstacleKind::Blinking { period_ticks: 2 },
        ));

        state.advance(None, &mut rng);
        assert!(state.obstacles[0].visible);
        state.advance(None, &mut rng);
        assert!(!state.obstacles[0].visible);
        state.advance(None, &mut rng);
        state.advance(None, &mut rng);
        assert!(state.obstacles[0].visible);
    }

    #[test]
    fn test_moving_obstacle_never_covers_food() {
        let (mut state, mut rng) = create_state(&[Point::new(1, 1)], Direction::Right);
        state.food = Some(Food::new(Point::new(5, 5), FoodKind::Golden));
        state.obstacles.push(Obstacle::new(
            Point::new(5, 3),
            ObstacleKind::Moving { velocity: Direction::Down },
        ));

        for _ in 0..4 {
            state.advance(None, &mut rng);
            assert_ne!(state.obstacles[0].position, Point::new(5, 5));
        }
        assert_eq!(state.food.unwrap().position, Point::new(5, 5));
    }

    #[test]
    fn test_food_next_to_moving_obstacle_is_safe_to_eat() {
        let (mut state, mut rng) = create_state(&[Point::new(5, 7)], Direction::Up);
        state.food = Some(Food::new(Point::new(5, 5), FoodKind::Golden));
        state.obstacles.push(Obstacle::new(
            Point::new(5, 3),
            ObstacleKind::Moving { velocity: Direction::Down },
        ));

        state.advance(None, &mut rng);
        let events = state.advance(None, &mut rng);

        assert!(state.is_alive());
        assert_eq!(state.score, 50);
        assert!(!events.iter().any(|e| matches!(e, TickEvent::Died(_))));
        assert_eq!(state.obstacles[0].position, Point::new(5, 3));
    }

    #[test]
    fn test_moving_obstacle_keeps_portal_exit_clear() {
        let (mut state, mut rng) = create_state(&[Point::new(0, 2)], Direction::Right);
        state.portals.push(PortalPair::new(Point::new(2, 2), Point::new(10, 10)));
        state.obstacles.push(Obstacle::new(
            Point::new(10, 9),
            ObstacleKind::Moving { velocity: Direction::Down },
        ));

        state.advance(None, &mut rng);
        assert_eq!(state.obstacles[0].position, Point::new(10, 8));

        let events = state.advance(None, &mut rng);
        assert!(state.is_alive());
        assert_eq!(state.snake.head(), Point::new(10, 10));
        assert!(events.contains(&TickEvent::Teleported {
            from: Point::new(2, 2),
            to: Point::new(10, 10),
        }));
    }

    #[test]
    fn test_blinking_obstacle_stays_hidden_under_snake() {
        let (mut state, mut rng) = create_state(
            &[Point::new(5, 5), Point::new(4, 5), Point::new(3, 5)],
            Direction::Right,
        );
        let mut obstacle = Obstacle::new(Point::new(6, 5), ObstacleKind::Blinking { period_ticks: 1 });
        obstacle.visible = false;
        state.obstacles.push(obstacle);

        for _ in 0..3 {
            state.advance(None, &mut rng);
            assert!(state.is_alive());
            assert!(!state.obstacles[0].visible);
        }

        state.advance(None, &mut rng);
        assert!(state.is_alive());
        assert!(state.obstacles[0].visible);
    }
}

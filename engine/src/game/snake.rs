use std::collections::VecDeque;

use super::types::{Direction, Point};

#[derive(Clone, Debug)]
pub struct Snake {
    pub body: VecDeque<Point>,
    pub direction: Direction,
    pub pending_direction: Option<Direction>,
}

impl Snake {
    pub fn new(start_pos: Point, direction: Direction, length: usize) -> Self {
        let (dx, dy) = direction.delta();
        let body = (0..length.max(1) as i32)
            .map(|i| Point::new(start_pos.x - dx * i, start_pos.y - dy * i))
            .collect();

        Self {
            body,
            direction,
            pending_direction: None,
        }
    }

    pub fn from_cells(cells: &[Point], direction: Direction) -> Self {
        Self {
            body: cells.iter().copied().collect(),
            direction,
            pending_direction: None,
        }
    }

    pub fn head(&self) -> Point {
        self.body[0]
    }

    pub fn tail(&self) -> Option<Point> {
        self.body.back().copied()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn occupies(&self, point: Point) -> bool {
        self.body.contains(&point)
    }

    pub fn body_contains_excluding_head(&self, point: Point) -> bool {
        self.body.iter().skip(1).any(|p| *p == point)
    }

    pub fn push_head(&mut self, head: Point) {
        self.body.push_front(head);
    }

    pub fn replace_head(&mut self, head: Point) {
        if let Some(front) = self.body.front_mut() {
            *front = head;
        }
    }

    pub fn pop_tail(&mut self) -> Option<Point> {
        if self.body.len() <= 1 {
            return None;
        }
        self.body.pop_back()
    }

    pub fn shrink(&mut self) -> usize {
        let remove = (self.body.len() / 2).min(3);
        for _ in 0..remove {
            self.pop_tail();
        }
        remove
    }

    pub fn queue_direction(&mut self, direction: Direction) -> Result<(), String> {
        if direction.is_opposite(&self.direction) {
            return Err(format!(
                "Cannot reverse from {:?} to {:?}",
                self.direction, direction
            ));
        }
        self.pending_direction = Some(direction);
        Ok(())
    }

    pub fn commit_direction(&mut self) {
        if let Some(direction) = self.pending_direction.take() {
            self.direction = direction;
        }
    }
}

use super::session_rng::SessionRng;
use super::types::{FieldSize, Point};

pub const SPAWN_ATTEMPTS: usize = 100;

/// Picks a random free cell. Falls back to a full scan once the random
/// attempts are exhausted, so a `None` always means the field is saturated.
pub fn find_free_cell<F>(field_size: &FieldSize, rng: &mut SessionRng, is_occupied: F) -> Option<Point>
where
    F: Fn(Point) -> bool,
{
    for _ in 0..SPAWN_ATTEMPTS {
        let x = rng.random_range(0..field_size.width as i32);
        let y = rng.random_range(0..field_size.height as i32);
        let pos = Point::new(x, y);

        if !is_occupied(pos) {
            return Some(pos);
        }
    }

    let free: Vec<Point> = field_size.cells().filter(|p| !is_occupied(*p)).collect();
    if free.is_empty() {
        return None;
    }
    Some(free[rng.random_range(0..free.len())])
}

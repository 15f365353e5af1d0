use super::types::Point;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PortalPair {
    pub a: Point,
    pub b: Point,
}

impl PortalPair {
    pub fn new(a: Point, b: Point) -> Self {
        Self { a, b }
    }

    pub fn contains(&self, point: Point) -> bool {
        self.a == point || self.b == point
    }

    pub fn exit_for(&self, entry: Point) -> Option<Point> {
        if entry == self.a {
            Some(self.b)
        } else if entry == self.b {
            Some(self.a)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_is_the_other_end() {
        let pair = PortalPair::new(Point::new(2, 2), Point::new(10, 10));
        assert_eq!(pair.exit_for(Point::new(2, 2)), Some(Point::new(10, 10)));
        assert_eq!(pair.exit_for(Point::new(10, 10)), Some(Point::new(2, 2)));
        assert_eq!(pair.exit_for(Point::new(3, 2)), None);
    }
}

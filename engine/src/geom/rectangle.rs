use glam::Vec2;

use super::aabb::Aabb;

/// Axis-aligned rectangle anchored at its top-left corner.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Rectangle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rectangle {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Inclusive point test. A rectangle with negative extents contains nothing.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    /// Strict overlap: rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rectangle) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }

    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn max(&self) -> Vec2 {
        Vec2::new(self.x + self.width, self.y + self.height)
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.min(), self.max())
    }

    pub fn translated(&self, offset: Vec2) -> Rectangle {
        Rectangle {
            x: self.x + offset.x,
            y: self.y + offset.y,
            ..*self
        }
    }
}

impl From<Aabb> for Rectangle {
    fn from(aabb: Aabb) -> Self {
        Rectangle::new(aabb.min.x, aabb.min.y, aabb.width(), aabb.height())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_inclusive() {
        let rect = Rectangle::new(10.0, 20.0, 30.0, 40.0);
        assert!(rect.contains(Vec2::new(25.0, 40.0)));
        assert!(rect.contains(Vec2::new(10.0, 20.0)));
        assert!(rect.contains(Vec2::new(40.0, 60.0)));
        assert!(!rect.contains(Vec2::new(9.9, 40.0)));
        assert!(!rect.contains(Vec2::new(25.0, 60.1)));
    }

    #[test]
    fn intersects_ignores_shared_edges_and_corners() {
        let base = Rectangle::new(10.0, 10.0, 20.0, 20.0);
        assert!(base.intersects(&Rectangle::new(10.0, 10.0, 20.0, 20.0)));
        assert!(base.intersects(&Rectangle::new(20.0, 20.0, 20.0, 20.0)));
        assert!(base.intersects(&Rectangle::new(15.0, 15.0, 10.0, 10.0)));
        assert!(base.intersects(&Rectangle::new(5.0, 5.0, 30.0, 30.0)));
        assert!(!base.intersects(&Rectangle::new(30.0, 10.0, 10.0, 20.0)));
        assert!(!base.intersects(&Rectangle::new(10.0, 30.0, 20.0, 10.0)));
        assert!(!base.intersects(&Rectangle::new(30.0, 30.0, 10.0, 10.0)));
        assert!(!base.intersects(&Rectangle::new(35.0, 35.0, 10.0, 10.0)));
    }

    #[test]
    fn center_min_max() {
        let rect = Rectangle::new(-10.0, -20.0, 20.0, 40.0);
        assert_eq!(rect.center(), Vec2::ZERO);
        assert_eq!(rect.min(), Vec2::new(-10.0, -20.0));
        assert_eq!(rect.max(), Vec2::new(10.0, 20.0));
        assert_eq!(Rectangle::new(1.5, 2.5, 3.0, 4.0).center(), Vec2::new(3.0, 4.5));
    }

    #[test]
    fn zero_sized_rectangles_do_not_panic() {
        let line = Rectangle::new(10.0, 10.0, 0.0, 20.0);
        assert!(line.contains(Vec2::new(10.0, 15.0)));
        assert!(!line.contains(Vec2::new(11.0, 15.0)));
        assert_eq!(line.center(), Vec2::new(10.0, 20.0));

        let point = Rectangle::new(5.0, 5.0, 0.0, 0.0);
        assert!(point.contains(Vec2::new(5.0, 5.0)));
        assert!(!point.contains(Vec2::new(5.1, 5.0)));
        assert!(point.intersects(&Rectangle::new(0.0, 0.0, 10.0, 10.0)));
        assert!(!point.intersects(&Rectangle::new(5.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn negative_extent_contains_nothing() {
        let rect = Rectangle::new(10.0, 10.0, -5.0, -5.0);
        assert!(!rect.contains(Vec2::new(10.0, 10.0)));
        assert!(!rect.contains(Vec2::new(7.0, 7.0)));
        assert_eq!(rect.center(), Vec2::new(7.5, 7.5));
    }
}

use glam::Vec2;

use super::aabb::Aabb;
use super::rectangle::Rectangle;
use super::segment::{point_on_segment, segments_intersect};
use crate::error::PolygonError;

/// Simple polygon with vertices relative to `origin`. Fewer than three vertices is
/// allowed and behaves as an empty shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    origin: Vec2,
    points: Vec<Vec2>,
    local_aabb: Aabb,
}

impl Polygon {
    /// Builds a polygon from a flat `x,y` coordinate list.
    pub fn new(origin: Vec2, coords: &[f32]) -> Result<Self, PolygonError> {
        if coords.len() % 2 != 0 {
            return Err(PolygonError::OddCoordinateCount(coords.len()));
        }
        let points = coords
            .chunks_exact(2)
            .map(|pair| Vec2::new(pair[0], pair[1]))
            .collect();
        Ok(Self::from_points(origin, points))
    }

    pub fn from_points(origin: Vec2, points: Vec<Vec2>) -> Self {
        let local_aabb = Aabb::from_points(points.iter().copied()).unwrap_or_default();
        Self {
            origin,
            points,
            local_aabb,
        }
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    pub fn vertex_count(&self) -> usize {
        self.points.len()
    }

    /// True when the polygon cannot enclose any area.
    pub fn is_degenerate(&self) -> bool {
        self.points.len() < 3
    }

    pub fn local_points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn vertices(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.points.iter().map(move |p| *p + self.origin)
    }

    pub fn edges(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| {
            (
                self.points[i] + self.origin,
                self.points[(i + 1) % n] + self.origin,
            )
        })
    }

    pub fn local_aabb(&self) -> Aabb {
        self.local_aabb
    }

    pub fn aabb(&self) -> Aabb {
        self.local_aabb.translated(self.origin)
    }

    /// Ray-casting containment. Points on a vertex or an edge count as inside.
    pub fn contains_point(&self, point: Vec2) -> bool {
        if self.is_degenerate() || !self.aabb().contains_point(point) {
            return false;
        }
        if self.edges().any(|(a, b)| point_on_segment(point, a, b)) {
            return true;
        }

        let mut inside = false;
        for (a, b) in self.edges() {
            if (a.y > point.y) != (b.y > point.y) {
                let x_cross = (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x;
                if point.x < x_cross {
                    inside = !inside;
                }
            }
        }
        inside
    }

    pub fn intersects_rect(&self, rect: &Rectangle) -> bool {
        self.intersects_aabb(&rect.aabb())
    }

    /// Inclusive overlap with a box: touching edges and full containment both count.
    pub fn intersects_aabb(&self, aabb: &Aabb) -> bool {
        if self.is_degenerate() || !self.aabb().touches(aabb) {
            return false;
        }
        if self.vertices().any(|v| aabb.contains_point(v)) {
            return true;
        }
        if aabb.corners().iter().any(|c| self.contains_point(*c)) {
            return true;
        }

        let rect_edges = aabb.edges();
        self.edges().any(|(a, b)| {
            rect_edges
                .iter()
                .any(|(p, q)| segments_intersect(a, b, *p, *q))
        })
    }

    /// Inclusive polygon overlap. Cost is `O(edges * edges)`; fine for level geometry.
    pub fn intersects_polygon(&self, other: &Polygon) -> bool {
        if self.is_degenerate() || other.is_degenerate() || !self.aabb().touches(&other.aabb()) {
            return false;
        }
        if self.vertices().any(|v| other.contains_point(v)) {
            return true;
        }
        if other.vertices().any(|v| self.contains_point(v)) {
            return true;
        }

        self.edges().any(|(a, b)| {
            other
                .edges()
                .any(|(p, q)| segments_intersect(a, b, p, q))
        })
    }
}

use std::f32::consts::FRAC_1_SQRT_2;

use glam::Vec2;

use super::aabb::Aabb;
use super::segment::segments_intersect;
use crate::error::TriangleError;

/// Edges whose |dx| and |dy| differ by less than this are treated as 45° diagonals.
/// Surface sampling also skips edges shorter than this on either axis.
pub const SLOPE_TOLERANCE: f32 = 0.1;
pub const MIN_TRIANGLE_AREA: f32 = 0.01;
pub const MAX_TRIANGLE_AREA: f32 = 1.0e7;
/// Largest |cos| between two edges still accepted as a right angle.
const RIGHT_ANGLE_COS_TOLERANCE: f32 = 1.0e-3;

/// 45° ramp classes, named after the quadrant holding the right-angle corner
/// (y grows downward, so "Down" is the larger y).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlopeClass {
    #[default]
    None,
    /// Corner bottom-left; the surface rises to the left. Floor.
    DownLeft,
    /// Corner bottom-right; the surface rises to the right. Floor.
    DownRight,
    /// Corner top-left; ceiling ramp.
    UpLeft,
    /// Corner top-right; ceiling ramp.
    UpRight,
}

impl SlopeClass {
    /// Unit normal pointing from the right-angle corner out through the hypotenuse.
    pub fn normal(self) -> Option<Vec2> {
        let d = FRAC_1_SQRT_2;
        match self {
            SlopeClass::None => None,
            SlopeClass::DownLeft => Some(Vec2::new(d, -d)),
            SlopeClass::DownRight => Some(Vec2::new(-d, -d)),
            SlopeClass::UpLeft => Some(Vec2::new(d, d)),
            SlopeClass::UpRight => Some(Vec2::new(-d, d)),
        }
    }

    pub fn is_floor(self) -> bool {
        matches!(self, SlopeClass::DownLeft | SlopeClass::DownRight)
    }

    pub fn is_ceiling(self) -> bool {
        matches!(self, SlopeClass::UpLeft | SlopeClass::UpRight)
    }
}

/// Right-angled triangle with vertices stored relative to `origin`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    origin: Vec2,
    points: [Vec2; 3],
    local_aabb: Aabb,
    slope: SlopeClass,
    normal: Vec2,
}

impl Triangle {
    /// Builds a triangle from six flat coordinates `x0,y0,x1,y1,x2,y2`, relative to `origin`.
    pub fn new(origin: Vec2, coords: [f32; 6]) -> Result<Self, TriangleError> {
        Self::from_points(
            origin,
            [
                Vec2::new(coords[0], coords[1]),
                Vec2::new(coords[2], coords[3]),
                Vec2::new(coords[4], coords[5]),
            ],
        )
    }

    pub fn from_points(origin: Vec2, points: [Vec2; 3]) -> Result<Self, TriangleError> {
        if !origin.is_finite() {
            return Err(TriangleError::NonFiniteVertex);
        }
        validate(&points)?;

        let local_aabb = Aabb::new(
            points[0].min(points[1]).min(points[2]),
            points[0].max(points[1]).max(points[2]),
        );
        let (slope, normal) = classify(&points);

        Ok(Self {
            origin,
            points,
            local_aabb,
            slope,
            normal,
        })
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Same shape, moved so its origin sits at `origin`.
    pub fn with_origin(&self, origin: Vec2) -> Triangle {
        Triangle { origin, ..*self }
    }

    pub fn translated(&self, offset: Vec2) -> Triangle {
        self.with_origin(self.origin + offset)
    }

    pub fn local_points(&self) -> [Vec2; 3] {
        self.points
    }

    pub fn vertices(&self) -> [Vec2; 3] {
        self.points.map(|p| p + self.origin)
    }

    pub fn local_aabb(&self) -> Aabb {
        self.local_aabb
    }

    pub fn aabb(&self) -> Aabb {
        self.local_aabb.translated(self.origin)
    }

    pub fn slope(&self) -> SlopeClass {
        self.slope
    }

    pub fn normal(&self) -> Vec2 {
        self.normal
    }

    pub fn area(&self) -> f32 {
        signed_double_area(&self.points).abs() * 0.5
    }

    /// Same-sign cross product test; points on an edge count as inside.
    pub fn contains_point(&self, point: Vec2) -> bool {
        let [a, b, c] = self.vertices();
        let d1 = (b - a).perp_dot(point - a);
        let d2 = (c - b).perp_dot(point - b);
        let d3 = (a - c).perp_dot(point - c);

        let has_negative = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
        let has_positive = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
        !(has_negative && has_positive)
    }

    /// Inclusive overlap test against a box, used to prune grid cells the AABB touches
    /// but the triangle does not.
    pub fn intersects_aabb(&self, aabb: &Aabb) -> bool {
        if !self.aabb().touches(aabb) {
            return false;
        }

        let vertices = self.vertices();
        if vertices.iter().any(|v| aabb.contains_point(*v)) {
            return true;
        }
        if aabb.corners().iter().any(|c| self.contains_point(*c)) {
            return true;
        }

        (0..3).any(|i| {
            let a = vertices[i];
            let b = vertices[(i + 1) % 3];
            aabb.edges()
                .iter()
                .any(|(p, q)| segments_intersect(a, b, *p, *q))
        })
    }

    /// World-space Y of the sloped surface at world-space `x`, interpolated along the first
    /// edge whose horizontal span contains `x`. Axis-aligned legs are skipped.
    pub fn surface_y_at(&self, x: f32) -> Option<f32> {
        let vertices = self.vertices();
        (0..3).find_map(|i| {
            let a = vertices[i];
            let b = vertices[(i + 1) % 3];
            let d = b - a;
            if d.x.abs() < SLOPE_TOLERANCE || d.y.abs() < SLOPE_TOLERANCE {
                return None;
            }
            if x < a.x.min(b.x) || x > a.x.max(b.x) {
                return None;
            }
            let t = (x - a.x) / d.x;
            Some(a.y + t * d.y)
        })
    }
}

fn signed_double_area(points: &[Vec2; 3]) -> f32 {
    (points[1] - points[0]).perp_dot(points[2] - points[0])
}

fn validate(points: &[Vec2; 3]) -> Result<(), TriangleError> {
    if points.iter().any(|p| !p.is_finite()) {
        return Err(TriangleError::NonFiniteVertex);
    }

    for i in 0..3 {
        let a = points[i];
        let b = points[(i + 1) % 3];
        if a.distance_squared(b) <= f32::EPSILON {
            return Err(TriangleError::DuplicateVertices);
        }
    }

    let double_area = signed_double_area(points);
    let longest = (0..3)
        .map(|i| points[i].distance(points[(i + 1) % 3]))
        .fold(0.0f32, f32::max);
    if double_area.abs() <= f32::EPSILON * longest * longest {
        return Err(TriangleError::Collinear);
    }

    let area = double_area.abs() * 0.5;
    if area < MIN_TRIANGLE_AREA {
        return Err(TriangleError::AreaTooSmall {
            area,
            min: MIN_TRIANGLE_AREA,
        });
    }
    if area > MAX_TRIANGLE_AREA {
        return Err(TriangleError::AreaTooLarge {
            area,
            max: MAX_TRIANGLE_AREA,
        });
    }

    let has_right_angle = (0..3).any(|i| {
        let corner = points[i];
        let e1 = (points[(i + 1) % 3] - corner).normalize_or_zero();
        let e2 = (points[(i + 2) % 3] - corner).normalize_or_zero();
        e1.dot(e2).abs() <= RIGHT_ANGLE_COS_TOLERANCE
    });
    if !has_right_angle {
        return Err(TriangleError::NotRightAngled);
    }

    Ok(())
}

fn classify(points: &[Vec2; 3]) -> (SlopeClass, Vec2) {
    for i in 0..3 {
        let a = points[i];
        let b = points[(i + 1) % 3];
        let corner = points[(i + 2) % 3];
        let d = b - a;

        if d.x.abs() < SLOPE_TOLERANCE || (d.x.abs() - d.y.abs()).abs() >= SLOPE_TOLERANCE {
            continue;
        }

        let mid = (a + b) * 0.5;
        let slope = match (corner.x < mid.x, corner.y > mid.y) {
            (true, true) => SlopeClass::DownLeft,
            (false, true) => SlopeClass::DownRight,
            (true, false) => SlopeClass::UpLeft,
            (false, false) => SlopeClass::UpRight,
        };
        if let Some(normal) = slope.normal() {
            return (slope, normal);
        }
    }

    // Not a 45° ramp: use the longest edge, facing away from the opposite vertex.
    let (i, _) = (0..3)
        .map(|i| (i, points[i].distance_squared(points[(i + 1) % 3])))
        .fold((0, f32::MIN), |best, cur| if cur.1 > best.1 { cur } else { best });
    let a = points[i];
    let b = points[(i + 1) % 3];
    let corner = points[(i + 2) % 3];
    let mut normal = (b - a).perp().normalize_or_zero();
    if normal.dot(corner - a) > 0.0 {
        normal = -normal;
    }
    (SlopeClass::None, normal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn ramp(coords: [f32; 6]) -> Triangle {
        Triangle::new(Vec2::ZERO, coords).unwrap()
    }

    #[test]
    fn classifies_all_four_diagonals() {
        assert_eq!(ramp([0.0, 0.0, 0.0, 8.0, 8.0, 8.0]).slope(), SlopeClass::DownLeft);
        assert_eq!(ramp([8.0, 0.0, 8.0, 8.0, 0.0, 8.0]).slope(), SlopeClass::DownRight);
        assert_eq!(ramp([0.0, 0.0, 8.0, 0.0, 0.0, 8.0]).slope(), SlopeClass::UpLeft);
        assert_eq!(ramp([0.0, 0.0, 8.0, 0.0, 8.0, 8.0]).slope(), SlopeClass::UpRight);
    }

    #[test]
    fn floor_ramp_normal_points_up_and_out() {
        let tri = ramp([0.0, 0.0, 0.0, 8.0, 8.0, 8.0]);
        let n = tri.normal();
        assert_approx_eq!(n.length(), 1.0, 1e-5);
        assert_approx_eq!(n.x, 0.707, 1e-3);
        assert_approx_eq!(n.y, -0.707, 1e-3);
        assert!(tri.slope().is_floor());
    }

    #[test]
    fn shallow_right_triangle_has_no_class() {
        let tri = ramp([0.0, 8.0, 16.0, 8.0, 16.0, 0.0]);
        assert_eq!(tri.slope(), SlopeClass::None);
        assert!(tri.normal().y < 0.0);
        assert_approx_eq!(tri.normal().length(), 1.0, 1e-5);
    }

    #[test]
    fn rejects_degenerate_input_with_distinct_errors() {
        assert_eq!(
            Triangle::new(Vec2::ZERO, [0.0, 0.0, 0.0, 0.0, 5.0, 5.0]),
            Err(TriangleError::DuplicateVertices)
        );
        assert_eq!(
            Triangle::new(Vec2::ZERO, [0.0, 0.0, 1.0, 1.0, 2.0, 2.0]),
            Err(TriangleError::Collinear)
        );
        assert_eq!(
            Triangle::new(Vec2::ZERO, [f32::NAN, 0.0, 1.0, 1.0, 2.0, 0.0]),
            Err(TriangleError::NonFiniteVertex)
        );
        assert!(matches!(
            Triangle::new(Vec2::ZERO, [0.0, 0.0, 0.0, 0.1, 0.1, 0.1]),
            Err(TriangleError::AreaTooSmall { .. })
        ));
        assert!(matches!(
            Triangle::new(Vec2::ZERO, [0.0, 0.0, 0.0, 1.0e4, 1.0e4, 1.0e4]),
            Err(TriangleError::AreaTooLarge { .. })
        ));
        assert_eq!(
            Triangle::new(Vec2::ZERO, [0.0, 0.0, 10.0, 0.0, 3.0, 6.0]),
            Err(TriangleError::NotRightAngled)
        );
    }

    #[test]
    fn contains_point_uses_world_space() {
        let tri = Triangle::new(Vec2::new(100.0, 50.0), [0.0, 0.0, 0.0, 8.0, 8.0, 8.0]).unwrap();
        assert!(tri.contains_point(Vec2::new(101.0, 57.0)));
        assert!(tri.contains_point(Vec2::new(100.0, 50.0)));
        assert!(!tri.contains_point(Vec2::new(107.0, 51.0)));
        assert!(!tri.contains_point(Vec2::new(1.0, 7.0)));
    }

    #[test]
    fn surface_sampling_follows_hypotenuse() {
        let tri = Triangle::new(Vec2::new(0.0, 0.0), [0.0, 0.0, 0.0, 8.0, 8.0, 8.0]).unwrap();
        assert_approx_eq!(tri.surface_y_at(0.0).unwrap(), 0.0);
        assert_approx_eq!(tri.surface_y_at(4.0).unwrap(), 4.0);
        assert_approx_eq!(tri.surface_y_at(8.0).unwrap(), 8.0);
        assert!(tri.surface_y_at(9.0).is_none());
    }

    #[test]
    fn aabb_intersection_prunes_empty_corner() {
        let tri = ramp([0.0, 0.0, 0.0, 8.0, 8.0, 8.0]);
        assert!(tri.intersects_aabb(&Aabb::from_min_max(0.0, 4.0, 2.0, 8.0)));
        // Upper-right corner of the bounding box lies outside the ramp.
        assert!(!tri.intersects_aabb(&Aabb::from_min_max(6.0, 0.0, 8.0, 1.0)));
        // Box straddling the hypotenuse without containing any vertex.
        assert!(tri.intersects_aabb(&Aabb::from_min_max(3.0, 3.5, 4.5, 4.5)));
    }
}

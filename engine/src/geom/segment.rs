use glam::Vec2;

/// Distance under which a point is treated as lying on a segment.
pub const ON_SEGMENT_EPSILON: f32 = 1.0e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Collinear,
    Clockwise,
    CounterClockwise,
}

/// Orientation of the ordered triple `(p, q, r)`.
pub fn orientation(p: Vec2, q: Vec2, r: Vec2) -> Orientation {
    let value = (q.y - p.y) * (r.x - q.x) - (q.x - p.x) * (r.y - q.y);
    if value.abs() <= f32::EPSILON {
        Orientation::Collinear
    } else if value > 0.0 {
        Orientation::Clockwise
    } else {
        Orientation::CounterClockwise
    }
}

/// For collinear `p`, `q`, `r`: whether `q` lies within the span of segment `pr`.
fn within_span(p: Vec2, q: Vec2, r: Vec2) -> bool {
    q.x <= p.x.max(r.x) && q.x >= p.x.min(r.x) && q.y <= p.y.max(r.y) && q.y >= p.y.min(r.y)
}

/// Segment test that counts touching endpoints and collinear overlap as intersection.
pub fn segments_intersect(p1: Vec2, q1: Vec2, p2: Vec2, q2: Vec2) -> bool {
    let o1 = orientation(p1, q1, p2);
    let o2 = orientation(p1, q1, q2);
    let o3 = orientation(p2, q2, p1);
    let o4 = orientation(p2, q2, q1);

    if o1 != o2 && o3 != o4 {
        return true;
    }

    (o1 == Orientation::Collinear && within_span(p1, p2, q1))
        || (o2 == Orientation::Collinear && within_span(p1, q2, q1))
        || (o3 == Orientation::Collinear && within_span(p2, p1, q2))
        || (o4 == Orientation::Collinear && within_span(p2, q1, q2))
}

/// Whether `point` lies on segment `ab`, within `ON_SEGMENT_EPSILON`.
pub fn point_on_segment(point: Vec2, a: Vec2, b: Vec2) -> bool {
    let edge = b - a;
    let length = edge.length();
    if length <= ON_SEGMENT_EPSILON {
        return point.distance(a) <= ON_SEGMENT_EPSILON;
    }
    let distance_to_line = edge.perp_dot(point - a).abs() / length;
    if distance_to_line > ON_SEGMENT_EPSILON {
        return false;
    }
    point.x >= a.x.min(b.x) - ON_SEGMENT_EPSILON
        && point.x <= a.x.max(b.x) + ON_SEGMENT_EPSILON
        && point.y >= a.y.min(b.y) - ON_SEGMENT_EPSILON
        && point.y <= a.y.max(b.y) + ON_SEGMENT_EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crossing_segments_intersect() {
        assert!(segments_intersect(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
            Vec2::new(10.0, 0.0),
        ));
    }

    #[test]
    fn touching_endpoints_intersect() {
        assert!(segments_intersect(
            Vec2::new(0.0, 0.0),
            Vec2::new(5.0, 0.0),
            Vec2::new(5.0, 0.0),
            Vec2::new(5.0, 5.0),
        ));
    }

    #[test]
    fn parallel_segments_do_not_intersect() {
        assert!(!segments_intersect(
            Vec2::new(0.0, 0.0),
            Vec2::new(5.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(5.0, 1.0),
        ));
        assert!(!segments_intersect(
            Vec2::new(0.0, 0.0),
            Vec2::new(2.0, 0.0),
            Vec2::new(3.0, 0.0),
            Vec2::new(5.0, 0.0),
        ));
    }

    #[test]
    fn on_segment() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(10.0, 10.0);
        assert!(point_on_segment(Vec2::new(5.0, 5.0), a, b));
        assert!(point_on_segment(b, a, b));
        assert!(!point_on_segment(Vec2::new(11.0, 11.0), a, b));
        assert!(!point_on_segment(Vec2::new(5.0, 6.0), a, b));
    }
}

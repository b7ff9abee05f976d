/// A position on the plane, as `(x, y)`.
pub type Point = (f64, f64);

/// Euclidean distance between two points.
pub fn distance(p1: Point, p2: Point) -> f64 {
    let (dx, dy) = (p1.0 - p2.0, p1.1 - p2.1);
    (dx * dx + dy * dy).sqrt()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::assert_f64_approx;

    #[test]
    fn test_distance_pythagorean() {
        assert_f64_approx!(distance((0., 0.), (3., 4.)), 5.);
        assert_f64_approx!(distance((-1., -1.), (2., 3.)), 5.);
    }

    #[test]
    fn test_distance_symmetric() {
        let (a, b) = ((0.25, -0.7), (-0.4, 0.9));
        assert_f64_approx!(distance(a, b), distance(b, a));
        assert_f64_approx!(distance(a, a), 0.);
    }
}

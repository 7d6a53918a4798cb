use super::interpolation::MonotoneCubic;
use crate::engines::kinematics::LinkGeometry;
use crate::types::Point2;

/// Endpoints ordered by x: (left, right)
pub fn ordered_ends(start: Point2, end: Point2) -> (Point2, Point2) {
    if start.x <= end.x {
        (start, end)
    } else {
        (end, start)
    }
}

/// Pair up interleaved `[x0, y0, x1, y1, ...]` coordinates and sort by x
pub fn format(coordinates: &[f64]) -> Vec<Point2> {
    let mut points: Vec<Point2> = coordinates
        .chunks_exact(2)
        .map(|pair| Point2::new(pair[0], pair[1]))
        .collect();
    points.sort_by(|a, b| a.x.total_cmp(&b.x));
    points
}

/// Geometric admissibility of sorted via points.
///
/// Every via point must sit horizontally between the endpoints (left end
/// inclusive), outside the first link's sweep, inside full reach, and for a
/// two-link arm above the x axis.
pub fn check_point_validity(
    points: &[Point2],
    geometry: &LinkGeometry,
    start: Point2,
    end: Point2,
) -> bool {
    let (left, right) = ordered_ends(start, end);
    let inner = geometry.inner_radius();
    let outer = geometry.outer_radius();
    let upper_only = geometry.requires_upper_half_plane();

    points.iter().all(|p| {
        let r = p.norm();
        p.x >= left.x
            && p.x < right.x
            && r > inner
            && r < outer
            && (!upper_only || p.y > 0.0)
    })
}

/// Interpolant through left end, via points and right end.
///
/// `None` when the x coordinates are not strictly increasing, e.g. two via
/// points quantized onto the same column.
pub fn generate_trajectory(points: &[Point2], start: Point2, end: Point2) -> Option<MonotoneCubic> {
    let (left, right) = ordered_ends(start, end);
    let all = std::iter::once(left)
        .chain(points.iter().copied())
        .chain(std::iter::once(right));
    let (xs, ys): (Vec<f64>, Vec<f64>) = all.map(|p| (p.x, p.y)).unzip();
    MonotoneCubic::new(xs, ys)
}

/// Sample the path at roughly `epsilon` arc length apart.
///
/// The walk runs left to right with x-steps of `epsilon / sqrt(f'(x)^2 + 1)`
/// and is reversed when start is the right end; the first sample is always
/// `start` and the last always `end`, exactly.
pub fn discretize(
    interpolant: &MonotoneCubic,
    start: Point2,
    end: Point2,
    epsilon: f64,
) -> Vec<Point2> {
    let (left, right) = ordered_ends(start, end);
    let mut samples = vec![left];

    let mut x = left.x;
    loop {
        let slope = interpolant.derivative(x);
        let next = x + epsilon / (slope * slope + 1.0).sqrt();
        // Stops on overshoot, on a step lost to rounding, and on NaN
        if !(next > x && next < right.x) {
            break;
        }
        x = next;
        samples.push(Point2::new(x, interpolant.evaluate(x)));
    }
    samples.push(right);

    if start.x > end.x {
        samples.reverse();
    }
    samples
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arm() -> LinkGeometry {
        LinkGeometry::new(vec![4.0, 4.0]).unwrap()
    }

    #[test]
    fn test_format_pairs_and_sorts() {
        let points = format(&[1.1, 2.2, -1.0, 1.3, 1.5, 2.0]);
        assert_eq!(
            points,
            vec![Point2::new(-1.0, 1.3), Point2::new(1.1, 2.2), Point2::new(1.5, 2.0)]
        );
    }

    #[test]
    fn test_via_point_outside_x_span_rejected() {
        let start = Point2::new(-4.0, 0.0);
        let end = Point2::new(4.0, 0.0);
        // Perfectly reachable, upper half-plane, but right of the end point
        assert!(!check_point_validity(&[Point2::new(4.5, 3.0)], &arm(), start, end));
        assert!(!check_point_validity(&[Point2::new(-4.5, 3.0)], &arm(), start, end));
        // Same point passes once the endpoints are swapped and widened
        assert!(check_point_validity(
            &[Point2::new(4.5, 3.0)],
            &arm(),
            Point2::new(6.0, 1.0),
            Point2::new(-6.0, 1.0)
        ));
    }

    #[test]
    fn test_boundary_radius_rejected() {
        let start = Point2::new(-4.0, 0.0);
        let end = Point2::new(4.0, 0.0);
        assert!(!check_point_validity(&[Point2::new(0.0, 4.0)], &arm(), start, end));
        assert!(check_point_validity(&[Point2::new(0.0, 4.0001)], &arm(), start, end));
        assert!(!check_point_validity(&[Point2::new(0.0, 8.0)], &arm(), start, end));
    }

    #[test]
    fn test_lower_half_plane_only_for_two_links() {
        let start = Point2::new(-3.0, -1.0);
        let end = Point2::new(3.0, -1.0);
        let via = [Point2::new(0.0, -2.5)];
        assert!(!check_point_validity(&via, &LinkGeometry::new(vec![2.0, 2.0]).unwrap(), start, end));
        assert!(check_point_validity(
            &via,
            &LinkGeometry::new(vec![2.0, 1.0, 1.0]).unwrap(),
            start,
            end
        ));
    }

    #[test]
    fn test_trajectory_interpolates_via_points() {
        let via = [Point2::new(-1.0, 5.0), Point2::new(1.5, 4.5)];
        let start = Point2::new(4.0, 0.0);
        let end = Point2::new(-4.0, 0.0);
        let spline = generate_trajectory(&via, start, end).unwrap();
        assert_eq!(spline.domain(), (-4.0, 4.0));
        for p in via.iter().chain([&start, &end]) {
            assert!((spline.evaluate(p.x) - p.y).abs() < 1e-12);
        }
    }

    #[test]
    fn test_duplicate_x_has_no_trajectory() {
        let via = [Point2::new(-4.0, 5.0)];
        assert!(generate_trajectory(&via, Point2::new(-4.0, 0.0), Point2::new(4.0, 0.0)).is_none());
    }

    #[test]
    fn test_discretize_ends_exactly() {
        let start = Point2::new(-4.0, 0.0);
        let end = Point2::new(4.0, 0.0);
        let spline = generate_trajectory(&[Point2::new(0.0, 4.5)], start, end).unwrap();
        let samples = discretize(&spline, start, end, 0.05);

        assert_eq!(samples.first(), Some(&start));
        assert_eq!(samples.last(), Some(&end));
        for pair in samples.windows(2) {
            assert!(pair[1].x > pair[0].x);
            assert!(pair[0].distance(&pair[1]) < 0.06);
        }
    }

    #[test]
    fn test_discretize_right_to_left() {
        let start = Point2::new(4.0, 4.0);
        let end = Point2::new(-5.0, 3.0);
        let spline = generate_trajectory(&[Point2::new(0.0, 6.0)], start, end).unwrap();
        let samples = discretize(&spline, start, end, 0.1);

        assert_eq!(samples.first(), Some(&start));
        assert_eq!(samples.last(), Some(&end));
        assert!(samples.windows(2).all(|pair| pair[1].x < pair[0].x));
    }
}

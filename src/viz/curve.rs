//! Cardinal spline flattening.
//!
//! Segment `i` runs from `p[i]` to `p[i+1]` as a cubic Bézier with control points
//! `p[i] + k·(p[i+1] − p[i−1])` and `p[i+1] + k·(p[i] − p[i+2])`, `k = (1 − tension) / 6`.
//! At the ends the missing neighbor is mirrored so the curve leaves and enters with
//! zero extra tangent. Two points give a straight segment.

/// Flatten a cardinal spline through `points` into a polyline with `samples` straight
/// pieces per segment. The input points are always part of the output.
pub fn cardinal(points: &[(f64, f64)], tension: f64, samples: usize) -> Vec<(f64, f64)> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }
    let k = (1.0 - tension) / 6.0;
    let samples = samples.max(1);
    let at = |i: isize| -> (f64, f64) {
        if i < 0 {
            points[1]
        } else if i as usize >= n {
            points[n - 2]
        } else {
            points[i as usize]
        }
    };

    let mut out = Vec::with_capacity((n - 1) * samples + 1);
    out.push(points[0]);
    for i in 0..n - 1 {
        let i = i as isize;
        let (p0, p1) = (at(i), at(i + 1));
        let (prev, next) = (at(i - 1), at(i + 2));
        let c1 = (p0.0 + k * (p1.0 - prev.0), p0.1 + k * (p1.1 - prev.1));
        let c2 = (p1.0 + k * (p0.0 - next.0), p1.1 + k * (p0.1 - next.1));
        for s in 1..=samples {
            out.push(bezier(p0, c1, c2, p1, s as f64 / samples as f64));
        }
    }
    out
}

fn bezier(p0: (f64, f64), c1: (f64, f64), c2: (f64, f64), p1: (f64, f64), t: f64) -> (f64, f64) {
    let u = 1.0 - t;
    let (a, b, c, d) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
    (
        a * p0.0 + b * c1.0 + c * c2.0 + d * p1.0,
        a * p0.1 + b * c1.1 + c * c2.1 + d * p1.1,
    )
}

/// Closed outline of a band: the top edge left to right, then the bottom edge right to left.
///
/// `samples` holds `(x, y_bottom, y_top)` in pixel space, ordered by row.
pub fn area_outline(samples: &[(f64, f64, f64)], per_segment: usize) -> Vec<(f64, f64)> {
    let top: Vec<(f64, f64)> = samples.iter().map(|&(x, _, y1)| (x, y1)).collect();
    let bottom: Vec<(f64, f64)> = samples.iter().rev().map(|&(x, y0, _)| (x, y0)).collect();
    let mut outline = cardinal(&top, 0.0, per_segment);
    outline.extend(cardinal(&bottom, 0.0, per_segment));
    outline
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_inputs_pass_through() {
        assert!(cardinal(&[], 0.0, 8).is_empty());
        assert_eq!(cardinal(&[(1.0, 2.0)], 0.0, 8), vec![(1.0, 2.0)]);
        assert_eq!(
            cardinal(&[(0.0, 0.0), (1.0, 1.0)], 0.0, 8),
            vec![(0.0, 0.0), (1.0, 1.0)]
        );
    }

    #[test]
    fn passes_through_every_input_point() {
        let pts = [(0.0, 0.0), (10.0, 5.0), (20.0, -3.0), (30.0, 4.0)];
        let out = cardinal(&pts, 0.0, 6);
        assert_eq!(out.len(), 3 * 6 + 1);
        for (i, p) in pts.iter().enumerate() {
            let q = out[i * 6];
            assert!((q.0 - p.0).abs() < 1e-9 && (q.1 - p.1).abs() < 1e-9);
        }
    }

    #[test]
    fn collinear_points_stay_on_the_line() {
        let pts = [(0.0, 0.0), (1.0, 2.0), (2.0, 4.0), (3.0, 6.0)];
        for (x, y) in cardinal(&pts, 0.0, 5) {
            assert!((y - 2.0 * x).abs() < 1e-9);
        }
    }

    #[test]
    fn outline_goes_across_top_then_back_along_bottom() {
        let outline = area_outline(&[(0.0, 10.0, 5.0), (10.0, 12.0, 4.0)], 4);
        assert_eq!(outline, vec![(0.0, 5.0), (10.0, 4.0), (10.0, 12.0), (0.0, 10.0)]);
    }
}

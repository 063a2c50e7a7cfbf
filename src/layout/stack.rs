//! Wiggle-minimizing stack offset.
//!
//! Baselines follow the streamgraph "wiggle" rule: the first column sits on zero and each
//! later baseline shifts by the value-weighted mean movement of the band centers, so the
//! stack drifts as little as possible from one sample to the next. Series are then
//! stacked on that baseline in the given order.

/// Stack `series[i][j]` (series `i`, sample `j`) and return `(y0, y1)` per series per sample.
///
/// All series must have the same length. Non-finite values contribute nothing to the
/// baseline computation but are still stacked as-is.
pub fn stack_wiggle(series: &[Vec<f64>]) -> Vec<Vec<(f64, f64)>> {
    let n = series.len();
    let m = series.first().map_or(0, Vec::len);
    debug_assert!(series.iter().all(|s| s.len() == m), "ragged series");
    if n == 0 || m == 0 {
        return vec![Vec::new(); n];
    }

    let baselines = wiggle_baselines(series, m);

    let mut out: Vec<Vec<(f64, f64)>> = Vec::with_capacity(n);
    for (i, s) in series.iter().enumerate() {
        let bands = (0..m)
            .map(|j| {
                let y0 = if i == 0 {
                    baselines[j]
                } else {
                    let (p0, p1) = out[i - 1][j];
                    if p1.is_nan() { p0 } else { p1 }
                };
                (y0, y0 + s[j])
            })
            .collect();
        out.push(bands);
    }
    out
}

fn wiggle_baselines(series: &[Vec<f64>], m: usize) -> Vec<f64> {
    let finite = |v: f64| if v.is_finite() { v } else { 0.0 };
    let mut baselines = vec![0.0; m];
    let mut y = 0.0;
    for j in 1..m {
        let mut weight = 0.0; // sum of values in column j
        let mut moved = 0.0; // value-weighted movement of band centers
        let mut below = 0.0; // movement of the series stacked underneath
        for s in series {
            let cur = finite(s[j]);
            let delta = cur - finite(s[j - 1]);
            let center_shift = delta / 2.0 + below;
            below += delta;
            weight += cur;
            moved += center_shift * cur;
        }
        baselines[j - 1] = y;
        if weight != 0.0 {
            y -= moved / weight;
        }
    }
    baselines[m - 1] = y;
    baselines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_column_is_plain_stack_from_zero() {
        let out = stack_wiggle(&[vec![3.0], vec![2.0], vec![1.0]]);
        assert_eq!(out, vec![vec![(0.0, 3.0)], vec![(3.0, 5.0)], vec![(5.0, 6.0)]]);
    }

    #[test]
    fn constant_series_do_not_wiggle() {
        let out = stack_wiggle(&[vec![2.0, 2.0, 2.0], vec![1.0, 1.0, 1.0]]);
        for j in 0..3 {
            assert_eq!(out[0][j].0, 0.0);
        }
    }

    #[test]
    fn single_growing_series_is_centered_by_shift() {
        // One series from 2 to 4: the center should not move, so the baseline drops by 1.
        let out = stack_wiggle(&[vec![2.0, 4.0]]);
        assert_eq!(out[0][0], (0.0, 2.0));
        assert_eq!(out[0][1], (-1.0, 3.0));
    }

    #[test]
    fn empty_inputs() {
        assert!(stack_wiggle(&[]).is_empty());
        assert_eq!(stack_wiggle(&[vec![], vec![]]), vec![Vec::new(), Vec::new()]);
    }

    #[test]
    fn all_zero_column_keeps_previous_baseline() {
        let out = stack_wiggle(&[vec![1.0, 0.0, 1.0], vec![1.0, 0.0, 1.0]]);
        assert!(out.iter().flatten().all(|(a, b)| a.is_finite() && b.is_finite()));
    }
}

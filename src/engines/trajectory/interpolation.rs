/// Shape-preserving piecewise-cubic Hermite interpolant (PCHIP)
///
/// Node slopes follow Fritsch–Carlson: zero at local extrema, weighted
/// harmonic mean of neighbouring secants elsewhere, so the curve never
/// overshoots the data between nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct MonotoneCubic {
    xs: Vec<f64>,
    ys: Vec<f64>,
    slopes: Vec<f64>,
}

impl MonotoneCubic {
    /// Returns `None` unless there are at least two finite nodes with
    /// strictly increasing x.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> Option<Self> {
        if xs.len() < 2 || xs.len() != ys.len() {
            return None;
        }
        if xs.iter().chain(&ys).any(|v| !v.is_finite()) {
            return None;
        }
        if xs.windows(2).any(|w| w[1] <= w[0]) {
            return None;
        }

        let slopes = node_slopes(&xs, &ys);
        Some(Self { xs, ys, slopes })
    }

    pub fn nodes(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.xs.iter().copied().zip(self.ys.iter().copied())
    }

    /// x-range covered by the nodes
    pub fn domain(&self) -> (f64, f64) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        let (k, h, t) = self.locate(x);
        let t2 = t * t;
        let t3 = t2 * t;
        let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
        let h10 = t3 - 2.0 * t2 + t;
        let h01 = -2.0 * t3 + 3.0 * t2;
        let h11 = t3 - t2;
        h00 * self.ys[k]
            + h10 * h * self.slopes[k]
            + h01 * self.ys[k + 1]
            + h11 * h * self.slopes[k + 1]
    }

    /// dy/dx at `x`
    pub fn derivative(&self, x: f64) -> f64 {
        let (k, h, t) = self.locate(x);
        let t2 = t * t;
        let d00 = 6.0 * t2 - 6.0 * t;
        let d10 = 3.0 * t2 - 4.0 * t + 1.0;
        let d01 = -6.0 * t2 + 6.0 * t;
        let d11 = 3.0 * t2 - 2.0 * t;
        (d00 * self.ys[k] + d01 * self.ys[k + 1]) / h
            + d10 * self.slopes[k]
            + d11 * self.slopes[k + 1]
    }

    /// Interval index, its width and the local parameter; points outside the
    /// domain extrapolate with the end pieces.
    fn locate(&self, x: f64) -> (usize, f64, f64) {
        let last = self.xs.len() - 2;
        let k = self.xs.partition_point(|&node| node <= x).saturating_sub(1).min(last);
        let h = self.xs[k + 1] - self.xs[k];
        (k, h, (x - self.xs[k]) / h)
    }
}

fn node_slopes(xs: &[f64], ys: &[f64]) -> Vec<f64> {
    let n = xs.len();
    let h: Vec<f64> = xs.windows(2).map(|w| w[1] - w[0]).collect();
    let secants: Vec<f64> = ys.windows(2).zip(&h).map(|(w, h)| (w[1] - w[0]) / h).collect();

    if n == 2 {
        return vec![secants[0]; 2];
    }

    let mut slopes = vec![0.0; n];
    for k in 1..n - 1 {
        let (before, after) = (secants[k - 1], secants[k]);
        if before * after <= 0.0 {
            continue;
        }
        let w1 = 2.0 * h[k] + h[k - 1];
        let w2 = h[k] + 2.0 * h[k - 1];
        slopes[k] = (w1 + w2) / (w1 / before + w2 / after);
    }
    slopes[0] = end_slope(h[0], h[1], secants[0], secants[1]);
    slopes[n - 1] = end_slope(h[n - 2], h[n - 3], secants[n - 2], secants[n - 3]);
    slopes
}

/// One-sided three-point estimate, limited to keep the end piece monotone
fn end_slope(h0: f64, h1: f64, m0: f64, m1: f64) -> f64 {
    let d = ((2.0 * h0 + h1) * m0 - h0 * m1) / (h0 + h1);
    if d.signum() != m0.signum() || m0 == 0.0 {
        0.0
    } else if (m0.signum() != m1.signum() || m1 == 0.0) && d.abs() > 3.0 * m0.abs() {
        3.0 * m0
    } else {
        d
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passes_through_nodes() {
        let xs = vec![-3.0, -1.0, 1.1, 1.5, 3.0];
        let ys = vec![1.0, 1.3, 2.2, 2.0, 0.5];
        let spline = MonotoneCubic::new(xs.clone(), ys.clone()).unwrap();
        for (x, y) in xs.iter().zip(&ys) {
            assert!((spline.evaluate(*x) - y).abs() < 1e-12);
        }
    }

    #[test]
    fn test_no_overshoot_between_nodes() {
        let xs = vec![0.0, 1.0, 2.0, 3.0, 4.0];
        let ys = vec![0.0, 0.0, 5.0, 5.0, 5.0];
        let spline = MonotoneCubic::new(xs, ys).unwrap();
        let mut previous = spline.evaluate(0.0);
        for i in 1..=400 {
            let value = spline.evaluate(i as f64 * 0.01);
            assert!(value >= previous - 1e-12, "not monotone at {}", i);
            assert!((-1e-12..=5.0 + 1e-12).contains(&value));
            previous = value;
        }
    }

    #[test]
    fn test_flat_at_local_extremum() {
        let spline = MonotoneCubic::new(vec![-4.0, 0.0, 4.0], vec![0.0, 4.5, 0.0]).unwrap();
        assert!(spline.derivative(0.0).abs() < 1e-12);
        assert!(spline.evaluate(-2.0) <= 4.5);
    }

    #[test]
    fn test_two_nodes_is_linear() {
        let spline = MonotoneCubic::new(vec![0.0, 2.0], vec![1.0, 5.0]).unwrap();
        assert!((spline.evaluate(1.0) - 3.0).abs() < 1e-12);
        assert!((spline.derivative(0.5) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_derivative_matches_finite_difference() {
        let spline =
            MonotoneCubic::new(vec![-3.0, -1.0, 0.5, 2.0], vec![0.0, 2.0, 2.5, -1.0]).unwrap();
        for x in [-2.5, -0.3, 1.2, 1.9] {
            let h = 1e-6;
            let numeric = (spline.evaluate(x + h) - spline.evaluate(x - h)) / (2.0 * h);
            assert!((spline.derivative(x) - numeric).abs() < 1e-5);
        }
    }

    #[test]
    fn test_rejects_unsorted_or_repeated_x() {
        assert!(MonotoneCubic::new(vec![0.0, 0.0, 1.0], vec![0.0, 1.0, 2.0]).is_none());
        assert!(MonotoneCubic::new(vec![1.0, 0.0], vec![0.0, 1.0]).is_none());
        assert!(MonotoneCubic::new(vec![0.0], vec![0.0]).is_none());
    }
}

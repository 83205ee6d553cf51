/// Square-root scale mapping a metric value to a bubble radius.
///
/// Bubble area grows roughly with the value. Inputs outside the domain are
/// extrapolated, not clamped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SqrtScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl SqrtScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Scale with domain `[0, max]`; a missing or non-finite max collapses to 0
    pub fn from_max(max: Option<f64>, range: (f64, f64)) -> Self {
        let upper = max.filter(|m| m.is_finite()).unwrap_or(0.0);
        Self::new((0.0, upper), range)
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Map a value into the range.
    /// A zero-width domain maps every input to the lower bound of the range.
    pub fn scale(&self, value: f64) -> f64 {
        let (r0, r1) = self.range;
        let d0 = signed_sqrt(self.domain.0);
        let d1 = signed_sqrt(self.domain.1);
        let span = d1 - d0;
        if span == 0.0 || !span.is_finite() {
            return r0;
        }
        let t = (signed_sqrt(value) - d0) / span;
        r0 + (r1 - r0) * t
    }
}

#[inline(always)]
fn signed_sqrt(x: f64) -> f64 {
    if x < 0.0 {
        -(-x).sqrt()
    } else {
        x.sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_population_example() {
        let scale = SqrtScale::from_max(Some(400.0), (5.0, 100.0));
        assert_eq!(scale.domain(), (0.0, 400.0));
        assert!((scale.scale(400.0) - 100.0).abs() < 1e-9);
        assert!((scale.scale(100.0) - 52.5).abs() < 1e-9);
    }

    #[test]
    fn test_domain_bounds_hit_range_bounds() {
        let scale = SqrtScale::new((0.0, 37.0), (40.0, 100.0));
        assert_eq!(scale.scale(0.0), 40.0);
        assert!((scale.scale(37.0) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_domain_maps_to_minimum() {
        let empty = SqrtScale::from_max(None, (5.0, 100.0));
        assert_eq!(empty.scale(0.0), 5.0);
        assert_eq!(empty.scale(1_000_000.0), 5.0);

        let all_zero = SqrtScale::from_max(Some(0.0), (5.0, 40.0));
        assert_eq!(all_zero.scale(0.0), 5.0);
    }

    #[test]
    fn test_monotonic() {
        let scale = SqrtScale::from_max(Some(1e9), (5.0, 100.0));
        let mut last = f64::MIN;
        for v in [0.0, 1.0, 10.0, 1e3, 1e6, 1e9] {
            let r = scale.scale(v);
            assert!(r > last);
            last = r;
        }
    }

    #[test]
    fn test_sqrt_not_linear() {
        let scale = SqrtScale::from_max(Some(100.0), (0.0, 10.0));
        // linear would give 2.5
        assert!((scale.scale(25.0) - 5.0).abs() < 1e-9);
    }
}

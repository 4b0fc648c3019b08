/// Min-max scaling into `[0, 1]` using the extremes of a reference series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinMax {
    min: f64,
    max: f64,
}

impl MinMax {
    /// Find the extremes of `reference`.
    /// Returns `None` for an empty or constant reference, where scaling is undefined
    pub fn fit(reference: &[f64]) -> Option<Self> {
        let first = *reference.first()?;
        let (min, max) = reference
            .iter()
            .fold((first, first), |(min, max), v| (min.min(*v), max.max(*v)));
        if max == min {
            return None;
        }

        Some(Self { min, max })
    }

    /// Smallest reference value
    #[inline(always)]
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Largest reference value
    #[inline(always)]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// `(x - min) / (max - min)` for every value
    pub fn normalize(&self, values: &[f64]) -> Vec<f64> {
        values.iter().map(|v| (v - self.min) / (self.max - self.min)).collect()
    }

    /// `x * (max - min) + min` for every value
    pub fn denormalize(&self, values: &[f64]) -> Vec<f64> {
        values.iter().map(|v| v * (self.max - self.min) + self.min).collect()
    }
}

#[cfg(test)]
mod tests {
    use round::round;

    use super::*;

    #[test]
    fn normalize_into_unit_range() {
        let vals = [4.0, -2.0, 10.0, 1.0];
        let scaler = MinMax::fit(&vals).unwrap();
        assert_eq!(scaler.min(), -2.0);
        assert_eq!(scaler.max(), 10.0);

        let normed = scaler.normalize(&vals);
        assert_eq!(normed, vec![0.5, 0.0, 1.0, 0.25]);
    }

    #[test]
    fn denormalize_restores_values() {
        let vals = [12.3, 15.9, 9.1, 11.0];
        let scaler = MinMax::fit(&vals).unwrap();
        let restored = scaler.denormalize(&scaler.normalize(&vals));
        for (r, v) in restored.iter().zip(vals) {
            assert_eq!(round(*r, 9), v);
        }
    }

    #[test]
    fn degenerate_reference() {
        assert!(MinMax::fit(&[]).is_none());
        assert!(MinMax::fit(&[3.0, 3.0]).is_none());
    }
}

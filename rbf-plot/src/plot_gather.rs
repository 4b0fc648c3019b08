use crate::Series;

/// The series of a single run, each point placed at its position in the observed series.
/// Optional keys, such as dates, label those positions on the x axis.
#[derive(Debug, Clone, Default)]
pub struct PlotGather {
    targets: Series,
    in_sample: Series,
    forecast: Series,
    keys: Vec<String>,
}

impl PlotGather {
    /// Pair real values with their forecast, cut to the shorter of the two
    pub fn comparison(real: &[f64], forecast: &[f64]) -> Self {
        let mut gather = Self::default();
        for (i, (r, f)) in real.iter().zip(forecast).enumerate() {
            gather.push_target(i, *r);
            gather.push_forecast(i, *f);
        }
        gather
    }

    /// Label position `i` of the x axis with `keys[i]`
    pub fn with_keys(mut self, keys: Vec<String>) -> Self {
        self.keys = keys;
        self
    }

    #[inline(always)]
    pub fn push_target(&mut self, idx: usize, y: f64) {
        self.targets.push((idx as f64, y))
    }

    /// Prediction for a training template whose target sits at `idx`
    #[inline(always)]
    pub fn push_in_sample(&mut self, idx: usize, y: f64) {
        self.in_sample.push((idx as f64, y))
    }

    #[inline(always)]
    pub fn push_forecast(&mut self, idx: usize, y: f64) {
        self.forecast.push((idx as f64, y))
    }

    #[inline(always)]
    pub fn targets(&self) -> &Series {
        &self.targets
    }

    #[inline(always)]
    pub fn in_sample(&self) -> &Series {
        &self.in_sample
    }

    #[inline(always)]
    pub fn forecast(&self) -> &Series {
        &self.forecast
    }

    /// The key labelling x position `x`, positions between keys have none
    pub fn key_at(&self, x: f64) -> Option<&str> {
        if x < 0.0 || x.fract() != 0.0 {
            return None;
        }
        self.keys.get(x as usize).map(String::as_str)
    }
}

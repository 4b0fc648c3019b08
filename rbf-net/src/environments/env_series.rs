use std::sync::Arc;

use common::{average_accuracy_with, Error, Result, ZeroTargetPolicy};
use rbf_plot::PlotGather;

use crate::{Forecaster, TemplateSet, WindowConfig};

/// Outcome of a single evaluation run
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Accuracy on the training templates after fitting, in percent
    pub train_accuracy: f64,
    /// Accuracy of the recursive forecast over the test part, in percent
    pub test_accuracy: f64,
    /// The recursive forecast of the test part
    pub forecast: Vec<f64>,
}

/// Trains on the head of a series and forecasts its tail
pub struct EnvSeries {
    values: Arc<Vec<f64>>,
    train_len: usize,
    config: WindowConfig,
    policy: ZeroTargetPolicy,
}

impl EnvSeries {
    #[inline(always)]
    pub fn new(values: Arc<Vec<f64>>, train_len: usize, config: WindowConfig) -> Self {
        Self {
            values,
            train_len,
            config,
            policy: ZeroTargetPolicy::default(),
        }
    }

    /// Use `policy` for zero values when measuring accuracy
    pub fn with_zero_target_policy(mut self, policy: ZeroTargetPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The training templates cut out of the first `train_len` values
    pub fn templates(&self) -> Result<TemplateSet> {
        if self.train_len > self.values.len() {
            return Err(Error::InvalidWindowConfig(format!(
                "train length {} exceeds the {} available values",
                self.train_len,
                self.values.len()
            )));
        }

        TemplateSet::from_series(&self.values[..self.train_len], &self.config)
    }

    /// Fit `rc` to the training templates, then forecast the remaining values recursively
    pub fn evaluate<F>(&self, rc: &mut F, mut plot: Option<&mut PlotGather>) -> Result<Evaluation>
    where
        F: Forecaster,
    {
        let templates = self.templates()?;
        let _ = rc.train(templates.inputs(), templates.targets())?;

        let mut train_preds = Vec::with_capacity(templates.count());
        for k in 0..templates.count() {
            train_preds.push(rc.predict(&templates.inputs().row(k)?)?);
        }
        let train_targets = templates.targets().column(0)?;
        let train_accuracy = average_accuracy_with(&train_preds, &train_targets, self.policy)?;

        let input_size = self.config.input_size();
        let initial_input = &self.values[self.train_len - input_size..self.train_len];
        let test_targets = &self.values[self.train_len..];
        let forecast = rc.predict_recursively(initial_input, test_targets.len())?;
        let test_accuracy = average_accuracy_with(&forecast, test_targets, self.policy)?;
        info!(
            "train accuracy: {:.2}%, test accuracy: {:.2}% over {} steps",
            train_accuracy,
            test_accuracy,
            forecast.len()
        );

        if let Some(plot) = plot.as_mut() {
            for (i, v) in self.values.iter().enumerate() {
                plot.push_target(i, *v);
            }
            for (k, pred) in train_preds.iter().enumerate() {
                let target_idx = k * self.config.step_size + input_size;
                plot.push_in_sample(target_idx, *pred);
            }
            for (i, pred) in forecast.iter().enumerate() {
                plot.push_forecast(self.train_len + i, *pred);
            }
        }

        Ok(Evaluation {
            train_accuracy,
            test_accuracy,
            forecast,
        })
    }
}

#[cfg(test)]
mod tests {
    use lin_alg::ExactInterpolation;
    use round::round;

    use super::*;
    use crate::{Params, RbfNetwork};

    fn values() -> Arc<Vec<f64>> {
        Arc::new(vec![
            0.0, 3.0, 1.0, 4.0, 1.5, 5.0, 9.0, 2.0, 6.0, 5.5, 3.5, 5.8, 4.0, 2.5, 6.5,
        ])
    }

    #[test]
    fn env_series_evaluation() {
        if let Err(_) = pretty_env_logger::try_init() {}

        let env = EnvSeries::new(values(), 12, WindowConfig::new(3, 1, 1));
        let templates = env.templates().unwrap();
        let mut rc = RbfNetwork::new(Params::default(), templates.inputs(), ExactInterpolation).unwrap();

        let mut plot = PlotGather::default();
        let eval = env.evaluate(&mut rc, Some(&mut plot)).unwrap();

        assert_eq!(round(eval.train_accuracy, 4), 100.0);
        assert_eq!(eval.forecast.len(), 3);
        assert!(eval.test_accuracy >= 0.0 && eval.test_accuracy <= 100.0);

        assert_eq!(plot.targets().len(), 15);
        assert_eq!(plot.in_sample().len(), templates.count());
        assert_eq!(plot.in_sample()[0].0, 2.0);
        assert_eq!(plot.forecast()[0].0, 12.0);
    }

    #[test]
    fn env_series_train_len_too_long() {
        let env = EnvSeries::new(values(), 30, WindowConfig::new(3, 1, 1));
        assert!(matches!(env.templates().unwrap_err(), Error::InvalidWindowConfig(_)));
    }
}

use common::{Error, Result};
use lin_alg::Matrix;

/// How a flat series is cut into templates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowConfig {
    /// Number of consecutive values per template, inputs and outputs together
    pub window_size: usize,
    /// Offset between the starts of two consecutive templates
    pub step_size: usize,
    /// Number of trailing values of each window used as targets
    pub output_size: usize,
    /// Require the series length to be a multiple of `window_size`
    pub strict_length: bool,
}

impl WindowConfig {
    /// Create a new config that requires the series length to be divisible by the window size
    pub fn new(window_size: usize, step_size: usize, output_size: usize) -> Self {
        Self {
            window_size,
            step_size,
            output_size,
            strict_length: true,
        }
    }

    /// Accept series whose length is not a multiple of the window size
    pub fn allow_partial_series(mut self) -> Self {
        self.strict_length = false;
        self
    }

    /// Number of input values per template
    #[inline(always)]
    pub fn input_size(&self) -> usize {
        self.window_size - self.output_size
    }

    /// Number of templates a series of `len` values yields
    #[inline]
    pub fn template_count(&self, len: usize) -> usize {
        if self.step_size == 0 {
            return 0;
        }
        (len + self.step_size).saturating_sub(self.window_size) / self.step_size
    }

    fn validate(&self, len: usize) -> Result<()> {
        if self.step_size == 0 {
            return Err(Error::InvalidWindowConfig("step size must be at least 1".to_string()));
        }
        if self.output_size == 0 || self.output_size >= self.window_size {
            return Err(Error::InvalidWindowConfig(format!(
                "output size {} must be in [1, window size {})",
                self.output_size, self.window_size
            )));
        }
        if len < self.window_size {
            return Err(Error::InvalidWindowConfig(format!(
                "series of length {} is shorter than the window size {}",
                len, self.window_size
            )));
        }
        if self.strict_length && len % self.window_size != 0 {
            return Err(Error::InvalidWindowConfig(format!(
                "series length {} is not divisible by window size {}",
                len, self.window_size
            )));
        }

        Ok(())
    }
}

/// Input and target matrices cut out of a series, one row per template, in time order
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateSet {
    inputs: Matrix,
    targets: Matrix,
}

impl TemplateSet {
    /// Slice `data` into overlapping windows of `config.window_size` values,
    /// starting every `config.step_size` values.
    /// The leading values of each window become a row of inputs,
    /// the trailing `config.output_size` values a row of targets.
    pub fn from_series(data: &[f64], config: &WindowConfig) -> Result<Self> {
        config.validate(data.len())?;

        let count = config.template_count(data.len());
        let input_size = config.input_size();
        debug!(
            "windowing {} values: window {}, step {}, {} templates of {} inputs and {} outputs",
            data.len(),
            config.window_size,
            config.step_size,
            count,
            input_size,
            config.output_size,
        );

        let mut inputs = Vec::with_capacity(count * input_size);
        let mut targets = Vec::with_capacity(count * config.output_size);
        let mut rows = 0;
        for k in 0..count {
            let start = k * config.step_size;
            let end = start + config.window_size;
            if end > data.len() {
                break;
            }
            let (input, target) = data[start..end].split_at(input_size);
            inputs.extend_from_slice(input);
            targets.extend_from_slice(target);
            rows += 1;
        }

        Ok(Self {
            inputs: Matrix::new(rows, input_size, inputs)?,
            targets: Matrix::new(rows, config.output_size, targets)?,
        })
    }

    /// `T x I` matrix of template inputs
    #[inline(always)]
    pub fn inputs(&self) -> &Matrix {
        &self.inputs
    }

    /// `T x O` matrix of template targets
    #[inline(always)]
    pub fn targets(&self) -> &Matrix {
        &self.targets
    }

    /// Number of templates
    #[inline(always)]
    pub fn count(&self) -> usize {
        self.inputs.nrows()
    }
}

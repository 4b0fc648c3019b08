#[macro_use]
extern crate log;

use std::{sync::Arc, time::Instant};

use anyhow::Result;
use common::Error;
use dialoguer::{theme::ColorfulTheme, Select};
use lin_alg::{ExactInterpolation, TikhonovRegularization, WeightSolver};
use rbf_net::{
    environments::{EnvSeries, Evaluation},
    Params, RbfNetwork, WindowConfig,
};
use rbf_plot::{plot, PlotGather};
use time_series_generator::generate_sine_wave;

// a single period, so no two training templates coincide
const TRAIN_LEN: usize = 100;
const WINDOW_SIZE: usize = 4;
const SEED: Option<u64> = Some(0);
// keeps every value away from zero, where relative accuracy is undefined
const OFFSET: f64 = 2.0;

pub(crate) fn main() -> Result<()> {
    pretty_env_logger::init();

    let values = sine_values();
    info!("got {} datapoints", values.len());

    let env = EnvSeries::new(Arc::new(values), TRAIN_LEN, window_config());
    let params = Params {
        width: 0.05,
        seed: SEED,
        ..Default::default()
    };
    let ridge = TikhonovRegularization {
        regularization_coeff: 1e-6,
    };

    let solvers = vec!["Exact interpolation", "Tikhonov regularization"];
    let e = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Select weight solver")
        .items(&solvers)
        .default(0)
        .interact()?;
    let eval = match e {
        0 => match run(&env, params.clone(), ExactInterpolation, "img/sine_exact.png") {
            Err(Error::SingularMatrix { rcond }) => {
                warn!("activation matrix is singular (rcond {:e}), retrying with ridge", rcond);
                run(&env, params, ridge, "img/sine_ridge.png")?
            }
            res => res?,
        },
        1 => run(&env, params, ridge, "img/sine_ridge.png")?,
        _ => panic!("invalid weight solver selection"),
    };
    info!(
        "in-sample accuracy: {:.2}%, forecast accuracy: {:.2}%",
        eval.train_accuracy, eval.test_accuracy
    );

    Ok(())
}

/// Eight periods of a sine wave, shifted up by `OFFSET`
fn sine_values() -> Vec<f64> {
    let mut values: Vec<f64> = generate_sine_wave(100);
    values.append(&mut values.clone());
    values.append(&mut values.clone());
    values.append(&mut values.clone());
    values.iter_mut().for_each(|v| *v += OFFSET);
    values
}

fn window_config() -> WindowConfig {
    WindowConfig::new(WINDOW_SIZE, 1, 1)
}

fn run<S>(env: &EnvSeries, params: Params, solver: S, filename: &str) -> common::Result<Evaluation>
where
    S: WeightSolver,
{
    let templates = env.templates()?;
    let mut rc = RbfNetwork::new(params, templates.inputs(), solver)?;
    rc.log_settings();

    let mut p = PlotGather::default();
    let t0 = Instant::now();
    let eval = env.evaluate(&mut rc, Some(&mut p))?;
    info!("training and forecasting took {}ms", t0.elapsed().as_millis());

    if let Err(e) = plot(&p, filename, (2160, 2160)) {
        error!("could not plot to {}: {}", filename, e);
    }

    Ok(eval)
}

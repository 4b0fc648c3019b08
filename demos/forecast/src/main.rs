#[macro_use]
extern crate log;

use std::{path::PathBuf, time::Instant};

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use common::{average_accuracy_with, Error, MinMax, ZeroTargetPolicy};
use lin_alg::{ExactInterpolation, TikhonovRegularization, WeightSolver};
use rbf_net::{Forecaster, Params, RbfNetwork, TemplateSet, WindowConfig};
use rbf_plot::plot_comparison;

mod series_io;

use series_io::{read_series, save_result};

fn cli() -> Command {
    Command::new("forecast")
        .version(clap::crate_version!())
        .about("Fit a radial basis function network to a series and forecast it recursively")
        .arg(
            Arg::new("train")
                .long("train")
                .help("CSV file with the training series, value in the second column")
                .required(true)
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("test")
                .long("test")
                .help("CSV file with the series to forecast, its first column keys the output")
                .required(true)
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Where to write the forecast")
                .default_value("result.csv")
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("plot")
                .short('p')
                .long("plot")
                .help("Where to render the comparison of real and forecast values")
                .default_value("img/comparison.png")
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("window")
                .short('w')
                .long("window")
                .help("Template length, inputs plus the single target")
                .default_value("4")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("step")
                .short('s')
                .long("step")
                .help("Offset between two consecutive templates")
                .default_value("1")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("horizon")
                .long("horizon")
                .help("Number of values to forecast, defaults to the length of the test series")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("width")
                .long("width")
                .help("Activation window width of every neuron")
                .default_value("1.0")
                .value_parser(clap::value_parser!(f64)),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .help("Seed for the initial weights")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("ridge")
                .long("ridge")
                .help("Fit the weights with ridge regression using this coefficient")
                .value_parser(clap::value_parser!(f64)),
        )
        .arg(
            Arg::new("allow_partial")
                .long("allow-partial")
                .help("Accept a training length that is not a multiple of the window")
                .action(ArgAction::SetTrue),
        )
}

fn main() -> Result<()> {
    pretty_env_logger::init();

    let matches = cli().get_matches();
    run(&matches)
}

fn run(matches: &ArgMatches) -> Result<()> {
    let train_path = matches.get_one::<PathBuf>("train").context("missing --train")?;
    let test_path = matches.get_one::<PathBuf>("test").context("missing --test")?;
    let output = matches.get_one::<PathBuf>("output").context("missing --output")?;
    let plot_path = matches.get_one::<PathBuf>("plot").context("missing --plot")?;
    let window = *matches.get_one::<usize>("window").context("missing --window")?;
    let step = *matches.get_one::<usize>("step").context("missing --step")?;

    let train: Vec<f64> = read_series(train_path)?.into_iter().map(|o| o.value).collect();
    let (test_keys, test): (Vec<String>, Vec<f64>) =
        read_series(test_path)?.into_iter().map(|o| (o.key, o.value)).unzip();
    let horizon = matches.get_one::<usize>("horizon").copied().unwrap_or(test.len());
    info!("training values: {}, test values: {}, horizon: {}", train.len(), test.len(), horizon);

    let scaler = MinMax::fit(&train).context("training series is empty or constant")?;
    let normalized = scaler.normalize(&train);

    let mut config = WindowConfig::new(window, step, 1);
    if matches.get_flag("allow_partial") {
        config = config.allow_partial_series();
    }
    let templates = TemplateSet::from_series(&normalized, &config)?;
    let initial_input = &normalized[normalized.len() - config.input_size()..];

    let params = Params {
        width: *matches.get_one::<f64>("width").context("missing --width")?,
        seed: matches.get_one::<u64>("seed").copied(),
        ..Default::default()
    };

    let forecast = match matches.get_one::<f64>("ridge") {
        Some(coeff) => {
            let ridge = TikhonovRegularization {
                regularization_coeff: *coeff,
            };
            fit_and_forecast(&templates, params, ridge, initial_input, horizon)?
        }
        None => match fit_and_forecast(
            &templates,
            params.clone(),
            ExactInterpolation,
            initial_input,
            horizon,
        ) {
            Err(Error::SingularMatrix { rcond }) => {
                warn!("activation matrix is singular (rcond {:e}), retrying with ridge", rcond);
                let ridge = TikhonovRegularization {
                    regularization_coeff: 1e-6,
                };
                fit_and_forecast(&templates, params, ridge, initial_input, horizon)?
            }
            res => res?,
        },
    };
    let forecast = scaler.denormalize(&forecast);

    let accuracy = average_accuracy_with(&forecast, &test, ZeroTargetPolicy::Skip)?;
    info!("forecast accuracy: {:.2}%", accuracy);

    save_result(output, test_path, &forecast)?;
    if let Err(e) = plot_comparison(
        &test,
        &forecast,
        &test_keys,
        &plot_path.to_string_lossy(),
        (1600, 1600),
    ) {
        error!("could not plot to {}: {}", plot_path.display(), e);
    }

    Ok(())
}

/// Fit a fresh network to `templates` and forecast `horizon` values from `initial_input`
fn fit_and_forecast<S>(
    templates: &TemplateSet,
    params: Params,
    solver: S,
    initial_input: &[f64],
    horizon: usize,
) -> common::Result<Vec<f64>>
where
    S: WeightSolver,
{
    let mut rc = RbfNetwork::new(params, templates.inputs(), solver)?;
    rc.log_settings();

    let t0 = Instant::now();
    let _ = rc.train(templates.inputs(), templates.targets())?;
    info!("training took {}ms", t0.elapsed().as_millis());

    let mut in_sample = Vec::with_capacity(templates.count());
    for k in 0..templates.count() {
        in_sample.push(rc.predict(&templates.inputs().row(k)?)?);
    }
    let accuracy = average_accuracy_with(
        &in_sample,
        &templates.targets().column(0)?,
        ZeroTargetPolicy::Skip,
    )?;
    info!("in-sample accuracy: {:.2}%", accuracy);

    rc.predict_recursively(initial_input, horizon)
}

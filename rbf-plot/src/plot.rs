use plotters::prelude::*;

use crate::{PlotGather, PlotResult, Series};

/// Plot the targets together with in-sample predictions and the forecast
pub fn plot(gather: &PlotGather, filename: &str, dims: (u32, u32)) -> PlotResult {
    info!(
        "n_targets: {}, n_in_sample: {}, n_forecast: {}",
        gather.targets().len(),
        gather.in_sample().len(),
        gather.forecast().len()
    );

    draw_lines(
        gather,
        &[
            (gather.targets(), "targets", &BLACK),
            (gather.in_sample(), "in_sample", &RED),
            (gather.forecast(), "forecast", &GREEN),
        ],
        filename,
        dims,
    )
}

/// Plot real against forecast values, both truncated to the shorter of the two.
/// `keys` label the positions of the x axis, pass an empty slice for plain indices.
pub fn plot_comparison(
    real: &[f64],
    forecast: &[f64],
    keys: &[String],
    filename: &str,
    dims: (u32, u32),
) -> PlotResult {
    let gather = PlotGather::comparison(real, forecast).with_keys(keys.to_vec());
    info!("comparing {} values", gather.targets().len());

    plot(&gather, filename, dims)
}

/// Smallest box containing every point, widened where it would be degenerate
fn bounds<'a>(series: impl Iterator<Item = &'a Series>) -> Option<((f64, f64), (f64, f64))> {
    let mut points = series.flatten().filter(|(x, y)| x.is_finite() && y.is_finite());
    let (x0, y0) = *points.next()?;
    let (mut x_min, mut x_max, mut y_min, mut y_max) = (x0, x0, y0, y0);
    for (x, y) in points {
        x_min = x_min.min(*x);
        x_max = x_max.max(*x);
        y_min = y_min.min(*y);
        y_max = y_max.max(*y);
    }
    if x_max == x_min {
        x_max += 1.0;
    }
    if y_max == y_min {
        y_min -= 0.5;
        y_max += 0.5;
    }

    Some(((x_min, x_max), (y_min, y_max)))
}

fn draw_lines(
    gather: &PlotGather,
    lines: &[(&Series, &str, &RGBColor)],
    filename: &str,
    dims: (u32, u32),
) -> PlotResult {
    let Some(((ts_min, ts_max), (target_min, target_max))) =
        bounds(lines.iter().map(|(s, _, _)| *s))
    else {
        warn!("nothing to plot into {}", filename);
        return Ok(());
    };
    info!("target_min: {}, target_max: {}", target_min, target_max);

    let root_area = BitMapBackend::new(filename, dims).into_drawing_area();
    root_area.fill(&WHITE)?;
    let root_area = root_area.titled(filename, ("sans-serif", 20).into_font())?;

    let mut cc0 = ChartBuilder::on(&root_area)
        .margin(5)
        .set_all_label_area_size(50)
        .caption("values", ("sans-serif", 30).into_font().with_color(&BLACK))
        .build_cartesian_2d(ts_min..ts_max, target_min..target_max)?;
    cc0.configure_mesh()
        .x_labels(20)
        .y_labels(20)
        .x_label_formatter(&|v| match gather.key_at(v.round()) {
            Some(key) => key.to_string(),
            None => format!("{:.0}", v),
        })
        .y_label_formatter(&|v| format!("{:.4}", v))
        .draw()?;

    for (series, label, color) in lines {
        let color = **color;
        cc0.draw_series(LineSeries::new(series.iter().cloned(), &color))?
            .label(*label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &color));
    }
    cc0.configure_series_labels().border_style(&BLACK).draw()?;
    root_area.present()?;

    info!("successfully plotted to {}", filename);
    Ok(())
}

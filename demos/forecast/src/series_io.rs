use std::path::Path;

use anyhow::{bail, Context, Result};

/// One row of a series file: a key such as a date, and the observed value
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Observation {
    pub(crate) key: String,
    pub(crate) value: f64,
}

/// Read a headered csv file, taking the key from the first and the value from the second column
pub(crate) fn read_series(path: &Path) -> Result<Vec<Observation>> {
    let mut rdr = csv::Reader::from_path(path)
        .with_context(|| format!("unable to read series file {}", path.display()))?;

    let mut out = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let record = result.with_context(|| format!("{}: malformed row {}", path.display(), i + 1))?;
        let (Some(key), Some(value)) = (record.get(0), record.get(1)) else {
            bail!("{}: row {} has less than two columns", path.display(), i + 1);
        };
        let value: f64 = value
            .trim()
            .parse()
            .with_context(|| format!("{}: row {} value {:?}", path.display(), i + 1, value))?;
        if !value.is_finite() {
            bail!("{}: row {} value {} is not finite", path.display(), i + 1, value);
        }
        out.push(Observation {
            key: key.to_string(),
            value,
        });
    }
    debug!("read {} values from {}", out.len(), path.display());

    Ok(out)
}

/// Write `values` to `output`, reusing the header and the keys of the `reference` file
pub(crate) fn save_result(output: &Path, reference: &Path, values: &[f64]) -> Result<()> {
    let mut rdr = csv::Reader::from_path(reference)
        .with_context(|| format!("unable to read reference file {}", reference.display()))?;
    let headers = rdr.headers()?.clone();
    let keys = read_series(reference)?;
    if values.len() > keys.len() {
        bail!(
            "{} values to save but only {} keys in {}",
            values.len(),
            keys.len(),
            reference.display()
        );
    }

    let mut wtr = csv::Writer::from_path(output)
        .with_context(|| format!("unable to create {}", output.display()))?;
    wtr.write_record(&headers)?;
    for (obs, value) in keys.iter().zip(values) {
        wtr.write_record([obs.key.as_str(), format!("{:.6}", value).as_str()])?;
    }
    wtr.flush()?;
    info!("saved {} values to {}", values.len(), output.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{fs, path::PathBuf};

    use round::round;

    use super::*;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path =
            std::env::temp_dir().join(format!("rbf_forecast_{}_{}.csv", name, std::process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn read_second_column() {
        let path = temp_file("read", "date,meantemp\n2017-01-01,15.9\n2017-01-02,18.5\n");
        let series = read_series(&path).unwrap();
        assert_eq!(
            series,
            vec![
                Observation {
                    key: "2017-01-01".to_string(),
                    value: 15.9
                },
                Observation {
                    key: "2017-01-02".to_string(),
                    value: 18.5
                },
            ]
        );
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn read_rejects_garbage() {
        let path = temp_file("garbage", "date,meantemp\n2017-01-01,warm\n");
        assert!(read_series(&path).is_err());
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn read_rejects_non_finite_values() {
        for (name, value) in [("nan", "NaN"), ("inf", "inf"), ("neg_inf", "-inf")] {
            let path = temp_file(name, &format!("date,meantemp\n2017-01-01,{}\n", value));
            assert!(read_series(&path).is_err(), "{} accepted", value);
            fs::remove_file(path).unwrap();
        }
    }

    #[test]
    fn save_aligns_with_reference_keys() {
        let reference = temp_file("reference", "date,meantemp\n2017-01-01,15.9\n2017-01-02,18.5\n");
        let output = std::env::temp_dir().join(format!("rbf_forecast_out_{}.csv", std::process::id()));

        save_result(&output, &reference, &[16.25, 17.125]).unwrap();
        let written = read_series(&output).unwrap();
        assert_eq!(written[1].key, "2017-01-02");
        assert_eq!(round(written[1].value, 3), 17.125);

        let content = fs::read_to_string(&output).unwrap();
        assert!(content.starts_with("date,meantemp\n"));

        assert!(save_result(&output, &reference, &[1.0, 2.0, 3.0]).is_err());

        fs::remove_file(reference).unwrap();
        fs::remove_file(output).unwrap();
    }
}

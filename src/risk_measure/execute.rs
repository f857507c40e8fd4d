use{
    super::*,
    crate::{misc_types::*, observations::*, output::write_records, stats_methods::*},
    anyhow::{Context, Result},
    serde::Serialize,
    std::{
        fs::File,
        io::{BufReader, Read},
    },
    tracing::{info, warn},
};

/// A kernel sample together with the day and replicate it was fitted for
#[derive(Clone, Copy, Debug)]
pub struct DatedSample
{
    pub day: i64,
    pub rep: Option<i64>,
    pub sample: KernelSample,
}

pub fn read_samples<R: Read>(reader: R, country: Country) -> Result<Vec<DatedSample>>
{
    let mut reader = csv::Reader::from_reader(reader);
    let header = HeaderIndex::from_reader(&mut reader)?;
    let day = header.require("day")?;
    let gamma1 = header.require("gamma1")?;
    let delta = header.require("delta")?;
    let omega = header.require("omega")?;
    let xi_2 = header.require("xi_2")?;
    let zeta_2 = header.require("zeta_2")?;
    let (xi_3, zeta_3, rep) = if country.has_third_species(){
        (
            Some(header.require("xi_3")?),
            Some(header.require("zeta_3")?),
            Some(header.require("rep")?)
        )
    } else {
        (None, None, None)
    };

    let mut samples = Vec::new();
    for record in reader.records(){
        let record = record.context("malformed CSV record")?;
        let optional = |idx: Option<usize>, name: &str| -> Result<Option<f64>>
        {
            idx.map(|i| parse_f64(&record, i, name)).transpose()
        };
        samples.push(
            DatedSample{
                day: parse_integer(&record, day, "day")?,
                rep: rep.map(|i| parse_integer(&record, i, "rep")).transpose()?,
                sample: KernelSample{
                    gamma1: parse_f64(&record, gamma1, "gamma1")?,
                    delta: parse_f64(&record, delta, "delta")?,
                    omega: parse_f64(&record, omega, "omega")?,
                    xi_2: parse_f64(&record, xi_2, "xi_2")?,
                    xi_3: optional(xi_3, "xi_3")?,
                    zeta_2: parse_f64(&record, zeta_2, "zeta_2")?,
                    zeta_3: optional(zeta_3, "zeta_3")?,
                }
            }
        );
    }
    Ok(samples)
}

/// Distribution of log10 risk within one week
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct RiskRecord
{
    pub week: i64,
    pub day: i64,
    pub n: usize,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

pub fn run_risk_measure(param: &RiskMeasureParams) -> Result<()>
{
    let path = param.input_path();
    info!("Reading posterior samples from {}", path.display());
    let file = File::open(&path)
        .with_context(|| format!("unable to open {}", path.display()))?;
    let samples = read_samples(BufReader::new(file), param.country)
        .with_context(|| format!("unable to parse {}", path.display()))?;

    let records = weekly_risk(&samples, param);
    write_records(&param.output_path(), records)?;
    Ok(())
}

/// log10 risk of every sample fitted on the day of each requested week
pub fn weekly_risk(samples: &[DatedSample], param: &RiskMeasureParams) -> Vec<RiskRecord>
{
    let max_rep = param.country.max_risk_rep();
    param.weeks
        .iter()
        .filter_map(
            |&week|
            {
                let day = param.day_of_week(week);
                let risks: Vec<f64> = samples.iter()
                    .filter(|s| s.day == day)
                    .filter(|s| match (max_rep, s.rep){
                        (Some(max), Some(rep)) => rep <= max,
                        _ => true
                    })
                    .map(|s| s.sample.risk().log10())
                    .collect();
                if risks.is_empty(){
                    warn!("no posterior samples for week {week} (day {day})");
                    return None;
                }
                let summary = QuantileSummary::from_slice(&risks);
                Some(
                    RiskRecord{
                        week,
                        day,
                        n: summary.n,
                        min: summary.min,
                        q25: summary.q25,
                        median: summary.median,
                        q75: summary.q75,
                        max: summary.max,
                    }
                )
            }
        ).collect()
}

#[cfg(test)]
mod tests
{
    use super::*;

    // omega = 0, so risk = gamma1 * S * T * delta * 100
    const UK: &str = "\
day,rep,gamma1,delta,omega,xi_2,xi_3,zeta_2,zeta_3
26,1,0.01,1,0,0,0,0,0
26,2,0.1,1,0,0,0,0,0
26,2001,1000,1,0,0,0,0,0
33,1,1,1,0,1,0,1,0
";

    #[test]
    fn weekly_log_risk()
    {
        let samples = read_samples(UK.as_bytes(), Country::Uk).unwrap();
        assert_eq!(samples.len(), 4);
        let param = RiskMeasureParams{
            country: Country::Uk,
            weeks: vec![1, 2, 3],
            input: None,
            output: None
        };
        let records = weekly_risk(&samples, &param);
        assert_eq!(records.len(), 2);

        let week1 = &records[0];
        assert_eq!((week1.week, week1.day, week1.n), (1, 26, 2));
        assert!((week1.min - 0.0).abs() < 1e-9);
        assert!((week1.max - 1.0).abs() < 1e-9);
        assert!((week1.median - 0.5).abs() < 1e-9);

        // 1 * 2 * 2 * 1 * 100
        assert!((records[1].median - 400_f64.log10()).abs() < 1e-9);
    }

    #[test]
    fn japan_has_two_species()
    {
        let data = "day,gamma1,delta,omega,xi_2,zeta_2\n34,1,1,0,0,0\n";
        let samples = read_samples(data.as_bytes(), Country::Japan).unwrap();
        assert_eq!(samples[0].sample.xi_3, None);
        assert_eq!(samples[0].rep, None);

        // the UK fit needs the third species
        assert!(read_samples(data.as_bytes(), Country::Uk).is_err());
    }
}

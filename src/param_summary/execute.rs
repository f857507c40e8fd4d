use{
    super::*,
    crate::{misc_types::*, observations::*, output::write_records, stats_methods::*},
    anyhow::{bail, Context, Result},
    serde::Serialize,
    std::{
        fs::File,
        io::{BufReader, Read},
    },
    tracing::{debug, info},
};

/// Posterior samples of the fitted parameters, one row per sample
pub struct ParameterSamples
{
    weeks: Vec<i64>,
    columns: Vec<(String, Vec<f64>)>,
}

impl ParameterSamples{
    /// Weeks come from a `week` column or, if absent, from `day`
    /// relative to the first week of the outbreak.
    /// Requested parameters missing from the file are skipped.
    pub fn from_reader<R: Read>(reader: R, parameters: &[String], country: Country) -> Result<Self>
    {
        let mut reader = csv::Reader::from_reader(reader);
        let header = HeaderIndex::from_reader(&mut reader)?;
        let week_source = match (header.find(WEEK_COLUMN), header.find("day")){
            (Some(idx), _) => WeekSource::Week(idx),
            (None, Some(idx)) => WeekSource::Day(idx),
            (None, None) => bail!("neither a 'week' nor a 'day' column")
        };

        let mut indices = Vec::new();
        for name in parameters{
            match header.find(name){
                Some(idx) => indices.push((name.clone(), idx)),
                None => info!("parameter {name} not in the data of {country}, skipping")
            }
        }

        let mut weeks = Vec::new();
        let mut columns: Vec<(String, Vec<f64>)> = indices.iter()
            .map(|(name, _)| (name.clone(), Vec::new()))
            .collect();
        let mut fractional = 0_usize;
        for record in reader.records(){
            let record = record.context("malformed CSV record")?;
            let week = match week_source{
                WeekSource::Week(idx) => parse_f64(&record, idx, WEEK_COLUMN)?,
                WeekSource::Day(idx) => {
                    let day = parse_f64(&record, idx, "day")?;
                    (day - country.parameter_day_offset()) / 7.0
                }
            };
            if !week.is_finite() || week.fract() != 0.0 {
                fractional += 1;
                continue;
            }
            weeks.push(week as i64);
            for ((name, idx), (_, column)) in indices.iter().zip(columns.iter_mut()){
                column.push(parse_f64(&record, *idx, name)?);
            }
        }
        if fractional > 0 {
            debug!("skipped {fractional} samples between weeks");
        }
        Ok(Self{weeks, columns})
    }

    pub fn len(&self) -> usize
    {
        self.weeks.len()
    }

    pub fn is_empty(&self) -> bool
    {
        self.weeks.is_empty()
    }
}

#[derive(Clone, Copy)]
enum WeekSource
{
    Week(usize),
    Day(usize),
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct SummaryRecord
{
    pub parameter: String,
    pub scale: &'static str,
    pub week: i64,
    pub n: usize,
    pub avg: f64,
    pub l95: f64,
    pub u95: f64,
}

pub fn run_param_summary(param: &ParamSummaryParams) -> Result<()>
{
    let path = param.input_path();
    info!("Reading posterior samples from {}", path.display());
    let file = File::open(&path)
        .with_context(|| format!("unable to open {}", path.display()))?;
    let samples = ParameterSamples::from_reader(BufReader::new(file), &param.parameters(), param.country)
        .with_context(|| format!("unable to parse {}", path.display()))?;
    info!("{} posterior samples", samples.len());

    let records = summarise(&samples, &param.weeks);
    write_records(&param.output_path(), records)?;
    Ok(())
}

/// Mean, 2.5% and 97.5% quantile of every parameter per week.
/// If `weeks` is empty all weeks are summarised, in ascending order.
pub fn summarise(samples: &ParameterSamples, weeks: &[i64]) -> Vec<SummaryRecord>
{
    let mut weeks: Vec<i64> = if weeks.is_empty(){
        weeks_in_order(samples.weeks.iter().copied())
    } else {
        weeks.to_vec()
    };
    weeks.sort_unstable();
    weeks.dedup();

    let mut records = Vec::new();
    for (name, column) in samples.columns.iter(){
        let logged = LOGGED_PARAMETERS.contains(&name.as_str());
        for &week in weeks.iter(){
            let values: Vec<f64> = samples.weeks
                .iter()
                .zip(column.iter())
                .filter(|(w, v)| **w == week && !v.is_nan())
                .map(|(_, &v)| if logged {v.ln()} else {v})
                .collect();
            if values.is_empty(){
                continue;
            }
            records.push(
                SummaryRecord{
                    parameter: name.clone(),
                    scale: if logged {"log"} else {"linear"},
                    week,
                    n: values.len(),
                    avg: calc_average(&values),
                    l95: quantile(&values, 0.025),
                    u95: quantile(&values, 0.975),
                }
            );
        }
    }
    records
}

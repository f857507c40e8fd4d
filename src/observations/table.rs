use{
    super::columns::*,
    crate::misc_types::*,
    anyhow::{Context, Result},
    std::{
        fs::File,
        io::{BufReader, Read},
        path::Path,
    },
    tracing::{debug, info},
};

/// One simulation run of one control at one week
#[derive(Clone, Debug, PartialEq)]
pub struct Observation
{
    pub week: i64,
    pub control: String,
    pub regime: String,
    /// one value per objective of the table, NaN if missing
    pub values: Vec<f64>,
}

/// A single objective value of a (regime, objective) slice
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlicePoint<'a>
{
    pub week: i64,
    pub control: &'a str,
    pub value: f64,
}

/// Simulation output, read once and never modified
#[derive(Clone, Debug)]
pub struct ObservationTable
{
    objectives: Vec<String>,
    rows: Vec<Observation>,
}

impl ObservationTable{
    pub fn from_path<P>(path: P, objectives: &[String]) -> Result<Self>
    where P: AsRef<Path>
    {
        let path = path.as_ref();
        info!("Reading simulation output from {}", path.display());
        let file = File::open(path)
            .with_context(|| format!("unable to open {}", path.display()))?;
        Self::from_reader(BufReader::new(file), objectives)
            .with_context(|| format!("unable to parse {}", path.display()))
    }

    pub fn from_reader<R: Read>(reader: R, objectives: &[String]) -> Result<Self>
    {
        let mut reader = csv::Reader::from_reader(reader);
        let header = HeaderIndex::from_reader(&mut reader)?;
        let week_idx = header.require(WEEK_COLUMN)?;
        let control_idx = header.require(CONTROL_COLUMN)?;
        let regime_idx = header.require(REGIME_COLUMN)?;
        let objective_idx = objectives.iter()
            .map(|o| header.require(o))
            .collect::<Result<Vec<_>>>()?;

        let mut rows = Vec::new();
        for record in reader.records(){
            let record = record.context("malformed CSV record")?;
            let values = objective_idx.iter()
                .zip(objectives)
                .map(|(&idx, name)| parse_f64(&record, idx, name))
                .collect::<Result<Vec<_>>>()?;
            rows.push(
                Observation{
                    week: parse_integer(&record, week_idx, WEEK_COLUMN)?,
                    control: parse_text(&record, control_idx, CONTROL_COLUMN)?,
                    regime: parse_text(&record, regime_idx, REGIME_COLUMN)?,
                    values
                }
            );
        }
        debug!("read {} observations", rows.len());
        Ok(
            Self{
                objectives: objectives.to_vec(),
                rows
            }
        )
    }

    pub fn rows(&self) -> &[Observation]
    {
        &self.rows
    }

    pub fn objectives(&self) -> &[String]
    {
        &self.objectives
    }

    /// # Rows of one (regime, objective) combination
    /// Only controls of the vocabulary are kept, rows without a value
    /// for the objective are skipped. Input order is preserved.
    pub fn slice<'a>(
        &'a self,
        regime: &str,
        objective: usize,
        vocabulary: &ControlVocabulary
    ) -> Vec<SlicePoint<'a>>
    {
        let mut skipped = 0_usize;
        let points: Vec<_> = self.rows
            .iter()
            .filter(|row| row.regime == regime && vocabulary.contains(&row.control))
            .filter_map(
                |row|
                {
                    let value = row.values[objective];
                    if value.is_nan(){
                        skipped += 1;
                        None
                    } else {
                        Some(
                            SlicePoint{
                                week: row.week,
                                control: row.control.as_str(),
                                value
                            }
                        )
                    }
                }
            ).collect();
        if skipped > 0 {
            debug!(
                "{regime}/{}: skipped {skipped} rows without a value",
                self.objectives[objective]
            );
        }
        points
    }
}

/// Distinct weeks in order of first appearance
pub fn weeks_in_order<I>(weeks: I) -> Vec<i64>
where I: IntoIterator<Item=i64>
{
    let mut seen = Vec::new();
    for week in weeks{
        if !seen.contains(&week){
            seen.push(week);
        }
    }
    seen
}

#[cfg(test)]
mod tests
{
    use super::*;

    const DATA: &str = "\
week,control,params_used,total_culls,final_estimated_duration
1,ip,final,10,40
1,v3,final,8,
1,ip,accrued,11,41
2.0,ip,final,7,30
1,rc3_low,final,2,10
";

    fn objectives() -> Vec<String>
    {
        vec!["total_culls".to_owned(), "final_estimated_duration".to_owned()]
    }

    #[test]
    fn reads_rows()
    {
        let table = ObservationTable::from_reader(DATA.as_bytes(), &objectives()).unwrap();
        assert_eq!(table.rows().len(), 5);
        assert_eq!(table.rows()[3].week, 2);
        assert_eq!(table.objectives()[1], "final_estimated_duration");
        assert!(table.rows()[1].values[1].is_nan());
    }

    #[test]
    fn missing_objective_column_is_an_error()
    {
        let res = ObservationTable::from_reader(DATA.as_bytes(), &["duration".to_owned()]);
        assert!(res.is_err());
    }

    #[test]
    fn slice_filters_regime_vocabulary_and_missing()
    {
        let table = ObservationTable::from_reader(DATA.as_bytes(), &objectives()).unwrap();
        let vocab = Country::Uk.controls();

        let culls = table.slice("final", 0, &vocab);
        let controls: Vec<_> = culls.iter().map(|p| p.control).collect();
        assert_eq!(controls, vec!["ip", "v3", "ip"]);

        let duration = table.slice("final", 1, &vocab);
        assert_eq!(duration.len(), 2);

        let weeks = weeks_in_order(culls.iter().map(|p| p.week));
        assert_eq!(weeks, vec![1, 2]);
    }
}

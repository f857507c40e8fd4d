use{
    super::*,
    crate::{misc_types::*, observations::*, output::write_records, stats_methods::*},
    anyhow::{Context, Result},
    serde::Serialize,
    tracing::{info, warn},
};

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct RankingRecord
{
    pub week: i64,
    pub params_used: String,
    pub control: String,
    pub mean: f64,
    /// 1 is the largest mean
    pub ranking: usize,
}

pub fn run_mean_ranking(param: &MeanRankingParams) -> Result<()>
{
    let objectives = [param.objective.clone()];
    let table = ObservationTable::from_path(param.input_path(), &objectives)?;
    let records = mean_rankings(&table, &param.regimes(), 0, &param.vocabulary());
    write_records(&param.output_path(), records)
        .context("could not write rankings")?;
    Ok(())
}

/// Mean objective of every control within each (regime, week),
/// ranked in descending order with ties sharing the lowest rank.
/// Weeks ascending, controls in vocabulary order, absent controls omitted.
pub fn mean_rankings(
    table: &ObservationTable,
    regimes: &[String],
    objective: usize,
    vocabulary: &ControlVocabulary
) -> Vec<RankingRecord>
{
    let mut records = Vec::new();
    for regime in regimes{
        let points = table.slice(regime, objective, vocabulary);
        if points.is_empty(){
            warn!("no observations for parameters {regime}");
            continue;
        }
        let mut weeks = weeks_in_order(points.iter().map(|p| p.week));
        weeks.sort_unstable();
        info!("Ranking {} weeks of {regime} parameters", weeks.len());

        for week in weeks{
            let means: Vec<(&str, f64)> = vocabulary.iter()
                .filter_map(
                    |control|
                    {
                        let values: Vec<f64> = points.iter()
                            .filter(|p| p.week == week && p.control == control)
                            .map(|p| p.value)
                            .collect();
                        (!values.is_empty()).then(|| (control, calc_average(&values)))
                    }
                ).collect();
            let values: Vec<f64> = means.iter().map(|(_, m)| *m).collect();
            let ranks = rank_min_descending(&values);

            records.extend(
                means.into_iter()
                    .zip(ranks)
                    .map(
                        |((control, mean), ranking)|
                        RankingRecord{
                            week,
                            params_used: regime.clone(),
                            control: control.to_owned(),
                            mean,
                            ranking
                        }
                    )
            );
        }
    }
    records
}

#[cfg(test)]
mod tests
{
    use super::*;

    const DATA: &str = "\
week,control,params_used,total_culls
2,ip,final,10
2,ip,final,20
2,v3,final,15
2,rc3,final,40
1,ip,final,1
1,v3,final,3
1,rc3,final,3
1,ip,current,9
";

    fn table() -> ObservationTable
    {
        ObservationTable::from_reader(DATA.as_bytes(), &["total_culls".to_owned()]).unwrap()
    }

    #[test]
    fn ranks_by_mean()
    {
        let vocabulary = Country::Japan.controls();
        let records = mean_rankings(
            &table(),
            &["final".to_owned(), "current".to_owned()],
            0,
            &vocabulary
        );
        let summary: Vec<_> = records.iter()
            .map(|r| (r.week, r.params_used.as_str(), r.control.as_str(), r.ranking))
            .collect();
        assert_eq!(
            summary,
            vec![
                (1, "final", "ip", 3),
                (1, "final", "rc3", 1),
                (1, "final", "v3", 1),
                (2, "final", "ip", 2),
                (2, "final", "rc3", 1),
                (2, "final", "v3", 2),
                (1, "current", "ip", 1),
            ]
        );
        assert_eq!(records[3].mean, 15.0);
    }

    #[test]
    fn writes_file()
    {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("sim.csv");
        std::fs::write(&input, DATA).unwrap();
        let output = dir.path().join("ranking.csv");
        let param = MeanRankingParams{
            country: Country::Japan,
            input: Some(input),
            output: Some(output.clone()),
            ..MeanRankingParams::default()
        };
        run_mean_ranking(&param).unwrap();
        let written = std::fs::read_to_string(output).unwrap();
        assert!(written.starts_with("week,params_used,control,mean,ranking\n1,final,ip,1.0,3\n"));
        assert_eq!(written.lines().count(), 8);
    }
}

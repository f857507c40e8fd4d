use{
    super::*,
    crate::{misc_types::*, observations::*, output::write_records},
    anyhow::{bail, Result},
    rand::SeedableRng,
    rand_pcg::Pcg64,
    serde::Serialize,
    std::num::*,
    tracing::{debug, info, warn},
};

/// One output row: how often `control` won at `week`
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct CountRecord
{
    pub week: i64,
    pub params_used: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub objective: Option<String>,
    pub control: String,
    pub counts: u64,
}

pub fn run_bootstrap(param: &BootstrapRankParams) -> Result<()>
{
    let objectives = param.objectives();
    let table = ObservationTable::from_path(param.input_path(), &objectives)?;
    let records = bootstrap_counts(
        &table,
        &param.regimes(),
        &param.vocabulary(),
        param.n_boot,
        param.random_seed,
        param.strict
    )?;
    let written = write_records(&param.output_path(), records)?;
    info!("Wrote {written} counts");
    Ok(())
}

/// # Bootstrap counts of every regime and objective of the table
/// A single generator seeded once is used for all combinations,
/// regimes outermost, then objectives, then weeks.
/// The objective column is only filled if the table has more than one objective.
pub fn bootstrap_counts(
    table: &ObservationTable,
    regimes: &[String],
    vocabulary: &ControlVocabulary,
    n_boot: NonZeroUsize,
    seed: u64,
    strict: bool
) -> Result<Vec<CountRecord>>
{
    let mut rng = Pcg64::seed_from_u64(seed);
    let ranker = BootstrapRanker::new(vocabulary, n_boot);
    let several_objectives = table.objectives().len() > 1;

    let bar = crate::indication_bar((regimes.len() * table.objectives().len()) as u64);
    let mut records = Vec::new();

    for regime in regimes{
        info!("Generating bootstrap samples from {regime} parameters");
        for (objective_idx, objective) in table.objectives().iter().enumerate(){
            bar.set_message(&format!("{regime} {objective}"));
            let points = table.slice(regime, objective_idx, vocabulary);
            if points.is_empty(){
                warn!("no observations for parameters {regime} and objective {objective}");
            }

            for tally in ranker.tally_slice(&points, &mut rng){
                for issue in tally.issues.iter(){
                    if strict{
                        bail!(
                            "week {} ({regime} parameters, {objective}): {issue}",
                            tally.week
                        );
                    }
                    warn!("week {} ({regime} parameters, {objective}): {issue}", tally.week);
                }
                if let Some((leader, n)) = tally.leader(){
                    debug!(
                        "week {}: {leader} optimal in {:.1}% of trials",
                        tally.week,
                        100.0 * n as f64 / ranker.n_boot() as f64
                    );
                }
                let week = tally.week;
                records.extend(
                    tally.counts
                        .into_iter()
                        .map(
                            |(control, counts)|
                            CountRecord{
                                week,
                                params_used: regime.clone(),
                                objective: several_objectives.then(|| objective.clone()),
                                control,
                                counts
                            }
                        )
                );
            }
            bar.inc(1);
        }
    }
    bar.finish_and_clear();
    Ok(records)
}

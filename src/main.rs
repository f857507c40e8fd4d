use{
    std::{
        time::Instant
    },
    structopt::StructOpt,
    indicatif::*
};

pub mod misc_types;
pub mod observations;
pub mod stats_methods;
pub mod json_parsing;
pub mod logging;
pub mod output;
pub mod bootstrap_rank;
pub mod mean_ranking;
pub mod param_summary;
pub mod risk_measure;


pub const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() -> anyhow::Result<()> {
    let start_time = Instant::now();
    logging::init_logging();
    let opt = CmdOption::from_args();
    tracing::info!("control_rank v{VERSION}");
    match opt{
        CmdOption::BootstrapRank(o) => o.execute()?,
        CmdOption::MeanRanking(o) => o.execute()?,
        CmdOption::ParamSummary(o) => o.execute()?,
        CmdOption::RiskMeasure(o) => o.execute()?
    }
    println!("Execution took {}",humantime::format_duration(start_time.elapsed()));
    Ok(())
}

pub fn indication_bar(len: u64) -> ProgressBar
{
        // for indication on when it is finished
        let bar = ProgressBar::new(len);
        bar.set_style(ProgressStyle::default_bar()
            .template("{msg} [{elapsed_precise} - {eta_precise}] {wide_bar}"));
        bar
}


#[derive(Debug, StructOpt, Clone)]
#[structopt(about = "Ranking outbreak control interventions from simulation output")]
pub enum CmdOption
{
    BootstrapRank(bootstrap_rank::BootstrapRank),
    MeanRanking(mean_ranking::MeanRanking),
    ParamSummary(param_summary::ParamSummary),
    RiskMeasure(risk_measure::RiskMeasure)
}

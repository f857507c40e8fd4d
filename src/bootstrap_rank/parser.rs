use{
    super::*,
    structopt::StructOpt,
    std::{num::*, path::PathBuf},
    crate::json_parsing::*,
    serde::{Serialize, Deserialize},
    serde_json::Value,
    anyhow::Result,
    crate::misc_types::*,
};

pub const DEFAULT_BOOTSTRAP_REGIMES: [&str; 2] = ["final", "accrued"];

#[derive(Debug, StructOpt, Clone)]
/// Bootstrap how often each control is the optimal one, per week
pub struct BootstrapRank
{
    /// Country of interest ('uk' or 'japan')
    #[structopt(short, long, required_unless = "json")]
    country: Option<Country>,

    /// Random seed for initialising bootstrap sampling
    #[structopt(long, default_value = "100")]
    randomseed: u64,

    /// Number of bootstrap samples
    #[structopt(long, default_value = "1000")]
    nboot: NonZeroUsize,

    /// Simulation output, default data/simulation_output_<country>.csv
    #[structopt(long, parse(from_os_str))]
    input: Option<PathBuf>,

    /// Output file, default data/counts_<country>.csv
    #[structopt(long, parse(from_os_str))]
    output: Option<PathBuf>,

    /// Parameter sets to use, default: final accrued
    #[structopt(long)]
    regimes: Vec<String>,

    /// Objective columns, default: total_culls
    #[structopt(long)]
    objectives: Vec<String>,

    /// Controls to compare, default: all controls of the country
    #[structopt(long)]
    controls: Vec<String>,

    /// Abort if a week is not a balanced design
    #[structopt(long)]
    strict: bool,

    /// Specify the json file with the options.
    /// If given, all other options are ignored
    #[structopt(long)]
    json: Option<String>,
}

impl BootstrapRank{
    pub fn parse(&self) -> Result<(BootstrapRankParams, Value)>
    {
        parse(
            self.json.as_ref(),
            ||
            {
                let country = self.country.unwrap_or(Country::Uk);
                BootstrapRankParams{
                    country,
                    random_seed: self.randomseed,
                    n_boot: self.nboot,
                    input: self.input.clone(),
                    output: self.output.clone(),
                    regimes: self.regimes.clone(),
                    objectives: self.objectives.clone(),
                    controls: self.controls.clone(),
                    strict: self.strict
                }
            }
        )
    }

    pub fn execute(&self) -> Result<()>
    {
        let (param, _json) = self.parse()?;
        run_bootstrap(&param)
    }
}

/// Empty lists and missing paths mean "country default".
/// The country has no default, a parameter file has to name it
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct BootstrapRankParams
{
    pub country: Country,
    #[serde(default = "default_random_seed")]
    pub random_seed: u64,
    #[serde(default = "default_n_boot")]
    pub n_boot: NonZeroUsize,
    #[serde(default)]
    pub input: Option<PathBuf>,
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub regimes: Vec<String>,
    #[serde(default)]
    pub objectives: Vec<String>,
    #[serde(default)]
    pub controls: Vec<String>,
    #[serde(default)]
    pub strict: bool,
}

impl Default for BootstrapRankParams{
    fn default() -> Self
    {
        Self{
            country: Country::Uk,
            random_seed: DEFAULT_RANDOM_SEED,
            n_boot: DEFAULT_NBOOT,
            input: None,
            output: None,
            regimes: Vec::new(),
            objectives: Vec::new(),
            controls: Vec::new(),
            strict: false
        }
    }
}

impl BootstrapRankParams{
    pub fn input_path(&self) -> PathBuf
    {
        self.input
            .clone()
            .unwrap_or_else(|| self.country.data_file("simulation_output"))
    }

    pub fn output_path(&self) -> PathBuf
    {
        self.output
            .clone()
            .unwrap_or_else(|| self.country.data_file("counts"))
    }

    pub fn vocabulary(&self) -> ControlVocabulary
    {
        vocabulary_or_default(&self.controls, self.country)
    }

    pub fn regimes(&self) -> Vec<String>
    {
        or_defaults(&self.regimes, &DEFAULT_BOOTSTRAP_REGIMES)
    }

    pub fn objectives(&self) -> Vec<String>
    {
        or_defaults(&self.objectives, &[DEFAULT_OBJECTIVE])
    }
}

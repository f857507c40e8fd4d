use{
    super::*,
    structopt::StructOpt,
    std::path::PathBuf,
    crate::json_parsing::*,
    serde::{Serialize, Deserialize},
    serde_json::Value,
    anyhow::Result,
    crate::misc_types::*,
};

pub const DEFAULT_RANKING_REGIMES: [&str; 2] = ["final", "current"];

#[derive(Debug, StructOpt, Clone)]
/// Rank the controls by their mean objective value, per week
pub struct MeanRanking
{
    /// Country of interest ('uk' or 'japan')
    #[structopt(short, long, required_unless = "json")]
    country: Option<Country>,

    /// Simulation output, default data/simulation_output_<country>.csv
    #[structopt(long, parse(from_os_str))]
    input: Option<PathBuf>,

    /// Output file, default data/ranking_<country>.csv
    #[structopt(long, parse(from_os_str))]
    output: Option<PathBuf>,

    /// Parameter sets to use, default: final current
    #[structopt(long)]
    regimes: Vec<String>,

    /// Variable used for the management objective
    #[structopt(long = "obj", default_value = "total_culls")]
    objective: String,

    /// Controls to compare, default: all controls of the country
    #[structopt(long)]
    controls: Vec<String>,

    /// Specify the json file with the options.
    /// If given, all other options are ignored
    #[structopt(long)]
    json: Option<String>,
}

impl MeanRanking{
    pub fn parse(&self) -> Result<(MeanRankingParams, Value)>
    {
        parse(
            self.json.as_ref(),
            ||
            MeanRankingParams{
                country: self.country.unwrap_or(Country::Uk),
                input: self.input.clone(),
                output: self.output.clone(),
                regimes: self.regimes.clone(),
                objective: self.objective.clone(),
                controls: self.controls.clone()
            }
        )
    }

    pub fn execute(&self) -> Result<()>
    {
        let (param, _json) = self.parse()?;
        run_mean_ranking(&param)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct MeanRankingParams
{
    pub country: Country,
    #[serde(default)]
    pub input: Option<PathBuf>,
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub regimes: Vec<String>,
    #[serde(default = "default_objective")]
    pub objective: String,
    #[serde(default)]
    pub controls: Vec<String>,
}

impl Default for MeanRankingParams{
    fn default() -> Self
    {
        Self{
            country: Country::Uk,
            input: None,
            output: None,
            regimes: Vec::new(),
            objective: DEFAULT_OBJECTIVE.to_owned(),
            controls: Vec::new()
        }
    }
}

impl MeanRankingParams{
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
            .unwrap_or_else(|| self.country.data_file("ranking"))
    }

    pub fn vocabulary(&self) -> ControlVocabulary
    {
        vocabulary_or_default(&self.controls, self.country)
    }

    pub fn regimes(&self) -> Vec<String>
    {
        or_defaults(&self.regimes, &DEFAULT_RANKING_REGIMES)
    }
}

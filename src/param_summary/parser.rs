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

pub const DEFAULT_PARAMETERS: [&str; 15] = [
    "delta", "epsilon_1", "epsilon_2", "gamma_1", "gamma_2", "phi_1", "phi_2",
    "phi_3", "psi_1", "psi_2", "psi_3", "xi_2", "xi_3", "zeta_2", "zeta_3"
];

/// Parameters summarised on the natural log scale
pub const LOGGED_PARAMETERS: [&str; 3] = ["gamma_1", "epsilon_1", "epsilon_2"];

#[derive(Debug, StructOpt, Clone)]
/// Mean and 95% interval of the posterior parameters, per week
pub struct ParamSummary
{
    /// Country of interest ('uk' or 'japan')
    #[structopt(short, long, required_unless = "json")]
    country: Option<Country>,

    /// Posterior samples, default data/parameters_<country>.csv
    #[structopt(long, parse(from_os_str))]
    input: Option<PathBuf>,

    /// Output file, default data/param_summary_<country>.csv
    #[structopt(long, parse(from_os_str))]
    output: Option<PathBuf>,

    /// Weeks to summarise, default: all weeks
    #[structopt(short, long)]
    weeks: Vec<i64>,

    /// Parameters to summarise, default: the fitted kernel and species parameters
    #[structopt(long)]
    parameters: Vec<String>,

    /// Specify the json file with the options.
    /// If given, all other options are ignored
    #[structopt(long)]
    json: Option<String>,
}

impl ParamSummary{
    pub fn parse(&self) -> Result<(ParamSummaryParams, Value)>
    {
        parse(
            self.json.as_ref(),
            ||
            ParamSummaryParams{
                country: self.country.unwrap_or(Country::Uk),
                input: self.input.clone(),
                output: self.output.clone(),
                weeks: self.weeks.clone(),
                parameters: self.parameters.clone()
            }
        )
    }

    pub fn execute(&self) -> Result<()>
    {
        let (param, _json) = self.parse()?;
        run_param_summary(&param)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ParamSummaryParams
{
    pub country: Country,
    #[serde(default)]
    pub input: Option<PathBuf>,
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub weeks: Vec<i64>,
    #[serde(default)]
    pub parameters: Vec<String>,
}

impl Default for ParamSummaryParams{
    fn default() -> Self
    {
        Self{
            country: Country::Uk,
            input: None,
            output: None,
            weeks: Vec::new(),
            parameters: Vec::new()
        }
    }
}

impl ParamSummaryParams{
    pub fn input_path(&self) -> PathBuf
    {
        self.input
            .clone()
            .unwrap_or_else(|| self.country.data_file("parameters"))
    }

    pub fn output_path(&self) -> PathBuf
    {
        self.output
            .clone()
            .unwrap_or_else(|| self.country.data_file("param_summary"))
    }

    pub fn parameters(&self) -> Vec<String>
    {
        or_defaults(&self.parameters, &DEFAULT_PARAMETERS)
    }
}

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

#[derive(Debug, StructOpt, Clone)]
/// Risk of onward spread from an average farm, integrated over distance, per week
pub struct RiskMeasure
{
    /// Country of interest ('uk' or 'japan')
    #[structopt(short, long, required_unless = "json")]
    country: Option<Country>,

    /// Weeks since the first confirmed case
    #[structopt(short, long, required_unless = "json")]
    weeks: Vec<i64>,

    /// Cleaned posterior samples, default depends on the country
    #[structopt(long, parse(from_os_str))]
    input: Option<PathBuf>,

    /// Output file, default data/risk_<country>.csv
    #[structopt(long, parse(from_os_str))]
    output: Option<PathBuf>,

    /// Specify the json file with the options.
    /// If given, all other options are ignored
    #[structopt(long)]
    json: Option<String>,
}

impl RiskMeasure{
    pub fn parse(&self) -> Result<(RiskMeasureParams, Value)>
    {
        parse(
            self.json.as_ref(),
            ||
            RiskMeasureParams{
                country: self.country.unwrap_or(Country::Uk),
                weeks: self.weeks.clone(),
                input: self.input.clone(),
                output: self.output.clone()
            }
        )
    }

    pub fn execute(&self) -> Result<()>
    {
        let (param, _json) = self.parse()?;
        run_risk_measure(&param)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct RiskMeasureParams
{
    pub country: Country,
    pub weeks: Vec<i64>,
    #[serde(default)]
    pub input: Option<PathBuf>,
    #[serde(default)]
    pub output: Option<PathBuf>,
}

impl RiskMeasureParams{
    pub fn input_path(&self) -> PathBuf
    {
        self.input
            .clone()
            .unwrap_or_else(|| self.country.cleaned_params_file())
    }

    pub fn output_path(&self) -> PathBuf
    {
        self.output
            .clone()
            .unwrap_or_else(|| self.country.data_file("risk"))
    }

    /// Day of the fitted parameter set belonging to `week`
    pub fn day_of_week(&self, week: i64) -> i64
    {
        (week - 1) * 7 + self.country.risk_day_offset()
    }
}

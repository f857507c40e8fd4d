use{
    serde::{Serialize, Deserialize},
    std::{
        fmt,
        num::*,
        path::PathBuf,
        str::FromStr,
    },
};

pub const DEFAULT_RANDOM_SEED: u64 = 100;
pub const DEFAULT_NBOOT: NonZeroUsize = unsafe{NonZeroUsize::new_unchecked(1000)};
pub const DEFAULT_OBJECTIVE: &str = "total_culls";
pub const DATA_DIR: &str = "data";

// serde defaults of the parameter files
pub fn default_random_seed() -> u64
{
    DEFAULT_RANDOM_SEED
}

pub fn default_n_boot() -> NonZeroUsize
{
    DEFAULT_NBOOT
}

pub fn default_objective() -> String
{
    DEFAULT_OBJECTIVE.to_owned()
}

// column names of the simulation output
pub const WEEK_COLUMN: &str = "week";
pub const CONTROL_COLUMN: &str = "control";
pub const REGIME_COLUMN: &str = "params_used";

const UK_CONTROLS: [&str; 7] = ["ip", "ipdc", "ipdccp", "rc3", "rc10", "v3", "v10"];
const JAPAN_CONTROLS: [&str; 6] = ["ip", "ipdc", "rc3", "rc10", "v3", "v10"];

/// Outbreak a data set belongs to.
/// Decides the control vocabulary, the default files and the calendar offsets.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Country{
    Uk,
    Japan
}

impl Country{
    pub fn name(self) -> &'static str
    {
        match self{
            Self::Uk => "uk",
            Self::Japan => "japan",
        }
    }

    /// Interventions compared for this outbreak, in display order
    pub fn controls(self) -> ControlVocabulary
    {
        let labels: &[&str] = match self{
            Self::Uk => &UK_CONTROLS,
            Self::Japan => &JAPAN_CONTROLS,
        };
        ControlVocabulary::new(labels.iter().map(|l| l.to_string()).collect())
    }

    /// Day number of week 0 in the posterior parameter files.
    /// Week 1 started on the 19th Feb 2001 (UK) and the 27th April 2010 (Miyazaki)
    pub fn parameter_day_offset(self) -> f64
    {
        match self{
            Self::Uk => 19.0,
            Self::Japan => 27.0,
        }
    }

    /// Day of the fitted parameter set that belongs to week 1 in the cleaned parameter files
    pub fn risk_day_offset(self) -> i64
    {
        match self{
            Self::Uk => 26,
            Self::Japan => 34,
        }
    }

    /// Only the first replicates of the UK fit are used for the risk measure
    pub fn max_risk_rep(self) -> Option<i64>
    {
        match self{
            Self::Uk => Some(2000),
            Self::Japan => None,
        }
    }

    /// Whether the fit carries a third species (xi_3, zeta_3 columns)
    pub fn has_third_species(self) -> bool
    {
        matches!(self, Self::Uk)
    }

    pub fn data_file(self, stem: &str) -> PathBuf
    {
        let file = format!("{}_{}.csv", stem, self.name());
        [DATA_DIR, file.as_str()].iter().collect()
    }

    pub fn cleaned_params_file(self) -> PathBuf
    {
        let file = match self{
            Self::Uk => "cleaned_params_uk.csv",
            Self::Japan => "cleaned_params_japan_vaccine_standard16.7.20.csv",
        };
        [DATA_DIR, file].iter().collect()
    }
}

impl fmt::Display for Country{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result
    {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Country{
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        match s.to_lowercase().as_str(){
            "uk" => Ok(Self::Uk),
            "japan" | "miyazaki" => Ok(Self::Japan),
            other => Err(format!("unknown country '{other}', expected 'uk' or 'japan'"))
        }
    }
}

/// Ordered set of intervention labels.
/// The order only matters for the order of output rows.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ControlVocabulary(Vec<String>);

impl ControlVocabulary{
    pub fn new(labels: Vec<String>) -> Self
    {
        let mut unique: Vec<String> = Vec::with_capacity(labels.len());
        for label in labels{
            if !unique.contains(&label){
                unique.push(label);
            }
        }
        Self(unique)
    }

    pub fn contains(&self, control: &str) -> bool
    {
        self.0.iter().any(|c| c == control)
    }

    pub fn iter(&self) -> impl Iterator<Item=&str>
    {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize
    {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool
    {
        self.0.is_empty()
    }

    pub fn position(&self, control: &str) -> Option<usize>
    {
        self.0.iter().position(|c| c == control)
    }
}

/// Either the vocabulary given on the command line or the country default
pub fn vocabulary_or_default(controls: &[String], country: Country) -> ControlVocabulary
{
    if controls.is_empty(){
        country.controls()
    } else {
        ControlVocabulary::new(controls.to_vec())
    }
}

/// The given list, or the defaults if it is empty
pub fn or_defaults(given: &[String], defaults: &[&str]) -> Vec<String>
{
    if given.is_empty(){
        defaults.iter().map(|s| s.to_string()).collect()
    } else {
        given.to_vec()
    }
}

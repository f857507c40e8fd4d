use{
    anyhow::{Context, Result},
    serde::{Serialize, de::DeserializeOwned},
    serde_json::Value,
    std::{fs::File, io::BufReader},
    tracing::info,
};

/// # Parameters of a subcommand
/// If a json file is given, the parameters are read from it and the
/// command line flags are ignored. Otherwise `from_flags` builds them.
/// The returned Value is the effective parameter set, it is logged.
pub fn parse<T, F>(json: Option<&String>, from_flags: F) -> Result<(T, Value)>
where T: Serialize + DeserializeOwned,
    F: FnOnce() -> T
{
    let param: T = match json{
        Some(path) => {
            info!("Reading parameters from {path}");
            let file = File::open(path)
                .with_context(|| format!("unable to open parameter file {path}"))?;
            serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("unable to parse parameter file {path}"))?
        },
        None => from_flags()
    };
    let value = serde_json::to_value(&param)
        .context("unable to serialize parameters")?;
    info!("Parameters: {}", value);
    Ok((param, value))
}

#[cfg(test)]
mod tests
{
    use super::*;
    use serde::Deserialize;
    use std::io::Write;

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Example
    {
        seed: u64,
        name: String,
    }

    #[test]
    fn flags_or_file()
    {
        let (from_flags, value) = parse(None, || Example{seed: 1, name: "a".to_owned()})
            .unwrap();
        assert_eq!(from_flags.seed, 1);
        assert_eq!(value["name"], "a");

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"seed": 7, "name": "b"}}"#).unwrap();
        let path = file.path().display().to_string();
        let (from_file, _): (Example, _) = parse(Some(&path), || unreachable!())
            .unwrap();
        assert_eq!(from_file, Example{seed: 7, name: "b".to_owned()});

        let missing = "does/not/exist.json".to_owned();
        assert!(parse::<Example, _>(Some(&missing), || unreachable!()).is_err());
    }
}

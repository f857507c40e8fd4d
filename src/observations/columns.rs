use{
    anyhow::{anyhow, bail, Context, Result},
    csv::StringRecord,
    std::io::Read,
};

/// Header row of a CSV file, used to look up columns by name
pub struct HeaderIndex
{
    names: Vec<String>
}

impl HeaderIndex{
    pub fn from_reader<R: Read>(reader: &mut csv::Reader<R>) -> Result<Self>
    {
        let names = reader.headers()
            .context("unable to read CSV header")?
            .iter()
            .map(|name| name.trim().to_owned())
            .collect();
        Ok(Self{names})
    }

    pub fn find(&self, name: &str) -> Option<usize>
    {
        self.names.iter().position(|n| n == name)
    }

    pub fn require(&self, name: &str) -> Result<usize>
    {
        self.find(name)
            .ok_or_else(|| anyhow!("missing column '{name}' (found: {})", self.names.join(", ")))
    }
}

fn line_of(record: &StringRecord) -> u64
{
    record.position().map_or(0, |p| p.line())
}

fn field<'a>(record: &'a StringRecord, index: usize, column: &str) -> Result<&'a str>
{
    record.get(index)
        .map(str::trim)
        .ok_or_else(|| anyhow!("line {}: no value for column '{column}'", line_of(record)))
}

pub fn parse_text(record: &StringRecord, index: usize, column: &str) -> Result<String>
{
    field(record, index, column).map(str::to_owned)
}

/// Empty fields and the usual missing-value markers become NaN
pub fn parse_f64(record: &StringRecord, index: usize, column: &str) -> Result<f64>
{
    let raw = field(record, index, column)?;
    if raw.is_empty() || raw.eq_ignore_ascii_case("na") || raw.eq_ignore_ascii_case("nan"){
        return Ok(f64::NAN);
    }
    raw.parse()
        .with_context(|| format!("line {}: column '{column}' is not a number: '{raw}'", line_of(record)))
}

/// Integer-like values, `3` and `3.0` are both accepted
pub fn parse_integer(record: &StringRecord, index: usize, column: &str) -> Result<i64>
{
    let raw = field(record, index, column)?;
    if let Ok(v) = raw.parse::<i64>(){
        return Ok(v);
    }
    match raw.parse::<f64>(){
        Ok(v) if v.is_finite() && v.fract() == 0.0 => Ok(v as i64),
        _ => bail!("line {}: column '{column}' is not an integer: '{raw}'", line_of(record))
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn lookup_and_parse()
    {
        let data = "week, control,total_culls\n3.0,ip,\n2.5,ipdc,12\n";
        let mut reader = csv::Reader::from_reader(data.as_bytes());
        let header = HeaderIndex::from_reader(&mut reader).unwrap();
        assert_eq!(header.find("control"), Some(1));
        assert!(header.require("params_used").is_err());

        let records: Vec<StringRecord> = reader.records()
            .map(|r| r.unwrap())
            .collect();
        assert_eq!(parse_integer(&records[0], 0, "week").unwrap(), 3);
        assert!(parse_f64(&records[0], 2, "total_culls").unwrap().is_nan());
        assert!(parse_integer(&records[1], 0, "week").is_err());
        assert_eq!(parse_f64(&records[1], 2, "total_culls").unwrap(), 12.0);
        assert_eq!(parse_text(&records[1], 1, "control").unwrap(), "ipdc");
    }
}

use{
    anyhow::{Context, Result},
    serde::Serialize,
    std::{fs, path::Path},
    tracing::info,
};

/// Writes the records as CSV with a header row derived from `T`.
/// Missing parent directories are created. Returns the number of records.
pub fn write_records<T, I>(path: &Path, records: I) -> Result<usize>
where T: Serialize,
    I: IntoIterator<Item=T>
{
    if let Some(parent) = path.parent(){
        if !parent.as_os_str().is_empty() && !parent.exists(){
            fs::create_dir_all(parent)
                .with_context(|| format!("could not create directory {}", parent.display()))?;
        }
    }
    info!("Creating: {}", path.display());
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("unable to create {}", path.display()))?;
    let mut written = 0;
    for record in records{
        wtr.serialize(record)
            .with_context(|| format!("could not write to {}", path.display()))?;
        written += 1;
    }
    wtr.flush()
        .with_context(|| format!("could not flush {}", path.display()))?;
    Ok(written)
}

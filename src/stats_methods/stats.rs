//all the methods of calculating averages, quantiles and rankings

use std::cmp::Ordering;

pub fn calc_average(slice: &[f64]) -> f64
{
    let sum: f64 = slice.iter().sum();
    sum / slice.len() as f64
}

/// Sorts a copy, NaN values are dropped
pub fn sorted_finite(slice: &[f64]) -> Vec<f64>
{
    let mut sorted: Vec<f64> = slice.iter()
        .copied()
        .filter(|v| !v.is_nan())
        .collect();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    sorted
}

/// # Quantile of already sorted data
/// Linear interpolation between the two closest order statistics,
/// i.e. position `q * (n - 1)`. Returns NaN for empty input.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> f64
{
    if sorted.is_empty(){
        return f64::NAN;
    }
    let q = q.clamp(0.0, 1.0);
    let pos = q * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * frac
}

pub fn quantile(slice: &[f64], q: f64) -> f64
{
    quantile_sorted(&sorted_finite(slice), q)
}

pub struct QuantileSummary
{
    pub n: usize,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

impl QuantileSummary{
    pub fn from_slice(slice: &[f64]) -> Self
    {
        let sorted = sorted_finite(slice);
        Self{
            n: sorted.len(),
            min: quantile_sorted(&sorted, 0.0),
            q25: quantile_sorted(&sorted, 0.25),
            median: quantile_sorted(&sorted, 0.5),
            q75: quantile_sorted(&sorted, 0.75),
            max: quantile_sorted(&sorted, 1.0),
        }
    }
}

/// # Rank in descending order, "min" method
/// The largest value gets rank 1. Equal values share the lowest rank
/// of their block and the following rank is skipped, e.g.
/// `[5, 7, 7, 1] -> [3, 1, 1, 4]`
pub fn rank_min_descending(values: &[f64]) -> Vec<usize>
{
    values.iter()
        .map(
            |v|
            {
                1 + values.iter()
                    .filter(|other| **other > *v)
                    .count()
            }
        ).collect()
}

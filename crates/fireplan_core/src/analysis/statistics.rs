//! Summary statistics over trial samples

use crate::model::PercentileBands;

/// Linear-interpolated percentile of ascending `sorted` samples.
///
/// `p` is a fraction in `[0, 1]`. Empty input yields 0.
#[must_use]
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    match sorted.len() {
        0 => 0.0,
        1 => sorted[0],
        n => {
            let rank = p.clamp(0.0, 1.0) * (n - 1) as f64;
            let lower = rank.floor() as usize;
            let upper = (lower + 1).min(n - 1);
            let weight = rank - lower as f64;
            sorted[lower] + (sorted[upper] - sorted[lower]) * weight
        }
    }
}

/// Sort a copy of `samples` ascending
#[must_use]
pub fn sorted(samples: &[f64]) -> Vec<f64> {
    let mut values = samples.to_vec();
    values.sort_by(f64::total_cmp);
    values
}

#[must_use]
pub fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().sum::<f64>() / samples.len() as f64
}

/// Per-month 2.5/16/50/84/97.5 percentiles across equal-length trajectories.
///
/// `start_month` is the absolute month of each trajectory's first entry.
#[must_use]
pub fn percentile_bands(trajectories: &[Vec<f64>], start_month: usize) -> PercentileBands {
    let months = trajectories.iter().map(Vec::len).min().unwrap_or(0);
    let mut bands = PercentileBands {
        start_month,
        p025: Vec::with_capacity(months),
        p16: Vec::with_capacity(months),
        p50: Vec::with_capacity(months),
        p84: Vec::with_capacity(months),
        p975: Vec::with_capacity(months),
    };

    let mut column = Vec::with_capacity(trajectories.len());
    for month in 0..months {
        column.clear();
        column.extend(trajectories.iter().map(|t| t[month]));
        column.sort_by(f64::total_cmp);

        bands.p025.push(percentile(&column, 0.025));
        bands.p16.push(percentile(&column, 0.16));
        bands.p50.push(percentile(&column, 0.50));
        bands.p84.push(percentile(&column, 0.84));
        bands.p975.push(percentile(&column, 0.975));
    }
    bands
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentile_interpolates() {
        let values = [10.0, 20.0, 30.0, 40.0, 50.0];
        assert_eq!(percentile(&values, 0.0), 10.0);
        assert_eq!(percentile(&values, 0.5), 30.0);
        assert_eq!(percentile(&values, 1.0), 50.0);
        assert!((percentile(&values, 0.1) - 14.0).abs() < 1e-9);
        assert_eq!(percentile(&[], 0.5), 0.0);
        assert_eq!(percentile(&[7.0], 0.9), 7.0);
    }

    #[test]
    fn test_bands_are_ordered() {
        let trajectories: Vec<Vec<f64>> = (0..50)
            .map(|i| (0..12).map(|m| f64::from(i * 10 + m)).collect())
            .collect();
        let bands = percentile_bands(&trajectories, 25);

        assert_eq!(bands.start_month, 25);
        assert_eq!(bands.len(), 12);
        for m in 0..bands.len() {
            assert!(bands.p025[m] <= bands.p16[m]);
            assert!(bands.p16[m] <= bands.p50[m]);
            assert!(bands.p50[m] <= bands.p84[m]);
            assert!(bands.p84[m] <= bands.p975[m]);
        }
    }
}

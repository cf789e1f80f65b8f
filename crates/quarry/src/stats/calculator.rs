//! Pure statistics over sequences of optionally-missing numbers.
//!
//! Missing values (`None`) are skipped, never treated as zero. Functions
//! return `0.0` where a statistic is undefined instead of `NaN`.

use std::cmp::Ordering;

/// A value flagged by [`detect_outliers`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectedOutlier {
    /// Position within the input sequence, not a dataset row.
    pub position: usize,
    pub value: f64,
    pub z_score: f64,
}

fn present(values: &[Option<f64>]) -> impl Iterator<Item = f64> + '_ {
    values.iter().filter_map(|v| *v)
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// Largest magnitude among `values`, used to keep sums of extreme values
/// in range.
fn magnitude(values: impl Iterator<Item = f64>) -> f64 {
    values.fold(0.0, |m: f64, v| m.max(v.abs()))
}

/// Arithmetic mean of present values; `0.0` if none.
pub fn mean(values: &[Option<f64>]) -> f64 {
    let count = count_non_missing(values);
    if count == 0 {
        return 0.0;
    }
    let n = count as f64;
    let sum: f64 = present(values).sum();
    if sum.is_finite() {
        return sum / n;
    }
    // The plain sum overflowed; divide each term first.
    finite_or_zero(present(values).map(|v| v / n).sum())
}

/// Median of present values; `0.0` if none.
///
/// Even counts average the two central values.
pub fn median(values: &[Option<f64>]) -> f64 {
    let mut sorted: Vec<f64> = present(values).collect();
    if sorted.is_empty() {
        return 0.0;
    }
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        sorted[mid - 1] / 2.0 + sorted[mid] / 2.0
    } else {
        sorted[mid]
    }
}

/// Sample standard deviation (`n - 1` denominator) around `mean`.
///
/// `0.0` with fewer than two present values.
pub fn standard_deviation(values: &[Option<f64>], mean: f64) -> f64 {
    let count = count_non_missing(values);
    if count < 2 {
        return 0.0;
    }

    let scale = magnitude(present(values)).max(mean.abs());
    if scale == 0.0 || !scale.is_finite() {
        return 0.0;
    }
    let scaled_mean = mean / scale;
    let sum_sq: f64 = present(values)
        .map(|v| {
            let d = v / scale - scaled_mean;
            d * d
        })
        .sum();

    finite_or_zero((sum_sq / (count - 1) as f64).sqrt() * scale)
}

/// Smallest present value; `0.0` if none.
pub fn min(values: &[Option<f64>]) -> f64 {
    present(values).reduce(f64::min).unwrap_or(0.0)
}

/// Largest present value; `0.0` if none.
pub fn max(values: &[Option<f64>]) -> f64 {
    present(values).reduce(f64::max).unwrap_or(0.0)
}

pub fn count_non_missing(values: &[Option<f64>]) -> usize {
    values.iter().filter(|v| v.is_some()).count()
}

pub fn count_missing(values: &[Option<f64>]) -> usize {
    values.iter().filter(|v| v.is_none()).count()
}

/// Absolute distance from the mean in standard deviations.
///
/// `0.0` when `std_dev` is zero, so constant columns never produce outliers.
pub fn z_score(value: f64, mean: f64, std_dev: f64) -> f64 {
    if std_dev == 0.0 {
        0.0
    } else {
        finite_or_zero((value / std_dev - mean / std_dev).abs())
    }
}

/// Strict comparison: a z-score equal to the threshold is not an outlier.
pub fn is_outlier(z_score: f64, threshold: f64) -> bool {
    z_score > threshold
}

/// Pearson correlation with pairwise deletion.
///
/// Only positions where both `x` and `y` are present take part. Returns
/// `0.0` when no pairs remain, either side has zero variance, or the
/// result is not finite.
pub fn pearson_correlation(x: &[Option<f64>], y: &[Option<f64>]) -> f64 {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y)
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .collect();
    if pairs.is_empty() {
        return 0.0;
    }

    // Correlation is scale-free, so each side is brought into [-1, 1] first.
    let scale_x = magnitude(pairs.iter().map(|(a, _)| *a));
    let scale_y = magnitude(pairs.iter().map(|(_, b)| *b));
    if scale_x == 0.0 || scale_y == 0.0 {
        return 0.0;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(a, _)| a / scale_x / n).sum::<f64>();
    let mean_y = pairs.iter().map(|(_, b)| b / scale_y / n).sum::<f64>();

    let mut covariance = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (a, b) in &pairs {
        let dx = a / scale_x - mean_x;
        let dy = b / scale_y - mean_y;
        covariance += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return 0.0;
    }
    finite_or_zero(covariance / (var_x.sqrt() * var_y.sqrt()))
}

/// Symmetric correlation matrix over `columns`.
///
/// The diagonal is `1.0`; each unordered pair is computed once and mirrored.
pub fn correlation_matrix(columns: &[&[Option<f64>]]) -> Vec<Vec<f64>> {
    let n = columns.len();
    let mut matrix = vec![vec![0.0; n]; n];

    for i in 0..n {
        matrix[i][i] = 1.0;
        for j in (i + 1)..n {
            let r = pearson_correlation(columns[i], columns[j]);
            matrix[i][j] = r;
            matrix[j][i] = r;
        }
    }

    matrix
}

/// Values whose z-score exceeds `threshold`.
///
/// Mean and sample standard deviation are taken over all present values.
/// Returns nothing when the standard deviation is zero.
pub fn detect_outliers(values: &[Option<f64>], threshold: f64) -> Vec<DetectedOutlier> {
    let m = mean(values);
    let sd = standard_deviation(values, m);
    if sd == 0.0 {
        return Vec::new();
    }

    values
        .iter()
        .enumerate()
        .filter_map(|(position, v)| {
            let value = (*v)?;
            let z = z_score(value, m, sd);
            is_outlier(z, threshold).then_some(DetectedOutlier {
                position,
                value,
                z_score: z,
            })
        })
        .collect()
}

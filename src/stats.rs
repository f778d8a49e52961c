//! Statistics helpers shared by distances and analysis drivers
//!
//! Every function is pure. Degenerate inputs return `None` instead of
//! NaN so callers have to decide what an undefined statistic means.

/// Arithmetic mean, `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (N-1 denominator)
///
/// `None` when fewer than two values are given.
pub fn stddev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let sum_sq: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    Some((sum_sq / (values.len() - 1) as f64).sqrt())
}

/// Whether every value equals the first one.
///
/// A constant vector can still have a computed standard deviation of a few
/// ulps, because its mean need not round back to the value itself.
pub fn is_constant(values: &[f64]) -> bool {
    values.iter().all(|v| *v == values[0])
}

/// `count / total`, zero for an empty total
pub fn relative_frequency(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

/// Relative frequency scaled by the size of the comparison vocabulary.
///
/// An event used at the uniform rate `1 / vocabulary` scores 1.0.
pub fn normalized_frequency(relative: f64, vocabulary: usize) -> f64 {
    relative * vocabulary as f64
}

/// Why a correlation could not be computed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Degeneracy {
    /// Vectors differ in length
    LengthMismatch,
    /// Fewer than two observations
    TooFewSamples,
    /// The first vector is constant
    ConstantX,
    /// The second vector is constant
    ConstantY,
}

/// Correlation of `xs` against `ys`.
///
/// The numerator is the mean (N denominator) of the centered products and
/// the denominator the product of the two sample standard deviations, so
/// the result is Pearson's r scaled by (N-1)/N.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Result<f64, Degeneracy> {
    if xs.len() != ys.len() {
        return Err(Degeneracy::LengthMismatch);
    }
    let (Some(sx), Some(sy)) = (stddev(xs), stddev(ys)) else {
        return Err(Degeneracy::TooFewSamples);
    };
    if is_constant(xs) {
        return Err(Degeneracy::ConstantX);
    }
    if is_constant(ys) {
        return Err(Degeneracy::ConstantY);
    }
    let (Some(mx), Some(my)) = (mean(xs), mean(ys)) else {
        return Err(Degeneracy::TooFewSamples);
    };

    let products: Vec<f64> = xs
        .iter()
        .zip(ys)
        .map(|(x, y)| (x - mx) * (y - my))
        .collect();
    let covariance = mean(&products).ok_or(Degeneracy::TooFewSamples)?;

    Ok(covariance / (sx * sy))
}

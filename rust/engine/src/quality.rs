//! Statistical sanity check for generator output.
//!
//! Two classical tests are run on `[0, 1)` samples: a chi-square goodness of
//! fit over equal-width buckets (uniformity) and a Wald–Wolfowitz runs test
//! on the above/below-median sequence (independence). Both use normal
//! approximations at a 1% significance level.
//!
//! This catches broken or degenerate generators. It is not a cryptographic
//! assessment and a pass says nothing about unpredictability.

use rand::Rng;
use serde::Serialize;

use crate::errors::SeedError;

pub const MIN_SAMPLE_SIZE: usize = 1_000;
pub const MAX_SAMPLE_SIZE: usize = 10_000_000;
pub const MIN_BUCKETS: usize = 2;
pub const MAX_BUCKETS: usize = 1_000;
pub const SIGNIFICANCE: f64 = 0.01;

const MIN_EXPECTED_PER_BUCKET: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CheckResult {
    pub statistic: f64,
    pub p_value: f64,
    pub passed: bool,
}

impl CheckResult {
    fn from_p(statistic: f64, p_value: f64) -> Self {
        Self {
            statistic,
            p_value,
            passed: p_value >= SIGNIFICANCE,
        }
    }

    fn failed(statistic: f64) -> Self {
        Self {
            statistic,
            p_value: 0.0,
            passed: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityReport {
    pub sample_size: usize,
    pub buckets: usize,
    /// Chi-square statistic with `buckets - 1` degrees of freedom.
    pub uniformity: CheckResult,
    /// Runs test z-score.
    pub independence: CheckResult,
}

impl QualityReport {
    pub fn passed(&self) -> bool {
        self.uniformity.passed && self.independence.passed
    }
}

/// Draw `sample_size` values from `rng` and test them.
///
/// ```
/// use ridesim_engine::quality::validate_quality;
/// use ridesim_engine::seed::create_generator;
///
/// let mut rng = create_generator(42);
/// let report = validate_quality(&mut rng, 10_000, 20).unwrap();
/// assert_eq!(report.sample_size, 10_000);
/// ```
pub fn validate_quality<R: Rng + ?Sized>(
    rng: &mut R,
    sample_size: usize,
    buckets: usize,
) -> Result<QualityReport, SeedError> {
    if !(MIN_SAMPLE_SIZE..=MAX_SAMPLE_SIZE).contains(&sample_size) {
        return Err(SeedError::InvalidSampleSize {
            requested: sample_size,
            min: MIN_SAMPLE_SIZE,
            max: MAX_SAMPLE_SIZE,
        });
    }
    if !(MIN_BUCKETS..=MAX_BUCKETS).contains(&buckets)
        || sample_size / buckets < MIN_EXPECTED_PER_BUCKET
    {
        return Err(SeedError::InvalidBuckets {
            requested: buckets,
            min: MIN_BUCKETS,
            max: MAX_BUCKETS,
        });
    }

    let samples: Vec<f64> = (0..sample_size).map(|_| rng.random::<f64>()).collect();
    Ok(QualityReport {
        sample_size,
        buckets,
        uniformity: chi_square_uniformity(&samples, buckets),
        independence: runs_test(&samples),
    })
}

fn chi_square_uniformity(samples: &[f64], buckets: usize) -> CheckResult {
    let mut counts = vec![0u64; buckets];
    for &x in samples {
        let idx = ((x * buckets as f64) as usize).min(buckets - 1);
        counts[idx] += 1;
    }
    let expected = samples.len() as f64 / buckets as f64;
    let chi2: f64 = counts
        .iter()
        .map(|&o| {
            let d = o as f64 - expected;
            d * d / expected
        })
        .sum();

    // Wilson–Hilferty: (chi2/k)^(1/3) is close to normal
    let k = (buckets - 1) as f64;
    let mean = 1.0 - 2.0 / (9.0 * k);
    let sd = (2.0 / (9.0 * k)).sqrt();
    let z = ((chi2 / k).cbrt() - mean) / sd;
    CheckResult::from_p(chi2, upper_tail(z))
}

fn runs_test(samples: &[f64]) -> CheckResult {
    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    let median = if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    };

    // values equal to the median carry no above/below information
    let signs: Vec<bool> = samples
        .iter()
        .filter(|&&x| x != median)
        .map(|&x| x > median)
        .collect();
    let above = signs.iter().filter(|&&s| s).count() as f64;
    let below = signs.len() as f64 - above;
    if above < 1.0 || below < 1.0 {
        return CheckResult::failed(f64::INFINITY);
    }

    let runs = 1 + signs.windows(2).filter(|w| w[0] != w[1]).count();
    let n = above + below;
    let expected = 2.0 * above * below / n + 1.0;
    let variance = 2.0 * above * below * (2.0 * above * below - n) / (n * n * (n - 1.0));
    if variance <= 0.0 {
        return CheckResult::failed(f64::INFINITY);
    }
    let z = (runs as f64 - expected) / variance.sqrt();
    CheckResult::from_p(z, 2.0 * upper_tail(z.abs()))
}

/// P(Z > z) for a standard normal.
fn upper_tail(z: f64) -> f64 {
    0.5 * erfc(z / std::f64::consts::SQRT_2)
}

// Chebyshev fit, fractional error below 1.2e-7 everywhere.
fn erfc(x: f64) -> f64 {
    let z = x.abs();
    let t = 1.0 / (1.0 + 0.5 * z);
    let poly = -z * z - 1.265_512_23
        + t * (1.000_023_68
            + t * (0.374_091_96
                + t * (0.096_784_18
                    + t * (-0.186_288_06
                        + t * (0.278_868_07
                            + t * (-1.135_203_98
                                + t * (1.488_515_87 + t * (-0.822_152_23 + t * 0.170_872_77))))))));
    let ans = t * poly.exp();
    if x >= 0.0 {
        ans
    } else {
        2.0 - ans
    }
}

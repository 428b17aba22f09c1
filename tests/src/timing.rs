//! Statistical timing comparison for the verification path
//!
//! Two closures are timed in alternating batches and compared with Welch's
//! t-test. Verification is expected to cost the same whether it ends in
//! accept or in reject, and whichever check trips the reject.

use statrs::distribution::{ContinuousCDF, StudentsT};
use std::time::Instant;

/// Thresholds and sample counts for one comparison
#[derive(Debug, Clone)]
pub struct TimingConfig {
    pub mean_ratio_max: f64,
    pub combined_score_threshold: f64,
    pub num_warmup: usize,
    pub num_samples: usize,
    pub num_iterations: usize,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            mean_ratio_max: 1.25,
            combined_score_threshold: 1.8,
            num_warmup: 20,
            num_samples: 25,
            num_iterations: 10,
        }
    }
}

impl TimingConfig {
    /// Verification is dominated by hashing and NTTs, so the noise floor is
    /// higher than for a single primitive.
    pub fn for_verify() -> Self {
        Self {
            mean_ratio_max: 1.35,
            combined_score_threshold: 2.0,
            ..Self::default()
        }
    }

    pub fn with_samples_and_iterations(mut self, samples: usize, iterations: usize) -> Self {
        self.num_samples = samples;
        self.num_iterations = iterations;
        self
    }
}

/// Outcome of comparing two timing samples
#[derive(Debug)]
pub struct TimingAnalysis {
    pub mean_a: f64,
    pub mean_b: f64,
    pub std_dev_a: f64,
    pub std_dev_b: f64,
    pub mean_ratio: f64,
    pub t_statistic: f64,
    pub p_value: f64,
    pub combined_score: f64,
    pub cohens_d: f64,
    pub is_uniform: bool,
}

impl TimingAnalysis {
    pub fn report(&self, label: &str) -> String {
        format!(
            "{}: {:.0} ns vs {:.0} ns, ratio {:.3}, t={:.2}, p={:.3}, d={:.2}, score {:.3}",
            label,
            self.mean_a,
            self.mean_b,
            self.mean_ratio,
            self.t_statistic,
            self.p_value,
            self.cohens_d,
            self.combined_score
        )
    }
}

pub struct TimingTester {
    config: TimingConfig,
}

impl TimingTester {
    pub fn new(config: TimingConfig) -> Self {
        Self { config }
    }

    /// Times `a` and `b` in interleaved batches so drift hits both equally
    pub fn compare<A, B>(&self, mut a: A, mut b: B) -> (Vec<u128>, Vec<u128>)
    where
        A: FnMut(),
        B: FnMut(),
    {
        for _ in 0..self.config.num_warmup {
            a();
            b();
        }

        let iters = self.config.num_iterations.max(1);
        let mut times_a = Vec::with_capacity(self.config.num_samples);
        let mut times_b = Vec::with_capacity(self.config.num_samples);
        for _ in 0..self.config.num_samples {
            let start = Instant::now();
            for _ in 0..iters {
                a();
            }
            times_a.push(start.elapsed().as_nanos() / iters as u128);

            let start = Instant::now();
            for _ in 0..iters {
                b();
            }
            times_b.push(start.elapsed().as_nanos() / iters as u128);
        }
        (times_a, times_b)
    }

    pub fn analyze(&self, times_a: &[u128], times_b: &[u128]) -> Result<TimingAnalysis, String> {
        let clean_a = remove_outliers(times_a);
        let clean_b = remove_outliers(times_b);
        if clean_a.len() < 2 || clean_b.len() < 2 {
            return Err("not enough samples left after outlier removal".to_string());
        }

        let (mean_a, var_a) = mean_var(&clean_a);
        let (mean_b, var_b) = mean_var(&clean_b);
        let n_a = clean_a.len() as f64;
        let n_b = clean_b.len() as f64;

        let mean_ratio = if mean_a > mean_b { mean_a / mean_b } else { mean_b / mean_a };

        let se2_a = var_a / n_a;
        let se2_b = var_b / n_b;
        let t_statistic = (mean_a - mean_b).abs() / (se2_a + se2_b).sqrt();
        let df = (se2_a + se2_b).powi(2) / (se2_a.powi(2) / (n_a - 1.0) + se2_b.powi(2) / (n_b - 1.0));
        let p_value = match StudentsT::new(0.0, 1.0, df) {
            Ok(dist) if df.is_finite() => (2.0 * (1.0 - dist.cdf(t_statistic))).clamp(0.0, 1.0),
            _ => if t_statistic < 2.0 { 0.1 } else { 0.01 },
        };

        let pooled = ((var_a * (n_a - 1.0) + var_b * (n_b - 1.0)) / (n_a + n_b - 2.0)).sqrt();
        let cohens_d = if pooled > 0.0 { (mean_a - mean_b).abs() / pooled } else { 0.0 };

        let std_dev_a = var_a.sqrt();
        let std_dev_b = var_b.sqrt();
        let max_rel_std = f64::max(std_dev_a / mean_a, std_dev_b / mean_b);

        // Weighted blend; the mean ratio dominates
        let mut combined_score = 1.0
            + (mean_ratio - 1.0) * 0.5
            + (t_statistic / 10.0) * 0.2
            + max_rel_std * 0.3;
        if !combined_score.is_finite() {
            combined_score = mean_ratio;
        }

        Ok(TimingAnalysis {
            mean_a,
            mean_b,
            std_dev_a,
            std_dev_b,
            mean_ratio,
            t_statistic,
            p_value,
            combined_score,
            cohens_d,
            is_uniform: mean_ratio <= self.config.mean_ratio_max
                && combined_score <= self.config.combined_score_threshold,
        })
    }
}

fn mean_var(times: &[u128]) -> (f64, f64) {
    let n = times.len() as f64;
    let mean = times.iter().map(|&t| t as f64).sum::<f64>() / n;
    let ss: f64 = times.iter().map(|&t| (t as f64 - mean).powi(2)).sum();
    (mean, ss / (n - 1.0))
}

/// Drops samples outside 1.5 IQR of the quartiles
fn remove_outliers(times: &[u128]) -> Vec<u128> {
    if times.len() < 4 {
        return times.to_vec();
    }
    let mut sorted = times.to_vec();
    sorted.sort_unstable();
    let q1 = sorted[sorted.len() / 4] as f64;
    let q3 = sorted[sorted.len() * 3 / 4] as f64;
    let iqr = q3 - q1;
    let (lo, hi) = (q1 - 1.5 * iqr, q3 + 1.5 * iqr);
    times
        .iter()
        .copied()
        .filter(|&t| (t as f64) >= lo && (t as f64) <= hi)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_samples_are_uniform() {
        let tester = TimingTester::new(TimingConfig::default());
        let a: Vec<u128> = (0..30).map(|i| 1000 + (i % 7)).collect();
        let b: Vec<u128> = (0..30).map(|i| 1000 + ((i + 3) % 7)).collect();
        let analysis = tester.analyze(&a, &b).unwrap();
        assert!(analysis.is_uniform, "{}", analysis.report("synthetic"));
    }

    #[test]
    fn test_early_exit_is_flagged() {
        let tester = TimingTester::new(TimingConfig::default());
        let a: Vec<u128> = (0..30).map(|i| 1000 + (i % 5)).collect();
        let b: Vec<u128> = (0..30).map(|i| 3000 + (i % 5)).collect();
        let analysis = tester.analyze(&a, &b).unwrap();
        assert!(!analysis.is_uniform);
        assert!(analysis.mean_ratio > 2.9);
    }

    #[test]
    fn test_outliers_removed() {
        let mut times = vec![100u128; 20];
        times.push(1_000_000);
        assert_eq!(remove_outliers(&times).len(), 20);
    }
}

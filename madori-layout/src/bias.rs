use std::f64::consts::PI;

use rand::rngs::ThreadRng;
use rand::Rng;

use crate::display::Display;

/// Source of normally distributed samples.
pub trait NormalSource {
    fn sample(&mut self, mean: f64, std_dev: f64) -> f64;
}

/// Box–Muller transform over a uniform generator.
pub struct BoxMuller<R> {
    rng: R,
}

impl<R: Rng> BoxMuller<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Uniform draw from `(0, 1]`, so `ln` never sees zero.
    fn unit(&mut self) -> f64 {
        1.0 - self.rng.random::<f64>()
    }
}

impl BoxMuller<ThreadRng> {
    pub fn from_entropy() -> Self {
        Self::new(rand::rng())
    }
}

impl<R: Rng> NormalSource for BoxMuller<R> {
    fn sample(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.unit();
        let u2 = self.unit();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos();
        mean + z * std_dev
    }
}

/// Always returns the same offset from the mean, in units of the standard
/// deviation. Useful for pinning the bias in tests and dry runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedSigma(pub f64);

impl NormalSource for FixedSigma {
    fn sample(&mut self, mean: f64, std_dev: f64) -> f64 {
        mean + self.0 * std_dev
    }
}

/// Draw an `(x, y)` centering offset for `screen`, each axis clamped to
/// three standard deviations.
pub fn sample_bias(
    source: &mut impl NormalSource,
    screen: &Display,
    deviation_rate: f64,
) -> (f64, f64) {
    let sigma_x = screen.region.width * deviation_rate;
    let sigma_y = screen.region.height * deviation_rate;
    (
        clamped_sample(source, sigma_x),
        clamped_sample(source, sigma_y),
    )
}

fn clamped_sample(source: &mut impl NormalSource, std_dev: f64) -> f64 {
    if std_dev <= 0.0 {
        return 0.0;
    }
    let limit = 3.0 * std_dev;
    source.sample(0.0, std_dev).clamp(-limit, limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn screen() -> Display {
        Display::new(Rect::new(0.0, 0.0, 1920.0, 1080.0))
    }

    #[test]
    fn test_seeded_source_is_deterministic() {
        let mut a = BoxMuller::new(StdRng::seed_from_u64(7));
        let mut b = BoxMuller::new(StdRng::seed_from_u64(7));
        for _ in 0..16 {
            assert_eq!(a.sample(0.0, 10.0), b.sample(0.0, 10.0));
        }
    }

    #[test]
    fn test_box_muller_statistics() {
        let mut source = BoxMuller::new(StdRng::seed_from_u64(42));
        let n = 20_000;
        let samples: Vec<f64> = (0..n).map(|_| source.sample(5.0, 2.0)).collect();

        let mean = samples.iter().sum::<f64>() / n as f64;
        let var = samples.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / n as f64;

        assert!((mean - 5.0).abs() < 0.1, "mean was {}", mean);
        assert!((var.sqrt() - 2.0).abs() < 0.1, "std dev was {}", var.sqrt());
        assert!(samples.iter().all(|s| s.is_finite()));
    }

    #[test]
    fn test_bias_is_clamped_to_three_sigma() {
        let (x, y) = sample_bias(&mut FixedSigma(10.0), &screen(), 0.02);
        assert!((x - 3.0 * 1920.0 * 0.02).abs() < 1e-9);
        assert!((y - 3.0 * 1080.0 * 0.02).abs() < 1e-9);

        let (x, y) = sample_bias(&mut FixedSigma(-10.0), &screen(), 0.02);
        assert!((x + 3.0 * 1920.0 * 0.02).abs() < 1e-9);
        assert!((y + 3.0 * 1080.0 * 0.02).abs() < 1e-9);
    }

    #[test]
    fn test_bias_within_three_sigma_passes_through() {
        let (x, y) = sample_bias(&mut FixedSigma(1.5), &screen(), 0.02);
        assert!((x - 1.5 * 38.4).abs() < 1e-9);
        assert!((y - 1.5 * 21.6).abs() < 1e-9);
    }

    #[test]
    fn test_zero_deviation_rate_disables_bias() {
        let (x, y) = sample_bias(&mut FixedSigma(2.0), &screen(), 0.0);
        assert_eq!((x, y), (0.0, 0.0));
    }
}

//! Capture sources that produce skin analyses.
//!
//! The HTTP layer only depends on [`AnalysisSource`], so the random mock can be
//! replaced by a real camera + inference pipeline without touching the resolver.

use std::time::Duration;

use rand::Rng;

use crate::{
    error::AppResult,
    models::{AcneLevel, Analysis},
};

/// Trait for anything that can produce a fresh skin analysis
#[async_trait::async_trait]
pub trait AnalysisSource: Send + Sync {
    /// Captures and analyzes one frame
    async fn produce_analysis(&self) -> AppResult<Analysis>;

    /// Source name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Acne levels the mock generator draws from; it never reports severe acne
const MOCK_ACNE_LEVELS: [AcneLevel; 3] = [AcneLevel::None, AcneLevel::Mild, AcneLevel::Moderate];

/// Stand-in for real inference: draws plausible metrics at random
#[derive(Debug, Clone, Default)]
pub struct RandomAnalysisSource {
    /// Simulated processing time before the result is returned
    delay: Duration,
}

impl RandomAnalysisSource {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Draws one analysis with the given RNG
    pub fn generate<R: Rng>(rng: &mut R) -> Analysis {
        Analysis {
            acne_level: MOCK_ACNE_LEVELS[rng.gen_range(0..MOCK_ACNE_LEVELS.len())],
            pores: rng.gen_range(10..50),
            oiliness: rng.gen_range(20..80),
            dryness: rng.gen_range(10..60),
            dark_spots: rng.gen_range(5..35),
        }
    }
}

#[async_trait::async_trait]
impl AnalysisSource for RandomAnalysisSource {
    async fn produce_analysis(&self) -> AppResult<Analysis> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let analysis = Self::generate(&mut rand::thread_rng());

        tracing::debug!(
            source = self.name(),
            acne_level = %analysis.acne_level,
            oiliness = analysis.oiliness,
            dryness = analysis.dryness,
            "Generated mock analysis"
        );

        Ok(analysis)
    }

    fn name(&self) -> &'static str {
        "random"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_generated_metrics_stay_in_mock_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1_000 {
            let analysis = RandomAnalysisSource::generate(&mut rng);
            assert!((10..50).contains(&analysis.pores));
            assert!((20..80).contains(&analysis.oiliness));
            assert!((10..60).contains(&analysis.dryness));
            assert!((5..35).contains(&analysis.dark_spots));
            assert_ne!(analysis.acne_level, AcneLevel::Severe);
            assert!(analysis.validate().is_ok());
        }
    }

    #[test]
    fn test_seeded_generation_is_deterministic() {
        let first = RandomAnalysisSource::generate(&mut StdRng::seed_from_u64(42));
        let second = RandomAnalysisSource::generate(&mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
    }

    #[test]
    fn test_produce_analysis_without_delay() {
        let source = RandomAnalysisSource::default();
        let analysis = tokio_test::block_on(source.produce_analysis()).unwrap();
        assert!(analysis.validate().is_ok());
        assert_eq!(source.name(), "random");
    }

    #[tokio::test(start_paused = true)]
    async fn test_produce_analysis_honors_delay() {
        let source = RandomAnalysisSource::new(Duration::from_secs(3));
        let start = tokio::time::Instant::now();
        source.produce_analysis().await.unwrap();
        assert!(start.elapsed() >= Duration::from_secs(3));
    }
}

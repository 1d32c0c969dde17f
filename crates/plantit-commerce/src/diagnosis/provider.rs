//! Diagnosis providers.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;

use crate::config::ScanConfig;
use crate::diagnosis::{builtin_diagnoses, Diagnosis, PlantImage};
use crate::error::CommerceError;

/// Something that can look at a plant photo and name its condition.
#[async_trait]
pub trait DiagnosisProvider: Send + Sync {
    /// Analyse an image.
    async fn analyze(&self, image: &PlantImage) -> Result<Diagnosis, CommerceError>;
}

/// Picks which canned diagnosis the mock analyser reports.
pub trait DiagnosisSelector: Send + Sync {
    /// Index into a list of `count` diagnoses.
    fn select(&self, count: usize) -> usize;
}

/// Uniformly random choice.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSelector;

impl DiagnosisSelector for RandomSelector {
    fn select(&self, count: usize) -> usize {
        if count == 0 {
            return 0;
        }
        rand::thread_rng().gen_range(0..count)
    }
}

/// Always the same index.
#[derive(Debug, Clone, Copy)]
pub struct FixedSelector(pub usize);

impl DiagnosisSelector for FixedSelector {
    fn select(&self, _count: usize) -> usize {
        self.0
    }
}

/// Simulated analyser: waits, then reports one of a fixed set of diagnoses.
pub struct MockDiagnosisProvider {
    diagnoses: Vec<Diagnosis>,
    delay: Duration,
    selector: Box<dyn DiagnosisSelector>,
}

impl MockDiagnosisProvider {
    /// Built-in diagnoses, random choice, configured delay.
    pub fn new(config: &ScanConfig) -> Self {
        Self {
            diagnoses: builtin_diagnoses(),
            delay: config.analysis_delay(),
            selector: Box::new(RandomSelector),
        }
    }

    pub fn with_selector(mut self, selector: impl DiagnosisSelector + 'static) -> Self {
        self.selector = Box::new(selector);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn diagnoses(&self) -> &[Diagnosis] {
        &self.diagnoses
    }

    /// Index of the diagnosis with the given condition, ignoring case.
    pub fn position_of(&self, condition: &str) -> Option<usize> {
        self.diagnoses
            .iter()
            .position(|d| d.condition.eq_ignore_ascii_case(condition.trim()))
    }
}

impl fmt::Debug for MockDiagnosisProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockDiagnosisProvider")
            .field("diagnoses", &self.diagnoses.len())
            .field("delay", &self.delay)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl DiagnosisProvider for MockDiagnosisProvider {
    async fn analyze(&self, image: &PlantImage) -> Result<Diagnosis, CommerceError> {
        tracing::debug!(
            file = image.file_name(),
            mime = image.mime_type(),
            delay_ms = self.delay.as_millis() as u64,
            "analysing plant image"
        );
        tokio::time::sleep(self.delay).await;

        let index = self.selector.select(self.diagnoses.len());
        let Some(diagnosis) = self.diagnoses.get(index).cloned() else {
            return Err(CommerceError::DiagnosisNotFound(format!("index {index}")));
        };

        tracing::info!(
            file = image.file_name(),
            condition = %diagnosis.condition,
            severity = %diagnosis.severity,
            "diagnosis ready"
        );
        Ok(diagnosis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnosis::Severity;

    fn leaf() -> PlantImage {
        PlantImage::new("leaf.jpg", "image/jpeg", 512).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_analysis_waits_configured_delay() {
        let provider = MockDiagnosisProvider::new(&ScanConfig::default())
            .with_selector(FixedSelector(2));

        let start = tokio::time::Instant::now();
        let diagnosis = provider.analyze(&leaf()).await.unwrap();
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_secs(3));
        assert!(elapsed < Duration::from_millis(3100));
        assert_eq!(diagnosis.condition, "Nutrient Deficiency");
        assert_eq!(diagnosis.severity, Severity::Mild);
    }

    #[tokio::test(start_paused = true)]
    async fn test_random_choice_stays_in_builtin_set() {
        let provider = MockDiagnosisProvider::new(&ScanConfig::default());
        let known: Vec<_> = builtin_diagnoses()
            .into_iter()
            .map(|d| d.condition)
            .collect();

        for _ in 0..20 {
            let diagnosis = provider.analyze(&leaf()).await.unwrap();
            assert!(known.contains(&diagnosis.condition));
        }
    }

    #[tokio::test]
    async fn test_out_of_range_selection() {
        let provider = MockDiagnosisProvider::new(&ScanConfig::default())
            .with_delay(Duration::ZERO)
            .with_selector(FixedSelector(9));

        let err = provider.analyze(&leaf()).await.unwrap_err();
        assert!(matches!(err, CommerceError::DiagnosisNotFound(_)));
    }

    #[test]
    fn test_position_of_condition() {
        let provider = MockDiagnosisProvider::new(&ScanConfig::default());
        assert_eq!(provider.position_of("healthy plant"), Some(1));
        assert_eq!(provider.position_of("root rot"), None);
    }
}

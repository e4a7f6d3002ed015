//! Scaler + classifier pair, validated once before any request is admitted.

use crate::config::ModelConfig;
use super::Label;
use crate::error::{ConfigError, PipelineError};
use crate::features::{extract, FEATURE_COUNT};
use crate::model::{self, Classifier, Transform};
use std::sync::Arc;
use tracing::info;

/// Immutable after construction; share it behind `Arc` across request handlers.
#[derive(Clone)]
pub struct InferenceContext {
    scaler: Arc<dyn Transform>,
    classifier: Arc<dyn Classifier>,
}

impl std::fmt::Debug for InferenceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InferenceContext")
            .field("scaler_features", &self.scaler.n_features())
            .field("classifier_features", &self.classifier.n_features())
            .finish()
    }
}

impl InferenceContext {
    /// Build from already-loaded components and run the startup self-check:
    /// widths must equal the extractor's, and a prediction on the empty URL must succeed.
    pub fn new(scaler: Arc<dyn Transform>, classifier: Arc<dyn Classifier>) -> Result<Self, ConfigError> {
        if scaler.n_features() != FEATURE_COUNT {
            return Err(ConfigError::DimensionMismatch {
                component: "scaler",
                expected: FEATURE_COUNT,
                actual: scaler.n_features(),
            });
        }
        if let Some(n) = classifier.n_features() {
            if n != FEATURE_COUNT {
                return Err(ConfigError::DimensionMismatch {
                    component: "classifier",
                    expected: FEATURE_COUNT,
                    actual: n,
                });
            }
        }

        let ctx = Self { scaler, classifier };
        ctx.run(&extract("").to_array())
            .map_err(ConfigError::SelfCheck)?;
        Ok(ctx)
    }

    /// Load both artifacts from the configured paths, then self-check.
    pub fn load(config: &ModelConfig) -> Result<Self, ConfigError> {
        let scaler = model::load_scaler(&config.scaler_path, config.scaler_sha256.as_deref())?;
        let classifier = model::load_classifier(&config.model_path, config.model_sha256.as_deref())?;
        let ctx = Self::new(scaler, classifier)?;
        info!(
            scaler = %config.scaler_path.display(),
            model = %config.model_path.display(),
            features = FEATURE_COUNT,
            "inference context ready"
        );
        Ok(ctx)
    }

    /// Scale then classify, mapping the class index to a label.
    pub(crate) fn run(&self, features: &[f64]) -> Result<(Label, Option<f64>), PipelineError> {
        let scaled = self.scaler.transform(features)?;
        let out = self.classifier.classify(&scaled)?;
        let label = Label::from_class(out.class)?;
        Ok((label, out.confidence))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Classification, LogisticRegression, StandardScaler};

    struct Broken;

    impl Classifier for Broken {
        fn n_features(&self) -> Option<usize> {
            None
        }

        fn classify(&self, _x: &[f64]) -> Result<Classification, PipelineError> {
            Err(PipelineError::Backend("corrupted".into()))
        }
    }

    fn scaler(n: usize) -> Arc<dyn Transform> {
        Arc::new(StandardScaler::new(vec![0.0; n], vec![1.0; n]).unwrap())
    }

    #[test]
    fn accepts_matching_widths() {
        let clf = Arc::new(LogisticRegression::new(vec![0.1; 10], 0.0).unwrap());
        assert!(InferenceContext::new(scaler(10), clf).is_ok());
    }

    #[test]
    fn scaler_width_mismatch_is_fatal() {
        let clf = Arc::new(LogisticRegression::new(vec![0.1; 10], 0.0).unwrap());
        let err = InferenceContext::new(scaler(9), clf).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::DimensionMismatch {
                component: "scaler",
                actual: 9,
                ..
            }
        ));
    }

    #[test]
    fn classifier_width_mismatch_is_fatal() {
        let clf = Arc::new(LogisticRegression::new(vec![0.1; 12], 0.0).unwrap());
        let err = InferenceContext::new(scaler(10), clf).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::DimensionMismatch {
                component: "classifier",
                ..
            }
        ));
    }

    #[test]
    fn failing_self_check_is_fatal() {
        let err = InferenceContext::new(scaler(10), Arc::new(Broken)).unwrap_err();
        assert!(matches!(err, ConfigError::SelfCheck(PipelineError::Backend(_))));
    }
}

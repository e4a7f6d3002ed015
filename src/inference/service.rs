//! Single request/response operation: URL in, label out.

use super::InferenceContext;
use crate::error::PipelineError;
use crate::features::extract;
use serde::{Deserialize, Serialize};

/// Fixed convention: class 0 is legitimate, class 1 is phishing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Label {
    Safe,
    Phishing,
}

impl Label {
    pub fn from_class(class: i64) -> Result<Self, PipelineError> {
        match class {
            0 => Ok(Label::Safe),
            1 => Ok(Label::Phishing),
            other => Err(PipelineError::UnknownClass(other)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Safe => "safe",
            Label::Phishing => "phishing",
        }
    }
}

/// Echoes the submitted URL verbatim alongside its label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub url: String,
    pub prediction: Label,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

/// Stateless per call; holds only the shared immutable context.
#[derive(Debug, Clone)]
pub struct InferenceService {
    context: InferenceContext,
}

impl InferenceService {
    pub fn new(context: InferenceContext) -> Self {
        Self { context }
    }

    /// Extract, scale, classify, in that order.
    pub fn predict(&self, url: &str) -> Result<PredictionResult, PipelineError> {
        let features = extract(url);
        let (prediction, confidence) = self.context.run(&features.to_array())?;
        Ok(PredictionResult {
            url: url.to_string(),
            prediction,
            confidence,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Classification, Classifier, StandardScaler, Transform};
    use std::sync::atomic::{AtomicI64, Ordering};
    use std::sync::Arc;

    /// Returns whatever class it is told to; records nothing.
    struct Fixed(AtomicI64);

    impl Classifier for Fixed {
        fn n_features(&self) -> Option<usize> {
            Some(10)
        }

        fn classify(&self, _x: &[f64]) -> Result<Classification, PipelineError> {
            Ok(Classification {
                class: self.0.load(Ordering::Relaxed),
                confidence: None,
            })
        }
    }

    fn service(clf: Arc<Fixed>) -> InferenceService {
        let scaler: Arc<dyn Transform> = Arc::new(StandardScaler::new(vec![0.0; 10], vec![1.0; 10]).unwrap());
        InferenceService::new(InferenceContext::new(scaler, clf).unwrap())
    }

    #[test]
    fn label_mapping_is_fixed() {
        assert_eq!(Label::from_class(0).unwrap(), Label::Safe);
        assert_eq!(Label::from_class(1).unwrap(), Label::Phishing);
        assert!(matches!(Label::from_class(2), Err(PipelineError::UnknownClass(2))));
        assert_eq!(Label::Phishing.as_str(), "phishing");
    }

    #[test]
    fn echoes_url() {
        let clf = Arc::new(Fixed(AtomicI64::new(1)));
        let svc = service(clf);
        let r = svc.predict("https://test-domain.com/page").unwrap();
        assert_eq!(r.url, "https://test-domain.com/page");
        assert_eq!(r.prediction, Label::Phishing);
        assert_eq!(r.confidence, None);
    }

    #[test]
    fn unknown_class_is_an_error_not_a_label() {
        let clf = Arc::new(Fixed(AtomicI64::new(0)));
        let svc = service(clf.clone());
        clf.0.store(7, Ordering::Relaxed);
        assert!(matches!(svc.predict("x"), Err(PipelineError::UnknownClass(7))));
    }

    #[test]
    fn serializes_like_the_api() {
        let r = PredictionResult {
            url: "u".into(),
            prediction: Label::Safe,
            confidence: None,
        };
        assert_eq!(
            serde_json::to_value(&r).unwrap(),
            serde_json::json!({"url": "u", "prediction": "safe"})
        );
    }
}

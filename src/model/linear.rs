//! Logistic regression decision function: `d = coef · x + intercept`, class 1 iff `d > 0`.

use super::{check_len, Classification, Classifier};
use crate::error::PipelineError;
use ndarray::{Array1, ArrayView1};

#[derive(Debug, Clone)]
pub struct LogisticRegression {
    coef: Array1<f64>,
    intercept: f64,
}

impl LogisticRegression {
    pub fn new(coef: Vec<f64>, intercept: f64) -> Result<Self, String> {
        if coef.is_empty() {
            return Err("coef is empty".to_string());
        }
        if !intercept.is_finite() || coef.iter().any(|c| !c.is_finite()) {
            return Err("non-finite weight".to_string());
        }
        Ok(Self {
            coef: Array1::from(coef),
            intercept,
        })
    }

    pub fn decision(&self, x: &[f64]) -> Result<f64, PipelineError> {
        check_len("classifier", self.coef.len(), x.len())?;
        Ok(self.coef.dot(&ArrayView1::from(x)) + self.intercept)
    }
}

fn sigmoid(d: f64) -> f64 {
    1.0 / (1.0 + (-d).exp())
}

impl Classifier for LogisticRegression {
    fn n_features(&self) -> Option<usize> {
        Some(self.coef.len())
    }

    fn classify(&self, x: &[f64]) -> Result<Classification, PipelineError> {
        let d = self.decision(x)?;
        let p_phishing = sigmoid(d);
        let (class, confidence) = if d > 0.0 {
            (1, p_phishing)
        } else {
            (0, 1.0 - p_phishing)
        };
        Ok(Classification {
            class,
            confidence: Some(confidence),
        })
    }
}

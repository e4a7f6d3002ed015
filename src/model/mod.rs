//! Pre-fitted scaler and pre-trained classifier, loaded once from persisted artifacts.
//!
//! Both are reached only through capability traits, so the inference context can hold
//! a real loaded artifact or a test double without probing for methods at runtime.
//! Artifacts are JSON documents tagged by `"kind"`; see [`ScalerParams`] and [`ModelArtifact`].

mod linear;
#[cfg(feature = "onnx")]
mod onnx;
mod scaler;

pub use linear::LogisticRegression;
#[cfg(feature = "onnx")]
pub use onnx::OnnxClassifier;
pub use scaler::{MinMaxScaler, ScalerParams, StandardScaler};

use crate::error::{ConfigError, PipelineError};
use crate::features::FEATURE_NAMES;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Per-feature normalization fitted at training time.
pub trait Transform: Send + Sync {
    /// Number of features the parameters were fitted on
    fn n_features(&self) -> usize;

    fn transform(&self, x: &[f64]) -> Result<Vec<f64>, PipelineError>;
}

/// Binary decision function over a scaled vector.
pub trait Classifier: Send + Sync {
    /// Input width, when the artifact records it
    fn n_features(&self) -> Option<usize>;

    fn classify(&self, x: &[f64]) -> Result<Classification, PipelineError>;
}

/// Raw classifier output: class index (0 legitimate, 1 phishing) and, when the
/// model has a probability interface, the probability of that class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub class: i64,
    pub confidence: Option<f64>,
}

/// Classifier artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    LogisticRegression {
        coef: Vec<f64>,
        intercept: f64,
        #[serde(default)]
        feature_names: Option<Vec<String>>,
    },
    /// Converted classifier in a sibling `.onnx` file (relative to this artifact)
    Onnx {
        path: PathBuf,
        #[serde(default)]
        n_features: Option<usize>,
        #[serde(default)]
        input: Option<String>,
        #[serde(default = "default_label_output")]
        label_output: String,
        #[serde(default)]
        probability_output: Option<String>,
    },
}

fn default_label_output() -> String {
    "label".to_string()
}

/// Read an artifact, log its digest, and enforce a pinned digest if configured.
pub(crate) fn read_artifact(path: &Path, expected_sha256: Option<&str>) -> Result<Vec<u8>, ConfigError> {
    let bytes = std::fs::read(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let digest = format!("{:x}", Sha256::digest(&bytes));
    if let Some(expected) = expected_sha256 {
        if !expected.eq_ignore_ascii_case(&digest) {
            return Err(ConfigError::ChecksumMismatch {
                path: path.to_path_buf(),
                expected: expected.to_string(),
                actual: digest,
            });
        }
    }
    info!(path = %path.display(), sha256 = %digest, size = bytes.len(), "artifact read");
    Ok(bytes)
}

fn parse_artifact<T: serde::de::DeserializeOwned>(path: &Path, bytes: &[u8]) -> Result<T, ConfigError> {
    serde_json::from_slice(bytes).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Recorded training column order must match the extractor's order exactly.
pub(crate) fn check_feature_names(
    component: &'static str,
    names: Option<&[String]>,
) -> Result<(), ConfigError> {
    let Some(names) = names else {
        return Ok(());
    };
    if names.iter().map(String::as_str).eq(FEATURE_NAMES) {
        return Ok(());
    }
    Err(ConfigError::FeatureOrder {
        component,
        expected: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
        actual: names.to_vec(),
    })
}

pub(crate) fn check_len(stage: &'static str, expected: usize, actual: usize) -> Result<(), PipelineError> {
    if expected == actual {
        Ok(())
    } else {
        Err(PipelineError::Dimension {
            stage,
            expected,
            actual,
        })
    }
}

/// Load scaler parameters from `path`.
pub fn load_scaler(path: &Path, expected_sha256: Option<&str>) -> Result<Arc<dyn Transform>, ConfigError> {
    let bytes = read_artifact(path, expected_sha256)?;
    let params: ScalerParams = parse_artifact(path, &bytes)?;
    params.build(path)
}

/// Load a classifier from `path`.
pub fn load_classifier(path: &Path, expected_sha256: Option<&str>) -> Result<Arc<dyn Classifier>, ConfigError> {
    let bytes = read_artifact(path, expected_sha256)?;
    let artifact: ModelArtifact = parse_artifact(path, &bytes)?;
    match artifact {
        ModelArtifact::LogisticRegression {
            coef,
            intercept,
            feature_names,
        } => {
            check_feature_names("classifier", feature_names.as_deref())?;
            Ok(Arc::new(LogisticRegression::new(coef, intercept).map_err(|reason| {
                ConfigError::Artifact {
                    path: path.to_path_buf(),
                    reason,
                }
            })?))
        }
        #[cfg(feature = "onnx")]
        ModelArtifact::Onnx {
            path: model_file,
            n_features,
            input,
            label_output,
            probability_output,
        } => {
            let model_file = match path.parent() {
                Some(dir) if model_file.is_relative() => dir.join(model_file),
                _ => model_file,
            };
            let classifier =
                OnnxClassifier::load(&model_file, n_features, input, label_output, probability_output)?;
            Ok(Arc::new(classifier))
        }
        #[cfg(not(feature = "onnx"))]
        ModelArtifact::Onnx { .. } => Err(ConfigError::Artifact {
            path: path.to_path_buf(),
            reason: "onnx classifier requires building with the `onnx` feature".to_string(),
        }),
    }
}

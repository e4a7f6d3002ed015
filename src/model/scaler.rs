//! Element-wise affine scalers (standardization and min-max), parameters immutable after load.

use super::{check_feature_names, check_len, Transform};
use crate::error::{ConfigError, PipelineError};
use ndarray::{Array1, ArrayView1};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// Persisted scaler parameters, one entry per feature.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScalerParams {
    /// `(x - mean) / scale`
    Standard {
        mean: Vec<f64>,
        scale: Vec<f64>,
        #[serde(default)]
        feature_names: Option<Vec<String>>,
    },
    /// `x * scale + min`
    MinMax {
        min: Vec<f64>,
        scale: Vec<f64>,
        #[serde(default)]
        feature_names: Option<Vec<String>>,
    },
}

impl ScalerParams {
    /// Validate and build the transform. `path` is only used for error context.
    pub fn build(self, path: &Path) -> Result<Arc<dyn Transform>, ConfigError> {
        let invalid = |reason: String| ConfigError::Artifact {
            path: path.to_path_buf(),
            reason,
        };
        match self {
            ScalerParams::Standard {
                mean,
                scale,
                feature_names,
            } => {
                check_feature_names("scaler", feature_names.as_deref())?;
                Ok(Arc::new(StandardScaler::new(mean, scale).map_err(invalid)?))
            }
            ScalerParams::MinMax {
                min,
                scale,
                feature_names,
            } => {
                check_feature_names("scaler", feature_names.as_deref())?;
                Ok(Arc::new(MinMaxScaler::new(min, scale).map_err(invalid)?))
            }
        }
    }
}

fn validate(offset_name: &str, offset: &[f64], scale: &[f64]) -> Result<(), String> {
    if offset.is_empty() {
        return Err(format!("{offset_name} is empty"));
    }
    if offset.len() != scale.len() {
        return Err(format!(
            "{offset_name} has {} entries but scale has {}",
            offset.len(),
            scale.len()
        ));
    }
    if offset.iter().chain(scale).any(|v| !v.is_finite()) {
        return Err("non-finite parameter".to_string());
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct StandardScaler {
    mean: Array1<f64>,
    scale: Array1<f64>,
}

impl StandardScaler {
    /// A zero scale marks a constant training feature and is replaced by 1.
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self, String> {
        validate("mean", &mean, &scale)?;
        let scale = scale
            .into_iter()
            .map(|s| if s == 0.0 { 1.0 } else { s })
            .collect::<Vec<_>>();
        Ok(Self {
            mean: Array1::from(mean),
            scale: Array1::from(scale),
        })
    }
}

impl Transform for StandardScaler {
    fn n_features(&self) -> usize {
        self.mean.len()
    }

    fn transform(&self, x: &[f64]) -> Result<Vec<f64>, PipelineError> {
        check_len("scaler", self.mean.len(), x.len())?;
        let x = ArrayView1::from(x);
        Ok(((&x - &self.mean) / &self.scale).to_vec())
    }
}

#[derive(Debug, Clone)]
pub struct MinMaxScaler {
    min: Array1<f64>,
    scale: Array1<f64>,
}

impl MinMaxScaler {
    pub fn new(min: Vec<f64>, scale: Vec<f64>) -> Result<Self, String> {
        validate("min", &min, &scale)?;
        Ok(Self {
            min: Array1::from(min),
            scale: Array1::from(scale),
        })
    }
}

impl Transform for MinMaxScaler {
    fn n_features(&self) -> usize {
        self.min.len()
    }

    fn transform(&self, x: &[f64]) -> Result<Vec<f64>, PipelineError> {
        check_len("scaler", self.min.len(), x.len())?;
        let x = ArrayView1::from(x);
        Ok((&x * &self.scale + &self.min).to_vec())
    }
}

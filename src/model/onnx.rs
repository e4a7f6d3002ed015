//! ONNX Runtime classifier. Input: [1, n_features] f32 (narrowed from the f64 pipeline).
//! Outputs: int64 label and, optionally, an f32 [1, 2] probability tensor (export without ZipMap).

use super::{check_len, Classification, Classifier};
use crate::error::{ConfigError, PipelineError};
use ndarray::Array2;
use ort::session::Session;
use ort::value::TensorRef;
use std::path::Path;
use std::sync::Mutex;

pub struct OnnxClassifier {
    session: Mutex<Session>,
    input_name: String,
    label_output: String,
    probability_output: Option<String>,
    n_features: Option<usize>,
}

fn backend(e: impl std::fmt::Display) -> PipelineError {
    PipelineError::Backend(e.to_string())
}

impl OnnxClassifier {
    pub fn load(
        path: &Path,
        n_features: Option<usize>,
        input: Option<String>,
        label_output: String,
        probability_output: Option<String>,
    ) -> Result<Self, ConfigError> {
        let artifact_err = |e: ort::Error| ConfigError::Artifact {
            path: path.to_path_buf(),
            reason: e.to_string(),
        };
        let session = Session::builder()
            .map_err(artifact_err)?
            .commit_from_file(path)
            .map_err(artifact_err)?;

        let input_name = match input {
            Some(name) => name,
            None => session
                .inputs
                .first()
                .map(|i| i.name.clone())
                .unwrap_or_else(|| "input".to_string()),
        };
        tracing::info!(path = %path.display(), input = %input_name, "onnx classifier loaded");

        Ok(Self {
            session: Mutex::new(session),
            input_name,
            label_output,
            probability_output,
            n_features,
        })
    }
}

impl Classifier for OnnxClassifier {
    fn n_features(&self) -> Option<usize> {
        self.n_features
    }

    fn classify(&self, x: &[f64]) -> Result<Classification, PipelineError> {
        if let Some(n) = self.n_features {
            check_len("classifier", n, x.len())?;
        }
        let narrowed: Vec<f32> = x.iter().map(|&v| v as f32).collect();
        let input = Array2::from_shape_vec((1, x.len()), narrowed).map_err(backend)?;
        let tensor = TensorRef::from_array_view(&input).map_err(backend)?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| PipelineError::Backend("session lock poisoned".to_string()))?;
        let outputs = session
            .run(ort::inputs![self.input_name.as_str() => tensor])
            .map_err(backend)?;

        let labels = outputs[self.label_output.as_str()]
            .try_extract_array::<i64>()
            .map_err(backend)?;
        let class = labels
            .iter()
            .next()
            .copied()
            .ok_or_else(|| PipelineError::Backend("empty label output".to_string()))?;

        let confidence = match &self.probability_output {
            Some(name) => {
                let probs = outputs[name.as_str()].try_extract_array::<f32>().map_err(backend)?;
                let idx = usize::try_from(class).map_err(|_| PipelineError::UnknownClass(class))?;
                probs.iter().nth(idx).map(|&p| f64::from(p))
            }
            None => None,
        };

        Ok(Classification { class, confidence })
    }
}

//! Classifier artifact loading and inference.
//!
//! The artifact is a JSON document produced by the training pipeline and
//! treated as opaque beyond its declared interface. Three classifier kinds
//! are supported, each with a different probability capability:
//!
//! - `calibrated_linear` — linear score mapped through a monotone
//!   calibration table; the artifact itself yields a probability.
//! - `linear_margin` — raw decision score; the logistic transform
//!   `1/(1+e^-s)` turns it into a probability.
//! - `label_vote` — stump ensemble producing only a 0/1 label, which is
//!   used directly as the probability.
//!
//! The kind is fixed when the artifact is parsed, so the capability is
//! resolved once per load rather than probed on every call.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use ndarray::Array1;
use serde::Deserialize;
use serde::Serialize;

use crate::features::{FeatureVector, FEATURE_COUNT, FEATURE_NAMES};

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("model artifact not found: {path}")]
    NotFound { path: PathBuf },
    #[error("cannot read model artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid model artifact {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("model schema mismatch: {0}")]
    SchemaMismatch(String),
    #[error("inference failed: {0}")]
    Inference(String),
}

/// How the classifier produces a probability. Fixed per loaded artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// The artifact carries its own score-to-probability calibration.
    Probability,
    /// The artifact yields a decision score; the logistic transform applies.
    DecisionScore,
    /// The artifact yields only a 0/1 label.
    LabelOnly,
}

/// Binary outcome with its probability. `class` is 1 exactly when
/// `probability >= 0.5`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictionResult {
    pub class: u8,
    pub probability: f64,
}

/// On-disk artifact layout.
#[derive(Debug, Deserialize)]
struct ModelArtifact {
    name: String,
    version: String,
    feature_names: Vec<String>,
    classifier: ClassifierSpec,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum ClassifierSpec {
    CalibratedLinear {
        weights: Vec<f64>,
        bias: f64,
        calibration: CalibrationSpec,
    },
    LinearMargin {
        weights: Vec<f64>,
        bias: f64,
    },
    LabelVote {
        stumps: Vec<Stump>,
    },
}

/// Monotone score → probability table, linearly interpolated between
/// breakpoints and clamped to the endpoints outside them.
#[derive(Debug, Deserialize)]
struct CalibrationSpec {
    scores: Vec<f64>,
    probabilities: Vec<f64>,
}

/// Single-feature decision stump; votes 1 when the feature value is at or
/// above the threshold.
#[derive(Debug, Clone, Copy, Deserialize)]
struct Stump {
    feature: usize,
    threshold: f64,
}

#[derive(Debug)]
enum Inner {
    Calibrated {
        weights: Array1<f64>,
        bias: f64,
        scores: Vec<f64>,
        probabilities: Vec<f64>,
    },
    Margin {
        weights: Array1<f64>,
        bias: f64,
    },
    Vote {
        stumps: Vec<Stump>,
    },
}

/// A loaded classifier. Immutable after load; inference takes `&self` and
/// is safe to share across threads.
#[derive(Debug)]
pub struct Classifier {
    name: String,
    version: String,
    inner: Inner,
}

impl Classifier {
    /// Load and validate an artifact from disk.
    ///
    /// Fails with [`ModelError::NotFound`] when the path does not exist and
    /// never returns a usable handle on any failure.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        if !path.exists() {
            return Err(ModelError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let data = fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let artifact: ModelArtifact =
            serde_json::from_str(&data).map_err(|source| ModelError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        let classifier = Self::from_artifact(artifact)?;
        debug!(
            "loaded classifier '{}' v{} ({:?} capability) from {}",
            classifier.name,
            classifier.version,
            classifier.capability(),
            path.display()
        );
        Ok(classifier)
    }

    fn from_artifact(artifact: ModelArtifact) -> Result<Self, ModelError> {
        if artifact.feature_names != FEATURE_NAMES {
            return Err(ModelError::SchemaMismatch(format!(
                "artifact feature order {:?} does not match the expected schema",
                artifact.feature_names
            )));
        }

        let inner = match artifact.classifier {
            ClassifierSpec::CalibratedLinear {
                weights,
                bias,
                calibration,
            } => {
                let weights = checked_weights(weights)?;
                let CalibrationSpec {
                    scores,
                    probabilities,
                } = calibration;
                if scores.len() != probabilities.len() || scores.len() < 2 {
                    return Err(ModelError::SchemaMismatch(format!(
                        "calibration table needs at least 2 matched breakpoints, \
                         got {} scores and {} probabilities",
                        scores.len(),
                        probabilities.len()
                    )));
                }
                if scores.windows(2).any(|w| w[0] >= w[1]) {
                    return Err(ModelError::SchemaMismatch(
                        "calibration scores must be strictly increasing".into(),
                    ));
                }
                if probabilities.iter().any(|p| !(0.0..=1.0).contains(p)) {
                    return Err(ModelError::SchemaMismatch(
                        "calibration probabilities must lie in [0, 1]".into(),
                    ));
                }
                Inner::Calibrated {
                    weights,
                    bias,
                    scores,
                    probabilities,
                }
            }
            ClassifierSpec::LinearMargin { weights, bias } => Inner::Margin {
                weights: checked_weights(weights)?,
                bias,
            },
            ClassifierSpec::LabelVote { stumps } => {
                if stumps.is_empty() {
                    return Err(ModelError::SchemaMismatch(
                        "label_vote classifier has no stumps".into(),
                    ));
                }
                if let Some(s) = stumps.iter().find(|s| s.feature >= FEATURE_COUNT) {
                    return Err(ModelError::SchemaMismatch(format!(
                        "stump references feature index {} (schema has {FEATURE_COUNT})",
                        s.feature
                    )));
                }
                Inner::Vote { stumps }
            }
        };

        Ok(Self {
            name: artifact.name,
            version: artifact.version,
            inner,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn capability(&self) -> Capability {
        match self.inner {
            Inner::Calibrated { .. } => Capability::Probability,
            Inner::Margin { .. } => Capability::DecisionScore,
            Inner::Vote { .. } => Capability::LabelOnly,
        }
    }

    /// Positive-class probability for the given feature vector.
    pub fn probability(&self, features: &FeatureVector) -> Result<f64, ModelError> {
        let x = features.to_array();
        let p = match &self.inner {
            Inner::Calibrated {
                weights,
                bias,
                scores,
                probabilities,
            } => interpolate(weights.dot(&x) + bias, scores, probabilities),
            Inner::Margin { weights, bias } => sigmoid(weights.dot(&x) + bias),
            Inner::Vote { stumps } => {
                let values = features.values();
                let votes = stumps
                    .iter()
                    .filter(|s| values[s.feature] >= s.threshold)
                    .count();
                if 2 * votes >= stumps.len() {
                    1.0
                } else {
                    0.0
                }
            }
        };
        if !p.is_finite() {
            return Err(ModelError::Inference(format!(
                "classifier produced a non-finite probability for input {:?}",
                features.values()
            )));
        }
        Ok(p)
    }

    /// Probability plus the 0.5-thresholded class.
    pub fn predict(&self, features: &FeatureVector) -> Result<PredictionResult, ModelError> {
        let probability = self.probability(features)?;
        Ok(PredictionResult {
            class: u8::from(probability >= 0.5),
            probability,
        })
    }
}

fn checked_weights(weights: Vec<f64>) -> Result<Array1<f64>, ModelError> {
    if weights.len() != FEATURE_COUNT {
        return Err(ModelError::SchemaMismatch(format!(
            "expected {FEATURE_COUNT} weights, got {}",
            weights.len()
        )));
    }
    Ok(Array1::from_vec(weights))
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Piecewise-linear lookup. `scores` is strictly increasing (validated at
/// load); values outside the table clamp to the endpoint probabilities.
fn interpolate(score: f64, scores: &[f64], probabilities: &[f64]) -> f64 {
    let n = scores.len();
    if score <= scores[0] {
        return probabilities[0];
    }
    if score >= scores[n - 1] {
        return probabilities[n - 1];
    }
    let hi = scores.partition_point(|s| *s < score);
    let lo = hi - 1;
    let t = (score - scores[lo]) / (scores[hi] - scores[lo]);
    probabilities[lo] + t * (probabilities[hi] - probabilities[lo])
}

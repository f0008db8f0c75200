//! Assessment orchestration: patient record → features → classifier → banded
//! result.
//!
//! Inference failures degrade to a zero-probability result with the
//! diagnostic carried in [`RiskAssessment::error`] instead of aborting the
//! request, so one bad record never sinks a cohort run.

use log::warn;
use rayon::prelude::*;

use crate::features::PatientRecord;
use crate::model::Classifier;
use crate::report::{RiskAssessment, RiskBand, DEFAULT_ELEVATED_THRESHOLD};

#[derive(Debug, Clone, Copy)]
pub struct AssessOptions {
    pub elevated_threshold: f64,
}

impl Default for AssessOptions {
    fn default() -> Self {
        Self {
            elevated_threshold: DEFAULT_ELEVATED_THRESHOLD,
        }
    }
}

/// Assess a single patient record.
pub fn assess(
    classifier: &Classifier,
    record: &PatientRecord,
    options: &AssessOptions,
) -> RiskAssessment {
    let features = record.to_features();
    match classifier.predict(&features) {
        Ok(prediction) => RiskAssessment {
            class: prediction.class,
            probability: prediction.probability,
            band: RiskBand::from_probability(prediction.probability, options.elevated_threshold),
            error: None,
        },
        Err(e) => {
            warn!("prediction failed: {e}");
            RiskAssessment {
                class: 0,
                probability: 0.0,
                band: RiskBand::Low,
                error: Some(format!("prediction failed: {e}")),
            }
        }
    }
}

/// Assess a cohort in parallel. Results keep the input order and each
/// record's failure is isolated to its own entry.
pub fn assess_cohort(
    classifier: &Classifier,
    records: &[PatientRecord],
    options: &AssessOptions,
) -> Vec<RiskAssessment> {
    records
        .par_iter()
        .map(|record| assess(classifier, record, options))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{FEATURE_COUNT, FEATURE_NAMES};
    use crate::model::Classifier;

    fn margin_classifier(bias: f64) -> Classifier {
        let mut weights = vec![0.0; FEATURE_COUNT];
        weights[1] = 0.1; // age carries the signal
        let doc = serde_json::json!({
            "name": "framingham_chd",
            "version": "1.0",
            "feature_names": FEATURE_NAMES,
            "classifier": {
                "kind": "linear_margin",
                "weights": weights,
                "bias": bias,
            },
        });
        let path = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(path.path(), doc.to_string()).unwrap();
        Classifier::load(path.path()).unwrap()
    }

    #[test]
    fn successful_assessment_is_banded() {
        let classifier = margin_classifier(-4.6); // age 45 → score -0.1
        let result = assess(
            &classifier,
            &PatientRecord::default(),
            &AssessOptions::default(),
        );
        assert!(result.error.is_none());
        assert_eq!(result.class, 0);
        assert!(result.probability > 0.4 && result.probability < 0.5);
        assert_eq!(result.band, RiskBand::Elevated);
    }

    #[test]
    fn failed_prediction_degrades_to_zero_with_diagnostic() {
        let classifier = margin_classifier(0.0);
        let mut record = PatientRecord::default();
        record.bmi = f64::NAN;

        let result = assess(&classifier, &record, &AssessOptions::default());
        assert_eq!(result.class, 0);
        assert_eq!(result.probability, 0.0);
        assert_eq!(result.band, RiskBand::Low);
        let err = result.error.expect("diagnostic must accompany the default");
        assert!(err.contains("prediction failed"));
    }

    #[test]
    fn cohort_keeps_order_and_isolates_failures() {
        let classifier = margin_classifier(-4.6);

        let young = PatientRecord {
            age: 20.0,
            ..PatientRecord::default()
        };
        let mut broken = PatientRecord::default();
        broken.heart_rate = f64::INFINITY;
        let old = PatientRecord {
            age: 80.0,
            ..PatientRecord::default()
        };

        let results = assess_cohort(
            &classifier,
            &[young, broken, old],
            &AssessOptions::default(),
        );
        assert_eq!(results.len(), 3);
        assert!(results[0].error.is_none());
        assert!(results[1].error.is_some());
        assert!(results[2].error.is_none());
        // Order preserved: the 80-year-old scores higher than the 20-year-old.
        assert!(results[2].probability > results[0].probability);
        assert_eq!(results[2].band, RiskBand::High);
    }
}

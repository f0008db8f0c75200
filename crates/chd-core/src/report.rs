//! Risk banding and result formatting for the CLI and GUI frontends.

use serde::Serialize;

/// Probability at or above which the predicted class flips to 1. Fixed by
/// the classifier contract, not configurable.
pub const CLASS_THRESHOLD: f64 = 0.5;

/// Default probability at which the Low band ends and Elevated begins.
pub const DEFAULT_ELEVATED_THRESHOLD: f64 = 0.2;

/// Qualitative risk band shown alongside the raw probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskBand {
    Low,
    Elevated,
    High,
}

impl RiskBand {
    /// Band for a probability. The Elevated cut is adjustable; the High cut
    /// is the fixed class threshold.
    pub fn from_probability(probability: f64, elevated_threshold: f64) -> Self {
        if probability >= CLASS_THRESHOLD {
            RiskBand::High
        } else if probability >= elevated_threshold {
            RiskBand::Elevated
        } else {
            RiskBand::Low
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskBand::Low => "LOW RISK",
            RiskBand::Elevated => "ELEVATED RISK",
            RiskBand::High => "HIGH RISK",
        }
    }

    pub fn guidance(self) -> &'static str {
        match self {
            RiskBand::Low => {
                "The model predicts a relatively low risk. Continue to maintain \
                 a healthy lifestyle and regular check-ups."
            }
            RiskBand::Elevated => {
                "The model indicates an elevated risk. Consult a doctor to \
                 discuss preventive strategies and further screening."
            }
            RiskBand::High => {
                "The model predicts a high probability of CHD. Clinical \
                 evaluation is strongly recommended; lifestyle changes and \
                 medical consultation are crucial."
            }
        }
    }
}

/// Outcome of assessing one patient record.
///
/// When `error` is set, the prediction failed and the zero class/probability
/// are defaults, not a risk estimate — callers must not trust a 0.0
/// probability without checking this field.
#[derive(Debug, Clone, Serialize)]
pub struct RiskAssessment {
    pub class: u8,
    pub probability: f64,
    pub band: RiskBand,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {s}. Use 'text' or 'json'.")),
        }
    }
}

pub fn print_results(results: &[RiskAssessment], format: OutputFormat) {
    match format {
        OutputFormat::Text => print_text(results),
        OutputFormat::Json => print_json(results),
    }
}

fn count_band(results: &[RiskAssessment], band: RiskBand) -> usize {
    results
        .iter()
        .filter(|r| r.error.is_none() && r.band == band)
        .count()
}

fn print_text(results: &[RiskAssessment]) {
    println!("\n{}", "=".repeat(70));
    println!("CHD RISK ASSESSMENT");
    println!("{}", "=".repeat(70));

    for (i, r) in results.iter().enumerate() {
        match &r.error {
            Some(err) => println!("  #{:<4} [ ERROR ] -- {err}", i + 1),
            None => println!(
                "  #{:<4} [{:>6.1}%] {}",
                i + 1,
                r.probability * 100.0,
                r.band.label()
            ),
        }
    }

    // A single assessment gets the full guidance message, the way the
    // interactive form shows it.
    if let [only] = results {
        if only.error.is_none() {
            println!("\n  {}", only.band.guidance());
        }
    }

    let errors = results.iter().filter(|r| r.error.is_some()).count();
    println!("\nSUMMARY:");
    println!("  Patients assessed: {}", results.len());
    println!("  High risk:         {}", count_band(results, RiskBand::High));
    println!(
        "  Elevated risk:     {}",
        count_band(results, RiskBand::Elevated)
    );
    println!("  Low risk:          {}", count_band(results, RiskBand::Low));
    println!("  Errors:            {errors}");
    println!("{}", "=".repeat(70));
}

fn print_json(results: &[RiskAssessment]) {
    let output = serde_json::json!({
        "results": results,
        "summary": {
            "total": results.len(),
            "high": count_band(results, RiskBand::High),
            "elevated": count_band(results, RiskBand::Elevated),
            "low": count_band(results, RiskBand::Low),
            "errors": results.iter().filter(|r| r.error.is_some()).count(),
        }
    });
    println!("{}", serde_json::to_string_pretty(&output).unwrap_or_default());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_boundaries() {
        assert_eq!(
            RiskBand::from_probability(0.0, DEFAULT_ELEVATED_THRESHOLD),
            RiskBand::Low
        );
        assert_eq!(
            RiskBand::from_probability(0.19999, DEFAULT_ELEVATED_THRESHOLD),
            RiskBand::Low
        );
        assert_eq!(
            RiskBand::from_probability(0.2, DEFAULT_ELEVATED_THRESHOLD),
            RiskBand::Elevated
        );
        assert_eq!(
            RiskBand::from_probability(0.49999, DEFAULT_ELEVATED_THRESHOLD),
            RiskBand::Elevated
        );
        assert_eq!(
            RiskBand::from_probability(0.5, DEFAULT_ELEVATED_THRESHOLD),
            RiskBand::High
        );
        assert_eq!(
            RiskBand::from_probability(1.0, DEFAULT_ELEVATED_THRESHOLD),
            RiskBand::High
        );
    }

    #[test]
    fn custom_elevated_threshold_moves_only_the_low_cut() {
        assert_eq!(RiskBand::from_probability(0.15, 0.1), RiskBand::Elevated);
        assert_eq!(RiskBand::from_probability(0.15, 0.3), RiskBand::Low);
        // The High cut never moves.
        assert_eq!(RiskBand::from_probability(0.5, 0.9), RiskBand::High);
    }

    #[test]
    fn output_format_from_str() {
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn assessment_serializes_without_null_error() {
        let ok = RiskAssessment {
            class: 1,
            probability: 0.62,
            band: RiskBand::High,
            error: None,
        };
        let json = serde_json::to_value(&ok).unwrap();
        assert_eq!(json["class"], 1);
        assert_eq!(json["band"], "high");
        assert!(json.get("error").is_none());

        let failed = RiskAssessment {
            class: 0,
            probability: 0.0,
            band: RiskBand::Low,
            error: Some("prediction failed: boom".into()),
        };
        let json = serde_json::to_value(&failed).unwrap();
        assert_eq!(json["error"], "prediction failed: boom");
    }
}

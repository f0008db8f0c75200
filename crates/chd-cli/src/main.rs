//! CHD risk predictor CLI - assesses ten-year CHD risk with a trained
//! classifier artifact.
//!
//! Usage:
//!   chd-predictor --model chd_model.json --sex Male --age 63 --prevalent-hyp Yes
//!   chd-predictor --model chd_model.json --input cohort.json --format json
//!   chd-predictor --model chd_model.json --show-features

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use chd_core::assess::{assess_cohort, AssessOptions};
use chd_core::cache;
use chd_core::features::{Education, PatientRecord, Sex, YesNo};
use chd_core::report::{print_results, OutputFormat, DEFAULT_ELEVATED_THRESHOLD};

#[derive(Parser)]
#[command(name = "chd-predictor")]
#[command(about = "Ten-year CHD risk assessment from a trained classifier artifact")]
struct Cli {
    /// Path to the model artifact (JSON)
    #[arg(short, long)]
    model: PathBuf,

    /// JSON file with an array of patient records (cohort mode)
    #[arg(short, long)]
    input: Option<PathBuf>,

    #[command(flatten)]
    patient: PatientArgs,

    /// Probability at which the Low band ends and Elevated begins
    #[arg(long, default_value_t = DEFAULT_ELEVATED_THRESHOLD)]
    elevated_threshold: f64,

    /// Echo the assembled feature vector(s) before assessing
    #[arg(long)]
    show_features: bool,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,
}

/// Single-patient field flags. Defaults mirror the interactive form.
#[derive(clap::Args)]
struct PatientArgs {
    /// Patient sex
    #[arg(long, default_value = "Female", conflicts_with = "input")]
    sex: Sex,

    /// Age in years
    #[arg(long, default_value_t = 45.0, conflicts_with = "input")]
    age: f64,

    /// Education level code (1=Some High School .. 4=College/Post-Grad)
    #[arg(long, default_value = "2", conflicts_with = "input")]
    education: Education,

    /// Average cigarettes smoked per day
    #[arg(long, default_value_t = 0.0, conflicts_with = "input")]
    cigs_per_day: f64,

    /// Currently taking blood pressure medication?
    #[arg(long, default_value = "No", conflicts_with = "input")]
    bp_meds: YesNo,

    /// History of stroke?
    #[arg(long, default_value = "No", conflicts_with = "input")]
    prevalent_stroke: YesNo,

    /// History of hypertension?
    #[arg(long, default_value = "No", conflicts_with = "input")]
    prevalent_hyp: YesNo,

    /// History of diabetes?
    #[arg(long, default_value = "No", conflicts_with = "input")]
    diabetes: YesNo,

    /// Total cholesterol (mg/dL)
    #[arg(long, default_value_t = 200.0, conflicts_with = "input")]
    tot_chol: f64,

    /// Body mass index (kg/m2)
    #[arg(long, default_value_t = 25.0, conflicts_with = "input")]
    bmi: f64,

    /// Resting heart rate (bpm)
    #[arg(long, default_value_t = 70.0, conflicts_with = "input")]
    heart_rate: f64,

    /// Fasting glucose (mg/dL)
    #[arg(long, default_value_t = 85.0, conflicts_with = "input")]
    glucose: f64,
}

impl PatientArgs {
    fn to_record(&self) -> PatientRecord {
        PatientRecord {
            sex: self.sex,
            age: self.age,
            education: self.education,
            cigs_per_day: self.cigs_per_day,
            bp_meds: self.bp_meds,
            prevalent_stroke: self.prevalent_stroke,
            prevalent_hyp: self.prevalent_hyp,
            diabetes: self.diabetes,
            total_cholesterol: self.tot_chol,
            bmi: self.bmi,
            heart_rate: self.heart_rate,
            glucose: self.glucose,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let records: Vec<PatientRecord> = match &cli.input {
        Some(path) => {
            let data = fs::read_to_string(path)
                .with_context(|| format!("cannot read cohort file {}", path.display()))?;
            serde_json::from_str(&data)
                .with_context(|| format!("invalid cohort file {}", path.display()))?
        }
        None => vec![cli.patient.to_record()],
    };

    eprintln!("[*] Loading model from {}...", cli.model.display());
    let classifier = cache::load(&cli.model)?;
    eprintln!(
        "[*] Classifier '{}' v{} ready",
        classifier.name(),
        classifier.version()
    );

    if cli.show_features {
        for (i, record) in records.iter().enumerate() {
            eprintln!("[*] Features for patient #{}:", i + 1);
            for (name, value) in record.to_features().named() {
                eprintln!("      {name:>15} = {value}");
            }
        }
    }

    let options = AssessOptions {
        elevated_threshold: cli.elevated_threshold,
    };
    let results = assess_cohort(&classifier, &records, &options);

    print_results(&results, cli.format);

    Ok(())
}

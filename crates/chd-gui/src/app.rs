//! Application state and assessment management.

use std::path::PathBuf;
use std::sync::mpsc;

use chd_core::assess::{assess, AssessOptions};
use chd_core::cache;
use chd_core::features::PatientRecord;
use chd_core::report::{RiskAssessment, DEFAULT_ELEVATED_THRESHOLD};

/// Application state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssessState {
    Idle,
    Assessing,
    Complete,
}

pub struct PredictorApp {
    // Configuration
    pub model_path: Option<PathBuf>,
    pub elevated_threshold: f64,

    // Form
    pub record: PatientRecord,

    // State
    pub state: AssessState,
    pub assessment: Option<RiskAssessment>,
    pub error_message: Option<String>,

    // Communication
    result_rx: Option<mpsc::Receiver<AssessOutcome>>,
}

enum AssessOutcome {
    Success(Box<RiskAssessment>),
    Error(String),
}

impl PredictorApp {
    pub fn new() -> Self {
        Self {
            model_path: None,
            elevated_threshold: DEFAULT_ELEVATED_THRESHOLD,
            record: PatientRecord::default(),
            state: AssessState::Idle,
            assessment: None,
            error_message: None,
            result_rx: None,
        }
    }

    /// Kick off an assessment on a background thread. The first run loads
    /// the artifact from disk; later runs hit the process-wide cache.
    pub fn start_assessment(&mut self) {
        let Some(model_path) = self.model_path.clone() else {
            self.error_message = Some("No model artifact selected".into());
            return;
        };

        self.error_message = None;
        self.assessment = None;
        self.state = AssessState::Assessing;

        let record = self.record.clone();
        let options = AssessOptions {
            elevated_threshold: self.elevated_threshold,
        };
        let (tx, rx) = mpsc::channel();
        self.result_rx = Some(rx);

        std::thread::spawn(move || {
            let outcome = match cache::load(&model_path) {
                Ok(classifier) => {
                    AssessOutcome::Success(Box::new(assess(&classifier, &record, &options)))
                }
                Err(e) => AssessOutcome::Error(format!("{e}")),
            };
            let _ = tx.send(outcome);
        });
    }

    /// Poll for completion — called each frame.
    pub fn poll(&mut self) {
        if let Some(rx) = &self.result_rx {
            if let Ok(outcome) = rx.try_recv() {
                match outcome {
                    AssessOutcome::Success(assessment) => {
                        self.assessment = Some(*assessment);
                        self.state = AssessState::Complete;
                    }
                    AssessOutcome::Error(msg) => {
                        self.error_message = Some(msg);
                        self.state = AssessState::Idle;
                    }
                }
                self.result_rx = None;
            }
        }
    }
}

impl eframe::App for PredictorApp {
    fn update(&mut self, ctx: &eframe::egui::Context, _frame: &mut eframe::Frame) {
        self.poll();

        // Request repaint while the worker runs so the spinner animates
        if self.state == AssessState::Assessing {
            ctx.request_repaint();
        }

        crate::ui::sidebar::draw_sidebar(ctx, self);
        crate::ui::form_view::draw_form_view(ctx, self);
    }
}

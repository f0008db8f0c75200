//! Result card: probability, band verdict, guidance message.

use eframe::egui;

use crate::app::PredictorApp;
use crate::ui::theme;

pub fn draw_result(ui: &mut egui::Ui, app: &PredictorApp) {
    let Some(assessment) = &app.assessment else {
        return;
    };

    ui.heading("Prediction Result");
    ui.add_space(4.0);

    if let Some(err) = &assessment.error {
        ui.colored_label(theme::COLOR_ERROR, err);
        ui.label("The reported probability is a default, not a risk estimate.");
        return;
    }

    ui.label(format!(
        "Predicted 10-year CHD risk: {:.1}%",
        assessment.probability * 100.0
    ));
    ui.add(egui::ProgressBar::new(assessment.probability as f32).show_percentage());

    ui.add_space(4.0);
    ui.colored_label(theme::band_color(assessment.band), assessment.band.label());
    ui.label(assessment.band.guidance());

    ui.add_space(8.0);
    ui.small(
        "Predictive tool only - not a substitute for professional medical \
         diagnosis or advice.",
    );
}

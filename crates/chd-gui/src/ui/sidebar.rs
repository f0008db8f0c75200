//! Left panel: model artifact picker, banding threshold, assess button.

use eframe::egui;

use crate::app::{AssessState, PredictorApp};

pub fn draw_sidebar(ctx: &egui::Context, app: &mut PredictorApp) {
    egui::SidePanel::left("sidebar")
        .resizable(true)
        .default_width(220.0)
        .min_width(180.0)
        .show(ctx, |ui| {
            ui.vertical(|ui| {
                ui.heading("CHD RISK PREDICTOR");
                ui.label("v0.1.0");
                ui.separator();

                // Model artifact picker
                ui.label("MODEL");
                if ui.button("Select Artifact...").clicked() {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("Model Artifact", &["json"])
                        .pick_file()
                    {
                        app.model_path = Some(path);
                    }
                }
                if let Some(p) = &app.model_path {
                    ui.small(
                        p.file_name()
                            .map(|f| f.to_string_lossy().to_string())
                            .unwrap_or_else(|| "?".into()),
                    );
                }
                ui.add_space(4.0);
                ui.separator();

                // Settings
                ui.label("SETTINGS");
                ui.horizontal(|ui| {
                    ui.label("Elevated at:");
                    ui.add(
                        egui::Slider::new(&mut app.elevated_threshold, 0.05..=0.45).step_by(0.05),
                    );
                });

                ui.add_space(8.0);

                // Assess button
                let is_assessing = app.state == AssessState::Assessing;
                ui.add_enabled_ui(!is_assessing, |ui| {
                    if ui
                        .add_sized([ui.available_width(), 32.0], egui::Button::new("ASSESS"))
                        .clicked()
                    {
                        app.start_assessment();
                    }
                });

                // Error message
                if let Some(err) = &app.error_message {
                    ui.add_space(4.0);
                    ui.colored_label(super::theme::COLOR_ERROR, err);
                }
            });
        });
}

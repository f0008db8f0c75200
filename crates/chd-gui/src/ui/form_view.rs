//! Central panel: patient metrics form, input review, result card.

use eframe::egui;

use chd_core::features::{Education, Sex, YesNo};

use crate::app::{AssessState, PredictorApp};
use crate::ui::result_view;

pub fn draw_form_view(ctx: &egui::Context, app: &mut PredictorApp) {
    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Enter Patient Health Metrics");
                ui.add_space(8.0);

                ui.columns(3, |cols| {
                    draw_demographics(&mut cols[0], app);
                    draw_conditions(&mut cols[1], app);
                    draw_measures(&mut cols[2], app);
                });

                ui.add_space(8.0);
                draw_input_review(ui, app);

                ui.separator();
                match app.state {
                    AssessState::Idle => {
                        ui.label(
                            "Select a model artifact, fill in the form, then click ASSESS.",
                        );
                    }
                    AssessState::Assessing => {
                        ui.horizontal(|ui| {
                            ui.spinner();
                            ui.label("Loading model and assessing...");
                        });
                    }
                    AssessState::Complete => {
                        result_view::draw_result(ui, app);
                    }
                }
            });
    });
}

fn draw_demographics(ui: &mut egui::Ui, app: &mut PredictorApp) {
    ui.strong("Demographics");
    ui.add_space(4.0);

    ui.label("Sex");
    ui.horizontal(|ui| {
        ui.radio_value(&mut app.record.sex, Sex::Female, "Female");
        ui.radio_value(&mut app.record.sex, Sex::Male, "Male");
    });

    ui.label("Age (years)");
    ui.add(egui::Slider::new(&mut app.record.age, 18.0..=100.0).integer());

    ui.label("Education level");
    egui::ComboBox::from_id_salt("education")
        .selected_text(format!(
            "{} - {}",
            app.record.education.code(),
            app.record.education.describe()
        ))
        .show_ui(ui, |ui| {
            for level in Education::ALL {
                ui.selectable_value(
                    &mut app.record.education,
                    level,
                    format!("{} - {}", level.code(), level.describe()),
                );
            }
        });

    ui.label("Cigarettes per day");
    ui.add(
        egui::DragValue::new(&mut app.record.cigs_per_day)
            .range(0.0..=100.0)
            .speed(1.0),
    );
}

fn draw_conditions(ui: &mut egui::Ui, app: &mut PredictorApp) {
    ui.strong("Pre-existing Conditions");
    ui.add_space(4.0);

    yes_no_row(ui, "History of hypertension?", &mut app.record.prevalent_hyp);
    yes_no_row(ui, "History of diabetes?", &mut app.record.diabetes);
    yes_no_row(ui, "History of stroke?", &mut app.record.prevalent_stroke);
    yes_no_row(ui, "On BP medication?", &mut app.record.bp_meds);
}

fn yes_no_row(ui: &mut egui::Ui, label: &str, value: &mut YesNo) {
    ui.label(label);
    ui.horizontal(|ui| {
        ui.radio_value(value, YesNo::No, "No");
        ui.radio_value(value, YesNo::Yes, "Yes");
    });
    ui.add_space(2.0);
}

fn draw_measures(ui: &mut egui::Ui, app: &mut PredictorApp) {
    ui.strong("Physiological Measures");
    ui.add_space(4.0);

    ui.label("Total cholesterol (mg/dL)");
    ui.add(
        egui::DragValue::new(&mut app.record.total_cholesterol)
            .range(100.0..=600.0)
            .speed(1.0),
    );

    ui.label("Glucose (mg/dL)");
    ui.add(
        egui::DragValue::new(&mut app.record.glucose)
            .range(50.0..=500.0)
            .speed(1.0),
    );

    ui.label("BMI (kg/m2)");
    ui.add(
        egui::DragValue::new(&mut app.record.bmi)
            .range(15.0..=60.0)
            .speed(0.1)
            .fixed_decimals(1),
    );

    ui.label("Heart rate (bpm)");
    ui.add(
        egui::DragValue::new(&mut app.record.heart_rate)
            .range(40.0..=180.0)
            .speed(1.0),
    );
}

fn draw_input_review(ui: &mut egui::Ui, app: &PredictorApp) {
    egui::CollapsingHeader::new("Review input data")
        .default_open(false)
        .show(ui, |ui| {
            egui::Grid::new("input_review")
                .striped(true)
                .min_col_width(90.0)
                .show(ui, |ui| {
                    ui.strong("Feature");
                    ui.strong("Value");
                    ui.end_row();
                    for (name, value) in app.record.to_features().named() {
                        ui.monospace(name);
                        ui.monospace(format!("{value}"));
                        ui.end_row();
                    }
                });
        });
}

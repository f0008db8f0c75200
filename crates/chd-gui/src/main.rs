//! CHD Risk Predictor GUI — eframe/egui desktop application.

mod app;
mod ui;

use app::PredictorApp;

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title("Ten-Year CHD Risk Predictor")
            .with_inner_size([900.0, 650.0])
            .with_min_inner_size([700.0, 450.0]),
        ..Default::default()
    };

    eframe::run_native(
        "CHD Risk Predictor",
        options,
        Box::new(|cc| {
            ui::theme::apply_theme(&cc.egui_ctx);
            Ok(Box::new(PredictorApp::new()))
        }),
    )
}

//! Dark clinical theme with band accent colors.

use chd_core::report::RiskBand;
use eframe::egui::{self, Color32, Visuals};

pub const COLOR_HIGH: Color32 = Color32::from_rgb(230, 70, 70);
pub const COLOR_ELEVATED: Color32 = Color32::from_rgb(230, 180, 50);
pub const COLOR_LOW: Color32 = Color32::from_rgb(70, 200, 100);
pub const COLOR_ERROR: Color32 = Color32::from_rgb(230, 140, 50);

pub fn band_color(band: RiskBand) -> Color32 {
    match band {
        RiskBand::Low => COLOR_LOW,
        RiskBand::Elevated => COLOR_ELEVATED,
        RiskBand::High => COLOR_HIGH,
    }
}

pub fn apply_theme(ctx: &egui::Context) {
    let mut visuals = Visuals::dark();
    visuals.override_text_color = Some(Color32::from_rgb(220, 220, 220));
    ctx.set_visuals(visuals);

    let mut style = (*ctx.style()).clone();
    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    ctx.set_style(style);
}

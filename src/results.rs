use eframe::egui;

use crate::types::{CalculationResult, ErrorState};

pub fn result_lines(result: &CalculationResult) -> [(&'static str, String); 4] {
    [
        ("Optimal x", result.optimal_x.to_string()),
        ("Optimal y", result.optimal_y.to_string()),
        ("Optimal z", result.optimal_z.to_string()),
        ("Max damage", result.max_damage.to_string()),
    ]
}

pub fn draw_result(ui: &mut egui::Ui, result: Option<&CalculationResult>) {
    let Some(result) = result else {
        return;
    };

    ui.heading("Optimal build");
    egui::Grid::new("calculation-result")
        .num_columns(2)
        .spacing([24.0, 4.0])
        .show(ui, |ui| {
            for (label, value) in result_lines(result) {
                ui.label(label);
                ui.strong(value);
                ui.end_row();
            }
        });
}

pub fn draw_error(ui: &mut egui::Ui, error: Option<&ErrorState>) {
    if let Some(error) = error {
        ui.colored_label(egui::Color32::from_rgb(230, 100, 100), &error.message);
    }
}
